//! Exporter registry.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::FilterSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExporterPayload {
    pub cert_id: String,
}

pub type Exporter = Asset<ExporterPayload>;

pub struct ExporterKind;

impl AssetKind for ExporterKind {
    type Payload = ExporterPayload;

    const TAG: &'static str = "exporter";
    const LIST_LABEL: &'static str = "All Exporter";
    const FILTER: FilterSchema = super::CERT_ID_ONLY;
}
