//! Farmer registry.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::FilterSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FarmerPayload {
    pub cert_id: String,
}

pub type Farmer = Asset<FarmerPayload>;

pub struct FarmerKind;

impl AssetKind for FarmerKind {
    type Payload = FarmerPayload;

    const TAG: &'static str = "farmer";
    const LIST_LABEL: &'static str = "All Farmer";
    const FILTER: FilterSchema = super::CERT_ID_ONLY;
}
