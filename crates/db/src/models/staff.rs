//! Staff registry.
//!
//! Staff records are only listed to callers of the same organization.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::FilterSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StaffPayload {
    pub cert_id: String,
}

pub type Staff = Asset<StaffPayload>;

pub struct StaffKind;

impl AssetKind for StaffKind {
    type Payload = StaffPayload;

    const TAG: &'static str = "staff";
    const LIST_LABEL: &'static str = "All NstdaStaff";
    const FILTER: FilterSchema = super::CERT_ID_ONLY;
    const ORG_SCOPED_LIST: bool = true;
}
