//! GAP (farm area) certificate registry.
//!
//! A GAP certificate is bound to at most one farmer through `farmerId`. The
//! binding is set at creation and is not changed by a generic update. The
//! `availableGap` criterion lists certificates not yet bound to anyone.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::{ExactField, FilterSchema, FlagField, RangeField};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GapPayload {
    pub cert_id: String,
    pub area_code: String,
    pub area_rai: f64,
    pub area_status: String,
    pub old_area_code: String,
    pub issue_date: String,
    pub expire_date: String,
    pub district: String,
    pub province: String,
    pub updated_date: String,
    pub source: String,
    pub farmer_id: String,
}

pub type Gap = Asset<GapPayload>;

pub struct GapKind;

const fn exact(key: &'static str) -> ExactField {
    ExactField { key, field: key }
}

impl AssetKind for GapKind {
    type Payload = GapPayload;

    const TAG: &'static str = "gap";
    const LIST_LABEL: &'static str = "All GAP";
    const FILTER: FilterSchema = FilterSchema {
        exact: &[
            exact("certId"),
            exact("areaCode"),
            exact("district"),
            exact("province"),
            exact("issueDate"),
            exact("expireDate"),
        ],
        ranges: &[RangeField {
            field: "areaRai",
            from: "areaRaiFrom",
            to: "areaRaiTo",
        }],
        search_fields: &["certId", "areaCode", "district", "province"],
        elem_matches: &[],
        flags: &[FlagField {
            key: "availableGap",
            field: "farmerId",
            value: "",
        }],
    };
    const IMMUTABLE_ON_UPDATE: &'static [&'static str] = &["farmerId"];
}
