//! Packing event registry.
//!
//! A packing event records one lot moving from a farmer's GAP-certified area
//! through a GMP-certified packing house. Its `processSteps` list is the
//! workflow the lot went through, each entry numbered by `step`.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::{ElemMatchField, ExactField, FilterSchema, RangeField};
use agritrace_core::history::order_steps_desc;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// One workflow stage of a packing event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProcessStep {
    pub step: u64,
    pub status: String,
    pub name: String,
    pub completed_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackingPayload {
    pub order_id: String,
    pub cert_id: String,
    pub farmer_id: String,
    pub packer_id: String,
    pub gmp: String,
    pub gap: String,
    pub packing_house_name: String,
    pub forecast_weight: f64,
    pub actual_weight: f64,
    pub final_weight: f64,
    pub is_packer_saved: bool,
    pub saved_time: String,
    pub is_approved: bool,
    pub approved_date: String,
    pub approved_type: String,
    pub remark: String,
    pub process_status: String,
    pub process_steps: Vec<ProcessStep>,
}

pub type Packing = Asset<PackingPayload>;

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

pub struct PackingKind;

const fn exact(key: &'static str) -> ExactField {
    ExactField { key, field: key }
}

impl AssetKind for PackingKind {
    type Payload = PackingPayload;

    const TAG: &'static str = "packing";
    const LIST_LABEL: &'static str = "All Packing";
    const FILTER: FilterSchema = FilterSchema {
        exact: &[
            exact("packerId"),
            exact("gap"),
            exact("certId"),
            exact("farmerId"),
            exact("processStatus"),
        ],
        ranges: &[
            RangeField {
                field: "createdAt",
                from: "startDate",
                to: "endDate",
            },
            RangeField {
                field: "forecastWeight",
                from: "forecastWeightFrom",
                to: "forecastWeightTo",
            },
        ],
        search_fields: &["gmp", "packingHouseName"],
        elem_matches: &[ElemMatchField {
            key: "stepStatus",
            array_field: "processSteps",
            sub_key: "status",
        }],
        flags: &[],
    };
    const IMMUTABLE_ON_UPDATE: &'static [&'static str] = &["farmerId", "packerId"];

    fn order_steps(payload: &mut PackingPayload) {
        order_steps_desc(&mut payload.process_steps, |s| s.step);
    }
}
