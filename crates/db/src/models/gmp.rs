//! GMP (packing-house) certificate registry.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::{ExactField, FilterSchema};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GmpPayload {
    pub name: String,
    pub packing_house_name: String,
    pub packing_house_register_number: String,
    pub address: String,
    pub updated_date: String,
    pub source: String,
}

pub type Gmp = Asset<GmpPayload>;

pub struct GmpKind;

impl AssetKind for GmpKind {
    type Payload = GmpPayload;

    const TAG: &'static str = "gmp";
    const LIST_LABEL: &'static str = "All GMP";
    const FILTER: FilterSchema = FilterSchema {
        exact: &[
            ExactField {
                key: "name",
                field: "name",
            },
            ExactField {
                key: "packingHouseRegisterNumber",
                field: "packingHouseRegisterNumber",
            },
            ExactField {
                key: "address",
                field: "address",
            },
        ],
        search_fields: &["name", "packingHouseName", "address"],
        ..FilterSchema::EMPTY
    };
}
