//! Packer registry.
//!
//! A packer is linked to a platform user and carries an embedded snapshot of
//! the GMP certificate of the packing house it works for.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::{ExactField, FilterSchema};
use serde::{Deserialize, Serialize};

/// Embedded GMP snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackerGmp {
    pub id: String,
    pub packer_id: String,
    pub packing_house_register_number: String,
    pub address: String,
    pub packing_house_name: String,
    pub updated_date: String,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PackerPayload {
    pub cert_id: String,
    pub user_id: String,
    pub packer_gmp: PackerGmp,
}

pub type Packer = Asset<PackerPayload>;

pub struct PackerKind;

impl AssetKind for PackerKind {
    type Payload = PackerPayload;

    const TAG: &'static str = "packer";
    const LIST_LABEL: &'static str = "All Packer";
    const FILTER: FilterSchema = FilterSchema {
        exact: &[
            ExactField {
                key: "certId",
                field: "certId",
            },
            ExactField {
                key: "userId",
                field: "userId",
            },
            ExactField {
                key: "packerGmp",
                field: "packerGmp.id",
            },
        ],
        ..FilterSchema::EMPTY
    };
    const IMMUTABLE_ON_UPDATE: &'static [&'static str] = &["userId"];
}
