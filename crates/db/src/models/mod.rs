//! Per-kind payloads and their [`AssetKind`](agritrace_core::asset::AssetKind)
//! configuration.
//!
//! Each submodule contains:
//! - A `#[serde(default)]` payload struct holding the kind's domain fields
//! - A zero-sized kind marker declaring its tag, list label, filter schema,
//!   and update rules
//! - An `Asset<Payload>` alias for the stored record

use agritrace_core::filter::{ExactField, FilterSchema};

pub mod exporter;
pub mod farmer;
pub mod gap;
pub mod gmp;
pub mod packer;
pub mod packing;
pub mod regulator;
pub mod staff;

pub use exporter::ExporterKind;
pub use farmer::FarmerKind;
pub use gap::GapKind;
pub use gmp::GmpKind;
pub use packer::PackerKind;
pub use packing::PackingKind;
pub use regulator::RegulatorKind;
pub use staff::StaffKind;

/// Schema for kinds whose only list criterion is the certificate id.
pub(crate) const CERT_ID_ONLY: FilterSchema = FilterSchema {
    exact: &[ExactField {
        key: "certId",
        field: "certId",
    }],
    ..FilterSchema::EMPTY
};
