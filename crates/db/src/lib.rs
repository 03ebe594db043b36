//! Repository layer for the agritrace registries.
//!
//! - [`repositories`]: one generic asset repository, the paginated query
//!   executor and the history reconstructor, all taking a [`TxContext`].
//! - [`models`]: the per-kind payloads and their [`AssetKind`] configuration.
//! - [`ledger`]: an in-process implementation of the ledger port.
//!
//! [`AssetKind`]: agritrace_core::asset::AssetKind

pub mod context;
pub mod ledger;
pub mod models;
pub mod repositories;

pub use context::TxContext;
