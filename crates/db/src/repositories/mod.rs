//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&TxContext` as the first argument. The asset and history
//! repositories are generic over the asset kind.

pub mod asset_repo;
pub mod history_repo;
pub mod query_executor;

pub use asset_repo::AssetRepo;
pub use history_repo::{AssetVersion, HistoryRepo};
pub use query_executor::QueryExecutor;
