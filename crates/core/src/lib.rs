//! Domain layer for the agritrace registries.
//!
//! Holds everything that does not touch a concrete ledger: the ports
//! ([`ledger::Ledger`], [`identity::Identity`], [`types::Clock`]), the asset
//! envelope, filter and selector composition, history records, and the
//! shared error taxonomy.

pub mod asset;
pub mod codec;
pub mod constants;
pub mod error;
pub mod filter;
pub mod history;
pub mod identity;
pub mod ledger;
pub mod page;
pub mod selector;
pub mod types;
