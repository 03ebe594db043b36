//! JSON-string boundary over the asset registries.
//!
//! Callers name an asset kind, an operation and a JSON argument string; the
//! [`Contract`] routes the call through the [`KindRegistry`] to the generic
//! repositories and renders the result (or a `{error, code}` envelope) back
//! to JSON.

pub mod config;
pub mod contract;
pub mod error;
pub mod handlers;
pub mod operation;
pub mod registry;
pub mod response;

pub use contract::{Contract, Invocation};
pub use error::{ContractError, ContractResult};
pub use operation::Operation;
pub use registry::KindRegistry;
