//! Ledger port implementations.

pub mod matcher;
pub mod memory;

pub use memory::{LedgerOp, MemoryLedger};
