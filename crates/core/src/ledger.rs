//! Ledger port.
//!
//! The ledger is an append-only, versioned key-value store with a rich-query
//! secondary index. Repositories only ever see current state through
//! [`Ledger::get_state`] / [`Ledger::query`], and the version chain through
//! [`Ledger::history`]. Physical versioning, ordering and commit belong to
//! the ledger implementation.
//!
//! Iterators returned here hold ledger-side cursors. Dropping an iterator
//! closes its cursor, so every exit path of a repository operation releases
//! what it opened.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("ledger I/O failure: {0}")]
    Io(String),

    #[error("malformed rich query: {0}")]
    Query(String),
}

/// One current-state entry returned by a rich query or range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub key: String,
    pub value: Vec<u8>,
}

/// One entry of a key's version chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyModification {
    pub tx_id: String,
    /// Empty when `is_delete` is set.
    pub value: Vec<u8>,
    pub is_delete: bool,
    pub timestamp_seconds: i64,
    pub timestamp_nanos: u32,
}

/// Cursor over current-state entries.
pub type StateIter = Box<dyn Iterator<Item = Result<StateRecord, LedgerError>> + Send>;

/// Cursor over a key's version chain, oldest first.
pub type HistoryIter = Box<dyn Iterator<Item = Result<KeyModification, LedgerError>> + Send>;

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Current value of `key`, or `None` if absent or tombstoned.
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Tombstone `key`. The version chain keeps the deletion.
    async fn del_state(&self, key: &str) -> Result<(), LedgerError>;

    /// Run a selector document (`{"selector": {...}, "skip"?, "limit"?}`).
    async fn query(&self, query: &str) -> Result<StateIter, LedgerError>;

    /// Run a selector document one page at a time. A `page_size` of zero
    /// leaves the page unbounded. Returns the bookmark for the next page,
    /// empty when there is none.
    async fn query_paged(
        &self,
        query: &str,
        page_size: u32,
        bookmark: &str,
    ) -> Result<(StateIter, String), LedgerError>;

    /// Scan live keys in `[start, end)`. Empty bounds are open.
    async fn range(&self, start: &str, end: &str) -> Result<StateIter, LedgerError>;

    async fn history(&self, key: &str) -> Result<HistoryIter, LedgerError>;
}
