//! In-process ledger.
//!
//! Keeps current state in key order and an append-only version chain per
//! key. Rich queries evaluate selectors against the JSON of every live
//! value; values that are not JSON never match. One `MemoryLedger` is one
//! namespace, so each asset kind gets its own.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use agritrace_core::ledger::{
    HistoryIter, KeyModification, Ledger, LedgerError, StateIter, StateRecord,
};
use agritrace_core::selector::SelectorDoc;
use agritrace_core::types::{Clock, SystemClock};
use async_trait::async_trait;

use super::matcher;

/// Ledger primitives, for targeted fault injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Get,
    Put,
    Delete,
    Query,
    QueryPaged,
    Range,
    History,
}

#[derive(Default)]
struct LedgerState {
    current: BTreeMap<String, Vec<u8>>,
    versions: HashMap<String, Vec<KeyModification>>,
}

pub struct MemoryLedger {
    state: Mutex<LedgerState>,
    clock: Arc<dyn Clock>,
    open_cursors: Arc<AtomicUsize>,
    available: AtomicBool,
    armed_failures: Mutex<Vec<LedgerOp>>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Version timestamps come from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            clock,
            open_cursors: Arc::new(AtomicUsize::new(0)),
            available: AtomicBool::new(true),
            armed_failures: Mutex::new(Vec::new()),
        }
    }

    /// Number of iterators handed out and not yet dropped.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    /// While unavailable, every primitive fails with [`LedgerError::Io`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Fail the next call to `op` only.
    pub fn fail_next(&self, op: LedgerOp) {
        if let Ok(mut armed) = self.armed_failures.lock() {
            armed.push(op);
        }
    }

    /// Number of live keys.
    pub fn live_keys(&self) -> usize {
        self.lock().map(|s| s.current.len()).unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Io("ledger state lock poisoned".into()))
    }

    fn check(&self, op: LedgerOp) -> Result<(), LedgerError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(LedgerError::Io(format!("ledger unavailable ({op:?})")));
        }
        let mut armed = self
            .armed_failures
            .lock()
            .map_err(|_| LedgerError::Io("fault list lock poisoned".into()))?;
        if let Some(pos) = armed.iter().position(|o| *o == op) {
            armed.remove(pos);
            return Err(LedgerError::Io(format!("injected failure ({op:?})")));
        }
        Ok(())
    }

    fn append_version(&self, state: &mut LedgerState, key: &str, value: Vec<u8>, is_delete: bool) {
        let now = self.clock.now();
        state
            .versions
            .entry(key.to_owned())
            .or_default()
            .push(KeyModification {
                tx_id: uuid::Uuid::new_v4().to_string(),
                value,
                is_delete,
                timestamp_seconds: now.timestamp(),
                timestamp_nanos: now.timestamp_subsec_nanos(),
            });
    }

    /// Live records matching the query document, in key order, with the
    /// document's own `skip` / `limit` applied after `bookmark`.
    fn run_query(&self, query: &str, bookmark: &str) -> Result<Vec<StateRecord>, LedgerError> {
        let doc: SelectorDoc = serde_json::from_str(query)
            .map_err(|e| LedgerError::Query(format!("invalid query document: {e}")))?;
        let state = self.lock()?;

        let mut matched = Vec::new();
        for (key, value) in &state.current {
            if !bookmark.is_empty() && key.as_str() <= bookmark {
                continue;
            }
            let Ok(json) = serde_json::from_slice::<serde_json::Value>(value) else {
                continue;
            };
            if matcher::matches(&doc.selector, &json)? {
                matched.push(StateRecord {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
        }

        let skip = usize::try_from(doc.skip.unwrap_or(0)).unwrap_or(usize::MAX);
        let mut records: Vec<StateRecord> = matched.into_iter().skip(skip).collect();
        if let Some(limit) = doc.limit {
            records.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        }
        Ok(records)
    }

    fn cursor<T: Send + 'static>(&self, items: Vec<T>) -> Box<Cursor<T>> {
        Box::new(Cursor::open(items, Arc::clone(&self.open_cursors)))
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
        self.check(LedgerOp::Get)?;
        Ok(self.lock()?.current.get(key).cloned())
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check(LedgerOp::Put)?;
        let mut state = self.lock()?;
        state.current.insert(key.to_owned(), value.clone());
        self.append_version(&mut state, key, value, false);
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), LedgerError> {
        self.check(LedgerOp::Delete)?;
        let mut state = self.lock()?;
        if state.current.remove(key).is_some() {
            self.append_version(&mut state, key, Vec::new(), true);
        }
        Ok(())
    }

    async fn query(&self, query: &str) -> Result<StateIter, LedgerError> {
        self.check(LedgerOp::Query)?;
        let records = self.run_query(query, "")?;
        let iter: StateIter = self.cursor(records);
        Ok(iter)
    }

    async fn query_paged(
        &self,
        query: &str,
        page_size: u32,
        bookmark: &str,
    ) -> Result<(StateIter, String), LedgerError> {
        self.check(LedgerOp::QueryPaged)?;
        let mut records = self.run_query(query, bookmark)?;

        let mut next_bookmark = String::new();
        let page_size = page_size as usize;
        if page_size > 0 && records.len() > page_size {
            records.truncate(page_size);
            if let Some(last) = records.last() {
                next_bookmark = last.key.clone();
            }
        }
        let iter: StateIter = self.cursor(records);
        Ok((iter, next_bookmark))
    }

    async fn range(&self, start: &str, end: &str) -> Result<StateIter, LedgerError> {
        self.check(LedgerOp::Range)?;
        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_owned())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_owned())
        };
        if let (Bound::Included(s), Bound::Excluded(e)) = (&lower, &upper) {
            if s >= e {
                let iter: StateIter = self.cursor(Vec::<StateRecord>::new());
                return Ok(iter);
            }
        }

        let records: Vec<StateRecord> = self
            .lock()?
            .current
            .range((lower, upper))
            .map(|(key, value)| StateRecord {
                key: key.clone(),
                value: value.clone(),
            })
            .collect();
        let iter: StateIter = self.cursor(records);
        Ok(iter)
    }

    async fn history(&self, key: &str) -> Result<HistoryIter, LedgerError> {
        self.check(LedgerOp::History)?;
        let versions = self.lock()?.versions.get(key).cloned().unwrap_or_default();
        let iter: HistoryIter = self.cursor(versions);
        Ok(iter)
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Snapshot iterator that counts itself as an open cursor until dropped.
pub struct Cursor<T> {
    items: std::vec::IntoIter<T>,
    open: Arc<AtomicUsize>,
}

impl<T> Cursor<T> {
    fn open(items: Vec<T>, open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self {
            items: items.into_iter(),
            open,
        }
    }
}

impl<T> Iterator for Cursor<T> {
    type Item = Result<T, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(Ok)
    }
}

impl<T> Drop for Cursor<T> {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}
