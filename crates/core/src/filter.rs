//! Filter specifications and the per-kind schemas that interpret them.
//!
//! A [`FilterSpec`] is what a caller sends: `skip`, `limit`, and a sparse
//! object of criteria. What each criterion means (exact match, half of a
//! range, free-text search, array membership, flag) is declared per asset
//! kind by a [`FilterSchema`]. Criteria the schema does not mention, and
//! criteria whose value is `null`, contribute nothing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::codec;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Criterion `key` must equal the asset's `field` (dotted paths allowed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactField {
    pub key: &'static str,
    pub field: &'static str,
}

/// Criteria `from` and `to` bound `field` inclusively. Both are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeField {
    pub field: &'static str,
    pub from: &'static str,
    pub to: &'static str,
}

/// Criterion `key` matches when some element of `array_field` has
/// `sub_key` equal to the criterion value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElemMatchField {
    pub key: &'static str,
    pub array_field: &'static str,
    pub sub_key: &'static str,
}

/// Presence of criterion `key` pins `field` to a fixed `value`,
/// whatever the criterion's own value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagField {
    pub key: &'static str,
    pub field: &'static str,
    pub value: &'static str,
}

/// How one asset kind interprets filter criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSchema {
    pub exact: &'static [ExactField],
    pub ranges: &'static [RangeField],
    /// Text fields OR-searched by the `search` criterion.
    pub search_fields: &'static [&'static str],
    pub elem_matches: &'static [ElemMatchField],
    pub flags: &'static [FlagField],
}

impl FilterSchema {
    /// Schema that ignores every criterion.
    pub const EMPTY: FilterSchema = FilterSchema {
        exact: &[],
        ranges: &[],
        search_fields: &[],
        elem_matches: &[],
        flags: &[],
    };
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

/// A caller's list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Number of matches to skip.
    #[serde(default)]
    pub skip: u64,
    /// Page size; 0 leaves the page unbounded.
    #[serde(default)]
    pub limit: u64,
    /// Remaining keys, interpreted by a [`FilterSchema`].
    #[serde(flatten)]
    pub criteria: Map<String, Value>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a filter document. Negative or non-numeric `skip` / `limit`
    /// are decode errors.
    pub fn parse(raw: impl AsRef<[u8]>) -> Result<Self, CoreError> {
        codec::decode(raw)
    }

    pub fn with_skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.criteria.insert(key.to_owned(), value);
        self
    }

    /// The criterion stored under `key`, treating `null` as absent.
    pub fn criterion(&self, key: &str) -> Option<&Value> {
        self.criteria.get(key).filter(|v| !v.is_null())
    }
}
