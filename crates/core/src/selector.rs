//! Selector builder.
//!
//! Turns a [`FilterSpec`] into a rich-query document of the shape
//! `{"selector": {...}, "skip": n, "limit": n}`. Each rule of the kind's
//! [`FilterSchema`] contributes at most one predicate and the predicates are
//! ANDed. A one-sided range contributes nothing: both bounds or no range.
//!
//! Criterion values are plain strings, numbers or booleans. Anything else is
//! a decode error, so a caller can never smuggle query operators in.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::constants::FILTER_SEARCH;
use crate::error::CoreError;
use crate::filter::{FilterSchema, FilterSpec};

/// A rich-query document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorDoc {
    pub selector: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl SelectorDoc {
    /// Matches every live asset.
    pub fn all() -> Self {
        Self {
            selector: Value::Object(Map::new()),
            skip: None,
            limit: None,
        }
    }

    /// Same predicates, with paging. Zero values are left out of the document.
    pub fn with_page(&self, skip: u64, limit: u64) -> Self {
        Self {
            selector: self.selector.clone(),
            skip: (skip > 0).then_some(skip),
            limit: (limit > 0).then_some(limit),
        }
    }

    /// Add `field == value` to the predicates.
    pub fn and_equals(self, field: &str, value: Value) -> Self {
        let selector = match self.selector {
            Value::Object(mut map) if !map.contains_key("$and") => {
                map.insert(field.to_owned(), value);
                Value::Object(map)
            }
            other => json!({ "$and": [other, { field: value }] }),
        };
        Self { selector, ..self }
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(self).map_err(|e| CoreError::Decode(e.to_string()))
    }
}

/// Build the selector for `filter` under `schema`.
pub fn build(schema: &FilterSchema, filter: &FilterSpec) -> Result<SelectorDoc, CoreError> {
    let mut predicates = Map::new();

    for exact in schema.exact {
        if let Some(value) = scalar(filter, exact.key)? {
            predicates.insert(exact.field.to_owned(), value.clone());
        }
    }

    for range in schema.ranges {
        if let (Some(from), Some(to)) = (scalar(filter, range.from)?, scalar(filter, range.to)?) {
            predicates.insert(
                range.field.to_owned(),
                json!({ "$gte": from, "$lte": to }),
            );
        }
    }

    for elem in schema.elem_matches {
        let Some(value) = scalar(filter, elem.key)? else {
            continue;
        };
        let entry = predicates
            .entry(elem.array_field.to_owned())
            .or_insert_with(|| json!({ "$elemMatch": {} }));
        if let Some(Value::Object(sub)) = entry.get_mut("$elemMatch") {
            sub.insert(elem.sub_key.to_owned(), value.clone());
        }
    }

    for flag in schema.flags {
        if filter.criterion(flag.key).is_some() {
            predicates.insert(flag.field.to_owned(), Value::String(flag.value.to_owned()));
        }
    }

    let search = match filter.criterion(FILTER_SEARCH) {
        None => None,
        Some(Value::String(term)) => Some(term.as_str()).filter(|t| !t.is_empty()),
        Some(other) => {
            return Err(CoreError::Decode(format!(
                "{FILTER_SEARCH} must be a string, got {other}"
            )))
        }
    };

    let selector = match search {
        Some(term) if !schema.search_fields.is_empty() => {
            let pattern = regex::escape(term);
            let any_of: Vec<Value> = schema
                .search_fields
                .iter()
                .map(|field| json!({ *field: { "$regex": pattern } }))
                .collect();
            json!({ "$and": [Value::Object(predicates), { "$or": any_of }] })
        }
        _ => Value::Object(predicates),
    };

    Ok(SelectorDoc {
        selector,
        skip: None,
        limit: None,
    })
}

/// The criterion under `key`, which must be a string, number or boolean.
fn scalar<'a>(filter: &'a FilterSpec, key: &str) -> Result<Option<&'a Value>, CoreError> {
    match filter.criterion(key) {
        Some(Value::Array(_) | Value::Object(_)) => Err(CoreError::Decode(format!(
            "filter criterion {key} must be a string, number or boolean"
        ))),
        other => Ok(other),
    }
}
