//! Audit-trail records built from a key's version chain.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::CoreError;
use crate::ledger::KeyModification;
use crate::types::format_ledger_timestamp;

/// One historical mutation of a key.
///
/// `value` holds the decoded state written by that version, or nothing when
/// the version is a tombstone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord<T> {
    #[serde(rename = "tx_id")]
    pub tx_id: String,
    pub is_delete: bool,
    pub value: Vec<T>,
    /// `YYYY-MM-DDThh:mm:ssZ`.
    pub timestamp: String,
}

impl<T: DeserializeOwned> VersionRecord<T> {
    /// Build the record for one ledger version. Only this version's own value
    /// is carried; nothing accumulates across versions.
    pub fn from_modification(modification: KeyModification) -> Result<Self, CoreError> {
        let timestamp =
            format_ledger_timestamp(modification.timestamp_seconds, modification.timestamp_nanos)?;

        let value = if modification.is_delete {
            Vec::new()
        } else {
            vec![codec::decode(&modification.value)?]
        };

        Ok(Self {
            tx_id: modification.tx_id,
            is_delete: modification.is_delete,
            value,
            timestamp,
        })
    }
}

impl<T> VersionRecord<T> {
    pub fn map_values(&mut self, f: impl FnMut(&mut T)) {
        self.value.iter_mut().for_each(f);
    }
}

/// Sort an ordered multi-step collection by its sequence counter, highest
/// first. Steps with equal counters keep their stored order.
pub fn order_steps_desc<S>(steps: &mut [S], sequence: impl Fn(&S) -> u64) {
    steps.sort_by(|a, b| sequence(b).cmp(&sequence(a)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::{json, Value};

    fn modification(value: &str, is_delete: bool) -> KeyModification {
        KeyModification {
            tx_id: "tx-1".into(),
            value: value.as_bytes().to_vec(),
            is_delete,
            timestamp_seconds: 1_700_000_000,
            timestamp_nanos: 123,
        }
    }

    #[test]
    fn live_version_carries_its_value() {
        let record: VersionRecord<Value> =
            VersionRecord::from_modification(modification(r#"{"id":"A1"}"#, false)).unwrap();
        assert_eq!(record.value, vec![json!({"id": "A1"})]);
        assert_eq!(record.timestamp, "2023-11-14T22:13:20Z");
        assert!(!record.is_delete);
    }

    #[test]
    fn tombstone_has_empty_value() {
        let record: VersionRecord<Value> =
            VersionRecord::from_modification(modification("", true)).unwrap();
        assert!(record.is_delete);
        assert!(record.value.is_empty());
    }

    #[test]
    fn corrupt_version_is_a_decode_error() {
        assert_matches!(
            VersionRecord::<Value>::from_modification(modification("{oops", false)),
            Err(CoreError::Decode(_))
        );
    }

    #[test]
    fn serializes_with_ledger_field_names() {
        let record: VersionRecord<Value> =
            VersionRecord::from_modification(modification("", true)).unwrap();
        let text = serde_json::to_value(&record).unwrap();
        assert_eq!(
            text,
            json!({"tx_id": "tx-1", "isDelete": true, "value": [], "timestamp": "2023-11-14T22:13:20Z"})
        );
    }

    #[test]
    fn steps_sorted_by_sequence_descending_and_stable() {
        let mut steps = vec![(1, "a"), (3, "b"), (2, "c"), (3, "d")];
        order_steps_desc(&mut steps, |s| s.0);
        assert_eq!(steps, vec![(3, "b"), (3, "d"), (2, "c"), (1, "a")]);
    }
}
