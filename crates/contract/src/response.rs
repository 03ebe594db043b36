//! Response envelopes.

use serde::Serialize;

/// Standard `{ "data": T }` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// List envelope: `{"data": "<label>", "obj": [...], "total": n}`.
///
/// `obj` is always an array, empty when nothing matched.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: &'static str,
    pub obj: Vec<T>,
    pub total: u64,
}
