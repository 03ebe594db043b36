//! Shared constants for every registry.

/// Rendering of stored and historical timestamps (second precision, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// ---------------------------------------------------------------------------
// Asset base fields (JSON names)
// ---------------------------------------------------------------------------

pub const FIELD_ID: &str = "id";
pub const FIELD_OWNER: &str = "owner";
pub const FIELD_ORG_NAME: &str = "orgName";
pub const FIELD_CREATED_AT: &str = "createdAt";
pub const FIELD_UPDATED_AT: &str = "updatedAt";

/// Fields a generic update never overwrites, whatever the asset kind.
pub const BASE_IMMUTABLE_FIELDS: &[&str] = &[
    FIELD_ID,
    FIELD_OWNER,
    FIELD_ORG_NAME,
    FIELD_CREATED_AT,
    FIELD_UPDATED_AT,
];

// ---------------------------------------------------------------------------
// Filter documents
// ---------------------------------------------------------------------------

/// Filter key carrying free-text search.
pub const FILTER_SEARCH: &str = "search";

/// Filter key for the page offset.
pub const FILTER_SKIP: &str = "skip";

/// Filter key for the page size.
pub const FILTER_LIMIT: &str = "limit";

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NOT_OWNER: &str = "submitting client does not own the asset";
pub const MSG_EMPTY_ID: &str = "asset id must not be empty";
