use chrono::{DateTime, SubsecRound, TimeZone, Utc};

use crate::constants::TIMESTAMP_FORMAT;
use crate::error::CoreError;

/// Caller-assigned asset key.
pub type AssetId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Source of "now" for `createdAt` / `updatedAt` stamping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl FixedClock {
    /// Pin the clock at `secs` seconds after the Unix epoch.
    pub fn at_unix(secs: i64) -> Self {
        Self(Utc.timestamp_opt(secs, 0).single().unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Drop the sub-second part. Stored timestamps are whole seconds.
pub fn truncate_to_seconds(ts: Timestamp) -> Timestamp {
    ts.trunc_subsecs(0)
}

/// Render a ledger `(seconds, nanos)` pair as `YYYY-MM-DDThh:mm:ssZ`.
///
/// The nanosecond part is validated but not rendered.
pub fn format_ledger_timestamp(seconds: i64, nanos: u32) -> Result<String, CoreError> {
    let ts = DateTime::<Utc>::from_timestamp(seconds, nanos).ok_or_else(|| {
        CoreError::Decode(format!("invalid ledger timestamp {seconds}s {nanos}ns"))
    })?;
    Ok(ts.format(TIMESTAMP_FORMAT).to_string())
}
