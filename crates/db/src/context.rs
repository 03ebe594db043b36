use agritrace_core::identity::Identity;
use agritrace_core::ledger::Ledger;
use agritrace_core::types::{truncate_to_seconds, Clock, SystemClock, Timestamp};

/// Everything one invocation needs: the ledger it reads and writes, who is
/// calling, and the clock used for `createdAt` / `updatedAt`.
#[derive(Clone, Copy)]
pub struct TxContext<'a> {
    pub ledger: &'a dyn Ledger,
    pub identity: &'a dyn Identity,
    pub clock: &'a dyn Clock,
}

impl<'a> TxContext<'a> {
    pub fn new(ledger: &'a dyn Ledger, identity: &'a dyn Identity) -> Self {
        Self {
            ledger,
            identity,
            clock: &SystemClock,
        }
    }

    pub fn with_clock(self, clock: &'a dyn Clock) -> Self {
        Self { clock, ..self }
    }

    /// Current time, second precision.
    pub fn now(&self) -> Timestamp {
        truncate_to_seconds(self.clock.now())
    }
}
