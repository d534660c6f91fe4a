//! Monotonic request tickets
//!
//! Every request that will update the display takes a ticket first. When its
//! response arrives, only the holder of the most recently issued ticket may
//! apply it; older responses are stale and get dropped.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of the order in which a request was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues strictly increasing tickets and tells whether one is still current
#[derive(Debug, Default)]
pub(crate) struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before it.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Returns true if no newer ticket has been issued since `ticket`.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
