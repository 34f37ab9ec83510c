//! Request sequencing for overlapping fetches.
//!
//! Every fetch a controller starts takes a [`RequestToken`] from its
//! [`RequestSequence`]. When the fetch resolves, the controller applies the
//! result only if its token is still the latest one issued; anything older
//! lost the race to a newer request and is dropped.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one in-flight request within a [`RequestSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Position of this request in its sequence (first request is 1).
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic token issuer.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, making every previously issued token stale.
    pub fn begin(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `token` belongs to the most recently started request.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest.load(Ordering::SeqCst) == token.0
    }
}
