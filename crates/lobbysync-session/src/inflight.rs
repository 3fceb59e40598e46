//! Tracking for one request that is "in flight" toward the server.
//!
//! A request is modeled as a begin-mutation followed, some time later,
//! by an independent completion. Nothing ties a completion to the begin
//! that caused it, so if a second begin fires before the first answer
//! arrives, the first answer will settle the second request's loading
//! flag. [`InFlight`] doesn't prevent that. It makes it visible:
//! `begin` reports [`BeginOutcome::StrandedPrevious`] and bumps a counter
//! that callers and tests can read.

/// What happened when a request was begun.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// Nothing else was pending for this resource.
    Fresh,
    /// An earlier request was still pending and is now stranded: its
    /// answer can no longer be told apart from this one's.
    StrandedPrevious,
}

/// Pending-request tracker for a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InFlight {
    pending: bool,
    stranded: u32,
}

impl InFlight {
    /// Marks a request as sent.
    pub fn begin(&mut self) -> BeginOutcome {
        if self.pending {
            self.stranded += 1;
            BeginOutcome::StrandedPrevious
        } else {
            self.pending = true;
            BeginOutcome::Fresh
        }
    }

    /// Marks the resource as answered (successfully or not).
    pub fn settle(&mut self) {
        self.pending = false;
    }

    /// Returns `true` while a request is waiting for an answer.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// How many requests were begun on top of an unanswered one.
    pub fn stranded(&self) -> u32 {
        self.stranded
    }
}
