use std::cell::{Cell, RefCell};
use std::future::Future;

use tokio_util::sync::CancellationToken;
use tracing::debug;

/// What a slot fetches; used for log context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPurpose {
    Coverage,
    Trail,
}

impl FetchPurpose {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FetchPurpose::Coverage => "coverage",
            FetchPurpose::Trail => "trail",
        }
    }
}

/// Result of a fetch routed through a `FetchSlot`.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Completed(T),
    /// A newer fetch for the same purpose was issued, or the slot was cancelled.
    Cancelled,
}

impl<T> FetchOutcome<T> {
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, FetchOutcome::Cancelled)
    }
}

struct ActiveFetch {
    id: u64,
    token: CancellationToken,
}

/// Admits at most one in-flight fetch; issuing a new one cancels the old.
pub struct FetchSlot {
    purpose: FetchPurpose,
    issued: Cell<u64>,
    active: RefCell<Option<ActiveFetch>>,
}

impl FetchSlot {
    #[must_use]
    pub const fn new(purpose: FetchPurpose) -> Self {
        Self {
            purpose,
            issued: Cell::new(0),
            active: RefCell::new(None),
        }
    }

    #[must_use]
    pub const fn purpose(&self) -> FetchPurpose {
        self.purpose
    }

    /// Whether a fetch issued through this slot is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.active.borrow().is_some()
    }

    /// Cancels the pending fetch, if any.
    pub fn cancel(&self) {
        if let Some(active) = self.active.borrow_mut().take() {
            debug!(
                purpose = self.purpose.as_str(),
                fetch = active.id,
                "Cancelling pending fetch"
            );
            active.token.cancel();
        }
    }

    /// Runs `fetch` as the slot's latest request.
    ///
    /// Any previously issued fetch is cancelled first. If this one is in turn
    /// superseded before it resolves, its future is dropped and `Cancelled` is
    /// returned instead of its result.
    pub async fn run<F, T>(&self, fetch: F) -> FetchOutcome<T>
    where
        F: Future<Output = T>,
    {
        self.cancel();
        let id = self.issued.get().wrapping_add(1);
        self.issued.set(id);
        let token = CancellationToken::new();
        *self.active.borrow_mut() = Some(ActiveFetch {
            id,
            token: token.clone(),
        });

        let outcome = tokio::select! {
            biased;
            () = token.cancelled() => FetchOutcome::Cancelled,
            result = fetch => FetchOutcome::Completed(result),
        };

        if outcome.is_cancelled() {
            debug!(purpose = self.purpose.as_str(), fetch = id, "Fetch superseded");
        } else {
            self.settle(id);
        }
        outcome
    }

    fn settle(&self, id: u64) {
        let mut active = self.active.borrow_mut();
        if active.as_ref().is_some_and(|current| current.id == id) {
            *active = None;
        }
    }
}

impl Drop for FetchSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
