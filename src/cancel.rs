//! Cancellation handle for blocked acquire attempts.
//!
//! A [`CancelToken`] is the explicit stand-in for thread interruption: the
//! owner of a pending [`FairLock::acquire_with`](crate::FairLock::acquire_with)
//! call hands a clone of the token to whoever may need to abort the wait, and
//! a call to [`cancel`](CancelToken::cancel) wakes the parked thread with
//! [`Cancelled`](crate::Cancelled) instead of the lock.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Cancelled;
use crate::wait_slot::WaitSlot;

struct TokenState {
    cancelled: bool,
    waiter: Option<Arc<WaitSlot>>,
}

/// A cloneable handle that can abort one pending acquire attempt.
///
/// Cancelling is idempotent, and cancelling a token whose attempt has already
/// succeeded (or never started) has no effect on the lock.
///
/// # Example
/// ```rust
/// use axiom_fairlock::{CancelToken, Cancelled, FairLock};
///
/// let lock = FairLock::new();
/// let token = CancelToken::new();
/// token.cancel();
/// assert_eq!(lock.acquire_with(&token), Err(Cancelled));
/// assert!(!lock.is_held());
/// ```
#[derive(Clone)]
pub struct CancelToken {
    shared: Arc<Mutex<TokenState>>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        CancelToken {
            shared: Arc::new(Mutex::new(TokenState {
                cancelled: false,
                waiter: None,
            })),
        }
    }

    /// Cancels the attempt attached to this token.
    ///
    /// If the attempt is currently parked in the admission queue, its thread
    /// is woken and observes [`Cancelled`](crate::Cancelled). Later calls are
    /// no-ops.
    pub fn cancel(&self) {
        let waiter = {
            let mut state = self.shared.lock();
            state.cancelled = true;
            state.waiter.take()
        };
        if let Some(slot) = waiter {
            slot.cancel();
        }
    }

    /// Whether [`cancel`](CancelToken::cancel) has been called.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.shared.lock().cancelled
    }

    /// Registers the slot of an attempt that is about to park.
    ///
    /// Fails if the token was already cancelled, so a cancel that arrives
    /// before the attempt starts waiting is still observed.
    pub(crate) fn attach(&self, slot: &Arc<WaitSlot>) -> Result<(), Cancelled> {
        let mut state = self.shared.lock();
        if state.cancelled {
            return Err(Cancelled);
        }
        state.waiter = Some(Arc::clone(slot));
        Ok(())
    }

    /// Drops the slot registration once the attempt has left the queue.
    pub(crate) fn detach(&self) {
        self.shared.lock().waiter = None;
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}
