//! # FairLock
//!
//! A FIFO-fair mutual exclusion primitive: threads acquire the lock in the
//! exact order they asked for it, so no waiter can be starved by threads that
//! arrive later but win a scheduling race.
//!
//! Every acquire attempt appends a fresh [`WaitSlot`] to an admission queue
//! and parks on it. A releasing thread clears the held flag and signals the
//! slot at the queue head — and only that slot — handing eligibility to the
//! next thread in line. The woken thread re-runs the eligibility check and
//! dequeues itself on success.
//!
//! All bookkeeping (`held`, `holder`, the queue) lives behind one short
//! internal mutex. That mutex is never held across a blocking wait: parking
//! always happens outside it, so a releaser can never deadlock behind a
//! parked waiter.
//!
//! ## Features
//! - ✅ Strict FIFO ordering — no barging
//! - ✅ Exactly one thread woken per release
//! - ✅ Sticky per-waiter signals — no lost wakeups
//! - ✅ Cancellable waits via [`CancelToken`]
//! - 🔒 Holder-checked release — misuse is an error, never silent
//!
//! ## Example
//! ```rust
//! use axiom_fairlock::FairLock;
//!
//! let lock = FairLock::new();
//! lock.acquire();
//! assert!(lock.is_held());
//! lock.release().unwrap();
//! assert!(!lock.is_held());
//! ```
//!
//! ## When to Use
//! - Contended critical sections where arrival order must be respected
//! - Workloads where a standard mutex shows starvation
//!
//! ## When *Not* to Use
//! - Uncontended fast paths where fairness buys nothing (a plain mutex is
//!   cheaper)
//! - Reentrant locking — a thread that already holds the lock and acquires
//!   again deadlocks

use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use log::trace;
use parking_lot::Mutex;

use crate::cancel::CancelToken;
use crate::error::{Cancelled, NotHolder};
use crate::wait_slot::WaitSlot;

struct LockState {
    held: bool,
    holder: Option<ThreadId>,
    queue: VecDeque<Arc<WaitSlot>>,
}

/// A first-come-first-served mutual exclusion lock.
///
/// The lock itself carries no data; callers bracket their critical sections
/// with [`acquire`](FairLock::acquire) and [`release`](FairLock::release).
/// For a typed RAII surface, see [`FairMutex`](crate::FairMutex).
pub struct FairLock {
    state: Mutex<LockState>,
}

impl FairLock {
    /// Creates a free lock with an empty admission queue.
    #[inline]
    pub const fn new() -> Self {
        FairLock {
            state: Mutex::new(LockState {
                held: false,
                holder: None,
                queue: VecDeque::new(),
            }),
        }
    }

    /// Acquires the lock, blocking until this thread reaches the head of the
    /// admission queue and the lock is free.
    ///
    /// Attempts complete strictly in arrival order: no acquire that started
    /// after this one can succeed first.
    pub fn acquire(&self) {
        match self.acquire_slot(None) {
            Ok(()) => {}
            // No token is attached, so the slot can never observe a cancel.
            Err(Cancelled) => unreachable!("cancelled without a cancellation token"),
        }
    }

    /// Acquires the lock like [`acquire`](FairLock::acquire), but the wait
    /// can be aborted through `token`.
    ///
    /// On cancellation the attempt's queue entry is removed, any handoff
    /// signal it had already received is passed on to the next waiter in
    /// line, and `Err(Cancelled)` is returned. The lock itself is left
    /// untouched.
    pub fn acquire_with(&self, token: &CancelToken) -> Result<(), Cancelled> {
        self.acquire_slot(Some(token))
    }

    fn acquire_slot(&self, token: Option<&CancelToken>) -> Result<(), Cancelled> {
        let slot = Arc::new(WaitSlot::new());
        if let Some(token) = token {
            token.attach(&slot)?;
        }

        {
            let mut state = self.state.lock();
            state.queue.push_back(Arc::clone(&slot));
        }

        loop {
            {
                let mut state = self.state.lock();
                let eligible = !state.held
                    && state
                        .queue
                        .front()
                        .is_some_and(|head| Arc::ptr_eq(head, &slot));
                if eligible {
                    let me = thread::current().id();
                    state.held = true;
                    state.holder = Some(me);
                    state.queue.pop_front();
                    drop(state);

                    if let Some(token) = token {
                        token.detach();
                    }
                    trace!("{me:?} acquired the lock");
                    return Ok(());
                }
            }

            // Park outside the critical section; holding it here would
            // deadlock any releaser.
            trace!("{:?} parked awaiting its turn", thread::current().id());
            if let Err(cancelled) = slot.wait() {
                self.abandon(&slot);
                if let Some(token) = token {
                    token.detach();
                }
                trace!("{:?} abandoned its attempt", thread::current().id());
                return Err(cancelled);
            }
        }
    }

    /// Removes a cancelled attempt's slot from the queue.
    ///
    /// A no-op if the slot is already gone. If the slot had received a
    /// handoff it never consumed, the signal is forwarded to the new queue
    /// head so the wakeup is not lost with the departing waiter.
    fn abandon(&self, slot: &Arc<WaitSlot>) {
        let mut state = self.state.lock();
        if let Some(pos) = state.queue.iter().position(|s| Arc::ptr_eq(s, slot)) {
            state.queue.remove(pos);
        }
        if slot.take_signal() {
            if let Some(head) = state.queue.front() {
                head.notify_one();
            }
        }
    }

    /// Releases the lock and hands eligibility to the next waiter in line.
    ///
    /// Exactly one parked thread is woken: the one at the head of the
    /// admission queue at the moment of release. The woken thread dequeues
    /// itself in its own retry of the eligibility check.
    ///
    /// Returns [`NotHolder`] — with the lock state unchanged — if the
    /// calling thread does not currently hold the lock.
    pub fn release(&self) -> Result<(), NotHolder> {
        let mut state = self.state.lock();
        let me = thread::current().id();
        if state.holder != Some(me) {
            return Err(NotHolder);
        }
        state.held = false;
        state.holder = None;
        if let Some(head) = state.queue.front() {
            head.notify_one();
            trace!("{me:?} released the lock, handing off to the next waiter");
        } else {
            trace!("{me:?} released the lock");
        }
        Ok(())
    }

    /// Attempts to acquire the lock without blocking.
    ///
    /// Succeeds only if the lock is free **and** no thread is queued ahead;
    /// a `try_acquire` never barges past parked waiters.
    #[inline]
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        if !state.held && state.queue.is_empty() {
            state.held = true;
            state.holder = Some(thread::current().id());
            true
        } else {
            false
        }
    }

    /// Whether the lock is currently held.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.state.lock().held
    }

    /// The thread currently holding the lock, if any.
    #[inline]
    pub fn holder(&self) -> Option<ThreadId> {
        self.state.lock().holder
    }

    /// Number of attempts currently parked in the admission queue.
    #[inline]
    pub fn waiters(&self) -> usize {
        self.state.lock().queue.len()
    }
}

impl Default for FairLock {
    fn default() -> Self {
        Self::new()
    }
}
