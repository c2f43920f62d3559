//! # axiom-fairlock 🎟️
//!
//! A lightweight crate providing a **FIFO-fair mutual exclusion primitive**
//! for concurrent programming: threads acquire the lock in the exact order
//! they requested it, so a waiting thread can never be starved by threads
//! that arrive later but win a scheduling race.
//!
//! The crate includes:
//!
//! - [`FairLock`] — the raw fair lock: an admission queue plus explicit
//!   `acquire`/`release`.
//! - [`FairMutex<T>`] — a typed, RAII-guarded wrapper protecting a value.
//! - [`WaitSlot`] — the per-waiter signaling cell underlying the handoff.
//! - [`CancelToken`] — aborts a blocked acquire attempt cleanly.
//!
//! ## ✨ Features
//!
//! - 🎯 Strict FIFO admission — no barging, no starvation
//! - 🤝 One-to-one handoff: each release wakes exactly the next thread in
//!   line
//! - 🧷 Sticky per-waiter signals, immune to lost-wakeup races
//! - ✂️ Cancellable waits that leave the queue consistent
//! - 🔒 Holder-checked release — misuse surfaces as an error, never
//!   silently
//!
//! ## 🚀 Quick Example
//!
//! ```rust
//! use axiom_fairlock::{FairLock, FairMutex};
//!
//! // Example 1: Using FairMutex
//! let counter = FairMutex::new(0);
//! {
//!     let mut guard = counter.lock();
//!     *guard += 1;
//! } // automatically unlocked when guard is dropped
//! assert_eq!(*counter.lock(), 1);
//!
//! // Example 2: Using the raw FairLock
//! let lock = FairLock::new();
//! lock.acquire();
//! // ... critical section ...
//! lock.release().unwrap();
//! ```
//!
//! ## 🧠 Design
//!
//! ### FairLock
//!
//! Each acquire attempt appends a fresh [`WaitSlot`] to an internal FIFO
//! admission queue, then loops: if the lock is free **and** its slot is at
//! the queue head, it takes the lock and dequeues itself; otherwise it parks
//! on its own slot. The releasing thread clears the held flag and signals
//! only the slot at the queue head, handing eligibility to exactly one
//! predetermined successor.
//!
//! The bookkeeping lives behind one short internal mutex that is never held
//! across a blocking wait — parking happens strictly outside it, so a
//! releaser cannot deadlock behind a parked waiter.
//!
//! ### WaitSlot
//!
//! A bare condition variable would lose a wakeup whenever a notify runs
//! before its waiter parks. `WaitSlot` makes the signal **sticky**: once
//! set, it stays set until a wait consumes it, turning the wakeup into a
//! durable event regardless of relative timing.
//!
//! ## ⚠️ Safety & Usage Notes
//!
//! - The lock is **not reentrant** — re-acquiring from the holding thread
//!   deadlocks.
//! - [`FairLock::release`] must be called by the holding thread; anyone else
//!   gets [`NotHolder`].
//! - Fairness has a cost: under low contention a plain mutex is faster.
//!
//! ## 📦 Modules
//!
//! - [`fair_lock`] — the raw FIFO-fair lock.
//! - [`fair_mutex`] — typed RAII wrapper and guard.
//! - [`wait_slot`] — single-waiter signaling cell.
//! - [`cancel`] — cancellation handle for pending acquires.
//! - [`error`] — the two error conditions.
//!
//!
//! ### Crate Exports
//!
//! - [`FairLock`] — from [`fair_lock`]
//! - [`FairMutex`], [`FairGuard`] — from [`fair_mutex`]
//! - [`WaitSlot`] — from [`wait_slot`]
//! - [`CancelToken`] — from [`cancel`]
//! - [`Cancelled`], [`NotHolder`] — from [`error`]

pub mod cancel;
pub mod error;
pub mod fair_lock;
pub mod fair_mutex;
pub mod wait_slot;

pub use cancel::CancelToken;
pub use error::{Cancelled, NotHolder};
pub use fair_lock::FairLock;
pub use fair_mutex::{FairGuard, FairMutex};
pub use wait_slot::WaitSlot;
