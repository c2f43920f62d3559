//! Error conditions raised by the fair lock.
//!
//! Only two failure kinds exist:
//!
//! - [`Cancelled`] — a blocked acquire attempt was cancelled through its
//!   [`CancelToken`](crate::CancelToken). Recoverable: the attempt's queue
//!   entry is cleaned up before the error reaches the caller, and the lock
//!   itself is left untouched.
//! - [`NotHolder`] — `release` was called by a thread that does not hold the
//!   lock. A usage error, reported immediately and never retried internally.

use thiserror::Error;

/// A blocked acquire attempt was cancelled while waiting its turn.
///
/// The attempt's slot has already been removed from the admission queue when
/// this error is returned; the lock and the remaining waiters are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("lock acquisition was cancelled while waiting")]
pub struct Cancelled;

/// The calling thread tried to release a lock it does not hold.
///
/// Returned when the lock is free, or held by a different thread. The lock
/// state is left exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("calling thread does not hold the lock")]
pub struct NotHolder;
