//! # FairMutex
//!
//! A typed, RAII-guarded wrapper around [`FairLock`] for protecting a value
//! with FIFO-fair mutual exclusion.
//!
//! [`FairMutex`] owns its data in an [`UnsafeCell`] and only hands out access
//! through a [`FairGuard`], so the data can never be touched without holding
//! the lock. Waiting threads are admitted strictly in arrival order.
//!
//! ## Example
//! ```rust
//! use axiom_fairlock::FairMutex;
//!
//! static COUNTER: FairMutex<u32> = FairMutex::new(0);
//!
//! fn increment() {
//!     let mut guard = COUNTER.lock();
//!     *guard += 1;
//! }
//!
//! fn read_value() -> u32 {
//!     *COUNTER.lock()
//! }
//! ```
//!
//! ## Safety
//! - The mutex is **not reentrant**: locking it again from the holding
//!   thread deadlocks.
//! - Guards stay on the thread that acquired them; releasing is
//!   holder-checked, so [`FairGuard`] is deliberately `!Send`.

use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use crate::cancel::CancelToken;
use crate::error::Cancelled;
use crate::fair_lock::FairLock;

/// A FIFO-fair mutual exclusion primitive protecting a value of type `T`.
///
/// See the [module-level documentation](self) for examples and caveats.
pub struct FairMutex<T> {
    data: UnsafeCell<T>,
    raw: FairLock,
}

/// A guard that releases the [`FairMutex`] when dropped.
///
/// Returned from [`FairMutex::lock`] and friends; implements [`Deref`] and
/// [`DerefMut`] to access the underlying data.
pub struct FairGuard<'a, T> {
    mutex: &'a FairMutex<T>,
    // Release is holder-checked, so the guard may not migrate threads.
    _not_send: PhantomData<*mut ()>,
}

impl<T> FairMutex<T> {
    /// Creates a new [`FairMutex`] wrapping the given data.
    ///
    /// # Example
    /// ```
    /// use axiom_fairlock::FairMutex;
    ///
    /// let lock = FairMutex::new(123);
    /// assert_eq!(*lock.lock(), 123);
    /// ```
    #[inline]
    pub const fn new(data: T) -> Self {
        FairMutex {
            data: UnsafeCell::new(data),
            raw: FairLock::new(),
        }
    }

    /// Acquires the mutex, blocking until this thread's turn comes up.
    ///
    /// Returns a [`FairGuard`] which releases the mutex on drop.
    pub fn lock(&self) -> FairGuard<'_, T> {
        self.raw.acquire();
        FairGuard {
            mutex: self,
            _not_send: PhantomData,
        }
    }

    /// Acquires the mutex like [`lock`](FairMutex::lock), but the wait can
    /// be aborted through `token`.
    pub fn lock_with(&self, token: &CancelToken) -> Result<FairGuard<'_, T>, Cancelled> {
        self.raw.acquire_with(token)?;
        Ok(FairGuard {
            mutex: self,
            _not_send: PhantomData,
        })
    }

    /// Attempts to acquire the mutex without blocking.
    ///
    /// Returns `None` if the mutex is held or other threads are already
    /// queued; a `try_lock` never barges past waiters.
    #[inline]
    pub fn try_lock(&self) -> Option<FairGuard<'_, T>> {
        if self.raw.try_acquire() {
            Some(FairGuard {
                mutex: self,
                _not_send: PhantomData,
            })
        } else {
            None
        }
    }

    /// Whether the mutex is currently held.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.raw.is_held()
    }

    /// Runs a closure with exclusive access to the data.
    ///
    /// Convenience wrapper around [`lock`](FairMutex::lock) that releases the
    /// mutex when the closure returns.
    ///
    /// # Example
    /// ```
    /// use axiom_fairlock::FairMutex;
    /// let lock = FairMutex::new(0i32);
    /// lock.with_lock(|data| {
    ///     *data += 1;
    /// });
    /// ```
    #[inline]
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.lock();
        f(&mut *guard)
    }

    /// Consumes the mutex and returns the protected data.
    #[inline]
    pub fn into_inner(self) -> T {
        self.data.into_inner()
    }
}

impl<'a, T> Drop for FairGuard<'a, T> {
    #[inline]
    fn drop(&mut self) {
        self.mutex
            .raw
            .release()
            .expect("guard dropped by a thread that does not hold the lock");
    }
}

impl<T> Deref for FairGuard<'_, T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &T {
        unsafe { &*(self.mutex.data.get()) }
    }
}

impl<T> DerefMut for FairGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.mutex.data.get() }
    }
}

// Safety: FairMutex enforces mutual exclusion through its admission queue.
unsafe impl<T: Send> Send for FairMutex<T> {}
unsafe impl<T: Send> Sync for FairMutex<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_basic_lock_unlock() {
        let lock = FairMutex::new(10);

        {
            let mut guard = lock.lock();
            *guard += 5;
            assert_eq!(*guard, 15);
        } // guard dropped here, automatically unlocks

        assert!(!lock.is_locked(), "Lock should be released after guard drop");
    }

    /// The balanced-counter scenario: 3 threads, 1000 cycles each, no
    /// increment lost and no acquisition overlapping.
    #[test]
    fn test_concurrent_counter() {
        let lock = Arc::new(FairMutex::new(0usize));
        let mut handles = vec![];

        for _ in 0..3 {
            let lock_cloned = lock.clone();
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    let mut guard = lock_cloned.lock();
                    *guard += 1;
                }
            }));
        }

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(*lock.lock(), 3 * 1000, "Counter should match total increments");
    }

    #[test]
    fn test_try_lock_behavior() {
        let lock = FairMutex::new(42);

        let guard = lock.lock();
        assert!(lock.try_lock().is_none(), "Lock should not be acquirable while held");

        drop(guard);
        let guard2 = lock.try_lock();
        assert!(guard2.is_some(), "Lock should succeed after previous guard drop");
    }

    #[test]
    fn test_with_lock_releases() {
        let lock = FairMutex::new(String::new());
        let len = lock.with_lock(|s| {
            s.push_str("fair");
            s.len()
        });
        assert_eq!(len, 4);
        assert!(!lock.is_locked());
    }

    #[test]
    fn test_lock_with_cancelled_while_waiting() {
        let lock = Arc::new(FairMutex::new(0));
        let guard = lock.lock();

        let token = crate::CancelToken::new();
        let lock2 = Arc::clone(&lock);
        let token2 = token.clone();
        let waiter = thread::spawn(move || lock2.lock_with(&token2).map(|_| ()));

        while lock.raw.waiters() < 1 {
            thread::yield_now();
        }
        token.cancel();
        assert_eq!(waiter.join().unwrap(), Err(crate::Cancelled));

        drop(guard);
        assert_eq!(*lock.lock(), 0);
    }

    #[test]
    fn test_into_inner() {
        let lock = FairMutex::new(vec![1, 2, 3]);
        lock.with_lock(|v| v.push(4));
        assert_eq!(lock.into_inner(), vec![1, 2, 3, 4]);
    }
}
