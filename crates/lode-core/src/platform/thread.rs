// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Threading primitives.
//!
//! The scheduling model is "parallel OS threads where available, else a
//! single cooperative thread". The contract works correctly under both:
//! on a backend with no threads, [`ThreadService::spawn`] returns `None`
//! and the mutex/waitable primitives are no-ops that must not deadlock.
//!
//! Failure policy: a native mutex failing is unrecoverable resource
//! exhaustion, and backends abort the process rather than propagate it;
//! a waitable timing out is the one expected non-success outcome and is
//! reported, never aborted on.

use std::sync::Arc;

/// A running thread. Exactly one of [`join`](ThreadHandle::join) or
/// [`detach`](ThreadHandle::detach) must be called; both consume the
/// handle, so the pairing is enforced structurally.
pub trait ThreadHandle: Send {
    /// Blocks until the thread finishes.
    fn join(self: Box<Self>);

    /// Lets the thread run to completion on its own.
    fn detach(self: Box<Self>);
}

/// A non-reentrant exclusive lock.
///
/// Prefer [`MutexGuard::lock`] over calling these directly so the
/// unlock happens on every exit path.
pub trait PlatformMutex: Send + Sync {
    /// Acquires the lock, blocking until available.
    fn lock(&self);
    /// Releases the lock. Must only follow a matching `lock` on the
    /// same thread.
    fn unlock(&self);
}

/// RAII wrapper pairing every lock with an unlock.
pub struct MutexGuard<'a> {
    mutex: &'a dyn PlatformMutex,
}

impl<'a> MutexGuard<'a> {
    /// Locks `mutex`, unlocking again when the guard drops.
    pub fn lock(mutex: &'a dyn PlatformMutex) -> Self {
        mutex.lock();
        Self { mutex }
    }
}

impl Drop for MutexGuard<'_> {
    fn drop(&mut self) {
        self.mutex.unlock();
    }
}

/// The outcome of a bounded wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    /// The waitable was signalled and one count was consumed.
    Signaled,
    /// The timeout elapsed first.
    TimedOut,
}

/// A counting semaphore used for cross-thread signalling: signal
/// increments the counter, wait decrements it or blocks at zero.
pub trait Waitable: Send + Sync {
    /// Increments the counter, waking one waiter if any.
    fn signal(&self);

    /// Blocks until the counter is nonzero, then decrements it. Only a
    /// [`signal`](Waitable::signal) from another thread releases this.
    fn wait(&self);

    /// Like [`wait`](Waitable::wait), but gives up after `ms`
    /// milliseconds. `wait_for(0)` on an unsignalled waitable returns
    /// promptly with [`WaitOutcome::TimedOut`].
    fn wait_for(&self, ms: u32) -> WaitOutcome;
}

/// Thread services provided by a backend.
pub trait ThreadService {
    /// Spawns a preemptive OS thread running `entry`.
    ///
    /// `stack_size` of 0 requests the backend default. Returns `None`
    /// on backends without real threads — callers tolerate that as a
    /// degraded cooperative mode, not a crash.
    fn spawn(
        &self,
        name: &str,
        stack_size: usize,
        entry: Box<dyn FnOnce() + Send + 'static>,
    ) -> Option<Box<dyn ThreadHandle>>;

    /// Yields the current thread for at least `ms` milliseconds;
    /// 0 is a best-effort yield.
    fn sleep(&self, ms: u32);

    /// Creates a mutex.
    fn create_mutex(&self) -> Arc<dyn PlatformMutex>;

    /// Creates a waitable with a counter of zero.
    fn create_waitable(&self) -> Arc<dyn Waitable>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};

    struct CountingMutex {
        balance: AtomicI32,
    }

    impl PlatformMutex for CountingMutex {
        fn lock(&self) {
            self.balance.fetch_add(1, Ordering::SeqCst);
        }
        fn unlock(&self) {
            self.balance.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn guard_unlocks_on_drop() {
        let mutex = CountingMutex {
            balance: AtomicI32::new(0),
        };
        {
            let _guard = MutexGuard::lock(&mutex);
            assert_eq!(mutex.balance.load(Ordering::SeqCst), 1);
        }
        assert_eq!(mutex.balance.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn guard_unlocks_on_early_return() {
        let mutex = CountingMutex {
            balance: AtomicI32::new(0),
        };
        fn bails(m: &dyn PlatformMutex) -> Result<(), ()> {
            let _guard = MutexGuard::lock(m);
            Err(())
        }
        assert!(bails(&mutex).is_err());
        assert_eq!(mutex.balance.load(Ordering::SeqCst), 0);
    }
}
