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

//! Preemptive threading on `std::thread`.
//!
//! Mutex and waitable failures here follow the fatal-abort policy: the
//! only way the native primitives fail on this backend is lock
//! poisoning, which means a worker died mid-critical-section and
//! nothing downstream can be trusted.

use super::DesktopPlatform;
use crate::fatal::{fatal, lock_or_abort, wait_or_abort, wait_timeout_or_abort};
use lode_core::platform::{
    PlatformMutex, ThreadHandle, ThreadService, WaitOutcome, Waitable,
};
use parking_lot::lock_api::RawMutex as _;
use parking_lot::RawMutex;
use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

struct DesktopThread {
    name: String,
    inner: std::thread::JoinHandle<()>,
}

impl ThreadHandle for DesktopThread {
    fn join(self: Box<Self>) {
        if self.inner.join().is_err() {
            // the panic already printed its own message; record which
            // worker it took down
            log::error!("worker thread '{}' panicked", self.name);
        }
    }

    fn detach(self: Box<Self>) {
        // dropping a JoinHandle detaches the thread
    }
}

struct DesktopMutex {
    raw: RawMutex,
}

impl PlatformMutex for DesktopMutex {
    fn lock(&self) {
        self.raw.lock();
    }

    fn unlock(&self) {
        // contract: only called after a matching lock on this thread
        unsafe { self.raw.unlock() };
    }
}

struct DesktopWaitable {
    count: Mutex<u32>,
    signalled: Condvar,
}

impl Waitable for DesktopWaitable {
    fn signal(&self) {
        let mut count = lock_or_abort(&self.count, "signalling waitable");
        *count = match count.checked_add(1) {
            Some(next) => next,
            None => fatal("signalling waitable", &"counter overflow"),
        };
        self.signalled.notify_one();
    }

    fn wait(&self) {
        let mut count = lock_or_abort(&self.count, "waiting on waitable");
        while *count == 0 {
            count = wait_or_abort(&self.signalled, count, "waiting on waitable");
        }
        *count -= 1;
    }

    fn wait_for(&self, ms: u32) -> WaitOutcome {
        let deadline = Instant::now() + Duration::from_millis(u64::from(ms));
        let mut count = lock_or_abort(&self.count, "timed wait on waitable");
        loop {
            if *count > 0 {
                *count -= 1;
                return WaitOutcome::Signaled;
            }
            let now = Instant::now();
            if now >= deadline {
                return WaitOutcome::TimedOut;
            }
            let (guard, _timeout) = wait_timeout_or_abort(
                &self.signalled,
                count,
                deadline - now,
                "timed wait on waitable",
            );
            count = guard;
        }
    }
}

impl ThreadService for DesktopPlatform {
    fn spawn(
        &self,
        name: &str,
        stack_size: usize,
        entry: Box<dyn FnOnce() + Send + 'static>,
    ) -> Option<Box<dyn ThreadHandle>> {
        let mut builder = std::thread::Builder::new().name(name.to_string());
        if stack_size > 0 {
            builder = builder.stack_size(stack_size);
        }

        match builder.spawn(move || entry()) {
            Ok(inner) => Some(Box::new(DesktopThread {
                name: name.to_string(),
                inner,
            })),
            Err(err) => {
                log::error!("failed to spawn thread '{name}': {err}");
                None
            }
        }
    }

    fn sleep(&self, ms: u32) {
        if ms == 0 {
            std::thread::yield_now();
        } else {
            std::thread::sleep(Duration::from_millis(u64::from(ms)));
        }
    }

    fn create_mutex(&self) -> Arc<dyn PlatformMutex> {
        Arc::new(DesktopMutex {
            raw: RawMutex::INIT,
        })
    }

    fn create_waitable(&self) -> Arc<dyn Waitable> {
        Arc::new(DesktopWaitable {
            count: Mutex::new(0),
            signalled: Condvar::new(),
        })
    }
}
