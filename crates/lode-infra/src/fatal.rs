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

//! The fatal-abort path for primitives assumed never to fail.
//!
//! Continuing with a broken synchronization primitive risks silent
//! corruption, and the contract gives callers no way to recover from
//! one, so a failure here terminates the process through the log sink.

use std::fmt::Display;
use std::sync::{Condvar, Mutex, MutexGuard, WaitTimeoutResult};
use std::time::Duration;

/// Logs the failure and aborts the process.
pub fn fatal(context: &str, detail: &dyn Display) -> ! {
    log::error!("fatal platform failure while {context}: {detail}");
    std::process::abort();
}

/// Locks `mutex`, treating poisoning as a fatal primitive failure.
pub fn lock_or_abort<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(err) => fatal(context, &err),
    }
}

/// Waits on `condvar`, treating poisoning as a fatal primitive failure.
pub fn wait_or_abort<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    context: &str,
) -> MutexGuard<'a, T> {
    match condvar.wait(guard) {
        Ok(guard) => guard,
        Err(err) => fatal(context, &err),
    }
}

/// Bounded wait on `condvar`; poisoning is fatal, timing out is not.
pub fn wait_timeout_or_abort<'a, T>(
    condvar: &Condvar,
    guard: MutexGuard<'a, T>,
    timeout: Duration,
    context: &str,
) -> (MutexGuard<'a, T>, WaitTimeoutResult) {
    match condvar.wait_timeout(guard, timeout) {
        Ok(result) => result,
        Err(err) => fatal(context, &err),
    }
}
