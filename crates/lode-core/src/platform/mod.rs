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

//! The platform service contract.
//!
//! This module defines the traits a backend implements to provide
//! "the operating system" to the rest of the engine: files, threads,
//! sockets, time, diagnostics, and process lifecycle. One backend
//! satisfies the whole contract for a given target; everything above it
//! (texture cache, save/load, async HTTP) is written once against these
//! traits.

pub mod fs;
pub mod logging;
pub mod net;
pub mod process;
pub mod thread;
pub mod time;

pub use fs::{FileSystem, PlatformFile, SeekOrigin};
pub use logging::{BootLog, BootLogBridge, LogSink};
pub use net::{ConnectProgress, NetService, PlatformSocket, SOCKET_MAX_ADDRS};
pub use process::ProcessService;
pub use thread::{
    MutexGuard, PlatformMutex, ThreadHandle, ThreadService, WaitOutcome,
    Waitable,
};
pub use time::{DateTime, TimeService};

use crate::error::{PlatformResult, RESERVED_CODE_BASE};
use std::path::PathBuf;

/// The services a backend declares it can actually provide.
///
/// This is a per-backend constant, not something callers discover by
/// probing for `NotSupported` at runtime: a subsystem checks the flag it
/// depends on once and disables itself cleanly when the flag is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    /// Real file and directory storage is available.
    pub filesystem: bool,
    /// TCP sockets and name resolution are available.
    pub sockets: bool,
    /// Preemptive OS threads are available. When false, spawn returns
    /// `None` and the synchronization primitives degrade to no-ops.
    pub threads: bool,
    /// "Open in external handler" (browser, file manager) works here.
    pub open_external: bool,
    /// A real-time clock exists; wall-clock queries return real values.
    pub real_time_clock: bool,
}

/// Process-wide storage configuration, set once during
/// [`Platform::init`] and read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    /// The native directory all virtual paths are rooted at.
    pub root: PathBuf,
    /// True when writable storage could not be mounted and the backend
    /// fell back to read-only media. Components that write (options,
    /// map saves, texture cache) must check this before attempting to.
    pub readonly: bool,
}

impl StorageInfo {
    /// Storage info for a backend with no filesystem at all.
    pub fn unavailable() -> Self {
        Self {
            root: PathBuf::new(),
            readonly: true,
        }
    }
}

/// The full contract a backend implements.
///
/// Lifecycle: construct, [`init`](Platform::init) once, use the service
/// traits, then [`shutdown`](Platform::shutdown). `shutdown` is safe to
/// call even when `init` only partially succeeded.
pub trait Platform:
    FileSystem + TimeService + ThreadService + NetService + ProcessService + Send + Sync
{
    /// One-time setup: mount writable storage if available (falling back
    /// to read-only and recording that in [`storage`](Platform::storage)),
    /// bring up the network device if present, and log progress along
    /// the way — on constrained hardware this phase can take tens of
    /// seconds, and the log is the only sign of life.
    fn init(&mut self) -> PlatformResult<()>;

    /// Releases any global resources acquired by `init`.
    fn shutdown(&mut self);

    /// The services this backend declares (see [`Capabilities`]).
    fn capabilities(&self) -> Capabilities;

    /// The mounted storage root and its writability.
    fn storage(&self) -> &StorageInfo;

    /// Best-effort human-readable translation of a numeric error code.
    ///
    /// Returns `None` for codes in the engine-reserved range (those
    /// never came from the native error facility) and for native codes
    /// the backend cannot describe.
    fn describe_error(&self, code: u32) -> Option<String> {
        let _ = code;
        None
    }

    /// A short suffix identifying the backend, appended to the app name
    /// in window titles and diagnostics.
    fn app_name_suffix(&self) -> &'static str {
        ""
    }
}

/// True when `code` belongs to the engine-reserved sentinel range.
pub fn is_reserved_code(code: u32) -> bool {
    code >= RESERVED_CODE_BASE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlatformError;

    #[test]
    fn reserved_range_boundary() {
        assert!(!is_reserved_code(0));
        assert!(!is_reserved_code(RESERVED_CODE_BASE - 1));
        assert!(is_reserved_code(RESERVED_CODE_BASE));
        assert!(is_reserved_code(PlatformError::NotSupported.code()));
        assert!(is_reserved_code(PlatformError::Unknown.code()));
    }
}
