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

//! The null platform backend.
//!
//! The stub end of the backend spectrum, for targets with no OS
//! services at all: no filesystem, no sockets, no threads, no
//! real-time clock. Every absent operation reports `NotSupported`
//! uniformly so callers disable the dependent feature, and the
//! threading primitives degrade to no-ops that never deadlock — a
//! single cooperative thread is the whole scheduling model here.
//!
//! Diagnostics route through the boot log into an in-memory debug wire
//! (the stand-in for a memory-mapped serial channel), inspectable from
//! tests.

use lode_core::error::{PlatformError, PlatformResult};
use lode_core::platform::{
    BootLog, Capabilities, ConnectProgress, DateTime, FileSystem, LogSink,
    NetService, Platform, PlatformFile, PlatformMutex, PlatformSocket,
    ProcessService, StorageInfo, ThreadHandle, ThreadService, TimeService,
    WaitOutcome, Waitable,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// The diagnostic wire: an in-memory sink standing in for a serial
/// debug channel.
#[derive(Default)]
pub struct WireSink {
    lines: Mutex<Vec<String>>,
}

impl WireSink {
    /// Snapshot of everything written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl LogSink for WireSink {
    fn write_line(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(line.to_string());
    }
}

/// The stub backend.
pub struct NullPlatform {
    storage: StorageInfo,
    epoch: Instant,
    wire: Arc<WireSink>,
    log: BootLog,
}

impl NullPlatform {
    /// Creates the stub backend.
    pub fn new() -> Self {
        let wire = Arc::new(WireSink::default());
        Self {
            storage: StorageInfo::unavailable(),
            epoch: Instant::now(),
            log: BootLog::new(wire.clone()),
            wire,
        }
    }

    /// The debug wire, for tests that assert on diagnostics.
    pub fn wire(&self) -> Arc<WireSink> {
        self.wire.clone()
    }
}

impl Default for NullPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for NullPlatform {
    fn directory_create(&self, _path: &str) -> PlatformResult<()> {
        Err(PlatformError::NotSupported)
    }

    fn file_exists(&self, _path: &str) -> bool {
        false
    }

    fn directory_enum(
        &self,
        _path: &str,
        _callback: &mut dyn FnMut(&str),
    ) -> PlatformResult<()> {
        Err(PlatformError::NotSupported)
    }

    fn file_open(&self, _path: &str) -> PlatformResult<Box<dyn PlatformFile>> {
        Err(PlatformError::NotSupported)
    }

    fn file_create(
        &self,
        _path: &str,
    ) -> PlatformResult<Box<dyn PlatformFile>> {
        Err(PlatformError::NotSupported)
    }

    fn file_open_or_create(
        &self,
        _path: &str,
    ) -> PlatformResult<Box<dyn PlatformFile>> {
        Err(PlatformError::NotSupported)
    }
}

impl TimeService for NullPlatform {
    fn stopwatch_measure(&self) -> u64 {
        // the free-running counter is the one clock this target has
        self.epoch.elapsed().as_micros() as u64
    }

    fn stopwatch_elapsed_micros(&self, beg: u64, end: u64) -> u64 {
        end.saturating_sub(beg)
    }

    fn current_utc_ms(&self) -> u64 {
        // no RTC
        0
    }

    fn current_local(&self) -> DateTime {
        DateTime::default()
    }
}

struct NullMutex;

impl PlatformMutex for NullMutex {
    // single cooperative thread: exclusion holds vacuously, and a
    // no-op is the only implementation that cannot deadlock
    fn lock(&self) {}
    fn unlock(&self) {}
}

struct NullWaitable;

impl Waitable for NullWaitable {
    fn signal(&self) {}

    fn wait(&self) {
        // nothing can signal from another thread; returning is the
        // only non-deadlocking option
    }

    fn wait_for(&self, _ms: u32) -> WaitOutcome {
        WaitOutcome::TimedOut
    }
}

impl ThreadService for NullPlatform {
    fn spawn(
        &self,
        name: &str,
        _stack_size: usize,
        _entry: Box<dyn FnOnce() + Send + 'static>,
    ) -> Option<Box<dyn ThreadHandle>> {
        self.log
            .write(&format!("thread '{name}' not started: no scheduler"));
        None
    }

    fn sleep(&self, _ms: u32) {
        // no timer to sleep on; callers treat this as a yield
    }

    fn create_mutex(&self) -> Arc<dyn PlatformMutex> {
        Arc::new(NullMutex)
    }

    fn create_waitable(&self) -> Arc<dyn Waitable> {
        Arc::new(NullWaitable)
    }
}

impl NetService for NullPlatform {
    fn parse_address(
        &self,
        _host: &str,
        _port: u16,
    ) -> PlatformResult<Vec<SocketAddr>> {
        Err(PlatformError::NotSupported)
    }

    fn connect(
        &self,
        _addr: &SocketAddr,
        _nonblocking: bool,
    ) -> PlatformResult<(Box<dyn PlatformSocket>, ConnectProgress)> {
        Err(PlatformError::NotSupported)
    }
}

impl ProcessService for NullPlatform {
    fn start_open(&self, _target: &str) -> PlatformResult<()> {
        Err(PlatformError::NotSupported)
    }
}

impl Platform for NullPlatform {
    fn init(&mut self) -> PlatformResult<()> {
        self.log
            .write("platform up: no storage, no network, single thread");
        Ok(())
    }

    fn shutdown(&mut self) {}

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            filesystem: false,
            sockets: false,
            threads: false,
            open_external: false,
            real_time_clock: false,
        }
    }

    fn storage(&self) -> &StorageInfo {
        &self.storage
    }

    fn app_name_suffix(&self) -> &'static str {
        " Null"
    }
}
