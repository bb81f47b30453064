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

//! The desktop (Unix) platform backend.
//!
//! The fully capable end of the backend spectrum: real storage under
//! the per-user data directory, preemptive `std` threads, non-blocking
//! TCP with poll-based readiness checks, and `strerror`-backed error
//! descriptions.

mod fs;
mod net;
mod process;
mod thread;
mod time;

pub use fs::DesktopFile;
pub use net::DesktopSocket;

use lode_core::error::PlatformResult;
use lode_core::platform::{
    is_reserved_code, Capabilities, Platform, StorageInfo,
};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// The capable Unix backend.
pub struct DesktopPlatform {
    pub(crate) storage: StorageInfo,
    pub(crate) epoch: Instant,
}

impl DesktopPlatform {
    /// Creates a backend rooted at the per-user data directory
    /// (`~/.local/share/lode` or the platform equivalent).
    pub fn new() -> Self {
        let root = dirs::data_dir()
            .map(|dir| dir.join("lode"))
            .unwrap_or_else(|| PathBuf::from("lode"));
        Self::with_root(root)
    }

    /// Creates a backend rooted at an explicit directory. Used by tests
    /// to run against a temporary root.
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            storage: StorageInfo {
                root,
                // flipped by init once the root is confirmed writable
                readonly: true,
            },
            epoch: Instant::now(),
        }
    }
}

impl Default for DesktopPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for DesktopPlatform {
    fn init(&mut self) -> PlatformResult<()> {
        log::info!(
            "mounting storage at '{}'",
            self.storage.root.display()
        );
        match std::fs::create_dir_all(&self.storage.root) {
            Ok(()) => self.storage.readonly = false,
            Err(err) => {
                // keep running from read-only storage; writers check
                // the flag before attempting anything
                log::warn!(
                    "could not create storage root ({err}); continuing read-only"
                );
                self.storage.readonly = true;
            }
        }

        // the host OS keeps the network device up for us; nothing to
        // dial, unlike the modem-equipped console ports
        log::info!("network services ready (host stack)");
        Ok(())
    }

    fn shutdown(&mut self) {
        log::debug!("desktop platform shut down");
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            filesystem: true,
            sockets: true,
            threads: true,
            open_external: true,
            real_time_clock: true,
        }
    }

    fn storage(&self) -> &StorageInfo {
        &self.storage
    }

    fn describe_error(&self, code: u32) -> Option<String> {
        if is_reserved_code(code) {
            return None;
        }
        let text = io::Error::from_raw_os_error(code as i32).to_string();
        // strerror's placeholder for codes it has no message for
        if text.starts_with("Unknown error") {
            return None;
        }
        Some(text)
    }

    fn app_name_suffix(&self) -> &'static str {
        " Desktop"
    }
}
