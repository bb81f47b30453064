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

//! Best-effort diagnostic output.
//!
//! During early boot a backend may have several places a message should
//! go at once — a serial debug wire plus an on-screen scrolling buffer,
//! say — because bringing the platform up can take tens of seconds and
//! the display subsystem is not ready yet. [`BootLog`] fans each line
//! out to every attached sink until the display signals readiness, then
//! narrows to the primary sink only.
//!
//! Sinks are infallible by contract: logging must never abort, so a
//! sink that cannot write simply drops the line.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// One destination for diagnostic lines (serial wire, stderr, frame
/// buffer). Implementations must never panic.
pub trait LogSink: Send + Sync {
    /// Writes one line, best-effort.
    fn write_line(&self, line: &str);
}

/// Routes diagnostic lines to the backend's sinks, with early-boot
/// fan-out (see the module docs).
pub struct BootLog {
    primary: Arc<dyn LogSink>,
    early: Mutex<Vec<Arc<dyn LogSink>>>,
    display_ready: AtomicBool,
}

impl BootLog {
    /// Creates a router around the backend's primary sink.
    pub fn new(primary: Arc<dyn LogSink>) -> Self {
        Self {
            primary,
            early: Mutex::new(Vec::new()),
            display_ready: AtomicBool::new(false),
        }
    }

    /// Attaches an additional sink that only receives lines until
    /// [`display_ready`](BootLog::display_ready) is called.
    pub fn attach_early(&self, sink: Arc<dyn LogSink>) {
        self.early
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sink);
    }

    /// Signals that the display subsystem is up; early sinks stop
    /// receiving lines from this point on.
    pub fn display_ready(&self) {
        self.display_ready.store(true, Ordering::Release);
    }

    /// Writes one line to the primary sink, and to every early sink
    /// while the display is not yet ready.
    pub fn write(&self, line: &str) {
        self.primary.write_line(line);
        if self.display_ready.load(Ordering::Acquire) {
            return;
        }
        let early = self
            .early
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        for sink in early.iter() {
            sink.write_line(line);
        }
    }
}

/// Adapter routing the `log` facade into a [`BootLog`], so engine code
/// keeps using the standard macros regardless of backend.
pub struct BootLogBridge {
    log: Arc<BootLog>,
    max_level: log::LevelFilter,
}

impl BootLogBridge {
    /// Creates a bridge that forwards records up to `max_level`.
    pub fn new(log: Arc<BootLog>, max_level: log::LevelFilter) -> Self {
        Self { log, max_level }
    }

    /// Installs the bridge as the process-wide logger.
    pub fn install(self) -> Result<(), log::SetLoggerError> {
        log::set_max_level(self.max_level);
        log::set_boxed_logger(Box::new(self))
    }
}

impl log::Log for BootLogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.log
            .write(&format!("[{}] {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MemorySink {
        lines: Mutex<Vec<String>>,
    }

    impl MemorySink {
        fn lines(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }
    }

    impl LogSink for MemorySink {
        fn write_line(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    #[test]
    fn fans_out_during_early_boot() {
        let wire = Arc::new(MemorySink::default());
        let screen = Arc::new(MemorySink::default());
        let boot = BootLog::new(wire.clone());
        boot.attach_early(screen.clone());

        boot.write("mounting storage");
        assert_eq!(wire.lines(), vec!["mounting storage"]);
        assert_eq!(screen.lines(), vec!["mounting storage"]);
    }

    #[test]
    fn narrows_after_display_ready() {
        let wire = Arc::new(MemorySink::default());
        let screen = Arc::new(MemorySink::default());
        let boot = BootLog::new(wire.clone());
        boot.attach_early(screen.clone());

        boot.write("before");
        boot.display_ready();
        boot.write("after");

        assert_eq!(wire.lines(), vec!["before", "after"]);
        assert_eq!(screen.lines(), vec!["before"]);
    }

    #[test]
    fn bridge_formats_and_filters_records() {
        use log::Log;

        let wire = Arc::new(MemorySink::default());
        let boot = Arc::new(BootLog::new(wire.clone()));
        let bridge = BootLogBridge::new(boot, log::LevelFilter::Info);

        bridge.log(
            &log::Record::builder()
                .level(log::Level::Info)
                .args(format_args!("mounting storage"))
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .level(log::Level::Debug)
                .args(format_args!("filtered out"))
                .build(),
        );

        assert_eq!(wire.lines(), vec!["[INFO] mounting storage"]);
    }

    #[test]
    fn bridge_installs_as_global_logger() {
        let wire = Arc::new(MemorySink::default());
        let boot = Arc::new(BootLog::new(wire.clone()));
        BootLogBridge::new(boot, log::LevelFilter::Info)
            .install()
            .expect("a logger was already installed");

        log::info!("storage mounted");
        assert!(wire
            .lines()
            .iter()
            .any(|line| line == "[INFO] storage mounted"));
    }
}
