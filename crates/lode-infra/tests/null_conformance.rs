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

//! Conformance and degraded-mode tests for the null backend.

#![cfg(feature = "null")]

use lode_core::conformance;
use lode_core::platform::{Platform, ThreadService, TimeService, WaitOutcome};
use lode_infra::null::NullPlatform;

fn booted() -> NullPlatform {
    let mut platform = NullPlatform::new();
    platform.init().expect("init failed");
    platform
}

#[test]
fn passes_shared_conformance_suite() {
    let platform = booted();
    conformance::check_all(&platform);
}

#[test]
fn declares_no_capabilities() {
    let platform = booted();
    let caps = platform.capabilities();
    assert!(!caps.filesystem);
    assert!(!caps.sockets);
    assert!(!caps.threads);
    assert!(!caps.open_external);
    assert!(!caps.real_time_clock);
    assert!(platform.storage().readonly);
}

#[test]
fn wall_clock_reads_zero_without_rtc() {
    let platform = booted();
    assert_eq!(platform.current_utc_ms(), 0);
    assert_eq!(
        platform.current_local(),
        lode_core::platform::DateTime::default()
    );
}

#[test]
fn stopwatch_still_runs() {
    let platform = booted();
    let beg = platform.stopwatch_measure();
    let end = platform.stopwatch_measure();
    assert!(end >= beg);
    assert_eq!(platform.stopwatch_elapsed_micros(end, beg), 0);
}

#[test]
fn spawn_degrades_to_none_and_logs_to_the_wire() {
    let platform = booted();
    let wire = platform.wire();

    let handle = platform.spawn("worker", 0, Box::new(|| {}));
    assert!(handle.is_none());

    let lines = wire.lines();
    assert!(lines.iter().any(|line| line.contains("no scheduler")));
}

#[test]
fn waitables_never_block() {
    let platform = booted();
    let waitable = platform.create_waitable();

    // no other thread can ever signal; both waits return immediately
    waitable.wait();
    assert_eq!(waitable.wait_for(1000), WaitOutcome::TimedOut);
}

#[test]
fn init_writes_a_wire_line() {
    let mut platform = NullPlatform::new();
    let wire = platform.wire();
    platform.init().unwrap();
    assert!(wire
        .lines()
        .iter()
        .any(|line| line.contains("platform up")));
}
