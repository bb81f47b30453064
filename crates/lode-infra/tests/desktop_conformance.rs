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

//! Conformance and behaviour tests for the desktop backend.

#![cfg(all(unix, feature = "desktop"))]

use lode_core::conformance;
use lode_core::platform::{
    FileSystem, NetService, Platform, ThreadService, WaitOutcome,
};
use lode_core::PlatformError;
use lode_infra::desktop::DesktopPlatform;
use std::io::Write;
use std::net::TcpListener;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn booted(root: &Path) -> DesktopPlatform {
    let mut platform = DesktopPlatform::with_root(root.to_path_buf());
    platform.init().expect("init failed");
    platform
}

#[test]
fn passes_shared_conformance_suite() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());
    conformance::check_all(&platform);
}

#[test]
fn init_mounts_writable_storage() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(&dir.path().join("data"));

    let caps = platform.capabilities();
    assert!(caps.filesystem);
    assert!(caps.sockets);
    assert!(caps.threads);
    assert!(!platform.storage().readonly);
    assert!(platform.storage().root.is_dir());
}

#[test]
fn describe_error_translates_native_codes_only() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    // ENOENT has a strerror text on every Unix
    assert!(platform.describe_error(2).is_some());
    // a native-range code with no strerror entry gets no text either
    assert!(platform.describe_error(999).is_none());
    assert!(platform
        .describe_error(PlatformError::NotSupported.code())
        .is_none());
}

#[test]
fn open_missing_file_reports_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    assert!(matches!(
        platform.file_open("no-such-texture-pack.zip"),
        Err(PlatformError::NotFound)
    ));
}

#[test]
fn spawned_thread_signals_waitable() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    let waitable = platform.create_waitable();
    let counter = Arc::new(AtomicUsize::new(0));

    let worker_waitable = waitable.clone();
    let worker_counter = counter.clone();
    let handle = platform
        .spawn(
            "conformance-worker",
            0,
            Box::new(move || {
                worker_counter.fetch_add(1, Ordering::SeqCst);
                worker_waitable.signal();
            }),
        )
        .expect("desktop backend must support threads");

    assert_eq!(waitable.wait_for(5000), WaitOutcome::Signaled);
    handle.join();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn nonblocking_socket_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // either outcome is legal on loopback; both leave a usable socket
    let (mut socket, _progress) = platform.connect(&addr, true).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !socket.check_writable().expect("check_writable failed") {
        assert!(Instant::now() < deadline, "connect never completed");
        std::thread::sleep(Duration::from_millis(5));
    }

    let (mut peer, _) = listener.accept().unwrap();

    // nothing sent yet: would-block, not a broken connection
    let mut buf = [0u8; 16];
    assert!(matches!(
        socket.read(&mut buf),
        Err(PlatformError::WouldBlock)
    ));

    peer.write_all(b"ping").unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while !socket.check_readable().expect("check_readable failed") {
        assert!(Instant::now() < deadline, "data never arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(socket.read(&mut buf).unwrap(), 4);
    assert_eq!(&buf[..4], b"ping");

    // a closed peer counts as readable, and the next read sees EOF
    drop(peer);
    let deadline = Instant::now() + Duration::from_secs(5);
    while !socket.check_readable().expect("check_readable failed") {
        assert!(Instant::now() < deadline, "hangup never observed");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(socket.read(&mut buf).unwrap(), 0);
}

#[test]
fn resolves_localhost_through_the_system_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    // /etc/hosts carries localhost everywhere; no DNS round-trip needed
    let addrs = platform.parse_address("localhost", 25565).unwrap();
    assert!(!addrs.is_empty());
    assert!(addrs.iter().all(|addr| addr.port() == 25565));
    assert!(addrs.iter().all(|addr| addr.ip().is_loopback()));
}

#[test]
fn host_with_embedded_nul_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    assert!(matches!(
        platform.parse_address("bad\0host", 25565),
        Err(PlatformError::InvalidArgument)
    ));
}

#[test]
fn blocking_connect_establishes_immediately() {
    let dir = tempfile::tempdir().unwrap();
    let platform = booted(dir.path());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let (mut socket, progress) = platform.connect(&addr, false).unwrap();
    assert_eq!(progress, lode_core::platform::ConnectProgress::Established);

    let (mut peer, _) = listener.accept().unwrap();
    peer.write_all(b"ok").unwrap();

    let mut buf = [0u8; 4];
    assert_eq!(socket.read(&mut buf).unwrap(), 2);
}
