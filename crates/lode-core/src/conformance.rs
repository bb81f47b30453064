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

//! Shared conformance suite for platform backends.
//!
//! Every backend must pass these checks against an initialized
//! [`Platform`]; each backend crate runs them from its integration
//! tests. The checks `panic!` on a contract violation, so they compose
//! directly with `#[test]` functions.
//!
//! Capability-dependent behaviour branches on
//! [`Capabilities`](crate::platform::Capabilities): a backend that
//! declares a service absent is checked for *uniform*
//! [`NotSupported`](PlatformError::NotSupported) reporting instead.

use crate::error::PlatformError;
use crate::platform::fs::{read_to_end, write_all};
use crate::platform::{
    FileSystem, MutexGuard, NetService, Platform, ProcessService, SeekOrigin,
    ThreadService, TimeService, WaitOutcome, SOCKET_MAX_ADDRS,
};

/// Runs the whole suite.
pub fn check_all(platform: &dyn Platform) {
    check_stopwatch(platform);
    check_error_descriptions(platform);
    check_sync_primitives(platform);
    check_storage(platform);
    check_enumeration(platform);
    check_address_parsing(platform);
    check_process(platform);
}

/// Backends without a shell refuse external opens with the capability
/// sentinel. (Capable backends are not exercised here — the suite must
/// not launch a browser.)
pub fn check_process(platform: &dyn Platform) {
    if !platform.capabilities().open_external {
        assert!(matches!(
            platform.start_open("https://example.net"),
            Err(PlatformError::NotSupported)
        ));
    }
}

/// Stopwatch: tick deltas convert without wrapping.
pub fn check_stopwatch(platform: &dyn Platform) {
    // end < beg must clamp to 0, never underflow
    assert_eq!(platform.stopwatch_elapsed_micros(10, 5), 0);
    assert_eq!(platform.stopwatch_elapsed_micros(u64::MAX, 0), 0);

    let beg = platform.stopwatch_measure();
    let end = platform.stopwatch_measure();
    assert!(end >= beg, "stopwatch went backwards within one run");
    assert_eq!(platform.stopwatch_elapsed_micros(beg, beg), 0);
}

/// Engine-reserved codes are never described as native errors.
pub fn check_error_descriptions(platform: &dyn Platform) {
    let sentinels = [
        PlatformError::NotSupported,
        PlatformError::NotFound,
        PlatformError::AlreadyExists,
        PlatformError::ShareViolation,
        PlatformError::InProgress,
        PlatformError::WouldBlock,
        PlatformError::TimedOut,
        PlatformError::UnknownHost,
        PlatformError::InvalidArgument,
        PlatformError::Unknown,
    ];
    for err in sentinels {
        assert!(
            platform.describe_error(err.code()).is_none(),
            "reserved code {} was described as a native error",
            err.code()
        );
    }
}

/// Mutexes pair up and waitables time out promptly without blocking.
pub fn check_sync_primitives(platform: &dyn Platform) {
    let mutex = platform.create_mutex();
    {
        let _guard = MutexGuard::lock(&*mutex);
    }
    // lockable again after release, i.e. not left held
    {
        let _guard = MutexGuard::lock(&*mutex);
    }

    let waitable = platform.create_waitable();
    assert_eq!(
        waitable.wait_for(0),
        WaitOutcome::TimedOut,
        "wait_for(0) on an unsignalled waitable must time out promptly"
    );

    if platform.capabilities().threads {
        waitable.signal();
        assert_eq!(waitable.wait_for(0), WaitOutcome::Signaled);
        // the signal was consumed by the wait above
        assert_eq!(waitable.wait_for(0), WaitOutcome::TimedOut);

        waitable.signal();
        waitable.signal();
        assert_eq!(waitable.wait_for(1000), WaitOutcome::Signaled);
        assert_eq!(waitable.wait_for(1000), WaitOutcome::Signaled);
        assert_eq!(waitable.wait_for(0), WaitOutcome::TimedOut);
    }

    platform.sleep(0);
}

/// Files: create/write/reopen/read round-trips, EOF, seeks, repeated
/// directory creation. On storage-less backends, uniform `NotSupported`.
pub fn check_storage(platform: &dyn Platform) {
    let caps = platform.capabilities();
    if !caps.filesystem {
        assert!(matches!(
            platform.directory_create("maps"),
            Err(PlatformError::NotSupported)
        ));
        assert!(matches!(
            platform.file_open("options.txt"),
            Err(PlatformError::NotSupported)
        ));
        assert!(matches!(
            platform.file_create("options.txt"),
            Err(PlatformError::NotSupported)
        ));
        assert!(matches!(
            platform.file_open_or_create("options.txt"),
            Err(PlatformError::NotSupported)
        ));
        assert!(matches!(
            platform.directory_enum("maps", &mut |_: &str| {}),
            Err(PlatformError::NotSupported)
        ));
        assert!(!platform.file_exists("options.txt"));
        return;
    }

    assert!(!platform.file_exists("conformance-no-such-file.bin"));
    if platform.storage().readonly {
        return;
    }

    // repeated creation must never surface a resource error
    let first = platform.directory_create("conformance");
    assert!(
        matches!(first, Ok(()) | Err(PlatformError::AlreadyExists)),
        "unexpected directory_create result: {first:?}"
    );
    let second = platform.directory_create("conformance");
    assert!(
        matches!(second, Ok(()) | Err(PlatformError::AlreadyExists)),
        "second directory_create must succeed or report exists, got {second:?}"
    );

    let payload: Vec<u8> = (0..100u8).collect();
    {
        let mut file = platform
            .file_create("conformance/test.bin")
            .expect("file_create failed");
        write_all(&mut *file, &payload).expect("write failed");
    }

    assert!(platform.file_exists("conformance/test.bin"));
    // directories are not files
    assert!(!platform.file_exists("conformance"));

    let mut file = platform
        .file_open("conformance/test.bin")
        .expect("file_open failed");
    assert_eq!(file.length().expect("length failed"), 100);

    let contents = read_to_end(&mut *file).expect("read failed");
    assert_eq!(contents, payload);

    // at EOF, reads report zero bytes with success
    let mut buf = [0u8; 16];
    assert_eq!(file.read(&mut buf).expect("read at EOF failed"), 0);

    file.seek(0, SeekOrigin::Begin).expect("seek failed");
    assert_eq!(file.position().expect("position failed"), 0);
    let contents = read_to_end(&mut *file).expect("re-read failed");
    assert_eq!(contents, payload);

    file.seek(10, SeekOrigin::Begin).expect("seek failed");
    assert_eq!(file.position().expect("position failed"), 10);
    file.seek(-10, SeekOrigin::End).expect("seek from end failed");
    assert_eq!(file.position().expect("position failed"), 90);

    // truncate-on-create drops the old contents
    {
        let mut file = platform
            .file_create("conformance/test.bin")
            .expect("re-create failed");
        assert_eq!(file.length().expect("length failed"), 0);
    }

    // open-or-create preserves existing contents
    {
        let mut file = platform
            .file_create("conformance/keep.bin")
            .expect("file_create failed");
        write_all(&mut *file, b"keep").expect("write failed");
    }
    {
        let mut file = platform
            .file_open_or_create("conformance/keep.bin")
            .expect("file_open_or_create failed");
        assert_eq!(file.length().expect("length failed"), 4);
    }
}

/// Recursive enumeration visits exactly the regular files, rebuilt as
/// virtual paths.
pub fn check_enumeration(platform: &dyn Platform) {
    let caps = platform.capabilities();
    if !caps.filesystem || platform.storage().readonly {
        return;
    }

    for dir in ["maps", "maps/sub"] {
        let res = platform.directory_create(dir);
        assert!(matches!(res, Ok(()) | Err(PlatformError::AlreadyExists)));
    }
    for path in ["maps/a.cw", "maps/sub/b.cw"] {
        let mut file = platform.file_create(path).expect("file_create failed");
        write_all(&mut *file, b"map data").expect("write failed");
    }

    let mut seen = Vec::new();
    platform
        .directory_enum("maps", &mut |path: &str| seen.push(path.to_string()))
        .expect("directory_enum failed");
    seen.sort();
    assert_eq!(seen, vec!["maps/a.cw".to_string(), "maps/sub/b.cw".to_string()]);

    // enumerating a missing directory is an error, not an empty walk
    assert!(platform
        .directory_enum("conformance-no-such-dir", &mut |_: &str| {})
        .is_err());
}

/// Literal addresses resolve locally; storage-less stacks refuse
/// uniformly.
pub fn check_address_parsing(platform: &dyn Platform) {
    let caps = platform.capabilities();
    if !caps.sockets {
        assert!(matches!(
            platform.parse_address("127.0.0.1", 25565),
            Err(PlatformError::NotSupported)
        ));
        let addr = "127.0.0.1:25565".parse().unwrap();
        assert!(matches!(
            platform.connect(&addr, false),
            Err(PlatformError::NotSupported)
        ));
        return;
    }

    let addrs = platform
        .parse_address("127.0.0.1", 25565)
        .expect("literal IPv4 parse failed");
    assert_eq!(addrs.len(), 1, "literal address must bypass resolution");
    assert!(addrs[0].is_ipv4());
    assert_eq!(addrs[0].port(), 25565);

    let addrs = platform
        .parse_address("::1", 25565)
        .expect("literal IPv6 parse failed");
    assert_eq!(addrs.len(), 1);
    assert!(addrs[0].is_ipv6());

    assert!(addrs.len() <= SOCKET_MAX_ADDRS);
}
