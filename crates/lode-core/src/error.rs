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

//! The result-code model shared by every platform backend.
//!
//! A platform operation either succeeds or reports a [`PlatformError`]:
//! one of a small set of engine-reserved sentinels, or a native error
//! number carried through unchanged. Callers never inspect native codes
//! directly; they match on sentinels, classify via
//! [`PlatformError::class`], or hand the numeric form to
//! [`Platform::describe_error`](crate::platform::Platform::describe_error).

use std::fmt;
use std::io;

/// Numeric codes at or above this value are engine-reserved sentinels.
///
/// Native error numbers sit below this threshold on every supported
/// target, so a backend's `describe_error` must refuse the reserved
/// range — those codes never came from a `strerror`-style facility.
pub const RESERVED_CODE_BASE: u32 = 1000;

/// Shorthand for the result type returned by every platform operation.
pub type PlatformResult<T> = Result<T, PlatformError>;

/// A failed platform operation.
///
/// Sentinel variants have engine-defined meaning and numeric codes in
/// the reserved range (see [`RESERVED_CODE_BASE`]); `Native` carries a
/// backend error number verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// The operation has no meaning on this backend. Callers must treat
    /// this as a permanent capability absence and disable the dependent
    /// feature rather than retry.
    NotSupported,
    /// The named file does not exist.
    NotFound,
    /// The directory (or file) already exists.
    AlreadyExists,
    /// The file is exclusively held by another process.
    ShareViolation,
    /// A non-blocking connect was started and has not yet completed;
    /// poll writability to detect completion.
    InProgress,
    /// No data/space is available on a non-blocking socket right now;
    /// retry later.
    WouldBlock,
    /// A bounded wait elapsed without the awaited event occurring.
    TimedOut,
    /// Host name resolution found no such name.
    UnknownHost,
    /// The operation was given an argument the backend cannot act on
    /// (for example, a resolution that produced zero usable addresses).
    InvalidArgument,
    /// The backend could not produce a native error number for an
    /// operation that failed anyway.
    Unknown,
    /// A native OS/SDK error number, passed through untranslated.
    Native(i32),
}

/// The caller-facing classification of a [`PlatformError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Permanent capability absence: disable the feature, never retry.
    Unsupported,
    /// Expected, retryable outcome: would-block, in-progress, timeout.
    Transient,
    /// A genuine native failure: surface to the user, abort the
    /// operation.
    Resource,
}

impl PlatformError {
    /// Classifies this error per the engine's error-handling taxonomy.
    pub fn class(&self) -> ErrorClass {
        match self {
            PlatformError::NotSupported => ErrorClass::Unsupported,
            PlatformError::InProgress
            | PlatformError::WouldBlock
            | PlatformError::TimedOut => ErrorClass::Transient,
            _ => ErrorClass::Resource,
        }
    }

    /// Returns the numeric wire form of this error.
    ///
    /// Sentinels encode into the engine-reserved range; `Native` codes
    /// pass through unchanged.
    pub fn code(&self) -> u32 {
        match self {
            PlatformError::NotSupported => RESERVED_CODE_BASE + 1,
            PlatformError::NotFound => RESERVED_CODE_BASE + 2,
            PlatformError::AlreadyExists => RESERVED_CODE_BASE + 3,
            PlatformError::ShareViolation => RESERVED_CODE_BASE + 4,
            PlatformError::InProgress => RESERVED_CODE_BASE + 5,
            PlatformError::WouldBlock => RESERVED_CODE_BASE + 6,
            PlatformError::TimedOut => RESERVED_CODE_BASE + 7,
            PlatformError::UnknownHost => RESERVED_CODE_BASE + 8,
            PlatformError::InvalidArgument => RESERVED_CODE_BASE + 9,
            PlatformError::Unknown => RESERVED_CODE_BASE + 99,
            PlatformError::Native(code) => *code as u32,
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::NotSupported => {
                write!(f, "Operation not supported by this backend")
            }
            PlatformError::NotFound => write!(f, "File not found"),
            PlatformError::AlreadyExists => write!(f, "Already exists"),
            PlatformError::ShareViolation => {
                write!(f, "File is in use by another process")
            }
            PlatformError::InProgress => {
                write!(f, "Connection attempt in progress")
            }
            PlatformError::WouldBlock => {
                write!(f, "Operation would block; retry later")
            }
            PlatformError::TimedOut => write!(f, "Operation timed out"),
            PlatformError::UnknownHost => write!(f, "Unknown host name"),
            PlatformError::InvalidArgument => write!(f, "Invalid argument"),
            PlatformError::Unknown => {
                write!(f, "Unidentified platform error")
            }
            PlatformError::Native(code) => {
                write!(f, "Native error {code}")
            }
        }
    }
}

impl std::error::Error for PlatformError {}

impl From<io::Error> for PlatformError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => PlatformError::NotFound,
            io::ErrorKind::AlreadyExists => PlatformError::AlreadyExists,
            io::ErrorKind::WouldBlock => PlatformError::WouldBlock,
            io::ErrorKind::TimedOut => PlatformError::TimedOut,
            io::ErrorKind::Unsupported => PlatformError::NotSupported,
            io::ErrorKind::InvalidInput => PlatformError::InvalidArgument,
            _ => err
                .raw_os_error()
                .map(PlatformError::Native)
                .unwrap_or(PlatformError::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes_are_reserved() {
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
                err.code() >= RESERVED_CODE_BASE,
                "{err:?} leaked into the native range"
            );
        }
    }

    #[test]
    fn native_codes_pass_through() {
        assert_eq!(PlatformError::Native(2).code(), 2);
        assert_eq!(PlatformError::Native(13).code(), 13);
    }

    #[test]
    fn class_taxonomy() {
        assert_eq!(
            PlatformError::NotSupported.class(),
            ErrorClass::Unsupported
        );
        assert_eq!(PlatformError::WouldBlock.class(), ErrorClass::Transient);
        assert_eq!(PlatformError::InProgress.class(), ErrorClass::Transient);
        assert_eq!(PlatformError::TimedOut.class(), ErrorClass::Transient);
        assert_eq!(PlatformError::NotFound.class(), ErrorClass::Resource);
        assert_eq!(PlatformError::Native(5).class(), ErrorClass::Resource);
    }

    #[test]
    fn io_error_mapping() {
        let not_found = io::Error::new(io::ErrorKind::NotFound, "gone");
        assert_eq!(PlatformError::from(not_found), PlatformError::NotFound);

        let would_block = io::Error::new(io::ErrorKind::WouldBlock, "later");
        assert_eq!(
            PlatformError::from(would_block),
            PlatformError::WouldBlock
        );

        let native = io::Error::from_raw_os_error(13);
        assert_eq!(PlatformError::from(native), PlatformError::Native(13));
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            format!("{}", PlatformError::NotSupported),
            "Operation not supported by this backend"
        );
        assert_eq!(format!("{}", PlatformError::Native(2)), "Native error 2");
    }
}
