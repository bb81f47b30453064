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

//! Stream socket services.
//!
//! All socket I/O here is non-blocking-safe: would-block is reported as
//! the [`WouldBlock`](crate::PlatformError::WouldBlock) sentinel so
//! callers can distinguish "retry later" from "connection broken".

use crate::error::PlatformResult;
use std::net::SocketAddr;

/// The most candidate addresses a resolution call will return.
pub const SOCKET_MAX_ADDRS: usize = 5;

/// Whether a connect completed immediately or is still underway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectProgress {
    /// The connection is established and ready for I/O.
    Established,
    /// A non-blocking connect returned immediately; poll
    /// [`check_writable`](PlatformSocket::check_writable) to detect
    /// completion (or the deferred failure).
    InProgress,
}

/// A connected (or connecting) stream socket. Dropping the value shuts
/// down both directions and releases the native handle.
pub trait PlatformSocket: Send {
    /// Receives up to `buf.len()` bytes. `Ok(0)` means the peer closed
    /// the connection; would-block is reported as the sentinel, with
    /// nothing transferred.
    fn read(&mut self, buf: &mut [u8]) -> PlatformResult<usize>;

    /// Sends up to `buf.len()` bytes, returning how many were accepted.
    fn write(&mut self, buf: &[u8]) -> PlatformResult<usize>;

    /// Polls readability without blocking. A closed or reset peer
    /// counts as readable, so the caller's next read observes the EOF
    /// or error instead of waiting forever.
    fn check_readable(&self) -> PlatformResult<bool>;

    /// Polls writability without blocking. When the socket is mid
    /// non-blocking connect, this surfaces the connection's deferred
    /// error slot rather than falsely reporting progress.
    fn check_writable(&self) -> PlatformResult<bool>;
}

/// Socket creation and name resolution.
pub trait NetService {
    /// Resolves a hostname or literal IP to up to [`SOCKET_MAX_ADDRS`]
    /// candidate addresses.
    ///
    /// Literal addresses bypass the resolver entirely (it is unreliable
    /// or slow on some targets). "Name not found" maps to
    /// [`UnknownHost`](crate::PlatformError::UnknownHost), distinct
    /// from other resolution failures; a resolution yielding zero
    /// usable candidates maps to
    /// [`InvalidArgument`](crate::PlatformError::InvalidArgument).
    fn parse_address(
        &self,
        host: &str,
        port: u16,
    ) -> PlatformResult<Vec<SocketAddr>>;

    /// Creates a stream socket matching `addr`'s family and connects.
    ///
    /// With `nonblocking` set, the call returns immediately with
    /// [`ConnectProgress::InProgress`] instead of blocking; the caller
    /// polls writability to detect completion.
    fn connect(
        &self,
        addr: &SocketAddr,
        nonblocking: bool,
    ) -> PlatformResult<(Box<dyn PlatformSocket>, ConnectProgress)>;
}
