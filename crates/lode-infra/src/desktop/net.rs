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

//! TCP sockets over `socket2`, with `poll(2)` readiness checks.

use super::DesktopPlatform;
use lode_core::error::{PlatformError, PlatformResult};
use lode_core::platform::{
    ConnectProgress, NetService, PlatformSocket, SOCKET_MAX_ADDRS,
};
use socket2::{Domain, Protocol, Socket, Type};
use std::ffi::CString;
use std::io::{Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream};
use std::os::unix::io::AsRawFd;

impl NetService for DesktopPlatform {
    fn parse_address(
        &self,
        host: &str,
        port: u16,
    ) -> PlatformResult<Vec<SocketAddr>> {
        // literal addresses never touch the resolver
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![SocketAddr::new(ip, port)]);
        }
        resolve(host, port)
    }

    fn connect(
        &self,
        addr: &SocketAddr,
        nonblocking: bool,
    ) -> PlatformResult<(Box<dyn PlatformSocket>, ConnectProgress)> {
        let socket = Socket::new(
            Domain::for_address(*addr),
            Type::STREAM,
            Some(Protocol::TCP),
        )?;
        if nonblocking {
            socket.set_nonblocking(true)?;
        }

        let progress = match socket.connect(&(*addr).into()) {
            Ok(()) => ConnectProgress::Established,
            Err(err)
                if nonblocking
                    && err.raw_os_error() == Some(libc::EINPROGRESS) =>
            {
                ConnectProgress::InProgress
            }
            Err(err) => return Err(err.into()),
        };

        let stream: TcpStream = socket.into();
        Ok((Box::new(DesktopSocket { stream }), progress))
    }
}

/// Name resolution through `getaddrinfo` directly. `std`'s resolver
/// collapses every EAI code into one errno-less error, which would make
/// a transient resolver outage indistinguishable from "no such host";
/// only `EAI_NONAME` may map to the permanent `UnknownHost` sentinel.
fn resolve(host: &str, port: u16) -> PlatformResult<Vec<SocketAddr>> {
    let node =
        CString::new(host).map_err(|_| PlatformError::InvalidArgument)?;
    let service = CString::new(port.to_string())
        .map_err(|_| PlatformError::InvalidArgument)?;

    let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
    hints.ai_socktype = libc::SOCK_STREAM;
    hints.ai_protocol = libc::IPPROTO_TCP;

    let mut list: *mut libc::addrinfo = std::ptr::null_mut();
    let rc = unsafe {
        libc::getaddrinfo(node.as_ptr(), service.as_ptr(), &hints, &mut list)
    };
    match rc {
        0 => {}
        libc::EAI_NONAME => return Err(PlatformError::UnknownHost),
        libc::EAI_SYSTEM => {
            return Err(std::io::Error::last_os_error().into())
        }
        _ => return Err(PlatformError::Unknown),
    }

    let mut addrs = Vec::new();
    let mut cursor = list;
    while !cursor.is_null() && addrs.len() < SOCKET_MAX_ADDRS {
        let entry = unsafe { &*cursor };
        if let Some(addr) = stream_address(entry) {
            addrs.push(addr);
        }
        cursor = entry.ai_next;
    }
    unsafe { libc::freeaddrinfo(list) };

    if addrs.is_empty() {
        return Err(PlatformError::InvalidArgument);
    }
    Ok(addrs)
}

fn stream_address(entry: &libc::addrinfo) -> Option<SocketAddr> {
    match entry.ai_family {
        libc::AF_INET => {
            let sa =
                unsafe { *(entry.ai_addr as *const libc::sockaddr_in) };
            let ip = Ipv4Addr::from(u32::from_be(sa.sin_addr.s_addr));
            Some(SocketAddr::new(IpAddr::V4(ip), u16::from_be(sa.sin_port)))
        }
        libc::AF_INET6 => {
            let sa =
                unsafe { *(entry.ai_addr as *const libc::sockaddr_in6) };
            let ip = Ipv6Addr::from(sa.sin6_addr.s6_addr);
            Some(SocketAddr::new(IpAddr::V6(ip), u16::from_be(sa.sin6_port)))
        }
        _ => None,
    }
}

/// A connected TCP socket. Dropping shuts down both directions before
/// the descriptor closes.
pub struct DesktopSocket {
    stream: TcpStream,
}

impl DesktopSocket {
    fn poll_ready(&self, want_write: bool) -> PlatformResult<bool> {
        let mut pollfd = libc::pollfd {
            fd: self.stream.as_raw_fd(),
            events: if want_write {
                libc::POLLOUT
            } else {
                libc::POLLIN
            },
            revents: 0,
        };

        let rc = unsafe { libc::poll(&mut pollfd, 1, 0) };
        if rc < 0 {
            return Err(std::io::Error::last_os_error().into());
        }

        // to match select, a hung-up peer still counts as readable so
        // the next read observes the EOF
        let mask = if want_write {
            libc::POLLOUT
        } else {
            libc::POLLIN | libc::POLLHUP
        };
        Ok(pollfd.revents & mask != 0)
    }
}

impl PlatformSocket for DesktopSocket {
    fn read(&mut self, buf: &mut [u8]) -> PlatformResult<usize> {
        Ok(self.stream.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> PlatformResult<usize> {
        Ok(self.stream.write(buf)?)
    }

    fn check_readable(&self) -> PlatformResult<bool> {
        self.poll_ready(false)
    }

    fn check_writable(&self) -> PlatformResult<bool> {
        if self.poll_ready(true)? {
            return Ok(true);
        }
        // not writable yet: a pending non-blocking connect may have
        // failed, which only shows up in the deferred error slot
        if let Some(err) = self.stream.take_error()? {
            return Err(err.into());
        }
        Ok(false)
    }
}

impl Drop for DesktopSocket {
    fn drop(&mut self) {
        let _ = self.stream.shutdown(std::net::Shutdown::Both);
    }
}
