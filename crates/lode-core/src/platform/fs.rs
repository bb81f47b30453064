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

//! Filesystem services.
//!
//! Paths are forward-slash-separated virtual paths relative to the
//! backend's storage root; backends translate them to native paths
//! before use. A backend with no storage returns
//! [`PlatformError::NotSupported`](crate::PlatformError::NotSupported)
//! from every operation — callers treat that as "feature absent" and
//! degrade (disable save/load UI), not as a transient failure.

use crate::error::PlatformResult;

/// The reference point for a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekOrigin {
    /// From the start of the file.
    Begin,
    /// From the current position.
    Current,
    /// From the end of the file.
    End,
}

/// An open file. The native handle is released when the value drops,
/// on every exit path including early error returns.
pub trait PlatformFile: Send {
    /// Reads up to `buf.len()` bytes. A partial read is legal;
    /// `Ok(0)` signals end of file.
    fn read(&mut self, buf: &mut [u8]) -> PlatformResult<usize>;

    /// Writes up to `buf.len()` bytes, returning how many were
    /// actually transferred. A partial write is legal.
    fn write(&mut self, buf: &[u8]) -> PlatformResult<usize>;

    /// Moves the file cursor.
    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> PlatformResult<()>;

    /// The current cursor position in bytes from the start.
    fn position(&mut self) -> PlatformResult<u64>;

    /// The total length of the file in bytes.
    fn length(&mut self) -> PlatformResult<u64>;
}

/// File and directory operations rooted at the backend's storage root.
pub trait FileSystem {
    /// Creates a directory.
    ///
    /// "Already exists" is reported as
    /// [`AlreadyExists`](crate::PlatformError::AlreadyExists) and is
    /// non-fatal; backends whose root is read-only media map "operation
    /// unsupported on this mount" to the same sentinel, so callers
    /// never see a resource error just because the medium is a CD.
    fn directory_create(&self, path: &str) -> PlatformResult<()>;

    /// True only for regular files, never for directories.
    fn file_exists(&self, path: &str) -> bool;

    /// Recursively visits every regular file under `path`, depth-first,
    /// invoking `callback` with the full virtual path of each.
    ///
    /// Relative paths are rebuilt by concatenation (`dir/name`), the
    /// `.`/`..` pseudo-entries are skipped, and the walk stops on the
    /// first failure.
    fn directory_enum(
        &self,
        path: &str,
        callback: &mut dyn FnMut(&str),
    ) -> PlatformResult<()>;

    /// Opens an existing file read-only.
    fn file_open(&self, path: &str) -> PlatformResult<Box<dyn PlatformFile>>;

    /// Opens read-write, creating the file and truncating any existing
    /// content.
    fn file_create(&self, path: &str) -> PlatformResult<Box<dyn PlatformFile>>;

    /// Opens read-write, creating the file if missing but preserving
    /// existing content.
    fn file_open_or_create(
        &self,
        path: &str,
    ) -> PlatformResult<Box<dyn PlatformFile>>;
}

/// Writes all of `data`, looping over legal partial writes.
pub fn write_all(
    file: &mut dyn PlatformFile,
    mut data: &[u8],
) -> PlatformResult<()> {
    while !data.is_empty() {
        let written = file.write(data)?;
        if written == 0 {
            return Err(crate::PlatformError::Unknown);
        }
        data = &data[written..];
    }
    Ok(())
}

/// Reads to end of file, looping over legal partial reads.
pub fn read_to_end(file: &mut dyn PlatformFile) -> PlatformResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            return Ok(out);
        }
        out.extend_from_slice(&buf[..read]);
    }
}
