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

//! `std::fs`-backed filesystem services.

use super::DesktopPlatform;
use lode_core::error::{PlatformError, PlatformResult};
use lode_core::platform::{FileSystem, PlatformFile, SeekOrigin};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

impl DesktopPlatform {
    /// Translates a forward-slash virtual path to a native path under
    /// the storage root.
    pub(crate) fn native_path(&self, path: &str) -> PathBuf {
        let mut native = self.storage.root.clone();
        for part in path.split('/') {
            if !part.is_empty() {
                native.push(part);
            }
        }
        native
    }

    fn enum_dir(
        &self,
        dir: &str,
        callback: &mut dyn FnMut(&str),
    ) -> PlatformResult<()> {
        // read_dir never yields the '.'/'..' pseudo-entries the
        // contract requires skipping
        for entry in std::fs::read_dir(self.native_path(dir))? {
            let entry = entry?;
            let name = entry.file_name();
            let child = format!("{dir}/{}", name.to_string_lossy());

            let kind = entry.file_type()?;
            if kind.is_dir() {
                self.enum_dir(&child, callback)?;
            } else if kind.is_file() {
                callback(&child);
            }
        }
        Ok(())
    }
}

impl FileSystem for DesktopPlatform {
    fn directory_create(&self, path: &str) -> PlatformResult<()> {
        match std::fs::create_dir(self.native_path(path)) {
            Ok(()) => Ok(()),
            // EINVAL means "unsupported on this mount" (read-only
            // media); report it as the benign exists sentinel so
            // callers don't log a scary resource error
            Err(err) if err.raw_os_error() == Some(libc::EINVAL) => {
                Err(PlatformError::AlreadyExists)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn file_exists(&self, path: &str) -> bool {
        std::fs::metadata(self.native_path(path))
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    fn directory_enum(
        &self,
        path: &str,
        callback: &mut dyn FnMut(&str),
    ) -> PlatformResult<()> {
        self.enum_dir(path, callback)
    }

    fn file_open(&self, path: &str) -> PlatformResult<Box<dyn PlatformFile>> {
        let file = OpenOptions::new()
            .read(true)
            .open(self.native_path(path))?;
        Ok(Box::new(DesktopFile { file }))
    }

    fn file_create(&self, path: &str) -> PlatformResult<Box<dyn PlatformFile>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.native_path(path))?;
        Ok(Box::new(DesktopFile { file }))
    }

    fn file_open_or_create(
        &self,
        path: &str,
    ) -> PlatformResult<Box<dyn PlatformFile>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(self.native_path(path))?;
        Ok(Box::new(DesktopFile { file }))
    }
}

/// An open file on the desktop backend. The descriptor closes when the
/// value drops.
pub struct DesktopFile {
    file: File,
}

impl PlatformFile for DesktopFile {
    fn read(&mut self, buf: &mut [u8]) -> PlatformResult<usize> {
        Ok(self.file.read(buf)?)
    }

    fn write(&mut self, buf: &[u8]) -> PlatformResult<usize> {
        Ok(self.file.write(buf)?)
    }

    fn seek(&mut self, offset: i64, origin: SeekOrigin) -> PlatformResult<()> {
        let pos = match origin {
            SeekOrigin::Begin => SeekFrom::Start(offset as u64),
            SeekOrigin::Current => SeekFrom::Current(offset),
            SeekOrigin::End => SeekFrom::End(offset),
        };
        self.file.seek(pos)?;
        Ok(())
    }

    fn position(&mut self) -> PlatformResult<u64> {
        Ok(self.file.stream_position()?)
    }

    fn length(&mut self) -> PlatformResult<u64> {
        Ok(self.file.metadata()?.len())
    }
}
