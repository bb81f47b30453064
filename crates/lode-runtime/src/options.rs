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

//! The options store: persistent key=value settings.
//!
//! A representative contract consumer — it talks to storage only
//! through `&dyn Platform`, so it is written once for every backend.
//! On a backend without a filesystem it degrades to an in-memory store
//! and reports itself unavailable, which callers use to disable the
//! save path rather than retry.

use lode_core::error::{PlatformError, PlatformResult};
use lode_core::platform::fs::{read_to_end, write_all};
use lode_core::platform::{FileSystem, Platform};
use std::collections::BTreeMap;

/// Virtual path of the options file under the storage root.
pub const OPTIONS_FILE: &str = "options.txt";

/// In-memory view of the options file.
pub struct OptionsStore {
    values: BTreeMap<String, String>,
    available: bool,
    dirty: bool,
}

impl OptionsStore {
    /// Loads the options file, tolerating a missing file (first run)
    /// and an absent filesystem (capability off → unavailable store).
    pub fn load(platform: &dyn Platform) -> Self {
        if !platform.capabilities().filesystem {
            return Self {
                values: BTreeMap::new(),
                available: false,
                dirty: false,
            };
        }

        let values = match platform.file_open(OPTIONS_FILE) {
            Ok(mut file) => match read_to_end(&mut *file) {
                Ok(bytes) => parse(&bytes),
                Err(err) => {
                    log::warn!("could not read {OPTIONS_FILE}: {err}");
                    BTreeMap::new()
                }
            },
            Err(PlatformError::NotFound) => BTreeMap::new(),
            Err(err) => {
                log::warn!("could not open {OPTIONS_FILE}: {err}");
                BTreeMap::new()
            }
        };

        Self {
            values,
            available: true,
            dirty: false,
        }
    }

    /// False when the backend has no storage; callers disable saving.
    pub fn available(&self) -> bool {
        self.available
    }

    /// Number of stored options.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no options are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Looks up an option.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Looks up an option, falling back to `default`.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Sets an option, marking the store dirty only on real changes.
    pub fn set(&mut self, key: &str, value: &str) {
        if self.get(key) == Some(value) {
            return;
        }
        self.values.insert(key.to_string(), value.to_string());
        self.dirty = true;
    }

    /// True when there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the store back out. No-op when clean; `NotSupported`
    /// when the backend has no storage.
    pub fn save(&mut self, platform: &dyn Platform) -> PlatformResult<()> {
        if !self.available {
            return Err(PlatformError::NotSupported);
        }
        if !self.dirty {
            return Ok(());
        }

        let mut contents = String::new();
        for (key, value) in &self.values {
            contents.push_str(key);
            contents.push('=');
            contents.push_str(value);
            contents.push('\n');
        }

        let mut file = platform.file_create(OPTIONS_FILE)?;
        write_all(&mut *file, contents.as_bytes())?;
        self.dirty = false;
        Ok(())
    }
}

fn parse(bytes: &[u8]) -> BTreeMap<String, String> {
    let text = String::from_utf8_lossy(bytes);
    let mut values = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            values.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use lode_infra::null::NullPlatform;

    #[test]
    fn parse_skips_comments_and_blanks() {
        let values = parse(b"# settings\n\nrender-distance = 8\nname=miner\n");
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("render-distance").map(String::as_str), Some("8"));
        assert_eq!(values.get("name").map(String::as_str), Some("miner"));
    }

    #[test]
    fn parse_ignores_lines_without_separator() {
        let values = parse(b"not-an-option\nkey=value\n");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn unavailable_on_storage_less_backend() {
        let mut platform = NullPlatform::new();
        lode_core::platform::Platform::init(&mut platform).unwrap();

        let mut store = OptionsStore::load(&platform);
        assert!(!store.available());
        assert!(store.is_empty());

        store.set("volume", "7");
        assert_eq!(store.get("volume"), Some("7"));
        assert!(matches!(
            store.save(&platform),
            Err(PlatformError::NotSupported)
        ));
    }

    #[cfg(unix)]
    mod desktop {
        use super::super::*;
        use lode_infra::desktop::DesktopPlatform;

        fn booted(root: &std::path::Path) -> DesktopPlatform {
            let mut platform = DesktopPlatform::with_root(root.to_path_buf());
            Platform::init(&mut platform).unwrap();
            platform
        }

        #[test]
        fn save_and_reload_round_trip() {
            let dir = tempfile::tempdir().unwrap();
            let platform = booted(dir.path());

            let mut store = OptionsStore::load(&platform);
            assert!(store.available());
            assert!(store.is_empty());

            store.set("render-distance", "8");
            store.set("name", "miner");
            assert!(store.is_dirty());
            store.save(&platform).unwrap();
            assert!(!store.is_dirty());

            let reloaded = OptionsStore::load(&platform);
            assert_eq!(reloaded.len(), 2);
            assert_eq!(reloaded.get("render-distance"), Some("8"));
            assert_eq!(reloaded.get_or("missing", "fallback"), "fallback");
        }

        #[test]
        fn clean_save_is_a_no_op() {
            let dir = tempfile::tempdir().unwrap();
            let platform = booted(dir.path());

            let mut store = OptionsStore::load(&platform);
            store.save(&platform).unwrap();
            assert!(!platform.file_exists(OPTIONS_FILE));
        }

        #[test]
        fn unchanged_set_does_not_dirty() {
            let dir = tempfile::tempdir().unwrap();
            let platform = booted(dir.path());

            let mut store = OptionsStore::load(&platform);
            store.set("volume", "7");
            store.save(&platform).unwrap();

            store.set("volume", "7");
            assert!(!store.is_dirty());
        }
    }
}
