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

//! External handler launch via the `open` crate.

use super::DesktopPlatform;
use lode_core::error::PlatformResult;
use lode_core::platform::ProcessService;

impl ProcessService for DesktopPlatform {
    fn start_open(&self, target: &str) -> PlatformResult<()> {
        log::debug!("opening '{target}' in the default handler");
        open::that(target)?;
        Ok(())
    }
}
