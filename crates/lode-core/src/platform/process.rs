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

//! Launching external handlers.

use crate::error::PlatformResult;

/// Best-effort hand-off to the host's default handlers.
pub trait ProcessService {
    /// Opens `target` (a URL or file path) in the default external
    /// handler — browser, file manager, and so on.
    ///
    /// Callers check
    /// [`Capabilities::open_external`](crate::platform::Capabilities::open_external)
    /// first; backends lacking a shell also return
    /// [`NotSupported`](crate::PlatformError::NotSupported) if called
    /// anyway.
    fn start_open(&self, target: &str) -> PlatformResult<()>;
}
