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

//! # Lode Core
//!
//! Foundational crate for the Lode client engine: the platform service
//! contract every backend must satisfy, the shared primitive types
//! (result codes, handles, calendar time), and the conformance suite
//! that verifies a backend against that contract.
//!
//! Higher layers (texture cache, map persistence, the HTTP client) call
//! only the traits defined here; a single backend crate satisfies the
//! whole contract for a given target. Callers never branch on which
//! backend is active — they consult [`platform::Capabilities`] instead.

#![warn(missing_docs)]

pub mod conformance;
pub mod error;
pub mod platform;

pub use error::{PlatformError, PlatformResult, RESERVED_CODE_BASE};
pub use platform::Platform;
