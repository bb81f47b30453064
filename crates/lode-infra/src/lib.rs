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

//! # Lode Infra
//!
//! Concrete platform backends satisfying the `lode-core` contract.
//! One module per target, selected at build time through Cargo
//! features — the Rust analogue of compiling a single platform
//! translation unit per port:
//!
//! - [`desktop`]: the fully capable Unix backend (real filesystem,
//!   preemptive threads, non-blocking TCP).
//! - [`null`]: the stub backend for targets with no OS services;
//!   everything it cannot do reports `NotSupported` uniformly.
//!
//! Both are verified by the shared suite in `lode_core::conformance`
//! (see this crate's integration tests).

#[cfg(all(feature = "desktop", unix))]
pub mod desktop;
#[cfg(feature = "null")]
pub mod null;

#[cfg(all(feature = "desktop", unix))]
mod fatal;
