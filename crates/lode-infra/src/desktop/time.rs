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

//! Desktop clocks: `Instant`-based stopwatch, `chrono` wall clock.

use super::DesktopPlatform;
use chrono::{Datelike, Timelike};
use lode_core::platform::{DateTime, TimeService};

impl TimeService for DesktopPlatform {
    fn stopwatch_measure(&self) -> u64 {
        // microseconds since backend construction; Instant is
        // monotonic so ticks are already in elapsed order
        self.epoch.elapsed().as_micros() as u64
    }

    fn stopwatch_elapsed_micros(&self, beg: u64, end: u64) -> u64 {
        end.saturating_sub(beg)
    }

    fn current_utc_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    fn current_local(&self) -> DateTime {
        let now = chrono::Local::now();
        DateTime {
            year: now.year(),
            month: now.month(),
            day: now.day(),
            hour: now.hour(),
            minute: now.minute(),
            second: now.second(),
        }
    }
}
