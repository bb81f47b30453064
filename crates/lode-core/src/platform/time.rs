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

//! Monotonic stopwatch and wall-clock time.

/// Decomposed local calendar time, produced only by
/// [`TimeService::current_local`]. All fields are zero on backends
/// without a real-time clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime {
    /// Full year (e.g. 2026).
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-31.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59.
    pub second: u32,
}

/// Time services provided by a backend.
pub trait TimeService {
    /// Reads the monotonic stopwatch. The unit is backend-specific;
    /// a measurement is only meaningful compared against another one
    /// from the same process run, via
    /// [`stopwatch_elapsed_micros`](TimeService::stopwatch_elapsed_micros).
    fn stopwatch_measure(&self) -> u64;

    /// Converts a tick delta to microseconds.
    ///
    /// Returns 0 when `end < beg` rather than underflowing — the timer
    /// source on some targets wraps around.
    fn stopwatch_elapsed_micros(&self, beg: u64, end: u64) -> u64;

    /// Best-effort wall-clock UTC time in milliseconds since the Unix
    /// epoch. Returns 0 where no real-time clock exists.
    fn current_utc_ms(&self) -> u64;

    /// Best-effort decomposed local time; a zeroed struct where no
    /// real-time clock exists.
    fn current_local(&self) -> DateTime;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_datetime_is_zeroed() {
        let dt = DateTime::default();
        assert_eq!(dt.year, 0);
        assert_eq!(dt.month, 0);
        assert_eq!(dt.second, 0);
    }
}
