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

//! lode-probe: boots a platform backend and walks the whole service
//! contract, logging what this target can and cannot do. Pass `--null`
//! to exercise the stub backend's degraded mode instead of the native
//! one.

mod options;

use anyhow::Result;
use lode_core::platform::fs::{read_to_end, write_all};
use lode_core::platform::{
    FileSystem, NetService, Platform, ThreadService, TimeService,
};
use options::OptionsStore;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let use_null = std::env::args().skip(1).any(|arg| arg == "--null");
    let mut platform = if use_null {
        Box::new(lode_infra::null::NullPlatform::new()) as Box<dyn Platform>
    } else {
        native_backend()
    };

    platform.init()?;
    report_capabilities(platform.as_ref());
    report_clocks(platform.as_ref());
    storage_self_check(platform.as_ref());
    network_self_check(platform.as_ref());
    options_check(platform.as_ref());
    platform.shutdown();
    Ok(())
}

#[cfg(unix)]
fn native_backend() -> Box<dyn Platform> {
    Box::new(lode_infra::desktop::DesktopPlatform::new())
}

#[cfg(not(unix))]
fn native_backend() -> Box<dyn Platform> {
    log::warn!("no native backend for this target; falling back to null");
    Box::new(lode_infra::null::NullPlatform::new())
}

fn report_capabilities(platform: &dyn Platform) {
    let caps = platform.capabilities();
    log::info!("backend:{}", platform.app_name_suffix());
    log::info!(
        "capabilities: filesystem={} sockets={} threads={} open_external={} rtc={}",
        caps.filesystem,
        caps.sockets,
        caps.threads,
        caps.open_external,
        caps.real_time_clock
    );
    log::info!(
        "storage root '{}' ({})",
        platform.storage().root.display(),
        if platform.storage().readonly {
            "read-only"
        } else {
            "writable"
        }
    );
}

fn report_clocks(platform: &dyn Platform) {
    let beg = platform.stopwatch_measure();
    platform.sleep(10);
    let end = platform.stopwatch_measure();
    log::info!(
        "stopwatch: ~10ms sleep measured as {}us",
        platform.stopwatch_elapsed_micros(beg, end)
    );

    let utc = platform.current_utc_ms();
    if utc == 0 {
        log::info!("wall clock: no real-time clock on this target");
    } else {
        let local = platform.current_local();
        log::info!(
            "wall clock: {}ms UTC, local {:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            utc,
            local.year,
            local.month,
            local.day,
            local.hour,
            local.minute,
            local.second
        );
    }
}

fn storage_self_check(platform: &dyn Platform) {
    let caps = platform.capabilities();
    if !caps.filesystem || platform.storage().readonly {
        log::info!("storage self-check skipped (no writable storage)");
        return;
    }

    let payload: Vec<u8> = (0..64u8).collect();
    let outcome = (|| {
        let mut file = platform.file_create("probe.bin")?;
        write_all(&mut *file, &payload)?;
        drop(file);

        let mut file = platform.file_open("probe.bin")?;
        let contents = read_to_end(&mut *file)?;
        Ok::<bool, lode_core::PlatformError>(contents == payload)
    })();

    match outcome {
        Ok(true) => log::info!("storage self-check passed"),
        Ok(false) => log::error!("storage self-check read back wrong bytes"),
        Err(err) => log::error!("storage self-check failed: {err}"),
    }
}

fn network_self_check(platform: &dyn Platform) {
    if !platform.capabilities().sockets {
        log::info!("network self-check skipped (no socket stack)");
        return;
    }

    // literal parse only: the probe must not depend on a resolver or
    // an actual peer being reachable
    match platform.parse_address("127.0.0.1", 25565) {
        Ok(addrs) => log::info!("address parsing ok: {}", addrs[0]),
        Err(err) => log::error!("address parsing failed: {err}"),
    }
}

fn options_check(platform: &dyn Platform) {
    let mut store = OptionsStore::load(platform);
    if !store.available() {
        log::info!("options store unavailable; using in-memory defaults");
        return;
    }

    log::info!("options loaded: {} entries", store.len());
    store.set("probe.last-utc-ms", &platform.current_utc_ms().to_string());
    match store.save(platform) {
        Ok(()) => log::info!("options saved"),
        Err(err) => log::warn!("options save failed: {err}"),
    }
}
