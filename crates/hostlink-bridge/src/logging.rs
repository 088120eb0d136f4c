// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Log output setup.
//
// Desktop builds install a `tracing-subscriber` formatter. On Android there
// is no stderr worth reading, so `tracing` records flow through the `log`
// facade into logcat via `android_logger`.

/// Logcat tag on Android.
#[cfg(target_os = "android")]
const LOG_TAG: &str = "hostlink";

/// Install the process logger. Safe to call more than once.
///
/// `default_filter` applies unless `RUST_LOG` is set (desktop only).
#[cfg(not(target_os = "android"))]
pub fn init(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    // An already-installed subscriber wins.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install the process logger. Safe to call more than once.
///
/// `default_filter` is read as a single level (`info`, `debug`, ...).
#[cfg(target_os = "android")]
pub fn init(default_filter: &str) {
    let level = default_filter
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(LOG_TAG),
    );
}
