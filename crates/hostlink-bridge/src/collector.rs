// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device snapshot collection.

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::Result;
use hostlink_core::types::PlatformInfo;
use tracing::{debug, warn};

use crate::traits::HostEnvironment;

/// Read the platform snapshot from the host.
///
/// All-or-nothing: the first failing query aborts collection and no partial
/// record is produced. Read-only with respect to the host.
pub fn collect<H>(host: &mut H, config: &BridgeConfig) -> Result<PlatformInfo>
where
    H: HostEnvironment + ?Sized,
{
    let app_id = host.package_name()?;
    let identity = host.device_identity()?;
    let os_version = host.os_release()?;
    let locale = host.locale()?;
    let size = host.real_display_size()?;

    let cache_dir = match host.cache_dir()? {
        Some(dir) => dir,
        None => {
            warn!(
                sentinel = %config.cache_dir_sentinel,
                "host exposes no cache directory"
            );
            config.cache_dir_sentinel.clone()
        }
    };

    let native_lib_dir = host.native_library_dir()?;
    let executable_path = executable_path(&native_lib_dir, &config.engine_library);

    debug!(
        host = host.platform_name(),
        app_id = %app_id,
        display = %size,
        executable = %executable_path,
        "platform snapshot collected"
    );

    Ok(PlatformInfo {
        app_id,
        manufacturer: identity.manufacturer,
        model: identity.model,
        build_id: identity.build_id,
        os_version,
        locale,
        cache_dir,
        executable_path,
        native_lib_dir,
        screen_width: size.width,
        screen_height: size.height,
    })
}

/// Native library directory joined with the engine library file name.
fn executable_path(native_lib_dir: &str, library: &str) -> String {
    let dir = native_lib_dir.trim_end_matches('/');
    format!("{dir}/{library}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{HostProfile, StubHost};
    use hostlink_core::error::BridgeError;
    use hostlink_core::types::DisplaySize;

    #[test]
    fn missing_cache_dir_uses_sentinel() {
        let mut host = StubHost::new(HostProfile {
            cache_dir: None,
            display: DisplaySize {
                width: 1920,
                height: 1080,
            },
            ..Default::default()
        });
        let info = collect(&mut host, &BridgeConfig::default()).unwrap();
        assert_eq!(info.cache_dir, "none");
        assert_eq!(info.screen_width, 1920);
        assert_eq!(info.screen_height, 1080);
    }

    #[test]
    fn cache_dir_passed_through() {
        let mut host = StubHost::new(HostProfile {
            cache_dir: Some("/data/user/0/dev.hostlink/cache".into()),
            ..Default::default()
        });
        let info = collect(&mut host, &BridgeConfig::default()).unwrap();
        assert_eq!(info.cache_dir, "/data/user/0/dev.hostlink/cache");
    }

    #[test]
    fn executable_path_joins_library_name() {
        let mut host = StubHost::new(HostProfile {
            native_library_dir: "/data/app/dev.hostlink/lib/arm64".into(),
            ..Default::default()
        });
        let config = BridgeConfig {
            engine_library: "libgame.so".into(),
            ..Default::default()
        };
        let info = collect(&mut host, &config).unwrap();
        assert_eq!(info.executable_path, "/data/app/dev.hostlink/lib/arm64/libgame.so");
        assert_eq!(info.native_lib_dir, "/data/app/dev.hostlink/lib/arm64");
    }

    #[test]
    fn trailing_slash_not_doubled() {
        assert_eq!(executable_path("/lib/", "libengine.so"), "/lib/libengine.so");
    }

    #[test]
    fn queries_in_order() {
        let mut host = StubHost::default();
        collect(&mut host, &BridgeConfig::default()).unwrap();
        assert_eq!(
            host.queries(),
            &[
                "package_name",
                "device_identity",
                "os_release",
                "locale",
                "real_display_size",
                "cache_dir",
                "native_library_dir",
            ]
        );
    }

    #[test]
    fn failed_query_aborts_collection() {
        let mut host = StubHost::new(HostProfile {
            fail_query: Some("real_display_size".into()),
            ..Default::default()
        });
        let err = collect(&mut host, &BridgeConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::HostQuery {
                query: "real_display_size",
                ..
            }
        ));
        // nothing after the failing query was read
        assert_eq!(host.query_count("cache_dir"), 0);
        assert_eq!(host.query_count("native_library_dir"), 0);
    }
}
