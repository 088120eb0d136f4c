// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scripted lifecycle session against the stub host.

use hostlink_bridge::stub::{HostProfile, StubHost};
use hostlink_bridge::{HostEnvironment, LifecycleAdapter, LifecycleEvents};
use hostlink_core::config::BridgeConfig;
use hostlink_core::error::Result;
use hostlink_core::types::{AxisOrientation, LifecycleState, PlatformInfo, Rotation};
use serde::Serialize;

use crate::engine::LoggingEngine;

/// One simulated configuration change: the device turns to `rotation` and
/// the new configuration reports `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigChange {
    pub axis: AxisOrientation,
    pub rotation: Rotation,
}

impl std::str::FromStr for ConfigChange {
    type Err = String;

    /// Parse `axis:degrees`, e.g. `portrait:90`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (axis, degrees) = s
            .split_once(':')
            .ok_or_else(|| format!("expected axis:degrees, got `{s}`"))?;
        let axis = axis.parse::<AxisOrientation>()?;
        let degrees: u32 = degrees
            .parse()
            .map_err(|_| format!("rotation `{degrees}` is not a number"))?;
        let rotation = Rotation::from_degrees(degrees)
            .ok_or_else(|| format!("rotation must be 0, 90, 180 or 270, got {degrees}"))?;
        Ok(Self { axis, rotation })
    }
}

/// What the engine saw during a session.
#[derive(Debug, Serialize)]
pub struct Summary {
    pub host: String,
    pub platform_info: Option<PlatformInfo>,
    /// Orientation codes in the order they were forwarded.
    pub orientations: Vec<i32>,
    pub final_state: LifecycleState,
}

/// Deliver onStart followed by each change, stopping at the first error.
pub fn run(
    profile: HostProfile,
    config: BridgeConfig,
    changes: &[ConfigChange],
) -> Result<Summary> {
    let mut host = StubHost::new(profile);
    let mut adapter = LifecycleAdapter::new(LoggingEngine::default(), config);

    adapter.on_start(&mut host)?;
    for change in changes {
        host.set_rotation(change.rotation);
        host.set_axis(change.axis);
        adapter.on_configuration_changed(&mut host, change.axis)?;
    }

    let final_state = adapter.state();
    let engine = adapter.into_engine();
    Ok(Summary {
        host: host.platform_name().to_string(),
        platform_info: engine.platform_info().cloned(),
        orientations: engine.orientations().iter().map(|o| o.code()).collect(),
        final_state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostlink_core::error::BridgeError;

    #[test]
    fn parse_change() {
        let change: ConfigChange = "portrait:90".parse().unwrap();
        assert_eq!(change.axis, AxisOrientation::Portrait);
        assert_eq!(change.rotation, Rotation::Deg90);
        assert!("portrait".parse::<ConfigChange>().is_err());
        assert!("portrait:45".parse::<ConfigChange>().is_err());
        assert!("sideways:0".parse::<ConfigChange>().is_err());
    }

    #[test]
    fn default_session() {
        let summary = run(HostProfile::default(), BridgeConfig::default(), &[]).unwrap();
        let info = summary.platform_info.unwrap();
        assert_eq!(info.cache_dir, "none");
        assert_eq!((info.screen_width, info.screen_height), (1920, 1080));
        assert_eq!(summary.orientations, vec![0]);
        assert_eq!(summary.final_state, LifecycleState::Active);
    }

    #[test]
    fn changes_are_forwarded_in_order() {
        let changes: Vec<ConfigChange> = ["portrait:90", "portrait:90", "landscape:180", "other:0"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        let summary = run(HostProfile::default(), BridgeConfig::default(), &changes).unwrap();
        assert_eq!(summary.orientations, vec![0, 3, 3, 0, -1]);
    }

    #[test]
    fn host_failure_surfaces() {
        let profile = HostProfile {
            fail_query: Some("package_name".into()),
            ..Default::default()
        };
        let err = run(profile, BridgeConfig::default(), &[]).unwrap_err();
        assert!(matches!(err, BridgeError::HostQuery { .. }));
    }
}
