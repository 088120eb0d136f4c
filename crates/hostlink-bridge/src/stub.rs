// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub host for desktop/CI builds where no mobile application host exists.
//
// Answers every query from a fixed `HostProfile`. Rotation and axis can be
// changed between events to simulate the device turning, and a single named
// query can be made to fail to exercise the all-or-nothing paths.

use std::path::Path;

use hostlink_core::error::{BridgeError, Result};
use hostlink_core::types::{AxisOrientation, DeviceIdentity, DisplaySize, Rotation};
use serde::{Deserialize, Serialize};

use crate::traits::*;

/// Fixed answers for the stub host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostProfile {
    pub package_name: String,
    pub manufacturer: String,
    pub model: String,
    pub build_id: String,
    pub os_release: String,
    pub locale: String,
    pub cache_dir: Option<String>,
    pub native_library_dir: String,
    pub display: DisplaySize,
    pub rotation: Rotation,
    pub axis: AxisOrientation,
    /// Name of a query that should fail, e.g. `"locale"`.
    pub fail_query: Option<String>,
}

impl Default for HostProfile {
    fn default() -> Self {
        Self {
            package_name: "dev.hostlink.desktop".into(),
            manufacturer: "Hostlink".into(),
            model: "Desktop Stub".into(),
            build_id: "STUB.0".into(),
            os_release: std::env::consts::OS.into(),
            locale: "en_US".into(),
            cache_dir: None,
            native_library_dir: "/opt/hostlink/lib".into(),
            display: DisplaySize {
                width: 1920,
                height: 1080,
            },
            rotation: Rotation::Deg0,
            axis: AxisOrientation::Landscape,
            fail_query: None,
        }
    }
}

impl HostProfile {
    /// Load a profile from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

/// Host backed by a [`HostProfile`].
pub struct StubHost {
    profile: HostProfile,
    queries: Vec<&'static str>,
    immersive_requests: u32,
}

impl StubHost {
    pub fn new(profile: HostProfile) -> Self {
        Self {
            profile,
            queries: Vec::new(),
            immersive_requests: 0,
        }
    }

    /// Simulate the device turning to a new rotation.
    pub fn set_rotation(&mut self, rotation: Rotation) {
        self.profile.rotation = rotation;
    }

    /// Simulate a configuration switch to another axis.
    pub fn set_axis(&mut self, axis: AxisOrientation) {
        self.profile.axis = axis;
    }

    /// Make `query` fail from now on, as if the host lost the resource.
    pub fn fail_from_now_on(&mut self, query: &str) {
        self.profile.fail_query = Some(query.to_string());
    }

    /// Every query answered so far, in order.
    pub fn queries(&self) -> &[&'static str] {
        &self.queries
    }

    /// How many times a given query was answered.
    pub fn query_count(&self, query: &str) -> usize {
        self.queries.iter().filter(|q| **q == query).count()
    }

    pub fn immersive_requests(&self) -> u32 {
        self.immersive_requests
    }

    fn answer(&mut self, query: &'static str) -> Result<()> {
        if self.profile.fail_query.as_deref() == Some(query) {
            tracing::warn!(query, "stub host: injected failure");
            return Err(BridgeError::host(query, "injected failure"));
        }
        self.queries.push(query);
        Ok(())
    }
}

impl Default for StubHost {
    fn default() -> Self {
        Self::new(HostProfile::default())
    }
}

impl HostEnvironment for StubHost {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl HostIdentity for StubHost {
    fn package_name(&mut self) -> Result<String> {
        self.answer("package_name")?;
        Ok(self.profile.package_name.clone())
    }

    fn device_identity(&mut self) -> Result<DeviceIdentity> {
        self.answer("device_identity")?;
        Ok(DeviceIdentity {
            manufacturer: self.profile.manufacturer.clone(),
            model: self.profile.model.clone(),
            build_id: self.profile.build_id.clone(),
        })
    }

    fn os_release(&mut self) -> Result<String> {
        self.answer("os_release")?;
        Ok(self.profile.os_release.clone())
    }

    fn locale(&mut self) -> Result<String> {
        self.answer("locale")?;
        Ok(self.profile.locale.clone())
    }
}

impl HostStorage for StubHost {
    fn cache_dir(&mut self) -> Result<Option<String>> {
        self.answer("cache_dir")?;
        Ok(self.profile.cache_dir.clone())
    }

    fn native_library_dir(&mut self) -> Result<String> {
        self.answer("native_library_dir")?;
        Ok(self.profile.native_library_dir.clone())
    }
}

impl HostDisplay for StubHost {
    fn real_display_size(&mut self) -> Result<DisplaySize> {
        self.answer("real_display_size")?;
        Ok(self.profile.display)
    }

    fn display_rotation(&mut self) -> Result<Rotation> {
        self.answer("display_rotation")?;
        Ok(self.profile.rotation)
    }

    fn axis_orientation(&mut self) -> Result<AxisOrientation> {
        self.answer("axis_orientation")?;
        Ok(self.profile.axis)
    }
}

impl HostPresentation for StubHost {
    fn request_immersive(&mut self) -> Result<()> {
        self.answer("request_immersive")?;
        self.immersive_requests += 1;
        tracing::debug!("stub host: immersive mode requested");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_name() {
        let host = StubHost::default();
        assert_eq!(host.platform_name(), "Desktop (stub)");
    }

    #[test]
    fn injected_failure_only_hits_named_query() {
        let mut host = StubHost::new(HostProfile {
            fail_query: Some("locale".into()),
            ..Default::default()
        });
        assert!(host.package_name().is_ok());
        let err = host.locale().unwrap_err();
        assert!(matches!(err, BridgeError::HostQuery { query: "locale", .. }));
        assert_eq!(host.queries(), &["package_name"]);
    }

    #[test]
    fn profile_json_fills_defaults() {
        let profile: HostProfile = serde_json::from_str(
            r#"{ "model": "Pixel 8", "rotation": "Deg90", "axis": "portrait" }"#,
        )
        .unwrap();
        assert_eq!(profile.model, "Pixel 8");
        assert_eq!(profile.rotation, Rotation::Deg90);
        assert_eq!(profile.axis, AxisOrientation::Portrait);
        assert_eq!(profile.package_name, "dev.hostlink.desktop");
    }
}
