// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Hostlink bridge.

use serde::{Deserialize, Serialize};

pub use crate::orientation::{AxisOrientation, Orientation, Rotation};

/// One-time snapshot of device and environment metadata handed to the
/// native engine at startup.
///
/// Built once per process by the snapshot collector and moved across the
/// engine boundary. The bridge keeps no copy afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformInfo {
    /// Application (package) identifier.
    pub app_id: String,
    pub manufacturer: String,
    pub model: String,
    pub build_id: String,
    /// OS release version string (e.g. "14").
    pub os_version: String,
    /// Locale tag as reported by the host (e.g. "en_US").
    pub locale: String,
    /// Cache directory, or the configured sentinel when the host has none.
    pub cache_dir: String,
    /// Native library directory joined with the engine library file name.
    pub executable_path: String,
    pub native_lib_dir: String,
    /// Real display width in pixels, including system decoration areas.
    pub screen_width: u32,
    /// Real display height in pixels, including system decoration areas.
    pub screen_height: u32,
}

/// Device identity strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub manufacturer: String,
    pub model: String,
    pub build_id: String,
}

/// Physical display size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    /// Build from signed host values, rejecting negatives.
    pub fn from_signed(width: i32, height: i32) -> Option<Self> {
        Some(Self {
            width: u32::try_from(width).ok()?,
            height: u32::try_from(height).ok()?,
        })
    }
}

impl std::fmt::Display for DisplaySize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Lifecycle of the bridge within a single process.
///
/// There is no way back to `Uninitialized`; process exit is the only
/// terminal transition and needs no explicit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// No onStart has been processed yet.
    Uninitialized,
    /// The engine accepted the platform snapshot.
    Initialized,
    /// The engine has an orientation and receives updates.
    Active,
    /// A fatal failure occurred; no further events are forwarded.
    Poisoned,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Initialized => "initialized",
            Self::Active => "active",
            Self::Poisoned => "poisoned",
        };
        f.write_str(name)
    }
}
