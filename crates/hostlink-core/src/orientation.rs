// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation resolution.
//
// The host reports two independent signals: a coarse axis from the current
// configuration and the display rotation relative to the device's natural
// orientation. The engine only understands the combined logical value.

use serde::{Deserialize, Serialize};

/// Logical display orientation as understood by the native engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Landscape,
    LandscapeFlipped,
    Portrait,
    PortraitFlipped,
    /// The host reported an axis outside landscape/portrait.
    Undefined,
}

impl Orientation {
    /// Integer code carried across the engine boundary.
    pub fn code(self) -> i32 {
        match self {
            Self::Landscape => 0,
            Self::LandscapeFlipped => 1,
            Self::Portrait => 2,
            Self::PortraitFlipped => 3,
            Self::Undefined => -1,
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Landscape => "landscape",
            Self::LandscapeFlipped => "landscape-flipped",
            Self::Portrait => "portrait",
            Self::PortraitFlipped => "portrait-flipped",
            Self::Undefined => "undefined",
        };
        f.write_str(name)
    }
}

/// Coarse orientation category from the host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisOrientation {
    Landscape,
    Portrait,
    Other,
}

impl AxisOrientation {
    /// Map an Android `Configuration.orientation` value.
    ///
    /// `1` is portrait, `2` is landscape; undefined (`0`) and the deprecated
    /// square value (`3`) both fall into `Other`.
    pub fn from_configuration_code(code: i32) -> Self {
        match code {
            1 => Self::Portrait,
            2 => Self::Landscape,
            _ => Self::Other,
        }
    }
}

impl std::str::FromStr for AxisOrientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "landscape" => Ok(Self::Landscape),
            "portrait" => Ok(Self::Portrait),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown axis `{other}`")),
        }
    }
}

/// Display rotation relative to the natural device orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Map an Android `Surface.ROTATION_*` value (`0..=3`).
    pub fn from_surface_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Deg0),
            1 => Some(Self::Deg90),
            2 => Some(Self::Deg180),
            3 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Map a rotation expressed in degrees.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// True for the quarter-turn rotations (90° and 270°).
    fn is_quarter_turn(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// Combine the configuration axis and display rotation into a logical
/// orientation.
///
/// Pure and total. Callers must query both inputs fresh on every call: some
/// hosts change rotation without a full configuration-change notification.
pub fn resolve(axis: AxisOrientation, rotation: Rotation) -> Orientation {
    match (axis, rotation.is_quarter_turn()) {
        (AxisOrientation::Landscape, false) => Orientation::Landscape,
        (AxisOrientation::Landscape, true) => Orientation::LandscapeFlipped,
        (AxisOrientation::Portrait, false) => Orientation::Portrait,
        (AxisOrientation::Portrait, true) => Orientation::PortraitFlipped,
        (AxisOrientation::Other, _) => Orientation::Undefined,
    }
}
