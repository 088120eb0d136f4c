// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Trait seams of the bridge.
//
// The host side is a set of capabilities grouped under `HostEnvironment`.
// The engine side is exactly two calls. The lifecycle side is what the host
// drives. Query methods take `&mut self` because the Android implementation
// threads a JNI environment through every call.

use hostlink_core::error::Result;
use hostlink_core::types::{
    AxisOrientation, DeviceIdentity, DisplaySize, Orientation, PlatformInfo, Rotation,
};

/// Everything the bridge needs from the application host.
pub trait HostEnvironment: HostIdentity + HostStorage + HostDisplay + HostPresentation {
    /// Human-readable host name (e.g. "Android").
    fn platform_name(&self) -> &str;
}

/// Application and device identity.
pub trait HostIdentity {
    /// Application identifier (Android package name).
    fn package_name(&mut self) -> Result<String>;

    /// Manufacturer, model and build identifier.
    fn device_identity(&mut self) -> Result<DeviceIdentity>;

    /// OS release version string.
    fn os_release(&mut self) -> Result<String>;

    /// Current default locale tag.
    fn locale(&mut self) -> Result<String>;
}

/// Filesystem locations owned by the application.
pub trait HostStorage {
    /// Cache/scratch directory. `None` when the host exposes none.
    fn cache_dir(&mut self) -> Result<Option<String>>;

    /// Directory the application's native libraries were extracted to.
    fn native_library_dir(&mut self) -> Result<String>;
}

/// Display metrics and orientation signals.
pub trait HostDisplay {
    /// Real display size in pixels, not reduced by system insets.
    fn real_display_size(&mut self) -> Result<DisplaySize>;

    /// Current rotation relative to the natural orientation.
    fn display_rotation(&mut self) -> Result<Rotation>;

    /// Axis of the current configuration.
    fn axis_orientation(&mut self) -> Result<AxisOrientation>;
}

/// Presentation requests.
pub trait HostPresentation {
    /// Ask the host for fullscreen/immersive display.
    fn request_immersive(&mut self) -> Result<()>;
}

/// The native engine's platform data channel.
///
/// Exactly two calls. The engine performs no OS queries of its own and
/// treats whatever arrives here as ground truth.
pub trait NativeEngine {
    /// Hand over the one-time platform snapshot. Called once, first.
    fn initialize_platform_info(&mut self, info: PlatformInfo) -> Result<()>;

    /// Report the current logical orientation.
    fn update_orientation(&mut self, orientation: Orientation) -> Result<()>;
}

/// Lifecycle notifications delivered by the host, serially, on one thread.
pub trait LifecycleEvents {
    /// First event of the process. Must be delivered exactly once.
    fn on_start(&mut self, host: &mut dyn HostEnvironment) -> Result<()>;

    /// Configuration changed; `axis` comes from the new configuration.
    fn on_configuration_changed(
        &mut self,
        host: &mut dyn HostEnvironment,
        axis: AxisOrientation,
    ) -> Result<()>;
}
