// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stand-in engine for the simulator: logs and records every boundary call.

use hostlink_bridge::NativeEngine;
use hostlink_core::error::Result;
use hostlink_core::types::{Orientation, PlatformInfo};

#[derive(Debug, Default)]
pub struct LoggingEngine {
    platform_info: Option<PlatformInfo>,
    orientations: Vec<Orientation>,
}

impl LoggingEngine {
    pub fn platform_info(&self) -> Option<&PlatformInfo> {
        self.platform_info.as_ref()
    }

    pub fn orientations(&self) -> &[Orientation] {
        &self.orientations
    }
}

impl NativeEngine for LoggingEngine {
    fn initialize_platform_info(&mut self, info: PlatformInfo) -> Result<()> {
        tracing::info!(
            app_id = %info.app_id,
            device = %format!("{} {}", info.manufacturer, info.model),
            os = %info.os_version,
            locale = %info.locale,
            cache_dir = %info.cache_dir,
            executable = %info.executable_path,
            width = info.screen_width,
            height = info.screen_height,
            "engine: platform info"
        );
        self.platform_info = Some(info);
        Ok(())
    }

    fn update_orientation(&mut self, orientation: Orientation) -> Result<()> {
        tracing::info!(%orientation, code = orientation.code(), "engine: orientation");
        self.orientations.push(orientation);
        Ok(())
    }
}
