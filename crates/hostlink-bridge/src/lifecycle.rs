// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lifecycle adapter.
//
// Orders the one-time startup sequence and forwards every configuration
// change to the engine. Startup makes two separate engine calls:
// `initialize_platform_info` returns before the first `update_orientation`
// is issued. Any failure poisons the adapter; the host glue is expected to
// terminate the process.

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::{BridgeError, Result};
use hostlink_core::orientation::resolve;
use hostlink_core::types::{AxisOrientation, LifecycleState, Orientation};
use tracing::{debug, error, info};

use crate::collector::collect;
use crate::traits::{HostEnvironment, LifecycleEvents, NativeEngine};

/// Drives a [`NativeEngine`] from host lifecycle events.
pub struct LifecycleAdapter<E: NativeEngine> {
    engine: E,
    config: BridgeConfig,
    state: LifecycleState,
    last_orientation: Option<Orientation>,
    updates_forwarded: u64,
}

impl<E: NativeEngine> LifecycleAdapter<E> {
    pub fn new(engine: E, config: BridgeConfig) -> Self {
        Self {
            engine,
            config,
            state: LifecycleState::Uninitialized,
            last_orientation: None,
            updates_forwarded: 0,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Most recent orientation handed to the engine.
    pub fn last_orientation(&self) -> Option<Orientation> {
        self.last_orientation
    }

    /// Number of `update_orientation` calls that reached the engine.
    pub fn updates_forwarded(&self) -> u64 {
        self.updates_forwarded
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!(from = %self.state, to = %next, "lifecycle transition");
        self.state = next;
    }

    /// Run `step`; on failure mark the adapter poisoned and pass the error on.
    fn guarded<T>(&mut self, step: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        step(self).inspect_err(|e| {
            error!(error = %e, kind = ?e.kind(), "fatal bridge failure");
            self.state = LifecycleState::Poisoned;
        })
    }

    fn current_orientation(
        host: &mut dyn HostEnvironment,
        axis: AxisOrientation,
    ) -> Result<Orientation> {
        let rotation = host.display_rotation()?;
        let orientation = resolve(axis, rotation);
        debug!(?axis, degrees = rotation.degrees(), %orientation, "orientation resolved");
        Ok(orientation)
    }

    fn forward_orientation(&mut self, orientation: Orientation) -> Result<()> {
        let changed = self.last_orientation != Some(orientation);
        self.engine.update_orientation(orientation)?;
        self.last_orientation = Some(orientation);
        self.updates_forwarded += 1;
        info!(%orientation, code = orientation.code(), changed, "orientation forwarded");
        Ok(())
    }

    fn start(&mut self, host: &mut dyn HostEnvironment) -> Result<()> {
        let info = collect(host, &self.config)?;
        let axis = host.axis_orientation()?;
        let orientation = Self::current_orientation(host, axis)?;

        info!(
            host = host.platform_name(),
            app_id = %info.app_id,
            width = info.screen_width,
            height = info.screen_height,
            "initializing engine"
        );
        self.engine.initialize_platform_info(info)?;
        self.transition(LifecycleState::Initialized);

        self.forward_orientation(orientation)?;
        self.transition(LifecycleState::Active);

        if self.config.immersive {
            host.request_immersive()?;
        }
        Ok(())
    }
}

impl<E: NativeEngine> LifecycleEvents for LifecycleAdapter<E> {
    fn on_start(&mut self, host: &mut dyn HostEnvironment) -> Result<()> {
        match self.state {
            LifecycleState::Uninitialized => {}
            LifecycleState::Poisoned => return Err(BridgeError::Poisoned),
            LifecycleState::Initialized | LifecycleState::Active => {
                error!("onStart delivered twice");
                self.state = LifecycleState::Poisoned;
                return Err(BridgeError::AlreadyStarted);
            }
        }
        self.guarded(|adapter| adapter.start(host))
    }

    fn on_configuration_changed(
        &mut self,
        host: &mut dyn HostEnvironment,
        axis: AxisOrientation,
    ) -> Result<()> {
        match self.state {
            LifecycleState::Active => {}
            LifecycleState::Poisoned => return Err(BridgeError::Poisoned),
            LifecycleState::Uninitialized | LifecycleState::Initialized => {
                error!("configuration change before onStart completed");
                self.state = LifecycleState::Poisoned;
                return Err(BridgeError::NotStarted);
            }
        }
        self.guarded(|adapter| {
            let orientation = Self::current_orientation(host, axis)?;
            adapter.forward_orientation(orientation)
        })
    }
}
