// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! Hostlink: lifecycle bridge between the application host and the native
//! engine.
//!
//! The host drives [`traits::LifecycleEvents`]; the [`lifecycle::LifecycleAdapter`]
//! collects a one-time platform snapshot, resolves display orientation and
//! forwards both across the two-call [`traits::NativeEngine`] boundary.
//!
//! On Android the host is the hosting Activity, reached through JNI. Desktop
//! and CI builds use [`stub::StubHost`] instead.

pub mod collector;
pub mod engine;
pub mod lifecycle;
pub mod logging;
pub mod stub;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

pub use collector::collect;
pub use engine::{EngineVTable, FfiEngine, RawPlatformInfo, register_engine, registered_engine};
pub use lifecycle::LifecycleAdapter;
pub use traits::{HostEnvironment, LifecycleEvents, NativeEngine};
