// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// C ABI side of the native engine boundary.
//
// The engine library registers a table of two function pointers when it is
// loaded. Registration happens at most once per process; the bridge looks the
// table up when onStart arrives and marshals every call through it.

use std::ffi::{CString, c_char};
use std::sync::OnceLock;

use hostlink_core::error::{BridgeError, Result};
use hostlink_core::types::{Orientation, PlatformInfo};
use tracing::{debug, info};

use crate::traits::NativeEngine;

/// Status returned by engine functions on success.
pub const ENGINE_OK: i32 = 0;

/// `hostlink_register_engine` result codes.
pub const REGISTER_OK: i32 = 0;
pub const REGISTER_NULL_TABLE: i32 = -1;
pub const REGISTER_DUPLICATE: i32 = -2;

/// Platform snapshot as laid out across the C boundary.
///
/// Every string is NUL-terminated UTF-8 and is only valid for the duration
/// of the call; the engine must copy what it keeps.
#[repr(C)]
#[derive(Debug)]
pub struct RawPlatformInfo {
    pub app_id: *const c_char,
    pub manufacturer: *const c_char,
    pub model: *const c_char,
    pub build_id: *const c_char,
    pub os_version: *const c_char,
    pub locale: *const c_char,
    pub cache_dir: *const c_char,
    pub executable_path: *const c_char,
    pub native_lib_dir: *const c_char,
    pub screen_width: i32,
    pub screen_height: i32,
}

/// Entry points exported by the engine library.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct EngineVTable {
    pub initialize_platform_info: unsafe extern "C" fn(info: *const RawPlatformInfo) -> i32,
    /// Receives an orientation code: 0..=3, or -1 for undefined.
    pub update_orientation: unsafe extern "C" fn(orientation: i32) -> i32,
}

static ENGINE: OnceLock<EngineVTable> = OnceLock::new();

/// Record the engine's entry points. Succeeds once per process.
pub fn register_engine(vtable: EngineVTable) -> Result<()> {
    ENGINE
        .set(vtable)
        .map_err(|_| BridgeError::EngineAlreadyRegistered)?;
    info!("native engine registered");
    Ok(())
}

/// The registered engine, ready to receive calls.
pub fn registered_engine() -> Result<FfiEngine> {
    ENGINE
        .get()
        .copied()
        .map(FfiEngine::new)
        .ok_or(BridgeError::EngineNotRegistered)
}

/// Called by the engine library from its load hook.
///
/// # Safety
///
/// `vtable` must be null or point to a valid `EngineVTable` whose function
/// pointers stay callable for the rest of the process.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn hostlink_register_engine(vtable: *const EngineVTable) -> i32 {
    if vtable.is_null() {
        tracing::error!("engine registration with null table");
        return REGISTER_NULL_TABLE;
    }
    // SAFETY: non-null and valid per the caller contract.
    let vtable = unsafe { *vtable };
    match register_engine(vtable) {
        Ok(()) => REGISTER_OK,
        Err(e) => {
            tracing::error!(error = %e, "engine registration rejected");
            REGISTER_DUPLICATE
        }
    }
}

/// [`NativeEngine`] over the C ABI.
pub struct FfiEngine {
    vtable: EngineVTable,
}

impl FfiEngine {
    pub fn new(vtable: EngineVTable) -> Self {
        Self { vtable }
    }
}

fn c_field(field: &'static str, value: String) -> Result<CString> {
    CString::new(value).map_err(|_| {
        BridgeError::boundary(
            "initialize_platform_info",
            format!("{field} contains an interior NUL byte"),
        )
    })
}

fn c_dimension(field: &'static str, value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| {
        BridgeError::boundary(
            "initialize_platform_info",
            format!("{field} {value} does not fit in a C int"),
        )
    })
}

fn check_status(call: &'static str, status: i32) -> Result<()> {
    if status == ENGINE_OK {
        Ok(())
    } else {
        Err(BridgeError::boundary(call, format!("engine returned status {status}")))
    }
}

impl NativeEngine for FfiEngine {
    fn initialize_platform_info(&mut self, info: PlatformInfo) -> Result<()> {
        let screen_width = c_dimension("screen_width", info.screen_width)?;
        let screen_height = c_dimension("screen_height", info.screen_height)?;

        let app_id = c_field("app_id", info.app_id)?;
        let manufacturer = c_field("manufacturer", info.manufacturer)?;
        let model = c_field("model", info.model)?;
        let build_id = c_field("build_id", info.build_id)?;
        let os_version = c_field("os_version", info.os_version)?;
        let locale = c_field("locale", info.locale)?;
        let cache_dir = c_field("cache_dir", info.cache_dir)?;
        let executable_path = c_field("executable_path", info.executable_path)?;
        let native_lib_dir = c_field("native_lib_dir", info.native_lib_dir)?;

        let raw = RawPlatformInfo {
            app_id: app_id.as_ptr(),
            manufacturer: manufacturer.as_ptr(),
            model: model.as_ptr(),
            build_id: build_id.as_ptr(),
            os_version: os_version.as_ptr(),
            locale: locale.as_ptr(),
            cache_dir: cache_dir.as_ptr(),
            executable_path: executable_path.as_ptr(),
            native_lib_dir: native_lib_dir.as_ptr(),
            screen_width,
            screen_height,
        };

        debug!("calling engine initialize_platform_info");
        // SAFETY: every pointer in `raw` borrows a CString that outlives the call.
        let status = unsafe { (self.vtable.initialize_platform_info)(&raw) };
        check_status("initialize_platform_info", status)
    }

    fn update_orientation(&mut self, orientation: Orientation) -> Result<()> {
        debug!(code = orientation.code(), "calling engine update_orientation");
        // SAFETY: the registered table guarantees a callable function pointer.
        let status = unsafe { (self.vtable.update_orientation)(orientation.code()) };
        check_status("update_orientation", status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::CStr;

    thread_local! {
        static SEEN_INFO: RefCell<Vec<(String, String, i32, i32)>> = const { RefCell::new(Vec::new()) };
        static SEEN_ORIENTATION: RefCell<Vec<i32>> = const { RefCell::new(Vec::new()) };
    }

    unsafe extern "C" fn accept_info(info: *const RawPlatformInfo) -> i32 {
        // SAFETY: FfiEngine passes a valid pointer for the duration of the call.
        let info = unsafe { &*info };
        let app_id = unsafe { CStr::from_ptr(info.app_id) }.to_string_lossy().into_owned();
        let cache = unsafe { CStr::from_ptr(info.cache_dir) }.to_string_lossy().into_owned();
        SEEN_INFO.with(|s| {
            s.borrow_mut()
                .push((app_id, cache, info.screen_width, info.screen_height))
        });
        ENGINE_OK
    }

    unsafe extern "C" fn accept_orientation(code: i32) -> i32 {
        SEEN_ORIENTATION.with(|s| s.borrow_mut().push(code));
        ENGINE_OK
    }

    unsafe extern "C" fn reject_info(_info: *const RawPlatformInfo) -> i32 {
        -7
    }

    unsafe extern "C" fn reject_orientation(_code: i32) -> i32 {
        1
    }

    fn sample_info() -> PlatformInfo {
        PlatformInfo {
            app_id: "dev.hostlink.game".into(),
            manufacturer: "Google".into(),
            model: "Pixel 8".into(),
            build_id: "AP1A.240305.019".into(),
            os_version: "14".into(),
            locale: "en_US".into(),
            cache_dir: "none".into(),
            executable_path: "/data/app/lib/arm64/libengine.so".into(),
            native_lib_dir: "/data/app/lib/arm64".into(),
            screen_width: 1920,
            screen_height: 1080,
        }
    }

    fn accepting() -> FfiEngine {
        FfiEngine::new(EngineVTable {
            initialize_platform_info: accept_info,
            update_orientation: accept_orientation,
        })
    }

    #[test]
    fn platform_info_marshalled() {
        let mut engine = accepting();
        engine.initialize_platform_info(sample_info()).unwrap();
        SEEN_INFO.with(|s| {
            assert_eq!(
                s.borrow().as_slice(),
                &[("dev.hostlink.game".to_string(), "none".to_string(), 1920, 1080)]
            );
        });
    }

    #[test]
    fn orientation_codes_forwarded() {
        let mut engine = accepting();
        engine.update_orientation(Orientation::PortraitFlipped).unwrap();
        engine.update_orientation(Orientation::Undefined).unwrap();
        SEEN_ORIENTATION.with(|s| assert_eq!(s.borrow().as_slice(), &[3, -1]));
    }

    #[test]
    fn non_zero_status_is_boundary_failure() {
        let mut engine = FfiEngine::new(EngineVTable {
            initialize_platform_info: reject_info,
            update_orientation: reject_orientation,
        });
        let err = engine.initialize_platform_info(sample_info()).unwrap_err();
        assert!(err.to_string().contains("status -7"));
        let err = engine.update_orientation(Orientation::Landscape).unwrap_err();
        assert!(matches!(
            err,
            BridgeError::Boundary {
                call: "update_orientation",
                ..
            }
        ));
    }

    #[test]
    fn interior_nul_rejected_before_call() {
        let mut engine = accepting();
        let mut info = sample_info();
        info.locale = "en\0US".into();
        let err = engine.initialize_platform_info(info).unwrap_err();
        assert!(err.to_string().contains("locale"));
        SEEN_INFO.with(|s| assert!(s.borrow().is_empty()));
    }

    #[test]
    fn oversized_dimension_rejected() {
        let mut engine = accepting();
        let mut info = sample_info();
        info.screen_width = u32::MAX;
        assert!(engine.initialize_platform_info(info).is_err());
    }

    // The registration slot is process-wide, so the whole sequence lives in
    // one test.
    #[test]
    fn registration_happens_once() {
        let table = EngineVTable {
            initialize_platform_info: accept_info,
            update_orientation: accept_orientation,
        };
        assert_eq!(
            unsafe { hostlink_register_engine(std::ptr::null()) },
            REGISTER_NULL_TABLE
        );
        assert!(matches!(
            registered_engine(),
            Err(BridgeError::EngineNotRegistered)
        ));
        assert_eq!(unsafe { hostlink_register_engine(&table) }, REGISTER_OK);
        assert!(matches!(
            register_engine(table),
            Err(BridgeError::EngineAlreadyRegistered)
        ));
        assert_eq!(unsafe { hostlink_register_engine(&table) }, REGISTER_DUPLICATE);

        let mut engine = registered_engine().unwrap();
        engine.update_orientation(Orientation::Landscape).unwrap();
        SEEN_ORIENTATION.with(|s| assert_eq!(s.borrow().as_slice(), &[0]));
    }
}
