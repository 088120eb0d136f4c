// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android host via JNI.
//
// The hosting Activity declares two native methods and forwards its own
// lifecycle callbacks to them on the UI thread:
//
//     private native void nativeOnStart(String configJson);
//     private native void nativeOnConfigurationChanged(int orientation);
//
// `configJson` may be null (defaults apply). `orientation` is the new
// `Configuration.orientation`. Both libraries (engine and bridge) must be
// loaded with `System.loadLibrary` before the first call, and the engine must
// have registered itself through `hostlink_register_engine`.
//
// Every failure is fatal: the error is logged and the VM is aborted through
// `JNIEnv::fatal_error`.

#![cfg(target_os = "android")]

use std::sync::{Mutex, OnceLock};

use jni::JNIEnv;
use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::sys::jint;

use hostlink_core::config::BridgeConfig;
use hostlink_core::error::{BridgeError, Result};
use hostlink_core::types::{AxisOrientation, DeviceIdentity, DisplaySize, Rotation};

use crate::engine::{FfiEngine, registered_engine};
use crate::lifecycle::LifecycleAdapter;
use crate::logging;
use crate::traits::*;

/// `View.SYSTEM_UI_FLAG_*` bits for sticky immersive fullscreen.
const SYSTEM_UI_FLAG_HIDE_NAVIGATION: jint = 0x0000_0002;
const SYSTEM_UI_FLAG_FULLSCREEN: jint = 0x0000_0004;
const SYSTEM_UI_FLAG_LAYOUT_STABLE: jint = 0x0000_0100;
const SYSTEM_UI_FLAG_LAYOUT_HIDE_NAVIGATION: jint = 0x0000_0200;
const SYSTEM_UI_FLAG_LAYOUT_FULLSCREEN: jint = 0x0000_0400;
const SYSTEM_UI_FLAG_IMMERSIVE_STICKY: jint = 0x0000_1000;

const IMMERSIVE_FLAGS: jint = SYSTEM_UI_FLAG_LAYOUT_STABLE
    | SYSTEM_UI_FLAG_LAYOUT_HIDE_NAVIGATION
    | SYSTEM_UI_FLAG_LAYOUT_FULLSCREEN
    | SYSTEM_UI_FLAG_HIDE_NAVIGATION
    | SYSTEM_UI_FLAG_FULLSCREEN
    | SYSTEM_UI_FLAG_IMMERSIVE_STICKY;

/// The process-wide adapter. Created by the first `nativeOnStart`.
static ADAPTER: Mutex<Option<LifecycleAdapter<FfiEngine>>> = Mutex::new(None);

/// Activity reference published through `ndk-context`.
static CONTEXT: OnceLock<GlobalRef> = OnceLock::new();

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Android host backed by the Activity that delivered the current callback.
///
/// Lives for one callback only; JNI local references are released when the
/// native method returns.
pub struct AndroidHost<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    activity: &'a JObject<'local>,
}

impl<'a, 'local> AndroidHost<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>, activity: &'a JObject<'local>) -> Self {
        Self { env, activity }
    }

    /// Convert a JNI error, clearing any pending Java exception so later
    /// calls on this thread remain legal.
    fn fail(&mut self, query: &'static str, e: jni::errors::Error) -> BridgeError {
        if self.env.exception_check().unwrap_or(false) {
            let _ = self.env.exception_describe();
            let _ = self.env.exception_clear();
        }
        BridgeError::host(query, e.to_string())
    }

    fn call_object(
        &mut self,
        query: &'static str,
        target: &JObject<'local>,
        name: &str,
        sig: &str,
    ) -> Result<JObject<'local>> {
        let result = self
            .env
            .call_method(target, name, sig, &[])
            .and_then(|v| v.l());
        result.map_err(|e| self.fail(query, e))
    }

    fn call_int(
        &mut self,
        query: &'static str,
        target: &JObject<'local>,
        name: &str,
        sig: &str,
    ) -> Result<i32> {
        let result = self
            .env
            .call_method(target, name, sig, &[])
            .and_then(|v| v.i());
        result.map_err(|e| self.fail(query, e))
    }

    fn int_field(&mut self, query: &'static str, target: &JObject<'local>, name: &str) -> Result<i32> {
        let result = self.env.get_field(target, name, "I").and_then(|v| v.i());
        result.map_err(|e| self.fail(query, e))
    }

    fn string_field(
        &mut self,
        query: &'static str,
        target: &JObject<'local>,
        name: &str,
    ) -> Result<String> {
        let result = self
            .env
            .get_field(target, name, "Ljava/lang/String;")
            .and_then(|v| v.l());
        let obj = result.map_err(|e| self.fail(query, e))?;
        self.to_rust_string(query, obj)
    }

    fn static_string_field(
        &mut self,
        query: &'static str,
        class: &str,
        name: &str,
    ) -> Result<String> {
        let result = self
            .env
            .get_static_field(class, name, "Ljava/lang/String;")
            .and_then(|v| v.l());
        let obj = result.map_err(|e| self.fail(query, e))?;
        self.to_rust_string(query, obj)
    }

    fn to_rust_string(&mut self, query: &'static str, obj: JObject<'local>) -> Result<String> {
        if obj.is_null() {
            return Err(BridgeError::host(query, "host returned null"));
        }
        let jstr = JString::from(obj);
        let result = self.env.get_string(&jstr).map(String::from);
        result.map_err(|e| self.fail(query, e))
    }

    fn default_display(&mut self, query: &'static str) -> Result<JObject<'local>> {
        let activity = self.activity;
        let window_manager = self.call_object(
            query,
            activity,
            "getWindowManager",
            "()Landroid/view/WindowManager;",
        )?;
        self.call_object(
            query,
            &window_manager,
            "getDefaultDisplay",
            "()Landroid/view/Display;",
        )
    }
}

impl HostEnvironment for AndroidHost<'_, '_> {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

impl HostIdentity for AndroidHost<'_, '_> {
    fn package_name(&mut self) -> Result<String> {
        let activity = self.activity;
        let name = self.call_object(
            "package_name",
            activity,
            "getPackageName",
            "()Ljava/lang/String;",
        )?;
        self.to_rust_string("package_name", name)
    }

    fn device_identity(&mut self) -> Result<DeviceIdentity> {
        Ok(DeviceIdentity {
            manufacturer: self.static_string_field(
                "device_identity",
                "android/os/Build",
                "MANUFACTURER",
            )?,
            model: self.static_string_field("device_identity", "android/os/Build", "MODEL")?,
            build_id: self.static_string_field("device_identity", "android/os/Build", "ID")?,
        })
    }

    fn os_release(&mut self) -> Result<String> {
        self.static_string_field("os_release", "android/os/Build$VERSION", "RELEASE")
    }

    fn locale(&mut self) -> Result<String> {
        let result = self
            .env
            .call_static_method("java/util/Locale", "getDefault", "()Ljava/util/Locale;", &[])
            .and_then(|v| v.l());
        let locale = result.map_err(|e| self.fail("locale", e))?;
        let tag = self.call_object("locale", &locale, "toString", "()Ljava/lang/String;")?;
        self.to_rust_string("locale", tag)
    }
}

impl HostStorage for AndroidHost<'_, '_> {
    fn cache_dir(&mut self) -> Result<Option<String>> {
        let activity = self.activity;
        let dir = self.call_object("cache_dir", activity, "getCacheDir", "()Ljava/io/File;")?;
        if dir.is_null() {
            return Ok(None);
        }
        let path = self.call_object(
            "cache_dir",
            &dir,
            "getAbsolutePath",
            "()Ljava/lang/String;",
        )?;
        self.to_rust_string("cache_dir", path).map(Some)
    }

    fn native_library_dir(&mut self) -> Result<String> {
        let activity = self.activity;
        let app_info = self.call_object(
            "native_library_dir",
            activity,
            "getApplicationInfo",
            "()Landroid/content/pm/ApplicationInfo;",
        )?;
        self.string_field("native_library_dir", &app_info, "nativeLibraryDir")
    }
}

impl HostDisplay for AndroidHost<'_, '_> {
    fn real_display_size(&mut self) -> Result<DisplaySize> {
        const QUERY: &str = "real_display_size";
        let display = self.default_display(QUERY)?;
        let result = self.env.new_object("android/util/DisplayMetrics", "()V", &[]);
        let metrics = result.map_err(|e| self.fail(QUERY, e))?;
        let result = self.env.call_method(
            &display,
            "getRealMetrics",
            "(Landroid/util/DisplayMetrics;)V",
            &[JValue::Object(&metrics)],
        );
        result.map_err(|e| self.fail(QUERY, e))?;

        let width = self.int_field(QUERY, &metrics, "widthPixels")?;
        let height = self.int_field(QUERY, &metrics, "heightPixels")?;
        DisplaySize::from_signed(width, height).ok_or(BridgeError::InvalidHostValue {
            query: QUERY,
            value: i64::from(width.min(height)),
        })
    }

    fn display_rotation(&mut self) -> Result<Rotation> {
        const QUERY: &str = "display_rotation";
        let display = self.default_display(QUERY)?;
        let code = self.call_int(QUERY, &display, "getRotation", "()I")?;
        Rotation::from_surface_code(code).ok_or(BridgeError::InvalidHostValue {
            query: QUERY,
            value: i64::from(code),
        })
    }

    fn axis_orientation(&mut self) -> Result<AxisOrientation> {
        const QUERY: &str = "axis_orientation";
        let activity = self.activity;
        let resources = self.call_object(
            QUERY,
            activity,
            "getResources",
            "()Landroid/content/res/Resources;",
        )?;
        let configuration = self.call_object(
            QUERY,
            &resources,
            "getConfiguration",
            "()Landroid/content/res/Configuration;",
        )?;
        let code = self.int_field(QUERY, &configuration, "orientation")?;
        Ok(AxisOrientation::from_configuration_code(code))
    }
}

impl HostPresentation for AndroidHost<'_, '_> {
    fn request_immersive(&mut self) -> Result<()> {
        const QUERY: &str = "request_immersive";
        let activity = self.activity;
        let window = self.call_object(QUERY, activity, "getWindow", "()Landroid/view/Window;")?;
        let decor = self.call_object(QUERY, &window, "getDecorView", "()Landroid/view/View;")?;
        let result = self.env.call_method(
            &decor,
            "setSystemUiVisibility",
            "(I)V",
            &[JValue::Int(IMMERSIVE_FLAGS)],
        );
        result.map_err(|e| self.fail(QUERY, e))?;
        tracing::debug!(flags = IMMERSIVE_FLAGS, "immersive mode requested");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JNI entry points
// ---------------------------------------------------------------------------

/// Log and abort the VM.
fn fatal(env: &mut JNIEnv, err: BridgeError) -> ! {
    tracing::error!(error = %err, kind = ?err.kind(), "hostlink bridge failure, aborting");
    env.fatal_error(format!("hostlink: {err}"))
}

fn read_config(env: &mut JNIEnv, config_json: &JString) -> Result<BridgeConfig> {
    if config_json.is_null() {
        return Ok(BridgeConfig::default());
    }
    let json: String = env
        .get_string(config_json)
        .map_err(|e| BridgeError::Config(format!("unreadable config string: {e}")))?
        .into();
    BridgeConfig::from_json_str(&json)
}

/// Make the VM and Activity reachable through `ndk-context` for native
/// libraries loaded alongside the engine.
fn publish_context(env: &mut JNIEnv, activity: &JObject) -> Result<()> {
    if CONTEXT.get().is_some() {
        return Ok(());
    }
    let global = env
        .new_global_ref(activity)
        .map_err(|e| BridgeError::host("activity", e.to_string()))?;
    let vm = env
        .get_java_vm()
        .map_err(|e| BridgeError::host("java_vm", e.to_string()))?;
    // SAFETY: the VM pointer is valid for the process lifetime and the
    // activity is pinned by a global reference stored in `CONTEXT`.
    unsafe {
        ndk_context::initialize_android_context(
            vm.get_java_vm_pointer().cast(),
            global.as_obj().as_raw().cast(),
        );
    }
    let _ = CONTEXT.set(global);
    Ok(())
}

fn start<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'local>,
    config_json: &JString<'local>,
) -> Result<()> {
    let config = read_config(env, config_json)?;
    logging::init(&config.log_filter);

    let mut slot = ADAPTER.lock().map_err(|_| BridgeError::Poisoned)?;
    if slot.is_none() {
        publish_context(env, activity)?;
        *slot = Some(LifecycleAdapter::new(registered_engine()?, config));
    }
    let adapter = slot.as_mut().ok_or(BridgeError::Poisoned)?;
    let mut host = AndroidHost::new(env, activity);
    adapter.on_start(&mut host)
}

fn configuration_changed<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject<'local>,
    orientation: jint,
) -> Result<()> {
    let mut slot = ADAPTER.lock().map_err(|_| BridgeError::Poisoned)?;
    let adapter = slot.as_mut().ok_or(BridgeError::NotStarted)?;
    let mut host = AndroidHost::new(env, activity);
    adapter.on_configuration_changed(&mut host, AxisOrientation::from_configuration_code(orientation))
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_hostlink_HostlinkActivity_nativeOnStart<'local>(
    mut env: JNIEnv<'local>,
    activity: JObject<'local>,
    config_json: JString<'local>,
) {
    if let Err(e) = start(&mut env, &activity, &config_json) {
        fatal(&mut env, e);
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_dev_hostlink_HostlinkActivity_nativeOnConfigurationChanged<'local>(
    mut env: JNIEnv<'local>,
    activity: JObject<'local>,
    orientation: jint,
) {
    if let Err(e) = configuration_changed(&mut env, &activity, orientation) {
        fatal(&mut env, e);
    }
}
