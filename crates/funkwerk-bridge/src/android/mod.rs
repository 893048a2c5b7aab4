// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform host via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method invokes the corresponding
// Android API through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// Queries that complete synchronously via JNI (TelephonyManager,
// ContentResolver, NotificationManager, resource lookups, moveTaskToBack)
// are fully implemented here. Contact and telephony queries block the
// calling thread for the duration of the provider query; invoke them off
// the main thread if latency matters.
//
// Callbacks flow the other way: the host Activity owns the layout
// listener and the `onRequestPermissionsResult` override, and forwards
// them into `KeyboardMonitor::on_layout_change` and
// `PermissionNegotiator::on_permissions_result` respectively. The glue is
// the host Activity's responsibility; this module only issues the
// outbound requests.

#![cfg(target_os = "android")]

use jni::objects::{JObject, JString, JValue};
use jni::sys::jsize;
use jni::JNIEnv;

use funkwerk_core::error::{FunkwerkError, Result};
use funkwerk_core::types::{ContactRow, NotificationSpec};

use crate::traits::*;

/// First Android version with runtime permission grants (Marshmallow).
const SDK_RUNTIME_PERMISSIONS: i32 = 23;

/// `Intent.FLAG_ACTIVITY_CLEAR_TOP`
const FLAG_ACTIVITY_CLEAR_TOP: i32 = 0x0400_0000;
/// `PendingIntent.FLAG_ONE_SHOT`
const FLAG_ONE_SHOT: i32 = 0x4000_0000;
/// `Notification.DEFAULT_ALL`
const NOTIFICATION_DEFAULT_ALL: i32 = -1;

/// Column names in the contacts provider's phone table.
const COL_DISPLAY_NAME: &str = "display_name";
const COL_NUMBER: &str = "data1";

/// Obtain the process [`jni::JavaVM`] from the global Android context.
///
/// `ndk_context::android_context()` returns the `JavaVM*` pointer set by
/// `android_main` or `ANativeActivity_onCreate`.
fn java_vm() -> Result<jni::JavaVM> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    unsafe { jni::JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| FunkwerkError::Host(format!("failed to obtain JavaVM: {e}")))
}

/// Obtain the current Android `Activity` as a [`JObject`].
///
/// The pointer comes from `ndk_context::android_context().context()` which
/// is the `jobject` for whichever `Activity` hosts the native code.
fn activity_obj() -> Result<JObject<'static>> {
    let ctx = ndk_context::android_context();
    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(FunkwerkError::Host(
            "Android context is null — host activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    Ok(unsafe { JObject::from_raw(ptr.cast()) })
}

/// Convenience: map any `jni::errors::Error` into `FunkwerkError::Host`.
fn jni_err(context: &str, e: jni::errors::Error) -> FunkwerkError {
    FunkwerkError::Host(format!("{context}: {e}"))
}

/// `Build.VERSION.SDK_INT` of the running OS.
fn sdk_int(env: &mut JNIEnv<'_>) -> Result<i32> {
    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))?
        .i()
        .map_err(|e| jni_err("SDK_INT->i", e))
}

/// Read a Java `String` return value, mapping null to `None`.
fn opt_string(env: &mut JNIEnv<'_>, obj: JObject<'_>) -> Result<Option<String>> {
    if obj.is_null() {
        return Ok(None);
    }
    let jstr = JString::from(obj);
    let s: String = env
        .get_string(&jstr)
        .map_err(|e| jni_err("get_string", e))?
        .into();
    Ok(Some(s))
}

/// `activity.getSystemService(name)`.
fn system_service<'a>(
    env: &mut JNIEnv<'a>,
    activity: &JObject<'_>,
    name: &str,
) -> Result<JObject<'a>> {
    let j_name: JString = env
        .new_string(name)
        .map_err(|e| jni_err("new_string(service)", e))?;
    let service = env
        .call_method(
            activity,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| jni_err("getSystemService", e))?
        .l()
        .map_err(|e| jni_err("getSystemService->l", e))?;
    if service.is_null() {
        return Err(FunkwerkError::Host(format!("system service {name} is null")));
    }
    Ok(service)
}

// ---------------------------------------------------------------------------
// Host struct
// ---------------------------------------------------------------------------

/// Android implementation of the Funkwerk platform host.
///
/// All methods go through JNI to call the Android SDK. The struct is
/// zero-sized; all state lives on the Java side.
pub struct AndroidHost;

impl AndroidHost {
    /// Create a new Android host.
    ///
    /// This does **not** touch JNI — the first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformHost for AndroidHost {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativePermissions — Activity.requestPermissions
// ---------------------------------------------------------------------------

impl NativePermissions for AndroidHost {
    /// Runtime grants exist from Android 6.0 (API 23) on. If the SDK
    /// version cannot be read, assume they are required — requesting an
    /// already-granted permission is harmless, skipping a required one is
    /// not.
    fn runtime_permissions_required(&self) -> bool {
        let vm = match java_vm() {
            Ok(vm) => vm,
            Err(_) => return true,
        };
        let mut env = match vm.attach_current_thread() {
            Ok(env) => env,
            Err(_) => return true,
        };
        match sdk_int(&mut env) {
            Ok(sdk) => sdk >= SDK_RUNTIME_PERMISSIONS,
            Err(_) => true,
        }
    }

    /// Dispatch one batched `Activity.requestPermissions` call. The host
    /// Activity receives the outcome in `onRequestPermissionsResult` and
    /// must forward it to the permission negotiator.
    fn request_permissions(&self, permissions: &[String], request_code: i32) -> Result<()> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach JNI thread", e))?;
        let activity = activity_obj()?;

        tracing::info!(request_code, count = permissions.len(), "Android: requesting permissions");

        let array = env
            .new_object_array(
                permissions.len() as jsize,
                "java/lang/String",
                JObject::null(),
            )
            .map_err(|e| jni_err("new_object_array", e))?;

        for (i, permission) in permissions.iter().enumerate() {
            let j_permission: JString = env
                .new_string(permission)
                .map_err(|e| jni_err("new_string(permission)", e))?;
            env.set_object_array_element(&array, i as jsize, &j_permission)
                .map_err(|e| jni_err("set_object_array_element", e))?;
        }

        env.call_method(
            &activity,
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&array), JValue::Int(request_code)],
        )
        .map_err(|e| jni_err("requestPermissions", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeTelephony — TelephonyManager.getLine1Number
// ---------------------------------------------------------------------------

impl NativeTelephony for AndroidHost {
    fn phone_number(&self) -> Result<Option<String>> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach JNI thread", e))?;
        let activity = activity_obj()?;

        // Context.TELEPHONY_SERVICE
        let telephony = system_service(&mut env, &activity, "phone")?;

        let number = env
            .call_method(&telephony, "getLine1Number", "()Ljava/lang/String;", &[])
            .map_err(|e| jni_err("getLine1Number", e))?
            .l()
            .map_err(|e| jni_err("getLine1Number->l", e))?;

        match opt_string(&mut env, number)? {
            Some(s) if !s.is_empty() => Ok(Some(s)),
            _ => Ok(None),
        }
    }
}

// ---------------------------------------------------------------------------
// NativeContacts — ContactsContract phone table cursor walk
// ---------------------------------------------------------------------------

impl NativeContacts for AndroidHost {
    /// Query `ContactsContract.CommonDataKinds.Phone.CONTENT_URI` and walk
    /// the cursor. One row per phone number; rows with a null display name
    /// or number are skipped.
    fn contact_rows(&self) -> Result<Vec<ContactRow>> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach JNI thread", e))?;
        let activity = activity_obj()?;

        let resolver = env
            .call_method(
                &activity,
                "getContentResolver",
                "()Landroid/content/ContentResolver;",
                &[],
            )
            .map_err(|e| jni_err("getContentResolver", e))?
            .l()
            .map_err(|e| jni_err("getContentResolver->l", e))?;

        let content_uri = env
            .get_static_field(
                "android/provider/ContactsContract$CommonDataKinds$Phone",
                "CONTENT_URI",
                "Landroid/net/Uri;",
            )
            .map_err(|e| jni_err("Phone.CONTENT_URI", e))?
            .l()
            .map_err(|e| jni_err("CONTENT_URI->l", e))?;

        // resolver.query(uri, null, null, null, null)
        let cursor = env
            .call_method(
                &resolver,
                "query",
                "(Landroid/net/Uri;[Ljava/lang/String;Ljava/lang/String;[Ljava/lang/String;Ljava/lang/String;)Landroid/database/Cursor;",
                &[
                    JValue::Object(&content_uri),
                    JValue::Object(&JObject::null()),
                    JValue::Object(&JObject::null()),
                    JValue::Object(&JObject::null()),
                    JValue::Object(&JObject::null()),
                ],
            )
            .map_err(|e| jni_err("ContentResolver.query", e))?
            .l()
            .map_err(|e| jni_err("query->l", e))?;

        if cursor.is_null() {
            return Err(FunkwerkError::Host("contacts query returned null cursor".into()));
        }

        let name_idx = column_index(&mut env, &cursor, COL_DISPLAY_NAME)?;
        let number_idx = column_index(&mut env, &cursor, COL_NUMBER)?;

        let mut rows = Vec::new();
        loop {
            let has_next = env
                .call_method(&cursor, "moveToNext", "()Z", &[])
                .map_err(|e| jni_err("Cursor.moveToNext", e))?
                .z()
                .map_err(|e| jni_err("moveToNext->z", e))?;
            if !has_next {
                break;
            }

            let name = cursor_string(&mut env, &cursor, name_idx)?;
            let number = cursor_string(&mut env, &cursor, number_idx)?;
            if let (Some(name), Some(number)) = (name, number) {
                rows.push(ContactRow { name, number });
            }
        }

        env.call_method(&cursor, "close", "()V", &[])
            .map_err(|e| jni_err("Cursor.close", e))?;

        tracing::debug!(count = rows.len(), "Android: contacts query complete");
        Ok(rows)
    }
}

/// `cursor.getColumnIndex(name)`.
fn column_index(env: &mut JNIEnv<'_>, cursor: &JObject<'_>, name: &str) -> Result<i32> {
    let j_name: JString = env
        .new_string(name)
        .map_err(|e| jni_err("new_string(column)", e))?;
    let idx = env
        .call_method(
            cursor,
            "getColumnIndex",
            "(Ljava/lang/String;)I",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| jni_err("getColumnIndex", e))?
        .i()
        .map_err(|e| jni_err("getColumnIndex->i", e))?;
    if idx < 0 {
        return Err(FunkwerkError::Host(format!("contacts column {name} missing")));
    }
    Ok(idx)
}

/// `cursor.getString(index)`, null mapped to `None`.
fn cursor_string(env: &mut JNIEnv<'_>, cursor: &JObject<'_>, index: i32) -> Result<Option<String>> {
    let value = env
        .call_method(
            cursor,
            "getString",
            "(I)Ljava/lang/String;",
            &[JValue::Int(index)],
        )
        .map_err(|e| jni_err("Cursor.getString", e))?
        .l()
        .map_err(|e| jni_err("getString->l", e))?;
    opt_string(env, value)
}

// ---------------------------------------------------------------------------
// NativeNotify — NotificationManager
// ---------------------------------------------------------------------------

impl NativeNotify for AndroidHost {
    /// Build and post a notification whose id is the spec's type code, so
    /// a newer notification of the same kind replaces the older one.
    /// Tapping it brings the app's launch activity back to the front.
    fn show_notification(&self, spec: &NotificationSpec) -> Result<()> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach JNI thread", e))?;
        let activity = activity_obj()?;

        tracing::info!(type_code = spec.type_code, "Android: posting notification");

        // -- Content intent: relaunch the app's main activity -------------------
        let package_manager = env
            .call_method(
                &activity,
                "getPackageManager",
                "()Landroid/content/pm/PackageManager;",
                &[],
            )
            .map_err(|e| jni_err("getPackageManager", e))?
            .l()
            .map_err(|e| jni_err("getPackageManager->l", e))?;

        let package_name = env
            .call_method(&activity, "getPackageName", "()Ljava/lang/String;", &[])
            .map_err(|e| jni_err("getPackageName", e))?
            .l()
            .map_err(|e| jni_err("getPackageName->l", e))?;

        let intent = env
            .call_method(
                &package_manager,
                "getLaunchIntentForPackage",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&package_name)],
            )
            .map_err(|e| jni_err("getLaunchIntentForPackage", e))?
            .l()
            .map_err(|e| jni_err("getLaunchIntentForPackage->l", e))?;

        let pending_intent = if intent.is_null() {
            JObject::null()
        } else {
            env.call_method(
                &intent,
                "addFlags",
                "(I)Landroid/content/Intent;",
                &[JValue::Int(FLAG_ACTIVITY_CLEAR_TOP)],
            )
            .map_err(|e| jni_err("Intent.addFlags", e))?;

            env.call_static_method(
                "android/app/PendingIntent",
                "getActivity",
                "(Landroid/content/Context;ILandroid/content/Intent;I)Landroid/app/PendingIntent;",
                &[
                    JValue::Object(&activity),
                    JValue::Int(spec.type_code),
                    JValue::Object(&intent),
                    JValue::Int(FLAG_ONE_SHOT),
                ],
            )
            .map_err(|e| jni_err("PendingIntent.getActivity", e))?
            .l()
            .map_err(|e| jni_err("getActivity->l", e))?
        };

        // -- Notification.Builder ------------------------------------------------
        let builder = env
            .new_object(
                "android/app/Notification$Builder",
                "(Landroid/content/Context;)V",
                &[JValue::Object(&activity)],
            )
            .map_err(|e| jni_err("new Notification.Builder", e))?;

        let icon = env
            .get_static_field("android/R$drawable", "stat_notify_chat", "I")
            .map_err(|e| jni_err("R.drawable.stat_notify_chat", e))?
            .i()
            .map_err(|e| jni_err("stat_notify_chat->i", e))?;

        env.call_method(
            &builder,
            "setSmallIcon",
            "(I)Landroid/app/Notification$Builder;",
            &[JValue::Int(icon)],
        )
        .map_err(|e| jni_err("setSmallIcon", e))?;

        let j_title: JString = env
            .new_string(&spec.title)
            .map_err(|e| jni_err("new_string(title)", e))?;
        env.call_method(
            &builder,
            "setContentTitle",
            "(Ljava/lang/CharSequence;)Landroid/app/Notification$Builder;",
            &[JValue::Object(&j_title)],
        )
        .map_err(|e| jni_err("setContentTitle", e))?;

        let j_text: JString = env
            .new_string(&spec.text)
            .map_err(|e| jni_err("new_string(text)", e))?;
        env.call_method(
            &builder,
            "setContentText",
            "(Ljava/lang/CharSequence;)Landroid/app/Notification$Builder;",
            &[JValue::Object(&j_text)],
        )
        .map_err(|e| jni_err("setContentText", e))?;

        env.call_method(
            &builder,
            "setAutoCancel",
            "(Z)Landroid/app/Notification$Builder;",
            &[JValue::Bool(1)],
        )
        .map_err(|e| jni_err("setAutoCancel", e))?;

        env.call_method(
            &builder,
            "setDefaults",
            "(I)Landroid/app/Notification$Builder;",
            &[JValue::Int(NOTIFICATION_DEFAULT_ALL)],
        )
        .map_err(|e| jni_err("setDefaults", e))?;

        if !pending_intent.is_null() {
            env.call_method(
                &builder,
                "setContentIntent",
                "(Landroid/app/PendingIntent;)Landroid/app/Notification$Builder;",
                &[JValue::Object(&pending_intent)],
            )
            .map_err(|e| jni_err("setContentIntent", e))?;
        }

        let notification = env
            .call_method(&builder, "build", "()Landroid/app/Notification;", &[])
            .map_err(|e| jni_err("Notification.Builder.build", e))?
            .l()
            .map_err(|e| jni_err("build->l", e))?;

        // Context.NOTIFICATION_SERVICE
        let manager = system_service(&mut env, &activity, "notification")?;

        env.call_method(
            &manager,
            "notify",
            "(ILandroid/app/Notification;)V",
            &[JValue::Int(spec.type_code), JValue::Object(&notification)],
        )
        .map_err(|e| jni_err("NotificationManager.notify", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeWindow — resources + task control
// ---------------------------------------------------------------------------

impl NativeWindow for AndroidHost {
    /// Resolve the `status_bar_height` dimen from the platform resources.
    /// Returns Ok(0) when the resource id cannot be resolved.
    fn status_bar_height(&self) -> Result<i32> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach JNI thread", e))?;
        let activity = activity_obj()?;

        let resources = env
            .call_method(
                &activity,
                "getResources",
                "()Landroid/content/res/Resources;",
                &[],
            )
            .map_err(|e| jni_err("getResources", e))?
            .l()
            .map_err(|e| jni_err("getResources->l", e))?;

        let j_name: JString = env
            .new_string("status_bar_height")
            .map_err(|e| jni_err("new_string(name)", e))?;
        let j_def_type: JString = env
            .new_string("dimen")
            .map_err(|e| jni_err("new_string(dimen)", e))?;
        let j_def_package: JString = env
            .new_string("android")
            .map_err(|e| jni_err("new_string(android)", e))?;

        let resource_id = env
            .call_method(
                &resources,
                "getIdentifier",
                "(Ljava/lang/String;Ljava/lang/String;Ljava/lang/String;)I",
                &[
                    JValue::Object(&j_name),
                    JValue::Object(&j_def_type),
                    JValue::Object(&j_def_package),
                ],
            )
            .map_err(|e| jni_err("getIdentifier", e))?
            .i()
            .map_err(|e| jni_err("getIdentifier->i", e))?;

        if resource_id <= 0 {
            tracing::warn!("Android: status_bar_height resource not found");
            return Ok(0);
        }

        env.call_method(
            &resources,
            "getDimensionPixelSize",
            "(I)I",
            &[JValue::Int(resource_id)],
        )
        .map_err(|e| jni_err("getDimensionPixelSize", e))?
        .i()
        .map_err(|e| jni_err("getDimensionPixelSize->i", e))
    }

    fn send_to_back(&self) -> Result<()> {
        let vm = java_vm()?;
        let mut env = vm
            .attach_current_thread()
            .map_err(|e| jni_err("attach JNI thread", e))?;
        let activity = activity_obj()?;

        env.call_method(&activity, "moveTaskToBack", "(Z)Z", &[JValue::Bool(1)])
            .map_err(|e| jni_err("moveTaskToBack", e))?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativePush — Firebase instance-id token
// ---------------------------------------------------------------------------

/// `FirebaseInstanceId.getInstance().getToken()`.
fn firebase_token<'a>(
    env: &mut JNIEnv<'a>,
) -> std::result::Result<JObject<'a>, jni::errors::Error> {
    let instance = env
        .call_static_method(
            "com/google/firebase/iid/FirebaseInstanceId",
            "getInstance",
            "()Lcom/google/firebase/iid/FirebaseInstanceId;",
            &[],
        )?
        .l()?;
    env.call_method(&instance, "getToken", "()Ljava/lang/String;", &[])?
        .l()
}

impl NativePush for AndroidHost {
    /// Current FCM registration token. The Firebase classes may be absent
    /// or the token not yet issued; every failure path degrades to `None`
    /// with the pending Java exception cleared.
    fn push_token(&self) -> Option<String> {
        let vm = java_vm().ok()?;
        let mut env = vm.attach_current_thread().ok()?;

        match firebase_token(&mut env) {
            Ok(token) => opt_string(&mut env, token).ok().flatten(),
            Err(e) => {
                let _ = env.exception_clear();
                tracing::debug!(error = %e, "Android: push token unavailable");
                None
            }
        }
    }
}
