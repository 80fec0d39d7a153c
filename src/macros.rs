//! Macros that build `JNINativeMethod` entries.
//!
//! Each macro restates the native function's parameter types. The function
//! is coerced to that `extern "system" fn` pointer type, so a restated type
//! that differs from the real one does not compile. The descriptor is then
//! checked against those types in a `const` item:
//!
//! ```rust
//! use nativehelper::prelude::*;
//!
//! extern "system" fn os_dup(_env: *mut jni::JNIEnv, _class: JClass, fd: JObject) -> JObject {
//!     fd
//! }
//! extern "system" fn os_getpid(_env: *mut jni::JNIEnv, _class: JClass) -> jni::jint {
//!     std::process::id() as jni::jint
//! }
//!
//! fn register(env: &JniEnv) {
//!     let methods = [
//!         native_method!("dup", "(Ljava/io/FileDescriptor;)Ljava/io/FileDescriptor;",
//!                        os_dup: fn(*mut jni::JNIEnv, JClass, JObject) -> JObject),
//!         native_method!("getpid", "()I", os_getpid: fn(*mut jni::JNIEnv, JClass) -> jni::jint),
//!         native_method_autosig!(os_getpid: fn(*mut jni::JNIEnv, JClass) -> jni::jint),
//!     ];
//!     help::register_native_methods_or_die(env, "android/system/Os", &methods);
//! }
//! # let _ = register;
//! ```
//!
//! Writing `"(I)Ljava/io/FileDescriptor;"` for `os_dup` above fails to
//! compile with "JNI signature doesn't match Rust function type.".
//! [`signature::check`](crate::signature::check) reports the specific reason
//! at runtime.

#[doc(hidden)]
#[macro_export]
macro_rules! __native_return {
    () => { () };
    ($ret:ty) => { $ret };
}

/// Builds a `JNINativeMethod` after checking `sig` against the function type
/// at compile time.
///
/// `kind` is a [`NativeKind`](crate::signature::NativeKind); `name` and `sig`
/// are `&'static str` constant expressions.
#[macro_export]
macro_rules! make_checked_native_method {
    ($kind:expr, $name:expr, $sig:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?) => {{
        type NativeFn = unsafe extern "system" fn($($arg),*) -> $crate::__native_return!($($ret)?);
        const NAME: &str = $name;
        const SIGNATURE: &str = $sig;
        const _: () = {
            if $crate::signature::check::<NativeFn>($kind, SIGNATURE).is_err() {
                panic!("JNI signature doesn't match Rust function type.");
            }
        };
        static NAME_Z: [u8; NAME.len() + 1] = $crate::signature::nul_terminated::<{ NAME.len() + 1 }>(NAME);
        static SIGNATURE_Z: [u8; SIGNATURE.len() + 1] =
            $crate::signature::nul_terminated::<{ SIGNATURE.len() + 1 }>(SIGNATURE);

        let func: NativeFn = $func;
        $crate::sys::jni::JNINativeMethod {
            name: NAME_Z.as_ptr() as *const ::std::os::raw::c_char,
            signature: SIGNATURE_Z.as_ptr() as *const ::std::os::raw::c_char,
            fnPtr: func as *mut ::std::ffi::c_void,
        }
    }};
}

/// Builds a `JNINativeMethod` whose descriptor is inferred from the function
/// type. Every type past the `JNIEnv*`/receiver prefix must be final.
#[macro_export]
macro_rules! make_inferred_native_method {
    ($kind:expr, $name:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?) => {{
        type NativeFn = unsafe extern "system" fn($($arg),*) -> $crate::__native_return!($($ret)?);
        const KIND: $crate::signature::NativeKind = $kind;
        const RETURN: $crate::signature::JniTypeInfo = <NativeFn as $crate::signature::JniFunction>::RETURN;
        const PARAMS: &[$crate::signature::JniTypeInfo] = <NativeFn as $crate::signature::JniFunction>::PARAMS;
        const NAME: &str = $name;
        const _: () = {
            if $crate::signature::check_inferable(KIND, RETURN, PARAMS).is_err() {
                panic!("Only unambiguous (final) types can be used to infer a JNI signature.");
            }
        };
        const SIGNATURE_LEN: usize = $crate::signature::inferred_descriptor_len(KIND, RETURN, PARAMS) + 1;
        static NAME_Z: [u8; NAME.len() + 1] = $crate::signature::nul_terminated::<{ NAME.len() + 1 }>(NAME);
        static SIGNATURE_Z: [u8; SIGNATURE_LEN] =
            $crate::signature::write_inferred_descriptor::<SIGNATURE_LEN>(KIND, RETURN, PARAMS);

        let func: NativeFn = $func;
        $crate::sys::jni::JNINativeMethod {
            name: NAME_Z.as_ptr() as *const ::std::os::raw::c_char,
            signature: SIGNATURE_Z.as_ptr() as *const ::std::os::raw::c_char,
            fnPtr: func as *mut ::std::ffi::c_void,
        }
    }};
}

/// A normal native method.
///
/// `native_method!(func: fn(..) -> R, "sig")` registers `func` under its own
/// name; `native_method!("javaName", "sig", path::to::func: fn(..) -> R)`
/// under `javaName`.
///
/// A descriptor whose return type disagrees with the function is rejected:
///
/// ```compile_fail
/// use nativehelper::prelude::*;
///
/// extern "system" fn get_pid(_env: *mut jni::JNIEnv, _class: JClass) -> jni::jint {
///     7
/// }
///
/// let _ = native_method!(get_pid: fn(*mut jni::JNIEnv, JClass) -> jni::jint, "()J");
/// ```
///
/// So is a restated type that differs from the function's real type, even
/// when the descriptor matches the restated one:
///
/// ```compile_fail
/// use nativehelper::prelude::*;
///
/// extern "system" fn get_pid(_env: *mut jni::JNIEnv, _class: JClass) -> jni::jint {
///     7
/// }
///
/// let _ = native_method!(get_pid: fn(*mut jni::JNIEnv, JClass) -> jni::jlong, "()J");
/// ```
#[macro_export]
macro_rules! native_method {
    ($func:ident : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?, $sig:expr $(,)?) => {
        $crate::make_checked_native_method!(
            $crate::signature::NativeKind::Normal, stringify!($func), $sig, $func: fn($($arg),*) $(-> $ret)?
        )
    };
    ($name:expr, $sig:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_checked_native_method!(
            $crate::signature::NativeKind::Normal, $name, $sig, $func: fn($($arg),*) $(-> $ret)?
        )
    };
}

/// A `@FastNative` method. Same forms as [`native_method!`].
#[macro_export]
macro_rules! fast_native_method {
    ($func:ident : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?, $sig:expr $(,)?) => {
        $crate::make_checked_native_method!(
            $crate::signature::NativeKind::Fast, stringify!($func), $sig, $func: fn($($arg),*) $(-> $ret)?
        )
    };
    ($name:expr, $sig:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_checked_native_method!(
            $crate::signature::NativeKind::Fast, $name, $sig, $func: fn($($arg),*) $(-> $ret)?
        )
    };
}

/// A `@CriticalNative` method: primitives only, no `JNIEnv*` or receiver.
#[macro_export]
macro_rules! critical_native_method {
    ($func:ident : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?, $sig:expr $(,)?) => {
        $crate::make_checked_native_method!(
            $crate::signature::NativeKind::Critical, stringify!($func), $sig, $func: fn($($arg),*) $(-> $ret)?
        )
    };
    ($name:expr, $sig:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_checked_native_method!(
            $crate::signature::NativeKind::Critical, $name, $sig, $func: fn($($arg),*) $(-> $ret)?
        )
    };
}

/// A normal native method with an inferred descriptor.
///
/// Parameters that map to more than one descriptor, such as [`JObject`](crate::types::JObject),
/// cannot be inferred:
///
/// ```compile_fail
/// use nativehelper::prelude::*;
///
/// extern "system" fn hash(_env: *mut jni::JNIEnv, _class: JClass, _obj: JObject) -> jni::jint {
///     0
/// }
///
/// let _ = native_method_autosig!(hash: fn(*mut jni::JNIEnv, JClass, JObject) -> jni::jint);
/// ```
///
/// ```
/// use nativehelper::prelude::*;
///
/// extern "system" fn length(_env: *mut jni::JNIEnv, _class: JClass, _s: JString) -> jni::jint {
///     0
/// }
///
/// let method = native_method_autosig!(length: fn(*mut jni::JNIEnv, JClass, JString) -> jni::jint);
/// let signature = unsafe { std::ffi::CStr::from_ptr(method.signature) };
/// assert_eq!(signature.to_str(), Ok("(Ljava/lang/String;)I"));
/// ```
#[macro_export]
macro_rules! native_method_autosig {
    ($func:ident : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_inferred_native_method!(
            $crate::signature::NativeKind::Normal, stringify!($func), $func: fn($($arg),*) $(-> $ret)?
        )
    };
    ($name:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_inferred_native_method!(
            $crate::signature::NativeKind::Normal, $name, $func: fn($($arg),*) $(-> $ret)?
        )
    };
}

/// A `@FastNative` method with an inferred descriptor.
#[macro_export]
macro_rules! fast_native_method_autosig {
    ($func:ident : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_inferred_native_method!(
            $crate::signature::NativeKind::Fast, stringify!($func), $func: fn($($arg),*) $(-> $ret)?
        )
    };
    ($name:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_inferred_native_method!(
            $crate::signature::NativeKind::Fast, $name, $func: fn($($arg),*) $(-> $ret)?
        )
    };
}

/// A `@CriticalNative` method with an inferred descriptor.
#[macro_export]
macro_rules! critical_native_method_autosig {
    ($func:ident : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_inferred_native_method!(
            $crate::signature::NativeKind::Critical, stringify!($func), $func: fn($($arg),*) $(-> $ret)?
        )
    };
    ($name:expr, $func:path : fn($($arg:ty),* $(,)?) $(-> $ret:ty)? $(,)?) => {
        $crate::make_inferred_native_method!(
            $crate::signature::NativeKind::Critical, $name, $func: fn($($arg),*) $(-> $ret)?
        )
    };
}
