//! Typed reference handles for native method signatures.
//!
//! At the ABI level every reference is a `jobject`. These wrappers are
//! `#[repr(transparent)]`, so a native function may declare
//! `extern "system" fn(env: *mut JNIEnv, this: JObject, name: JString) -> JIntArray`
//! and still be registered with `RegisterNatives`. Distinct types are what let
//! the signature checker tell a `jstring` parameter from a `jobject` one.
//!
//! ```rust,ignore
//! extern "system" fn Os_dup(env: *mut jni::JNIEnv, _: JClass, fd: JObject) -> JObject { ... }
//! ```

use std::ptr;

use crate::sys::jni;

macro_rules! reference_types {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[repr(transparent)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name(jni::jobject);

            impl $name {
                /// Wraps a raw reference without checking its class.
                pub fn from_raw(raw: jni::jobject) -> Self {
                    $name(raw)
                }

                pub fn null() -> Self {
                    $name(ptr::null_mut())
                }

                pub fn as_raw(self) -> jni::jobject {
                    self.0
                }

                pub fn is_null(self) -> bool {
                    self.0.is_null()
                }
            }

            impl From<$name> for jni::jobject {
                fn from(value: $name) -> Self {
                    value.0
                }
            }
        )*
    };
}

reference_types! {
    /// `java.lang.Object` (or any reference).
    JObject,
    /// `java.lang.Class`.
    JClass,
    /// `java.lang.String`.
    JString,
    /// Any array.
    JArray,
    /// An array of references.
    JObjectArray,
    JBooleanArray,
    JByteArray,
    JCharArray,
    JShortArray,
    JIntArray,
    JLongArray,
    JFloatArray,
    JDoubleArray,
    /// `java.lang.Throwable`.
    JThrowable,
}
