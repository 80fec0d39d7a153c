//! Common imports for native libraries.
//!
//! Covers what a typical `JNI_OnLoad` and its native methods use: the
//! environment and its guards, typed handles, the helpers and the
//! registration macros.

pub use crate::array::{ScopedArrayRO, ScopedArrayRW, ScopedNullableArrayRO};
pub use crate::constants::JniConstants;
pub use crate::env::{GlobalRef, JniEnv, ScopedLocalFrame, ScopedLocalRef};
pub use crate::error::JniHelperError;
pub use crate::help;
pub use crate::signature::NativeKind;
pub use crate::sys::jni;
pub use crate::types::*;
pub use crate::{
    critical_native_method, critical_native_method_autosig, fast_native_method, fast_native_method_autosig,
    native_method, native_method_autosig,
};
#[cfg(feature = "invocation")]
pub use crate::invocation::{JavaVm, JavaVmBuilder, JniInvocation};
