//! The environment wrapper and its reference guards.
//!
//! [`JniEnv`] wraps the raw `JNIEnv*` handed to native code. The guards
//! release what they own when they go out of scope:
//!
//! - [`ScopedLocalRef`]: deletes a local reference
//! - [`GlobalRef`]: deletes a global reference
//! - [`ScopedLocalFrame`]: pops a local frame (and every local created in it)
//!
//! ```rust,ignore
//! use nativehelper::prelude::*;
//!
//! fn string_length(env: &JniEnv, s: jni::jstring) -> Option<jni::jint> {
//!     let frame = ScopedLocalFrame::new(env);
//!     let class = ScopedLocalRef::new(env, env.find_class("java/lang/String")?);
//!     let length = env.get_method_id(class.get(), "length", "()I")?;
//!     // ...
//!     # None
//! }
//! ```

mod jni_impl {
    pub use crate::jni_wrapper::JniEnv;
}

mod refs_impl {
    pub use crate::refs::{GlobalRef, ScopedLocalFrame, ScopedLocalRef};
}

pub use jni_impl::JniEnv;
pub use refs_impl::{GlobalRef, ScopedLocalFrame, ScopedLocalRef};
