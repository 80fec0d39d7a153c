//! # nativehelper
//!
//! Support code for native libraries that talk to a Java VM through JNI.
//!
//! - Cached class references and member IDs ([`constants::JniConstants`])
//! - Throwing Java exceptions from native code ([`help`])
//! - Scope guards for local/global references, local frames and primitive
//!   arrays ([`env`], [`array`])
//! - Native method tables whose descriptors are checked against the Rust
//!   function types at compile time ([`native_method!`] and friends)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nativehelper::prelude::*;
//!
//! extern "system" fn Os_getpid(_env: *mut jni::JNIEnv, _class: JClass) -> jni::jint {
//!     unsafe { libc::getpid() }
//! }
//!
//! extern "system" fn Os_close(raw: *mut jni::JNIEnv, _class: JClass, fd: JObject) {
//!     let env = unsafe { JniEnv::from_raw(raw) };
//!     let Ok(n) = help::get_fd_from_file_descriptor(&env, fd.as_raw()) else { return };
//!     if unsafe { libc::close(n) } == -1 {
//!         let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
//!         let _ = help::throw_io_exception(&env, errno);
//!     }
//! }
//!
//! #[no_mangle]
//! pub extern "system" fn JNI_OnLoad(vm: *mut jni::JavaVM, _: *mut std::ffi::c_void) -> jni::jint {
//!     let env = /* GetEnv */;
//!     let methods = [
//!         native_method!(Os_getpid: fn(*mut jni::JNIEnv, JClass) -> jni::jint, "()I"),
//!         native_method!(Os_close: fn(*mut jni::JNIEnv, JClass, JObject), "(Ljava/io/FileDescriptor;)V"),
//!     ];
//!     help::register_native_methods_or_die(&env, "android/system/Os", &methods);
//!     jni::JNI_VERSION_1_6
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  signature   descriptor parser, const checker/inferrer   │
//! │  macros      native_method!, fast_/critical_, autosig    │
//! ├─────────────────────────────────────────────────────────┤
//! │  help        registration, throwing, exception text      │
//! │  constants   JniConstants lazy cache                     │
//! │  array       ScopedArrayRO / NullableRO / RW             │
//! │  env         JniEnv, ScopedLocalRef, GlobalRef, frames   │
//! │  invocation  (feature) load a VM library, create a VM    │
//! ├─────────────────────────────────────────────────────────┤
//! │  sys::jni    raw JNI ABI                                 │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade under the targets `JNIHelp`,
//! `JniConstants` and `JniInvocation`. Install any logger to see them.
//!
//! ## Features
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `invocation` | [`invocation`]: load `libjvm` with `libloading` and create a VM |

pub mod sys;
pub mod env;
pub mod types;
pub mod error;
pub mod constants;
pub mod help;
pub mod array;
pub mod signature;
pub mod macros;
#[cfg(feature = "invocation")]
pub mod invocation;
pub mod prelude;

// Implementation modules (use `env` for the public API)
#[doc(hidden)]
pub mod jni_wrapper;
#[doc(hidden)]
pub mod refs;

pub use crate::sys::jni;
pub use crate::error::{JniHelperError, Result};
