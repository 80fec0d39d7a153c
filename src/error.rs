//! Error types for the helper layers.
//!
//! These describe what a helper could not do. Java exceptions raised by the
//! runtime stay pending in the `JNIEnv`; an `Err` here only tells the caller
//! that one is (probably) pending and which lookup or call failed.

use thiserror::Error;

use crate::sys::jni;

/// Failure of a JNI helper operation.
#[derive(Debug, Error)]
pub enum JniHelperError {
    #[error("failed to find class '{0}'")]
    ClassNotFound(String),

    #[error("failed to find field '{name}:{descriptor}'")]
    FieldNotFound { name: String, descriptor: String },

    #[error("failed to find method '{name}{signature}'")]
    MethodNotFound { name: String, signature: String },

    #[error("failed throwing '{class}' '{message}'")]
    ThrowFailed { class: String, message: String },

    #[error("RegisterNatives failed for '{class}' (status {code})")]
    RegisterNativesFailed { class: String, code: jni::jint },
}

pub type Result<T, E = JniHelperError> = std::result::Result<T, E>;
