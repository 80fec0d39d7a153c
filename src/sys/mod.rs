//! Raw FFI layer.

pub mod jni;
