//! Thin wrapper around a `JNIEnv*`.
//!
//! Each method is one call through the function table. Lookups return
//! `Option` (a null result means the runtime has an exception pending);
//! status calls return `Result<(), jint>` with the runtime's status code.
//!
//! # Example
//!
//! ```rust,ignore
//! use nativehelper::env::JniEnv;
//!
//! extern "system" fn on_load(raw: *mut jni::JNIEnv) {
//!     let env = unsafe { JniEnv::from_raw(raw) };
//!     let string_class = env.find_class("java/lang/String").unwrap();
//!     if env.exception_check() {
//!         env.exception_clear();
//!     }
//! }
//! ```

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::jni_call;
use crate::sys::jni;

/// A JNI environment pointer for the current thread.
///
/// `JniEnv` is `!Send`: each attached thread has its own environment.
pub struct JniEnv {
    env: *mut jni::JNIEnv,
}

impl JniEnv {
    /// Wraps a raw environment pointer.
    ///
    /// # Safety
    ///
    /// The pointer must be a valid `JNIEnv*` belonging to the current thread
    /// and must outlive the wrapper.
    pub unsafe fn from_raw(env: *mut jni::JNIEnv) -> Self {
        JniEnv { env }
    }

    /// Returns the raw JNI environment pointer.
    pub fn raw(&self) -> *mut jni::JNIEnv {
        self.env
    }

    pub fn get_version(&self) -> jni::jint {
        unsafe { jni_call!(self.env, GetVersion) }
    }

    // =========================================================================
    // Classes and IDs
    // =========================================================================

    /// Finds a class by its binary name with '/' separators (e.g. "java/lang/String").
    pub fn find_class(&self, name: &str) -> Option<jni::jclass> {
        let c_name = CString::new(name).ok()?;
        let cls = unsafe { jni_call!(self.env, FindClass, c_name.as_ptr()) };
        non_null(cls)
    }

    /// Gets the class of an object. Never fails for a non-null object.
    pub fn get_object_class(&self, obj: jni::jobject) -> jni::jclass {
        unsafe { jni_call!(self.env, GetObjectClass, obj) }
    }

    pub fn get_field_id(&self, cls: jni::jclass, name: &str, sig: &str) -> Option<jni::jfieldID> {
        let c_name = CString::new(name).ok()?;
        let c_sig = CString::new(sig).ok()?;
        let fid = unsafe { jni_call!(self.env, GetFieldID, cls, c_name.as_ptr(), c_sig.as_ptr()) };
        non_null(fid)
    }

    pub fn get_method_id(&self, cls: jni::jclass, name: &str, sig: &str) -> Option<jni::jmethodID> {
        let c_name = CString::new(name).ok()?;
        let c_sig = CString::new(sig).ok()?;
        let mid = unsafe { jni_call!(self.env, GetMethodID, cls, c_name.as_ptr(), c_sig.as_ptr()) };
        non_null(mid)
    }

    pub fn get_static_method_id(&self, cls: jni::jclass, name: &str, sig: &str) -> Option<jni::jmethodID> {
        let c_name = CString::new(name).ok()?;
        let c_sig = CString::new(sig).ok()?;
        let mid = unsafe {
            jni_call!(self.env, GetStaticMethodID, cls, c_name.as_ptr(), c_sig.as_ptr())
        };
        non_null(mid)
    }

    // =========================================================================
    // Exceptions
    // =========================================================================

    pub fn exception_check(&self) -> bool {
        unsafe { jni_call!(self.env, ExceptionCheck) != jni::JNI_FALSE }
    }

    /// Returns a local reference to the pending exception, if any.
    pub fn exception_occurred(&self) -> Option<jni::jthrowable> {
        let exc = unsafe { jni_call!(self.env, ExceptionOccurred) };
        non_null(exc)
    }

    pub fn exception_clear(&self) {
        unsafe { jni_call!(self.env, ExceptionClear) }
    }

    /// Prints the pending exception and its stack trace to stderr.
    pub fn exception_describe(&self) {
        unsafe { jni_call!(self.env, ExceptionDescribe) }
    }

    /// Makes `obj` the pending exception.
    pub fn throw(&self, obj: jni::jthrowable) -> Result<(), jni::jint> {
        status(unsafe { jni_call!(self.env, Throw, obj) })
    }

    /// Constructs an instance of `cls` with `msg` and makes it pending.
    ///
    /// `None` passes a null message, as `ThrowNew(cls, NULL)` does.
    pub fn throw_new(&self, cls: jni::jclass, msg: Option<&CStr>) -> Result<(), jni::jint> {
        let msg_ptr = msg.map_or(ptr::null(), CStr::as_ptr);
        status(unsafe { jni_call!(self.env, ThrowNew, cls, msg_ptr) })
    }

    /// Reports a fatal error to the runtime. Does not return.
    pub fn fatal_error(&self, msg: &str) -> ! {
        let c_msg = CString::new(msg.replace('\0', " ")).unwrap_or_default();
        unsafe { jni_call!(self.env, FatalError, c_msg.as_ptr()) };
        // FatalError never returns on a conforming runtime.
        std::process::abort()
    }

    // =========================================================================
    // Strings
    // =========================================================================

    pub fn new_string_utf(&self, s: &str) -> Option<jni::jstring> {
        let c_str = CString::new(s).ok()?;
        let jstr = unsafe { jni_call!(self.env, NewStringUTF, c_str.as_ptr()) };
        non_null(jstr)
    }

    /// Creates a string from UTF-16 code units.
    pub fn new_string(&self, chars: &[jni::jchar]) -> Option<jni::jstring> {
        let jstr = unsafe { jni_call!(self.env, NewString, chars.as_ptr(), chars.len() as jni::jsize) };
        non_null(jstr)
    }

    /// Copies a Java string out as modified UTF-8, lossily decoded.
    ///
    /// Returns `None` for a null string or when the runtime cannot produce the
    /// characters (an `OutOfMemoryError` is then pending).
    pub fn get_string_utf(&self, s: jni::jstring) -> Option<String> {
        if s.is_null() {
            return None;
        }
        unsafe {
            let chars: *const c_char = jni_call!(self.env, GetStringUTFChars, s, ptr::null_mut());
            if chars.is_null() {
                return None;
            }
            let result = CStr::from_ptr(chars).to_string_lossy().into_owned();
            jni_call!(self.env, ReleaseStringUTFChars, s, chars);
            Some(result)
        }
    }

    // =========================================================================
    // References and frames
    // =========================================================================

    pub fn new_global_ref(&self, obj: jni::jobject) -> jni::jobject {
        unsafe { jni_call!(self.env, NewGlobalRef, obj) }
    }

    pub fn delete_global_ref(&self, obj: jni::jobject) {
        unsafe { jni_call!(self.env, DeleteGlobalRef, obj) }
    }

    pub fn new_local_ref(&self, obj: jni::jobject) -> jni::jobject {
        unsafe { jni_call!(self.env, NewLocalRef, obj) }
    }

    pub fn delete_local_ref(&self, obj: jni::jobject) {
        unsafe { jni_call!(self.env, DeleteLocalRef, obj) }
    }

    pub fn new_weak_global_ref(&self, obj: jni::jobject) -> jni::jweak {
        unsafe { jni_call!(self.env, NewWeakGlobalRef, obj) }
    }

    pub fn delete_weak_global_ref(&self, obj: jni::jweak) {
        unsafe { jni_call!(self.env, DeleteWeakGlobalRef, obj) }
    }

    pub fn is_same_object(&self, ref1: jni::jobject, ref2: jni::jobject) -> bool {
        unsafe { jni_call!(self.env, IsSameObject, ref1, ref2) != jni::JNI_FALSE }
    }

    pub fn push_local_frame(&self, capacity: jni::jint) -> Result<(), jni::jint> {
        status(unsafe { jni_call!(self.env, PushLocalFrame, capacity) })
    }

    /// Pops the current frame, returning `result` as a reference in the outer frame.
    pub fn pop_local_frame(&self, result: jni::jobject) -> jni::jobject {
        unsafe { jni_call!(self.env, PopLocalFrame, result) }
    }

    // =========================================================================
    // Objects, methods, fields
    // =========================================================================

    pub fn new_object(&self, cls: jni::jclass, ctor: jni::jmethodID, args: &[jni::jvalue]) -> Option<jni::jobject> {
        let obj = unsafe { jni_call!(self.env, NewObjectA, cls, ctor, args.as_ptr()) };
        non_null(obj)
    }

    pub fn call_void_method(&self, obj: jni::jobject, method_id: jni::jmethodID, args: &[jni::jvalue]) {
        unsafe { jni_call!(self.env, CallVoidMethodA, obj, method_id, args.as_ptr()) }
    }

    /// Calls an object-returning instance method. A null result is returned as-is.
    pub fn call_object_method(
        &self,
        obj: jni::jobject,
        method_id: jni::jmethodID,
        args: &[jni::jvalue],
    ) -> jni::jobject {
        unsafe { jni_call!(self.env, CallObjectMethodA, obj, method_id, args.as_ptr()) }
    }

    pub fn get_int_field(&self, obj: jni::jobject, field_id: jni::jfieldID) -> jni::jint {
        unsafe { jni_call!(self.env, GetIntField, obj, field_id) }
    }

    pub fn set_int_field(&self, obj: jni::jobject, field_id: jni::jfieldID, value: jni::jint) {
        unsafe { jni_call!(self.env, SetIntField, obj, field_id, value) }
    }

    pub fn set_long_field(&self, obj: jni::jobject, field_id: jni::jfieldID, value: jni::jlong) {
        unsafe { jni_call!(self.env, SetLongField, obj, field_id, value) }
    }

    pub fn get_object_field(&self, obj: jni::jobject, field_id: jni::jfieldID) -> jni::jobject {
        unsafe { jni_call!(self.env, GetObjectField, obj, field_id) }
    }

    pub fn set_object_field(&self, obj: jni::jobject, field_id: jni::jfieldID, value: jni::jobject) {
        unsafe { jni_call!(self.env, SetObjectField, obj, field_id, value) }
    }

    pub fn get_long_field(&self, obj: jni::jobject, field_id: jni::jfieldID) -> jni::jlong {
        unsafe { jni_call!(self.env, GetLongField, obj, field_id) }
    }

    pub fn get_array_length(&self, array: jni::jarray) -> jni::jsize {
        unsafe { jni_call!(self.env, GetArrayLength, array) }
    }

    // =========================================================================
    // Native method registration
    // =========================================================================

    pub fn register_natives(&self, cls: jni::jclass, methods: &[jni::JNINativeMethod]) -> Result<(), jni::jint> {
        let result = unsafe {
            jni_call!(self.env, RegisterNatives, cls, methods.as_ptr(), methods.len() as jni::jint)
        };
        if result < 0 { Err(result) } else { Ok(()) }
    }

    pub fn unregister_natives(&self, cls: jni::jclass) -> Result<(), jni::jint> {
        status(unsafe { jni_call!(self.env, UnregisterNatives, cls) })
    }
}

fn non_null<T>(p: *mut T) -> Option<*mut T> {
    if p.is_null() { None } else { Some(p) }
}

fn status(code: jni::jint) -> Result<(), jni::jint> {
    if code == jni::JNI_OK { Ok(()) } else { Err(code) }
}
