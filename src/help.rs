//! Helpers for native code: registration, throwing, exception text and
//! `java.io.FileDescriptor` access.
//!
//! Throw helpers leave the new exception pending and return. The caller is
//! expected to return to managed code promptly.
//!
//! ```rust,ignore
//! use nativehelper::help;
//!
//! extern "system" fn Posix_close(raw: *mut jni::JNIEnv, _: JClass, fd: JObject) {
//!     let env = unsafe { JniEnv::from_raw(raw) };
//!     let Ok(n) = help::get_fd_from_file_descriptor(&env, fd.as_raw()) else { return };
//!     if unsafe { libc::close(n) } == -1 {
//!         let _ = help::throw_io_exception(&env, std::io::Error::last_os_error().raw_os_error().unwrap_or(0));
//!     }
//! }
//! ```

use std::ffi::{CStr, CString};
use std::fmt;

use crate::constants::JniConstants;
use crate::env::{JniEnv, ScopedLocalRef};
use crate::error::{JniHelperError, Result};
use crate::sys::jni;

const LOG_TARGET: &str = "JNIHelp";

/// Longest message `throw_exception_fmt` passes on, in bytes.
pub const MAX_FORMATTED_MESSAGE_LEN: usize = 511;

// =============================================================================
// Native registration
// =============================================================================

/// Registers `methods` on the class named `class_name`.
pub fn register_native_methods(
    env: &JniEnv,
    class_name: &str,
    methods: &[jni::JNINativeMethod],
) -> Result<()> {
    log::trace!(target: LOG_TARGET, "Registering {class_name}'s {} native methods...", methods.len());

    let class = ScopedLocalRef::new(env, env.find_class(class_name).unwrap_or(std::ptr::null_mut()));
    if class.is_null() {
        return Err(JniHelperError::ClassNotFound(class_name.to_string()));
    }

    env.register_natives(class.get(), methods)
        .map_err(|code| JniHelperError::RegisterNativesFailed {
            class: class_name.to_string(),
            code,
        })
}

/// Like [`register_native_methods`], but any failure is a `FatalError`.
pub fn register_native_methods_or_die(env: &JniEnv, class_name: &str, methods: &[jni::JNINativeMethod]) {
    match register_native_methods(env, class_name, methods) {
        Ok(()) => {}
        Err(JniHelperError::ClassNotFound(_)) => {
            env.fatal_error(&format!("Native registration unable to find class '{class_name}'; aborting..."))
        }
        Err(_) => env.fatal_error(&format!("RegisterNatives failed for '{class_name}'; aborting...")),
    }
}

// =============================================================================
// Throwing
// =============================================================================

/// Throws a new `class_name` with `msg`, discarding any pending exception.
///
/// A message is cut at its first NUL byte, as a C string would be.
///
/// On `Err` some other exception is pending instead: `ClassNotFoundException`
/// when the class is missing, usually `OutOfMemoryError` when `ThrowNew` fails.
pub fn throw_exception(env: &JniEnv, class_name: &str, msg: Option<&str>) -> Result<()> {
    let msg = msg.map(up_to_nul);
    let c_msg = msg.and_then(|m| CString::new(m).ok());

    if env.exception_check() {
        let pending = ScopedLocalRef::new(env, env.exception_occurred().unwrap_or(std::ptr::null_mut()));
        env.exception_clear();

        if !pending.is_null() {
            let text = exception_summary(env, pending.get()).unwrap_or_else(|text| text);
            log::warn!(target: LOG_TARGET, "Discarding pending exception ({text}) to throw {class_name}");
        }
    }

    let class = ScopedLocalRef::new(env, env.find_class(class_name).unwrap_or(std::ptr::null_mut()));
    if class.is_null() {
        log::error!(target: LOG_TARGET, "Unable to find exception class {class_name}");
        return Err(JniHelperError::ClassNotFound(class_name.to_string()));
    }

    if env.throw_new(class.get(), c_msg.as_deref()).is_err() {
        let message = msg.unwrap_or("(null)");
        log::error!(target: LOG_TARGET, "Failed throwing '{class_name}' '{message}'");
        return Err(JniHelperError::ThrowFailed {
            class: class_name.to_string(),
            message: message.to_string(),
        });
    }

    Ok(())
}

/// Throws with a formatted message, cut to [`MAX_FORMATTED_MESSAGE_LEN`] bytes.
///
/// ```rust,ignore
/// help::throw_exception_fmt(&env, "java/lang/IllegalArgumentException", format_args!("bad fd {fd}"))?;
/// ```
pub fn throw_exception_fmt(env: &JniEnv, class_name: &str, args: fmt::Arguments<'_>) -> Result<()> {
    let mut msg = fmt::format(args);
    truncate_on_char_boundary(&mut msg, MAX_FORMATTED_MESSAGE_LEN);
    throw_exception(env, class_name, Some(&msg))
}

pub fn throw_null_pointer_exception(env: &JniEnv, msg: Option<&str>) -> Result<()> {
    throw_exception(env, "java/lang/NullPointerException", msg)
}

pub fn throw_runtime_exception(env: &JniEnv, msg: Option<&str>) -> Result<()> {
    throw_exception(env, "java/lang/RuntimeException", msg)
}

/// Throws `java.io.IOException` whose message describes `errnum`.
pub fn throw_io_exception(env: &JniEnv, errnum: i32) -> Result<()> {
    throw_exception(env, "java/io/IOException", Some(&str_error(errnum)))
}

fn up_to_nul(s: &str) -> &str {
    s.split('\0').next().unwrap_or_default()
}

fn truncate_on_char_boundary(s: &mut String, max: usize) {
    if s.len() <= max {
        return;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s.truncate(end);
}

/// The C library's description of `errnum`, or `"errno N"` if it has none.
pub fn str_error(errnum: i32) -> String {
    let mut buf = [0 as libc::c_char; 80];
    let rc = unsafe { libc::strerror_r(errnum, buf.as_mut_ptr(), buf.len()) };
    if rc != 0 {
        return format!("errno {errnum}");
    }
    unsafe { CStr::from_ptr(buf.as_ptr()) }.to_string_lossy().into_owned()
}

// =============================================================================
// Exception text
// =============================================================================

/// The binary class name of `exception`, plus `": message"` if it has one.
///
/// `Err` carries a placeholder describing which step failed. Exceptions raised
/// while building the summary are cleared.
pub fn exception_summary(env: &JniEnv, exception: jni::jthrowable) -> std::result::Result<String, String> {
    let exception_class = ScopedLocalRef::new(env, env.get_object_class(exception));
    let class_class = ScopedLocalRef::new(env, env.get_object_class(exception_class.get()));

    let class_name = env
        .get_method_id(class_class.get(), "getName", "()Ljava/lang/String;")
        .map(|get_name| env.call_object_method(exception_class.get(), get_name, &[]))
        .unwrap_or(std::ptr::null_mut());
    let class_name = ScopedLocalRef::new(env, class_name);
    if class_name.is_null() {
        env.exception_clear();
        return Err("<error getting class name>".to_string());
    }

    let Some(mut summary) = env.get_string_utf(class_name.get()) else {
        env.exception_clear();
        return Err("<error getting class name UTF-8>".to_string());
    };

    let Some(get_message) = env.get_method_id(exception_class.get(), "getMessage", "()Ljava/lang/String;") else {
        env.exception_clear();
        return Ok(summary);
    };
    let message = ScopedLocalRef::new(env, env.call_object_method(exception, get_message, &[]));
    if message.is_null() {
        return Ok(summary);
    }

    summary.push_str(": ");
    match env.get_string_utf(message.get()) {
        Some(text) => summary.push_str(&text),
        None => {
            summary.push_str("<error getting message>");
            env.exception_clear();
        }
    }
    Ok(summary)
}

/// `exception.printStackTrace()` captured through a `StringWriter`.
///
/// `None` if any step fails; an exception may then be pending.
pub fn stack_trace(env: &JniEnv, exception: jni::jthrowable) -> Option<String> {
    let string_writer_class = ScopedLocalRef::new(env, env.find_class("java/io/StringWriter")?);
    let string_writer_ctor = env.get_method_id(string_writer_class.get(), "<init>", "()V")?;
    let string_writer_to_string =
        env.get_method_id(string_writer_class.get(), "toString", "()Ljava/lang/String;")?;

    let print_writer_class = ScopedLocalRef::new(env, env.find_class("java/io/PrintWriter")?);
    let print_writer_ctor = env.get_method_id(print_writer_class.get(), "<init>", "(Ljava/io/Writer;)V")?;

    let string_writer = ScopedLocalRef::new(env, env.new_object(string_writer_class.get(), string_writer_ctor, &[])?);
    let print_writer = ScopedLocalRef::new(
        env,
        env.new_object(
            print_writer_class.get(),
            print_writer_ctor,
            &[jni::jvalue { l: string_writer.get() }],
        )?,
    );

    let exception_class = ScopedLocalRef::new(env, env.get_object_class(exception));
    let print_stack_trace =
        env.get_method_id(exception_class.get(), "printStackTrace", "(Ljava/io/PrintWriter;)V")?;
    env.call_void_method(exception, print_stack_trace, &[jni::jvalue { l: print_writer.get() }]);
    if env.exception_check() {
        return None;
    }

    let text = ScopedLocalRef::new(env, env.call_object_method(string_writer.get(), string_writer_to_string, &[]));
    if text.is_null() {
        return None;
    }
    env.get_string_utf(text.get())
}

/// Stack trace of `exception`, or of the pending exception when `None`.
///
/// The pending exception, if any, is cleared while the trace is built and
/// thrown again afterwards. Falls back to [`exception_summary`].
pub fn get_stack_trace(env: &JniEnv, exception: Option<jni::jthrowable>) -> String {
    let current = ScopedLocalRef::new(env, env.exception_occurred().unwrap_or(std::ptr::null_mut()));
    let exception = match exception.filter(|e| !e.is_null()) {
        Some(e) => e,
        None if current.is_null() => return "<no pending exception>".to_string(),
        None => current.get(),
    };

    if !current.is_null() {
        env.exception_clear();
    }

    let trace = stack_trace(env, exception).unwrap_or_else(|| {
        env.exception_clear();
        exception_summary(env, exception).unwrap_or_else(|text| text)
    });

    if !current.is_null() {
        // Rethrow.
        let _ = env.throw(current.get());
    }

    trace
}

/// Logs the stack trace of `exception` (or the pending one) at `level`.
pub fn log_exception(env: &JniEnv, level: log::Level, target: &str, exception: Option<jni::jthrowable>) {
    let trace = get_stack_trace(env, exception);
    log::log!(target: target, level, "{trace}");
}

// =============================================================================
// java.io.FileDescriptor and java.lang.ref.Reference
// =============================================================================

/// A new `java.io.FileDescriptor` holding `fd`.
///
/// `Ok(None)` if the allocation failed; an `OutOfMemoryError` is pending.
pub fn create_file_descriptor(env: &JniEnv, fd: jni::jint) -> Result<Option<jni::jobject>> {
    let class = JniConstants::file_descriptor_class(env)?;
    let ctor = JniConstants::file_descriptor_init_method(env)?;
    let Some(file_descriptor) = env.new_object(class, ctor, &[]) else {
        return Ok(None);
    };
    set_file_descriptor_of_fd(env, file_descriptor, fd)?;
    Ok(Some(file_descriptor))
}

/// The descriptor stored in `file_descriptor`, or `-1` for null.
pub fn get_fd_from_file_descriptor(env: &JniEnv, file_descriptor: jni::jobject) -> Result<jni::jint> {
    if file_descriptor.is_null() {
        return Ok(-1);
    }
    let field = JniConstants::file_descriptor_descriptor_field(env)?;
    Ok(env.get_int_field(file_descriptor, field))
}

/// Stores `fd` in `file_descriptor`. A null object gets a `NullPointerException`.
pub fn set_file_descriptor_of_fd(env: &JniEnv, file_descriptor: jni::jobject, fd: jni::jint) -> Result<()> {
    if file_descriptor.is_null() {
        return throw_null_pointer_exception(env, Some("null FileDescriptor"));
    }
    let field = JniConstants::file_descriptor_descriptor_field(env)?;
    env.set_int_field(file_descriptor, field, fd);
    Ok(())
}

pub fn get_owner_id_from_file_descriptor(env: &JniEnv, file_descriptor: jni::jobject) -> Result<jni::jlong> {
    let field = JniConstants::file_descriptor_owner_id_field(env)?;
    Ok(env.get_long_field(file_descriptor, field))
}

/// `reference.get()` for a `java.lang.ref.Reference`.
pub fn get_referent(env: &JniEnv, reference: jni::jobject) -> Result<jni::jobject> {
    let get = JniConstants::reference_get_method(env)?;
    Ok(env.call_object_method(reference, get, &[]))
}

/// A new string from UTF-16 code units.
pub fn create_string(env: &JniEnv, chars: &[jni::jchar]) -> Option<jni::jstring> {
    env.new_string(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_keeps_short_messages() {
        let mut s = "short".to_string();
        truncate_on_char_boundary(&mut s, MAX_FORMATTED_MESSAGE_LEN);
        assert_eq!(s, "short");
    }

    #[test]
    fn truncation_backs_off_to_char_boundary() {
        // 'é' is two bytes; byte 511 falls inside the 256th one.
        let mut s = "é".repeat(300);
        truncate_on_char_boundary(&mut s, MAX_FORMATTED_MESSAGE_LEN);
        assert_eq!(s.len(), 510);
        assert!(s.chars().all(|c| c == 'é'));
    }

    #[test]
    fn message_ends_at_first_nul() {
        assert_eq!(up_to_nul("open /tmp/a\0b failed"), "open /tmp/a");
        assert_eq!(up_to_nul("\0"), "");
        assert_eq!(up_to_nul("plain"), "plain");
    }

    #[test]
    fn str_error_describes_known_errno() {
        let text = str_error(libc::ENOENT);
        assert!(!text.is_empty());
        assert!(!text.starts_with("errno"));
    }
}
