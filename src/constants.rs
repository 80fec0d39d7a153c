//! Process-wide cache of the classes, fields and methods the helpers use.
//!
//! Lookups happen once, on first use. The cache assumes one VM per process:
//! after that VM is gone, [`JniConstants::uninitialize`] must run before a new
//! VM's environment is passed in.
//!
//! Initialization is re-entrant. Looking up `FileDescriptor.descriptor` can
//! run `FileDescriptor`'s static initializer, which dups a descriptor through
//! a native method that asks this cache for the same field, on the same
//! thread. The lock is a re-entrant mutex, no borrow of the slots is held
//! across a runtime call, and each slot is filled only if it is still empty.

use std::cell::RefCell;

use parking_lot::{const_reentrant_mutex, ReentrantMutex};

use crate::env::{JniEnv, ScopedLocalRef};
use crate::error::{JniHelperError, Result};
use crate::sys::jni;

const LOG_TARGET: &str = "JniConstants";

#[derive(Clone, Copy)]
struct Slots {
    file_descriptor_class: jni::jclass,
    reference_class: jni::jclass,
    string_class: jni::jclass,
    file_descriptor_descriptor_field: jni::jfieldID,
    file_descriptor_owner_id_field: jni::jfieldID,
    file_descriptor_init_method: jni::jmethodID,
    reference_get_method: jni::jmethodID,
    initialized: bool,
}

impl Slots {
    const EMPTY: Slots = Slots {
        file_descriptor_class: std::ptr::null_mut(),
        reference_class: std::ptr::null_mut(),
        string_class: std::ptr::null_mut(),
        file_descriptor_descriptor_field: std::ptr::null_mut(),
        file_descriptor_owner_id_field: std::ptr::null_mut(),
        file_descriptor_init_method: std::ptr::null_mut(),
        reference_get_method: std::ptr::null_mut(),
        initialized: false,
    };
}

// Global references and member IDs are valid on every thread.
unsafe impl Send for Slots {}

static CONSTANTS: ReentrantMutex<RefCell<Slots>> = const_reentrant_mutex(RefCell::new(Slots::EMPTY));

type Slot = fn(&mut Slots) -> &mut *mut std::ffi::c_void;

/// Cached `java.io.FileDescriptor`, `java.lang.ref.Reference` and
/// `java.lang.String` handles.
pub struct JniConstants;

impl JniConstants {
    /// Looks up every entry that is not cached yet. Cheap once initialized.
    pub fn initialize(env: &JniEnv) -> Result<()> {
        let guard = CONSTANTS.lock();
        if guard.borrow().initialized {
            return Ok(());
        }

        // Classes first, so re-entrant calls find them.
        cache_class(env, &guard, |s| &mut s.file_descriptor_class, "java/io/FileDescriptor")?;
        cache_class(env, &guard, |s| &mut s.reference_class, "java/lang/ref/Reference")?;
        cache_class(env, &guard, |s| &mut s.string_class, "java/lang/String")?;

        let (fd_class, reference_class) = {
            let slots = guard.borrow();
            (slots.file_descriptor_class, slots.reference_class)
        };

        cache_member(&guard, |s| &mut s.file_descriptor_descriptor_field, || {
            env.get_field_id(fd_class, "descriptor", "I")
                .ok_or_else(|| field_not_found("descriptor", "I"))
        })?;
        cache_member(&guard, |s| &mut s.file_descriptor_owner_id_field, || {
            env.get_field_id(fd_class, "ownerId", "J")
                .ok_or_else(|| field_not_found("ownerId", "J"))
        })?;
        cache_member(&guard, |s| &mut s.file_descriptor_init_method, || {
            env.get_method_id(fd_class, "<init>", "()V")
                .ok_or_else(|| method_not_found("<init>", "()V"))
        })?;
        cache_member(&guard, |s| &mut s.reference_get_method, || {
            env.get_method_id(reference_class, "get", "()Ljava/lang/Object;")
                .ok_or_else(|| method_not_found("get", "()Ljava/lang/Object;"))
        })?;

        guard.borrow_mut().initialized = true;
        Ok(())
    }

    /// Forgets every cached entry so the next call looks them up again.
    ///
    /// Global references from the previous VM are abandoned, not deleted:
    /// that VM is already gone.
    pub fn uninitialize() {
        let guard = CONSTANTS.lock();
        *guard.borrow_mut() = Slots::EMPTY;
    }

    /// Global reference to `java.io.FileDescriptor`.
    pub fn file_descriptor_class(env: &JniEnv) -> Result<jni::jclass> {
        Self::get(env, |s| s.file_descriptor_class)
    }

    /// `int java.io.FileDescriptor.descriptor`.
    pub fn file_descriptor_descriptor_field(env: &JniEnv) -> Result<jni::jfieldID> {
        Self::get(env, |s| s.file_descriptor_descriptor_field)
    }

    /// `long java.io.FileDescriptor.ownerId`.
    pub fn file_descriptor_owner_id_field(env: &JniEnv) -> Result<jni::jfieldID> {
        Self::get(env, |s| s.file_descriptor_owner_id_field)
    }

    /// `void java.io.FileDescriptor.<init>()`.
    pub fn file_descriptor_init_method(env: &JniEnv) -> Result<jni::jmethodID> {
        Self::get(env, |s| s.file_descriptor_init_method)
    }

    /// Global reference to `java.lang.ref.Reference`.
    pub fn reference_class(env: &JniEnv) -> Result<jni::jclass> {
        Self::get(env, |s| s.reference_class)
    }

    /// `Object java.lang.ref.Reference.get()`.
    pub fn reference_get_method(env: &JniEnv) -> Result<jni::jmethodID> {
        Self::get(env, |s| s.reference_get_method)
    }

    /// Global reference to `java.lang.String`.
    pub fn string_class(env: &JniEnv) -> Result<jni::jclass> {
        Self::get(env, |s| s.string_class)
    }

    fn get<T>(env: &JniEnv, read: fn(&Slots) -> T) -> Result<T> {
        Self::initialize(env)?;
        let guard = CONSTANTS.lock();
        let value = read(&guard.borrow());
        Ok(value)
    }
}

fn cache_class(env: &JniEnv, slots: &RefCell<Slots>, slot: Slot, name: &str) -> Result<()> {
    if !slot(&mut slots.borrow_mut()).is_null() {
        return Ok(());
    }

    let local = ScopedLocalRef::new(env, env.find_class(name).unwrap_or(std::ptr::null_mut()));
    if local.is_null() {
        log::error!(target: LOG_TARGET, "failed to find class '{name}'");
        return Err(JniHelperError::ClassNotFound(name.to_string()));
    }
    let global = env.new_global_ref(local.get());
    if global.is_null() {
        return Err(JniHelperError::ClassNotFound(name.to_string()));
    }

    let mut slots = slots.borrow_mut();
    let cached = slot(&mut slots);
    if cached.is_null() {
        *cached = global;
    } else {
        // A re-entrant call got there first.
        env.delete_global_ref(global);
    }
    Ok(())
}

fn cache_member(
    slots: &RefCell<Slots>,
    slot: Slot,
    lookup: impl FnOnce() -> Result<*mut std::ffi::c_void>,
) -> Result<()> {
    if !slot(&mut slots.borrow_mut()).is_null() {
        return Ok(());
    }
    let id = lookup().inspect_err(|e| log::error!(target: LOG_TARGET, "{e}"))?;
    let mut slots = slots.borrow_mut();
    let cached = slot(&mut slots);
    if cached.is_null() {
        *cached = id;
    }
    Ok(())
}

fn field_not_found(name: &str, descriptor: &str) -> JniHelperError {
    JniHelperError::FieldNotFound {
        name: name.to_string(),
        descriptor: descriptor.to_string(),
    }
}

fn method_not_found(name: &str, signature: &str) -> JniHelperError {
    JniHelperError::MethodNotFound {
        name: name.to_string(),
        signature: signature.to_string(),
    }
}
