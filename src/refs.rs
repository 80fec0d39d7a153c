//! Scope guards for runtime-owned references.

use crate::env::JniEnv;
use crate::sys::jni;

/// Deletes a JNI local reference when it goes out of scope.
///
/// ```rust,ignore
/// let class = ScopedLocalRef::new(&env, env.find_class("java/lang/String").unwrap_or(ptr::null_mut()));
/// if class.is_null() {
///     return; // ClassNotFoundException pending
/// }
/// // class.get() is deleted at the end of the scope
/// ```
pub struct ScopedLocalRef<'env> {
    env: &'env JniEnv,
    local_ref: jni::jobject,
}

impl<'env> ScopedLocalRef<'env> {
    /// Takes ownership of `local_ref`, which may be null.
    pub fn new(env: &'env JniEnv, local_ref: jni::jobject) -> Self {
        ScopedLocalRef { env, local_ref }
    }

    /// A guard that owns nothing yet.
    pub fn null(env: &'env JniEnv) -> Self {
        Self::new(env, std::ptr::null_mut())
    }

    pub fn get(&self) -> jni::jobject {
        self.local_ref
    }

    pub fn is_null(&self) -> bool {
        self.local_ref.is_null()
    }

    /// Replaces the owned reference, deleting the old one unless it is `new_ref` itself.
    pub fn reset(&mut self, new_ref: jni::jobject) {
        if new_ref != self.local_ref {
            if !self.local_ref.is_null() {
                self.env.delete_local_ref(self.local_ref);
            }
            self.local_ref = new_ref;
        }
    }

    /// Gives up ownership; the caller becomes responsible for the reference.
    #[must_use]
    pub fn release(&mut self) -> jni::jobject {
        std::mem::replace(&mut self.local_ref, std::ptr::null_mut())
    }
}

impl Drop for ScopedLocalRef<'_> {
    fn drop(&mut self) {
        self.reset(std::ptr::null_mut());
    }
}

/// Owns a JNI global reference and deletes it when dropped.
///
/// The environment pointer used for deletion is the one the reference was
/// created with, so drop it on that thread (or `into_raw` it).
pub struct GlobalRef {
    env_for_cleanup: *mut jni::JNIEnv,
    obj: jni::jobject,
}

impl GlobalRef {
    /// Creates a global reference to `obj` (local or global).
    ///
    /// Returns `None` if `obj` is null or the runtime is out of memory.
    pub fn new(env: &JniEnv, obj: jni::jobject) -> Option<Self> {
        if obj.is_null() {
            return None;
        }
        let global = env.new_global_ref(obj);
        if global.is_null() {
            return None;
        }
        Some(GlobalRef {
            env_for_cleanup: env.raw(),
            obj: global,
        })
    }

    pub fn get(&self) -> jni::jobject {
        self.obj
    }

    /// Leaks the global reference out of the guard.
    pub fn into_raw(self) -> jni::jobject {
        let obj = self.obj;
        std::mem::forget(self);
        obj
    }
}

impl Drop for GlobalRef {
    fn drop(&mut self) {
        if !self.obj.is_null() && !self.env_for_cleanup.is_null() {
            let env = unsafe { JniEnv::from_raw(self.env_for_cleanup) };
            env.delete_global_ref(self.obj);
        }
    }
}

/// Pushes a local reference frame on creation and pops it on drop, freeing
/// every local reference created inside the scope.
pub struct ScopedLocalFrame<'env> {
    env: &'env JniEnv,
    pushed: bool,
}

impl<'env> ScopedLocalFrame<'env> {
    pub const CAPACITY: jni::jint = 128;

    pub fn new(env: &'env JniEnv) -> Self {
        // A failed push leaves an OutOfMemoryError pending and no frame to pop.
        let pushed = env.push_local_frame(Self::CAPACITY).is_ok();
        ScopedLocalFrame { env, pushed }
    }

    /// Whether the frame was actually pushed.
    pub fn is_active(&self) -> bool {
        self.pushed
    }
}

impl Drop for ScopedLocalFrame<'_> {
    fn drop(&mut self) {
        if self.pushed {
            self.env.pop_local_frame(std::ptr::null_mut());
        }
    }
}
