//! Scoped access to Java primitive arrays.
//!
//! Read-only guards copy short arrays (up to [`COPY_THRESHOLD`] elements)
//! into an owned buffer and pin longer ones, releasing them with `JNI_ABORT`.
//! [`ScopedArrayRW`] always pins and copies changes back when dropped.
//!
//! ```rust,ignore
//! extern "system" fn sum(raw: *mut jni::JNIEnv, _: JClass, values: JIntArray) -> jni::jlong {
//!     let env = unsafe { JniEnv::from_raw(raw) };
//!     let values = ScopedIntArrayRO::new(&env, values);
//!     values.iter().map(|&v| v as jni::jlong).sum()
//! }
//! ```
//!
//! Each element type takes only its own typed array handle; a raw `jarray`
//! goes through the `unsafe` `from_raw` constructors.

use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use crate::env::JniEnv;
use crate::help;
use crate::jni_call;
use crate::sys::jni;
use crate::types::{
    JBooleanArray, JByteArray, JCharArray, JDoubleArray, JFloatArray, JIntArray, JLongArray, JShortArray,
};

/// Arrays with at most this many elements are copied rather than pinned.
pub const COPY_THRESHOLD: usize = 1024;

/// An element type of a Java primitive array.
pub trait PrimitiveArrayElement: Copy + Default + 'static {
    /// The typed handle of an array of this element type.
    type Array: Copy + Into<jni::jarray>;

    /// `Get<T>ArrayRegion`.
    ///
    /// # Safety
    ///
    /// `buf` must be valid for `len` writes and `array` must be a live array
    /// of this element type.
    unsafe fn get_region(env: &JniEnv, array: jni::jarray, start: jni::jsize, len: jni::jsize, buf: *mut Self);

    /// `Get<T>ArrayElements`. Null if the runtime is out of memory.
    ///
    /// # Safety
    ///
    /// `array` must be a live array of this element type.
    unsafe fn get_elements(env: &JniEnv, array: jni::jarray) -> *mut Self;

    /// `Release<T>ArrayElements`.
    ///
    /// # Safety
    ///
    /// `elems` must come from `get_elements` on the same array and not have
    /// been released yet.
    unsafe fn release_elements(env: &JniEnv, array: jni::jarray, elems: *mut Self, mode: jni::jint);
}

macro_rules! primitive_array_element {
    ($($ty:ident => $array:ident, $region:ident, $get:ident, $release:ident;)*) => {
        $(
            impl PrimitiveArrayElement for jni::$ty {
                type Array = $array;

                unsafe fn get_region(
                    env: &JniEnv,
                    array: jni::jarray,
                    start: jni::jsize,
                    len: jni::jsize,
                    buf: *mut Self,
                ) {
                    jni_call!(env.raw(), $region, array, start, len, buf)
                }

                unsafe fn get_elements(env: &JniEnv, array: jni::jarray) -> *mut Self {
                    jni_call!(env.raw(), $get, array, std::ptr::null_mut())
                }

                unsafe fn release_elements(env: &JniEnv, array: jni::jarray, elems: *mut Self, mode: jni::jint) {
                    jni_call!(env.raw(), $release, array, elems, mode)
                }
            }
        )*
    };
}

primitive_array_element! {
    jboolean => JBooleanArray, GetBooleanArrayRegion, GetBooleanArrayElements, ReleaseBooleanArrayElements;
    jbyte => JByteArray, GetByteArrayRegion, GetByteArrayElements, ReleaseByteArrayElements;
    jchar => JCharArray, GetCharArrayRegion, GetCharArrayElements, ReleaseCharArrayElements;
    jshort => JShortArray, GetShortArrayRegion, GetShortArrayElements, ReleaseShortArrayElements;
    jint => JIntArray, GetIntArrayRegion, GetIntArrayElements, ReleaseIntArrayElements;
    jlong => JLongArray, GetLongArrayRegion, GetLongArrayElements, ReleaseLongArrayElements;
    jfloat => JFloatArray, GetFloatArrayRegion, GetFloatArrayElements, ReleaseFloatArrayElements;
    jdouble => JDoubleArray, GetDoubleArrayRegion, GetDoubleArrayElements, ReleaseDoubleArrayElements;
}

enum Storage<T> {
    Empty,
    Copied(Vec<T>),
    Pinned { elems: NonNull<T>, len: usize },
}

impl<T: PrimitiveArrayElement> Storage<T> {
    fn read_only(env: &JniEnv, array: jni::jarray) -> Self {
        let len = env.get_array_length(array).max(0) as usize;
        if len <= COPY_THRESHOLD {
            let mut buf = vec![T::default(); len];
            unsafe { T::get_region(env, array, 0, len as jni::jsize, buf.as_mut_ptr()) };
            Storage::Copied(buf)
        } else {
            Self::pinned(env, array, len)
        }
    }

    fn pinned(env: &JniEnv, array: jni::jarray, len: usize) -> Self {
        match NonNull::new(unsafe { T::get_elements(env, array) }) {
            Some(elems) => Storage::Pinned { elems, len },
            // OutOfMemoryError pending.
            None => Storage::Empty,
        }
    }

    fn as_slice(&self) -> &[T] {
        match self {
            Storage::Empty => &[],
            Storage::Copied(buf) => buf,
            Storage::Pinned { elems, len } => unsafe { std::slice::from_raw_parts(elems.as_ptr(), *len) },
        }
    }

    fn as_mut_slice(&mut self) -> &mut [T] {
        match self {
            Storage::Empty => &mut [],
            Storage::Copied(buf) => buf,
            Storage::Pinned { elems, len } => unsafe { std::slice::from_raw_parts_mut(elems.as_ptr(), *len) },
        }
    }

    fn release(&mut self, env: &JniEnv, array: jni::jarray, mode: jni::jint) {
        if let Storage::Pinned { elems, .. } = std::mem::replace(self, Storage::Empty) {
            unsafe { T::release_elements(env, array, elems.as_ptr(), mode) };
        }
    }
}

/// Read-only view of a non-null primitive array.
///
/// A null array throws `NullPointerException` and gives an empty view.
pub struct ScopedArrayRO<'env, T: PrimitiveArrayElement> {
    env: &'env JniEnv,
    java_array: jni::jarray,
    storage: Storage<T>,
}

impl<'env, T: PrimitiveArrayElement> ScopedArrayRO<'env, T> {
    /// A handle of another element type is rejected at compile time:
    ///
    /// ```compile_fail
    /// use nativehelper::array::ScopedIntArrayRO;
    /// use nativehelper::env::JniEnv;
    /// use nativehelper::types::JByteArray;
    ///
    /// fn read(env: &JniEnv, bytes: JByteArray) -> usize {
    ///     ScopedIntArrayRO::new(env, bytes).len()
    /// }
    /// ```
    pub fn new(env: &'env JniEnv, java_array: T::Array) -> Self {
        unsafe { Self::from_raw(env, java_array.into()) }
    }

    /// # Safety
    ///
    /// `java_array` must be null or a live array whose elements are `T`.
    pub unsafe fn from_raw(env: &'env JniEnv, java_array: jni::jarray) -> Self {
        let storage = if java_array.is_null() {
            let _ = help::throw_null_pointer_exception(env, None);
            Storage::Empty
        } else {
            Storage::read_only(env, java_array)
        };
        ScopedArrayRO { env, java_array, storage }
    }

    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn java_array(&self) -> jni::jarray {
        self.java_array
    }
}

impl<T: PrimitiveArrayElement> Deref for ScopedArrayRO<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PrimitiveArrayElement> Drop for ScopedArrayRO<'_, T> {
    fn drop(&mut self) {
        self.storage.release(self.env, self.java_array, jni::JNI_ABORT);
    }
}

/// Read-only view of a primitive array that may be null.
///
/// A null array gives an empty view and throws nothing.
pub struct ScopedNullableArrayRO<'env, T: PrimitiveArrayElement> {
    env: &'env JniEnv,
    java_array: jni::jarray,
    storage: Storage<T>,
}

impl<'env, T: PrimitiveArrayElement> ScopedNullableArrayRO<'env, T> {
    pub fn new(env: &'env JniEnv, java_array: T::Array) -> Self {
        unsafe { Self::from_raw(env, java_array.into()) }
    }

    /// # Safety
    ///
    /// `java_array` must be null or a live array whose elements are `T`.
    pub unsafe fn from_raw(env: &'env JniEnv, java_array: jni::jarray) -> Self {
        let storage = if java_array.is_null() {
            Storage::Empty
        } else {
            Storage::read_only(env, java_array)
        };
        ScopedNullableArrayRO { env, java_array, storage }
    }

    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn java_array(&self) -> jni::jarray {
        self.java_array
    }

    /// Whether a null array was passed in.
    pub fn is_null(&self) -> bool {
        self.java_array.is_null()
    }
}

impl<T: PrimitiveArrayElement> Deref for ScopedNullableArrayRO<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PrimitiveArrayElement> Drop for ScopedNullableArrayRO<'_, T> {
    fn drop(&mut self) {
        self.storage.release(self.env, self.java_array, jni::JNI_ABORT);
    }
}

/// Read-write view of a non-null primitive array.
///
/// The elements are always pinned; changes are copied back when the guard
/// drops. A null array throws `NullPointerException` and gives an empty view.
pub struct ScopedArrayRW<'env, T: PrimitiveArrayElement> {
    env: &'env JniEnv,
    java_array: jni::jarray,
    storage: Storage<T>,
}

impl<'env, T: PrimitiveArrayElement> ScopedArrayRW<'env, T> {
    pub fn new(env: &'env JniEnv, java_array: T::Array) -> Self {
        unsafe { Self::from_raw(env, java_array.into()) }
    }

    /// # Safety
    ///
    /// `java_array` must be null or a live array whose elements are `T`.
    pub unsafe fn from_raw(env: &'env JniEnv, java_array: jni::jarray) -> Self {
        let storage = if java_array.is_null() {
            let _ = help::throw_null_pointer_exception(env, None);
            Storage::Empty
        } else {
            let len = env.get_array_length(java_array).max(0) as usize;
            Storage::pinned(env, java_array, len)
        };
        ScopedArrayRW { env, java_array, storage }
    }

    pub fn as_slice(&self) -> &[T] {
        self.storage.as_slice()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.storage.as_mut_slice()
    }

    pub fn java_array(&self) -> jni::jarray {
        self.java_array
    }
}

impl<T: PrimitiveArrayElement> Deref for ScopedArrayRW<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: PrimitiveArrayElement> DerefMut for ScopedArrayRW<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: PrimitiveArrayElement> Drop for ScopedArrayRW<'_, T> {
    fn drop(&mut self) {
        self.storage.release(self.env, self.java_array, 0);
    }
}

pub type ScopedBooleanArrayRO<'env> = ScopedArrayRO<'env, jni::jboolean>;
pub type ScopedByteArrayRO<'env> = ScopedArrayRO<'env, jni::jbyte>;
pub type ScopedCharArrayRO<'env> = ScopedArrayRO<'env, jni::jchar>;
pub type ScopedShortArrayRO<'env> = ScopedArrayRO<'env, jni::jshort>;
pub type ScopedIntArrayRO<'env> = ScopedArrayRO<'env, jni::jint>;
pub type ScopedLongArrayRO<'env> = ScopedArrayRO<'env, jni::jlong>;
pub type ScopedFloatArrayRO<'env> = ScopedArrayRO<'env, jni::jfloat>;
pub type ScopedDoubleArrayRO<'env> = ScopedArrayRO<'env, jni::jdouble>;

pub type ScopedNullableBooleanArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jboolean>;
pub type ScopedNullableByteArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jbyte>;
pub type ScopedNullableCharArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jchar>;
pub type ScopedNullableShortArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jshort>;
pub type ScopedNullableIntArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jint>;
pub type ScopedNullableLongArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jlong>;
pub type ScopedNullableFloatArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jfloat>;
pub type ScopedNullableDoubleArrayRO<'env> = ScopedNullableArrayRO<'env, jni::jdouble>;

pub type ScopedBooleanArrayRW<'env> = ScopedArrayRW<'env, jni::jboolean>;
pub type ScopedByteArrayRW<'env> = ScopedArrayRW<'env, jni::jbyte>;
pub type ScopedCharArrayRW<'env> = ScopedArrayRW<'env, jni::jchar>;
pub type ScopedShortArrayRW<'env> = ScopedArrayRW<'env, jni::jshort>;
pub type ScopedIntArrayRW<'env> = ScopedArrayRW<'env, jni::jint>;
pub type ScopedLongArrayRW<'env> = ScopedArrayRW<'env, jni::jlong>;
pub type ScopedFloatArrayRW<'env> = ScopedArrayRW<'env, jni::jfloat>;
pub type ScopedDoubleArrayRW<'env> = ScopedArrayRW<'env, jni::jdouble>;
