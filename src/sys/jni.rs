// nativehelper/src/sys/jni.rs
//
// The standard JNI ABI from the JDK's jni.h, transcribed slot for slot.
// Type aliases, constants, struct layouts and function-table order are the
// header's, so these tables can be handed to and read from any conforming VM.
//
// The one departure from jni.h: every function-table slot is an
// `Option<unsafe extern "system" fn ...>`, which has the same size and ABI as
// the bare pointer and makes an all-zero table a valid value. Hand-built
// tables fill only the slots they need; `jni_call!` panics with the slot name
// on an empty one.
//
// Slots added by newer JDKs sit at the end of the table:
//   - JDK 9:  GetModule (index 233)
//   - JDK 19: IsVirtualThread (index 234)
//   - JDK 24: GetStringUTFLengthAsLong (index 235)

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use std::ffi::c_void;
use std::os::raw::c_char;

// =============================================================================
// Primitive Types
// =============================================================================

pub type jint = i32;
pub type jlong = i64;
pub type jbyte = i8;
pub type jboolean = u8;
pub type jchar = u16;
pub type jshort = i16;
pub type jfloat = f32;
pub type jdouble = f64;
pub type jsize = jint;

// =============================================================================
// Reference Types (opaque pointers)
// =============================================================================

pub type jobject = *mut c_void;
pub type jclass = jobject;
pub type jstring = jobject;
pub type jarray = jobject;
pub type jthread = jobject;
pub type jthrowable = jobject;
pub type jweak = jobject;

// Typed arrays (all just aliases to jobject in FFI)
pub type jobjectArray = jarray;
pub type jbooleanArray = jarray;
pub type jbyteArray = jarray;
pub type jcharArray = jarray;
pub type jshortArray = jarray;
pub type jintArray = jarray;
pub type jlongArray = jarray;
pub type jfloatArray = jarray;
pub type jdoubleArray = jarray;

// =============================================================================
// ID Types (opaque identifiers)
// =============================================================================

pub type jmethodID = *mut c_void;
pub type jfieldID = *mut c_void;

// =============================================================================
// jvalue Union
// =============================================================================

#[repr(C)]
#[derive(Copy, Clone)]
pub union jvalue {
    pub z: jboolean,
    pub b: jbyte,
    pub c: jchar,
    pub s: jshort,
    pub i: jint,
    pub j: jlong,
    pub f: jfloat,
    pub d: jdouble,
    pub l: jobject,
}

// =============================================================================
// Constants
// =============================================================================

pub const JNI_OK: jint = 0;
pub const JNI_ERR: jint = -1;
pub const JNI_EDETACHED: jint = -2;
pub const JNI_EVERSION: jint = -3;
pub const JNI_ENOMEM: jint = -4;
pub const JNI_EEXIST: jint = -5;
pub const JNI_EINVAL: jint = -6;

pub const JNI_TRUE: jboolean = 1;
pub const JNI_FALSE: jboolean = 0;

/// Release mode: copy back, keep the buffer.
pub const JNI_COMMIT: jint = 1;
/// Release mode: free the buffer without copying back.
pub const JNI_ABORT: jint = 2;

pub const JNI_VERSION_1_1: jint = 0x00010001;
pub const JNI_VERSION_1_2: jint = 0x00010002;
pub const JNI_VERSION_1_4: jint = 0x00010004;
pub const JNI_VERSION_1_6: jint = 0x00010006;
pub const JNI_VERSION_1_8: jint = 0x00010008;
pub const JNI_VERSION_9: jint = 0x00090000;
pub const JNI_VERSION_10: jint = 0x000a0000;
pub const JNI_VERSION_19: jint = 0x00130000;
pub const JNI_VERSION_20: jint = 0x00140000;
pub const JNI_VERSION_21: jint = 0x00150000;
pub const JNI_VERSION_24: jint = 0x00180000;

// =============================================================================
// jobjectRefType enum (JNI 1.6+)
// =============================================================================

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum jobjectRefType {
    JNIInvalidRefType = 0,
    JNILocalRefType = 1,
    JNIGlobalRefType = 2,
    JNIWeakGlobalRefType = 3,
}

// =============================================================================
// JNINativeMethod for RegisterNatives
// =============================================================================

/// One entry of a `RegisterNatives` table.
///
/// `name` and `signature` must point at NUL-terminated modified UTF-8 that
/// outlives the registration call. The `native_method!` family builds these
/// from string literals.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct JNINativeMethod {
    pub name: *const c_char,
    pub signature: *const c_char,
    pub fnPtr: *mut c_void,
}

// =============================================================================
// va_list placeholder
// =============================================================================

// va_list is platform-specific and rarely used from Rust.
// Use the "A" variants (e.g., CallObjectMethodA) which take jvalue arrays.
pub type va_list = *mut c_void;

// =============================================================================
// JNINativeInterface_ - The JNI function table (vtable)
// =============================================================================
//
// This is the heart of JNI. JNIEnv is a pointer to a pointer to this struct.
// 236 function pointers total (4 reserved + 232 functions).
// Order must exactly match the JDK header!

#[repr(C)]
pub struct JNINativeInterface_ {
    // Reserved slots (0-3)
    pub reserved0: *mut c_void,
    pub reserved1: *mut c_void,
    pub reserved2: *mut c_void,
    pub reserved3: *mut c_void,

    // 4: GetVersion
    pub GetVersion: Option<unsafe extern "system" fn(env: *mut JNIEnv) -> jint>,

    // 5-6: Class operations
    pub DefineClass: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        name: *const c_char,
        loader: jobject,
        buf: *const jbyte,
        len: jsize,
    ) -> jclass>,
    pub FindClass: Option<unsafe extern "system" fn(env: *mut JNIEnv, name: *const c_char) -> jclass>,

    // 7-9: Reflection
    pub FromReflectedMethod:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, method: jobject) -> jmethodID>,
    pub FromReflectedField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, field: jobject) -> jfieldID>,
    pub ToReflectedMethod: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        cls: jclass,
        methodID: jmethodID,
        isStatic: jboolean,
    ) -> jobject>,

    // 10-11: Class hierarchy
    pub GetSuperclass: Option<unsafe extern "system" fn(env: *mut JNIEnv, sub: jclass) -> jclass>,
    pub IsAssignableFrom:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, sub: jclass, sup: jclass) -> jboolean>,

    // 12: More reflection
    pub ToReflectedField: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        cls: jclass,
        fieldID: jfieldID,
        isStatic: jboolean,
    ) -> jobject>,

    // 13-18: Exception handling
    pub Throw: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jthrowable) -> jint>,
    pub ThrowNew:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, msg: *const c_char) -> jint>,
    pub ExceptionOccurred: Option<unsafe extern "system" fn(env: *mut JNIEnv) -> jthrowable>,
    pub ExceptionDescribe: Option<unsafe extern "system" fn(env: *mut JNIEnv)>,
    pub ExceptionClear: Option<unsafe extern "system" fn(env: *mut JNIEnv)>,
    pub FatalError: Option<unsafe extern "system" fn(env: *mut JNIEnv, msg: *const c_char)>,

    // 19-20: Local frame
    pub PushLocalFrame: Option<unsafe extern "system" fn(env: *mut JNIEnv, capacity: jint) -> jint>,
    pub PopLocalFrame: Option<unsafe extern "system" fn(env: *mut JNIEnv, result: jobject) -> jobject>,

    // 21-26: References
    pub NewGlobalRef: Option<unsafe extern "system" fn(env: *mut JNIEnv, lobj: jobject) -> jobject>,
    pub DeleteGlobalRef: Option<unsafe extern "system" fn(env: *mut JNIEnv, gref: jobject)>,
    pub DeleteLocalRef: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject)>,
    pub IsSameObject:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj1: jobject, obj2: jobject) -> jboolean>,
    pub NewLocalRef: Option<unsafe extern "system" fn(env: *mut JNIEnv, ref_: jobject) -> jobject>,
    pub EnsureLocalCapacity: Option<unsafe extern "system" fn(env: *mut JNIEnv, capacity: jint) -> jint>,

    // 27-30: Object creation
    pub AllocObject: Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass) -> jobject>,
    pub NewObject:
        *mut c_void /* variadic - use NewObjectA instead */,
    pub NewObjectV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jobject>,
    pub NewObjectA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jobject>,

    // 31-32: Object class operations
    pub GetObjectClass: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jclass>,
    pub IsInstanceOf:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, clazz: jclass) -> jboolean>,

    // 33: GetMethodID
    pub GetMethodID: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jmethodID>,

    // 34-63: Call<Type>Method variants (Object, Boolean, Byte, Char, Short, Int, Long, Float, Double, Void)
    // Each type has 3 variants: varargs, V (va_list), A (jvalue array)
    pub CallObjectMethod:
        *mut c_void /* variadic - use CallObjectMethodA instead */,
    pub CallObjectMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jobject>,
    pub CallObjectMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jobject>,

    pub CallBooleanMethod:
        *mut c_void /* variadic - use CallBooleanMethodA instead */,
    pub CallBooleanMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jboolean>,
    pub CallBooleanMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jboolean>,

    pub CallByteMethod:
        *mut c_void /* variadic - use CallByteMethodA instead */,
    pub CallByteMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jbyte>,
    pub CallByteMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jbyte>,

    pub CallCharMethod:
        *mut c_void /* variadic - use CallCharMethodA instead */,
    pub CallCharMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jchar>,
    pub CallCharMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jchar>,

    pub CallShortMethod:
        *mut c_void /* variadic - use CallShortMethodA instead */,
    pub CallShortMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jshort>,
    pub CallShortMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jshort>,

    pub CallIntMethod:
        *mut c_void /* variadic - use CallIntMethodA instead */,
    pub CallIntMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jint>,
    pub CallIntMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jint>,

    pub CallLongMethod:
        *mut c_void /* variadic - use CallLongMethodA instead */,
    pub CallLongMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jlong>,
    pub CallLongMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jlong>,

    pub CallFloatMethod:
        *mut c_void /* variadic - use CallFloatMethodA instead */,
    pub CallFloatMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jfloat>,
    pub CallFloatMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jfloat>,

    pub CallDoubleMethod:
        *mut c_void /* variadic - use CallDoubleMethodA instead */,
    pub CallDoubleMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    ) -> jdouble>,
    pub CallDoubleMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jdouble>,

    pub CallVoidMethod:
        *mut c_void /* variadic - use CallVoidMethodA instead */,
    pub CallVoidMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: va_list,
    )>,
    pub CallVoidMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        methodID: jmethodID,
        args: *const jvalue,
    )>,

    // 64-93: CallNonvirtual<Type>Method variants
    pub CallNonvirtualObjectMethod: *mut c_void, /* variadic - use CallNonvirtualObjectMethodA */
    pub CallNonvirtualObjectMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jobject>,
    pub CallNonvirtualObjectMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jobject>,

    pub CallNonvirtualBooleanMethod: *mut c_void, /* variadic - use CallNonvirtualBooleanMethodA */
    pub CallNonvirtualBooleanMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jboolean>,
    pub CallNonvirtualBooleanMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jboolean>,

    pub CallNonvirtualByteMethod: *mut c_void, /* variadic - use CallNonvirtualByteMethodA */
    pub CallNonvirtualByteMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jbyte>,
    pub CallNonvirtualByteMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jbyte>,

    pub CallNonvirtualCharMethod: *mut c_void, /* variadic - use CallNonvirtualCharMethodA */
    pub CallNonvirtualCharMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jchar>,
    pub CallNonvirtualCharMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jchar>,

    pub CallNonvirtualShortMethod: *mut c_void, /* variadic - use CallNonvirtualShortMethodA */
    pub CallNonvirtualShortMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jshort>,
    pub CallNonvirtualShortMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jshort>,

    pub CallNonvirtualIntMethod: *mut c_void, /* variadic - use CallNonvirtualIntMethodA */
    pub CallNonvirtualIntMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jint>,
    pub CallNonvirtualIntMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jint>,

    pub CallNonvirtualLongMethod: *mut c_void, /* variadic - use CallNonvirtualLongMethodA */
    pub CallNonvirtualLongMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jlong>,
    pub CallNonvirtualLongMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jlong>,

    pub CallNonvirtualFloatMethod: *mut c_void, /* variadic - use CallNonvirtualFloatMethodA */
    pub CallNonvirtualFloatMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jfloat>,
    pub CallNonvirtualFloatMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jfloat>,

    pub CallNonvirtualDoubleMethod: *mut c_void, /* variadic - use CallNonvirtualDoubleMethodA */
    pub CallNonvirtualDoubleMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jdouble>,
    pub CallNonvirtualDoubleMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jdouble>,

    pub CallNonvirtualVoidMethod: *mut c_void, /* variadic - use CallNonvirtualVoidMethodA */
    pub CallNonvirtualVoidMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    )>,
    pub CallNonvirtualVoidMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        obj: jobject,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    )>,

    // 94: GetFieldID
    pub GetFieldID: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jfieldID>,

    // 95-103: Get<Type>Field
    pub GetObjectField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jobject>,
    pub GetBooleanField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jboolean>,
    pub GetByteField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jbyte>,
    pub GetCharField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jchar>,
    pub GetShortField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jshort>,
    pub GetIntField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jint>,
    pub GetLongField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jlong>,
    pub GetFloatField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jfloat>,
    pub GetDoubleField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID) -> jdouble>,

    // 104-112: Set<Type>Field
    pub SetObjectField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jobject)>,
    pub SetBooleanField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jboolean)>,
    pub SetByteField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jbyte)>,
    pub SetCharField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jchar)>,
    pub SetShortField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jshort)>,
    pub SetIntField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jint)>,
    pub SetLongField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jlong)>,
    pub SetFloatField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jfloat)>,
    pub SetDoubleField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject, fieldID: jfieldID, val: jdouble)>,

    // 113: GetStaticMethodID
    pub GetStaticMethodID: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jmethodID>,

    // 114-143: CallStatic<Type>Method variants
    pub CallStaticObjectMethod:
        *mut c_void /* variadic - use NewObjectA instead */,
    pub CallStaticObjectMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jobject>,
    pub CallStaticObjectMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jobject>,

    pub CallStaticBooleanMethod:
        *mut c_void /* variadic - use CallStaticBooleanMethodA */,
    pub CallStaticBooleanMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jboolean>,
    pub CallStaticBooleanMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jboolean>,

    pub CallStaticByteMethod:
        *mut c_void /* variadic - use CallStaticByteMethodA */,
    pub CallStaticByteMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jbyte>,
    pub CallStaticByteMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jbyte>,

    pub CallStaticCharMethod:
        *mut c_void /* variadic - use CallStaticCharMethodA */,
    pub CallStaticCharMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jchar>,
    pub CallStaticCharMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jchar>,

    pub CallStaticShortMethod:
        *mut c_void /* variadic - use CallStaticShortMethodA */,
    pub CallStaticShortMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jshort>,
    pub CallStaticShortMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jshort>,

    pub CallStaticIntMethod:
        *mut c_void /* variadic - use CallStaticIntMethodA */,
    pub CallStaticIntMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jint>,
    pub CallStaticIntMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jint>,

    pub CallStaticLongMethod:
        *mut c_void /* variadic - use CallStaticLongMethodA */,
    pub CallStaticLongMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jlong>,
    pub CallStaticLongMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jlong>,

    pub CallStaticFloatMethod:
        *mut c_void /* variadic - use CallStaticFloatMethodA */,
    pub CallStaticFloatMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jfloat>,
    pub CallStaticFloatMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jfloat>,

    pub CallStaticDoubleMethod:
        *mut c_void /* variadic - use CallStaticDoubleMethodA */,
    pub CallStaticDoubleMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: va_list,
    ) -> jdouble>,
    pub CallStaticDoubleMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    ) -> jdouble>,

    pub CallStaticVoidMethod:
        *mut c_void /* variadic - use CallStaticVoidMethodA */,
    pub CallStaticVoidMethodV: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        cls: jclass,
        methodID: jmethodID,
        args: va_list,
    )>,
    pub CallStaticVoidMethodA: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        cls: jclass,
        methodID: jmethodID,
        args: *const jvalue,
    )>,

    // 144: GetStaticFieldID
    pub GetStaticFieldID: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        name: *const c_char,
        sig: *const c_char,
    ) -> jfieldID>,

    // 145-153: GetStatic<Type>Field
    pub GetStaticObjectField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jobject>,
    pub GetStaticBooleanField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jboolean>,
    pub GetStaticByteField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jbyte>,
    pub GetStaticCharField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jchar>,
    pub GetStaticShortField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jshort>,
    pub GetStaticIntField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jint>,
    pub GetStaticLongField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jlong>,
    pub GetStaticFloatField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jfloat>,
    pub GetStaticDoubleField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID) -> jdouble>,

    // 154-162: SetStatic<Type>Field
    pub SetStaticObjectField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jobject)>,
    pub SetStaticBooleanField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jboolean)>,
    pub SetStaticByteField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jbyte)>,
    pub SetStaticCharField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jchar)>,
    pub SetStaticShortField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jshort)>,
    pub SetStaticIntField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jint)>,
    pub SetStaticLongField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jlong)>,
    pub SetStaticFloatField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jfloat)>,
    pub SetStaticDoubleField:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass, fieldID: jfieldID, value: jdouble)>,

    // 163-166: String operations
    pub NewString:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, unicode: *const jchar, len: jsize) -> jstring>,
    pub GetStringLength: Option<unsafe extern "system" fn(env: *mut JNIEnv, str: jstring) -> jsize>,
    pub GetStringChars: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        str: jstring,
        isCopy: *mut jboolean,
    ) -> *const jchar>,
    pub ReleaseStringChars:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, str: jstring, chars: *const jchar)>,

    // 167-170: UTF String operations
    pub NewStringUTF: Option<unsafe extern "system" fn(env: *mut JNIEnv, utf: *const c_char) -> jstring>,
    pub GetStringUTFLength: Option<unsafe extern "system" fn(env: *mut JNIEnv, str: jstring) -> jsize>,
    pub GetStringUTFChars: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        str: jstring,
        isCopy: *mut jboolean,
    ) -> *const c_char>,
    pub ReleaseStringUTFChars:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, str: jstring, chars: *const c_char)>,

    // 171: GetArrayLength
    pub GetArrayLength: Option<unsafe extern "system" fn(env: *mut JNIEnv, array: jarray) -> jsize>,

    // 172-174: Object array operations
    pub NewObjectArray: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        len: jsize,
        clazz: jclass,
        init: jobject,
    ) -> jobjectArray>,
    pub GetObjectArrayElement:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, array: jobjectArray, index: jsize) -> jobject>,
    pub SetObjectArrayElement: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jobjectArray,
        index: jsize,
        val: jobject,
    )>,

    // 175-182: New<Type>Array
    pub NewBooleanArray:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jbooleanArray>,
    pub NewByteArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jbyteArray>,
    pub NewCharArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jcharArray>,
    pub NewShortArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jshortArray>,
    pub NewIntArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jintArray>,
    pub NewLongArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jlongArray>,
    pub NewFloatArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jfloatArray>,
    pub NewDoubleArray: Option<unsafe extern "system" fn(env: *mut JNIEnv, len: jsize) -> jdoubleArray>,

    // 183-190: Get<Type>ArrayElements
    pub GetBooleanArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbooleanArray,
        isCopy: *mut jboolean,
    ) -> *mut jboolean>,
    pub GetByteArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbyteArray,
        isCopy: *mut jboolean,
    ) -> *mut jbyte>,
    pub GetCharArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jcharArray,
        isCopy: *mut jboolean,
    ) -> *mut jchar>,
    pub GetShortArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jshortArray,
        isCopy: *mut jboolean,
    ) -> *mut jshort>,
    pub GetIntArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jintArray,
        isCopy: *mut jboolean,
    ) -> *mut jint>,
    pub GetLongArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jlongArray,
        isCopy: *mut jboolean,
    ) -> *mut jlong>,
    pub GetFloatArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jfloatArray,
        isCopy: *mut jboolean,
    ) -> *mut jfloat>,
    pub GetDoubleArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jdoubleArray,
        isCopy: *mut jboolean,
    ) -> *mut jdouble>,

    // 191-198: Release<Type>ArrayElements
    pub ReleaseBooleanArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbooleanArray,
        elems: *mut jboolean,
        mode: jint,
    )>,
    pub ReleaseByteArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbyteArray,
        elems: *mut jbyte,
        mode: jint,
    )>,
    pub ReleaseCharArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jcharArray,
        elems: *mut jchar,
        mode: jint,
    )>,
    pub ReleaseShortArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jshortArray,
        elems: *mut jshort,
        mode: jint,
    )>,
    pub ReleaseIntArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jintArray,
        elems: *mut jint,
        mode: jint,
    )>,
    pub ReleaseLongArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jlongArray,
        elems: *mut jlong,
        mode: jint,
    )>,
    pub ReleaseFloatArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jfloatArray,
        elems: *mut jfloat,
        mode: jint,
    )>,
    pub ReleaseDoubleArrayElements: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jdoubleArray,
        elems: *mut jdouble,
        mode: jint,
    )>,

    // 199-206: Get<Type>ArrayRegion
    pub GetBooleanArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbooleanArray,
        start: jsize,
        len: jsize,
        buf: *mut jboolean,
    )>,
    pub GetByteArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbyteArray,
        start: jsize,
        len: jsize,
        buf: *mut jbyte,
    )>,
    pub GetCharArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jcharArray,
        start: jsize,
        len: jsize,
        buf: *mut jchar,
    )>,
    pub GetShortArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jshortArray,
        start: jsize,
        len: jsize,
        buf: *mut jshort,
    )>,
    pub GetIntArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jintArray,
        start: jsize,
        len: jsize,
        buf: *mut jint,
    )>,
    pub GetLongArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jlongArray,
        start: jsize,
        len: jsize,
        buf: *mut jlong,
    )>,
    pub GetFloatArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jfloatArray,
        start: jsize,
        len: jsize,
        buf: *mut jfloat,
    )>,
    pub GetDoubleArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jdoubleArray,
        start: jsize,
        len: jsize,
        buf: *mut jdouble,
    )>,

    // 207-214: Set<Type>ArrayRegion
    pub SetBooleanArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbooleanArray,
        start: jsize,
        len: jsize,
        buf: *const jboolean,
    )>,
    pub SetByteArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jbyteArray,
        start: jsize,
        len: jsize,
        buf: *const jbyte,
    )>,
    pub SetCharArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jcharArray,
        start: jsize,
        len: jsize,
        buf: *const jchar,
    )>,
    pub SetShortArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jshortArray,
        start: jsize,
        len: jsize,
        buf: *const jshort,
    )>,
    pub SetIntArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jintArray,
        start: jsize,
        len: jsize,
        buf: *const jint,
    )>,
    pub SetLongArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jlongArray,
        start: jsize,
        len: jsize,
        buf: *const jlong,
    )>,
    pub SetFloatArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jfloatArray,
        start: jsize,
        len: jsize,
        buf: *const jfloat,
    )>,
    pub SetDoubleArrayRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jdoubleArray,
        start: jsize,
        len: jsize,
        buf: *const jdouble,
    )>,

    // 215-216: Native method registration
    pub RegisterNatives: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        clazz: jclass,
        methods: *const JNINativeMethod,
        nMethods: jint,
    ) -> jint>,
    pub UnregisterNatives: Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass) -> jint>,

    // 217-218: Monitor operations
    pub MonitorEnter: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jint>,
    pub MonitorExit: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jint>,

    // 219: GetJavaVM
    pub GetJavaVM: Option<unsafe extern "system" fn(env: *mut JNIEnv, vm: *mut *mut JavaVM) -> jint>,

    // 220-221: String region operations (JNI 1.2)
    pub GetStringRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        str: jstring,
        start: jsize,
        len: jsize,
        buf: *mut jchar,
    )>,
    pub GetStringUTFRegion: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        str: jstring,
        start: jsize,
        len: jsize,
        buf: *mut c_char,
    )>,

    // 222-223: Critical array access (JNI 1.2)
    pub GetPrimitiveArrayCritical: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        array: jarray,
        isCopy: *mut jboolean,
    ) -> *mut c_void>,
    pub ReleasePrimitiveArrayCritical:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, array: jarray, carray: *mut c_void, mode: jint)>,

    // 224-225: Critical string access (JNI 1.2)
    pub GetStringCritical: Option<unsafe extern "system" fn(
        env: *mut JNIEnv,
        string: jstring,
        isCopy: *mut jboolean,
    ) -> *const jchar>,
    pub ReleaseStringCritical:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, string: jstring, cstring: *const jchar)>,

    // 226-227: Weak global references (JNI 1.2)
    pub NewWeakGlobalRef: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jweak>,
    pub DeleteWeakGlobalRef: Option<unsafe extern "system" fn(env: *mut JNIEnv, ref_: jweak)>,

    // 228: Exception check (JNI 1.2)
    pub ExceptionCheck: Option<unsafe extern "system" fn(env: *mut JNIEnv) -> jboolean>,

    // 229-231: Direct buffer support (JNI 1.4)
    pub NewDirectByteBuffer:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, address: *mut c_void, capacity: jlong) -> jobject>,
    pub GetDirectBufferAddress:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, buf: jobject) -> *mut c_void>,
    pub GetDirectBufferCapacity: Option<unsafe extern "system" fn(env: *mut JNIEnv, buf: jobject) -> jlong>,

    // 232: Object reference type (JNI 1.6)
    pub GetObjectRefType:
        Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jobjectRefType>,

    // 233: Module support (JNI 9)
    pub GetModule: Option<unsafe extern "system" fn(env: *mut JNIEnv, clazz: jclass) -> jobject>,

    // 234: Virtual thread support (JNI 19/21)
    pub IsVirtualThread: Option<unsafe extern "system" fn(env: *mut JNIEnv, obj: jobject) -> jboolean>,

    // 235: String UTF length as long (JNI 24/25)
    pub GetStringUTFLengthAsLong: Option<unsafe extern "system" fn(env: *mut JNIEnv, str: jstring) -> jlong>,
}

// =============================================================================
// JNIEnv - Pointer to the JNI function table
// =============================================================================
//
// IMPORTANT: In C JNI, JNIEnv is directly a pointer to the vtable:
//   typedef const struct JNINativeInterface_ *JNIEnv;
//
// The JNIEnv_ wrapper struct only exists in C++ for convenience methods.
// Since Rust uses C ABI (extern "system"), we use the C definition.
// =============================================================================

/// JNIEnv is directly the vtable pointer (C ABI definition)
pub type JNIEnv = *const JNINativeInterface_;

impl JNINativeInterface_ {
    /// A function table with every slot empty.
    pub fn empty() -> Self {
        // SAFETY: every field is a raw pointer or an `Option` of a function
        // pointer; all-zero bytes are null / `None` for both.
        unsafe { std::mem::zeroed() }
    }
}

// =============================================================================
// JNIInvokeInterface_ - The JavaVM function table
// =============================================================================

#[repr(C)]
pub struct JNIInvokeInterface_ {
    pub reserved0: *mut c_void,
    pub reserved1: *mut c_void,
    pub reserved2: *mut c_void,

    pub DestroyJavaVM: Option<unsafe extern "system" fn(vm: *mut JavaVM) -> jint>,
    pub AttachCurrentThread:
        Option<unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, args: *mut c_void) -> jint>,
    pub DetachCurrentThread: Option<unsafe extern "system" fn(vm: *mut JavaVM) -> jint>,
    pub GetEnv:
        Option<unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, version: jint) -> jint>,
    pub AttachCurrentThreadAsDaemon:
        Option<unsafe extern "system" fn(vm: *mut JavaVM, penv: *mut *mut c_void, args: *mut c_void) -> jint>,
}

// =============================================================================
// JavaVM - Pointer to the JavaVM function table
// =============================================================================
//
// IMPORTANT: In C JNI, JavaVM is directly a pointer to the vtable:
//   typedef const struct JNIInvokeInterface_ *JavaVM;
//
// The JavaVM_ wrapper struct only exists in C++ for convenience methods.
// Since Rust uses C ABI (extern "system"), we use the C definition.
// =============================================================================

/// JavaVM is directly the vtable pointer (C ABI definition)
pub type JavaVM = *const JNIInvokeInterface_;

impl JNIInvokeInterface_ {
    /// An invocation table with every slot empty.
    pub fn empty() -> Self {
        // SAFETY: see `JNINativeInterface_::empty`.
        unsafe { std::mem::zeroed() }
    }
}

// =============================================================================
// JavaVMInitArgs and JavaVMOption for JNI_CreateJavaVM
// =============================================================================

#[repr(C)]
pub struct JavaVMOption {
    pub optionString: *mut c_char,
    pub extraInfo: *mut c_void,
}

#[repr(C)]
pub struct JavaVMInitArgs {
    pub version: jint,
    pub nOptions: jint,
    pub options: *mut JavaVMOption,
    pub ignoreUnrecognized: jboolean,
}

#[repr(C)]
pub struct JavaVMAttachArgs {
    pub version: jint,
    pub name: *mut c_char,
    pub group: jobject,
}

// =============================================================================
// Invocation API entry points (exported by the VM library)
// =============================================================================

pub type JNI_GetDefaultJavaVMInitArgs = unsafe extern "system" fn(args: *mut c_void) -> jint;

pub type JNI_CreateJavaVM = unsafe extern "system" fn(
    pvm: *mut *mut JavaVM,
    penv: *mut *mut JNIEnv,
    args: *mut JavaVMInitArgs,
) -> jint;

pub type JNI_GetCreatedJavaVMs =
    unsafe extern "system" fn(vm_buf: *mut *mut JavaVM, buf_len: jsize, n_vms: *mut jsize) -> jint;

// =============================================================================
// Table dispatch
// =============================================================================

/// Calls a JNI function through the env's function table.
///
/// env_ptr: *mut JNIEnv = *mut *const JNINativeInterface_
/// Usage: jni_call!(env, FindClass, b"java/lang/String\0".as_ptr() as *const c_char)
///
/// Panics if the slot is empty; a VM-provided table never has empty slots.
#[macro_export]
macro_rules! jni_call {
    ($env:expr, $func:ident $(, $args:expr)*) => {{
        let env_ptr = $env;
        match (**env_ptr).$func {
            Some(f) => f(env_ptr $(, $args)*),
            None => panic!(concat!("JNI function table has no ", stringify!($func))),
        }
    }};
}

/// Calls a JavaVM function through the invocation interface table.
///
/// vm_ptr: *mut JavaVM = *mut *const JNIInvokeInterface_
#[macro_export]
macro_rules! jvm_call {
    ($vm:expr, $func:ident $(, $args:expr)*) => {{
        let vm_ptr = $vm;
        match (**vm_ptr).$func {
            Some(f) => f(vm_ptr $(, $args)*),
            None => panic!(concat!("JavaVM function table has no ", stringify!($func))),
        }
    }};
}
