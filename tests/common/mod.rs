//! A scripted JNI function table for tests.
//!
//! Only the slots the helpers call are filled. Every call is recorded in
//! per-thread state, so tests running in parallel don't see each other.

#![allow(dead_code)]

use std::cell::RefCell;
use std::ffi::{c_void, CStr};
use std::os::raw::c_char;
use std::ptr;

use nativehelper::env::JniEnv;
use nativehelper::jni;

pub const PENDING_EXCEPTION: usize = 0x0e00;
pub const OBJECT_CLASS: usize = 0x0c00;
pub const CLASS_NAME_STRING: usize = 0x0500;
pub const MESSAGE_STRING: usize = 0x0501;
pub const TRACE_STRING: usize = 0x0502;
pub const TRACE_TEXT: &str = "java.lang.IllegalStateException: boom\n\tat Foo.bar(Foo.java:1)\n";
pub const NEW_OBJECT: usize = 0x0a00;
pub const REFERENT: usize = 0x0b00;
const GLOBAL_BIT: usize = 0x10_0000;

pub fn handle(n: usize) -> jni::jobject {
    n as *mut c_void
}

pub fn global_of(local: jni::jobject) -> jni::jobject {
    handle(local as usize | GLOBAL_BIT)
}

/// Everything the fake runtime has been asked to do, and how it answers.
#[derive(Default)]
pub struct State {
    pub classes: Vec<String>,
    pub missing_classes: Vec<String>,
    pub found_classes: Vec<String>,
    pub field_lookups: Vec<String>,
    pub method_lookups: Vec<String>,
    pub deleted_locals: Vec<jni::jobject>,
    pub new_globals: Vec<jni::jobject>,
    pub deleted_globals: Vec<jni::jobject>,
    pub pending: Option<jni::jthrowable>,
    pub clears: usize,
    pub thrown: Vec<(String, Option<String>)>,
    pub throw_new_status: jni::jint,
    pub push_status: jni::jint,
    pub pushes: usize,
    pub pops: usize,
    pub array_len: jni::jsize,
    pub region_reads: usize,
    pub pinned: Vec<jni::jint>,
    pub pins: usize,
    pub releases: Vec<jni::jint>,
    pub registered: Vec<(jni::jclass, usize)>,
    pub register_status: jni::jint,
    pub int_fields: Vec<(jni::jobject, jni::jfieldID, jni::jint)>,
    pub void_calls: Vec<(jni::jobject, jni::jmethodID)>,
    pub on_descriptor_lookup: Option<fn(*mut jni::JNIEnv)>,
}

thread_local! {
    static STATE: RefCell<State> = RefCell::new(State::default());
}

pub fn with_state<R>(f: impl FnOnce(&mut State) -> R) -> R {
    STATE.with(|s| f(&mut s.borrow_mut()))
}

pub fn reset_state() {
    with_state(|s| *s = State::default());
}

/// Owns a function table and the `JNIEnv` pointer that refers to it.
pub struct MockEnv {
    _table: Box<jni::JNINativeInterface_>,
    env: Box<jni::JNIEnv>,
}

impl MockEnv {
    pub fn new() -> Self {
        reset_state();
        let mut table = Box::new(jni::JNINativeInterface_::empty());
        table.FindClass = Some(find_class);
        table.NewGlobalRef = Some(new_global_ref);
        table.DeleteGlobalRef = Some(delete_global_ref);
        table.DeleteLocalRef = Some(delete_local_ref);
        table.ExceptionCheck = Some(exception_check);
        table.ExceptionOccurred = Some(exception_occurred);
        table.ExceptionClear = Some(exception_clear);
        table.Throw = Some(throw);
        table.ThrowNew = Some(throw_new);
        table.PushLocalFrame = Some(push_local_frame);
        table.PopLocalFrame = Some(pop_local_frame);
        table.GetObjectClass = Some(get_object_class);
        table.GetMethodID = Some(get_method_id);
        table.GetFieldID = Some(get_field_id);
        table.CallObjectMethodA = Some(call_object_method_a);
        table.CallVoidMethodA = Some(call_void_method_a);
        table.NewObjectA = Some(new_object_a);
        table.GetStringUTFChars = Some(get_string_utf_chars);
        table.ReleaseStringUTFChars = Some(release_string_utf_chars);
        table.GetArrayLength = Some(get_array_length);
        table.GetIntArrayRegion = Some(get_int_array_region);
        table.GetIntArrayElements = Some(get_int_array_elements);
        table.ReleaseIntArrayElements = Some(release_int_array_elements);
        table.RegisterNatives = Some(register_natives);
        table.GetIntField = Some(get_int_field);
        table.SetIntField = Some(set_int_field);
        let env = Box::new(&*table as *const jni::JNINativeInterface_);
        MockEnv { _table: table, env }
    }

    pub fn raw(&mut self) -> *mut jni::JNIEnv {
        &mut *self.env as *mut jni::JNIEnv
    }

    pub fn env(&mut self) -> JniEnv {
        unsafe { JniEnv::from_raw(self.raw()) }
    }
}

fn class_handle(s: &mut State, name: &str) -> jni::jclass {
    let index = match s.classes.iter().position(|c| c == name) {
        Some(i) => i,
        None => {
            s.classes.push(name.to_string());
            s.classes.len() - 1
        }
    };
    handle(0x0100 + index)
}

fn class_name_of(s: &State, class: jni::jclass) -> String {
    let raw = class as usize & !GLOBAL_BIT;
    raw.checked_sub(0x0100)
        .and_then(|i| s.classes.get(i))
        .cloned()
        .unwrap_or_else(|| format!("<class {raw:#x}>"))
}

unsafe fn c_string(p: *const c_char) -> String {
    CStr::from_ptr(p).to_string_lossy().into_owned()
}

unsafe extern "system" fn find_class(_env: *mut jni::JNIEnv, name: *const c_char) -> jni::jclass {
    let name = c_string(name);
    with_state(|s| {
        s.found_classes.push(name.clone());
        if s.missing_classes.contains(&name) {
            s.pending = Some(handle(PENDING_EXCEPTION));
            ptr::null_mut()
        } else {
            class_handle(s, &name)
        }
    })
}

unsafe extern "system" fn new_global_ref(_env: *mut jni::JNIEnv, obj: jni::jobject) -> jni::jobject {
    let global = global_of(obj);
    with_state(|s| s.new_globals.push(global));
    global
}

unsafe extern "system" fn delete_global_ref(_env: *mut jni::JNIEnv, obj: jni::jobject) {
    with_state(|s| s.deleted_globals.push(obj));
}

unsafe extern "system" fn delete_local_ref(_env: *mut jni::JNIEnv, obj: jni::jobject) {
    with_state(|s| s.deleted_locals.push(obj));
}

unsafe extern "system" fn exception_check(_env: *mut jni::JNIEnv) -> jni::jboolean {
    with_state(|s| if s.pending.is_some() { jni::JNI_TRUE } else { jni::JNI_FALSE })
}

unsafe extern "system" fn exception_occurred(_env: *mut jni::JNIEnv) -> jni::jthrowable {
    with_state(|s| s.pending.unwrap_or(ptr::null_mut()))
}

unsafe extern "system" fn exception_clear(_env: *mut jni::JNIEnv) {
    with_state(|s| {
        s.pending = None;
        s.clears += 1;
    });
}

unsafe extern "system" fn throw(_env: *mut jni::JNIEnv, obj: jni::jthrowable) -> jni::jint {
    with_state(|s| s.pending = Some(obj));
    jni::JNI_OK
}

unsafe extern "system" fn throw_new(_env: *mut jni::JNIEnv, class: jni::jclass, msg: *const c_char) -> jni::jint {
    let msg = if msg.is_null() { None } else { Some(c_string(msg)) };
    with_state(|s| {
        let name = class_name_of(s, class);
        s.thrown.push((name, msg));
        s.pending = Some(handle(PENDING_EXCEPTION));
        s.throw_new_status
    })
}

unsafe extern "system" fn push_local_frame(_env: *mut jni::JNIEnv, _capacity: jni::jint) -> jni::jint {
    with_state(|s| {
        s.pushes += 1;
        s.push_status
    })
}

unsafe extern "system" fn pop_local_frame(_env: *mut jni::JNIEnv, result: jni::jobject) -> jni::jobject {
    with_state(|s| s.pops += 1);
    result
}

unsafe extern "system" fn get_object_class(_env: *mut jni::JNIEnv, _obj: jni::jobject) -> jni::jclass {
    handle(OBJECT_CLASS)
}

unsafe extern "system" fn get_method_id(
    _env: *mut jni::JNIEnv,
    _class: jni::jclass,
    name: *const c_char,
    _sig: *const c_char,
) -> jni::jmethodID {
    let name = c_string(name);
    let id = match name.as_str() {
        "getName" => 0x3001,
        "getMessage" => 0x3002,
        "<init>" => 0x3003,
        "get" => 0x3004,
        "toString" => 0x3005,
        "printStackTrace" => 0x3006,
        _ => 0x3fff,
    };
    with_state(|s| s.method_lookups.push(name));
    handle(id)
}

unsafe extern "system" fn get_field_id(
    env: *mut jni::JNIEnv,
    _class: jni::jclass,
    name: *const c_char,
    _sig: *const c_char,
) -> jni::jfieldID {
    let name = c_string(name);
    let id = match name.as_str() {
        "descriptor" => 0x2001,
        "ownerId" => 0x2002,
        _ => 0x2fff,
    };
    let hook = with_state(|s| {
        s.field_lookups.push(name.clone());
        if name == "descriptor" { s.on_descriptor_lookup.take() } else { None }
    });
    if let Some(hook) = hook {
        hook(env);
    }
    handle(id)
}

unsafe extern "system" fn call_object_method_a(
    _env: *mut jni::JNIEnv,
    _obj: jni::jobject,
    method: jni::jmethodID,
    _args: *const jni::jvalue,
) -> jni::jobject {
    match method as usize {
        0x3001 => handle(CLASS_NAME_STRING),
        0x3002 => handle(MESSAGE_STRING),
        0x3004 => handle(REFERENT),
        0x3005 => handle(TRACE_STRING),
        _ => ptr::null_mut(),
    }
}

unsafe extern "system" fn call_void_method_a(
    _env: *mut jni::JNIEnv,
    obj: jni::jobject,
    method: jni::jmethodID,
    _args: *const jni::jvalue,
) {
    with_state(|s| s.void_calls.push((obj, method)));
}

unsafe extern "system" fn new_object_a(
    _env: *mut jni::JNIEnv,
    _class: jni::jclass,
    _ctor: jni::jmethodID,
    _args: *const jni::jvalue,
) -> jni::jobject {
    handle(NEW_OBJECT)
}

unsafe extern "system" fn get_string_utf_chars(
    _env: *mut jni::JNIEnv,
    s: jni::jstring,
    _is_copy: *mut jni::jboolean,
) -> *const c_char {
    let text: &'static [u8] = match s as usize {
        CLASS_NAME_STRING => b"java.lang.IllegalStateException\0",
        MESSAGE_STRING => b"boom\0",
        TRACE_STRING => b"java.lang.IllegalStateException: boom\n\tat Foo.bar(Foo.java:1)\n\0",
        _ => return ptr::null(),
    };
    text.as_ptr() as *const c_char
}

unsafe extern "system" fn release_string_utf_chars(_env: *mut jni::JNIEnv, _s: jni::jstring, _chars: *const c_char) {}

unsafe extern "system" fn get_array_length(_env: *mut jni::JNIEnv, _array: jni::jarray) -> jni::jsize {
    with_state(|s| s.array_len)
}

unsafe extern "system" fn get_int_array_region(
    _env: *mut jni::JNIEnv,
    _array: jni::jintArray,
    start: jni::jsize,
    len: jni::jsize,
    buf: *mut jni::jint,
) {
    with_state(|s| s.region_reads += 1);
    for i in 0..len {
        *buf.add(i as usize) = start + i;
    }
}

unsafe extern "system" fn get_int_array_elements(
    _env: *mut jni::JNIEnv,
    _array: jni::jintArray,
    _is_copy: *mut jni::jboolean,
) -> *mut jni::jint {
    with_state(|s| {
        s.pins += 1;
        s.pinned = (0..s.array_len).collect();
        s.pinned.as_mut_ptr()
    })
}

unsafe extern "system" fn release_int_array_elements(
    _env: *mut jni::JNIEnv,
    _array: jni::jintArray,
    _elems: *mut jni::jint,
    mode: jni::jint,
) {
    with_state(|s| s.releases.push(mode));
}

unsafe extern "system" fn register_natives(
    _env: *mut jni::JNIEnv,
    class: jni::jclass,
    _methods: *const jni::JNINativeMethod,
    count: jni::jint,
) -> jni::jint {
    with_state(|s| {
        s.registered.push((class, count as usize));
        s.register_status
    })
}

unsafe extern "system" fn get_int_field(_env: *mut jni::JNIEnv, _obj: jni::jobject, _field: jni::jfieldID) -> jni::jint {
    42
}

unsafe extern "system" fn set_int_field(
    _env: *mut jni::JNIEnv,
    obj: jni::jobject,
    field: jni::jfieldID,
    value: jni::jint,
) {
    with_state(|s| s.int_fields.push((obj, field, value)));
}
