#![cfg(feature = "invocation")]

use std::cell::{Cell, RefCell};
use std::ffi::CStr;
use std::path::Path;

use nativehelper::invocation::{InvocationError, JavaVmBuilder, JniInvocation};
use nativehelper::jni;

thread_local! {
    static OPTIONS: RefCell<Vec<String>> = RefCell::new(Vec::new());
    static DESTROYS: Cell<usize> = Cell::new(0);
}

unsafe extern "system" fn destroy_java_vm(_vm: *mut jni::JavaVM) -> jni::jint {
    DESTROYS.with(|d| d.set(d.get() + 1));
    jni::JNI_OK
}

unsafe extern "system" fn fake_create_java_vm(
    pvm: *mut *mut jni::JavaVM,
    penv: *mut *mut jni::JNIEnv,
    args: *mut jni::JavaVMInitArgs,
) -> jni::jint {
    let args = &*args;
    let options = (0..args.nOptions as usize)
        .map(|i| {
            let option = &*args.options.add(i);
            CStr::from_ptr(option.optionString).to_string_lossy().into_owned()
        })
        .collect();
    OPTIONS.with(|o| *o.borrow_mut() = options);

    let mut invoke = jni::JNIInvokeInterface_::empty();
    invoke.DestroyJavaVM = Some(destroy_java_vm);
    let invoke: &'static jni::JNIInvokeInterface_ = Box::leak(Box::new(invoke));
    let vm: &'static mut jni::JavaVM = Box::leak(Box::new(invoke as *const _));

    let native: &'static jni::JNINativeInterface_ = Box::leak(Box::new(jni::JNINativeInterface_::empty()));
    let env: &'static mut jni::JNIEnv = Box::leak(Box::new(native as *const _));

    *pvm = vm as *mut jni::JavaVM;
    *penv = env as *mut jni::JNIEnv;
    jni::JNI_OK
}

unsafe extern "system" fn failing_create_java_vm(
    _pvm: *mut *mut jni::JavaVM,
    _penv: *mut *mut jni::JNIEnv,
    _args: *mut jni::JavaVMInitArgs,
) -> jni::jint {
    jni::JNI_EINVAL
}

#[test]
fn builder_passes_options_and_drop_destroys() {
    let builder = JavaVmBuilder::new(jni::JNI_VERSION_1_8)
        .option("-Xmx64m")
        .unwrap()
        .options(["-Dfoo=bar", "-Xcheck:jni"])
        .unwrap();
    assert_eq!(builder.option_strings().count(), 3);

    let vm = unsafe { builder.create_with(fake_create_java_vm) }.unwrap();
    assert!(!vm.java_vm_ptr().is_null());
    assert!(!vm.creator_env_ptr().is_null());
    assert!(vm.invocation().is_none());
    OPTIONS.with(|o| assert_eq!(*o.borrow(), vec!["-Xmx64m", "-Dfoo=bar", "-Xcheck:jni"]));

    drop(vm);
    DESTROYS.with(|d| assert_eq!(d.get(), 1));
}

#[test]
fn explicit_destroy_runs_once() {
    let vm = unsafe { JavaVmBuilder::new(jni::JNI_VERSION_1_8).create_with(fake_create_java_vm) }.unwrap();
    vm.destroy().unwrap();
    DESTROYS.with(|d| assert_eq!(d.get(), 1));
}

#[test]
fn create_failure_reports_status() {
    let err = unsafe { JavaVmBuilder::new(jni::JNI_VERSION_1_8).create_with(failing_create_java_vm) }.unwrap_err();
    assert!(matches!(err, InvocationError::Jni(jni::JNI_EINVAL)));
}

#[test]
fn option_with_nul_is_rejected() {
    let err = JavaVmBuilder::new(jni::JNI_VERSION_1_8).option("-Dx=\0").err().unwrap();
    assert!(matches!(err, InvocationError::Nul(_)));
}

#[test]
fn missing_library_fails_and_frees_the_slot() {
    let missing = Path::new("/definitely/not/here/libjvm.so");
    for _ in 0..2 {
        let err = JniInvocation::init(Some(missing)).err().unwrap();
        assert!(matches!(err, InvocationError::Load { .. }), "{err}");
    }
}

#[test]
fn explicit_library_is_selected_as_is() {
    let requested = Path::new("/opt/vm/lib/server/libjvm.so");
    assert_eq!(JniInvocation::get_library(Some(requested)).unwrap(), requested);
}
