mod common;

use common::{handle, with_state, MockEnv};
use nativehelper::env::{GlobalRef, ScopedLocalFrame, ScopedLocalRef};

#[test]
fn local_ref_deleted_once_on_drop() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    {
        let local = ScopedLocalRef::new(&env, handle(0x42));
        assert_eq!(local.get(), handle(0x42));
        assert!(!local.is_null());
    }
    with_state(|s| assert_eq!(s.deleted_locals, vec![handle(0x42)]));
}

#[test]
fn null_local_ref_deletes_nothing() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    {
        let local = ScopedLocalRef::null(&env);
        assert!(local.is_null());
    }
    with_state(|s| assert!(s.deleted_locals.is_empty()));
}

#[test]
fn released_local_ref_is_not_deleted() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let raw = {
        let mut local = ScopedLocalRef::new(&env, handle(0x42));
        let raw = local.release();
        assert!(local.is_null());
        raw
    };
    assert_eq!(raw, handle(0x42));
    with_state(|s| assert!(s.deleted_locals.is_empty()));
}

#[test]
fn reset_to_same_reference_keeps_it() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    {
        let mut local = ScopedLocalRef::new(&env, handle(0x42));
        local.reset(handle(0x42));
        with_state(|s| assert!(s.deleted_locals.is_empty()));
        local.reset(handle(0x43));
        with_state(|s| assert_eq!(s.deleted_locals, vec![handle(0x42)]));
    }
    with_state(|s| assert_eq!(s.deleted_locals, vec![handle(0x42), handle(0x43)]));
}

#[test]
fn global_ref_deleted_on_drop() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let global = GlobalRef::new(&env, handle(0x42)).expect("global ref");
    let raw = global.get();
    assert_eq!(raw, common::global_of(handle(0x42)));
    drop(global);
    with_state(|s| assert_eq!(s.deleted_globals, vec![raw]));
}

#[test]
fn global_ref_of_null_is_none() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    assert!(GlobalRef::new(&env, std::ptr::null_mut()).is_none());
    with_state(|s| assert!(s.new_globals.is_empty()));
}

#[test]
fn global_ref_into_raw_is_not_deleted() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let raw = GlobalRef::new(&env, handle(0x42)).expect("global ref").into_raw();
    assert!(!raw.is_null());
    with_state(|s| assert!(s.deleted_globals.is_empty()));
}

#[test]
fn local_frame_popped_after_successful_push() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    {
        let frame = ScopedLocalFrame::new(&env);
        assert!(frame.is_active());
    }
    with_state(|s| {
        assert_eq!(s.pushes, 1);
        assert_eq!(s.pops, 1);
    });
}

#[test]
fn local_frame_not_popped_after_failed_push() {
    let mut mock = MockEnv::new();
    with_state(|s| s.push_status = nativehelper::jni::JNI_ENOMEM);
    let env = mock.env();
    {
        let frame = ScopedLocalFrame::new(&env);
        assert!(!frame.is_active());
    }
    with_state(|s| {
        assert_eq!(s.pushes, 1);
        assert_eq!(s.pops, 0);
    });
}
