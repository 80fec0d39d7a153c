mod common;

use common::{handle, with_state, MockEnv};
use nativehelper::array::{
    ScopedIntArrayRO, ScopedIntArrayRW, ScopedNullableIntArrayRO, COPY_THRESHOLD,
};
use nativehelper::jni;
use nativehelper::types::JIntArray;

fn int_array() -> JIntArray {
    JIntArray::from_raw(handle(0x77))
}

#[test]
fn short_array_is_copied_and_not_released() {
    let mut mock = MockEnv::new();
    with_state(|s| s.array_len = 3);
    let env = mock.env();
    {
        let values = ScopedIntArrayRO::new(&env, int_array());
        assert_eq!(&*values, &[0, 1, 2]);
        assert_eq!(values.java_array(), handle(0x77));
    }
    with_state(|s| {
        assert_eq!(s.region_reads, 1);
        assert_eq!(s.pins, 0);
        assert!(s.releases.is_empty());
    });
}

#[test]
fn array_at_threshold_is_still_copied() {
    let mut mock = MockEnv::new();
    with_state(|s| s.array_len = COPY_THRESHOLD as jni::jsize);
    let env = mock.env();
    {
        let values = ScopedIntArrayRO::new(&env, int_array());
        assert_eq!(values.len(), COPY_THRESHOLD);
        assert_eq!(values[COPY_THRESHOLD - 1], COPY_THRESHOLD as jni::jint - 1);
    }
    with_state(|s| {
        assert_eq!(s.pins, 0);
        assert!(s.releases.is_empty());
    });
}

#[test]
fn long_array_is_pinned_and_released_with_abort() {
    let mut mock = MockEnv::new();
    with_state(|s| s.array_len = 2000);
    let env = mock.env();
    {
        let values = ScopedIntArrayRO::new(&env, int_array());
        assert_eq!(values.len(), 2000);
        assert_eq!(values[1999], 1999);
    }
    with_state(|s| {
        assert_eq!(s.region_reads, 0);
        assert_eq!(s.pins, 1);
        assert_eq!(s.releases, vec![jni::JNI_ABORT]);
    });
}

#[test]
fn read_write_array_commits_changes() {
    let mut mock = MockEnv::new();
    with_state(|s| s.array_len = 4);
    let env = mock.env();
    {
        let mut values = ScopedIntArrayRW::new(&env, int_array());
        values[2] = 99;
    }
    with_state(|s| {
        assert_eq!(s.pins, 1);
        assert_eq!(s.pinned, vec![0, 1, 99, 3]);
        assert_eq!(s.releases, vec![0]);
    });
}

#[test]
fn null_array_throws_null_pointer_exception() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    {
        let values = ScopedIntArrayRO::new(&env, JIntArray::null());
        assert!(values.is_empty());
    }
    {
        let values = ScopedIntArrayRW::new(&env, JIntArray::null());
        assert!(values.is_empty());
    }
    with_state(|s| {
        assert_eq!(s.thrown.len(), 2);
        assert!(s
            .thrown
            .iter()
            .all(|(class, msg)| class == "java/lang/NullPointerException" && msg.is_none()));
        assert!(s.releases.is_empty());
    });
}

#[test]
fn nullable_array_accepts_null() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    {
        let values = ScopedNullableIntArrayRO::new(&env, JIntArray::null());
        assert!(values.is_null());
        assert!(values.is_empty());
    }
    with_state(|s| {
        assert!(s.thrown.is_empty());
        assert!(s.releases.is_empty());
    });
}

#[test]
fn nullable_array_reads_non_null() {
    let mut mock = MockEnv::new();
    with_state(|s| s.array_len = 2);
    let env = mock.env();
    let values = ScopedNullableIntArrayRO::new(&env, int_array());
    assert!(!values.is_null());
    assert_eq!(values.as_slice(), &[0, 1]);
}

#[test]
fn raw_array_handle_is_accepted_unchecked() {
    let mut mock = MockEnv::new();
    with_state(|s| s.array_len = 3);
    let env = mock.env();
    {
        let values = unsafe { ScopedIntArrayRO::from_raw(&env, handle(0x77)) };
        assert_eq!(&*values, &[0, 1, 2]);
        let mut values = unsafe { ScopedIntArrayRW::from_raw(&env, handle(0x77)) };
        values[0] = 5;
        let nullable = unsafe { ScopedNullableIntArrayRO::from_raw(&env, std::ptr::null_mut()) };
        assert!(nullable.is_null());
    }
    with_state(|s| {
        assert_eq!(s.region_reads, 1);
        assert_eq!(s.pinned, vec![5, 1, 2]);
        assert_eq!(s.releases, vec![0]);
        assert!(s.thrown.is_empty());
    });
}
