mod common;

use common::{handle, with_state, MockEnv, PENDING_EXCEPTION, TRACE_TEXT};
use nativehelper::error::JniHelperError;
use nativehelper::help;
use nativehelper::jni;

#[test]
fn throws_named_exception_with_message() {
    let mut mock = MockEnv::new();
    let env = mock.env();

    help::throw_exception(&env, "java/lang/IllegalArgumentException", Some("bad fd")).unwrap();

    with_state(|s| {
        assert_eq!(
            s.thrown,
            vec![("java/lang/IllegalArgumentException".to_string(), Some("bad fd".to_string()))]
        );
        assert_eq!(s.pending, Some(handle(PENDING_EXCEPTION)));
        assert_eq!(s.clears, 0);
    });
}

#[test]
fn pending_exception_is_discarded_before_throwing() {
    let mut mock = MockEnv::new();
    with_state(|s| s.pending = Some(handle(PENDING_EXCEPTION)));
    let env = mock.env();

    help::throw_runtime_exception(&env, Some("replacement")).unwrap();

    with_state(|s| {
        assert!(s.clears >= 1);
        assert_eq!(s.thrown.len(), 1);
        assert_eq!(s.thrown[0].0, "java/lang/RuntimeException");
        // The discarded exception's local ref is released.
        assert!(s.deleted_locals.contains(&handle(PENDING_EXCEPTION)));
    });
}

#[test]
fn summary_names_class_and_message() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let summary = help::exception_summary(&env, handle(PENDING_EXCEPTION));
    assert_eq!(summary, Ok("java.lang.IllegalStateException: boom".to_string()));
}

#[test]
fn missing_exception_class_is_reported() {
    let mut mock = MockEnv::new();
    with_state(|s| s.missing_classes.push("com/example/NoSuchException".to_string()));
    let env = mock.env();

    let err = help::throw_exception(&env, "com/example/NoSuchException", None).unwrap_err();

    assert!(matches!(err, JniHelperError::ClassNotFound(ref name) if name == "com/example/NoSuchException"));
    with_state(|s| {
        assert!(s.thrown.is_empty());
        // FindClass left its own exception pending.
        assert!(s.pending.is_some());
    });
}

#[test]
fn failed_throw_new_is_reported() {
    let mut mock = MockEnv::new();
    with_state(|s| s.throw_new_status = jni::JNI_ERR);
    let env = mock.env();

    let err = help::throw_exception(&env, "java/lang/IllegalStateException", Some("x")).unwrap_err();

    assert!(matches!(err, JniHelperError::ThrowFailed { .. }));
    assert_eq!(err.to_string(), "failed throwing 'java/lang/IllegalStateException' 'x'");
}

#[test]
fn null_message_is_passed_as_null() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    help::throw_null_pointer_exception(&env, None).unwrap();
    with_state(|s| assert_eq!(s.thrown[0], ("java/lang/NullPointerException".to_string(), None)));
}

#[test]
fn message_is_cut_at_first_nul() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let path = "/tmp/a\0b";

    help::throw_exception_fmt(&env, "java/io/FileNotFoundException", format_args!("open {path} failed")).unwrap();
    help::throw_runtime_exception(&env, Some("\0hidden")).unwrap();

    with_state(|s| {
        assert_eq!(
            s.thrown,
            vec![
                ("java/io/FileNotFoundException".to_string(), Some("open /tmp/a".to_string())),
                ("java/lang/RuntimeException".to_string(), Some(String::new())),
            ]
        );
        assert_eq!(s.pending, Some(handle(PENDING_EXCEPTION)));
    });
}

#[test]
fn formatted_message_is_truncated() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let long = "x".repeat(600);

    help::throw_exception_fmt(&env, "java/lang/RuntimeException", format_args!("{long}!")).unwrap();

    with_state(|s| {
        let msg = s.thrown[0].1.as_deref().unwrap();
        assert_eq!(msg.len(), help::MAX_FORMATTED_MESSAGE_LEN);
        assert!(msg.chars().all(|c| c == 'x'));
    });
}

#[test]
fn io_exception_carries_errno_text() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    help::throw_io_exception(&env, libc::EBADF).unwrap();
    with_state(|s| {
        assert_eq!(s.thrown[0].0, "java/io/IOException");
        assert_eq!(s.thrown[0].1.as_deref(), Some(help::str_error(libc::EBADF).as_str()));
    });
}

#[test]
fn no_pending_exception_has_placeholder_trace() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    assert_eq!(help::get_stack_trace(&env, None), "<no pending exception>");
}

#[test]
fn stack_trace_is_printed_through_a_string_writer() {
    let mut mock = MockEnv::new();
    let env = mock.env();

    assert_eq!(help::stack_trace(&env, handle(PENDING_EXCEPTION)).as_deref(), Some(TRACE_TEXT));

    with_state(|s| {
        assert_eq!(s.found_classes, vec!["java/io/StringWriter".to_string(), "java/io/PrintWriter".to_string()]);
        assert!(s.method_lookups.iter().any(|m| m.starts_with("printStackTrace")));
        assert_eq!(s.void_calls.len(), 1);
        assert_eq!(s.void_calls[0].0, handle(PENDING_EXCEPTION));
    });
}

#[test]
fn pending_exception_is_traced_and_rethrown() {
    let mut mock = MockEnv::new();
    with_state(|s| s.pending = Some(handle(PENDING_EXCEPTION)));
    let env = mock.env();

    assert_eq!(help::get_stack_trace(&env, None), TRACE_TEXT);

    with_state(|s| {
        assert!(s.clears >= 1);
        assert_eq!(s.void_calls[0].0, handle(PENDING_EXCEPTION));
        assert_eq!(s.pending, Some(handle(PENDING_EXCEPTION)));
    });
}

#[test]
fn trace_falls_back_to_summary() {
    let mut mock = MockEnv::new();
    with_state(|s| {
        s.pending = Some(handle(PENDING_EXCEPTION));
        s.missing_classes.push("java/io/StringWriter".to_string());
    });
    let env = mock.env();

    assert_eq!(help::get_stack_trace(&env, None), "java.lang.IllegalStateException: boom");

    with_state(|s| {
        assert!(s.void_calls.is_empty());
        assert_eq!(s.pending, Some(handle(PENDING_EXCEPTION)));
    });
}

#[test]
fn explicit_throwable_is_traced_instead_of_pending() {
    let mut mock = MockEnv::new();
    with_state(|s| s.pending = Some(handle(PENDING_EXCEPTION)));
    let env = mock.env();
    let explicit = handle(0x0e01);

    assert_eq!(help::get_stack_trace(&env, Some(explicit)), TRACE_TEXT);

    with_state(|s| {
        assert_eq!(s.void_calls.len(), 1);
        assert_eq!(s.void_calls[0].0, explicit);
        assert_eq!(s.pending, Some(handle(PENDING_EXCEPTION)));
    });
}

#[test]
fn explicit_throwable_is_traced_without_pending() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let explicit = handle(0x0e01);

    assert_eq!(help::get_stack_trace(&env, Some(explicit)), TRACE_TEXT);

    with_state(|s| {
        assert_eq!(s.clears, 0);
        assert_eq!(s.pending, None);
    });
}

#[test]
fn logging_an_exception_leaves_it_pending() {
    let mut mock = MockEnv::new();
    with_state(|s| s.pending = Some(handle(PENDING_EXCEPTION)));
    let env = mock.env();

    help::log_exception(&env, log::Level::Warn, "nativehelper::tests", None);

    with_state(|s| {
        assert_eq!(s.void_calls.len(), 1);
        assert_eq!(s.pending, Some(handle(PENDING_EXCEPTION)));
    });
}

#[test]
fn registration_uses_found_class() {
    let mut mock = MockEnv::new();
    let env = mock.env();
    let methods: [jni::JNINativeMethod; 0] = [];

    help::register_native_methods(&env, "com/example/Natives", &methods).unwrap();

    with_state(|s| {
        assert_eq!(s.found_classes, vec!["com/example/Natives".to_string()]);
        assert_eq!(s.registered.len(), 1);
        assert_eq!(s.registered[0].1, 0);
    });
}

#[test]
fn registration_reports_missing_class() {
    let mut mock = MockEnv::new();
    with_state(|s| s.missing_classes.push("com/example/Gone".to_string()));
    let env = mock.env();

    let err = help::register_native_methods(&env, "com/example/Gone", &[]).unwrap_err();
    assert!(matches!(err, JniHelperError::ClassNotFound(_)));
    with_state(|s| assert!(s.registered.is_empty()));
}

#[test]
fn registration_reports_runtime_failure() {
    let mut mock = MockEnv::new();
    with_state(|s| s.register_status = jni::JNI_ERR);
    let env = mock.env();

    let err = help::register_native_methods(&env, "com/example/Natives", &[]).unwrap_err();
    assert!(matches!(err, JniHelperError::RegisterNativesFailed { code: jni::JNI_ERR, .. }));
}
