//! Processor module tests

use super::*;
use crate::filter::{FilterRegistry, Member, builtin};
use std::sync::atomic::{AtomicUsize, Ordering};

fn capitalize_then_collapse() -> Arc<ProcessorType> {
    ProcessorType::<()>::builder("capitalize_then_collapse")
        .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
        .filter("remove_double_spaces", |_, s| {
            Ok(builtin::remove_double_spaces(s))
        })
        .build()
}

#[test]
fn test_filters_apply_in_declaration_order() {
    let processor = capitalize_then_collapse().instance(());
    assert_eq!(processor.process("a test  string").unwrap(), "A test string");
}

#[test]
fn test_demo_processor() {
    let kind = my_string_processor();
    let names: Vec<&str> = kind.filter_names().collect();
    assert_eq!(names, vec!["capitalize", "remove_double_spaces"]);
    assert_eq!(kind.members().len(), 3);

    let processor = kind.instance(());
    assert_eq!(processor.process("a test  string").unwrap(), "A test string");
}

#[test]
fn test_no_filters_is_identity() {
    let kind = ProcessorType::<()>::builder("empty")
        .method("ignored", |_, _| Ok("never".to_string()))
        .build();
    assert!(kind.filters().is_empty());

    let processor = kind.instance(());
    for input in ["", "a test  string", "  Already Mixed  ", "ünïcödé"] {
        assert_eq!(processor.process(input).unwrap(), input);
    }
}

#[test]
fn test_reversed_order_gives_different_result() {
    let trim_first = ProcessorType::<()>::builder("trim_first")
        .filter("trim", |_, s| Ok(builtin::trim(s)))
        .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
        .build()
        .instance(());
    let capitalize_first = ProcessorType::<()>::builder("capitalize_first")
        .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
        .filter("trim", |_, s| Ok(builtin::trim(s)))
        .build()
        .instance(());

    let input = "  hello world";
    assert_eq!(trim_first.process(input).unwrap(), "Hello world");
    assert_eq!(capitalize_first.process(input).unwrap(), "hello world");
}

#[test]
fn test_untagged_methods_never_run() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    let kind = ProcessorType::<()>::builder("with_method")
        .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
        .method("sabotage", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok("sabotaged".to_string())
        })
        .build();

    let processor = kind.instance(());
    assert_eq!(processor.process("plain text").unwrap(), "Plain text");
    assert_eq!(processor.process("more").unwrap(), "More");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    // Still callable directly
    assert_eq!(processor.call_method("sabotage", "x").unwrap(), "sabotaged");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_processing_is_idempotent_for_demo_filters() {
    let processor = capitalize_then_collapse().instance(());
    let once = processor.process("a test  string").unwrap();
    let twice = processor.process(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_filter_indices_follow_all_members() {
    let kind = ProcessorType::<()>::builder("indexed")
        .method("helper", |_, s| Ok(s.to_string()))
        .filter("first", |_, s| Ok(s.to_string()))
        .method("other", |_, s| Ok(s.to_string()))
        .filter("second", |_, s| Ok(s.to_string()))
        .build();

    let indices: Vec<(&str, usize)> = kind.filters().iter().map(|f| (f.name(), f.index())).collect();
    assert_eq!(indices, vec![("first", 1), ("second", 3)]);
}

#[test]
fn test_redeclaration_keeps_position() {
    let kind = ProcessorType::<()>::builder("redeclared")
        .filter("wrap", |_, s| Ok(format!("[{s}]")))
        .filter("upper", |_, s| Ok(builtin::uppercase(s)))
        .filter("wrap", |_, s| Ok(format!("<{s}>")))
        .build();

    let names: Vec<&str> = kind.filter_names().collect();
    assert_eq!(names, vec!["wrap", "upper"]);
    assert_eq!(kind.instance(()).process("x").unwrap(), "<X>");
}

#[test]
fn test_redeclaring_as_method_drops_filter() {
    let kind = ProcessorType::<()>::builder("untagged_later")
        .filter("upper", |_, s| Ok(builtin::uppercase(s)))
        .method("upper", |_, s| Ok(builtin::uppercase(s)))
        .build();

    assert!(kind.filters().is_empty());
    assert_eq!(kind.instance(()).process("quiet").unwrap(), "quiet");
}

#[test]
fn test_failure_aborts_pipeline() {
    let after = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&after);

    let kind = ProcessorType::<()>::builder("failing")
        .filter("capitalize", |_, s| Ok(builtin::capitalize(s)))
        .filter("reject", |_, s| {
            anyhow::ensure!(!s.contains("bad"), "refusing '{}'", s);
            Ok(s.to_string())
        })
        .filter("count", move |_, s| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(s.to_string())
        })
        .build();

    let processor = kind.instance(());
    let err = processor.process("a bad input").unwrap_err();
    match &err {
        FilterError::Invocation {
            processor,
            filter,
            index,
            ..
        } => {
            assert_eq!(processor, "failing");
            assert_eq!(filter, "reject");
            assert_eq!(*index, 1);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.filter_name(), Some("reject"));
    assert!(err.to_string().contains("refusing 'A bad input'"));
    assert_eq!(after.load(Ordering::SeqCst), 0);

    assert_eq!(processor.process("fine").unwrap(), "Fine");
    assert_eq!(after.load(Ordering::SeqCst), 1);
}

#[test]
fn test_panicking_filter_becomes_invocation_error() {
    let kind = ProcessorType::<()>::builder("panicky")
        .filter("explode", |_, _| panic!("mis-declared filter"))
        .build();

    let err = kind.instance(()).process("anything").unwrap_err();
    assert_eq!(err.filter_name(), Some("explode"));
    assert!(err.to_string().contains("mis-declared filter"));
}

#[test]
fn test_process_bytes_rejects_invalid_utf8() {
    let processor = capitalize_then_collapse().instance(());
    assert_eq!(
        processor.process_bytes(b"a test  string").unwrap(),
        "A test string"
    );

    let err = processor.process_bytes(&[0x66, 0xff, 0x6f]).unwrap_err();
    assert!(matches!(err, FilterError::InvalidInput(_)));
}

#[test]
fn test_call_unknown_method() {
    let processor = my_string_processor().instance(());
    assert_eq!(processor.call_method("shout", "hey").unwrap(), "HEY!");

    let err = processor.call_method("whisper", "hey").unwrap_err();
    assert!(matches!(err, FilterError::UnknownMethod { .. }));
}

#[test]
fn test_filters_receive_instance_state() {
    struct Prefix(String);

    let kind = ProcessorType::<Prefix>::builder("prefixed")
        .filter("prefix", |state: &Prefix, s: &str| Ok(format!("{}{}", state.0, s)))
        .filter("upper", |_, s| Ok(builtin::uppercase(s)))
        .build();

    let a = kind.instance(Prefix("a:".to_string()));
    let b = kind.instance(Prefix("b:".to_string()));
    assert_eq!(a.process("x").unwrap(), "A:X");
    assert_eq!(b.process("x").unwrap(), "B:X");
    assert!(Arc::ptr_eq(a.kind(), b.kind()));
}

#[test]
fn test_collection_happens_once_per_type() {
    let kind = capitalize_then_collapse();
    let first = kind.instance(());
    let second = kind.instance(());
    assert!(std::ptr::eq(
        first.kind().filters().as_ptr(),
        second.kind().filters().as_ptr()
    ));
}

#[test]
fn test_from_registry() {
    let registry = FilterRegistry::builtin();
    let kind = ProcessorTypeBuilder::<()>::from_registry(
        "configured",
        ["trim", "collapse_whitespace", "capitalize"],
        &registry,
    )
    .unwrap()
    .build();

    let processor = kind.instance(());
    assert_eq!(processor.process("  hELLO   there  ").unwrap(), "Hello there");
}

#[test]
fn test_from_registry_unknown_filter() {
    let registry = FilterRegistry::builtin();
    let err = ProcessorTypeBuilder::<()>::from_registry("broken", ["trim", "reverse"], &registry)
        .err()
        .unwrap();

    match err {
        FilterError::UnknownFilter { processor, name } => {
            assert_eq!(processor, "broken");
            assert_eq!(name, "reverse");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_members_builder() {
    let kind = ProcessorType::<()>::builder("bulk")
        .members(vec![
            Member::<()>::filter("lower", |_, s: &str| Ok(builtin::lowercase(s))),
            Member::<()>::method("noop", |_, s: &str| Ok(s.to_string())),
        ])
        .build();

    assert_eq!(kind.members().len(), 2);
    assert!(kind.members()[0].is_filter());
    assert!(!kind.members()[1].is_filter());
    assert_eq!(kind.instance(()).process("LOUD").unwrap(), "loud");
}

#[test]
fn test_concurrent_instances_agree() {
    let kind = capitalize_then_collapse();
    let inputs: Vec<String> = (0..64).map(|i| format!("line  {i}  of  input")).collect();
    let expected: Vec<String> = inputs
        .iter()
        .map(|s| kind.instance(()).process(s).unwrap())
        .collect();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let processor = kind.instance(());
            let inputs = inputs.clone();
            std::thread::spawn(move || {
                inputs
                    .iter()
                    .map(|s| processor.process(s).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_process_all_preserves_order() {
    let processor = capitalize_then_collapse().instance(());
    let inputs = vec!["first  one", "second  one", "third"];
    assert_eq!(
        processor.process_all(&inputs).unwrap(),
        vec!["First one", "Second one", "Third"]
    );

    let empty: Vec<&str> = Vec::new();
    assert!(processor.process_all(&empty).unwrap().is_empty());
}

#[test]
fn test_process_all_fails_on_any_error() {
    let kind = ProcessorType::<()>::builder("strict")
        .filter("non_empty", |_, s| {
            anyhow::ensure!(!s.is_empty(), "empty line");
            Ok(s.to_string())
        })
        .build();

    let err = kind.instance(()).process_all(&["ok", "", "fine"]).unwrap_err();
    assert_eq!(err.filter_name(), Some("non_empty"));
}

#[test]
fn test_from_registry_keeps_repeated_filters() {
    let registry = FilterRegistry::builtin();
    let kind = ProcessorTypeBuilder::<()>::from_registry(
        "squeeze",
        ["remove_double_spaces", "trim", "remove_double_spaces"],
        &registry,
    )
    .unwrap()
    .build();

    let slots: Vec<(&str, usize)> = kind.filters().iter().map(|f| (f.name(), f.index())).collect();
    assert_eq!(
        slots,
        vec![("remove_double_spaces", 0), ("trim", 1), ("remove_double_spaces", 2)]
    );
    assert_eq!(kind.instance(()).process(" a    b ").unwrap(), "a b");
}

#[test]
fn test_process_all_reports_earliest_failing_input() {
    let kind = ProcessorType::<()>::builder("numbers_only")
        .filter("digits", |_, s| {
            anyhow::ensure!(s.chars().all(|c| c.is_ascii_digit()), "not a number: {}", s);
            Ok(s.to_string())
        })
        .build();
    let processor = kind.instance(());

    let mut inputs: Vec<String> = (0..512).map(|i| i.to_string()).collect();
    inputs[3] = "first-bad".to_string();
    inputs[500] = "later-bad".to_string();

    for _ in 0..8 {
        let err = processor.process_all(&inputs).unwrap_err();
        assert!(err.to_string().contains("not a number: first-bad"), "{err}");
    }
}
