//! Integration tests for handler invocation and the override overlay.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use armature::{invoke, ArgSpec, Cli, Outcome, Overrides, ReportableError, Value};

#[test]
fn test_invoke_returns_handler_outcome() {
    let cli = Cli::builder("app")
        .command(
            &["run"],
            "run the job",
            vec![ArgSpec::int("count").default_value(0i64)],
            |ns| {
                let count = ns.get("count").and_then(Value::as_i64).unwrap_or(0);
                Ok(Outcome::Code(count as i32))
            },
        )
        .unwrap()
        .build()
        .unwrap();

    let ns = cli.try_parse(["run", "--count", "7"]).unwrap();
    let outcome = invoke(&ns, Overrides::new()).unwrap();
    assert_eq!(outcome.exit_code(), 7);
}

#[test]
fn test_overrides_replace_parsed_values() {
    let cli = Cli::builder("app")
        .command(
            &["run"],
            "run the job",
            vec![ArgSpec::string("name").default_value("parsed")],
            |ns| {
                assert_eq!(ns.get("name"), Some(&Value::Str("injected".into())));
                Ok(Outcome::Success)
            },
        )
        .unwrap()
        .build()
        .unwrap();

    let ns = cli.try_parse(["run"]).unwrap();
    invoke(&ns, Overrides::new().set("name", "injected")).unwrap();
    // The original namespace is left untouched.
    assert_eq!(ns.get("name"), Some(&Value::Str("parsed".into())));
}

#[test]
fn test_unknown_override_keys_pass_through() {
    let cli = Cli::builder("app")
        .command(&["run"], "run the job", vec![], |ns| {
            assert_eq!(
                ns.get("cwd"),
                Some(&Value::Path(PathBuf::from("/work/here")))
            );
            Ok(Outcome::Success)
        })
        .unwrap()
        .build()
        .unwrap();

    let ns = cli.try_parse(["run"]).unwrap();
    invoke(&ns, Overrides::new().set("cwd", PathBuf::from("/work/here"))).unwrap();
}

#[test]
fn test_handler_runs_once_per_invoke() {
    let calls = Rc::new(Cell::new(0u32));
    let seen = calls.clone();
    let cli = Cli::builder("app")
        .command(&["run"], "run the job", vec![], move |_ns| {
            seen.set(seen.get() + 1);
            Ok(Outcome::Success)
        })
        .unwrap()
        .build()
        .unwrap();

    let ns = cli.try_parse(["run"]).unwrap();
    invoke(&ns, Overrides::new()).unwrap();
    invoke(&ns, Overrides::new().set("extra", 1i64)).unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_handler_errors_propagate_with_exit_codes() {
    let cli = Cli::builder("app")
        .command(&["run"], "run the job", vec![], |_ns| {
            Err(ReportableError::with_exit_code("disk full", 13).into())
        })
        .unwrap()
        .build()
        .unwrap();

    let ns = cli.try_parse(["run"]).unwrap();
    let err = invoke(&ns, Overrides::new()).unwrap_err();
    let reportable = err.downcast_ref::<ReportableError>().unwrap();
    assert_eq!(reportable.message(), "disk full");
    assert_eq!(reportable.exit_code(), 13);
}
