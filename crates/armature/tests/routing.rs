//! Integration tests for command-tree routing and parsing.

use armature::{ArgSpec, Cli, Outcome, Value};
use clap::error::ErrorKind;

fn build_cli() -> Cli {
    Cli::builder("app")
        .about("test fixture")
        .group(&["db"], "database maintenance")
        .unwrap()
        .group(&["db", "schema"], "schema tools")
        .unwrap()
        .command(
            &["db", "schema", "dump"],
            "dump the schema",
            vec![
                ArgSpec::string("output").help("output file"),
                ArgSpec::log_level(),
            ],
            |_ns| Ok(Outcome::Success),
        )
        .unwrap()
        .command(
            &["db", "migrate"],
            "run pending migrations",
            vec![ArgSpec::dry_run(), ArgSpec::force()],
            |_ns| Ok(Outcome::Success),
        )
        .unwrap()
        .command(
            &["greet"],
            "greet someone",
            vec![ArgSpec::positional("name")],
            |_ns| Ok(Outcome::Success),
        )
        .unwrap()
        .build()
        .unwrap()
}

#[test]
fn test_deep_path_is_recorded_in_order() {
    let cli = build_cli();
    let ns = cli
        .try_parse(["db", "schema", "dump", "--output", "schema.sql"])
        .unwrap();
    assert_eq!(ns.command(), ["db", "schema", "dump"]);
}

#[test]
fn test_values_hold_only_declared_dests() {
    let cli = build_cli();
    let ns = cli
        .try_parse(["db", "schema", "dump", "--output", "schema.sql"])
        .unwrap();

    let keys: Vec<&str> = ns.values().keys().map(String::as_str).collect();
    assert_eq!(keys, ["log_level", "output"]);
    assert_eq!(ns.get("output"), Some(&Value::Str("schema.sql".into())));
    // Defaults materialize even when the flag is absent.
    assert_eq!(ns.get("log_level"), Some(&Value::Str("info".into())));
}

#[test]
fn test_empty_argv_is_a_usage_error() {
    let cli = build_cli();
    let err = cli.try_parse(Vec::<String>::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingSubcommand);
}

#[test]
fn test_unknown_subcommand_is_a_usage_error() {
    let cli = build_cli();
    let err = cli.try_parse(["frobnicate"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
}

#[test]
fn test_missing_required_argument_is_a_usage_error() {
    let cli = build_cli();
    let err = cli.try_parse(["greet"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_invalid_choice_lists_all_choices() {
    let cli = build_cli();
    let err = cli
        .try_parse(["db", "schema", "dump", "--log", "loud"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    let rendered = err.to_string();
    for choice in ["debug", "info", "warning", "error", "fatal"] {
        assert!(rendered.contains(choice), "missing choice {choice} in: {rendered}");
    }
}

#[test]
fn test_toggle_defaults_and_negation() {
    let cli = build_cli();

    let ns = cli.try_parse(["db", "migrate"]).unwrap();
    assert_eq!(ns.get("dry_run"), Some(&Value::Bool(true)));
    assert_eq!(ns.get("force"), Some(&Value::Bool(false)));

    let ns = cli
        .try_parse(["db", "migrate", "--no-dry-run", "--force"])
        .unwrap();
    assert_eq!(ns.get("dry_run"), Some(&Value::Bool(false)));
    assert_eq!(ns.get("force"), Some(&Value::Bool(true)));
}

#[test]
fn test_enum_argument_round_trip() {
    let cli = build_cli();
    let ns = cli
        .try_parse(["db", "schema", "dump", "--log", "warning"])
        .unwrap();
    assert_eq!(ns.get("log_level"), Some(&Value::Str("warning".into())));
}

#[test]
fn test_positional_argument() {
    let cli = build_cli();
    let ns = cli.try_parse(["greet", "ada"]).unwrap();
    assert_eq!(ns.command(), ["greet"]);
    assert_eq!(ns.get("name"), Some(&Value::Str("ada".into())));
}
