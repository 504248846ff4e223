//! Integration tests for context construction and the startup audit log.

use std::path::PathBuf;

use armature::log::capture;
use armature::{ArgSpec, Cli, Context, Log, LogLevel, Namespace, Outcome, Overrides};
use serial_test::serial;

fn build_cli() -> Cli {
    Cli::builder("app")
        .command(
            &["job"],
            "run a job",
            vec![
                ArgSpec::log_level(),
                ArgSpec::dry_run(),
                ArgSpec::string("name"),
                ArgSpec::string_list("tag"),
            ],
            |_ns| Ok(Outcome::Success),
        )
        .unwrap()
        .build()
        .unwrap()
}

fn parse(cli: &Cli, argv: &[&str]) -> Namespace {
    cli.try_parse(argv.iter().map(|s| s.to_string())).unwrap()
}

/// The `key = value` payload of each captured line, with styling and the
/// timestamp/name prefix stripped.
fn payloads(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| {
            let plain = console::strip_ansi_codes(line);
            plain.rsplit("] ").next().unwrap().to_string()
        })
        .collect()
}

#[test]
#[serial]
fn test_audit_logs_every_value_sorted() {
    let cli = build_cli();
    let ns = parse(&cli, &["job", "--name", "etl", "--tag", "a", "--tag", "b"]);

    let lines = capture::capture(|| {
        let overrides = Overrides::new().set("cwd", PathBuf::from("/work"));
        Context::from_args(&ns, Some("app"), overrides);
    });

    assert_eq!(
        payloads(&lines),
        vec![
            "cwd = /work",
            "dry_run = true",
            "log_level = info",
            "name = etl",
            "tag = [a, b]",
        ]
    );
    for line in &lines {
        assert!(line.contains("[app]"), "missing context name in: {line}");
        assert!(line.contains("[INFO]"), "missing level label in: {line}");
    }
}

#[test]
#[serial]
fn test_audit_is_deterministic_across_runs() {
    let cli = build_cli();
    let ns = parse(&cli, &["job", "--name", "etl"]);

    let first = capture::capture(|| {
        Context::from_args(&ns, Some("app"), Overrides::new());
    });
    let second = capture::capture(|| {
        Context::from_args(&ns, Some("app"), Overrides::new());
    });
    assert_eq!(payloads(&first), payloads(&second));
}

#[test]
#[serial]
fn test_log_level_is_consumed_into_the_logger() {
    let cli = build_cli();
    let ns = parse(&cli, &["job", "--log", "debug"]);

    let lines = capture::capture(|| {
        let ctx = Context::from_args(&ns, Some("app"), Overrides::new());
        assert_eq!(ctx.level(), LogLevel::Debug);
        // Logged during the audit, but not a context value afterwards.
        assert_eq!(ctx.get("log_level"), None);
        ctx.debug("fine-grained detail");
    });

    assert!(lines.iter().any(|l| l.contains("log_level = debug")));
    assert!(lines.iter().any(|l| l.contains("fine-grained detail")));
}

#[test]
#[serial]
fn test_quiet_levels_suppress_the_audit() {
    let cli = build_cli();
    let ns = parse(&cli, &["job", "--log", "error"]);

    let lines = capture::capture(|| {
        let ctx = Context::from_args(&ns, Some("app"), Overrides::new());
        ctx.error("boom");
    });

    // The audit runs at info, below the error threshold.
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("boom"));
}

#[test]
#[serial]
fn test_override_value_wins_in_the_audit() {
    let cli = build_cli();
    let ns = parse(&cli, &["job", "--name", "parsed"]);

    let lines = capture::capture(|| {
        let ctx = Context::from_args(&ns, None, Overrides::new().set("name", "injected"));
        assert_eq!(ctx.get_str("name"), Some("injected"));
    });

    assert!(lines.iter().any(|l| l.contains("name = injected")));
    assert!(!lines.iter().any(|l| l.contains("name = parsed")));
    // Anonymous contexts log under the fallback name.
    assert!(lines[0].contains("[main]"));
}
