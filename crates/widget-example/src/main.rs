//! A small worked example of an armature-based CLI.
//!
//! ```text
//! widgets widget list [--prefix PREFIX]
//! widgets widget make <name> [--count N] [--dry-run/--no-dry-run] [--force]
//! widgets stats
//! ```

use armature::{
    invoke, run_main, ArgSpec, Cli, Context, HandlerResult, Log, Namespace, Outcome, Overrides,
    ReportableError, SetupError,
};

const KNOWN_WIDGETS: [&str; 3] = ["anvil", "bracket", "cog"];

fn build_cli() -> Result<Cli, SetupError> {
    Cli::builder("widgets")
        .about("manage the widget inventory")
        .group(&["widget"], "inspect and create widgets")?
        .command(
            &["widget", "list"],
            "list known widgets",
            vec![
                ArgSpec::log_level(),
                ArgSpec::string("prefix")
                    .default_value("")
                    .help("only list names starting with this"),
            ],
            widget_list,
        )?
        .command(
            &["widget", "make"],
            "press a new widget",
            vec![
                ArgSpec::log_level(),
                ArgSpec::dry_run(),
                ArgSpec::force(),
                ArgSpec::positional("name"),
                ArgSpec::int("count")
                    .default_value(1i64)
                    .help("how many to press"),
            ],
            widget_make,
        )?
        .command(
            &["stats"],
            "inventory statistics",
            vec![ArgSpec::log_level()],
            stats,
        )?
        .build()
}

fn widget_list(ns: &Namespace) -> HandlerResult {
    let ctx = Context::from_args(ns, Some("widgets"), Overrides::new());
    let prefix = ctx.get_str("prefix").unwrap_or("");

    let mut found = 0;
    for name in KNOWN_WIDGETS.iter().filter(|n| n.starts_with(prefix)) {
        println!("{name}");
        found += 1;
    }
    ctx.debug(&format!("{found} widgets listed"));
    Ok(Outcome::from(found > 0))
}

fn widget_make(ns: &Namespace) -> HandlerResult {
    let ctx = Context::from_args(ns, Some("widgets"), Overrides::new());
    let name = ctx.require_str("name")?;
    let count = ctx.get_i64("count").unwrap_or(1);

    if KNOWN_WIDGETS.contains(&name) && !ctx.get_bool("force").unwrap_or(false) {
        return Err(
            ReportableError::new(format!("widget \"{name}\" already exists (use --force)")).into(),
        );
    }
    if ctx.get_bool("dry_run").unwrap_or(true) {
        ctx.info(&format!("dry run: would press {count} \"{name}\""));
        return Ok(Outcome::Success);
    }

    ctx.in_span(&["make", name], || {
        for pressed in 1..=count {
            ctx.debug(&format!("pressing \"{name}\" {pressed}/{count}"));
        }
        Ok::<_, anyhow::Error>(())
    })?;
    Ok(Outcome::Success)
}

fn stats(ns: &Namespace) -> HandlerResult {
    let ctx = Context::from_args(ns, Some("widgets"), Overrides::new());
    let span = ctx.span(&["stats"]);
    println!("known widgets: {}", KNOWN_WIDGETS.len());
    if let Some(cwd) = ctx.get_path("cwd") {
        ctx.debug(&format!("counted from {}", cwd.display()));
    }
    span.complete();
    Ok(Outcome::Success)
}

fn main() {
    run_main(|cwd, argv| {
        let cli = build_cli()?;
        let namespace = cli.parse(argv);
        invoke(&namespace, Overrides::new().set("cwd", cwd.to_path_buf()))
    })
}
