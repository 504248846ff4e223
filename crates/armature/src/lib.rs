//! Scaffolding for command-line tools.
//!
//! `armature` provides the pieces a CLI needs beyond raw argument parsing:
//!
//! - **Routing**: a declarative tree of nested subcommands, each leaf bound
//!   to a handler ([`Cli`], [`CliBuilder`], [`ArgSpec`]). Parsing delegates
//!   to clap and produces a [`Namespace`] carrying the matched command
//!   path and every argument as a typed [`Value`].
//! - **Contexts**: [`Context::from_args`] turns a namespace (plus optional
//!   caller [`Overrides`]) into an immutable per-invocation bundle that
//!   owns a scoped [`Logger`] and logs every resolved value up front.
//! - **Dispatch**: [`invoke`] calls the matched handler; its [`Outcome`]
//!   maps onto the process exit code, and [`run_main`] applies the
//!   top-level error boundary ([`ReportableError`], [`UserCancelled`]).
//! - **Collaborators**: scoped leveled logging with spans (re-exported
//!   from `armature-log`), external process execution with dry-run support
//!   (re-exported from `armature-proc`), and small filesystem/time
//!   helpers.
//!
//! # Example
//!
//! ```rust,no_run
//! use armature::{run_main, invoke, ArgSpec, Cli, Context, Log, Outcome, Overrides};
//!
//! fn main() {
//!     run_main(|cwd, argv| {
//!         let cli = Cli::builder("myapp")
//!             .group(&["db"], "database maintenance")?
//!             .command(
//!                 &["db", "migrate"],
//!                 "run pending migrations",
//!                 vec![ArgSpec::log_level(), ArgSpec::dry_run()],
//!                 |ns| {
//!                     let ctx = Context::from_args(ns, Some("myapp"), Overrides::new());
//!                     ctx.info("migrating");
//!                     Ok(Outcome::Success)
//!                 },
//!             )?
//!             .build()?;
//!
//!         let ns = cli.parse(argv);
//!         invoke(&ns, Overrides::new().set("cwd", cwd.to_path_buf()))
//!     })
//! }
//! ```

pub mod arg_enum;
pub mod boundary;
pub mod cli;
pub mod context;
pub mod cprint;
pub mod error;
pub mod fs;
pub mod invoke;
pub mod time;

pub use arg_enum::{ArgEnum, InvalidChoice};
pub use boundary::{exit_with, repair_quoted_args, run_main};
pub use cli::{ArgKind, ArgSpec, Cli, CliBuilder, Namespace, SetupError, Value};
pub use context::{Context, ContextError};
pub use cprint::cprint;
pub use error::{ReportableError, UserCancelled};
pub use invoke::{invoke, Handler, HandlerResult, Outcome, Overrides};

// Collaborator crates, re-exported whole and by their main names.
pub use armature_log as log;
pub use armature_log::{Log, LogLevel, Logger, Span};
pub use armature_proc as proc;
pub use armature_proc::ProcError;
