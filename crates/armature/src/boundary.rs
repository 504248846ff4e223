//! Top-level entry point and uncaught-error handling.
//!
//! [`run_main`] wraps an application's real main function: it collects the
//! working directory and argument vector, installs the interrupt hook, and
//! routes the function's result through the one place that knows how to
//! turn errors into exit codes:
//!
//! - [`ReportableError`] — message in red to stderr, exit with its code
//! - [`UserCancelled`] (or SIGINT) — informational message in blue, exit 0
//! - anything else — full error chain to stderr, exit 1 (defects are loud)

use console::Style;
use std::io::Write;
use std::path::Path;
use std::process;

use crate::cprint::cprint;
use crate::error::{ReportableError, UserCancelled};
use crate::invoke::Outcome;

/// Exits the process according to the handler's result.
pub fn exit_with(result: Result<Outcome, anyhow::Error>) -> ! {
    match result {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(err) => report_and_exit(err),
    }
}

fn report_and_exit(err: anyhow::Error) -> ! {
    if let Some(reportable) = err.downcast_ref::<ReportableError>() {
        let message = if reportable.message().is_empty() {
            format!("(Unknown error with exit code {})", reportable.exit_code())
        } else {
            reportable.message().to_string()
        };
        cprint(
            &Style::new().for_stderr().red().bright(),
            &mut std::io::stderr(),
            &message,
        );
        process::exit(reportable.exit_code());
    }

    if let Some(cancelled) = err.downcast_ref::<UserCancelled>() {
        cprint(
            &Style::new().blue().bright(),
            &mut std::io::stdout(),
            &cancelled.to_string(),
        );
        process::exit(0);
    }

    let _ = writeln!(std::io::stderr(), "{err:?}");
    process::exit(1);
}

/// Runs an application main function inside the error boundary.
///
/// The function receives the current working directory and the argument
/// vector (program name excluded) and returns the exit outcome or an
/// error; this never returns.
pub fn run_main<F>(func: F) -> !
where
    F: FnOnce(&Path, Vec<String>) -> Result<Outcome, anyhow::Error>,
{
    install_cancel_hook();

    let cwd = match std::env::current_dir() {
        Ok(cwd) => cwd,
        Err(err) => {
            let _ = writeln!(
                std::io::stderr(),
                "cannot determine working directory: {err}"
            );
            process::exit(1);
        }
    };
    let argv: Vec<String> = std::env::args().skip(1).collect();

    exit_with(func(&cwd, argv))
}

/// Maps SIGINT to the cancellation path: informational message, exit 0.
fn install_cancel_hook() {
    let _ = ctrlc::set_handler(|| {
        cprint(
            &Style::new().blue().bright(),
            &mut std::io::stdout(),
            &UserCancelled::new().to_string(),
        );
        process::exit(0);
    });
}

/// Undoes a host-shell re-tokenization quirk.
///
/// On Windows, an argument written as `name="some value"` can arrive
/// re-tokenized with the quote glued into one argument. Given the raw
/// command line and the tokenized argument list, any argument whose
/// pre-quote prefix appears in the raw command line as `"prefix\"` is
/// split back into the prefix and the trimmed remainder. Pure function;
/// non-Windows callers never need it.
pub fn repair_quoted_args(command_line: &str, argv: &[String]) -> Vec<String> {
    let mut repaired = Vec::with_capacity(argv.len());
    for arg in argv {
        if let Some(quote_index) = arg.find('"') {
            let prefix = &arg[..quote_index];
            let needle = format!("\"{}\\\"", prefix);
            if command_line.contains(&needle) {
                repaired.push(prefix.to_string());
                let suffix = arg[quote_index + 1..].trim_start_matches(' ');
                if !suffix.is_empty() {
                    repaired.push(suffix.to_string());
                }
                continue;
            }
        }
        repaired.push(arg.clone());
    }
    repaired
}
