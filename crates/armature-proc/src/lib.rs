//! External process execution with dry-run support.
//!
//! [`run_streamed`] is a thin wrapper around `std::process::Command` for
//! command handlers that shell out:
//!
//! - In dry-run mode it never spawns anything; it logs the fully
//!   shell-quoted command that would have run and returns `Ok`.
//! - Otherwise it logs the command, opens a logging span named after the
//!   operation, streams the child's stdout to the caller line by line, and
//!   waits for the child unconditionally. A non-zero exit becomes
//!   [`ProcError::CommandFailed`].
//!
//! Output lines are decoded lossily (invalid UTF-8 is replaced), and the
//! child's stderr is inherited so diagnostics still reach the terminal.
//! Processes are never run concurrently by this layer and no timeout is
//! enforced; callers wanting either must build it above this crate.

use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};

use armature_log::Log;
use thiserror::Error;

/// Error running an external process.
#[derive(Debug, Error)]
pub enum ProcError {
    /// Spawning or reading from the child failed.
    #[error("{op}: {source}")]
    Io {
        /// Operation label the command was run under.
        op: String,
        #[source]
        source: io::Error,
    },
    /// The child ran to completion but exited non-zero.
    #[error("{op} failed with exit code {code}: pass \"--log debug\" to get more details")]
    CommandFailed {
        /// Operation label the command was run under.
        op: String,
        /// The child's exit code.
        code: i32,
    },
    /// The child was terminated by a signal before exiting.
    #[error("{op} terminated by signal")]
    Interrupted {
        /// Operation label the command was run under.
        op: String,
    },
}

/// Runs `command`, feeding each decoded stdout line to `on_line`.
///
/// With `dry_run` set, logs the quoted command and returns without
/// spawning. Otherwise the whole execution is bracketed by a span named
/// `op`, so failures show up in the log with a duration attached.
pub fn run_streamed<L, S, F>(
    logger: &L,
    op: &str,
    command: &[S],
    dry_run: bool,
    mut on_line: F,
) -> Result<(), ProcError>
where
    L: Log,
    S: AsRef<str>,
    F: FnMut(&str),
{
    let argv: Vec<&str> = command.iter().map(AsRef::as_ref).collect();
    let command_str = shell_words::join(&argv);

    if dry_run {
        logger.info(&format!("dry run: skipping command: {command_str}"));
        return Ok(());
    }

    let (program, args) = argv.split_first().ok_or_else(|| ProcError::Io {
        op: op.to_string(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
    })?;

    logger.info(&format!("command: {command_str}"));
    logger.in_span(&[op], || {
        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ProcError::Io {
                op: op.to_string(),
                source,
            })?;

        if let Some(stdout) = child.stdout.take() {
            let reader = BufReader::new(stdout);
            for chunk in reader.split(b'\n') {
                let bytes = chunk.map_err(|source| ProcError::Io {
                    op: op.to_string(),
                    source,
                })?;
                let text = String::from_utf8_lossy(&bytes);
                on_line(text.trim_end_matches('\r'));
            }
        }

        let status = child.wait().map_err(|source| ProcError::Io {
            op: op.to_string(),
            source,
        })?;
        match status.code() {
            Some(0) => Ok(()),
            Some(code) => Err(ProcError::CommandFailed {
                op: op.to_string(),
                code,
            }),
            None => Err(ProcError::Interrupted { op: op.to_string() }),
        }
    })
}

/// Like [`run_streamed`], but logs each output line at debug level.
pub fn run<L, S>(logger: &L, op: &str, command: &[S], dry_run: bool) -> Result<(), ProcError>
where
    L: Log,
    S: AsRef<str>,
{
    run_streamed(logger, op, command, dry_run, |line| logger.debug(line))
}
