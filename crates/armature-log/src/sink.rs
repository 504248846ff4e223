//! Sink resolution and line formatting.
//!
//! A sink is the concrete destination a logger writes resolved lines to.
//! Resolution of the `(context name, level, scope)` triple is memoized in a
//! process-wide registry: the same triple is never configured twice. The
//! registry is initialized lazily and never torn down mid-process.

use chrono::Local;
use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

use crate::capture;
use crate::level::LogLevel;

/// Identity of a configured sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SinkKey {
    pub(crate) context_name: Option<String>,
    pub(crate) level: LogLevel,
    pub(crate) scope: Option<String>,
}

static SINKS: Lazy<Mutex<HashMap<SinkKey, Arc<Sink>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Resolves the sink for a triple, configuring it on first use.
pub(crate) fn resolve(key: SinkKey) -> Arc<Sink> {
    let mut sinks = SINKS.lock().expect("sink registry poisoned");
    sinks
        .entry(key.clone())
        .or_insert_with(|| Arc::new(Sink::configure(&key)))
        .clone()
}

/// A configured output destination for one `(name, level, scope)` triple.
#[derive(Debug)]
pub(crate) struct Sink {
    name: String,
}

impl Sink {
    fn configure(key: &SinkKey) -> Self {
        // The displayed name prefers the call-site scope; a scope-less
        // logger falls back to its context name, then to "main".
        let name = key
            .scope
            .clone()
            .or_else(|| key.context_name.clone())
            .unwrap_or_else(|| "main".to_string());
        Sink { name }
    }

    pub(crate) fn emit(&self, level: LogLevel, message: &str) {
        let line = format_line(&self.name, level, message);
        if capture::push(&line) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{line}");
    }
}

fn level_style(level: LogLevel) -> Style {
    let style = Style::new().for_stderr();
    match level {
        LogLevel::Debug => style.magenta().bright(),
        LogLevel::Info => style.white().bright(),
        LogLevel::Warning => style.yellow().bright(),
        LogLevel::Error => style.red(),
        LogLevel::Fatal => style.red().bright(),
    }
}

fn format_line(name: &str, level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    format!(
        "{} {} {} {}",
        Style::new()
            .for_stderr()
            .magenta()
            .bright()
            .apply_to(format!("[{timestamp}]")),
        Style::new()
            .for_stderr()
            .yellow()
            .bright()
            .apply_to(format!("[{name}]")),
        level_style(level).apply_to(format!("[{}]", level.label())),
        Style::new().for_stderr().green().bright().apply_to(message),
    )
}
