//! The [`Logger`] type and the [`Log`] trait.

use crate::level::LogLevel;
use crate::sink::{self, SinkKey};
use crate::span::Span;

/// Common surface for anything that can log.
///
/// Everything funnels through [`Log::log`]; the per-severity methods are
/// thin provided wrappers, so implementors (a bare [`Logger`], or a context
/// object that owns one) only supply `level`, `log`, and `span`.
pub trait Log {
    /// The minimum severity this logger emits.
    fn level(&self) -> LogLevel;

    /// Emits a line at the given severity, if the level permits.
    fn log(&self, level: LogLevel, message: &str);

    /// Opens a span named by `parts` joined with `/`.
    ///
    /// The returned guard logs `started` immediately; call
    /// [`Span::complete`] on success, or let it drop to record failure.
    fn span(&self, parts: &[&str]) -> Span;

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn fatal(&self, message: &str) {
        self.log(LogLevel::Fatal, message);
    }

    /// Runs `f` inside a span, completing it on `Ok` and failing it on
    /// `Err`. The closure's result is returned unchanged either way.
    fn in_span<T, E>(&self, parts: &[&str], f: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        Self: Sized,
    {
        let span = self.span(parts);
        match f() {
            Ok(value) => {
                span.complete();
                Ok(value)
            }
            Err(err) => {
                drop(span);
                Err(err)
            }
        }
    }
}

/// A named, leveled logger.
///
/// Cheap to construct and clone. The name identifies the owning context
/// (e.g. the program); [`Logger::scoped`] derives a copy that attributes
/// its lines to a specific module or component instead.
#[derive(Debug, Clone)]
pub struct Logger {
    name: Option<String>,
    level: LogLevel,
    scope: Option<String>,
}

impl Logger {
    /// Creates a named logger at the given level.
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Logger {
            name: Some(name.into()),
            level,
            scope: None,
        }
    }

    /// Creates a nameless logger; lines fall back to the `main` source.
    pub fn anonymous(level: LogLevel) -> Self {
        Logger {
            name: None,
            level,
            scope: None,
        }
    }

    /// Returns a copy whose lines are attributed to `scope`.
    ///
    /// This replaces call-stack inspection: a component that wants its own
    /// lines labelled takes a `Logger` and scopes it once.
    pub fn scoped(&self, scope: impl Into<String>) -> Self {
        Logger {
            name: self.name.clone(),
            level: self.level,
            scope: Some(scope.into()),
        }
    }

    /// The display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Log for Logger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level < self.level {
            return;
        }
        let sink = sink::resolve(SinkKey {
            context_name: self.name.clone(),
            level: self.level,
            scope: self.scope.clone(),
        });
        sink.emit(level, message);
    }

    fn span(&self, parts: &[&str]) -> Span {
        Span::open(self.clone(), parts)
    }
}
