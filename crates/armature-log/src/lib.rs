//! Named, leveled, scoped logging with span tracking.
//!
//! `armature-log` provides the logging layer for armature-based CLIs:
//!
//! - **Levels**: [`LogLevel`] with the usual `debug < info < warning <
//!   error < fatal` ordering; a logger emits a line only when the line's
//!   severity is at or above its configured level.
//! - **Loggers**: [`Logger`] carries an optional display name and a level,
//!   and is cheap to construct and clone. The displayed source of a line is
//!   an explicit *scope* set with [`Logger::scoped`] — no call-stack
//!   introspection — falling back to the logger's own name.
//! - **Spans**: [`Span`] brackets an operation with `started` /
//!   `completed after <duration>` / `failed after <duration>` lines.
//!   [`Log::in_span`] wraps a `Result`-returning closure and returns its
//!   result unchanged.
//! - **Sinks**: the concrete output for a `(name, level, scope)` triple is
//!   resolved once per process and cached in a global registry.
//!
//! # Example
//!
//! ```rust
//! use armature_log::{Log, Logger, LogLevel};
//!
//! let logger = Logger::new("sample", LogLevel::Debug);
//! logger.info("starting up");
//!
//! let span = logger.span(&["path", "to", "work"]);
//! logger.debug("inside the span");
//! span.complete();
//! ```

mod level;
mod logger;
mod sink;
mod span;

pub mod capture;

pub use level::{LogLevel, ParseLevelError};
pub use logger::{Log, Logger};
pub use span::Span;
