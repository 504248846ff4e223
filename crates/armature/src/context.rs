//! Per-invocation execution context.
//!
//! A [`Context`] bundles everything a command handler needs: one entry per
//! parsed argument plus an owned [`Logger`]. It is built once at the start
//! of a handler from the parsed namespace (optionally with caller-supplied
//! overrides), never mutated afterwards, and discarded when the handler
//! returns.

use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::arg_enum::{ArgEnum, InvalidChoice};
use crate::cli::namespace::Namespace;
use crate::cli::value::Value;
use crate::invoke::Overrides;
use armature_log::{Log, LogLevel, Logger, Span};

/// Error looking up a typed context value.
#[derive(Debug, Error, PartialEq)]
pub enum ContextError {
    /// No argument with this destination key was parsed or supplied.
    #[error("missing value for '{0}'")]
    Missing(String),
    /// The value exists but has a different shape.
    #[error("value for '{key}' is not a {expected}")]
    WrongType {
        key: String,
        expected: &'static str,
    },
    /// The value is a string but not a canonical enum form.
    #[error(transparent)]
    InvalidChoice(#[from] InvalidChoice),
}

/// Immutable bundle of resolved configuration plus a logger.
///
/// Different commands expose different argument sets, so the context is a
/// generic ordered key→value store with typed accessors rather than a
/// per-command struct. Every field is fixed at construction.
#[derive(Debug)]
pub struct Context {
    values: BTreeMap<String, Value>,
    logger: Logger,
}

impl Context {
    /// Builds a context from a parsed namespace.
    ///
    /// Caller-supplied `overrides` take precedence over parsed values for
    /// the same key — used e.g. to inject a working directory the argument
    /// parser cannot produce. The `log_level` value (default `info`) is
    /// consumed into a fresh [`Logger`] named `name`; the command path and
    /// handler never appear here at all.
    ///
    /// Every key/value pair is logged at info immediately, sorted by key,
    /// so each run records the configuration it actually used.
    pub fn from_args(namespace: &Namespace, name: Option<&str>, overrides: Overrides) -> Context {
        let mut values = namespace.values().clone();
        overrides.apply_to(&mut values);

        let level = values
            .get("log_level")
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<LogLevel>().ok())
            .unwrap_or_default();
        let logger = match name {
            Some(name) => Logger::new(name, level),
            None => Logger::anonymous(level),
        };

        for (key, value) in &values {
            logger.info(&format!("{key} = {value}"));
        }

        values.remove("log_level");
        Context { values, logger }
    }

    /// The context's own logger.
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// All resolved values, keyed by destination.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_i64)
    }

    pub fn get_path(&self, key: &str) -> Option<&Path> {
        self.values.get(key).and_then(Value::as_path)
    }

    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.values.get(key).and_then(Value::as_list)
    }

    pub fn require_str(&self, key: &str) -> Result<&str, ContextError> {
        self.required(key)?.as_str().ok_or(ContextError::WrongType {
            key: key.to_string(),
            expected: "string",
        })
    }

    pub fn require_bool(&self, key: &str) -> Result<bool, ContextError> {
        self.required(key)?
            .as_bool()
            .ok_or(ContextError::WrongType {
                key: key.to_string(),
                expected: "bool",
            })
    }

    pub fn require_i64(&self, key: &str) -> Result<i64, ContextError> {
        self.required(key)?.as_i64().ok_or(ContextError::WrongType {
            key: key.to_string(),
            expected: "integer",
        })
    }

    pub fn require_path(&self, key: &str) -> Result<&Path, ContextError> {
        self.required(key)?
            .as_path()
            .ok_or(ContextError::WrongType {
                key: key.to_string(),
                expected: "path",
            })
    }

    /// Parses a choice-constrained value back to its enum member.
    pub fn require_enum<E: ArgEnum>(&self, key: &str) -> Result<E, ContextError> {
        let raw = self.require_str(key)?;
        Ok(E::from_arg(raw)?)
    }

    fn required(&self, key: &str) -> Result<&Value, ContextError> {
        self.values
            .get(key)
            .ok_or_else(|| ContextError::Missing(key.to_string()))
    }
}

impl Log for Context {
    fn level(&self) -> LogLevel {
        self.logger.level()
    }

    fn log(&self, level: LogLevel, message: &str) {
        self.logger.log(level, message);
    }

    fn span(&self, parts: &[&str]) -> Span {
        self.logger.span(parts)
    }
}
