//! Handler invocation and exit-outcome mapping.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::cli::namespace::Namespace;
use crate::cli::value::Value;

/// What a command handler reports back.
///
/// The variants map one-to-one onto process exit behavior; there is no
/// catch-all, so an unsupported result shape cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded (exit 0).
    Success,
    /// The command failed without a specific code (exit 1).
    Failure,
    /// The command chose its own exit code.
    Code(i32),
}

impl Outcome {
    /// The process exit code this outcome maps to.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
            Outcome::Code(code) => code,
        }
    }
}

impl From<bool> for Outcome {
    fn from(ok: bool) -> Self {
        if ok {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

impl From<i32> for Outcome {
    fn from(code: i32) -> Self {
        Outcome::Code(code)
    }
}

/// The result type command handlers return.
pub type HandlerResult = Result<Outcome, anyhow::Error>;

/// A handler bound to a leaf command.
pub type Handler = Rc<dyn Fn(&Namespace) -> HandlerResult>;

/// Extra values supplied by the caller at invocation time.
///
/// Overrides take precedence over parsed values for the same key — used
/// e.g. to inject the working directory, which no argument parser can
/// produce. Keys the handler never reads simply remain in the namespace
/// copy; they are passed through, not rejected.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    entries: Vec<(String, Value)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override, replacing any parsed value for `key`.
    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.entries.push((key.to_string(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn apply_to(&self, values: &mut BTreeMap<String, Value>) {
        for (key, value) in &self.entries {
            values.insert(key.clone(), value.clone());
        }
    }
}

/// Calls the handler bound to the parsed namespace.
///
/// Caller-supplied overrides are overlaid onto a per-invocation copy of
/// the namespace first; the original is left untouched.
pub fn invoke(namespace: &Namespace, overrides: Overrides) -> HandlerResult {
    if overrides.is_empty() {
        let handler = namespace.handler();
        return handler(namespace);
    }
    let merged = namespace.with_overrides(&overrides);
    let handler = merged.handler();
    handler(&merged)
}
