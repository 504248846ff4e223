//! The parsed namespace handed to dispatch and handlers.

use std::collections::BTreeMap;
use std::fmt;

use crate::cli::value::Value;
use crate::invoke::{Handler, Overrides};

/// The result of a successful parse: the matched command path, every
/// argument as a typed value, and the handler bound to the matched leaf.
///
/// The command path and handler are dispatch-only; they never appear in the
/// value map, so nothing has to be scrubbed before application code sees it.
#[derive(Clone)]
pub struct Namespace {
    command: Vec<String>,
    values: BTreeMap<String, Value>,
    handler: Handler,
}

impl Namespace {
    pub(crate) fn new(
        command: Vec<String>,
        values: BTreeMap<String, Value>,
        handler: Handler,
    ) -> Self {
        Namespace {
            command,
            values,
            handler,
        }
    }

    /// The matched subcommand names, shallowest first.
    pub fn command(&self) -> &[String] {
        &self.command
    }

    /// All parsed argument values, keyed by destination.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Looks up one argument value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub(crate) fn handler(&self) -> Handler {
        self.handler.clone()
    }

    /// A copy of this namespace with overrides overlaid onto the values.
    pub(crate) fn with_overrides(&self, overrides: &Overrides) -> Namespace {
        let mut merged = self.clone();
        overrides.apply_to(&mut merged.values);
        merged
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("command", &self.command)
            .field("values", &self.values)
            .finish_non_exhaustive()
    }
}
