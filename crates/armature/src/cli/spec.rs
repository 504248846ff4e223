//! Declarative argument specs.
//!
//! An [`ArgSpec`] describes one argument of a command — destination key,
//! flags, expected value shape, default, redaction, help text — and is
//! lowered to `clap` arguments when the command tree is built. Keeping the
//! description declarative lets the router apply defaults itself, render
//! help consistently (`(default: …)`, `(one of: …)`, redacted defaults),
//! and extract every value into the typed [`Value`] store after parsing.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, ArgMatches};
use std::path::PathBuf;

use crate::arg_enum::ArgEnum;
use crate::cli::value::Value;
use armature_log::LogLevel;

/// The value shape an argument accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgKind {
    /// A free-form string.
    Str,
    /// A filesystem path.
    Path,
    /// A signed integer.
    Int,
    /// A plain `--flag` that is false unless given.
    Flag,
    /// A `--flag` / `--no-flag` pair with a configurable default.
    Toggle,
    /// One of a fixed set of strings.
    Choice(Vec<String>),
    /// A string that may repeat.
    StrList,
}

/// Declarative description of one command argument.
#[derive(Debug, Clone)]
pub struct ArgSpec {
    dest: String,
    long: Option<String>,
    short: Option<char>,
    positional: bool,
    kind: ArgKind,
    default: Option<Value>,
    required: bool,
    redact: bool,
    help: Option<String>,
}

impl ArgSpec {
    fn new(dest: &str, kind: ArgKind) -> Self {
        ArgSpec {
            dest: dest.to_string(),
            long: None,
            short: None,
            positional: false,
            kind,
            default: None,
            required: false,
            redact: false,
            help: None,
        }
    }

    /// An optional `--dest <VALUE>` string argument.
    pub fn string(dest: &str) -> Self {
        Self::new(dest, ArgKind::Str)
    }

    /// An optional path argument.
    pub fn path(dest: &str) -> Self {
        Self::new(dest, ArgKind::Path)
    }

    /// An optional integer argument.
    pub fn int(dest: &str) -> Self {
        Self::new(dest, ArgKind::Int)
    }

    /// A boolean flag, false unless present.
    pub fn flag(dest: &str) -> Self {
        Self::new(dest, ArgKind::Flag)
    }

    /// A negatable `--dest` / `--no-dest` pair.
    pub fn toggle(dest: &str, default: bool) -> Self {
        Self::new(dest, ArgKind::Toggle).default_value(default)
    }

    /// A required positional string argument.
    pub fn positional(dest: &str) -> Self {
        let mut spec = Self::new(dest, ArgKind::Str);
        spec.positional = true;
        spec.required = true;
        spec
    }

    /// A repeatable string argument collected into a list.
    pub fn string_list(dest: &str) -> Self {
        Self::new(dest, ArgKind::StrList)
    }

    /// An argument constrained to the canonical forms of an [`ArgEnum`].
    ///
    /// The default is stored in its canonical string form; an unmatched
    /// input is rejected by the parser with a message naming every choice.
    pub fn enum_of<E: ArgEnum>(dest: &str, default: E) -> Self {
        let choices = E::choices().iter().map(|s| s.to_string()).collect();
        Self::new(dest, ArgKind::Choice(choices)).default_value(default.arg())
    }

    /// The common opt-in `--log`/`-l` level argument.
    pub fn log_level() -> Self {
        Self::enum_of("log_level", LogLevel::Info)
            .long("log")
            .short('l')
            .help("log level")
    }

    /// The common opt-in `--dry-run`/`--no-dry-run` argument.
    pub fn dry_run() -> Self {
        Self::toggle("dry_run", true).help("dry run")
    }

    /// The common opt-in `--force`/`-f` argument.
    pub fn force() -> Self {
        Self::toggle("force", false).short('f').help("force overwrite")
    }

    /// Overrides the long flag name (defaults to the dest with `-` for `_`).
    pub fn long(mut self, long: &str) -> Self {
        self.long = Some(long.to_string());
        self
    }

    /// Adds a short flag.
    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Sets the help text. Default and choice annotations are appended
    /// automatically when the spec is lowered.
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    /// Sets the default value, applied when the argument is absent.
    pub fn default_value(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Marks the argument as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the default as sensitive: help shows `(redacted)` instead.
    pub fn redact(mut self) -> Self {
        self.redact = true;
        self
    }

    pub fn dest(&self) -> &str {
        &self.dest
    }

    fn long_name(&self) -> String {
        self.long
            .clone()
            .unwrap_or_else(|| self.dest.replace('_', "-"))
    }

    fn negative_id(&self) -> String {
        format!("no_{}", self.dest)
    }

    /// Renders help text with the choice and default annotations the
    /// original flags carry, honoring redaction.
    fn render_help(&self) -> String {
        let mut help = self.help.clone().unwrap_or_default();
        if let ArgKind::Choice(choices) = &self.kind {
            help.push_str(&format!(" (one of: {})", choices.join(", ")));
        }
        if let Some(default) = &self.default {
            let shown = if self.redact {
                "(redacted)".to_string()
            } else {
                match default {
                    Value::Bool(true) => "(true)".to_string(),
                    Value::Bool(false) => "(false)".to_string(),
                    other => other.to_string(),
                }
            };
            help.push_str(&format!(" (default: {shown})"));
        }
        help.trim().to_string()
    }

    /// Lowers the spec to clap arguments (two for a toggle, one otherwise).
    pub(crate) fn to_clap(&self) -> Vec<Arg> {
        let mut arg = Arg::new(self.dest.clone());
        if !self.positional {
            arg = arg.long(self.long_name());
            if let Some(short) = self.short {
                arg = arg.short(short);
            }
        }

        arg = match &self.kind {
            ArgKind::Str | ArgKind::Path => arg.value_name(self.dest.to_uppercase()),
            ArgKind::Int => arg
                .value_name(self.dest.to_uppercase())
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true),
            ArgKind::Flag | ArgKind::Toggle => arg.action(ArgAction::SetTrue),
            ArgKind::Choice(choices) => arg
                .value_name(self.dest.to_uppercase())
                .value_parser(PossibleValuesParser::new(choices.clone())),
            ArgKind::StrList => arg
                .value_name(self.dest.to_uppercase())
                .action(ArgAction::Append),
        };

        if self.required && self.default.is_none() {
            arg = arg.required(true);
        }
        arg = arg.help(self.render_help());

        match self.kind {
            ArgKind::Toggle => {
                let negative = Arg::new(self.negative_id())
                    .long(format!("no-{}", self.long_name()))
                    .action(ArgAction::SetTrue)
                    .overrides_with(self.dest.clone());
                let positive = arg.overrides_with(self.negative_id());
                vec![positive, negative]
            }
            _ => vec![arg],
        }
    }

    /// Extracts this argument's value from parsed matches, applying the
    /// declared default when absent. Returns `None` for an absent optional
    /// argument with no default.
    pub(crate) fn extract(&self, matches: &ArgMatches) -> Option<Value> {
        match &self.kind {
            ArgKind::Str | ArgKind::Choice(_) => matches
                .get_one::<String>(&self.dest)
                .map(|s| Value::Str(s.clone()))
                .or_else(|| self.default.clone()),
            ArgKind::Path => matches
                .get_one::<String>(&self.dest)
                .map(|s| Value::Path(PathBuf::from(s)))
                .or_else(|| self.default.clone()),
            ArgKind::Int => matches
                .get_one::<i64>(&self.dest)
                .map(|n| Value::Int(*n))
                .or_else(|| self.default.clone()),
            ArgKind::Flag => Some(Value::Bool(matches.get_flag(&self.dest))),
            ArgKind::Toggle => {
                let value = if matches.get_flag(&self.negative_id()) {
                    false
                } else if matches.get_flag(&self.dest) {
                    true
                } else {
                    self.default.as_ref().and_then(Value::as_bool).unwrap_or(false)
                };
                Some(Value::Bool(value))
            }
            ArgKind::StrList => {
                let values: Vec<Value> = matches
                    .get_many::<String>(&self.dest)
                    .map(|items| items.map(|s| Value::Str(s.clone())).collect())
                    .unwrap_or_default();
                if values.is_empty() {
                    self.default.clone()
                } else {
                    Some(Value::List(values))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_help_with_default() {
        let spec = ArgSpec::string("output")
            .help("output file")
            .default_value("out.txt");
        assert_eq!(spec.render_help(), "output file (default: out.txt)");
    }

    #[test]
    fn test_render_help_redacted() {
        let spec = ArgSpec::string("token")
            .help("api token")
            .default_value("hunter2")
            .redact();
        assert_eq!(spec.render_help(), "api token (default: (redacted))");
    }

    #[test]
    fn test_render_help_bool_default() {
        let spec = ArgSpec::dry_run();
        assert_eq!(spec.render_help(), "dry run (default: (true))");
    }

    #[test]
    fn test_render_help_choices() {
        let spec = ArgSpec::log_level();
        assert_eq!(
            spec.render_help(),
            "log level (one of: debug, info, warning, error, fatal) (default: info)"
        );
    }

    #[test]
    fn test_long_name_defaults_from_dest() {
        assert_eq!(ArgSpec::toggle("dry_run", true).long_name(), "dry-run");
        assert_eq!(ArgSpec::log_level().long_name(), "log");
    }

    #[test]
    fn test_toggle_lowers_to_two_args() {
        let args = ArgSpec::dry_run().to_clap();
        assert_eq!(args.len(), 2);
        assert_eq!(args[0].get_id().as_str(), "dry_run");
        assert_eq!(args[1].get_id().as_str(), "no_dry_run");
    }
}
