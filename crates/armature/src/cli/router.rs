//! The command tree: registration, validation, parsing, routing.
//!
//! Commands are declared once at startup against a [`CliBuilder`] — groups
//! for internal nodes, handler-bound commands for leaves — then frozen into
//! a [`Cli`]. Parsing delegates tokenization, help, and usage errors to
//! clap; the router walks the matched subcommand chain to produce a
//! [`Namespace`] carrying the ordered command path, the typed argument
//! values, and the resolved handler.

use clap::ArgMatches;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::boundary;
use crate::cli::namespace::Namespace;
use crate::cli::spec::ArgSpec;
use crate::invoke::{invoke, Handler, HandlerResult, Overrides};

/// Error type for command registration. These are wiring bugs, surfaced
/// when the tree is declared, never at parse time.
#[derive(Debug)]
pub enum SetupError {
    /// A command path with no segments.
    EmptyPath,
    /// The path's parent has not been registered.
    ParentNotFound(String),
    /// A command or group already exists at the path.
    DuplicateCommand(String),
    /// The parent already has a handler; leaves cannot be nested under.
    NestedUnderLeaf(String),
    /// Two argument specs on one command share a destination key.
    DuplicateArg(String, String),
    /// A group (or the root) ended up with no subcommands.
    EmptyGroup(String),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::EmptyPath => write!(f, "empty command path"),
            SetupError::ParentNotFound(path) => write!(f, "unknown parent command: {}", path),
            SetupError::DuplicateCommand(path) => write!(f, "duplicate command: {}", path),
            SetupError::NestedUnderLeaf(path) => {
                write!(f, "cannot nest commands under leaf command: {}", path)
            }
            SetupError::DuplicateArg(path, dest) => {
                write!(f, "duplicate argument '{}' on command {}", dest, path)
            }
            SetupError::EmptyGroup(path) => {
                write!(f, "command group has no subcommands: {}", path)
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// One node of the command hierarchy: an internal router or a leaf bound
/// to a handler. Children keep declaration order.
struct CommandNode {
    name: String,
    about: Option<String>,
    args: Vec<ArgSpec>,
    handler: Option<Handler>,
    children: Vec<CommandNode>,
}

impl CommandNode {
    fn new(name: &str, about: Option<&str>) -> Self {
        CommandNode {
            name: name.to_string(),
            about: about.map(str::to_string),
            args: Vec::new(),
            handler: None,
            children: Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|child| child.name == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut CommandNode> {
        self.children.iter_mut().find(|child| child.name == name)
    }
}

/// Capitalizes the first character, the way group help is promoted to a
/// description.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Builder for the command tree.
///
/// # Example
///
/// ```rust
/// use armature::{ArgSpec, Cli, Outcome};
///
/// let cli = Cli::builder("myapp")
///     .group(&["db"], "database maintenance")?
///     .command(
///         &["db", "migrate"],
///         "run pending migrations",
///         vec![ArgSpec::log_level(), ArgSpec::dry_run()],
///         |_ns| Ok(Outcome::Success),
///     )?
///     .build()?;
/// # let _ = cli;
/// # Ok::<(), armature::SetupError>(())
/// ```
pub struct CliBuilder {
    root: CommandNode,
}

impl std::fmt::Debug for CliBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliBuilder").finish_non_exhaustive()
    }
}

impl CliBuilder {
    /// Starts a tree for the named program.
    pub fn new(name: &str) -> Self {
        CliBuilder {
            root: CommandNode::new(name, None),
        }
    }

    /// Sets the program's help blurb.
    pub fn about(mut self, about: &str) -> Self {
        self.root.about = Some(about.to_string());
        self
    }

    /// Declares an internal node at `path`. Its parent must already exist.
    pub fn group(mut self, path: &[&str], about: &str) -> Result<Self, SetupError> {
        let node = self.attach(path)?;
        node.about = Some(about.to_string());
        Ok(self)
    }

    /// Declares a leaf command at `path`, binding its handler and argument
    /// specs (common arguments are opted into by including them in `args`).
    pub fn command<F>(
        mut self,
        path: &[&str],
        about: &str,
        args: Vec<ArgSpec>,
        handler: F,
    ) -> Result<Self, SetupError>
    where
        F: Fn(&Namespace) -> HandlerResult + 'static,
    {
        for (i, spec) in args.iter().enumerate() {
            if args[..i].iter().any(|other| other.dest() == spec.dest()) {
                return Err(SetupError::DuplicateArg(
                    path.join(" "),
                    spec.dest().to_string(),
                ));
            }
        }

        let node = self.attach(path)?;
        node.about = Some(about.to_string());
        node.args = args;
        node.handler = Some(Rc::new(handler));
        Ok(self)
    }

    /// Creates an empty node at `path` under its (existing) parent.
    fn attach(&mut self, path: &[&str]) -> Result<&mut CommandNode, SetupError> {
        let (leaf, parents) = path.split_last().ok_or(SetupError::EmptyPath)?;

        let mut node = &mut self.root;
        for segment in parents {
            node = node
                .child_mut(segment)
                .ok_or_else(|| SetupError::ParentNotFound(path.join(" ")))?;
        }

        if node.handler.is_some() {
            return Err(SetupError::NestedUnderLeaf(path.join(" ")));
        }
        if node.child(leaf).is_some() {
            return Err(SetupError::DuplicateCommand(path.join(" ")));
        }

        node.children.push(CommandNode::new(leaf, None));
        Ok(node.children.last_mut().expect("just pushed"))
    }

    /// Freezes the tree, validating that every root-to-leaf path ends in
    /// exactly one handler, and lowers it to a clap command.
    pub fn build(self) -> Result<Cli, SetupError> {
        fn validate(node: &CommandNode, path: &str) -> Result<(), SetupError> {
            if node.children.is_empty() && node.handler.is_none() {
                return Err(SetupError::EmptyGroup(path.to_string()));
            }
            for child in &node.children {
                let child_path = if path.is_empty() {
                    child.name.clone()
                } else {
                    format!("{} {}", path, child.name)
                };
                validate(child, &child_path)?;
            }
            Ok(())
        }

        validate(&self.root, "")?;
        let command = lower(&self.root);
        Ok(Cli {
            root: self.root,
            command,
        })
    }
}

fn lower(node: &CommandNode) -> clap::Command {
    let mut command = clap::Command::new(node.name.clone());
    if let Some(about) = &node.about {
        command = command
            .about(about.clone())
            .long_about(capitalize_first(about));
    }
    for spec in &node.args {
        for arg in spec.to_clap() {
            command = command.arg(arg);
        }
    }
    if !node.children.is_empty() {
        command = command.subcommand_required(true);
        for child in &node.children {
            command = command.subcommand(lower(child));
        }
    }
    command
}

/// A frozen command tree, ready to parse and dispatch.
pub struct Cli {
    root: CommandNode,
    command: clap::Command,
}

impl Cli {
    /// Starts building a tree for the named program.
    pub fn builder(name: &str) -> CliBuilder {
        CliBuilder::new(name)
    }

    /// Parses the process arguments (without the program name).
    ///
    /// Usage problems — empty argv, unknown subcommands, missing required
    /// arguments, values outside a declared choice set — come back as a
    /// `clap::Error`; [`Cli::parse`] reports those and exits 2.
    pub fn try_parse<I, S>(&self, argv: I) -> Result<Namespace, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut full: Vec<String> = vec![self.command.get_name().to_string()];
        full.extend(argv.into_iter().map(Into::into));
        let matches = self.command.clone().try_get_matches_from(full)?;
        Ok(self.route(&matches))
    }

    /// Like [`Cli::try_parse`], but reports usage errors to standard error
    /// and exits the process with status 2 (0 for `--help`).
    pub fn parse<I, S>(&self, argv: I) -> Namespace
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match self.try_parse(argv) {
            Ok(namespace) => namespace,
            Err(err) => err.exit(),
        }
    }

    /// Parses, invokes the matched handler with the given overrides, and
    /// exits through the error boundary.
    pub fn run<I, S>(&self, argv: I, overrides: Overrides) -> !
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let namespace = self.parse(argv);
        boundary::exit_with(invoke(&namespace, overrides))
    }

    /// Walks the matched subcommand chain, accumulating the command path
    /// and extracting declared arguments at every depth. Routing state
    /// stays local to this walk; only the finished path reaches the
    /// namespace.
    fn route(&self, matches: &ArgMatches) -> Namespace {
        let mut node = &self.root;
        let mut current = matches;
        let mut command = Vec::new();
        let mut values = BTreeMap::new();

        loop {
            for spec in &node.args {
                if let Some(value) = spec.extract(current) {
                    values.insert(spec.dest().to_string(), value);
                }
            }
            match current.subcommand() {
                Some((name, sub)) => {
                    node = node.child(name).expect("clap only matches declared subcommands");
                    command.push(name.to_string());
                    current = sub;
                }
                None => break,
            }
        }

        let handler = node
            .handler
            .clone()
            .expect("validated at build time: every leaf has a handler");
        Namespace::new(command, values, handler)
    }
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("name", &self.command.get_name())
            .finish_non_exhaustive()
    }
}
