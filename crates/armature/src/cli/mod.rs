//! Command-line surface: argument specs, the command tree, parsing.

pub mod namespace;
pub mod router;
pub mod spec;
pub mod value;

pub use namespace::Namespace;
pub use router::{Cli, CliBuilder, SetupError};
pub use spec::{ArgKind, ArgSpec};
pub use value::Value;
