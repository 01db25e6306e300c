//! The GitHub Actions side of a script run.
//!
//! [`Host`] is the narrow interface the script bindings consume. [`Workflow`]
//! implements it against the real runner protocol: workflow commands on an
//! output sink, file commands appended to the files named by `GITHUB_*`
//! variables, `INPUT_*` variables, and the `GITHUB_*` run context. Every
//! dependency (sink and environment lookup) is injected, so tests never touch
//! process state.

mod command;
mod context;
mod errors;
mod host;
mod workflow;

pub use command::{escape_data, escape_property, Command};
pub use context::ContextRecord;
pub use errors::{ContextError, HostError};
pub use host::{Host, LogLevel};
pub use workflow::{process_getenv, BufferWriter, GetenvFn, Workflow};
