use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A `GITHUB_*` variable that is set but does not parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("{variable}: invalid boolean {value:?}")]
    InvalidBool {
        variable: &'static str,
        value: String,
    },
    #[error("{variable}: invalid integer {value:?}")]
    InvalidInt {
        variable: &'static str,
        value: String,
    },
}

/// Failure of a [`Host`](crate::Host) call.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("writing workflow command: {0}")]
    Output(#[source] io::Error),
    #[error("{variable} is not set, file command unavailable")]
    FileCommandUnavailable { variable: &'static str },
    #[error("appending to {}: {source}", path.display())]
    FileCommand {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Context(#[from] ContextError),
}
