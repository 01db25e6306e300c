use std::io;
use std::path::PathBuf;

use gha_value::errors::host_error;
use gha_value::EvalError;
use gha_workflow::HostError;
use thiserror::Error;

/// Number text that is neither an integer nor a float. `serde_json` only
/// produces valid number text, so this signals a decoding bug upstream.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarshalError {
    #[error("unsupported JSON number {0:?}")]
    InvalidNumber(String),
}

/// Failure reading the event payload named by `GITHUB_EVENT_PATH`.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("decoding {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("decoding {}: want a JSON object, got {found}", path.display())]
    NotAnObject { path: PathBuf, found: &'static str },
    #[error("marshalling event: {0}")]
    Marshal(#[from] MarshalError),
}

/// Anything an operation handler can fail with.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Host(#[from] HostError),
    #[error(transparent)]
    Event(#[from] EventError),
}

impl ActionError {
    /// Convert into the script-visible error of `operation`.
    pub fn into_eval(self, operation: &str) -> EvalError {
        host_error(operation, self.to_string())
    }
}
