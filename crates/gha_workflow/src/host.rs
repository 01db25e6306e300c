use std::fmt;

use crate::{ContextRecord, HostError};

/// Log levels a script can emit at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    /// Plain output, no annotation.
    Log,
    Debug,
    Notice,
    Warning,
    Error,
}

impl LogLevel {
    /// Workflow command name, `None` for plain output.
    pub fn command(self) -> Option<&'static str> {
        match self {
            LogLevel::Log => None,
            LogLevel::Debug => Some("debug"),
            LogLevel::Notice => Some("notice"),
            LogLevel::Warning => Some("warning"),
            LogLevel::Error => Some("error"),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command().unwrap_or("log"))
    }
}

/// The CI operations scripts can reach.
///
/// Implementations own the wire protocol and any serialization of concurrent
/// calls; callers treat every method as an opaque, blocking side effect.
pub trait Host: Send + Sync {
    fn log(&self, level: LogLevel, message: &str) -> Result<(), HostError>;

    /// Register a problem matcher from the file at `path`.
    fn add_matcher(&self, path: &str) -> Result<(), HostError>;

    fn remove_matcher(&self, owner: &str) -> Result<(), HostError>;

    /// Redact `value` from all later log output.
    fn add_mask(&self, value: &str) -> Result<(), HostError>;

    /// Append markdown to the job summary.
    fn add_step_summary(&self, markdown: &str) -> Result<(), HostError>;

    fn group(&self, title: &str) -> Result<(), HostError>;

    fn end_group(&self) -> Result<(), HostError>;

    /// The named action input, or `""` when it is not defined.
    fn read_input(&self, name: &str) -> String;

    fn set_output(&self, name: &str, value: &str) -> Result<(), HostError>;

    fn save_state(&self, name: &str, value: &str) -> Result<(), HostError>;

    fn set_env(&self, name: &str, value: &str) -> Result<(), HostError>;

    fn add_path(&self, path: &str) -> Result<(), HostError>;

    fn read_context(&self) -> Result<ContextRecord, HostError>;
}
