//! [`Host`] implementation speaking the GitHub Actions runner protocol.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{Command, ContextRecord, Host, HostError, LogLevel};

/// Environment lookup. `None` and `Some("")` both mean unset.
pub type GetenvFn = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Delimiter of the heredoc-style file command records.
const DELIMITER: &str = "_GitHubActionsFileCommandDelimeter_";

/// Lookup against the real process environment.
pub fn process_getenv() -> GetenvFn {
    Arc::new(|name| std::env::var(name).ok())
}

/// Which file a file command appends to, and how it falls back when the
/// runner did not provide one.
#[derive(Copy, Clone, Debug)]
enum FileCommand {
    Output,
    State,
    Env,
    Path,
    StepSummary,
}

impl FileCommand {
    fn variable(self) -> &'static str {
        match self {
            FileCommand::Output => "GITHUB_OUTPUT",
            FileCommand::State => "GITHUB_STATE",
            FileCommand::Env => "GITHUB_ENV",
            FileCommand::Path => "GITHUB_PATH",
            FileCommand::StepSummary => "GITHUB_STEP_SUMMARY",
        }
    }

    /// Legacy workflow command name, if the command has one.
    fn legacy(self) -> Option<&'static str> {
        match self {
            FileCommand::Output => Some("set-output"),
            FileCommand::State => Some("save-state"),
            FileCommand::Env => Some("set-env"),
            FileCommand::Path => Some("add-path"),
            FileCommand::StepSummary => None,
        }
    }
}

/// The shipped [`Host`]: workflow commands go to `sink`, file commands to the
/// files named by the environment.
pub struct Workflow {
    sink: Mutex<Box<dyn Write + Send>>,
    getenv: GetenvFn,
}

impl Workflow {
    pub fn new(sink: Box<dyn Write + Send>, getenv: GetenvFn) -> Self {
        Workflow {
            sink: Mutex::new(sink),
            getenv,
        }
    }

    /// Bound to stdout and the process environment.
    pub fn from_process() -> Self {
        Workflow::new(Box::new(io::stdout()), process_getenv())
    }

    fn var(&self, name: &str) -> Option<String> {
        (self.getenv)(name).filter(|value| !value.is_empty())
    }

    fn write_line(&self, line: &str) -> Result<(), HostError> {
        let write = |sink: &mut dyn Write| -> io::Result<()> {
            sink.write_all(line.as_bytes())?;
            if !line.ends_with('\n') {
                sink.write_all(b"\n")?;
            }
            sink.flush()
        };
        write(&mut **self.sink.lock()).map_err(HostError::Output)
    }

    fn issue(&self, command: &Command) -> Result<(), HostError> {
        trace!(command = command.name(), "workflow command");
        self.write_line(&command.to_string())
    }

    /// Append `record` to the file named by `file`'s variable, or issue the
    /// legacy command built by `legacy` when the variable is unset.
    fn file_command(
        &self,
        file: FileCommand,
        record: &str,
        legacy: impl FnOnce(&'static str) -> Command,
    ) -> Result<(), HostError> {
        let variable = file.variable();
        let Some(path) = self.var(variable) else {
            return match file.legacy() {
                Some(name) => {
                    debug!(variable, "file command unavailable, using legacy command");
                    self.issue(&legacy(name))
                }
                None => Err(HostError::FileCommandUnavailable { variable }),
            };
        };
        let path = PathBuf::from(path);
        debug!(variable, path = %path.display(), "file command");
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| f.write_all(record.as_bytes()))
            .map_err(|source| HostError::FileCommand { path, source })
    }

    fn key_value(&self, file: FileCommand, name: &str, value: &str) -> Result<(), HostError> {
        let record = format!("{name}<<{DELIMITER}\n{value}\n{DELIMITER}\n");
        self.file_command(file, &record, |legacy| {
            Command::new(legacy, value).property("name", name)
        })
    }
}

impl fmt::Debug for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow").finish_non_exhaustive()
    }
}

impl Host for Workflow {
    fn log(&self, level: LogLevel, message: &str) -> Result<(), HostError> {
        match level.command() {
            Some(name) => self.issue(&Command::new(name, message)),
            None => self.write_line(message),
        }
    }

    fn add_matcher(&self, path: &str) -> Result<(), HostError> {
        self.issue(&Command::new("add-matcher", path))
    }

    fn remove_matcher(&self, owner: &str) -> Result<(), HostError> {
        self.issue(&Command::new("remove-matcher", "").property("owner", owner))
    }

    fn add_mask(&self, value: &str) -> Result<(), HostError> {
        self.issue(&Command::new("add-mask", value))
    }

    fn add_step_summary(&self, markdown: &str) -> Result<(), HostError> {
        self.file_command(FileCommand::StepSummary, &format!("{markdown}\n"), |name| {
            Command::new(name, markdown)
        })
    }

    fn group(&self, title: &str) -> Result<(), HostError> {
        self.issue(&Command::new("group", title))
    }

    fn end_group(&self) -> Result<(), HostError> {
        self.issue(&Command::new("endgroup", ""))
    }

    fn read_input(&self, name: &str) -> String {
        let variable = format!("INPUT_{}", name.to_uppercase().replace(' ', "_"));
        (self.getenv)(&variable)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.key_value(FileCommand::Output, name, value)
    }

    fn save_state(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.key_value(FileCommand::State, name, value)
    }

    fn set_env(&self, name: &str, value: &str) -> Result<(), HostError> {
        self.key_value(FileCommand::Env, name, value)
    }

    fn add_path(&self, path: &str) -> Result<(), HostError> {
        self.file_command(FileCommand::Path, &format!("{path}\n"), |name| {
            Command::new(name, path)
        })
    }

    fn read_context(&self) -> Result<ContextRecord, HostError> {
        Ok(ContextRecord::from_env(&|name| (self.getenv)(name))?)
    }
}

/// An in-memory sink. Clones share the buffer, so one clone can be handed to
/// a [`Workflow`] and another kept to read what was written.
#[derive(Clone, Debug, Default)]
pub struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl BufferWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests;
