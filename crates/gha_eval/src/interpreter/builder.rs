//! `InterpreterBuilder` for creating `Interpreter` instances.

use rustc_hash::FxHashMap;

use gha_value::{SharedPrintHandler, Thread, Value};

use super::Interpreter;
use crate::environment::Environment;

/// Builder for an [`Interpreter`].
///
/// Every dependency the interpreter has is supplied here: the names visible
/// to the script besides the universal builtins, where `print` goes, and
/// the thread name used in logs.
#[derive(Default)]
pub struct InterpreterBuilder {
    thread_name: Option<String>,
    print_handler: Option<SharedPrintHandler>,
    predeclared: FxHashMap<String, Value>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = Some(name.into());
        self
    }

    /// Set the print handler. Default is stderr.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Make `value` visible to the script as `name`.
    #[must_use]
    pub fn predeclare(mut self, name: impl Into<String>, value: Value) -> Self {
        self.predeclared.insert(name.into(), value);
        self
    }

    pub fn build(self) -> Interpreter {
        let mut thread = Thread::new(self.thread_name.unwrap_or_else(|| "main".to_string()));
        if let Some(handler) = self.print_handler {
            thread = thread.with_print_handler(handler);
        }
        Interpreter {
            env: Environment::new(self.predeclared),
            thread,
        }
    }
}
