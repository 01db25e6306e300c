//! Print handler for the `print` builtin.
//!
//! Script `print` output never goes to stdout: stdout carries the workflow
//! command protocol and stray lines there would be parsed by the runner.
//! - Native: stderr (default)
//! - Tests: buffer for assertions
//! - Silent: discarded
//!
//! Enum dispatch, no trait objects.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes each line to stderr.
#[derive(Default)]
pub struct StderrPrintHandler;

impl StderrPrintHandler {
    pub fn println(&self, msg: &str) {
        let mut stderr = std::io::stderr().lock();
        // A closed stderr is not worth failing a script over.
        let _ = writeln!(stderr, "{msg}");
    }
}

/// Captures output to a buffer.
#[derive(Default)]
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stderr(StderrPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn println(&self, msg: &str) {
        match self {
            Self::Stderr(h) => h.println(msg),
            Self::Buffer(h) => h.println(msg),
            Self::Silent => {}
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stderr(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

pub fn stderr_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stderr(StderrPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
