//! Run thread: per-execution state shared with native functions.

use std::fmt;

use parking_lot::Mutex;

use crate::print_handler::{stderr_handler, SharedPrintHandler};

/// Execution state of one script run.
///
/// `Running` is initial. `Cancelled` and `Completed` are terminal: once
/// either is entered no transition leaves it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Cancelled(String),
    Completed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Running => f.write_str("running"),
            RunStatus::Cancelled(reason) => write!(f, "cancelled: {reason}"),
            RunStatus::Completed => f.write_str("completed"),
        }
    }
}

/// The logical thread a script runs on.
///
/// Native functions receive it with every call. They may print through it
/// and may request cancellation; only the evaluator acts on a cancellation.
pub struct Thread {
    name: String,
    print: SharedPrintHandler,
    status: Mutex<RunStatus>,
}

impl Thread {
    pub fn new(name: impl Into<String>) -> Self {
        Thread {
            name: name.into(),
            print: stderr_handler(),
            status: Mutex::new(RunStatus::Running),
        }
    }

    #[must_use]
    pub fn with_print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print = handler;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print
    }

    pub fn status(&self) -> RunStatus {
        self.status.lock().clone()
    }

    /// The cancellation reason, if the thread has been cancelled.
    pub fn cancellation(&self) -> Option<String> {
        match &*self.status.lock() {
            RunStatus::Cancelled(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    /// Request cancellation. Returns `false` if the thread had already left
    /// `Running`, in which case nothing changes.
    pub fn cancel(&self, reason: impl Into<String>) -> bool {
        let mut status = self.status.lock();
        if *status != RunStatus::Running {
            return false;
        }
        *status = RunStatus::Cancelled(reason.into());
        true
    }

    /// Mark a normal finish. No effect unless still `Running`.
    pub fn complete(&self) -> bool {
        let mut status = self.status.lock();
        if *status != RunStatus::Running {
            return false;
        }
        *status = RunStatus::Completed;
        true
    }
}

impl fmt::Debug for Thread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Thread")
            .field("name", &self.name)
            .field("status", &*self.status.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn starts_running() {
        let thread = Thread::new("main");
        assert_eq!(thread.status(), RunStatus::Running);
        assert_eq!(thread.cancellation(), None);
    }

    #[test]
    fn cancel_is_terminal() {
        let thread = Thread::new("main");
        assert!(thread.cancel("boom"));
        assert!(!thread.cancel("second"));
        assert!(!thread.complete());
        assert_eq!(thread.status(), RunStatus::Cancelled("boom".into()));
        assert_eq!(thread.cancellation().as_deref(), Some("boom"));
    }

    #[test]
    fn completed_cannot_be_cancelled() {
        let thread = Thread::new("main");
        assert!(thread.complete());
        assert!(!thread.cancel("late"));
        assert_eq!(thread.status(), RunStatus::Completed);
    }

    #[test]
    fn status_display() {
        assert_eq!(RunStatus::Cancelled("boom".into()).to_string(), "cancelled: boom");
    }
}
