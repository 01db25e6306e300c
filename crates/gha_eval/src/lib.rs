//! Interpreter for the githubactions script dialect.
//!
//! # Architecture
//!
//! - `Environment`: globals, embedder-predeclared names, universal builtins
//! - `evaluate_binary` / `evaluate_unary`: direct enum dispatch over values
//! - `methods`: built-in methods on dicts, lists and strings
//! - `Interpreter`: the statement loop, which observes cancellation
//!
//! Value types and errors come from `gha_value` and are re-exported here.

mod environment;
mod format;
pub mod interpreter;
mod methods;
mod operators;
mod universe;

pub use environment::Environment;
pub use format::percent_format;
pub use interpreter::{ExecOutcome, Interpreter, InterpreterBuilder};
pub use operators::{evaluate_binary, evaluate_unary};

pub use gha_value::{
    buffer_handler, silent_handler, stderr_handler, Args, EvalError, EvalErrorKind, EvalResult,
    RunStatus, SharedPrintHandler, Thread, Value,
};
