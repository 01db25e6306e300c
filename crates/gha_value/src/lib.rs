//! Value model and native-call contracts for the githubactions script runtime.
//!
//! - [`Value`]: the script value union, with shared freezable lists and dicts
//! - [`EvalError`]: typed evaluation errors, built through `#[cold]` factories
//! - [`Thread`] / [`RunStatus`]: per-run state, including cancellation
//! - [`Signature`]: parameter contracts checked before a native body runs
//! - print handlers for the `print` builtin

mod args;
pub mod errors;
pub mod print_handler;
mod thread;
mod value;

pub use args::{Args, Param, ParamKind, Signature, Unpacked};
pub use errors::{ContractViolation, EvalError, EvalErrorKind, EvalResult};
pub use print_handler::{
    buffer_handler, silent_handler, stderr_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use thread::{RunStatus, Thread};
pub use value::{
    format_float, Builtin, BuiltinFn, DictKey, DictValue, Heap, ListValue, ModuleValue,
    StructValue, Value,
};
