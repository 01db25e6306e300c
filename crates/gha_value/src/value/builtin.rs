//! Native functions callable from scripts.

use std::fmt;
use std::sync::Arc;

use super::Heap;
use crate::args::Args;
use crate::errors::EvalResult;
use crate::thread::Thread;

/// Signature of a native function body.
///
/// The function receives the calling thread (so it can print or request
/// cancellation) and the raw, not yet validated arguments.
pub type BuiltinFn = dyn Fn(&Thread, Args) -> EvalResult + Send + Sync;

/// A named native function.
#[derive(Clone)]
pub struct Builtin {
    name: Heap<String>,
    func: Heap<BuiltinFn>,
}

impl Builtin {
    pub(super) fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Thread, Args) -> EvalResult + Send + Sync + 'static,
    {
        let func: Arc<BuiltinFn> = Arc::new(func);
        Builtin {
            name: Heap::new(name.into()),
            func: Heap::from_arc(func),
        }
    }

    /// Name used in diagnostics, e.g. `githubactions.add_mask`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, thread: &Thread, args: Args) -> EvalResult {
        (*self.func)(thread, args)
    }

    pub(super) fn ptr_eq(&self, other: &Builtin) -> bool {
        Heap::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<built-in function {}>", self.name())
    }
}
