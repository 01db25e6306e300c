//! The `githubactions` script module.
//!
//! Exposes GitHub Actions operations (annotations, masks, groups, inputs,
//! outputs, state, environment, PATH, job summary and the run context) to
//! scripts as builtins of one module value. Two pieces carry the weight:
//!
//! - [`marshal`]: JSON to script values, integers first with arbitrary
//!   precision, object keys in sorted order.
//! - [`OPERATIONS`]: the fixed catalog. Each entry checks its arguments
//!   against a declared [`Signature`](gha_value::Signature) before its handler
//!   runs; handler failures become script errors naming the operation.
//!
//! `fatal` is the one operation that ends a script: it logs at error level
//! and then cancels the calling thread.
//!
//! [`MODULE`] is the default instance, bound to stdout and the process
//! environment. Build others with [`ActionsModule::builder`].

use std::sync::LazyLock;

use gha_value::Value;

mod context;
mod effects;
mod errors;
mod marshal;
mod module;
mod operations;

pub use effects::Effects;
pub use errors::{ActionError, EventError, MarshalError};
pub use marshal::marshal;
pub use module::{ActionsModule, ActionsModuleBuilder, DEFAULT_MODULE_NAME};
pub use operations::{operation, Handler, OperationDescriptor, OPERATIONS};

/// The default `githubactions` module.
pub static MODULE: LazyLock<Value> = LazyLock::new(|| ActionsModule::builder().build());
