//! Assembling the `githubactions` module value.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::sync::Arc;

use gha_value::{Args, EvalResult, Thread, Value};
use gha_workflow::{process_getenv, GetenvFn, Host, Workflow};
use tracing::debug;

use crate::operations::{OperationDescriptor, OPERATIONS};

/// Default module name, as scripts see it.
pub const DEFAULT_MODULE_NAME: &str = "githubactions";

/// Entry point for building module instances.
pub struct ActionsModule;

impl ActionsModule {
    pub fn builder() -> ActionsModuleBuilder {
        ActionsModuleBuilder::default()
    }

    /// Module named `name` whose operations call `host`.
    pub fn with_host(name: &str, host: Arc<dyn Host>) -> Value {
        let members: BTreeMap<String, Value> = OPERATIONS
            .iter()
            .map(|op| (op.name.to_string(), bind(name, op, Arc::clone(&host))))
            .collect();
        debug!(module = name, operations = members.len(), "built module");
        Value::module(name, members)
    }
}

/// Builder for a module instance.
///
/// Either supply a ready [`Host`], or a sink and environment lookup for the
/// default [`Workflow`] host. Unset parts fall back to stdout and the process
/// environment.
#[derive(Default)]
pub struct ActionsModuleBuilder {
    name: Option<String>,
    sink: Option<Box<dyn Write + Send>>,
    getenv: Option<GetenvFn>,
    host: Option<Arc<dyn Host>>,
}

impl ActionsModuleBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Where workflow commands are written.
    #[must_use]
    pub fn sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn getenv<F>(mut self, getenv: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.getenv = Some(Arc::new(getenv));
        self
    }

    /// Use `host` directly. Takes precedence over `sink` and `getenv`.
    #[must_use]
    pub fn host(mut self, host: Arc<dyn Host>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn build(self) -> Value {
        let name = self
            .name
            .unwrap_or_else(|| DEFAULT_MODULE_NAME.to_string());
        let host = self.host.unwrap_or_else(|| {
            let sink = self.sink.unwrap_or_else(|| Box::new(io::stdout()));
            let getenv = self.getenv.unwrap_or_else(process_getenv);
            Arc::new(Workflow::new(sink, getenv))
        });
        ActionsModule::with_host(&name, host)
    }
}

/// Wrap one catalog entry as a builtin named `module.operation`.
fn bind(module: &str, op: &'static OperationDescriptor, host: Arc<dyn Host>) -> Value {
    let qualified = format!("{module}.{}", op.name);
    Value::builtin(qualified.clone(), move |thread, args| {
        invoke(op, host.as_ref(), &qualified, thread, args)
    })
}

fn invoke(
    op: &OperationDescriptor,
    host: &dyn Host,
    qualified: &str,
    thread: &Thread,
    args: Args,
) -> EvalResult {
    let args = op.signature.unpack(qualified, args)?;
    debug!(operation = qualified, effects = ?op.effects, "invoke");
    (op.handler)(host, thread, args).map_err(|err| {
        debug!(operation = qualified, error = %err, "operation failed");
        err.into_eval(qualified)
    })
}
