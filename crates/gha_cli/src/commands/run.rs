//! The `run` command: parse a script and execute it with the actions module
//! predeclared.

use gha_actions::{ActionsModule, DEFAULT_MODULE_NAME, MODULE};
use gha_eval::{stderr_handler, ExecOutcome, Interpreter, SharedPrintHandler, Value};
use gha_syntax::parse;
use tracing::info;

use super::{located, read_file, EXIT_FAILURE, EXIT_OK};

#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Name the module is bound to in the script.
    pub module_name: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            module_name: DEFAULT_MODULE_NAME.to_string(),
        }
    }
}

impl RunOptions {
    /// Parse `run` flags. Returns the script path, or a usage message.
    pub fn parse(args: &[String]) -> Result<(String, RunOptions), String> {
        let mut options = RunOptions::default();
        let mut path = None;
        for arg in args {
            if let Some(name) = arg.strip_prefix("--module=") {
                if name.is_empty() {
                    return Err("--module needs a name".to_string());
                }
                options.module_name = name.to_string();
            } else if arg.starts_with('-') {
                return Err(format!("unknown option '{arg}'"));
            } else if path.is_none() {
                path = Some(arg.clone());
            } else {
                return Err(format!("unexpected argument '{arg}'"));
            }
        }
        let path = path.ok_or_else(|| "missing script path".to_string())?;
        Ok((path, options))
    }
}

/// Run the script at `path` against the process environment and stdout.
pub fn run_file(path: &str, options: &RunOptions) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            return EXIT_FAILURE;
        }
    };
    let module = if options.module_name == DEFAULT_MODULE_NAME {
        MODULE.clone()
    } else {
        ActionsModule::builder().name(&options.module_name).build()
    };
    match run_source(path, &source, &options.module_name, module, stderr_handler()) {
        Ok(()) => EXIT_OK,
        Err(msg) => {
            eprintln!("{msg}");
            EXIT_FAILURE
        }
    }
}

/// Parse and execute `source`, with `module` bound as `module_name`.
/// On failure returns the message to report.
pub fn run_source(
    path: &str,
    source: &str,
    module_name: &str,
    module: Value,
    print: SharedPrintHandler,
) -> Result<(), String> {
    let program =
        parse(source).map_err(|err| located(path, source, Some(err.span), &err.message))?;
    let mut interp = Interpreter::builder()
        .thread_name(path)
        .predeclare(module_name, module)
        .print_handler(print)
        .build();
    match interp.exec(&program) {
        Ok(ExecOutcome::Completed) => Ok(()),
        Ok(ExecOutcome::Cancelled { reason }) => {
            info!(path, %reason, "script cancelled");
            Err(format!("cancelled: {reason}"))
        }
        Err(err) => Err(located(path, source, err.span, &err.message)),
    }
}

#[cfg(test)]
mod tests;
