//! Subcommands. Each returns the process exit code instead of exiting, so
//! `main` owns the process and tests can call them directly.

mod check;
mod run;

pub use check::check_file;
pub use run::{run_file, run_source, RunOptions};

/// Script ran to completion.
pub const EXIT_OK: i32 = 0;
/// Script failed, was cancelled, or did not parse.
pub const EXIT_FAILURE: i32 = 1;
/// Bad command line.
pub const EXIT_USAGE: i32 = 2;

/// Read a script, reporting failures the way the other commands report
/// script errors.
pub(crate) fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// `path:line:col: message`.
pub(crate) fn located(
    path: &str,
    source: &str,
    span: Option<gha_syntax::Span>,
    message: &str,
) -> String {
    match span {
        Some(span) => {
            let (line, col) = span.line_col(source);
            format!("{path}:{line}:{col}: {message}")
        }
        None => format!("{path}: {message}"),
    }
}
