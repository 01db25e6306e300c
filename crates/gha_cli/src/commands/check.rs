//! The `check` command: parse a script without running it.

use gha_syntax::parse;

use super::{located, read_file, EXIT_FAILURE, EXIT_OK};

pub fn check_file(path: &str) -> i32 {
    let source = match read_file(path) {
        Ok(source) => source,
        Err(msg) => {
            eprintln!("{msg}");
            return EXIT_FAILURE;
        }
    };
    match parse(&source) {
        Ok(program) => {
            tracing::debug!(path, statements = program.statements.len(), "parsed");
            EXIT_OK
        }
        Err(err) => {
            eprintln!("{}", located(path, &source, Some(err.span), &err.message));
            EXIT_FAILURE
        }
    }
}
