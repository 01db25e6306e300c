#![allow(clippy::unwrap_used)]

use super::*;
use gha_eval::buffer_handler;
use gha_workflow::BufferWriter;
use pretty_assertions::assert_eq;

fn module(name: &str, out: &BufferWriter) -> Value {
    ActionsModule::builder()
        .name(name)
        .sink(out.clone())
        .getenv(|var| (var == "INPUT_WHO").then(|| "world".to_string()))
        .build()
}

#[test]
fn completed_script() {
    let out = BufferWriter::new();
    let printed = buffer_handler();
    let source = "who = githubactions.get_input(\"who\")\n\
                  githubactions.notice(\"hello %s\" % who)\n\
                  print(\"done\")";
    run_source(
        "hello.star",
        source,
        "githubactions",
        module("githubactions", &out),
        printed.clone(),
    )
    .unwrap();
    assert_eq!(out.contents(), "::notice::hello world\n");
    assert_eq!(printed.get_output(), "done\n");
}

#[test]
fn cancelled_script_reports_reason() {
    let out = BufferWriter::new();
    let err = run_source(
        "fatal.star",
        "githubactions.fatal(\"boom\")\nprint(\"never\")",
        "githubactions",
        module("githubactions", &out),
        buffer_handler(),
    )
    .unwrap_err();
    assert_eq!(err, "cancelled: boom");
    assert_eq!(out.contents(), "::error::boom\n");
}

#[test]
fn script_error_has_location() {
    let out = BufferWriter::new();
    let err = run_source(
        "bad.star",
        "x = 1\ny = x.missing",
        "githubactions",
        module("githubactions", &out),
        buffer_handler(),
    )
    .unwrap_err();
    assert_eq!(err, "bad.star:2:5: int has no .missing field or method");
}

#[test]
fn parse_error_has_location() {
    let out = BufferWriter::new();
    let err = run_source(
        "bad.star",
        "a b",
        "githubactions",
        module("githubactions", &out),
        buffer_handler(),
    )
    .unwrap_err();
    assert!(err.starts_with("bad.star:1:3: expected end of statement"), "{err}");
}

#[test]
fn custom_module_name() {
    let out = BufferWriter::new();
    run_source(
        "gh.star",
        "gh.add_mask(\"s3cret\")",
        "gh",
        module("gh", &out),
        buffer_handler(),
    )
    .unwrap();
    assert_eq!(out.contents(), "::add-mask::s3cret\n");
}

#[test]
fn option_parsing() {
    let args = |list: &[&str]| list.iter().map(ToString::to_string).collect::<Vec<_>>();

    let (path, options) = RunOptions::parse(&args(&["a.star"])).unwrap();
    assert_eq!(path, "a.star");
    assert_eq!(options.module_name, "githubactions");

    let (_, options) = RunOptions::parse(&args(&["--module=gh", "a.star"])).unwrap();
    assert_eq!(options.module_name, "gh");

    assert_eq!(
        RunOptions::parse(&args(&[])).unwrap_err(),
        "missing script path"
    );
    assert_eq!(
        RunOptions::parse(&args(&["--verbose", "a.star"])).unwrap_err(),
        "unknown option '--verbose'"
    );
    assert_eq!(
        RunOptions::parse(&args(&["a.star", "b.star"])).unwrap_err(),
        "unexpected argument 'b.star'"
    );
}
