#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::fs;

use super::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const FILE_VARS: [&str; 5] = [
    "GITHUB_ENV",
    "GITHUB_OUTPUT",
    "GITHUB_PATH",
    "GITHUB_STATE",
    "GITHUB_STEP_SUMMARY",
];

struct Fixture {
    workflow: Workflow,
    out: BufferWriter,
    vars: HashMap<String, String>,
    _dir: TempDir,
}

impl Fixture {
    fn file(&self, variable: &str) -> String {
        fs::read_to_string(&self.vars[variable]).unwrap()
    }
}

/// A workflow whose file commands point at empty files in a temp dir.
/// `extra` overrides or adds variables.
fn fixture(extra: &[(&str, &str)]) -> Fixture {
    let dir = TempDir::new().unwrap();
    let mut vars = HashMap::new();
    for var in FILE_VARS {
        let path = dir.path().join(var.to_lowercase());
        fs::write(&path, "").unwrap();
        vars.insert(var.to_string(), path.display().to_string());
    }
    for (k, v) in extra {
        vars.insert((*k).to_string(), (*v).to_string());
    }
    let out = BufferWriter::new();
    let lookup = vars.clone();
    let workflow = Workflow::new(
        Box::new(out.clone()),
        Arc::new(move |name| lookup.get(name).cloned()),
    );
    Fixture {
        workflow,
        out,
        vars,
        _dir: dir,
    }
}

/// A workflow with no file command variables at all.
fn bare() -> (Workflow, BufferWriter) {
    let out = BufferWriter::new();
    let workflow = Workflow::new(Box::new(out.clone()), Arc::new(|_| None));
    (workflow, out)
}

#[test]
fn log_levels() {
    let cases = [
        (LogLevel::Log, "log message\n"),
        (LogLevel::Debug, "::debug::log message\n"),
        (LogLevel::Notice, "::notice::log message\n"),
        (LogLevel::Warning, "::warning::log message\n"),
        (LogLevel::Error, "::error::log message\n"),
    ];
    for (level, want) in cases {
        let (workflow, out) = bare();
        workflow.log(level, "log message").unwrap();
        assert_eq!(out.contents(), want, "{level}");
    }
}

#[test]
fn plain_log_keeps_existing_newline() {
    let (workflow, out) = bare();
    workflow.log(LogLevel::Log, "done\n").unwrap();
    assert_eq!(out.contents(), "done\n");
}

#[test]
fn multiline_messages_are_escaped() {
    let (workflow, out) = bare();
    workflow.log(LogLevel::Error, "50% done\nretrying").unwrap();
    assert_eq!(out.contents(), "::error::50%25 done%0Aretrying\n");
}

#[test]
fn simple_commands() {
    let f = fixture(&[]);
    f.workflow.add_matcher("matcher-path").unwrap();
    f.workflow.remove_matcher("matcher-owner").unwrap();
    f.workflow.add_mask("secret-value").unwrap();
    f.workflow.group("group title").unwrap();
    f.workflow.end_group().unwrap();
    assert_eq!(
        f.out.contents(),
        "::add-matcher::matcher-path\n\
         ::remove-matcher owner=matcher-owner::\n\
         ::add-mask::secret-value\n\
         ::group::group title\n\
         ::endgroup::\n"
    );
}

#[test]
fn key_value_file_commands() {
    let f = fixture(&[]);
    f.workflow.set_output("result", "success").unwrap();
    f.workflow.save_state("state", "saved").unwrap();
    f.workflow.set_env("MY_VAR", "my value").unwrap();
    assert_eq!(f.out.contents(), "");
    assert_eq!(
        f.file("GITHUB_OUTPUT"),
        "result<<_GitHubActionsFileCommandDelimeter_\nsuccess\n_GitHubActionsFileCommandDelimeter_\n"
    );
    assert_eq!(
        f.file("GITHUB_STATE"),
        "state<<_GitHubActionsFileCommandDelimeter_\nsaved\n_GitHubActionsFileCommandDelimeter_\n"
    );
    assert_eq!(
        f.file("GITHUB_ENV"),
        "MY_VAR<<_GitHubActionsFileCommandDelimeter_\nmy value\n_GitHubActionsFileCommandDelimeter_\n"
    );
}

#[test]
fn file_commands_append() {
    let f = fixture(&[]);
    f.workflow.add_path("/new/path").unwrap();
    f.workflow.add_path("/other/path").unwrap();
    f.workflow.add_step_summary("# Title").unwrap();
    f.workflow.add_step_summary("body").unwrap();
    assert_eq!(f.file("GITHUB_PATH"), "/new/path\n/other/path\n");
    assert_eq!(f.file("GITHUB_STEP_SUMMARY"), "# Title\nbody\n");
    assert_eq!(f.out.contents(), "");
}

#[test]
fn missing_files_fall_back_to_legacy_commands() {
    let (workflow, out) = bare();
    workflow.set_output("result", "a,b").unwrap();
    workflow.save_state("state", "saved").unwrap();
    workflow.set_env("MY_VAR", "my value").unwrap();
    workflow.add_path("/new/path").unwrap();
    assert_eq!(
        out.contents(),
        "::set-output name=result::a,b\n\
         ::save-state name=state::saved\n\
         ::set-env name=MY_VAR::my value\n\
         ::add-path::/new/path\n"
    );
}

#[test]
fn empty_variable_counts_as_unset() {
    let f = fixture(&[("GITHUB_OUTPUT", "")]);
    f.workflow.set_output("k", "v").unwrap();
    assert_eq!(f.out.contents(), "::set-output name=k::v\n");
}

#[test]
fn step_summary_has_no_legacy_form() {
    let (workflow, out) = bare();
    let err = workflow.add_step_summary("text").unwrap_err();
    assert!(matches!(
        err,
        HostError::FileCommandUnavailable {
            variable: "GITHUB_STEP_SUMMARY"
        }
    ));
    assert_eq!(out.contents(), "");
}

#[test]
fn unwritable_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("missing-dir").join("output");
    let f = fixture(&[("GITHUB_OUTPUT", target.to_str().unwrap())]);
    let err = f.workflow.set_output("k", "v").unwrap_err();
    assert!(matches!(err, HostError::FileCommand { .. }), "{err}");
    assert!(err.to_string().starts_with("appending to "));
}

#[test]
fn inputs() {
    let f = fixture(&[("INPUT_MY_INPUT", "  value  "), ("INPUT_EMPTY", "")]);
    assert_eq!(f.workflow.read_input("my input"), "value");
    assert_eq!(f.workflow.read_input("My_Input"), "value");
    assert_eq!(f.workflow.read_input("empty"), "");
    assert_eq!(f.workflow.read_input("missing"), "");
}

#[test]
fn context_reads_environment() {
    let f = fixture(&[
        ("GITHUB_ACTIONS", "true"),
        ("GITHUB_RUN_NUMBER", "42"),
        ("GITHUB_EVENT_PATH", "/tmp/event.json"),
    ]);
    let ctx = f.workflow.read_context().unwrap();
    assert!(ctx.actions);
    assert_eq!(ctx.run_number, 42);
    assert_eq!(ctx.event_path, "/tmp/event.json");
    assert_eq!(ctx.env, f.vars["GITHUB_ENV"]);
    assert_eq!(ctx.step_summary, f.vars["GITHUB_STEP_SUMMARY"]);
}

#[test]
fn context_parse_failure() {
    let f = fixture(&[("GITHUB_RUN_ID", "abc")]);
    let err = f.workflow.read_context().unwrap_err();
    assert_eq!(err.to_string(), r#"GITHUB_RUN_ID: invalid integer "abc""#);
}

#[test]
fn buffer_writer_clones_share_contents() {
    let buf = BufferWriter::new();
    let mut writer = buf.clone();
    writer.write_all(b"abc").unwrap();
    assert_eq!(buf.contents(), "abc");
    buf.clear();
    assert_eq!(writer.contents(), "");
}
