//! Scripts run end to end with the module predeclared.

#![allow(clippy::unwrap_used)]

mod common;

use common::{event_fixture, fixture, with_event, Fixture};
use gha_eval::{buffer_handler, EvalError, ExecOutcome, Interpreter, RunStatus, SharedPrintHandler, Value};
use gha_syntax::parse;
use pretty_assertions::assert_eq;

struct Run {
    interp: Interpreter,
    printed: SharedPrintHandler,
    outcome: Result<ExecOutcome, EvalError>,
}

fn exec(f: &Fixture, source: &str) -> Run {
    let printed = buffer_handler();
    let mut interp = Interpreter::builder()
        .predeclare("githubactions", f.module.clone())
        .print_handler(printed.clone())
        .build();
    let outcome = interp.exec(&parse(source).unwrap());
    Run {
        interp,
        printed,
        outcome,
    }
}

#[test]
fn auto_merge_method_from_event() {
    let f = with_event(r#"{"pull_request":{"auto_merge":{"merge_method":"squash"}}}"#);
    let run = exec(
        &f,
        r#"method = githubactions.context().event["pull_request"]["auto_merge"]["merge_method"]"#,
    );
    assert_eq!(run.outcome.unwrap(), ExecOutcome::Completed);
    assert_eq!(run.interp.global("method"), Some(&Value::string("squash")));
}

#[test]
fn pr_title_check() {
    let event = event_fixture();
    let f = fixture(&[("GITHUB_EVENT_PATH", event.as_str())]);
    let run = exec(
        &f,
        r#"
ctx = githubactions.context()
pr = ctx.event.get("pull_request", {})
pr_title = pr.get("title", "")
print("PR title:", pr_title)
"#,
    );
    assert_eq!(run.outcome.unwrap(), ExecOutcome::Completed);
    assert_eq!(run.printed.get_output(), "PR title: Pull request title\n");
}

#[test]
fn large_ids_keep_full_precision() {
    let event = event_fixture();
    let f = fixture(&[("GITHUB_EVENT_PATH", event.as_str())]);
    let run = exec(
        &f,
        r#"pr = githubactions.context().event["pull_request"]
id = pr["id"]
text = str(id)
score = pr["score"]
keys = pr["auto_merge"].keys()"#,
    );
    assert_eq!(run.outcome.unwrap(), ExecOutcome::Completed);
    assert_eq!(
        run.interp.global("text"),
        Some(&Value::string("18446744073709551617"))
    );
    assert_eq!(run.interp.global("score"), Some(&Value::float(0.75)));
    assert_eq!(run.interp.global("keys").unwrap().repr(), r#"["merge_method"]"#);
}

#[test]
fn context_is_immutable() {
    let event = event_fixture();
    let f = fixture(&[("GITHUB_EVENT_PATH", event.as_str())]);
    let run = exec(&f, r#"githubactions.context().event["action"] = "closed""#);
    let err = run.outcome.unwrap_err();
    assert_eq!(err.message, "cannot modify frozen dict value");

    let run = exec(&f, r#"githubactions.context().sha = "x""#);
    let err = run.outcome.unwrap_err();
    assert_eq!(err.message, "cannot set .sha field of immutable struct");
}

#[test]
fn fatal_stops_the_script() {
    let f = fixture(&[]);
    let run = exec(
        &f,
        "githubactions.notice(\"start\")\n\
         githubactions.fatal(\"boom\")\n\
         githubactions.notice(\"unreachable\")\n\
         after = True",
    );
    assert_eq!(
        run.outcome.unwrap(),
        ExecOutcome::Cancelled {
            reason: "boom".into()
        }
    );
    assert_eq!(f.out.contents(), "::notice::start\n::error::boom\n");
    assert_eq!(run.interp.global("after"), None);
    assert_eq!(
        run.interp.thread().status(),
        RunStatus::Cancelled("boom".into())
    );
}

#[test]
fn fatal_inside_an_expression_unwinds_it() {
    let f = fixture(&[]);
    let run = exec(
        &f,
        r#"x = [githubactions.fatal("stop"), githubactions.notice("same statement")]"#,
    );
    assert!(matches!(run.outcome, Ok(ExecOutcome::Cancelled { .. })));
    assert_eq!(f.out.contents(), "::error::stop\n");
    assert_eq!(run.interp.global("x"), None);
}

#[test]
fn fail_is_not_cancellation() {
    let f = fixture(&[]);
    let run = exec(&f, "fail(\"bad\")\ngithubactions.notice(\"unreachable\")");
    let err = run.outcome.unwrap_err();
    assert_eq!(err.message, "fail: bad");
    assert_eq!(run.interp.thread().status(), RunStatus::Running);
    assert_eq!(f.out.contents(), "");
}

#[test]
fn argument_errors_reach_the_embedder_with_a_span() {
    let f = fixture(&[]);
    let source = "x = 1\ngithubactions.add_mask()";
    let run = exec(&f, source);
    let err = run.outcome.unwrap_err();
    assert_eq!(err.message, "githubactions.add_mask: missing argument for value");
    assert_eq!(err.span.unwrap().line_col(source), (2, 1));
}

#[test]
fn outputs_and_inputs() {
    let f = fixture(&[("INPUT_TARGET", "prod")]);
    let run = exec(
        &f,
        r#"target = githubactions.get_input("target")
missing = githubactions.get_input("missing")
githubactions.set_output("deployed", "%s-%d" % [target, 3])
githubactions.set_env(name = "STAGE", value = target.upper())
githubactions.add_mask(target)"#,
    );
    assert_eq!(run.outcome.unwrap(), ExecOutcome::Completed);
    assert_eq!(run.interp.global("missing"), Some(&Value::string("")));
    assert_eq!(
        f.file("GITHUB_OUTPUT"),
        "deployed<<_GitHubActionsFileCommandDelimeter_\nprod-3\n_GitHubActionsFileCommandDelimeter_\n"
    );
    assert_eq!(
        f.file("GITHUB_ENV"),
        "STAGE<<_GitHubActionsFileCommandDelimeter_\nPROD\n_GitHubActionsFileCommandDelimeter_\n"
    );
    assert_eq!(f.out.contents(), "::add-mask::prod\n");
}
