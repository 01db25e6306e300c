//! Shared fixture: a module bound to an in-memory sink and temp files.

#![allow(clippy::unwrap_used, dead_code)]

use std::collections::HashMap;
use std::fs;

use gha_actions::ActionsModule;
use gha_value::{Args, EvalResult, Thread, Value};
use gha_workflow::BufferWriter;
use tempfile::TempDir;

const FILE_VARS: [&str; 5] = [
    "GITHUB_ENV",
    "GITHUB_OUTPUT",
    "GITHUB_PATH",
    "GITHUB_STATE",
    "GITHUB_STEP_SUMMARY",
];

pub struct Fixture {
    pub module: Value,
    pub out: BufferWriter,
    pub thread: Thread,
    pub vars: HashMap<String, String>,
    pub dir: TempDir,
}

/// File command variables point at empty temp files; `vars` add to or
/// override them.
pub fn fixture(vars: &[(&str, &str)]) -> Fixture {
    build(TempDir::new().unwrap(), vars)
}

/// A fixture whose `GITHUB_EVENT_PATH` names a file holding `event`.
pub fn with_event(event: &str) -> Fixture {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("event.json");
    fs::write(&path, event).unwrap();
    let path = path.display().to_string();
    build(dir, &[("GITHUB_EVENT_PATH", path.as_str())])
}

fn build(dir: TempDir, vars: &[(&str, &str)]) -> Fixture {
    let mut env = HashMap::new();
    for var in FILE_VARS {
        let path = dir.path().join(var.to_lowercase());
        fs::write(&path, "").unwrap();
        env.insert(var.to_string(), path.display().to_string());
    }
    for (k, v) in vars {
        env.insert((*k).to_string(), (*v).to_string());
    }
    let out = BufferWriter::new();
    let lookup = env.clone();
    let module = ActionsModule::builder()
        .sink(out.clone())
        .getenv(move |name| lookup.get(name).cloned())
        .build();
    Fixture {
        module,
        out,
        thread: Thread::new("test"),
        vars: env,
        dir,
    }
}

impl Fixture {
    pub fn member(&self, name: &str) -> Value {
        let Value::Module(module) = &self.module else {
            panic!("not a module");
        };
        module.member(name).cloned().unwrap()
    }

    pub fn call(&self, name: &str, args: Args) -> EvalResult {
        let Value::Builtin(builtin) = self.member(name) else {
            panic!("{name} is not a builtin");
        };
        builtin.call(&self.thread, args)
    }

    pub fn call1(&self, name: &str, arg: &str) -> EvalResult {
        self.call(name, Args::positional([Value::string(arg)]))
    }

    pub fn file(&self, var: &str) -> String {
        fs::read_to_string(&self.vars[var]).unwrap()
    }
}

/// The checked-in event payload.
pub fn event_fixture() -> String {
    format!("{}/testdata/event.json", env!("CARGO_MANIFEST_DIR"))
}
