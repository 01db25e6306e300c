//! The operation catalog.
//!
//! Every script-visible operation is one [`OperationDescriptor`] in
//! [`OPERATIONS`]: its name, argument contract, declared effects and a plain
//! function handler. Module construction walks the table once; nothing is
//! registered afterwards.

use gha_value::{Param, ParamKind, Signature, Thread, Unpacked, Value};
use gha_workflow::{Host, LogLevel};
use tracing::info;

use crate::context::context_snapshot;
use crate::{ActionError, Effects};

/// Handler of one operation. Arguments have already been checked against
/// the descriptor's signature.
pub type Handler = fn(&dyn Host, &Thread, Unpacked) -> Result<Value, ActionError>;

pub struct OperationDescriptor {
    pub name: &'static str,
    pub signature: Signature,
    pub effects: Effects,
    pub handler: Handler,
}

impl std::fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("effects", &self.effects)
            .finish_non_exhaustive()
    }
}

const MSG: Signature = Signature::new(&[Param::required("msg", ParamKind::Str)]);
const PATH: Signature = Signature::new(&[Param::required("path", ParamKind::Str)]);
const OWNER: Signature = Signature::new(&[Param::required("owner", ParamKind::Str)]);
const VALUE: Signature = Signature::new(&[Param::required("value", ParamKind::Str)]);
const SUMMARY: Signature = Signature::new(&[Param::required("summary", ParamKind::Str)]);
const TITLE: Signature = Signature::new(&[Param::required("title", ParamKind::Str)]);
const NAME: Signature = Signature::new(&[Param::required("name", ParamKind::Str)]);
const NAME_VALUE: Signature = Signature::new(&[
    Param::required("name", ParamKind::Str),
    Param::required("value", ParamKind::Str),
]);

const fn op(
    name: &'static str,
    signature: Signature,
    effects: Effects,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor {
        name,
        signature,
        effects,
        handler,
    }
}

pub static OPERATIONS: &[OperationDescriptor] = &[
    op("log", MSG, Effects::EMITS_LOG, log),
    op("debug", MSG, Effects::EMITS_LOG, debug),
    op("notice", MSG, Effects::EMITS_LOG, notice),
    op("warning", MSG, Effects::EMITS_LOG, warning),
    op("error", MSG, Effects::EMITS_LOG, error),
    op(
        "fatal",
        MSG,
        Effects::EMITS_LOG.union(Effects::CANCELS),
        fatal,
    ),
    op("add_matcher", PATH, Effects::EMITS_LOG, add_matcher),
    op("remove_matcher", OWNER, Effects::EMITS_LOG, remove_matcher),
    op("add_mask", VALUE, Effects::EMITS_LOG, add_mask),
    op(
        "add_step_summary",
        SUMMARY,
        Effects::WRITES_FILE.union(Effects::READS_ENV),
        add_step_summary,
    ),
    op("group", TITLE, Effects::EMITS_LOG, group),
    op("end_group", Signature::EMPTY, Effects::EMITS_LOG, end_group),
    op("get_input", NAME, Effects::READS_ENV, get_input),
    op("set_output", NAME_VALUE, FILE_COMMAND, set_output),
    op("save_state", NAME_VALUE, FILE_COMMAND, save_state),
    op("set_env", NAME_VALUE, FILE_COMMAND, set_env),
    op("add_path", PATH, FILE_COMMAND, add_path),
    op("context", Signature::EMPTY, Effects::READS_ENV, context),
];

/// Key/value file commands: they may fall back to a legacy workflow command.
const FILE_COMMAND: Effects = Effects::MUTATES_ENV
    .union(Effects::WRITES_FILE)
    .union(Effects::READS_ENV)
    .union(Effects::EMITS_LOG);

/// Look up an operation by its script-visible name.
pub fn operation(name: &str) -> Option<&'static OperationDescriptor> {
    OPERATIONS.iter().find(|op| op.name == name)
}

fn emit(host: &dyn Host, level: LogLevel, args: &Unpacked) -> Result<Value, ActionError> {
    host.log(level, args.str(0))?;
    Ok(Value::None)
}

fn log(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    emit(host, LogLevel::Log, &args)
}

fn debug(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    emit(host, LogLevel::Debug, &args)
}

fn notice(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    emit(host, LogLevel::Notice, &args)
}

fn warning(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    emit(host, LogLevel::Warning, &args)
}

fn error(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    emit(host, LogLevel::Error, &args)
}

/// Log at error level, then cancel the calling thread. A failed log leaves
/// the thread running.
fn fatal(host: &dyn Host, thread: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    let msg = args.str(0);
    host.log(LogLevel::Error, msg)?;
    if thread.cancel(msg) {
        info!(thread = thread.name(), reason = msg, "fatal: cancelling script");
    }
    Ok(Value::None)
}

fn add_matcher(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.add_matcher(args.str(0))?;
    Ok(Value::None)
}

fn remove_matcher(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.remove_matcher(args.str(0))?;
    Ok(Value::None)
}

fn add_mask(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.add_mask(args.str(0))?;
    Ok(Value::None)
}

fn add_step_summary(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.add_step_summary(args.str(0))?;
    Ok(Value::None)
}

fn group(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.group(args.str(0))?;
    Ok(Value::None)
}

fn end_group(host: &dyn Host, _: &Thread, _: Unpacked) -> Result<Value, ActionError> {
    host.end_group()?;
    Ok(Value::None)
}

fn get_input(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    Ok(Value::string(host.read_input(args.str(0))))
}

fn set_output(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.set_output(args.str(0), args.str(1))?;
    Ok(Value::None)
}

fn save_state(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.save_state(args.str(0), args.str(1))?;
    Ok(Value::None)
}

fn set_env(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.set_env(args.str(0), args.str(1))?;
    Ok(Value::None)
}

fn add_path(host: &dyn Host, _: &Thread, args: Unpacked) -> Result<Value, ActionError> {
    host.add_path(args.str(0))?;
    Ok(Value::None)
}

fn context(host: &dyn Host, _: &Thread, _: Unpacked) -> Result<Value, ActionError> {
    context_snapshot(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn catalog_names_are_unique_and_complete() {
        let mut names: Vec<&str> = OPERATIONS.iter().map(|op| op.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), OPERATIONS.len());
        assert_eq!(
            names,
            vec![
                "add_mask",
                "add_matcher",
                "add_path",
                "add_step_summary",
                "context",
                "debug",
                "end_group",
                "error",
                "fatal",
                "get_input",
                "group",
                "log",
                "notice",
                "remove_matcher",
                "save_state",
                "set_env",
                "set_output",
                "warning",
            ]
        );
    }

    #[test]
    fn only_fatal_cancels() {
        let cancelling: Vec<&str> = OPERATIONS
            .iter()
            .filter(|op| op.effects.contains(Effects::CANCELS))
            .map(|op| op.name)
            .collect();
        assert_eq!(cancelling, vec!["fatal"]);
    }

    #[test]
    fn read_only_operations() {
        let read_only: Vec<&str> = OPERATIONS
            .iter()
            .filter(|op| op.effects.is_read_only())
            .map(|op| op.name)
            .collect();
        assert_eq!(read_only, vec!["get_input", "context"]);
    }

    #[test]
    fn lookup_by_name() {
        let op = operation("set_output").map(|op| op.signature.params().len());
        assert_eq!(op, Some(2));
        assert!(operation("set-output").is_none());
    }
}
