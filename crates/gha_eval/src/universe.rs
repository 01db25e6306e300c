//! Universal builtins, visible to every script: `print`, `len`, `str`,
//! `type` and `fail`.

use gha_value::errors::{argument_contract, fail, type_mismatch};
use gha_value::{Args, ContractViolation, EvalResult, Param, ParamKind, Signature, Thread, Value};
use rustc_hash::FxHashMap;

const ONE_VALUE: Signature = Signature::new(&[Param::required("x", ParamKind::Any)]);
const FAIL: Signature = Signature::new(&[Param::required("msg", ParamKind::Any)]);

/// Build the universal scope.
pub fn universe() -> FxHashMap<String, Value> {
    let mut names = FxHashMap::default();
    names.insert("print".to_string(), Value::builtin("print", print));
    names.insert("len".to_string(), Value::builtin("len", len));
    names.insert("str".to_string(), Value::builtin("str", str_));
    names.insert("type".to_string(), Value::builtin("type", type_));
    names.insert("fail".to_string(), Value::builtin("fail", fail_));
    names
}

/// `print(*args)`: arguments joined by a space, through the thread's print
/// handler.
fn print(thread: &Thread, args: Args) -> EvalResult {
    if let Some((name, _)) = args.named.first() {
        return Err(argument_contract(
            "print",
            name,
            ContractViolation::UnknownKeyword,
        ));
    }
    let line = args
        .positional
        .iter()
        .map(Value::to_str)
        .collect::<Vec<_>>()
        .join(" ");
    thread.print_handler().println(&line);
    Ok(Value::None)
}

fn len(_: &Thread, args: Args) -> EvalResult {
    let args = ONE_VALUE.unpack("len", args)?;
    let n = match args.get(0) {
        Some(Value::Str(s)) => s.chars().count(),
        Some(Value::List(l)) => l.len(),
        Some(Value::Dict(d)) => d.len(),
        Some(other) => return Err(type_mismatch("string, list or dict", other.type_name())),
        None => 0,
    };
    Ok(Value::int(i64::try_from(n).unwrap_or(i64::MAX)))
}

fn str_(_: &Thread, args: Args) -> EvalResult {
    let args = ONE_VALUE.unpack("str", args)?;
    Ok(Value::string(args.get(0).map(Value::to_str).unwrap_or_default()))
}

fn type_(_: &Thread, args: Args) -> EvalResult {
    let args = ONE_VALUE.unpack("type", args)?;
    Ok(Value::string(args.get(0).map_or("NoneType", Value::type_name)))
}

/// `fail(msg)`: an ordinary error the embedder receives from `exec`.
fn fail_(_: &Thread, args: Args) -> EvalResult {
    let args = FAIL.unpack("fail", args)?;
    Err(fail(args.get(0).map(Value::to_str).unwrap_or_default()))
}
