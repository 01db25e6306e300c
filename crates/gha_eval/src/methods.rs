//! Built-in methods on dicts, lists and strings.
//!
//! `recv.name` evaluates to a builtin bound to `recv`; calling it lands in
//! [`call_method`], which checks the method's signature and dispatches.

use gha_value::{
    Args, DictKey, DictValue, EvalResult, ListValue, Param, ParamKind, Signature, Value,
};

const NO_ARGS: Signature = Signature::EMPTY;
const DICT_GET: Signature = Signature::new(&[
    Param::required("key", ParamKind::Any),
    Param::optional("default", ParamKind::Any),
]);
const ONE_VALUE: Signature = Signature::new(&[Param::required("x", ParamKind::Any)]);
const ONE_STR: Signature = Signature::new(&[Param::required("x", ParamKind::Str)]);

const DICT_METHODS: &[&str] = &["get", "items", "keys", "values"];
const LIST_METHODS: &[&str] = &["append"];
const STR_METHODS: &[&str] = &["endswith", "lower", "startswith", "strip", "upper"];

/// Whether `receiver` has a built-in method called `name`.
pub fn has_method(receiver: &Value, name: &str) -> bool {
    let table = match receiver {
        Value::Dict(_) => DICT_METHODS,
        Value::List(_) => LIST_METHODS,
        Value::Str(_) => STR_METHODS,
        _ => return false,
    };
    table.contains(&name)
}

/// Call method `name` on `receiver`. The caller has checked `has_method`.
pub fn call_method(receiver: &Value, name: &str, args: Args) -> EvalResult {
    let qualified = format!("{}.{name}", receiver.type_name());
    match receiver {
        Value::Dict(dict) => dict_method(dict, name, &qualified, args),
        Value::List(list) => list_method(list, name, &qualified, args),
        Value::Str(s) => str_method(s, name, &qualified, args),
        other => Err(gha_value::errors::undefined_attr(other.type_name(), name)),
    }
}

fn dict_method(dict: &DictValue, name: &str, qualified: &str, args: Args) -> EvalResult {
    match name {
        "get" => {
            let mut args = DICT_GET.unpack(qualified, args)?;
            let key = DictKey::from_value(args.get(0).unwrap_or(&Value::None))?;
            Ok(dict
                .get(&key)
                .or_else(|| args.take(1))
                .unwrap_or(Value::None))
        }
        "keys" => {
            NO_ARGS.unpack(qualified, args)?;
            Ok(Value::list(dict.keys().iter().map(DictKey::to_value).collect()))
        }
        "values" => {
            NO_ARGS.unpack(qualified, args)?;
            Ok(Value::list(dict.entries().into_iter().map(|(_, v)| v).collect()))
        }
        "items" => {
            NO_ARGS.unpack(qualified, args)?;
            Ok(Value::list(
                dict.entries()
                    .into_iter()
                    .map(|(k, v)| Value::list(vec![k.to_value(), v]))
                    .collect(),
            ))
        }
        _ => Err(gha_value::errors::undefined_attr("dict", name)),
    }
}

fn list_method(list: &ListValue, name: &str, qualified: &str, args: Args) -> EvalResult {
    match name {
        "append" => {
            let mut args = ONE_VALUE.unpack(qualified, args)?;
            list.push(args.take(0).unwrap_or(Value::None))?;
            Ok(Value::None)
        }
        _ => Err(gha_value::errors::undefined_attr("list", name)),
    }
}

fn str_method(s: &str, name: &str, qualified: &str, args: Args) -> EvalResult {
    match name {
        "startswith" => {
            let args = ONE_STR.unpack(qualified, args)?;
            Ok(Value::Bool(s.starts_with(args.str(0))))
        }
        "endswith" => {
            let args = ONE_STR.unpack(qualified, args)?;
            Ok(Value::Bool(s.ends_with(args.str(0))))
        }
        "lower" => {
            NO_ARGS.unpack(qualified, args)?;
            Ok(Value::string(s.to_lowercase()))
        }
        "upper" => {
            NO_ARGS.unpack(qualified, args)?;
            Ok(Value::string(s.to_uppercase()))
        }
        "strip" => {
            NO_ARGS.unpack(qualified, args)?;
            Ok(Value::string(s.trim()))
        }
        _ => Err(gha_value::errors::undefined_attr("string", name)),
    }
}
