#![allow(clippy::unwrap_used)]

use super::*;
use crate::errors::EvalErrorKind;
use pretty_assertions::assert_eq;

fn key(s: &str) -> DictKey {
    DictKey::from(s)
}

#[test]
fn lists_are_shared_by_reference() {
    let a = Value::list(vec![]);
    let b = a.clone();
    let Value::List(list) = &a else { unreachable!() };
    list.push(Value::int(1)).unwrap();
    assert_eq!(b.repr(), "[1]");
}

#[test]
fn dict_preserves_insertion_order() {
    let d = Value::dict([
        (key("b"), Value::int(1)),
        (key("a"), Value::int(2)),
    ]);
    let Value::Dict(dict) = &d else { unreachable!() };
    dict.insert(key("b"), Value::int(3)).unwrap();
    dict.insert(key("c"), Value::None).unwrap();
    assert_eq!(d.repr(), r#"{"b": 3, "a": 2, "c": None}"#);
}

#[test]
fn dict_keys_must_be_hashable() {
    let err = DictKey::from_value(&Value::list(vec![])).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::Unhashable {
            type_name: "list".into()
        }
    );
    assert_eq!(
        DictKey::from_value(&Value::int(7)).unwrap().to_value(),
        Value::int(7)
    );
}

#[test]
fn freeze_is_deep() {
    let inner = Value::list(vec![Value::int(1)]);
    let outer = Value::dict([(key("inner"), inner.clone())]);
    let record = Value::structure("context", vec![("event".into(), outer.clone())]);

    record.freeze();

    assert!(outer.is_frozen());
    assert!(inner.is_frozen());
    let Value::List(list) = &inner else { unreachable!() };
    let err = list.push(Value::None).unwrap_err();
    assert_eq!(err.message, "cannot modify frozen list value");
    let Value::Dict(dict) = &outer else { unreachable!() };
    let err = dict.insert(key("x"), Value::None).unwrap_err();
    assert_eq!(err.message, "cannot modify frozen dict value");
}

#[test]
fn freeze_terminates_on_cycles() {
    let a = Value::list(vec![]);
    let Value::List(list) = &a else { unreachable!() };
    list.push(a.clone()).unwrap();
    a.freeze();
    assert!(a.is_frozen());
}

#[test]
fn repr_of_cycle() {
    let a = Value::list(vec![Value::int(1)]);
    let Value::List(list) = &a else { unreachable!() };
    list.push(a.clone()).unwrap();
    assert_eq!(a.repr(), "[1, [...]]");
}

#[test]
fn equality_of_cycles_terminates() {
    let a = Value::list(vec![]);
    let b = Value::list(vec![]);
    let (Value::List(la), Value::List(lb)) = (&a, &b) else { unreachable!() };
    la.push(a.clone()).unwrap();
    lb.push(b.clone()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn structural_equality() {
    assert_eq!(Value::int(1), Value::float(1.0));
    assert_ne!(Value::int(1), Value::float(1.5));
    assert_ne!(Value::int(1), Value::Bool(true));
    assert_eq!(
        Value::dict([(key("a"), Value::int(1)), (key("b"), Value::int(2))]),
        Value::dict([(key("b"), Value::int(2)), (key("a"), Value::int(1))]),
    );
    assert_eq!(
        Value::structure("s", vec![("x".into(), Value::int(1))]),
        Value::structure("s", vec![("x".into(), Value::int(1))]),
    );
}

#[test]
fn struct_fields_sorted_by_name() {
    let s = Value::structure(
        "context",
        vec![
            ("sha".into(), Value::string("abc")),
            ("actor".into(), Value::string("octocat")),
            ("run_id".into(), Value::int(7)),
        ],
    );
    assert_eq!(
        s.repr(),
        r#"context(actor = "octocat", run_id = 7, sha = "abc")"#
    );
    let Value::Struct(record) = &s else { unreachable!() };
    assert_eq!(record.field("run_id"), Some(&Value::int(7)));
    assert_eq!(record.field("missing"), None);
}

#[test]
fn big_int_renders_exactly() {
    let n: BigInt = "99999999999999999999".parse().unwrap();
    assert_eq!(Value::big_int(n).repr(), "99999999999999999999");
}

#[test]
fn float_rendering() {
    assert_eq!(format_float(1.0), "1.0");
    assert_eq!(format_float(2.5), "2.5");
    assert_eq!(format_float(1e21), "1e21");
    assert_eq!(format_float(f64::INFINITY), "+inf");
}

#[test]
fn string_repr_and_str() {
    let s = Value::string("a \"b\"\n");
    assert_eq!(s.repr(), r#""a \"b\"\n""#);
    assert_eq!(s.to_str(), "a \"b\"\n");
}

#[test]
fn truthiness() {
    assert!(!Value::None.truth());
    assert!(!Value::int(0).truth());
    assert!(Value::int(2).truth());
    assert!(!Value::string("").truth());
    assert!(!Value::list(vec![]).truth());
    assert!(Value::dict([(key("a"), Value::None)]).truth());
}

#[test]
fn builtin_calls_through() {
    let f = Value::builtin("double", |_, args| {
        let n = args.positional[0].as_i64().unwrap_or(0);
        Ok(Value::int(n * 2))
    });
    let Value::Builtin(builtin) = &f else { unreachable!() };
    let thread = Thread::new("test");
    let out = builtin.call(&thread, Args::positional([Value::int(21)])).unwrap();
    assert_eq!(out, Value::int(42));
    assert_eq!(f.repr(), "<built-in function double>");
    assert_eq!(f, f.clone());
}

#[test]
fn module_members_are_sorted() {
    let mut members = BTreeMap::new();
    members.insert("warning".to_string(), Value::None);
    members.insert("debug".to_string(), Value::None);
    let m = Value::module("githubactions", members);
    let Value::Module(module) = &m else { unreachable!() };
    assert_eq!(module.member_names().collect::<Vec<_>>(), vec!["debug", "warning"]);
    assert_eq!(m.repr(), r#"<module "githubactions">"#);
}
