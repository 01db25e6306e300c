#![allow(clippy::unwrap_used)]

use super::*;
use gha_value::EvalErrorKind;
use pretty_assertions::assert_eq;

fn big(s: &str) -> Value {
    Value::big_int(s.parse().unwrap())
}

#[test]
fn int_arithmetic_is_arbitrary_precision() {
    let sum = evaluate_binary(BinaryOp::Add, &big("99999999999999999999"), &Value::int(1)).unwrap();
    assert_eq!(sum, big("100000000000000000000"));
}

#[test]
fn floor_division_and_modulo_round_down() {
    assert_eq!(
        evaluate_binary(BinaryOp::FloorDiv, &Value::int(-7), &Value::int(2)).unwrap(),
        Value::int(-4)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Mod, &Value::int(-7), &Value::int(2)).unwrap(),
        Value::int(1)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Mod, &Value::int(7), &Value::int(-2)).unwrap(),
        Value::int(-1)
    );
}

#[test]
fn true_division_yields_float() {
    assert_eq!(
        evaluate_binary(BinaryOp::Div, &Value::int(7), &Value::int(2)).unwrap(),
        Value::float(3.5)
    );
}

#[test]
fn division_by_zero_is_an_error() {
    for op in [BinaryOp::Div, BinaryOp::FloorDiv, BinaryOp::Mod] {
        let err = evaluate_binary(op, &Value::int(1), &Value::int(0)).unwrap_err();
        assert_eq!(err.message, "division by zero");
    }
    let err = evaluate_binary(BinaryOp::Div, &Value::float(1.0), &Value::float(0.0)).unwrap_err();
    assert_eq!(err.message, "division by zero");
}

#[test]
fn mixed_numeric_comparison() {
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, &Value::int(1), &Value::float(1.5)).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Eq, &Value::int(2), &Value::float(2.0)).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn string_and_list_concatenation() {
    assert_eq!(
        evaluate_binary(BinaryOp::Add, &Value::string("a"), &Value::string("b")).unwrap(),
        Value::string("ab")
    );
    let joined = evaluate_binary(
        BinaryOp::Add,
        &Value::list(vec![Value::int(1)]),
        &Value::list(vec![Value::int(2)]),
    )
    .unwrap();
    assert_eq!(joined.repr(), "[1, 2]");
}

#[test]
fn repetition() {
    assert_eq!(
        evaluate_binary(BinaryOp::Mul, &Value::string("ab"), &Value::int(3)).unwrap(),
        Value::string("ababab")
    );
    assert_eq!(
        evaluate_binary(BinaryOp::Mul, &Value::int(-1), &Value::string("ab")).unwrap(),
        Value::string("")
    );
}

#[test]
fn oversized_repetition_is_an_error() {
    let huge = big("99999999999999999999");
    let err = evaluate_binary(BinaryOp::Mul, &Value::string("ab"), &huge).unwrap_err();
    assert_eq!(err.message, "string repetition is too large");

    let list = Value::list(vec![Value::int(1), Value::int(2)]);
    let err = evaluate_binary(BinaryOp::Mul, &huge, &list).unwrap_err();
    assert_eq!(err.message, "list repetition is too large");

    // Fits in usize, but the product does not.
    let count = Value::int(i64::MAX);
    let err = evaluate_binary(BinaryOp::Mul, &Value::string("ab"), &count).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::RepetitionTooLarge { .. }));
}

#[test]
fn repetition_at_the_limit() {
    let over = Value::int(i64::try_from(MAX_REPEAT_LEN).unwrap() + 1);
    assert!(evaluate_binary(BinaryOp::Mul, &Value::string("a"), &over).is_err());

    let huge = big("99999999999999999999");
    let empty = Value::string("");
    assert_eq!(evaluate_binary(BinaryOp::Mul, &empty, &huge).unwrap(), empty);
    let empty = Value::list(Vec::new());
    let count = Value::int(i64::MAX);
    assert_eq!(
        evaluate_binary(BinaryOp::Mul, &empty, &count).unwrap(),
        Value::list(Vec::new())
    );
}

#[test]
fn membership() {
    let d = Value::dict([(DictKey::from("pull_request"), Value::None)]);
    assert_eq!(
        evaluate_binary(BinaryOp::In, &Value::string("pull_request"), &d).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::NotIn, &Value::string("push"), &d).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::In, &Value::string("ash"), &Value::string("squash")).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_binary(BinaryOp::In, &Value::int(2), &Value::list(vec![Value::int(2)])).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn list_ordering_is_lexicographic() {
    let a = Value::list(vec![Value::int(1), Value::int(2)]);
    let b = Value::list(vec![Value::int(1), Value::int(3)]);
    assert_eq!(
        evaluate_binary(BinaryOp::Lt, &a, &b).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn invalid_operands() {
    let err = evaluate_binary(BinaryOp::Sub, &Value::string("a"), &Value::int(1)).unwrap_err();
    assert_eq!(err.message, "unknown binary op: string - int");
    let err = evaluate_binary(BinaryOp::Lt, &Value::None, &Value::int(1)).unwrap_err();
    assert_eq!(err.message, "unknown binary op: NoneType < int");
}

#[test]
fn unary_operators() {
    assert_eq!(
        evaluate_unary(UnaryOp::Neg, &Value::int(5)).unwrap(),
        Value::int(-5)
    );
    assert_eq!(
        evaluate_unary(UnaryOp::Not, &Value::string("")).unwrap(),
        Value::Bool(true)
    );
    let err = evaluate_unary(UnaryOp::Neg, &Value::string("x")).unwrap_err();
    assert_eq!(err.message, "unknown unary op: - string");
}
