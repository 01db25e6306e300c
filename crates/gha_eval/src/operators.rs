//! Binary and unary operator implementations.
//!
//! Direct enum dispatch over the fixed value set. `and` / `or` short-circuit
//! and are handled by the evaluator, never here.

use std::cmp::Ordering;

use gha_syntax::{BinaryOp, UnaryOp};
use gha_value::errors::{
    division_by_zero, invalid_binary_op, invalid_unary_op, repetition_too_large, type_mismatch,
};
use gha_value::{DictKey, EvalError, EvalResult, Value};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::format::percent_format;

/// Largest string (in bytes) or list (in elements) repetition may build.
const MAX_REPEAT_LEN: usize = 1 << 28;

/// Evaluate `left op right` for every operator except `and` / `or`.
pub fn evaluate_binary(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            let ordering = compare(op, left, right)?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::LtEq => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::In => contains(right, left).map(Value::Bool),
        BinaryOp::NotIn => contains(right, left).map(|found| Value::Bool(!found)),
        BinaryOp::Mod if matches!(left, Value::Str(_)) => {
            let template = left.as_str().unwrap_or_default();
            percent_format(template, right).map(Value::string)
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::FloorDiv
        | BinaryOp::Mod => arithmetic(op, left, right),
        BinaryOp::And | BinaryOp::Or => Err(invalid_binary_op(
            op,
            left.type_name(),
            right.type_name(),
        )),
    }
}

pub fn evaluate_unary(op: UnaryOp, operand: &Value) -> EvalResult {
    match (op, operand) {
        (UnaryOp::Not, v) => Ok(Value::Bool(!v.truth())),
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(-n)),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Pos, v @ (Value::Int(_) | Value::Float(_))) => Ok(v.clone()),
        (op, v) => Err(invalid_unary_op(op.as_symbol(), v.type_name())),
    }
}

fn arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => int_arithmetic(op, a, b),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            float_arithmetic(op, to_f64(left), to_f64(right))
        }
        (Value::Str(a), Value::Str(b)) if op == BinaryOp::Add => {
            Ok(Value::string(format!("{}{}", a.as_str(), b.as_str())))
        }
        (Value::List(a), Value::List(b)) if op == BinaryOp::Add => {
            let mut items = a.snapshot();
            items.extend(b.snapshot());
            Ok(Value::list(items))
        }
        (Value::Str(s), Value::Int(n)) | (Value::Int(n), Value::Str(s)) if op == BinaryOp::Mul => {
            let count = repeat_count(n, s.as_str().len(), "string")?;
            Ok(Value::string(s.repeat(count)))
        }
        (Value::List(l), Value::Int(n)) | (Value::Int(n), Value::List(l))
            if op == BinaryOp::Mul =>
        {
            let items = l.snapshot();
            let count = repeat_count(n, items.len(), "list")?;
            let mut out = Vec::with_capacity(items.len() * count);
            for _ in 0..count {
                out.extend(items.iter().cloned());
            }
            Ok(Value::list(out))
        }
        _ => Err(invalid_binary_op(op, left.type_name(), right.type_name())),
    }
}

fn int_arithmetic(op: BinaryOp, a: &BigInt, b: &BigInt) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Int(a + b)),
        BinaryOp::Sub => Ok(Value::Int(a - b)),
        BinaryOp::Mul => Ok(Value::Int(a * b)),
        BinaryOp::Div => {
            if b.is_zero() {
                return Err(division_by_zero());
            }
            Ok(Value::Float(big_to_f64(a) / big_to_f64(b)))
        }
        BinaryOp::FloorDiv => {
            if b.is_zero() {
                return Err(division_by_zero());
            }
            Ok(Value::Int(floor_div(a, b)))
        }
        BinaryOp::Mod => {
            if b.is_zero() {
                return Err(division_by_zero());
            }
            Ok(Value::Int(floor_mod(a, b)))
        }
        _ => Err(invalid_binary_op(op, "int", "int")),
    }
}

fn float_arithmetic(op: BinaryOp, a: f64, b: f64) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div | BinaryOp::FloorDiv | BinaryOp::Mod if b == 0.0 => Err(division_by_zero()),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::FloorDiv => Ok(Value::Float((a / b).floor())),
        BinaryOp::Mod => {
            // Result takes the sign of the divisor.
            let r = a % b;
            Ok(Value::Float(if r != 0.0 && (r < 0.0) != (b < 0.0) {
                r + b
            } else {
                r
            }))
        }
        _ => Err(invalid_binary_op(op, "float", "float")),
    }
}

/// Quotient rounded toward negative infinity.
fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    let q = a / b;
    let r = a % b;
    if !r.is_zero() && (r.is_negative() != b.is_negative()) {
        q - 1
    } else {
        q
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: &BigInt, b: &BigInt) -> BigInt {
    let r = a % b;
    if !r.is_zero() && (r.is_negative() != b.is_negative()) {
        r + b
    } else {
        r
    }
}

/// Clamp a repetition count at zero and reject results longer than
/// [`MAX_REPEAT_LEN`].
fn repeat_count(n: &BigInt, len: usize, type_name: &str) -> Result<usize, EvalError> {
    if n.is_negative() || len == 0 {
        return Ok(0);
    }
    n.to_usize()
        .filter(|count| len.checked_mul(*count).is_some_and(|total| total <= MAX_REPEAT_LEN))
        .ok_or_else(|| repetition_too_large(type_name))
}

fn big_to_f64(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(f64::NAN)
}

fn to_f64(v: &Value) -> f64 {
    match v {
        Value::Int(n) => big_to_f64(n),
        Value::Float(f) => *f,
        _ => f64::NAN,
    }
}

/// Ordering for `<`, `<=`, `>`, `>=`.
fn compare(op: BinaryOp, left: &Value, right: &Value) -> Result<Ordering, EvalError> {
    let unordered = || invalid_binary_op(op, left.type_name(), right.type_name());
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            to_f64(left).partial_cmp(&to_f64(right)).ok_or_else(unordered)
        }
        (Value::Str(a), Value::Str(b)) => Ok(a.as_str().cmp(b.as_str())),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::List(a), Value::List(b)) => {
            let (xs, ys) = (a.snapshot(), b.snapshot());
            for (x, y) in xs.iter().zip(&ys) {
                if x != y {
                    return compare(op, x, y);
                }
            }
            Ok(xs.len().cmp(&ys.len()))
        }
        _ => Err(unordered()),
    }
}

/// `needle in haystack`.
fn contains(haystack: &Value, needle: &Value) -> Result<bool, EvalError> {
    match haystack {
        Value::List(items) => Ok(items.snapshot().iter().any(|item| item == needle)),
        Value::Dict(dict) => Ok(dict.contains_key(&DictKey::from_value(needle)?)),
        Value::Str(s) => match needle {
            Value::Str(sub) => Ok(s.contains(sub.as_str())),
            other => Err(type_mismatch("string", other.type_name())),
        },
        other => Err(invalid_binary_op(
            BinaryOp::In,
            needle.type_name(),
            other.type_name(),
        )),
    }
}

#[cfg(test)]
mod tests;
