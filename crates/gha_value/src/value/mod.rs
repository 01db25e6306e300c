//! Runtime values for the script interpreter.
//!
//! Heap-backed variants hold a `Heap<T>`, whose constructor is private to
//! this module, so every shared allocation goes through a factory:
//!
//! ```text
//! let s = Value::string("squash");
//! let list = Value::list(vec![Value::int(1)]);
//! let ctx = Value::structure("context", fields);
//! ```
//!
//! Lists and dicts are shared by reference and can be frozen; `freeze`
//! walks the graph and marks every reachable container read-only. Structs
//! and modules are immutable from construction.

mod builtin;
mod dict;
mod heap;
mod list;
mod structs;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;

use gha_stack::ensure_sufficient_stack;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive, Zero};

use crate::args::Args;
use crate::errors::EvalResult;
use crate::thread::Thread;

pub use builtin::{Builtin, BuiltinFn};
pub use dict::{DictKey, DictValue};
pub use heap::Heap;
pub use list::ListValue;
pub use structs::{ModuleValue, StructValue};

/// A script value.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    /// Arbitrary-precision integer.
    Int(BigInt),
    Float(f64),
    Str(Heap<String>),
    List(ListValue),
    Dict(DictValue),
    Struct(StructValue),
    Builtin(Builtin),
    Module(ModuleValue),
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(BigInt::from(n))
    }

    #[inline]
    pub fn big_int(n: BigInt) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Float(f)
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(ListValue::new(items))
    }

    /// Build a dict from entries in order; a repeated key keeps its first
    /// position and takes the last value.
    pub fn dict(entries: impl IntoIterator<Item = (DictKey, Value)>) -> Self {
        Value::Dict(DictValue::from_entries(entries))
    }

    /// Build a struct; fields are sorted by name.
    pub fn structure(name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Value::Struct(StructValue::new(name, fields))
    }

    pub fn builtin<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Thread, Args) -> EvalResult + Send + Sync + 'static,
    {
        Value::Builtin(Builtin::new(name, func))
    }

    pub fn module(name: impl Into<String>, members: BTreeMap<String, Value>) -> Self {
        Value::Module(ModuleValue::new(name, members))
    }
}

// Inspection

impl Value {
    /// Type name as shown to scripts.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Struct(_) => "struct",
            Value::Builtin(_) => "builtin_function_or_method",
            Value::Module(_) => "module",
        }
    }

    /// Truthiness used by `not`, `and`, `or`.
    pub fn truth(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(b) => *b,
            Value::Int(n) => !n.is_zero(),
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::List(l) => !l.is_empty(),
            Value::Dict(d) => !d.is_empty(),
            Value::Struct(_) | Value::Builtin(_) | Value::Module(_) => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_int().and_then(ToPrimitive::to_i64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Whether mutation through this value is rejected.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::List(l) => l.is_frozen(),
            Value::Dict(d) => d.is_frozen(),
            _ => true,
        }
    }
}

// Freezing

impl Value {
    /// Freeze this value and everything reachable from it.
    pub fn freeze(&self) {
        ensure_sufficient_stack(|| {
            let children = match self {
                Value::List(l) => l.freeze_shallow().unwrap_or_default(),
                Value::Dict(d) => d.freeze_shallow().unwrap_or_default(),
                Value::Struct(s) => s.fields().iter().map(|(_, v)| v.clone()).collect(),
                _ => Vec::new(),
            };
            for child in &children {
                child.freeze();
            }
        });
    }
}

// Rendering

impl Value {
    /// Source-like rendering: strings are quoted.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        self.write_repr(&mut out, &mut Vec::new());
        out
    }

    /// Rendering used by `str()` and `print`: strings are unquoted.
    pub fn to_str(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.repr(),
        }
    }

    /// `ancestors` holds the containers currently being rendered, so a
    /// self-referential list prints as `[...]` instead of recursing forever.
    fn write_repr(&self, out: &mut String, ancestors: &mut Vec<usize>) {
        ensure_sufficient_stack(|| match self {
            Value::None => out.push_str("None"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Float(f) => out.push_str(&format_float(*f)),
            Value::Str(s) => quote_into(out, s),
            Value::List(l) => {
                if ancestors.contains(&l.addr()) {
                    out.push_str("[...]");
                    return;
                }
                ancestors.push(l.addr());
                out.push('[');
                for (i, item) in l.snapshot().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_repr(out, ancestors);
                }
                out.push(']');
                ancestors.pop();
            }
            Value::Dict(d) => {
                if ancestors.contains(&d.addr()) {
                    out.push_str("{...}");
                    return;
                }
                ancestors.push(d.addr());
                out.push('{');
                for (i, (key, value)) in d.entries().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    key.to_value().write_repr(out, ancestors);
                    out.push_str(": ");
                    value.write_repr(out, ancestors);
                }
                out.push('}');
                ancestors.pop();
            }
            Value::Struct(s) => {
                out.push_str(s.name());
                out.push('(');
                for (i, (name, value)) in s.fields().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(name);
                    out.push_str(" = ");
                    value.write_repr(out, ancestors);
                }
                out.push(')');
            }
            Value::Builtin(b) => {
                let _ = write!(out, "<built-in function {}>", b.name());
            }
            Value::Module(m) => {
                let _ = write!(out, "<module \"{}\">", m.name());
            }
        });
    }
}

/// Format a float so it always reads back as a float (`1.0`, not `1`).
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        "nan".to_string()
    } else if f.is_infinite() {
        let sign = if f > 0.0 { "+" } else { "-" };
        format!("{sign}inf")
    } else if f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f:?}")
    }
}

/// Append `s` as a double-quoted string literal.
fn quote_into(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

// Equality

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_equal(self, other, &mut Vec::new())
    }
}

/// Structural equality. `assumed` holds container pairs already under
/// comparison; meeting one again is treated as equal, which makes
/// comparison of cyclic graphs terminate.
fn values_equal(a: &Value, b: &Value, assumed: &mut Vec<(usize, usize)>) -> bool {
    ensure_sufficient_stack(|| match (a, b) {
        (Value::None, Value::None) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Int(x), Value::Float(y)) | (Value::Float(y), Value::Int(x)) => {
            int_float_eq(x, *y)
        }
        (Value::Str(x), Value::Str(y)) => x.as_str() == y.as_str(),
        (Value::List(x), Value::List(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.addr(), y.addr());
            if assumed.contains(&pair) {
                return true;
            }
            let (xs, ys) = (x.snapshot(), y.snapshot());
            if xs.len() != ys.len() {
                return false;
            }
            assumed.push(pair);
            let equal = xs.iter().zip(&ys).all(|(a, b)| values_equal(a, b, assumed));
            assumed.pop();
            equal
        }
        (Value::Dict(x), Value::Dict(y)) => {
            if x.ptr_eq(y) {
                return true;
            }
            let pair = (x.addr(), y.addr());
            if assumed.contains(&pair) {
                return true;
            }
            if x.len() != y.len() {
                return false;
            }
            assumed.push(pair);
            let equal = x.entries().iter().all(|(key, xv)| {
                y.get(key)
                    .is_some_and(|yv| values_equal(xv, &yv, assumed))
            });
            assumed.pop();
            equal
        }
        (Value::Struct(x), Value::Struct(y)) => {
            x.name() == y.name()
                && x.fields().len() == y.fields().len()
                && x.fields().iter().zip(y.fields()).all(|((xn, xv), (yn, yv))| {
                    xn == yn && values_equal(xv, yv, assumed)
                })
        }
        (Value::Builtin(x), Value::Builtin(y)) => x.ptr_eq(y),
        (Value::Module(x), Value::Module(y)) => x.ptr_eq(y),
        _ => false,
    })
}

fn int_float_eq(i: &BigInt, f: f64) -> bool {
    if !f.is_finite() || f.fract() != 0.0 {
        return false;
    }
    BigInt::from_f64(f).is_some_and(|g| &g == i)
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
