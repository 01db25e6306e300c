//! `%` string formatting.
//!
//! Directives: `%s` (str), `%d` (integer), `%r` (repr), `%%` (literal `%`).
//! The right operand is a list of arguments or a single value.

use gha_value::errors::type_mismatch;
use gha_value::{EvalError, Value};
use num_bigint::BigInt;
use num_traits::FromPrimitive;

pub fn percent_format(template: &str, args: &Value) -> Result<String, EvalError> {
    let args = match args {
        Value::List(items) => items.snapshot(),
        single => vec![single.clone()],
    };
    let mut args = args.into_iter();
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        let directive = chars
            .next()
            .ok_or_else(|| EvalError::new("incomplete format directive"))?;
        if directive == '%' {
            out.push('%');
            continue;
        }
        let arg = args
            .next()
            .ok_or_else(|| EvalError::new("not enough arguments for format string"))?;
        match directive {
            's' => out.push_str(&arg.to_str()),
            'r' => out.push_str(&arg.repr()),
            'd' => out.push_str(&format_int(&arg)?),
            other => {
                return Err(EvalError::new(format!(
                    "unsupported format directive %{other}"
                )))
            }
        }
    }

    if args.next().is_some() {
        return Err(EvalError::new("too many arguments for format string"));
    }
    Ok(out)
}

fn format_int(arg: &Value) -> Result<String, EvalError> {
    match arg {
        Value::Int(n) => Ok(n.to_string()),
        Value::Float(f) => BigInt::from_f64(f.trunc())
            .map(|n| n.to_string())
            .ok_or_else(|| EvalError::new(format!("cannot format {f} with %d"))),
        Value::Bool(b) => Ok(i32::from(*b).to_string()),
        other => Err(type_mismatch("int", other.type_name())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_argument() {
        assert_eq!(
            percent_format("merge: %s", &Value::string("squash")).unwrap(),
            "merge: squash"
        );
    }

    #[test]
    fn list_of_arguments() {
        let args = Value::list(vec![Value::int(3), Value::string("x"), Value::string("y")]);
        assert_eq!(
            percent_format("%d %s %r 100%%", &args).unwrap(),
            r#"3 x "y" 100%"#
        );
    }

    #[test]
    fn float_truncates_for_d() {
        assert_eq!(percent_format("%d", &Value::float(2.9)).unwrap(), "2");
    }

    #[test]
    fn argument_count_mismatch() {
        let err = percent_format("%s %s", &Value::string("a")).unwrap_err();
        assert_eq!(err.message, "not enough arguments for format string");
        let args = Value::list(vec![Value::int(1), Value::int(2)]);
        let err = percent_format("%s", &args).unwrap_err();
        assert_eq!(err.message, "too many arguments for format string");
    }

    #[test]
    fn unknown_directive() {
        let err = percent_format("%x", &Value::int(1)).unwrap_err();
        assert_eq!(err.message, "unsupported format directive %x");
    }
}
