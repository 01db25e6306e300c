//! JSON to script values.
//!
//! Numbers are read from their original text (`serde_json` is built with
//! `arbitrary_precision`), integers first, so ids beyond 2^53 or 2^64 keep
//! every digit. Object keys are inserted in ascending order, which makes dict
//! iteration order independent of the document's key order.
//!
//! `decode` has no nesting limit. It grows the stack as it descends, the
//! same way [`marshal`] does.

use std::str::FromStr;

use gha_stack::ensure_sufficient_stack;
use gha_value::{DictKey, Value};
use num_bigint::BigInt;
use serde::Deserialize;
use serde_json::{Number, Value as Json};

use crate::MarshalError;

/// Decode a JSON document of any depth.
pub(crate) fn decode(bytes: &[u8]) -> serde_json::Result<Json> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let json = Json::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(json)
}

/// Convert a decoded JSON value. The result is not frozen.
pub fn marshal(json: &Json) -> Result<Value, MarshalError> {
    ensure_sufficient_stack(|| match json {
        Json::Null => Ok(Value::None),
        Json::Bool(b) => Ok(Value::Bool(*b)),
        Json::String(s) => Ok(Value::string(s.as_str())),
        Json::Number(n) => marshal_number(n),
        Json::Array(items) => {
            let items = items.iter().map(marshal).collect::<Result<Vec<_>, _>>()?;
            Ok(Value::list(items))
        }
        Json::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort_unstable();
            let mut entries = Vec::with_capacity(keys.len());
            for key in keys {
                entries.push((DictKey::from(key.as_str()), marshal(&map[key.as_str()])?));
            }
            Ok(Value::dict(entries))
        }
    })
}

fn marshal_number(n: &Number) -> Result<Value, MarshalError> {
    let text = n.to_string();
    if let Ok(int) = BigInt::from_str(&text) {
        return Ok(Value::big_int(int));
    }
    text.parse::<f64>()
        .map(Value::float)
        .map_err(|_| MarshalError::InvalidNumber(text))
}

/// Name of a JSON value's shape, for diagnostics.
pub(crate) fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
