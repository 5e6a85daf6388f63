//! Contract call parameters.
//!
//! A parameter is a recursive value of booleans, integers, lists, string
//! keyed maps and typed strings. A typed string has the form
//! `"(tag)payload"`, where the tag selects how the payload becomes bytes:
//!
//! | tag | payload |
//! |---|---|
//! | `str`, `string` | UTF-8 text, verbatim |
//! | `bytes`, `[]` | hex |
//! | `address`, `addr` | address, decoded to its 20-byte script hash |
//! | `integer`, `int` | decimal, as big-endian magnitude bytes |
//! | `hexinteger`, `hexint`, `hex` | hex |
//! | `hex256`, `int256`, `uint256` | hex of exactly 32 bytes |
//! | `hex160`, `int160`, `uint160` | hex of exactly 20 bytes |

use std::collections::BTreeMap;
use std::str::FromStr;

use num_bigint::BigInt;

use crate::address::address_to_script_hash;
use crate::ScriptError;

/// A structured contract call parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// Pushed as PUSHT / PUSHF.
    Bool(bool),
    /// Pushed through the numeric push rules.
    Integer(BigInt),
    /// Elements are pushed last to first.
    List(Vec<ParamValue>),
    /// Values are pushed in key order; keys are not emitted.
    Map(BTreeMap<String, ParamValue>),
    /// A `"(tag)payload"` string, decoded then pushed as bytes.
    TypedString(String),
}

impl ParamValue {
    /// Parse a JSON document into a parameter tree.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| ScriptError::InvalidParam(e.to_string()))?;
        ParamValue::try_from(value)
    }

    /// Build a typed string from a tag and a payload.
    pub fn typed(tag: &str, payload: &str) -> Self {
        ParamValue::TypedString(format!("({}){}", tag, payload))
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Integer(BigInt::from(v))
    }
}

impl From<BigInt> for ParamValue {
    fn from(v: BigInt) -> Self {
        ParamValue::Integer(v)
    }
}

impl TryFrom<serde_json::Value> for ParamValue {
    type Error = ScriptError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;
        match value {
            Value::Bool(b) => Ok(ParamValue::Bool(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ParamValue::Integer(BigInt::from(i)))
                } else if let Some(u) = n.as_u64() {
                    Ok(ParamValue::Integer(BigInt::from(u)))
                } else {
                    Err(ScriptError::UnsupportedParamValue(format!(
                        "non-integer number {}",
                        n
                    )))
                }
            }
            Value::String(s) => Ok(ParamValue::TypedString(s)),
            Value::Array(items) => Ok(ParamValue::List(
                items
                    .into_iter()
                    .map(ParamValue::try_from)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            Value::Object(fields) => {
                let mut map = BTreeMap::new();
                for (key, v) in fields {
                    map.insert(key, ParamValue::try_from(v)?);
                }
                Ok(ParamValue::Map(map))
            }
            Value::Null => Err(ScriptError::UnsupportedParamValue("null".to_string())),
        }
    }
}

/// Minimal big-endian magnitude of an integer; zero encodes as no bytes.
///
/// The sign is dropped.
pub fn magnitude_bytes(value: &BigInt) -> Vec<u8> {
    let (_, bytes) = value.to_bytes_be();
    if bytes.iter().all(|b| *b == 0) {
        Vec::new()
    } else {
        bytes
    }
}

/// Decode a `"(tag)payload"` string into raw bytes.
///
/// No push framing is applied; the caller wraps the result with a data push.
///
/// # Arguments
/// * `s` - The typed string.
///
/// # Returns
/// The decoded bytes, or an error if the string has no tag, the tag is
/// unknown, or the payload does not decode under that tag.
pub fn decode_typed_string(s: &str) -> Result<Vec<u8>, ScriptError> {
    let rest = s
        .strip_prefix('(')
        .ok_or_else(|| ScriptError::InvalidParam(s.to_string()))?;
    let (tag, payload) = rest
        .split_once(')')
        .ok_or_else(|| ScriptError::InvalidParam(s.to_string()))?;

    let bytes = match tag {
        "str" | "string" => payload.as_bytes().to_vec(),
        "bytes" | "[]" | "hexinteger" | "hexint" | "hex" => decode_hex(s, payload)?,
        "address" | "addr" => address_to_script_hash(payload)?.to_vec(),
        "integer" | "int" => {
            let value = BigInt::from_str(payload).map_err(|e| {
                ScriptError::InvalidParam(format!("{}: {}", s, e))
            })?;
            magnitude_bytes(&value)
        }
        "hex256" | "int256" | "uint256" => decode_fixed_hex(s, tag, payload, 32)?,
        "hex160" | "int160" | "uint160" => decode_fixed_hex(s, tag, payload, 20)?,
        other => return Err(ScriptError::UnknownParamTag(other.to_string())),
    };
    Ok(bytes)
}

fn decode_hex(original: &str, payload: &str) -> Result<Vec<u8>, ScriptError> {
    hex::decode(payload).map_err(|e| ScriptError::InvalidParam(format!("{}: {}", original, e)))
}

fn decode_fixed_hex(
    original: &str,
    tag: &str,
    payload: &str,
    expected: usize,
) -> Result<Vec<u8>, ScriptError> {
    let bytes = decode_hex(original, payload)?;
    if bytes.len() != expected {
        return Err(ScriptError::InvalidParamLength {
            tag: tag.to_string(),
            expected,
            got: bytes.len(),
        });
    }
    Ok(bytes)
}
