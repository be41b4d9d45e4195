//! JSON form of descriptors and values.
//!
//! ```json
//! {"cl_type": {"Option": "U8"}, "bytes": "0107", "parsed": 7}
//! ```
//!
//! `bytes` is authoritative: `parsed` is always rederived from it. A value
//! that carries only `parsed` is interpreted under `cl_type` and re-encoded.
//!
//! `null` is both `None` and the rendering of `Unit`, so an `Option(Unit)` or
//! `Option(Option(..))` holding `null` cannot be told apart from `Some(())`
//! or `Some(None)`. Such values are rejected unless `bytes` is present.

use cspr_crypto::PublicKey;
use cspr_primitives::{U128, U256, U512};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::{CLType, CLTypeTag, CLValue, CLValueError, ParsedValue};
use crate::bytesrepr::BytesReprError;
use crate::key::{Key, KeyError, URef};

/// JSON codec error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// Unrecognized type JSON
    #[error("invalid CLType JSON: {0}")]
    InvalidType(String),

    /// `parsed` does not fit the declared type
    #[error("invalid parsed value for {cl_type}: {reason}")]
    InvalidParsed {
        /// Declared type
        cl_type: CLType,
        /// What was wrong
        reason: String,
    },

    /// `bytes` is not hex
    #[error("invalid bytes hex: {0}")]
    InvalidHex(String),

    /// Neither `bytes` nor `parsed` present
    #[error("CLValue JSON needs `bytes` or `parsed`")]
    MissingValue,

    /// Payload rejected by the binary codec
    #[error(transparent)]
    BytesRepr(#[from] BytesReprError),

    /// Key text rejected
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Value rejected by the CLValue constructor
    #[error(transparent)]
    CLValue(#[from] CLValueError),
}

// ==================== Descriptors ====================

/// Render a descriptor: leaves as bare strings, composites as objects
pub fn cl_type_to_json(cl_type: &CLType) -> Value {
    match cl_type {
        CLType::Option(inner) => json!({ "Option": cl_type_to_json(inner) }),
        CLType::List(inner) => json!({ "List": cl_type_to_json(inner) }),
        CLType::ByteArray(size) => json!({ "ByteArray": size }),
        CLType::Result { ok, err } => json!({
            "Result": { "ok": cl_type_to_json(ok), "err": cl_type_to_json(err) }
        }),
        CLType::Map { key, value } => json!({
            "Map": { "key": cl_type_to_json(key), "value": cl_type_to_json(value) }
        }),
        CLType::Tuple1(a) => json!({ "Tuple1": [cl_type_to_json(a)] }),
        CLType::Tuple2(a, b) => json!({ "Tuple2": [cl_type_to_json(a), cl_type_to_json(b)] }),
        CLType::Tuple3(a, b, c) => json!({
            "Tuple3": [cl_type_to_json(a), cl_type_to_json(b), cl_type_to_json(c)]
        }),
        leaf => Value::String(leaf.tag().name().to_string()),
    }
}

/// Parse a descriptor from its JSON form
pub fn cl_type_from_json(value: &Value) -> Result<CLType, JsonError> {
    let invalid = || JsonError::InvalidType(value.to_string());
    match value {
        Value::String(name) => leaf_by_name(name).ok_or_else(invalid),
        Value::Object(object) if object.len() == 1 => {
            let (name, operand) = object.iter().next().ok_or_else(invalid)?;
            match name.as_str() {
                "Option" => Ok(CLType::option(cl_type_from_json(operand)?)),
                "List" => Ok(CLType::list(cl_type_from_json(operand)?)),
                "ByteArray" => operand
                    .as_u64()
                    .and_then(|n| u32::try_from(n).ok())
                    .map(CLType::ByteArray)
                    .ok_or_else(invalid),
                "Result" => Ok(CLType::result(
                    cl_type_from_json(field(operand, "ok").ok_or_else(invalid)?)?,
                    cl_type_from_json(field(operand, "err").ok_or_else(invalid)?)?,
                )),
                "Map" => Ok(CLType::map(
                    cl_type_from_json(field(operand, "key").ok_or_else(invalid)?)?,
                    cl_type_from_json(field(operand, "value").ok_or_else(invalid)?)?,
                )),
                "Tuple1" | "Tuple2" | "Tuple3" => {
                    let items = operand.as_array().ok_or_else(invalid)?;
                    let types = items
                        .iter()
                        .map(cl_type_from_json)
                        .collect::<Result<Vec<_>, _>>()?;
                    match (name.as_str(), types.as_slice()) {
                        ("Tuple1", [a]) => Ok(CLType::tuple1(a.clone())),
                        ("Tuple2", [a, b]) => Ok(CLType::tuple2(a.clone(), b.clone())),
                        ("Tuple3", [a, b, c]) => {
                            Ok(CLType::tuple3(a.clone(), b.clone(), c.clone()))
                        }
                        _ => Err(invalid()),
                    }
                }
                _ => Err(invalid()),
            }
        }
        _ => Err(invalid()),
    }
}

fn leaf_by_name(name: &str) -> Option<CLType> {
    (0u8..=22)
        .filter_map(CLTypeTag::from_u8)
        .find(|tag| tag.name() == name)
        .and_then(CLType::leaf)
}

fn array(value: &Value, len: Option<usize>) -> Option<&Vec<Value>> {
    value
        .as_array()
        .filter(|items| len.map_or(true, |n| items.len() == n))
}

fn field<'a>(value: &'a Value, name: &str) -> Option<&'a Value> {
    value.as_object().and_then(|object| object.get(name))
}

impl Serialize for CLType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        cl_type_to_json(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CLType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        cl_type_from_json(&value).map_err(de::Error::custom)
    }
}

// ==================== Parsed values ====================

/// Interpret a `parsed` JSON value under `cl_type`
pub fn parsed_from_json(value: &Value, cl_type: &CLType) -> Result<ParsedValue, JsonError> {
    let invalid = |reason: &str| JsonError::InvalidParsed {
        cl_type: cl_type.clone(),
        reason: format!("{} in {}", reason, value),
    };
    let as_int = |min: i64, max: i64| -> Result<i64, JsonError> {
        value
            .as_i64()
            .filter(|n| (min..=max).contains(n))
            .ok_or_else(|| invalid("expected an integer in range"))
    };
    let as_str = || value.as_str().ok_or_else(|| invalid("expected a string"));
    let as_array = |len: Option<usize>| {
        array(value, len).ok_or_else(|| invalid("expected an array of the right length"))
    };

    Ok(match cl_type {
        CLType::Bool => ParsedValue::Bool(value.as_bool().ok_or_else(|| invalid("expected a bool"))?),
        CLType::I32 => ParsedValue::I32(as_int(i32::MIN.into(), i32::MAX.into())? as i32),
        CLType::I64 => ParsedValue::I64(as_int(i64::MIN, i64::MAX)?),
        CLType::U8 => ParsedValue::U8(as_int(0, u8::MAX.into())? as u8),
        CLType::U32 => ParsedValue::U32(as_int(0, u32::MAX.into())? as u32),
        CLType::U64 => ParsedValue::U64(value.as_u64().ok_or_else(|| invalid("expected a u64"))?),
        CLType::U128 => ParsedValue::U128(
            big_uint(value, U128::from_dec_str).ok_or_else(|| invalid("expected a decimal U128"))?,
        ),
        CLType::U256 => ParsedValue::U256(
            big_uint(value, U256::from_dec_str).ok_or_else(|| invalid("expected a decimal U256"))?,
        ),
        CLType::U512 => ParsedValue::U512(
            big_uint(value, U512::from_dec_str).ok_or_else(|| invalid("expected a decimal U512"))?,
        ),
        CLType::Unit => match value {
            Value::Null => ParsedValue::Unit,
            _ => return Err(invalid("expected null")),
        },
        CLType::String => ParsedValue::String(as_str()?.to_string()),
        CLType::Key => ParsedValue::Key(Key::from_formatted_str(as_str()?)?),
        CLType::URef => ParsedValue::URef(URef::from_formatted_str(as_str()?)?),
        CLType::PublicKey => ParsedValue::PublicKey(
            PublicKey::from_hex(as_str()?).map_err(|e| invalid(&e.to_string()))?,
        ),
        CLType::Option(inner) => match value {
            Value::Null if matches!(**inner, CLType::Unit | CLType::Option(_)) => {
                return Err(invalid("null is ambiguous here; `bytes` is required"))
            }
            Value::Null => ParsedValue::Option(None),
            some => ParsedValue::some(parsed_from_json(some, inner)?),
        },
        CLType::List(element) => ParsedValue::List(
            as_array(None)?
                .iter()
                .map(|item| parsed_from_json(item, element))
                .collect::<Result<_, _>>()?,
        ),
        CLType::ByteArray(size) => {
            let bytes = hex::decode(as_str()?).map_err(|e| invalid(&e.to_string()))?;
            if bytes.len() != *size as usize {
                return Err(invalid("wrong byte array length"));
            }
            ParsedValue::ByteArray(bytes)
        }
        CLType::Result { ok, err } => {
            if let Some(v) = field(value, "Ok") {
                ParsedValue::ok(parsed_from_json(v, ok)?)
            } else if let Some(e) = field(value, "Err") {
                ParsedValue::err(parsed_from_json(e, err)?)
            } else {
                return Err(invalid("expected {\"Ok\": ..} or {\"Err\": ..}"));
            }
        }
        CLType::Map { key, value: value_type } => ParsedValue::Map(
            as_array(None)?
                .iter()
                .map(|entry| {
                    let k = field(entry, "key").ok_or_else(|| invalid("map entry without key"))?;
                    let v = field(entry, "value").ok_or_else(|| invalid("map entry without value"))?;
                    Ok((parsed_from_json(k, key)?, parsed_from_json(v, value_type)?))
                })
                .collect::<Result<_, JsonError>>()?,
        ),
        CLType::Tuple1(a) => {
            let items = as_array(Some(1))?;
            ParsedValue::Tuple1(Box::new(parsed_from_json(&items[0], a)?))
        }
        CLType::Tuple2(a, b) => {
            let items = as_array(Some(2))?;
            ParsedValue::Tuple2(
                Box::new(parsed_from_json(&items[0], a)?),
                Box::new(parsed_from_json(&items[1], b)?),
            )
        }
        CLType::Tuple3(a, b, c) => {
            let items = as_array(Some(3))?;
            ParsedValue::Tuple3(
                Box::new(parsed_from_json(&items[0], a)?),
                Box::new(parsed_from_json(&items[1], b)?),
                Box::new(parsed_from_json(&items[2], c)?),
            )
        }
        CLType::Any => return Err(invalid("Any values need `bytes`")),
    })
}

/// Big integers arrive as decimal strings; small ones may be plain numbers
fn big_uint<T, E>(value: &Value, parse: fn(&str) -> Result<T, E>) -> Option<T> {
    match value {
        Value::String(s) => parse(s).ok(),
        Value::Number(n) if n.is_u64() => parse(&n.to_string()).ok(),
        _ => None,
    }
}

// ==================== Values ====================

impl CLValue {
    /// Render as `{"cl_type", "bytes", "parsed"}`
    pub fn to_json(&self) -> Value {
        let parsed = self.parsed().map(ParsedValue::to_json).unwrap_or(Value::Null);
        let mut object = Map::new();
        object.insert("cl_type".to_string(), cl_type_to_json(self.cl_type()));
        object.insert("bytes".to_string(), Value::String(hex::encode(self.bytes())));
        object.insert("parsed".to_string(), parsed);
        Value::Object(object)
    }

    /// Parse the JSON form; `bytes` wins over `parsed` when both are present
    pub fn from_json(value: &Value) -> Result<Self, JsonError> {
        let cl_type = value
            .get("cl_type")
            .ok_or_else(|| JsonError::InvalidType("missing cl_type".to_string()))
            .and_then(cl_type_from_json)?;

        let bytes = value.get("bytes").filter(|b| !b.is_null());
        match (bytes, value.get("parsed")) {
            (Some(bytes), _) => {
                let hex_str = bytes
                    .as_str()
                    .ok_or_else(|| JsonError::InvalidHex(bytes.to_string()))?;
                let raw = hex::decode(hex_str).map_err(|e| JsonError::InvalidHex(e.to_string()))?;
                Ok(CLValue::from_raw(cl_type, raw)?)
            }
            (None, Some(parsed)) => {
                tracing::debug!(%cl_type, "rebuilding CLValue bytes from parsed JSON");
                let parsed = parsed_from_json(parsed, &cl_type)?;
                Ok(CLValue::from_parsed(cl_type, parsed)?)
            }
            (None, None) => Err(JsonError::MissingValue),
        }
    }
}

impl Serialize for CLValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CLValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        CLValue::from_json(&value).map_err(de::Error::custom)
    }
}
