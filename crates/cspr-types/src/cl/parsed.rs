//! Decoded, language-native form of a CLValue

use cspr_crypto::PublicKey;
use cspr_primitives::{U128, U256, U512};
use serde_json::{json, Value};

use crate::key::{Key, URef};

/// A value decoded under a [`CLType`](super::CLType)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedValue {
    /// `bool`
    Bool(bool),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `u8`
    U8(u8),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// 128-bit unsigned
    U128(U128),
    /// 256-bit unsigned
    U256(U256),
    /// 512-bit unsigned
    U512(U512),
    /// `()`
    Unit,
    /// UTF-8 string
    String(String),
    /// Global-state key
    Key(Key),
    /// Unforgeable reference
    URef(URef),
    /// Public key
    PublicKey(PublicKey),
    /// Optional value
    Option(Option<Box<ParsedValue>>),
    /// List elements
    List(Vec<ParsedValue>),
    /// Fixed-length byte array
    ByteArray(Vec<u8>),
    /// Ok/Err value
    Result(Result<Box<ParsedValue>, Box<ParsedValue>>),
    /// Key/value pairs in encoding order
    Map(Vec<(ParsedValue, ParsedValue)>),
    /// 1-tuple
    Tuple1(Box<ParsedValue>),
    /// 2-tuple
    Tuple2(Box<ParsedValue>, Box<ParsedValue>),
    /// 3-tuple
    Tuple3(Box<ParsedValue>, Box<ParsedValue>, Box<ParsedValue>),
    /// Opaque bytes
    Any(Vec<u8>),
}

impl ParsedValue {
    /// Variant name, matching the CLType tag names
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParsedValue::Bool(_) => "Bool",
            ParsedValue::I32(_) => "I32",
            ParsedValue::I64(_) => "I64",
            ParsedValue::U8(_) => "U8",
            ParsedValue::U32(_) => "U32",
            ParsedValue::U64(_) => "U64",
            ParsedValue::U128(_) => "U128",
            ParsedValue::U256(_) => "U256",
            ParsedValue::U512(_) => "U512",
            ParsedValue::Unit => "Unit",
            ParsedValue::String(_) => "String",
            ParsedValue::Key(_) => "Key",
            ParsedValue::URef(_) => "URef",
            ParsedValue::PublicKey(_) => "PublicKey",
            ParsedValue::Option(_) => "Option",
            ParsedValue::List(_) => "List",
            ParsedValue::ByteArray(_) => "ByteArray",
            ParsedValue::Result(_) => "Result",
            ParsedValue::Map(_) => "Map",
            ParsedValue::Tuple1(_) => "Tuple1",
            ParsedValue::Tuple2(..) => "Tuple2",
            ParsedValue::Tuple3(..) => "Tuple3",
            ParsedValue::Any(_) => "Any",
        }
    }

    /// `Some(value)`
    pub fn some(value: ParsedValue) -> Self {
        ParsedValue::Option(Some(Box::new(value)))
    }

    /// `Ok(value)`
    pub fn ok(value: ParsedValue) -> Self {
        ParsedValue::Result(Ok(Box::new(value)))
    }

    /// `Err(value)`
    pub fn err(value: ParsedValue) -> Self {
        ParsedValue::Result(Err(Box::new(value)))
    }

    /// JSON rendering used in the `parsed` field of a CLValue
    pub fn to_json(&self) -> Value {
        match self {
            ParsedValue::Bool(v) => json!(v),
            ParsedValue::I32(v) => json!(v),
            ParsedValue::I64(v) => json!(v),
            ParsedValue::U8(v) => json!(v),
            ParsedValue::U32(v) => json!(v),
            ParsedValue::U64(v) => json!(v),
            ParsedValue::U128(v) => Value::String(v.to_string()),
            ParsedValue::U256(v) => Value::String(v.to_string()),
            ParsedValue::U512(v) => Value::String(v.to_string()),
            ParsedValue::Unit | ParsedValue::Any(_) | ParsedValue::Option(None) => Value::Null,
            ParsedValue::String(s) => Value::String(s.clone()),
            ParsedValue::Key(key) => Value::String(key.to_formatted_string()),
            ParsedValue::URef(uref) => Value::String(uref.to_formatted_string()),
            ParsedValue::PublicKey(key) => Value::String(key.to_hex()),
            ParsedValue::Option(Some(inner)) => inner.to_json(),
            ParsedValue::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ParsedValue::ByteArray(bytes) => Value::String(hex::encode(bytes)),
            ParsedValue::Result(Ok(v)) => json!({ "Ok": v.to_json() }),
            ParsedValue::Result(Err(e)) => json!({ "Err": e.to_json() }),
            ParsedValue::Map(entries) => Value::Array(
                entries
                    .iter()
                    .map(|(k, v)| json!({ "key": k.to_json(), "value": v.to_json() }))
                    .collect(),
            ),
            ParsedValue::Tuple1(a) => json!([a.to_json()]),
            ParsedValue::Tuple2(a, b) => json!([a.to_json(), b.to_json()]),
            ParsedValue::Tuple3(a, b, c) => json!([a.to_json(), b.to_json(), c.to_json()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_json() {
        assert_eq!(ParsedValue::Bool(true).to_json(), json!(true));
        assert_eq!(ParsedValue::I32(-10).to_json(), json!(-10));
        assert_eq!(ParsedValue::U64(u64::MAX).to_json(), json!(u64::MAX));
        assert_eq!(ParsedValue::Unit.to_json(), Value::Null);
    }

    #[test]
    fn test_big_integers_render_as_decimal_strings() {
        let value = ParsedValue::U512(U512::from(1_000_000_000_000u64));
        assert_eq!(value.to_json(), json!("1000000000000"));
        assert_eq!(ParsedValue::U128(U128::zero()).to_json(), json!("0"));
    }

    #[test]
    fn test_composite_json() {
        let map = ParsedValue::Map(vec![
            (ParsedValue::U8(2), ParsedValue::String("b".into())),
            (ParsedValue::U8(1), ParsedValue::String("a".into())),
        ]);
        assert_eq!(
            map.to_json(),
            json!([{ "key": 2, "value": "b" }, { "key": 1, "value": "a" }])
        );

        let result = ParsedValue::err(ParsedValue::String("Failure".into()));
        assert_eq!(result.to_json(), json!({ "Err": "Failure" }));

        let option = ParsedValue::some(ParsedValue::ByteArray(vec![0xde, 0xad]));
        assert_eq!(option.to_json(), json!("dead"));
        assert_eq!(ParsedValue::Option(None).to_json(), Value::Null);

        let tuple = ParsedValue::Tuple2(
            Box::new(ParsedValue::U8(1)),
            Box::new(ParsedValue::Bool(false)),
        );
        assert_eq!(tuple.to_json(), json!([1, false]));
    }

    #[test]
    fn test_kind_name() {
        assert_eq!(ParsedValue::List(vec![]).kind_name(), "List");
        assert_eq!(ParsedValue::Any(vec![1]).kind_name(), "Any");
    }
}
