//! The CLValue container and its typed factories

use bytes::Bytes;
use cspr_crypto::PublicKey;
use cspr_primitives::{U128, U256, U512};
use thiserror::Error;

use super::{decode, encode, CLType, ParsedValue};
use crate::bytesrepr::{ByteReader, ByteWriter, BytesReprError, MAX_DEPTH};
use crate::key::{Key, URef};

/// Error building a CLValue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CLValueError {
    /// Element type of an empty collection cannot be inferred
    #[error("cannot infer the element type of an empty {0}")]
    EmptyCollection(&'static str),

    /// Collection elements do not share one type
    #[error("{collection} elements must share one type: expected {expected}, found {found}")]
    Heterogeneous {
        /// Collection kind
        collection: &'static str,
        /// Type of the first element
        expected: CLType,
        /// Type of the offending element
        found: CLType,
    },

    /// Descriptor nests deeper than decoding allows
    #[error("{cl_type} nests {depth} levels deep, more than {MAX_DEPTH}")]
    TooDeep {
        /// Offending descriptor
        cl_type: CLType,
        /// Its depth
        depth: usize,
    },

    /// `Any` placed where later payload bytes would follow it
    #[error("Any must be the last element of a payload: {0}")]
    UnframedAny(CLType),

    /// Encoding failed
    #[error(transparent)]
    BytesRepr(#[from] BytesReprError),
}

/// A typed value: raw payload bytes, their descriptor and the decoded form.
///
/// `parsed` is `None` only for [`CLType::Any`]. Decoding `bytes` under
/// `cl_type` always yields `parsed`, so constructors reject descriptors
/// deeper than [`MAX_DEPTH`] and `Any` anywhere but at the end of the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CLValue {
    bytes: Bytes,
    cl_type: CLType,
    parsed: Option<ParsedValue>,
}

impl CLValue {
    /// Build from a decoded value, encoding it under `cl_type`
    pub fn from_parsed(cl_type: CLType, parsed: ParsedValue) -> Result<Self, CLValueError> {
        check_type(&cl_type)?;
        let bytes = encode(&parsed, &cl_type)?;
        let parsed = match cl_type {
            CLType::Any => None,
            _ => Some(parsed),
        };
        Ok(Self {
            bytes: Bytes::from(bytes),
            cl_type,
            parsed,
        })
    }

    /// Build from a raw payload, decoding it under `cl_type`
    pub fn from_raw(cl_type: CLType, bytes: impl Into<Bytes>) -> Result<Self, BytesReprError> {
        if cl_type.depth() > MAX_DEPTH {
            return Err(BytesReprError::DepthExceeded);
        }
        let bytes = bytes.into();
        let parsed = match cl_type {
            CLType::Any => None,
            _ => Some(decode(&bytes, &cl_type)?),
        };
        Ok(Self {
            bytes,
            cl_type,
            parsed,
        })
    }

    /// Payload bytes without length prefix or descriptor
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Descriptor
    pub fn cl_type(&self) -> &CLType {
        &self.cl_type
    }

    /// Decoded value, `None` for `Any`
    pub fn parsed(&self) -> Option<&ParsedValue> {
        self.parsed.as_ref()
    }

    /// Split into descriptor, payload and decoded value
    pub fn into_parts(self) -> (CLType, Bytes, Option<ParsedValue>) {
        (self.cl_type, self.bytes, self.parsed)
    }

    /// Decoded value, with `Any` payloads surfaced as [`ParsedValue::Any`]
    pub(crate) fn parsed_or_any(&self) -> ParsedValue {
        self.parsed
            .clone()
            .unwrap_or_else(|| ParsedValue::Any(self.bytes.to_vec()))
    }

    fn leaf(cl_type: CLType, bytes: Vec<u8>, parsed: ParsedValue) -> Self {
        Self {
            bytes: Bytes::from(bytes),
            cl_type,
            parsed: Some(parsed),
        }
    }

    fn composite(
        cl_type: CLType,
        bytes: Vec<u8>,
        parsed: ParsedValue,
    ) -> Result<Self, CLValueError> {
        check_type(&cl_type)?;
        Ok(Self::leaf(cl_type, bytes, parsed))
    }

    // ==================== Framing ====================

    /// `u32 LE payload length || payload || descriptor`
    pub fn to_bytes(&self) -> Result<Vec<u8>, BytesReprError> {
        let mut writer = ByteWriter::with_capacity(4 + self.bytes.len() + 1);
        self.write(&mut writer)?;
        Ok(writer.into_bytes())
    }

    /// Append the framed value to `writer`
    pub fn write(&self, writer: &mut ByteWriter) -> Result<(), BytesReprError> {
        writer.write_len(self.bytes.len())?;
        writer.write_bytes(&self.bytes);
        self.cl_type.write(writer);
        Ok(())
    }

    /// Decode a framed value; trailing bytes are an error
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BytesReprError> {
        let mut reader = ByteReader::new(bytes);
        let value = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(value)
    }

    /// Read a framed value from a cursor positioned inside a larger stream
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, BytesReprError> {
        let len = reader.read_len("CLValue length")?;
        let payload = reader.read_bytes(len, "CLValue bytes")?;
        let cl_type = CLType::read(reader)?;
        Self::from_raw(cl_type, Bytes::copy_from_slice(payload))
    }

    // ==================== Scalar factories ====================

    /// `Bool`
    pub fn bool(value: bool) -> Self {
        Self::leaf(CLType::Bool, vec![value as u8], ParsedValue::Bool(value))
    }

    /// `I32`
    pub fn i32(value: i32) -> Self {
        Self::leaf(CLType::I32, value.to_le_bytes().to_vec(), ParsedValue::I32(value))
    }

    /// `I64`
    pub fn i64(value: i64) -> Self {
        Self::leaf(CLType::I64, value.to_le_bytes().to_vec(), ParsedValue::I64(value))
    }

    /// `U8`
    pub fn u8(value: u8) -> Self {
        Self::leaf(CLType::U8, vec![value], ParsedValue::U8(value))
    }

    /// `U32`
    pub fn u32(value: u32) -> Self {
        Self::leaf(CLType::U32, value.to_le_bytes().to_vec(), ParsedValue::U32(value))
    }

    /// `U64`
    pub fn u64(value: u64) -> Self {
        Self::leaf(CLType::U64, value.to_le_bytes().to_vec(), ParsedValue::U64(value))
    }

    /// `U128`
    pub fn u128(value: U128) -> Self {
        let mut writer = ByteWriter::new();
        writer.write_u128(&value);
        Self::leaf(CLType::U128, writer.into_bytes(), ParsedValue::U128(value))
    }

    /// `U256`
    pub fn u256(value: U256) -> Self {
        let mut writer = ByteWriter::new();
        writer.write_u256(&value);
        Self::leaf(CLType::U256, writer.into_bytes(), ParsedValue::U256(value))
    }

    /// `U512`
    pub fn u512(value: U512) -> Self {
        let mut writer = ByteWriter::new();
        writer.write_u512(&value);
        Self::leaf(CLType::U512, writer.into_bytes(), ParsedValue::U512(value))
    }

    /// `Unit`
    pub fn unit() -> Self {
        Self::leaf(CLType::Unit, Vec::new(), ParsedValue::Unit)
    }

    /// `String`
    pub fn string(value: impl Into<String>) -> Result<Self, CLValueError> {
        let value = value.into();
        let mut writer = ByteWriter::with_capacity(4 + value.len());
        writer.write_string(&value)?;
        Ok(Self::leaf(CLType::String, writer.into_bytes(), ParsedValue::String(value)))
    }

    /// `Key`
    pub fn key(key: Key) -> Self {
        Self::leaf(CLType::Key, key.to_bytes(), ParsedValue::Key(key))
    }

    /// `URef`
    pub fn uref(uref: URef) -> Self {
        Self::leaf(CLType::URef, uref.to_bytes().to_vec(), ParsedValue::URef(uref))
    }

    /// `PublicKey`
    pub fn public_key(key: PublicKey) -> Self {
        Self::leaf(CLType::PublicKey, key.to_bytes(), ParsedValue::PublicKey(key))
    }

    /// `ByteArray(len)`
    pub fn byte_array(bytes: impl Into<Vec<u8>>) -> Result<Self, CLValueError> {
        let bytes = bytes.into();
        let len = u32::try_from(bytes.len()).map_err(|_| BytesReprError::LengthOverflow(bytes.len()))?;
        Ok(Self::leaf(
            CLType::ByteArray(len),
            bytes.clone(),
            ParsedValue::ByteArray(bytes),
        ))
    }

    /// `Any` with an opaque payload
    pub fn any(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            cl_type: CLType::Any,
            parsed: None,
        }
    }

    // ==================== Composite factories ====================

    /// `List` of values sharing one type; the list must not be empty
    pub fn list(values: Vec<CLValue>) -> Result<Self, CLValueError> {
        let element = values
            .first()
            .map(|v| v.cl_type.clone())
            .ok_or(CLValueError::EmptyCollection("list"))?;

        let mut writer = ByteWriter::new();
        writer.write_len(values.len())?;
        let mut items = Vec::with_capacity(values.len());
        for value in &values {
            if value.cl_type != element {
                return Err(CLValueError::Heterogeneous {
                    collection: "list",
                    expected: element,
                    found: value.cl_type.clone(),
                });
            }
            writer.write_bytes(&value.bytes);
            items.push(value.parsed_or_any());
        }
        Self::composite(CLType::list(element), writer.into_bytes(), ParsedValue::List(items))
    }

    /// Empty `List(element)`
    pub fn empty_list(element: CLType) -> Result<Self, CLValueError> {
        Self::composite(CLType::list(element), vec![0; 4], ParsedValue::List(Vec::new()))
    }

    /// `Map` of key/value pairs, kept in the given order; must not be empty
    pub fn map(entries: Vec<(CLValue, CLValue)>) -> Result<Self, CLValueError> {
        let (key_type, value_type) = entries
            .first()
            .map(|(k, v)| (k.cl_type.clone(), v.cl_type.clone()))
            .ok_or(CLValueError::EmptyCollection("map"))?;

        let mut writer = ByteWriter::new();
        writer.write_len(entries.len())?;
        let mut pairs = Vec::with_capacity(entries.len());
        for (k, v) in &entries {
            for (value, expected) in [(k, &key_type), (v, &value_type)] {
                if &value.cl_type != expected {
                    return Err(CLValueError::Heterogeneous {
                        collection: "map",
                        expected: expected.clone(),
                        found: value.cl_type.clone(),
                    });
                }
            }
            writer.write_bytes(&k.bytes);
            writer.write_bytes(&v.bytes);
            pairs.push((k.parsed_or_any(), v.parsed_or_any()));
        }
        Self::composite(
            CLType::map(key_type, value_type),
            writer.into_bytes(),
            ParsedValue::Map(pairs),
        )
    }

    /// Empty `Map(key, value)`
    pub fn empty_map(key: CLType, value: CLType) -> Result<Self, CLValueError> {
        Self::composite(CLType::map(key, value), vec![0; 4], ParsedValue::Map(Vec::new()))
    }

    /// `Some(value)`
    pub fn option(value: CLValue) -> Result<Self, CLValueError> {
        let mut bytes = Vec::with_capacity(1 + value.bytes.len());
        bytes.push(1);
        bytes.extend_from_slice(&value.bytes);
        let parsed = ParsedValue::some(value.parsed_or_any());
        Self::composite(CLType::option(value.cl_type), bytes, parsed)
    }

    /// `None` of `Option(inner)`
    pub fn option_none(inner: CLType) -> Result<Self, CLValueError> {
        Self::composite(CLType::option(inner), vec![0], ParsedValue::Option(None))
    }

    /// `Ok(value)` of `Result(value type, err)`
    pub fn ok(value: CLValue, err: CLType) -> Result<Self, CLValueError> {
        let mut bytes = Vec::with_capacity(1 + value.bytes.len());
        bytes.push(1);
        bytes.extend_from_slice(&value.bytes);
        let parsed = ParsedValue::ok(value.parsed_or_any());
        Self::composite(CLType::result(value.cl_type, err), bytes, parsed)
    }

    /// `Err(value)` of `Result(ok, value type)`
    pub fn err(value: CLValue, ok: CLType) -> Result<Self, CLValueError> {
        let mut bytes = Vec::with_capacity(1 + value.bytes.len());
        bytes.push(0);
        bytes.extend_from_slice(&value.bytes);
        let parsed = ParsedValue::err(value.parsed_or_any());
        Self::composite(CLType::result(ok, value.cl_type), bytes, parsed)
    }

    /// `Tuple1`
    pub fn tuple1(a: CLValue) -> Result<Self, CLValueError> {
        let parsed = ParsedValue::Tuple1(Box::new(a.parsed_or_any()));
        Self::composite(CLType::tuple1(a.cl_type), a.bytes.to_vec(), parsed)
    }

    /// `Tuple2`; only `b` may be `Any`
    pub fn tuple2(a: CLValue, b: CLValue) -> Result<Self, CLValueError> {
        let bytes = [a.bytes.as_ref(), b.bytes.as_ref()].concat();
        let parsed = ParsedValue::Tuple2(Box::new(a.parsed_or_any()), Box::new(b.parsed_or_any()));
        Self::composite(CLType::tuple2(a.cl_type, b.cl_type), bytes, parsed)
    }

    /// `Tuple3`; only `c` may be `Any`
    pub fn tuple3(a: CLValue, b: CLValue, c: CLValue) -> Result<Self, CLValueError> {
        let bytes = [a.bytes.as_ref(), b.bytes.as_ref(), c.bytes.as_ref()].concat();
        let parsed = ParsedValue::Tuple3(
            Box::new(a.parsed_or_any()),
            Box::new(b.parsed_or_any()),
            Box::new(c.parsed_or_any()),
        );
        Self::composite(CLType::tuple3(a.cl_type, b.cl_type, c.cl_type), bytes, parsed)
    }
}

fn check_type(cl_type: &CLType) -> Result<(), CLValueError> {
    let depth = cl_type.depth();
    if depth > MAX_DEPTH {
        return Err(CLValueError::TooDeep {
            cl_type: cl_type.clone(),
            depth,
        });
    }
    if !cl_type.any_only_trailing() {
        return Err(CLValueError::UnframedAny(cl_type.clone()));
    }
    Ok(())
}

impl From<bool> for CLValue {
    fn from(value: bool) -> Self {
        CLValue::bool(value)
    }
}

impl From<i32> for CLValue {
    fn from(value: i32) -> Self {
        CLValue::i32(value)
    }
}

impl From<i64> for CLValue {
    fn from(value: i64) -> Self {
        CLValue::i64(value)
    }
}

impl From<u8> for CLValue {
    fn from(value: u8) -> Self {
        CLValue::u8(value)
    }
}

impl From<u32> for CLValue {
    fn from(value: u32) -> Self {
        CLValue::u32(value)
    }
}

impl From<u64> for CLValue {
    fn from(value: u64) -> Self {
        CLValue::u64(value)
    }
}

impl From<U512> for CLValue {
    fn from(value: U512) -> Self {
        CLValue::u512(value)
    }
}

impl From<Key> for CLValue {
    fn from(key: Key) -> Self {
        CLValue::key(key)
    }
}

impl From<URef> for CLValue {
    fn from(uref: URef) -> Self {
        CLValue::uref(uref)
    }
}

impl From<PublicKey> for CLValue {
    fn from(key: PublicKey) -> Self {
        CLValue::public_key(key)
    }
}
