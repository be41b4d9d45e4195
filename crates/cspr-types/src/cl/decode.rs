//! Type-directed decoding.
//!
//! [`read_value`] walks a descriptor and materializes the payload as a
//! [`ParsedValue`]. [`decode_as`] goes one step further and converts the
//! result into a requested native shape through [`FromParsed`]:
//!
//! ```rust
//! use cspr_types::cl::{decode_as, CLType};
//! use indexmap::IndexMap;
//!
//! let cl_type = CLType::map(CLType::String, CLType::U8);
//! let bytes = [1, 0, 0, 0, 1, 0, 0, 0, b'a', 7];
//! let map: IndexMap<String, u8> = decode_as(&bytes, &cl_type).unwrap();
//! assert_eq!(map["a"], 7);
//! ```

use std::hash::Hash;

use cspr_crypto::{Algorithm, PublicKey};
use cspr_primitives::{U128, U256, U512};
use indexmap::IndexMap;

use super::{CLType, ConversionError, ParsedValue};
use crate::bytesrepr::{ByteReader, BytesReprError, MAX_DEPTH};
use crate::key::{AccessRights, AccountHash, Key, URef};
use crate::TypesError;

/// Decode a complete payload; every byte must be consumed
pub fn decode(bytes: &[u8], cl_type: &CLType) -> Result<ParsedValue, BytesReprError> {
    let mut reader = ByteReader::new(bytes);
    let value = read_value(&mut reader, cl_type)?;
    reader.finish()?;
    Ok(value)
}

/// Decode a complete payload into a native shape
pub fn decode_as<T: FromParsed>(bytes: &[u8], cl_type: &CLType) -> Result<T, TypesError> {
    let parsed = decode(bytes, cl_type)?;
    Ok(T::from_parsed(parsed)?)
}

/// Read one value of type `cl_type` from a cursor
pub fn read_value(reader: &mut ByteReader<'_>, cl_type: &CLType) -> Result<ParsedValue, BytesReprError> {
    read_at_depth(reader, cl_type, 0)
}

fn read_at_depth(
    reader: &mut ByteReader<'_>,
    cl_type: &CLType,
    depth: usize,
) -> Result<ParsedValue, BytesReprError> {
    if depth > MAX_DEPTH {
        return Err(BytesReprError::DepthExceeded);
    }
    let nested = |reader: &mut ByteReader<'_>, t: &CLType| {
        read_at_depth(reader, t, depth + 1).map(Box::new)
    };

    Ok(match cl_type {
        CLType::Bool => ParsedValue::Bool(reader.read_bool()?),
        CLType::I32 => ParsedValue::I32(reader.read_i32()?),
        CLType::I64 => ParsedValue::I64(reader.read_i64()?),
        CLType::U8 => ParsedValue::U8(reader.read_u8("u8")?),
        CLType::U32 => ParsedValue::U32(reader.read_u32("u32")?),
        CLType::U64 => ParsedValue::U64(reader.read_u64()?),
        CLType::U128 => ParsedValue::U128(reader.read_u128()?),
        CLType::U256 => ParsedValue::U256(reader.read_u256()?),
        CLType::U512 => ParsedValue::U512(reader.read_u512()?),
        CLType::Unit => ParsedValue::Unit,
        CLType::String => ParsedValue::String(reader.read_string()?),
        CLType::Key => ParsedValue::Key(Key::read(reader)?),
        CLType::URef => ParsedValue::URef(read_uref(reader)?),
        CLType::PublicKey => ParsedValue::PublicKey(read_public_key(reader)?),
        CLType::Option(inner) => match reader.read_u8("option")? {
            0 => ParsedValue::Option(None),
            1 => ParsedValue::Option(Some(nested(reader, inner)?)),
            value => {
                return Err(BytesReprError::InvalidDiscriminant {
                    context: "option",
                    value,
                })
            }
        },
        CLType::List(element) => {
            let count = reader.read_len("list length")?;
            // Preallocation is capped by the input length
            let mut items = Vec::with_capacity(count.min(reader.remaining_len()));
            for _ in 0..count {
                items.push(*nested(reader, element)?);
            }
            ParsedValue::List(items)
        }
        CLType::ByteArray(size) => {
            ParsedValue::ByteArray(reader.read_bytes(*size as usize, "byte array")?.to_vec())
        }
        CLType::Result { ok, err } => match reader.read_u8("result")? {
            0 => ParsedValue::Result(Err(nested(reader, err)?)),
            1 => ParsedValue::Result(Ok(nested(reader, ok)?)),
            value => {
                return Err(BytesReprError::InvalidDiscriminant {
                    context: "result",
                    value,
                })
            }
        },
        CLType::Map { key, value } => {
            let count = reader.read_len("map length")?;
            let mut entries = Vec::with_capacity(count.min(reader.remaining_len()));
            for _ in 0..count {
                let k = nested(reader, key)?;
                let v = nested(reader, value)?;
                entries.push((*k, *v));
            }
            ParsedValue::Map(entries)
        }
        CLType::Tuple1(a) => ParsedValue::Tuple1(nested(reader, a)?),
        CLType::Tuple2(a, b) => {
            let a = nested(reader, a)?;
            ParsedValue::Tuple2(a, nested(reader, b)?)
        }
        CLType::Tuple3(a, b, c) => {
            let a = nested(reader, a)?;
            let b = nested(reader, b)?;
            ParsedValue::Tuple3(a, b, nested(reader, c)?)
        }
        CLType::Any => ParsedValue::Any(reader.read_rest().to_vec()),
    })
}

fn read_uref(reader: &mut ByteReader<'_>) -> Result<URef, BytesReprError> {
    let addr = reader.read_array::<32>("uref address")?;
    let bits = reader.read_u8("access rights")?;
    let rights = AccessRights::from_bits(bits).ok_or(BytesReprError::InvalidAccessRights(bits))?;
    Ok(URef::new(addr, rights))
}

fn read_public_key(reader: &mut ByteReader<'_>) -> Result<PublicKey, BytesReprError> {
    let tag = reader.read_u8("public key tag")?;
    let algorithm = Algorithm::from_tag(tag).map_err(|_| BytesReprError::InvalidDiscriminant {
        context: "public key algorithm",
        value: tag,
    })?;
    let raw = reader.read_bytes(algorithm.key_length(), "public key")?;
    PublicKey::from_raw(algorithm, raw).map_err(|e| BytesReprError::InvalidPublicKey(e.to_string()))
}

/// Conversion from a [`ParsedValue`] into a native Rust shape
pub trait FromParsed: Sized {
    /// Convert, failing if the value has a different shape
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError>;
}

fn mismatch<T>(expected: &str, found: &ParsedValue) -> Result<T, ConversionError> {
    Err(ConversionError::TypeMismatch {
        expected: expected.to_string(),
        found: found.kind_name().to_string(),
    })
}

impl FromParsed for ParsedValue {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        Ok(value)
    }
}

macro_rules! impl_from_parsed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromParsed for $ty {
                fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
                    match value {
                        ParsedValue::$variant(v) => Ok(v),
                        other => mismatch(stringify!($variant), &other),
                    }
                }
            }
        )*
    };
}

impl_from_parsed! {
    bool => Bool,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u32 => U32,
    u64 => U64,
    U128 => U128,
    U256 => U256,
    U512 => U512,
    String => String,
    Key => Key,
    URef => URef,
    PublicKey => PublicKey,
}

impl FromParsed for () {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Unit => Ok(()),
            other => mismatch("Unit", &other),
        }
    }
}

impl FromParsed for AccountHash {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Key(Key::Account(hash)) => Ok(hash),
            ParsedValue::ByteArray(bytes) => <[u8; 32]>::try_from(bytes.as_slice())
                .map(AccountHash::new)
                .map_err(|_| ConversionError::InvalidLength {
                    expected: 32,
                    got: bytes.len(),
                }),
            other => mismatch("Key(Account)", &other),
        }
    }
}

impl<T: FromParsed> FromParsed for Vec<T> {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::List(items) => items.into_iter().map(T::from_parsed).collect(),
            ParsedValue::ByteArray(bytes) => bytes
                .into_iter()
                .map(|b| T::from_parsed(ParsedValue::U8(b)))
                .collect(),
            ParsedValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_parsed(ParsedValue::Tuple2(Box::new(k), Box::new(v))))
                .collect(),
            other => mismatch("List", &other),
        }
    }
}

impl<const N: usize> FromParsed for [u8; N] {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        let bytes = match value {
            ParsedValue::ByteArray(bytes) => bytes,
            list @ ParsedValue::List(_) => Vec::<u8>::from_parsed(list)?,
            other => return mismatch("ByteArray", &other),
        };
        let got = bytes.len();
        bytes
            .try_into()
            .map_err(|_| ConversionError::InvalidLength { expected: N, got })
    }
}

impl<T: FromParsed> FromParsed for Option<T> {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Option(inner) => inner.map(|v| T::from_parsed(*v)).transpose(),
            other => mismatch("Option", &other),
        }
    }
}

impl<T: FromParsed, E: FromParsed> FromParsed for Result<T, E> {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Result(Ok(v)) => Ok(Ok(T::from_parsed(*v)?)),
            ParsedValue::Result(Err(e)) => Ok(Err(E::from_parsed(*e)?)),
            other => mismatch("Result", &other),
        }
    }
}

impl<A: FromParsed> FromParsed for (A,) {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Tuple1(a) => Ok((A::from_parsed(*a)?,)),
            other => mismatch("Tuple1", &other),
        }
    }
}

impl<A: FromParsed, B: FromParsed> FromParsed for (A, B) {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Tuple2(a, b) => Ok((A::from_parsed(*a)?, B::from_parsed(*b)?)),
            other => mismatch("Tuple2", &other),
        }
    }
}

impl<A: FromParsed, B: FromParsed, C: FromParsed> FromParsed for (A, B, C) {
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Tuple3(a, b, c) => Ok((
                A::from_parsed(*a)?,
                B::from_parsed(*b)?,
                C::from_parsed(*c)?,
            )),
            other => mismatch("Tuple3", &other),
        }
    }
}

impl<K, V> FromParsed for IndexMap<K, V>
where
    K: FromParsed + Hash + Eq,
    V: FromParsed,
{
    fn from_parsed(value: ParsedValue) -> Result<Self, ConversionError> {
        match value {
            ParsedValue::Map(entries) => entries
                .into_iter()
                .map(|(k, v)| Ok((K::from_parsed(k)?, V::from_parsed(v)?)))
                .collect(),
            other => mismatch("Map", &other),
        }
    }
}
