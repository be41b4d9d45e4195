//! Native conversion accessors on [`CLValue`].
//!
//! Leaf accessors look through one `Result::Ok` layer and one
//! `Option::Some` layer, so a `Result(ok: Option(U64), ..)` holding
//! `Ok(Some(5))` answers `to_u64()` with `5`. A `Result` holding `Err`
//! fails every accessor except [`CLValue::to_result`].

use cspr_crypto::PublicKey;
use cspr_primitives::{U128, U256, U512};
use indexmap::IndexMap;
use std::hash::Hash;
use thiserror::Error;

use super::{CLType, CLValue, FromParsed, ParsedValue};
use crate::bytesrepr::{u128_to_u512, u256_to_u512};
use crate::key::{Key, KeyTag, URef};

/// Conversion error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The value has a different type
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Requested shape
        expected: String,
        /// Actual type
        found: String,
    },

    /// The value is a `Result` holding `Err`
    #[error("{message}")]
    ResultErr {
        /// Description naming the descriptor and the payload
        message: String,
        /// Decoded error payload
        payload: ParsedValue,
    },

    /// The value is an `Option` holding `None`
    #[error("{0} holds None")]
    NoneValue(String),

    /// Fixed-size target of the wrong length
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength {
        /// Expected length
        expected: usize,
        /// Actual length
        got: usize,
    },

    /// `Any` values carry no decoded form
    #[error("{0} values have no decoded form")]
    NotParsed(CLType),
}

impl CLValue {
    /// Type and value after looking through one `Ok` layer
    fn through_result(&self) -> Result<(&CLType, &ParsedValue), ConversionError> {
        let parsed = self
            .parsed()
            .ok_or_else(|| ConversionError::NotParsed(self.cl_type().clone()))?;
        match (self.cl_type(), parsed) {
            (CLType::Result { ok, .. }, ParsedValue::Result(Ok(value))) => Ok((&**ok, &**value)),
            (cl_type @ CLType::Result { .. }, ParsedValue::Result(Err(payload))) => {
                Err(ConversionError::ResultErr {
                    message: format!("{} holds an Err value: {}", cl_type, payload.to_json()),
                    payload: (**payload).clone(),
                })
            }
            (cl_type, value) => Ok((cl_type, value)),
        }
    }

    /// Type and value after looking through one `Ok` and one `Some` layer
    fn unwrapped(&self) -> Result<(&CLType, &ParsedValue), ConversionError> {
        match self.through_result()? {
            (CLType::Option(inner), ParsedValue::Option(Some(value))) => Ok((&**inner, &**value)),
            (cl_type @ CLType::Option(_), ParsedValue::Option(None)) => {
                Err(ConversionError::NoneValue(cl_type.to_string()))
            }
            other => Ok(other),
        }
    }

    /// Convert the unwrapped value, checking its descriptor root first
    fn leaf_as<T: FromParsed>(
        &self,
        expected: &str,
        accepts: impl Fn(&CLType) -> bool,
    ) -> Result<T, ConversionError> {
        let (cl_type, value) = self.unwrapped()?;
        if !accepts(cl_type) {
            return Err(ConversionError::TypeMismatch {
                expected: expected.to_string(),
                found: cl_type.to_string(),
            });
        }
        T::from_parsed(value.clone())
    }

    /// Convert the decoded value into any [`FromParsed`] shape, without
    /// unwrapping
    pub fn to<T: FromParsed>(&self) -> Result<T, ConversionError> {
        T::from_parsed(self.parsed_or_any())
    }

    /// `Bool`
    pub fn to_bool(&self) -> Result<bool, ConversionError> {
        self.leaf_as("Bool", |t| *t == CLType::Bool)
    }

    /// `I32`
    pub fn to_i32(&self) -> Result<i32, ConversionError> {
        self.leaf_as("I32", |t| *t == CLType::I32)
    }

    /// `I64`
    pub fn to_i64(&self) -> Result<i64, ConversionError> {
        self.leaf_as("I64", |t| *t == CLType::I64)
    }

    /// `U8`
    pub fn to_u8(&self) -> Result<u8, ConversionError> {
        self.leaf_as("U8", |t| *t == CLType::U8)
    }

    /// `U32`
    pub fn to_u32(&self) -> Result<u32, ConversionError> {
        self.leaf_as("U32", |t| *t == CLType::U32)
    }

    /// `U64`
    pub fn to_u64(&self) -> Result<u64, ConversionError> {
        self.leaf_as("U64", |t| *t == CLType::U64)
    }

    /// `U128`
    pub fn to_u128(&self) -> Result<U128, ConversionError> {
        self.leaf_as("U128", |t| *t == CLType::U128)
    }

    /// `U256`
    pub fn to_u256(&self) -> Result<U256, ConversionError> {
        self.leaf_as("U256", |t| *t == CLType::U256)
    }

    /// `U512`
    pub fn to_u512(&self) -> Result<U512, ConversionError> {
        self.leaf_as("U512", |t| *t == CLType::U512)
    }

    /// Any of `U128`, `U256` or `U512`, widened to `U512`
    pub fn to_big_int(&self) -> Result<U512, ConversionError> {
        let (cl_type, value) = self.unwrapped()?;
        match value {
            ParsedValue::U128(v) => Ok(u128_to_u512(v)),
            ParsedValue::U256(v) => Ok(u256_to_u512(v)),
            ParsedValue::U512(v) => Ok(*v),
            _ => Err(ConversionError::TypeMismatch {
                expected: "U128, U256 or U512".to_string(),
                found: cl_type.to_string(),
            }),
        }
    }

    /// `Unit`
    pub fn to_unit(&self) -> Result<(), ConversionError> {
        self.leaf_as("Unit", |t| *t == CLType::Unit)
    }

    /// `String`
    pub fn to_string_value(&self) -> Result<String, ConversionError> {
        self.leaf_as("String", |t| *t == CLType::String)
    }

    /// `URef`
    pub fn to_uref(&self) -> Result<URef, ConversionError> {
        self.leaf_as("URef", |t| *t == CLType::URef)
    }

    /// `PublicKey`
    pub fn to_public_key(&self) -> Result<PublicKey, ConversionError> {
        self.leaf_as("PublicKey", |t| *t == CLType::PublicKey)
    }

    /// `Key` of any variant
    pub fn to_key(&self) -> Result<Key, ConversionError> {
        self.leaf_as("Key", |t| *t == CLType::Key)
    }

    /// `Key` of one specific variant
    pub fn to_key_of(&self, tag: KeyTag) -> Result<Key, ConversionError> {
        let key = self.to_key()?;
        if key.tag() != tag {
            return Err(ConversionError::TypeMismatch {
                expected: format!("Key({:?})", tag),
                found: format!("Key({:?})", key.tag()),
            });
        }
        Ok(key)
    }

    /// `List` elements
    pub fn to_list<T: FromParsed>(&self) -> Result<Vec<T>, ConversionError> {
        self.leaf_as("List", |t| matches!(t, CLType::List(_)))
    }

    /// `Map` entries in encoding order
    pub fn to_map<K, V>(&self) -> Result<IndexMap<K, V>, ConversionError>
    where
        K: FromParsed + Hash + Eq,
        V: FromParsed,
    {
        self.leaf_as("Map", |t| matches!(t, CLType::Map { .. }))
    }

    /// `ByteArray` contents
    pub fn to_byte_array(&self) -> Result<Vec<u8>, ConversionError> {
        self.leaf_as("ByteArray", |t| matches!(t, CLType::ByteArray(_)))
    }

    /// `Result`, with an `Err` payload returned as a value
    pub fn to_result<T: FromParsed, E: FromParsed>(&self) -> Result<Result<T, E>, ConversionError> {
        let parsed = self
            .parsed()
            .ok_or_else(|| ConversionError::NotParsed(self.cl_type().clone()))?;
        if !matches!(self.cl_type(), CLType::Result { .. }) {
            return Err(ConversionError::TypeMismatch {
                expected: "Result".to_string(),
                found: self.cl_type().to_string(),
            });
        }
        Result::<T, E>::from_parsed(parsed.clone())
    }

    /// `Tuple1`
    pub fn to_tuple1<A: FromParsed>(&self) -> Result<(A,), ConversionError> {
        self.leaf_as("Tuple1", |t| matches!(t, CLType::Tuple1(_)))
    }

    /// `Tuple2`
    pub fn to_tuple2<A: FromParsed, B: FromParsed>(&self) -> Result<(A, B), ConversionError> {
        self.leaf_as("Tuple2", |t| matches!(t, CLType::Tuple2(..)))
    }

    /// `Tuple3`
    pub fn to_tuple3<A: FromParsed, B: FromParsed, C: FromParsed>(
        &self,
    ) -> Result<(A, B, C), ConversionError> {
        self.leaf_as("Tuple3", |t| matches!(t, CLType::Tuple3(..)))
    }

    /// `Option`, looking through one `Ok` layer
    pub fn to_option<T: FromParsed>(&self) -> Result<Option<T>, ConversionError> {
        let (cl_type, value) = self.through_result()?;
        if !matches!(cl_type, CLType::Option(_)) {
            return Err(ConversionError::TypeMismatch {
                expected: "Option".to_string(),
                found: cl_type.to_string(),
            });
        }
        Option::<T>::from_parsed(value.clone())
    }
}
