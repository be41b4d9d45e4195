//! Little-endian byte reader/writer used by the value codec.
//!
//! Every read is bounds checked and fails with [`BytesReprError`] instead of
//! truncating; nothing here allocates more than the input can back.

use bytes::BufMut;
use cspr_primitives::{U128, U256, U512};
use thiserror::Error;

use crate::cl::CLType;

/// Maximum nesting depth of type descriptors and values
pub const MAX_DEPTH: usize = 50;

/// Binary encoding/decoding error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BytesReprError {
    /// Fewer bytes available than declared
    #[error("unexpected end of input while reading {context}: need {needed} bytes, have {remaining}")]
    UnexpectedEof {
        /// What was being read
        context: &'static str,
        /// Bytes required
        needed: usize,
        /// Bytes left
        remaining: usize,
    },

    /// Unknown CLType tag byte
    #[error("unknown CLType tag: {0}")]
    UnknownTypeTag(u8),

    /// Unknown key tag byte
    #[error("unknown key tag: {0}")]
    UnknownKeyTag(u8),

    /// Invalid discriminant for a bool, option or result
    #[error("invalid {context} discriminant: {value}")]
    InvalidDiscriminant {
        /// What was being read
        context: &'static str,
        /// Byte found
        value: u8,
    },

    /// String payload is not UTF-8
    #[error("invalid UTF-8 in string value")]
    InvalidUtf8,

    /// Big integer does not fit its declared width
    #[error("{type_name} value of {len} significant bytes exceeds {max} bytes")]
    IntegerOverflow {
        /// Integer type
        type_name: &'static str,
        /// Significant bytes found
        len: usize,
        /// Maximum width in bytes
        max: usize,
    },

    /// Bytes left over after a complete value
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    /// Descriptor or value nested too deeply
    #[error("nesting exceeds maximum depth of {MAX_DEPTH}")]
    DepthExceeded,

    /// Public key bytes rejected
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid access rights byte
    #[error("invalid access rights: {0:#04x}")]
    InvalidAccessRights(u8),

    /// Value does not fit the descriptor it is encoded under
    #[error("value does not match type {expected}: found {found}")]
    TypeMismatch {
        /// Descriptor being encoded
        expected: CLType,
        /// Description of the value found
        found: String,
    },

    /// Collection or string too large for a u32 length prefix
    #[error("length {0} exceeds u32::MAX")]
    LengthOverflow(usize),
}

/// Cursor over a byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a reader positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current position
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Unread bytes
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Number of unread bytes
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Fail unless every byte has been consumed
    pub fn finish(&self) -> Result<(), BytesReprError> {
        match self.remaining_len() {
            0 => Ok(()),
            n => Err(BytesReprError::TrailingBytes(n)),
        }
    }

    /// Read exactly `n` bytes
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], BytesReprError> {
        if n > self.remaining_len() {
            return Err(BytesReprError::UnexpectedEof {
                context,
                needed: n,
                remaining: self.remaining_len(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a fixed-size array
    #[inline]
    pub fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], BytesReprError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    /// Read every remaining byte
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = self.remaining();
        self.pos = self.data.len();
        rest
    }

    /// Read a single byte
    #[inline]
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, BytesReprError> {
        Ok(self.read_array::<1>(context)?[0])
    }

    /// Read a `0x00`/`0x01` bool
    pub fn read_bool(&mut self) -> Result<bool, BytesReprError> {
        match self.read_u8("bool")? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(BytesReprError::InvalidDiscriminant { context: "bool", value }),
        }
    }

    /// Read a little-endian i32
    pub fn read_i32(&mut self) -> Result<i32, BytesReprError> {
        Ok(i32::from_le_bytes(self.read_array("i32")?))
    }

    /// Read a little-endian i64
    pub fn read_i64(&mut self) -> Result<i64, BytesReprError> {
        Ok(i64::from_le_bytes(self.read_array("i64")?))
    }

    /// Read a little-endian u32
    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, BytesReprError> {
        Ok(u32::from_le_bytes(self.read_array(context)?))
    }

    /// Read a little-endian u64
    pub fn read_u64(&mut self) -> Result<u64, BytesReprError> {
        Ok(u64::from_le_bytes(self.read_array("u64")?))
    }

    /// Read a u32 length prefix
    pub fn read_len(&mut self, context: &'static str) -> Result<usize, BytesReprError> {
        Ok(self.read_u32(context)? as usize)
    }

    /// Read a u32-length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String, BytesReprError> {
        let len = self.read_len("string length")?;
        let bytes = self.read_bytes(len, "string")?;
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|_| BytesReprError::InvalidUtf8)
    }

    /// Read a length-prefixed little-endian unsigned integer, returning its
    /// significant bytes.
    ///
    /// Non-minimal encodings (trailing zero bytes) are accepted as long as
    /// the significant part fits `max` bytes.
    fn read_big_uint(&mut self, type_name: &'static str, max: usize) -> Result<&'a [u8], BytesReprError> {
        let len = self.read_u8(type_name)? as usize;
        let bytes = self.read_bytes(len, type_name)?;
        let significant = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        if significant > max {
            return Err(BytesReprError::IntegerOverflow {
                type_name,
                len: significant,
                max,
            });
        }
        Ok(&bytes[..significant])
    }

    /// Read a U128
    pub fn read_u128(&mut self) -> Result<U128, BytesReprError> {
        Ok(U128::from_little_endian(self.read_big_uint("U128", 16)?))
    }

    /// Read a U256
    pub fn read_u256(&mut self) -> Result<U256, BytesReprError> {
        Ok(U256::from_little_endian(self.read_big_uint("U256", 32)?))
    }

    /// Read a U512
    pub fn read_u512(&mut self) -> Result<U512, BytesReprError> {
        Ok(U512::from_little_endian(self.read_big_uint("U512", 64)?))
    }
}

/// Growable little-endian output buffer
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Write raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write a byte
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Write a bool as `0x00`/`0x01`
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(value as u8);
    }

    /// Write a little-endian i32
    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    /// Write a little-endian i64
    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    /// Write a little-endian u32
    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    /// Write a little-endian u64
    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Write a u32 length prefix
    pub fn write_len(&mut self, len: usize) -> Result<(), BytesReprError> {
        let len = u32::try_from(len).map_err(|_| BytesReprError::LengthOverflow(len))?;
        self.write_u32(len);
        Ok(())
    }

    /// Write a u32-length-prefixed UTF-8 string
    pub fn write_string(&mut self, value: &str) -> Result<(), BytesReprError> {
        self.write_len(value.len())?;
        self.write_bytes(value.as_bytes());
        Ok(())
    }

    /// Write a big integer given its full little-endian representation,
    /// emitting only the significant bytes.
    fn write_big_uint(&mut self, le_bytes: &[u8]) {
        let significant = le_bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        self.buf.put_u8(significant as u8);
        self.buf.put_slice(&le_bytes[..significant]);
    }

    /// Write a U128 in minimal form
    pub fn write_u128(&mut self, value: &U128) {
        let mut le = [0u8; 16];
        value.to_little_endian(&mut le);
        self.write_big_uint(&le);
    }

    /// Write a U256 in minimal form
    pub fn write_u256(&mut self, value: &U256) {
        let mut le = [0u8; 32];
        value.to_little_endian(&mut le);
        self.write_big_uint(&le);
    }

    /// Write a U512 in minimal form
    pub fn write_u512(&mut self, value: &U512) {
        let mut le = [0u8; 64];
        value.to_little_endian(&mut le);
        self.write_big_uint(&le);
    }
}

/// Widen a U128 to U512
pub(crate) fn u128_to_u512(value: &U128) -> U512 {
    let mut le = [0u8; 16];
    value.to_little_endian(&mut le);
    U512::from_little_endian(&le)
}

/// Widen a U256 to U512
pub(crate) fn u256_to_u512(value: &U256) -> U512 {
    let mut le = [0u8; 32];
    value.to_little_endian(&mut le);
    U512::from_little_endian(&le)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_fixed_width() {
        let data = [0xf6, 0xff, 0xff, 0xff, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_i32().unwrap(), -10);
        assert_eq!(reader.read_u64().unwrap(), 1);
        assert!(reader.is_empty());
        assert!(reader.finish().is_ok());
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        let err = reader.read_u32("u32").unwrap_err();
        assert_eq!(
            err,
            BytesReprError::UnexpectedEof {
                context: "u32",
                needed: 4,
                remaining: 2
            }
        );
        // Failed reads do not advance
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_read_bool_rejects_other_bytes() {
        let mut reader = ByteReader::new(&[0x02]);
        assert_eq!(
            reader.read_bool(),
            Err(BytesReprError::InvalidDiscriminant { context: "bool", value: 2 })
        );
    }

    #[test]
    fn test_read_string() {
        let data = [0x05, 0x00, 0x00, 0x00, b'h', b'e', b'l', b'l', b'o'];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), "hello");

        let truncated = [0x05, 0x00, 0x00, 0x00, b'h'];
        assert!(ByteReader::new(&truncated).read_string().is_err());

        let invalid = [0x01, 0x00, 0x00, 0x00, 0xff];
        assert_eq!(
            ByteReader::new(&invalid).read_string(),
            Err(BytesReprError::InvalidUtf8)
        );
    }

    #[test]
    fn test_big_uint_minimal_encoding() {
        let mut writer = ByteWriter::new();
        writer.write_u512(&U512::zero());
        writer.write_u512(&U512::from(0x7fff_ffff_ffff_fffeu64));
        assert_eq!(
            writer.into_bytes(),
            vec![0x00, 0x08, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f]
        );
    }

    #[test]
    fn test_big_uint_lenient_decoding() {
        let minimal = [0x08, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f];
        let padded = [0x09, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f, 0x00];
        let a = ByteReader::new(&minimal).read_u512().unwrap();
        let b = ByteReader::new(&padded).read_u512().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, U512::from(9_223_372_036_854_775_806u64));
    }

    #[test]
    fn test_big_uint_overflow() {
        let mut data = vec![17u8];
        data.extend_from_slice(&[0xff; 17]);
        assert!(matches!(
            ByteReader::new(&data).read_u128(),
            Err(BytesReprError::IntegerOverflow { type_name: "U128", len: 17, max: 16 })
        ));

        // Padding beyond the width is fine when it is zero
        let mut padded = vec![20u8, 0x01];
        padded.extend_from_slice(&[0x00; 19]);
        assert_eq!(ByteReader::new(&padded).read_u128().unwrap(), U128::from(1u8));
    }

    #[test]
    fn test_trailing_bytes() {
        let mut reader = ByteReader::new(&[0x01, 0x02]);
        reader.read_u8("u8").unwrap();
        assert_eq!(reader.finish(), Err(BytesReprError::TrailingBytes(1)));
    }
}
