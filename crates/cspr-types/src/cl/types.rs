//! CLType descriptors

use std::fmt;

use crate::bytesrepr::{ByteReader, ByteWriter, BytesReprError, MAX_DEPTH};

/// One-byte wire tag of a descriptor node
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum CLTypeTag {
    /// `bool`
    Bool = 0,
    /// `i32`
    I32 = 1,
    /// `i64`
    I64 = 2,
    /// `u8`
    U8 = 3,
    /// `u32`
    U32 = 4,
    /// `u64`
    U64 = 5,
    /// 128-bit unsigned
    U128 = 6,
    /// 256-bit unsigned
    U256 = 7,
    /// 512-bit unsigned
    U512 = 8,
    /// `()`
    Unit = 9,
    /// UTF-8 string
    String = 10,
    /// Global-state key
    Key = 11,
    /// Unforgeable reference
    URef = 12,
    /// Optional value
    Option = 13,
    /// Variable-length list
    List = 14,
    /// Fixed-length byte array
    ByteArray = 15,
    /// Ok/Err value
    Result = 16,
    /// Ordered key/value pairs
    Map = 17,
    /// 1-tuple
    Tuple1 = 18,
    /// 2-tuple
    Tuple2 = 19,
    /// 3-tuple
    Tuple3 = 20,
    /// Opaque bytes
    Any = 21,
    /// Public key
    PublicKey = 22,
}

impl CLTypeTag {
    /// Parse a wire tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        use CLTypeTag::*;
        Some(match tag {
            0 => Bool,
            1 => I32,
            2 => I64,
            3 => U8,
            4 => U32,
            5 => U64,
            6 => U128,
            7 => U256,
            8 => U512,
            9 => Unit,
            10 => String,
            11 => Key,
            12 => URef,
            13 => Option,
            14 => List,
            15 => ByteArray,
            16 => Result,
            17 => Map,
            18 => Tuple1,
            19 => Tuple2,
            20 => Tuple3,
            21 => Any,
            22 => PublicKey,
            _ => return None,
        })
    }

    /// Name used in JSON and error messages
    pub fn name(&self) -> &'static str {
        use CLTypeTag::*;
        match self {
            Bool => "Bool",
            I32 => "I32",
            I64 => "I64",
            U8 => "U8",
            U32 => "U32",
            U64 => "U64",
            U128 => "U128",
            U256 => "U256",
            U512 => "U512",
            Unit => "Unit",
            String => "String",
            Key => "Key",
            URef => "URef",
            Option => "Option",
            List => "List",
            ByteArray => "ByteArray",
            Result => "Result",
            Map => "Map",
            Tuple1 => "Tuple1",
            Tuple2 => "Tuple2",
            Tuple3 => "Tuple3",
            Any => "Any",
            PublicKey => "PublicKey",
        }
    }
}

/// Type descriptor of a [`CLValue`](super::CLValue)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CLType {
    /// `bool`
    Bool,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `u8`
    U8,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// 128-bit unsigned
    U128,
    /// 256-bit unsigned
    U256,
    /// 512-bit unsigned
    U512,
    /// `()`
    Unit,
    /// UTF-8 string
    String,
    /// Global-state key of any variant
    Key,
    /// Unforgeable reference
    URef,
    /// Public key
    PublicKey,
    /// Optional value
    Option(Box<CLType>),
    /// Variable-length list
    List(Box<CLType>),
    /// Fixed-length byte array
    ByteArray(u32),
    /// Ok/Err value
    Result {
        /// Ok type
        ok: Box<CLType>,
        /// Err type
        err: Box<CLType>,
    },
    /// Ordered key/value pairs
    Map {
        /// Key type
        key: Box<CLType>,
        /// Value type
        value: Box<CLType>,
    },
    /// 1-tuple
    Tuple1(Box<CLType>),
    /// 2-tuple
    Tuple2(Box<CLType>, Box<CLType>),
    /// 3-tuple
    Tuple3(Box<CLType>, Box<CLType>, Box<CLType>),
    /// Opaque bytes
    Any,
}

impl CLType {
    /// `Option(inner)`
    pub fn option(inner: CLType) -> Self {
        CLType::Option(Box::new(inner))
    }

    /// `List(element)`
    pub fn list(element: CLType) -> Self {
        CLType::List(Box::new(element))
    }

    /// `ByteArray(size)`
    pub fn byte_array(size: u32) -> Self {
        CLType::ByteArray(size)
    }

    /// `Result(ok, err)`
    pub fn result(ok: CLType, err: CLType) -> Self {
        CLType::Result {
            ok: Box::new(ok),
            err: Box::new(err),
        }
    }

    /// `Map(key, value)`
    pub fn map(key: CLType, value: CLType) -> Self {
        CLType::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// `Tuple1(a)`
    pub fn tuple1(a: CLType) -> Self {
        CLType::Tuple1(Box::new(a))
    }

    /// `Tuple2(a, b)`
    pub fn tuple2(a: CLType, b: CLType) -> Self {
        CLType::Tuple2(Box::new(a), Box::new(b))
    }

    /// `Tuple3(a, b, c)`
    pub fn tuple3(a: CLType, b: CLType, c: CLType) -> Self {
        CLType::Tuple3(Box::new(a), Box::new(b), Box::new(c))
    }

    /// Wire tag of the root node
    pub fn tag(&self) -> CLTypeTag {
        match self {
            CLType::Bool => CLTypeTag::Bool,
            CLType::I32 => CLTypeTag::I32,
            CLType::I64 => CLTypeTag::I64,
            CLType::U8 => CLTypeTag::U8,
            CLType::U32 => CLTypeTag::U32,
            CLType::U64 => CLTypeTag::U64,
            CLType::U128 => CLTypeTag::U128,
            CLType::U256 => CLTypeTag::U256,
            CLType::U512 => CLTypeTag::U512,
            CLType::Unit => CLTypeTag::Unit,
            CLType::String => CLTypeTag::String,
            CLType::Key => CLTypeTag::Key,
            CLType::URef => CLTypeTag::URef,
            CLType::PublicKey => CLTypeTag::PublicKey,
            CLType::Option(_) => CLTypeTag::Option,
            CLType::List(_) => CLTypeTag::List,
            CLType::ByteArray(_) => CLTypeTag::ByteArray,
            CLType::Result { .. } => CLTypeTag::Result,
            CLType::Map { .. } => CLTypeTag::Map,
            CLType::Tuple1(_) => CLTypeTag::Tuple1,
            CLType::Tuple2(..) => CLTypeTag::Tuple2,
            CLType::Tuple3(..) => CLTypeTag::Tuple3,
            CLType::Any => CLTypeTag::Any,
        }
    }

    /// Leaf descriptor for a tag, `None` for composite tags
    pub fn leaf(tag: CLTypeTag) -> Option<Self> {
        Some(match tag {
            CLTypeTag::Bool => CLType::Bool,
            CLTypeTag::I32 => CLType::I32,
            CLTypeTag::I64 => CLType::I64,
            CLTypeTag::U8 => CLType::U8,
            CLTypeTag::U32 => CLType::U32,
            CLTypeTag::U64 => CLType::U64,
            CLTypeTag::U128 => CLType::U128,
            CLTypeTag::U256 => CLType::U256,
            CLTypeTag::U512 => CLType::U512,
            CLTypeTag::Unit => CLType::Unit,
            CLTypeTag::String => CLType::String,
            CLTypeTag::Key => CLType::Key,
            CLTypeTag::URef => CLType::URef,
            CLTypeTag::PublicKey => CLType::PublicKey,
            CLTypeTag::Any => CLType::Any,
            _ => return None,
        })
    }

    /// Encode the descriptor: one tag per node, operands depth-first
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write(&mut writer);
        writer.into_bytes()
    }

    /// Append the descriptor bytes to `writer`
    pub fn write(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.tag() as u8);
        match self {
            CLType::Option(inner) | CLType::List(inner) | CLType::Tuple1(inner) => {
                inner.write(writer)
            }
            CLType::ByteArray(size) => writer.write_u32(*size),
            CLType::Result { ok, err } => {
                ok.write(writer);
                err.write(writer);
            }
            CLType::Map { key, value } => {
                key.write(writer);
                value.write(writer);
            }
            CLType::Tuple2(a, b) => {
                a.write(writer);
                b.write(writer);
            }
            CLType::Tuple3(a, b, c) => {
                a.write(writer);
                b.write(writer);
                c.write(writer);
            }
            _ => {}
        }
    }

    /// Decode a complete descriptor; trailing bytes are an error
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BytesReprError> {
        let mut reader = ByteReader::new(bytes);
        let cl_type = Self::read(&mut reader)?;
        reader.finish()?;
        Ok(cl_type)
    }

    /// Read a descriptor from a cursor
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, BytesReprError> {
        Self::read_at_depth(reader, 0)
    }

    fn read_at_depth(reader: &mut ByteReader<'_>, depth: usize) -> Result<Self, BytesReprError> {
        if depth > MAX_DEPTH {
            return Err(BytesReprError::DepthExceeded);
        }
        let tag_byte = reader.read_u8("CLType tag")?;
        let tag = CLTypeTag::from_u8(tag_byte).ok_or(BytesReprError::UnknownTypeTag(tag_byte))?;
        if let Some(leaf) = Self::leaf(tag) {
            return Ok(leaf);
        }
        if tag == CLTypeTag::ByteArray {
            return Ok(CLType::ByteArray(reader.read_u32("ByteArray size")?));
        }

        let mut next = || Self::read_at_depth(reader, depth + 1);
        Ok(match tag {
            CLTypeTag::Option => CLType::option(next()?),
            CLTypeTag::List => CLType::list(next()?),
            CLTypeTag::Result => {
                let ok = next()?;
                CLType::result(ok, next()?)
            }
            CLTypeTag::Map => {
                let key = next()?;
                CLType::map(key, next()?)
            }
            CLTypeTag::Tuple1 => CLType::tuple1(next()?),
            CLTypeTag::Tuple2 => {
                let a = next()?;
                CLType::tuple2(a, next()?)
            }
            CLTypeTag::Tuple3 => {
                let a = next()?;
                let b = next()?;
                CLType::tuple3(a, b, next()?)
            }
            _ => return Err(BytesReprError::UnknownTypeTag(tag_byte)),
        })
    }

    /// Nesting depth; leaves have depth 0
    pub fn depth(&self) -> usize {
        match self {
            CLType::Option(inner) | CLType::List(inner) | CLType::Tuple1(inner) => 1 + inner.depth(),
            CLType::Result { ok: a, err: b }
            | CLType::Map { key: a, value: b }
            | CLType::Tuple2(a, b) => 1 + a.depth().max(b.depth()),
            CLType::Tuple3(a, b, c) => 1 + a.depth().max(b.depth()).max(c.depth()),
            _ => 0,
        }
    }

    /// True if every `Any` in the tree sits where nothing follows it in a
    /// payload laid out at the end of a stream.
    ///
    /// `Any` payloads carry no length, so an `Any` list element, map entry or
    /// non-final tuple slot would swallow the bytes after it.
    pub fn any_only_trailing(&self) -> bool {
        self.any_trailing_at(true)
    }

    fn any_trailing_at(&self, last: bool) -> bool {
        match self {
            CLType::Any => last,
            CLType::Option(inner) | CLType::Tuple1(inner) => inner.any_trailing_at(last),
            CLType::Result { ok, err } => ok.any_trailing_at(last) && err.any_trailing_at(last),
            CLType::List(element) => element.any_trailing_at(false),
            CLType::Map { key, value } => key.any_trailing_at(false) && value.any_trailing_at(false),
            CLType::Tuple2(a, b) => a.any_trailing_at(false) && b.any_trailing_at(last),
            CLType::Tuple3(a, b, c) => {
                a.any_trailing_at(false) && b.any_trailing_at(false) && c.any_trailing_at(last)
            }
            _ => true,
        }
    }
}

impl fmt::Display for CLType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CLType::Option(inner) => write!(f, "Option({})", inner),
            CLType::List(inner) => write!(f, "List({})", inner),
            CLType::ByteArray(size) => write!(f, "ByteArray({})", size),
            CLType::Result { ok, err } => write!(f, "Result(ok: {}, err: {})", ok, err),
            CLType::Map { key, value } => write!(f, "Map(key: {}, value: {})", key, value),
            CLType::Tuple1(a) => write!(f, "Tuple1({})", a),
            CLType::Tuple2(a, b) => write!(f, "Tuple2({}, {})", a, b),
            CLType::Tuple3(a, b, c) => write!(f, "Tuple3({}, {}, {})", a, b, c),
            leaf => f.write_str(leaf.tag().name()),
        }
    }
}
