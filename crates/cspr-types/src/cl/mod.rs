//! Typed values: descriptors, the CLValue container and its codecs.
//!
//! A [`CLValue`] is a payload plus the [`CLType`] describing it. The binary
//! frame is `u32 LE payload length || payload || descriptor bytes`:
//!
//! ```rust
//! use cspr_types::cl::{CLType, CLValue};
//!
//! let value = CLValue::option_none(CLType::U8).unwrap();
//! assert_eq!(value.to_bytes().unwrap(), vec![1, 0, 0, 0, 0, 13, 3]);
//! assert!(value.to_option::<u8>().unwrap().is_none());
//! ```

mod convert;
mod decode;
mod encode;
mod json;
mod parsed;
mod types;
mod value;

pub use convert::ConversionError;
pub use decode::{decode, decode_as, read_value, FromParsed};
pub use encode::{encode, write_value};
pub use json::{cl_type_from_json, cl_type_to_json, parsed_from_json, JsonError};
pub use parsed::ParsedValue;
pub use types::{CLType, CLTypeTag};
pub use value::{CLValue, CLValueError};
