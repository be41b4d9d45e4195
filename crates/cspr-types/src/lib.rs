//! # cspr-types
//!
//! Global-state keys and the typed value codec.
//!
//! - [`key`]: the global-state key family and its text/binary forms
//! - [`cl`]: `CLType` descriptors, `CLValue`, binary and JSON codecs, the
//!   generic decoder and native conversion accessors
//! - [`bytesrepr`]: the little-endian reader/writer underneath
//! - [`RuntimeArgs`]: named arguments passed to contracts
//!
//! ## Example
//!
//! ```rust
//! use cspr_types::cl::{CLType, CLValue};
//! use cspr_types::key::Key;
//!
//! let key = Key::from_formatted_str("era-2034").unwrap();
//! let value = CLValue::ok(CLValue::key(key), CLType::String).unwrap();
//!
//! let bytes = value.to_bytes().unwrap();
//! let decoded = CLValue::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded.to_key().unwrap(), key);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bytesrepr;
pub mod cl;
mod error;
pub mod key;
mod named_arg;

pub use cl::{CLType, CLValue, ParsedValue};
pub use error::TypesError;
pub use key::{AccountHash, Key, KeyError, URef};
pub use named_arg::{NamedArg, RuntimeArgs};
