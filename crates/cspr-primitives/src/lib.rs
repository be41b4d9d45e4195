//! # cspr-primitives
//!
//! Primitive types shared by every crate of the SDK.
//!
//! This crate provides the 32-byte [`Digest`] and re-exports the fixed-width
//! unsigned integers used by the value codec.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod digest;
mod error;

pub use digest::{Digest, DigestError};
pub use error::PrimitiveError;

// Re-export primitive-types for the unbounded CLType integers
pub use primitive_types::{U128, U256, U512};

/// Era identifier
pub type EraId = u64;
