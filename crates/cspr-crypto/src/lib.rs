//! # cspr-crypto
//!
//! Cryptographic helpers for the cspr SDK.
//!
//! - Blake2b-256 hashing
//! - CEP57 mixed-case checksummed hex
//! - Ed25519 / Secp256k1 public keys and account-hash derivation

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod checksum;
mod error;
mod hash;
mod public_key;

pub use checksum::ChecksumStatus;
pub use error::CryptoError;
pub use hash::{blake2b256, BLAKE2B_DIGEST_LENGTH};
pub use public_key::{Algorithm, PublicKey};
