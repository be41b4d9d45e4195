//! Cryptographic errors

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Hex string contains a non-hex character or has odd length
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Mixed-case hex whose letter case does not match its CEP57 checksum
    #[error("checksum mismatch in hex string")]
    ChecksumMismatch,

    /// Unknown public key algorithm tag
    #[error("unknown public key algorithm tag: {0}")]
    UnknownAlgorithm(u8),

    /// Wrong key length for the algorithm
    #[error("invalid {algorithm} public key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength {
        /// Algorithm name
        algorithm: &'static str,
        /// Expected number of bytes
        expected: usize,
        /// Actual number of bytes
        got: usize,
    },

    /// Key bytes are not a valid curve point
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}
