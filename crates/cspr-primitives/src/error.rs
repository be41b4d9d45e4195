//! Common error types for primitives

use thiserror::Error;
use crate::digest::DigestError;

/// Primitive operation error
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// Digest error
    #[error("digest error: {0}")]
    Digest(#[from] DigestError),
}
