//! Aggregate error type

use thiserror::Error;

use crate::bytesrepr::BytesReprError;
use crate::cl::{CLValueError, ConversionError, JsonError};
use crate::key::KeyError;

/// Any error raised by this crate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Binary codec error
    #[error("bytesrepr error: {0}")]
    BytesRepr(#[from] BytesReprError),

    /// Key parsing error
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// CLValue construction error
    #[error("CLValue error: {0}")]
    CLValue(#[from] CLValueError),

    /// JSON codec error
    #[error("JSON error: {0}")]
    Json(#[from] JsonError),

    /// Conversion error
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),
}
