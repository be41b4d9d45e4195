//! SDK error types

use cspr_types::cl::{ConversionError, JsonError};
use cspr_types::TypesError;
use thiserror::Error;

/// SDK error type
#[derive(Debug, Error)]
pub enum SdkError {
    /// Transport/network error
    #[error("Transport error: {0}")]
    Transport(String),

    /// RPC error from node
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Stored value was not the kind the call expects
    #[error("Unexpected stored value: expected {expected}")]
    UnexpectedStoredValue {
        /// Kind the caller asked for
        expected: &'static str,
    },

    /// Key, CLValue or conversion error
    #[error(transparent)]
    Types(#[from] TypesError),
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

impl From<JsonError> for SdkError {
    fn from(e: JsonError) -> Self {
        SdkError::Types(e.into())
    }
}

impl From<ConversionError> for SdkError {
    fn from(e: ConversionError) -> Self {
        SdkError::Types(e.into())
    }
}
