//! Account hash (Blake2b-256 of an account's public key)

use std::fmt;

use cspr_crypto::{checksum, PublicKey};

use super::KeyError;

/// 32-byte hash identifying an account
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountHash([u8; 32]);

impl AccountHash {
    /// Text prefix
    pub const PREFIX: &'static str = "account-hash-";

    /// Create from bytes
    pub const fn new(bytes: [u8; 32]) -> Self {
        AccountHash(bytes)
    }

    /// Derive from a public key
    pub fn from_public_key(key: &PublicKey) -> Self {
        AccountHash(*key.account_hash().as_bytes())
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `account-hash-<hex>`
    pub fn to_formatted_string(&self) -> String {
        format!("{}{}", Self::PREFIX, hex::encode(self.0))
    }

    /// Parse `account-hash-<hex>`; the hex may be CEP57 checksummed
    pub fn from_formatted_str(s: &str) -> Result<Self, KeyError> {
        let hex_part = s.strip_prefix(Self::PREFIX).ok_or_else(|| KeyError::UnknownPrefix {
            prefixes: Self::PREFIX.to_string(),
        })?;
        let bytes = checksum::decode_strict(hex_part)?;
        let bytes: [u8; 32] = bytes.as_slice().try_into().map_err(|_| KeyError::InvalidLength {
            prefix: Self::PREFIX,
            expected: 32,
            got: bytes.len(),
        })?;
        Ok(AccountHash(bytes))
    }
}

impl fmt::Debug for AccountHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountHash({})", hex::encode(self.0))
    }
}

impl fmt::Display for AccountHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted_string())
    }
}

impl From<[u8; 32]> for AccountHash {
    fn from(bytes: [u8; 32]) -> Self {
        AccountHash(bytes)
    }
}

impl From<&PublicKey> for AccountHash {
    fn from(key: &PublicKey) -> Self {
        Self::from_public_key(key)
    }
}

impl AsRef<[u8]> for AccountHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
