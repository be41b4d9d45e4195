//! Account public keys (Ed25519 and Secp256k1)

use std::fmt;

use crate::{blake2b256, checksum, CryptoError};
use cspr_primitives::Digest;

/// Signature algorithm of a public key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Ed25519, 32-byte keys
    Ed25519,
    /// Secp256k1, 33-byte compressed SEC1 keys
    Secp256k1,
}

impl Algorithm {
    /// Wire tag of the algorithm
    pub fn tag(&self) -> u8 {
        match self {
            Algorithm::Ed25519 => PublicKey::ED25519_TAG,
            Algorithm::Secp256k1 => PublicKey::SECP256K1_TAG,
        }
    }

    /// Parse a wire tag
    pub fn from_tag(tag: u8) -> Result<Self, CryptoError> {
        match tag {
            PublicKey::ED25519_TAG => Ok(Algorithm::Ed25519),
            PublicKey::SECP256K1_TAG => Ok(Algorithm::Secp256k1),
            other => Err(CryptoError::UnknownAlgorithm(other)),
        }
    }

    /// Raw key length in bytes
    pub fn key_length(&self) -> usize {
        match self {
            Algorithm::Ed25519 => PublicKey::ED25519_LENGTH,
            Algorithm::Secp256k1 => PublicKey::SECP256K1_LENGTH,
        }
    }

    /// Lowercase algorithm name, used when hashing a key into an account hash
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Ed25519 => "ed25519",
            Algorithm::Secp256k1 => "secp256k1",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Public key of an account
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PublicKey {
    /// Ed25519 key
    Ed25519([u8; 32]),
    /// Compressed Secp256k1 key
    Secp256k1([u8; 33]),
}

impl PublicKey {
    /// Tag byte of Ed25519 keys
    pub const ED25519_TAG: u8 = 0x01;
    /// Tag byte of Secp256k1 keys
    pub const SECP256K1_TAG: u8 = 0x02;
    /// Raw length of Ed25519 keys
    pub const ED25519_LENGTH: usize = 32;
    /// Raw length of compressed Secp256k1 keys
    pub const SECP256K1_LENGTH: usize = 33;

    /// Create an Ed25519 key from raw bytes
    pub fn ed25519(bytes: [u8; 32]) -> Self {
        PublicKey::Ed25519(bytes)
    }

    /// Create a Secp256k1 key from compressed SEC1 bytes, validating the point
    pub fn secp256k1(bytes: &[u8]) -> Result<Self, CryptoError> {
        let raw: [u8; 33] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            algorithm: Algorithm::Secp256k1.name(),
            expected: Self::SECP256K1_LENGTH,
            got: bytes.len(),
        })?;
        k256::PublicKey::from_sec1_bytes(&raw)
            .map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey::Secp256k1(raw))
    }

    /// Create a key from an algorithm and raw key bytes
    pub fn from_raw(algorithm: Algorithm, bytes: &[u8]) -> Result<Self, CryptoError> {
        match algorithm {
            Algorithm::Ed25519 => {
                let raw: [u8; 32] =
                    bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                        algorithm: algorithm.name(),
                        expected: Self::ED25519_LENGTH,
                        got: bytes.len(),
                    })?;
                Ok(PublicKey::Ed25519(raw))
            }
            Algorithm::Secp256k1 => Self::secp256k1(bytes),
        }
    }

    /// Parse tag byte followed by the raw key (exact length)
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let (tag, raw) = bytes
            .split_first()
            .ok_or(CryptoError::InvalidKeyLength {
                algorithm: "public key",
                expected: 1,
                got: 0,
            })?;
        Self::from_raw(Algorithm::from_tag(*tag)?, raw)
    }

    /// Parse the hex form `<tag><key>`; the key part may be CEP57 checksummed
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        if s.len() < 2 || !s.is_char_boundary(2) {
            return Err(CryptoError::InvalidHex(format!("public key too short: {:?}", s)));
        }
        let (tag_hex, key_hex) = s.split_at(2);
        let tag = u8::from_str_radix(tag_hex, 16)
            .map_err(|e| CryptoError::InvalidHex(e.to_string()))?;
        let raw = checksum::decode_strict(key_hex)?;
        Self::from_raw(Algorithm::from_tag(tag)?, &raw)
    }

    /// Algorithm of this key
    pub fn algorithm(&self) -> Algorithm {
        match self {
            PublicKey::Ed25519(_) => Algorithm::Ed25519,
            PublicKey::Secp256k1(_) => Algorithm::Secp256k1,
        }
    }

    /// Tag byte of this key
    pub fn tag(&self) -> u8 {
        self.algorithm().tag()
    }

    /// Raw key bytes (without tag)
    pub fn raw_bytes(&self) -> &[u8] {
        match self {
            PublicKey::Ed25519(bytes) => bytes,
            PublicKey::Secp256k1(bytes) => bytes,
        }
    }

    /// Tag byte followed by raw key bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.raw_bytes().len());
        bytes.push(self.tag());
        bytes.extend_from_slice(self.raw_bytes());
        bytes
    }

    /// Lowercase hex of tag and key
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Hex with the key part CEP57 checksummed
    pub fn to_checksummed_hex(&self) -> String {
        format!("{:02x}{}", self.tag(), checksum::encode(self.raw_bytes()))
    }

    /// Blake2b-256 of `algorithm name || 0x00 || raw key`
    pub fn account_hash(&self) -> Digest {
        let name = self.algorithm().name().as_bytes();
        let mut preimage = Vec::with_capacity(name.len() + 1 + self.raw_bytes().len());
        preimage.extend_from_slice(name);
        preimage.push(0);
        preimage.extend_from_slice(self.raw_bytes());
        blake2b256(&preimage)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey::{:?}({})", self.algorithm(), hex::encode(self.raw_bytes()))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for PublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for PublicKey {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_hex())
        }
    }

    impl<'de> Deserialize<'de> for PublicKey {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            PublicKey::from_hex(&s).map_err(de::Error::custom)
        }
    }
}
