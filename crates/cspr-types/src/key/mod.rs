//! Global-state keys.
//!
//! A [`Key`] addresses a value in global state. Every variant has a one-byte
//! tag used on the wire and a textual prefix used by the JSON-RPC API:
//!
//! | Variant | Tag | Text |
//! |---|---|---|
//! | Account | 0 | `account-hash-<hex>` |
//! | Hash | 1 | `hash-<hex>` |
//! | URef | 2 | `uref-<hex>-<NNN>` |
//! | Transfer | 3 | `transfer-<hex>` |
//! | DeployInfo | 4 | `deploy-<hex>` |
//! | EraInfo | 5 | `era-<decimal>` |
//! | Balance | 6 | `balance-<hex>` |
//! | Bid | 7 | `bid-<hex>` |
//! | Withdraw | 8 | `withdraw-<hex>` |
//! | Dictionary | 9 | `dictionary-<hex>` |
//! | SystemContractRegistry | 10 | `system-contract-registry-<hex>` |
//! | EraSummary | 11 | `era-summary-<hex>` |
//! | Unbond | 12 | `unbond-<hex>` |
//! | ChainspecRegistry | 13 | `chainspec-registry-<hex>` |
//! | ChecksumRegistry | 14 | `checksum-registry-<hex>` |
//! | BidAddr | 15 | `bid-addr-<hex of layout tag and hashes>` |
//! | Package | 16 | `package-<hex>` |
//! | AddressableEntity | 17 | `entity-{system,account,contract}-<hex>` |
//!
//! Tags from 18 up (byte code, messages, named keys, block globals, balance
//! holds, entry points, entity state) are not modelled; reading one fails
//! with [`BytesReprError::UnknownKeyTag`].

mod account_hash;
mod bid_addr;
mod uref;

pub use account_hash::AccountHash;
pub use bid_addr::BidAddr;
pub use uref::{AccessRights, URef};

use std::fmt;

use cspr_crypto::{checksum, CryptoError};
use cspr_primitives::EraId;
use thiserror::Error;

use crate::bytesrepr::{ByteReader, ByteWriter, BytesReprError};

/// Key parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// No known prefix matched
    #[error("Key not valid. It should start with one of: {prefixes}")]
    UnknownPrefix {
        /// Accepted prefixes, comma separated
        prefixes: String,
    },
    /// Invalid hex
    #[error("invalid hex in key: {0}")]
    InvalidHex(String),
    /// Mixed-case hex with a bad CEP57 checksum
    #[error("key checksum mismatch")]
    ChecksumMismatch,
    /// Wrong raw length
    #[error("invalid {prefix} key length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Prefix of the key being parsed
        prefix: &'static str,
        /// Expected bytes
        expected: usize,
        /// Actual bytes
        got: usize,
    },
    /// Invalid URef access rights
    #[error("invalid access rights: {0}")]
    InvalidAccessRights(String),
    /// Era id is not a decimal u64
    #[error("invalid era id: {0}")]
    InvalidEraId(String),
    /// Unknown entity kind
    #[error("invalid entity kind: {0}")]
    InvalidEntityKind(String),
    /// Unknown bid address layout
    #[error("invalid bid address tag: {0}")]
    InvalidBidAddr(u8),
    /// Unknown key tag
    #[error("unknown key tag: {0}")]
    UnknownTag(u8),
}

impl From<CryptoError> for KeyError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::ChecksumMismatch => KeyError::ChecksumMismatch,
            other => KeyError::InvalidHex(other.to_string()),
        }
    }
}

/// Wire tag of a key variant; tags 0 through 17
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KeyTag {
    /// Account hash
    Account = 0,
    /// Contract hash
    Hash = 1,
    /// Unforgeable reference
    URef = 2,
    /// Transfer record
    Transfer = 3,
    /// Deploy info
    DeployInfo = 4,
    /// Era info
    EraInfo = 5,
    /// Purse balance
    Balance = 6,
    /// Validator bid
    Bid = 7,
    /// Unbonding purses
    Withdraw = 8,
    /// Dictionary item
    Dictionary = 9,
    /// System contract registry
    SystemContractRegistry = 10,
    /// Era summary
    EraSummary = 11,
    /// Unbonding delegators
    Unbond = 12,
    /// Chainspec registry
    ChainspecRegistry = 13,
    /// Checksum registry
    ChecksumRegistry = 14,
    /// Bids table entry
    BidAddr = 15,
    /// Package
    Package = 16,
    /// Addressable entity
    AddressableEntity = 17,
}

/// Every tag paired with its textual prefix
const PREFIXES: [(KeyTag, &str); 18] = [
    (KeyTag::Account, "account-hash-"),
    (KeyTag::Hash, "hash-"),
    (KeyTag::URef, "uref-"),
    (KeyTag::Transfer, "transfer-"),
    (KeyTag::DeployInfo, "deploy-"),
    (KeyTag::EraInfo, "era-"),
    (KeyTag::Balance, "balance-"),
    (KeyTag::Bid, "bid-"),
    (KeyTag::Withdraw, "withdraw-"),
    (KeyTag::Dictionary, "dictionary-"),
    (KeyTag::SystemContractRegistry, "system-contract-registry-"),
    (KeyTag::EraSummary, "era-summary-"),
    (KeyTag::Unbond, "unbond-"),
    (KeyTag::ChainspecRegistry, "chainspec-registry-"),
    (KeyTag::ChecksumRegistry, "checksum-registry-"),
    (KeyTag::BidAddr, "bid-addr-"),
    (KeyTag::Package, "package-"),
    (KeyTag::AddressableEntity, "entity-"),
];

impl KeyTag {
    /// Parse a wire tag
    pub fn from_u8(tag: u8) -> Option<Self> {
        PREFIXES.iter().map(|(t, _)| *t).find(|t| *t as u8 == tag)
    }

    /// Textual prefix
    pub fn prefix(&self) -> &'static str {
        PREFIXES
            .iter()
            .find(|(t, _)| t == self)
            .map(|(_, prefix)| *prefix)
            .unwrap_or_default()
    }
}

/// Kind of an addressable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// System contract
    System,
    /// Account
    Account,
    /// Smart contract
    SmartContract,
}

impl EntityKind {
    fn tag(&self) -> u8 {
        match self {
            EntityKind::System => 0,
            EntityKind::Account => 1,
            EntityKind::SmartContract => 2,
        }
    }

    fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(EntityKind::System),
            1 => Some(EntityKind::Account),
            2 => Some(EntityKind::SmartContract),
            _ => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            EntityKind::System => "system-",
            EntityKind::Account => "account-",
            EntityKind::SmartContract => "contract-",
        }
    }
}

/// Address of a value in global state
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Account
    Account(AccountHash),
    /// Contract hash
    Hash([u8; 32]),
    /// Unforgeable reference
    URef(URef),
    /// Transfer record
    Transfer([u8; 32]),
    /// Deploy info
    DeployInfo([u8; 32]),
    /// Era info of the given era
    EraInfo(EraId),
    /// Purse balance
    Balance([u8; 32]),
    /// Validator bid
    Bid([u8; 32]),
    /// Unbonding purses
    Withdraw([u8; 32]),
    /// Dictionary item
    Dictionary([u8; 32]),
    /// System contract registry
    SystemContractRegistry([u8; 32]),
    /// Era summary
    EraSummary([u8; 32]),
    /// Unbonding delegators
    Unbond([u8; 32]),
    /// Chainspec registry
    ChainspecRegistry([u8; 32]),
    /// Checksum registry
    ChecksumRegistry([u8; 32]),
    /// Bids table entry
    BidAddr(BidAddr),
    /// Package
    Package([u8; 32]),
    /// Addressable entity
    AddressableEntity(EntityKind, [u8; 32]),
}

impl Key {
    /// Wire tag
    pub fn tag(&self) -> KeyTag {
        match self {
            Key::Account(_) => KeyTag::Account,
            Key::Hash(_) => KeyTag::Hash,
            Key::URef(_) => KeyTag::URef,
            Key::Transfer(_) => KeyTag::Transfer,
            Key::DeployInfo(_) => KeyTag::DeployInfo,
            Key::EraInfo(_) => KeyTag::EraInfo,
            Key::Balance(_) => KeyTag::Balance,
            Key::Bid(_) => KeyTag::Bid,
            Key::Withdraw(_) => KeyTag::Withdraw,
            Key::Dictionary(_) => KeyTag::Dictionary,
            Key::SystemContractRegistry(_) => KeyTag::SystemContractRegistry,
            Key::EraSummary(_) => KeyTag::EraSummary,
            Key::Unbond(_) => KeyTag::Unbond,
            Key::ChainspecRegistry(_) => KeyTag::ChainspecRegistry,
            Key::ChecksumRegistry(_) => KeyTag::ChecksumRegistry,
            Key::BidAddr(_) => KeyTag::BidAddr,
            Key::Package(_) => KeyTag::Package,
            Key::AddressableEntity(..) => KeyTag::AddressableEntity,
        }
    }

    /// The 32-byte hash of hash-addressed variants
    fn hash_bytes(&self) -> Option<&[u8; 32]> {
        match self {
            Key::Account(hash) => Some(hash.as_bytes()),
            Key::Hash(bytes)
            | Key::Transfer(bytes)
            | Key::DeployInfo(bytes)
            | Key::Balance(bytes)
            | Key::Bid(bytes)
            | Key::Withdraw(bytes)
            | Key::Dictionary(bytes)
            | Key::SystemContractRegistry(bytes)
            | Key::EraSummary(bytes)
            | Key::Unbond(bytes)
            | Key::ChainspecRegistry(bytes)
            | Key::ChecksumRegistry(bytes)
            | Key::Package(bytes)
            | Key::AddressableEntity(_, bytes) => Some(bytes),
            Key::URef(_) | Key::EraInfo(_) | Key::BidAddr(_) => None,
        }
    }

    /// Build a hash-addressed key from its tag
    fn from_hash(tag: KeyTag, bytes: [u8; 32]) -> Option<Self> {
        Some(match tag {
            KeyTag::Account => Key::Account(AccountHash::new(bytes)),
            KeyTag::Hash => Key::Hash(bytes),
            KeyTag::Transfer => Key::Transfer(bytes),
            KeyTag::DeployInfo => Key::DeployInfo(bytes),
            KeyTag::Balance => Key::Balance(bytes),
            KeyTag::Bid => Key::Bid(bytes),
            KeyTag::Withdraw => Key::Withdraw(bytes),
            KeyTag::Dictionary => Key::Dictionary(bytes),
            KeyTag::SystemContractRegistry => Key::SystemContractRegistry(bytes),
            KeyTag::EraSummary => Key::EraSummary(bytes),
            KeyTag::Unbond => Key::Unbond(bytes),
            KeyTag::ChainspecRegistry => Key::ChainspecRegistry(bytes),
            KeyTag::ChecksumRegistry => Key::ChecksumRegistry(bytes),
            KeyTag::Package => Key::Package(bytes),
            KeyTag::URef | KeyTag::EraInfo | KeyTag::BidAddr | KeyTag::AddressableEntity => {
                return None
            }
        })
    }

    /// Raw bytes following the tag on the wire
    pub fn raw_bytes(&self) -> Vec<u8> {
        match self {
            Key::URef(uref) => uref.to_bytes().to_vec(),
            Key::EraInfo(era) => era.to_le_bytes().to_vec(),
            Key::BidAddr(addr) => addr.to_bytes(),
            Key::AddressableEntity(kind, bytes) => {
                let mut raw = Vec::with_capacity(33);
                raw.push(kind.tag());
                raw.extend_from_slice(bytes);
                raw
            }
            other => other.hash_bytes().map(|b| b.to_vec()).unwrap_or_default(),
        }
    }

    /// Tag byte followed by raw bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(66);
        self.write(&mut writer);
        writer.into_bytes()
    }

    /// Build a key from a tag and its raw bytes
    pub fn from_tag_and_bytes(tag: KeyTag, raw: &[u8]) -> Result<Self, KeyError> {
        let invalid_length = |expected: usize| KeyError::InvalidLength {
            prefix: tag.prefix(),
            expected,
            got: raw.len(),
        };
        match tag {
            KeyTag::URef => Ok(Key::URef(URef::from_slice(raw)?)),
            KeyTag::EraInfo => {
                let bytes: [u8; 8] = raw.try_into().map_err(|_| invalid_length(8))?;
                Ok(Key::EraInfo(u64::from_le_bytes(bytes)))
            }
            KeyTag::BidAddr => Ok(Key::BidAddr(BidAddr::from_slice(raw)?)),
            KeyTag::AddressableEntity => {
                if raw.len() != 33 {
                    return Err(invalid_length(33));
                }
                let kind = EntityKind::from_tag(raw[0])
                    .ok_or_else(|| KeyError::InvalidEntityKind(raw[0].to_string()))?;
                let mut bytes = [0u8; 32];
                bytes.copy_from_slice(&raw[1..]);
                Ok(Key::AddressableEntity(kind, bytes))
            }
            hashed => {
                let bytes: [u8; 32] = raw.try_into().map_err(|_| invalid_length(32))?;
                Self::from_hash(hashed, bytes).ok_or(KeyError::UnknownTag(hashed as u8))
            }
        }
    }

    /// Write tag and raw bytes
    pub fn write(&self, writer: &mut ByteWriter) {
        writer.write_u8(self.tag() as u8);
        writer.write_bytes(&self.raw_bytes());
    }

    /// Read a key from a cursor
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self, BytesReprError> {
        let tag_byte = reader.read_u8("key tag")?;
        let tag = KeyTag::from_u8(tag_byte).ok_or(BytesReprError::UnknownKeyTag(tag_byte))?;
        match tag {
            KeyTag::URef => {
                let addr = reader.read_array::<32>("uref address")?;
                let bits = reader.read_u8("access rights")?;
                let rights = AccessRights::from_bits(bits)
                    .ok_or(BytesReprError::InvalidAccessRights(bits))?;
                Ok(Key::URef(URef::new(addr, rights)))
            }
            KeyTag::EraInfo => Ok(Key::EraInfo(reader.read_u64()?)),
            KeyTag::BidAddr => Ok(Key::BidAddr(BidAddr::read(reader)?)),
            KeyTag::AddressableEntity => {
                let kind_byte = reader.read_u8("entity kind")?;
                let kind = EntityKind::from_tag(kind_byte).ok_or(
                    BytesReprError::InvalidDiscriminant {
                        context: "entity kind",
                        value: kind_byte,
                    },
                )?;
                Ok(Key::AddressableEntity(kind, reader.read_array::<32>("entity address")?))
            }
            hashed => {
                let bytes = reader.read_array::<32>("key hash")?;
                Self::from_hash(hashed, bytes).ok_or(BytesReprError::UnknownKeyTag(tag_byte))
            }
        }
    }

    /// Text form used by the JSON-RPC API
    pub fn to_formatted_string(&self) -> String {
        match self {
            Key::URef(uref) => uref.to_formatted_string(),
            Key::EraInfo(era) => format!("{}{}", KeyTag::EraInfo.prefix(), era),
            Key::BidAddr(addr) => {
                format!("{}{}", KeyTag::BidAddr.prefix(), hex::encode(addr.to_bytes()))
            }
            Key::AddressableEntity(kind, bytes) => format!(
                "{}{}{}",
                KeyTag::AddressableEntity.prefix(),
                kind.label(),
                hex::encode(bytes)
            ),
            other => format!(
                "{}{}",
                other.tag().prefix(),
                hex::encode(other.hash_bytes().copied().unwrap_or_default())
            ),
        }
    }

    /// Parse the text form; the longest matching prefix wins
    pub fn from_formatted_str(s: &str) -> Result<Self, KeyError> {
        let (tag, prefix) = PREFIXES
            .iter()
            .filter(|(_, prefix)| s.starts_with(prefix))
            .max_by_key(|(_, prefix)| prefix.len())
            .copied()
            .ok_or_else(|| KeyError::UnknownPrefix {
                prefixes: PREFIXES.iter().map(|(_, p)| *p).collect::<Vec<_>>().join(", "),
            })?;
        let rest = &s[prefix.len()..];

        match tag {
            KeyTag::URef => Ok(Key::URef(URef::from_formatted_str(s)?)),
            KeyTag::Account => Ok(Key::Account(AccountHash::from_formatted_str(s)?)),
            KeyTag::EraInfo => rest
                .parse::<u64>()
                .map(Key::EraInfo)
                .map_err(|_| KeyError::InvalidEraId(rest.to_string())),
            KeyTag::BidAddr => {
                let raw = checksum::decode_strict(rest)?;
                Ok(Key::BidAddr(BidAddr::from_slice(&raw)?))
            }
            KeyTag::AddressableEntity => {
                let (kind, hex_part) = [EntityKind::System, EntityKind::Account, EntityKind::SmartContract]
                    .into_iter()
                    .find_map(|kind| rest.strip_prefix(kind.label()).map(|h| (kind, h)))
                    .ok_or_else(|| KeyError::InvalidEntityKind(rest.to_string()))?;
                Ok(Key::AddressableEntity(kind, parse_hash(prefix, hex_part)?))
            }
            hashed => {
                let bytes = parse_hash(prefix, rest)?;
                Self::from_hash(hashed, bytes).ok_or(KeyError::UnknownTag(hashed as u8))
            }
        }
    }

    /// Account hash, if this is an account key
    pub fn as_account(&self) -> Option<&AccountHash> {
        match self {
            Key::Account(hash) => Some(hash),
            _ => None,
        }
    }

    /// URef, if this is a URef key
    pub fn as_uref(&self) -> Option<&URef> {
        match self {
            Key::URef(uref) => Some(uref),
            _ => None,
        }
    }
}

fn parse_hash(prefix: &'static str, hex_part: &str) -> Result<[u8; 32], KeyError> {
    let bytes = checksum::decode_strict(hex_part)?;
    bytes.as_slice().try_into().map_err(|_| KeyError::InvalidLength {
        prefix,
        expected: 32,
        got: bytes.len(),
    })
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.to_formatted_string())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted_string())
    }
}

impl std::str::FromStr for Key {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_formatted_str(s)
    }
}

impl From<AccountHash> for Key {
    fn from(hash: AccountHash) -> Self {
        Key::Account(hash)
    }
}

impl From<URef> for Key {
    fn from(uref: URef) -> Self {
        Key::URef(uref)
    }
}

impl serde::Serialize for Key {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_formatted_string())
    }
}

impl<'de> serde::Deserialize<'de> for Key {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Key::from_formatted_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "2bac1d0ff9240ff0b7b06d555815640497861619ca12583ddef434885416e69b";

    #[test]
    fn test_era_info_roundtrip() {
        let key = Key::from_formatted_str("era-2034").unwrap();
        assert_eq!(key, Key::EraInfo(2034));
        assert_eq!(key.to_formatted_string(), "era-2034");
        assert_eq!(key.raw_bytes(), 2034u64.to_le_bytes().to_vec());
    }

    #[test]
    fn test_unknown_prefix() {
        let err = Key::from_formatted_str("invalid-prefix-0102030405060708").unwrap_err();
        assert!(err.to_string().starts_with("Key not valid. It should start with"));
        assert!(err.to_string().contains("account-hash-"));
    }

    #[test]
    fn test_longest_prefix_wins() {
        let summary = Key::from_formatted_str(&format!("era-summary-{}", HASH)).unwrap();
        assert_eq!(summary.tag(), KeyTag::EraSummary);

        let hash = Key::from_formatted_str(&format!("hash-{}", HASH)).unwrap();
        assert_eq!(hash.tag(), KeyTag::Hash);

        let account = Key::from_formatted_str(&format!("account-hash-{}", HASH)).unwrap();
        assert_eq!(account.tag(), KeyTag::Account);
    }

    #[test]
    fn test_every_hash_prefix_roundtrips() {
        for (tag, prefix) in PREFIXES {
            let text = match tag {
                KeyTag::URef => format!("uref-{}-007", HASH),
                KeyTag::EraInfo => "era-7".to_string(),
                KeyTag::BidAddr => format!("bid-addr-01{}", HASH),
                KeyTag::AddressableEntity => format!("entity-contract-{}", HASH),
                _ => format!("{}{}", prefix, HASH),
            };
            let key = Key::from_formatted_str(&text).unwrap();
            assert_eq!(key.tag(), tag);
            assert_eq!(key.to_formatted_string(), text);

            let bytes = key.to_bytes();
            assert_eq!(bytes[0], tag as u8);
            let mut reader = ByteReader::new(&bytes);
            assert_eq!(Key::read(&mut reader).unwrap(), key);
            assert!(reader.is_empty());
            assert_eq!(Key::from_tag_and_bytes(tag, &bytes[1..]).unwrap(), key);
        }
    }

    #[test]
    fn test_uref_key_is_33_raw_bytes() {
        let key = Key::from_formatted_str(&format!("uref-{}-005", HASH)).unwrap();
        assert_eq!(key.raw_bytes().len(), 33);
        assert_eq!(key.raw_bytes()[32], 0x05);
        assert_eq!(key.as_uref().unwrap().access_rights(), AccessRights::READ_ADD);
    }

    #[test]
    fn test_invalid_hex_length() {
        let result = Key::from_formatted_str("hash-0102030405060708");
        assert!(matches!(
            result,
            Err(KeyError::InvalidLength { prefix: "hash-", expected: 32, got: 8 })
        ));
    }

    #[test]
    fn test_invalid_era() {
        assert!(matches!(
            Key::from_formatted_str("era-abc"),
            Err(KeyError::InvalidEraId(_))
        ));
    }

    #[test]
    fn test_invalid_entity_kind() {
        assert!(matches!(
            Key::from_formatted_str(&format!("entity-widget-{}", HASH)),
            Err(KeyError::InvalidEntityKind(_))
        ));
    }

    #[test]
    fn test_read_unknown_tag() {
        let mut data = vec![0xfe];
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            Key::read(&mut ByteReader::new(&data)),
            Err(BytesReprError::UnknownKeyTag(0xfe))
        );
    }

    #[test]
    fn test_bid_addr_layouts() {
        let delegator = Key::BidAddr(BidAddr::Delegator {
            validator: [0x11; 32],
            delegator: [0x22; 32],
        });
        let text = format!("bid-addr-02{}{}", "11".repeat(32), "22".repeat(32));
        assert_eq!(delegator.to_formatted_string(), text);
        assert_eq!(Key::from_formatted_str(&text).unwrap(), delegator);

        let bytes = delegator.to_bytes();
        assert_eq!(bytes.len(), 1 + 1 + 64);
        assert_eq!(&bytes[..2], &[15, 2]);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(Key::read(&mut reader).unwrap(), delegator);
        assert!(reader.is_empty());

        // Plain bid keys are not mistaken for bid addresses
        let bid = Key::from_formatted_str(&format!("bid-{}", HASH)).unwrap();
        assert_eq!(bid.tag(), KeyTag::Bid);
    }

    #[test]
    fn test_bid_addr_rejects_bad_layout() {
        assert_eq!(
            Key::from_formatted_str(&format!("bid-addr-09{}", HASH)),
            Err(KeyError::InvalidBidAddr(9))
        );
        assert!(matches!(
            Key::from_formatted_str(&format!("bid-addr-02{}", HASH)),
            Err(KeyError::InvalidLength { prefix: "bid-addr-", expected: 65, got: 33 })
        ));
        let mut data = vec![15, 7];
        data.extend_from_slice(&[0u8; 32]);
        assert_eq!(
            Key::read(&mut ByteReader::new(&data)),
            Err(BytesReprError::InvalidDiscriminant { context: "bid addr", value: 7 })
        );
    }

    #[test]
    fn test_unmodelled_tags_are_unknown() {
        for tag in [18u8, 19, 24] {
            assert_eq!(KeyTag::from_u8(tag), None);
            let mut data = vec![tag];
            data.extend_from_slice(&[0u8; 33]);
            assert_eq!(
                Key::read(&mut ByteReader::new(&data)),
                Err(BytesReprError::UnknownKeyTag(tag))
            );
        }
    }

    #[test]
    fn test_read_truncated() {
        let data = [0x01, 0x02, 0x03];
        assert!(matches!(
            Key::read(&mut ByteReader::new(&data)),
            Err(BytesReprError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_serde_as_formatted_string() {
        let key = Key::Hash([0x11; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"hash-{}\"", "11".repeat(32)));
        let back: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
