//! Request and response types for the node RPC

use cspr_crypto::PublicKey;
use cspr_primitives::Digest;
use cspr_types::{AccountHash, CLValue, Key, URef};
use serde::ser::SerializeMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Value held under a global-state key
///
/// Only `CLValue` is decoded; accounts, contracts, bids and the other
/// stored-value kinds are kept as the node sent them.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// `{"CLValue": {...}}`
    CLValue(CLValue),
    /// Any other stored-value kind, as raw JSON
    Other(Value),
}

impl StoredValue {
    /// The contained CLValue, if this is one
    pub fn as_cl_value(&self) -> Option<&CLValue> {
        match self {
            StoredValue::CLValue(value) => Some(value),
            StoredValue::Other(_) => None,
        }
    }

    /// Consume into the contained CLValue
    pub fn into_cl_value(self) -> Option<CLValue> {
        match self {
            StoredValue::CLValue(value) => Some(value),
            StoredValue::Other(_) => None,
        }
    }
}

impl Serialize for StoredValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StoredValue::CLValue(value) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("CLValue", value)?;
                map.end()
            }
            StoredValue::Other(value) => value.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StoredValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match value.get("CLValue") {
            Some(inner) => CLValue::from_json(inner)
                .map(StoredValue::CLValue)
                .map_err(de::Error::custom),
            None => Ok(StoredValue::Other(value)),
        }
    }
}

/// Result of `chain_get_state_root_hash`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStateRootHashResult {
    /// Node API version
    pub api_version: String,
    /// Root hash, absent when the block is unknown
    pub state_root_hash: Option<Digest>,
}

/// Result of `query_global_state`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryGlobalStateResult {
    /// Node API version
    pub api_version: String,
    /// Header of the block the query ran against, when queried by block
    #[serde(default)]
    pub block_header: Option<Value>,
    /// The value found
    pub stored_value: StoredValue,
    /// Hex-encoded merkle proof
    pub merkle_proof: String,
}

/// Result of `state_get_dictionary_item`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetDictionaryItemResult {
    /// Node API version
    pub api_version: String,
    /// Formatted `dictionary-` key of the item
    pub dictionary_key: String,
    /// The value found
    pub stored_value: StoredValue,
    /// Hex-encoded merkle proof
    pub merkle_proof: String,
}

/// Result of `query_balance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryBalanceResult {
    /// Node API version
    pub api_version: String,
    /// Balance in motes, as a decimal string
    pub balance: String,
}

/// Ways to address a dictionary item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DictionaryIdentifier {
    /// Dictionary named in an account's named keys
    AccountNamedKey {
        /// `account-hash-` key of the account
        key: Key,
        /// Named key of the dictionary
        dictionary_name: String,
        /// Item key within the dictionary
        dictionary_item_key: String,
    },
    /// Dictionary named in a contract's named keys
    ContractNamedKey {
        /// `hash-` key of the contract
        key: Key,
        /// Named key of the dictionary
        dictionary_name: String,
        /// Item key within the dictionary
        dictionary_item_key: String,
    },
    /// Dictionary addressed by its seed URef
    URef {
        /// Seed URef of the dictionary
        seed_uref: URef,
        /// Item key within the dictionary
        dictionary_item_key: String,
    },
    /// Item addressed directly by its `dictionary-` key
    Dictionary(Key),
}

/// Ways to address a purse for `query_balance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurseIdentifier {
    /// Main purse of the account owning this public key
    MainPurseUnderPublicKey(PublicKey),
    /// Main purse of the account with this hash
    MainPurseUnderAccountHash(AccountHash),
    /// A purse URef
    PurseUref(URef),
}

impl Serialize for PurseIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            PurseIdentifier::MainPurseUnderPublicKey(key) => {
                map.serialize_entry("main_purse_under_public_key", &key.to_hex())?
            }
            PurseIdentifier::MainPurseUnderAccountHash(hash) => {
                map.serialize_entry("main_purse_under_account_hash", &hash.to_formatted_string())?
            }
            PurseIdentifier::PurseUref(uref) => map.serialize_entry("purse_uref", uref)?,
        }
        map.end()
    }
}

impl From<PublicKey> for PurseIdentifier {
    fn from(key: PublicKey) -> Self {
        PurseIdentifier::MainPurseUnderPublicKey(key)
    }
}

impl From<AccountHash> for PurseIdentifier {
    fn from(hash: AccountHash) -> Self {
        PurseIdentifier::MainPurseUnderAccountHash(hash)
    }
}

impl From<URef> for PurseIdentifier {
    fn from(uref: URef) -> Self {
        PurseIdentifier::PurseUref(uref)
    }
}
