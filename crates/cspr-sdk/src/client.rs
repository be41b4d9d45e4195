//! CasperClient - RPC client for global-state queries

use cspr_primitives::{Digest, U512};
use cspr_types::{CLValue, Key};
use serde_json::{json, Value};

use crate::transport::{deserialize_response, MockTransport, Transport};
use crate::types::{
    DictionaryIdentifier, GetDictionaryItemResult, GetStateRootHashResult, PurseIdentifier,
    QueryBalanceResult, QueryGlobalStateResult,
};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Client for a node's JSON-RPC endpoint
pub struct CasperClient {
    transport: Box<dyn Transport>,
}

impl CasperClient {
    /// Create a new client with HTTP transport
    #[cfg(feature = "http")]
    pub fn connect(url: &str) -> Self {
        Self::with_transport(HttpTransport::new(url))
    }

    /// Create a new client with mock transport (for testing)
    pub fn new_mock() -> Self {
        Self::with_transport(MockTransport::new())
    }

    /// Create a client with a custom transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Helper method to make RPC request and deserialize
    async fn request<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, SdkError> {
        tracing::debug!(method, %params, "rpc request");
        let value = self.transport.request_json(method, params).await?;
        deserialize_response(value)
    }

    // ==================== Chain Info ====================

    /// State root hash of the given block, or of the latest block when `None`
    pub async fn get_state_root_hash(&self, block_hash: Option<Digest>) -> Result<Digest, SdkError> {
        let params = match block_hash {
            Some(hash) => json!({ "block_identifier": { "Hash": hash.to_hex() } }),
            None => Value::Null,
        };
        let result: GetStateRootHashResult =
            self.request("chain_get_state_root_hash", params).await?;
        result
            .state_root_hash
            .ok_or_else(|| SdkError::MissingField("state_root_hash".to_string()))
    }

    // ==================== Global State ====================

    /// Look up `key`, then follow `path` through named keys
    pub async fn query_global_state(
        &self,
        key: &Key,
        state_root_hash: Digest,
        path: &[&str],
    ) -> Result<QueryGlobalStateResult, SdkError> {
        let params = json!({
            "state_identifier": { "StateRootHash": state_root_hash.to_hex() },
            "key": key.to_formatted_string(),
            "path": path,
        });
        self.request("query_global_state", params).await
    }

    /// Like [`CasperClient::query_global_state`], but the stored value must be a CLValue
    pub async fn query_cl_value(
        &self,
        key: &Key,
        state_root_hash: Digest,
        path: &[&str],
    ) -> Result<CLValue, SdkError> {
        self.query_global_state(key, state_root_hash, path)
            .await?
            .stored_value
            .into_cl_value()
            .ok_or(SdkError::UnexpectedStoredValue { expected: "CLValue" })
    }

    /// Fetch one dictionary item
    pub async fn get_dictionary_item(
        &self,
        state_root_hash: Digest,
        identifier: &DictionaryIdentifier,
    ) -> Result<GetDictionaryItemResult, SdkError> {
        let params = json!({
            "state_root_hash": state_root_hash.to_hex(),
            "dictionary_identifier": serde_json::to_value(identifier)?,
        });
        self.request("state_get_dictionary_item", params).await
    }

    // ==================== Balances ====================

    /// Balance of a purse at the latest state, in motes
    pub async fn query_balance(&self, purse: PurseIdentifier) -> Result<U512, SdkError> {
        let params = json!({ "purse_identifier": serde_json::to_value(&purse)? });
        let result: QueryBalanceResult = self.request("query_balance", params).await?;
        U512::from_dec_str(&result.balance)
            .map_err(|e| SdkError::Serialization(format!("balance {:?}: {:?}", result.balance, e)))
    }
}

impl Default for CasperClient {
    fn default() -> Self {
        Self::new_mock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_state_root_hash() {
        let client = CasperClient::new_mock();
        let hash = client.get_state_root_hash(None).await.unwrap();
        assert_eq!(hash, Digest::from([8u8; 32]));
    }

    #[tokio::test]
    async fn test_query_cl_value() {
        let client = CasperClient::new_mock();
        let value = client
            .query_cl_value(&Key::Hash([1; 32]), Digest::from([8u8; 32]), &["counter"])
            .await
            .unwrap();
        assert_eq!(value.to_u64().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_default_balance() {
        let client = CasperClient::default();
        let balance = client
            .query_balance(PurseIdentifier::PurseUref(cspr_types::URef::new(
                [0; 32],
                cspr_types::key::AccessRights::READ,
            )))
            .await
            .unwrap();
        assert_eq!(balance, U512::from(2_500_000_000u64));
    }
}
