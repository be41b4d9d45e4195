//! Client integration tests for cspr-sdk
//!
//! Tests client creation, request shapes and result decoding through a
//! recording transport.

use async_trait::async_trait;
use cspr_crypto::PublicKey;
use cspr_sdk::types::{DictionaryIdentifier, PurseIdentifier, StoredValue};
use cspr_sdk::{CLType, CasperClient, Digest, Key, MockTransport, SdkError, Transport, U512};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// Forwards to a mock and remembers the last request
#[derive(Clone, Default)]
struct RecordingTransport {
    inner: Arc<MockTransport>,
    last: Arc<Mutex<Option<(String, Value)>>>,
}

impl RecordingTransport {
    fn last(&self) -> (String, Value) {
        self.last.lock().unwrap().clone().unwrap()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn request_json(&self, method: &str, params: Value) -> Result<Value, SdkError> {
        *self.last.lock().unwrap() = Some((method.to_string(), params.clone()));
        self.inner.request_json(method, params).await
    }
}

fn root() -> Digest {
    Digest::from([0xab; 32])
}

// ==================== Chain Info Tests ====================

#[tokio::test]
async fn test_state_root_hash_by_block() {
    let transport = RecordingTransport::default();
    let client = CasperClient::with_transport(transport.clone());

    let hash = client.get_state_root_hash(Some(Digest::from([1; 32]))).await.unwrap();
    assert_eq!(hash, Digest::from([8; 32]));

    let (method, params) = transport.last();
    assert_eq!(method, "chain_get_state_root_hash");
    assert_eq!(params, json!({ "block_identifier": { "Hash": "01".repeat(32) } }));
}

#[tokio::test]
async fn test_state_root_hash_missing() {
    let transport = MockTransport::new();
    transport.set_response(
        "chain_get_state_root_hash",
        json!({ "api_version": "1.5.6", "state_root_hash": null }),
    );
    let client = CasperClient::with_transport(transport);
    let err = client.get_state_root_hash(None).await.unwrap_err();
    assert!(matches!(err, SdkError::MissingField(_)));
}

// ==================== Global State Tests ====================

#[tokio::test]
async fn test_query_global_state_request_shape() {
    let transport = RecordingTransport::default();
    let client = CasperClient::with_transport(transport.clone());
    let key = Key::Hash([2; 32]);

    let result = client.query_global_state(&key, root(), &["a", "b"]).await.unwrap();
    assert_eq!(result.stored_value.as_cl_value().unwrap().cl_type(), &CLType::U64);

    let (method, params) = transport.last();
    assert_eq!(method, "query_global_state");
    assert_eq!(params["state_identifier"]["StateRootHash"], "ab".repeat(32));
    assert_eq!(params["key"], format!("hash-{}", "02".repeat(32)));
    assert_eq!(params["path"], json!(["a", "b"]));
}

#[tokio::test]
async fn test_query_global_state_nested_cl_value() {
    let transport = MockTransport::new();
    transport.set_response(
        "query_global_state",
        json!({
            "api_version": "1.5.6",
            "stored_value": {
                "CLValue": {
                    "cl_type": { "List": "String" },
                    "parsed": ["x", "yz"]
                }
            },
            "merkle_proof": "00"
        }),
    );
    let client = CasperClient::with_transport(transport);

    let value = client
        .query_cl_value(&Key::EraInfo(2034), root(), &[])
        .await
        .unwrap();
    assert_eq!(value.to_list::<String>().unwrap(), vec!["x", "yz"]);
    assert_eq!(value.bytes().len(), 4 + 5 + 6);
}

#[tokio::test]
async fn test_query_cl_value_rejects_other_kinds() {
    let transport = MockTransport::new();
    transport.set_response(
        "query_global_state",
        json!({
            "api_version": "1.5.6",
            "stored_value": { "Account": { "named_keys": [] } },
            "merkle_proof": ""
        }),
    );
    let client = CasperClient::with_transport(transport);
    let key = Key::Hash([0; 32]);

    let result = client.query_global_state(&key, root(), &[]).await.unwrap();
    assert!(matches!(result.stored_value, StoredValue::Other(_)));

    let err = client.query_cl_value(&key, root(), &[]).await.unwrap_err();
    assert!(matches!(err, SdkError::UnexpectedStoredValue { expected: "CLValue" }));
}

#[tokio::test]
async fn test_malformed_cl_value_is_serialization_error() {
    let transport = MockTransport::new();
    transport.set_response(
        "query_global_state",
        json!({
            "api_version": "1.5.6",
            "stored_value": { "CLValue": { "cl_type": "U8" } },
            "merkle_proof": ""
        }),
    );
    let client = CasperClient::with_transport(transport);
    let err = client
        .query_global_state(&Key::Hash([0; 32]), root(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Serialization(_)));
}

// ==================== Dictionary Tests ====================

#[tokio::test]
async fn test_get_dictionary_item() {
    let transport = RecordingTransport::default();
    let client = CasperClient::with_transport(transport.clone());
    let identifier = DictionaryIdentifier::ContractNamedKey {
        key: Key::Hash([3; 32]),
        dictionary_name: "balances".to_string(),
        dictionary_item_key: "alice".to_string(),
    };

    let item = client.get_dictionary_item(root(), &identifier).await.unwrap();
    let value = item.stored_value.into_cl_value().unwrap();
    assert_eq!(value.to_string_value().unwrap(), "hello");

    let (method, params) = transport.last();
    assert_eq!(method, "state_get_dictionary_item");
    assert_eq!(params["state_root_hash"], "ab".repeat(32));
    assert_eq!(
        params["dictionary_identifier"]["ContractNamedKey"]["dictionary_name"],
        "balances"
    );
}

// ==================== Balance Tests ====================

#[tokio::test]
async fn test_query_balance_by_public_key() {
    let transport = RecordingTransport::default();
    let client = CasperClient::with_transport(transport.clone());
    let key = PublicKey::from_hex(
        "012bac1d0ff9240ff0b7b06d555815640497861619ca12583ddef434885416e69b",
    )
    .unwrap();

    let balance = client.query_balance(PurseIdentifier::from(key)).await.unwrap();
    assert_eq!(balance, U512::from(2_500_000_000u64));

    let (_, params) = transport.last();
    assert_eq!(
        params["purse_identifier"]["main_purse_under_public_key"],
        key.to_hex()
    );
}

#[tokio::test]
async fn test_query_balance_large_value() {
    let transport = MockTransport::new();
    transport.set_response(
        "query_balance",
        json!({ "api_version": "1.5.6", "balance": "340282366920938463463374607431768211456" }),
    );
    let client = CasperClient::with_transport(transport);
    let purse = PurseIdentifier::MainPurseUnderAccountHash([7; 32].into());
    let balance = client.query_balance(purse).await.unwrap();
    assert_eq!(balance, U512::from(u128::MAX) + U512::one());
}

#[tokio::test]
async fn test_query_balance_bad_number() {
    let transport = MockTransport::new();
    transport.set_response("query_balance", json!({ "api_version": "1.5.6", "balance": "0x10" }));
    let client = CasperClient::with_transport(transport);
    let purse = PurseIdentifier::MainPurseUnderAccountHash([7; 32].into());
    assert!(matches!(
        client.query_balance(purse).await,
        Err(SdkError::Serialization(_))
    ));
}

// ==================== Error Tests ====================

#[tokio::test]
async fn test_unknown_method_surfaces_rpc_error() {
    let transport = MockTransport::new();
    transport.set_response("query_balance", json!({ "unexpected": true }));
    let client = CasperClient::with_transport(transport);
    let purse = PurseIdentifier::MainPurseUnderAccountHash([7; 32].into());
    assert!(client.query_balance(purse).await.is_err());

    let err = MockTransport::new()
        .request_json("info_get_peers", Value::Null)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Method not found"));
}
