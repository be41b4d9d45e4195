//! Transport layer for RPC communication

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::SdkError;

/// Transport trait for RPC communication (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an RPC request with named params and get the JSON `result`
    async fn request_json(&self, method: &str, params: Value) -> Result<Value, SdkError>;
}

/// Helper to deserialize response
pub fn deserialize_response<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, SdkError> {
    serde_json::from_value(value).map_err(|e| SdkError::Serialization(e.to_string()))
}

const MOCK_STATE_ROOT_HASH: &str =
    "0808080808080808080808080808080808080808080808080808080808080808";

/// Mock transport for testing
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    default_responses: Arc<Mutex<HashMap<String, Value>>>,
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        let mut defaults = HashMap::new();

        defaults.insert(
            "chain_get_state_root_hash".to_string(),
            json!({ "api_version": "1.5.6", "state_root_hash": MOCK_STATE_ROOT_HASH }),
        );
        defaults.insert(
            "query_global_state".to_string(),
            json!({
                "api_version": "1.5.6",
                "block_header": null,
                "stored_value": {
                    "CLValue": { "cl_type": "U64", "bytes": "0100000000000000", "parsed": 1 }
                },
                "merkle_proof": ""
            }),
        );
        defaults.insert(
            "state_get_dictionary_item".to_string(),
            json!({
                "api_version": "1.5.6",
                "dictionary_key": format!("dictionary-{}", "00".repeat(32)),
                "stored_value": {
                    "CLValue": { "cl_type": "String", "bytes": "0500000068656c6c6f", "parsed": "hello" }
                },
                "merkle_proof": ""
            }),
        );
        // 2.5 CSPR in motes
        defaults.insert(
            "query_balance".to_string(),
            json!({ "api_version": "1.5.6", "balance": "2500000000" }),
        );

        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_responses: Arc::new(Mutex::new(defaults)),
        }
    }

    /// Set a mock response for a specific method
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread panicked while holding the lock).
    pub fn set_response(&self, method: &str, response: Value) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(method.to_string(), response);
    }

    /// Clear custom responses
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn clear_responses(&self) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .clear();
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request_json(&self, method: &str, _params: Value) -> Result<Value, SdkError> {
        let custom_response = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = custom_response {
            return Ok(response);
        }

        let default_response = self
            .default_responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(method)
            .cloned();

        if let Some(response) = default_response {
            return Ok(response);
        }

        Err(SdkError::Rpc {
            code: -32601,
            message: format!("Method not found: {}", method),
        })
    }
}

/// HTTP transport speaking JSON-RPC 2.0 to a node's `/rpc` endpoint
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(url: &str) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create a transport around a preconfigured `reqwest` client
    pub fn with_client(url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn request_json(&self, method: &str, params: Value) -> Result<Value, SdkError> {
        let mut request = json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": method,
        });
        // Nodes reject `"params": null`
        if !params.is_null() {
            request["params"] = params;
        }

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}
