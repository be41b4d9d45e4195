//! # cspr-sdk
//!
//! RPC client for reading typed values out of a node's global state.
//!
//! ## Features
//!
//! - **CasperClient**: state root hash, global-state, dictionary and balance queries
//! - **Transport**: pluggable transport, with a mock for tests and JSON-RPC over HTTP
//! - **StoredValue**: query results decoded into [`CLValue`]s
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cspr_sdk::{CasperClient, Key};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CasperClient::connect("http://127.0.0.1:7777/rpc");
//!
//!     let root = client.get_state_root_hash(None).await?;
//!     let key: Key = "hash-0101010101010101010101010101010101010101010101010101010101010101".parse()?;
//!     let value = client.query_cl_value(&key, root, &["counter"]).await?;
//!     println!("counter = {}", value.to_u64()?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod error;
mod transport;
pub mod types;

pub use client::CasperClient;
pub use error::SdkError;
pub use transport::MockTransport;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export the value model for convenience
pub use cspr_primitives::{Digest, U512};
pub use cspr_types::{CLType, CLValue, Key, URef};
