//! External collaborators the resolution pipeline depends on.
//!
//! The subsystem only polls navigation readiness and asks for a token;
//! it never mutates either collaborator's state. The durable store is
//! the one collaborator it writes through.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// The navigation layer. Readiness is only ever polled from here;
/// dispatch is a synchronous side effect.
pub trait Navigator: Send + Sync {
    /// Whether the navigation stack can accept a destination right now.
    fn is_ready(&self) -> bool;

    /// Push the given screen with the given parameter bag. Expected to
    /// be idempotent for repeated identical instructions.
    fn navigate(&self, screen: &str, params: &HashMap<String, String>);
}

/// Session collaborator used only to authorize existence probes.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// A currently valid bearer token, or `None` when unauthenticated.
    async fn access_token(&self) -> Option<String>;
}

/// Durable single-key storage for the delivery queue.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
