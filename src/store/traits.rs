//! Async `Database` trait — the storage interface the session store rides on.

use async_trait::async_trait;

use crate::error::DatabaseError;

/// Backend-agnostic key-value storage trait.
///
/// The onboarding data model is a handful of JSON blobs under string keys,
/// so the trait is a plain entry store rather than per-entity methods.
#[async_trait]
pub trait Database: Send + Sync {
    /// Run all pending schema migrations.
    async fn run_migrations(&self) -> Result<(), DatabaseError>;

    /// Read the entry under `key`, or `None` if no such entry exists.
    async fn get_entry(&self, key: &str) -> Result<Option<serde_json::Value>, DatabaseError>;

    /// Write (insert or overwrite) the entry under `key`.
    async fn set_entry(&self, key: &str, value: &serde_json::Value) -> Result<(), DatabaseError>;

    /// Delete the entry under `key`. Returns whether an entry was removed.
    async fn delete_entry(&self, key: &str) -> Result<bool, DatabaseError>;
}
