//! Durable storage contract for the serialized account list.

use crate::core::error::PersistenceError;
use async_trait::async_trait;

/// A single blob of saved state. Implementations are the only code that
/// touches the file system or database on behalf of the ledger.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Whether any state has been saved before.
    async fn exists(&self) -> bool;

    /// Reads the full saved blob. Fails when nothing was saved or it cannot be read.
    async fn read_all(&self) -> Result<Vec<u8>, PersistenceError>;

    /// Replaces the saved blob.
    async fn write_all(&self, bytes: Vec<u8>) -> Result<(), PersistenceError>;
}
