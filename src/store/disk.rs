use crate::core::error::PersistenceError;
use crate::core::persistence::Persistence;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION_NAME: &str = "accounts";
const ACCOUNTS_KEY: &str = "accounts";

/// Saves the account list under a single key in a fjall keyspace.
pub struct DiskPersistence {
    keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskPersistence {
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        std::fs::create_dir_all(path)
            .map_err(|e| PersistenceError::read(format!("{}: {e}", path.display())))?;
        let keyspace = fjall::Config::new(path)
            .open()
            .map_err(PersistenceError::read)?;
        let partition = keyspace
            .open_partition(PARTITION_NAME, PartitionCreateOptions::default())
            .map_err(PersistenceError::read)?;
        debug!("Opened fjall keyspace at {}", path.display());
        Ok(Self {
            keyspace,
            partition,
        })
    }
}

#[async_trait]
impl Persistence for DiskPersistence {
    async fn exists(&self) -> bool {
        match self.partition.contains_key(ACCOUNTS_KEY) {
            Ok(found) => found,
            Err(e) => {
                debug!("fjall lookup error: {}", e);
                false
            }
        }
    }

    async fn read_all(&self) -> Result<Vec<u8>, PersistenceError> {
        match self.partition.get(ACCOUNTS_KEY) {
            Ok(Some(value)) => Ok(value.to_vec()),
            Ok(None) => Err(PersistenceError::NotFound(format!(
                "{PARTITION_NAME}/{ACCOUNTS_KEY}"
            ))),
            Err(e) => Err(PersistenceError::read(e)),
        }
    }

    async fn write_all(&self, bytes: Vec<u8>) -> Result<(), PersistenceError> {
        self.partition
            .insert(ACCOUNTS_KEY, bytes)
            .map_err(PersistenceError::write)?;
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(PersistenceError::write)?;
        debug!("fjall PUT for key: {}", ACCOUNTS_KEY);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_disk_write_then_read() {
        let dir = tempdir().unwrap();
        let store = DiskPersistence::open(dir.path()).unwrap();
        assert!(!store.exists().await);
        assert!(matches!(
            store.read_all().await,
            Err(PersistenceError::NotFound(_))
        ));

        store.write_all(b"[]".to_vec()).await.unwrap();
        assert!(store.exists().await);
        assert_eq!(store.read_all().await.unwrap(), b"[]");
    }

    #[tokio::test]
    async fn test_disk_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = DiskPersistence::open(dir.path()).unwrap();
            store.write_all(b"[42]".to_vec()).await.unwrap();
        }
        let store = DiskPersistence::open(dir.path()).unwrap();
        assert_eq!(store.read_all().await.unwrap(), b"[42]");
    }
}
