use crate::core::error::PersistenceError;
use crate::core::persistence::Persistence;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const DATA_FILE_NAME: &str = "savingsData.json";

/// Saves the account list as a single JSON file.
///
/// Writes go to a sibling temp file first and are renamed into place, so an
/// interrupted write leaves the previous contents intact.
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The data file inside `data_dir`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(DATA_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl Persistence for FilePersistence {
    async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn read_all(&self) -> Result<Vec<u8>, PersistenceError> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                debug!("Read {} bytes from {}", bytes.len(), self.path.display());
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PersistenceError::NotFound(self.path.display().to_string()))
            }
            Err(e) => Err(PersistenceError::read(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write_all(&self, bytes: Vec<u8>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistenceError::write(format!("{}: {e}", parent.display())))?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes)
            .await
            .map_err(|e| PersistenceError::write(format!("{}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PersistenceError::write(format!("{}: {e}", self.path.display())))?;
        debug!("Wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_file_write_then_read() {
        let dir = tempdir().unwrap();
        let store = FilePersistence::in_dir(&dir.path().join("nested"));
        assert!(!store.exists().await);
        assert!(matches!(
            store.read_all().await,
            Err(PersistenceError::NotFound(_))
        ));

        store.write_all(b"[]".to_vec()).await.unwrap();
        assert!(store.exists().await);
        assert_eq!(store.read_all().await.unwrap(), b"[]");
        assert!(store.path().ends_with(DATA_FILE_NAME));
        assert!(!store.tmp_path().exists());

        store.write_all(b"[1,2]".to_vec()).await.unwrap();
        assert_eq!(store.read_all().await.unwrap(), b"[1,2]");
    }

    #[tokio::test]
    async fn test_file_write_failure_is_reported() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = FilePersistence::in_dir(&blocker);
        assert!(matches!(
            store.write_all(b"[]".to_vec()).await,
            Err(PersistenceError::Write(_))
        ));
    }
}
