pub mod disk;
pub mod file;
pub mod memory;

use crate::core::config::{AppConfig, StorageKind};
use crate::core::persistence::Persistence;
use anyhow::{Context, Result};
use disk::DiskPersistence;
use file::FilePersistence;
use std::sync::Arc;
use tracing::debug;

/// Opens the storage backend selected in `config`.
pub fn open_persistence(config: &AppConfig) -> Result<Arc<dyn Persistence>> {
    let data_dir = config.default_data_path()?;
    debug!(
        "Opening {:?} storage in {}",
        config.storage,
        data_dir.display()
    );
    let persistence: Arc<dyn Persistence> = match config.storage {
        StorageKind::File => Arc::new(FilePersistence::in_dir(&data_dir)),
        StorageKind::Fjall => Arc::new(
            DiskPersistence::open(&data_dir.join("db"))
                .with_context(|| format!("Failed to open database in {}", data_dir.display()))?,
        ),
    };
    Ok(persistence)
}
