use crate::core::error::PersistenceError;
use crate::core::persistence::Persistence;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Default)]
struct Inner {
    bytes: Option<Vec<u8>>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// Keeps the saved blob in memory. Nothing survives the process.
///
/// Reads and writes can be made to fail, to exercise recovery paths.
#[derive(Default)]
pub struct MemoryPersistence {
    inner: Mutex<Inner>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `bytes` already saved.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                bytes: Some(bytes),
                ..Inner::default()
            }),
        }
    }

    pub async fn fail_reads(&self, fail: bool) {
        self.inner.lock().await.fail_reads = fail;
    }

    pub async fn fail_writes(&self, fail: bool) {
        self.inner.lock().await.fail_writes = fail;
    }

    /// Number of successful writes so far.
    pub async fn write_count(&self) -> usize {
        self.inner.lock().await.writes
    }
}

#[async_trait]
impl Persistence for MemoryPersistence {
    async fn exists(&self) -> bool {
        self.inner.lock().await.bytes.is_some()
    }

    async fn read_all(&self) -> Result<Vec<u8>, PersistenceError> {
        let inner = self.inner.lock().await;
        if inner.fail_reads {
            return Err(PersistenceError::read("simulated read failure"));
        }
        inner
            .bytes
            .clone()
            .ok_or_else(|| PersistenceError::NotFound("memory".to_string()))
    }

    async fn write_all(&self, bytes: Vec<u8>) -> Result<(), PersistenceError> {
        let mut inner = self.inner.lock().await;
        if inner.fail_writes {
            return Err(PersistenceError::write("simulated write failure"));
        }
        debug!("Memory write of {} bytes", bytes.len());
        inner.bytes = Some(bytes);
        inner.writes += 1;
        Ok(())
    }
}
