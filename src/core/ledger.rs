//! The account store: owner of the account list and sole writer of saved state.
use crate::core::account::{Account, AccountId};
use crate::core::error::{PersistenceError, ValidationError};
use crate::core::form;
use crate::core::persistence::Persistence;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// What [`AccountStore::load`] found in storage.
#[derive(Debug)]
pub enum LoadStatus {
    /// Nothing was saved before; the store starts empty.
    Fresh,
    /// Saved accounts were restored.
    Loaded(usize),
    /// Saved state could not be read or parsed; the store starts empty.
    Recovered(PersistenceError),
}

enum WriterMsg {
    Save(Vec<u8>),
    Flush(oneshot::Sender<()>),
}

/// In-memory account list with write-behind persistence.
///
/// Mutations apply immediately and queue a snapshot for the background
/// writer. Snapshots are written in the order they were queued, so storage
/// always ends up with the latest list. Write failures are logged and never
/// undo the in-memory change.
pub struct AccountStore {
    accounts: Vec<Account>,
    persistence: Arc<dyn Persistence>,
    writer: mpsc::UnboundedSender<WriterMsg>,
    writer_task: JoinHandle<()>,
    last_id: i64,
}

impl AccountStore {
    /// Creates an empty store. Must be called from within a tokio runtime,
    /// which hosts the background writer.
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        let (writer, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(run_writer(Arc::clone(&persistence), rx));
        Self {
            accounts: Vec::new(),
            persistence,
            writer,
            writer_task,
            last_id: 0,
        }
    }

    /// Creates a store and restores any saved accounts.
    pub async fn open(persistence: Arc<dyn Persistence>) -> (Self, LoadStatus) {
        let mut store = Self::new(persistence);
        let status = store.load().await;
        (store, status)
    }

    /// Replaces the in-memory list with the saved one.
    ///
    /// Missing or unreadable state leaves the store empty; the failure is
    /// returned as [`LoadStatus::Recovered`] rather than an error.
    pub async fn load(&mut self) -> LoadStatus {
        if !self.persistence.exists().await {
            debug!("No saved accounts, starting empty");
            self.accounts.clear();
            return LoadStatus::Fresh;
        }

        let restored: Result<Vec<Account>, PersistenceError> =
            match self.persistence.read_all().await {
                Ok(bytes) => serde_json::from_slice(&bytes).map_err(Into::into),
                Err(e) => Err(e),
            };

        match restored {
            Ok(accounts) => {
                debug!("Loaded {} saved accounts", accounts.len());
                self.last_id = accounts
                    .iter()
                    .filter_map(|a| a.id.as_millis())
                    .fold(self.last_id, i64::max);
                self.accounts = accounts;
                LoadStatus::Loaded(self.accounts.len())
            }
            Err(e) => {
                warn!(error = %e, "Failed to load saved accounts, starting empty");
                self.accounts.clear();
                LoadStatus::Recovered(e)
            }
        }
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn get(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == *id)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Validates and appends a new account, returning its id.
    pub fn add(&mut self, name: &str, balance_text: &str) -> Result<AccountId, ValidationError> {
        let (name, balance) = form::validate(name, balance_text)?;
        let id = self.next_id();
        debug!(%id, %name, %balance, "Adding account");
        self.accounts.push(Account {
            id: id.clone(),
            name,
            balance,
        });
        self.save();
        Ok(id)
    }

    /// Validates and replaces the name and balance of an account.
    ///
    /// Returns `Ok(false)` without changing anything when `id` is unknown.
    pub fn update(
        &mut self,
        id: &AccountId,
        name: &str,
        balance_text: &str,
    ) -> Result<bool, ValidationError> {
        let (name, balance) = form::validate(name, balance_text)?;
        let found = match self.accounts.iter_mut().find(|a| a.id == *id) {
            Some(account) => {
                debug!(%id, %name, %balance, "Updating account");
                account.name = name;
                account.balance = balance;
                true
            }
            None => {
                debug!(%id, "Update for unknown account ignored");
                false
            }
        };
        self.save();
        Ok(found)
    }

    /// Removes an account. Returns whether it was present.
    pub fn remove(&mut self, id: &AccountId) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.id != *id);
        let removed = self.accounts.len() != before;
        debug!(%id, removed, "Removing account");
        self.save();
        removed
    }

    /// Waits until every snapshot queued so far has been written or has failed.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.writer.send(WriterMsg::Flush(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }

    /// Writes everything still queued, then stops the writer and releases
    /// the persistence adapter.
    pub async fn close(self) {
        let Self {
            persistence,
            writer,
            writer_task,
            ..
        } = self;
        drop(persistence);
        drop(writer);
        if let Err(e) = writer_task.await {
            error!(error = %e, "Account writer did not shut down cleanly");
        }
    }

    // Time-derived and strictly increasing within the process. Once a loaded
    // id has used up the range, falls back to the first value from now that
    // no account holds.
    fn next_id(&mut self) -> AccountId {
        let now = Utc::now().timestamp_millis();
        let mut candidate = match self.last_id.checked_add(1) {
            Some(next) => now.max(next),
            None => now,
        };
        while self
            .accounts
            .iter()
            .any(|a| a.id.as_millis() == Some(candidate))
        {
            candidate = candidate.saturating_add(1);
        }
        self.last_id = self.last_id.max(candidate);
        AccountId::new(candidate.to_string())
    }

    fn save(&self) {
        let bytes = match serde_json::to_vec(&self.accounts) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(error = %e, "Failed to serialize accounts");
                return;
            }
        };
        if self.writer.send(WriterMsg::Save(bytes)).is_err() {
            error!("Account writer has stopped, changes will not be saved");
        }
    }
}

async fn run_writer(persistence: Arc<dyn Persistence>, mut rx: mpsc::UnboundedReceiver<WriterMsg>) {
    while let Some(msg) = rx.recv().await {
        match msg {
            WriterMsg::Save(bytes) => {
                let len = bytes.len();
                match persistence.write_all(bytes).await {
                    Ok(()) => debug!("Saved accounts ({len} bytes)"),
                    Err(e) => error!(error = %e, "Failed to save accounts"),
                }
            }
            WriterMsg::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("Account writer stopped");
}
