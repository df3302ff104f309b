//! [`InMemoryDirectory`] — the in-memory implementation of
//! [`UserDirectory`].

use std::{collections::HashMap, sync::Arc, time::Duration};

use dossier_core::{
  directory::UserDirectory,
  error::DirectoryError,
  user::{EditDraft, UserId, UserRecord},
};
use tokio::sync::RwLock;

/// A user directory held entirely in memory.
///
/// Cloning is cheap — the records live behind a shared, reference-counted
/// lock, so clones observe each other's updates.
#[derive(Clone, Default)]
pub struct InMemoryDirectory {
  records: Arc<RwLock<HashMap<UserId, UserRecord>>>,
  latency: Duration,
}

impl InMemoryDirectory {
  /// An empty directory.
  pub fn new() -> Self {
    Self::default()
  }

  /// A directory seeded with the two built-in demo records.
  pub fn seeded() -> Self {
    let records = [
      UserRecord {
        id:    UserId(1),
        name:  "John Doe".into(),
        email: "john@example.com".into(),
        role:  "admin".into(),
      },
      UserRecord {
        id:    UserId(2),
        name:  "Jane Smith".into(),
        email: "jane@example.com".into(),
        role:  "user".into(),
      },
    ];

    Self {
      records: Arc::new(RwLock::new(
        records.into_iter().map(|record| (record.id, record)).collect(),
      )),
      latency: Duration::ZERO,
    }
  }

  /// Answer every call only after sleeping for `latency`.
  pub fn with_latency(mut self, latency: Duration) -> Self {
    self.latency = latency;
    self
  }

  /// Insert (or replace) a record directly, bypassing the update contract.
  pub async fn insert(&self, record: UserRecord) {
    self.records.write().await.insert(record.id, record);
  }

  async fn simulate_latency(&self) {
    if !self.latency.is_zero() {
      tokio::time::sleep(self.latency).await;
    }
  }
}

impl UserDirectory for InMemoryDirectory {
  async fn fetch(&self, id: UserId) -> Result<UserRecord, DirectoryError> {
    self.simulate_latency().await;

    self
      .records
      .read()
      .await
      .get(&id)
      .cloned()
      .ok_or(DirectoryError::NotFound(id))
  }

  async fn update(
    &self,
    id: UserId,
    fields: EditDraft,
  ) -> Result<UserRecord, DirectoryError> {
    self.simulate_latency().await;

    let mut records = self.records.write().await;
    let record = records.get_mut(&id).ok_or_else(|| {
      // The contract reserves NotFound for fetch.
      DirectoryError::Transport(format!("no record to update for user {id}"))
    })?;

    // The editable fields come from the caller; everything else — the role
    // included — stays server-assigned.
    record.name = fields.name;
    record.email = fields.email;
    Ok(record.clone())
  }
}
