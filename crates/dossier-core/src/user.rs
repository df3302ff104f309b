//! User record types — what the directory serves and the controller edits.

use serde::{Deserialize, Serialize};

/// Identifier for a user record.
///
/// Opaque to the controller: it is only ever compared for equality, never
/// interpreted.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    self.0.fmt(f)
  }
}

/// A user record as returned by the directory.
///
/// Immutable once returned; editing happens on a separate [`EditDraft`]
/// until a save commits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
  pub id:    UserId,
  pub name:  String,
  pub email: String,
  /// Server-assigned; displayed but never edited by the client.
  pub role:  String,
}

/// Mutable working copy of the editable fields.
///
/// Doubles as the payload of
/// [`UserDirectory::update`](crate::directory::UserDirectory::update) — both
/// fields are always submitted together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDraft {
  pub name:  String,
  pub email: String,
}

impl EditDraft {
  /// Seed a draft from the editable fields of `record`.
  pub fn from_record(record: &UserRecord) -> Self {
    Self {
      name:  record.name.clone(),
      email: record.email.clone(),
    }
  }
}

/// The two editable fields of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
  Name,
  Email,
}
