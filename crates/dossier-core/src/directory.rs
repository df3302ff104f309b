//! The `UserDirectory` trait — the contract between the profile controller
//! and whatever answers for user records.
//!
//! The trait is implemented by data-access backends (e.g.
//! `dossier-directory`'s in-memory implementation). The controller depends
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  error::DirectoryError,
  user::{EditDraft, UserId, UserRecord},
};

/// Abstraction over a source of user records.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait UserDirectory: Send + Sync {
  /// Retrieve the record for `id`.
  ///
  /// Fails with [`DirectoryError::NotFound`] when no record exists for
  /// `id`, and with [`DirectoryError::Transport`] on any other failure.
  fn fetch(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<UserRecord, DirectoryError>> + Send + '_;

  /// Replace the editable fields of the record for `id` and return the
  /// authoritative post-update record — server-assigned fields may differ
  /// from the request.
  ///
  /// There are no partial-field semantics: `fields` always carries both
  /// name and email. Fails with [`DirectoryError::Transport`] on failure.
  fn update(
    &self,
    id: UserId,
    fields: EditDraft,
  ) -> impl Future<Output = Result<UserRecord, DirectoryError>> + Send + '_;
}
