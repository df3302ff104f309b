//! Error types for `dossier-core`.

use thiserror::Error;

use crate::user::UserId;

/// A failed [`UserDirectory`](crate::directory::UserDirectory) call.
///
/// The display strings are the user-visible messages the controller folds
/// into [`ControllerState::Failed`](crate::controller::ControllerState).
#[derive(Debug, Clone, Error)]
pub enum DirectoryError {
  /// No record exists for the requested identifier. Only `fetch` fails with
  /// this; an update against a missing record is a transport-level fault.
  #[error("User not found")]
  NotFound(UserId),

  /// Any other failure — backend unreachable, timed out, and so on.
  #[error("{0}")]
  Transport(String),
}

/// The draft failed local validation; no directory call was made.
#[derive(Debug, Clone, Error)]
#[error("Please fill in all fields")]
pub struct ValidationError;

pub type Result<T, E = DirectoryError> = std::result::Result<T, E>;
