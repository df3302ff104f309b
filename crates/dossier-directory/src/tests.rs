//! Tests for [`InMemoryDirectory`], plus workflow tests that wire a
//! [`ProfileController`] to it the way the harness does: mint a token, await
//! the directory, fold the result back in.

use std::sync::{Arc, Mutex};

use dossier_core::{
  controller::{ControllerState, ProfileController},
  directory::UserDirectory,
  error::DirectoryError,
  user::{DraftField, EditDraft, UserId, UserRecord},
};

use crate::InMemoryDirectory;

// ─── Directory contract ──────────────────────────────────────────────────────

#[tokio::test]
async fn fetch_returns_a_seeded_record() {
  let directory = InMemoryDirectory::seeded();

  let record = directory.fetch(UserId(1)).await.unwrap();
  assert_eq!(record.name, "John Doe");
  assert_eq!(record.email, "john@example.com");
  assert_eq!(record.role, "admin");
}

#[tokio::test]
async fn fetch_unknown_id_is_not_found() {
  let directory = InMemoryDirectory::seeded();

  let err = directory.fetch(UserId(999)).await.unwrap_err();
  assert!(matches!(err, DirectoryError::NotFound(UserId(999))));
  assert_eq!(err.to_string(), "User not found");
}

#[tokio::test]
async fn update_persists_fields_and_preserves_role() {
  let directory = InMemoryDirectory::seeded();

  let updated = directory
    .update(
      UserId(1),
      EditDraft {
        name:  "John Smith".into(),
        email: "john.smith@example.com".into(),
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.name, "John Smith");
  assert_eq!(updated.email, "john.smith@example.com");
  assert_eq!(updated.role, "admin");

  // The write went through: a later fetch sees the same record.
  let fetched = directory.fetch(UserId(1)).await.unwrap();
  assert_eq!(fetched, updated);
}

#[tokio::test]
async fn update_unknown_id_is_a_transport_error() {
  let directory = InMemoryDirectory::seeded();

  let err = directory
    .update(UserId(999), EditDraft::default())
    .await
    .unwrap_err();
  assert!(matches!(err, DirectoryError::Transport(_)));
}

#[tokio::test]
async fn clones_share_records() {
  let directory = InMemoryDirectory::new();
  let other = directory.clone();

  directory
    .insert(UserRecord {
      id:    UserId(7),
      name:  "Alice Liddell".into(),
      email: "alice@example.com".into(),
      role:  "user".into(),
    })
    .await;

  assert_eq!(other.fetch(UserId(7)).await.unwrap().name, "Alice Liddell");
}

// ─── Controller workflows ────────────────────────────────────────────────────

/// Drive an outstanding fetch token against `directory` to completion.
async fn drive_fetch(
  controller: &mut ProfileController,
  directory: &InMemoryDirectory,
  request: dossier_core::controller::FetchRequest,
) {
  let result = directory.fetch(request.user_id()).await;
  controller.complete_fetch(request, result);
}

#[tokio::test]
async fn view_edit_save_workflow() {
  let directory = InMemoryDirectory::seeded();
  let mut controller = ProfileController::new();

  let updates = Arc::new(Mutex::new(Vec::new()));
  let sink = Arc::clone(&updates);
  controller.on_updated(move |record| {
    sink.lock().unwrap().push(record.clone());
  });

  // View.
  let request = controller.set_subject(Some(UserId(1))).unwrap();
  drive_fetch(&mut controller, &directory, request).await;
  assert_eq!(controller.record().unwrap().name, "John Doe");

  // Edit.
  controller.start_edit();
  controller.change_draft_field(DraftField::Name, "John Smith".into());
  controller
    .change_draft_field(DraftField::Email, "john.smith@example.com".into());

  // Save.
  let request = controller.save().unwrap().unwrap();
  let result = directory
    .update(request.user_id(), request.fields().clone())
    .await;
  controller.complete_update(request, result);

  let record = controller.record().unwrap();
  assert_eq!(record.name, "John Smith");
  assert_eq!(record.email, "john.smith@example.com");
  assert_eq!(record.role, "admin");
  assert!(!controller.is_editing());

  let updates = updates.lock().unwrap();
  assert_eq!(updates.len(), 1);
  assert_eq!(updates[0].name, "John Smith");
}

#[tokio::test]
async fn fetch_failure_then_retry_recovers() {
  let directory = InMemoryDirectory::seeded();
  let mut controller = ProfileController::new();

  let request = controller.set_subject(Some(UserId(999))).unwrap();
  drive_fetch(&mut controller, &directory, request).await;
  match controller.state() {
    ControllerState::Failed(message) => assert_eq!(message, "User not found"),
    state => panic!("expected Failed, got {state:?}"),
  }

  // The record appears on the backend; retry picks it up.
  directory
    .insert(UserRecord {
      id:    UserId(999),
      name:  "Late Arrival".into(),
      email: "late@example.com".into(),
      role:  "user".into(),
    })
    .await;

  let request = controller.retry().unwrap();
  drive_fetch(&mut controller, &directory, request).await;
  assert_eq!(controller.record().unwrap().name, "Late Arrival");
}

#[tokio::test]
async fn switching_subjects_loads_the_new_record() {
  let directory = InMemoryDirectory::seeded();
  let mut controller = ProfileController::new();

  let request = controller.set_subject(Some(UserId(1))).unwrap();
  drive_fetch(&mut controller, &directory, request).await;

  let request = controller.set_subject(Some(UserId(2))).unwrap();
  drive_fetch(&mut controller, &directory, request).await;

  assert_eq!(controller.record().unwrap().name, "Jane Smith");
  assert_eq!(controller.subject(), Some(UserId(2)));
}
