//! Application state and event dispatcher around the profile controller.

use std::sync::{
  Arc,
  atomic::{AtomicU64, Ordering},
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dossier_core::{
  controller::{FetchRequest, ProfileController, UpdateRequest},
  directory::UserDirectory,
  error::DirectoryError,
  user::{DraftField, UserId, UserRecord},
};
use dossier_directory::InMemoryDirectory;
use tokio::sync::mpsc;
use tracing::debug;

use crate::ui::Theme;

// ─── Completions ──────────────────────────────────────────────────────────────

/// A finished directory call, sent back to the UI task with its token.
enum Completion {
  Fetch(FetchRequest, Result<UserRecord, DirectoryError>),
  Update(UpdateRequest, Result<UserRecord, DirectoryError>),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// The profile state machine.
  pub controller: ProfileController,

  /// Which draft field has keyboard focus while editing.
  pub focus: DraftField,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub theme: Theme,

  /// When false, the edit action is hidden and ignored.
  pub show_edit_button: bool,

  directory:      Arc<InMemoryDirectory>,
  update_count:   Arc<AtomicU64>,
  completions_tx: mpsc::UnboundedSender<Completion>,
  completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl App {
  pub fn new(
    directory: InMemoryDirectory,
    theme: Theme,
    show_edit_button: bool,
  ) -> Self {
    let (completions_tx, completions_rx) = mpsc::unbounded_channel();

    let mut controller = ProfileController::new();
    let update_count = Arc::new(AtomicU64::new(0));
    let counter = Arc::clone(&update_count);
    controller.on_updated(move |record| {
      debug!(user = %record.id, "profile updated");
      counter.fetch_add(1, Ordering::Relaxed);
    });

    Self {
      controller,
      focus: DraftField::Name,
      status_msg: String::new(),
      theme,
      show_edit_button,
      directory: Arc::new(directory),
      update_count,
      completions_tx,
      completions_rx,
    }
  }

  /// Number of successful saves this session.
  pub fn update_count(&self) -> u64 {
    self.update_count.load(Ordering::Relaxed)
  }

  // ── Driving the controller ────────────────────────────────────────────────

  /// Track a new subject and drive the resulting fetch, if any.
  pub fn set_subject(&mut self, id: Option<UserId>) {
    if let Some(request) = self.controller.set_subject(id) {
      self.spawn_fetch(request);
    }
  }

  /// Fold any finished directory calls into the controller.
  pub fn drain_completions(&mut self) {
    while let Ok(completion) = self.completions_rx.try_recv() {
      match completion {
        Completion::Fetch(request, result) => {
          self.controller.complete_fetch(request, result);
        }
        Completion::Update(request, result) => {
          self.controller.complete_update(request, result);
        }
      }
    }
  }

  fn spawn_fetch(&self, request: FetchRequest) {
    debug!(user = %request.user_id(), "fetching profile");
    let directory = Arc::clone(&self.directory);
    let tx = self.completions_tx.clone();
    tokio::spawn(async move {
      let result = directory.fetch(request.user_id()).await;
      // Send failure means the app is shutting down.
      let _ = tx.send(Completion::Fetch(request, result));
    });
  }

  fn spawn_update(&self, request: UpdateRequest) {
    debug!(user = %request.user_id(), "submitting update");
    let directory = Arc::clone(&self.directory);
    let tx = self.completions_tx.clone();
    tokio::spawn(async move {
      let result = directory
        .update(request.user_id(), request.fields().clone())
        .await;
      let _ = tx.send(Completion::Update(request, result));
    });
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL)
      && key.code == KeyCode::Char('c')
    {
      return false;
    }

    if self.controller.is_editing() {
      self.handle_edit_key(key)
    } else {
      self.handle_view_key(key)
    }
  }

  fn handle_view_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      // Quit
      KeyCode::Char('q') => return false,

      // Subject selector — the demo's options, plus "none".
      KeyCode::Char('1') => self.select_subject(Some(UserId(1))),
      KeyCode::Char('2') => self.select_subject(Some(UserId(2))),
      KeyCode::Char('9') => self.select_subject(Some(UserId(999))),
      KeyCode::Char('0') => self.select_subject(None),

      // Edit
      KeyCode::Char('e') => {
        if self.show_edit_button {
          self.focus = DraftField::Name;
          self.controller.start_edit();
        }
      }

      // Retry after a failure
      KeyCode::Char('r') => {
        if let Some(request) = self.controller.retry() {
          self.status_msg.clear();
          self.spawn_fetch(request);
        }
      }

      _ => {}
    }
    true
  }

  fn handle_edit_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.controller.cancel_edit();
        self.status_msg.clear();
      }
      KeyCode::Tab => {
        self.focus = match self.focus {
          DraftField::Name => DraftField::Email,
          DraftField::Email => DraftField::Name,
        };
      }
      KeyCode::Enter => self.submit(),
      KeyCode::Backspace => {
        if let Some(mut value) = self.focused_draft_value() {
          value.pop();
          self.controller.change_draft_field(self.focus, value);
        }
      }
      KeyCode::Char(c) => {
        if let Some(mut value) = self.focused_draft_value() {
          value.push(c);
          self.controller.change_draft_field(self.focus, value);
        }
      }
      _ => {}
    }
    true
  }

  fn select_subject(&mut self, id: Option<UserId>) {
    self.status_msg.clear();
    self.set_subject(id);
  }

  fn submit(&mut self) {
    match self.controller.save() {
      Ok(Some(request)) => {
        self.status_msg.clear();
        self.spawn_update(request);
      }
      Ok(None) => {}
      Err(err) => self.status_msg = err.to_string(),
    }
  }

  fn focused_draft_value(&self) -> Option<String> {
    let draft = self.controller.draft()?;
    Some(match self.focus {
      DraftField::Name => draft.name.clone(),
      DraftField::Email => draft.email.clone(),
    })
  }
}
