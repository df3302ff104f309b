//! The profile view/edit state machine.
//!
//! [`ProfileController`] owns all UI state for a single profile pane. It
//! never calls the directory itself: operations that need it return a
//! request token tagged with the subject identifier that was current at
//! issue time, the owner awaits the matching
//! [`UserDirectory`](crate::directory::UserDirectory) call, and hands the
//! token back together with the result. Folding the result back in is where
//! stale responses die — a token whose identifier no longer matches the
//! tracked subject is discarded, so the last requested subject wins
//! regardless of arrival order.

use crate::{
  error::{DirectoryError, ValidationError},
  user::{DraftField, EditDraft, UserId, UserRecord},
};

/// Shown in [`ControllerState::Failed`] when a save fails; the draft is
/// discarded along with the record it was editing.
const UPDATE_FAILED_MSG: &str = "Failed to update user";

// ─── State ───────────────────────────────────────────────────────────────────

/// An in-progress edit. Exists iff the profile is in edit mode, so a draft
/// can never outlive (or predate) editing.
#[derive(Debug, Clone)]
pub struct EditSession {
  pub draft:  EditDraft,
  /// True while an update call is outstanding.
  pub saving: bool,
}

/// A successfully loaded profile, in display or edit mode.
#[derive(Debug, Clone)]
pub struct LoadedProfile {
  pub record: UserRecord,
  /// Present iff the user is editing.
  pub edit:   Option<EditSession>,
}

/// The controller's current mode. Exactly one variant holds at a time.
#[derive(Debug, Clone, Default)]
pub enum ControllerState {
  /// No subject identifier set.
  #[default]
  Idle,
  /// A fetch is in flight; nothing older is shown.
  Loading,
  /// The last fetch succeeded.
  Loaded(LoadedProfile),
  /// The last fetch or update failed; retry is available.
  Failed(String),
}

// ─── Request tokens ──────────────────────────────────────────────────────────

/// Token for an outstanding fetch, tagged with the subject identifier that
/// was current when it was minted.
#[derive(Debug)]
#[must_use = "a fetch request does nothing until driven and completed"]
pub struct FetchRequest {
  user_id: UserId,
}

impl FetchRequest {
  /// The identifier to fetch.
  pub fn user_id(&self) -> UserId {
    self.user_id
  }
}

/// Token for an outstanding update, carrying the validated draft.
#[derive(Debug)]
#[must_use = "an update request does nothing until driven and completed"]
pub struct UpdateRequest {
  user_id: UserId,
  fields:  EditDraft,
}

impl UpdateRequest {
  /// The identifier to update.
  pub fn user_id(&self) -> UserId {
    self.user_id
  }

  /// The fields to submit.
  pub fn fields(&self) -> &EditDraft {
    &self.fields
  }
}

// ─── Controller ──────────────────────────────────────────────────────────────

type UpdateObserver = Box<dyn FnMut(&UserRecord) + Send>;

/// Owns all state for one profile pane and drives the directory contract
/// through request tokens.
///
/// Operations invoked in a state they are not valid in are uniform silent
/// no-ops; each method documents the states it acts in.
pub struct ProfileController {
  subject:    Option<UserId>,
  state:      ControllerState,
  on_updated: Option<UpdateObserver>,
}

impl ProfileController {
  /// A controller bound to no subject.
  pub fn new() -> Self {
    Self {
      subject:    None,
      state:      ControllerState::Idle,
      on_updated: None,
    }
  }

  /// A controller already loading `id`; the returned token is the initial
  /// fetch to drive.
  pub fn with_subject(id: UserId) -> (Self, FetchRequest) {
    let controller = Self {
      subject:    Some(id),
      state:      ControllerState::Loading,
      on_updated: None,
    };
    (controller, FetchRequest { user_id: id })
  }

  /// Register the observer invoked — synchronously, from within
  /// [`complete_update`](Self::complete_update) — exactly once per
  /// successful save, with the server-returned record.
  pub fn on_updated(
    &mut self,
    observer: impl FnMut(&UserRecord) + Send + 'static,
  ) {
    self.on_updated = Some(Box::new(observer));
  }

  // ── Snapshot ──────────────────────────────────────────────────────────────

  /// The current state, for rendering. Mutation happens only through the
  /// documented operations.
  pub fn state(&self) -> &ControllerState {
    &self.state
  }

  /// The tracked subject identifier, if any.
  pub fn subject(&self) -> Option<UserId> {
    self.subject
  }

  /// The loaded record, if any.
  pub fn record(&self) -> Option<&UserRecord> {
    match &self.state {
      ControllerState::Loaded(profile) => Some(&profile.record),
      _ => None,
    }
  }

  /// The in-progress draft, if editing.
  pub fn draft(&self) -> Option<&EditDraft> {
    self.edit_session().map(|session| &session.draft)
  }

  pub fn is_editing(&self) -> bool {
    self.edit_session().is_some()
  }

  pub fn is_saving(&self) -> bool {
    self.edit_session().is_some_and(|session| session.saving)
  }

  fn edit_session(&self) -> Option<&EditSession> {
    match &self.state {
      ControllerState::Loaded(profile) => profile.edit.as_ref(),
      _ => None,
    }
  }

  fn edit_session_mut(&mut self) -> Option<&mut EditSession> {
    match &mut self.state {
      ControllerState::Loaded(profile) => profile.edit.as_mut(),
      _ => None,
    }
  }

  // ── Subject tracking ──────────────────────────────────────────────────────

  /// Track `id` as the displayed subject.
  ///
  /// `None` clears the subject and returns to [`ControllerState::Idle`]. A
  /// new identifier discards whatever is on screen — draft included — and
  /// returns the fetch token to drive. An unchanged identifier that already
  /// has a fetch issued for it is a no-op; re-fetching is driven only by
  /// [`retry`](Self::retry) or an identifier change.
  pub fn set_subject(&mut self, id: Option<UserId>) -> Option<FetchRequest> {
    let Some(id) = id else {
      self.subject = None;
      self.state = ControllerState::Idle;
      return None;
    };

    let unchanged = self.subject == Some(id)
      && !matches!(self.state, ControllerState::Idle);
    if unchanged {
      return None;
    }

    self.subject = Some(id);
    self.state = ControllerState::Loading;
    Some(FetchRequest { user_id: id })
  }

  /// Re-issue the fetch for the tracked subject. Valid only in
  /// [`ControllerState::Failed`]; a no-op anywhere else.
  pub fn retry(&mut self) -> Option<FetchRequest> {
    if !matches!(self.state, ControllerState::Failed(_)) {
      return None;
    }
    let user_id = self.subject?;
    self.state = ControllerState::Loading;
    Some(FetchRequest { user_id })
  }

  /// Fold a completed fetch back in.
  ///
  /// The result is discarded when the token was minted for an identifier
  /// that is no longer the tracked subject — stale responses never mutate
  /// state, whatever order they arrive in.
  pub fn complete_fetch(
    &mut self,
    request: FetchRequest,
    result: Result<UserRecord, DirectoryError>,
  ) {
    if self.subject != Some(request.user_id) {
      return;
    }
    self.state = match result {
      Ok(record) => {
        ControllerState::Loaded(LoadedProfile { record, edit: None })
      }
      Err(err) => ControllerState::Failed(err.to_string()),
    };
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  /// Enter edit mode, seeding the draft from the loaded record. Valid only
  /// in [`ControllerState::Loaded`] display mode; a no-op anywhere else.
  pub fn start_edit(&mut self) {
    if let ControllerState::Loaded(profile) = &mut self.state {
      if profile.edit.is_none() {
        profile.edit = Some(EditSession {
          draft:  EditDraft::from_record(&profile.record),
          saving: false,
        });
      }
    }
  }

  /// Replace `field` in the draft verbatim — empty strings included;
  /// validation happens at [`save`](Self::save). A no-op unless editing.
  pub fn change_draft_field(&mut self, field: DraftField, value: String) {
    if let Some(session) = self.edit_session_mut() {
      match field {
        DraftField::Name => session.draft.name = value,
        DraftField::Email => session.draft.email = value,
      }
    }
  }

  /// Leave edit mode, discarding the draft; the record is untouched. Valid
  /// only while editing and not saving; a no-op anywhere else.
  pub fn cancel_edit(&mut self) {
    if let ControllerState::Loaded(profile) = &mut self.state {
      if profile.edit.as_ref().is_some_and(|session| !session.saving) {
        profile.edit = None;
      }
    }
  }

  // ── Saving ────────────────────────────────────────────────────────────────

  /// Validate the draft and begin an update.
  ///
  /// Valid only while editing and not already saving — anywhere else this
  /// returns `Ok(None)`, so a double-tapped save key never queues a second
  /// update. A draft whose name or email trims to empty fails with
  /// [`ValidationError`] before any directory call; state is unchanged and
  /// the user keeps editing.
  pub fn save(&mut self) -> Result<Option<UpdateRequest>, ValidationError> {
    let Some(user_id) = self.subject else {
      return Ok(None);
    };
    let Some(session) = self.edit_session_mut() else {
      return Ok(None);
    };
    if session.saving {
      return Ok(None);
    }
    if session.draft.name.trim().is_empty()
      || session.draft.email.trim().is_empty()
    {
      return Err(ValidationError);
    }

    session.saving = true;
    Ok(Some(UpdateRequest {
      user_id,
      fields: session.draft.clone(),
    }))
  }

  /// Fold a completed update back in.
  ///
  /// Discarded unless the token's identifier still matches the tracked
  /// subject and the controller is still saving — a subject change made
  /// while the update was in flight wins over its result. On success the
  /// record is replaced with the directory's returned value (not the
  /// draft), edit mode ends, and the [`on_updated`](Self::on_updated)
  /// observer fires. On failure the edit is discarded along with the
  /// record; the profile shows the failure until retried.
  pub fn complete_update(
    &mut self,
    request: UpdateRequest,
    result: Result<UserRecord, DirectoryError>,
  ) {
    if self.subject != Some(request.user_id) || !self.is_saving() {
      return;
    }
    match result {
      Ok(record) => {
        if let Some(observer) = &mut self.on_updated {
          observer(&record);
        }
        self.state =
          ControllerState::Loaded(LoadedProfile { record, edit: None });
      }
      Err(_) => {
        self.state = ControllerState::Failed(UPDATE_FAILED_MSG.to_string());
      }
    }
  }
}

impl Default for ProfileController {
  fn default() -> Self {
    Self::new()
  }
}
