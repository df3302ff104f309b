//! Profile pane — projects the controller state into the body area.

use dossier_core::{
  controller::{ControllerState, LoadedProfile},
  user::DraftField,
};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{app::App, ui::Palette};

/// Render the profile pane into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let palette = app.theme.palette();

  let block = Block::default()
    .title(" User Profile ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(palette.dim));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let lines = match app.controller.state() {
    ControllerState::Idle => vec![Line::from(Span::styled(
      "No user data available",
      Style::default().fg(palette.dim),
    ))],
    ControllerState::Loading => vec![Line::from(Span::styled(
      "Loading user data...",
      Style::default().fg(palette.dim),
    ))],
    ControllerState::Failed(message) => failed_lines(message, &palette),
    ControllerState::Loaded(profile) => {
      if app.controller.is_editing() {
        edit_lines(profile, app, &palette)
      } else {
        view_lines(profile, app, &palette)
      }
    }
  };

  f.render_widget(Paragraph::new(lines), inner);
}

// ─── States ───────────────────────────────────────────────────────────────────

fn failed_lines(message: &str, palette: &Palette) -> Vec<Line<'static>> {
  vec![
    Line::from(Span::styled(
      format!("Error: {message}"),
      Style::default()
        .fg(palette.error)
        .add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from(Span::styled(
      "[r] Retry",
      Style::default().fg(palette.dim),
    )),
  ]
}

fn view_lines(
  profile: &LoadedProfile,
  app: &App,
  palette: &Palette,
) -> Vec<Line<'static>> {
  let record = &profile.record;

  let mut lines = vec![
    Line::from(Span::styled(
      record.name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    field_line("Email:", record.email.clone(), palette),
    Line::from(vec![
      Span::styled(
        format!("{:<7}", "Role:"),
        Style::default().fg(palette.accent),
      ),
      Span::styled(
        record.role.clone(),
        Style::default().add_modifier(Modifier::ITALIC),
      ),
    ]),
  ];

  if app.show_edit_button {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      "[e] Edit Profile",
      Style::default().fg(palette.dim),
    )));
  }

  lines
}

fn edit_lines(
  profile: &LoadedProfile,
  app: &App,
  palette: &Palette,
) -> Vec<Line<'static>> {
  let saving = app.controller.is_saving();
  let draft = profile
    .edit
    .as_ref()
    .map(|session| &session.draft);

  let (name, email) = match draft {
    Some(draft) => (draft.name.clone(), draft.email.clone()),
    None => (String::new(), String::new()),
  };

  let mut lines = vec![
    input_line("Name:", name, app.focus == DraftField::Name, saving, palette),
    input_line(
      "Email:",
      email,
      app.focus == DraftField::Email,
      saving,
      palette,
    ),
    Line::from(""),
  ];

  if saving {
    lines.push(Line::from(Span::styled(
      "Saving...",
      Style::default().fg(palette.accent),
    )));
  } else {
    lines.push(Line::from(Span::styled(
      "[Enter] Save  [Tab] Switch field  [Esc] Cancel",
      Style::default().fg(palette.dim),
    )));
  }

  lines
}

// ─── Line helpers ─────────────────────────────────────────────────────────────

fn field_line(
  label: &'static str,
  value: String,
  palette: &Palette,
) -> Line<'static> {
  Line::from(vec![
    Span::styled(
      format!("{label:<7}"),
      Style::default().fg(palette.accent),
    ),
    Span::raw(value),
  ])
}

fn input_line(
  label: &'static str,
  value: String,
  focused: bool,
  saving: bool,
  palette: &Palette,
) -> Line<'static> {
  let input_style = if saving {
    Style::default().fg(palette.dim)
  } else if focused {
    Style::default().add_modifier(Modifier::UNDERLINED)
  } else {
    Style::default()
  };

  let mut spans = vec![
    Span::styled(
      format!("{label:<7}"),
      Style::default().fg(palette.accent),
    ),
    Span::styled(value, input_style),
  ];

  // Block cursor on the focused input.
  if focused && !saving {
    spans.push(Span::styled("█", Style::default().fg(palette.accent)));
  }

  Line::from(spans)
}
