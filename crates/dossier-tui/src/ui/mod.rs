//! TUI rendering — layout, theme, and the status bar.

pub mod profile;

use clap::ValueEnum;
use dossier_core::controller::ControllerState;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use serde::Deserialize;

use crate::app::App;

// ─── Theme ────────────────────────────────────────────────────────────────────

/// The two built-in palettes.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

/// Resolved colors for a theme.
pub struct Palette {
  pub accent: Color,
  pub dim:    Color,
  pub error:  Color,
  pub header: Color,
}

impl Theme {
  pub fn palette(self) -> Palette {
    match self {
      Theme::Light => Palette {
        accent: Color::Blue,
        dim:    Color::Gray,
        error:  Color::Red,
        header: Color::Blue,
      },
      Theme::Dark => Palette {
        accent: Color::Cyan,
        dim:    Color::DarkGray,
        error:  Color::LightRed,
        header: Color::DarkGray,
      },
    }
  }
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  profile::draw(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let palette = app.theme.palette();

  let left = Span::styled(
    " dossier  [1/2/9] select user  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let subject = match app.controller.subject() {
    Some(id) => format!("user {id} "),
    None => "no user ".to_string(),
  };
  let right = Span::styled(subject, Style::default().fg(Color::White));

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(palette.header));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let palette = app.theme.palette();

  let (mode_label, hints) = match app.controller.state() {
    ControllerState::Idle => ("IDLE", "1/2/9 select user  q quit"),
    ControllerState::Loading => ("LOADING", "1/2/9/0 switch user  q quit"),
    ControllerState::Loaded(_) if app.controller.is_saving() => {
      ("SAVING", "please wait")
    }
    ControllerState::Loaded(_) if app.controller.is_editing() => {
      ("EDIT", "Type to edit  Tab switch field  Enter save  Esc cancel")
    }
    ControllerState::Loaded(_) if app.show_edit_button => {
      ("VIEW", "e edit  1/2/9/0 switch user  q quit")
    }
    ControllerState::Loaded(_) => ("VIEW", "1/2/9/0 switch user  q quit"),
    ControllerState::Failed(_) => ("ERROR", "r retry  1/2/0 switch user  q quit"),
  };

  let mut status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  // The demo's update counter, folded into the status line.
  let updates = app.update_count();
  if updates > 0 {
    status.push_str(&format!("  ·  User updated {updates} time(s)"));
  }

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(palette.accent)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(palette.dim),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(Paragraph::new(line), area);
}
