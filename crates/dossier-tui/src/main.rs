//! `dossier` — terminal harness for the profile view/edit controller.
//!
//! # Usage
//!
//! ```
//! dossier                         # start on the first demo user
//! dossier --user 2 --theme dark
//! dossier --config ~/.config/dossier/config.toml
//! ```

mod app;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dossier_core::user::UserId;
use dossier_directory::InMemoryDirectory;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use ui::Theme;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
  name = "dossier",
  about = "Terminal harness for the dossier profile editor"
)]
struct Args {
  /// Path to a TOML config file (user, theme, show_edit_button, latency_ms).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Subject to load on startup (default: 1).
  #[arg(long, env = "DOSSIER_USER")]
  user: Option<u64>,

  /// Color theme.
  #[arg(long, env = "DOSSIER_THEME", value_enum)]
  theme: Option<Theme>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize)]
struct ConfigFile {
  user:  Option<u64>,
  theme: Option<Theme>,

  /// Hide the edit action entirely (read-only harness).
  #[serde(default = "default_show_edit_button")]
  show_edit_button: bool,

  /// Simulated backend latency in milliseconds; 0 disables it.
  #[serde(default = "default_latency_ms")]
  latency_ms: u64,
}

fn default_show_edit_button() -> bool {
  true
}

fn default_latency_ms() -> u64 {
  500
}

impl Default for ConfigFile {
  fn default() -> Self {
    Self {
      user:             None,
      theme:            None,
      show_edit_button: default_show_edit_button(),
      latency_ms:       default_latency_ms(),
    }
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Log to stderr; silent unless RUST_LOG asks for output.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let initial_user = UserId(args.user.or(file_cfg.user).unwrap_or(1));
  let theme = args.theme.or(file_cfg.theme).unwrap_or_default();
  let latency = Duration::from_millis(file_cfg.latency_ms);

  let directory = InMemoryDirectory::seeded().with_latency(latency);
  let mut app = App::new(directory, theme, file_cfg.show_edit_button);
  app.set_subject(Some(initial_user));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    // Fold any finished directory calls in before drawing.
    app.drain_completions();

    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          if !app.handle_key(key) {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
