//! `estagio`, the terminal client for the internship intake.
//!
//! Opens on the application form. `F2` (or `--dashboard`) switches to the
//! password-gated submissions dashboard.
//!
//! # Usage
//!
//! ```
//! estagio --url http://localhost:8080
//! estagio --dashboard --user admin --password secret
//! estagio --config ~/.config/estagio/config.toml --log /tmp/estagio.log
//! ```
//!
//! The dashboard password is compared locally to unlock the screen and is
//! then sent as HTTP Basic credentials on every read. It is a convenience
//! gate, not access control: the server's credential check guards the data.

mod app;
mod client;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use estagio_core::{
  gate::{AdminSecret, Session},
  schedule::ScheduleMode,
};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ScheduleArg {
  /// One free-text line.
  FreeText,
  /// A from/to pair per weekday.
  Weekly,
}

impl From<ScheduleArg> for ScheduleMode {
  fn from(arg: ScheduleArg) -> Self {
    match arg {
      ScheduleArg::FreeText => ScheduleMode::FreeText,
      ScheduleArg::Weekly => ScheduleMode::Weekly,
    }
  }
}

#[derive(Parser, Debug)]
#[command(name = "estagio", about = "Terminal client for the internship intake")]
struct Args {
  /// Path to a TOML config file (url, username, password, schedule).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the estagio server (default: http://localhost:8080).
  #[arg(long, env = "ESTAGIO_URL")]
  url: Option<String>,

  /// Dashboard username.
  #[arg(long, env = "ESTAGIO_USER")]
  user: Option<String>,

  /// Dashboard password (plaintext).
  #[arg(long, env = "ESTAGIO_PASSWORD")]
  password: Option<String>,

  /// How the form collects the course schedule.
  #[arg(long, value_enum)]
  schedule: Option<ScheduleArg>,

  /// Start on the dashboard instead of the form.
  #[arg(long)]
  dashboard: bool,

  /// Write logs to FILE. Nothing is logged otherwise.
  #[arg(long, value_name = "FILE")]
  log: Option<PathBuf>,
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
  #[serde(default)]
  schedule: Option<ScheduleArg>,
}

fn non_empty(s: &str) -> Option<String> { (!s.is_empty()).then(|| s.to_owned()) }

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // The terminal is ours; logs go to a file or nowhere.
  if let Some(path) = &args.log {
    let file = File::create(path)
      .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_writer(Mutex::new(file))
      .with_ansi(false)
      .init();
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| non_empty(&file_cfg.url))
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: args
      .user
      .or_else(|| non_empty(&file_cfg.username))
      .unwrap_or_else(|| "admin".to_string()),
    password: args
      .password
      .or_else(|| non_empty(&file_cfg.password))
      .unwrap_or_default(),
  };
  let mode: ScheduleMode = args
    .schedule
    .or(file_cfg.schedule)
    .map(Into::into)
    .unwrap_or_default();

  let secret = AdminSecret::new(api_config.password.clone());
  if !secret.is_set() {
    tracing::warn!("no dashboard password configured; the dashboard stays locked");
  }
  let session = Session::new(secret);
  let client = ApiClient::new(api_config)?;
  let mut app = App::new(std::sync::Arc::new(client), session, mode);
  tracing::info!(?mode, "client started");

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  if args.dashboard {
    app.open_dashboard().await;
  }

  // Run the event loop; restore terminal even on error.
  let run_result = run_event_loop(&mut terminal, &mut app).await;

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ──────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<ApiClient>,
) -> Result<()> {
  loop {
    app.poll_submit().await;
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && key.kind == KeyEventKind::Press
    {
      let cont = app.handle_key(key).await?;
      if !cont {
        break;
      }
    }
  }

  Ok(())
}
