//! `remeet` — terminal UI listing the companies behind your Re:Meet contacts.
//!
//! # Usage
//!
//! ```
//! remeet --config ~/.config/remeet/remeet.toml
//! REMEET_URL=https://abcd.supabase.co REMEET_ANON_KEY=... remeet
//! ```

mod app;
mod ui;

use std::{fs::File, io, path::PathBuf, sync::Mutex, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use remeet_supabase::{SupabaseClient, SupabaseConfig, config::Overrides};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "remeet", version, about = "Terminal UI for Re:Meet contacts")]
struct Args {
  /// Path to a TOML config file (url, anon_key, buckets, n8n_webhook_url).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Supabase project URL; overrides the file and `REMEET_URL`.
  #[arg(long)]
  url: Option<String>,

  /// Supabase anon key; overrides the file and `REMEET_ANON_KEY`.
  #[arg(long)]
  anon_key: Option<String>,

  /// Session JWT to send instead of the anon key.
  #[arg(long, env = "REMEET_ACCESS_TOKEN", hide_env_values = true)]
  access_token: Option<String>,

  /// Where to write logs; the terminal is taken by the UI.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  init_tracing(
    args
      .log_file
      .clone()
      .unwrap_or_else(|| std::env::temp_dir().join("remeet.log")),
  )?;

  // Missing backend settings are fatal before the terminal is touched.
  let config = SupabaseConfig::load(
    args.config.as_deref(),
    Overrides {
      url:      args.url,
      anon_key: args.anon_key,
    },
  )
  .context("loading backend configuration")?;
  tracing::info!(
    url = %config.url,
    automation = config.automation_endpoint(),
    "starting"
  );

  let mut client = SupabaseClient::new(config).context("building HTTP client")?;
  if let Some(token) = args.access_token {
    client = client.with_access_token(token);
  }
  let mut app = App::new(std::sync::Arc::new(client));

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // A failed first load is shown in the status bar, not fatal.
  app.start_load();

  let run_result = run_event_loop(&mut terminal, &mut app).await;

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

fn init_tracing(path: PathBuf) -> Result<()> {
  let file = File::create(&path)
    .with_context(|| format!("creating log file {}", path.display()))?;
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<SupabaseClient>,
) -> Result<()> {
  loop {
    app.poll_load().await;
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
      && !app.handle_key(key)
    {
      break;
    }
  }

  Ok(())
}
