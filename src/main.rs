mod api;
mod app;
mod config;
mod constants;
mod input;
mod logging;
mod model;
mod session;
mod theme;
mod ui;
mod video_item;
mod view;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use api::VideosClient;
use app::App;
use config::Config;
use constants::constants;
use session::{CookieFile, NoCookies, TokenStore};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Search text to load the home page with
  #[arg(short, long, default_value = "")]
  search: String,

  /// Videos API base URL (default: prefs, then built-in)
  #[arg(long, value_name = "URL")]
  api_base: Option<String>,

  /// Cookie store holding the `jwtToken` entry (flat TOML table)
  #[arg(long, value_name = "PATH")]
  cookie_file: Option<PathBuf>,

  /// Start with the dark theme
  #[arg(long, conflicts_with = "light")]
  dark: bool,

  /// Start with the light theme
  #[arg(long)]
  light: bool,

  /// Log filter directive, e.g. `debug` or `nxtwatch=trace` (overridden by RUST_LOG)
  #[arg(long, value_name = "FILTER")]
  log_level: Option<String>,

  /// Print shell completions and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<clap_complete::Shell>,
}

impl Args {
  fn dark_theme(&self, prefs: &Config) -> bool {
    if self.dark {
      true
    } else if self.light {
      false
    } else {
      prefs.dark_theme.unwrap_or(false)
    }
  }
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), env!("CARGO_PKG_NAME"), &mut std::io::stdout());
    return Ok(());
  }

  let prefs = Config::load();
  let directive =
    logging::resolve_filter(std::env::var("RUST_LOG").ok().as_deref(), args.log_level.as_deref(), prefs.log_level.as_deref());
  let _log_guard = match config::data_dir() {
    Some(dir) => match logging::init_logging(&dir, &directive) {
      Ok(guard) => Some(guard),
      Err(e) => {
        eprintln!("warning: logging disabled: {:#}", e);
        None
      }
    },
    None => None,
  };

  let api_base =
    args.api_base.clone().or_else(|| prefs.api_base_url.clone()).unwrap_or_else(|| constants().api_base_url.clone());
  let source = Arc::new(VideosClient::new(&api_base).context("Failed to set up videos client")?);
  info!(endpoint = %source.endpoint(), "starting");
  let tokens: Arc<dyn TokenStore> = match args.cookie_file.clone().map(CookieFile::new).or_else(CookieFile::default_location) {
    Some(store) => {
      info!(path = %store.path().display(), "using cookie store");
      Arc::new(store)
    }
    None => Arc::new(NoCookies),
  };
  let dark_theme = args.dark_theme(&prefs);
  let app = App::new(source, tokens, &args.search, dark_theme).with_prefs(prefs);

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, app).await;
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, mut app: App) -> Result<()> {
  app.mount();
  let poll = Duration::from_millis(constants().poll_millis);

  loop {
    app.check_pending();

    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    if event::poll(poll)?
      && let Event::Key(key) = event::read()?
      && key.kind == KeyEventKind::Press
    {
      input::handle_key_event(&mut app, key);
    }

    if app.should_quit {
      break;
    }
  }

  app.teardown();
  info!("exiting");
  Ok(())
}
