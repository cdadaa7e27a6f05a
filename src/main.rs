mod app;
mod cache;
mod catalog;
mod config;
mod constants;
mod error;
mod index;
mod input;
mod library;
mod player;
mod search;
mod theme;
mod ui;
mod viewport;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use directories::UserDirs;
use ratatui::{
  DefaultTerminal,
  crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, enable_raw_mode},
  },
};
use tracing::{info, warn};

use app::{Action, App, LOADING_MESSAGE};
use config::{Config, project_dirs};
use constants::constants;
use library::Library;
use player::{ExternalPlayer, Launch, Playback};

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
struct Args {
  /// Player executable (default: omxplayer)
  #[arg(long, value_name = "EXECUTABLE")]
  player: Option<String>,

  /// Catalog cache file (default: <user cache dir>/pimp/catalog)
  #[arg(long, value_name = "PATH")]
  cache: Option<PathBuf>,

  /// Ignore the cache and scan the movie directories at startup
  #[arg(long)]
  rescan: bool,

  /// Print a completion script for SHELL and exit
  #[arg(long, value_name = "SHELL")]
  completions: Option<Shell>,

  /// Movie directories to scan; anything that is not a directory is passed to the player
  #[arg(allow_hyphen_values = true, trailing_var_arg = true)]
  targets: Vec<String>,
}

impl Args {
  /// Pick our own flags back out of `targets`. Once a directory has been seen clap hands every
  /// later token to the trailing targets, so `pimp ~/movies --player=mpv` would otherwise pass
  /// `--player=mpv` to the player.
  fn lift_own_flags(mut self) -> Self {
    let mut targets = std::mem::take(&mut self.targets).into_iter();
    while let Some(target) = targets.next() {
      if target == "--rescan" {
        self.rescan = true;
      } else if let Some(player) = target.strip_prefix("--player=") {
        self.player = Some(player.to_string());
      } else if let Some(cache) = target.strip_prefix("--cache=") {
        self.cache = Some(PathBuf::from(cache));
      } else if target == "--player"
        && let Some(player) = targets.next()
      {
        self.player = Some(player);
      } else if target == "--cache"
        && let Some(cache) = targets.next()
      {
        self.cache = Some(PathBuf::from(cache));
      } else {
        self.targets.push(target);
      }
    }
    self
  }
}

/// Everything the session needs once CLI, preferences and constants are merged.
#[derive(Debug)]
struct Settings {
  roots: Vec<PathBuf>,
  cache_path: PathBuf,
  player: ExternalPlayer,
}

/// Split positional targets into existing directories (scan roots) and player options.
fn split_targets(targets: &[String]) -> (Vec<PathBuf>, Vec<String>) {
  let mut roots = Vec::new();
  let mut options = Vec::new();
  for target in targets {
    let path = Path::new(target);
    if path.is_dir() {
      roots.push(path.to_path_buf());
    } else {
      options.push(target.clone());
    }
  }
  (roots, options)
}

/// Merge settings: command line first, then `prefs.toml`, then built-in constants.
fn resolve(args: &Args, config: &Config, home: Option<&Path>, cache_dir: Option<&Path>) -> Result<Settings> {
  let c = constants();
  let (cli_roots, cli_options) = split_targets(&args.targets);

  let roots = if !cli_roots.is_empty() {
    cli_roots
  } else if let Some(roots) = config.roots.clone().filter(|r| !r.is_empty()) {
    roots
  } else {
    let movies = home.map_or_else(|| PathBuf::from(&c.default_movies_dir), |h| h.join(&c.default_movies_dir));
    vec![movies]
  };

  let cache_path = match args.cache.clone().or_else(|| config.cache_file.clone()) {
    Some(path) => path,
    None => cache_dir
      .map(|d| d.join(&c.cache_file_name))
      .context("No cache directory for this user. Pass --cache=<path>")?,
  };

  let executable = args.player.clone().or_else(|| config.player.clone()).unwrap_or_else(|| c.default_player.clone());
  let player_args = if !cli_options.is_empty() {
    cli_options
  } else if let Some(player_args) = config.player_args.clone() {
    player_args
  } else if executable == c.default_player {
    c.default_player_args.clone()
  } else {
    Vec::new()
  };

  Ok(Settings { roots, cache_path, player: ExternalPlayer::new(executable, player_args) })
}

// --- Logging ---

/// File logging under the user data dir. The guard must be held until exit.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
  use tracing_subscriber::{EnvFilter, fmt, prelude::*};

  let logs_dir = project_dirs()?.data_local_dir().join("logs");
  std::fs::create_dir_all(&logs_dir).ok()?;

  let file_appender = tracing_appender::rolling::daily(&logs_dir, "pimp.log");
  let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(env_filter)
    .with(fmt::layer().with_writer(non_blocking).with_ansi(false).with_target(true))
    .init();

  Some(guard)
}

// --- Playback ---

/// Hands the terminal to the player for the length of playback.
struct Foreground<'a> {
  terminal: &'a mut DefaultTerminal,
  player: &'a mut ExternalPlayer,
}

impl Playback for Foreground<'_> {
  fn play(&mut self, path: &Path) -> Launch {
    ratatui::restore();
    let launch = self.player.play(path);
    if let Err(e) = resume(self.terminal) {
      warn!(err = %e, "could not take the terminal back after playback");
    }
    launch
  }
}

fn resume(terminal: &mut DefaultTerminal) -> io::Result<()> {
  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen)?;
  terminal.clear()
}

fn list_rows(height: u16) -> usize {
  height.saturating_sub(constants().reserved_rows) as usize
}

// --- Main ---

fn main() -> Result<()> {
  let args = Args::parse().lift_own_flags();

  if let Some(shell) = args.completions {
    clap_complete::generate(shell, &mut Args::command(), env!("CARGO_PKG_NAME"), &mut io::stdout());
    return Ok(());
  }

  let _log_guard = init_logging();
  let prefs_path = Config::path();
  let config = prefs_path.as_deref().map_or_else(Config::default, Config::load_from);
  let home = UserDirs::new();
  let proj_dirs = project_dirs();
  let settings =
    resolve(&args, &config, home.as_ref().map(UserDirs::home_dir), proj_dirs.as_ref().map(|d| d.cache_dir()))?;

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, settings, config, prefs_path, args.rescan);
  ratatui::restore();
  result
}

fn run(
  terminal: &mut DefaultTerminal,
  settings: Settings,
  config: Config,
  prefs_path: Option<PathBuf>,
  rescan: bool,
) -> Result<()> {
  let Settings { roots, cache_path, mut player } = settings;
  let rows = list_rows(terminal.size()?.height);
  let mut app = App::new(Library::new(roots, cache_path), rows, config, prefs_path);
  info!(
    roots = ?app.library.roots(),
    cache = %app.library.cache_path().display(),
    player = %player.executable,
    "starting"
  );

  app.set_status(LOADING_MESSAGE);
  terminal.draw(|frame| ui::ui(frame, &mut app))?;
  app.reload(rescan);

  loop {
    terminal.draw(|frame| ui::ui(frame, &mut app))?;
    if app.should_quit {
      break;
    }

    match event::read()? {
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        let Some(action) = input::action_for(app.mode, key) else { continue };
        if action == Action::Rescan {
          app.set_status(LOADING_MESSAGE);
          terminal.draw(|frame| ui::ui(frame, &mut app))?;
        }
        app.dispatch(action, &mut Foreground { terminal: &mut *terminal, player: &mut player });
      }
      Event::Resize(_, height) => app.resize(list_rows(height)),
      _ => {}
    }
  }

  info!("quit");
  Ok(())
}
