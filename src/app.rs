use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::SearchError;
use crate::library::{Library, Reload, Source};
use crate::player::Playback;
use crate::search::find_first_starting_with;
use crate::theme::{self, THEMES};
use crate::viewport::Viewport;

pub const LOADING_MESSAGE: &str = "Loading library... Please wait!";
pub const FIND_PROMPT: &str = "Please enter the first letter of the movie.";

/// What the next key press means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
  Browsing,
  /// The find key was pressed; the next key is the letter to jump to.
  Finding,
}

/// Everything a key press can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  LineUp,
  LineDown,
  PageUp,
  PageDown,
  First,
  Last,
  Play,
  Rescan,
  StartFind,
  /// The letter typed after the find key, `None` for a key without a character.
  Find(Option<char>),
  CancelFind,
  NextTheme,
  Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
  Info,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
  pub text: String,
  pub kind: StatusKind,
}

/// Session context: the library, the view over it and the status line.
pub struct App {
  pub library: Library,
  pub viewport: Viewport,
  pub status: Status,
  pub mode: AppMode,
  pub theme_index: usize,
  pub should_quit: bool,
  config: Config,
  /// Where theme changes are saved. `None` keeps them for this session only.
  prefs_path: Option<PathBuf>,
}

impl App {
  pub fn new(library: Library, visible_rows: usize, config: Config, prefs_path: Option<PathBuf>) -> Self {
    let theme_index = config.theme_name.as_deref().map_or(0, theme::index_of);
    let viewport = Viewport::new(visible_rows, library.len());
    Self {
      library,
      viewport,
      status: Status { text: "Ready.".to_string(), kind: StatusKind::Info },
      mode: AppMode::Browsing,
      theme_index,
      should_quit: false,
      config,
      prefs_path,
    }
  }

  pub fn theme(&self) -> &'static theme::Theme {
    // Safety: theme_index comes from theme::index_of or modular arithmetic in next_theme().
    &THEMES[self.theme_index]
  }

  pub fn set_status(&mut self, msg: impl Into<String>) {
    self.status = Status { text: msg.into(), kind: StatusKind::Info };
  }

  pub fn set_error(&mut self, msg: impl Into<String>) {
    self.status = Status { text: msg.into(), kind: StatusKind::Error };
  }

  /// Display name and path under the cursor.
  pub fn selected(&self) -> Option<(String, PathBuf)> {
    let i = self.viewport.selected()?;
    self.library.entry(i).map(|(name, path)| (name.to_string(), path.to_path_buf()))
  }

  /// Rebuild the library (from the cache unless `force_rescan`) and go back to the top.
  pub fn reload(&mut self, force_rescan: bool) {
    let Reload { source, entries, cache_error } = self.library.reload(force_rescan);
    self.viewport.reset(entries);
    self.mode = AppMode::Browsing;
    let origin = match source {
      Source::Cache => "from cache",
      Source::Scan => "from disk",
    };
    match cache_error {
      Some(e) => self.set_error(format!("Library reloaded {} ({} entries), cache problem: {}", origin, entries, e)),
      None => self.set_status(format!("Library reloaded {} ({} entries).", origin, entries)),
    }
  }

  pub fn resize(&mut self, visible_rows: usize) {
    if visible_rows.max(1) != self.viewport.visible_rows() {
      debug!(rows = visible_rows, "resize");
      self.viewport.resize(visible_rows);
    }
  }

  /// Hand the highlighted entry to `player`. Blocks until the player returns.
  pub fn play_selected(&mut self, player: &mut dyn Playback) {
    let Some((name, path)) = self.selected() else {
      self.set_error("Nothing to play.");
      return;
    };
    info!(name = %name, path = %path.display(), "play selected");
    let launch = player.play(&path);
    if launch.success {
      self.set_status(launch.command);
    } else {
      self.set_error(format!("Oops! Cannot play {}.", name));
    }
  }

  /// Jump to the first entry starting with `letter`. Failures leave the cursor alone.
  pub fn find(&mut self, letter: Option<char>) {
    self.mode = AppMode::Browsing;
    let result = letter
      .ok_or(SearchError::NoLetter)
      .and_then(|ch| find_first_starting_with(self.library.index().names(), ch).map(|offset| (ch, offset)));
    match result {
      Ok((ch, offset)) => {
        self.viewport.scroll_to(offset);
        self.set_status(format!("Scrolled to movies starting with '{}'.", ch));
      }
      Err(e) => {
        debug!(err = %e, "find: no jump");
        self.set_error(e.to_string());
      }
    }
  }

  pub fn next_theme(&mut self) {
    self.theme_index = (self.theme_index + 1) % THEMES.len();
    self.config.theme_name = Some(self.theme().name.to_string());
    if let Some(path) = &self.prefs_path
      && let Err(e) = self.config.save_to(path)
    {
      warn!(err = %format!("{:#}", e), "theme: could not save preferences");
    }
  }

  /// Apply one action. Blocking work (scanning, playback) runs to completion here.
  pub fn dispatch(&mut self, action: Action, player: &mut dyn Playback) {
    match action {
      Action::LineUp => self.viewport.line_up(),
      Action::LineDown => self.viewport.line_down(),
      Action::PageUp => self.viewport.page_up(),
      Action::PageDown => self.viewport.page_down(),
      Action::First => self.viewport.home(),
      Action::Last => self.viewport.end(),
      Action::Play => self.play_selected(player),
      Action::Rescan => self.reload(true),
      Action::StartFind => {
        self.mode = AppMode::Finding;
        self.set_status(FIND_PROMPT);
      }
      Action::Find(letter) => self.find(letter),
      Action::CancelFind => {
        self.mode = AppMode::Browsing;
        self.set_status("Ready.");
      }
      Action::NextTheme => self.next_theme(),
      Action::Quit => self.should_quit = true,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::player::Launch;
  use std::fs;
  use std::path::Path;
  use tempfile::TempDir;

  #[derive(Default)]
  struct FakePlayer {
    played: Vec<PathBuf>,
    fail: bool,
  }

  impl Playback for FakePlayer {
    fn play(&mut self, path: &Path) -> Launch {
      self.played.push(path.to_path_buf());
      Launch { command: format!("fake \"{}\"", path.display()), success: !self.fail }
    }
  }

  struct Session {
    _dir: TempDir,
    root: PathBuf,
    app: App,
  }

  fn session(files: &[&str], visible_rows: usize) -> Session {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("m");
    fs::create_dir_all(&root).unwrap();
    for f in files {
      fs::write(root.join(f), b"").unwrap();
    }
    let library = Library::new(vec![root.clone()], dir.path().join("catalog"));
    let mut app = App::new(library, visible_rows, Config::default(), None);
    app.reload(false);
    Session { _dir: dir, root, app }
  }

  fn position(app: &App) -> (usize, usize) {
    (app.viewport.current(), app.viewport.first())
  }

  #[test]
  fn two_entry_walkthrough() {
    let mut s = session(&["z.mkv", "a.mp4"], 1);
    let mut player = FakePlayer::default();
    assert_eq!(s.app.library.index().names(), ["a.mp4", "z.mkv"]);
    assert_eq!(position(&s.app), (0, 0));

    s.app.dispatch(Action::LineDown, &mut player);
    assert_eq!(position(&s.app), (1, 1));

    s.app.dispatch(Action::Play, &mut player);
    assert_eq!(player.played, [s.root.join("z.mkv")]);
    assert_eq!(s.app.status.kind, StatusKind::Info);
    assert!(s.app.status.text.starts_with("fake"));
  }

  #[test]
  fn forced_rescan_resets_the_viewport_even_if_nothing_changed() {
    let mut s = session(&["a.mp4", "b.mp4", "c.mp4", "d.mp4"], 2);
    let mut player = FakePlayer::default();
    s.app.dispatch(Action::Last, &mut player);
    assert_eq!(position(&s.app), (3, 3));
    let before = s.app.library.index().clone();

    s.app.dispatch(Action::Rescan, &mut player);
    assert_eq!(position(&s.app), (0, 0));
    assert_eq!(s.app.library.index(), &before);
    assert_eq!(s.app.status.text, "Library reloaded from disk (4 entries).");
  }

  #[test]
  fn rescan_picks_up_new_files() {
    let mut s = session(&["b.mp4"], 5);
    let mut player = FakePlayer::default();
    fs::write(s.root.join("a.mp4"), b"").unwrap();

    s.app.reload(false);
    assert_eq!(s.app.library.len(), 1);
    s.app.dispatch(Action::Rescan, &mut player);
    assert_eq!(s.app.library.index().names(), ["a.mp4", "b.mp4"]);
  }

  #[test]
  fn failed_playback_reports_and_continues() {
    let mut s = session(&["a.mp4"], 3);
    let mut player = FakePlayer { fail: true, ..FakePlayer::default() };

    s.app.dispatch(Action::Play, &mut player);
    assert_eq!(s.app.status, Status { text: "Oops! Cannot play a.mp4.".into(), kind: StatusKind::Error });
    assert!(!s.app.should_quit);
  }

  #[test]
  fn empty_catalog_guards_every_action() {
    let mut s = session(&[], 3);
    let mut player = FakePlayer::default();
    for action in [Action::LineDown, Action::PageDown, Action::Last, Action::LineUp, Action::First] {
      s.app.dispatch(action, &mut player);
    }
    assert_eq!(position(&s.app), (0, 0));

    s.app.dispatch(Action::Play, &mut player);
    assert!(player.played.is_empty());
    assert_eq!(s.app.status.text, "Nothing to play.");

    s.app.dispatch(Action::StartFind, &mut player);
    s.app.dispatch(Action::Find(Some('a')), &mut player);
    assert_eq!(s.app.status.text, "Oops! No movies start with 'a'.");
  }

  #[test]
  fn find_jumps_to_the_first_match() {
    let mut s = session(&["Alpha.mkv", "beta.mp4", "Gamma.avi", "delta.mp4"], 2);
    let mut player = FakePlayer::default();

    s.app.dispatch(Action::StartFind, &mut player);
    assert_eq!(s.app.mode, AppMode::Finding);
    assert_eq!(s.app.status.text, FIND_PROMPT);

    // Sorted: Alpha.mkv, Gamma.avi, beta.mp4, delta.mp4
    s.app.dispatch(Action::Find(Some('B')), &mut player);
    assert_eq!(s.app.mode, AppMode::Browsing);
    assert_eq!(s.app.viewport.current(), 2);
    assert_eq!(s.app.selected().unwrap().0, "beta.mp4");
    assert_eq!(s.app.status.text, "Scrolled to movies starting with 'B'.");
  }

  #[test]
  fn failed_find_leaves_the_cursor_alone() {
    let mut s = session(&["a.mp4", "b.mp4", "c.mp4"], 2);
    let mut player = FakePlayer::default();
    s.app.dispatch(Action::LineDown, &mut player);

    for letter in [Some('7'), Some('q'), None] {
      s.app.dispatch(Action::StartFind, &mut player);
      s.app.dispatch(Action::Find(letter), &mut player);
      assert_eq!(position(&s.app), (1, 0));
      assert_eq!(s.app.status.kind, StatusKind::Error);
      assert_eq!(s.app.mode, AppMode::Browsing);
    }
    assert_eq!(s.app.status.text, "Oops! You didn't type a letter.");
  }

  #[test]
  fn cancel_find_returns_to_browsing() {
    let mut s = session(&["a.mp4"], 2);
    let mut player = FakePlayer::default();
    s.app.dispatch(Action::StartFind, &mut player);
    s.app.dispatch(Action::CancelFind, &mut player);
    assert_eq!(s.app.mode, AppMode::Browsing);
    assert_eq!(s.app.status.text, "Ready.");
  }

  #[test]
  fn stale_entry_is_reported_by_the_player() {
    let mut s = session(&["a.mp4", "b.mp4"], 2);
    fs::remove_file(s.root.join("a.mp4")).unwrap();
    s.app.reload(false);

    let mut player = crate::player::ExternalPlayer::new("definitely-not-a-real-player", Vec::new());
    s.app.dispatch(Action::Play, &mut player);
    assert_eq!(s.app.status.text, "Oops! Cannot play a.mp4.");
    assert_eq!(s.app.library.len(), 2);
  }

  #[test]
  fn quit_sets_the_flag() {
    let mut s = session(&["a.mp4"], 2);
    s.app.dispatch(Action::Quit, &mut FakePlayer::default());
    assert!(s.app.should_quit);
  }

  #[test]
  fn theme_comes_from_config() {
    let library = Library::new(Vec::new(), PathBuf::from("unused"));
    let config = Config { theme_name: Some("mono".into()), ..Config::default() };
    assert_eq!(App::new(library, 3, config, None).theme().name, "mono");
  }

  #[test]
  fn next_theme_wraps_and_is_saved() {
    let dir = TempDir::new().unwrap();
    let prefs = dir.path().join("prefs.toml");
    let library = Library::new(Vec::new(), dir.path().join("catalog"));
    let mut app = App::new(library, 3, Config::default(), Some(prefs.clone()));
    let mut player = FakePlayer::default();

    for _ in 0..THEMES.len() - 1 {
      app.dispatch(Action::NextTheme, &mut player);
    }
    assert_eq!(app.theme_index, THEMES.len() - 1);
    app.dispatch(Action::NextTheme, &mut player);
    assert_eq!(app.theme_index, 0);
    assert_eq!(Config::load_from(&prefs).theme_name.as_deref(), Some(THEMES[0].name));
  }
}
