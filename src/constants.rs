//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available.
//! Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  // Catalog
  pub media_extensions: Vec<String>,
  pub default_movies_dir: String,
  pub cache_file_name: String,

  // Player
  pub default_player: String,
  pub default_player_args: Vec<String>,
  pub subtitle_extension: String,
  pub subtitle_flag: String,

  /// Rows taken by the title and status bars.
  pub reserved_rows: u16,

  pub keys: KeyLetters,
}

/// Letter bindings for the browser. Arrow and paging keys are always bound as well.
#[derive(Debug, Deserialize)]
pub struct KeyLetters {
  pub next: char,
  pub prev: char,
  pub page_down: char,
  pub page_up: char,
  pub play: char,
  pub rescan: char,
  pub find: char,
  pub quit: char,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; a malformed file fails every test run.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
