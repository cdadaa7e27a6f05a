use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use anyhow::{Context, Result, anyhow};
use tracing::{info, warn};

use crate::constants::constants;

/// Outcome of handing a file to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch {
  /// Shell-style rendering of the command, shown on the status line.
  pub command: String,
  pub success: bool,
}

/// Something that can play a media file, blocking until playback ends.
pub trait Playback {
  fn play(&mut self, path: &Path) -> Launch;
}

/// Runs an external player executable in the foreground.
#[derive(Debug, Clone)]
pub struct ExternalPlayer {
  pub executable: String,
  pub args: Vec<String>,
}

/// The sibling subtitle file (same stem, subtitle extension), if one exists.
pub fn subtitle_for(movie: &Path) -> Option<PathBuf> {
  let sub = movie.with_extension(&constants().subtitle_extension);
  (sub != movie && sub.is_file()).then_some(sub)
}

impl ExternalPlayer {
  pub fn new(executable: impl Into<String>, args: Vec<String>) -> Self {
    Self { executable: executable.into(), args }
  }

  /// Whether this is the default player, the only one that gets subtitles attached.
  fn wants_subtitles(&self) -> bool {
    let name = Path::new(&self.executable).file_name().and_then(|n| n.to_str()).unwrap_or(&self.executable);
    name == constants().default_player
  }

  /// Arguments for playing `movie`: player options (trimmed, blanks dropped), the
  /// subtitle flag pair when applicable, then the movie itself.
  pub fn arguments(&self, movie: &Path) -> Vec<String> {
    let mut args: Vec<String> =
      self.args.iter().map(|a| a.trim()).filter(|a| !a.is_empty()).map(str::to_string).collect();
    if self.wants_subtitles()
      && let Some(sub) = subtitle_for(movie)
    {
      args.push(constants().subtitle_flag.clone());
      args.push(sub.to_string_lossy().into_owned());
    }
    args.push(movie.to_string_lossy().into_owned());
    args
  }

  /// Shell-style description of the command line, with the movie path quoted.
  pub fn describe(&self, movie: &Path) -> String {
    let args = self.arguments(movie);
    let mut parts = vec![self.executable.clone()];
    if let Some((movie_arg, options)) = args.split_last() {
      parts.extend(options.iter().map(|a| if a.contains(' ') { format!("\"{}\"", a) } else { a.clone() }));
      parts.push(format!("\"{}\"", movie_arg));
    }
    parts.join(" ")
  }

  fn run(&self, movie: &Path) -> Result<ExitStatus> {
    let mut cmd = Command::new(&self.executable);
    cmd.args(self.arguments(movie));
    cmd.stdin(Stdio::inherit());
    // The player owns the terminal while it runs; its chatter on stdout is not wanted.
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::inherit());

    let mut child = cmd.spawn().map_err(|e| {
      if e.kind() == std::io::ErrorKind::NotFound {
        anyhow!("{} not found. Install it or pass --player=<executable>", self.executable)
      } else {
        anyhow!(e).context(format!("Failed to spawn {}", self.executable))
      }
    })?;
    child.wait().with_context(|| format!("Failed to wait for {}", self.executable))
  }
}

impl Playback for ExternalPlayer {
  fn play(&mut self, path: &Path) -> Launch {
    let command = self.describe(path);
    if !path.is_file() {
      warn!(path = %path.display(), "play: file is gone, the catalog may be stale");
      return Launch { command, success: false };
    }

    info!(command = %command, "play: starting");
    let success = match self.run(path) {
      Ok(status) if status.success() => true,
      Ok(status) => {
        warn!(status = %status, "play: player exited with failure");
        false
      }
      Err(e) => {
        warn!(err = %format!("{:#}", e), "play: could not run player");
        false
      }
    };
    Launch { command, success }
  }
}
