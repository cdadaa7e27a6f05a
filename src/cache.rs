//! Flat-file catalog cache: one absolute path per line.
//!
//! Entries are not checked against the filesystem on load. A cached path that has since
//! disappeared only shows up when playback is attempted.

use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::catalog::Catalog;

/// Read the cache at `path`.
///
/// Returns `Ok(None)` when the file does not exist or holds no usable line, so the caller
/// falls back to a scan.
pub fn load(path: &Path) -> Result<Option<Catalog>> {
  let content = match std::fs::read_to_string(path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e).with_context(|| format!("Failed to read catalog cache {}", path.display())),
  };

  let catalog: Catalog = content
    .lines()
    .map(|l| l.strip_suffix('\r').unwrap_or(l))
    .filter(|l| !l.trim().is_empty())
    .map(PathBuf::from)
    .collect();
  debug!(path = %path.display(), entries = catalog.len(), "cache: loaded");
  Ok(if catalog.is_empty() { None } else { Some(catalog) })
}

/// Overwrite the cache at `path` with every path in `catalog`.
///
/// The new content is written to a temporary file next to the cache and renamed over it,
/// so an interrupted write leaves the previous cache in place.
pub fn save(path: &Path, catalog: &Catalog) -> Result<()> {
  let dir = match path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir,
    _ => Path::new("."),
  };
  std::fs::create_dir_all(dir).with_context(|| format!("Failed to create cache directory {}", dir.display()))?;

  let tmp = NamedTempFile::new_in(dir).context("Failed to create temporary cache file")?;
  let mut writer = BufWriter::new(tmp);
  let mut written = 0usize;
  for entry in catalog.paths() {
    let Some(line) = entry.to_str() else {
      warn!(path = %entry.display(), "cache: path is not valid UTF-8, not cached");
      continue;
    };
    writeln!(writer, "{}", line).context("Failed to write catalog cache")?;
    written += 1;
  }
  let tmp = writer.into_inner().context("Failed to flush catalog cache")?;
  tmp.persist(path).with_context(|| format!("Failed to replace catalog cache {}", path.display()))?;
  debug!(path = %path.display(), entries = written, "cache: saved");
  Ok(())
}
