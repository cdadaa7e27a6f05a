//! Media catalog: display name → absolute path, discovered by walking root directories.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::constants::constants;

/// Name-indexed set of media files.
///
/// Keys are base names (with extension). Inserting a second file with the same base name
/// replaces the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
  entries: HashMap<String, PathBuf>,
}

impl Catalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert `path` under its base name. Paths without a file name are ignored.
  pub fn insert(&mut self, path: PathBuf) {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy().into_owned()) else { return };
    if let Some(previous) = self.entries.insert(name.clone(), path) {
      debug!(name = %name, replaced = %previous.display(), "catalog: duplicate display name, last one wins");
    }
  }

  pub fn get(&self, name: &str) -> Option<&Path> {
    self.entries.get(name).map(PathBuf::as_path)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.keys().map(String::as_str)
  }

  pub fn paths(&self) -> impl Iterator<Item = &Path> {
    self.entries.values().map(PathBuf::as_path)
  }
}

impl FromIterator<PathBuf> for Catalog {
  fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
    let mut catalog = Catalog::new();
    for path in iter {
      catalog.insert(path);
    }
    catalog
  }
}

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().as_encoded_bytes().starts_with(b".")
}

/// Whether `path` carries one of the allowed media extensions (case-sensitive).
pub fn is_media_file(path: &Path) -> bool {
  path
    .extension()
    .and_then(OsStr::to_str)
    .is_some_and(|ext| constants().media_extensions.iter().any(|allowed| allowed == ext))
}

/// Walk every root and collect media files into one catalog.
///
/// Missing roots, unreadable directories and symlink loops are skipped; the scan always
/// returns whatever it could enumerate. Later roots win on duplicate display names.
pub fn scan<P: AsRef<Path>>(roots: &[P]) -> Catalog {
  let mut catalog = Catalog::new();
  for root in roots {
    let root = root.as_ref();
    if !root.is_dir() {
      debug!(root = %root.display(), "scan: not a directory, skipping");
      continue;
    }
    let before = catalog.len();
    let walker = WalkDir::new(root)
      .follow_links(true)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          debug!(err = %e, "scan: skipping unreadable entry");
          continue;
        }
      };
      if entry.file_type().is_file() && is_media_file(entry.path()) {
        catalog.insert(absolute(entry.into_path()));
      }
    }
    debug!(root = %root.display(), added = catalog.len().saturating_sub(before), "scan: root done");
  }
  catalog
}

fn absolute(path: PathBuf) -> PathBuf {
  std::path::absolute(&path).unwrap_or(path)
}
