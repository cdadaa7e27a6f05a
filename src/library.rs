//! Catalog + sorted index, loaded from the cache or rebuilt by scanning the roots.
//!
//! The cache is never invalidated automatically: a rescan happens when the cache is
//! missing or empty, or when the user forces one.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cache;
use crate::catalog::{self, Catalog};
use crate::index::SortedIndex;

/// Where the catalog of the last reload came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
  Cache,
  Scan,
}

/// Result of a reload: where the entries came from and any cache problem to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reload {
  pub source: Source,
  pub entries: usize,
  /// A cache read or write failure. The reload itself still succeeded.
  pub cache_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Library {
  roots: Vec<PathBuf>,
  cache_path: PathBuf,
  catalog: Catalog,
  index: SortedIndex,
}

impl Library {
  /// An empty library; call [`Library::reload`] to fill it.
  pub fn new(roots: Vec<PathBuf>, cache_path: PathBuf) -> Self {
    Self { roots, cache_path, catalog: Catalog::new(), index: SortedIndex::default() }
  }

  pub fn roots(&self) -> &[PathBuf] {
    &self.roots
  }

  pub fn cache_path(&self) -> &Path {
    &self.cache_path
  }

  pub fn index(&self) -> &SortedIndex {
    &self.index
  }

  pub fn len(&self) -> usize {
    self.index.len()
  }

  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  /// Display name and path of the entry at `i` in sorted order.
  pub fn entry(&self, i: usize) -> Option<(&str, &Path)> {
    let name = self.index.get(i)?;
    Some((name, self.catalog.get(name)?))
  }

  /// Replace the catalog. Unless `force_rescan` is set the cache is tried first; a scan
  /// rewrites the cache. The sorted index is rebuilt in every case.
  pub fn reload(&mut self, force_rescan: bool) -> Reload {
    let mut cache_error = None;

    let cached = if force_rescan {
      None
    } else {
      match cache::load(&self.cache_path) {
        Ok(cached) => cached,
        Err(e) => {
          warn!(err = %format!("{:#}", e), "library: cache unreadable, rescanning");
          cache_error = Some(format!("{:#}", e));
          None
        }
      }
    };

    let source = match cached {
      Some(catalog) => {
        self.catalog = catalog;
        Source::Cache
      }
      None => {
        self.catalog = catalog::scan(&self.roots);
        if let Err(e) = cache::save(&self.cache_path, &self.catalog) {
          warn!(err = %format!("{:#}", e), "library: could not write cache");
          cache_error = Some(format!("{:#}", e));
        }
        Source::Scan
      }
    };

    self.index = SortedIndex::build(&self.catalog);
    info!(?source, entries = self.index.len(), forced = force_rescan, "library: reloaded");
    Reload { source, entries: self.index.len(), cache_error }
  }
}
