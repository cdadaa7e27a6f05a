use crate::catalog::Catalog;

/// Catalog display names in ascending ordinal order. This is what the viewport pages over.
///
/// Always rebuilt from a catalog snapshot, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortedIndex {
  names: Vec<String>,
}

impl SortedIndex {
  pub fn build(catalog: &Catalog) -> Self {
    let mut names: Vec<String> = catalog.names().map(str::to_owned).collect();
    names.sort_unstable();
    Self { names }
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }

  pub fn get(&self, i: usize) -> Option<&str> {
    self.names.get(i).map(String::as_str)
  }

  pub fn names(&self) -> &[String] {
    &self.names
  }

  /// The names starting at `first`, at most `rows` of them.
  pub fn window(&self, first: usize, rows: usize) -> &[String] {
    let start = first.min(self.names.len());
    let end = start.saturating_add(rows).min(self.names.len());
    &self.names[start..end]
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::path::PathBuf;

  fn index_of(paths: &[&str]) -> SortedIndex {
    let catalog: Catalog = paths.iter().map(PathBuf::from).collect();
    SortedIndex::build(&catalog)
  }

  #[test]
  fn sorts_by_ordinal_comparison() {
    let index = index_of(&["/m/beta.mp4", "/m/Gamma.mkv", "/m/Alpha.avi", "/m/_x.mpg", "/m/2001.mp4"]);
    assert_eq!(index.names(), ["2001.mp4", "Alpha.avi", "Gamma.mkv", "_x.mpg", "beta.mp4"]);
  }

  #[test]
  fn length_matches_catalog() {
    let catalog: Catalog = ["/a/x.mp4", "/b/x.mp4", "/a/y.mp4"].iter().map(PathBuf::from).collect();
    let index = SortedIndex::build(&catalog);
    assert_eq!(index.len(), catalog.len());
    assert_eq!(index, SortedIndex::build(&catalog));
  }

  #[test]
  fn window_is_clamped() {
    let index = index_of(&["/m/a.mp4", "/m/b.mp4", "/m/c.mp4"]);
    assert_eq!(index.window(1, 5), ["b.mp4", "c.mp4"]);
    assert_eq!(index.window(0, 2), ["a.mp4", "b.mp4"]);
    assert!(index.window(7, 3).is_empty());
    assert!(SortedIndex::default().window(0, 10).is_empty());
  }
}
