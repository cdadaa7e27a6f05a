//! Cursor and visible window over the sorted index.
//!
//! Whenever the index is non-empty: `current < len` and
//! `first <= current < first + visible_rows`. With an empty index every move is a no-op.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
  current: usize,
  first: usize,
  visible_rows: usize,
  len: usize,
}

impl Viewport {
  pub fn new(visible_rows: usize, len: usize) -> Self {
    Self { current: 0, first: 0, visible_rows: visible_rows.max(1), len }
  }

  pub fn current(&self) -> usize {
    self.current
  }

  pub fn first(&self) -> usize {
    self.first
  }

  pub fn visible_rows(&self) -> usize {
    self.visible_rows
  }

  pub fn len(&self) -> usize {
    self.len
  }

  /// Index of the highlighted entry, `None` when there is nothing to highlight.
  pub fn selected(&self) -> Option<usize> {
    (self.len > 0).then_some(self.current)
  }

  /// Back to the top, adopting the length of a freshly loaded index.
  pub fn reset(&mut self, len: usize) {
    self.current = 0;
    self.first = 0;
    self.len = len;
  }

  /// Move the cursor up by `k`. The window slides up by the same amount once the
  /// cursor passes its top edge.
  pub fn scroll_up(&mut self, k: usize) {
    if self.len == 0 {
      return;
    }
    self.current = self.current.saturating_sub(k);
    if self.current < self.first {
      self.first = self.first.saturating_sub(k);
    }
  }

  /// Move the cursor down by `k`, stopping on the last entry. The window slides down by
  /// `k` once the cursor passes its bottom edge.
  pub fn scroll_down(&mut self, k: usize) {
    if self.len == 0 {
      return;
    }
    if self.current.saturating_add(k).saturating_add(1) < self.len {
      self.current += k;
    } else {
      self.current = self.len - 1;
    }
    if self.current >= self.first + self.visible_rows {
      self.first = self.first.saturating_add(k);
    }
    // A clamped move longer than one screen would otherwise leave the cursor above the window.
    self.first = self.first.min(self.current);
  }

  /// Move the cursor to `offset` (clamped to the last entry) through `scroll_up`/`scroll_down`.
  pub fn scroll_to(&mut self, offset: usize) {
    if self.len == 0 {
      return;
    }
    let offset = offset.min(self.len - 1);
    if offset > self.current {
      self.scroll_down(offset - self.current);
    } else if offset < self.current {
      self.scroll_up(self.current - offset);
    }
  }

  pub fn line_up(&mut self) {
    self.scroll_up(1);
  }

  pub fn line_down(&mut self) {
    self.scroll_down(1);
  }

  pub fn page_up(&mut self) {
    self.scroll_up(self.visible_rows);
  }

  pub fn page_down(&mut self) {
    self.scroll_down(self.visible_rows);
  }

  pub fn home(&mut self) {
    self.scroll_to(0);
  }

  pub fn end(&mut self) {
    self.scroll_to(self.len.saturating_sub(1));
  }

  /// Adopt a new terminal height, keeping the cursor inside the window.
  pub fn resize(&mut self, visible_rows: usize) {
    self.visible_rows = visible_rows.max(1);
    if self.len > 0 && self.current >= self.first + self.visible_rows {
      self.first = self.current + 1 - self.visible_rows;
    }
  }
}
