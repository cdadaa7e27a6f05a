use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{App, AppMode, StatusKind};
use crate::constants::constants;
use crate::theme::Theme;

// --- Helpers ---

/// Truncate `s` to at most `max_width` terminal columns, appending "…" if truncated.
pub fn truncate_str(s: &str, max_width: usize) -> String {
  if s.width() <= max_width {
    return s.to_string();
  }
  let budget = max_width.saturating_sub(1);
  let mut used = 0;
  let mut out = String::new();
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > budget {
      break;
    }
    used += w;
    out.push(c);
  }
  if max_width > 0 {
    out.push('…');
  }
  out
}

fn key_hints() -> String {
  let k = &constants().keys;
  format!(
    "{}:Play {}:Refresh {}:Up {}:Down {}:PUp {}:PDown {}:Find {}:Quit",
    k.play, k.rescan, k.prev, k.next, k.page_up, k.page_down, k.find, k.quit
  )
}

// --- UI Rendering ---

pub fn ui(frame: &mut Frame, app: &mut App) {
  let [title_area, list_area, status_area] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

  // Keep the viewport in step with the rows actually available.
  app.resize(list_area.height as usize);

  let theme = app.theme();
  render_title(frame, app, theme, title_area);
  render_list(frame, app, theme, list_area);
  render_status(frame, app, theme, status_area);
}

fn render_title(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
  let bar = Style::default().fg(theme.bar_fg).bg(theme.bar_bg);
  let counter = match app.viewport.selected() {
    Some(i) => format!(" {}/{} ", i + 1, app.viewport.len()),
    None => " 0/0 ".to_string(),
  };
  let left_w = (area.width as usize).saturating_sub(counter.width());
  let left = truncate_str(&format!(" PiMP v{} - {}", env!("CARGO_PKG_VERSION"), key_hints()), left_w);
  let gap = " ".repeat(left_w.saturating_sub(left.width()));
  let line = Line::from(vec![
    Span::styled(left, bar.add_modifier(Modifier::BOLD)),
    Span::styled(gap, bar),
    Span::styled(counter, bar),
  ]);
  frame.render_widget(Paragraph::new(line).style(bar), area);
}

fn render_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
  if app.library.is_empty() {
    let hint = format!("  No movies found. Press {} to rescan.", constants().keys.rescan);
    frame.render_widget(Paragraph::new(Span::styled(hint, Style::default().fg(theme.muted))), area);
    return;
  }

  let width = area.width as usize;
  let first = app.viewport.first();
  let current = app.viewport.current();
  let lines: Vec<Line> = app
    .library
    .index()
    .window(first, area.height as usize)
    .iter()
    .enumerate()
    .map(|(row, name)| {
      if first + row == current {
        let style = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        Line::from(Span::styled(truncate_str(&format!("> {}", name), width), style))
      } else {
        Line::from(Span::styled(truncate_str(&format!("  {}", name), width), Style::default().fg(theme.fg)))
      }
    })
    .collect();
  frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
  let style = match app.status.kind {
    StatusKind::Info => Style::default().fg(theme.bar_fg).bg(theme.bar_bg),
    StatusKind::Error => Style::default().fg(theme.error_fg).bg(theme.error_bg),
  };
  let prefix = if app.mode == AppMode::Finding { " ? " } else { " " };
  let text = truncate_str(&format!("{}{}", prefix, app.status.text), area.width as usize);
  frame.render_widget(Paragraph::new(text).style(style), area);
}
