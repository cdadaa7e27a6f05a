use ratatui::style::Color;

pub struct Theme {
  pub name: &'static str,
  pub fg: Color,
  /// Highlighted (current) row.
  pub accent: Color,
  pub muted: Color,
  /// Title and status bars.
  pub bar_fg: Color,
  pub bar_bg: Color,
  pub error_fg: Color,
  pub error_bg: Color,
}

pub const THEMES: [Theme; 3] = [
  Theme {
    name: "classic",
    fg: Color::Reset,
    accent: Color::Green,
    muted: Color::DarkGray,
    bar_fg: Color::Black,
    bar_bg: Color::Green,
    error_fg: Color::Black,
    error_bg: Color::Red,
  },
  Theme {
    name: "ocean",
    fg: Color::Reset,
    accent: Color::Cyan,
    muted: Color::DarkGray,
    bar_fg: Color::Black,
    bar_bg: Color::Cyan,
    error_fg: Color::White,
    error_bg: Color::Magenta,
  },
  Theme {
    name: "mono",
    fg: Color::Reset,
    accent: Color::White,
    muted: Color::Gray,
    bar_fg: Color::Black,
    bar_bg: Color::White,
    error_fg: Color::White,
    error_bg: Color::DarkGray,
  },
];

/// Position of the theme called `name`, falling back to the first theme.
pub fn index_of(name: &str) -> usize {
  THEMES.iter().position(|t| t.name == name).unwrap_or(0)
}
