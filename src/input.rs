use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Action, AppMode};
use crate::constants::constants;

// --- Key Mapping ---

/// Translate a key press into an action for the current mode. Unbound keys map to `None`.
pub fn action_for(mode: AppMode, key: KeyEvent) -> Option<Action> {
  if key.modifiers.contains(KeyModifiers::CONTROL) {
    return control_action(key);
  }

  match mode {
    AppMode::Browsing => browsing_action(key),
    AppMode::Finding => Some(finding_action(key)),
  }
}

/// Control chords mean the same in every mode and never answer the find prompt.
fn control_action(key: KeyEvent) -> Option<Action> {
  match key.code {
    KeyCode::Char('c') => Some(Action::Quit),
    KeyCode::Char('t') => Some(Action::NextTheme),
    _ => None,
  }
}

fn browsing_action(key: KeyEvent) -> Option<Action> {
  let keys = &constants().keys;
  let action = match key.code {
    KeyCode::Up => Action::LineUp,
    KeyCode::Down => Action::LineDown,
    KeyCode::PageUp => Action::PageUp,
    KeyCode::PageDown => Action::PageDown,
    KeyCode::Home => Action::First,
    KeyCode::End => Action::Last,
    KeyCode::Enter => Action::Play,
    KeyCode::Char(c) if c == keys.prev => Action::LineUp,
    KeyCode::Char(c) if c == keys.next => Action::LineDown,
    KeyCode::Char(c) if c == keys.page_up => Action::PageUp,
    KeyCode::Char(c) if c == keys.page_down => Action::PageDown,
    KeyCode::Char(c) if c == keys.play => Action::Play,
    KeyCode::Char(c) if c == keys.rescan => Action::Rescan,
    KeyCode::Char(c) if c == keys.find => Action::StartFind,
    KeyCode::Char(c) if c == keys.quit => Action::Quit,
    _ => return None,
  };
  Some(action)
}

/// Every key answers the find prompt: a character is the query, Esc backs out, anything
/// else is an invalid query.
fn finding_action(key: KeyEvent) -> Action {
  match key.code {
    KeyCode::Char(c) => Action::Find(Some(c)),
    KeyCode::Esc => Action::CancelFind,
    _ => Action::Find(None),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn press(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
  }

  fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
  }

  #[test]
  fn letter_bindings() {
    let browse = |c| action_for(AppMode::Browsing, press(KeyCode::Char(c)));
    assert_eq!(browse('k'), Some(Action::LineDown));
    assert_eq!(browse('i'), Some(Action::LineUp));
    assert_eq!(browse('h'), Some(Action::PageDown));
    assert_eq!(browse('y'), Some(Action::PageUp));
    assert_eq!(browse('p'), Some(Action::Play));
    assert_eq!(browse('R'), Some(Action::Rescan));
    assert_eq!(browse('f'), Some(Action::StartFind));
    assert_eq!(browse('Q'), Some(Action::Quit));
    assert_eq!(browse('x'), None);
    assert_eq!(browse('q'), None);
  }

  #[test]
  fn navigation_keys() {
    let browse = |code| action_for(AppMode::Browsing, press(code));
    assert_eq!(browse(KeyCode::Up), Some(Action::LineUp));
    assert_eq!(browse(KeyCode::Down), Some(Action::LineDown));
    assert_eq!(browse(KeyCode::PageUp), Some(Action::PageUp));
    assert_eq!(browse(KeyCode::PageDown), Some(Action::PageDown));
    assert_eq!(browse(KeyCode::Home), Some(Action::First));
    assert_eq!(browse(KeyCode::End), Some(Action::Last));
    assert_eq!(browse(KeyCode::Enter), Some(Action::Play));
    assert_eq!(browse(KeyCode::Tab), None);
  }

  #[test]
  fn control_chords() {
    assert_eq!(action_for(AppMode::Browsing, ctrl('c')), Some(Action::Quit));
    assert_eq!(action_for(AppMode::Finding, ctrl('c')), Some(Action::Quit));
    assert_eq!(action_for(AppMode::Browsing, ctrl('t')), Some(Action::NextTheme));
    assert_eq!(action_for(AppMode::Browsing, ctrl('k')), None);
  }

  #[test]
  fn control_chords_do_not_answer_the_find_prompt() {
    assert_eq!(action_for(AppMode::Finding, ctrl('t')), Some(Action::NextTheme));
    assert_eq!(action_for(AppMode::Finding, ctrl('k')), None);
  }

  #[test]
  fn finding_mode_takes_any_key() {
    let find = |code| action_for(AppMode::Finding, press(code));
    assert_eq!(find(KeyCode::Char('k')), Some(Action::Find(Some('k'))));
    assert_eq!(find(KeyCode::Char('3')), Some(Action::Find(Some('3'))));
    assert_eq!(find(KeyCode::Down), Some(Action::Find(None)));
    assert_eq!(find(KeyCode::Esc), Some(Action::CancelFind));
  }
}
