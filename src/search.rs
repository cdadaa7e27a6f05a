use crate::error::SearchError;

/// Index of the first name (in the given order) whose first character matches `ch`,
/// ignoring case.
///
/// Non-letters are rejected before looking at any name.
pub fn find_first_starting_with<S: AsRef<str>>(names: &[S], ch: char) -> Result<usize, SearchError> {
  if !ch.is_alphabetic() {
    return Err(SearchError::NotALetter(ch));
  }
  names
    .iter()
    .position(|name| name.as_ref().chars().next().is_some_and(|first| same_letter(first, ch)))
    .ok_or(SearchError::NoMatch(ch))
}

fn same_letter(a: char, b: char) -> bool {
  a == b || a.to_uppercase().eq(b.to_uppercase())
}
