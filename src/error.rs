use thiserror::Error;

/// Why a jump-to-letter query did not move the cursor.
///
/// The messages are shown verbatim on the status line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
  #[error("Oops! '{0}' is not a letter.")]
  NotALetter(char),

  #[error("Oops! No movies start with '{0}'.")]
  NoMatch(char),

  /// A key without a character (arrow, function key…) was pressed instead of a letter.
  #[error("Oops! You didn't type a letter.")]
  NoLetter,
}
