use crate::char::is_line_terminator;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use std::cmp::max;
use std::cmp::min;
use std::ops::Add;

/// A location within the current source file expressed as UTF-8 byte offsets.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  /// Returns the 1-based line and column of the start of this location.
  ///
  /// Columns count characters, not bytes. `\r\n` is a single line break.
  pub fn line_column(&self, source: &str) -> (usize, usize) {
    let offset = min(self.0, source.len());
    let mut line = 1;
    let mut column = 1;
    let mut prev_cr = false;
    for (i, c) in source.char_indices() {
      if i >= offset {
        break;
      };
      if c == '\n' && prev_cr {
        prev_cr = false;
        continue;
      };
      prev_cr = c == '\r';
      if is_line_terminator(c) {
        line += 1;
        column = 1;
      } else {
        column += 1;
      };
    }
    (line, column)
  }
}

impl Add for Loc {
  type Output = Loc;

  fn add(self, rhs: Self) -> Self::Output {
    let mut new = self;
    new.extend(rhs);
    new
  }
}
