use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\t\n\x0B\x0C\r ]+").unwrap());
static SPACE_AROUND_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?([{}();,]) ?").unwrap());

/// Collapses each whitespace run to one space, then drops the space on either side of `{ } ( ) ; ,`.
///
/// Literals must already be swapped out for placeholders.
pub(crate) fn collapse(code: &str) -> String {
  let single = WHITESPACE_RUN.replace_all(code, " ");
  SPACE_AROUND_PUNCT.replace_all(&single, "$1").into_owned()
}

/// Inserts a line break after every `column` characters, wherever they fall.
pub(crate) fn wrap(text: &str, column: usize) -> String {
  if column == 0 || text.chars().count() <= column {
    return text.to_string();
  };
  let mut out = String::with_capacity(text.len() + text.len() / column + 1);
  let mut chars = text.chars().peekable();
  let mut on_line = 0;
  while let Some(c) = chars.next() {
    out.push(c);
    on_line += 1;
    if on_line == column && chars.peek().is_some() {
      out.push('\n');
      on_line = 0;
    };
  }
  out
}
