//! Output buffer that keeps adjacent tokens apart.
//!
//! Each write is one token (or opaque literal text). A single space is inserted only where the previous token and the next one would otherwise lex as one, as in `returnx`, `a++b` or `a//b`.
//!
//! The byte range of every string, template and regex literal written is recorded, so later passes over the text can leave literals alone without lexing it again.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
  Word,
  Digit,
  Plus,
  Minus,
  Slash,
  Star,
  Other,
}

impl Edge {
  fn of(ch: char) -> Edge {
    match ch {
      '0'..='9' => Edge::Digit,
      '+' => Edge::Plus,
      '-' => Edge::Minus,
      '/' => Edge::Slash,
      '*' => Edge::Star,
      // Non-ASCII only occurs inside identifiers or literals, so `var π` must stay apart.
      c if c.is_ascii_alphabetic() || matches!(c, '_' | '$' | '\\') || !c.is_ascii() => Edge::Word,
      _ => Edge::Other,
    }
  }

  fn clashes_with(self, next: Edge) -> bool {
    match (self, next) {
      (Edge::Word | Edge::Digit, Edge::Word | Edge::Digit) => true,
      (Edge::Plus, Edge::Plus) | (Edge::Minus, Edge::Minus) => true,
      (Edge::Slash, Edge::Slash | Edge::Star) => true,
      _ => false,
    }
  }
}

// Both start single-line comments in scripts.
const HTML_COMMENTS: [&str; 2] = ["<!--", "-->"];

#[derive(Debug, Clone)]
pub struct Emitter {
  buf: String,
  last: Edge,
  literals: Vec<Range<usize>>,
  // Templates still open, and where the outermost one began.
  open_literals: usize,
  open_start: usize,
}

impl Default for Emitter {
  fn default() -> Self {
    Emitter {
      buf: String::new(),
      last: Edge::Other,
      literals: Vec::new(),
      open_literals: 0,
      open_start: 0,
    }
  }
}

impl Emitter {
  pub fn new() -> Self {
    Emitter::default()
  }

  pub fn finish(self) -> String {
    self.buf
  }

  /// The text, and the ranges of its top-level literals in order. Literals inside a template substitution are covered by the template's range.
  pub fn finish_with_literals(self) -> (String, Vec<Range<usize>>) {
    (self.buf, self.literals)
  }

  /// Writes a token classified by its first and last characters. Also used for literal source text.
  pub fn write_str(&mut self, text: &str) {
    let (Some(first), Some(last)) = (text.chars().next(), text.chars().next_back()) else {
      return;
    };
    self.push(text, Edge::of(first), Edge::of(last));
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.push(keyword, Edge::Word, Edge::Word);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.push(identifier, Edge::Word, Edge::Word);
  }

  pub fn write_number(&mut self, number: &str) {
    // Numbers like `.5` or `1e3` join up with words on either side.
    self.push(number, Edge::Digit, Edge::Digit);
  }

  pub fn write_punct(&mut self, punct: &str) {
    self.write_str(punct);
  }

  pub fn write_comma(&mut self) {
    self.write_punct(",");
  }

  pub fn write_semicolon(&mut self) {
    self.write_punct(";");
  }

  /// Writes a complete string or regex literal.
  pub fn write_literal(&mut self, text: &str) {
    let (Some(first), Some(last)) = (text.chars().next(), text.chars().next_back()) else {
      return;
    };
    let start = self.push(text, Edge::of(first), Edge::of(last));
    self.record(start);
  }

  /// Writes source text copied as is, in which `literals` are the ranges of string tokens.
  pub fn write_verbatim(&mut self, text: &str, literals: &[Range<usize>]) {
    let (Some(first), Some(last)) = (text.chars().next(), text.chars().next_back()) else {
      return;
    };
    let start = self.push(text, Edge::of(first), Edge::of(last));
    if self.open_literals == 0 {
      self
        .literals
        .extend(literals.iter().map(|r| start + r.start..start + r.end));
    };
  }

  /// Starts a literal written in pieces, like a template with substitutions. Must be matched by `close_literal`.
  pub fn open_literal(&mut self, opener: &str) {
    let start = self.push(opener, Edge::Other, Edge::Other);
    if self.open_literals == 0 {
      self.open_start = start;
    };
    self.open_literals += 1;
  }

  pub fn close_literal(&mut self, closer: &str) {
    self.write_raw_str(closer);
    self.open_literals = self.open_literals.saturating_sub(1);
    if self.open_literals == 0 {
      self.literals.push(self.open_start..self.buf.len());
    };
  }

  /// Appends text with no spacing check, such as the inside of a template literal.
  pub fn write_raw_str(&mut self, text: &str) {
    self.buf.push_str(text);
    self.last = Edge::Other;
  }

  // Returns where `text` starts, after any separating space.
  fn push(&mut self, text: &str, first: Edge, last: Edge) -> usize {
    if text.is_empty() {
      return self.buf.len();
    };
    if self.last.clashes_with(first) || self.forms_html_comment(text) {
      self.buf.push(' ');
    };
    let start = self.buf.len();
    self.buf.push_str(text);
    self.last = last;
    start
  }

  fn record(&mut self, start: usize) {
    if self.open_literals == 0 {
      self.literals.push(start..self.buf.len());
    };
  }

  fn forms_html_comment(&self, next: &str) -> bool {
    HTML_COMMENTS.iter().any(|pat| {
      (1..pat.len()).any(|split| self.buf.ends_with(&pat[..split]) && next.starts_with(&pat[split..]))
    })
  }
}
