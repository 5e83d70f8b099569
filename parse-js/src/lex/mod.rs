use crate::char::is_id_continue;
use crate::char::is_id_start;
use crate::char::is_line_terminator;
use crate::char::is_whitespace;
use crate::loc::Loc;
use crate::token::word_type;
use crate::token::Token;
use crate::token::PUNCTUATORS;
use crate::token::TT;
use aho_corasick::AhoCorasick;
use aho_corasick::Anchored;
use aho_corasick::Input;
use aho_corasick::MatchKind;
use aho_corasick::StartKind;
use memchr::memchr2;
use memchr::memmem;
use once_cell::sync::Lazy;

#[cfg(test)]
mod tests;

static PUNCTUATOR_MATCHER: Lazy<AhoCorasick> = Lazy::new(|| {
  AhoCorasick::builder()
    .match_kind(MatchKind::LeftmostLongest)
    .start_kind(StartKind::Anchored)
    .build(PUNCTUATORS.iter().map(|(_, text)| text))
    .expect("punctuator patterns are valid")
});

/// Splits source code into tokens on demand.
///
/// The lexer has no knowledge of syntax, so it can't tell a regular expression or the continuation of a template from other tokens. The parser asks for those explicitly with `regex_at` and `template_continue_at` once it knows what to expect.
pub struct Lexer<'a> {
  source: &'a str,
  pos: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, pos: 0 }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  fn rest(&self) -> &'a str {
    &self.source[self.pos..]
  }

  fn peek_char(&self) -> Option<char> {
    self.rest().chars().next()
  }

  fn peek_byte(&self, ahead: usize) -> Option<u8> {
    self.source.as_bytes().get(self.pos + ahead).copied()
  }

  fn bump_char(&mut self) -> Option<char> {
    let c = self.peek_char()?;
    self.pos += c.len_utf8();
    Some(c)
  }

  fn eat_byte(&mut self, b: u8) -> bool {
    let matched = self.peek_byte(0) == Some(b);
    if matched {
      self.pos += 1;
    };
    matched
  }

  fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
    let start = self.pos;
    while self.peek_char().is_some_and(&pred) {
      self.bump_char();
    }
    self.pos - start
  }

  fn token(&self, start: usize, typ: TT, newline_before: bool) -> Token {
    Token {
      loc: Loc(start, self.pos),
      newline_before,
      typ,
    }
  }

  /// Skips whitespace and comments, returning whether a line terminator was passed.
  fn skip_trivia(&mut self) -> bool {
    let mut newline = false;
    loop {
      let rest = self.rest();
      let Some(c) = rest.chars().next() else {
        return newline;
      };
      if is_line_terminator(c) {
        newline = true;
        self.pos += c.len_utf8();
      } else if is_whitespace(c) {
        self.pos += c.len_utf8();
      } else if rest.starts_with("/*") {
        let body = &rest[2..];
        let len = memmem::find(body.as_bytes(), b"*/").map_or(body.len(), |end| end + 2);
        newline |= body[..len].chars().any(is_line_terminator);
        self.pos += 2 + len;
      } else if rest.starts_with("//")
        || rest.starts_with("<!--")
        // `-->` opens a comment only as the first thing on a line.
        || (rest.starts_with("-->") && (newline || self.pos == 0))
      {
        self.pos += memchr2(b'\n', b'\r', rest.as_bytes()).unwrap_or(rest.len());
      } else {
        return newline;
      };
    }
  }

  /// Lexes the next token, treating `/` as division and `}` as a plain brace.
  pub fn next_token(&mut self) -> Token {
    let newline = self.skip_trivia();
    let start = self.pos;
    let Some(c) = self.peek_char() else {
      return self.token(start, TT::EOF, newline);
    };
    let typ = match c {
      '0'..='9' => self.number(),
      '.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => self.number(),
      '\'' | '"' => self.string(),
      '`' => {
        self.pos += 1;
        self.template_chunk()
      }
      '#' => self.private_name(),
      c if c == '\\' || is_id_start(c) => self.word(),
      _ => self.punctuator(),
    };
    self.token(start, typ, newline)
  }

  /// Lexes a regular expression literal starting at `start`, which must be the position of a `/`.
  pub fn regex_at(&mut self, start: usize, newline_before: bool) -> Token {
    self.pos = start + 1;
    let typ = self.regex_body();
    self.token(start, typ, newline_before)
  }

  /// Lexes the template chunk that follows the `}` of a substitution at `brace`. The token starts after the brace.
  pub fn template_continue_at(&mut self, brace: usize) -> Token {
    self.pos = brace + 1;
    let start = self.pos;
    let typ = self.template_chunk();
    self.token(start, typ, false)
  }

  fn punctuator(&mut self) -> TT {
    let found = PUNCTUATOR_MATCHER.find(Input::new(self.rest()).anchored(Anchored::Yes));
    let Some(m) = found else {
      self.bump_char();
      return TT::Invalid;
    };
    let (typ, _) = PUNCTUATORS[m.pattern().as_usize()];
    // `a?.5:b` is a conditional, not optional chaining.
    if typ == TT::QuestionDot && self.peek_byte(2).is_some_and(|b| b.is_ascii_digit()) {
      self.pos += 1;
      return TT::Question;
    };
    self.pos += m.end();
    typ
  }

  fn unicode_escape(&mut self) -> bool {
    if !self.rest().starts_with("\\u") {
      return false;
    };
    self.pos += 2;
    if self.eat_byte(b'{') {
      self.eat_while(|c| c.is_ascii_hexdigit()) > 0 && self.eat_byte(b'}')
    } else {
      let hex = self.rest().bytes().take(4).take_while(u8::is_ascii_hexdigit).count();
      self.pos += hex;
      hex == 4
    }
  }

  fn word(&mut self) -> TT {
    let start = self.pos;
    let mut escaped = false;
    loop {
      match self.peek_char() {
        Some('\\') => {
          if !self.unicode_escape() {
            return TT::Invalid;
          };
          escaped = true;
        }
        Some(c) if is_id_continue(c) => self.pos += c.len_utf8(),
        _ => break,
      };
    }
    // An escaped keyword is never that keyword.
    if escaped {
      TT::Identifier
    } else {
      word_type(&self.source[start..self.pos])
    }
  }

  fn private_name(&mut self) -> TT {
    self.pos += 1;
    match self.peek_char() {
      Some(c) if c == '\\' || is_id_start(c) => match self.word() {
        TT::Invalid => TT::Invalid,
        _ => TT::PrivateMember,
      },
      _ => TT::Invalid,
    }
  }

  fn digits(&mut self, radix: u32) -> usize {
    self.eat_while(|c| c == '_' || c.is_digit(radix))
  }

  fn number(&mut self) -> TT {
    let radix = match self.rest().as_bytes() {
      [b'0', b'x' | b'X', ..] => Some(16),
      [b'0', b'o' | b'O', ..] => Some(8),
      [b'0', b'b' | b'B', ..] => Some(2),
      _ => None,
    };
    if let Some(radix) = radix {
      self.pos += 2;
      if self.digits(radix) == 0 {
        return TT::Invalid;
      };
      return if self.eat_byte(b'n') {
        TT::LiteralBigInt
      } else {
        TT::LiteralNumber
      };
    };

    let start = self.pos;
    let integer_len = self.digits(10);
    let integer = &self.source[start..self.pos];
    if integer_len > 0 && self.eat_byte(b'n') {
      return TT::LiteralBigInt;
    };
    // Legacy octals like `017` can't have a fraction, so `017.5` is `017` then `.5`.
    let legacy_octal = integer.len() > 1
      && integer.starts_with('0')
      && integer.bytes().all(|b| (b'0'..=b'7').contains(&b));
    if !legacy_octal && self.eat_byte(b'.') {
      self.digits(10);
    };
    if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
      self.pos += 1;
      if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
        self.pos += 1;
      };
      if self.digits(10) == 0 {
        return TT::Invalid;
      };
    };
    TT::LiteralNumber
  }

  fn string(&mut self) -> TT {
    let quote = self.source.as_bytes()[self.pos];
    self.pos += 1;
    loop {
      let Some(c) = self.bump_char() else {
        return TT::Invalid;
      };
      match c {
        '\\' => match self.bump_char() {
          // `\` followed by CRLF is a single line continuation.
          Some('\r') => {
            self.eat_byte(b'\n');
          }
          Some(_) => {}
          None => return TT::Invalid,
        },
        '\n' | '\r' => return TT::Invalid,
        c if c as u32 == quote as u32 => return TT::LiteralString,
        _ => {}
      };
    }
  }

  /// Scans template chunk text up to and including the closing backtick or `${`.
  fn template_chunk(&mut self) -> TT {
    loop {
      match self.bump_char() {
        None => return TT::Invalid,
        Some('\\') => {
          if self.bump_char().is_none() {
            return TT::Invalid;
          };
        }
        Some('`') => return TT::LiteralTemplatePartStringEnd,
        Some('$') if self.eat_byte(b'{') => return TT::LiteralTemplatePartString,
        Some(_) => {}
      };
    }
  }

  fn regex_body(&mut self) -> TT {
    let mut in_class = false;
    loop {
      match self.bump_char() {
        None => return TT::Invalid,
        Some(c) if is_line_terminator(c) => return TT::Invalid,
        Some('\\') => match self.bump_char() {
          Some(c) if !is_line_terminator(c) => {}
          _ => return TT::Invalid,
        },
        Some('[') => in_class = true,
        Some(']') => in_class = false,
        Some('/') if !in_class => break,
        Some(_) => {}
      };
    }
    self.eat_while(is_id_continue);
    TT::LiteralRegex
  }
}
