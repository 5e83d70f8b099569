// Non-ASCII characters are treated as identifier characters unless they're whitespace or line terminators, so the lexer never needs Unicode property tables.

pub fn is_line_terminator(c: char) -> bool {
  matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace other than line terminators.
pub fn is_whitespace(c: char) -> bool {
  matches!(
    c,
    '\t'
      | '\x0b'
      | '\x0c'
      | ' '
      | '\u{00A0}'
      | '\u{1680}'
      | '\u{2000}'..='\u{200A}'
      | '\u{202F}'
      | '\u{205F}'
      | '\u{3000}'
      | '\u{FEFF}'
  )
}

pub fn is_id_start(c: char) -> bool {
  match c {
    'a'..='z' | 'A'..='Z' | '$' | '_' => true,
    c => !c.is_ascii() && !is_whitespace(c) && !is_line_terminator(c),
  }
}

pub fn is_id_continue(c: char) -> bool {
  c.is_ascii_digit() || is_id_start(c)
}
