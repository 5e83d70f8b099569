/// Emits a string literal delimited by `quote` (`'` or `"`; anything else falls back to `"`).
///
/// Backslash, the delimiter and control characters are escaped; the other quote character is written as is. U+2028/U+2029 are always escaped as older engines treat them as line terminators.
pub fn emit_string_literal(out: &mut String, value: &str, quote: char) {
  let quote = if quote == '\'' { '\'' } else { '"' };
  out.reserve(value.len() + 2);
  out.push(quote);

  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{8}' => out.push_str("\\b"),
      '\u{c}' => out.push_str("\\f"),
      '\0' => {
        // `\0` followed by a digit would read as a legacy octal escape.
        if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      ch if ch == quote => {
        out.push('\\');
        out.push(ch);
      }
      ch if ch < '\u{20}' => out.push_str(&format!("\\x{:02X}", ch as u32)),
      ch => out.push(ch),
    }
  }

  out.push(quote);
}
