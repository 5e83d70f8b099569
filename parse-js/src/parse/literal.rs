use super::Ctx;
use super::Parser;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::lit::LitArrExpr;
use crate::ast::expr::lit::LitRegexExpr;
use crate::ast::expr::lit::LitStrExpr;
use crate::ast::expr::lit::LitTemplateExpr;
use crate::ast::expr::lit::LitTemplatePart;
use crate::ast::expr::Expr;
use crate::ast::expr::VerbatimExpr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;

/// Why a string literal's body could not be decoded.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StrDecodeError {
  /// A malformed `\x`, `\u`, or `\u{}` escape, at this byte offset into the body.
  InvalidEscape(usize),
  /// The decoded value contains an unpaired surrogate, which `String` can't hold.
  LoneSurrogate,
}

fn parse_hex(digits: Option<&str>) -> Option<u32> {
  let digits = digits?;
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
    return None;
  };
  u32::from_str_radix(digits, 16).ok()
}

/// Decodes the body of a string literal, without its quotes.
///
/// The value is built from UTF-16 code units, so an escaped surrogate pair like `\uD83D\uDE00` becomes one character.
pub fn decode_str_body(body: &str) -> Result<String, StrDecodeError> {
  fn push(units: &mut Vec<u16>, cp: u32) {
    match char::from_u32(cp) {
      Some(c) => {
        let mut buf = [0u16; 2];
        units.extend_from_slice(c.encode_utf16(&mut buf));
      }
      // Surrogates pair up, or fail, when the units are converted at the end.
      None => units.push(cp as u16),
    };
  }
  let mut units = Vec::<u16>::with_capacity(body.len());
  let bytes = body.as_bytes();
  let mut i = 0;
  while i < body.len() {
    let Some(c) = body[i..].chars().next() else {
      break;
    };
    if c != '\\' {
      push(&mut units, c as u32);
      i += c.len_utf8();
      continue;
    };
    let escape = i;
    let Some(e) = body[i + 1..].chars().next() else {
      return Err(StrDecodeError::InvalidEscape(escape));
    };
    i += 1 + e.len_utf8();
    match e {
      '\r' => {
        // `\` then CRLF continues the line like `\` then LF.
        if bytes.get(i) == Some(&b'\n') {
          i += 1;
        };
      }
      '\n' | '\u{2028}' | '\u{2029}' => {}
      'b' => units.push(0x08),
      'f' => units.push(0x0c),
      'n' => units.push(0x0a),
      'r' => units.push(0x0d),
      't' => units.push(0x09),
      'v' => units.push(0x0b),
      '0'..='7' => {
        // Legacy octal escapes stop at three digits or 0o377, whichever comes first.
        let mut value = e as u32 - '0' as u32;
        let limit = if e <= '3' { 2 } else { 1 };
        for _ in 0..limit {
          match bytes.get(i) {
            Some(&d @ b'0'..=b'7') => {
              value = value * 8 + (d - b'0') as u32;
              i += 1;
            }
            _ => break,
          };
        }
        units.push(value as u16);
      }
      'x' => {
        let cp = parse_hex(body.get(i..i + 2)).ok_or(StrDecodeError::InvalidEscape(escape))?;
        i += 2;
        units.push(cp as u16);
      }
      'u' if bytes.get(i) == Some(&b'{') => {
        let close = body[i..].find('}').ok_or(StrDecodeError::InvalidEscape(escape))?;
        let cp = parse_hex(body.get(i + 1..i + close))
          .filter(|&cp| cp <= 0x10FFFF)
          .ok_or(StrDecodeError::InvalidEscape(escape))?;
        i += close + 1;
        push(&mut units, cp);
      }
      'u' => {
        let cp = parse_hex(body.get(i..i + 4)).ok_or(StrDecodeError::InvalidEscape(escape))?;
        i += 4;
        push(&mut units, cp);
      }
      other => push(&mut units, other as u32),
    };
  }
  String::from_utf16(&units).map_err(|_| StrDecodeError::LoneSurrogate)
}

/// The raw text of a template chunk, without the opening backtick (if `opening`) and the closing backtick or `${`.
fn template_chunk(raw: &str, opening: bool, is_end: bool) -> &str {
  let start = opening as usize;
  let end = raw.len().saturating_sub(if is_end { 1 } else { 2 });
  &raw[start..end.max(start)]
}

impl<'a> Parser<'a> {
  pub(crate) fn lit_arr(&mut self, ctx: Ctx) -> SyntaxResult<Node<LitArrExpr>> {
    self.with_loc(|p| {
      p.expect(TT::BracketOpen)?;
      let mut elements = Vec::new();
      loop {
        if p.eat(TT::Comma) {
          elements.push(LitArrElem::Empty);
          continue;
        };
        if p.at(TT::BracketClose) {
          break;
        };
        let element = if p.eat(TT::DotDotDot) {
          LitArrElem::Rest(p.assignment(ctx.with_in())?)
        } else {
          LitArrElem::Single(p.assignment(ctx.with_in())?)
        };
        elements.push(element);
        if !p.eat(TT::Comma) {
          break;
        };
      }
      p.expect(TT::BracketClose)?;
      Ok(LitArrExpr { elements })
    })
  }

  /// Consumes a regular expression literal where the lexer saw `/` or `/=`.
  pub(crate) fn lit_regex(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.relex_as_regex();
    if t.typ != TT::LiteralRegex {
      return Err(t.error(SyntaxErrorType::LineTerminatorInRegex));
    };
    Ok(
      Node::new(t.loc, LitRegexExpr {
        value: self.text(t.loc).to_string(),
      })
      .into_wrapped(),
    )
  }

  /// Parses a string literal into its decoded value. A value that `String` can't represent is kept as verbatim source text.
  pub(crate) fn lit_str(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.expect(TT::LiteralString)?;
    let raw = self.text(t.loc);
    let quote = if raw.starts_with('\'') { '\'' } else { '"' };
    match decode_str_body(&raw[1..raw.len() - 1]) {
      Ok(value) => Ok(Node::new(t.loc, LitStrExpr { value, quote }).into_wrapped()),
      Err(StrDecodeError::LoneSurrogate) => Ok(
        Node::new(t.loc, VerbatimExpr {
          text: raw.to_string(),
        })
        .into_wrapped(),
      ),
      Err(StrDecodeError::InvalidEscape(offset)) => {
        let at = t.loc.0 + 1 + offset;
        Err(Loc(at, at + 2).error(
          SyntaxErrorType::InvalidCharacterEscape,
          Some(TT::LiteralString),
        ))
      }
    }
  }

  pub(crate) fn lit_template(&mut self, ctx: Ctx) -> SyntaxResult<Node<LitTemplateExpr>> {
    let first = self.bump();
    let parts = self.template_parts(ctx, first)?;
    Ok(Node::new(self.loc_from(first.loc.0), LitTemplateExpr { parts }))
  }

  /// Parses the rest of a template whose opening chunk `first` was just consumed. Chunks stay as raw source, so escapes only valid in tagged templates survive as written.
  pub(crate) fn template_parts(
    &mut self,
    ctx: Ctx,
    first: Token,
  ) -> SyntaxResult<Vec<LitTemplatePart>> {
    let mut is_end = match first.typ {
      TT::LiteralTemplatePartString => false,
      TT::LiteralTemplatePartStringEnd => true,
      TT::Invalid => return Err(first.error(SyntaxErrorType::UnexpectedEnd)),
      _ => return Err(first.error(SyntaxErrorType::ExpectedSyntax("template string part"))),
    };
    let chunk = template_chunk(self.text(first.loc), true, is_end);
    let mut parts = vec![LitTemplatePart::String(chunk.to_string())];
    while !is_end {
      parts.push(LitTemplatePart::Substitution(self.expression(ctx.with_in())?));
      let t = self.relex_template_continue()?;
      is_end = match t.typ {
        TT::LiteralTemplatePartString => false,
        TT::LiteralTemplatePartStringEnd => true,
        _ => {
          return Err(Loc(t.loc.1, t.loc.1).error(
            SyntaxErrorType::UnexpectedEnd,
            Some(TT::LiteralTemplatePartString),
          ))
        }
      };
      let chunk = template_chunk(self.text(t.loc), false, is_end);
      parts.push(LitTemplatePart::String(chunk.to_string()));
    }
    Ok(parts)
  }
}
