mod expr;
mod stmt;

use super::Parser;
use crate::token::TT;

#[test]
fn test_parser() {
  let mut p = Parser::new("x = /a/ / 1");
  assert_eq!(p.peek().typ, TT::Identifier);
  assert_eq!(p.peek_nth(1).typ, TT::Equals);
  // Lookahead doesn't consume.
  assert_eq!(p.bump().typ, TT::Identifier);
  assert!(p.eat(TT::Equals));
  assert!(!p.eat(TT::Equals));

  // The slash was lexed as division until the parser asked for a regex.
  assert_eq!(p.peek().typ, TT::Slash);
  let regex = p.relex_as_regex();
  assert_eq!(regex.typ, TT::LiteralRegex);
  assert_eq!(p.text(regex.loc), "/a/");
  assert_eq!(p.bump().typ, TT::Slash);
  assert_eq!(p.bump().typ, TT::LiteralNumber);
  assert_eq!(p.peek().typ, TT::EOF);
  assert_eq!(p.loc_from(0).1, 11);
}

#[test]
fn test_template_continues_after_substitution() {
  let mut p = Parser::new("`a${b}c`");
  assert_eq!(p.bump().typ, TT::LiteralTemplatePartString);
  assert_eq!(p.bump().typ, TT::Identifier);
  assert_eq!(p.peek().typ, TT::BraceClose);
  let t = p.relex_template_continue().unwrap();
  assert_eq!(t.typ, TT::LiteralTemplatePartStringEnd);
  assert_eq!(p.text(t.loc), "}c`");
}
