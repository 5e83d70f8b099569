use crate::lex::Lexer;
use crate::token::TT;
use crate::token::TT::*;

fn types(code: &str) -> Vec<TT> {
  let mut lexer = Lexer::new(code);
  let mut out = Vec::new();
  loop {
    let t = lexer.next_token();
    if t.typ == EOF {
      return out;
    };
    out.push(t.typ);
  }
}

fn check(code: &str, expected: &[TT]) {
  assert_eq!(types(code), expected, "lexing {:?}", code);
}

#[test]
fn test_lex_keywords() {
  check("class", &[KeywordClass]);
  check("instanceof", &[KeywordInstanceof]);
  check("classy", &[Identifier]);
  check("var$", &[Identifier]);
  check("\\u0076ar", &[Identifier]);
}

#[test]
fn test_lex_identifiers() {
  check("h929", &[Identifier]);
  check("_$x", &[Identifier]);
  check("caf\\u00e9", &[Identifier]);
  check("\\u{61}b", &[Identifier]);
  check("été", &[Identifier]);
  check("a\\u00", &[Invalid]);
}

#[test]
fn test_lex_literal_numbers() {
  check("1", &[LiteralNumber]);
  check(".929", &[LiteralNumber]);
  check(". 929", &[Dot, LiteralNumber]);
  check(".929.2..", &[LiteralNumber, LiteralNumber, Dot, Dot]);
  check("?.929", &[Question, LiteralNumber]);
  check("?..929", &[QuestionDot, LiteralNumber]);
  check("?...929", &[QuestionDot, Dot, LiteralNumber]);
  check("1e10 1.5E-3 0xFF 1_000", &[LiteralNumber; 4]);
  check("1..toString", &[LiteralNumber, Dot, Identifier]);
  check("017.5", &[LiteralNumber, LiteralNumber]);
  check("1e", &[Invalid]);
  check("0x", &[Invalid]);
}

#[test]
fn test_lex_literal_bigints() {
  check("929n 0x800faceb00cn 0b110101010n 0o12077n", &[LiteralBigInt; 4]);
}

#[test]
fn test_lex_literal_strings() {
  check("'hello world'", &[LiteralString]);
  check("\"it's\"", &[LiteralString]);
  check("'a\\'b'", &[LiteralString]);
  check("'line\\\ncontinued'", &[LiteralString]);
  check("'crlf\\\r\ncontinued'", &[LiteralString]);
  check("'hello world\n'", &[Invalid, Invalid]);
}

#[test]
fn test_lex_slash_is_always_division() {
  check("/ab+c/gi", &[Slash, Identifier, Plus, Identifier, Slash, Identifier]);
  check("a /= 2", &[Identifier, SlashEquals, LiteralNumber]);
}

#[test]
fn test_lex_regex_on_request() {
  let source = "x = /[/]a\\/b/gi;";
  let mut lexer = Lexer::new(source);
  lexer.next_token();
  lexer.next_token();
  let slash = lexer.next_token();
  assert_eq!(slash.typ, Slash);
  let regex = lexer.regex_at(slash.loc.0, slash.newline_before);
  assert_eq!(regex.typ, LiteralRegex);
  assert_eq!(&source[regex.loc.0..regex.loc.1], "/[/]a\\/b/gi");
  assert_eq!(lexer.next_token().typ, Semicolon);

  let mut lexer = Lexer::new("/a\n/");
  assert_eq!(lexer.regex_at(0, false).typ, Invalid);
}

#[test]
fn test_lex_templates() {
  check("`plain`", &[LiteralTemplatePartStringEnd]);
  check("`a${", &[LiteralTemplatePartString]);
  check("`a\\`b`", &[LiteralTemplatePartStringEnd]);
  check("`open", &[Invalid]);

  let source = "`a${b}c\\`${d}e`";
  let mut lexer = Lexer::new(source);
  assert_eq!(lexer.next_token().typ, LiteralTemplatePartString);
  assert_eq!(lexer.next_token().typ, Identifier);
  let brace = lexer.next_token();
  assert_eq!(brace.typ, BraceClose);
  let chunk = lexer.template_continue_at(brace.loc.0);
  assert_eq!(chunk.typ, LiteralTemplatePartString);
  assert_eq!(&source[chunk.loc.0..chunk.loc.1], "c\\`${");
  assert_eq!(lexer.next_token().typ, Identifier);
  let brace = lexer.next_token();
  let chunk = lexer.template_continue_at(brace.loc.0);
  assert_eq!(chunk.typ, LiteralTemplatePartStringEnd);
  assert_eq!(lexer.next_token().typ, EOF);
}

#[test]
fn test_lex_skips_comments() {
  check("a /* x */ b // y\nc", &[Identifier, Identifier, Identifier]);
  check("/*! keep */x", &[Identifier]);
  check("<!-- html\nx", &[Identifier]);
  check("--> html\nx", &[Identifier]);
  check("a --> b", &[Identifier, HyphenHyphen, ChevronRight, Identifier]);
  check("x /* open", &[Identifier]);
}

#[test]
fn test_lex_newline_flag() {
  let mut lexer = Lexer::new("a /*\n*/ b\nc d // e\r\nf");
  let flags: Vec<bool> = (0..5).map(|_| lexer.next_token().newline_before).collect();
  assert_eq!(flags, vec![false, true, true, false, true]);
}

#[test]
fn test_lex_operators() {
  check(
    "a >>>= b ?? c?.d",
    &[
      Identifier,
      ChevronRightChevronRightChevronRightEquals,
      Identifier,
      QuestionQuestion,
      Identifier,
      QuestionDot,
      Identifier,
    ],
  );
  check("x?.[0]?.(1)", &[
    Identifier,
    QuestionDotBracketOpen,
    LiteralNumber,
    BracketClose,
    QuestionDotParenthesisOpen,
    LiteralNumber,
    ParenthesisClose,
  ]);
  check("#priv #", &[PrivateMember, Invalid]);
  check("@", &[Invalid]);
}

#[test]
fn test_lex_locations() {
  let mut lexer = Lexer::new("  foo\t+= 'x'");
  let t = lexer.next_token();
  assert_eq!((t.loc.0, t.loc.1), (2, 5));
  let t = lexer.next_token();
  assert_eq!((t.loc.0, t.loc.1), (6, 8));
  let t = lexer.next_token();
  assert_eq!((t.loc.0, t.loc.1), (9, 12));
  let t = lexer.next_token();
  assert_eq!((t.typ, t.loc.0, t.loc.1), (EOF, 12, 12));
}
