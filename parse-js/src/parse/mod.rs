use crate::ast::node::Node;
use crate::ast::stmt::TopLevel;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use std::collections::VecDeque;

mod cover;
mod decl;
mod expr;
mod literal;
mod member;
mod module;
mod stmt;
#[cfg(test)]
mod tests;

/// Grammar switches that depend on the enclosing function or statement. Copied and altered, never mutated in place.
#[derive(Clone, Copy, Debug)]
pub struct Ctx {
  // `await` is an operator inside async functions, and a plain identifier elsewhere.
  pub await_is_ident: bool,
  // Likewise for `yield` and generators.
  pub yield_is_ident: bool,
  // Set in the head of a `for`, where `in` ends the left side instead of being an operator.
  pub no_in: bool,
}

impl Ctx {
  pub fn script() -> Ctx {
    Ctx {
      await_is_ident: true,
      yield_is_ident: true,
      no_in: false,
    }
  }

  pub fn fn_body(async_: bool, generator: bool) -> Ctx {
    Ctx {
      await_is_ident: !async_,
      yield_is_ident: !generator,
      no_in: false,
    }
  }

  pub fn with_in(self) -> Ctx {
    Ctx {
      no_in: false,
      ..self
    }
  }

  pub fn without_in(self) -> Ctx {
    Ctx {
      no_in: true,
      ..self
    }
  }

  /// Whether a token of this type can name a binding or be referenced as a variable.
  pub fn is_binding_ident(self, typ: TT) -> bool {
    match typ {
      TT::Identifier => true,
      TT::KeywordAwait => self.await_is_ident,
      TT::KeywordYield => self.yield_is_ident,
      typ => typ.is_contextual_keyword(),
    }
  }
}

/// A recursive descent parser that pulls tokens from the lexer as it goes.
///
/// Slashes are lexed as division and closing braces as punctuators. When the grammar says otherwise, the parser discards its lookahead and asks the lexer to rescan from that position, so nothing is ever parsed twice.
pub struct Parser<'a> {
  lexer: Lexer<'a>,
  ahead: VecDeque<Token>,
  // End of the most recently consumed token.
  prev_end: usize,
}

// Parsing methods are spread over the submodules as further `impl` blocks on this type.
impl<'a> Parser<'a> {
  pub fn new(source: &'a str) -> Parser<'a> {
    Parser {
      lexer: Lexer::new(source),
      ahead: VecDeque::new(),
      prev_end: 0,
    }
  }

  pub fn top_level(&mut self) -> SyntaxResult<Node<TopLevel>> {
    let body = self.stmts(Ctx::script(), TT::EOF)?;
    self.expect(TT::EOF)?;
    let end = self.lexer.source().len();
    Ok(Node::new(Loc(0, end), TopLevel { body }))
  }

  pub(crate) fn text(&self, loc: Loc) -> &'a str {
    &self.lexer.source()[loc.0..loc.1]
  }

  pub(crate) fn peek_nth(&mut self, n: usize) -> Token {
    while self.ahead.len() <= n {
      let t = self.lexer.next_token();
      self.ahead.push_back(t);
    }
    self.ahead[n]
  }

  pub(crate) fn peek(&mut self) -> Token {
    self.peek_nth(0)
  }

  pub(crate) fn at(&mut self, typ: TT) -> bool {
    self.peek().typ == typ
  }

  pub(crate) fn bump(&mut self) -> Token {
    let t = self.peek();
    self.ahead.pop_front();
    self.prev_end = t.loc.1;
    t
  }

  pub(crate) fn eat(&mut self, typ: TT) -> bool {
    let matched = self.at(typ);
    if matched {
      self.bump();
    };
    matched
  }

  pub(crate) fn expect(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.peek();
    if t.typ != typ {
      return Err(t.error(SyntaxErrorType::RequiredTokenNotFound(typ)));
    };
    Ok(self.bump())
  }

  /// Ends a statement at `;`, or where a semicolon is inserted automatically: before a line break, a `}`, or the end of input.
  pub(crate) fn semicolon(&mut self) -> SyntaxResult<()> {
    let t = self.peek();
    match t.typ {
      TT::Semicolon => {
        self.bump();
        Ok(())
      }
      TT::BraceClose | TT::EOF => Ok(()),
      _ if t.newline_before => Ok(()),
      _ => Err(t.error(SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon))),
    }
  }

  pub(crate) fn loc_from(&self, start: usize) -> Loc {
    Loc(start, self.prev_end.max(start))
  }

  pub(crate) fn with_loc<S: Drive + DriveMut, F>(&mut self, f: F) -> SyntaxResult<Node<S>>
  where
    F: FnOnce(&mut Self) -> SyntaxResult<S>,
  {
    let start = self.peek().loc.0;
    let stx = f(self)?;
    Ok(Node::new(self.loc_from(start), stx))
  }

  /// Consumes the next token, which must be `/` or `/=`, as the start of a regular expression literal instead.
  pub(crate) fn relex_as_regex(&mut self) -> Token {
    let slash = self.peek();
    debug_assert!(matches!(slash.typ, TT::Slash | TT::SlashEquals));
    self.ahead.clear();
    let t = self.lexer.regex_at(slash.loc.0, slash.newline_before);
    self.prev_end = t.loc.1;
    t
  }

  /// Consumes the next token, which must be the `}` closing a template substitution, together with the template chunk that follows it.
  pub(crate) fn relex_template_continue(&mut self) -> SyntaxResult<Token> {
    let brace = self.expect(TT::BraceClose)?;
    self.ahead.clear();
    let t = self.lexer.template_continue_at(brace.loc.0);
    self.prev_end = t.loc.1;
    Ok(t)
  }
}
