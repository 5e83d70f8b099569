use crate::loc::Loc;
use crate::token::TT;
use std::error::Error;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

fn token_name(typ: TT) -> String {
  match typ.spelling() {
    Some(text) => format!("`{}`", text),
    None => format!("{:?}", typ),
  }
}

/// What went wrong. Each variant has a stable code from `PS0001` to `PS0010`, in declaration order.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SyntaxErrorType {
  ExpectedSyntax(&'static str),
  InvalidAssigmentTarget,
  InvalidCharacterEscape,
  LineTerminatorAfterArrowFunctionParameters,
  LineTerminatorAfterThrow,
  LineTerminatorInRegex,
  LineTerminatorInString,
  RequiredTokenNotFound(TT),
  TryStatementHasNoCatchOrFinally,
  UnexpectedEnd,
}

impl SyntaxErrorType {
  fn describe(&self) -> (&'static str, &'static str) {
    use SyntaxErrorType::*;
    match self {
      ExpectedSyntax(_) => ("PS0001", "expected"),
      InvalidAssigmentTarget => ("PS0002", "invalid assignment target"),
      InvalidCharacterEscape => ("PS0003", "invalid character escape"),
      LineTerminatorAfterArrowFunctionParameters => (
        "PS0004",
        "line terminator not allowed after arrow function parameters",
      ),
      LineTerminatorAfterThrow => ("PS0005", "line terminator not allowed after `throw`"),
      LineTerminatorInRegex => ("PS0006", "line terminator not allowed in regular expression"),
      LineTerminatorInString => ("PS0007", "line terminator not allowed in string literal"),
      RequiredTokenNotFound(_) => ("PS0008", "expected token"),
      TryStatementHasNoCatchOrFinally => ("PS0009", "try statement requires a catch or finally block"),
      UnexpectedEnd => ("PS0010", "unexpected end of input"),
    }
  }

  pub fn code(&self) -> &'static str {
    self.describe().0
  }

  pub fn message(&self, actual_token: Option<TT>) -> String {
    let text = self.describe().1;
    match (self, actual_token) {
      (SyntaxErrorType::ExpectedSyntax(what), _) => format!("{} {}", text, what),
      (SyntaxErrorType::RequiredTokenNotFound(want), Some(got)) => {
        format!("{} {} but found {}", text, token_name(*want), token_name(got))
      }
      (SyntaxErrorType::RequiredTokenNotFound(want), None) => format!("{} {}", text, token_name(*want)),
      (SyntaxErrorType::UnexpectedEnd, Some(got)) => format!("unexpected end before {}", token_name(got)),
      _ => text.to_string(),
    }
  }
}

/// A syntax error at `loc`, with the token found there if there was one.
#[derive(Clone)]
pub struct SyntaxError {
  pub typ: SyntaxErrorType,
  pub loc: Loc,
  pub actual_token: Option<TT>,
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

impl SyntaxError {
  pub fn new(typ: SyntaxErrorType, loc: Loc, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError {
      typ,
      loc,
      actual_token,
    }
  }

  pub fn message(&self) -> String {
    self.typ.message(self.actual_token)
  }

  /// 1-based line and column of the start of the error in `source`.
  pub fn line_column(&self, source: &str) -> (usize, usize) {
    self.loc.line_column(source)
  }
}

impl Display for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} [{}]", self.message(), self.typ.code())
  }
}

impl Debug for SyntaxError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{} at {}..{}", self, self.loc.0, self.loc.1)
  }
}

impl Error for SyntaxError {}

// Only the kind matters, so tests can compare against errors built with a dummy location.
impl PartialEq for SyntaxError {
  fn eq(&self, other: &Self) -> bool {
    self.typ == other.typ
  }
}

impl Eq for SyntaxError {}
