use parse_js::error::SyntaxError;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// Why a compilation unit produced no output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompressError {
  /// The source is not valid JavaScript. `line` and `column` are 1-based.
  Parse {
    message: String,
    line: usize,
    column: usize,
    code: &'static str,
  },
  /// The generated code broke an invariant of a later pipeline step.
  Internal { message: String },
}

impl CompressError {
  pub(crate) fn from_syntax(err: &SyntaxError, source: &str) -> CompressError {
    let (line, column) = err.line_column(source);
    CompressError::Parse {
      message: err.message(),
      line,
      column,
      code: err.typ.code(),
    }
  }

  pub(crate) fn internal(message: impl Into<String>) -> CompressError {
    CompressError::Internal {
      message: message.into(),
    }
  }
}

impl Display for CompressError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      CompressError::Parse {
        message,
        line,
        column,
        code,
      } => write!(f, "{}:{}:{} [{}]", line, column, message, code),
      CompressError::Internal { message } => write!(f, "internal error: {}", message),
    }
  }
}

impl Error for CompressError {}
