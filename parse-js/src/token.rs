use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::loc::Loc;
use ahash::HashMap;
use once_cell::sync::Lazy;
use serde::Serialize;

macro_rules! token_types {
  (
    special { $($special:ident,)* }
    punctuators { $($punct:ident = $punct_text:literal,)* }
    keywords { $($kw:ident = $kw_text:literal,)* }
  ) => {
    #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
    pub enum TT {
      $($special,)*
      $($punct,)*
      $($kw,)*
    }

    /// Every fixed punctuator and its spelling.
    pub static PUNCTUATORS: &[(TT, &str)] = &[$((TT::$punct, $punct_text),)*];

    /// Every word the lexer produces a dedicated token for, including contextual keywords and the literal words `true`, `false` and `null`.
    pub static KEYWORDS: &[(TT, &str)] = &[$((TT::$kw, $kw_text),)*];

    impl TT {
      pub fn spelling(self) -> Option<&'static str> {
        match self {
          $(TT::$punct => Some($punct_text),)*
          $(TT::$kw => Some($kw_text),)*
          _ => None,
        }
      }

      /// Whether this is a word token, which is also a valid property name.
      pub fn is_keyword(self) -> bool {
        matches!(self, $(TT::$kw)|*)
      }
    }
  };
}

token_types! {
  special {
    // End of input.
    EOF,
    // Source the lexer could not make a token of. Reported by the parser once it's consumed.
    Invalid,
    Identifier,
    LiteralBigInt,
    LiteralNumber,
    LiteralRegex,
    LiteralString,
    // A template chunk that ends with `${`.
    LiteralTemplatePartString,
    // A template chunk that ends with the closing backtick.
    LiteralTemplatePartStringEnd,
    PrivateMember,
  }
  punctuators {
    Ampersand = "&",
    AmpersandAmpersand = "&&",
    AmpersandAmpersandEquals = "&&=",
    AmpersandEquals = "&=",
    Asterisk = "*",
    AsteriskAsterisk = "**",
    AsteriskAsteriskEquals = "**=",
    AsteriskEquals = "*=",
    Bar = "|",
    BarBar = "||",
    BarBarEquals = "||=",
    BarEquals = "|=",
    BraceClose = "}",
    BraceOpen = "{",
    BracketClose = "]",
    BracketOpen = "[",
    Caret = "^",
    CaretEquals = "^=",
    ChevronLeft = "<",
    ChevronLeftChevronLeft = "<<",
    ChevronLeftChevronLeftEquals = "<<=",
    ChevronLeftEquals = "<=",
    ChevronRight = ">",
    ChevronRightChevronRight = ">>",
    ChevronRightChevronRightChevronRight = ">>>",
    ChevronRightChevronRightChevronRightEquals = ">>>=",
    ChevronRightChevronRightEquals = ">>=",
    ChevronRightEquals = ">=",
    Colon = ":",
    Comma = ",",
    Dot = ".",
    DotDotDot = "...",
    Equals = "=",
    EqualsChevronRight = "=>",
    EqualsEquals = "==",
    EqualsEqualsEquals = "===",
    Exclamation = "!",
    ExclamationEquals = "!=",
    ExclamationEqualsEquals = "!==",
    Hyphen = "-",
    HyphenEquals = "-=",
    HyphenHyphen = "--",
    ParenthesisClose = ")",
    ParenthesisOpen = "(",
    Percent = "%",
    PercentEquals = "%=",
    Plus = "+",
    PlusEquals = "+=",
    PlusPlus = "++",
    Question = "?",
    QuestionDot = "?.",
    QuestionDotBracketOpen = "?.[",
    QuestionDotParenthesisOpen = "?.(",
    QuestionQuestion = "??",
    QuestionQuestionEquals = "??=",
    Semicolon = ";",
    Slash = "/",
    SlashEquals = "/=",
    Tilde = "~",
  }
  keywords {
    KeywordAs = "as",
    KeywordAsync = "async",
    KeywordAwait = "await",
    KeywordBreak = "break",
    KeywordCase = "case",
    KeywordCatch = "catch",
    KeywordClass = "class",
    KeywordConst = "const",
    KeywordContinue = "continue",
    KeywordDebugger = "debugger",
    KeywordDefault = "default",
    KeywordDelete = "delete",
    KeywordDo = "do",
    KeywordElse = "else",
    KeywordEnum = "enum",
    KeywordExport = "export",
    KeywordExtends = "extends",
    KeywordFinally = "finally",
    KeywordFor = "for",
    KeywordFrom = "from",
    KeywordFunction = "function",
    KeywordGet = "get",
    KeywordIf = "if",
    KeywordImport = "import",
    KeywordIn = "in",
    KeywordInstanceof = "instanceof",
    KeywordLet = "let",
    KeywordNew = "new",
    KeywordOf = "of",
    KeywordReturn = "return",
    KeywordSet = "set",
    KeywordStatic = "static",
    KeywordSuper = "super",
    KeywordSwitch = "switch",
    KeywordThis = "this",
    KeywordThrow = "throw",
    KeywordTry = "try",
    KeywordTypeof = "typeof",
    KeywordVar = "var",
    KeywordVoid = "void",
    KeywordWhile = "while",
    KeywordWith = "with",
    KeywordYield = "yield",
    LiteralFalse = "false",
    LiteralNull = "null",
    LiteralTrue = "true",
  }
}

impl TT {
  /// Keywords that only have meaning in certain positions, and otherwise name a variable.
  pub fn is_contextual_keyword(self) -> bool {
    matches!(
      self,
      TT::KeywordAs
        | TT::KeywordAsync
        | TT::KeywordFrom
        | TT::KeywordGet
        | TT::KeywordLet
        | TT::KeywordOf
        | TT::KeywordSet
        | TT::KeywordStatic
    )
  }
}

static KEYWORD_LOOKUP: Lazy<HashMap<&'static str, TT>> =
  Lazy::new(|| KEYWORDS.iter().map(|&(tt, text)| (text, tt)).collect());

/// The token type of an identifier-like word, which is `Identifier` unless it's a keyword.
pub fn word_type(word: &str) -> TT {
  KEYWORD_LOOKUP.get(word).copied().unwrap_or(TT::Identifier)
}

#[derive(Clone, Copy, Debug)]
pub struct Token {
  pub loc: Loc,
  // Whether a line terminator appears between the previous token and this one, including inside a multiline comment.
  pub newline_before: bool,
  pub typ: TT,
}

impl Token {
  pub fn error(&self, typ: SyntaxErrorType) -> SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}

#[cfg(test)]
mod tests {
  use super::word_type;
  use super::TT;

  #[test]
  fn words() {
    assert_eq!(word_type("instanceof"), TT::KeywordInstanceof);
    assert_eq!(word_type("null"), TT::LiteralNull);
    assert_eq!(word_type("nulls"), TT::Identifier);
    assert!(TT::KeywordOf.is_contextual_keyword());
    assert!(!TT::KeywordIn.is_contextual_keyword());
    assert_eq!(TT::QuestionDotBracketOpen.spelling(), Some("?.["));
    assert!(TT::LiteralTrue.is_keyword());
    assert!(!TT::Identifier.is_keyword());
  }
}
