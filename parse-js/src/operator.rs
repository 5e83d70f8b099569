use crate::operator::OperatorName::*;
use crate::token::TT;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize)]
pub enum OperatorName {
  Addition,
  Assignment,
  AssignmentAddition,
  AssignmentBitwiseAnd,
  AssignmentBitwiseLeftShift,
  AssignmentBitwiseOr,
  AssignmentBitwiseRightShift,
  AssignmentBitwiseUnsignedRightShift,
  AssignmentBitwiseXor,
  AssignmentDivision,
  AssignmentExponentiation,
  AssignmentLogicalAnd,
  AssignmentLogicalOr,
  AssignmentMultiplication,
  AssignmentNullishCoalescing,
  AssignmentRemainder,
  AssignmentSubtraction,
  Await,
  BitwiseAnd,
  BitwiseLeftShift,
  BitwiseNot,
  BitwiseOr,
  BitwiseRightShift,
  BitwiseUnsignedRightShift,
  BitwiseXor,
  Call,
  Comma,
  ComputedMemberAccess,
  Conditional,
  // The alternate of a conditional, which can hold an assignment but not a comma.
  ConditionalAlternate,
  Delete,
  Division,
  Equality,
  Exponentiation,
  GreaterThan,
  GreaterThanOrEqual,
  In,
  Inequality,
  Instanceof,
  LessThan,
  LessThanOrEqual,
  LogicalAnd,
  LogicalNot,
  LogicalOr,
  MemberAccess,
  Multiplication,
  New,
  NullishCoalescing,
  OptionalChainingMemberAccess,
  OptionalChainingComputedMemberAccess,
  OptionalChainingCall,
  PostfixDecrement,
  PostfixIncrement,
  PrefixDecrement,
  PrefixIncrement,
  Remainder,
  StrictEquality,
  StrictInequality,
  Subtraction,
  Typeof,
  UnaryNegation,
  UnaryPlus,
  Void,
  Yield,
  YieldDelegated,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Associativity {
  Left,
  Right,
}

impl OperatorName {
  /// Binding strength, from 18 for member access and calls down to 1 for the comma.
  pub fn precedence(self) -> u8 {
    match self {
      MemberAccess
      | ComputedMemberAccess
      | Call
      | New
      | OptionalChainingMemberAccess
      | OptionalChainingComputedMemberAccess
      | OptionalChainingCall => 18,
      PostfixIncrement | PostfixDecrement => 17,
      LogicalNot | BitwiseNot | UnaryPlus | UnaryNegation | PrefixIncrement | PrefixDecrement
      | Typeof | Void | Delete | Await => 16,
      Exponentiation => 15,
      Multiplication | Division | Remainder => 14,
      Addition | Subtraction => 13,
      BitwiseLeftShift | BitwiseRightShift | BitwiseUnsignedRightShift => 12,
      LessThan | LessThanOrEqual | GreaterThan | GreaterThanOrEqual | In | Instanceof => 11,
      Equality | Inequality | StrictEquality | StrictInequality => 10,
      BitwiseAnd => 9,
      BitwiseXor => 8,
      BitwiseOr => 7,
      LogicalAnd => 6,
      LogicalOr | NullishCoalescing => 5,
      Conditional => 4,
      Yield | YieldDelegated => 3,
      op if op.is_assignment() => 3,
      ConditionalAlternate => 2,
      _ => 1,
    }
  }

  pub fn associativity(self) -> Associativity {
    match self.precedence() {
      // Prefix operators, `**`, the conditional and assignments group to the right.
      16 | 15 | 4 | 3 | 2 => Associativity::Right,
      18 if self == New => Associativity::Right,
      _ => Associativity::Left,
    }
  }

  pub fn is_assignment(self) -> bool {
    matches!(
      self,
      Assignment
        | AssignmentAddition
        | AssignmentBitwiseAnd
        | AssignmentBitwiseLeftShift
        | AssignmentBitwiseOr
        | AssignmentBitwiseRightShift
        | AssignmentBitwiseUnsignedRightShift
        | AssignmentBitwiseXor
        | AssignmentDivision
        | AssignmentExponentiation
        | AssignmentLogicalAnd
        | AssignmentLogicalOr
        | AssignmentMultiplication
        | AssignmentNullishCoalescing
        | AssignmentRemainder
        | AssignmentSubtraction
    )
  }

  /// Source spelling of the operator. Member access, call and conditional operators have no single spelling and return an empty string.
  pub fn syntax(self) -> &'static str {
    match self {
      Addition | UnaryPlus => "+",
      Assignment => "=",
      AssignmentAddition => "+=",
      AssignmentBitwiseAnd => "&=",
      AssignmentBitwiseLeftShift => "<<=",
      AssignmentBitwiseOr => "|=",
      AssignmentBitwiseRightShift => ">>=",
      AssignmentBitwiseUnsignedRightShift => ">>>=",
      AssignmentBitwiseXor => "^=",
      AssignmentDivision => "/=",
      AssignmentExponentiation => "**=",
      AssignmentLogicalAnd => "&&=",
      AssignmentLogicalOr => "||=",
      AssignmentMultiplication => "*=",
      AssignmentNullishCoalescing => "??=",
      AssignmentRemainder => "%=",
      AssignmentSubtraction => "-=",
      Await => "await",
      BitwiseAnd => "&",
      BitwiseLeftShift => "<<",
      BitwiseNot => "~",
      BitwiseOr => "|",
      BitwiseRightShift => ">>",
      BitwiseUnsignedRightShift => ">>>",
      BitwiseXor => "^",
      Comma => ",",
      Delete => "delete",
      Division => "/",
      Equality => "==",
      Exponentiation => "**",
      GreaterThan => ">",
      GreaterThanOrEqual => ">=",
      In => "in",
      Inequality => "!=",
      Instanceof => "instanceof",
      LessThan => "<",
      LessThanOrEqual => "<=",
      LogicalAnd => "&&",
      LogicalNot => "!",
      LogicalOr => "||",
      Multiplication => "*",
      New => "new",
      NullishCoalescing => "??",
      PostfixDecrement | PrefixDecrement => "--",
      PostfixIncrement | PrefixIncrement => "++",
      Remainder => "%",
      StrictEquality => "===",
      StrictInequality => "!==",
      Subtraction | UnaryNegation => "-",
      Typeof => "typeof",
      Void => "void",
      Yield => "yield",
      YieldDelegated => "yield*",
      Call
      | ComputedMemberAccess
      | Conditional
      | ConditionalAlternate
      | MemberAccess
      | OptionalChainingMemberAccess
      | OptionalChainingComputedMemberAccess
      | OptionalChainingCall => "",
    }
  }

  /// The infix operator a token stands for between two operands, excluding assignments and the comma.
  pub fn binary(typ: TT) -> Option<OperatorName> {
    Some(match typ {
      TT::Ampersand => BitwiseAnd,
      TT::AmpersandAmpersand => LogicalAnd,
      TT::Asterisk => Multiplication,
      TT::AsteriskAsterisk => Exponentiation,
      TT::Bar => BitwiseOr,
      TT::BarBar => LogicalOr,
      TT::Caret => BitwiseXor,
      TT::ChevronLeft => LessThan,
      TT::ChevronLeftChevronLeft => BitwiseLeftShift,
      TT::ChevronLeftEquals => LessThanOrEqual,
      TT::ChevronRight => GreaterThan,
      TT::ChevronRightChevronRight => BitwiseRightShift,
      TT::ChevronRightChevronRightChevronRight => BitwiseUnsignedRightShift,
      TT::ChevronRightEquals => GreaterThanOrEqual,
      TT::EqualsEquals => Equality,
      TT::EqualsEqualsEquals => StrictEquality,
      TT::ExclamationEquals => Inequality,
      TT::ExclamationEqualsEquals => StrictInequality,
      TT::Hyphen => Subtraction,
      TT::KeywordIn => In,
      TT::KeywordInstanceof => Instanceof,
      TT::Percent => Remainder,
      TT::Plus => Addition,
      TT::QuestionQuestion => NullishCoalescing,
      TT::Slash => Division,
      _ => return None,
    })
  }

  pub fn assignment(typ: TT) -> Option<OperatorName> {
    Some(match typ {
      TT::Equals => Assignment,
      TT::AmpersandAmpersandEquals => AssignmentLogicalAnd,
      TT::AmpersandEquals => AssignmentBitwiseAnd,
      TT::AsteriskAsteriskEquals => AssignmentExponentiation,
      TT::AsteriskEquals => AssignmentMultiplication,
      TT::BarBarEquals => AssignmentLogicalOr,
      TT::BarEquals => AssignmentBitwiseOr,
      TT::CaretEquals => AssignmentBitwiseXor,
      TT::ChevronLeftChevronLeftEquals => AssignmentBitwiseLeftShift,
      TT::ChevronRightChevronRightChevronRightEquals => AssignmentBitwiseUnsignedRightShift,
      TT::ChevronRightChevronRightEquals => AssignmentBitwiseRightShift,
      TT::HyphenEquals => AssignmentSubtraction,
      TT::PercentEquals => AssignmentRemainder,
      TT::PlusEquals => AssignmentAddition,
      TT::QuestionQuestionEquals => AssignmentNullishCoalescing,
      TT::SlashEquals => AssignmentDivision,
      _ => return None,
    })
  }

  /// The prefix operator a token stands for before an operand. `await` and `yield` are left to the parser, as they depend on context.
  pub fn prefix(typ: TT) -> Option<OperatorName> {
    Some(match typ {
      TT::Exclamation => LogicalNot,
      TT::Hyphen => UnaryNegation,
      TT::HyphenHyphen => PrefixDecrement,
      TT::KeywordDelete => Delete,
      TT::KeywordTypeof => Typeof,
      TT::KeywordVoid => Void,
      TT::Plus => UnaryPlus,
      TT::PlusPlus => PrefixIncrement,
      TT::Tilde => BitwiseNot,
      _ => return None,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn precedence_levels_are_ordered() {
    assert_eq!(MemberAccess.precedence(), 18);
    assert_eq!(Comma.precedence(), 1);
    assert!(Multiplication.precedence() > Addition.precedence());
    assert_eq!(Yield.precedence(), Assignment.precedence());
    assert_eq!(AssignmentDivision.precedence(), 3);
    assert_eq!(ConditionalAlternate.precedence(), 2);
    assert!(AssignmentLogicalOr.is_assignment());
    assert!(!Equality.is_assignment());
  }

  #[test]
  fn associativity_by_level() {
    assert_eq!(Exponentiation.associativity(), Associativity::Right);
    assert_eq!(Assignment.associativity(), Associativity::Right);
    assert_eq!(Typeof.associativity(), Associativity::Right);
    assert_eq!(New.associativity(), Associativity::Right);
    assert_eq!(Subtraction.associativity(), Associativity::Left);
    assert_eq!(Call.associativity(), Associativity::Left);
    assert_eq!(PostfixIncrement.associativity(), Associativity::Left);
  }

  #[test]
  fn tokens_map_to_operators() {
    assert_eq!(OperatorName::binary(TT::KeywordIn), Some(In));
    assert_eq!(OperatorName::binary(TT::Equals), None);
    assert_eq!(OperatorName::assignment(TT::SlashEquals), Some(AssignmentDivision));
    assert_eq!(OperatorName::prefix(TT::Hyphen), Some(UnaryNegation));
    assert_eq!(OperatorName::prefix(TT::KeywordAwait), None);
  }
}
