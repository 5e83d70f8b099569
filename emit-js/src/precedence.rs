use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::operator::Associativity;
use parse_js::operator::OperatorName;

/// Wrapper around a precedence value with total ordering.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Prec(u8);

impl Prec {
  pub const fn new(value: u8) -> Self {
    Prec(value)
  }

  pub const fn tighter(self) -> Self {
    Prec(self.0 + 1)
  }
}

/// Anything, including a comma sequence.
pub const EXPRESSION: Prec = Prec::new(1);
/// An assignment-expression position: arguments, elements, initializers.
pub const ASSIGNMENT: Prec = Prec::new(3);
/// `new C` without arguments, which binds looser than member access.
pub const NEW_WITHOUT_ARGS_PRECEDENCE: Prec = Prec::new(17);
/// Optional chaining, member access, and call-like operators.
pub const CALL_MEMBER_PRECEDENCE: Prec = Prec::new(18);
/// Atomic expressions (identifiers, literals, etc.).
pub const PRIMARY_PRECEDENCE: Prec = Prec::new(19);

pub fn operator_prec(op: OperatorName) -> Prec {
  Prec::new(op.precedence())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
  Left,
  Right,
}

pub fn child_min_prec_for_binary(op: OperatorName, side: Side) -> Prec {
  let prec = operator_prec(op);
  match (op.associativity(), side) {
    (Associativity::Left, Side::Left) | (Associativity::Right, Side::Right) => prec,
    (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left) => prec.tighter(),
  }
}

/// Precedence of an expression as printed, derived from the parser's table so that printing without parentheses re-parses to the same tree.
pub fn expr_prec(expr: &Node<Expr>) -> Prec {
  match expr.stx.as_ref() {
    Expr::ArrowFunc(_) => ASSIGNMENT,
    Expr::Binary(binary) => operator_prec(binary.stx.operator),
    Expr::Cond(_) => operator_prec(OperatorName::Conditional),
    Expr::Unary(unary) => operator_prec(unary.stx.operator),
    Expr::UnaryPostfix(unary) => operator_prec(unary.stx.operator),
    Expr::New(new) if new.stx.arguments.is_none() => NEW_WITHOUT_ARGS_PRECEDENCE,
    Expr::Call(_)
    | Expr::ComputedMember(_)
    | Expr::Import(_)
    | Expr::Member(_)
    | Expr::New(_)
    | Expr::TaggedTemplate(_) => CALL_MEMBER_PRECEDENCE,
    Expr::Class(_)
    | Expr::Func(_)
    | Expr::Id(_)
    | Expr::ImportMeta(_)
    | Expr::NewTarget(_)
    | Expr::Super(_)
    | Expr::This(_)
    | Expr::Verbatim(_)
    | Expr::LitArr(_)
    | Expr::LitBigInt(_)
    | Expr::LitBool(_)
    | Expr::LitNull(_)
    | Expr::LitNum(_)
    | Expr::LitObj(_)
    | Expr::LitRegex(_)
    | Expr::LitStr(_)
    | Expr::LitTemplate(_)
    | Expr::ArrPat(_)
    | Expr::IdPat(_)
    | Expr::ObjPat(_) => PRIMARY_PRECEDENCE,
  }
}

fn is_short_circuit(op: OperatorName) -> bool {
  matches!(op, OperatorName::LogicalAnd | OperatorName::LogicalOr)
}

/// `??` cannot be combined with `&&` or `||` without parentheses, whatever the precedence says.
pub fn mixes_nullish_with_logical(parent: OperatorName, child: &Node<Expr>) -> bool {
  let Expr::Binary(child) = child.stx.as_ref() else {
    return false;
  };
  let child = child.stx.operator;
  (parent == OperatorName::NullishCoalescing && is_short_circuit(child))
    || (is_short_circuit(parent) && child == OperatorName::NullishCoalescing)
}

/// Whether a `new` callee must be parenthesized so that its own call is not taken as the argument list of `new`.
pub fn new_callee_needs_parens(callee: &Node<Expr>) -> bool {
  match callee.stx.as_ref() {
    Expr::Call(_) => true,
    Expr::Member(member) => member.stx.optional_chaining || new_callee_needs_parens(&member.stx.left),
    Expr::ComputedMember(member) => {
      member.stx.optional_chaining || new_callee_needs_parens(&member.stx.object)
    }
    Expr::TaggedTemplate(tagged) => new_callee_needs_parens(&tagged.stx.function),
    _ => false,
  }
}

/// `1.x` would read as a malformed number, so decimal integer literals are parenthesized before `.`.
pub fn is_integer_literal(expr: &Node<Expr>) -> bool {
  match expr.stx.as_ref() {
    Expr::LitNum(num) => num.stx.value.bytes().all(|b| b.is_ascii_digit() || b == b'_'),
    _ => false,
  }
}
