use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;

/// The first token an expression prints as, for the cases that matter at the start of a statement or arrow body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LeadingToken {
  BraceOpen,
  Class,
  Function,
  // `let` immediately followed by `[`.
  LetBracket,
  Other,
}

pub(crate) fn leading_token(expr: &Node<Expr>) -> LeadingToken {
  match expr.stx.as_ref() {
    Expr::LitObj(_) | Expr::ObjPat(_) => LeadingToken::BraceOpen,
    Expr::Class(_) => LeadingToken::Class,
    // `async function` starts a declaration just like `function`.
    Expr::Func(_) => LeadingToken::Function,
    Expr::Binary(binary) => leading_token(&binary.stx.left),
    Expr::Call(call) => leading_token(&call.stx.callee),
    Expr::Cond(cond) => leading_token(&cond.stx.test),
    Expr::Member(member) => leading_token(&member.stx.left),
    Expr::TaggedTemplate(tagged) => leading_token(&tagged.stx.function),
    Expr::UnaryPostfix(postfix) => leading_token(&postfix.stx.argument),
    Expr::ComputedMember(member) => match member.stx.object.stx.as_ref() {
      Expr::Id(id) if id.stx.name == "let" && !member.stx.optional_chaining => {
        LeadingToken::LetBracket
      }
      _ => leading_token(&member.stx.object),
    },
    _ => LeadingToken::Other,
  }
}

/// Whether an expression statement must be wrapped so it is not read as a declaration or block.
pub(crate) fn expr_stmt_needs_parens(expr: &Node<Expr>) -> bool {
  leading_token(expr) != LeadingToken::Other
}

/// Whether an arrow function's expression body must be wrapped so it is not read as a block.
pub(crate) fn arrow_body_needs_parens(expr: &Node<Expr>) -> bool {
  leading_token(expr) == LeadingToken::BraceOpen
}

/// Whether `export default <expr>` must be wrapped so it is not read as a declaration.
pub(crate) fn export_default_needs_parens(expr: &Node<Expr>) -> bool {
  matches!(
    leading_token(expr),
    LeadingToken::Function | LeadingToken::Class
  )
}
