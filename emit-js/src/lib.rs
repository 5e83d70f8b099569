use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::TopLevel;
use std::ops::Range;
use symbol_js::symbol::ScopeId;
use symbol_js::symbol::ScopeTree;

mod emitter;
mod escape;
mod expr;
mod pat;
mod precedence;
mod stmt;
mod stmt_start;

pub use emitter::Emitter;
pub use escape::emit_string_literal;

/// Prints `top` as minimal JavaScript, writing every resolved identifier under the name `symbols` assigned to it.
///
/// Never fails: node kinds kept as verbatim source by the parser are printed as that text.
pub fn emit_js(top: &Node<TopLevel>, symbols: &ScopeTree) -> String {
  emit_js_with_literals(top, symbols).code
}

/// Generated code along with the byte ranges of its string, template and regex literals.
#[derive(Debug)]
pub struct EmittedJs {
  pub code: String,
  /// In order and never overlapping.
  pub literals: Vec<Range<usize>>,
}

/// Like `emit_js`, but also reports where each literal was written.
pub fn emit_js_with_literals(top: &Node<TopLevel>, symbols: &ScopeTree) -> EmittedJs {
  let mut generator = Generator::new(symbols);
  generator.emit_stmts(&top.stx.body);
  let (code, literals) = generator.out.finish_with_literals();
  EmittedJs { code, literals }
}

pub(crate) struct Generator<'a> {
  pub(crate) out: Emitter,
  symbols: &'a ScopeTree,
  scope: ScopeId,
  // Set inside a `for(;;)` initializer, where a bare `in` would turn the loop into a for-in.
  no_in: bool,
}

impl<'a> Generator<'a> {
  fn new(symbols: &'a ScopeTree) -> Self {
    Generator {
      out: Emitter::new(),
      symbols,
      scope: symbols.root(),
      no_in: false,
    }
  }

  /// The name to print for a use of `name` at the current position.
  pub(crate) fn name<'n>(&self, name: &'n str) -> &'n str
  where
    'a: 'n,
  {
    self.symbols.effective_name(self.scope, name)
  }

  /// Runs `f` with the scope owned by `func` as the current scope.
  pub(crate) fn in_func_scope(&mut self, func: &Node<Func>, f: impl FnOnce(&mut Self)) {
    let outer = self.scope;
    let outer_no_in = self.no_in;
    if let Some(scope) = self.symbols.scope_of_func(func.loc) {
      self.scope = scope;
    };
    self.no_in = false;
    f(self);
    self.scope = outer;
    self.no_in = outer_no_in;
  }

  /// Runs `f` inside a parenthesized or bracketed region, where `in` is unambiguous again.
  pub(crate) fn nested(&mut self, f: impl FnOnce(&mut Self)) {
    let outer_no_in = self.no_in;
    self.no_in = false;
    f(self);
    self.no_in = outer_no_in;
  }
}
