use crate::precedence::ASSIGNMENT;
use crate::precedence::EXPRESSION;
use crate::stmt_start::export_default_needs_parens;
use crate::stmt_start::expr_stmt_needs_parens;
use crate::Generator;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::VarDecl;
use parse_js::ast::stmt::ForBody;
use parse_js::ast::stmt::ForInOfLhs;
use parse_js::ast::stmt::ForTripleStmtInit;
use parse_js::ast::stmt::Stmt;
use tracing::debug;

impl Generator<'_> {
  /// Prints a statement list. Empty statements are dropped.
  pub(crate) fn emit_stmts(&mut self, stmts: &[Node<Stmt>]) {
    for stmt in stmts {
      if !matches!(stmt.stx.as_ref(), Stmt::Empty(_)) {
        self.emit_stmt(stmt);
      };
    }
  }

  pub(crate) fn emit_block(&mut self, stmts: &[Node<Stmt>]) {
    self.out.write_punct("{");
    self.emit_stmts(stmts);
    self.out.write_punct("}");
  }

  /// Prints one statement including its terminating `;`, if it has one.
  pub(crate) fn emit_stmt(&mut self, stmt: &Node<Stmt>) {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.emit_block(&block.stx.body),
      Stmt::Break(stmt) => {
        self.out.write_keyword("break");
        if let Some(label) = &stmt.stx.label {
          self.out.write_identifier(label);
        };
        self.out.write_semicolon();
      }
      Stmt::Continue(stmt) => {
        self.out.write_keyword("continue");
        if let Some(label) = &stmt.stx.label {
          self.out.write_identifier(label);
        };
        self.out.write_semicolon();
      }
      Stmt::Debugger(_) => {
        self.out.write_keyword("debugger");
        self.out.write_semicolon();
      }
      Stmt::DoWhile(stmt) => {
        self.out.write_keyword("do");
        self.emit_stmt(&stmt.stx.body);
        self.out.write_keyword("while");
        self.emit_condition(&stmt.stx.condition);
      }
      Stmt::Empty(_) => self.out.write_semicolon(),
      Stmt::ExportDefaultExpr(stmt) => {
        self.out.write_keyword("export");
        self.out.write_keyword("default");
        let expr = &stmt.stx.expression;
        if export_default_needs_parens(expr) {
          self.emit_parenthesized(expr);
        } else {
          self.emit_expr(expr, ASSIGNMENT);
        };
        self.out.write_semicolon();
      }
      Stmt::Expr(stmt) => {
        let expr = &stmt.stx.expr;
        if expr_stmt_needs_parens(expr) {
          self.emit_parenthesized(expr);
        } else {
          self.emit_expr(expr, EXPRESSION);
        };
        self.out.write_semicolon();
      }
      Stmt::ForIn(stmt) => {
        self.out.write_keyword("for");
        self.out.write_punct("(");
        self.nested(|g| {
          g.emit_for_lhs(&stmt.stx.lhs);
          g.out.write_keyword("in");
          g.emit_expr(&stmt.stx.rhs, EXPRESSION);
        });
        self.out.write_punct(")");
        self.emit_for_body(&stmt.stx.body);
      }
      Stmt::ForOf(stmt) => {
        self.out.write_keyword("for");
        if stmt.stx.await_ {
          self.out.write_keyword("await");
        };
        self.out.write_punct("(");
        self.nested(|g| {
          g.emit_for_lhs(&stmt.stx.lhs);
          g.out.write_keyword("of");
          g.emit_expr(&stmt.stx.rhs, ASSIGNMENT);
        });
        self.out.write_punct(")");
        self.emit_for_body(&stmt.stx.body);
      }
      Stmt::ForTriple(stmt) => {
        self.out.write_keyword("for");
        self.out.write_punct("(");
        self.nested(|g| {
          g.no_in = true;
          match &stmt.stx.init {
            ForTripleStmtInit::None => {}
            ForTripleStmtInit::Expr(expr) => g.emit_expr(expr, EXPRESSION),
            ForTripleStmtInit::Decl(decl) => g.emit_var_decl(decl),
          };
          g.no_in = false;
          g.out.write_semicolon();
          if let Some(cond) = &stmt.stx.cond {
            g.emit_expr(cond, EXPRESSION);
          };
          g.out.write_semicolon();
          if let Some(post) = &stmt.stx.post {
            g.emit_expr(post, EXPRESSION);
          };
        });
        self.out.write_punct(")");
        self.emit_for_body(&stmt.stx.body);
      }
      Stmt::If(stmt) => {
        self.out.write_keyword("if");
        self.emit_condition(&stmt.stx.test);
        self.emit_stmt(&stmt.stx.consequent);
        if let Some(alternate) = &stmt.stx.alternate {
          self.out.write_keyword("else");
          self.emit_stmt(alternate);
        };
      }
      Stmt::Label(stmt) => {
        self.out.write_identifier(&stmt.stx.name);
        self.out.write_punct(":");
        self.emit_stmt(&stmt.stx.statement);
      }
      Stmt::Return(stmt) => {
        self.out.write_keyword("return");
        if let Some(value) = &stmt.stx.value {
          self.emit_expr(value, EXPRESSION);
        };
        self.out.write_semicolon();
      }
      Stmt::Switch(stmt) => {
        self.out.write_keyword("switch");
        self.emit_condition(&stmt.stx.test);
        self.out.write_punct("{");
        for branch in stmt.stx.branches.iter() {
          match &branch.stx.case {
            Some(case) => {
              self.out.write_keyword("case");
              self.emit_expr(case, EXPRESSION);
            }
            None => self.out.write_keyword("default"),
          };
          self.out.write_punct(":");
          self.emit_stmts(&branch.stx.body);
        }
        self.out.write_punct("}");
      }
      Stmt::Throw(stmt) => {
        self.out.write_keyword("throw");
        self.emit_expr(&stmt.stx.value, EXPRESSION);
        self.out.write_semicolon();
      }
      Stmt::Try(stmt) => {
        self.out.write_keyword("try");
        self.emit_block(&stmt.stx.wrapped.stx.body);
        if let Some(catch) = &stmt.stx.catch {
          self.out.write_keyword("catch");
          if let Some(param) = &catch.stx.parameter {
            self.out.write_punct("(");
            self.emit_pat(&param.stx.pat);
            self.out.write_punct(")");
          };
          self.emit_block(&catch.stx.body);
        };
        if let Some(finally) = &stmt.stx.finally {
          self.out.write_keyword("finally");
          self.emit_block(&finally.stx.body);
        };
      }
      Stmt::Verbatim(stmt) => {
        debug!(len = stmt.stx.text.len(), "emitting statement as source text");
        self.out.write_verbatim(&stmt.stx.text, &stmt.stx.literals);
        self.out.write_semicolon();
      }
      Stmt::While(stmt) => {
        self.out.write_keyword("while");
        self.emit_condition(&stmt.stx.condition);
        self.emit_stmt(&stmt.stx.body);
      }
      Stmt::With(stmt) => {
        self.out.write_keyword("with");
        self.emit_condition(&stmt.stx.object);
        self.emit_stmt(&stmt.stx.body);
      }
      Stmt::ClassDecl(decl) => {
        self.emit_export_prefix(decl.stx.export, decl.stx.export_default);
        let name = decl.stx.name.as_ref().map(|n| self.name(&n.stx.name));
        self.emit_class(name, decl.stx.extends.as_ref(), &decl.stx.members);
      }
      Stmt::FunctionDecl(decl) => {
        self.emit_export_prefix(decl.stx.export, decl.stx.export_default);
        self.emit_function(decl.stx.name.as_ref(), &decl.stx.function, false);
      }
      Stmt::VarDecl(decl) => {
        self.emit_export_prefix(decl.stx.export, false);
        self.emit_var_decl(decl);
        self.out.write_semicolon();
      }
    };
  }

  fn emit_condition(&mut self, expr: &Node<Expr>) {
    self.out.write_punct("(");
    self.nested(|g| g.emit_expr(expr, EXPRESSION));
    self.out.write_punct(")");
  }

  fn emit_export_prefix(&mut self, export: bool, export_default: bool) {
    if export {
      self.out.write_keyword("export");
      if export_default {
        self.out.write_keyword("default");
      };
    };
  }

  /// Prints `var`/`let`/`const` and its declarators, without the terminator.
  fn emit_var_decl(&mut self, decl: &Node<VarDecl>) {
    self.out.write_keyword(decl.stx.mode.keyword());
    for (i, declarator) in decl.stx.declarators.iter().enumerate() {
      if i > 0 {
        self.out.write_comma();
      };
      self.emit_pat(&declarator.pattern.stx.pat);
      if let Some(init) = &declarator.initializer {
        self.out.write_punct("=");
        self.emit_expr(init, ASSIGNMENT);
      };
    }
  }

  fn emit_for_lhs(&mut self, lhs: &ForInOfLhs) {
    match lhs {
      ForInOfLhs::Assign(pat) => self.emit_pat(pat),
      ForInOfLhs::Decl { mode, pattern } => {
        self.out.write_keyword(mode.keyword());
        self.emit_pat(&pattern.stx.pat);
      }
    };
  }

  // Loop bodies are stored without their braces, so they are put back unless the single statement is safe on its own.
  fn emit_for_body(&mut self, body: &Node<ForBody>) {
    match body.stx.body.as_slice() {
      [single] if stands_alone_as_loop_body(single) => self.emit_stmt(single),
      stmts => self.emit_block(stmts),
    };
  }
}

// Declarations are not allowed as bodies, and a nested `if` without braces could capture a following `else`.
fn stands_alone_as_loop_body(stmt: &Node<Stmt>) -> bool {
  !matches!(
    stmt.stx.as_ref(),
    Stmt::ClassDecl(_)
      | Stmt::FunctionDecl(_)
      | Stmt::VarDecl(_)
      | Stmt::Verbatim(_)
      | Stmt::If(_)
      | Stmt::ForIn(_)
      | Stmt::ForOf(_)
      | Stmt::ForTriple(_)
      | Stmt::Label(_)
      | Stmt::While(_)
      | Stmt::With(_)
  )
}
