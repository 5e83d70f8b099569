use super::cover::expr_to_pat;
use super::Ctx;
use super::Parser;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::BreakStmt;
use crate::ast::stmt::CatchBlock;
use crate::ast::stmt::ContinueStmt;
use crate::ast::stmt::DebuggerStmt;
use crate::ast::stmt::DoWhileStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::ForBody;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::ForInStmt;
use crate::ast::stmt::ForOfStmt;
use crate::ast::stmt::ForTripleStmt;
use crate::ast::stmt::ForTripleStmtInit;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::LabelStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::SwitchBranch;
use crate::ast::stmt::SwitchStmt;
use crate::ast::stmt::ThrowStmt;
use crate::ast::stmt::TryStmt;
use crate::ast::stmt::WhileStmt;
use crate::ast::stmt::WithStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Statements up to, but not including, `end`.
  pub(crate) fn stmts(&mut self, ctx: Ctx, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    while !self.at(end) && !self.at(TT::EOF) {
      body.push(self.stmt(ctx)?);
    }
    Ok(body)
  }

  /// Whether `let` at the current position starts a declaration rather than naming a variable.
  fn at_let_decl(&mut self, ctx: Ctx) -> bool {
    let next = self.peek_nth(1).typ;
    self.at(TT::KeywordLet)
      && (matches!(next, TT::BraceOpen | TT::BracketOpen) || ctx.is_binding_ident(next))
  }

  pub(crate) fn stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<Stmt>> {
    let t0 = self.peek();
    let t1 = self.peek_nth(1);
    let start = t0.loc.0;
    #[rustfmt::skip]
    let stmt: Node<Stmt> = match t0.typ {
      TT::BraceOpen => self.block_stmt(ctx)?.into_wrapped(),
      TT::KeywordBreak => self.break_stmt(ctx)?.into_wrapped(),
      TT::KeywordClass => self.class_decl(ctx, start, false, false)?.into_wrapped(),
      TT::KeywordConst | TT::KeywordVar => self.var_decl(ctx, start, false)?.into_wrapped(),
      TT::KeywordLet if self.at_let_decl(ctx) => self.var_decl(ctx, start, false)?.into_wrapped(),
      TT::KeywordContinue => self.continue_stmt(ctx)?.into_wrapped(),
      TT::KeywordDebugger => self.debugger_stmt()?.into_wrapped(),
      TT::KeywordDo => self.do_while_stmt(ctx)?.into_wrapped(),
      TT::KeywordExport => self.export_stmt(ctx)?,
      TT::KeywordFor => self.for_stmt(ctx)?,
      TT::KeywordAsync if t1.typ == TT::KeywordFunction && !t1.newline_before => self.func_decl(ctx, start, false, false)?.into_wrapped(),
      TT::KeywordFunction => self.func_decl(ctx, start, false, false)?.into_wrapped(),
      TT::KeywordIf => self.if_stmt(ctx)?.into_wrapped(),
      TT::KeywordImport if !matches!(t1.typ, TT::ParenthesisOpen | TT::Dot) => self.import_stmt()?.into_wrapped(),
      TT::KeywordReturn => self.return_stmt(ctx)?.into_wrapped(),
      TT::KeywordSwitch => self.switch_stmt(ctx)?.into_wrapped(),
      TT::KeywordThrow => self.throw_stmt(ctx)?.into_wrapped(),
      TT::KeywordTry => self.try_stmt(ctx)?.into_wrapped(),
      TT::KeywordWhile => self.while_stmt(ctx)?.into_wrapped(),
      TT::KeywordWith => self.with_stmt(ctx)?.into_wrapped(),
      TT::Semicolon => self.empty_stmt()?.into_wrapped(),
      typ if ctx.is_binding_ident(typ) && t1.typ == TT::Colon => self.label_stmt(ctx)?.into_wrapped(),
      _ => self.expr_stmt(ctx)?.into_wrapped(),
    };
    Ok(stmt)
  }

  fn label_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<LabelStmt>> {
    self.with_loc(|p| {
      let label = p.bump();
      let name = p.text(label.loc).to_string();
      p.expect(TT::Colon)?;
      let statement = p.stmt(ctx)?;
      Ok(LabelStmt { name, statement })
    })
  }

  fn empty_stmt(&mut self) -> SyntaxResult<Node<EmptyStmt>> {
    self.with_loc(|p| {
      p.expect(TT::Semicolon)?;
      Ok(EmptyStmt {})
    })
  }

  fn block_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      let body = p.fn_block(ctx)?;
      Ok(BlockStmt { body })
    })
  }

  fn jump_label(&mut self, ctx: Ctx) -> SyntaxResult<Option<String>> {
    let t = self.peek();
    let label = match ctx.is_binding_ident(t.typ) && !t.newline_before {
      true => {
        self.bump();
        Some(self.text(t.loc).to_string())
      }
      false => None,
    };
    self.semicolon()?;
    Ok(label)
  }

  fn break_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<BreakStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordBreak)?;
      let label = p.jump_label(ctx)?;
      Ok(BreakStmt { label })
    })
  }

  fn continue_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<ContinueStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordContinue)?;
      let label = p.jump_label(ctx)?;
      Ok(ContinueStmt { label })
    })
  }

  fn debugger_stmt(&mut self) -> SyntaxResult<Node<DebuggerStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordDebugger)?;
      p.semicolon()?;
      Ok(DebuggerStmt {})
    })
  }

  fn expr_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let expr = p.expression(ctx)?;
      p.semicolon()?;
      Ok(ExprStmt { expr })
    })
  }

  fn parenthesized_expr(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    self.expect(TT::ParenthesisOpen)?;
    let expr = self.expression(ctx.with_in())?;
    self.expect(TT::ParenthesisClose)?;
    Ok(expr)
  }

  fn if_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordIf)?;
      let test = p.parenthesized_expr(ctx)?;
      let consequent = p.stmt(ctx)?;
      let alternate = match p.eat(TT::KeywordElse) {
        true => Some(p.stmt(ctx)?),
        false => None,
      };
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  fn return_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordReturn)?;
      let next = p.peek();
      let value = match next.newline_before
        || matches!(next.typ, TT::Semicolon | TT::BraceClose | TT::EOF)
      {
        true => None,
        false => Some(p.expression(ctx)?),
      };
      p.semicolon()?;
      Ok(ReturnStmt { value })
    })
  }

  fn throw_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<ThrowStmt>> {
    self.with_loc(|p| {
      let kw = p.expect(TT::KeywordThrow)?;
      if p.peek().newline_before {
        return Err(kw.error(SyntaxErrorType::LineTerminatorAfterThrow));
      };
      let value = p.expression(ctx)?;
      p.semicolon()?;
      Ok(ThrowStmt { value })
    })
  }

  fn try_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<TryStmt>> {
    self.with_loc(|p| {
      let kw = p.expect(TT::KeywordTry)?;
      let wrapped = p.block_stmt(ctx)?;
      let catch = match p.eat(TT::KeywordCatch) {
        true => Some(p.with_loc(|p| {
          let parameter = match p.eat(TT::ParenthesisOpen) {
            true => {
              let pattern = p.pat_decl(ctx)?;
              p.expect(TT::ParenthesisClose)?;
              Some(pattern)
            }
            false => None,
          };
          let body = p.fn_block(ctx)?;
          Ok(CatchBlock { parameter, body })
        })?),
        false => None,
      };
      let finally = match p.eat(TT::KeywordFinally) {
        true => Some(p.block_stmt(ctx)?),
        false => None,
      };
      if catch.is_none() && finally.is_none() {
        return Err(kw.error(SyntaxErrorType::TryStatementHasNoCatchOrFinally));
      };
      Ok(TryStmt {
        wrapped,
        catch,
        finally,
      })
    })
  }

  fn while_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<WhileStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordWhile)?;
      let condition = p.parenthesized_expr(ctx)?;
      let body = p.stmt(ctx)?;
      Ok(WhileStmt { condition, body })
    })
  }

  fn with_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<WithStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordWith)?;
      let object = p.parenthesized_expr(ctx)?;
      let body = p.stmt(ctx)?;
      Ok(WithStmt { object, body })
    })
  }

  fn do_while_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<DoWhileStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordDo)?;
      let body = p.stmt(ctx)?;
      p.expect(TT::KeywordWhile)?;
      let condition = p.parenthesized_expr(ctx)?;
      // A semicolon is always inserted after a do-while, even without a line break.
      p.eat(TT::Semicolon);
      Ok(DoWhileStmt { condition, body })
    })
  }

  fn switch_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<SwitchStmt>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordSwitch)?;
      let test = p.parenthesized_expr(ctx)?;
      p.expect(TT::BraceOpen)?;
      let mut branches = Vec::new();
      while !p.at(TT::BraceClose) {
        branches.push(p.with_loc(|p| {
          let case = match p.eat(TT::KeywordCase) {
            true => Some(p.expression(ctx.with_in())?),
            false => {
              p.expect(TT::KeywordDefault)?;
              None
            }
          };
          p.expect(TT::Colon)?;
          let mut body = Vec::new();
          while !matches!(
            p.peek().typ,
            TT::KeywordCase | TT::KeywordDefault | TT::BraceClose | TT::EOF
          ) {
            body.push(p.stmt(ctx)?);
          }
          Ok(SwitchBranch { case, body })
        })?);
      }
      p.expect(TT::BraceClose)?;
      Ok(SwitchStmt { test, branches })
    })
  }

  fn for_body(&mut self, ctx: Ctx) -> SyntaxResult<Node<ForBody>> {
    self.with_loc(|p| {
      let body = match p.at(TT::BraceOpen) {
        true => p.fn_block(ctx)?,
        false => vec![p.stmt(ctx)?],
      };
      Ok(ForBody { body })
    })
  }

  /// `for (init; cond; post)`, `for (lhs in obj)`, or `for await? (lhs of iterable)`. The head is read once: what follows the left side decides which it is.
  fn for_stmt(&mut self, ctx: Ctx) -> SyntaxResult<Node<Stmt>> {
    let start = self.expect(TT::KeywordFor)?.loc.0;
    let await_ = match self.peek().typ {
      TT::KeywordAwait if !ctx.await_is_ident => {
        self.bump();
        true
      }
      _ => false,
    };
    self.expect(TT::ParenthesisOpen)?;
    let head = ctx.without_in();
    let t0 = self.peek();
    let init = if matches!(t0.typ, TT::KeywordVar | TT::KeywordConst) || self.at_let_decl(ctx) {
      let mode = self.var_mode()?;
      let pattern = self.pat_decl(head)?;
      if matches!(self.peek().typ, TT::KeywordIn | TT::KeywordOf) {
        return self.for_in_of(ctx, start, await_, ForInOfLhs::Decl { mode, pattern });
      };
      let mut declarators = vec![self.declarator_init(head, pattern)?];
      self.more_declarators(head, &mut declarators)?;
      let decl = Node::new(self.loc_from(t0.loc.0), VarDecl {
        export: false,
        mode,
        declarators,
      });
      ForTripleStmtInit::Decl(decl)
    } else if self.at(TT::Semicolon) {
      ForTripleStmtInit::None
    } else {
      let expr = self.expression(head)?;
      if matches!(self.peek().typ, TT::KeywordIn | TT::KeywordOf) {
        let lhs = ForInOfLhs::Assign(expr_to_pat(expr)?);
        return self.for_in_of(ctx, start, await_, lhs);
      };
      ForTripleStmtInit::Expr(expr)
    };
    if await_ {
      return Err(self.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf)));
    };
    self.expect(TT::Semicolon)?;
    let cond = match self.at(TT::Semicolon) {
      true => None,
      false => Some(self.expression(ctx.with_in())?),
    };
    self.expect(TT::Semicolon)?;
    let post = match self.at(TT::ParenthesisClose) {
      true => None,
      false => Some(self.expression(ctx.with_in())?),
    };
    self.expect(TT::ParenthesisClose)?;
    let body = self.for_body(ctx)?;
    Ok(
      Node::new(self.loc_from(start), ForTripleStmt {
        init,
        cond,
        post,
        body,
      })
      .into_wrapped(),
    )
  }

  fn for_in_of(
    &mut self,
    ctx: Ctx,
    start: usize,
    await_: bool,
    lhs: ForInOfLhs,
  ) -> SyntaxResult<Node<Stmt>> {
    let kw = self.bump();
    if kw.typ == TT::KeywordIn {
      if await_ {
        return Err(kw.error(SyntaxErrorType::RequiredTokenNotFound(TT::KeywordOf)));
      };
      let rhs = self.expression(ctx.with_in())?;
      self.expect(TT::ParenthesisClose)?;
      let body = self.for_body(ctx)?;
      return Ok(Node::new(self.loc_from(start), ForInStmt { lhs, rhs, body }).into_wrapped());
    };
    let rhs = self.assignment(ctx.with_in())?;
    self.expect(TT::ParenthesisClose)?;
    let body = self.for_body(ctx)?;
    Ok(
      Node::new(self.loc_from(start), ForOfStmt {
        await_,
        lhs,
        rhs,
        body,
      })
      .into_wrapped(),
    )
  }
}
