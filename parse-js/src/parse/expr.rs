use super::cover::arg_to_param;
use super::cover::assign_target;
use super::Ctx;
use super::Parser;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::ImportExpr;
use crate::ast::expr::ImportMeta;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::NewExpr;
use crate::ast::expr::NewTarget;
use crate::ast::expr::SuperExpr;
use crate::ast::expr::TaggedTemplateExpr;
use crate::ast::expr::ThisExpr;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryPostfixExpr;
use crate::ast::expr::VerbatimExpr;
use crate::ast::expr::lit::LitBigIntExpr;
use crate::ast::expr::lit::LitBoolExpr;
use crate::ast::expr::lit::LitNullExpr;
use crate::ast::expr::lit::LitNumExpr;
use crate::ast::expr::pat::IdPat;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::Associativity;
use crate::operator::OperatorName;
use crate::token::TT;

fn binary(operator: OperatorName, left: Node<Expr>, right: Node<Expr>) -> Node<Expr> {
  Node::new(left.loc + right.loc, BinaryExpr {
    operator,
    left,
    right,
  })
  .into_wrapped()
}

// An arrow function can only be followed by a comma or the end of the expression, as its body extends as far as possible.
fn is_arrow(expr: &Node<Expr>) -> bool {
  matches!(expr.stx.as_ref(), Expr::ArrowFunc(_))
}

impl<'a> Parser<'a> {
  /// A full expression, including the comma operator.
  pub fn expression(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let mut expr = self.assignment(ctx)?;
    while self.eat(TT::Comma) {
      let right = self.assignment(ctx)?;
      expr = binary(OperatorName::Comma, expr, right);
    }
    Ok(expr)
  }

  pub fn assignment(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    if self.at(TT::KeywordYield) && !ctx.yield_is_ident {
      return self.yield_expr(ctx);
    };
    let left = self.conditional(ctx)?;
    let Some(operator) = OperatorName::assignment(self.peek().typ) else {
      return Ok(left);
    };
    let left = assign_target(left, operator)?;
    self.bump();
    let right = self.assignment(ctx)?;
    Ok(binary(operator, left, right))
  }

  fn yield_expr(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let start = self.expect(TT::KeywordYield)?.loc.0;
    let star = self.peek();
    let delegated = star.typ == TT::Asterisk && !star.newline_before;
    if delegated {
      self.bump();
    };
    let next = self.peek();
    // A bare `yield` can end an expression, as in `yield;` or `f(yield, 1)`.
    let bare = !delegated
      && (next.newline_before
        || matches!(
          next.typ,
          TT::EOF
            | TT::Semicolon
            | TT::Comma
            | TT::Colon
            | TT::ParenthesisClose
            | TT::BracketClose
            | TT::BraceClose
        ));
    let argument = if bare {
      Node::new(Loc(self.prev_end, self.prev_end), VerbatimExpr {
        text: String::new(),
      })
      .into_wrapped()
    } else {
      self.assignment(ctx)?
    };
    let operator = if delegated {
      OperatorName::YieldDelegated
    } else {
      OperatorName::Yield
    };
    Ok(Node::new(self.loc_from(start), UnaryExpr { operator, argument }).into_wrapped())
  }

  fn conditional(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let test = self.binary(ctx, OperatorName::NullishCoalescing.precedence())?;
    if is_arrow(&test) || !self.eat(TT::Question) {
      return Ok(test);
    };
    let consequent = self.assignment(ctx.with_in())?;
    self.expect(TT::Colon)?;
    let alternate = self.assignment(ctx)?;
    Ok(
      Node::new(test.loc + alternate.loc, CondExpr {
        test,
        consequent,
        alternate,
      })
      .into_wrapped(),
    )
  }

  /// Parses binary operators binding at least as tightly as `min_prec`, by precedence climbing.
  fn binary(&mut self, ctx: Ctx, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.unary(ctx)?;
    while !is_arrow(&left) {
      let Some(operator) = OperatorName::binary(self.peek().typ) else {
        break;
      };
      let prec = operator.precedence();
      if prec < min_prec || (operator == OperatorName::In && ctx.no_in) {
        break;
      };
      self.bump();
      let right_prec = match operator.associativity() {
        Associativity::Left => prec + 1,
        Associativity::Right => prec,
      };
      let right = self.binary(ctx, right_prec)?;
      left = binary(operator, left, right);
    }
    Ok(left)
  }

  fn unary(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    let operator = match t.typ {
      TT::KeywordAwait if !ctx.await_is_ident => Some(OperatorName::Await),
      typ => OperatorName::prefix(typ),
    };
    let Some(operator) = operator else {
      return self.postfix(ctx);
    };
    self.bump();
    let argument = self.unary(ctx)?;
    Ok(Node::new(t.loc + argument.loc, UnaryExpr { operator, argument }).into_wrapped())
  }

  fn postfix(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let argument = self.lhs(ctx)?;
    let t = self.peek();
    let operator = match t.typ {
      TT::PlusPlus => OperatorName::PostfixIncrement,
      TT::HyphenHyphen => OperatorName::PostfixDecrement,
      _ => return Ok(argument),
    };
    // `a\n++b` is `a; ++b`.
    if t.newline_before || is_arrow(&argument) {
      return Ok(argument);
    };
    self.bump();
    Ok(
      Node::new(argument.loc + t.loc, UnaryPostfixExpr { operator, argument })
        .into_wrapped(),
    )
  }

  /// Member accesses, calls and tagged templates on a primary expression.
  pub(crate) fn lhs(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let base = if self.at(TT::KeywordNew) && self.peek_nth(1).typ != TT::Dot {
      self.new_expr(ctx)?
    } else {
      self.primary(ctx)?
    };
    if is_arrow(&base) {
      return Ok(base);
    };
    self.suffixes(ctx, base, true)
  }

  /// Parses `new Callee` or `new Callee(args)`. The callee has no calls of its own, so `new a.b().c` is `(new a.b()).c`.
  fn new_expr(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let start = self.expect(TT::KeywordNew)?.loc.0;
    let callee = if self.at(TT::KeywordNew) && self.peek_nth(1).typ != TT::Dot {
      self.new_expr(ctx)?
    } else {
      let base = self.primary(ctx)?;
      self.suffixes(ctx, base, false)?
    };
    let arguments = match self.at(TT::ParenthesisOpen) {
      true => Some(self.call_args(ctx)?.0),
      false => None,
    };
    Ok(Node::new(self.loc_from(start), NewExpr { callee, arguments }).into_wrapped())
  }

  fn member_name(&mut self) -> SyntaxResult<String> {
    let t = self.bump();
    if !matches!(t.typ, TT::Identifier | TT::PrivateMember) && !t.typ.is_keyword() {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("member access property")));
    };
    Ok(self.text(t.loc).to_string())
  }

  fn suffixes(&mut self, ctx: Ctx, mut expr: Node<Expr>, calls: bool) -> SyntaxResult<Node<Expr>> {
    let start = expr.loc.0;
    loop {
      let t = self.peek();
      expr = match t.typ {
        TT::Dot | TT::QuestionDot if calls || t.typ == TT::Dot => {
          self.bump();
          let right = self.member_name()?;
          Node::new(self.loc_from(start), MemberExpr {
            optional_chaining: t.typ == TT::QuestionDot,
            left: expr,
            right,
          })
          .into_wrapped()
        }
        TT::BracketOpen | TT::QuestionDotBracketOpen if calls || t.typ == TT::BracketOpen => {
          self.bump();
          let member = self.expression(ctx.with_in())?;
          self.expect(TT::BracketClose)?;
          Node::new(self.loc_from(start), ComputedMemberExpr {
            optional_chaining: t.typ == TT::QuestionDotBracketOpen,
            object: expr,
            member,
          })
          .into_wrapped()
        }
        TT::ParenthesisOpen | TT::QuestionDotParenthesisOpen if calls => {
          let optional_chaining = t.typ == TT::QuestionDotParenthesisOpen;
          if optional_chaining {
            // `?.(` stands for both `?.` and `(`.
            self.bump();
          };
          let arguments = self.call_args_after_open(ctx, optional_chaining)?.0;
          Node::new(self.loc_from(start), CallExpr {
            optional_chaining,
            callee: expr,
            arguments,
          })
          .into_wrapped()
        }
        TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
          let first = self.bump();
          let parts = self.template_parts(ctx, first)?;
          Node::new(self.loc_from(start), TaggedTemplateExpr {
            function: expr,
            parts,
          })
          .into_wrapped()
        }
        _ => return Ok(expr),
      };
    }
  }

  /// Parses `(a, ...b)`, returning the arguments and whether the list ended with a trailing comma.
  pub(crate) fn call_args(&mut self, ctx: Ctx) -> SyntaxResult<(Vec<Node<CallArg>>, bool)> {
    self.call_args_after_open(ctx, false)
  }

  fn call_args_after_open(
    &mut self,
    ctx: Ctx,
    open_consumed: bool,
  ) -> SyntaxResult<(Vec<Node<CallArg>>, bool)> {
    if !open_consumed {
      self.expect(TT::ParenthesisOpen)?;
    };
    let mut args = Vec::new();
    let mut trailing_comma = false;
    while !self.at(TT::ParenthesisClose) {
      args.push(self.with_loc(|p| {
        let spread = p.eat(TT::DotDotDot);
        let value = p.assignment(ctx.with_in())?;
        Ok(CallArg { spread, value })
      })?);
      trailing_comma = self.eat(TT::Comma);
      if !trailing_comma {
        break;
      };
    }
    self.expect(TT::ParenthesisClose)?;
    Ok((args, trailing_comma))
  }

  fn primary(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    // `async` only starts a function when the next token is on the same line.
    if t.typ == TT::KeywordAsync && !self.peek_nth(1).newline_before {
      let next = self.peek_nth(1);
      match next.typ {
        TT::KeywordFunction => return Ok(self.func_expr(ctx)?.into_wrapped()),
        TT::ParenthesisOpen => return self.async_call_or_arrow(ctx),
        typ if ctx.is_binding_ident(typ) && self.peek_nth(2).typ == TT::EqualsChevronRight => {
          self.bump();
          return self.arrow_with_ident_param(ctx, t.loc.0, true);
        }
        _ => {}
      };
    };
    if ctx.is_binding_ident(t.typ) {
      if self.peek_nth(1).typ == TT::EqualsChevronRight {
        return self.arrow_with_ident_param(ctx, t.loc.0, false);
      };
      self.bump();
      return Ok(
        Node::new(t.loc, IdExpr {
          name: self.text(t.loc).to_string(),
        })
        .into_wrapped(),
      );
    };
    let expr: Node<Expr> = match t.typ {
      TT::BracketOpen => self.lit_arr(ctx)?.into_wrapped(),
      TT::BraceOpen => self.lit_obj(ctx)?.into_wrapped(),
      TT::KeywordClass => self.class_expr(ctx)?.into_wrapped(),
      TT::KeywordFunction => self.func_expr(ctx)?.into_wrapped(),
      TT::KeywordImport => self.import_expr(ctx)?,
      TT::KeywordNew => self.new_target()?.into_wrapped(),
      TT::KeywordSuper => {
        self.bump();
        Node::new(t.loc, SuperExpr {}).into_wrapped()
      }
      TT::KeywordThis => {
        self.bump();
        Node::new(t.loc, ThisExpr {}).into_wrapped()
      }
      TT::LiteralBigInt => {
        self.bump();
        Node::new(t.loc, LitBigIntExpr {
          value: self.text(t.loc).to_string(),
        })
        .into_wrapped()
      }
      TT::LiteralNumber => {
        self.bump();
        Node::new(t.loc, LitNumExpr {
          value: self.text(t.loc).to_string(),
        })
        .into_wrapped()
      }
      TT::LiteralTrue | TT::LiteralFalse => {
        self.bump();
        Node::new(t.loc, LitBoolExpr {
          value: t.typ == TT::LiteralTrue,
        })
        .into_wrapped()
      }
      TT::LiteralNull => {
        self.bump();
        Node::new(t.loc, LitNullExpr {}).into_wrapped()
      }
      TT::LiteralString => self.lit_str()?,
      TT::LiteralTemplatePartString | TT::LiteralTemplatePartStringEnd => {
        self.lit_template(ctx)?.into_wrapped()
      }
      TT::Slash | TT::SlashEquals => self.lit_regex()?,
      TT::ParenthesisOpen => self.parenthesized(ctx)?,
      // A private name only stands alone on the left of `in`, as in `#x in obj`.
      TT::PrivateMember => {
        self.bump();
        Node::new(t.loc, IdExpr {
          name: self.text(t.loc).to_string(),
        })
        .into_wrapped()
      }
      TT::EOF => return Err(t.error(SyntaxErrorType::UnexpectedEnd)),
      TT::Invalid => {
        return Err(match self.text(t.loc).as_bytes().first() {
          Some(b'\'' | b'"') => t.error(SyntaxErrorType::LineTerminatorInString),
          Some(b'`') => t.error(SyntaxErrorType::UnexpectedEnd),
          _ => t.error(SyntaxErrorType::ExpectedSyntax("expression operand")),
        });
      }
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("expression operand"))),
    };
    Ok(expr)
  }

  fn import_expr(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let start = self.expect(TT::KeywordImport)?.loc.0;
    let t = self.bump();
    match t.typ {
      TT::Dot => {
        let prop = self.expect(TT::Identifier)?;
        if self.text(prop.loc) != "meta" {
          return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`meta` property")));
        };
        Ok(Node::new(self.loc_from(start), ImportMeta {}).into_wrapped())
      }
      TT::ParenthesisOpen => {
        let module = self.assignment(ctx.with_in())?;
        self.expect(TT::ParenthesisClose)?;
        Ok(Node::new(self.loc_from(start), ImportExpr { module }).into_wrapped())
      }
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("import expression"))),
    }
  }

  fn new_target(&mut self) -> SyntaxResult<Node<NewTarget>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordNew)?;
      p.expect(TT::Dot)?;
      let prop = p.expect(TT::Identifier)?;
      if p.text(prop.loc) != "target" {
        return Err(prop.error(SyntaxErrorType::ExpectedSyntax("`target` property")));
      };
      Ok(NewTarget {})
    })
  }

  /// A parenthesized expression, or the parameters of an arrow function if `=>` follows. Parentheses leave no trace in the tree.
  fn parenthesized(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let start = self.peek().loc.0;
    let (items, trailing_comma) = self.call_args(ctx)?;
    let next = self.peek();
    if next.typ == TT::EqualsChevronRight {
      return self.arrow_with_params(ctx, start, false, items);
    };
    if items.is_empty() || trailing_comma || items.iter().any(|item| item.stx.spread) {
      return Err(next.error(SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight)));
    };
    let mut items = items.into_iter().map(|item| item.stx.value);
    let mut expr = match items.next() {
      Some(first) => first,
      None => return Err(next.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    };
    for item in items {
      expr = binary(OperatorName::Comma, expr, item);
    }
    Ok(expr)
  }

  /// `async (...)` is an async arrow function if `=>` follows, and otherwise a call to something named `async`.
  fn async_call_or_arrow(&mut self, ctx: Ctx) -> SyntaxResult<Node<Expr>> {
    let callee = self.expect(TT::KeywordAsync)?;
    let (arguments, _) = self.call_args(ctx)?;
    if self.at(TT::EqualsChevronRight) {
      return self.arrow_with_params(ctx, callee.loc.0, true, arguments);
    };
    let start = callee.loc.0;
    let callee = Node::new(callee.loc, IdExpr {
      name: self.text(callee.loc).to_string(),
    })
    .into_wrapped();
    let call = Node::new(self.loc_from(start), CallExpr {
      optional_chaining: false,
      callee,
      arguments,
    });
    Ok(call.into_wrapped())
  }

  fn arrow_with_ident_param(
    &mut self,
    ctx: Ctx,
    start: usize,
    async_: bool,
  ) -> SyntaxResult<Node<Expr>> {
    let t = self.bump();
    let name = self.text(t.loc).to_string();
    let pattern = Node::new(t.loc, PatDecl {
      pat: Node::new(t.loc, IdPat { name }).into_wrapped(),
    });
    let param = Node::new(t.loc, ParamDecl {
      rest: false,
      pattern,
      default_value: None,
    });
    self.arrow_body(ctx, start, async_, vec![param])
  }

  fn arrow_with_params(
    &mut self,
    ctx: Ctx,
    start: usize,
    async_: bool,
    items: Vec<Node<CallArg>>,
  ) -> SyntaxResult<Node<Expr>> {
    let count = items.len();
    let mut parameters = Vec::with_capacity(count);
    for (i, item) in items.into_iter().enumerate() {
      // Only the last parameter can collect the rest.
      if item.stx.spread && i + 1 < count {
        return Err(item.error(SyntaxErrorType::ExpectedSyntax("rest parameter at end")));
      };
      parameters.push(arg_to_param(item)?);
    }
    self.arrow_body(ctx, start, async_, parameters)
  }

  fn arrow_body(
    &mut self,
    ctx: Ctx,
    start: usize,
    async_: bool,
    parameters: Vec<Node<ParamDecl>>,
  ) -> SyntaxResult<Node<Expr>> {
    let arrow = self.expect(TT::EqualsChevronRight)?;
    if arrow.newline_before {
      return Err(arrow.error(SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters));
    };
    let body_ctx = Ctx {
      await_is_ident: ctx.await_is_ident && !async_,
      ..ctx
    };
    let body = if self.at(TT::BraceOpen) {
      FuncBody::Block(self.fn_block(body_ctx.with_in())?)
    } else {
      FuncBody::Expression(self.assignment(body_ctx)?)
    };
    let func = Node::new(self.loc_from(start), Func {
      arrow: true,
      async_,
      generator: false,
      parameters,
      body,
    });
    Ok(Node::new(func.loc, ArrowFuncExpr { func }).into_wrapped())
  }
}
