use super::Ctx;
use super::Parser;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::ClassOrFuncName;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::ClassExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::FuncExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ClassDecl;
use crate::ast::stmt::decl::FuncDecl;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::ast::stmt::decl::VarDecl;
use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::decl::VarDeclarator;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

impl<'a> Parser<'a> {
  fn binding_name(&mut self, ctx: Ctx) -> SyntaxResult<(Loc, String)> {
    let t = self.bump();
    if !ctx.is_binding_ident(t.typ) {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")));
    };
    Ok((t.loc, self.text(t.loc).to_string()))
  }

  fn id_pat(&mut self, ctx: Ctx) -> SyntaxResult<Node<Pat>> {
    let (loc, name) = self.binding_name(ctx)?;
    Ok(Node::new(loc, IdPat { name }).into_wrapped())
  }

  fn pat_default(&mut self, ctx: Ctx) -> SyntaxResult<Option<Node<Expr>>> {
    if !self.eat(TT::Equals) {
      return Ok(None);
    };
    Ok(Some(self.assignment(ctx.with_in())?))
  }

  /// A binding pattern, as found in declarations and parameters.
  pub(crate) fn pat(&mut self, ctx: Ctx) -> SyntaxResult<Node<Pat>> {
    match self.peek().typ {
      TT::BraceOpen => self.obj_pat(ctx),
      TT::BracketOpen => self.arr_pat(ctx),
      _ => self.id_pat(ctx),
    }
  }

  fn obj_pat(&mut self, ctx: Ctx) -> SyntaxResult<Node<Pat>> {
    let pat = self.with_loc(|p| {
      p.expect(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      while !p.at(TT::BraceClose) {
        if p.eat(TT::DotDotDot) {
          rest = Some(p.id_pat(ctx)?);
          break;
        };
        properties.push(p.with_loc(|p| {
          let key = p.member_key(ctx)?;
          if p.eat(TT::Colon) {
            let target = p.pat(ctx)?;
            let default_value = p.pat_default(ctx)?;
            return Ok(ObjPatProp {
              key,
              target,
              shorthand: false,
              default_value,
            });
          };
          let ClassOrObjKey::Direct(direct) = &key else {
            return Err(p.peek().error(SyntaxErrorType::RequiredTokenNotFound(TT::Colon)));
          };
          if !ctx.is_binding_ident(direct.stx.tt) {
            return Err(direct.error(SyntaxErrorType::ExpectedSyntax("identifier")));
          };
          let target = direct
            .derive_stx(|k| IdPat { name: k.key.clone() })
            .into_wrapped();
          let default_value = p.pat_default(ctx)?;
          Ok(ObjPatProp {
            key,
            target,
            shorthand: true,
            default_value,
          })
        })?);
        if !p.eat(TT::Comma) {
          break;
        };
      }
      p.expect(TT::BraceClose)?;
      Ok(ObjPat { properties, rest })
    })?;
    Ok(pat.into_wrapped())
  }

  fn arr_pat(&mut self, ctx: Ctx) -> SyntaxResult<Node<Pat>> {
    let pat = self.with_loc(|p| {
      p.expect(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      loop {
        if p.eat(TT::Comma) {
          elements.push(None);
          continue;
        };
        if p.at(TT::BracketClose) {
          break;
        };
        if p.eat(TT::DotDotDot) {
          rest = Some(p.pat(ctx)?);
          break;
        };
        let target = p.pat(ctx)?;
        let default_value = p.pat_default(ctx)?;
        elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
        if !p.eat(TT::Comma) {
          break;
        };
      }
      p.expect(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })?;
    Ok(pat.into_wrapped())
  }

  pub(crate) fn pat_decl(&mut self, ctx: Ctx) -> SyntaxResult<Node<PatDecl>> {
    let pat = self.pat(ctx)?;
    Ok(Node::new(pat.loc, PatDecl { pat }))
  }

  pub(crate) fn var_mode(&mut self) -> SyntaxResult<VarDeclMode> {
    let t = self.bump();
    Ok(match t.typ {
      TT::KeywordConst => VarDeclMode::Const,
      TT::KeywordLet => VarDeclMode::Let,
      TT::KeywordVar => VarDeclMode::Var,
      _ => return Err(t.error(SyntaxErrorType::ExpectedSyntax("variable declaration"))),
    })
  }

  pub(crate) fn declarator_init(
    &mut self,
    ctx: Ctx,
    pattern: Node<PatDecl>,
  ) -> SyntaxResult<VarDeclarator> {
    let initializer = match self.eat(TT::Equals) {
      true => Some(self.assignment(ctx)?),
      false => None,
    };
    Ok(VarDeclarator {
      pattern,
      initializer,
    })
  }

  /// Declarators after the first, which has already been parsed.
  pub(crate) fn more_declarators(
    &mut self,
    ctx: Ctx,
    declarators: &mut Vec<VarDeclarator>,
  ) -> SyntaxResult<()> {
    while self.eat(TT::Comma) {
      let pattern = self.pat_decl(ctx)?;
      declarators.push(self.declarator_init(ctx, pattern)?);
    }
    Ok(())
  }

  /// `var`, `let` or `const` with its declarators, ending with a semicolon.
  pub(crate) fn var_decl(
    &mut self,
    ctx: Ctx,
    start: usize,
    export: bool,
  ) -> SyntaxResult<Node<VarDecl>> {
    let mode = self.var_mode()?;
    let mut declarators = Vec::new();
    let pattern = self.pat_decl(ctx)?;
    declarators.push(self.declarator_init(ctx, pattern)?);
    self.more_declarators(ctx, &mut declarators)?;
    self.semicolon()?;
    Ok(Node::new(self.loc_from(start), VarDecl {
      export,
      mode,
      declarators,
    }))
  }

  pub(crate) fn params(&mut self, ctx: Ctx) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.expect(TT::ParenthesisOpen)?;
    let mut params = Vec::new();
    while !self.at(TT::ParenthesisClose) {
      let param = self.with_loc(|p| {
        let rest = p.eat(TT::DotDotDot);
        let pattern = p.pat_decl(ctx)?;
        let default_value = match rest {
          true => None,
          false => p.pat_default(ctx)?,
        };
        Ok(ParamDecl {
          rest,
          pattern,
          default_value,
        })
      })?;
      let rest = param.stx.rest;
      params.push(param);
      // Nothing, not even a trailing comma, can follow the rest parameter.
      if rest || !self.eat(TT::Comma) {
        break;
      };
    }
    self.expect(TT::ParenthesisClose)?;
    Ok(params)
  }

  pub(crate) fn fn_block(&mut self, ctx: Ctx) -> SyntaxResult<Vec<Node<Stmt>>> {
    self.expect(TT::BraceOpen)?;
    let body = self.stmts(ctx, TT::BraceClose)?;
    self.expect(TT::BraceClose)?;
    Ok(body)
  }

  /// Parameters and block body, starting at `(`.
  pub(crate) fn func(&mut self, async_: bool, generator: bool) -> SyntaxResult<Node<Func>> {
    let ctx = Ctx::fn_body(async_, generator);
    self.with_loc(|p| {
      let parameters = p.params(ctx)?;
      let body = FuncBody::Block(p.fn_block(ctx)?);
      Ok(Func {
        arrow: false,
        async_,
        generator,
        parameters,
        body,
      })
    })
  }

  /// Consumes `async`, `function` and `*` as present.
  fn func_keywords(&mut self) -> SyntaxResult<(bool, bool)> {
    let async_ = self.eat(TT::KeywordAsync);
    self.expect(TT::KeywordFunction)?;
    let generator = self.eat(TT::Asterisk);
    Ok((async_, generator))
  }

  fn class_or_func_name(&mut self, ctx: Ctx) -> SyntaxResult<Option<Node<ClassOrFuncName>>> {
    if !ctx.is_binding_ident(self.peek().typ) {
      return Ok(None);
    };
    let (loc, name) = self.binding_name(ctx)?;
    Ok(Some(Node::new(loc, ClassOrFuncName { name })))
  }

  /// A function declaration from `start`, the position of `export` if there is one.
  pub(crate) fn func_decl(
    &mut self,
    ctx: Ctx,
    start: usize,
    export: bool,
    export_default: bool,
  ) -> SyntaxResult<Node<FuncDecl>> {
    let kw = self.peek();
    let (async_, generator) = self.func_keywords()?;
    let name = self.class_or_func_name(ctx)?;
    if name.is_none() && !export_default {
      return Err(kw.loc.error(SyntaxErrorType::ExpectedSyntax("function name"), None));
    };
    let function = self.func(async_, generator)?;
    Ok(Node::new(self.loc_from(start), FuncDecl {
      export,
      export_default,
      name,
      function,
    }))
  }

  pub(crate) fn func_expr(&mut self, ctx: Ctx) -> SyntaxResult<Node<FuncExpr>> {
    self.with_loc(|p| {
      let (async_, generator) = p.func_keywords()?;
      // The name of a function expression follows the rules of its own body.
      let name_ctx = Ctx {
        await_is_ident: ctx.await_is_ident && !async_,
        yield_is_ident: ctx.yield_is_ident && !generator,
        ..ctx
      };
      let name = p.class_or_func_name(name_ctx)?;
      let func = p.func(async_, generator)?;
      Ok(FuncExpr { name, func })
    })
  }

  fn class_heritage(&mut self, ctx: Ctx) -> SyntaxResult<Option<Node<Expr>>> {
    match self.eat(TT::KeywordExtends) {
      true => Ok(Some(self.lhs(ctx)?)),
      false => Ok(None),
    }
  }

  pub(crate) fn class_decl(
    &mut self,
    ctx: Ctx,
    start: usize,
    export: bool,
    export_default: bool,
  ) -> SyntaxResult<Node<ClassDecl>> {
    let kw = self.expect(TT::KeywordClass)?;
    let name = self.class_or_func_name(ctx)?;
    if name.is_none() && !export_default {
      return Err(kw.loc.error(SyntaxErrorType::ExpectedSyntax("class name"), None));
    };
    let extends = self.class_heritage(ctx)?;
    let members = self.class_body(ctx)?;
    Ok(Node::new(self.loc_from(start), ClassDecl {
      export,
      export_default,
      name,
      extends,
      members,
    }))
  }

  pub(crate) fn class_expr(&mut self, ctx: Ctx) -> SyntaxResult<Node<ClassExpr>> {
    self.with_loc(|p| {
      p.expect(TT::KeywordClass)?;
      let name = p.class_or_func_name(ctx)?;
      let extends = p.class_heritage(ctx)?;
      let members = p.class_body(ctx)?;
      Ok(ClassExpr {
        name,
        extends,
        members,
      })
    })
  }
}
