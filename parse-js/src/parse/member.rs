use super::Ctx;
use super::Parser;
use crate::ast::class_or_object::ClassMember;
use crate::ast::class_or_object::ClassOrObjGetter;
use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjMethod;
use crate::ast::class_or_object::ClassOrObjSetter;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ClassStaticBlock;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitObjExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::IdExpr;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::operator::OperatorName;
use crate::token::Token;
use crate::token::TT;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Owner {
  Class,
  Object,
}

fn starts_key(t: Token) -> bool {
  matches!(
    t.typ,
    TT::BracketOpen
      | TT::Identifier
      | TT::LiteralBigInt
      | TT::LiteralNumber
      | TT::LiteralString
      | TT::PrivateMember
  ) || t.typ.is_keyword()
}

impl<'a> Parser<'a> {
  /// A member key like `a`, `'a'`, `#a`, `1` or `[expr]`. Direct keys keep their exact source text.
  pub(crate) fn member_key(&mut self, ctx: Ctx) -> SyntaxResult<ClassOrObjKey> {
    if self.eat(TT::BracketOpen) {
      let key = self.assignment(ctx.with_in())?;
      self.expect(TT::BracketClose)?;
      return Ok(ClassOrObjKey::Computed(key));
    };
    let t = self.bump();
    if !starts_key(t) || t.typ == TT::BracketOpen {
      return Err(t.error(SyntaxErrorType::ExpectedSyntax("keyword or identifier")));
    };
    Ok(ClassOrObjKey::Direct(Node::new(t.loc, ClassOrObjMemberDirectKey {
      key: self.text(t.loc).to_string(),
      tt: t.typ,
    })))
  }

  // One of:
  // - `get` or `set`, then a key and a function
  // - `async` and/or `*`, then a key and a function
  // - a key and a function
  // - a key, optionally followed by the owner's delimiter and a value
  fn member_value(
    &mut self,
    owner: Owner,
    ctx: Ctx,
  ) -> SyntaxResult<(ClassOrObjKey, ClassOrObjVal)> {
    let t0 = self.peek();
    let t1 = self.peek_nth(1);
    // `get`, `set`, and `async` are modifiers only if a key follows on the same line; otherwise they're the key.
    let modifies = starts_key(t1) && !t1.newline_before;
    match t0.typ {
      TT::KeywordGet | TT::KeywordSet if modifies => {
        self.bump();
        let key = self.member_key(ctx)?;
        let func = self.func(false, false)?;
        let val = match t0.typ {
          TT::KeywordGet => func.wrap(|func| ClassOrObjGetter { func }).into(),
          _ => func.wrap(|func| ClassOrObjSetter { func }).into(),
        };
        return Ok((key, val));
      }
      TT::Asterisk => {
        self.bump();
        let key = self.member_key(ctx)?;
        let func = self.func(false, true)?;
        return Ok((key, func.wrap(|func| ClassOrObjMethod { func }).into()));
      }
      TT::KeywordAsync if modifies || (t1.typ == TT::Asterisk && !t1.newline_before) => {
        self.bump();
        let generator = self.eat(TT::Asterisk);
        let key = self.member_key(ctx)?;
        let func = self.func(true, generator)?;
        return Ok((key, func.wrap(|func| ClassOrObjMethod { func }).into()));
      }
      _ => {}
    };
    let key = self.member_key(ctx)?;
    if self.at(TT::ParenthesisOpen) {
      let func = self.func(false, false)?;
      return Ok((key, func.wrap(|func| ClassOrObjMethod { func }).into()));
    };
    let delimiter = match owner {
      Owner::Class => TT::Equals,
      Owner::Object => TT::Colon,
    };
    let value = match self.eat(delimiter) {
      true => Some(self.assignment(ctx.with_in())?),
      false => None,
    };
    Ok((key, ClassOrObjVal::Prop(value)))
  }

  pub(crate) fn lit_obj(&mut self, ctx: Ctx) -> SyntaxResult<Node<LitObjExpr>> {
    self.with_loc(|p| {
      p.expect(TT::BraceOpen)?;
      let mut members = Vec::new();
      while !p.at(TT::BraceClose) {
        members.push(p.with_loc(|p| p.obj_member(ctx))?);
        if !p.eat(TT::Comma) {
          break;
        };
      }
      p.expect(TT::BraceClose)?;
      Ok(LitObjExpr { members })
    })
  }

  fn obj_member(&mut self, ctx: Ctx) -> SyntaxResult<ObjMember> {
    if self.eat(TT::DotDotDot) {
      let val = self.assignment(ctx.with_in())?;
      return Ok(ObjMember {
        typ: ObjMemberType::Rest { val },
      });
    };
    let (key, val) = self.member_value(Owner::Object, ctx)?;
    let typ = match (key, val) {
      (ClassOrObjKey::Direct(key), ClassOrObjVal::Prop(None)) => {
        if !ctx.is_binding_ident(key.stx.tt) {
          return Err(key.error(SyntaxErrorType::ExpectedSyntax("identifier")));
        };
        let id = key.derive_stx(|k| IdExpr { name: k.key.clone() });
        // `{ a = 1 }` is only valid once it turns out to be a pattern, where it's a default value.
        if self.eat(TT::Equals) {
          let default_value = self.assignment(ctx.with_in())?;
          let loc = id.loc + default_value.loc;
          let value = Node::new(loc, BinaryExpr {
            operator: OperatorName::Assignment,
            left: id.into_wrapped(),
            right: default_value,
          });
          ObjMemberType::Valued {
            key: ClassOrObjKey::Direct(key),
            val: ClassOrObjVal::Prop(Some(value.into_wrapped())),
          }
        } else {
          ObjMemberType::Shorthand { id }
        }
      }
      (ClassOrObjKey::Computed(_), ClassOrObjVal::Prop(None)) => {
        return Err(self.peek().error(SyntaxErrorType::ExpectedSyntax("object literal value")));
      }
      (key, val) => ObjMemberType::Valued { key, val },
    };
    Ok(ObjMember { typ })
  }

  pub(crate) fn class_body(&mut self, ctx: Ctx) -> SyntaxResult<Vec<Node<ClassMember>>> {
    self.expect(TT::BraceOpen)?;
    let mut members = Vec::new();
    loop {
      while self.eat(TT::Semicolon) {}
      if self.eat(TT::BraceClose) {
        break;
      };
      members.push(self.with_loc(|p| p.class_member(ctx))?);
    }
    Ok(members)
  }

  fn class_member(&mut self, ctx: Ctx) -> SyntaxResult<ClassMember> {
    let t0 = self.peek();
    let t1 = self.peek_nth(1);
    // `static` is the member's own name in `static() {}` or `static = 1`.
    let static_ = t0.typ == TT::KeywordStatic
      && (starts_key(t1) || matches!(t1.typ, TT::Asterisk | TT::BraceOpen));
    if static_ {
      self.bump();
      if t1.typ == TT::BraceOpen {
        return self.static_block(t0);
      };
    };
    let (key, val) = self.member_value(Owner::Class, ctx)?;
    if matches!(val, ClassOrObjVal::Prop(_)) {
      self.semicolon()?;
    };
    Ok(ClassMember { key, static_, val })
  }

  fn static_block(&mut self, static_kw: Token) -> SyntaxResult<ClassMember> {
    let block = self.with_loc(|p| {
      let func = p.with_loc(|p| {
        let body = p.fn_block(Ctx {
          await_is_ident: false,
          ..Ctx::fn_body(false, false)
        })?;
        Ok(Func {
          arrow: false,
          async_: false,
          generator: false,
          parameters: Vec::new(),
          body: FuncBody::Block(body),
        })
      })?;
      Ok(ClassStaticBlock { func })
    })?;
    Ok(ClassMember {
      key: ClassOrObjKey::Direct(Node::new(static_kw.loc, ClassOrObjMemberDirectKey {
        key: "static".to_string(),
        tt: TT::KeywordStatic,
      })),
      static_: true,
      val: block.into(),
    })
  }
}
