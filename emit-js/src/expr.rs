use crate::escape::emit_string_literal;
use crate::precedence::child_min_prec_for_binary;
use crate::precedence::expr_prec;
use crate::precedence::is_integer_literal;
use crate::precedence::mixes_nullish_with_logical;
use crate::precedence::new_callee_needs_parens;
use crate::precedence::operator_prec;
use crate::precedence::Prec;
use crate::precedence::Side;
use crate::precedence::ASSIGNMENT;
use crate::precedence::CALL_MEMBER_PRECEDENCE;
use crate::precedence::EXPRESSION;
use crate::stmt_start::arrow_body_needs_parens;
use crate::Generator;
use parse_js::ast::class_or_object::ClassMember;
use parse_js::ast::class_or_object::ClassOrObjKey;
use parse_js::ast::class_or_object::ClassOrObjVal;
use parse_js::ast::class_or_object::ObjMember;
use parse_js::ast::class_or_object::ObjMemberType;
use parse_js::ast::expr::lit::LitArrElem;
use parse_js::ast::expr::lit::LitTemplatePart;
use parse_js::ast::expr::pat::ClassOrFuncName;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::expr::BinaryExpr;
use parse_js::ast::expr::CallArg;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::UnaryExpr;
use parse_js::ast::func::Func;
use parse_js::ast::func::FuncBody;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ParamDecl;
use parse_js::operator::OperatorName;
use parse_js::token::TT;
use tracing::debug;

impl Generator<'_> {
  pub(crate) fn emit_expr(&mut self, expr: &Node<Expr>, min_prec: Prec) {
    let bare_in = self.no_in
      && matches!(expr.stx.as_ref(), Expr::Binary(b) if b.stx.operator == OperatorName::In);
    if expr_prec(expr) < min_prec || bare_in {
      self.emit_parenthesized(expr);
    } else {
      self.emit_expr_no_parens(expr);
    }
  }

  pub(crate) fn emit_parenthesized(&mut self, expr: &Node<Expr>) {
    self.out.write_punct("(");
    self.nested(|g| g.emit_expr_no_parens(expr));
    self.out.write_punct(")");
  }

  fn emit_expr_no_parens(&mut self, expr: &Node<Expr>) {
    match expr.stx.as_ref() {
      Expr::ArrowFunc(arrow) => self.emit_arrow(&arrow.stx.func),
      Expr::Binary(binary) => self.emit_binary(binary),
      Expr::Call(call) => {
        self.emit_expr(&call.stx.callee, CALL_MEMBER_PRECEDENCE);
        if call.stx.optional_chaining {
          self.out.write_punct("?.");
        };
        self.emit_args(&call.stx.arguments);
      }
      Expr::Class(class) => {
        let name = class.stx.name.as_ref().map(|n| self.name(&n.stx.name));
        self.emit_class(name, class.stx.extends.as_ref(), &class.stx.members);
      }
      Expr::ComputedMember(member) => {
        self.emit_expr(&member.stx.object, CALL_MEMBER_PRECEDENCE);
        self.out.write_punct(if member.stx.optional_chaining {
          "?.["
        } else {
          "["
        });
        self.nested(|g| g.emit_expr(&member.stx.member, EXPRESSION));
        self.out.write_punct("]");
      }
      Expr::Cond(cond) => {
        let test_prec = operator_prec(OperatorName::Conditional).tighter();
        self.emit_expr(&cond.stx.test, test_prec);
        self.out.write_punct("?");
        self.nested(|g| g.emit_expr(&cond.stx.consequent, ASSIGNMENT));
        self.out.write_punct(":");
        self.emit_expr(&cond.stx.alternate, ASSIGNMENT);
      }
      Expr::Func(func) => self.emit_function(func.stx.name.as_ref(), &func.stx.func, true),
      Expr::Id(id) => {
        let name = self.name(&id.stx.name);
        self.out.write_identifier(name);
      }
      Expr::Import(import) => {
        self.out.write_keyword("import");
        self.out.write_punct("(");
        self.nested(|g| g.emit_expr(&import.stx.module, ASSIGNMENT));
        self.out.write_punct(")");
      }
      Expr::ImportMeta(_) => {
        self.out.write_keyword("import");
        self.out.write_punct(".");
        self.out.write_identifier("meta");
      }
      Expr::Member(member) => {
        if !member.stx.optional_chaining && is_integer_literal(&member.stx.left) {
          self.emit_parenthesized(&member.stx.left);
        } else {
          self.emit_expr(&member.stx.left, CALL_MEMBER_PRECEDENCE);
        };
        self.out.write_punct(if member.stx.optional_chaining {
          "?."
        } else {
          "."
        });
        self.out.write_identifier(&member.stx.right);
      }
      Expr::New(new) => {
        self.out.write_keyword("new");
        if new_callee_needs_parens(&new.stx.callee) {
          self.emit_parenthesized(&new.stx.callee);
        } else {
          self.emit_expr(&new.stx.callee, CALL_MEMBER_PRECEDENCE);
        };
        if let Some(arguments) = &new.stx.arguments {
          self.emit_args(arguments);
        };
      }
      Expr::NewTarget(_) => {
        self.out.write_keyword("new");
        self.out.write_punct(".");
        self.out.write_identifier("target");
      }
      Expr::Super(_) => self.out.write_keyword("super"),
      Expr::TaggedTemplate(tagged) => {
        self.emit_expr(&tagged.stx.function, CALL_MEMBER_PRECEDENCE);
        self.emit_template(&tagged.stx.parts);
      }
      Expr::This(_) => self.out.write_keyword("this"),
      Expr::Unary(unary) => self.emit_unary(unary),
      Expr::UnaryPostfix(postfix) => {
        self.emit_expr(&postfix.stx.argument, CALL_MEMBER_PRECEDENCE);
        self.out.write_punct(postfix.stx.operator.syntax());
      }
      Expr::Verbatim(verbatim) => {
        // Only a string literal that can't be decoded, or the empty argument of a bare `yield`.
        debug!(len = verbatim.stx.text.len(), "emitting expression as source text");
        self.out.write_literal(&verbatim.stx.text);
      }
      Expr::LitArr(arr) => {
        self.out.write_punct("[");
        self.nested(|g| {
          for (i, elem) in arr.stx.elements.iter().enumerate() {
            if i > 0 {
              g.out.write_comma();
            };
            match elem {
              LitArrElem::Single(value) => g.emit_expr(value, ASSIGNMENT),
              LitArrElem::Rest(value) => {
                g.out.write_punct("...");
                g.emit_expr(value, ASSIGNMENT);
              }
              LitArrElem::Empty => {}
            };
          }
          // A trailing hole needs its own comma, since one trailing comma is dropped.
          if matches!(arr.stx.elements.last(), Some(LitArrElem::Empty)) {
            g.out.write_comma();
          };
        });
        self.out.write_punct("]");
      }
      Expr::LitBigInt(lit) => self.out.write_number(&lit.stx.value),
      Expr::LitBool(lit) => self
        .out
        .write_keyword(if lit.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => self.out.write_keyword("null"),
      Expr::LitNum(lit) => self.out.write_number(&lit.stx.value),
      Expr::LitObj(obj) => self.emit_obj(&obj.stx.members),
      Expr::LitRegex(lit) => self.out.write_literal(&lit.stx.value),
      Expr::LitStr(lit) => {
        let mut text = String::new();
        emit_string_literal(&mut text, &lit.stx.value, lit.stx.quote);
        self.out.write_literal(&text);
      }
      Expr::LitTemplate(template) => self.emit_template(&template.stx.parts),
      Expr::ArrPat(pat) => self.emit_arr_pat(pat),
      Expr::IdPat(pat) => self.emit_id_pat(pat),
      Expr::ObjPat(pat) => self.emit_obj_pat(pat),
    }
  }

  fn emit_binary(&mut self, binary: &Node<BinaryExpr>) {
    let op = binary.stx.operator;
    let left = &binary.stx.left;
    // `-a ** b` is a syntax error, so a unary base is always wrapped.
    let unary_base = op == OperatorName::Exponentiation && matches!(left.stx.as_ref(), Expr::Unary(_));
    if unary_base || mixes_nullish_with_logical(op, left) {
      self.emit_parenthesized(left);
    } else {
      self.emit_expr(left, child_min_prec_for_binary(op, Side::Left));
    };

    match op {
      OperatorName::In | OperatorName::Instanceof => self.out.write_keyword(op.syntax()),
      _ => self.out.write_punct(op.syntax()),
    };

    let right = &binary.stx.right;
    if mixes_nullish_with_logical(op, right) {
      self.emit_parenthesized(right);
    } else {
      self.emit_expr(right, child_min_prec_for_binary(op, Side::Right));
    };
  }

  fn emit_unary(&mut self, unary: &Node<UnaryExpr>) {
    let op = unary.stx.operator;
    let argument = &unary.stx.argument;
    match op {
      OperatorName::Yield | OperatorName::YieldDelegated => {
        self.out.write_keyword("yield");
        if op == OperatorName::YieldDelegated {
          self.out.write_punct("*");
        };
        // A bare `yield` carries an empty placeholder argument.
        if matches!(argument.stx.as_ref(), Expr::Verbatim(v) if v.stx.text.is_empty()) {
          return;
        };
        self.emit_expr(argument, ASSIGNMENT);
      }
      OperatorName::Await | OperatorName::Delete | OperatorName::Typeof | OperatorName::Void => {
        self.out.write_keyword(op.syntax());
        self.emit_expr(argument, operator_prec(op));
      }
      _ => {
        self.out.write_punct(op.syntax());
        self.emit_expr(argument, operator_prec(op));
      }
    };
  }

  fn emit_args(&mut self, args: &[Node<CallArg>]) {
    self.out.write_punct("(");
    self.nested(|g| {
      for (i, arg) in args.iter().enumerate() {
        if i > 0 {
          g.out.write_comma();
        };
        if arg.stx.spread {
          g.out.write_punct("...");
        };
        g.emit_expr(&arg.stx.value, ASSIGNMENT);
      }
    });
    self.out.write_punct(")");
  }

  fn emit_template(&mut self, parts: &[LitTemplatePart]) {
    self.out.open_literal("`");
    for part in parts {
      match part {
        LitTemplatePart::String(raw) => self.out.write_raw_str(raw),
        LitTemplatePart::Substitution(expr) => {
          self.out.write_raw_str("${");
          self.nested(|g| g.emit_expr(expr, EXPRESSION));
          self.out.write_raw_str("}");
        }
      };
    }
    self.out.close_literal("`");
  }

  fn emit_arrow(&mut self, func: &Node<Func>) {
    self.in_func_scope(func, |g| {
      if func.stx.async_ {
        g.out.write_keyword("async");
      };
      match func.stx.parameters.as_slice() {
        [param] if is_plain_name(param) => g.emit_pat(&param.stx.pattern.stx.pat),
        params => g.emit_params(params),
      };
      g.out.write_punct("=>");
      match &func.stx.body {
        FuncBody::Expression(body) if arrow_body_needs_parens(body) => g.emit_parenthesized(body),
        FuncBody::Expression(body) => g.emit_expr(body, ASSIGNMENT),
        FuncBody::Block(body) => g.emit_block(body),
      };
    });
  }

  /// Prints a `function` declaration or expression. A declaration's name belongs to the enclosing scope; an expression's name to the function itself.
  pub(crate) fn emit_function(
    &mut self,
    name: Option<&Node<ClassOrFuncName>>,
    func: &Node<Func>,
    name_in_own_scope: bool,
  ) {
    let outer_name = name.map(|n| self.name(&n.stx.name));
    if func.stx.async_ {
      self.out.write_keyword("async");
    };
    self.out.write_keyword("function");
    if func.stx.generator {
      self.out.write_punct("*");
    };
    self.in_func_scope(func, |g| {
      let printed = match name {
        Some(n) if name_in_own_scope => Some(g.name(&n.stx.name)),
        _ => outer_name,
      };
      if let Some(printed) = printed {
        g.out.write_identifier(printed);
      };
      g.emit_params(&func.stx.parameters);
      g.emit_func_body(&func.stx.body);
    });
  }

  fn emit_params(&mut self, params: &[Node<ParamDecl>]) {
    self.out.write_punct("(");
    self.nested(|g| {
      for (i, param) in params.iter().enumerate() {
        if i > 0 {
          g.out.write_comma();
        };
        if param.stx.rest {
          g.out.write_punct("...");
        };
        g.emit_pat(&param.stx.pattern.stx.pat);
        if let Some(default) = &param.stx.default_value {
          g.out.write_punct("=");
          g.emit_expr(default, ASSIGNMENT);
        };
      }
    });
    self.out.write_punct(")");
  }

  fn emit_func_body(&mut self, body: &FuncBody) {
    match body {
      FuncBody::Block(stmts) => self.emit_block(stmts),
      FuncBody::Expression(expr) => {
        self.out.write_punct("{");
        self.out.write_keyword("return");
        self.emit_expr(expr, EXPRESSION);
        self.out.write_punct("}");
      }
    };
  }

  pub(crate) fn emit_class(
    &mut self,
    name: Option<&str>,
    extends: Option<&Node<Expr>>,
    members: &[Node<ClassMember>],
  ) {
    self.out.write_keyword("class");
    if let Some(name) = name {
      self.out.write_identifier(name);
    };
    if let Some(extends) = extends {
      self.out.write_keyword("extends");
      self.emit_expr(extends, CALL_MEMBER_PRECEDENCE);
    };
    self.out.write_punct("{");
    self.nested(|g| {
      for member in members {
        if let ClassOrObjVal::StaticBlock(block) = &member.stx.val {
          g.out.write_keyword("static");
          g.in_func_scope(&block.stx.func, |g| g.emit_func_body(&block.stx.func.stx.body));
          continue;
        };
        if member.stx.static_ {
          g.out.write_keyword("static");
        };
        g.emit_member(&member.stx.key, &member.stx.val, true);
      }
    });
    self.out.write_punct("}");
  }

  fn emit_obj(&mut self, members: &[Node<ObjMember>]) {
    self.out.write_punct("{");
    self.nested(|g| {
      for (i, member) in members.iter().enumerate() {
        if i > 0 {
          g.out.write_comma();
        };
        match &member.stx.typ {
          ObjMemberType::Valued { key, val } => g.emit_member(key, val, false),
          ObjMemberType::Shorthand { id } => {
            let original = id.stx.name.as_str();
            let printed = g.name(original);
            if printed != original {
              g.out.write_identifier(original);
              g.out.write_punct(":");
            };
            g.out.write_identifier(printed);
          }
          ObjMemberType::Rest { val } => {
            g.out.write_punct("...");
            g.emit_expr(val, ASSIGNMENT);
          }
        };
      }
    });
    self.out.write_punct("}");
  }

  pub(crate) fn emit_key(&mut self, key: &ClassOrObjKey) {
    match key {
      ClassOrObjKey::Direct(direct) if direct.stx.tt == TT::LiteralString => {
        self.out.write_literal(&direct.stx.key)
      }
      ClassOrObjKey::Direct(direct) => self.out.write_str(&direct.stx.key),
      ClassOrObjKey::Computed(expr) => {
        self.out.write_punct("[");
        self.nested(|g| g.emit_expr(expr, ASSIGNMENT));
        self.out.write_punct("]");
      }
    };
  }

  // Shared by class and object literal members.
  fn emit_member(&mut self, key: &ClassOrObjKey, val: &ClassOrObjVal, class: bool) {
    match val {
      ClassOrObjVal::Getter(getter) => {
        self.out.write_keyword("get");
        self.emit_key(key);
        self.emit_method_func(&getter.stx.func);
      }
      ClassOrObjVal::Setter(setter) => {
        self.out.write_keyword("set");
        self.emit_key(key);
        self.emit_method_func(&setter.stx.func);
      }
      ClassOrObjVal::Method(method) => {
        let func = &method.stx.func;
        if func.stx.async_ {
          self.out.write_keyword("async");
        };
        if func.stx.generator {
          self.out.write_punct("*");
        };
        self.emit_key(key);
        self.emit_method_func(func);
      }
      ClassOrObjVal::Prop(value) => {
        self.emit_key(key);
        if let Some(value) = value {
          self.out.write_punct(if class { "=" } else { ":" });
          self.emit_expr(value, ASSIGNMENT);
        };
        if class {
          self.out.write_semicolon();
        };
      }
      ClassOrObjVal::StaticBlock(block) => {
        self.out.write_keyword("static");
        self.in_func_scope(&block.stx.func, |g| g.emit_func_body(&block.stx.func.stx.body));
      }
    };
  }

  fn emit_method_func(&mut self, func: &Node<Func>) {
    self.in_func_scope(func, |g| {
      g.emit_params(&func.stx.parameters);
      g.emit_func_body(&func.stx.body);
    });
  }
}

fn is_plain_name(param: &Node<ParamDecl>) -> bool {
  !param.stx.rest
    && param.stx.default_value.is_none()
    && matches!(param.stx.pattern.stx.pat.stx.as_ref(), Pat::Id(_))
}
