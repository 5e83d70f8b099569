use crate::precedence::ASSIGNMENT;
use crate::precedence::CALL_MEMBER_PRECEDENCE;
use crate::Generator;
use parse_js::ast::expr::pat::ArrPat;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::pat::ObjPat;
use parse_js::ast::expr::pat::ObjPatProp;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::expr::Expr;
use parse_js::ast::node::Node;

impl Generator<'_> {
  pub(crate) fn emit_pat(&mut self, pat: &Node<Pat>) {
    match pat.stx.as_ref() {
      Pat::Arr(arr) => self.emit_arr_pat(arr),
      Pat::Id(id) => self.emit_id_pat(id),
      Pat::Obj(obj) => self.emit_obj_pat(obj),
      Pat::AssignTarget(expr) => self.emit_expr(expr, CALL_MEMBER_PRECEDENCE),
    };
  }

  pub(crate) fn emit_id_pat(&mut self, id: &Node<IdPat>) {
    let name = self.name(&id.stx.name);
    self.out.write_identifier(name);
  }

  pub(crate) fn emit_arr_pat(&mut self, arr: &Node<ArrPat>) {
    self.out.write_punct("[");
    self.nested(|g| {
      let elements = &arr.stx.elements;
      for (i, elem) in elements.iter().enumerate() {
        if i > 0 {
          g.out.write_comma();
        };
        if let Some(elem) = elem {
          g.emit_pat(&elem.target);
          g.emit_default(elem.default_value.as_ref());
        };
      }
      match &arr.stx.rest {
        Some(rest) => {
          if !elements.is_empty() {
            g.out.write_comma();
          };
          g.out.write_punct("...");
          g.emit_pat(rest);
        }
        None => {
          if matches!(elements.last(), Some(None)) {
            g.out.write_comma();
          };
        }
      };
    });
    self.out.write_punct("]");
  }

  pub(crate) fn emit_obj_pat(&mut self, obj: &Node<ObjPat>) {
    self.out.write_punct("{");
    self.nested(|g| {
      for (i, prop) in obj.stx.properties.iter().enumerate() {
        if i > 0 {
          g.out.write_comma();
        };
        g.emit_obj_pat_prop(prop);
      }
      if let Some(rest) = &obj.stx.rest {
        if !obj.stx.properties.is_empty() {
          g.out.write_comma();
        };
        g.out.write_punct("...");
        g.emit_pat(rest);
      };
    });
    self.out.write_punct("}");
  }

  fn emit_obj_pat_prop(&mut self, prop: &Node<ObjPatProp>) {
    match prop.stx.target.stx.as_ref() {
      // `{a}` must become `{a:b}` once the binding `a` is renamed to `b`, as the key stays `a`.
      Pat::Id(id) if prop.stx.shorthand => {
        let original = id.stx.name.as_str();
        let printed = self.name(original);
        if printed != original {
          self.out.write_identifier(original);
          self.out.write_punct(":");
        };
        self.out.write_identifier(printed);
      }
      _ => {
        self.emit_key(&prop.stx.key);
        self.out.write_punct(":");
        self.emit_pat(&prop.stx.target);
      }
    };
    self.emit_default(prop.stx.default_value.as_ref());
  }

  fn emit_default(&mut self, default: Option<&Node<Expr>>) {
    if let Some(default) = default {
      self.out.write_punct("=");
      self.emit_expr(default, ASSIGNMENT);
    };
  }
}
