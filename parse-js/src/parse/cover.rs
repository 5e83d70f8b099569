// Array literals, object literals and parenthesized lists are parsed as expressions first. Once an `=` or `=>` shows they were patterns or parameters, they're converted here, so the parser never has to back up.

use crate::ast::class_or_object::ClassOrObjKey;
use crate::ast::class_or_object::ClassOrObjMemberDirectKey;
use crate::ast::class_or_object::ClassOrObjVal;
use crate::ast::class_or_object::ObjMember;
use crate::ast::class_or_object::ObjMemberType;
use crate::ast::expr::lit::LitArrElem;
use crate::ast::expr::pat::ArrPat;
use crate::ast::expr::pat::ArrPatElem;
use crate::ast::expr::pat::IdPat;
use crate::ast::expr::pat::ObjPat;
use crate::ast::expr::pat::ObjPatProp;
use crate::ast::expr::pat::Pat;
use crate::ast::expr::CallArg;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::ast::stmt::decl::ParamDecl;
use crate::ast::stmt::decl::PatDecl;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::operator::OperatorName;
use crate::token::TT;

fn invalid(loc: Loc) -> SyntaxError {
  loc.error(SyntaxErrorType::InvalidAssigmentTarget, None)
}

/// Splits `target = default` into its parts. Anything else is a target without a default.
fn split_default(node: Node<Expr>) -> SyntaxResult<(Node<Pat>, Option<Node<Expr>>)> {
  let loc = node.loc;
  match *node.stx {
    Expr::Binary(assign) if assign.stx.operator == OperatorName::Assignment => {
      let assign = *assign.stx;
      Ok((expr_to_pat(assign.left)?, Some(assign.right)))
    }
    stx => Ok((expr_to_pat(Node::new(loc, stx))?, None)),
  }
}

fn arr_to_pat(loc: Loc, elements: Vec<LitArrElem>) -> SyntaxResult<Node<Pat>> {
  let mut pat = ArrPat {
    elements: Vec::with_capacity(elements.len()),
    rest: None,
  };
  for element in elements {
    if pat.rest.is_some() {
      return Err(invalid(loc));
    };
    match element {
      LitArrElem::Empty => pat.elements.push(None),
      LitArrElem::Rest(target) => pat.rest = Some(expr_to_pat(target)?),
      LitArrElem::Single(element) => {
        let (target, default_value) = split_default(element)?;
        pat.elements.push(Some(ArrPatElem {
          target,
          default_value,
        }));
      }
    };
  }
  Ok(Node::new(loc, pat).into_wrapped())
}

fn obj_to_pat(loc: Loc, members: Vec<Node<ObjMember>>) -> SyntaxResult<Node<Pat>> {
  let mut pat = ObjPat {
    properties: Vec::with_capacity(members.len()),
    rest: None,
  };
  for member in members {
    let member_loc = member.loc;
    if pat.rest.is_some() {
      return Err(invalid(member_loc));
    };
    let prop = match member.stx.typ {
      ObjMemberType::Rest { val } => {
        pat.rest = Some(expr_to_pat(val)?);
        continue;
      }
      ObjMemberType::Shorthand { id } => ObjPatProp {
        key: ClassOrObjKey::Direct(id.derive_stx(|id| ClassOrObjMemberDirectKey {
          key: id.name.clone(),
          tt: TT::Identifier,
        })),
        target: id.derive_stx(|id| IdPat { name: id.name.clone() }).into_wrapped(),
        shorthand: true,
        default_value: None,
      },
      ObjMemberType::Valued {
        key,
        val: ClassOrObjVal::Prop(Some(value)),
      } => {
        let (target, default_value) = split_default(value)?;
        // `{ a = 1 }` keeps its key's location on the target, which tells it apart from `{ a: a = 1 }`.
        let shorthand = match (&key, target.stx.as_ref()) {
          (ClassOrObjKey::Direct(key), Pat::Id(_)) => key.loc == target.loc,
          _ => false,
        };
        ObjPatProp {
          key,
          target,
          shorthand,
          default_value,
        }
      }
      ObjMemberType::Valued { .. } => return Err(invalid(member_loc)),
    };
    pat.properties.push(Node::new(member_loc, prop));
  }
  Ok(Node::new(loc, pat).into_wrapped())
}

/// Reinterprets an expression as a destructuring or assignment target.
pub fn expr_to_pat(node: Node<Expr>) -> SyntaxResult<Node<Pat>> {
  let loc = node.loc;
  match *node.stx {
    Expr::LitArr(arr) => arr_to_pat(loc, arr.stx.elements),
    Expr::LitObj(obj) => obj_to_pat(loc, obj.stx.members),
    Expr::Id(id) => Ok(Node::new(loc, IdPat { name: id.stx.name }).into_wrapped()),
    // Already converted by a nested assignment such as `[a = 1] = b`.
    Expr::IdPat(pat) => Ok(pat.into_wrapped()),
    Expr::ArrPat(pat) => Ok(pat.into_wrapped()),
    Expr::ObjPat(pat) => Ok(pat.into_wrapped()),
    stx @ (Expr::Member(_) | Expr::ComputedMember(_)) if !is_optional_chain(&stx) => {
      Ok(Node::new(loc, Pat::AssignTarget(Node::new(loc, stx))))
    }
    _ => Err(invalid(loc)),
  }
}

fn is_optional_chain(expr: &Expr) -> bool {
  match expr {
    Expr::Member(m) => m.stx.optional_chaining,
    Expr::ComputedMember(m) => m.stx.optional_chaining,
    _ => false,
  }
}

/// Checks and converts the left side of an assignment. Only `=` can destructure; compound operators need a plain variable or member.
pub fn assign_target(lhs: Node<Expr>, operator: OperatorName) -> SyntaxResult<Node<Expr>> {
  match lhs.stx.as_ref() {
    Expr::LitArr(_) | Expr::LitObj(_) | Expr::ArrPat(_) | Expr::ObjPat(_)
      if operator != OperatorName::Assignment =>
    {
      Err(lhs.error(SyntaxErrorType::InvalidAssigmentTarget))
    }
    Expr::LitArr(_) | Expr::LitObj(_) | Expr::Id(_) => Ok(expr_to_pat(lhs)?.into_stx()),
    Expr::IdPat(_) | Expr::ArrPat(_) | Expr::ObjPat(_) => Ok(lhs),
    stx @ (Expr::Member(_) | Expr::ComputedMember(_)) if !is_optional_chain(stx) => Ok(lhs),
    _ => Err(lhs.error(SyntaxErrorType::InvalidAssigmentTarget)),
  }
}

// Declarations bind names only, so member targets are rejected anywhere inside a parameter.
fn binds_only_names(pat: &Pat) -> bool {
  match pat {
    Pat::Id(_) => true,
    Pat::AssignTarget(_) => false,
    Pat::Arr(arr) => {
      arr
        .stx
        .elements
        .iter()
        .flatten()
        .all(|e| binds_only_names(&e.target.stx))
        && arr.stx.rest.as_ref().map_or(true, |r| binds_only_names(&r.stx))
    }
    Pat::Obj(obj) => {
      obj
        .stx
        .properties
        .iter()
        .all(|p| binds_only_names(&p.stx.target.stx))
        && obj.stx.rest.as_ref().map_or(true, |r| binds_only_names(&r.stx))
    }
  }
}

/// Converts an item of a parenthesized list into an arrow function parameter.
pub fn arg_to_param(arg: Node<CallArg>) -> SyntaxResult<Node<ParamDecl>> {
  let loc = arg.loc;
  let CallArg { spread, value } = *arg.stx;
  let (target, default_value) = split_default(value)?;
  if !binds_only_names(&target.stx) || (spread && default_value.is_some()) {
    return Err(invalid(loc));
  };
  Ok(Node::new(loc, ParamDecl {
    rest: spread,
    pattern: Node::new(target.loc, PatDecl { pat: target }),
    default_value,
  }))
}
