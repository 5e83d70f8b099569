use crate::symbol::ScopeId;
use crate::symbol::ScopeTree;
use ahash::HashSet;
use ahash::HashSetExt;
use derive_visitor::Visitor;
use parse_js::ast::expr::pat::ClassOrFuncName;
use parse_js::ast::expr::pat::IdPat;
use parse_js::ast::expr::pat::Pat;
use parse_js::ast::expr::CallExpr;
use parse_js::ast::expr::ClassExpr;
use parse_js::ast::expr::Expr;
use parse_js::ast::expr::FuncExpr;
use parse_js::ast::expr::IdExpr;
use parse_js::ast::expr::VerbatimExpr;
use parse_js::ast::func::Func;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::decl::ClassDecl;
use parse_js::ast::stmt::decl::FuncDecl;
use parse_js::ast::stmt::decl::PatDecl;
use parse_js::ast::stmt::VerbatimStmt;
use parse_js::ast::stmt::WithStmt;
use parse_js::char::is_id_continue;
use parse_js::char::is_id_start;
use parse_js::loc::Loc;

type CallExprNode = Node<CallExpr>;
type ClassDeclNode = Node<ClassDecl>;
type ClassExprNode = Node<ClassExpr>;
type FuncDeclNode = Node<FuncDecl>;
type FuncExprNode = Node<FuncExpr>;
type FuncNode = Node<Func>;
type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;
type PatDeclNode = Node<PatDecl>;
type VerbatimExprNode = Node<VerbatimExpr>;
type VerbatimStmtNode = Node<VerbatimStmt>;
type WithStmtNode = Node<WithStmt>;

struct Reference {
  scope: ScopeId,
  name: String,
  // Set for words found in verbatim source text, which can never be rewritten.
  pin: bool,
}

/// Walks the AST once, creating a scope per function and declaring bindings into the nearest function scope. References are only resolved in `finish`, so a use that appears before its (hoisted) declaration still counts.
#[derive(Visitor)]
#[visitor(
  CallExprNode(enter),
  ClassDeclNode(enter),
  ClassExprNode(enter),
  FuncDeclNode(enter),
  FuncExprNode(enter),
  FuncNode(enter, exit),
  IdExprNode(enter),
  IdPatNode(enter),
  PatDeclNode(enter),
  VerbatimExprNode(enter),
  VerbatimStmtNode(enter),
  WithStmtNode(enter)
)]
pub struct DeclVisitor {
  tree: ScopeTree,
  stack: Vec<ScopeId>,
  // Name of a function expression, declared inside the function it names.
  pending_func_name: Option<String>,
  // IdPat nodes that are the bindings of a declaration rather than assignment targets.
  declared: HashSet<Loc>,
  references: Vec<Reference>,
  eval_calls: Vec<ScopeId>,
}

impl DeclVisitor {
  pub fn new() -> DeclVisitor {
    let tree = ScopeTree::new();
    let root = tree.root();
    DeclVisitor {
      tree,
      stack: vec![root],
      pending_func_name: None,
      declared: HashSet::new(),
      references: Vec::new(),
      eval_calls: Vec::new(),
    }
  }

  fn current(&self) -> ScopeId {
    *self.stack.last().unwrap_or(&self.tree.root())
  }

  fn declare_name(&mut self, name: &Option<Node<ClassOrFuncName>>) {
    if let Some(name) = name {
      let scope = self.current();
      self.tree.declare(scope, &name.stx.name);
    };
  }

  fn reference(&mut self, name: &str, pin: bool) {
    let scope = self.current();
    self.references.push(Reference {
      scope,
      name: name.to_string(),
      pin,
    });
  }

  fn mark_dynamic(&mut self, scope: ScopeId) {
    let chain: Vec<ScopeId> = self.tree.self_and_ancestors(scope).collect();
    for id in chain {
      self.tree.scope_mut(id).dynamic = true;
    }
  }

  fn declare_pat(&mut self, pat: &Node<Pat>) {
    match pat.stx.as_ref() {
      Pat::Id(id) => {
        let scope = self.current();
        self.tree.declare(scope, &id.stx.name);
        self.declared.insert(id.loc);
      }
      Pat::Arr(arr) => {
        for elem in arr.stx.elements.iter().flatten() {
          self.declare_pat(&elem.target);
        }
        if let Some(rest) = &arr.stx.rest {
          self.declare_pat(rest);
        };
      }
      Pat::Obj(obj) => {
        for prop in obj.stx.properties.iter() {
          self.declare_pat(&prop.stx.target);
        }
        if let Some(rest) = &obj.stx.rest {
          self.declare_pat(rest);
        };
      }
      Pat::AssignTarget(_) => {}
    };
  }

  fn enter_call_expr_node(&mut self, node: &CallExprNode) {
    if node.stx.optional_chaining {
      return;
    };
    if let Expr::Id(callee) = node.stx.callee.stx.as_ref() {
      if callee.stx.name == "eval" {
        let scope = self.current();
        self.eval_calls.push(scope);
      };
    };
  }

  fn enter_class_decl_node(&mut self, node: &ClassDeclNode) {
    self.declare_name(&node.stx.name);
  }

  fn enter_class_expr_node(&mut self, node: &ClassExprNode) {
    // The name is bound only inside the class body, which gets no scope. Whatever it shadows keeps its name, and no local here may take it.
    if let Some(name) = &node.stx.name {
      self.reference(&name.stx.name, true);
    };
  }

  fn enter_func_decl_node(&mut self, node: &FuncDeclNode) {
    self.declare_name(&node.stx.name);
  }

  fn enter_func_expr_node(&mut self, node: &FuncExprNode) {
    self.pending_func_name = node.stx.name.as_ref().map(|n| n.stx.name.clone());
  }

  fn enter_func_node(&mut self, node: &FuncNode) {
    let parent = self.current();
    let scope = self.tree.create_scope(parent, node.loc);
    self.stack.push(scope);
    if let Some(name) = self.pending_func_name.take() {
      self.tree.declare(scope, &name);
    };
  }

  fn exit_func_node(&mut self, _node: &FuncNode) {
    self.stack.pop();
  }

  fn enter_id_expr_node(&mut self, node: &IdExprNode) {
    // Private names are not variables.
    if !node.stx.name.starts_with('#') {
      self.reference(&node.stx.name, false);
    };
  }

  fn enter_id_pat_node(&mut self, node: &IdPatNode) {
    if !self.declared.contains(&node.loc) {
      self.reference(&node.stx.name, false);
    };
  }

  fn enter_pat_decl_node(&mut self, node: &PatDeclNode) {
    self.declare_pat(&node.stx.pat);
  }

  fn enter_verbatim_expr_node(&mut self, node: &VerbatimExprNode) {
    for word in identifier_words(&node.stx.text) {
      self.reference(word, true);
    }
  }

  fn enter_verbatim_stmt_node(&mut self, node: &VerbatimStmtNode) {
    for word in identifier_words(&node.stx.text) {
      self.reference(word, true);
    }
  }

  fn enter_with_stmt_node(&mut self, _node: &WithStmtNode) {
    let scope = self.current();
    self.mark_dynamic(scope);
  }

  /// Resolves every recorded reference and returns the completed tree.
  pub fn finish(mut self) -> ScopeTree {
    for Reference { scope, name, pin } in std::mem::take(&mut self.references) {
      match self.tree.resolve(scope, &name) {
        Some(symbol) => {
          let ident = self.tree.identifier_mut(symbol);
          ident.refcount += 1;
          ident.pinned |= pin;
          let between: Vec<ScopeId> = self
            .tree
            .self_and_ancestors(scope)
            .take_while(|&id| id != symbol.scope)
            .collect();
          for id in between {
            self.tree.scope_mut(id).foreign.insert(symbol);
          }
        }
        None => {
          let chain: Vec<ScopeId> = self.tree.self_and_ancestors(scope).collect();
          for id in chain {
            self.tree.scope_mut(id).unknown.insert(name.clone());
          }
        }
      };
    }
    // Only a call to the real `eval` can see local names.
    for scope in std::mem::take(&mut self.eval_calls) {
      if self.tree.resolve(scope, "eval").is_none() {
        self.mark_dynamic(scope);
      };
    }
    self.tree
  }
}

/// Identifier-like words of raw source text, skipping string contents, number literals and property names after a dot.
pub fn identifier_words(text: &str) -> Vec<&str> {
  let mut words = Vec::new();
  let mut chars = text.char_indices().peekable();
  let mut after_dot = false;
  while let Some((start, c)) = chars.next() {
    if c == '"' || c == '\'' || c == '`' {
      let mut escaped = false;
      for (_, d) in chars.by_ref() {
        if escaped {
          escaped = false;
        } else if d == '\\' {
          escaped = true;
        } else if d == c {
          break;
        };
      }
      after_dot = false;
    } else if is_id_start(c) || !c.is_ascii() || c.is_ascii_digit() {
      let mut end = start + c.len_utf8();
      while let Some(&(i, d)) = chars.peek() {
        if !(is_id_continue(d) || !d.is_ascii()) {
          break;
        };
        end = i + d.len_utf8();
        chars.next();
      }
      if !after_dot && !c.is_ascii_digit() {
        words.push(&text[start..end]);
      };
      after_dot = false;
    } else if c == '.' {
      after_dot = true;
    } else if !c.is_whitespace() {
      after_dot = false;
    };
  }
  words
}
