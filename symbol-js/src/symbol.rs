use ahash::HashMap;
use ahash::HashMapExt;
use ahash::HashSet;
use ahash::HashSetExt;
use parse_js::loc::Loc;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
pub struct ScopeId(usize);

impl ScopeId {
  pub fn index(self) -> usize {
    self.0
  }
}

/// A declared binding: the scope that declares it and its position in that scope's declaration order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize)]
pub struct Symbol {
  pub scope: ScopeId,
  index: usize,
}

#[derive(Debug, Serialize)]
pub struct Identifier {
  pub name: String,
  // Number of resolved occurrences, including those in nested scopes.
  pub refcount: usize,
  pub assigned: Option<String>,
  // Pinned identifiers always keep their original name.
  pub pinned: bool,
}

impl Identifier {
  fn new(name: String) -> Identifier {
    Identifier {
      name,
      refcount: 0,
      assigned: None,
      pinned: false,
    }
  }

  pub fn effective_name(&self) -> &str {
    self.assigned.as_deref().unwrap_or(&self.name)
  }
}

#[derive(Debug)]
pub struct Scope {
  depth: usize,
  parent: Option<ScopeId>,
  children: Vec<ScopeId>,
  identifiers: Vec<Identifier>,
  names: HashMap<String, usize>,
  pub(crate) dynamic: bool,
  // Names referenced from this scope or a descendant that resolve to no binding.
  pub(crate) unknown: HashSet<String>,
  // Ancestor bindings referenced from this scope or a descendant.
  pub(crate) foreign: HashSet<Symbol>,
  // Indices of renamed identifiers, in the order names were handed out.
  pub(crate) assignment_order: Vec<usize>,
}

impl Scope {
  fn new(depth: usize, parent: Option<ScopeId>) -> Scope {
    Scope {
      depth,
      parent,
      children: Vec::new(),
      identifiers: Vec::new(),
      names: HashMap::new(),
      dynamic: false,
      unknown: HashSet::new(),
      foreign: HashSet::new(),
      assignment_order: Vec::new(),
    }
  }

  /// 0 for the global scope, incremented once per enclosing function.
  pub fn depth(&self) -> usize {
    self.depth
  }

  pub fn parent(&self) -> Option<ScopeId> {
    self.parent
  }

  pub fn children(&self) -> &[ScopeId] {
    &self.children
  }

  /// Identifiers in declaration order.
  pub fn identifiers(&self) -> &[Identifier] {
    &self.identifiers
  }

  pub fn get_identifier(&self, name: &str) -> Option<&Identifier> {
    self.names.get(name).map(|&i| &self.identifiers[i])
  }

  pub fn is_dynamic(&self) -> bool {
    self.dynamic
  }

  pub fn has_unknown(&self, name: &str) -> bool {
    self.unknown.contains(name)
  }

  pub(crate) fn set_assigned(&mut self, index: usize, name: String) {
    self.identifiers[index].assigned = Some(name);
  }
}

/// Every scope of one compilation unit. Scope 0 is the global scope; every other scope belongs to exactly one function.
#[derive(Debug)]
pub struct ScopeTree {
  scopes: Vec<Scope>,
  func_scopes: HashMap<Loc, ScopeId>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Rename {
  pub depth: usize,
  pub original: String,
  pub assigned: String,
}

impl ScopeTree {
  pub(crate) fn new() -> ScopeTree {
    ScopeTree {
      scopes: vec![Scope::new(0, None)],
      func_scopes: HashMap::new(),
    }
  }

  pub fn root(&self) -> ScopeId {
    ScopeId(0)
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  pub fn scope(&self, id: ScopeId) -> &Scope {
    &self.scopes[id.0]
  }

  pub(crate) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
    &mut self.scopes[id.0]
  }

  /// The scope owned by the function whose node spans `loc`.
  pub fn scope_of_func(&self, loc: Loc) -> Option<ScopeId> {
    self.func_scopes.get(&loc).copied()
  }

  pub(crate) fn create_scope(&mut self, parent: ScopeId, func_loc: Loc) -> ScopeId {
    let id = ScopeId(self.scopes.len());
    let depth = self.scope(parent).depth + 1;
    self.scopes.push(Scope::new(depth, Some(parent)));
    self.scope_mut(parent).children.push(id);
    self.func_scopes.insert(func_loc, id);
    id
  }

  /// Declares `name` in `scope`. Redeclaring a name returns the existing binding.
  pub(crate) fn declare(&mut self, scope: ScopeId, name: &str) -> Symbol {
    let data = self.scope_mut(scope);
    let index = match data.names.get(name) {
      Some(&index) => index,
      None => {
        let index = data.identifiers.len();
        data.identifiers.push(Identifier::new(name.to_string()));
        data.names.insert(name.to_string(), index);
        index
      }
    };
    Symbol { scope, index }
  }

  pub fn identifier(&self, symbol: Symbol) -> &Identifier {
    &self.scope(symbol.scope).identifiers[symbol.index]
  }

  pub(crate) fn identifier_mut(&mut self, symbol: Symbol) -> &mut Identifier {
    &mut self.scope_mut(symbol.scope).identifiers[symbol.index]
  }

  /// `scope` followed by each of its ancestors up to the global scope.
  pub fn self_and_ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
    std::iter::successors(Some(scope), move |&id| self.scope(id).parent)
  }

  /// Finds the binding `name` refers to from `scope`, walking outwards.
  pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<Symbol> {
    self.self_and_ancestors(scope).find_map(|id| {
      self
        .scope(id)
        .names
        .get(name)
        .map(|&index| Symbol { scope: id, index })
    })
  }

  /// The name to emit for an occurrence of `name` in `scope`.
  pub fn effective_name<'a>(&'a self, scope: ScopeId, name: &'a str) -> &'a str {
    match self.resolve(scope, name) {
      Some(symbol) => self.identifier(symbol).effective_name(),
      None => name,
    }
  }

  /// All scopes, parents before children.
  pub fn pre_order(&self) -> Vec<ScopeId> {
    let mut order = Vec::with_capacity(self.scopes.len());
    let mut stack = vec![self.root()];
    while let Some(id) = stack.pop() {
      order.push(id);
      stack.extend(self.scope(id).children.iter().rev());
    }
    order
  }

  /// Every identifier whose emitted name differs from its original, scope by scope in pre-order.
  pub fn rename_map(&self) -> Vec<Rename> {
    let mut renames = Vec::new();
    for id in self.pre_order() {
      let scope = self.scope(id);
      for &index in scope.assignment_order.iter() {
        let ident = &scope.identifiers[index];
        match &ident.assigned {
          Some(assigned) if assigned != &ident.name => renames.push(Rename {
            depth: scope.depth,
            original: ident.name.clone(),
            assigned: assigned.clone(),
          }),
          _ => {}
        };
      }
    }
    renames
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn resolves_through_ancestors() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    let outer = tree.create_scope(root, Loc(0, 10));
    let inner = tree.create_scope(outer, Loc(2, 8));
    let x = tree.declare(outer, "x");
    assert_eq!(tree.declare(outer, "x"), x);
    assert_eq!(tree.resolve(inner, "x"), Some(x));
    assert_eq!(tree.resolve(root, "x"), None);
    assert_eq!(tree.scope(inner).depth(), 2);
    assert_eq!(tree.scope(inner).parent(), Some(outer));
    assert_eq!(tree.scope(root).parent(), None);
    assert_eq!(tree.scope_of_func(Loc(2, 8)), Some(inner));
    assert_eq!(
      tree.self_and_ancestors(inner).collect::<Vec<_>>(),
      vec![inner, outer, root]
    );
  }

  #[test]
  fn effective_name_prefers_assignment() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    let f = tree.create_scope(root, Loc(0, 1));
    let sym = tree.declare(f, "value");
    assert_eq!(tree.effective_name(f, "value"), "value");
    tree.identifier_mut(sym).assigned = Some("a".to_string());
    assert_eq!(tree.effective_name(f, "value"), "a");
    assert_eq!(tree.effective_name(f, "other"), "other");
  }

  #[test]
  fn pre_order_visits_parents_first() {
    let mut tree = ScopeTree::new();
    let root = tree.root();
    let a = tree.create_scope(root, Loc(0, 1));
    let b = tree.create_scope(root, Loc(2, 3));
    let a1 = tree.create_scope(a, Loc(4, 5));
    assert_eq!(tree.pre_order(), vec![root, a, a1, b]);
  }
}
