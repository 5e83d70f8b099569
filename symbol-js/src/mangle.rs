use crate::names::is_reserved;
use crate::names::NAME_POOL;
use crate::symbol::ScopeId;
use crate::symbol::ScopeTree;
use ahash::HashSet;
use std::cmp::Reverse;
use tracing::trace;
use tracing::warn;

/// Assigns a short replacement name to every eligible identifier, visiting parents before children.
///
/// The global scope is never renamed, and neither are dynamic scopes (those reachable by a direct `eval` or a `with` body) or pinned identifiers. A scope never hands out a name that is reserved, that an unresolved reference in its subtree uses, or that an ancestor binding referenced from its subtree is emitted as.
pub fn mangle(tree: &mut ScopeTree) {
  mangle_with_pool(tree, &NAME_POOL);
}

pub(crate) fn mangle_with_pool(tree: &mut ScopeTree, pool: &[String]) {
  let root = tree.root();
  for scope in tree.pre_order() {
    if scope != root {
      assign_scope_names(tree, scope, pool);
    };
  }
}

fn forbidden_names(tree: &ScopeTree, scope: ScopeId) -> HashSet<String> {
  let data = tree.scope(scope);
  let mut forbidden = data.unknown.clone();
  for &symbol in data.foreign.iter() {
    forbidden.insert(tree.identifier(symbol).effective_name().to_string());
  }
  for ident in data.identifiers().iter().filter(|i| i.pinned) {
    forbidden.insert(ident.name.clone());
  }
  forbidden
}

fn assign_scope_names(tree: &mut ScopeTree, scope: ScopeId, pool: &[String]) {
  if tree.scope(scope).is_dynamic() {
    trace!(scope = scope.index(), "dynamic scope keeps its names");
    return;
  };

  let forbidden = forbidden_names(tree, scope);
  let identifiers = tree.scope(scope).identifiers();
  // Most referenced first; the sort is stable, so ties keep declaration order.
  let mut candidates: Vec<usize> = (0..identifiers.len())
    .filter(|&i| !identifiers[i].pinned)
    .collect();
  candidates.sort_by_key(|&i| Reverse(identifiers[i].refcount));

  // If the pool runs out, the identifiers that miss out keep their names, so those names must not be handed to anyone else either.
  let mut renamed = candidates.len();
  let assigned: Vec<String> = loop {
    let kept: HashSet<&str> = candidates[renamed..]
      .iter()
      .map(|&i| identifiers[i].name.as_str())
      .collect();
    let available: Vec<String> = pool
      .iter()
      .filter(|n| !is_reserved(n) && !forbidden.contains(n.as_str()) && !kept.contains(n.as_str()))
      .take(renamed)
      .cloned()
      .collect();
    if available.len() == renamed {
      break available;
    };
    renamed = available.len();
  };
  if renamed < candidates.len() {
    warn!(
      scope = scope.index(),
      unrenamed = candidates.len() - renamed,
      "name pool exhausted; keeping original names"
    );
  };

  let order: Vec<usize> = candidates[..renamed].to_vec();
  let data = tree.scope_mut(scope);
  for (&index, name) in order.iter().zip(assigned) {
    data.set_assigned(index, name);
  }
  data.assignment_order = order;
}

#[cfg(test)]
mod tests {
  use super::mangle_with_pool;
  use crate::compute_symbols;
  use parse_js::parse;

  fn pool(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
  }

  #[test]
  fn exhausted_pool_keeps_remaining_names() {
    let top = parse("function f(){ var x = 1, y = 2, b = 3; return x + x + y + b; }").unwrap();
    let mut tree = compute_symbols(&top);
    mangle_with_pool(&mut tree, &pool(&["a", "b"]));
    let f = tree.scope(tree.root()).children()[0];
    let scope = tree.scope(f);
    // `x` is the most referenced. `b` misses out and keeps its name, so `y` cannot take "b".
    assert_eq!(scope.get_identifier("x").unwrap().assigned.as_deref(), Some("a"));
    assert_eq!(scope.get_identifier("y").unwrap().assigned, None);
    assert_eq!(scope.get_identifier("b").unwrap().assigned, None);
  }

  #[test]
  fn reserved_pool_entries_are_skipped() {
    let top = parse("function f(v){ return v; }").unwrap();
    let mut tree = compute_symbols(&top);
    mangle_with_pool(&mut tree, &pool(&["do", "if", "q"]));
    let f = tree.scope(tree.root()).children()[0];
    assert_eq!(
      tree.scope(f).get_identifier("v").unwrap().assigned.as_deref(),
      Some("q")
    );
  }
}
