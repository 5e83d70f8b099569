use parse_js::parse;
use symbol_js::compute_symbols;
use symbol_js::symbol::ScopeId;
use symbol_js::symbol::ScopeTree;

fn tree_of(source: &str) -> ScopeTree {
  let top_level = parse(source).unwrap();
  compute_symbols(&top_level)
}

fn child(tree: &ScopeTree, scope: ScopeId, i: usize) -> ScopeId {
  tree.scope(scope).children()[i]
}

#[test]
fn blocks_share_the_function_scope() {
  let tree = tree_of("function f(p) { if (p) { let a = 1; } for (const b of p) {} try {} catch (e) {} }");
  assert_eq!(tree.len(), 2);
  let f = child(&tree, tree.root(), 0);
  let names: Vec<&str> = tree
    .scope(f)
    .identifiers()
    .iter()
    .map(|i| i.name.as_str())
    .collect();
  assert_eq!(names, vec!["p", "a", "b", "e"]);
  assert!(tree.scope(tree.root()).get_identifier("f").is_some());
}

#[test]
fn references_resolve_to_enclosing_functions() {
  let tree = tree_of(
    r#"
      function outer() {
        let value = 1;
        return function inner() {
          return value + value;
        };
      }
    "#,
  );
  let outer = child(&tree, tree.root(), 0);
  let inner = child(&tree, outer, 0);
  assert_eq!(tree.scope(inner).depth(), 2);
  let symbol = tree.resolve(inner, "value").expect("value resolves");
  assert_eq!(symbol.scope, outer);
  assert_eq!(tree.identifier(symbol).refcount, 2);
  // A function expression's name belongs to the function itself.
  assert!(tree.scope(inner).get_identifier("inner").is_some());
  assert!(tree.scope(outer).get_identifier("inner").is_none());
}

#[test]
fn hoisted_uses_count_before_declaration() {
  let tree = tree_of("function f() { g(); g(); function g() {} }");
  let f = child(&tree, tree.root(), 0);
  assert_eq!(tree.scope(f).get_identifier("g").unwrap().refcount, 2);
}

#[test]
fn unresolved_names_propagate_to_ancestors() {
  let tree = tree_of("function f() { function g() { return undeclared; } }");
  let f = child(&tree, tree.root(), 0);
  let g = child(&tree, f, 0);
  for scope in [tree.root(), f, g] {
    assert!(tree.scope(scope).has_unknown("undeclared"));
  }
  // Property names and private names are not references.
  let tree = tree_of("function f(o) { return o.missing; }");
  let f = child(&tree, tree.root(), 0);
  assert!(!tree.scope(f).has_unknown("missing"));
}

#[test]
fn assignment_targets_are_references() {
  let tree = tree_of("function f() { var x; [x] = [1]; ({ y: x } = {}); }");
  let f = child(&tree, tree.root(), 0);
  let x = tree.scope(f).get_identifier("x").unwrap();
  assert_eq!(x.refcount, 2);
  assert_eq!(tree.scope(f).identifiers().len(), 1);
}

#[test]
fn class_expression_names_stay_inside_the_class() {
  let tree = tree_of("function f() { var c = class Foo { m() { return Foo; } }; return Foo; }");
  let f = child(&tree, tree.root(), 0);
  assert!(tree.scope(f).get_identifier("Foo").is_none());
  assert!(tree.scope(f).has_unknown("Foo"));
  assert!(tree.resolve(f, "Foo").is_none());

  // A binding of the same name outside the class is kept as it is.
  let tree = tree_of("function f() { var Foo = 1; var c = class Foo {}; return Foo; }");
  let f = child(&tree, tree.root(), 0);
  assert!(tree.scope(f).get_identifier("Foo").unwrap().pinned);
}
