use derive_visitor::Drive;
use parse_js::ast::node::Node;
use parse_js::ast::stmt::TopLevel;
use symbol::ScopeTree;
use tracing::debug;
use visitor::DeclVisitor;

pub mod mangle;
pub mod names;
pub mod symbol;
pub mod visitor;

pub use mangle::mangle;
pub use symbol::Rename;

/// Builds the scope tree of a parsed script: one scope per function plus the global scope, with every reference resolved.
pub fn compute_symbols(top_level_node: &Node<TopLevel>) -> ScopeTree {
  let mut visitor = DeclVisitor::new();
  top_level_node.drive(&mut visitor);
  let tree = visitor.finish();
  debug!(scopes = tree.len(), "computed symbols");
  tree
}
