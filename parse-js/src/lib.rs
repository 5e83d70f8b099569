use ast::node::Node;
use ast::stmt::TopLevel;
use error::SyntaxResult;
use parse::Parser;

pub mod ast;
pub mod char;
pub mod error;
pub mod lex;
pub mod loc;
pub mod operator;
pub mod parse;
pub mod token;

/// Parses a whole script. Module syntax (imports and exports) is accepted at any statement position.
pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  Parser::new(source).top_level()
}
