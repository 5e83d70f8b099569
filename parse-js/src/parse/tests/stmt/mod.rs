use crate::ast::stmt::decl::VarDeclMode;
use crate::ast::stmt::ForInOfLhs;
use crate::ast::stmt::Stmt;
use crate::error::SyntaxErrorType;
use crate::parse;
use crate::token::TT;
use serde_json::Value;

fn parse_stmts(input: &str) -> Vec<Value> {
  let top = parse(input).unwrap();
  match serde_json::to_value(top).unwrap() {
    Value::Object(mut map) => match map.remove("body") {
      Some(Value::Array(body)) => body,
      other => panic!("unexpected body {:?}", other),
    },
    other => panic!("unexpected top level {:?}", other),
  }
}

fn kinds(input: &str) -> Vec<String> {
  parse_stmts(input)
    .iter()
    .map(|s| s["$t"].as_str().unwrap().to_string())
    .collect()
}

#[test]
fn test_automatic_semicolon_insertion() {
  assert_eq!(kinds("a\nb"), vec!["Expr", "Expr"]);
  assert_eq!(kinds("a = 1\n++b"), vec!["Expr", "Expr"]);
  assert_eq!(kinds("{ a } b"), vec!["Block", "Expr"]);

  // A line break after `return` ends the statement.
  let body = parse_stmts("function f() { return\na }");
  let func_body = &body[0]["function"]["body"]["Block"];
  assert_eq!(func_body[0]["$t"], "Return");
  assert_eq!(func_body[0]["value"], Value::Null);
  assert_eq!(func_body[1]["$t"], "Expr");
}

#[test]
fn test_missing_semicolon_is_an_error() {
  let err = parse("a b").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(TT::Semicolon));
  assert_eq!(err.loc.0, 2);
}

#[test]
fn test_throw_requires_same_line() {
  let err = parse("throw\nx").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorAfterThrow);
}

#[test]
fn test_try_requires_handler() {
  let err = parse("try {}").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::TryStatementHasNoCatchOrFinally);
  let body = parse_stmts("try {} catch {} finally {}");
  assert_eq!(body[0]["catch"]["parameter"], Value::Null);
  assert!(body[0]["finally"].is_object());
}

#[test]
fn test_for_loop_forms() {
  let top = parse("for (const x of y) {} for (a.b in c); for (var i = 0; i < n; i++) x()").unwrap();
  let body = &top.stx.body;
  match body[0].stx.as_ref() {
    Stmt::ForOf(for_of) => {
      assert!(!for_of.stx.await_);
      assert!(matches!(for_of.stx.lhs, ForInOfLhs::Decl {
        mode: VarDeclMode::Const,
        ..
      }));
    }
    other => panic!("expected for-of, got {:?}", other),
  };
  match body[1].stx.as_ref() {
    Stmt::ForIn(for_in) => {
      assert!(matches!(for_in.stx.lhs, ForInOfLhs::Assign(_)));
      assert!(matches!(for_in.stx.body.stx.body[0].stx.as_ref(), Stmt::Empty(_)));
    }
    other => panic!("expected for-in, got {:?}", other),
  };
  match body[2].stx.as_ref() {
    Stmt::ForTriple(triple) => {
      assert!(triple.stx.cond.is_some());
      assert!(triple.stx.post.is_some());
      assert_eq!(triple.stx.body.stx.body.len(), 1);
    }
    other => panic!("expected for loop, got {:?}", other),
  };
}

#[test]
fn test_let_as_identifier() {
  assert_eq!(kinds("let = 1"), vec!["Expr"]);
  assert_eq!(kinds("let [a] = b"), vec!["VarDecl"]);
  assert_eq!(kinds("let\nx = 1"), vec!["VarDecl"]);
}

#[test]
fn test_labels_and_jumps() {
  let body = parse_stmts("a: for (;;) { break a; continue\na }");
  assert_eq!(body[0]["$t"], "Label");
  assert_eq!(body[0]["name"], "a");
  let inner = &body[0]["statement"]["body"]["body"];
  assert_eq!(inner[0]["label"], "a");
  assert_eq!(inner[1]["$t"], "Continue");
  assert_eq!(inner[1]["label"], Value::Null);
  assert_eq!(inner[2]["$t"], "Expr");
}

#[test]
fn test_do_while_consumes_trailing_semicolon() {
  assert_eq!(kinds("do x(); while (y); z()"), vec!["DoWhile", "Expr"]);
  assert_eq!(kinds("do x(); while (y) z()"), vec!["DoWhile", "Expr"]);
}

#[test]
fn test_debugger_and_empty() {
  assert_eq!(kinds("debugger;;"), vec!["Debugger", "Empty"]);
}

#[test]
fn test_switch() {
  let body = parse_stmts("switch (a) { case 1: b; case 2: default: c }");
  let branches = body[0]["branches"].as_array().unwrap();
  assert_eq!(branches.len(), 3);
  assert_eq!(branches[1]["body"].as_array().unwrap().len(), 0);
  assert_eq!(branches[2]["case"], Value::Null);
}

#[test]
fn test_class_members() {
  let body = parse_stmts("class A extends B { static { x } static y = 1; #p; get z() {} a = 1\n b\n static() {} }");
  assert_eq!(body[0]["$t"], "ClassDecl");
  assert_eq!(body[0]["extends"]["name"], "B");
  let members = body[0]["members"].as_array().unwrap();
  assert_eq!(members.len(), 7);
  assert_eq!(members[0]["static_"], true);
  assert!(members[0]["val"]["StaticBlock"].is_object());
  assert_eq!(members[1]["static_"], true);
  assert_eq!(members[1]["key"]["Direct"]["key"], "y");
  assert_eq!(members[2]["key"]["Direct"]["key"], "#p");
  assert_eq!(members[2]["val"]["Prop"], Value::Null);
  assert!(members[3]["val"]["Getter"].is_object());
  assert_eq!(members[5]["key"]["Direct"]["key"], "b");
  assert_eq!(members[6]["static_"], false);
  assert!(members[6]["val"]["Method"].is_object());
}

#[test]
fn test_imports_are_verbatim() {
  let body = parse_stmts("import a, {b as c} from \"m\"; import * as d from 'n'\nimport 'o'");
  assert_eq!(body[0]["$t"], "Verbatim");
  assert_eq!(body[0]["text"], "import a , { b as c } from \"m\"");
  assert_eq!(body[1]["text"], "import * as d from 'n'");
  assert_eq!(body[2]["text"], "import 'o'");

  // Dynamic imports are expressions.
  assert_eq!(kinds("import('a')"), vec!["Expr"]);
}

#[test]
fn test_exports() {
  let body = parse_stmts(concat!(
    "export const a = 1;",
    "export function f() {}",
    "export default class {}",
    "export default a + b;",
    "export { a as b };",
    "export * from 'm';",
  ));
  assert_eq!(body[0]["$t"], "VarDecl");
  assert_eq!(body[0]["export"], true);
  assert_eq!(body[1]["$t"], "FunctionDecl");
  assert_eq!(body[1]["export"], true);
  assert_eq!(body[2]["$t"], "ClassDecl");
  assert_eq!(body[2]["export_default"], true);
  assert_eq!(body[2]["name"], Value::Null);
  assert_eq!(body[3]["$t"], "ExportDefaultExpr");
  assert_eq!(body[3]["expression"]["operator"], "Addition");
  assert_eq!(body[4]["text"], "export { a as b }");
  assert_eq!(body[5]["text"], "export * from 'm'");
}

#[test]
fn test_async_functions_and_generators() {
  let body = parse_stmts("async function f() { await x } function* g() { yield; yield* y }");
  assert_eq!(body[0]["function"]["async_"], true);
  let await_expr = &body[0]["function"]["body"]["Block"][0]["expr"];
  assert_eq!(await_expr["operator"], "Await");
  let gen_body = &body[1]["function"]["body"]["Block"];
  assert_eq!(body[1]["function"]["generator"], true);
  assert_eq!(gen_body[0]["expr"]["operator"], "Yield");
  assert_eq!(gen_body[0]["expr"]["argument"]["text"], "");
  assert_eq!(gen_body[1]["expr"]["operator"], "YieldDelegated");
}

#[test]
fn test_slash_after_yield_starts_a_regex() {
  let body = parse_stmts("function* g() { yield /a/g } var yield_ = 1 / 2 / 3");
  let yielded = &body[0]["function"]["body"]["Block"][0]["expr"];
  assert_eq!(yielded["operator"], "Yield");
  assert_eq!(yielded["argument"]["value"], "/a/g");
  assert_eq!(body[1]["declarators"][0]["initializer"]["operator"], "Division");
}

#[test]
fn test_for_head_ends_at_in() {
  let body = parse_stmts("for (var a = b ? c in d : e;;); for (x in y); for (let [a, b] of c);");
  // Between `?` and `:`, `in` is an operator even in a for head.
  assert_eq!(body[0]["$t"], "ForTriple");
  assert_eq!(body[0]["init"]["Decl"]["declarators"][0]["initializer"]["consequent"]["operator"], "In");
  assert_eq!(body[1]["$t"], "ForIn");
  assert_eq!(body[2]["$t"], "ForOf");
  assert_eq!(body[2]["lhs"]["Decl"]["mode"], "Let");

  let body = parse_stmts("for ((a in b);;);");
  assert_eq!(body[0]["init"]["Expr"]["operator"], "In");
}

#[test]
fn test_for_await_requires_of() {
  assert_eq!(kinds("async function f() { for await (x of y); }"), vec!["FunctionDecl"]);
  assert!(parse("async function f() { for await (x in y); }").is_err());
}
