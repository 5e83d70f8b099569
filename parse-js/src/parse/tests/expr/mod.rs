use crate::ast::expr::pat::Pat;
use crate::ast::expr::Expr;
use crate::ast::node::Node;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::parse::Ctx;
use crate::parse::Parser;
use crate::token::TT;
use serde_json::json;
use serde_json::Value;

fn try_parse_expr(input: &str) -> SyntaxResult<Node<Expr>> {
  let mut parser = Parser::new(input);
  let expr = parser.expression(Ctx::script())?;
  parser.expect(TT::EOF)?;
  Ok(expr)
}

fn parse_expr(input: &str) -> Node<Expr> {
  try_parse_expr(input).unwrap()
}

fn parse_expr_json(input: &str) -> Value {
  serde_json::to_value(parse_expr(input)).unwrap()
}

fn id(name: &str) -> Value {
  json!({ "$t": "Id", "name": name })
}

#[test]
fn test_binary_precedence() {
  let v = parse_expr_json("a + b * c");
  assert_eq!(v["$t"], "Binary");
  assert_eq!(v["operator"], "Addition");
  assert_eq!(v["left"], id("a"));
  assert_eq!(v["right"]["operator"], "Multiplication");

  // Grouping leaves no trace in the tree; the structure carries the precedence.
  let v = parse_expr_json("(a + b) * c");
  assert_eq!(v["operator"], "Multiplication");
  assert_eq!(v["left"]["operator"], "Addition");
  assert_eq!(v["right"], id("c"));
}

#[test]
fn test_associativity() {
  let v = parse_expr_json("a - b - c");
  assert_eq!(v["left"]["operator"], "Subtraction");
  assert_eq!(v["right"], id("c"));

  let v = parse_expr_json("a ** b ** c");
  assert_eq!(v["left"], id("a"));
  assert_eq!(v["right"]["operator"], "Exponentiation");

  let v = parse_expr_json("a = b = c");
  assert_eq!(v["left"]["$t"], "IdPat");
  assert_eq!(v["right"]["operator"], "Assignment");
}

#[test]
fn test_conditional_alternate_takes_assignment() {
  let v = parse_expr_json("a ? b : c = d");
  assert_eq!(v["$t"], "Cond");
  assert_eq!(v["consequent"], id("b"));
  assert_eq!(v["alternate"]["operator"], "Assignment");

  let v = parse_expr_json("a, b ? c : d, e");
  assert_eq!(v["operator"], "Comma");
  assert_eq!(v["left"]["right"]["$t"], "Cond");
}

#[test]
fn test_new_expressions() {
  let v = parse_expr_json("new a.b(c)");
  assert_eq!(v["$t"], "New");
  assert_eq!(v["callee"]["$t"], "Member");
  assert_eq!(v["callee"]["right"], "b");
  assert_eq!(v["arguments"].as_array().unwrap().len(), 1);

  let v = parse_expr_json("new a");
  assert_eq!(v["$t"], "New");
  assert_eq!(v["arguments"], Value::Null);

  let v = parse_expr_json("new a()()");
  assert_eq!(v["$t"], "Call");
  assert_eq!(v["callee"]["$t"], "New");

  let v = parse_expr_json("new new a()()");
  assert_eq!(v["$t"], "New");
  assert_eq!(v["callee"]["$t"], "New");
}

#[test]
fn test_member_and_optional_chaining() {
  let v = parse_expr_json("a?.b.c");
  assert_eq!(v["$t"], "Member");
  assert_eq!(v["optional_chaining"], false);
  assert_eq!(v["left"]["optional_chaining"], true);

  let v = parse_expr_json("a.if.class");
  assert_eq!(v["right"], "class");
  assert_eq!(v["left"]["right"], "if");

  let v = parse_expr_json("a?.[0]?.(1)");
  assert_eq!(v["$t"], "Call");
  assert_eq!(v["optional_chaining"], true);
  assert_eq!(v["callee"]["$t"], "ComputedMember");
}

#[test]
fn test_arrow_functions() {
  let v = parse_expr_json("x => x + 1");
  assert_eq!(v["$t"], "ArrowFunc");
  assert_eq!(v["func"]["arrow"], true);
  assert_eq!(v["func"]["parameters"].as_array().unwrap().len(), 1);

  let v = parse_expr_json("(a, [b], {c}) => {}");
  assert_eq!(v["$t"], "ArrowFunc");
  assert_eq!(v["func"]["parameters"].as_array().unwrap().len(), 3);

  let v = parse_expr_json("async (a) => a");
  assert_eq!(v["$t"], "ArrowFunc");
  assert_eq!(v["func"]["async_"], true);

  let v = parse_expr_json("async(a)");
  assert_eq!(v["$t"], "Call");
  assert_eq!(v["callee"], id("async"));

  let v = parse_expr_json("(a, b)");
  assert_eq!(v["operator"], "Comma");
}

#[test]
fn test_arrow_parameters_cannot_end_a_line() {
  let err = try_parse_expr("(a)\n=> a").unwrap_err();
  assert_eq!(
    err.typ,
    SyntaxErrorType::LineTerminatorAfterArrowFunctionParameters
  );
}

#[test]
fn test_destructuring_assignment() {
  let Expr::Binary(assign) = *parse_expr("[a, b.c, ...d] = e").stx else {
    panic!("expected assignment");
  };
  let Expr::ArrPat(arr) = assign.stx.left.stx.as_ref() else {
    panic!("expected array pattern");
  };
  assert_eq!(arr.stx.elements.len(), 2);
  let targets: Vec<&Pat> = arr
    .stx
    .elements
    .iter()
    .map(|e| e.as_ref().unwrap().target.stx.as_ref())
    .collect();
  assert!(matches!(targets[0], Pat::Id(id) if id.stx.name == "a"));
  assert!(matches!(targets[1], Pat::AssignTarget(_)));
  assert!(matches!(arr.stx.rest.as_ref().unwrap().stx.as_ref(), Pat::Id(_)));

  let Expr::Binary(assign) = *parse_expr("({a, b: c = 1} = d)").stx else {
    panic!("expected assignment");
  };
  let Expr::ObjPat(obj) = assign.stx.left.stx.as_ref() else {
    panic!("expected object pattern");
  };
  assert_eq!(obj.stx.properties.len(), 2);
  assert!(obj.stx.properties[0].stx.shorthand);
  assert!(obj.stx.properties[1].stx.default_value.is_some());
}

#[test]
fn test_invalid_assignment_targets() {
  let err = try_parse_expr("1 = 2").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
  let err = try_parse_expr("[a] += 1").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
  let err = try_parse_expr("a?.b = 1").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
}

#[test]
fn test_string_literals() {
  let v = parse_expr_json(r#"'a\nb"'"#);
  assert_eq!(v, json!({ "$t": "LitStr", "value": "a\nb\"", "quote": "'" }));

  let v = parse_expr_json(r#""it's""#);
  assert_eq!(v["quote"], "\"");
  assert_eq!(v["value"], "it's");
}

#[test]
fn test_lone_surrogate_string_is_verbatim() {
  let v = parse_expr_json(r"'\uD83D'");
  assert_eq!(v, json!({ "$t": "Verbatim", "text": r"'\uD83D'" }));
}

#[test]
fn test_invalid_string_escape() {
  let err = try_parse_expr(r"'\x4'").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidCharacterEscape);
}

#[test]
fn test_template_literals() {
  let v = parse_expr_json("`a${b}c${d}`");
  assert_eq!(v["$t"], "LitTemplate");
  assert_eq!(
    v["parts"],
    json!([
      { "String": "a" },
      { "Substitution": id("b") },
      { "String": "c" },
      { "Substitution": id("d") },
      { "String": "" },
    ])
  );

  let v = parse_expr_json("tag`x\\u{41}`");
  assert_eq!(v["$t"], "TaggedTemplate");
  assert_eq!(v["parts"], json!([{ "String": "x\\u{41}" }]));
}

#[test]
fn test_literals_keep_source_text() {
  assert_eq!(parse_expr_json("0x1F")["value"], "0x1F");
  assert_eq!(parse_expr_json("1_000n")["value"], "1_000n");
  assert_eq!(parse_expr_json("/a[/]b/gi")["value"], "/a[/]b/gi");
}

#[test]
fn test_regex_after_operator() {
  let v = parse_expr_json("x / y / z");
  assert_eq!(v["operator"], "Division");
  let v = parse_expr_json("x = /y/g");
  assert_eq!(v["right"]["$t"], "LitRegex");
}

#[test]
fn test_object_literal_members() {
  let v = parse_expr_json("{a, 'b': 1, [c]: 2, get d() {}, e() {}, ...f}");
  let members = v["members"].as_array().unwrap();
  assert_eq!(members.len(), 6);
  assert_eq!(members[0]["typ"]["Shorthand"]["id"], json!({ "name": "a" }));
  assert_eq!(members[1]["typ"]["Valued"]["key"]["Direct"]["key"], "'b'");
  assert!(members[2]["typ"]["Valued"]["key"]["Computed"].is_object());
  assert!(members[3]["typ"]["Valued"]["val"]["Getter"].is_object());
  assert!(members[4]["typ"]["Valued"]["val"]["Method"].is_object());
  assert!(members[5]["typ"]["Rest"].is_object());
}

#[test]
fn test_private_name_in_expression() {
  let v = parse_expr_json("#x in o");
  assert_eq!(v["operator"], "In");
  assert_eq!(v["left"], id("#x"));
}

#[test]
fn test_import_expressions() {
  assert_eq!(parse_expr_json("import('a')")["$t"], "Import");
  assert_eq!(parse_expr_json("import.meta.url")["left"]["$t"], "ImportMeta");
}

#[test]
fn test_unary_and_postfix() {
  let v = parse_expr_json("!typeof a++");
  assert_eq!(v["operator"], "LogicalNot");
  assert_eq!(v["argument"]["operator"], "Typeof");
  assert_eq!(v["argument"]["argument"]["$t"], "UnaryPostfix");

  let v = parse_expr_json("-a * 2");
  assert_eq!(v["operator"], "Multiplication");
  assert_eq!(v["left"]["operator"], "UnaryNegation");
}

#[test]
fn test_unexpected_end() {
  let err = try_parse_expr("a +").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);
}

#[test]
fn test_empty_parentheses_need_an_arrow() {
  let err = try_parse_expr("()").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight));
  let err = try_parse_expr("(a, ...b)").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::RequiredTokenNotFound(TT::EqualsChevronRight));
  let v = parse_expr_json("(a, ...b) => b");
  assert_eq!(v["func"]["parameters"][1]["rest"], true);
}

#[test]
fn test_arrow_parameter_patterns() {
  let v = parse_expr_json("({a = 1, b: [c]}, d = 2) => a");
  let params = v["func"]["parameters"].as_array().unwrap();
  assert_eq!(params.len(), 2);
  assert_eq!(params[0]["pattern"]["pat"]["$t"], "Obj");
  assert_eq!(params[0]["pattern"]["pat"]["properties"][0]["shorthand"], true);
  assert_eq!(params[1]["default_value"]["value"], "2");

  let err = try_parse_expr("(a.b) => 1").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::InvalidAssigmentTarget);
}

#[test]
fn test_arrow_body_extends_over_operators() {
  let v = parse_expr_json("a => b ? c : d");
  assert_eq!(v["$t"], "ArrowFunc");
  assert_eq!(v["func"]["body"]["Expression"]["$t"], "Cond");
  let v = parse_expr_json("a => b, c");
  assert_eq!(v["operator"], "Comma");
  assert_eq!(v["left"]["$t"], "ArrowFunc");
}

#[test]
fn test_in_operator() {
  let v = parse_expr_json("a in b && c");
  assert_eq!(v["operator"], "LogicalAnd");
  assert_eq!(v["left"]["operator"], "In");
}

#[test]
fn test_tagged_template_and_calls_chain() {
  let v = parse_expr_json("a.b`x${y}`(z)");
  assert_eq!(v["$t"], "Call");
  assert_eq!(v["callee"]["$t"], "TaggedTemplate");
  assert_eq!(v["callee"]["function"]["$t"], "Member");
}

#[test]
fn test_unterminated_literals() {
  let err = try_parse_expr("'abc\ndef'").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorInString);
  let err = try_parse_expr("`abc").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::UnexpectedEnd);
  let err = try_parse_expr("/abc\n/").unwrap_err();
  assert_eq!(err.typ, SyntaxErrorType::LineTerminatorInRegex);
}
