//! Integration tests for end-to-end parsing.
//!
//! These tests drive the public API the way an evaluator would: source text in,
//! a program plus diagnostics out, and rendered diagnostics for display.

use std::io::Cursor;

use luafront::{
    ast::ast::{Node, Stmt},
    display_diagnostic,
    lexer::{
        lexer::Lexer,
        source::{ReaderSource, StrSource},
    },
    parse_source,
    parser::parser::parse_program,
};

const FACTORIAL: &str = "\
-- iterative factorial
function fact(n)
  local result = 1
  for i = 2, n do
    result = result * i
  end
  return result
end

x = fact(5)
print(x)
";

#[test]
fn test_parse_complete_program() {
    let (program, diagnostics) = parse_source(FACTORIAL, Some("fact.lua".to_string()));

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(program.len(), 3);
    assert_eq!(
        program.to_string(),
        "function fact[[n]] [local result = 1][for [i = 2, n, 1] do [result = [result * i]] end][return result] end\n\
         x = fact[[5]]\n\
         print[[x]]"
    );

    match &program.statements[0] {
        Stmt::Function(function) => {
            assert_eq!(function.name.value, "fact");
            assert_eq!(function.token().line(), 2);
            assert_eq!(function.token().source_name().as_str(), "fact.lua");
        }
        other => panic!("Expected a function statement, got {:?}", other),
    }
}

#[test]
fn test_control_flow_program() {
    let source = "\
local n = 10
while n > 0 do
  if n % 2 == 0 then
    evens = evens + 1
  elseif n % 3 == 0 then
    threes = threes + 1
  else
    others = others + 1
  end
  n = n - 1
end
repeat
  n = n + 1
until n >= 3
";
    let (program, diagnostics) = parse_source(source, None);

    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(program.len(), 3);
    assert_eq!(
        program.statements[1].to_string(),
        "while [n > 0] do \
         [if [[n % 2] == 0] then [evens = [evens + 1]] \
         else [if [[n % 3] == 0] then [threes = [threes + 1]] else [others = [others + 1]] end] end]\
         [n = [n - 1]] end"
    );
    assert_eq!(
        program.statements[2].to_string(),
        "repeat [n = [n + 1]] until [n >= 3]"
    );
}

#[test]
fn test_reader_source_parses_like_string_source() {
    let from_reader = parse_program(Lexer::new(
        Box::new(ReaderSource::new(Cursor::new(FACTORIAL.as_bytes()))),
        Some("fact.lua".to_string()),
    ));
    let from_string = parse_program(Lexer::new(
        Box::new(StrSource::new(FACTORIAL)),
        Some("fact.lua".to_string()),
    ));

    assert_eq!(from_reader, from_string);
}

#[test]
fn test_partial_program_keeps_good_statements() {
    let source = "a = 1\nb = (2 + \nc = 3\nif c then\n  d = 4\n";
    let (program, diagnostics) = parse_source(source, Some("broken.lua".to_string()));

    let names = diagnostics
        .iter()
        .map(|d| d.get_error_name())
        .collect::<Vec<&str>>();
    assert_eq!(names, vec!["NoPrefixRule", "BlockStatement"]);
    assert_eq!(program.to_string(), "a = 1\nc = 3");
}

#[test]
fn test_rendered_diagnostic() {
    let source = "x = 1\nif x a = 1\n";
    let (_, diagnostics) = parse_source(source, Some("test.lua".to_string()));
    assert_eq!(diagnostics.len(), 1);

    let rendered = display_diagnostic(&diagnostics[0], source);

    assert_eq!(
        rendered,
        "Error: IfStatement (expected `then` after if condition, found `a`)\n\
         -> test.lua\n  |\n\
         2 | if x a = 1\n  | -----^\n"
    );
}
