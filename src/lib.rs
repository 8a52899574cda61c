#![allow(clippy::module_inception)]

use std::rc::Rc;

use crate::{
    ast::ast::Program,
    errors::errors::{Diagnostic, ErrorTip},
    lexer::{lexer::Lexer, source::StrSource},
    parser::parser::parse_program,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in a source: 1-based line and column plus the source name.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Scans and parses an in-memory source in one go.
pub fn parse_source(source: &str, file: Option<String>) -> (Program, Vec<Diagnostic>) {
    let lexer = Lexer::new(Box::new(StrSource::new(source)), file);
    parse_program(lexer)
}

/// Returns the text of the 1-based `line` of `content`, without its line terminator.
pub fn get_line_at_position(content: &str, line: u32) -> Option<&str> {
    if line == 0 {
        return None;
    }

    content
        .split('\n')
        .flat_map(|text| text.strip_suffix('\r').unwrap_or(text).split('\r'))
        .nth((line - 1) as usize)
}


/// Renders a diagnostic with the offending source line and a caret under the column.
///
/// ```text
/// Error: IfStatement (expected `then` after if condition, found `a`)
/// -> test.lua
///   |
/// 1 | if x a = 1
///   | -----^
/// ```
pub fn display_diagnostic(diagnostic: &Diagnostic, source: &str) -> String {
    let position = diagnostic.get_position();
    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();

    if let ErrorTip::None = diagnostic.get_tip() {
        out.push_str(&format!("Error: {}\n", diagnostic.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            diagnostic.get_error_name(),
            diagnostic.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", position.file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_line_at_position(source, position.line).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let column = (position.column as usize).max(1);
    let arrows = column.saturating_sub(removed_whitespace).max(1);

    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));
    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
