//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms the lexer's token stream
//! into a [`Program`](crate::ast::ast::Program). It uses a Pratt parser for
//! expressions with proper operator precedence and handles:
//!
//! - Statement parsing (assignments, calls, control flow, functions)
//! - Expression parsing (prefix and binary operators, calls, literals)
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing, looked up in static tables by token kind, with
//! [`Precedence`](lookups::Precedence) deciding how far an expression extends.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
