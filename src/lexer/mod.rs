//! Lexical analysis module.
//!
//! This module contains the lexer (scanner) that turns a character source
//! into tokens, one token per request. It handles:
//!
//! - Keywords, identifiers, numerals (decimal, hex, float) and strings
//! - Single and multi-character operators resolved by one character of lookahead
//! - Line and long comments
//! - Line/column tracking for every token
//!
//! Malformed input never aborts scanning; it comes back as `Illegal` tokens.

pub mod lexer;
pub mod source;
pub mod tokens;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod tests;
