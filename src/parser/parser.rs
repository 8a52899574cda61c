//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program driver.
//! The parser pulls tokens from the lexer on demand and keeps a two-token
//! window: `current`, the token being parsed, and `peek`, the one after it.
//!
//! Errors never stop the parse. Each one is recorded as a [`Diagnostic`], the
//! offending statement is dropped, and the parser resynchronises at the next
//! line before carrying on.

use tracing::debug;

use crate::{
    ast::ast::Program,
    errors::errors::{Diagnostic, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::stmt::parse_stmt;

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// Token source
    lexer: Lexer<'a>,
    /// The token being parsed
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics recorded so far, in source order
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Creates a parser and fills the token window from `lexer`.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();

        Parser {
            lexer,
            current,
            peek,
            diagnostics: Vec::new(),
        }
    }

    pub fn current_token(&self) -> &Token {
        &self.current
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Shifts the window by one token. Past the end both slots hold `EOF`.
    pub fn next_token(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Records a diagnostic at `position`.
    pub fn report(&mut self, error: ErrorImpl, position: Position) {
        let diagnostic = Diagnostic::new(error, position);
        debug!(name = diagnostic.get_error_name(), "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Records a diagnostic at the current token.
    pub fn report_current(&mut self, error: ErrorImpl) {
        let position = self.current.span.start.clone();
        self.report(error, position);
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Advances onto the peek token if it has the expected kind, otherwise
    /// records the error built by `error` at the peek token and stays put.
    pub fn expect_peek_error<F>(&mut self, expected_kind: TokenKind, error: F) -> bool
    where
        F: FnOnce(&Token) -> ErrorImpl,
    {
        if self.peek.kind == expected_kind {
            self.next_token();
            return true;
        }

        let error = error(&self.peek);
        let position = self.peek.span.start.clone();
        self.report(error, position);
        false
    }

    /// Expects the peek token to be of the specified kind with the default error.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> bool {
        self.expect_peek_error(expected_kind, |found| ErrorImpl::UnexpectedToken {
            expected: format!("`{}`", expected_kind.text()),
            found: found.describe(),
        })
    }

    /// Checks the current token without moving. Used for block terminators,
    /// which the block parser has already stepped onto.
    pub fn expect_current_error<F>(&mut self, expected_kind: TokenKind, error: F) -> bool
    where
        F: FnOnce(&Token) -> ErrorImpl,
    {
        if self.current.kind == expected_kind {
            return true;
        }

        let error = error(&self.current);
        self.report_current(error);
        false
    }

    /// Skips the rest of a failed statement. Stops before a newline, the end
    /// of input or a block-ending keyword so the enclosing construct can still
    /// see its terminator.
    pub fn recover(&mut self) {
        while self.current.kind != TokenKind::Newline
            && !matches!(self.peek.kind, TokenKind::Newline | TokenKind::EOF)
            && !self.peek.kind.is_block_end()
        {
            self.next_token();
        }
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

/// Parses every statement the lexer produces.
///
/// Returns the program built from the statements that parsed cleanly and the
/// diagnostics for the ones that did not. A non-empty diagnostic list means
/// the program is partial.
#[tracing::instrument(skip_all, fields(file = %lexer.file()))]
pub fn parse_program(lexer: Lexer) -> (Program, Vec<Diagnostic>) {
    let mut parser = Parser::new(lexer);
    let mut program = Program::default();

    while parser.current_token_kind() != TokenKind::EOF {
        let errors_before = parser.diagnostic_count();

        match parse_stmt(&mut parser) {
            Some(stmt) => program.statements.push(stmt),
            None if parser.diagnostic_count() > errors_before => parser.recover(),
            None => {}
        }

        parser.next_token();
    }

    debug!(
        statements = program.len(),
        diagnostics = parser.diagnostic_count(),
        "parsed program"
    );

    (program, parser.finish())
}
