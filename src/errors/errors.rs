use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A non-fatal problem found while parsing, with the place it was detected.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}:{}:{}: {internal_error}", .position.file, .position.line, .position.column)]
pub struct Diagnostic {
    internal_error: ErrorImpl,
    position: Position,
}

impl Diagnostic {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Diagnostic {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::NumeralParse { .. } => "NumeralParse",
            ErrorImpl::BooleanParse { .. } => "BooleanParse",
            ErrorImpl::GroupedExpression { .. } => "GroupedExpression",
            ErrorImpl::BlockStatement { .. } => "BlockStatement",
            ErrorImpl::AssignStatement { .. } => "AssignStatement",
            ErrorImpl::ReturnStatement { .. } => "ReturnStatement",
            ErrorImpl::IfStatement { .. } => "IfStatement",
            ErrorImpl::WhileStatement { .. } => "WhileStatement",
            ErrorImpl::ForStatement { .. } => "ForStatement",
            ErrorImpl::RepeatStatement { .. } => "RepeatStatement",
            ErrorImpl::FunctionStatement { .. } => "FunctionStatement",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixRule { .. } => "NoPrefixRule",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::NumeralParse { token } => ErrorTip::Suggestion(format!(
                "Invalid numeral: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::BooleanParse { token } => ErrorTip::Suggestion(format!(
                "Invalid boolean: `{}`, expected `true` or `false`",
                token
            )),
            ErrorImpl::GroupedExpression { found } => ErrorTip::Suggestion(format!(
                "Expected `)` to close the parenthesis, found {}",
                found
            )),
            ErrorImpl::BlockStatement {
                construct,
                terminator,
            } => ErrorTip::Suggestion(format!(
                "Input ended inside `{}` block, did you miss `{}`?",
                construct, terminator
            )),
            ErrorImpl::AssignStatement { message }
            | ErrorImpl::ReturnStatement { message }
            | ErrorImpl::IfStatement { message }
            | ErrorImpl::WhileStatement { message }
            | ErrorImpl::ForStatement { message }
            | ErrorImpl::RepeatStatement { message }
            | ErrorImpl::FunctionStatement { message } => ErrorTip::Suggestion(message.clone()),
            ErrorImpl::UnexpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected {}, found {}", expected, found))
            }
            ErrorImpl::NoPrefixRule { token, .. } if token.is_empty() => ErrorTip::None,
            ErrorImpl::NoPrefixRule { token, .. } => {
                ErrorTip::Suggestion(format!("`{}` cannot start an expression", token))
            }
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("error parsing numeral: {token:?}")]
    NumeralParse { token: String },
    #[error("error parsing boolean: {token:?}")]
    BooleanParse { token: String },
    #[error("unclosed grouped expression, found {found}")]
    GroupedExpression { found: String },
    #[error("`{construct}` block reached end of input before `{terminator}`")]
    BlockStatement {
        construct: String,
        terminator: String,
    },
    #[error("assignment: {message}")]
    AssignStatement { message: String },
    #[error("return statement: {message}")]
    ReturnStatement { message: String },
    #[error("if statement: {message}")]
    IfStatement { message: String },
    #[error("while statement: {message}")]
    WhileStatement { message: String },
    #[error("for statement: {message}")]
    ForStatement { message: String },
    #[error("repeat statement: {message}")]
    RepeatStatement { message: String },
    #[error("function statement: {message}")]
    FunctionStatement { message: String },
    #[error("unexpected token: expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },
    #[error("no prefix parse rule for {kind} {token:?}")]
    NoPrefixRule {
        kind: crate::lexer::tokens::TokenKind,
        token: String,
    },
}
