use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::{
    ast::ast::{Expr, Stmt},
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, lowest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum Precedence {
    Lowest,
    Or,
    And,
    Equality,
    Relational,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    Shift,
    Concatenation,
    Additive,
    Multiplicative,
    Unary,
    Exponentiation,
    FunctionCall,
}

impl Precedence {
    /// Precedence of `kind` when it appears between two operands.
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Or => Precedence::Or,
            TokenKind::And => Precedence::And,
            TokenKind::Equal | TokenKind::NotEqual => Precedence::Equality,
            TokenKind::Less | TokenKind::More | TokenKind::LessEqual | TokenKind::MoreEqual => {
                Precedence::Relational
            }
            TokenKind::BOr => Precedence::BitwiseOr,
            TokenKind::Tilde => Precedence::BitwiseXor,
            TokenKind::BAnd => Precedence::BitwiseAnd,
            TokenKind::BLShift | TokenKind::BRShift => Precedence::Shift,
            TokenKind::Concat => Precedence::Concatenation,
            TokenKind::Plus | TokenKind::Minus => Precedence::Additive,
            TokenKind::Asterisk | TokenKind::Slash | TokenKind::FDiv | TokenKind::Percentage => {
                Precedence::Multiplicative
            }
            TokenKind::Caret => Precedence::Exponentiation,
            TokenKind::LParent => Precedence::FunctionCall,
            _ => Precedence::Lowest,
        }
    }

    /// The level right below this one. Right-associative operators parse their
    /// right operand at this level so that an equal operator keeps binding.
    pub fn lower(self) -> Precedence {
        match self {
            Precedence::Lowest | Precedence::Or => Precedence::Lowest,
            Precedence::And => Precedence::Or,
            Precedence::Equality => Precedence::And,
            Precedence::Relational => Precedence::Equality,
            Precedence::BitwiseOr => Precedence::Relational,
            Precedence::BitwiseXor => Precedence::BitwiseOr,
            Precedence::BitwiseAnd => Precedence::BitwiseXor,
            Precedence::Shift => Precedence::BitwiseAnd,
            Precedence::Concatenation => Precedence::Shift,
            Precedence::Additive => Precedence::Concatenation,
            Precedence::Multiplicative => Precedence::Additive,
            Precedence::Unary => Precedence::Multiplicative,
            Precedence::Exponentiation => Precedence::Unary,
            Precedence::FunctionCall => Precedence::Exponentiation,
        }
    }
}

/// `^` and `..` group to the right, every other binary operator to the left.
pub fn is_right_associative(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Caret | TokenKind::Concat)
}

pub type StmtHandler = fn(&mut Parser<'_>) -> Option<Stmt>;
pub type NUDHandler = fn(&mut Parser<'_>) -> Option<Expr>;
pub type LEDHandler = fn(&mut Parser<'_>, Expr) -> Option<Expr>;

pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;

lazy_static! {
    /// Statement handlers, keyed by the token that starts the statement.
    pub static ref STMT_LOOKUP: StmtLookup = {
        let mut map: StmtLookup = HashMap::new();
        map.insert(TokenKind::Identifier, parse_identifier_stmt);
        map.insert(TokenKind::Local, parse_local_stmt);
        map.insert(TokenKind::Return, parse_return_stmt);
        map.insert(TokenKind::If, parse_if_stmt);
        map.insert(TokenKind::While, parse_while_stmt);
        map.insert(TokenKind::For, parse_for_stmt);
        map.insert(TokenKind::Repeat, parse_repeat_stmt);
        map.insert(TokenKind::Function, parse_function_stmt);
        map
    };

    /// Null denotation (prefix) handlers.
    pub static ref NUD_LOOKUP: NUDLookup = {
        let mut map: NUDLookup = HashMap::new();

        // Literals and symbols
        map.insert(TokenKind::Identifier, parse_identifier);
        map.insert(TokenKind::Numerical, parse_numeral);
        map.insert(TokenKind::True, parse_boolean);
        map.insert(TokenKind::False, parse_boolean);
        map.insert(TokenKind::String, parse_string);
        map.insert(TokenKind::Nil, parse_nil);

        // Unary operators
        map.insert(TokenKind::Minus, parse_prefix_expr);
        map.insert(TokenKind::Not, parse_prefix_expr);
        map.insert(TokenKind::Hashtag, parse_prefix_expr);
        map.insert(TokenKind::Tilde, parse_prefix_expr);

        map.insert(TokenKind::LParent, parse_grouped_expr);
        map
    };

    /// Left denotation (infix) handlers.
    pub static ref LED_LOOKUP: LEDLookup = {
        let mut map: LEDLookup = HashMap::new();

        // Logical
        map.insert(TokenKind::Or, parse_infix_expr);
        map.insert(TokenKind::And, parse_infix_expr);

        // Comparison
        map.insert(TokenKind::Equal, parse_infix_expr);
        map.insert(TokenKind::NotEqual, parse_infix_expr);
        map.insert(TokenKind::Less, parse_infix_expr);
        map.insert(TokenKind::More, parse_infix_expr);
        map.insert(TokenKind::LessEqual, parse_infix_expr);
        map.insert(TokenKind::MoreEqual, parse_infix_expr);

        // Bitwise
        map.insert(TokenKind::BOr, parse_infix_expr);
        map.insert(TokenKind::Tilde, parse_infix_expr);
        map.insert(TokenKind::BAnd, parse_infix_expr);
        map.insert(TokenKind::BLShift, parse_infix_expr);
        map.insert(TokenKind::BRShift, parse_infix_expr);

        // Arithmetic and concatenation
        map.insert(TokenKind::Concat, parse_infix_expr);
        map.insert(TokenKind::Plus, parse_infix_expr);
        map.insert(TokenKind::Minus, parse_infix_expr);
        map.insert(TokenKind::Asterisk, parse_infix_expr);
        map.insert(TokenKind::Slash, parse_infix_expr);
        map.insert(TokenKind::FDiv, parse_infix_expr);
        map.insert(TokenKind::Percentage, parse_infix_expr);
        map.insert(TokenKind::Caret, parse_infix_expr);

        map.insert(TokenKind::LParent, parse_call_expr);
        map
    };
}
