use crate::{
    ast::{
        ast::Expr,
        expressions::{
            BooleanLiteral, CallExpr, FloatLiteral, Identifier, InfixExpr, IntegerLiteral,
            NilLiteral, PrefixExpr, StringLiteral,
        },
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::unescape, tokens::TokenKind},
};

use super::{
    lookups::{is_right_associative, Precedence, LED_LOOKUP, NUD_LOOKUP},
    parser::Parser,
};

/// Pratt loop. Starts on the first token of the expression and leaves the
/// parser on its last token.
pub fn parse_expr(parser: &mut Parser, precedence: Precedence) -> Option<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(prefix) = NUD_LOOKUP.get(&token_kind).copied() else {
        let token = parser.current_token().value.clone();
        parser.report_current(ErrorImpl::NoPrefixRule {
            kind: token_kind,
            token,
        });
        return None;
    };

    let mut left = prefix(parser)?;

    // While the next operator binds tighter than the caller, keep extending lhs
    while precedence < Precedence::of(parser.peek_token_kind()) {
        let Some(infix) = LED_LOOKUP.get(&parser.peek_token_kind()).copied() else {
            return Some(left);
        };

        parser.next_token();
        left = infix(parser, left)?;
    }

    Some(left)
}

pub fn parse_identifier(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Identifier(Identifier::new(
        parser.current_token().clone(),
    )))
}

/// Hex numerals are always integers. Decimal numerals are integers unless they
/// contain a fraction or an exponent, or are too large for an `i64`.
pub fn parse_numeral(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();
    let text = token.value.as_str();

    let hex_digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"));

    if let Some(digits) = hex_digits {
        return match i64::from_str_radix(digits, 16) {
            Ok(value) => Some(Expr::Integer(IntegerLiteral { token, value })),
            Err(_) => {
                parser.report_current(ErrorImpl::NumeralParse {
                    token: token.value.clone(),
                });
                None
            }
        };
    }

    let is_float = text.contains(|c: char| matches!(c, '.' | 'e' | 'E'));
    if !is_float {
        if let Ok(value) = text.parse::<i64>() {
            return Some(Expr::Integer(IntegerLiteral { token, value }));
        }
    }

    match text.parse::<f64>() {
        Ok(value) => Some(Expr::Float(FloatLiteral { token, value })),
        Err(_) => {
            parser.report_current(ErrorImpl::NumeralParse {
                token: token.value.clone(),
            });
            None
        }
    }
}

pub fn parse_boolean(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match token.value.parse::<bool>() {
        Ok(value) => Some(Expr::Boolean(BooleanLiteral { token, value })),
        Err(_) => {
            parser.report_current(ErrorImpl::BooleanParse { token: token.value });
            None
        }
    }
}

pub fn parse_string(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();
    let value = unescape(&token.value);

    Some(Expr::String(StringLiteral { token, value }))
}

pub fn parse_nil(parser: &mut Parser) -> Option<Expr> {
    Some(Expr::Nil(NilLiteral {
        token: parser.current_token().clone(),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.next_token();

    let right = parse_expr(parser, Precedence::Unary)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

/// Parses the right operand and builds the node. If the right operand fails the
/// whole expression is dropped.
pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let operator_token = parser.current_token().clone();

    let precedence = Precedence::of(operator_token.kind);
    let precedence = if is_right_associative(operator_token.kind) {
        precedence.lower()
    } else {
        precedence
    };

    parser.next_token();
    let right = parse_expr(parser, precedence)?;

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouped_expr(parser: &mut Parser) -> Option<Expr> {
    parser.next_token();
    let expr = parse_expr(parser, Precedence::Lowest)?;

    if !parser.expect_peek_error(TokenKind::RParent, |found| {
        ErrorImpl::GroupedExpression {
            found: found.describe(),
        }
    }) {
        return None;
    }

    Some(expr)
}

/// `(` after an expression. Only a bare name can be called.
pub fn parse_call_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let name = match left {
        Expr::Identifier(name) => name,
        other => {
            parser.report_current(ErrorImpl::UnexpectedToken {
                expected: String::from("function name before `(`"),
                found: format!("`{}`", other),
            });
            return None;
        }
    };

    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Some(Expr::Call(CallExpr {
        token,
        name,
        arguments,
    }))
}

/// Comma separated arguments. Starts on `(` and leaves the parser on `)`.
pub fn parse_call_arguments(parser: &mut Parser) -> Option<Vec<Expr>> {
    let mut arguments = vec![];

    if parser.peek_token_kind() == TokenKind::RParent {
        parser.next_token();
        return Some(arguments);
    }

    parser.next_token();
    arguments.push(parse_expr(parser, Precedence::Lowest)?);

    while parser.peek_token_kind() == TokenKind::Comma {
        parser.next_token();
        parser.next_token();
        arguments.push(parse_expr(parser, Precedence::Lowest)?);
    }

    if !parser.expect_peek(TokenKind::RParent) {
        return None;
    }

    Some(arguments)
}
