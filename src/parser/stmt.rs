use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::{CallExpr, Identifier, IntegerLiteral},
        statements::{
            AssignStmt, BlockStmt, ExpressionStmt, ForStmt, FunctionStmt, IfStmt, RepeatStmt,
            ReturnStmt, WhileStmt,
        },
    },
    errors::errors::ErrorImpl,
    lexer::tokens::{Token, TokenKind},
};

use super::{
    expr::{parse_call_arguments, parse_expr},
    lookups::{Precedence, STMT_LOOKUP},
    parser::Parser,
};

/// Parses the statement starting at the current token and leaves the parser on
/// its last token. Newlines and `;` separate statements and produce nothing.
pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    let kind = parser.current_token_kind();
    if matches!(kind, TokenKind::Newline | TokenKind::Semicolon) {
        return None;
    }

    if let Some(handler) = STMT_LOOKUP.get(&kind).copied() {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, Precedence::Lowest)?;

    Some(Stmt::Expression(ExpressionStmt { token, expression }))
}

/// A statement starting with a name: assignment, call or bare expression.
pub fn parse_identifier_stmt(parser: &mut Parser) -> Option<Stmt> {
    match parser.peek_token_kind() {
        TokenKind::Assign => {
            let token = parser.current_token().clone();
            let name = Identifier::new(token.clone());
            parser.next_token();
            parse_assignment(parser, token, name, false).map(Stmt::Assign)
        }
        TokenKind::LParent => parse_call_stmt(parser),
        _ => parse_expression_stmt(parser),
    }
}

fn parse_call_stmt(parser: &mut Parser) -> Option<Stmt> {
    let name = Identifier::new(parser.current_token().clone());
    parser.next_token();

    let token = parser.current_token().clone();
    let arguments = parse_call_arguments(parser)?;

    Some(Stmt::Expression(ExpressionStmt {
        token: name.token.clone(),
        expression: Expr::Call(CallExpr {
            token,
            name,
            arguments,
        }),
    }))
}

/// The right-hand side of an assignment. Starts on `=`.
fn parse_assignment(
    parser: &mut Parser,
    token: Token,
    name: Identifier,
    is_local: bool,
) -> Option<AssignStmt> {
    parser.next_token();
    let value = parse_expr(parser, Precedence::Lowest)?;

    Some(AssignStmt {
        token,
        name,
        value,
        is_local,
    })
}

pub fn parse_local_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    if !parser.expect_peek_error(TokenKind::Identifier, |found| {
        ErrorImpl::AssignStatement {
            message: format!("expected identifier after `local`, found {}", found.describe()),
        }
    }) {
        return None;
    }
    let name = Identifier::new(parser.current_token().clone());

    if !parser.expect_peek_error(TokenKind::Assign, |found| ErrorImpl::AssignStatement {
        message: format!("expected `=` after local `{}`, found {}", name, found.describe()),
    }) {
        return None;
    }

    parse_assignment(parser, token, name, true).map(Stmt::Assign)
}

fn ends_statement(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Newline | TokenKind::Semicolon | TokenKind::EOF
    ) || kind.is_block_end()
}

/// `return` with an optional value. Nothing may follow it on the same line.
pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    let value = if ends_statement(parser.peek_token_kind()) {
        None
    } else {
        parser.next_token();
        Some(parse_expr(parser, Precedence::Lowest)?)
    };

    if !ends_statement(parser.peek_token_kind()) {
        let found = parser.peek_token().describe();
        let position = parser.peek_token().span.start.clone();
        parser.report(
            ErrorImpl::ReturnStatement {
                message: format!("expected end of statement after return, found {}", found),
            },
            position,
        );
        return None;
    }

    Some(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses statements until a block-ending keyword. Starts on the token that
/// opens the block and leaves the parser on the keyword that closed it.
///
/// Reaching the end of input first records a block diagnostic naming
/// `construct` and the `terminator` it was waiting for.
fn parse_block(
    parser: &mut Parser,
    construct: TokenKind,
    terminator: TokenKind,
) -> Option<BlockStmt> {
    let token = parser.current_token().clone();
    parser.next_token();

    let mut body = vec![];

    while !parser.current_token_kind().is_block_end() {
        if parser.current_token_kind() == TokenKind::EOF {
            parser.report_current(ErrorImpl::BlockStatement {
                construct: construct.text().to_string(),
                terminator: terminator.text().to_string(),
            });
            return None;
        }

        let errors_before = parser.diagnostic_count();

        match parse_stmt(parser) {
            Some(stmt) => body.push(stmt),
            None if parser.diagnostic_count() > errors_before => {
                let kind = parser.current_token_kind();
                if kind.is_block_end() || kind == TokenKind::EOF {
                    continue;
                }
                parser.recover();
            }
            None => {}
        }

        parser.next_token();
    }

    Some(BlockStmt { token, body })
}

/// Handles both `if` and `elseif`; an `elseif` branch becomes the `else` block
/// of the outer statement and closes on the shared `end`.
pub fn parse_if_stmt(parser: &mut Parser) -> Option<Stmt> {
    parse_if(parser).map(Stmt::If)
}

fn parse_if(parser: &mut Parser) -> Option<IfStmt> {
    let token = parser.current_token().clone();
    parser.next_token();

    let condition = parse_expr(parser, Precedence::Lowest)?;

    if !parser.expect_peek_error(TokenKind::Then, |found| ErrorImpl::IfStatement {
        message: format!("expected `then` after if condition, found {}", found.describe()),
    }) {
        return None;
    }

    let consequence = parse_block(parser, TokenKind::If, TokenKind::End)?;

    let alternative = match parser.current_token_kind() {
        TokenKind::Elseif => {
            let elseif_token = parser.current_token().clone();
            let nested = parse_if(parser)?;

            Some(BlockStmt {
                token: elseif_token,
                body: vec![Stmt::If(nested)],
            })
        }
        TokenKind::Else => {
            let block = parse_block(parser, TokenKind::If, TokenKind::End)?;
            if !parser.expect_current_error(TokenKind::End, |found| ErrorImpl::IfStatement {
                message: format!("expected `end` to close else block, found {}", found.describe()),
            }) {
                return None;
            }
            Some(block)
        }
        _ => {
            if !parser.expect_current_error(TokenKind::End, |found| ErrorImpl::IfStatement {
                message: format!("expected `end` to close if, found {}", found.describe()),
            }) {
                return None;
            }
            None
        }
    };

    Some(IfStmt {
        token,
        condition,
        consequence,
        alternative,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    parser.next_token();

    let condition = parse_expr(parser, Precedence::Lowest)?;

    if !parser.expect_peek_error(TokenKind::Do, |found| ErrorImpl::WhileStatement {
        message: format!("expected `do` after while condition, found {}", found.describe()),
    }) {
        return None;
    }

    let body = parse_block(parser, TokenKind::While, TokenKind::End)?;

    if !parser.expect_current_error(TokenKind::End, |found| ErrorImpl::WhileStatement {
        message: format!("expected `end` to close while, found {}", found.describe()),
    }) {
        return None;
    }

    Some(Stmt::While(WhileStmt {
        token,
        condition,
        body,
    }))
}

/// Numeric `for name = init, limit [, step] do ... end`.
pub fn parse_for_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let for_error = |message: String| ErrorImpl::ForStatement { message };

    if !parser.expect_peek_error(TokenKind::Identifier, |found| {
        for_error(format!("expected loop variable after `for`, found {}", found.describe()))
    }) {
        return None;
    }
    let name_token = parser.current_token().clone();
    let name = Identifier::new(name_token.clone());

    if !parser.expect_peek_error(TokenKind::Assign, |found| {
        for_error(format!("expected `=` after `{}`, found {}", name, found.describe()))
    }) {
        return None;
    }
    let init = parse_assignment(parser, name_token, name, false)?;

    if !parser.expect_peek_error(TokenKind::Comma, |found| {
        for_error(format!("expected `,` after for initial value, found {}", found.describe()))
    }) {
        return None;
    }
    parser.next_token();
    let limit = parse_expr(parser, Precedence::Lowest)?;

    let step = if parser.peek_token_kind() == TokenKind::Comma {
        parser.next_token();
        parser.next_token();
        parse_expr(parser, Precedence::Lowest)?
    } else {
        let position = parser.peek_token().span.start.clone();
        Expr::Integer(IntegerLiteral {
            token: Token::synthetic(TokenKind::Numerical, "1", position),
            value: 1,
        })
    };

    if !parser.expect_peek_error(TokenKind::Do, |found| {
        for_error(format!("expected `do` after for header, found {}", found.describe()))
    }) {
        return None;
    }

    let body = parse_block(parser, TokenKind::For, TokenKind::End)?;

    if !parser.expect_current_error(TokenKind::End, |found| {
        for_error(format!("expected `end` to close for, found {}", found.describe()))
    }) {
        return None;
    }

    Some(Stmt::For(ForStmt {
        token,
        init,
        limit,
        step,
        body,
    }))
}

pub fn parse_repeat_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();

    let body = parse_block(parser, TokenKind::Repeat, TokenKind::Until)?;

    if !parser.expect_current_error(TokenKind::Until, |found| ErrorImpl::RepeatStatement {
        message: format!("expected `until` to close repeat, found {}", found.describe()),
    }) {
        return None;
    }
    parser.next_token();

    let condition = parse_expr(parser, Precedence::Lowest)?;

    Some(Stmt::Repeat(RepeatStmt {
        token,
        body,
        condition,
    }))
}

/// `function name(a, b) ... end`
pub fn parse_function_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let function_error = |message: String| ErrorImpl::FunctionStatement { message };

    if !parser.expect_peek_error(TokenKind::Identifier, |found| {
        function_error(format!("expected function name, found {}", found.describe()))
    }) {
        return None;
    }
    let name = Identifier::new(parser.current_token().clone());

    if !parser.expect_peek_error(TokenKind::LParent, |found| {
        function_error(format!("expected `(` after `{}`, found {}", name, found.describe()))
    }) {
        return None;
    }

    let parameters = parse_parameters(parser)?;

    let body = parse_block(parser, TokenKind::Function, TokenKind::End)?;

    if !parser.expect_current_error(TokenKind::End, |found| {
        function_error(format!("expected `end` to close `{}`, found {}", name, found.describe()))
    }) {
        return None;
    }

    Some(Stmt::Function(FunctionStmt {
        token,
        name,
        parameters,
        body,
    }))
}

/// Starts on `(` and leaves the parser on `)`.
fn parse_parameters(parser: &mut Parser) -> Option<Vec<Identifier>> {
    let mut parameters = vec![];

    if parser.peek_token_kind() == TokenKind::RParent {
        parser.next_token();
        return Some(parameters);
    }

    let parameter_error = |found: &Token| ErrorImpl::FunctionStatement {
        message: format!("expected parameter name, found {}", found.describe()),
    };

    if !parser.expect_peek_error(TokenKind::Identifier, parameter_error) {
        return None;
    }
    parameters.push(Identifier::new(parser.current_token().clone()));

    while parser.peek_token_kind() == TokenKind::Comma {
        parser.next_token();
        if !parser.expect_peek_error(TokenKind::Identifier, parameter_error) {
            return None;
        }
        parameters.push(Identifier::new(parser.current_token().clone()));
    }

    if !parser.expect_peek_error(TokenKind::RParent, |found| ErrorImpl::FunctionStatement {
        message: format!("expected `)` after parameters, found {}", found.describe()),
    }) {
        return None;
    }

    Some(parameters)
}
