use std::fmt::{Debug, Display};

use crate::{lexer::tokens::Token, Span};

use super::{
    expressions::{
        BooleanLiteral, CallExpr, FloatLiteral, Identifier, InfixExpr, IntegerLiteral, NilLiteral,
        PrefixExpr, StringLiteral,
    },
    statements::{
        AssignStmt, BlockStmt, ExpressionStmt, ForStmt, FunctionStmt, IfStmt, RepeatStmt,
        ReturnStmt, WhileStmt,
    },
};

/// Node Trait
///
/// Every node of the tree remembers the token that introduced it.
/// `Display` gives the canonical bracketed rendering of the node.
pub trait Node: Debug + Display {
    /// The token that introduced the node.
    fn token(&self) -> &Token;

    /// Literal text of the introducing token.
    fn token_literal(&self) -> &str {
        &self.token().value
    }

    fn get_span(&self) -> &Span {
        &self.token().span
    }
}

/// Expression Types
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Float(FloatLiteral),
    Boolean(BooleanLiteral),
    String(StringLiteral),
    Nil(NilLiteral),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
    Call(CallExpr),
}

impl Expr {
    fn as_node(&self) -> &dyn Node {
        match self {
            Expr::Identifier(expr) => expr,
            Expr::Integer(expr) => expr,
            Expr::Float(expr) => expr,
            Expr::Boolean(expr) => expr,
            Expr::String(expr) => expr,
            Expr::Nil(expr) => expr,
            Expr::Prefix(expr) => expr,
            Expr::Infix(expr) => expr,
            Expr::Call(expr) => expr,
        }
    }
}

impl Node for Expr {
    fn token(&self) -> &Token {
        self.as_node().token()
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_node(), f)
    }
}

/// Statement Types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(ExpressionStmt),
    Assign(AssignStmt),
    Return(ReturnStmt),
    Block(BlockStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Repeat(RepeatStmt),
    Function(FunctionStmt),
}

impl Stmt {
    fn as_node(&self) -> &dyn Node {
        match self {
            Stmt::Expression(stmt) => stmt,
            Stmt::Assign(stmt) => stmt,
            Stmt::Return(stmt) => stmt,
            Stmt::Block(stmt) => stmt,
            Stmt::If(stmt) => stmt,
            Stmt::While(stmt) => stmt,
            Stmt::For(stmt) => stmt,
            Stmt::Repeat(stmt) => stmt,
            Stmt::Function(stmt) => stmt,
        }
    }
}

impl Node for Stmt {
    fn token(&self) -> &Token {
        self.as_node().token()
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.as_node(), f)
    }
}

/// The parsed top-level statements of one source, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}
