use std::{fmt::Display, slice::Iter};

use crate::lexer::tokens::Token;

use super::{
    ast::{Expr, Node, Stmt},
    expressions::Identifier,
};

/// A sequence of statements ending at `end`, `else`, `elseif` or `until`.
///
/// The token is the one that opened the block (`then`, `do`, `else`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub token: Token,
    pub body: Vec<Stmt>,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}

impl Node for BlockStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for BlockStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for stmt in &self.body {
            write!(f, "[{}]", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Expr,
}

impl Node for ExpressionStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

/// `name = value`, or `local name = value` when `is_local` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub token: Token,
    pub name: Identifier,
    pub value: Expr,
    pub is_local: bool,
}

impl Node for AssignStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for AssignStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_local {
            write!(f, "local ")?;
        }
        write!(f, "{} = {}", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Option<Expr>,
}

impl Node for ReturnStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "return {}", value),
            None => write!(f, "return"),
        }
    }
}

/// `if` with an optional `else` block. An `elseif` chain is stored as an
/// alternative block holding a single nested `IfStmt`.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub token: Token,
    pub condition: Expr,
    pub consequence: BlockStmt,
    pub alternative: Option<BlockStmt>,
}

impl Node for IfStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for IfStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "if {} then {} ", self.condition, self.consequence)?;
        if let Some(alternative) = &self.alternative {
            write!(f, "else {} ", alternative)?;
        }
        write!(f, "end")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub token: Token,
    pub condition: Expr,
    pub body: BlockStmt,
}

impl Node for WhileStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for WhileStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "while {} do {} end", self.condition, self.body)
    }
}

/// Numeric `for`. `step` is a literal `1` when the source omits it.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub token: Token,
    pub init: AssignStmt,
    pub limit: Expr,
    pub step: Expr,
    pub body: BlockStmt,
}

impl Node for ForStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for ForStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "for [{}, {}, {}] do {} end",
            self.init, self.limit, self.step, self.body
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatStmt {
    pub token: Token,
    pub body: BlockStmt,
    pub condition: Expr,
}

impl Node for RepeatStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for RepeatStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "repeat {} until {}", self.body, self.condition)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionStmt {
    pub token: Token,
    pub name: Identifier,
    pub parameters: Vec<Identifier>,
    pub body: BlockStmt,
}

impl Node for FunctionStmt {
    fn token(&self) -> &Token {
        &self.token
    }
}

impl Display for FunctionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "function {}[", self.name)?;
        for parameter in &self.parameters {
            write!(f, "[{}]", parameter)?;
        }
        write!(f, "] {} end", self.body)
    }
}
