use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display, rc::Rc};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("break", TokenKind::Break);
        map.insert("do", TokenKind::Do);
        map.insert("else", TokenKind::Else);
        map.insert("elseif", TokenKind::Elseif);
        map.insert("end", TokenKind::End);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("goto", TokenKind::Goto);
        map.insert("if", TokenKind::If);
        map.insert("in", TokenKind::In);
        map.insert("local", TokenKind::Local);
        map.insert("nil", TokenKind::Nil);
        map.insert("not", TokenKind::Not);
        map.insert("or", TokenKind::Or);
        map.insert("repeat", TokenKind::Repeat);
        map.insert("return", TokenKind::Return);
        map.insert("then", TokenKind::Then);
        map.insert("true", TokenKind::True);
        map.insert("until", TokenKind::Until);
        map.insert("while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Reserved
    And,
    Break,
    Do,
    Else,
    Elseif,
    End,
    False,
    For,
    Function,
    Goto,
    If,
    In,
    Local,
    Nil,
    Not,
    Or,
    Repeat,
    Return,
    Then,
    True,
    Until,
    While,

    Plus,       // +
    Minus,      // -
    Asterisk,   // *
    Slash,      // /
    FDiv,       // //
    Percentage, // %
    Caret,      // ^
    BAnd,       // &
    BOr,        // |
    Tilde,      // ~
    BLShift,    // <<
    BRShift,    // >>
    Equal,      // ==
    NotEqual,   // ~=
    Less,
    More,
    LessEqual,
    MoreEqual,
    Hashtag, // #
    Concat,  // ..
    Assign,  // =

    LParent,
    RParent,
    LCurly,
    RCurly,
    LSquare,
    RSquare,
    Semicolon,
    Colon,
    Label, // ::
    Comma,
    Dot,
    Vararg, // ...

    Identifier,
    Numerical,
    String,

    Comment,
    Newline,
    Illegal,
    EOF,
}

impl TokenKind {
    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }

    /// Tokens that close a block: `end`, `elseif`, `else` and `until`.
    pub fn is_block_end(&self) -> bool {
        matches!(
            self,
            TokenKind::End | TokenKind::Elseif | TokenKind::Else | TokenKind::Until
        )
    }

    /// How the token reads in source, for messages.
    pub fn text(&self) -> &'static str {
        match self {
            TokenKind::And => "and",
            TokenKind::Break => "break",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Elseif => "elseif",
            TokenKind::End => "end",
            TokenKind::False => "false",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::Goto => "goto",
            TokenKind::If => "if",
            TokenKind::In => "in",
            TokenKind::Local => "local",
            TokenKind::Nil => "nil",
            TokenKind::Not => "not",
            TokenKind::Or => "or",
            TokenKind::Repeat => "repeat",
            TokenKind::Return => "return",
            TokenKind::Then => "then",
            TokenKind::True => "true",
            TokenKind::Until => "until",
            TokenKind::While => "while",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::FDiv => "//",
            TokenKind::Percentage => "%",
            TokenKind::Caret => "^",
            TokenKind::BAnd => "&",
            TokenKind::BOr => "|",
            TokenKind::Tilde => "~",
            TokenKind::BLShift => "<<",
            TokenKind::BRShift => ">>",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "~=",
            TokenKind::Less => "<",
            TokenKind::More => ">",
            TokenKind::LessEqual => "<=",
            TokenKind::MoreEqual => ">=",
            TokenKind::Hashtag => "#",
            TokenKind::Concat => "..",
            TokenKind::Assign => "=",
            TokenKind::LParent => "(",
            TokenKind::RParent => ")",
            TokenKind::LCurly => "{",
            TokenKind::RCurly => "}",
            TokenKind::LSquare => "[",
            TokenKind::RSquare => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Label => "::",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Vararg => "...",
            TokenKind::Identifier => "identifier",
            TokenKind::Numerical => "numeral",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Newline => "newline",
            TokenKind::Illegal => "illegal token",
            TokenKind::EOF => "end of input",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:?} at {}:{}",
            self.kind, self.value, self.span.start.line, self.span.start.column
        )
    }
}

impl Token {
    /// Builds a token that does not come from the source text, positioned at `position`.
    pub fn synthetic(kind: TokenKind, value: &str, position: Position) -> Token {
        Token {
            kind,
            value: String::from(value),
            span: Span {
                start: position.clone(),
                end: position,
            },
        }
    }

    pub fn line(&self) -> u32 {
        self.span.start.line
    }

    pub fn column(&self) -> u32 {
        self.span.start.column
    }

    pub fn source_name(&self) -> &Rc<String> {
        &self.span.start.file
    }

    /// Human readable form used in diagnostics: the literal text, or the kind for
    /// tokens whose literal is not meaningful on its own.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Newline => String::from("newline"),
            TokenKind::EOF => String::from("end of input"),
            _ => format!("`{}`", self.value),
        }
    }

    pub fn debug(&self) {
        if matches!(
            self.kind,
            TokenKind::String | TokenKind::Identifier | TokenKind::Numerical | TokenKind::Illegal
        ) {
            println!("{} ({}) {}:{}", self.kind, self.value, self.line(), self.column());
        } else {
            println!("{} () {}:{}", self.kind, self.line(), self.column());
        }
    }
}
