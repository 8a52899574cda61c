use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{Position, Span, MK_TOKEN};

use super::{
    source::{CharSource, StrSource},
    tokens::{Token, TokenKind, RESERVED_LOOKUP},
};

lazy_static! {
    static ref INTEGER_PATTERN: Regex = Regex::new("^(0[xX][0-9a-fA-F]+|[0-9]+)$").unwrap();
    static ref FLOAT_PATTERN: Regex =
        Regex::new("^[0-9]+(\\.[0-9]*)?([eE][+-]?[0-9]+)?$").unwrap();
    static ref HEX_PREFIX: Regex = Regex::new("^0[xX]").unwrap();
}

/// Pull-based lexer: every call to [`Lexer::next_token`] reads just enough
/// characters from the source to produce one token.
///
/// The lexer never fails. Malformed input (bad numerals, unterminated strings
/// or long comments, unknown characters) comes back as [`TokenKind::Illegal`]
/// tokens carrying the offending text, and the parser decides what to do with
/// them. Once the source is exhausted every call returns an `EOF` token at the
/// same position.
pub struct Lexer<'a> {
    source: Box<dyn CharSource + 'a>,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: Box<dyn CharSource + 'a>, file: Option<String>) -> Lexer<'a> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    /// Position of the next character to be read.
    pub fn cursor(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    pub fn file(&self) -> &Rc<String> {
        &self.file
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek_char()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.source.read_char()?;
        // `\r\n` ends the line on the `\n`; a lone `\r` ends it by itself.
        if ch == '\n' || (ch == '\r' && self.peek() != Some('\n')) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if matches!(ch, ' ' | '\t' | '\x0b' | '\x0c') {
                self.advance();
            } else {
                break;
            }
        }
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let start = self.cursor();

            let Some(ch) = self.advance() else {
                return MK_TOKEN!(self, TokenKind::EOF, String::from("EOF"), start);
            };
            let next = self.peek();

            let token = match ch {
                '\n' => MK_TOKEN!(self, TokenKind::Newline, String::new(), start),
                '\r' => {
                    if next == Some('\n') {
                        self.advance();
                    }
                    MK_TOKEN!(self, TokenKind::Newline, String::new(), start)
                }
                '-' if next == Some('-') => {
                    self.advance();
                    match self.skip_comment(start) {
                        Some(illegal) => illegal,
                        None => continue,
                    }
                }
                '"' | '\'' => self.scan_string(ch, start),
                c if c.is_ascii_digit() => self.scan_number(c, start),
                c if is_ident_start(c) => self.scan_identifier(c, start),
                c => self.scan_symbol(c, start),
            };

            trace!(kind = %token.kind, value = %token.value, line = token.line(), column = token.column(), "token");
            return token;
        }
    }

    fn scan_identifier(&mut self, first: char, start: Position) -> Token {
        let mut value = String::from(first);

        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = RESERVED_LOOKUP
            .get(value.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);

        MK_TOKEN!(self, kind, value, start)
    }

    /// Consumes everything that could belong to a numeral, then validates it.
    ///
    /// A sign is only taken right after the exponent marker of a decimal
    /// numeral, so `1e-5` is one token while `3-2` is three.
    fn scan_number(&mut self, first: char, start: Position) -> Token {
        let mut value = String::from(first);

        while let Some(c) = self.peek() {
            let exponent_sign = (c == '-' || c == '+')
                && (value.ends_with('e') || value.ends_with('E'))
                && !HEX_PREFIX.is_match(&value);

            if c.is_ascii_alphanumeric() || c == '.' || exponent_sign {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = if INTEGER_PATTERN.is_match(&value) || FLOAT_PATTERN.is_match(&value) {
            TokenKind::Numerical
        } else {
            TokenKind::Illegal
        };

        MK_TOKEN!(self, kind, value, start)
    }

    /// Scans a quoted string. The literal keeps both delimiters and the raw
    /// escape sequences; a backslash always takes the next character with it,
    /// so `\"` never closes the string but `\\"` does.
    fn scan_string(&mut self, quote: char, start: Position) -> Token {
        let mut value = String::from(quote);

        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    return MK_TOKEN!(self, TokenKind::Illegal, value, start);
                }
                Some(c) => {
                    self.advance();
                    value.push(c);

                    if c == '\\' {
                        if let Some(escaped) = self.advance() {
                            value.push(escaped);
                        }
                    } else if c == quote {
                        return MK_TOKEN!(self, TokenKind::String, value, start);
                    }
                }
            }
        }
    }

    /// Skips a comment whose `--` has already been consumed. Returns an illegal
    /// token only for an unterminated long comment.
    fn skip_comment(&mut self, start: Position) -> Option<Token> {
        let mut text = String::from("--");

        if self.peek() == Some('[') {
            self.advance();
            text.push('[');

            let mut level = 0;
            while self.peek() == Some('=') {
                self.advance();
                text.push('=');
                level += 1;
            }

            if self.peek() == Some('[') {
                self.advance();
                text.push('[');

                if self.skip_long_bracket(level, &mut text) {
                    return None;
                }
                return Some(MK_TOKEN!(self, TokenKind::Illegal, text, start));
            }
        }

        // Line comment: the newline itself still becomes a token.
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }

        None
    }

    /// Consumes up to and including `]`, `level` equals signs and `]`.
    /// Returns false when the input ends first.
    fn skip_long_bracket(&mut self, level: usize, text: &mut String) -> bool {
        loop {
            match self.advance() {
                None => return false,
                Some(']') => {
                    text.push(']');
                    let mut equals = 0;
                    while self.peek() == Some('=') {
                        self.advance();
                        text.push('=');
                        equals += 1;
                    }
                    if equals == level && self.peek() == Some(']') {
                        self.advance();
                        return true;
                    }
                }
                Some(c) => text.push(c),
            }
        }
    }

    fn scan_symbol(&mut self, ch: char, start: Position) -> Token {
        let (kind, value) = match ch {
            '+' => (TokenKind::Plus, "+"),
            '-' => (TokenKind::Minus, "-"),
            '*' => (TokenKind::Asterisk, "*"),
            '%' => (TokenKind::Percentage, "%"),
            '^' => (TokenKind::Caret, "^"),
            '#' => (TokenKind::Hashtag, "#"),
            '&' => (TokenKind::BAnd, "&"),
            '|' => (TokenKind::BOr, "|"),
            '(' => (TokenKind::LParent, "("),
            ')' => (TokenKind::RParent, ")"),
            '{' => (TokenKind::LCurly, "{"),
            '}' => (TokenKind::RCurly, "}"),
            '[' => (TokenKind::LSquare, "["),
            ']' => (TokenKind::RSquare, "]"),
            ';' => (TokenKind::Semicolon, ";"),
            ',' => (TokenKind::Comma, ","),
            '<' => match self.peek() {
                Some('=') => self.take(TokenKind::LessEqual, "<="),
                Some('<') => self.take(TokenKind::BLShift, "<<"),
                _ => (TokenKind::Less, "<"),
            },
            '>' => match self.peek() {
                Some('=') => self.take(TokenKind::MoreEqual, ">="),
                Some('>') => self.take(TokenKind::BRShift, ">>"),
                _ => (TokenKind::More, ">"),
            },
            '=' => match self.peek() {
                Some('=') => self.take(TokenKind::Equal, "=="),
                _ => (TokenKind::Assign, "="),
            },
            '/' => match self.peek() {
                Some('/') => self.take(TokenKind::FDiv, "//"),
                _ => (TokenKind::Slash, "/"),
            },
            ':' => match self.peek() {
                Some(':') => self.take(TokenKind::Label, "::"),
                _ => (TokenKind::Colon, ":"),
            },
            '~' => match self.peek() {
                Some('=') => self.take(TokenKind::NotEqual, "~="),
                _ => (TokenKind::Tilde, "~"),
            },
            '.' => match self.peek() {
                Some('.') => {
                    self.advance();
                    match self.peek() {
                        Some('.') => self.take(TokenKind::Vararg, "..."),
                        _ => (TokenKind::Concat, ".."),
                    }
                }
                _ => (TokenKind::Dot, "."),
            },
            other => {
                return MK_TOKEN!(self, TokenKind::Illegal, other.to_string(), start);
            }
        };

        MK_TOKEN!(self, kind, String::from(value), start)
    }

    /// Consumes the lookahead character that completes a two or three character operator.
    fn take(&mut self, kind: TokenKind, value: &'static str) -> (TokenKind, &'static str) {
        self.advance();
        (kind, value)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `EOF`.
    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        if token.kind == TokenKind::EOF {
            None
        } else {
            Some(token)
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Scans an in-memory source to completion. The returned tokens always end with `EOF`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(Box::new(StrSource::new(source)), file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}

/// Decodes the body of a string literal, dropping its delimiters and resolving
/// escape sequences. Unknown escapes keep their backslash.
pub fn unescape(literal: &str) -> String {
    let mut chars = literal.chars();
    let quote = chars.next();
    let mut body = chars.as_str();
    if let (Some(q), Some(last)) = (quote, body.chars().last()) {
        if last == q && !body.is_empty() {
            body = &body[..body.len() - last.len_utf8()];
        }
    }

    let mut result = String::new();
    let mut chars = body.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        let Some(next_ch) = chars.next() else {
            result.push(ch); // Keep the lone backslash
            break;
        };

        match next_ch {
            'n' => result.push('\n'),
            't' => result.push('\t'),
            'r' => result.push('\r'),
            'a' => result.push('\x07'),
            'b' => result.push('\x08'),
            'f' => result.push('\x0c'),
            'v' => result.push('\x0b'),
            '\\' => result.push('\\'),
            '"' => result.push('"'),
            '\'' => result.push('\''),
            '\n' => result.push('\n'),
            'x' => {
                let mut hex = String::new();
                for _ in 0..2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
            }
            d if d.is_ascii_digit() => {
                let mut digits = String::from(d);
                for _ in 0..2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_digit() => {
                            digits.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match digits.parse::<u32>().ok().and_then(char::from_u32) {
                    Some(decoded) if decoded as u32 <= 255 => result.push(decoded),
                    _ => {
                        result.push('\\');
                        result.push_str(&digits);
                    }
                }
            }
            other => {
                result.push('\\'); // Keep the backslash
                result.push(other);
            }
        }
    }

    result
}
