//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric literals (integers, hex and floats)
//! - String literals and their failure modes
//! - Operators and punctuation
//! - Comments, newlines and position tracking

use std::io::Cursor;

use super::{
    lexer::{tokenize, unescape, Lexer},
    source::{CharSource, ReaderSource, StrSource},
    tokens::{Token, TokenKind},
};

fn scan(source: &str) -> Vec<Token> {
    tokenize(source, Some("test.lua".to_string()))
}

fn assert_tokens(tokens: &[Token], expected: &[(TokenKind, &str, u32, u32)]) {
    assert_eq!(tokens.len(), expected.len(), "token count differs: {:?}", tokens);

    for (token, (kind, value, line, column)) in tokens.iter().zip(expected) {
        assert_eq!(token.kind, *kind, "kind of {}", token);
        assert_eq!(token.value, *value, "value of {}", token);
        assert_eq!(token.line(), *line, "line of {}", token);
        assert_eq!(token.column(), *column, "column of {}", token);
        assert_eq!(token.source_name().as_str(), "test.lua");
    }
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = scan("_validIdentifier valid123 my_var _tempVar _3var 1invalid 123test");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Identifier, "_validIdentifier", 1, 1),
            (TokenKind::Identifier, "valid123", 1, 18),
            (TokenKind::Identifier, "my_var", 1, 27),
            (TokenKind::Identifier, "_tempVar", 1, 34),
            (TokenKind::Identifier, "_3var", 1, 43),
            (TokenKind::Illegal, "1invalid", 1, 49),
            (TokenKind::Illegal, "123test", 1, 58),
            (TokenKind::EOF, "EOF", 1, 65),
        ],
    );
}

#[test]
fn test_tokenize_keywords() {
    let tokens = scan(
        "and break do else elseif end false for function \
         goto if in local nil not or repeat return then true until while",
    );

    assert_tokens(
        &tokens,
        &[
            (TokenKind::And, "and", 1, 1),
            (TokenKind::Break, "break", 1, 5),
            (TokenKind::Do, "do", 1, 11),
            (TokenKind::Else, "else", 1, 14),
            (TokenKind::Elseif, "elseif", 1, 19),
            (TokenKind::End, "end", 1, 26),
            (TokenKind::False, "false", 1, 30),
            (TokenKind::For, "for", 1, 36),
            (TokenKind::Function, "function", 1, 40),
            (TokenKind::Goto, "goto", 1, 49),
            (TokenKind::If, "if", 1, 54),
            (TokenKind::In, "in", 1, 57),
            (TokenKind::Local, "local", 1, 60),
            (TokenKind::Nil, "nil", 1, 66),
            (TokenKind::Not, "not", 1, 70),
            (TokenKind::Or, "or", 1, 74),
            (TokenKind::Repeat, "repeat", 1, 77),
            (TokenKind::Return, "return", 1, 84),
            (TokenKind::Then, "then", 1, 91),
            (TokenKind::True, "true", 1, 96),
            (TokenKind::Until, "until", 1, 101),
            (TokenKind::While, "while", 1, 107),
            (TokenKind::EOF, "EOF", 1, 112),
        ],
    );
}

#[test]
fn test_tokenize_operators() {
    let tokens = scan(
        "+ - * / % ^ # & ~ | << >> // == ~= <= >= < > = ( ) { } [ ] :: : , . .. ...",
    );

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Plus, "+", 1, 1),
            (TokenKind::Minus, "-", 1, 3),
            (TokenKind::Asterisk, "*", 1, 5),
            (TokenKind::Slash, "/", 1, 7),
            (TokenKind::Percentage, "%", 1, 9),
            (TokenKind::Caret, "^", 1, 11),
            (TokenKind::Hashtag, "#", 1, 13),
            (TokenKind::BAnd, "&", 1, 15),
            (TokenKind::Tilde, "~", 1, 17),
            (TokenKind::BOr, "|", 1, 19),
            (TokenKind::BLShift, "<<", 1, 21),
            (TokenKind::BRShift, ">>", 1, 24),
            (TokenKind::FDiv, "//", 1, 27),
            (TokenKind::Equal, "==", 1, 30),
            (TokenKind::NotEqual, "~=", 1, 33),
            (TokenKind::LessEqual, "<=", 1, 36),
            (TokenKind::MoreEqual, ">=", 1, 39),
            (TokenKind::Less, "<", 1, 42),
            (TokenKind::More, ">", 1, 44),
            (TokenKind::Assign, "=", 1, 46),
            (TokenKind::LParent, "(", 1, 48),
            (TokenKind::RParent, ")", 1, 50),
            (TokenKind::LCurly, "{", 1, 52),
            (TokenKind::RCurly, "}", 1, 54),
            (TokenKind::LSquare, "[", 1, 56),
            (TokenKind::RSquare, "]", 1, 58),
            (TokenKind::Label, "::", 1, 60),
            (TokenKind::Colon, ":", 1, 63),
            (TokenKind::Comma, ",", 1, 65),
            (TokenKind::Dot, ".", 1, 67),
            (TokenKind::Concat, "..", 1, 69),
            (TokenKind::Vararg, "...", 1, 72),
            (TokenKind::EOF, "EOF", 1, 75),
        ],
    );
}

#[test]
fn test_tokenize_operators_without_spaces() {
    assert_eq!(
        kinds("a<=b<<c>>=d~=e..."),
        vec![
            TokenKind::Identifier,
            TokenKind::LessEqual,
            TokenKind::Identifier,
            TokenKind::BLShift,
            TokenKind::Identifier,
            TokenKind::BRShift,
            TokenKind::Assign,
            TokenKind::Identifier,
            TokenKind::NotEqual,
            TokenKind::Identifier,
            TokenKind::Vararg,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_strings_and_crlf() {
    let tokens = scan("'string'\r\n\"test\\n123\"\r\n");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::String, "'string'", 1, 1),
            (TokenKind::Newline, "", 1, 9),
            (TokenKind::String, "\"test\\n123\"", 2, 1),
            (TokenKind::Newline, "", 2, 12),
            (TokenKind::EOF, "EOF", 3, 1),
        ],
    );
}

#[test]
fn test_tokenize_escaped_quote_in_string() {
    let tokens = scan(r#""quote\"test" 'it\'s' "back\\" x"#);

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, r#""quote\"test""#);
    assert_eq!(tokens[1].kind, TokenKind::String);
    assert_eq!(tokens[1].value, r"'it\'s'");
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].value, r#""back\\""#);
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_mismatched_quote_does_not_close() {
    let tokens = scan(r#""it's" 'say "hi"'"#);

    assert_eq!(tokens[0].value, r#""it's""#);
    assert_eq!(tokens[1].value, r#"'say "hi"'"#);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unterminated_string() {
    let tokens = scan("x = \"never closed");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Identifier, "x", 1, 1),
            (TokenKind::Assign, "=", 1, 3),
            (TokenKind::Illegal, "\"never closed", 1, 5),
            (TokenKind::EOF, "EOF", 1, 18),
        ],
    );
}

#[test]
fn test_tokenize_string_stops_at_end_of_line() {
    let tokens = scan("'open\nx");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Illegal, "'open", 1, 1),
            (TokenKind::Newline, "", 1, 6),
            (TokenKind::Identifier, "x", 2, 1),
            (TokenKind::EOF, "EOF", 2, 2),
        ],
    );
}

#[test]
fn test_tokenize_numbers() {
    let tokens = scan("3 345 0xff 0xBEBADA 3.0 3.1416 314.16e-2 0.31416E1 34e1");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Numerical, "3", 1, 1),
            (TokenKind::Numerical, "345", 1, 3),
            (TokenKind::Numerical, "0xff", 1, 7),
            (TokenKind::Numerical, "0xBEBADA", 1, 12),
            (TokenKind::Numerical, "3.0", 1, 21),
            (TokenKind::Numerical, "3.1416", 1, 25),
            (TokenKind::Numerical, "314.16e-2", 1, 32),
            (TokenKind::Numerical, "0.31416E1", 1, 42),
            (TokenKind::Numerical, "34e1", 1, 52),
            (TokenKind::EOF, "EOF", 1, 56),
        ],
    );
}

#[test]
fn test_tokenize_minus_after_numeral_is_an_operator() {
    let tokens = scan("3-2");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Numerical, "3", 1, 1),
            (TokenKind::Minus, "-", 1, 2),
            (TokenKind::Numerical, "2", 1, 3),
            (TokenKind::EOF, "EOF", 1, 4),
        ],
    );
}

#[test]
fn test_tokenize_signed_exponent_stays_in_numeral() {
    let tokens = scan("1e-5 2E+3 0xe-1");

    assert_eq!(tokens[0].kind, TokenKind::Numerical);
    assert_eq!(tokens[0].value, "1e-5");
    assert_eq!(tokens[1].kind, TokenKind::Numerical);
    assert_eq!(tokens[1].value, "2E+3");
    // In hex `e` is a digit, so the minus is a separate operator.
    assert_eq!(tokens[2].kind, TokenKind::Numerical);
    assert_eq!(tokens[2].value, "0xe");
    assert_eq!(tokens[3].kind, TokenKind::Minus);
    assert_eq!(tokens[4].kind, TokenKind::Numerical);
}

#[test]
fn test_tokenize_malformed_numerals() {
    let tokens = scan("0x 1.2.3 3e 0xfg");

    for token in &tokens[..4] {
        assert_eq!(token.kind, TokenKind::Illegal, "{}", token);
    }
    assert_eq!(tokens[0].value, "0x");
    assert_eq!(tokens[1].value, "1.2.3");
    assert_eq!(tokens[2].value, "3e");
    assert_eq!(tokens[3].value, "0xfg");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_line_comment() {
    let tokens = scan("a = 1 -- set a\nb");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Identifier, "a", 1, 1),
            (TokenKind::Assign, "=", 1, 3),
            (TokenKind::Numerical, "1", 1, 5),
            (TokenKind::Newline, "", 1, 15),
            (TokenKind::Identifier, "b", 2, 1),
            (TokenKind::EOF, "EOF", 2, 2),
        ],
    );
}

#[test]
fn test_token_span_ends_at_lexer_cursor() {
    let mut lexer = Lexer::new(Box::new(StrSource::new("local name")), None);
    assert_eq!(lexer.cursor().column, 1);

    let token = lexer.next_token();
    assert_eq!(token.span.start.column, 1);
    assert_eq!(token.span.end.column, 6);
    assert_eq!(token.span.end, lexer.cursor());
}

#[test]
fn test_tokenize_lone_carriage_return_ends_line() {
    let tokens = scan("-- c\rx = 1\r'open\ry");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Newline, "", 1, 5),
            (TokenKind::Identifier, "x", 2, 1),
            (TokenKind::Assign, "=", 2, 3),
            (TokenKind::Numerical, "1", 2, 5),
            (TokenKind::Newline, "", 2, 6),
            (TokenKind::Illegal, "'open", 3, 1),
            (TokenKind::Newline, "", 3, 6),
            (TokenKind::Identifier, "y", 4, 1),
            (TokenKind::EOF, "EOF", 4, 2),
        ],
    );
}

#[test]
fn test_tokenize_long_comment() {
    let tokens = scan("--[[ spans\ntwo lines ]] x --[==[ ]] ]==] y");

    assert_tokens(
        &tokens,
        &[
            (TokenKind::Identifier, "x", 2, 14),
            (TokenKind::Identifier, "y", 2, 31),
            (TokenKind::EOF, "EOF", 2, 32),
        ],
    );
}

#[test]
fn test_tokenize_unterminated_long_comment() {
    let tokens = scan("x --[[ never");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "--[[ never");
    assert_eq!(tokens[1].column(), 3);
    assert_eq!(tokens[2].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unknown_characters() {
    let tokens = scan("a ! @ $ b");

    assert_eq!(tokens[1].kind, TokenKind::Illegal);
    assert_eq!(tokens[1].value, "!");
    assert_eq!(tokens[2].kind, TokenKind::Illegal);
    assert_eq!(tokens[3].kind, TokenKind::Illegal);
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].column(), 9);
}

#[test]
fn test_tokenize_empty_source() {
    assert_tokens(&scan(""), &[(TokenKind::EOF, "EOF", 1, 1)]);
}

#[test]
fn test_next_token_after_eof_repeats_eof() {
    let mut lexer = Lexer::new(Box::new(StrSource::new("x")), Some("test.lua".to_string()));

    assert_eq!(lexer.next_token().kind, TokenKind::Identifier);
    let first_eof = lexer.next_token();
    let second_eof = lexer.next_token();

    assert_eq!(first_eof.kind, TokenKind::EOF);
    assert_eq!(second_eof, first_eof);
}

#[test]
fn test_lexer_iterator_excludes_eof() {
    let lexer = Lexer::new(Box::new(StrSource::new("local x = 1")), None);
    let tokens = lexer.collect::<Vec<Token>>();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].kind, TokenKind::Local);
    assert_eq!(tokens[0].source_name().as_str(), "shell");
}

#[test]
fn test_reader_source_matches_string_source() {
    let source = "while x < 10 do\r\n  x = x + 1 -- bump\nend\n";
    let from_reader = Lexer::new(
        Box::new(ReaderSource::new(Cursor::new(source.as_bytes()))),
        Some("test.lua".to_string()),
    )
    .collect::<Vec<Token>>();
    let from_string = Lexer::new(
        Box::new(StrSource::new(source)),
        Some("test.lua".to_string()),
    )
    .collect::<Vec<Token>>();

    assert_eq!(from_reader, from_string);
}

#[test]
fn test_char_sources_report_end() {
    let mut string_source = StrSource::new("a");
    let mut reader_source = ReaderSource::new(Cursor::new("a\n".as_bytes()));

    assert!(!string_source.at_end());
    assert_eq!(string_source.read_char(), Some('a'));
    assert!(string_source.at_end());

    assert_eq!(reader_source.peek_char(), Some('a'));
    assert_eq!(reader_source.read_char(), Some('a'));
    assert_eq!(reader_source.read_char(), Some('\n'));
    assert!(reader_source.at_end());
    assert!(reader_source.error().is_none());
}

#[test]
fn test_unescape() {
    assert_eq!(unescape(r#""hello\nworld""#), "hello\nworld");
    assert_eq!(unescape(r"'tab\there'"), "tab\there");
    assert_eq!(unescape(r#""backslash\\""#), "backslash\\");
    assert_eq!(unescape(r#""hex\x41""#), "hexA");
    assert_eq!(unescape(r#""dec\65\066""#), "decAB");
    assert_eq!(unescape(r#""quote\"d""#), "quote\"d");
    assert_eq!(unescape(r"'it\'s'"), "it's");
    assert_eq!(unescape(r#""keep\q""#), "keep\\q");
    assert_eq!(unescape(r#""""#), "");
}
