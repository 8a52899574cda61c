//! Property-based tests for the lexer.
//!
//! 1. **Lexer never panics** and always ends with a single `EOF`
//! 2. **Positions are monotonic** across the token stream
//! 3. **Identifiers round-trip** through the identifier sub-scan
//! 4. **Decimal and hex integers** come back as single numeral tokens

use proptest::prelude::*;

use super::{lexer::tokenize, tokens::TokenKind};

proptest! {
    #[test]
    fn lexer_terminates_with_eof(source in any::<String>()) {
        let tokens = tokenize(&source, None);

        prop_assert!(!tokens.is_empty());
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);
    }

    #[test]
    fn token_positions_never_go_backwards(source in "[a-z0-9 +\\-*/=<>~.\"'\\n]{0,64}") {
        let tokens = tokenize(&source, None);

        for pair in tokens.windows(2) {
            let (a, b) = (&pair[0].span.start, &pair[1].span.start);
            prop_assert!((a.line, a.column) < (b.line, b.column) || pair[1].kind == TokenKind::EOF);
        }
    }

    #[test]
    fn identifiers_scan_as_one_token(name in "[a-zA-Z_][a-zA-Z0-9_]{0,16}") {
        let tokens = tokenize(&name, None);

        prop_assert_eq!(tokens.len(), 2);
        prop_assert_eq!(&tokens[0].value, &name);
        prop_assert!(tokens[0].kind == TokenKind::Identifier || tokens[0].kind.is_keyword());
    }

    #[test]
    fn decimal_integers_scan_as_numerals(value in any::<u64>()) {
        let text = value.to_string();
        let tokens = tokenize(&text, None);

        prop_assert_eq!(tokens[0].kind, TokenKind::Numerical);
        prop_assert_eq!(&tokens[0].value, &text);
        prop_assert_eq!(tokens[1].kind, TokenKind::EOF);
    }

    #[test]
    fn hex_integers_scan_as_numerals(value in any::<u32>(), upper in any::<bool>()) {
        let text = if upper { format!("0X{:X}", value) } else { format!("0x{:x}", value) };
        let tokens = tokenize(&text, None);

        prop_assert_eq!(tokens[0].kind, TokenKind::Numerical);
        prop_assert_eq!(&tokens[0].value, &text);
    }
}
