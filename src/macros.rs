//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance whose span runs from `$start` to the lexer's
/// current cursor.
///
/// # Example
///
/// ```ignore
/// let start = lexer.cursor();
/// // ... consume "42" ...
/// let token = MK_TOKEN!(lexer, TokenKind::Numerical, "42".to_string(), start);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($lexer:expr, $kind:expr, $value:expr, $start:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: Span {
                start: $start,
                end: $lexer.cursor(),
            },
        }
    };
}
