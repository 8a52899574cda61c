//! Character sources consumed by the lexer.
//!
//! The lexer only needs forward reading with a single character of lookahead,
//! so a source is anything that can hand out the next character, peek at it,
//! and report whether it is exhausted. The caller owns the underlying buffer or
//! stream and releases it once parsing is done.

use std::{
    collections::VecDeque,
    io::BufRead,
    iter::Peekable,
    str::Chars,
};

pub trait CharSource {
    /// Consumes and returns the next character, or `None` at the end of input.
    fn read_char(&mut self) -> Option<char>;
    /// Returns the next character without consuming it.
    fn peek_char(&mut self) -> Option<char>;
    fn at_end(&mut self) -> bool {
        self.peek_char().is_none()
    }
}

impl<T: CharSource + ?Sized> CharSource for &mut T {
    fn read_char(&mut self) -> Option<char> {
        (**self).read_char()
    }

    fn peek_char(&mut self) -> Option<char> {
        (**self).peek_char()
    }
}

/// In-memory source over a string slice.
pub struct StrSource<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> StrSource<'a> {
    pub fn new(source: &'a str) -> Self {
        StrSource {
            chars: source.chars().peekable(),
        }
    }
}

impl CharSource for StrSource<'_> {
    fn read_char(&mut self) -> Option<char> {
        self.chars.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }
}

/// Source over any buffered reader (a file, stdin, a cursor...).
///
/// Input is pulled one line at a time. Read errors and invalid UTF-8 end the
/// input; the error is kept so the caller can inspect it after parsing.
pub struct ReaderSource<R: BufRead> {
    reader: R,
    buffer: VecDeque<char>,
    exhausted: bool,
    error: Option<std::io::Error>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        ReaderSource {
            reader,
            buffer: VecDeque::new(),
            exhausted: false,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&std::io::Error> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    fn fill(&mut self) {
        if !self.buffer.is_empty() || self.exhausted {
            return;
        }

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => self.exhausted = true,
            Ok(_) => self.buffer.extend(line.chars()),
            Err(err) => {
                tracing::warn!(error = %err, "character source stopped on read error");
                self.error = Some(err);
                self.exhausted = true;
            }
        }
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn read_char(&mut self) -> Option<char> {
        self.fill();
        self.buffer.pop_front()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.fill();
        self.buffer.front().copied()
    }
}
