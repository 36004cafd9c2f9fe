//! Turns source text into a sequence of [`Token`]s.

use crate::lexer::RawToken;
use crate::token::{Literal, Token};
use logos::{Lexer, Logos};
use lox_source::{Diagnostic, Source};
use std::iter::FusedIterator;

const UNEXPECTED_CHARACTER: &str = "Unexpected character.";
const UNTERMINATED_STRING: &str = "Unterminated string. Did you perhaps miss the closing '\"' ?";
const UNTERMINATED_COMMENT: &str =
    "Unterminated multi-line comment. Did you perhaps miss the closing '*/' ?";

/// Scanner for Lox source code.
///
/// The scanner never fails. Lexical errors are added to the [`Source`] errors and scanning resumes after the
/// offending lexeme. The last token yielded is always a [`TokenKind::Eof`](crate::token::TokenKind::Eof).
pub struct Scanner<'a> {
    lexer: Lexer<'a, RawToken>,
    /// Source code
    source: &'a Source<'a>,
    /// Current line (1-based).
    line: usize,
    /// Byte offset up to which newlines are accounted for in `line`.
    counted: usize,
    /// `true` once the end of input token has been yielded.
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a Source<'a>) -> Self {
        Self {
            lexer: RawToken::lexer(source.content),
            source,
            line: 1,
            counted: 0,
            finished: false,
        }
    }

    /// Scans the entire source.
    pub fn scan_tokens(self) -> Vec<Token> {
        self.collect()
    }
}

/// Scan utilities
impl<'a> Scanner<'a> {
    /// Counts the newlines between the last accounted offset and `offset`.
    fn count_lines_to(&mut self, offset: usize) {
        let skipped = &self.source.content.as_bytes()[self.counted..offset];
        self.line += skipped.iter().filter(|&&b| b == b'\n').count();
        self.counted = offset;
    }

    fn error(&self, message: &str) {
        self.source
            .errors
            .add_error(Diagnostic::lexical(self.line, message));
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let raw = match self.lexer.next() {
                Some(raw) => raw,
                None if self.finished => return None,
                None => {
                    self.finished = true;
                    self.count_lines_to(self.source.content.len());
                    return Some(Token::eof(self.line));
                }
            };

            let span = self.lexer.span();
            self.count_lines_to(span.end);

            let kind = match raw.kind() {
                Some(kind) => kind,
                None => {
                    match raw {
                        // a multi-byte character can be split over several error tokens, only report it once
                        RawToken::Error if self.source.content.is_char_boundary(span.start) => {
                            self.error(UNEXPECTED_CHARACTER)
                        }
                        RawToken::UnterminatedString => self.error(UNTERMINATED_STRING),
                        RawToken::BlockComment(false) => self.error(UNTERMINATED_COMMENT),
                        _ => {}
                    }
                    continue;
                }
            };

            let literal = match raw {
                RawToken::Number(val) => Some(Literal::Number(val)),
                RawToken::String(val) => Some(Literal::String(val)),
                RawToken::True => Some(Literal::Bool(true)),
                RawToken::False => Some(Literal::Bool(false)),
                RawToken::Nil => Some(Literal::Nil),
                _ => None,
            };
            return Some(Token::new(kind, self.lexer.slice(), literal, self.line));
        }
    }
}

impl<'a> FusedIterator for Scanner<'a> {}
