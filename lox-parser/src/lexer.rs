//! Raw token automaton driving the [`Scanner`](crate::scanner::Scanner).

use logos::{Lexer, Logos};
use std::num::ParseFloatError;

use crate::token::TokenKind;

#[derive(Debug, Logos, Clone, PartialEq)]
pub enum RawToken {
    // literals
    #[regex("[0-9]+", number)]
    Number(f64),
    #[regex(r#""[^"]*""#, |lex| lex.slice()[1..lex.slice().len() - 1].to_string())]
    String(String),
    /// A string literal that runs into the end of input.
    #[regex(r#""[^"]*"#)]
    UnterminatedString,

    // identifiers
    #[regex("[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // punctuation
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    // operators
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("!=")]
    BangEqual,
    #[token("=")]
    Equal,
    #[token("==")]
    EqualEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,

    // keywords
    #[token("and")]
    And,
    #[token("class")]
    Class,
    #[token("else")]
    Else,
    #[token("false")]
    False,
    #[token("for")]
    For,
    #[token("fun")]
    Fun,
    #[token("if")]
    If,
    #[token("nil")]
    Nil,
    #[token("or")]
    Or,
    #[token("print")]
    Print,
    #[token("return")]
    Return,
    #[token("super")]
    Super,
    #[token("this")]
    This,
    #[token("true")]
    True,
    #[token("var")]
    Var,
    #[token("while")]
    While,

    /// A (possibly nested) block comment. `false` if the input ended before the comment was closed.
    #[token("/*", block_comment)]
    BlockComment(bool),

    // misc
    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[regex(r"//[^\n]*", logos::skip)] // single line comments
    #[error]
    Error,
}

impl RawToken {
    /// Returns the [`TokenKind`] of the raw token or `None` if it does not produce a token.
    pub fn kind(&self) -> Option<TokenKind> {
        let kind = match self {
            RawToken::Number(_) => TokenKind::Number,
            RawToken::String(_) => TokenKind::String,
            RawToken::Identifier => TokenKind::Identifier,
            RawToken::LeftParen => TokenKind::LeftParen,
            RawToken::RightParen => TokenKind::RightParen,
            RawToken::LeftBrace => TokenKind::LeftBrace,
            RawToken::RightBrace => TokenKind::RightBrace,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Semicolon => TokenKind::Semicolon,
            RawToken::Question => TokenKind::Question,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Bang => TokenKind::Bang,
            RawToken::BangEqual => TokenKind::BangEqual,
            RawToken::Equal => TokenKind::Equal,
            RawToken::EqualEqual => TokenKind::EqualEqual,
            RawToken::Greater => TokenKind::Greater,
            RawToken::GreaterEqual => TokenKind::GreaterEqual,
            RawToken::Less => TokenKind::Less,
            RawToken::LessEqual => TokenKind::LessEqual,
            RawToken::And => TokenKind::And,
            RawToken::Class => TokenKind::Class,
            RawToken::Else => TokenKind::Else,
            RawToken::False => TokenKind::False,
            RawToken::For => TokenKind::For,
            RawToken::Fun => TokenKind::Fun,
            RawToken::If => TokenKind::If,
            RawToken::Nil => TokenKind::Nil,
            RawToken::Or => TokenKind::Or,
            RawToken::Print => TokenKind::Print,
            RawToken::Return => TokenKind::Return,
            RawToken::Super => TokenKind::Super,
            RawToken::This => TokenKind::This,
            RawToken::True => TokenKind::True,
            RawToken::Var => TokenKind::Var,
            RawToken::While => TokenKind::While,
            RawToken::UnterminatedString | RawToken::BlockComment(_) | RawToken::Error => {
                return None
            }
        };
        Some(kind)
    }
}

/// Lexes the optional fraction of a number literal.
/// The `.` only belongs to the number if at least one digit follows it.
fn number(lex: &mut Lexer<RawToken>) -> Result<f64, ParseFloatError> {
    let rest = lex.remainder().as_bytes();
    if rest.len() >= 2 && rest[0] == b'.' && rest[1].is_ascii_digit() {
        let fraction = rest[1..].iter().take_while(|b| b.is_ascii_digit()).count();
        lex.bump(1 + fraction);
    }
    lex.slice().parse()
}

/// Consumes the body of a block comment after the opening `/*`.
/// Block comments nest: every `/*` must be matched by a `*/`.
fn block_comment(lex: &mut Lexer<RawToken>) -> bool {
    let rest = lex.remainder().as_bytes();
    let mut depth = 1usize;
    let mut i = 0;
    while i < rest.len() {
        match (rest[i], rest.get(i + 1)) {
            (b'/', Some(b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    lex.bump(i);
                    return true;
                }
            }
            _ => i += 1,
        }
    }

    lex.bump(rest.len()); // eat the rest of the input
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<RawToken> {
        RawToken::lexer(source).collect()
    }

    #[test]
    fn test_maximal_munch() {
        assert_eq!(
            lex("! != = == < <= > >="),
            vec![
                RawToken::Bang,
                RawToken::BangEqual,
                RawToken::Equal,
                RawToken::EqualEqual,
                RawToken::Less,
                RawToken::LessEqual,
                RawToken::Greater,
                RawToken::GreaterEqual,
            ]
        );
        assert_eq!(lex("!=="), vec![RawToken::BangEqual, RawToken::Equal]);
    }

    #[test]
    fn test_number() {
        assert_eq!(lex("123"), vec![RawToken::Number(123.0)]);
        assert_eq!(lex("12.5"), vec![RawToken::Number(12.5)]);
        assert_eq!(lex("12."), vec![RawToken::Number(12.0), RawToken::Dot]);
        assert_eq!(
            lex("1.2.3"),
            vec![RawToken::Number(1.2), RawToken::Dot, RawToken::Number(3.0)]
        );
        assert_eq!(lex(".5"), vec![RawToken::Dot, RawToken::Number(5.0)]);
    }

    #[test]
    fn test_string() {
        assert_eq!(lex(r#""abc""#), vec![RawToken::String("abc".to_string())]);
        assert_eq!(lex(r#""""#), vec![RawToken::String(String::new())]);
        assert_eq!(lex(r#""abc"#), vec![RawToken::UnterminatedString]);
    }

    #[test]
    fn test_keyword_vs_identifier() {
        assert_eq!(lex("or"), vec![RawToken::Or]);
        assert_eq!(lex("orchid"), vec![RawToken::Identifier]);
        assert_eq!(lex("_or1"), vec![RawToken::Identifier]);
        assert_eq!(lex("Or"), vec![RawToken::Identifier]);
    }

    #[test]
    fn test_comments() {
        assert_eq!(lex("// comment\n1"), vec![RawToken::Number(1.0)]);
        assert_eq!(
            lex("/* a /* b */ c */ 1"),
            vec![RawToken::BlockComment(true), RawToken::Number(1.0)]
        );
        assert_eq!(lex("/* a /* b */"), vec![RawToken::BlockComment(false)]);
        assert_eq!(
            lex("1 / 2"),
            vec![RawToken::Number(1.0), RawToken::Slash, RawToken::Number(2.0)]
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(RawToken::Question.kind(), Some(TokenKind::Question));
        assert_eq!(RawToken::Number(1.0).kind(), Some(TokenKind::Number));
        assert_eq!(RawToken::BlockComment(true).kind(), None);
        assert_eq!(RawToken::Error.kind(), None);
    }
}
