use crate::ast::Expr;
use crate::scanner::Scanner;
use crate::token::{Literal, Token, TokenKind};
use lox_source::{Diagnostic, Source};

mod expr;

/// Maximum nesting of groupings, prefix operators and conditional expressions.
pub const MAX_NESTING: usize = 128;
/// Maximum number of operators folded into a single left associative chain.
pub const MAX_CHAIN: usize = 4096;

/// Result of a parse function. Errors are reported to the [`Source`] by [`Parser::parse`].
pub type ParseResult<T> = Result<T, Diagnostic>;

pub struct Parser<'a> {
    tokens: Vec<Token>,
    /// Index of the current (next unconsumed) token.
    current: usize,
    /// Current nesting level, see [`MAX_NESTING`].
    depth: usize,
    /// Source code
    source: &'a Source<'a>,
}

impl<'a> Parser<'a> {
    /// Scans `source` and creates a parser for the resulting tokens.
    pub fn new(source: &'a Source<'a>) -> Self {
        let tokens = Scanner::new(source).scan_tokens();
        Self::with_tokens(tokens, source)
    }

    /// Creates a parser for an existing token sequence.
    /// A [`TokenKind::Eof`] token is appended if `tokens` does not end with one.
    pub fn with_tokens(mut tokens: Vec<Token>, source: &'a Source<'a>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::Eof) {
            let line = tokens.last().map_or(1, |token| token.line);
            tokens.push(Token::eof(line));
        }

        Self {
            tokens,
            current: 0,
            depth: 0,
            source,
        }
    }
}

impl<'a> Parser<'a> {
    /// Parses the whole input as a single expression.
    ///
    /// Returns `None` if a syntax error was reported. After an error the parser synchronizes and keeps parsing the
    /// remaining input so that later errors are reported as well.
    pub fn parse(&mut self) -> Option<Expr> {
        let mut had_error = false;

        loop {
            match self.parse_program() {
                Ok(expr) => return if had_error { None } else { Some(expr) },
                Err(error) => {
                    had_error = true;
                    self.source.errors.add_error(error);
                    self.synchronize();
                    if self.is_at_end() {
                        return None;
                    }
                }
            }
        }
    }

    /// Parses an expression that must span until the end of input.
    pub fn parse_program(&mut self) -> ParseResult<Expr> {
        let expr = self.parse_expr()?;
        if !self.is_at_end() {
            return Err(self.error(self.peek(), "Expect end of expression."));
        }
        Ok(expr)
    }

    /// Discards tokens until a likely construct boundary: right after a `;` or right before a token starting a
    /// statement. Always consumes at least one token unless the parser is at the end of input.
    fn synchronize(&mut self) {
        let mut previous = self.next().kind;

        while !self.is_at_end() {
            if previous == TokenKind::Semicolon || self.peek().kind.starts_statement() {
                return;
            }
            previous = self.next().kind;
        }
    }
}

/// Parse utilities
impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Predicate that tests whether the current token is of kind `kind`. Always `false` at the end of input.
    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// Consumes the current token and returns it. Never moves past the end of input.
    fn next(&mut self) -> &Token {
        let index = self.current;
        if !self.is_at_end() {
            self.current += 1;
        }
        &self.tokens[index]
    }

    /// Eats the current token if it is of one of the `kinds` and returns it.
    fn eat(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if kinds.iter().any(|&kind| self.check(kind)) {
            Some(self.next().clone())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.next().clone())
        } else {
            Err(self.error(self.peek(), message))
        }
    }

    /// Runs `parse` one nesting level deeper.
    /// Fails instead of recursing once the input nests deeper than [`MAX_NESTING`].
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(self.error(self.peek(), "Too much nesting."));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Creates a syntax error located at `token`.
    fn error(&self, token: &Token, message: &str) -> Diagnostic {
        let location = if token.kind == TokenKind::Eof {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };
        Diagnostic::syntax(token.line, location, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lox_source::ErrorKind;

    /// Parses `source` and returns the result with the rendered errors.
    fn parse(source: &str) -> (Option<Expr>, Vec<String>) {
        let source = source.into();
        let ast = Parser::new(&source).parse();
        let errors = source
            .errors
            .diagnostics()
            .iter()
            .map(ToString::to_string)
            .collect();
        (ast, errors)
    }

    #[test]
    fn test_missing_operand() {
        let (ast, errors) = parse("1 +");
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at end: Expect expression."]);
    }

    #[test]
    fn test_missing_close_paren() {
        let (ast, errors) = parse("(1 + 2");
        assert_eq!(ast, None);
        assert_eq!(
            errors,
            vec!["[line 1] Error at end: Expect ')' after expression."]
        );
    }

    #[test]
    fn test_missing_colon() {
        let (ast, errors) = parse("true ? 1 2");
        assert_eq!(ast, None);
        assert_eq!(
            errors,
            vec!["[line 1] Error at '2': Expect ':' after then branch of conditional expression."]
        );
    }

    #[test]
    fn test_comma_not_allowed_in_then_branch() {
        let (ast, errors) = parse("true ? 1, 2 : 3");
        assert_eq!(ast, None);
        assert_eq!(
            errors,
            vec!["[line 1] Error at ',': Expect ':' after then branch of conditional expression."]
        );
    }

    #[test]
    fn test_trailing_tokens() {
        let (ast, errors) = parse("1 2");
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at '2': Expect end of expression."]);
    }

    #[test]
    fn test_empty_input() {
        let (ast, errors) = parse("");
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at end: Expect expression."]);
    }

    #[test]
    fn test_error_line() {
        let (_, errors) = parse("1 +\n\n)");
        assert_eq!(errors, vec!["[line 3] Error at ')': Expect expression."]);
    }

    #[test]
    fn test_identifier_is_not_an_expression() {
        let (ast, errors) = parse("a + 1");
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at 'a': Expect expression."]);
    }

    #[test]
    fn test_recover_after_semicolon() {
        let (ast, errors) = parse("1 +; 2 +");
        assert_eq!(ast, None);
        assert_eq!(
            errors,
            vec![
                "[line 1] Error at ';': Expect expression.",
                "[line 1] Error at end: Expect expression.",
            ]
        );
    }

    #[test]
    fn test_recover_before_keyword() {
        let (ast, errors) = parse("1 ) var 2 3");
        assert_eq!(ast, None);
        assert_eq!(
            errors,
            vec![
                "[line 1] Error at ')': Expect end of expression.",
                "[line 1] Error at 'var': Expect expression.",
            ]
        );
    }

    #[test]
    fn test_recovered_expression_is_discarded() {
        let (ast, errors) = parse("1 1; 2");
        assert_eq!(ast, None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_synchronize_skips_garbage() {
        let (ast, errors) = parse(")))");
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at ')': Expect expression."]);
    }

    #[test]
    fn test_synchronize_advances() {
        let source = "; ;".into();
        let mut parser = Parser::new(&source);
        parser.synchronize();
        assert_eq!(parser.current, 1);
        parser.synchronize();
        assert_eq!(parser.current, 2);
        assert!(parser.is_at_end());
        parser.synchronize();
        assert_eq!(parser.current, 2);
    }

    #[test]
    fn test_lexical_errors_do_not_stop_parsing() {
        let source = "1 @ + 2".into();
        let ast = Parser::new(&source).parse();
        assert!(ast.is_some());
        assert_eq!(source.errors.count(ErrorKind::Lexical), 1);
        assert_eq!(source.errors.count(ErrorKind::Syntax), 0);
    }

    #[test]
    fn test_with_tokens_appends_eof() {
        let source = "".into();
        let tokens = vec![Token::new(
            TokenKind::Number,
            "1",
            Some(Literal::Number(1.0)),
            3,
        )];
        let ast = Parser::with_tokens(tokens, &source).parse();
        assert_eq!(ast, Some(Expr::Literal(Literal::Number(1.0))));
        assert!(source.has_no_errors());

        let ast = Parser::with_tokens(Vec::new(), &source).parse();
        assert_eq!(ast, None);
        assert_eq!(source.errors.len(), 1);
    }

    #[test]
    fn test_deep_parens_report_error() {
        let source = format!("{}1{}", "(".repeat(5_000), ")".repeat(5_000));
        let (ast, errors) = parse(&source);
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at '(': Too much nesting."]);
    }

    #[test]
    fn test_deep_unary_reports_error() {
        let source = format!("{}1", "-".repeat(5_000));
        let (ast, errors) = parse(&source);
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at '-': Too much nesting."]);
    }

    #[test]
    fn test_deep_ternary_reports_error() {
        let source = format!("{}1", "true ? 1 : ".repeat(5_000));
        let (ast, errors) = parse(&source);
        assert_eq!(ast, None);
        assert_eq!(errors, vec!["[line 1] Error at 'true': Too much nesting."]);
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING),
            ")".repeat(MAX_NESTING)
        );
        let (ast, errors) = parse(&source);
        assert!(ast.is_some());
        assert!(errors.is_empty());

        let source = format!(
            "{}1{}",
            "(".repeat(MAX_NESTING + 1),
            ")".repeat(MAX_NESTING + 1)
        );
        let (ast, errors) = parse(&source);
        assert_eq!(ast, None);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_long_chain_reports_error() {
        let source = format!("1{}", " + 1".repeat(MAX_CHAIN + 1));
        let (ast, errors) = parse(&source);
        assert_eq!(ast, None);
        assert_eq!(
            errors,
            vec!["[line 1] Error at '+': Too many operators in one expression."]
        );

        let source = format!("1{}", " + 1".repeat(MAX_CHAIN));
        let (ast, errors) = parse(&source);
        assert!(ast.is_some());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_consumes_all_tokens_or_reports() {
        let inputs = [
            "1",
            "1 + 2 * 3",
            "(1, 2) ? 3 : 4",
            "1 2",
            "((1)",
            "1 ? 2",
            "!",
            "1 == == 2",
            "nil nil",
            "\"a\" + \"b\"",
        ];
        for input in inputs.iter() {
            let source = (*input).into();
            let mut parser = Parser::new(&source);
            match parser.parse() {
                Some(_) => {
                    assert!(parser.is_at_end(), "{}", input);
                    assert!(source.has_no_errors(), "{}", input);
                }
                None => assert!(source.errors.count(ErrorKind::Syntax) >= 1, "{}", input),
            }
        }
    }
}
