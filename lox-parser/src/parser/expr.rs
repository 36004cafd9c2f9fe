use super::*;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression, including comma sequences.
    ///
    /// The comma operator has the lowest precedence and is left associative.
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_expr(&[TokenKind::Comma], Self::parse_ternary_expr)
    }

    /// Parses a conditional expression (e.g. `a ? b : c`).
    /// Conditional expressions are right associative: `a ? b : c ? d : e` is `a ? b : (c ? d : e)`.
    fn parse_ternary_expr(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_equality_expr()?;

        if self.eat(&[TokenKind::Question]).is_none() {
            return Ok(condition);
        }

        let then_branch = self.parse_equality_expr()?;
        self.expect(
            TokenKind::Colon,
            "Expect ':' after then branch of conditional expression.",
        )?;
        let else_branch = self.nested(Self::parse_ternary_expr)?; // recursive tail for right associativity

        Ok(Expr::ternary(condition, then_branch, else_branch))
    }

    fn parse_equality_expr(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_expr(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::parse_comparison_expr,
        )
    }

    fn parse_comparison_expr(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_expr(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::parse_term_expr,
        )
    }

    fn parse_term_expr(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_expr(
            &[TokenKind::Minus, TokenKind::Plus],
            Self::parse_factor_expr,
        )
    }

    fn parse_factor_expr(&mut self) -> ParseResult<Expr> {
        self.parse_left_assoc_expr(
            &[TokenKind::Slash, TokenKind::Star],
            Self::parse_unary_expr,
        )
    }

    /// Parses a left associative binary expression level.
    /// `operand` parses the next higher precedence level.
    fn parse_left_assoc_expr(
        &mut self,
        ops: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut lhs = operand(self)?;
        let mut chain = 0;

        while let Some(op) = self.eat(ops) {
            chain += 1;
            if chain > MAX_CHAIN {
                return Err(self.error(&op, "Too many operators in one expression."));
            }
            let rhs = operand(self)?;
            lhs = Expr::binary(lhs, op, rhs); // should be (lhs op rhs) op ...
        }

        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        // NOTE: prefix operators are right associative
        match self.eat(&[TokenKind::Bang, TokenKind::Minus]) {
            Some(op) => {
                let arg = self.nested(Self::parse_unary_expr)?;
                Ok(Expr::unary(op, arg))
            }
            None => self.parse_primary_expr(),
        }
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expr> {
        match self.peek().kind {
            TokenKind::False => {
                self.next();
                Ok(Expr::Literal(Literal::Bool(false)))
            }
            TokenKind::True => {
                self.next();
                Ok(Expr::Literal(Literal::Bool(true)))
            }
            TokenKind::Nil => {
                self.next();
                Ok(Expr::Literal(Literal::Nil))
            }
            TokenKind::Number | TokenKind::String => self.parse_literal_expr(),
            TokenKind::LeftParen => {
                self.next();
                // groups re-enter at the lowest precedence
                let inner = self.nested(Self::parse_expr)?;
                self.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
                Ok(Expr::grouping(inner))
            }
            _ => Err(self.error(self.peek(), "Expect expression.")),
        }
    }

    /* Expressions.Literals */
    /// Parses a number or string literal from the value carried by the token.
    fn parse_literal_expr(&mut self) -> ParseResult<Expr> {
        match self.peek().literal.clone() {
            Some(literal) => {
                self.next(); // eat parsed token
                Ok(Expr::Literal(literal))
            }
            None => Err(self.error(self.peek(), "Expect literal value.")),
        }
    }
}
