use crate::token::{Literal, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (e.g. `1`, `"foo"`, `true`, `nil`).
    Literal(Literal),
    /// A parenthesized expression (e.g. `(1)`).
    Grouping(Box<Expr>),
    /// A unary expression (e.g. `-1`, `!true`).
    Unary { op: Token, arg: Box<Expr> },
    /// A binary expression (e.g. `1+1`). The comma operator is a binary expression as well.
    Binary {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// A conditional expression (e.g. `a ? b : c`).
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: Token, arg: Expr) -> Self {
        Expr::Unary {
            op,
            arg: Box::new(arg),
        }
    }

    pub fn binary(lhs: Expr, op: Token, rhs: Expr) -> Self {
        Expr::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn ternary(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        Expr::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn grouping(inner: Expr) -> Self {
        Expr::Grouping(Box::new(inner))
    }
}

impl From<Literal> for Expr {
    fn from(literal: Literal) -> Self {
        Expr::Literal(literal)
    }
}
