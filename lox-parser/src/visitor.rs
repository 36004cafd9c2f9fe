//! Visitor pattern for AST nodes.

use crate::ast::Expr;

pub trait Visitor<'ast>: Sized {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        walk_expr(self, expr);
    }
}

/// Visits the children of `expr` from left to right.
pub fn walk_expr<'ast>(visitor: &mut impl Visitor<'ast>, expr: &'ast Expr) {
    match expr {
        Expr::Literal(_) => {}
        Expr::Grouping(inner) => visitor.visit_expr(inner),
        Expr::Unary { op: _, arg } => visitor.visit_expr(arg),
        Expr::Binary { lhs, op: _, rhs } => {
            visitor.visit_expr(lhs);
            visitor.visit_expr(rhs);
        }
        Expr::Ternary {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_expr(then_branch);
            visitor.visit_expr(else_branch);
        }
    }
}
