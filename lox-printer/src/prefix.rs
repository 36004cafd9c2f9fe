//! Fully parenthesized prefix rendering (e.g. `(+ 1 (* 2 3))`).

use lox_parser::ast::Expr;

use crate::{Item, TERNARY_OPERATOR};

/// Prints `expr` with every node wrapped in parentheses and the operator first.
pub fn print_prefix(expr: &Expr) -> String {
    let mut buf = String::new();
    let mut stack = vec![Item::Expr(expr)];

    while let Some(item) = stack.pop() {
        let expr = match item {
            Item::Expr(expr) => expr,
            Item::Text(text) => {
                buf.push_str(text);
                continue;
            }
        };

        match expr {
            Expr::Literal(literal) => buf.push_str(&literal.to_string()),
            Expr::Grouping(inner) => parenthesize(&mut stack, "group", &[&**inner]),
            Expr::Unary { op, arg } => parenthesize(&mut stack, &op.lexeme, &[&**arg]),
            Expr::Binary { lhs, op, rhs } => {
                parenthesize(&mut stack, &op.lexeme, &[&**lhs, &**rhs])
            }
            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
            } => parenthesize(
                &mut stack,
                TERNARY_OPERATOR,
                &[&**condition, &**then_branch, &**else_branch],
            ),
        }
    }

    buf
}

/// Schedules `(name child...)`. Items are pushed in reverse, the stack pops the last one first.
fn parenthesize<'a>(stack: &mut Vec<Item<'a>>, name: &'a str, children: &[&'a Expr]) {
    stack.push(Item::Text(")"));
    for &child in children.iter().rev() {
        stack.push(Item::Expr(child));
        stack.push(Item::Text(" "));
    }
    stack.push(Item::Text(name));
    stack.push(Item::Text("("));
}
