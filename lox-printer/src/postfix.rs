//! Reverse-Polish rendering (e.g. `1 2 + 4 3 - *`).
//! Groupings are transparent since postfix notation needs no parentheses.

use lox_parser::ast::Expr;

use crate::{Item, TERNARY_OPERATOR};

/// Prints the operands of every node, left to right, followed by its operator.
pub fn print_postfix(expr: &Expr) -> String {
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
            Expr::Grouping(inner) => stack.push(Item::Expr(inner)),
            Expr::Unary { op, arg } => operation(&mut stack, &op.lexeme, &[&**arg]),
            Expr::Binary { lhs, op, rhs } => operation(&mut stack, &op.lexeme, &[&**lhs, &**rhs]),
            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
            } => operation(
                &mut stack,
                TERNARY_OPERATOR,
                &[&**condition, &**then_branch, &**else_branch],
            ),
        }
    }

    buf
}

/// Schedules `operand... op`, each operand followed by a space.
fn operation<'a>(stack: &mut Vec<Item<'a>>, op: &'a str, operands: &[&'a Expr]) {
    stack.push(Item::Text(op));
    for &operand in operands.iter().rev() {
        stack.push(Item::Text(" "));
        stack.push(Item::Expr(operand));
    }
}
