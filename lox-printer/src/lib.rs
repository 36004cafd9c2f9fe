//! Textual renderings of Lox expression trees.

use lox_parser::ast::Expr;

pub mod postfix;
pub mod prefix;

pub use postfix::print_postfix;
pub use prefix::print_prefix;

/// Operator name used for conditional (`?:`) expressions.
pub const TERNARY_OPERATOR: &str = "?:";

/// Pending output of a printer. Printers walk the tree with an explicit stack of these
/// so that arbitrarily deep trees do not overflow the call stack.
enum Item<'a> {
    Expr(&'a Expr),
    Text(&'a str),
}
