//! Scanner, AST and parser for Lox expressions.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod scanner;
pub mod token;
pub mod visitor;
