//! Parser module for building the program tree.
//!
//! A Pratt parser turns the token stream into a [`crate::ast::ast::Program`].
//! Expressions are parsed with NUD (null denotation) and LED (left
//! denotation) handlers looked up by token kind, with binding powers giving
//! operator precedence. Statements are dispatched on their first token.
//!
//! Relational comparisons are not expressions: they are parsed only where
//! an `if` or `while` expects a condition.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
