//! Tree-walking evaluation of a checked [`crate::ast::ast::Program`].
//!
//! Statements report how they finished with a [`signal::Signal`] so that
//! `break`, `continue` and `return` unwind through ordinary returns, and
//! every pushed scope is popped on the way out.

pub mod interpreter;
pub mod operations;
pub mod signal;
pub mod value;

#[cfg(test)]
mod tests;
