//! Lexical analysis.
//!
//! Converts source text into a flat list of tokens. Patterns are regular
//! expressions tried in order at the cursor; whitespace and `#` comments are
//! skipped, and every token records the line it starts on so later phases
//! can report positions.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
