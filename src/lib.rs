#![allow(clippy::module_inception)]

use std::{io::Write, path::Path, time::Instant};

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorTip},
    interpreter::interpreter::interpret,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod environment;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// Tokenizes and parses `source`. Syntax errors are fatal, so at most one
/// error is produced.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let start = Instant::now();
    let tokens = tokenize(source)?;
    tracing::debug!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    let start = Instant::now();
    let program = parse(tokens)?;
    tracing::debug!(elapsed = ?start.elapsed(), "parsed");

    Ok(program)
}

/// Parses and statically checks `source`, returning every semantic error
/// found.
pub fn check_source(source: &str) -> Result<Program, Vec<Error>> {
    let program = parse_source(source).map_err(|error| vec![error])?;

    let start = Instant::now();
    let (_, errors) = type_check(&program);
    tracing::debug!(elapsed = ?start.elapsed(), "type checked");

    if errors.is_empty() {
        Ok(program)
    } else {
        Err(errors)
    }
}

/// Runs `source` end to end, writing printed lines to `out`. Nothing is
/// executed unless the program parses and checks cleanly.
pub fn run_source(source: &str, out: &mut impl Write) -> Result<(), Vec<Error>> {
    let program = check_source(source)?;

    let start = Instant::now();
    interpret(&program, out).map_err(|error| vec![error])?;
    tracing::debug!(elapsed = ?start.elapsed(), "interpreted");

    Ok(())
}

/// The text of the 1-based `line` of `source`.
pub fn get_source_line(source: &str, line: usize) -> Option<&str> {
    line.checked_sub(1)
        .and_then(|index| source.lines().nth(index))
}

/// Renders `error` with the offending source line.
///
/// ```text
/// Error: TypeMatchError (`x` holds `int`, it cannot be given `string`)
/// -> program.m:3
///   |
/// 3 | x = "a";
///   | ^^^^^^^^
///   = line 3: types do not match for "x": expected int, received string
/// ```
pub fn format_error(error: &Error, source: &str, file: &Path) -> String {
    let line = error.get_line();
    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut result = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };
    result.push_str(&format!("-> {}:{}\n", file.to_string_lossy(), line));
    result.push_str(&format!("{:>padding$}\n", "|"));

    if let Some(text) = get_source_line(source, line) {
        let text = text.trim();
        result.push_str(&format!("{} | {}\n", line_string, text));
        result.push_str(&format!(
            "{:>padding$} {}\n",
            "|",
            "^".repeat(text.chars().count().max(1))
        ));
    }

    result.push_str(&format!("{:>padding$} {}\n", "=", error));
    result
}

/// Prints `error` to stderr.
pub fn display_error(error: &Error, source: &str, file: &Path) {
    eprint!("{}", format_error(error, source, file));
}
