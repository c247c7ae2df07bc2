use std::fmt::Display;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("line {line}: {internal_error}")]
pub struct Error {
    internal_error: ErrorImpl,
    line: usize,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, line: usize) -> Self {
        Error {
            internal_error: error_impl,
            line,
        }
    }

    pub fn get_line(&self) -> usize {
        self.line
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::OperandMismatch { .. } => "OperandMismatch",
            ErrorImpl::InvalidOperand { .. } => "InvalidOperand",
            ErrorImpl::InvalidElement { .. } => "InvalidElement",
            ErrorImpl::RaggedMatrix { .. } => "RaggedMatrix",
            ErrorImpl::EmptyLiteral { .. } => "EmptyLiteral",
            ErrorImpl::GeneratorTooLarge { .. } => "GeneratorTooLarge",
            ErrorImpl::NotIndexable { .. } => "NotIndexable",
            ErrorImpl::WrongIndexCount { .. } => "WrongIndexCount",
            ErrorImpl::NonIntegerIndex { .. } => "NonIntegerIndex",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::SliceRead { .. } => "SliceRead",
            ErrorImpl::InvalidAssignment { .. } => "InvalidAssignment",
            ErrorImpl::ControlOutsideLoop { .. } => "ControlOutsideLoop",
            ErrorImpl::IntegerOverflow { .. } => "IntegerOverflow",
            ErrorImpl::OutputError { .. } => "OutputError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::VariableNotDeclared { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` must be assigned before it is used",
                variable
            )),
            ErrorImpl::TypeMatchError {
                variable,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` holds `{}`, it cannot be given `{}`",
                variable, expected, received
            )),
            ErrorImpl::OperandMismatch {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "`{}` cannot combine `{}` with `{}`",
                operator, left, right
            )),
            ErrorImpl::InvalidOperand { operator, operand } => ErrorTip::Suggestion(format!(
                "`{}` cannot be applied to `{}`",
                operator, operand
            )),
            ErrorImpl::InvalidElement { received } => ErrorTip::Suggestion(format!(
                "Vector and matrix elements must be numbers, found `{}`",
                received
            )),
            ErrorImpl::RaggedMatrix { expected, received } => ErrorTip::Suggestion(format!(
                "Every row needs {} elements, found a row with {}",
                expected, received
            )),
            ErrorImpl::EmptyLiteral { .. } => ErrorTip::Suggestion(String::from(
                "Vectors and matrix rows need at least one element",
            )),
            ErrorImpl::GeneratorTooLarge {
                generator, limit, ..
            } => ErrorTip::Suggestion(format!(
                "`{}` takes a size of at most {}",
                generator, limit
            )),
            ErrorImpl::NotIndexable { variable, type_ } => ErrorTip::Suggestion(format!(
                "`{}` is `{}`, only vectors and matrices can be indexed",
                variable, type_
            )),
            ErrorImpl::WrongIndexCount {
                variable, expected, ..
            } => ErrorTip::Suggestion(format!(
                "`{}` takes {} index(es): vectors take one, matrices one or two",
                variable, expected
            )),
            ErrorImpl::NonIntegerIndex { received } => {
                ErrorTip::Suggestion(format!("Indices must be integers, found `{}`", received))
            }
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is outside 0..{}",
                index, length
            )),
            ErrorImpl::SliceRead { variable } => ErrorTip::Suggestion(format!(
                "Slices of `{}` can only appear on the left of `=`",
                variable
            )),
            ErrorImpl::InvalidAssignment {
                target,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects `{}`, received `{}`",
                target, expected, received
            )),
            ErrorImpl::ControlOutsideLoop { statement } => ErrorTip::Suggestion(format!(
                "`{}` is only allowed inside a `while` or `for` body",
                statement
            )),
            ErrorImpl::IntegerOverflow { .. } => ErrorTip::Suggestion(String::from(
                "Use float operands for values outside the 64-bit integer range",
            )),
            ErrorImpl::OutputError { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Syntax
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Semantic and runtime
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("types do not match for {variable:?}: expected {expected}, received {received}")]
    TypeMatchError {
        variable: String,
        expected: String,
        received: String,
    },
    #[error("operator {operator} cannot be applied to {left} and {right}")]
    OperandMismatch {
        operator: String,
        left: String,
        right: String,
    },
    #[error("operator {operator} cannot be applied to {operand}")]
    InvalidOperand { operator: String, operand: String },
    #[error("invalid vector element of type {received}")]
    InvalidElement { received: String },
    #[error("matrix rows differ in length: expected {expected}, received {received}")]
    RaggedMatrix { expected: usize, received: usize },
    #[error("empty {literal} literal")]
    EmptyLiteral { literal: String },
    #[error("{generator}({size}) exceeds the size limit of {limit}")]
    GeneratorTooLarge {
        generator: String,
        size: usize,
        limit: usize,
    },
    #[error("{variable:?} of type {type_} cannot be indexed")]
    NotIndexable { variable: String, type_: String },
    #[error("{variable:?} of type {type_} takes {expected} index(es), received {received}")]
    WrongIndexCount {
        variable: String,
        type_: String,
        expected: usize,
        received: usize,
    },
    #[error("index of type {received} is not an integer")]
    NonIntegerIndex { received: String },
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("slice of {variable:?} used as a value")]
    SliceRead { variable: String },
    #[error("cannot assign {received} to {target} (expected {expected})")]
    InvalidAssignment {
        target: String,
        expected: String,
        received: String,
    },
    #[error("{statement} outside of a loop")]
    ControlOutsideLoop { statement: String },
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: String },
    #[error("failed to write output: {message}")]
    OutputError { message: String },
}
