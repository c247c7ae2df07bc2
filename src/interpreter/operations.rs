//! Arithmetic on runtime values: scalar operators, broadcasting element-wise
//! operators, matrix multiplication, transpose and comparisons.
//!
//! Every function returns an [`ErrorImpl`]; the interpreter attaches the
//! line of the node being evaluated.

use std::cmp::Ordering;

use crate::{
    ast::expressions::{ArithOp, BinaryOp, Generator, RelOp},
    errors::errors::ErrorImpl,
};

use super::value::{column_count, Scalar, Value};

type Rows = Vec<Vec<Scalar>>;

fn mismatch(operator: impl ToString, left: &str, right: &str) -> ErrorImpl {
    ErrorImpl::OperandMismatch {
        operator: operator.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    }
}

fn overflow(op: ArithOp) -> ErrorImpl {
    ErrorImpl::IntegerOverflow {
        operation: op.to_string(),
    }
}

pub fn apply_scalar(op: ArithOp, left: Scalar, right: Scalar) -> Result<Scalar, ErrorImpl> {
    left.apply(op, right).ok_or_else(|| overflow(op))
}

/// Evaluates `left op right`.
///
/// Plain operators accept scalars only. Dotted operators accept scalar pairs
/// too, and on vectors and matrices:
///
/// - a vector against a matrix is first broadcast to a matrix whose row `i`
///   repeats element `i` once per column of the matrix;
/// - `.*` multiplies two vectors element by element, anything involving a
///   matrix is a true matrix product;
/// - `.+ .- ./` combine equal shapes element by element.
pub fn binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, ErrorImpl> {
    let arith = op.arith();

    if let (Some(left), Some(right)) = (left.as_scalar(), right.as_scalar()) {
        return apply_scalar(arith, left, right).map(Value::from);
    }

    let (left_name, right_name) = (left.type_name(), right.type_name());
    if !op.is_elementwise() {
        return Err(mismatch(op, &left_name, &right_name));
    }

    let (left, right) = match (left, right) {
        (Value::Vector(left), Value::Vector(right)) => {
            if left.len() != right.len() {
                return Err(mismatch(op, &left_name, &right_name));
            }
            return zip_row(arith, &left, &right).map(Value::Vector);
        }
        (Value::Vector(left), Value::Matrix(right)) => (broadcast(&left, column_count(&right)), right),
        (Value::Matrix(left), Value::Vector(right)) => {
            let right = broadcast(&right, column_count(&left));
            (left, right)
        }
        (Value::Matrix(left), Value::Matrix(right)) => (left, right),
        _ => return Err(mismatch(op, &left_name, &right_name)),
    };

    let result = if arith == ArithOp::Mul {
        matmul(&left, &right)
    } else {
        zip_rows(arith, &left, &right)
    };

    result
        .map(|rows| rows.map(Value::Matrix))
        .ok_or_else(|| mismatch(op, &left_name, &right_name))?
}

/// Combines the current value of a compound-assignment target with the
/// right-hand side. No broadcasting and no matrix product: shapes must match
/// exactly and `*=` multiplies element by element.
pub fn compound(op: ArithOp, current: Value, value: Value) -> Result<Value, ErrorImpl> {
    let operator = format!("{}=", op);

    if let (Some(left), Some(right)) = (current.as_scalar(), value.as_scalar()) {
        return apply_scalar(op, left, right).map(Value::from);
    }

    let (left_name, right_name) = (current.type_name(), value.type_name());
    match (current, value) {
        (Value::Vector(left), Value::Vector(right)) if left.len() == right.len() => {
            zip_row(op, &left, &right).map(Value::Vector)
        }
        (Value::Matrix(left), Value::Matrix(right)) => zip_rows(op, &left, &right)
            .map(|rows| rows.map(Value::Matrix))
            .ok_or_else(|| mismatch(&operator, &left_name, &right_name))?,
        _ => Err(mismatch(&operator, &left_name, &right_name)),
    }
}

/// Expands a vector into a matrix with `columns` columns, row `i` holding
/// copies of element `i`.
pub fn broadcast(vector: &[Scalar], columns: usize) -> Rows {
    vector.iter().map(|element| vec![*element; columns]).collect()
}

fn zip_row(op: ArithOp, left: &[Scalar], right: &[Scalar]) -> Result<Vec<Scalar>, ErrorImpl> {
    left.iter()
        .zip(right)
        .map(|(l, r)| apply_scalar(op, *l, *r))
        .collect()
}

/// Element-wise combination of two matrices, `None` if their shapes differ.
fn zip_rows(op: ArithOp, left: &Rows, right: &Rows) -> Option<Result<Rows, ErrorImpl>> {
    if left.len() != right.len() || column_count(left) != column_count(right) {
        return None;
    }

    Some(
        left.iter()
            .zip(right)
            .map(|(l, r)| zip_row(op, l, r))
            .collect(),
    )
}

/// Matrix product, `None` if the inner dimensions differ.
pub fn matmul(left: &Rows, right: &Rows) -> Option<Result<Rows, ErrorImpl>> {
    let inner = column_count(left);
    if inner != right.len() {
        return None;
    }
    let columns = column_count(right);

    let product = || -> Result<Rows, ErrorImpl> {
        let mut result = Vec::with_capacity(left.len());
        for row in left {
            let mut out = Vec::with_capacity(columns);
            for j in 0..columns {
                let mut sum = Scalar::Int(0);
                for k in 0..inner {
                    let term = apply_scalar(ArithOp::Mul, row[k], right[k][j])?;
                    sum = apply_scalar(ArithOp::Add, sum, term)?;
                }
                out.push(sum);
            }
            result.push(out);
        }
        Ok(result)
    };

    Some(product())
}

pub fn negate(value: Value) -> Result<Value, ErrorImpl> {
    let negate_scalar = |scalar: Scalar| {
        scalar.negate().ok_or(ErrorImpl::IntegerOverflow {
            operation: String::from("negation"),
        })
    };

    match value {
        Value::Int(_) | Value::Float(_) => match value.as_scalar() {
            Some(scalar) => negate_scalar(scalar).map(Value::from),
            None => Ok(value),
        },
        Value::Vector(elements) => elements
            .into_iter()
            .map(negate_scalar)
            .collect::<Result<_, _>>()
            .map(Value::Vector),
        Value::Matrix(rows) => rows
            .into_iter()
            .map(|row| row.into_iter().map(negate_scalar).collect())
            .collect::<Result<_, _>>()
            .map(Value::Matrix),
        Value::Str(_) => Err(ErrorImpl::InvalidOperand {
            operator: String::from("-"),
            operand: value.type_name(),
        }),
    }
}

/// `result[j][i] = operand[i][j]`. A vector becomes a single column.
pub fn transpose(value: Value) -> Result<Value, ErrorImpl> {
    match value {
        Value::Matrix(rows) => {
            let columns = column_count(&rows);
            let transposed = (0..columns)
                .map(|j| rows.iter().map(|row| row[j]).collect())
                .collect();
            Ok(Value::Matrix(transposed))
        }
        Value::Vector(elements) => Ok(Value::Matrix(
            elements.into_iter().map(|element| vec![element]).collect(),
        )),
        _ => Err(ErrorImpl::InvalidOperand {
            operator: String::from("'"),
            operand: value.type_name(),
        }),
    }
}

pub fn compare(op: RelOp, left: &Value, right: &Value) -> Result<bool, ErrorImpl> {
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => Some(l.cmp(r)),
        (Value::Str(l), Value::Str(r)) => Some(l.cmp(r)),
        _ => match (left.as_scalar(), right.as_scalar()) {
            (Some(l), Some(r)) => l.as_f64().partial_cmp(&r.as_f64()),
            _ => return Err(mismatch(op, &left.type_name(), &right.type_name())),
        },
    };

    // NaN compares unequal to everything
    let Some(ordering) = ordering else {
        return Ok(op == RelOp::NotEquals);
    };

    Ok(match op {
        RelOp::Less => ordering == Ordering::Less,
        RelOp::LessEquals => ordering != Ordering::Greater,
        RelOp::Greater => ordering == Ordering::Greater,
        RelOp::GreaterEquals => ordering != Ordering::Less,
        RelOp::Equals => ordering == Ordering::Equal,
        RelOp::NotEquals => ordering != Ordering::Equal,
    })
}

pub fn generate(kind: Generator, size: usize) -> Value {
    let rows = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| match kind {
                    Generator::Zeros => Scalar::Float(0.0),
                    Generator::Ones => Scalar::Float(1.0),
                    Generator::Eye if i == j => Scalar::Float(1.0),
                    Generator::Eye => Scalar::Float(0.0),
                })
                .collect()
        })
        .collect();

    Value::Matrix(rows)
}
