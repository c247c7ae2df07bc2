use std::fmt::Display;

use crate::ast::expressions::ArithOp;

/// A number stored in a vector or matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
}

impl Scalar {
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::Int(value) => value as f64,
            Scalar::Float(value) => value,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Scalar::Int(value) => value == 0,
            Scalar::Float(value) => value == 0.0,
        }
    }

    /// Applies `op`, returning `None` on integer overflow.
    ///
    /// Division always produces a float and division by zero yields
    /// positive infinity regardless of the dividend.
    pub fn apply(self, op: ArithOp, other: Scalar) -> Option<Scalar> {
        match (op, self, other) {
            (ArithOp::Div, _, divisor) if divisor.is_zero() => Some(Scalar::Float(f64::INFINITY)),
            (ArithOp::Div, dividend, divisor) => {
                Some(Scalar::Float(dividend.as_f64() / divisor.as_f64()))
            }
            (ArithOp::Add, Scalar::Int(left), Scalar::Int(right)) => {
                left.checked_add(right).map(Scalar::Int)
            }
            (ArithOp::Sub, Scalar::Int(left), Scalar::Int(right)) => {
                left.checked_sub(right).map(Scalar::Int)
            }
            (ArithOp::Mul, Scalar::Int(left), Scalar::Int(right)) => {
                left.checked_mul(right).map(Scalar::Int)
            }
            (ArithOp::Add, left, right) => Some(Scalar::Float(left.as_f64() + right.as_f64())),
            (ArithOp::Sub, left, right) => Some(Scalar::Float(left.as_f64() - right.as_f64())),
            (ArithOp::Mul, left, right) => Some(Scalar::Float(left.as_f64() * right.as_f64())),
        }
    }

    pub fn negate(self) -> Option<Scalar> {
        match self {
            Scalar::Int(value) => value.checked_neg().map(Scalar::Int),
            Scalar::Float(value) => Some(Scalar::Float(-value)),
        }
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Int(value) => write!(f, "{}", value),
            Scalar::Float(value) => write_float(f, *value),
        }
    }
}

fn write_float(f: &mut std::fmt::Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.is_nan() {
        write!(f, "nan")
    } else if value.is_infinite() {
        write!(f, "{}", if value > 0.0 { "inf" } else { "-inf" })
    } else {
        // Debug keeps a fractional part on whole numbers (`1.0`)
        write!(f, "{:?}", value)
    }
}

/// Runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Vector(Vec<Scalar>),
    /// Row-major; every row has the same length.
    Matrix(Vec<Vec<Scalar>>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Value::Int(value) => Some(Scalar::Int(*value)),
            Value::Float(value) => Some(Scalar::Float(*value)),
            _ => None,
        }
    }

    /// Type name with shape, matching the type checker's notation.
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => String::from("int"),
            Value::Float(_) => String::from("float"),
            Value::Str(_) => String::from("string"),
            Value::Vector(elements) => format!("vector[{}]", elements.len()),
            Value::Matrix(rows) => format!("matrix[{}x{}]", rows.len(), column_count(rows)),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Int(value) => Value::Int(value),
            Scalar::Float(value) => Value::Float(value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write_float(f, *value),
            Value::Str(value) => write!(f, "{}", value),
            Value::Vector(elements) => write_row(f, elements),
            Value::Matrix(rows) => {
                write!(f, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_row(f, row)?;
                }
                write!(f, "]")
            }
        }
    }
}

fn write_row(f: &mut std::fmt::Formatter<'_>, row: &[Scalar]) -> std::fmt::Result {
    write!(f, "[")?;
    for (i, element) in row.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", element)?;
    }
    write!(f, "]")
}

pub fn column_count(rows: &[Vec<Scalar>]) -> usize {
    rows.first().map_or(0, Vec::len)
}
