//! Static types inferred by the type checker.
//!
//! Shapes are part of the type: every vector and matrix in the language has
//! a length or shape that is known before the program runs, so the checker
//! can reject shape mismatches up front.

use std::fmt::Display;

/// Element type of a vector or matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Int,
    Float,
}

impl ElementType {
    /// The element type of an arithmetic result: integers stay integers
    /// unless either side is a float.
    pub fn join(self, other: ElementType) -> ElementType {
        match (self, other) {
            (ElementType::Int, ElementType::Int) => ElementType::Int,
            _ => ElementType::Float,
        }
    }
}

impl Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ElementType::Int => write!(f, "int"),
            ElementType::Float => write!(f, "float"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    Int,
    Float,
    Str,
    Vector(ElementType, usize),
    Matrix(ElementType, usize, usize),
    /// Result of an expression that already produced an error.
    Unknown,
}

impl Ty {
    pub fn scalar(element: ElementType) -> Ty {
        match element {
            ElementType::Int => Ty::Int,
            ElementType::Float => Ty::Float,
        }
    }

    /// The element type of a numeric scalar.
    pub fn as_element(&self) -> Option<ElementType> {
        match self {
            Ty::Int => Some(ElementType::Int),
            Ty::Float => Some(ElementType::Float),
            _ => None,
        }
    }

    pub fn is_numeric_scalar(&self) -> bool {
        matches!(self, Ty::Int | Ty::Float)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Ty::Unknown)
    }

    /// Whether a name holding `self` may be re-assigned a value of type `other`.
    pub fn is_compatible_with(&self, other: &Ty) -> bool {
        match (self, other) {
            (Ty::Unknown, _) | (_, Ty::Unknown) => true,
            (Ty::Int | Ty::Float, Ty::Int | Ty::Float) => true,
            (Ty::Str, Ty::Str) => true,
            (Ty::Vector(_, left), Ty::Vector(_, right)) => left == right,
            (Ty::Matrix(_, rows, cols), Ty::Matrix(_, other_rows, other_cols)) => {
                rows == other_rows && cols == other_cols
            }
            _ => false,
        }
    }
}

impl Display for Ty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::Float => write!(f, "float"),
            Ty::Str => write!(f, "string"),
            Ty::Vector(element, length) => write!(f, "vector<{}>[{}]", element, length),
            Ty::Matrix(element, rows, cols) => {
                write!(f, "matrix<{}>[{}x{}]", element, rows, cols)
            }
            Ty::Unknown => write!(f, "unknown"),
        }
    }
}
