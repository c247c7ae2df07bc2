use std::fmt::Display;

/// Arithmetic shared by the scalar, element-wise and compound operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
        }
    }
}

/// Binary operators.
///
/// The plain operators work on scalars only. The dotted operators broadcast
/// vectors over matrices, and `.*` turns into matrix multiplication as soon
/// as either operand is a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    DotAdd,
    DotSub,
    DotMul,
    DotDiv,
}

impl BinaryOp {
    pub fn arith(self) -> ArithOp {
        match self {
            BinaryOp::Add | BinaryOp::DotAdd => ArithOp::Add,
            BinaryOp::Sub | BinaryOp::DotSub => ArithOp::Sub,
            BinaryOp::Mul | BinaryOp::DotMul => ArithOp::Mul,
            BinaryOp::Div | BinaryOp::DotDiv => ArithOp::Div,
        }
    }

    pub fn is_elementwise(self) -> bool {
        matches!(
            self,
            BinaryOp::DotAdd | BinaryOp::DotSub | BinaryOp::DotMul | BinaryOp::DotDiv
        )
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_elementwise() {
            write!(f, ".{}", self.arith())
        } else {
            write!(f, "{}", self.arith())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
}

impl Display for RelOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            RelOp::Less => "<",
            RelOp::LessEquals => "<=",
            RelOp::Greater => ">",
            RelOp::GreaterEquals => ">=",
            RelOp::Equals => "==",
            RelOp::NotEquals => "!=",
        };
        write!(f, "{}", symbol)
    }
}

/// Largest `n` accepted by `zeros(n)`, `ones(n)` and `eye(n)`.
pub const MAX_GENERATOR_SIZE: usize = 1024;

/// Matrix generator builtins, each producing an `n x n` float matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    Zeros,
    Ones,
    Eye,
}

impl Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Generator::Zeros => write!(f, "zeros"),
            Generator::Ones => write!(f, "ones"),
            Generator::Eye => write!(f, "eye"),
        }
    }
}

/// Index list of an indexed reference.
#[derive(Debug, Clone, PartialEq)]
pub enum Index {
    /// `A[i]`
    Single(Box<Expr>),
    /// `A[i, j]`
    Double(Box<Expr>, Box<Expr>),
    /// `A[a:b]`, `A[:b]` or `A[a:]`
    Slice {
        begin: Option<Box<Expr>>,
        end: Option<Box<Expr>>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int {
        value: i64,
        line: usize,
    },
    Float {
        value: f64,
        line: usize,
    },
    Str {
        value: String,
        line: usize,
    },
    Variable {
        name: String,
        line: usize,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        line: usize,
    },
    Negate {
        operand: Box<Expr>,
        line: usize,
    },
    Transpose {
        operand: Box<Expr>,
        line: usize,
    },
    Indexed {
        name: String,
        index: Index,
        line: usize,
    },
    Vector {
        elements: Vec<Expr>,
        line: usize,
    },
    Matrix {
        rows: Vec<Vec<Expr>>,
        line: usize,
    },
    Generator {
        kind: Generator,
        size: usize,
        line: usize,
    },
}

impl Expr {
    pub fn line(&self) -> usize {
        match self {
            Expr::Int { line, .. }
            | Expr::Float { line, .. }
            | Expr::Str { line, .. }
            | Expr::Variable { line, .. }
            | Expr::Binary { line, .. }
            | Expr::Negate { line, .. }
            | Expr::Transpose { line, .. }
            | Expr::Indexed { line, .. }
            | Expr::Vector { line, .. }
            | Expr::Matrix { line, .. }
            | Expr::Generator { line, .. } => *line,
        }
    }

    /// The value of an integer literal, used for static bounds checks.
    pub fn as_int_literal(&self) -> Option<i64> {
        match self {
            Expr::Int { value, .. } => Some(*value),
            Expr::Negate { operand, .. } => operand.as_int_literal().and_then(i64::checked_neg),
            _ => None,
        }
    }
}

/// Relational comparison. Only valid as an `if` or `while` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: RelOp,
    pub left: Expr,
    pub right: Expr,
    pub line: usize,
}
