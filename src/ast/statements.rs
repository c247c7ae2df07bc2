use super::expressions::{ArithOp, Condition, Expr, Index};

/// Left-hand side of `=`.
#[derive(Debug, Clone, PartialEq)]
pub enum AssignTarget {
    Name(String),
    Indexed { name: String, index: Index },
}

impl AssignTarget {
    pub fn name(&self) -> &str {
        match self {
            AssignTarget::Name(name) | AssignTarget::Indexed { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `{ ... }`, runs in a scope of its own.
    Block {
        body: Vec<Stmt>,
        line: usize,
    },
    If {
        condition: Condition,
        then_body: Box<Stmt>,
        else_body: Option<Box<Stmt>>,
        line: usize,
    },
    While {
        condition: Condition,
        body: Box<Stmt>,
        line: usize,
    },
    /// `for variable = begin : end body`
    For {
        variable: String,
        begin: Expr,
        end: Expr,
        body: Box<Stmt>,
        line: usize,
    },
    Break {
        line: usize,
    },
    Continue {
        line: usize,
    },
    Return {
        value: Expr,
        line: usize,
    },
    Assign {
        target: AssignTarget,
        value: Expr,
        line: usize,
    },
    /// `name += value` and friends.
    CompoundAssign {
        name: String,
        op: ArithOp,
        value: Expr,
        line: usize,
    },
    Print {
        values: Vec<Expr>,
        line: usize,
    },
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::Block { line, .. }
            | Stmt::If { line, .. }
            | Stmt::While { line, .. }
            | Stmt::For { line, .. }
            | Stmt::Break { line }
            | Stmt::Continue { line }
            | Stmt::Return { line, .. }
            | Stmt::Assign { line, .. }
            | Stmt::CompoundAssign { line, .. }
            | Stmt::Print { line, .. } => *line,
        }
    }
}
