use crate::ast::types::{ElementType, Ty};

/// What the checker knows about a name, recorded on its first assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Symbol {
    /// A scalar, a string or a name whose type could not be inferred.
    Variable { name: String, ty: Ty },
    /// A vector (`dimension` 1) or matrix (`dimension` 2). `size` is the
    /// vector length or the matrix row count.
    Vector {
        name: String,
        ty: Ty,
        dimension: usize,
        size: usize,
    },
}

impl Symbol {
    pub fn new(name: &str, ty: Ty) -> Self {
        let name = name.to_string();
        match ty {
            Ty::Vector(_, length) => Symbol::Vector {
                name,
                ty,
                dimension: 1,
                size: length,
            },
            Ty::Matrix(_, rows, _) => Symbol::Vector {
                name,
                ty,
                dimension: 2,
                size: rows,
            },
            _ => Symbol::Variable { name, ty },
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Symbol::Variable { name, .. } | Symbol::Vector { name, .. } => name,
        }
    }

    pub fn ty(&self) -> Ty {
        match self {
            Symbol::Variable { ty, .. } | Symbol::Vector { ty, .. } => *ty,
        }
    }

    /// The same symbol with its element type widened to hold `element`.
    pub fn widened(&self, element: ElementType) -> Symbol {
        let ty = match self.ty() {
            Ty::Vector(current, length) => Ty::Vector(current.join(element), length),
            Ty::Matrix(current, rows, cols) => Ty::Matrix(current.join(element), rows, cols),
            other => other,
        };
        Symbol::new(self.name(), ty)
    }
}
