use super::statements::Stmt;

/// Root of a parsed program.
///
/// The top-level statements run in the global scope; they are not wrapped in
/// a block, so nothing at this level introduces a scope of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Program { body }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.body.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
