/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: the program root
/// - expressions: expression, index and condition nodes plus operators
/// - statements: statement nodes and assignment targets
/// - types: static types inferred by the type checker
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
