use crate::{
    ast::{
        ast::Program,
        expressions::{ArithOp, BinaryOp, Condition, Expr, Index, MAX_GENERATOR_SIZE},
        statements::{AssignTarget, Stmt},
        types::{ElementType, Ty},
    },
    environment::environment::Environment,
    errors::errors::{Error, ErrorImpl},
};

use super::symbols::Symbol;

#[derive(Debug)]
pub struct TypeChecker {
    pub environment: Environment<Symbol>,
    pub errors: Vec<Error>,
    loop_depth: usize,
}

impl TypeChecker {
    pub fn new() -> Self {
        TypeChecker {
            environment: Environment::new("global"),
            errors: vec![],
            loop_depth: 0,
        }
    }

    pub fn error(&mut self, error: ErrorImpl, line: usize) {
        tracing::debug!(line, %error, "semantic error");
        self.errors.push(Error::new(error, line));
    }

    pub fn fetch_variable_type(&self, name: &str) -> Option<Ty> {
        self.environment.lookup(name).map(Symbol::ty)
    }

    /// The type of `name`, recording an error if it was never assigned.
    fn variable_type(&mut self, name: &str, line: usize) -> Ty {
        match self.fetch_variable_type(name) {
            Some(ty) => ty,
            None => {
                self.error(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.to_string(),
                    },
                    line,
                );
                Ty::Unknown
            }
        }
    }

    /// Pushes a scope, runs `f`, then pops the scope again whatever `f`
    /// reported.
    fn with_scope(&mut self, name: &str, f: impl FnOnce(&mut Self)) {
        self.environment.push_scope(name);
        f(self);
        self.environment.pop_scope();
    }

    fn in_loop(&mut self, f: impl FnOnce(&mut Self)) {
        self.loop_depth += 1;
        f(self);
        self.loop_depth -= 1;
    }
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(operator: impl ToString, left: Ty, right: Ty) -> ErrorImpl {
    ErrorImpl::OperandMismatch {
        operator: operator.to_string(),
        left: left.to_string(),
        right: right.to_string(),
    }
}

fn arithmetic_element(op: ArithOp, left: ElementType, right: ElementType) -> ElementType {
    match op {
        ArithOp::Div => ElementType::Float,
        _ => left.join(right),
    }
}

/// Result type of `left op right`, `None` if the operands do not fit.
pub fn binary_result(op: BinaryOp, left: Ty, right: Ty) -> Option<Ty> {
    if left.is_unknown() || right.is_unknown() {
        return Some(Ty::Unknown);
    }

    let arith = op.arith();
    if let (Some(l), Some(r)) = (left.as_element(), right.as_element()) {
        return Some(Ty::scalar(arithmetic_element(arith, l, r)));
    }

    if !op.is_elementwise() {
        return None;
    }

    // broadcast a vector against a matrix, one row per element
    let (left, right) = match (left, right) {
        (Ty::Vector(l, n), Ty::Vector(r, m)) => {
            return (n == m).then_some(Ty::Vector(arithmetic_element(arith, l, r), n));
        }
        (Ty::Vector(l, n), Ty::Matrix(r, rows, cols)) => {
            ((l, n, cols), (r, rows, cols))
        }
        (Ty::Matrix(l, rows, cols), Ty::Vector(r, n)) => {
            ((l, rows, cols), (r, n, cols))
        }
        (Ty::Matrix(l, lr, lc), Ty::Matrix(r, rr, rc)) => ((l, lr, lc), (r, rr, rc)),
        _ => return None,
    };

    let ((l, lr, lc), (r, rr, rc)) = (left, right);
    let element = arithmetic_element(arith, l, r);
    if op == BinaryOp::DotMul {
        (lc == rr).then_some(Ty::Matrix(element, lr, rc))
    } else {
        (lr == rr && lc == rc).then_some(Ty::Matrix(element, lr, lc))
    }
}

/// Result type of `name op= value`: element-wise, no broadcasting.
pub fn compound_result(op: ArithOp, current: Ty, value: Ty) -> Option<Ty> {
    if current.is_unknown() || value.is_unknown() {
        return Some(Ty::Unknown);
    }

    match (current, value) {
        (Ty::Vector(l, n), Ty::Vector(r, m)) if n == m => {
            Some(Ty::Vector(arithmetic_element(op, l, r), n))
        }
        (Ty::Matrix(l, lr, lc), Ty::Matrix(r, rr, rc)) if lr == rr && lc == rc => {
            Some(Ty::Matrix(arithmetic_element(op, l, r), lr, lc))
        }
        (current, value) => match (current.as_element(), value.as_element()) {
            (Some(l), Some(r)) => Some(Ty::scalar(arithmetic_element(op, l, r))),
            _ => None,
        },
    }
}

/// Checks that an index is an integer and, when it is a literal, that it
/// lies below `length` (or at most `length` for a slice bound).
fn check_index(type_checker: &mut TypeChecker, index: &Expr, length: Option<usize>, inclusive: bool) {
    let ty = type_check_expr(type_checker, index);
    if !matches!(ty, Ty::Int | Ty::Unknown) {
        type_checker.error(
            ErrorImpl::NonIntegerIndex {
                received: ty.to_string(),
            },
            index.line(),
        );
        return;
    }

    let (Some(value), Some(length)) = (index.as_int_literal(), length) else {
        return;
    };

    let limit = if inclusive { length + 1 } else { length };
    let in_bounds = usize::try_from(value).is_ok_and(|value| value < limit);
    if !in_bounds {
        type_checker.error(ErrorImpl::IndexOutOfBounds { index: value, length }, index.line());
    }
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> Ty {
    let line = expr.line();

    match expr {
        Expr::Int { .. } => Ty::Int,
        Expr::Float { .. } => Ty::Float,
        Expr::Str { .. } => Ty::Str,
        Expr::Variable { name, .. } => type_checker.variable_type(name, line),
        Expr::Binary {
            op, left, right, ..
        } => {
            let left = type_check_expr(type_checker, left);
            let right = type_check_expr(type_checker, right);

            binary_result(*op, left, right).unwrap_or_else(|| {
                type_checker.error(mismatch(op, left, right), line);
                Ty::Unknown
            })
        }
        Expr::Negate { operand, .. } => match type_check_expr(type_checker, operand) {
            Ty::Str => {
                type_checker.error(
                    ErrorImpl::InvalidOperand {
                        operator: String::from("-"),
                        operand: Ty::Str.to_string(),
                    },
                    line,
                );
                Ty::Unknown
            }
            ty => ty,
        },
        Expr::Transpose { operand, .. } => match type_check_expr(type_checker, operand) {
            Ty::Matrix(element, rows, cols) => Ty::Matrix(element, cols, rows),
            Ty::Vector(element, length) => Ty::Matrix(element, length, 1),
            Ty::Unknown => Ty::Unknown,
            ty => {
                type_checker.error(
                    ErrorImpl::InvalidOperand {
                        operator: String::from("'"),
                        operand: ty.to_string(),
                    },
                    line,
                );
                Ty::Unknown
            }
        },
        Expr::Indexed { name, index, .. } => {
            let ty = type_checker.variable_type(name, line);
            type_check_indexed_read(type_checker, name, ty, index, line)
        }
        Expr::Vector { elements, .. } if elements.is_empty() => {
            type_checker.error(empty_literal("vector"), line);
            Ty::Unknown
        }
        Expr::Matrix { rows, .. } if rows.is_empty() || rows.iter().any(Vec::is_empty) => {
            type_checker.error(empty_literal("matrix"), line);
            Ty::Unknown
        }
        Expr::Vector { elements, .. } => match type_check_row(type_checker, elements) {
            Some(element) => Ty::Vector(element, elements.len()),
            None => Ty::Unknown,
        },
        Expr::Matrix { rows, .. } => {
            let columns = rows.first().map_or(0, Vec::len);
            let mut element = Some(ElementType::Int);

            for row in rows {
                if row.len() != columns {
                    type_checker.error(
                        ErrorImpl::RaggedMatrix {
                            expected: columns,
                            received: row.len(),
                        },
                        row.first().map_or(line, Expr::line),
                    );
                    element = None;
                }

                let row_element = type_check_row(type_checker, row);
                element = element.zip(row_element).map(|(a, b)| a.join(b));
            }

            match element {
                Some(element) => Ty::Matrix(element, rows.len(), columns),
                None => Ty::Unknown,
            }
        }
        Expr::Generator { kind, size, .. } if *size > MAX_GENERATOR_SIZE => {
            type_checker.error(
                ErrorImpl::GeneratorTooLarge {
                    generator: kind.to_string(),
                    size: *size,
                    limit: MAX_GENERATOR_SIZE,
                },
                line,
            );
            Ty::Unknown
        }
        Expr::Generator { size, .. } => Ty::Matrix(ElementType::Float, *size, *size),
    }
}

fn empty_literal(literal: &str) -> ErrorImpl {
    ErrorImpl::EmptyLiteral {
        literal: literal.to_string(),
    }
}

/// Element type of a literal row, `None` if an element is not a number.
fn type_check_row(type_checker: &mut TypeChecker, elements: &[Expr]) -> Option<ElementType> {
    let mut row = Some(ElementType::Int);

    for element in elements {
        let ty = type_check_expr(type_checker, element);
        match ty.as_element() {
            Some(e) => row = row.map(|r| r.join(e)),
            None if ty.is_unknown() => row = None,
            None => {
                type_checker.error(
                    ErrorImpl::InvalidElement {
                        received: ty.to_string(),
                    },
                    element.line(),
                );
                row = None;
            }
        }
    }

    row
}

fn type_check_indexed_read(
    type_checker: &mut TypeChecker,
    name: &str,
    ty: Ty,
    index: &Index,
    line: usize,
) -> Ty {
    match (index, ty) {
        (Index::Slice { .. }, _) => {
            type_checker.error(
                ErrorImpl::SliceRead {
                    variable: name.to_string(),
                },
                line,
            );
            Ty::Unknown
        }
        (Index::Single(i), Ty::Vector(element, length)) => {
            check_index(type_checker, i, Some(length), false);
            Ty::scalar(element)
        }
        (Index::Single(i), Ty::Matrix(element, rows, cols)) => {
            check_index(type_checker, i, Some(rows), false);
            Ty::Vector(element, cols)
        }
        (Index::Double(i, j), Ty::Matrix(element, rows, cols)) => {
            check_index(type_checker, i, Some(rows), false);
            check_index(type_checker, j, Some(cols), false);
            Ty::scalar(element)
        }
        (Index::Single(i), Ty::Unknown) => {
            check_index(type_checker, i, None, false);
            Ty::Unknown
        }
        (Index::Double(i, j), Ty::Unknown) => {
            check_index(type_checker, i, None, false);
            check_index(type_checker, j, None, false);
            Ty::Unknown
        }
        (Index::Double(..), Ty::Vector(..)) => {
            type_checker.error(
                ErrorImpl::WrongIndexCount {
                    variable: name.to_string(),
                    type_: ty.to_string(),
                    expected: 1,
                    received: 2,
                },
                line,
            );
            Ty::Unknown
        }
        (_, ty) => {
            type_checker.error(
                ErrorImpl::NotIndexable {
                    variable: name.to_string(),
                    type_: ty.to_string(),
                },
                line,
            );
            Ty::Unknown
        }
    }
}

pub fn type_check_condition(type_checker: &mut TypeChecker, condition: &Condition) {
    let left = type_check_expr(type_checker, &condition.left);
    let right = type_check_expr(type_checker, &condition.right);

    let comparable = left.is_unknown()
        || right.is_unknown()
        || (left.is_numeric_scalar() && right.is_numeric_scalar())
        || (left == Ty::Str && right == Ty::Str);

    if !comparable {
        type_checker.error(mismatch(condition.op, left, right), condition.line);
    }
}

/// Binds `name` to `ty`, or verifies `ty` against the type it already has.
fn assign_variable(type_checker: &mut TypeChecker, name: &str, ty: Ty, line: usize) {
    match type_checker.fetch_variable_type(name) {
        Some(existing) if !existing.is_compatible_with(&ty) => {
            type_checker.error(
                ErrorImpl::TypeMatchError {
                    variable: name.to_string(),
                    expected: existing.to_string(),
                    received: ty.to_string(),
                },
                line,
            );
        }
        Some(_) if ty.is_unknown() => {}
        _ => type_checker
            .environment
            .declare_or_assign(name, Symbol::new(name, ty)),
    }
}

fn type_check_indexed_assignment(
    type_checker: &mut TypeChecker,
    name: &str,
    index: &Index,
    value: Ty,
    line: usize,
) {
    let target = type_checker.variable_type(name, line);

    // `Some(cols)` when a whole matrix row is written
    let expected = match (index, target) {
        (_, Ty::Unknown) => {
            check_assignment_indices(type_checker, index, None, None);
            return;
        }
        (Index::Single(_) | Index::Slice { .. }, Ty::Vector(_, length)) => {
            check_assignment_indices(type_checker, index, Some(length), None);
            None
        }
        (Index::Single(_) | Index::Slice { .. }, Ty::Matrix(_, rows, cols)) => {
            check_assignment_indices(type_checker, index, Some(rows), None);
            Some(cols)
        }
        (Index::Double(..), Ty::Matrix(_, rows, cols)) => {
            check_assignment_indices(type_checker, index, Some(rows), Some(cols));
            None
        }
        (Index::Double(..), Ty::Vector(..)) => {
            type_checker.error(
                ErrorImpl::WrongIndexCount {
                    variable: name.to_string(),
                    type_: target.to_string(),
                    expected: 1,
                    received: 2,
                },
                line,
            );
            return;
        }
        (_, target) => {
            type_checker.error(
                ErrorImpl::NotIndexable {
                    variable: name.to_string(),
                    type_: target.to_string(),
                },
                line,
            );
            return;
        }
    };

    let written = match (expected, value) {
        (_, Ty::Unknown) => return,
        (None, value) => value.as_element(),
        (Some(cols), Ty::Vector(element, length)) if length == cols => Some(element),
        (Some(_), _) => None,
    };

    match written {
        Some(element) => {
            if let Some(symbol) = type_checker.environment.lookup(name) {
                let widened = symbol.widened(element);
                type_checker.environment.declare_or_assign(name, widened);
            }
        }
        None => {
            let expected = match expected {
                Some(cols) => format!("vector[{}]", cols),
                None => String::from("a number"),
            };
            type_checker.error(
                ErrorImpl::InvalidAssignment {
                    target: format!("{}[..]", name),
                    expected,
                    received: value.to_string(),
                },
                line,
            );
        }
    }
}

fn check_assignment_indices(
    type_checker: &mut TypeChecker,
    index: &Index,
    length: Option<usize>,
    columns: Option<usize>,
) {
    match index {
        Index::Single(i) => check_index(type_checker, i, length, false),
        Index::Double(i, j) => {
            check_index(type_checker, i, length, false);
            check_index(type_checker, j, columns, false);
        }
        Index::Slice { begin, end } => {
            for bound in [begin, end].into_iter().flatten() {
                check_index(type_checker, bound, length, true);
            }
        }
    }
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) {
    match stmt {
        Stmt::Block { body, .. } => type_checker.with_scope("block", |type_checker| {
            for stmt in body {
                type_check_stmt(type_checker, stmt);
            }
        }),
        Stmt::If {
            condition,
            then_body,
            else_body,
            ..
        } => {
            type_check_condition(type_checker, condition);
            type_checker.with_scope("if", |type_checker| type_check_stmt(type_checker, then_body));
            if let Some(else_body) = else_body {
                type_checker
                    .with_scope("else", |type_checker| type_check_stmt(type_checker, else_body));
            }
        }
        Stmt::While {
            condition, body, ..
        } => type_checker.with_scope("while", |type_checker| {
            type_check_condition(type_checker, condition);
            type_checker.in_loop(|type_checker| type_check_stmt(type_checker, body));
        }),
        Stmt::For {
            variable,
            begin,
            end,
            body,
            line,
        } => {
            for bound in [begin, end] {
                let ty = type_check_expr(type_checker, bound);
                if !matches!(ty, Ty::Int | Ty::Unknown) {
                    type_checker.error(
                        ErrorImpl::TypeMatchError {
                            variable: variable.clone(),
                            expected: Ty::Int.to_string(),
                            received: ty.to_string(),
                        },
                        *line,
                    );
                }
            }

            type_checker.with_scope("for", |type_checker| {
                type_checker
                    .environment
                    .declare(variable, Symbol::new(variable, Ty::Int));
                type_checker.in_loop(|type_checker| type_check_stmt(type_checker, body));
            });
        }
        Stmt::Break { line } | Stmt::Continue { line } => {
            if type_checker.loop_depth == 0 {
                let statement = match stmt {
                    Stmt::Break { .. } => "break",
                    _ => "continue",
                };
                type_checker.error(
                    ErrorImpl::ControlOutsideLoop {
                        statement: statement.to_string(),
                    },
                    *line,
                );
            }
        }
        Stmt::Return { value, .. } => {
            type_check_expr(type_checker, value);
        }
        Stmt::Assign {
            target,
            value,
            line,
        } => {
            let ty = type_check_expr(type_checker, value);
            match target {
                AssignTarget::Name(name) => assign_variable(type_checker, name, ty, *line),
                AssignTarget::Indexed { name, index } => {
                    type_check_indexed_assignment(type_checker, name, index, ty, *line)
                }
            }
        }
        Stmt::CompoundAssign {
            name,
            op,
            value,
            line,
        } => {
            let value = type_check_expr(type_checker, value);
            let current = type_checker.variable_type(name, *line);

            match compound_result(*op, current, value) {
                Some(result) => assign_variable(type_checker, name, result, *line),
                None => {
                    type_checker.error(mismatch(format!("{}=", op), current, value), *line)
                }
            }
        }
        Stmt::Print { values, .. } => {
            for value in values {
                type_check_expr(type_checker, value);
            }
        }
    }
}

/// Checks the whole program, collecting every semantic error instead of
/// stopping at the first one. The program may only run if the returned
/// list is empty.
#[tracing::instrument(skip_all)]
pub fn type_check(program: &Program) -> (TypeChecker, Vec<Error>) {
    let mut type_checker = TypeChecker::new();

    for stmt in program.iter() {
        type_check_stmt(&mut type_checker, stmt);
    }

    let errors = std::mem::take(&mut type_checker.errors);
    tracing::debug!(
        errors = errors.len(),
        globals = type_checker.environment.global_scope().len(),
        "type check finished"
    );

    (type_checker, errors)
}
