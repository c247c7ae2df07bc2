use std::io::Write;

use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryOp, Condition, Expr, Index, RelOp, MAX_GENERATOR_SIZE},
        statements::{AssignTarget, Stmt},
    },
    environment::environment::Environment,
    errors::errors::{Error, ErrorImpl},
};

use super::{
    operations,
    signal::Signal,
    value::{column_count, Scalar, Value},
};

/// Where an indexed assignment writes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Place {
    /// `A[i]`: a vector element or a matrix row.
    Slot(i64),
    /// `A[i, j]`: a matrix cell.
    Cell(i64, i64),
    /// `A[a:b]`: every element or row in `[a, b)`.
    Range(Option<i64>, Option<i64>),
}

pub struct Interpreter<W: Write> {
    environment: Environment<Value>,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Interpreter {
            environment: Environment::new("global"),
            out,
        }
    }

    /// Executes the program in the global scope. A top-level `return` ends
    /// the run early.
    #[tracing::instrument(skip_all)]
    pub fn run(&mut self, program: &Program) -> Result<(), Error> {
        match self.exec_body(&program.body)? {
            Signal::Return(value) => {
                tracing::debug!(%value, "program returned");
            }
            Signal::Break | Signal::Continue => {
                tracing::warn!("loop control escaped to the top level");
            }
            Signal::Normal => {}
        }

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.environment.lookup(name)
    }

    pub fn environment(&self) -> &Environment<Value> {
        &self.environment
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Runs `f` inside a freshly pushed scope, popping it on every path out.
    fn with_scope<R>(&mut self, name: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.environment.push_scope(name);
        let result = f(self);
        self.environment.pop_scope();
        result
    }

    fn exec_body(&mut self, body: &[Stmt]) -> Result<Signal, Error> {
        for stmt in body {
            let signal = self.exec_stmt(stmt)?;
            if !signal.is_normal() {
                return Ok(signal);
            }
        }

        Ok(Signal::Normal)
    }

    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Signal, Error> {
        match stmt {
            Stmt::Block { body, .. } => self.with_scope("block", |this| {
                match this.exec_body(body)? {
                    // `return` ends the innermost block
                    Signal::Return(_) => Ok(Signal::Normal),
                    signal => Ok(signal),
                }
            }),
            Stmt::If {
                condition,
                then_body,
                else_body,
                ..
            } => {
                if self.eval_condition(condition)? {
                    self.with_scope("if", |this| this.exec_stmt(then_body))
                } else if let Some(else_body) = else_body {
                    self.with_scope("else", |this| this.exec_stmt(else_body))
                } else {
                    Ok(Signal::Normal)
                }
            }
            Stmt::While {
                condition, body, ..
            } => self.with_scope("while", |this| {
                while this.eval_condition(condition)? {
                    match this.exec_stmt(body)? {
                        Signal::Break => break,
                        Signal::Return(value) => return Ok(Signal::Return(value)),
                        Signal::Continue | Signal::Normal => {}
                    }
                }
                Ok(Signal::Normal)
            }),
            Stmt::For {
                variable,
                begin,
                end,
                body,
                line,
            } => {
                let begin = self.eval_expr(begin)?;
                let end = self.eval_expr(end)?;
                self.with_scope("for", |this| {
                    this.exec_for(variable, begin, &end, body, *line)
                })
            }
            Stmt::Break { .. } => Ok(Signal::Break),
            Stmt::Continue { .. } => Ok(Signal::Continue),
            Stmt::Return { value, .. } => Ok(Signal::Return(self.eval_expr(value)?)),
            Stmt::Assign {
                target: AssignTarget::Name(name),
                value,
                ..
            } => {
                let value = self.eval_expr(value)?;
                self.environment.declare_or_assign(name, value);
                Ok(Signal::Normal)
            }
            Stmt::Assign {
                target: AssignTarget::Indexed { name, index },
                value,
                line,
            } => {
                let place = self.eval_place(index, *line)?;
                let value = self.eval_expr(value)?;
                let target = self.environment.lookup_mut(name).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: name.clone(),
                        },
                        *line,
                    )
                })?;
                store(name, target, place, value).map_err(|error| Error::new(error, *line))?;
                Ok(Signal::Normal)
            }
            Stmt::CompoundAssign {
                name,
                op,
                value,
                line,
            } => {
                let value = self.eval_expr(value)?;
                let current = self.read_variable(name, *line)?;
                let result = operations::compound(*op, current, value)
                    .map_err(|error| Error::new(error, *line))?;
                self.environment.declare_or_assign(name, result);
                Ok(Signal::Normal)
            }
            Stmt::Print { values, line } => {
                let rendered = values
                    .iter()
                    .map(|value| self.eval_expr(value).map(|value| value.to_string()))
                    .collect::<Result<Vec<_>, _>>()?;

                writeln!(self.out, "{}", rendered.join(" ")).map_err(|error| {
                    Error::new(
                        ErrorImpl::OutputError {
                            message: error.to_string(),
                        },
                        *line,
                    )
                })?;
                Ok(Signal::Normal)
            }
        }
    }

    /// The loop body of `for variable = begin : end`, run inside the loop's
    /// scope.
    ///
    /// The variable is re-read before every test so that writes from the body
    /// are observed. After the body, including after `break` and `continue`,
    /// the variable's current value plus one is written back. Incrementing the
    /// post-body value rather than the value tested is deliberate: a body that
    /// bumps the variable shortens the loop (see DESIGN.md, "For loop").
    fn exec_for(
        &mut self,
        variable: &str,
        begin: Value,
        end: &Value,
        body: &Stmt,
        line: usize,
    ) -> Result<Signal, Error> {
        let at = |error| Error::new(error, line);
        self.environment.declare(variable, begin);

        loop {
            let current = self.read_variable(variable, line)?;
            if !operations::compare(RelOp::Less, &current, end).map_err(at)? {
                return Ok(Signal::Normal);
            }

            let signal = self.exec_stmt(body)?;

            let current = self.read_variable(variable, line)?;
            let next = operations::binary(BinaryOp::Add, current, Value::Int(1)).map_err(at)?;
            self.environment.declare_or_assign(variable, next);

            match signal {
                Signal::Break => return Ok(Signal::Normal),
                Signal::Return(value) => return Ok(Signal::Return(value)),
                Signal::Continue | Signal::Normal => {}
            }
        }
    }

    fn read_variable(&self, name: &str, line: usize) -> Result<Value, Error> {
        self.environment.lookup(name).cloned().ok_or_else(|| {
            Error::new(
                ErrorImpl::VariableNotDeclared {
                    variable: name.to_string(),
                },
                line,
            )
        })
    }

    pub fn eval_condition(&mut self, condition: &Condition) -> Result<bool, Error> {
        let left = self.eval_expr(&condition.left)?;
        let right = self.eval_expr(&condition.right)?;
        operations::compare(condition.op, &left, &right)
            .map_err(|error| Error::new(error, condition.line))
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, Error> {
        let line = expr.line();
        let at = |error| Error::new(error, line);

        match expr {
            Expr::Int { value, .. } => Ok(Value::Int(*value)),
            Expr::Float { value, .. } => Ok(Value::Float(*value)),
            Expr::Str { value, .. } => Ok(Value::Str(value.clone())),
            Expr::Variable { name, .. } => self.read_variable(name, line),
            Expr::Binary {
                op, left, right, ..
            } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                operations::binary(*op, left, right).map_err(at)
            }
            Expr::Negate { operand, .. } => {
                let operand = self.eval_expr(operand)?;
                operations::negate(operand).map_err(at)
            }
            Expr::Transpose { operand, .. } => {
                let operand = self.eval_expr(operand)?;
                operations::transpose(operand).map_err(at)
            }
            Expr::Indexed { name, index, .. } => {
                let place = self.eval_place(index, line)?;
                let value = self.read_variable(name, line)?;
                load(name, value, place).map_err(at)
            }
            Expr::Vector { elements, .. } => Ok(Value::Vector(self.eval_row(elements)?)),
            Expr::Matrix { rows, .. } => {
                let rows = rows
                    .iter()
                    .map(|row| self.eval_row(row))
                    .collect::<Result<Vec<_>, _>>()?;

                let columns = column_count(&rows);
                if let Some(ragged) = rows.iter().find(|row| row.len() != columns) {
                    return Err(at(ErrorImpl::RaggedMatrix {
                        expected: columns,
                        received: ragged.len(),
                    }));
                }
                Ok(Value::Matrix(rows))
            }
            Expr::Generator { kind, size, .. } if *size > MAX_GENERATOR_SIZE => {
                Err(at(ErrorImpl::GeneratorTooLarge {
                    generator: kind.to_string(),
                    size: *size,
                    limit: MAX_GENERATOR_SIZE,
                }))
            }
            Expr::Generator { kind, size, .. } => Ok(operations::generate(*kind, *size)),
        }
    }

    fn eval_row(&mut self, elements: &[Expr]) -> Result<Vec<Scalar>, Error> {
        elements
            .iter()
            .map(|element| {
                let value = self.eval_expr(element)?;
                value.as_scalar().ok_or_else(|| {
                    Error::new(
                        ErrorImpl::InvalidElement {
                            received: value.type_name(),
                        },
                        element.line(),
                    )
                })
            })
            .collect()
    }

    fn eval_place(&mut self, index: &Index, line: usize) -> Result<Place, Error> {
        Ok(match index {
            Index::Single(i) => Place::Slot(self.eval_index(i)?),
            Index::Double(i, j) => Place::Cell(self.eval_index(i)?, self.eval_index(j)?),
            Index::Slice { begin, end } => {
                let begin = begin.as_ref().map(|b| self.eval_index(b)).transpose()?;
                let end = end.as_ref().map(|e| self.eval_index(e)).transpose()?;
                tracing::trace!(?begin, ?end, line, "slice");
                Place::Range(begin, end)
            }
        })
    }

    fn eval_index(&mut self, expr: &Expr) -> Result<i64, Error> {
        match self.eval_expr(expr)? {
            Value::Int(index) => Ok(index),
            other => Err(Error::new(
                ErrorImpl::NonIntegerIndex {
                    received: other.type_name(),
                },
                expr.line(),
            )),
        }
    }
}

/// Runs `program` against a fresh global scope, printing to `out`.
#[tracing::instrument(skip_all)]
pub fn interpret<W: Write>(program: &Program, out: W) -> Result<W, Error> {
    let mut interpreter = Interpreter::new(out);
    interpreter.run(program)?;
    tracing::debug!(
        globals = interpreter.environment().global_scope().len(),
        "interpretation finished"
    );
    Ok(interpreter.into_output())
}

fn bounded(index: i64, length: usize) -> Result<usize, ErrorImpl> {
    usize::try_from(index)
        .ok()
        .filter(|i| *i < length)
        .ok_or(ErrorImpl::IndexOutOfBounds { index, length })
}

/// Resolves slice bounds, defaulting to the whole value. An inverted range
/// is empty.
fn range(begin: Option<i64>, end: Option<i64>, length: usize) -> Result<(usize, usize), ErrorImpl> {
    let resolve = |bound: Option<i64>, default: usize| match bound {
        None => Ok(default),
        Some(index) => usize::try_from(index)
            .ok()
            .filter(|i| *i <= length)
            .ok_or(ErrorImpl::IndexOutOfBounds { index, length }),
    };

    let begin = resolve(begin, 0)?;
    let end = resolve(end, length)?;
    Ok((begin, end.max(begin)))
}

fn wrong_index_count(name: &str, value: &Value, expected: usize, received: usize) -> ErrorImpl {
    ErrorImpl::WrongIndexCount {
        variable: name.to_string(),
        type_: value.type_name(),
        expected,
        received,
    }
}

fn not_indexable(name: &str, value: &Value) -> ErrorImpl {
    ErrorImpl::NotIndexable {
        variable: name.to_string(),
        type_: value.type_name(),
    }
}

fn load(name: &str, value: Value, place: Place) -> Result<Value, ErrorImpl> {
    match (place, value) {
        (Place::Range(..), _) => Err(ErrorImpl::SliceRead {
            variable: name.to_string(),
        }),
        (Place::Slot(i), Value::Vector(elements)) => {
            let i = bounded(i, elements.len())?;
            Ok(Value::from(elements[i]))
        }
        (Place::Slot(i), Value::Matrix(mut rows)) => {
            let i = bounded(i, rows.len())?;
            Ok(Value::Vector(rows.swap_remove(i)))
        }
        (Place::Cell(i, j), Value::Matrix(rows)) => {
            let i = bounded(i, rows.len())?;
            let j = bounded(j, rows[i].len())?;
            Ok(Value::from(rows[i][j]))
        }
        (Place::Cell(..), value @ Value::Vector(_)) => Err(wrong_index_count(name, &value, 1, 2)),
        (_, value) => Err(not_indexable(name, &value)),
    }
}

/// Writes `value` into `target` at `place`.
///
/// A vector slot or range takes a scalar. A matrix cell takes a scalar, a
/// matrix row or row range takes a vector with one element per column.
fn store(name: &str, target: &mut Value, place: Place, value: Value) -> Result<(), ErrorImpl> {
    let invalid = |target: String, expected: String, value: &Value| ErrorImpl::InvalidAssignment {
        target,
        expected,
        received: value.type_name(),
    };

    match (place, target) {
        (Place::Slot(i), Value::Vector(elements)) => {
            let i = bounded(i, elements.len())?;
            let scalar = value
                .as_scalar()
                .ok_or_else(|| invalid(format!("{}[{}]", name, i), "a number".into(), &value))?;
            elements[i] = scalar;
        }
        (Place::Range(begin, end), Value::Vector(elements)) => {
            let (begin, end) = range(begin, end, elements.len())?;
            let scalar = value.as_scalar().ok_or_else(|| {
                invalid(format!("{}[{}:{}]", name, begin, end), "a number".into(), &value)
            })?;
            elements[begin..end].fill(scalar);
        }
        (Place::Slot(i), Value::Matrix(rows)) => {
            let i = bounded(i, rows.len())?;
            let row = matrix_row(&value, column_count(rows)).ok_or_else(|| {
                invalid(
                    format!("{}[{}]", name, i),
                    format!("vector[{}]", column_count(rows)),
                    &value,
                )
            })?;
            rows[i] = row;
        }
        (Place::Range(begin, end), Value::Matrix(rows)) => {
            let (begin, end) = range(begin, end, rows.len())?;
            let columns = column_count(rows);
            let row = matrix_row(&value, columns).ok_or_else(|| {
                invalid(
                    format!("{}[{}:{}]", name, begin, end),
                    format!("vector[{}]", columns),
                    &value,
                )
            })?;
            rows[begin..end].fill(row);
        }
        (Place::Cell(i, j), Value::Matrix(rows)) => {
            let i = bounded(i, rows.len())?;
            let j = bounded(j, rows[i].len())?;
            let scalar = value.as_scalar().ok_or_else(|| {
                invalid(format!("{}[{}, {}]", name, i, j), "a number".into(), &value)
            })?;
            rows[i][j] = scalar;
        }
        (Place::Cell(..), target @ Value::Vector(_)) => {
            return Err(wrong_index_count(name, target, 1, 2))
        }
        (_, target) => return Err(not_indexable(name, target)),
    }

    Ok(())
}

fn matrix_row(value: &Value, columns: usize) -> Option<Vec<Scalar>> {
    match value {
        Value::Vector(elements) if elements.len() == columns => Some(elements.clone()),
        _ => None,
    }
}
