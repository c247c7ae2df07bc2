//! Unit tests for the parser module.
//!
//! This module contains tests for parsing:
//! - Assignments and compound assignments
//! - Operator precedence and associativity
//! - Vector, matrix and generator literals
//! - Indexing and slicing
//! - Control flow statements
//! - Syntax errors and their line numbers

use super::parser::parse;
use crate::{
    ast::{
        ast::Program,
        expressions::{ArithOp, BinaryOp, Expr, Generator, Index, RelOp},
        statements::{AssignTarget, Stmt},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Program, Error> {
    parse(tokenize(source).unwrap())
}

fn single_stmt(source: &str) -> Stmt {
    let program = parse_source(source).unwrap();
    assert_eq!(program.body.len(), 1);
    program.body.into_iter().next().unwrap()
}

/// Right-hand side of `x = ...;`.
fn assigned_expr(expr_source: &str) -> Expr {
    match single_stmt(&format!("x = {};", expr_source)) {
        Stmt::Assign { value, .. } => value,
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn int(value: i64) -> Box<Expr> {
    Box::new(Expr::Int { value, line: 1 })
}

fn var(name: &str) -> Box<Expr> {
    Box::new(Expr::Variable {
        name: name.to_string(),
        line: 1,
    })
}

#[test]
fn test_parse_empty_program() {
    assert!(parse_source("").unwrap().is_empty());
    assert!(parse_source("# only a comment\n").unwrap().is_empty());
}

#[test]
fn test_parse_assignment() {
    assert_eq!(
        single_stmt("x = 42;"),
        Stmt::Assign {
            target: AssignTarget::Name(String::from("x")),
            value: Expr::Int { value: 42, line: 1 },
            line: 1,
        }
    );
}

#[test]
fn test_parse_compound_assignment() {
    for (source, expected) in [
        ("x += 1;", ArithOp::Add),
        ("x -= 1;", ArithOp::Sub),
        ("x *= 1;", ArithOp::Mul),
        ("x /= 1;", ArithOp::Div),
    ] {
        match single_stmt(source) {
            Stmt::CompoundAssign { name, op, .. } => {
                assert_eq!(name, "x");
                assert_eq!(op, expected);
            }
            other => panic!("expected a compound assignment, got {:?}", other),
        }
    }
}

#[test]
fn test_compound_assignment_rejects_indexed_target() {
    let error = parse_source("v[0] += 1;").unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        assigned_expr("1 + 2 * 3"),
        Expr::Binary {
            op: BinaryOp::Add,
            left: int(1),
            right: Box::new(Expr::Binary {
                op: BinaryOp::Mul,
                left: int(2),
                right: int(3),
                line: 1,
            }),
            line: 1,
        }
    );
}

#[test]
fn test_binary_operators_are_left_associative() {
    assert_eq!(
        assigned_expr("1 - 2 - 3"),
        Expr::Binary {
            op: BinaryOp::Sub,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Sub,
                left: int(1),
                right: int(2),
                line: 1,
            }),
            right: int(3),
            line: 1,
        }
    );
}

#[test]
fn test_dotted_precedence() {
    // .* binds tighter than .+
    assert_eq!(
        assigned_expr("a .+ b .* c"),
        Expr::Binary {
            op: BinaryOp::DotAdd,
            left: var("a"),
            right: Box::new(Expr::Binary {
                op: BinaryOp::DotMul,
                left: var("b"),
                right: var("c"),
                line: 1,
            }),
            line: 1,
        }
    );

    // .+ binds tighter than +
    assert_eq!(
        assigned_expr("a + b .+ c"),
        Expr::Binary {
            op: BinaryOp::Add,
            left: var("a"),
            right: Box::new(Expr::Binary {
                op: BinaryOp::DotAdd,
                left: var("b"),
                right: var("c"),
                line: 1,
            }),
            line: 1,
        }
    );
}

#[test]
fn test_transpose_binds_tighter_than_negation() {
    assert_eq!(
        assigned_expr("-A'"),
        Expr::Negate {
            operand: Box::new(Expr::Transpose {
                operand: var("A"),
                line: 1,
            }),
            line: 1,
        }
    );
}

#[test]
fn test_negation_binds_tighter_than_multiplication() {
    assert_eq!(
        assigned_expr("-a * b"),
        Expr::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Expr::Negate {
                operand: var("a"),
                line: 1,
            }),
            right: var("b"),
            line: 1,
        }
    );
}

#[test]
fn test_grouping() {
    assert_eq!(
        assigned_expr("(1 + 2) * 3"),
        Expr::Binary {
            op: BinaryOp::Mul,
            left: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                left: int(1),
                right: int(2),
                line: 1,
            }),
            right: int(3),
            line: 1,
        }
    );
}

#[test]
fn test_parse_vector_and_matrix_literals() {
    assert_eq!(
        assigned_expr("[1, 2]"),
        Expr::Vector {
            elements: vec![*int(1), *int(2)],
            line: 1,
        }
    );
    assert_eq!(
        assigned_expr("[[1, 2], [3, 4]]"),
        Expr::Matrix {
            rows: vec![vec![*int(1), *int(2)], vec![*int(3), *int(4)]],
            line: 1,
        }
    );
}

#[test]
fn test_parse_generators() {
    assert_eq!(
        assigned_expr("eye(3)"),
        Expr::Generator {
            kind: Generator::Eye,
            size: 3,
            line: 1,
        }
    );

    let error = parse_source("x = zeros(n);").unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_parse_index_forms() {
    let index_of = |source: &str| match assigned_expr(source) {
        Expr::Indexed { index, .. } => index,
        other => panic!("expected an indexed reference, got {:?}", other),
    };

    assert_eq!(index_of("A[1]"), Index::Single(int(1)));
    assert_eq!(index_of("A[1, 2]"), Index::Double(int(1), int(2)));
    assert_eq!(
        index_of("A[1:3]"),
        Index::Slice {
            begin: Some(int(1)),
            end: Some(int(3)),
        }
    );
    assert_eq!(
        index_of("A[:3]"),
        Index::Slice {
            begin: None,
            end: Some(int(3)),
        }
    );
    assert_eq!(
        index_of("A[1:]"),
        Index::Slice {
            begin: Some(int(1)),
            end: None,
        }
    );
}

#[test]
fn test_empty_slice_is_rejected() {
    assert!(parse_source("A[:] = 1;").is_err());
}

#[test]
fn test_empty_literals_are_rejected() {
    for source in ["x = [];", "x = [[]];", "x = [[1], []];"] {
        match parse_source(source).unwrap_err().get_impl() {
            ErrorImpl::UnexpectedTokenDetailed { token, .. } => assert_eq!(token, "]"),
            other => panic!("unexpected error for {}: {:?}", source, other),
        }
    }
}

#[test]
fn test_parse_indexed_assignment() {
    match single_stmt("M[1:3] = [1, 2];") {
        Stmt::Assign {
            target: AssignTarget::Indexed { name, index },
            ..
        } => {
            assert_eq!(name, "M");
            assert!(matches!(index, Index::Slice { .. }));
        }
        other => panic!("expected an indexed assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else() {
    match single_stmt("if (x <= 1) print 1; else { print 2; }") {
        Stmt::If {
            condition,
            then_body,
            else_body,
            ..
        } => {
            assert_eq!(condition.op, RelOp::LessEquals);
            assert!(matches!(*then_body, Stmt::Print { .. }));
            assert!(matches!(else_body.as_deref(), Some(Stmt::Block { .. })));
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    match single_stmt("if (a < 1) if (b < 1) print 1; else print 2;") {
        Stmt::If {
            then_body,
            else_body,
            ..
        } => {
            assert!(else_body.is_none());
            assert!(matches!(*then_body, Stmt::If { else_body: Some(_), .. }));
        }
        other => panic!("expected an if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let stmt = single_stmt("while (x != 0) { x -= 1; if (x == 3) break; continue; }");
    assert!(matches!(stmt, Stmt::While { .. }));
}

#[test]
fn test_parse_for_loop() {
    match single_stmt("for i = 0:n print i;") {
        Stmt::For {
            variable,
            begin,
            end,
            ..
        } => {
            assert_eq!(variable, "i");
            assert_eq!(begin, *int(0));
            assert_eq!(end, *var("n"));
        }
        other => panic!("expected a for loop, got {:?}", other),
    }
}

#[test]
fn test_parse_print_list() {
    match single_stmt("print 1, \"a\", x;") {
        Stmt::Print { values, .. } => assert_eq!(values.len(), 3),
        other => panic!("expected a print statement, got {:?}", other),
    }
}

#[test]
fn test_comparison_is_not_an_expression() {
    assert!(parse_source("x = 1 < 2;").is_err());
}

#[test]
fn test_condition_requires_comparison() {
    let error = parse_source("if (x) print 1;").unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_missing_semicolon_reports_line() {
    let error = parse_source("x = 1;\ny = 2\nprint y;").unwrap_err();
    assert_eq!(error.get_line(), 3);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnexpectedToken {
            token: String::from("print")
        }
    );
}

#[test]
fn test_unclosed_block() {
    let error = parse_source("{ x = 1;").unwrap_err();
    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedTokenDetailed { .. }));
}

#[test]
fn test_statement_lines() {
    let program = parse_source("x = 1;\n\nprint x;\n").unwrap();
    let lines: Vec<usize> = program.iter().map(Stmt::line).collect();
    assert_eq!(lines, vec![1, 3]);
}
