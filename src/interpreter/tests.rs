//! Unit tests for the interpreter. Programs are parsed but not type checked,
//! so runtime errors can be exercised directly.

use crate::{
    ast::expressions::{ArithOp, BinaryOp, Generator, RelOp},
    errors::errors::ErrorImpl,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

use super::{
    interpreter::{interpret, Interpreter},
    operations,
    value::{Scalar, Value},
};

fn run(source: &str) -> Result<String, ErrorImpl> {
    let program = parse(tokenize(source).unwrap()).unwrap();
    interpret(&program, Vec::new())
        .map(|out| String::from_utf8(out).unwrap())
        .map_err(|error| error.get_impl().clone())
}

fn output(source: &str) -> String {
    run(source).unwrap()
}

fn ints(values: &[i64]) -> Vec<Scalar> {
    values.iter().map(|value| Scalar::Int(*value)).collect()
}

fn matrix(rows: &[&[i64]]) -> Value {
    Value::Matrix(rows.iter().map(|row| ints(row)).collect())
}

#[test]
fn test_print_joins_with_spaces() {
    assert_eq!(output("print 1, 2.5, \"text\";"), "1 2.5 text\n");
}

#[test]
fn test_print_textual_forms() {
    assert_eq!(output("print 2.0, [1, 2], [[1, 2], [3, 4]];"), "2.0 [1, 2] [[1, 2], [3, 4]]\n");
}

#[test]
fn test_integer_arithmetic_stays_integral() {
    assert_eq!(output("print 2 + 3 * 4, 7 - 10;"), "14 -3\n");
}

#[test]
fn test_mixed_arithmetic_promotes() {
    assert_eq!(output("print 1 + 0.5, 3 / 2;"), "1.5 1.5\n");
}

#[test]
fn test_division_by_zero_is_infinity() {
    assert_eq!(output("print 1 / 0, -4 / 0, 2.5 / 0.0, 1 ./ 0;"), "inf inf inf inf\n");
}

#[test]
fn test_integer_overflow_is_an_error() {
    let error = run("x = 9223372036854775807; x += 1;").unwrap_err();
    assert!(matches!(error, ErrorImpl::IntegerOverflow { .. }));
}

#[test]
fn test_unbound_variable() {
    assert_eq!(
        run("print y;").unwrap_err(),
        ErrorImpl::VariableNotDeclared {
            variable: String::from("y")
        }
    );
}

#[test]
fn test_block_scope_is_released() {
    let program = parse(tokenize("x = 1; { y = 2; x = 3; }").unwrap()).unwrap();
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.run(&program).unwrap();

    assert_eq!(interpreter.lookup("x"), Some(&Value::Int(3)));
    assert_eq!(interpreter.lookup("y"), None);
    assert_eq!(interpreter.environment().depth(), 1);
}

#[test]
fn test_if_else() {
    assert_eq!(output("x = 3; if (x > 2) print 1; else print 2;"), "1\n");
    assert_eq!(output("x = 1; if (x > 2) print 1; else print 2;"), "2\n");
    assert_eq!(output("if (\"a\" == \"a\") print \"same\";"), "same\n");
}

#[test]
fn test_while_with_break_and_continue() {
    let source = "
        i = 0;
        while (i < 10) {
            i += 1;
            if (i == 2) continue;
            if (i == 4) break;
            print i;
        }
        print i;
    ";
    assert_eq!(output(source), "1\n3\n4\n");
}

#[test]
fn test_for_prints_range() {
    assert_eq!(output("for i = 0:3 print i;"), "0\n1\n2\n");
}

#[test]
fn test_for_observes_body_writes() {
    // the body and the loop each add one
    assert_eq!(output("for i = 0:6 { print i; i = i + 1; }"), "0\n2\n4\n");
}

#[test]
fn test_for_break_releases_scope() {
    let program = parse(tokenize("for i = 0:5 { if (i == 2) break; print i; }").unwrap()).unwrap();
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.run(&program).unwrap();

    assert_eq!(interpreter.environment().depth(), 1);
    assert_eq!(interpreter.lookup("i"), None);
    assert_eq!(String::from_utf8(interpreter.into_output()).unwrap(), "0\n1\n");
}

#[test]
fn test_for_variable_shadows_outer() {
    assert_eq!(output("i = 10; for i = 0:2 print i; print i;"), "0\n1\n10\n");
}

#[test]
fn test_return_ends_enclosing_block() {
    assert_eq!(output("{ print 1; return 0; print 2; } print 3;"), "1\n3\n");
}

#[test]
fn test_top_level_return_ends_program() {
    assert_eq!(output("print 1; return 5; print 2;"), "1\n");
}

#[test]
fn test_return_propagates_out_of_loop() {
    assert_eq!(output("while (1 < 2) return 0; print 1;"), "");
}

#[test]
fn test_compound_assignment() {
    assert_eq!(output("x = 2; x *= 3; x -= 1; x /= 2; print x;"), "2.5\n");
    assert_eq!(output("v = [1, 2]; v += [10, 20]; print v;"), "[11, 22]\n");
}

#[test]
fn test_compound_assignment_rejects_shape_mismatch() {
    let error = run("v = [1, 2]; v += [1, 2, 3];").unwrap_err();
    assert!(matches!(error, ErrorImpl::OperandMismatch { .. }));
}

#[test]
fn test_indexed_reads() {
    assert_eq!(output("v = [4, 5, 6]; print v[1];"), "5\n");
    assert_eq!(output("M = [[1, 2], [3, 4]]; print M[1], M[0, 1];"), "[3, 4] 2\n");
}

#[test]
fn test_slice_read_is_rejected() {
    assert_eq!(
        run("v = [1, 2, 3]; x = v[0:2];").unwrap_err(),
        ErrorImpl::SliceRead {
            variable: String::from("v")
        }
    );
}

#[test]
fn test_index_out_of_bounds() {
    assert_eq!(
        run("v = [1, 2]; print v[2];").unwrap_err(),
        ErrorImpl::IndexOutOfBounds {
            index: 2,
            length: 2
        }
    );
    assert!(matches!(
        run("v = [1, 2]; v[-1] = 0;").unwrap_err(),
        ErrorImpl::IndexOutOfBounds { index: -1, .. }
    ));
}

#[test]
fn test_non_integer_index() {
    assert!(matches!(
        run("v = [1, 2]; print v[0.5];").unwrap_err(),
        ErrorImpl::NonIntegerIndex { .. }
    ));
}

#[test]
fn test_cell_and_row_assignment() {
    let source = "
        M = zeros(2);
        M[0, 1] = 5;
        M[1] = [7, 8];
        print M;
    ";
    assert_eq!(output(source), "[[0.0, 5], [7, 8]]\n");
}

#[test]
fn test_slice_assignment_on_matrix() {
    let source = "
        M = [[0, 0], [0, 0], [0, 0], [0, 0]];
        M[1:3] = [1, 2];
        print M;
    ";
    assert_eq!(output(source), "[[0, 0], [1, 2], [1, 2], [0, 0]]\n");
}

#[test]
fn test_open_slices_on_vector() {
    assert_eq!(output("v = [1, 2, 3, 4]; v[:2] = 0; print v;"), "[0, 0, 3, 4]\n");
    assert_eq!(output("v = [1, 2, 3, 4]; v[2:] = 9; print v;"), "[1, 2, 9, 9]\n");
}

#[test]
fn test_row_assignment_needs_matching_vector() {
    let error = run("M = eye(2); M[0] = [1, 2, 3];").unwrap_err();
    assert!(matches!(error, ErrorImpl::InvalidAssignment { .. }));
}

#[test]
fn test_double_index_on_vector() {
    let error = run("v = [1, 2]; print v[0, 0];").unwrap_err();
    assert!(matches!(error, ErrorImpl::WrongIndexCount { expected: 1, received: 2, .. }));
}

#[test]
fn test_scalar_is_not_indexable() {
    let error = run("x = 1; print x[0];").unwrap_err();
    assert!(matches!(error, ErrorImpl::NotIndexable { .. }));
}

#[test]
fn test_broadcast_vector_over_matrix() {
    let result = operations::binary(
        BinaryOp::DotAdd,
        Value::Vector(ints(&[1, 2])),
        matrix(&[&[0, 0], &[0, 0]]),
    )
    .unwrap();

    assert_eq!(result, matrix(&[&[1, 1], &[2, 2]]));
}

#[test]
fn test_dot_star_is_matrix_multiplication() {
    let left = matrix(&[&[1, 2], &[3, 4]]);
    let right = matrix(&[&[5, 6], &[7, 8]]);

    let result = operations::binary(BinaryOp::DotMul, left, right).unwrap();
    assert_eq!(result, matrix(&[&[19, 22], &[43, 50]]));
}

#[test]
fn test_dot_star_on_vectors_is_elementwise() {
    let result = operations::binary(
        BinaryOp::DotMul,
        Value::Vector(ints(&[1, 2, 3])),
        Value::Vector(ints(&[4, 5, 6])),
    )
    .unwrap();

    assert_eq!(result, Value::Vector(ints(&[4, 10, 18])));
}

#[test]
fn test_matrix_multiplication_inner_dimension() {
    let left = matrix(&[&[1, 2, 3]]);
    let right = matrix(&[&[1, 2, 3]]);

    let error = operations::binary(BinaryOp::DotMul, left, right).unwrap_err();
    assert!(matches!(error, ErrorImpl::OperandMismatch { .. }));
}

#[test]
fn test_identity_times_matrix() {
    let m = Value::Matrix(vec![
        vec![Scalar::Float(1.5), Scalar::Float(2.0)],
        vec![Scalar::Float(-3.0), Scalar::Float(4.25)],
    ]);

    let result =
        operations::binary(BinaryOp::DotMul, operations::generate(Generator::Eye, 2), m.clone())
            .unwrap();
    assert_eq!(result, m);
}

#[test]
fn test_plain_operators_reject_vectors() {
    let error = operations::binary(
        BinaryOp::Add,
        Value::Vector(ints(&[1])),
        Value::Vector(ints(&[1])),
    )
    .unwrap_err();

    assert!(matches!(error, ErrorImpl::OperandMismatch { .. }));
}

#[test]
fn test_scalar_against_matrix_is_rejected() {
    let error =
        operations::binary(BinaryOp::DotAdd, Value::Int(1), matrix(&[&[1]])).unwrap_err();
    assert!(matches!(error, ErrorImpl::OperandMismatch { .. }));
}

#[test]
fn test_transpose_is_involutive() {
    let m = matrix(&[&[1, 2, 3], &[4, 5, 6]]);

    let once = operations::transpose(m.clone()).unwrap();
    assert_eq!(once, matrix(&[&[1, 4], &[2, 5], &[3, 6]]));
    assert_eq!(operations::transpose(once).unwrap(), m);
}

#[test]
fn test_transpose_vector_is_column() {
    let result = operations::transpose(Value::Vector(ints(&[1, 2]))).unwrap();
    assert_eq!(result, matrix(&[&[1], &[2]]));
    assert!(operations::transpose(Value::Int(1)).is_err());
}

#[test]
fn test_negate() {
    assert_eq!(
        operations::negate(matrix(&[&[1, -2]])).unwrap(),
        matrix(&[&[-1, 2]])
    );
    assert!(operations::negate(Value::Str(String::from("a"))).is_err());
}

#[test]
fn test_compare() {
    assert!(operations::compare(RelOp::Less, &Value::Int(1), &Value::Float(1.5)).unwrap());
    assert!(operations::compare(RelOp::GreaterEquals, &Value::Int(2), &Value::Int(2)).unwrap());
    assert!(!operations::compare(RelOp::Equals, &Value::Float(f64::NAN), &Value::Float(f64::NAN)).unwrap());
    assert!(operations::compare(RelOp::Less, &Value::Int(1), &Value::Vector(vec![])).is_err());
}

#[test]
fn test_compound_has_no_broadcasting() {
    let error = operations::compound(
        ArithOp::Add,
        matrix(&[&[1, 1], &[1, 1]]),
        Value::Vector(ints(&[1, 1])),
    )
    .unwrap_err();
    assert!(matches!(error, ErrorImpl::OperandMismatch { .. }));

    let product = operations::compound(
        ArithOp::Mul,
        matrix(&[&[1, 2], &[3, 4]]),
        matrix(&[&[1, 2], &[3, 4]]),
    )
    .unwrap();
    assert_eq!(product, matrix(&[&[1, 4], &[9, 16]]));
}

#[test]
fn test_dotted_operators_in_programs() {
    let source = "
        A = [[1, 2], [3, 4]];
        print [1, 2] .+ [3, 4];
        print A .- [[1, 1], [1, 1]];
        print A ./ [[1, 1], [2, 2]];
        print A .* A;
    ";
    assert_eq!(
        output(source),
        "[4, 6]\n[[0, 1], [2, 3]]\n[[1.0, 2.0], [1.5, 2.0]]\n[[7, 10], [15, 22]]\n"
    );
}

#[test]
fn test_empty_generator_transposes_to_itself() {
    assert_eq!(output("A = zeros(0); print A'', A;"), "[] []\n");
}

#[test]
fn test_generator_size_is_capped() {
    assert_eq!(
        run("print zeros(4000000000);").unwrap_err(),
        ErrorImpl::GeneratorTooLarge {
            generator: String::from("zeros"),
            size: 4000000000,
            limit: 1024,
        }
    );
}

#[test]
fn test_generators() {
    let eye = operations::generate(Generator::Eye, 2);
    assert_eq!(eye.to_string(), "[[1.0, 0.0], [0.0, 1.0]]");
    assert_eq!(operations::generate(Generator::Ones, 1).to_string(), "[[1.0]]");
    assert_eq!(operations::generate(Generator::Zeros, 0), Value::Matrix(vec![]));
}

#[test]
fn test_ragged_matrix_literal() {
    assert_eq!(
        run("M = [[1, 2], [3]];").unwrap_err(),
        ErrorImpl::RaggedMatrix {
            expected: 2,
            received: 1
        }
    );
}
