//! Static checking of a parsed program.
//!
//! A single pre-order walk infers the type and shape of every expression
//! and records the type of each name on its first assignment. Errors are
//! collected rather than raised, so one run reports every problem it can
//! find:
//!
//! - Re-assignments must stay compatible with the recorded type
//! - Operators must receive operands of matching shapes
//! - Literal indices must be in bounds, and slices are only assignment targets
//! - `break` and `continue` must appear inside a loop body

pub mod symbols;
pub mod type_checker;
