//! Scoped name bindings.
//!
//! The same chain of scopes backs both passes: the type checker stores
//! [`crate::type_checker::symbols::Symbol`]s in it and the interpreter stores
//! runtime [`crate::interpreter::value::Value`]s. Each pass owns its own
//! instance.

pub mod environment;
