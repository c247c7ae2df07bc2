//! Error types shared by every phase of the pipeline.
//!
//! A single [`errors::Error`] carries an [`errors::ErrorImpl`] and the source
//! line it was raised on. The lexer and parser produce syntax errors, the
//! type checker accumulates semantic errors, and the interpreter raises
//! runtime errors with the same type so the driver reports them uniformly.

pub mod errors;
