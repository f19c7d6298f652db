//! # aplite
//!
//! aplite is an interpreter for an APL-family array language written in Rust.
//! It tokenizes a line, recognizes the statement it forms and evaluates it by
//! stack reduction against nested arrays of characters and complex numbers,
//! with origin-configurable indexing and tolerant comparison.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{fs, path::Path};

use crate::{
    error::AplError,
    interpreter::{session::Session, value::array::Array},
};

/// Provides the error type of the interpreter.
///
/// This module defines the single error value raised by every stage:
/// tokenizing, recognizing and evaluating. It carries a kind, a message and,
/// when known, the offending line and the offset within it.
///
/// # Responsibilities
/// - Defines the flat taxonomy of error kinds.
/// - Renders errors as `KIND ERROR: message`, optionally with a caret line.
pub mod error;
/// Orchestrates the evaluation of source lines.
///
/// This module ties together the tokenizer, the recognizer, the evaluator,
/// the value model, the symbol table and the printer, and exposes the
/// session through which lines are evaluated.
///
/// # Responsibilities
/// - Coordinates every stage from characters to results.
/// - Provides entry points for evaluating and rendering.
/// - Manages the flow of values and errors between stages.
pub mod interpreter;
/// General utilities for safe numeric conversion.
///
/// Shapes and indices are `usize` while array items are `f64` pairs; these
/// helpers convert between the two without silent loss.
pub mod util;

/// Extension of aplite source files.
pub const SOURCE_EXTENSION: &str = "apl";

/// Evaluates `source` in a fresh session and returns the last value it
/// produced.
///
/// Statements are separated by `⋄` or by newlines.
///
/// # Errors
/// Returns the first error raised by any statement.
///
/// # Examples
/// ```
/// use aplite::{get_result, interpreter::value::array::Array};
///
/// let result = get_result("X←2 3\nX×10").unwrap();
/// assert_eq!(result, Some(Array::numbers([20.0, 30.0])));
///
/// // Y is never assigned.
/// assert!(get_result("Y+1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Option<Array>, AplError> {
    let mut session = Session::new();
    let outcomes = session.execute(source)?;
    Ok(outcomes.iter().rev().find_map(|outcome| outcome.value().cloned()))
}

/// Reads an aplite source file and returns its statements, one per line.
///
/// Blank lines are dropped and the rest are joined with newlines, which the
/// tokenizer treats as statement separators.
///
/// # Errors
/// Returns a `DomainError` for a file without the `.apl` extension or one
/// that cannot be read as UTF-8 text.
pub fn load_source(path: &Path) -> Result<String, AplError> {
    if path.extension().and_then(|extension| extension.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(AplError::domain("Not an APL source file."));
    }
    let text = fs::read_to_string(path).map_err(|e| {
                                           AplError::domain(format!("Failed to read '{}': {e}.", path.display()))
                                       })?;
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    Ok(lines.join("\n"))
}
