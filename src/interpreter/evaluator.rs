/// The evaluation context and function application.
///
/// Holds the result and outcome types, runs lines and statements, and
/// dispatches function and operator applications through the form table.
pub mod core;

/// The registry of function forms.
///
/// Maps the shape of an application (valence, axis, operator and the
/// identity of each glyph or distinguished name) to the code implementing
/// it.
pub mod form_table;

/// The phrase table driving statement reduction.
pub mod phrase;

/// Stack reduction of a recognized statement.
///
/// Shifts tokens from the right end of a statement onto a stack and reduces
/// the phrases that appear at its front until one outcome is left.
pub mod reduce;

/// Scalar functions.
///
/// Arithmetic, comparison and boolean functions on simple items. The form
/// table extends them across arrays.
pub mod scalar;

/// Structural functions.
///
/// Functions that rearrange, select or describe the items of an array
/// without looking inside them.
pub mod structural;

/// Bracket indexing and indexed assignment.
pub mod indexing;

/// Primitive operators.
///
/// Reduction, scan, each, commute, the inner and outer products, and the
/// composition operators.
pub mod operators;

/// System variables and system functions.
pub mod system;

/// Calls of defined functions and operators.
///
/// Each call runs the body line by line in its own scope, following
/// branches until it leaves.
pub mod defined;

/// Helpers shared by the primitive functions.
///
/// Axis resolution, shape arithmetic and conversions between items and
/// counts.
pub mod utils;
