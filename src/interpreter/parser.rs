/// The recognizer's cursor and undo log.
///
/// Holds the token slice being recognized, the position of the next token
/// and a log of every class change, so that a failed rule can restore the
/// slice exactly as it found it.
pub mod core;

/// Grammar rules of a statement.
///
/// Each rule either consumes and retags the tokens it matches or leaves the
/// recognizer untouched.
pub mod rules;

/// Semantic binding of names and materialization of literals.
///
/// Runs before recognition. Names take the class of their current binding,
/// distinguished names are classified by probing the form table, and literal
/// text becomes array values.
pub mod convert;
