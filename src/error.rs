/// Error classification.
///
/// Defines the flat taxonomy of failures the interpreter can report. Every
/// failure belongs to exactly one kind, and the kind decides the heading the
/// printer shows (for example `DOMAIN ERROR`).
pub mod kind;
/// The structured error value.
///
/// Carries the kind, a human readable message, and optionally the character
/// offset into the offending line together with the line itself so that a
/// caret can be drawn under the failure position.
pub mod apl_error;

pub use apl_error::AplError;
pub use kind::ErrorKind;
