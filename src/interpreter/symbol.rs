/// User definitions.
///
/// Parses the header of a defined function or operator and holds its body
/// lines for the interpreter to run.
pub mod function;
/// System parameters.
///
/// Names, defaults and validation rules of `⎕IO`, `⎕PP`, `⎕CT`, `⎕RL` and
/// `⎕LX`.
pub mod system;
/// Scoped name bindings.
///
/// A table maps names to arrays, functions or labels, and optionally falls
/// back to a parent table for names it does not bind itself.
pub mod table;
