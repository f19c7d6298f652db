/// The evaluator reduces recognized statements to results.
///
/// A statement is reduced by shifting its tokens right to left onto a stack
/// and matching phrase patterns against the front of that stack. Each matched
/// phrase is evaluated on the spot, with functions and operators dispatched
/// through the form table.
///
/// # Responsibilities
/// - Runs lines statement by statement and reports each outcome.
/// - Implements the primitive functions, operators and system names.
/// - Calls defined functions in scopes of their own.
pub mod evaluator;
/// The lexer splits a line into lexical tokens.
///
/// The tokenizer is a recursive-descent grammar over the characters of one
/// line, with a cursor that every failing rule rewinds exactly. It produces
/// names, distinguished names, literals, glyphs and statement separators;
/// blanks and comments produce nothing.
///
/// # Responsibilities
/// - Recognizes every token of the language's character set.
/// - Keeps literal text raw for the converter.
/// - Reports unrecognized characters and malformed literals with their
///   offset.
pub mod lexer;
/// The parser validates and classifies the tokens of a statement.
///
/// Conversion binds names through the symbol table and turns literals into
/// arrays. Recognition then checks the statement against the grammar and
/// retags every glyph with its syntactic role.
pub mod parser;
/// Rendering of arrays for display.
pub mod printer;
/// A session owning the workspace.
///
/// Entry point for embedding: evaluate lines, render results and define
/// functions.
pub mod session;
/// Name bindings, system parameters and defined functions.
pub mod symbol;
/// Tokens and their classes.
///
/// A token carries a class and optional content. The class records how far
/// the token has come: lexical, syntactic, semantic or a value produced
/// during reduction.
pub mod token;
/// The value module defines the runtime data of the language.
///
/// Every value is an array of characters, complex numbers and nested arrays.
///
/// # Responsibilities
/// - Enforces the shape invariant of arrays.
/// - Implements complex arithmetic and tolerant comparison.
/// - Extends scalar functions across arrays.
pub mod value;
