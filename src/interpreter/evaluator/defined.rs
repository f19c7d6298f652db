use tracing::debug;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::{Context, EvalResult, Outcome},
        lexer::glyphs::{is_letter, is_name_char},
        symbol::{
            function::DefinedFunction,
            table::{Callable, SymbolTable, SymbolValue},
        },
        value::array::Array,
    },
};

/// Deepest nesting of defined function calls.
pub const MAX_CALL_DEPTH: usize = 100;

/// Runs a defined function with its arguments.
///
/// The arguments, result and locals of the header are bound in a fresh scope
/// on top of the caller's. The function returns the value of its result name
/// when it leaves, or nothing if it has no result.
///
/// # Errors
/// Returns a `SyntaxError` when the arguments do not fit the header and any
/// error raised by a body line.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, defined::call},
///     symbol::{function::DefinedFunction, table::SymbolTable},
///     value::array::Array,
/// };
///
/// let square = DefinedFunction::parse(&["R←SQUARE X", "R←X×X"]).unwrap();
/// let mut symbols = SymbolTable::workspace();
/// let mut ctx = Context::new(&mut symbols);
/// let result = call(&mut ctx, &square, None, Some(Array::numbers([2.0, 3.0]))).unwrap();
/// assert_eq!(result, Some(Array::numbers([4.0, 9.0])));
/// ```
pub fn call(ctx: &mut Context<'_, '_>,
            function: &DefinedFunction,
            left: Option<Array>,
            right: Option<Array>)
            -> EvalResult<Option<Array>> {
    let header = &function.header;
    if header.right.is_none() && right.is_some() {
        return Err(AplError::syntax("Function cannot be used monadically."));
    }
    if header.right.is_some() && right.is_none() {
        return Err(AplError::syntax("Function needs an argument."));
    }
    if header.left.is_none() && left.is_some() {
        return Err(AplError::syntax("Function cannot be used dyadically."));
    }

    let mut bindings = Vec::new();
    if let (Some(name), Some(left)) = (&header.left, left) {
        bindings.push((name.as_str(), SymbolValue::Array(left)));
    }
    if let (Some(name), Some(right)) = (&header.right, right) {
        bindings.push((name.as_str(), SymbolValue::Array(right)));
    }
    run(ctx, function, bindings)
}

/// Runs a defined operator with its operands and arguments.
///
/// The operands are bound as functions under the names the header gives
/// them.
///
/// # Errors
/// As [`call`].
pub fn call_operator(ctx: &mut Context<'_, '_>,
                     operator: &DefinedFunction,
                     left_operand: &Callable,
                     right_operand: Option<&Callable>,
                     left: Option<Array>,
                     right: Array)
                     -> EvalResult<Option<Array>> {
    let header = &operator.header;
    if header.right_operand.is_some() != right_operand.is_some() {
        return Err(AplError::syntax("Operator takes a different number of operands."));
    }
    if header.left.is_none() && left.is_some() {
        return Err(AplError::syntax("Function cannot be used dyadically."));
    }

    let mut bindings = Vec::new();
    if let Some(name) = &header.left_operand {
        bindings.push((name.as_str(), SymbolValue::Function(left_operand.clone())));
    }
    if let (Some(name), Some(operand)) = (&header.right_operand, right_operand) {
        bindings.push((name.as_str(), SymbolValue::Function(operand.clone())));
    }
    if let (Some(name), Some(left)) = (&header.left, left) {
        bindings.push((name.as_str(), SymbolValue::Array(left)));
    }
    if let Some(name) = &header.right {
        bindings.push((name.as_str(), SymbolValue::Array(right)));
    }
    run(ctx, operator, bindings)
}

/// Splits a leading `NAME:` label off a body line.
///
/// # Example
/// ```
/// use aplite::interpreter::evaluator::defined::split_label;
///
/// assert_eq!(split_label("LOOP: I←I+1"), (Some("LOOP"), " I←I+1"));
/// assert_eq!(split_label("X←'A:B'"), (None, "X←'A:B'"));
/// ```
#[must_use]
pub fn split_label(line: &str) -> (Option<&str>, &str) {
    let trimmed = line.trim_start();
    if let Some((label, rest)) = trimmed.split_once(':') {
        let mut chars = label.chars();
        if chars.next().is_some_and(is_letter) && chars.all(is_name_char) {
            return (Some(label), rest);
        }
    }
    (None, line)
}

/// Executes the body of `function` in a new scope holding `bindings`.
fn run(ctx: &mut Context<'_, '_>,
       function: &DefinedFunction,
       bindings: Vec<(&str, SymbolValue)>)
       -> EvalResult<Option<Array>> {
    let depth = ctx.symbols.depth() + 1;
    if depth > MAX_CALL_DEPTH {
        return Err(AplError::limit("Too many nested function calls."));
    }

    let forms = ctx.forms;
    let mut frame = SymbolTable::child_of(&*ctx.symbols);
    for (name, value) in bindings {
        frame.bind(name, value);
    }
    let mut lines = Vec::with_capacity(function.body.len());
    for (number, line) in function.body.iter().enumerate() {
        let (label, statement) = split_label(line);
        if let Some(label) = label {
            frame.bind(label, SymbolValue::Label(number + 1));
        }
        lines.push(statement);
    }

    debug!(function = function.name(), depth, "enter");
    let mut inner = Context { symbols: &mut frame,
                              forms };
    let mut counter = 0;
    while let Some(line) = lines.get(counter) {
        let outcomes = inner.execute_line(line)?;
        counter = match outcomes.last() {
            Some(Outcome::Escape) => break,
            Some(Outcome::Branch(targets)) => match targets.first() {
                None => counter + 1,
                Some(target) => {
                    let target = target.to_integer()
                                       .ok_or_else(|| AplError::domain("Branch target must be an integer."))?;
                    match usize::try_from(target) {
                        Ok(line) if (1..=lines.len()).contains(&line) => line - 1,
                        _ => break,
                    }
                },
            },
            _ => counter + 1,
        };
    }
    debug!(function = function.name(), depth, "leave");

    let result = function.header
                         .result
                         .as_deref()
                         .and_then(|name| match frame.lookup_local(name) {
                             Some(SymbolValue::Array(array)) => Some(array.clone()),
                             _ => None,
                         });
    Ok(result)
}
