use std::rc::Rc;

use chrono::{Datelike, Local, Timelike};
use tracing::info;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::{core::{Context, EvalResult}, form_table::Axis},
        lexer::glyphs::{atomic_vector as glyph_set, is_letter, is_name_char},
        symbol::{
            function::DefinedFunction,
            system::SystemParameter,
            table::{Callable, SymbolKind, SymbolValue},
        },
        value::array::{Array, Element},
    },
};

/// Validates `value` for `parameter` and binds it in the current scope.
fn assign_parameter(ctx: &mut Context<'_, '_>, parameter: SystemParameter, value: Array) -> EvalResult<Array> {
    let value = parameter.validate(value)?;
    info!(name = parameter.name(), ?value, "system parameter set");
    ctx.symbols.bind(parameter.name(), SymbolValue::Array(value.clone()));
    Ok(value)
}

/// `⎕IO←B`
pub fn assign_index_origin(ctx: &mut Context<'_, '_>, value: Array) -> EvalResult<Array> {
    assign_parameter(ctx, SystemParameter::IndexOrigin, value)
}

/// `⎕PP←B`
pub fn assign_print_precision(ctx: &mut Context<'_, '_>, value: Array) -> EvalResult<Array> {
    assign_parameter(ctx, SystemParameter::PrintPrecision, value)
}

/// `⎕CT←B`
pub fn assign_comparison_tolerance(ctx: &mut Context<'_, '_>, value: Array) -> EvalResult<Array> {
    assign_parameter(ctx, SystemParameter::ComparisonTolerance, value)
}

/// `⎕RL←B`
pub fn assign_random_link(ctx: &mut Context<'_, '_>, value: Array) -> EvalResult<Array> {
    assign_parameter(ctx, SystemParameter::RandomLink, value)
}

/// `⎕LX←B`
pub fn assign_latent_expression(ctx: &mut Context<'_, '_>, value: Array) -> EvalResult<Array> {
    assign_parameter(ctx, SystemParameter::LatentExpression, value)
}

/// `⎕TS`, the local time as year, month, day, hour, minute, second and
/// millisecond.
pub fn timestamp(_: &mut Context<'_, '_>) -> EvalResult<Array> {
    let now = Local::now();
    let parts = [f64::from(now.year()),
                 f64::from(now.month()),
                 f64::from(now.day()),
                 f64::from(now.hour()),
                 f64::from(now.minute()),
                 f64::from(now.second()),
                 f64::from(now.timestamp_subsec_millis().min(999))];
    Ok(Array::numbers(parts))
}

/// `⎕AV`, every character the interpreter knows.
pub fn atomic_vector(_: &mut Context<'_, '_>) -> EvalResult<Array> {
    Ok(Array::vector(glyph_set().into_iter().map(Element::from).collect()))
}

/// Returns the names held by a character vector or the rows of a character
/// matrix, with trailing blanks removed.
fn names(array: &Array) -> EvalResult<Vec<String>> {
    let text = |items: &[Element]| -> EvalResult<String> {
        items.iter()
             .map(|item| match item {
                 Element::Char(c) => Ok(*c),
                 _ => Err(AplError::domain("Expected a name.")),
             })
             .collect::<EvalResult<String>>()
             .map(|name| name.trim_end().to_string())
    };
    match array.rank() {
        0 | 1 => Ok(vec![text(array.ravel())?]),
        2 => {
            let width = array.shape()[1].max(1);
            array.ravel().chunks(width).map(text).collect()
        },
        _ => Err(AplError::rank("Expected a name or a matrix of names.")),
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_letter) && chars.all(is_name_char)
}

/// Returns one number per name, or a scalar for a single name.
fn per_name(array: &Array, values: Vec<f64>) -> Array {
    if array.rank() == 2 {
        Array::numbers(values)
    } else {
        values.first().map_or_else(Array::zilde, |value| Array::number(*value))
    }
}

/// `⎕NC B`, the class of each name: 0 unused, 1 label, 2 variable, 3
/// function, 4 operator, or ¯1 for something that is not a name.
pub fn name_class(ctx: &mut Context<'_, '_>, right: Array, _: Axis<'_>) -> EvalResult<Array> {
    let classes = names(&right)?.iter()
                                .map(|name| {
                                    if !is_valid_name(name) {
                                        return -1.0;
                                    }
                                    match ctx.symbols.lookup(name).map(SymbolValue::kind) {
                                        None => 0.0,
                                        Some(SymbolKind::Label) => 1.0,
                                        Some(SymbolKind::Variable) => 2.0,
                                        Some(SymbolKind::Function | SymbolKind::NiladicFunction) => 3.0,
                                        Some(SymbolKind::MonadicOperator | SymbolKind::DyadicOperator) => 4.0,
                                    }
                                })
                                .collect();
    Ok(per_name(&right, classes))
}

/// `⎕EX B`, erasing each name from the current scope.
///
/// Returns 1 for every name that was erased and 0 for one that was not bound
/// or cannot be erased.
pub fn erase(ctx: &mut Context<'_, '_>, right: Array, _: Axis<'_>) -> EvalResult<Array> {
    let results = names(&right)?.iter()
                                .map(|name| {
                                    if !is_valid_name(name) || !ctx.symbols.erase(name) {
                                        return 0.0;
                                    }
                                    info!(name, "erased");
                                    1.0
                                })
                                .collect();
    Ok(per_name(&right, results))
}

/// `⎕FX B`, defining a function from its lines.
///
/// The lines are a vector of character vectors or the rows of a character
/// matrix, the first being the header. Returns the name of the new function.
///
/// # Errors
/// Returns a `DefinitionError` for a malformed definition or a name already
/// used by a variable.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, system::fix},
///     symbol::table::SymbolTable,
///     value::array::{Array, Element},
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let mut ctx = Context::new(&mut symbols);
/// let lines = Array::vector(vec![Element::from(Array::chars("R←DOUBLE X")),
///                                Element::from(Array::chars("R←X+X"))]);
/// assert_eq!(fix(&mut ctx, lines, None).unwrap(), Array::chars("DOUBLE"));
/// assert!(ctx.symbols.lookup("DOUBLE").is_some());
/// ```
pub fn fix(ctx: &mut Context<'_, '_>, right: Array, _: Axis<'_>) -> EvalResult<Array> {
    let lines = match right.rank() {
        2 => names(&right)?,
        1 => right.ravel()
                  .iter()
                  .map(|line| {
                      let line = line.clone().into_array();
                      line.to_text()
                          .filter(|_| line.rank() <= 1)
                          .ok_or_else(|| AplError::domain("Expected lines of characters."))
                  })
                  .collect::<EvalResult<Vec<_>>>()?,
        _ => return Err(AplError::rank("Expected a vector of lines or a character matrix.")),
    };
    let definition = DefinedFunction::parse(&lines)?;
    let name = definition.name().to_string();
    if matches!(ctx.symbols.lookup(&name), Some(SymbolValue::Array(_) | SymbolValue::Label(_))) {
        return Err(AplError::definition(format!("'{name}' is already in use.")));
    }
    info!(name, lines = definition.body.len(), "function defined");
    ctx.symbols.bind(&name, SymbolValue::Function(Callable::Defined(Rc::new(definition))));
    Ok(Array::chars(&name))
}
