use logos::Logos;

use crate::{error::AplError, interpreter::value::number::Number};

/// One number inside the text of a numeric literal.
///
/// The tokenizer has already validated the overall shape of the literal, so
/// this lexer only splits the run on blanks and converts each piece.
#[derive(Logos, Debug, PartialEq, Clone, Copy)]
#[logos(skip r"[ \t]+")]
pub enum NumericPiece {
    /// A real or complex number such as `3`, `¯1.5E¯3` or `1J¯2`.
    #[regex(r"¯?([0-9]+(\.[0-9]*)?|\.[0-9]+)(E¯?[0-9]+)?(J¯?([0-9]+(\.[0-9]*)?|\.[0-9]+)(E¯?[0-9]+)?)?",
            parse_number)]
    Number(Number),
}

/// Converts a complex literal, splitting it at the imaginary marker.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
fn parse_number(lex: &logos::Lexer<NumericPiece>) -> Option<Number> {
    let text = lex.slice();
    let (real, imaginary) = text.split_once('J').map_or((text, None), |(r, i)| (r, Some(i)));
    let imaginary = match imaginary {
        Some(part) => parse_real(part)?,
        None => 0.0,
    };
    Some(Number::new(parse_real(real)?, imaginary))
}

/// Converts a real literal, reading the overbar as a minus sign.
fn parse_real(text: &str) -> Option<f64> {
    text.replace('¯', "-").parse().ok()
}

/// Splits the text of a numeric literal into its numbers.
///
/// # Errors
/// Returns a `SyntaxError` if a piece is not a well-formed number and a
/// `DomainError` if a number is too large to be finite.
///
/// # Example
/// ```
/// use aplite::interpreter::{lexer::numeric::parse_numbers, value::number::Number};
///
/// let numbers = parse_numbers("1 ¯2.5 3E2 1J¯1").unwrap();
/// assert_eq!(numbers,
///            vec![Number::from_real(1.0),
///                 Number::from_real(-2.5),
///                 Number::from_real(300.0),
///                 Number::new(1.0, -1.0)]);
/// assert!(parse_numbers("1 2x").is_err());
/// assert!(parse_numbers("1E400").is_err());
/// ```
pub fn parse_numbers(text: &str) -> Result<Vec<Number>, AplError> {
    NumericPiece::lexer(text).map(|piece| match piece {
                                 Ok(NumericPiece::Number(number)) if number.is_finite() => Ok(number),
                                 Ok(NumericPiece::Number(_)) => {
                                     Err(AplError::domain(format!("Numeric literal '{text}' is not a finite number.")))
                                 },
                                 Err(()) => Err(AplError::syntax(format!("Malformed numeric literal '{text}'."))),
                             })
                             .collect()
}
