use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::EvalResult,
        lexer::glyphs::{is_letter, is_name_char},
    },
};

/// How a defined function takes its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Valence {
    /// No arguments.
    Niladic,
    /// A right argument.
    Monadic,
    /// A left and a right argument; the left one may be omitted.
    Dyadic,
    /// A function operand and a right argument, optionally a left one.
    MonadicOperator,
    /// Two function operands and a right argument, optionally a left one.
    DyadicOperator,
}

/// The first line of a definition.
///
/// ```text
/// [R←][A] F [B][;L1;L2…]
/// [R←][A] (LO OP) B
/// [R←][A] (LO OP RO) B
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Name of the function or operator.
    pub name:          String,
    /// Name bound to the result, if the definition returns one.
    pub result:        Option<String>,
    /// Name of the left argument.
    pub left:          Option<String>,
    /// Name of the right argument.
    pub right:         Option<String>,
    /// Name of the left operand of an operator.
    pub left_operand:  Option<String>,
    /// Name of the right operand of a dyadic operator.
    pub right_operand: Option<String>,
    /// Names localized to each invocation.
    pub locals:        Vec<String>,
}

impl Header {
    /// Parses a header line.
    ///
    /// # Errors
    /// Returns a `DefinitionError` if the line does not follow one of the
    /// header forms or uses an invalid name.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::symbol::function::{Header, Valence};
    ///
    /// let header = Header::parse("R←A PLUS B;T").unwrap();
    /// assert_eq!(header.name, "PLUS");
    /// assert_eq!(header.result.as_deref(), Some("R"));
    /// assert_eq!(header.valence(), Valence::Dyadic);
    /// assert_eq!(header.locals, vec!["T".to_string()]);
    ///
    /// let header = Header::parse("Z←(F TWICE) Y").unwrap();
    /// assert_eq!(header.valence(), Valence::MonadicOperator);
    /// ```
    pub fn parse(line: &str) -> EvalResult<Self> {
        let line = line.trim().trim_start_matches('∇').trim();
        let mut parts = line.split(';');
        let signature = parts.next().unwrap_or_default();
        let locals = parts.map(|local| checked_name(local.trim()))
                          .collect::<EvalResult<Vec<_>>>()?;

        let (result, signature) = match signature.split_once('←') {
            Some((result, rest)) => (Some(checked_name(result.trim())?), rest),
            None => (None, signature),
        };

        let mut header = Self { name: String::new(),
                                result,
                                left: None,
                                right: None,
                                left_operand: None,
                                right_operand: None,
                                locals };

        if let Some((left, rest)) = signature.split_once('(') {
            let (operation, right) = rest.split_once(')')
                                         .ok_or_else(|| AplError::definition("Unbalanced parenthesis in header."))?;
            header.left = optional_name(left)?;
            header.right = Some(checked_name(right.trim())?);
            match operation.split_whitespace().collect::<Vec<_>>().as_slice() {
                [operand, name] => {
                    header.left_operand = Some(checked_name(operand)?);
                    header.name = checked_name(name)?;
                },
                [operand, name, right_operand] => {
                    header.left_operand = Some(checked_name(operand)?);
                    header.name = checked_name(name)?;
                    header.right_operand = Some(checked_name(right_operand)?);
                },
                _ => return Err(AplError::definition("Malformed operator header.")),
            }
        } else {
            match signature.split_whitespace().collect::<Vec<_>>().as_slice() {
                [name] => header.name = checked_name(name)?,
                [name, right] => {
                    header.name = checked_name(name)?;
                    header.right = Some(checked_name(right)?);
                },
                [left, name, right] => {
                    header.left = Some(checked_name(left)?);
                    header.name = checked_name(name)?;
                    header.right = Some(checked_name(right)?);
                },
                _ => return Err(AplError::definition("Malformed function header.")),
            }
        }
        Ok(header)
    }

    /// Returns how the definition takes its arguments.
    #[must_use]
    pub const fn valence(&self) -> Valence {
        match (&self.left_operand, &self.right_operand, &self.left, &self.right) {
            (Some(_), Some(_), ..) => Valence::DyadicOperator,
            (Some(_), None, ..) => Valence::MonadicOperator,
            (None, _, Some(_), _) => Valence::Dyadic,
            (None, _, None, Some(_)) => Valence::Monadic,
            (None, _, None, None) => Valence::Niladic,
        }
    }
}

/// A function or operator defined by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedFunction {
    /// The parsed first line.
    pub header: Header,
    /// The remaining lines, numbered from 1.
    pub body:   Vec<String>,
}

impl DefinedFunction {
    /// Builds a definition from its lines, the first being the header.
    ///
    /// A closing `∇` line is ignored.
    ///
    /// # Errors
    /// Returns a `DefinitionError` for an empty definition or a malformed
    /// header.
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> EvalResult<Self> {
        let (header, body) = lines.split_first()
                                  .ok_or_else(|| AplError::definition("A definition needs a header."))?;
        let header = Header::parse(header.as_ref())?;
        let body = body.iter()
                       .map(|line| line.as_ref().to_string())
                       .filter(|line| line.trim() != "∇")
                       .collect();
        Ok(Self { header, body })
    }

    /// Returns the name of the definition.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.header.name
    }
}

fn optional_name(text: &str) -> EvalResult<Option<String>> {
    let text = text.trim();
    if text.is_empty() { Ok(None) } else { checked_name(text).map(Some) }
}

fn checked_name(text: &str) -> EvalResult<String> {
    let mut chars = text.chars();
    let valid = chars.next().is_some_and(is_letter) && chars.all(is_name_char);
    if valid {
        Ok(text.to_string())
    } else {
        Err(AplError::definition(format!("Invalid name '{text}' in header.")))
    }
}
