use tracing::info;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Outcome},
            system,
        },
        printer::format_array,
        symbol::table::SymbolTable,
        value::array::{Array, Element},
    },
};

/// Initial values for the system parameters of a session.
///
/// Every field left as `None` keeps the parameter's default.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Initial `⎕IO`.
    pub index_origin:         Option<f64>,
    /// Initial `⎕PP`.
    pub print_precision:      Option<f64>,
    /// Initial `⎕CT`.
    pub comparison_tolerance: Option<f64>,
}

/// An interpreter session holding the workspace's names.
///
/// # Example
/// ```
/// use aplite::interpreter::session::Session;
///
/// let mut session = Session::new();
/// session.execute("V←⍳4").unwrap();
/// let outcome = session.evaluate("+/V").unwrap();
/// assert_eq!(session.render(outcome.value().unwrap()), "10");
/// ```
#[derive(Debug)]
pub struct Session {
    symbols: SymbolTable<'static>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts a session with default system parameters.
    #[must_use]
    pub fn new() -> Self {
        info!("session started");
        Self { symbols: SymbolTable::workspace() }
    }

    /// Starts a session, seeding the system parameters from `config`.
    ///
    /// # Errors
    /// Returns the error an assignment of the same value to the parameter
    /// would raise, such as a `LimitError` for `⎕IO` of 5.
    pub fn with_config(config: &SessionConfig) -> EvalResult<Self> {
        let mut session = Self::new();
        let mut ctx = Context::new(&mut session.symbols);
        if let Some(origin) = config.index_origin {
            system::assign_index_origin(&mut ctx, Array::number(origin))?;
        }
        if let Some(precision) = config.print_precision {
            system::assign_print_precision(&mut ctx, Array::number(precision))?;
        }
        if let Some(tolerance) = config.comparison_tolerance {
            system::assign_comparison_tolerance(&mut ctx, Array::number(tolerance))?;
        }
        Ok(session)
    }

    /// Returns the workspace's names.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable<'static> {
        &self.symbols
    }

    /// Evaluates every statement of `line`, left to right.
    ///
    /// # Errors
    /// Returns the first error raised, annotated with the line. Lines that
    /// start with `)` are rejected with an `InternalError`.
    pub fn execute(&mut self, line: &str) -> EvalResult<Vec<Outcome>> {
        if line.trim_start().starts_with(')') {
            return Err(AplError::internal("System commands are not supported.").with_line(line));
        }
        Context::new(&mut self.symbols).execute_line(line)
    }

    /// Evaluates `line` and returns the outcome of its last statement.
    ///
    /// # Errors
    /// See [`Session::execute`].
    pub fn evaluate(&mut self, line: &str) -> EvalResult<Outcome> {
        Ok(self.execute(line)?.pop().unwrap_or(Outcome::Empty))
    }

    /// Renders `array` with the session's print precision.
    #[must_use]
    pub fn render(&self, array: &Array) -> String {
        format_array(array, self.symbols.print_precision())
    }

    /// Returns the text to display for `outcome`, if any.
    #[must_use]
    pub fn display(&self, outcome: &Outcome) -> Option<String> {
        match outcome {
            Outcome::Value(array) => Some(self.render(array)),
            _ => None,
        }
    }

    /// Defines a function or operator from its lines, the first being the
    /// header, and returns its name.
    ///
    /// # Errors
    /// Returns a `DefinitionError` for a malformed definition.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::session::Session;
    ///
    /// let mut session = Session::new();
    /// let name = session.define(&["R←A AVG B", "R←(A+B)÷2"]).unwrap();
    /// assert_eq!(name, "AVG");
    /// let outcome = session.evaluate("3 AVG 5").unwrap();
    /// assert_eq!(session.render(outcome.value().unwrap()), "4");
    /// ```
    pub fn define(&mut self, lines: &[&str]) -> EvalResult<String> {
        let lines = Array::vector(lines.iter().map(|line| Element::from(Array::chars(line))).collect());
        let name = system::fix(&mut Context::new(&mut self.symbols), lines, None)?;
        Ok(name.to_text().unwrap_or_default())
    }
}
