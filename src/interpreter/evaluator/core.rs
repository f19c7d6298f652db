use tracing::debug;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            form_table::{Axis, Evaluator, Form, FormTable, Probe},
            reduce::Statement,
        },
        lexer::tokenize,
        parser::{convert::convert_tokens, core::parse},
        symbol::table::{Callable, SymbolTable, SymbolValue},
        token::{Token, TokenClass},
        value::{array::Array, number::Number, pervade},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// [`AplError`] describing the failure.
pub type EvalResult<T> = Result<T, AplError>;

/// What a finished statement produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A value to display.
    Value(Array),
    /// A value produced by an assignment; not displayed.
    Committed(Array),
    /// Nothing: an empty statement or a function without result.
    Empty,
    /// A branch with its targets.
    Branch(Vec<Number>),
    /// A naked branch arrow.
    Escape,
}

impl Outcome {
    /// Returns the value the outcome carries, displayed or not.
    #[must_use]
    pub const fn value(&self) -> Option<&Array> {
        match self {
            Self::Value(array) | Self::Committed(array) => Some(array),
            _ => None,
        }
    }
}

/// The state a statement is evaluated against.
///
/// A context borrows the symbol table of the current scope mutably for the
/// duration of one evaluation and shares the registry of primitive forms.
/// Defined function calls build a new context over a child table.
pub struct Context<'s, 'p> {
    /// Name bindings of the current scope.
    pub symbols: &'s mut SymbolTable<'p>,
    /// The registry dispatching functions and operators.
    pub forms:   &'static FormTable,
}

impl<'s, 'p> Context<'s, 'p> {
    /// Creates a context over `symbols` using the standard form table.
    pub fn new(symbols: &'s mut SymbolTable<'p>) -> Self {
        Self { symbols,
               forms: FormTable::standard() }
    }

    /// Returns the index origin.
    #[must_use]
    pub fn index_origin(&self) -> usize {
        self.symbols.index_origin()
    }

    /// Returns the comparison tolerance.
    #[must_use]
    pub fn comparison_tolerance(&self) -> f64 {
        self.symbols.comparison_tolerance()
    }

    /// Runs every statement of `line` from left to right.
    ///
    /// Evaluation stops after the first branch or escape, which is the last
    /// outcome returned. Errors carry the text of the line.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::{
    ///     evaluator::core::{Context, Outcome},
    ///     symbol::table::SymbolTable,
    ///     value::array::Array,
    /// };
    ///
    /// let mut symbols = SymbolTable::workspace();
    /// let mut ctx = Context::new(&mut symbols);
    /// let outcomes = ctx.execute_line("X←2 ⋄ X+3").unwrap();
    /// assert_eq!(outcomes[0], Outcome::Committed(Array::number(2.0)));
    /// assert_eq!(outcomes[1], Outcome::Value(Array::number(5.0)));
    /// ```
    pub fn execute_line(&mut self, line: &str) -> EvalResult<Vec<Outcome>> {
        let tokens = tokenize(line).map_err(|e| e.with_line(line))?;
        let mut outcomes = Vec::new();
        for statement in split_statements(tokens) {
            let outcome = self.execute_statement(statement)
                              .map_err(|e| e.with_line(line))?;
            let leaves = matches!(outcome, Outcome::Branch(_) | Outcome::Escape);
            outcomes.push(outcome);
            if leaves {
                break;
            }
        }
        Ok(outcomes)
    }

    /// Converts, recognizes and reduces the tokens of one statement.
    pub fn execute_statement(&mut self, tokens: Vec<Token>) -> EvalResult<Outcome> {
        let mut tokens = convert_tokens(tokens, self.symbols, self.forms)?;
        parse(&mut tokens)?;
        let outcome = Statement::new(tokens).reduce(self)?;
        debug!(?outcome, "statement finished");
        Ok(outcome)
    }

    /// Returns the callable a function or operator token stands for.
    ///
    /// # Errors
    /// Returns a `ValueError` for a defined name that is no longer bound to a
    /// function.
    pub fn callable(&self, token: &Token) -> EvalResult<Callable> {
        match token.class {
            TokenClass::DefinedFunctionName
            | TokenClass::NiladicDefinedFunctionName
            | TokenClass::DefinedMonadicOperatorName
            | TokenClass::DefinedDyadicOperatorName => {
                let name = token.text().unwrap_or_default();
                match self.symbols.lookup(&name) {
                    Some(SymbolValue::Function(callable)) => Ok(callable.clone()),
                    _ => Err(AplError::value(format!("Undefined function '{name}'.")).at(token.offset)),
                }
            },
            TokenClass::SystemFunctionName | TokenClass::NiladicSystemFunctionName => {
                Ok(Callable::System(token.text().unwrap_or_default()))
            },
            _ => token.glyph()
                      .map(Callable::Primitive)
                      .ok_or_else(|| AplError::internal("Expected a function token.").at(token.offset)),
        }
    }

    /// Applies a niladic function.
    pub fn apply_niladic(&mut self, function: &Callable) -> EvalResult<Option<Array>> {
        let form = self.find_form(&[Probe::callable(function)], false)?;
        match (form.evaluator, function) {
            (Evaluator::Niladic(evaluate), _) => evaluate(self).map(Some),
            (Evaluator::Defined(call), Callable::Defined(definition)) => {
                let definition = definition.clone();
                call(self, &definition, None, None)
            },
            _ => Err(unexpected_evaluator()),
        }
    }

    /// Applies a function to a right and optionally a left argument.
    ///
    /// The function is dispatched through the form table. Defined functions
    /// may return no value.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::{
    ///     evaluator::core::Context,
    ///     symbol::table::{Callable, SymbolTable},
    ///     value::array::Array,
    /// };
    ///
    /// let mut symbols = SymbolTable::workspace();
    /// let mut ctx = Context::new(&mut symbols);
    /// let sum = ctx.apply(&Callable::Primitive('+'),
    ///                     Some(Array::number(2.0)),
    ///                     Array::numbers([1.0, 2.0]),
    ///                     None)
    ///              .unwrap();
    /// assert_eq!(sum, Some(Array::numbers([3.0, 4.0])));
    /// ```
    pub fn apply(&mut self,
                 function: &Callable,
                 left: Option<Array>,
                 right: Array,
                 axis: Axis<'_>)
                 -> EvalResult<Option<Array>> {
        let mut probes = Vec::with_capacity(4);
        if left.is_some() {
            probes.push(Probe::constant());
        }
        probes.push(Probe::callable(function));
        if axis.is_some() {
            probes.push(Probe::complete_list());
        }
        probes.push(Probe::constant());
        let form = self.find_form(&probes, axis.is_some())?;

        match (form.evaluator, left, function) {
            (Evaluator::MonadicScalar(evaluate), None, _) => {
                let ctx = &*self;
                pervade::pervade_monadic(&right, &mut |item| evaluate(ctx, item)).map(Some)
            },
            (Evaluator::DyadicScalar(evaluate), Some(left), _) => {
                let ctx = &*self;
                pervade::pervade_dyadic(&left, &right, &mut |a, b| evaluate(ctx, a, b)).map(Some)
            },
            (Evaluator::Monadic(evaluate), None, _) => evaluate(self, right, axis).map(Some),
            (Evaluator::Dyadic(evaluate), Some(left), _) => evaluate(self, left, right, axis).map(Some),
            (Evaluator::Defined(call), left, Callable::Defined(definition)) => {
                let definition = definition.clone();
                call(self, &definition, left, Some(right))
            },
            _ => Err(unexpected_evaluator()),
        }
    }

    /// Applies a function and requires it to produce a value.
    ///
    /// # Errors
    /// Returns a `ValueError` if the function returns nothing.
    pub fn apply_value(&mut self,
                       function: &Callable,
                       left: Option<Array>,
                       right: Array,
                       axis: Axis<'_>)
                       -> EvalResult<Array> {
        self.apply(function, left, right, axis)?
            .ok_or_else(|| AplError::value("Function did not return a value."))
    }

    /// Applies the function derived from a monadic operator and its operand.
    pub fn apply_monadic_operator(&mut self,
                                  operator: &Callable,
                                  operand: &Callable,
                                  left: Option<Array>,
                                  right: Array,
                                  axis: Axis<'_>)
                                  -> EvalResult<Option<Array>> {
        let mut probes = Vec::with_capacity(5);
        if left.is_some() {
            probes.push(Probe::constant());
        }
        probes.push(Probe::callable(operand));
        probes.push(Probe::callable(operator));
        if axis.is_some() {
            probes.push(Probe::complete_list());
        }
        probes.push(Probe::constant());
        let form = self.find_form(&probes, axis.is_some())?;

        match (form.evaluator, operator) {
            (Evaluator::MonadicOperator(evaluate), _) => evaluate(self, operand, left, right, axis).map(Some),
            (Evaluator::DefinedOperator(call), Callable::Defined(definition)) => {
                let definition = definition.clone();
                call(self, &definition, operand, None, left, right)
            },
            _ => Err(unexpected_evaluator()),
        }
    }

    /// Applies the function derived from a dyadic operator and its operands.
    pub fn apply_dyadic_operator(&mut self,
                                 operator: &Callable,
                                 left_operand: &Callable,
                                 right_operand: &Callable,
                                 left: Option<Array>,
                                 right: Array)
                                 -> EvalResult<Option<Array>> {
        let mut probes = Vec::with_capacity(5);
        if left.is_some() {
            probes.push(Probe::constant());
        }
        probes.push(Probe::callable(left_operand));
        probes.push(Probe::callable(operator));
        probes.push(Probe::callable(right_operand));
        probes.push(Probe::constant());
        let form = self.find_form(&probes, false)?;

        match (form.evaluator, operator) {
            (Evaluator::DyadicOperator(evaluate), _) => {
                evaluate(self, left_operand, right_operand, left, right).map(Some)
            },
            (Evaluator::DefinedOperator(call), Callable::Defined(definition)) => {
                let definition = definition.clone();
                call(self, &definition, left_operand, Some(right_operand), left, right)
            },
            _ => Err(unexpected_evaluator()),
        }
    }

    /// Looks up the form for `probes`.
    ///
    /// A miss that would match without its axis reports a misplaced axis; a
    /// miss that would match with the other valence reports a valence
    /// mismatch. Any other miss is an internal inconsistency between the
    /// recognizer and the form table.
    fn find_form(&self, probes: &[Probe], with_axis: bool) -> EvalResult<&'static Form> {
        if let Some(form) = self.forms.lookup(probes) {
            return Ok(form);
        }
        if with_axis {
            let without: Vec<Probe> = probes.iter()
                                            .filter(|probe| **probe != Probe::complete_list())
                                            .cloned()
                                            .collect();
            if self.forms.lookup(&without).is_some() {
                return Err(AplError::syntax("Function does not accept an axis."));
            }
        }
        let other_valence: Vec<Probe> = if probes.first() == Some(&Probe::constant()) {
            probes[1..].to_vec()
        } else {
            std::iter::once(Probe::constant()).chain(probes.iter().cloned()).collect()
        };
        if probes.len() > 1 && self.forms.lookup(&other_valence).is_some() {
            let valence = if probes.first() == Some(&Probe::constant()) { "dyadically" } else { "monadically" };
            return Err(AplError::syntax(format!("Function cannot be used {valence}.")));
        }
        Err(AplError::internal("Expected to find form-table evaluator for expression."))
    }
}

fn unexpected_evaluator() -> AplError {
    AplError::internal("Form-table evaluator does not fit the expression.")
}

/// Splits a token stream at its statement separators, dropping empty
/// statements between consecutive separators.
fn split_statements(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut statements = vec![Vec::new()];
    for token in tokens {
        if token.class == TokenClass::StatementSeparator {
            statements.push(Vec::new());
        } else if let Some(current) = statements.last_mut() {
            current.push(token);
        }
    }
    if statements.iter().all(Vec::is_empty) {
        return vec![Vec::new()];
    }
    statements.retain(|statement| !statement.is_empty());
    statements
}
