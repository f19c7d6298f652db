use std::collections::VecDeque;

use tracing::trace;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult, Outcome},
            form_table::{Evaluator, Probe},
            indexing,
            phrase::{Action, find_phrase},
        },
        symbol::table::{Callable, SymbolValue},
        token::{Content, Token, TokenClass},
        value::array::Array,
    },
};

/// What a reduction step leaves behind.
enum Step {
    /// Tokens replacing the matched ones at the front of the stack.
    Replace(Vec<Token>),
    /// The statement is complete.
    Finish(Outcome),
}

/// A statement being reduced.
///
/// Tokens are shifted one at a time from the right end of the statement onto
/// the front of the stack. Before every shift the phrase table is matched
/// against the front of the stack and the first matching phrase is reduced.
#[derive(Debug)]
pub struct Statement {
    remaining: Vec<Token>,
    stack:     VecDeque<Token>,
}

impl Statement {
    /// Frames recognized tokens with the end-of-statement markers.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        let end = tokens.last().map_or(0, |token| token.offset + 1);
        let mut remaining = Vec::with_capacity(tokens.len() + 2);
        remaining.push(Token::marker(TokenClass::LeftEndOfStatement, 0));
        remaining.extend(tokens);
        remaining.push(Token::marker(TokenClass::RightEndOfStatement, end));
        Self { remaining,
               stack: VecDeque::new() }
    }

    /// Reduces the statement to its outcome.
    ///
    /// # Errors
    /// Returns a `SyntaxError` when no phrase matches and nothing is left to
    /// shift, and any error raised while evaluating a phrase.
    pub fn reduce(mut self, ctx: &mut Context<'_, '_>) -> EvalResult<Outcome> {
        loop {
            if let Some(phrase) = find_phrase(&self.stack) {
                trace!(action = ?phrase.action, "reduce");
                let matched: Vec<Token> = self.stack.drain(..phrase.pattern.len()).collect();
                match perform(ctx, phrase.action, matched)? {
                    Step::Replace(tokens) => {
                        for token in tokens.into_iter().rev() {
                            self.stack.push_front(token);
                        }
                    },
                    Step::Finish(outcome) => return Ok(outcome),
                }
            } else if let Some(token) = self.remaining.pop() {
                trace!(class = ?token.class, offset = token.offset, "shift");
                self.stack.push_front(token);
            } else {
                let offset = self.stack.get(1).map_or(0, |token| token.offset);
                return Err(AplError::syntax("Statement cannot be reduced.").at(offset));
            }
        }
    }
}

/// Performs the reduction `action` on the matched tokens.
fn perform(ctx: &mut Context<'_, '_>, action: Action, matched: Vec<Token>) -> EvalResult<Step> {
    let mut tokens = matched.into_iter();
    let mut next = || {
        tokens.next()
              .ok_or_else(|| AplError::internal("Phrase matched fewer tokens than its pattern."))
    };

    let step = match action {
        Action::RemoveParentheses => {
            next()?;
            let value = next()?;
            let offset = value.offset;
            Step::Replace(vec![Token::value(TokenClass::Constant, value_of(value)?, offset)])
        },
        Action::Niladic => {
            let function = next()?;
            let callable = ctx.callable(&function)?;
            let result = ctx.apply_niladic(&callable).map_err(|e| e.at(function.offset))?;
            Step::Replace(vec![result_token(result, function.offset)])
        },
        Action::Monadic | Action::MonadicAxis => {
            let wildcard = next()?;
            let function = next()?;
            let axis = if action == Action::MonadicAxis { Some(axis_of(&next()?)?) } else { None };
            let right = value_of(next()?)?;
            let callable = ctx.callable(&function)?;
            let result = ctx.apply(&callable, None, right, axis.as_ref())
                            .map_err(|e| e.at(function.offset))?;
            Step::Replace(vec![wildcard, result_token(result, function.offset)])
        },
        Action::MonadicDerived | Action::MonadicDerivedAxis => {
            let wildcard = next()?;
            let operand = next()?;
            let operator = next()?;
            let axis = if action == Action::MonadicDerivedAxis { Some(axis_of(&next()?)?) } else { None };
            let right = value_of(next()?)?;
            let operand = ctx.callable(&operand)?;
            let callable = ctx.callable(&operator)?;
            let result = ctx.apply_monadic_operator(&callable, &operand, None, right, axis.as_ref())
                            .map_err(|e| e.at(operator.offset))?;
            Step::Replace(vec![wildcard, result_token(result, operator.offset)])
        },
        Action::DyadicDerived | Action::DyadicDerivedAxis => {
            let left = value_of(next()?)?;
            let operand = next()?;
            let operator = next()?;
            let axis = if action == Action::DyadicDerivedAxis { Some(axis_of(&next()?)?) } else { None };
            let right = value_of(next()?)?;
            let operand = ctx.callable(&operand)?;
            let callable = ctx.callable(&operator)?;
            let result = ctx.apply_monadic_operator(&callable, &operand, Some(left), right, axis.as_ref())
                            .map_err(|e| e.at(operator.offset))?;
            Step::Replace(vec![result_token(result, operator.offset)])
        },
        Action::Dyadic | Action::DyadicAxis => {
            let left = value_of(next()?)?;
            let function = next()?;
            let axis = if action == Action::DyadicAxis { Some(axis_of(&next()?)?) } else { None };
            let right = value_of(next()?)?;
            let callable = ctx.callable(&function)?;
            let result = ctx.apply(&callable, Some(left), right, axis.as_ref())
                            .map_err(|e| e.at(function.offset))?;
            Step::Replace(vec![result_token(result, function.offset)])
        },
        Action::MonadicComposed => {
            let wildcard = next()?;
            let (left_operand, operator, right_operand) = (next()?, next()?, next()?);
            let right = value_of(next()?)?;
            let result = compose(ctx, &left_operand, &operator, &right_operand, None, right)?;
            Step::Replace(vec![wildcard, result_token(result, operator.offset)])
        },
        Action::DyadicComposed => {
            let left = value_of(next()?)?;
            let (left_operand, operator, right_operand) = (next()?, next()?, next()?);
            let right = value_of(next()?)?;
            let result = compose(ctx, &left_operand, &operator, &right_operand, Some(left), right)?;
            Step::Replace(vec![result_token(result, operator.offset)])
        },
        Action::Index => {
            let value = next()?;
            let offset = value.offset;
            let list = next()?;
            let items = list.index_list().unwrap_or_default();
            let indexed = indexing::index(ctx, &value_of(value)?, items).map_err(|e| e.at(list.offset))?;
            Step::Replace(vec![Token::value(TokenClass::Constant, indexed, offset)])
        },
        Action::IndexedAssign => {
            let variable = next()?;
            let list = next()?;
            next()?;
            let value = value_of(next()?)?;
            let name = variable.text().unwrap_or_default();
            if variable.class != TokenClass::VariableName {
                return Err(AplError::syntax(format!("Cannot assign to an index of '{name}'.")).at(variable.offset));
            }
            let current = ctx.symbols
                             .lookup_array(&name)
                             .cloned()
                             .ok_or_else(|| AplError::value(format!("Undefined name '{name}'.")).at(variable.offset))?;
            let items = list.index_list().unwrap_or_default();
            let updated = indexing::assign(ctx, current, items, &value).map_err(|e| e.at(list.offset))?;
            ctx.symbols.bind(&name, SymbolValue::Array(updated));
            Step::Replace(vec![Token::value(TokenClass::CommittedValue, value, variable.offset)])
        },
        Action::Assign => {
            let variable = next()?;
            next()?;
            let value = value_of(next()?)?;
            let name = variable.text().unwrap_or_default();
            let stored = if variable.class == TokenClass::SystemVariableName {
                assign_system(ctx, &name, value).map_err(|e| e.at(variable.offset))?
            } else {
                ctx.symbols.bind(&name, SymbolValue::Array(value.clone()));
                value
            };
            Step::Replace(vec![Token::value(TokenClass::CommittedValue, stored, variable.offset)])
        },
        Action::Reference => {
            let variable = next()?;
            let name = variable.text().unwrap_or_default();
            let value = match ctx.symbols.lookup(&name) {
                Some(SymbolValue::Array(array)) => array.clone(),
                Some(SymbolValue::Label(line)) => Array::number(*line),
                _ => return Err(AplError::value(format!("Undefined name '{name}'.")).at(variable.offset)),
            };
            Step::Replace(vec![Token::value(TokenClass::Constant, value, variable.offset)])
        },
        Action::OpenList => {
            let bracket = next()?;
            Step::Replace(vec![list_token(TokenClass::PartialIndexList, Vec::new(), bracket.offset)])
        },
        Action::ElideItem | Action::CloseElided => {
            let opener = next()?;
            let items = list_items(next()?);
            let class = if action == Action::ElideItem {
                TokenClass::PartialIndexList
            } else {
                TokenClass::CompleteIndexList
            };
            let items = std::iter::once(None).chain(items).collect();
            Step::Replace(vec![list_token(class, items, opener.offset)])
        },
        Action::PrependItem | Action::CloseItem => {
            let opener = next()?;
            let item = value_of(next()?)?;
            let items = list_items(next()?);
            let class = if action == Action::PrependItem {
                TokenClass::PartialIndexList
            } else {
                TokenClass::CompleteIndexList
            };
            let items = std::iter::once(Some(item)).chain(items).collect();
            Step::Replace(vec![list_token(class, items, opener.offset)])
        },
        Action::Axis => {
            let opener = next()?;
            let axis = value_of(next()?)?;
            Step::Replace(vec![list_token(TokenClass::CompleteIndexList, vec![Some(axis)], opener.offset)])
        },
        Action::EmptyStatement => Step::Finish(Outcome::Empty),
        Action::ResultStatement => {
            next()?;
            let result = next()?;
            let outcome = match result.class {
                TokenClass::Nil => Outcome::Empty,
                TokenClass::CommittedValue => Outcome::Committed(value_of(result)?),
                _ => Outcome::Value(value_of(result)?),
            };
            Step::Finish(outcome)
        },
        Action::BranchStatement => {
            next()?;
            next()?;
            let target = value_of(next()?)?;
            let targets = target.to_numbers()?;
            Step::Finish(Outcome::Branch(targets))
        },
        Action::EscapeStatement => Step::Finish(Outcome::Escape),
    };
    Ok(step)
}

/// Applies the function derived from a dyadic operator, including `∘.f`.
fn compose(ctx: &mut Context<'_, '_>,
           left_operand: &Token,
           operator: &Token,
           right_operand: &Token,
           left: Option<Array>,
           right: Array)
           -> EvalResult<Option<Array>> {
    let left_callable = if left_operand.class == TokenClass::SmallCircle {
        Callable::Primitive('∘')
    } else {
        ctx.callable(left_operand)?
    };
    let callable = ctx.callable(operator)?;
    let right_callable = ctx.callable(right_operand)?;
    ctx.apply_dyadic_operator(&callable, &left_callable, &right_callable, left, right)
       .map_err(|e| e.at(operator.offset))
}

/// Stores a value in a system variable through its form-table entry.
fn assign_system(ctx: &mut Context<'_, '_>, name: &str, value: Array) -> EvalResult<Array> {
    let probes = [Probe::name(name), Probe::glyph('←'), Probe::constant()];
    match ctx.forms.lookup(&probes).map(|form| form.evaluator) {
        Some(Evaluator::Assign(assign)) => assign(ctx, value),
        _ => Err(AplError::syntax(format!("Cannot assign to '{name}'."))),
    }
}

/// Extracts the array of a result token.
fn value_of(token: Token) -> EvalResult<Array> {
    let offset = token.offset;
    if token.class == TokenClass::Nil {
        return Err(AplError::value("No value to use.").at(offset));
    }
    token.into_array()
         .ok_or_else(|| AplError::internal("Expected a value token.").at(offset))
}

/// Extracts the single axis of an axis specification.
fn axis_of(token: &Token) -> EvalResult<Array> {
    match token.index_list() {
        Some([Some(axis)]) => Ok(axis.clone()),
        _ => Err(AplError::syntax("Invalid axis.").at(token.offset)),
    }
}

fn result_token(result: Option<Array>, offset: usize) -> Token {
    match result {
        Some(array) => Token::value(TokenClass::Constant, array, offset),
        None => Token::marker(TokenClass::Nil, offset),
    }
}

fn list_token(class: TokenClass, items: Vec<Option<Array>>, offset: usize) -> Token {
    Token::new(class, Some(Content::IndexList(items)), offset)
}

fn list_items(token: Token) -> Vec<Option<Array>> {
    match token.content {
        Some(Content::IndexList(items)) => items,
        _ => Vec::new(),
    }
}
