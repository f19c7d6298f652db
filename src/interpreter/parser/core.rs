use tracing::trace;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::EvalResult,
        token::{Token, TokenClass},
    },
};

/// A saved recognizer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    head: usize,
    undo: usize,
}

/// A restartable cursor over the tokens of a statement.
///
/// Rules retag the tokens they match. Every retag is logged with the class
/// it replaced, and [`Recognizer::reset`] pops the log back to a mark, so a
/// failed rule leaves both the cursor and every token class as they were.
#[derive(Debug)]
pub struct Recognizer<'t> {
    tokens:   &'t mut [Token],
    head:     usize,
    undo:     Vec<(usize, TokenClass)>,
    furthest: usize,
}

impl<'t> Recognizer<'t> {
    /// Creates a recognizer positioned before the first token.
    #[must_use]
    pub fn new(tokens: &'t mut [Token]) -> Self {
        Self { tokens,
               head: 0,
               undo: Vec::new(),
               furthest: 0 }
    }

    /// Returns the position of the next token.
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Returns the tokens with their current classes.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        self.tokens
    }

    /// Returns the number of logged retags.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Returns `true` when every token has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.head == self.tokens.len()
    }

    /// Saves the current position.
    #[must_use]
    pub fn mark(&self) -> Mark {
        Mark { head: self.head,
               undo: self.undo.len() }
    }

    /// Returns to `mark`, restoring the class of every token retagged since.
    pub fn reset(&mut self, mark: Mark) {
        while self.undo.len() > mark.undo {
            if let Some((position, previous)) = self.undo.pop() {
                trace!(position, ?previous, "restore");
                self.tokens[position] = self.tokens[position].with_class(previous);
            }
        }
        self.head = mark.head;
    }

    /// Runs `rule`, undoing everything it did if it fails.
    pub fn attempt(&mut self, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        let mark = self.mark();
        if rule(self) {
            true
        } else {
            self.reset(mark);
            false
        }
    }

    /// Returns the next token.
    #[must_use]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.head)
    }

    fn advance(&mut self) {
        self.head += 1;
        self.furthest = self.furthest.max(self.head);
    }

    /// Consumes the next token if its class satisfies `predicate`.
    pub fn accept(&mut self, predicate: impl Fn(TokenClass) -> bool) -> bool {
        if self.peek().is_some_and(|token| predicate(token.class)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the next token if it is an untagged glyph from `glyphs`,
    /// retagging it as `class`.
    pub fn accept_glyph(&mut self, glyphs: &str, class: TokenClass) -> bool {
        let matches = self.peek().is_some_and(|token| {
                                      token.class == TokenClass::Primitive
                                      && token.glyph().is_some_and(|glyph| glyphs.contains(glyph))
                                  });
        if matches {
            self.retag(class);
        }
        matches
    }

    /// Replaces the next token by a copy of class `class` and consumes it.
    fn retag(&mut self, class: TokenClass) {
        let previous = self.tokens[self.head].class;
        trace!(position = self.head, ?previous, ?class, "retag");
        self.undo.push((self.head, previous));
        self.tokens[self.head] = self.tokens[self.head].with_class(class);
        self.advance();
    }

    /// Returns the offset of the token recognition got furthest to.
    fn failure_offset(&self) -> usize {
        self.tokens
            .get(self.furthest)
            .or_else(|| self.tokens.last())
            .map_or(0, |token| token.offset)
    }
}

/// Recognizes a converted statement, retagging its tokens in place.
///
/// # Errors
/// Returns a `SyntaxError` at the furthest token recognition reached when
/// the tokens do not form a statement.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     lexer::tokenize,
///     parser::{convert::convert_tokens, core::parse},
///     evaluator::form_table::FormTable,
///     symbol::table::SymbolTable,
///     token::TokenClass,
/// };
///
/// let symbols = SymbolTable::workspace();
/// let tokens = tokenize("+/1 2 3").unwrap();
/// let mut tokens = convert_tokens(tokens, &symbols, FormTable::standard()).unwrap();
/// parse(&mut tokens).unwrap();
/// let classes: Vec<_> = tokens.iter().map(|t| t.class).collect();
/// assert_eq!(classes,
///            vec![TokenClass::PrimitiveFunction, TokenClass::MonadicOperator, TokenClass::Constant]);
/// ```
pub fn parse(tokens: &mut [Token]) -> EvalResult<()> {
    let mut recognizer = Recognizer::new(tokens);
    if recognizer.statement() {
        Ok(())
    } else {
        Err(AplError::syntax("Invalid statement.").at(recognizer.failure_offset()))
    }
}
