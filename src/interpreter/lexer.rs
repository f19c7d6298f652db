use tracing::trace;

use crate::{
    error::AplError,
    interpreter::{
        lexer::glyphs::{
            BLANKS, DIRECT_IDENTIFIERS, DOT, EXPONENT, IMAGINARY, LAMP, OVERBAR, QUAD, QUOTE, QUOTE_QUAD,
            STATEMENT_SEPARATORS, is_ideogram, is_letter, is_name_char,
        },
        token::{Content, Token, TokenClass},
    },
};

/// The character set of the language.
///
/// Names the glyphs with a lexical role of their own (overbar, quote, lamp,
/// quad, ...) and lists the ideograms, primitive functions and operators the
/// later stages classify.
pub mod glyphs;
/// Conversion of numeric literal text.
///
/// A `logos` lexer that splits the accumulated text of a numeric literal into
/// complex numbers.
pub mod numeric;

/// Result type of the tokenizer's grammar rules.
///
/// `Ok(true)` means the rule matched and consumed input, `Ok(false)` means it
/// did not match and left the lexer exactly as it found it, and `Err` aborts
/// the line.
pub type LexResult<T> = Result<T, AplError>;

/// Tokenizes one line of source text.
///
/// # Errors
/// Returns a `SyntaxError` carrying the offset of the failure when a
/// character cannot start any token, a character literal is unterminated, or
/// an exponent or imaginary marker is not followed by a number.
///
/// # Example
/// ```
/// use aplite::interpreter::{lexer::tokenize, token::TokenClass};
///
/// let tokens = tokenize("x←1 2 3+4 ⍝ sum").unwrap();
/// let classes: Vec<_> = tokens.iter().map(|t| t.class).collect();
/// assert_eq!(classes,
///            vec![TokenClass::SimpleIdentifier,
///                 TokenClass::Primitive,
///                 TokenClass::NumericLiteral,
///                 TokenClass::Primitive,
///                 TokenClass::NumericLiteral]);
/// ```
pub fn tokenize(line: &str) -> LexResult<Vec<Token>> {
    let chars: Vec<char> = line.chars().collect();
    let mut lexer = Lexer::new(&chars);
    lexer.line()?;
    Ok(lexer.finish())
}

/// A restartable cursor over the characters of a line.
///
/// Rules accumulate the characters they consume into `content`; a failing
/// rule hands back exactly what it took through [`Lexer::backtrack`], so the
/// cursor and the buffer after a failed attempt are identical to before it.
#[derive(Debug)]
pub struct Lexer<'a> {
    input:   &'a [char],
    head:    usize,
    content: Vec<char>,
    start:   usize,
    output:  Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a [char]) -> Self {
        Self { input,
               head: 0,
               content: Vec::new(),
               start: 0,
               output: Vec::new() }
    }

    /// Moves the cursor to `position`, dropping any accumulated content.
    pub fn restart_at(&mut self, position: usize) {
        self.head = position.min(self.input.len());
        self.start = self.head;
        self.content.clear();
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Returns the characters accumulated for the token being recognized.
    #[must_use]
    pub fn content(&self) -> &[char] {
        &self.content
    }

    /// Consumes the lexer, returning the recognized tokens.
    #[must_use]
    pub fn finish(self) -> Vec<Token> {
        self.output
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.head).copied()
    }

    fn accept(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        match self.peek() {
            Some(c) if predicate(c) => {
                self.content.push(c);
                self.head += 1;
                true
            },
            _ => false,
        }
    }

    fn accept_char(&mut self, expected: char) -> bool {
        self.accept(|c| c == expected)
    }

    fn accept_digits(&mut self) -> usize {
        let mut count = 0;
        while self.accept(|c| c.is_ascii_digit()) {
            count += 1;
        }
        count
    }

    /// Rewinds the cursor and the accumulated content by `amount` characters.
    pub fn backtrack(&mut self, amount: usize) {
        self.head -= amount;
        self.content.truncate(self.content.len() - amount);
    }

    fn emit(&mut self, class: TokenClass) {
        let content = if self.content.len() == 1 {
            Content::Char(self.content[0])
        } else {
            Content::Chars(std::mem::take(&mut self.content))
        };
        trace!(?class, offset = self.start, "emit token");
        self.output.push(Token::new(class, Some(content), self.start));
        self.discard();
    }

    fn discard(&mut self) {
        self.content.clear();
        self.start = self.head;
    }

    /// Recognizes every token of the line.
    ///
    /// # Errors
    /// See [`tokenize`].
    pub fn line(&mut self) -> LexResult<()> {
        while self.head < self.input.len() {
            if self.blank() || self.comment() {
                self.discard();
            } else if self.character_literal()? {
                self.emit(TokenClass::CharacterLiteral);
            } else if self.numeric_literal()? {
                self.emit(TokenClass::NumericLiteral);
            } else if let Some(class) = self.identifier() {
                self.emit(class);
            } else if self.statement_separator() {
                self.emit(TokenClass::StatementSeparator);
            } else if self.primitive() {
                self.emit(TokenClass::Primitive);
            } else {
                let found = self.peek().unwrap_or(' ');
                return Err(AplError::syntax(format!("Unrecognised character '{found}'.")).at(self.head));
            }
        }
        Ok(())
    }

    /// `blank ::= ' ' | tab`
    pub fn blank(&mut self) -> bool {
        self.accept(|c| BLANKS.contains(&c))
    }

    /// `comment ::= '⍝' any*` up to the end of the line or statement.
    pub fn comment(&mut self) -> bool {
        if !self.accept_char(LAMP) {
            return false;
        }
        while self.accept(|c| c != '\n') {}
        true
    }

    /// `statement-separator ::= '⋄' | '◊' | newline`
    pub fn statement_separator(&mut self) -> bool {
        self.accept(|c| STATEMENT_SEPARATORS.contains(&c))
    }

    /// `primitive ::= ideogram`
    pub fn primitive(&mut self) -> bool {
        self.accept(is_ideogram)
    }

    /// Recognizes a name and returns its lexical class.
    ///
    /// ```text
    /// distinguished-identifier ::= '⎕' letter* | '⍞'
    /// simple-identifier        ::= letter name-char* | '⍺' | '⍵'
    /// ```
    pub fn identifier(&mut self) -> Option<TokenClass> {
        if self.accept_char(QUAD) {
            while self.accept(is_letter) {}
            return Some(TokenClass::DistinguishedIdentifier);
        }
        if self.accept_char(QUOTE_QUAD) {
            return Some(TokenClass::DistinguishedIdentifier);
        }
        if self.accept(|c| DIRECT_IDENTIFIERS.contains(&c)) {
            return Some(TokenClass::SimpleIdentifier);
        }
        if self.accept(is_letter) {
            while self.accept(is_name_char) {}
            return Some(TokenClass::SimpleIdentifier);
        }
        None
    }

    /// `character-literal ::= quote (non-quote | quote quote)* quote`
    ///
    /// # Errors
    /// Returns a `SyntaxError` at the opening quote when the literal is not
    /// closed before the end of the line.
    pub fn character_literal(&mut self) -> LexResult<bool> {
        let opening = self.head;
        if !self.accept_char(QUOTE) {
            return Ok(false);
        }
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(AplError::syntax("Unterminated character literal.").at(opening));
                },
                Some(QUOTE) => {
                    self.accept_char(QUOTE);
                    if !self.accept_char(QUOTE) {
                        return Ok(true);
                    }
                },
                Some(_) => {
                    self.accept(|_| true);
                },
            }
        }
    }

    /// `numeric-literal ::= numeric-scalar (blank+ numeric-scalar)*`
    ///
    /// A trailing run of blanks that is not followed by another number is
    /// handed back, so `1 2 +3` yields the literal `1 2`.
    ///
    /// # Errors
    /// See [`Lexer::numeric_scalar`].
    pub fn numeric_literal(&mut self) -> LexResult<bool> {
        if !self.numeric_scalar()? {
            return Ok(false);
        }
        loop {
            let mark = self.head;
            while self.blank() {}
            if self.head == mark {
                break;
            }
            if !self.numeric_scalar()? {
                self.backtrack(self.head - mark);
                break;
            }
        }
        Ok(true)
    }

    /// `numeric-scalar ::= real-scalar ('J' real-scalar)?`
    ///
    /// # Errors
    /// Returns a `SyntaxError` when the imaginary marker is not followed by a
    /// real number.
    pub fn numeric_scalar(&mut self) -> LexResult<bool> {
        if !self.real_scalar()? {
            return Ok(false);
        }
        if self.accept_char(IMAGINARY) && !self.real_scalar()? {
            return Err(AplError::syntax("Imaginary marker must be followed by a number.").at(self.head));
        }
        Ok(true)
    }

    /// `real-scalar ::= '¯'? (digit+ ('.' digit*)? | '.' digit+) exponent?`
    ///
    /// # Errors
    /// Returns a `SyntaxError` when the exponent marker is not followed by
    /// digits.
    pub fn real_scalar(&mut self) -> LexResult<bool> {
        let mark = self.head;
        self.accept_char(OVERBAR);
        let mut digits = self.accept_digits();
        if self.accept_char(DOT) {
            digits += self.accept_digits();
        }
        if digits == 0 {
            self.backtrack(self.head - mark);
            return Ok(false);
        }
        if self.accept_char(EXPONENT) {
            self.accept_char(OVERBAR);
            if self.accept_digits() == 0 {
                return Err(AplError::syntax("Exponent marker must be followed by digits.").at(self.head));
            }
        }
        Ok(true)
    }
}
