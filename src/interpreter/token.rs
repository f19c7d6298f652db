use crate::interpreter::value::{array::Array, number::Number};

/// The class of a token.
///
/// Tokens start out with a lexical class assigned by the tokenizer. The
/// recognizer and the token converter replace them with syntactic and
/// semantic classes, and the interpreter produces the value classes while it
/// reduces a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenClass {
    // Lexical classes produced by the tokenizer.
    /// A name made of letters, digits, underscores and overbars.
    SimpleIdentifier,
    /// A `⎕` or `⍞` name.
    DistinguishedIdentifier,
    /// The raw text of a blank-separated run of numbers.
    NumericLiteral,
    /// The raw text of a quoted literal, quotes included.
    CharacterLiteral,
    /// Any glyph of the language's character set.
    Primitive,
    /// `⋄`, `◊` or a line separator.
    StatementSeparator,

    // Syntactic classes assigned by the recognizer.
    /// `←`
    AssignmentArrow,
    /// `→`
    BranchArrow,
    /// `(`
    LeftParenthesis,
    /// `)`
    RightParenthesis,
    /// `[` opening an index list.
    LeftIndexBracket,
    /// `]` closing an index list.
    RightIndexBracket,
    /// `[` opening an axis specification.
    LeftAxisBracket,
    /// `]` closing an axis specification.
    RightAxisBracket,
    /// `;` inside an index list.
    IndexSeparator,
    /// `∘` in an outer product.
    SmallCircle,
    /// A primitive glyph used as a function.
    PrimitiveFunction,
    /// A primitive glyph used as a monadic operator.
    MonadicOperator,
    /// A primitive glyph used as a dyadic operator.
    DyadicOperator,

    // Semantic classes assigned by the token converter.
    /// A name bound to an array, or not bound at all.
    VariableName,
    /// A name bound to a monadic or dyadic defined function.
    DefinedFunctionName,
    /// A name bound to a niladic defined function.
    NiladicDefinedFunctionName,
    /// A name bound to a defined monadic operator.
    DefinedMonadicOperatorName,
    /// A name bound to a defined dyadic operator.
    DefinedDyadicOperatorName,
    /// A name shared with another process.
    SharedVariableName,
    /// A system variable such as `⎕IO`.
    SystemVariableName,
    /// A niladic system function such as `⎕TS`.
    NiladicSystemFunctionName,
    /// A monadic or dyadic system function such as `⎕NC`.
    SystemFunctionName,

    // Value classes produced while reducing.
    /// An array value.
    Constant,
    /// An array value produced by an assignment; not displayed.
    CommittedValue,
    /// The absence of a value, produced by a defined function without result.
    Nil,
    /// The target of a branch.
    Branch,
    /// An index list still being collected, right to left.
    PartialIndexList,
    /// A fully collected index list or axis specification.
    CompleteIndexList,
    /// The marker before the first token of a statement.
    LeftEndOfStatement,
    /// The marker after the last token of a statement.
    RightEndOfStatement,
}

impl TokenClass {
    /// Returns `true` for classes naming something applied as a function.
    #[must_use]
    pub const fn is_function(self) -> bool {
        matches!(self,
                 Self::PrimitiveFunction | Self::DefinedFunctionName | Self::SystemFunctionName)
    }

    /// Returns `true` for classes that hold an array result.
    #[must_use]
    pub const fn is_result(self) -> bool {
        matches!(self, Self::Constant | Self::CommittedValue | Self::Nil)
    }
}

/// The payload of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// A single glyph or a one-character name.
    Char(char),
    /// Raw text: a name or an unconverted literal.
    Chars(Vec<char>),
    /// A materialized literal or a computed result.
    Array(Array),
    /// Branch targets.
    Numbers(Vec<Number>),
    /// The items of an index list; `None` stands for an elided item.
    IndexList(Vec<Option<Array>>),
}

/// A classified unit of a statement.
///
/// Tokens are never mutated: recognition and reduction replace a token by a
/// new one of a different class.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The class of the token.
    pub class:   TokenClass,
    /// The payload, if any.
    pub content: Option<Content>,
    /// Character offset of the token within its line.
    pub offset:  usize,
}

impl Token {
    /// Creates a token.
    #[must_use]
    pub const fn new(class: TokenClass, content: Option<Content>, offset: usize) -> Self {
        Self { class,
               content,
               offset }
    }

    /// Creates a token without content, such as an end-of-statement marker.
    #[must_use]
    pub const fn marker(class: TokenClass, offset: usize) -> Self {
        Self::new(class, None, offset)
    }

    /// Creates a value token of class `class` holding `array`.
    #[must_use]
    pub const fn value(class: TokenClass, array: Array, offset: usize) -> Self {
        Self::new(class, Some(Content::Array(array)), offset)
    }

    /// Returns a copy of the token with a different class.
    #[must_use]
    pub fn with_class(&self, class: TokenClass) -> Self {
        Self { class,
               content: self.content.clone(),
               offset: self.offset }
    }

    /// Returns the glyph of a single-character token.
    #[must_use]
    pub const fn glyph(&self) -> Option<char> {
        match &self.content {
            Some(Content::Char(c)) => Some(*c),
            _ => None,
        }
    }

    /// Returns the raw text of the token.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::token::{Content, Token, TokenClass};
    ///
    /// let token = Token::new(TokenClass::SimpleIdentifier, Some(Content::Chars("abc".chars().collect())), 0);
    /// assert_eq!(token.text().as_deref(), Some("abc"));
    /// ```
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match &self.content {
            Some(Content::Char(c)) => Some(c.to_string()),
            Some(Content::Chars(chars)) => Some(chars.iter().collect()),
            _ => None,
        }
    }

    /// Returns the array held by a value token.
    #[must_use]
    pub const fn array(&self) -> Option<&Array> {
        match &self.content {
            Some(Content::Array(array)) => Some(array),
            _ => None,
        }
    }

    /// Consumes the token, returning its array.
    #[must_use]
    pub fn into_array(self) -> Option<Array> {
        match self.content {
            Some(Content::Array(array)) => Some(array),
            _ => None,
        }
    }

    /// Returns the items of an index list token.
    #[must_use]
    pub fn index_list(&self) -> Option<&[Option<Array>]> {
        match &self.content {
            Some(Content::IndexList(items)) => Some(items),
            _ => None,
        }
    }
}
