use crate::interpreter::{
    lexer::glyphs::{DYADIC_OPERATORS, MONADIC_OPERATORS, PRIMITIVE_FUNCTIONS},
    parser::core::Recognizer,
    token::TokenClass as T,
};

impl Recognizer<'_> {
    /// `statement ::= '→'? expression? end`
    pub fn statement(&mut self) -> bool {
        self.attempt(|r| {
                r.accept_glyph("→", T::BranchArrow);
                r.expression();
                r.at_end()
            })
    }

    /// ```text
    /// expression ::= assignment
    ///              | operation expression
    ///              | operand (operation expression)?
    /// ```
    pub fn expression(&mut self) -> bool {
        if self.assignment() {
            return true;
        }
        if self.attempt(|r| r.operation() && r.expression()) {
            return true;
        }
        if self.operand() {
            self.attempt(|r| r.operation() && r.expression());
            return true;
        }
        false
    }

    /// `assignment ::= variable index? '←' expression`
    pub fn assignment(&mut self) -> bool {
        self.attempt(|r| {
                if !r.accept(|class| matches!(class, T::VariableName | T::SystemVariableName | T::SharedVariableName)) {
                    return false;
                }
                r.index();
                r.accept_glyph("←", T::AssignmentArrow) && r.expression()
            })
    }

    /// ```text
    /// operation ::= '∘' '.' function
    ///             | function dyadic-op function
    ///             | function axis? (monadic-op axis?)?
    /// ```
    pub fn operation(&mut self) -> bool {
        if self.attempt(|r| {
                   r.accept_glyph("∘", T::SmallCircle)
                   && r.accept_glyph(".", T::DyadicOperator)
                   && r.function()
               })
        {
            return true;
        }
        if self.attempt(|r| r.function() && r.dyadic_operator() && r.function()) {
            return true;
        }
        self.attempt(|r| {
                if !r.function() {
                    return false;
                }
                r.axis();
                if r.monadic_operator() {
                    r.axis();
                }
                true
            })
    }

    /// `function ::= primitive-function | defined-function | system-function`
    pub fn function(&mut self) -> bool {
        self.accept_glyph(PRIMITIVE_FUNCTIONS, T::PrimitiveFunction)
        || self.accept(|class| matches!(class, T::DefinedFunctionName | T::SystemFunctionName))
    }

    /// `monadic-op ::= '/' | '\' | '⌿' | '⍀' | '¨' | '⍨' | defined-monadic-operator`
    pub fn monadic_operator(&mut self) -> bool {
        self.accept_glyph(MONADIC_OPERATORS, T::MonadicOperator)
        || self.accept(|class| class == T::DefinedMonadicOperatorName)
    }

    /// `dyadic-op ::= '.' | '∘' | '⍤' | '⍥' | defined-dyadic-operator`
    pub fn dyadic_operator(&mut self) -> bool {
        self.accept_glyph(".", T::DyadicOperator)
        || self.accept_glyph(DYADIC_OPERATORS, T::DyadicOperator)
        || self.accept(|class| class == T::DefinedDyadicOperatorName)
    }

    /// `axis ::= '[' expression ']'`
    pub fn axis(&mut self) -> bool {
        self.attempt(|r| {
                r.accept_glyph("[", T::LeftAxisBracket) && r.expression() && r.accept_glyph("]", T::RightAxisBracket)
            })
    }

    /// `operand ::= atom index*`
    pub fn operand(&mut self) -> bool {
        if !self.atom() {
            return false;
        }
        while self.index() {}
        true
    }

    /// `atom ::= constant | variable | niladic-function | '(' expression ')'`
    pub fn atom(&mut self) -> bool {
        self.accept(|class| {
                matches!(class,
                         T::Constant
                         | T::VariableName
                         | T::SystemVariableName
                         | T::SharedVariableName
                         | T::NiladicDefinedFunctionName
                         | T::NiladicSystemFunctionName)
            })
        || self.attempt(|r| {
                   r.accept_glyph("(", T::LeftParenthesis)
                   && r.expression()
                   && r.accept_glyph(")", T::RightParenthesis)
               })
    }

    /// `index ::= '[' expression? (';' expression?)* ']'`
    pub fn index(&mut self) -> bool {
        self.attempt(|r| {
                if !r.accept_glyph("[", T::LeftIndexBracket) {
                    return false;
                }
                r.expression();
                while r.accept_glyph(";", T::IndexSeparator) {
                    r.expression();
                }
                r.accept_glyph("]", T::RightIndexBracket)
            })
    }
}

