use std::collections::VecDeque;

use crate::interpreter::token::{Token, TokenClass};

/// A syntactic class a phrase pattern matches stack tokens against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhraseClass {
    /// A value, committed value or nil.
    Result,
    /// A primitive, defined or system function.
    Function,
    /// A primitive or defined monadic operator.
    MonadicOperator,
    /// A primitive or defined dyadic operator.
    DyadicOperator,
    /// A niladic defined or system function.
    Niladic,
    /// A variable, system variable or shared variable name.
    Variable,
    /// Any token that cannot be a left argument.
    Wildcard,
    LeftParenthesis,
    RightParenthesis,
    LeftIndexBracket,
    RightIndexBracket,
    LeftAxisBracket,
    RightAxisBracket,
    IndexSeparator,
    AssignmentArrow,
    BranchArrow,
    SmallCircle,
    PartialList,
    CompleteList,
    LeftEnd,
    RightEnd,
}

impl PhraseClass {
    /// Returns `true` if a token of class `class` belongs to this pattern
    /// class.
    #[must_use]
    pub const fn matches(self, class: TokenClass) -> bool {
        use TokenClass as T;

        match self {
            Self::Result => class.is_result(),
            Self::Function => class.is_function(),
            Self::MonadicOperator => matches!(class, T::MonadicOperator | T::DefinedMonadicOperatorName),
            Self::DyadicOperator => matches!(class, T::DyadicOperator | T::DefinedDyadicOperatorName),
            Self::Niladic => matches!(class, T::NiladicDefinedFunctionName | T::NiladicSystemFunctionName),
            Self::Variable => matches!(class, T::VariableName | T::SystemVariableName | T::SharedVariableName),
            Self::Wildcard => {
                class.is_function()
                || matches!(class,
                            T::AssignmentArrow
                            | T::BranchArrow
                            | T::IndexSeparator
                            | T::LeftAxisBracket
                            | T::RightAxisBracket
                            | T::LeftEndOfStatement
                            | T::LeftIndexBracket
                            | T::LeftParenthesis
                            | T::MonadicOperator
                            | T::DefinedMonadicOperatorName)
            },
            Self::LeftParenthesis => matches!(class, T::LeftParenthesis),
            Self::RightParenthesis => matches!(class, T::RightParenthesis),
            Self::LeftIndexBracket => matches!(class, T::LeftIndexBracket),
            Self::RightIndexBracket => matches!(class, T::RightIndexBracket),
            Self::LeftAxisBracket => matches!(class, T::LeftAxisBracket),
            Self::RightAxisBracket => matches!(class, T::RightAxisBracket),
            Self::IndexSeparator => matches!(class, T::IndexSeparator),
            Self::AssignmentArrow => matches!(class, T::AssignmentArrow),
            Self::BranchArrow => matches!(class, T::BranchArrow),
            Self::SmallCircle => matches!(class, T::SmallCircle),
            Self::PartialList => matches!(class, T::PartialIndexList),
            Self::CompleteList => matches!(class, T::CompleteIndexList),
            Self::LeftEnd => matches!(class, T::LeftEndOfStatement),
            Self::RightEnd => matches!(class, T::RightEndOfStatement),
        }
    }
}

/// The reduction a matched phrase performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// `( B )`
    RemoveParentheses,
    /// `N`
    Niladic,
    /// `X F B`
    Monadic,
    /// `X F K B`
    MonadicAxis,
    /// `X F M B`
    MonadicDerived,
    /// `X F M K B`
    MonadicDerivedAxis,
    /// `A F M B`
    DyadicDerived,
    /// `A F M K B`
    DyadicDerivedAxis,
    /// `A F B`
    Dyadic,
    /// `A F K B`
    DyadicAxis,
    /// `X F D G B`
    MonadicComposed,
    /// `A F D G B` and `A ∘ . G B`
    DyadicComposed,
    /// `A K`
    Index,
    /// `V K ← B`
    IndexedAssign,
    /// `V ← B`
    Assign,
    /// `V`
    Reference,
    /// `]`
    OpenList,
    /// `; I`
    ElideItem,
    /// `; B I`
    PrependItem,
    /// `[ I`
    CloseElided,
    /// `[ B I`
    CloseItem,
    /// `[ B ]` as an axis.
    Axis,
    /// `L R`
    EmptyStatement,
    /// `L B R`
    ResultStatement,
    /// `L → B R`
    BranchStatement,
    /// `L → R`
    EscapeStatement,
}

/// A pattern over the front of the stack and the reduction it triggers.
#[derive(Debug)]
pub struct Phrase {
    /// Pattern classes, front of the stack first.
    pub pattern: &'static [PhraseClass],
    /// The reduction to perform.
    pub action:  Action,
}

use PhraseClass::{
    AssignmentArrow as Ar, BranchArrow as Br, CompleteList as K, DyadicOperator as D, Function as F,
    IndexSeparator as Sep, LeftAxisBracket as Lab, LeftEnd as L, LeftIndexBracket as Lb, LeftParenthesis as Lp,
    MonadicOperator as M, Niladic as N, PartialList as I, Result as B, RightAxisBracket as Rab, RightEnd as R,
    RightIndexBracket as Rb, RightParenthesis as Rp, SmallCircle as Sc, Variable as V, Wildcard as X,
};

/// Every phrase, in the order they are tried.
pub static PHRASES: &[Phrase] = &[
    Phrase { pattern: &[Lp, B, Rp],
             action:  Action::RemoveParentheses, },
    Phrase { pattern: &[N],
             action:  Action::Niladic, },
    Phrase { pattern: &[X, F, B],
             action:  Action::Monadic, },
    Phrase { pattern: &[X, F, K, B],
             action:  Action::MonadicAxis, },
    Phrase { pattern: &[X, F, M, B],
             action:  Action::MonadicDerived, },
    Phrase { pattern: &[X, F, M, K, B],
             action:  Action::MonadicDerivedAxis, },
    Phrase { pattern: &[B, F, M, B],
             action:  Action::DyadicDerived, },
    Phrase { pattern: &[B, F, M, K, B],
             action:  Action::DyadicDerivedAxis, },
    Phrase { pattern: &[B, F, B],
             action:  Action::Dyadic, },
    Phrase { pattern: &[B, F, K, B],
             action:  Action::DyadicAxis, },
    Phrase { pattern: &[X, F, D, F, B],
             action:  Action::MonadicComposed, },
    Phrase { pattern: &[B, F, D, F, B],
             action:  Action::DyadicComposed, },
    Phrase { pattern: &[B, Sc, D, F, B],
             action:  Action::DyadicComposed, },
    Phrase { pattern: &[B, K],
             action:  Action::Index, },
    Phrase { pattern: &[V, K, Ar, B],
             action:  Action::IndexedAssign, },
    Phrase { pattern: &[V, Ar, B],
             action:  Action::Assign, },
    Phrase { pattern: &[V],
             action:  Action::Reference, },
    Phrase { pattern: &[Rb],
             action:  Action::OpenList, },
    Phrase { pattern: &[Sep, B, I],
             action:  Action::PrependItem, },
    Phrase { pattern: &[Sep, I],
             action:  Action::ElideItem, },
    Phrase { pattern: &[Lb, B, I],
             action:  Action::CloseItem, },
    Phrase { pattern: &[Lb, I],
             action:  Action::CloseElided, },
    Phrase { pattern: &[Lab, B, Rab],
             action:  Action::Axis, },
    Phrase { pattern: &[L, R],
             action:  Action::EmptyStatement, },
    Phrase { pattern: &[L, B, R],
             action:  Action::ResultStatement, },
    Phrase { pattern: &[L, Br, B, R],
             action:  Action::BranchStatement, },
    Phrase { pattern: &[L, Br, R],
             action:  Action::EscapeStatement, },
];

/// Finds the first phrase matching the front of `stack`.
#[must_use]
pub fn find_phrase(stack: &VecDeque<Token>) -> Option<&'static Phrase> {
    PHRASES.iter().find(|phrase| {
                      phrase.pattern.len() <= stack.len()
                      && phrase.pattern
                               .iter()
                               .zip(stack)
                               .all(|(class, token)| class.matches(token.class))
                  })
}
