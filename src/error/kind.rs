use std::fmt::Display;

/// Represents every class of failure the interpreter distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The line could not be tokenized or recognized as a statement.
    Syntax,
    /// A name was referenced that has no value.
    Value,
    /// An argument is outside the domain of a function.
    Domain,
    /// Arguments have incompatible ranks.
    Rank,
    /// Arguments have incompatible lengths.
    Length,
    /// An index or axis is out of range.
    Index,
    /// A configuration value is outside its allowed bounds.
    Limit,
    /// A function definition is malformed.
    Definition,
    /// The interpreter reached a state its tables should have ruled out.
    Internal,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let heading = match self {
            Self::Syntax => "SYNTAX ERROR",
            Self::Value => "VALUE ERROR",
            Self::Domain => "DOMAIN ERROR",
            Self::Rank => "RANK ERROR",
            Self::Length => "LENGTH ERROR",
            Self::Index => "INDEX ERROR",
            Self::Limit => "LIMIT ERROR",
            Self::Definition => "DEFINITION ERROR",
            Self::Internal => "INTERNAL ERROR",
        };
        write!(f, "{heading}")
    }
}
