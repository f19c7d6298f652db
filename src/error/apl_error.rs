use thiserror::Error;

use crate::error::ErrorKind;

/// A failure raised anywhere in the evaluation pipeline.
///
/// Errors are values: they terminate the statement that raised them and are
/// handed back to the caller, never unwinding the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct AplError {
    /// The class of failure.
    pub kind:    ErrorKind,
    /// A human readable description.
    pub message: String,
    /// Character offset of the failure within `line`, when known.
    pub offset:  Option<usize>,
    /// The offending line, attached at the statement boundary.
    pub line:    Option<String>,
}

impl AplError {
    /// Creates an error of the given kind without position information.
    ///
    /// # Example
    /// ```
    /// use aplite::error::{AplError, ErrorKind};
    ///
    /// let error = AplError::new(ErrorKind::Domain, "Dividing by 0.");
    /// assert_eq!(error.to_string(), "DOMAIN ERROR: Dividing by 0.");
    /// ```
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { kind,
               message: message.into(),
               offset: None,
               line: None }
    }

    /// Shorthand for a [`ErrorKind::Syntax`] error.
    #[must_use]
    pub fn syntax(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Syntax, message)
    }
    /// Shorthand for a [`ErrorKind::Value`] error.
    #[must_use]
    pub fn value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Value, message)
    }
    /// Shorthand for a [`ErrorKind::Domain`] error.
    #[must_use]
    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Domain, message)
    }
    /// Shorthand for a [`ErrorKind::Rank`] error.
    #[must_use]
    pub fn rank(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Rank, message)
    }
    /// Shorthand for a [`ErrorKind::Length`] error.
    #[must_use]
    pub fn length(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Length, message)
    }
    /// Shorthand for a [`ErrorKind::Index`] error.
    #[must_use]
    pub fn index(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Index, message)
    }
    /// Shorthand for a [`ErrorKind::Limit`] error.
    #[must_use]
    pub fn limit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Limit, message)
    }
    /// Shorthand for a [`ErrorKind::Definition`] error.
    #[must_use]
    pub fn definition(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Definition, message)
    }
    /// Shorthand for a [`ErrorKind::Internal`] error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Records the offset of the failure unless one is already known.
    ///
    /// The innermost component that knows a position wins, so outer layers
    /// can call this unconditionally.
    #[must_use]
    pub const fn at(mut self, offset: usize) -> Self {
        if self.offset.is_none() {
            self.offset = Some(offset);
        }
        self
    }

    /// Attaches the offending line unless one is already attached.
    #[must_use]
    pub fn with_line(mut self, line: &str) -> Self {
        if self.line.is_none() {
            self.line = Some(line.to_string());
        }
        self
    }

    /// Renders the attached line with a caret under the failure offset.
    ///
    /// # Returns
    /// `None` unless both the line and the offset are known.
    ///
    /// # Example
    /// ```
    /// use aplite::error::AplError;
    ///
    /// let error = AplError::syntax("Unterminated character literal.").at(4)
    ///                                                                 .with_line("1 + 'abc");
    /// assert_eq!(error.caret().unwrap(), "1 + 'abc\n    ^");
    /// ```
    #[must_use]
    pub fn caret(&self) -> Option<String> {
        let line = self.line.as_ref()?;
        let offset = self.offset?;
        Some(format!("{line}\n{}^", " ".repeat(offset)))
    }
}
