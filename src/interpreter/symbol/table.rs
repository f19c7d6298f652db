use std::{collections::HashMap, rc::Rc};

use tracing::trace;

use crate::interpreter::{
    symbol::{
        function::{DefinedFunction, Valence},
        system::{DEFAULT_INDEX_ORIGIN, DEFAULT_PRINT_PRECISION, DEFAULT_RANDOM_LINK, SystemParameter},
    },
    value::{array::Array, number::DEFAULT_COMPARISON_TOLERANCE},
};

/// Something that can be applied to arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callable {
    /// A primitive function glyph, bound as an operand of a defined operator.
    Primitive(char),
    /// A system function, bound as an operand of a defined operator.
    System(String),
    /// A user definition.
    Defined(Rc<DefinedFunction>),
}

/// The value a name is bound to.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolValue {
    /// An array.
    Array(Array),
    /// A function or operator.
    Function(Callable),
    /// A line label inside a defined function.
    Label(usize),
}

/// The role a binding gives its name in a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// An array value.
    Variable,
    /// A niladic defined function.
    NiladicFunction,
    /// A monadic or dyadic function.
    Function,
    /// A defined monadic operator.
    MonadicOperator,
    /// A defined dyadic operator.
    DyadicOperator,
    /// A line label.
    Label,
}

impl SymbolValue {
    /// Returns the role this value gives its name.
    #[must_use]
    pub fn kind(&self) -> SymbolKind {
        match self {
            Self::Array(_) => SymbolKind::Variable,
            Self::Label(_) => SymbolKind::Label,
            Self::Function(Callable::Primitive(_) | Callable::System(_)) => SymbolKind::Function,
            Self::Function(Callable::Defined(function)) => match function.header.valence() {
                Valence::Niladic => SymbolKind::NiladicFunction,
                Valence::Monadic | Valence::Dyadic => SymbolKind::Function,
                Valence::MonadicOperator => SymbolKind::MonadicOperator,
                Valence::DyadicOperator => SymbolKind::DyadicOperator,
            },
        }
    }
}

/// Name bindings of one scope.
///
/// The workspace table lives for the whole session. Each call of a defined
/// function gets a child table that sees its caller's names through a
/// read-only parent reference and is dropped when the call returns.
#[derive(Debug, Default)]
pub struct SymbolTable<'p> {
    symbols: HashMap<String, SymbolValue>,
    parent:  Option<&'p SymbolTable<'p>>,
}

impl SymbolTable<'static> {
    /// Creates a workspace table seeded with the system parameters.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::symbol::table::SymbolTable;
    ///
    /// let table = SymbolTable::workspace();
    /// assert_eq!(table.index_origin(), 1);
    /// assert_eq!(table.print_precision(), 10);
    /// ```
    #[must_use]
    pub fn workspace() -> Self {
        let mut table = Self::default();
        for parameter in SystemParameter::ALL {
            table.bind(parameter.name(), SymbolValue::Array(parameter.default_value()));
        }
        table
    }
}

impl<'p> SymbolTable<'p> {
    /// Creates an empty scope whose lookups fall through to `parent`.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::{
    ///     symbol::table::{SymbolTable, SymbolValue},
    ///     value::array::Array,
    /// };
    ///
    /// let mut workspace = SymbolTable::workspace();
    /// workspace.bind("X", SymbolValue::Array(Array::number(1.0)));
    ///
    /// let mut frame = SymbolTable::child_of(&workspace);
    /// frame.bind("Y", SymbolValue::Array(Array::number(2.0)));
    /// assert!(frame.lookup("X").is_some());
    /// assert!(frame.lookup("Y").is_some());
    /// drop(frame);
    /// assert!(workspace.lookup("Y").is_none());
    /// ```
    #[must_use]
    pub fn child_of(parent: &'p SymbolTable<'p>) -> Self {
        Self { symbols: HashMap::new(),
               parent:  Some(parent), }
    }

    /// Finds the binding of `name` in this scope or an enclosing one.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SymbolValue> {
        self.symbols
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }

    /// Finds the binding of `name` in this scope only.
    #[must_use]
    pub fn lookup_local(&self, name: &str) -> Option<&SymbolValue> {
        self.symbols.get(name)
    }

    /// Finds the array bound to `name`.
    #[must_use]
    pub fn lookup_array(&self, name: &str) -> Option<&Array> {
        match self.lookup(name) {
            Some(SymbolValue::Array(array)) => Some(array),
            _ => None,
        }
    }

    /// Binds `name` in this scope, replacing any previous binding.
    pub fn bind(&mut self, name: &str, value: SymbolValue) {
        trace!(name, "bind");
        self.symbols.insert(name.to_string(), value);
    }

    /// Removes the binding of `name` from this scope.
    ///
    /// # Returns
    /// `true` if a binding was removed.
    pub fn erase(&mut self, name: &str) -> bool {
        self.symbols.remove(name).is_some()
    }

    /// Returns the number of scopes enclosing this one.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parent.map_or(0, |parent| parent.depth() + 1)
    }

    /// Returns the index origin, `⎕IO`.
    #[must_use]
    pub fn index_origin(&self) -> usize {
        self.system_integer(SystemParameter::IndexOrigin)
            .and_then(|origin| usize::try_from(origin).ok())
            .unwrap_or(DEFAULT_INDEX_ORIGIN)
    }

    /// Returns the print precision, `⎕PP`.
    #[must_use]
    pub fn print_precision(&self) -> usize {
        self.system_integer(SystemParameter::PrintPrecision)
            .and_then(|precision| usize::try_from(precision).ok())
            .unwrap_or(DEFAULT_PRINT_PRECISION)
    }

    /// Returns the comparison tolerance, `⎕CT`.
    #[must_use]
    pub fn comparison_tolerance(&self) -> f64 {
        self.lookup_array(SystemParameter::ComparisonTolerance.name())
            .and_then(|value| value.scalar_number().ok())
            .map_or(DEFAULT_COMPARISON_TOLERANCE, |number| number.real)
    }

    /// Returns the random link, `⎕RL`.
    #[must_use]
    pub fn random_link(&self) -> u64 {
        self.system_integer(SystemParameter::RandomLink)
            .and_then(|link| u64::try_from(link).ok())
            .unwrap_or_else(|| u64::from(DEFAULT_RANDOM_LINK))
    }

    fn system_integer(&self, parameter: SystemParameter) -> Option<i64> {
        self.lookup_array(parameter.name())
            .and_then(|value| value.scalar_integer().ok())
    }
}
