use tracing::debug;

use crate::interpreter::{
    evaluator::{
        core::{Context, EvalResult},
        defined, operators, scalar, structural, system,
    },
    symbol::{function::DefinedFunction, table::Callable},
    token::{Token, TokenClass},
    value::array::{Array, Element},
};

/// An abstract token kind a pattern position can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// An array value.
    Constant,
    /// An index list or axis specification.
    CompleteList,
    /// Anything applied as a function: primitive, system or defined.
    Function,
    /// A defined function or operator.
    Defined,
    /// Anything else; only matched by exact content.
    Other,
}

/// One position of a form pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    /// Matches the token holding exactly this glyph.
    Glyph(char),
    /// Matches the token holding exactly this distinguished name.
    Name(&'static str),
    /// Matches any token of this kind.
    Kind(Kind),
}

/// The observed shape of one matched position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    kind:  Kind,
    glyph: Option<char>,
    name:  Option<String>,
}

impl Probe {
    /// A probe standing for any value.
    #[must_use]
    pub const fn constant() -> Self {
        Self { kind:  Kind::Constant,
               glyph: None,
               name:  None, }
    }

    /// A probe standing for any index list.
    #[must_use]
    pub const fn complete_list() -> Self {
        Self { kind:  Kind::CompleteList,
               glyph: None,
               name:  None, }
    }

    /// A probe for a bare glyph such as `←`.
    #[must_use]
    pub const fn glyph(glyph: char) -> Self {
        Self { kind:  Kind::Other,
               glyph: Some(glyph),
               name:  None, }
    }

    /// A probe for a distinguished name.
    #[must_use]
    pub fn name(name: &str) -> Self {
        Self { kind:  Kind::Other,
               glyph: None,
               name:  Some(name.to_string()), }
    }

    /// The probe of something applied as a function or operator operand.
    #[must_use]
    pub fn callable(callable: &Callable) -> Self {
        match callable {
            Callable::Primitive(glyph) => Self { kind:  Kind::Function,
                                                 glyph: Some(*glyph),
                                                 name:  None, },
            Callable::System(name) => Self { kind:  Kind::Function,
                                             glyph: None,
                                             name:  Some(name.clone()), },
            Callable::Defined(_) => Self { kind:  Kind::Defined,
                                           glyph: None,
                                           name:  None, },
        }
    }

    /// The probe of a token on the interpreter's stack.
    #[must_use]
    pub fn token(token: &Token) -> Self {
        let kind = match token.class {
            TokenClass::Constant | TokenClass::CommittedValue => Kind::Constant,
            TokenClass::CompleteIndexList => Kind::CompleteList,
            TokenClass::PrimitiveFunction | TokenClass::SystemFunctionName => Kind::Function,
            TokenClass::DefinedFunctionName
            | TokenClass::NiladicDefinedFunctionName
            | TokenClass::DefinedMonadicOperatorName
            | TokenClass::DefinedDyadicOperatorName => Kind::Defined,
            _ => Kind::Other,
        };
        let name = match token.class {
            TokenClass::SystemVariableName
            | TokenClass::SystemFunctionName
            | TokenClass::NiladicSystemFunctionName
            | TokenClass::DistinguishedIdentifier => token.text(),
            _ => None,
        };
        Self { kind,
               glyph: token.glyph(),
               name }
    }
}

impl Atom {
    /// Returns `true` if the probe satisfies this position.
    #[must_use]
    pub fn matches(&self, probe: &Probe) -> bool {
        match self {
            Self::Glyph(glyph) => probe.glyph == Some(*glyph),
            Self::Name(name) => probe.name.as_deref() == Some(*name),
            Self::Kind(Kind::Function) => matches!(probe.kind, Kind::Function | Kind::Defined),
            Self::Kind(kind) => probe.kind == *kind,
        }
    }
}

/// An optional axis specification.
pub type Axis<'a> = Option<&'a Array>;

/// Produces a value from nothing.
pub type NiladicFn = fn(&mut Context<'_, '_>) -> EvalResult<Array>;
/// Validates and stores a value, returning what was stored.
pub type AssignFn = fn(&mut Context<'_, '_>, Array) -> EvalResult<Array>;
/// Acts on one simple item.
pub type MonadicScalarFn = fn(&Context<'_, '_>, &Element) -> EvalResult<Element>;
/// Acts on a pair of simple items.
pub type DyadicScalarFn = fn(&Context<'_, '_>, &Element, &Element) -> EvalResult<Element>;
/// Acts on a whole array.
pub type MonadicFn = fn(&mut Context<'_, '_>, Array, Axis<'_>) -> EvalResult<Array>;
/// Acts on two whole arrays.
pub type DyadicFn = fn(&mut Context<'_, '_>, Array, Array, Axis<'_>) -> EvalResult<Array>;
/// Derives a function from one operand and applies it.
pub type MonadicOperatorFn = fn(&mut Context<'_, '_>, &Callable, Option<Array>, Array, Axis<'_>) -> EvalResult<Array>;
/// Derives a function from two operands and applies it.
pub type DyadicOperatorFn = fn(&mut Context<'_, '_>, &Callable, &Callable, Option<Array>, Array) -> EvalResult<Array>;
/// Runs a defined function.
pub type DefinedFn =
    fn(&mut Context<'_, '_>, &DefinedFunction, Option<Array>, Option<Array>) -> EvalResult<Option<Array>>;
/// Runs a defined operator with its operands.
pub type DefinedOperatorFn = fn(&mut Context<'_, '_>,
                                &DefinedFunction,
                                &Callable,
                                Option<&Callable>,
                                Option<Array>,
                                Array)
                                -> EvalResult<Option<Array>>;

/// The implementation a form dispatches to, by arity and extension.
#[derive(Debug, Clone, Copy)]
pub enum Evaluator {
    /// A niladic function.
    Niladic(NiladicFn),
    /// Assignment to a system variable.
    Assign(AssignFn),
    /// A monadic function extended across every simple item.
    MonadicScalar(MonadicScalarFn),
    /// A dyadic function extended across every pair of simple items.
    DyadicScalar(DyadicScalarFn),
    /// A monadic function on whole arrays.
    Monadic(MonadicFn),
    /// A dyadic function on whole arrays.
    Dyadic(DyadicFn),
    /// A primitive monadic operator.
    MonadicOperator(MonadicOperatorFn),
    /// A primitive dyadic operator.
    DyadicOperator(DyadicOperatorFn),
    /// A defined function.
    Defined(DefinedFn),
    /// A defined monadic or dyadic operator.
    DefinedOperator(DefinedOperatorFn),
}

/// A pattern and the evaluator it selects.
#[derive(Debug, Clone, Copy)]
pub struct Form {
    /// The positions to match, left to right.
    pub pattern:   &'static [Atom],
    /// What to run on a match.
    pub evaluator: Evaluator,
}

/// An ordered registry of forms, searched first match wins.
#[derive(Debug)]
pub struct FormTable {
    forms: &'static [Form],
    extra: &'static [Form],
}

impl FormTable {
    /// The registry of every primitive and system name the interpreter knows.
    #[must_use]
    pub const fn standard() -> &'static Self {
        &STANDARD
    }

    /// Finds the first form whose pattern matches `probes` position by
    /// position.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::evaluator::form_table::{FormTable, Probe};
    ///
    /// let forms = FormTable::standard();
    /// let probes = [Probe::constant(), Probe::glyph('+'), Probe::constant()];
    /// assert!(forms.lookup(&probes).is_none());
    /// let probes = [Probe::name("⎕IO"), Probe::glyph('←'), Probe::constant()];
    /// assert!(forms.lookup(&probes).is_some());
    /// ```
    #[must_use]
    pub fn lookup(&self, probes: &[Probe]) -> Option<&Form> {
        let found = self.forms.iter().chain(self.extra).find(|form| {
                                         form.pattern.len() == probes.len()
                                         && form.pattern.iter().zip(probes).all(|(atom, probe)| atom.matches(probe))
                                     });
        if found.is_none() {
            debug!(?probes, "no form matches");
        }
        found
    }
}

use Atom::{Glyph, Kind as K, Name};
use Evaluator::{
    Assign, Defined, DefinedOperator, Dyadic, DyadicOperator, DyadicScalar, Monadic, MonadicOperator, MonadicScalar,
    Niladic,
};

const C: Atom = K(Kind::Constant);
const L: Atom = K(Kind::CompleteList);
const F: Atom = K(Kind::Function);
const D: Atom = K(Kind::Defined);

/// Builds form entries from a glyph or name and the shape of the expression
/// it appears in.
///
/// `monadic` and `dyadic` apply a function; `derived` and `composed` apply
/// the function derived from a monadic or dyadic operator; an `_axis` suffix
/// adds a bracketed axis before the right argument.
macro_rules! forms {
    ($( $kind:ident $($glyph:literal)? $(name $name:literal)? : $evaluator:expr );* $(;)?) => {
        &[ $( forms!(@entry $kind $($glyph)? $(name $name)? : $evaluator) ),* ]
    };
    (@entry monadic $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[Glyph($glyph), C], evaluator: $evaluator }
    };
    (@entry monadic_axis $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[Glyph($glyph), L, C], evaluator: $evaluator }
    };
    (@entry dyadic $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[C, Glyph($glyph), C], evaluator: $evaluator }
    };
    (@entry dyadic_axis $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[C, Glyph($glyph), L, C], evaluator: $evaluator }
    };
    (@entry derived $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[F, Glyph($glyph), C], evaluator: $evaluator }
    };
    (@entry derived_axis $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[F, Glyph($glyph), L, C], evaluator: $evaluator }
    };
    (@entry derived_dyadic $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[C, F, Glyph($glyph), C], evaluator: $evaluator }
    };
    (@entry outer $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[C, Glyph('∘'), Glyph($glyph), F, C], evaluator: $evaluator }
    };
    (@entry composed $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[F, Glyph($glyph), F, C], evaluator: $evaluator }
    };
    (@entry composed_dyadic $glyph:literal : $evaluator:expr) => {
        Form { pattern: &[C, F, Glyph($glyph), F, C], evaluator: $evaluator }
    };
    (@entry variable name $name:literal : $evaluator:expr) => {
        Form { pattern: &[Name($name), Glyph('←'), C], evaluator: $evaluator }
    };
    (@entry niladic name $name:literal : $evaluator:expr) => {
        Form { pattern: &[Name($name)], evaluator: $evaluator }
    };
    (@entry system name $name:literal : $evaluator:expr) => {
        Form { pattern: &[Name($name), C], evaluator: $evaluator }
    };
}

static STANDARD: FormTable = FormTable {
    forms: forms! {
        // Scalar functions.
        monadic '+': MonadicScalar(scalar::conjugate);
        dyadic '+': DyadicScalar(scalar::plus);
        monadic '-': MonadicScalar(scalar::negative);
        dyadic '-': DyadicScalar(scalar::minus);
        monadic '×': MonadicScalar(scalar::direction);
        dyadic '×': DyadicScalar(scalar::times);
        monadic '÷': MonadicScalar(scalar::reciprocal);
        dyadic '÷': DyadicScalar(scalar::divide);
        monadic '⌈': MonadicScalar(scalar::ceiling);
        dyadic '⌈': DyadicScalar(scalar::maximum);
        monadic '⌊': MonadicScalar(scalar::floor);
        dyadic '⌊': DyadicScalar(scalar::minimum);
        monadic '*': MonadicScalar(scalar::exponential);
        dyadic '*': DyadicScalar(scalar::power);
        monadic '⍟': MonadicScalar(scalar::natural_log);
        dyadic '⍟': DyadicScalar(scalar::logarithm);
        monadic '|': MonadicScalar(scalar::magnitude);
        dyadic '|': DyadicScalar(scalar::residue);
        monadic '!': MonadicScalar(scalar::factorial);
        dyadic '!': DyadicScalar(scalar::binomial);
        monadic '○': MonadicScalar(scalar::pi_times);
        dyadic '○': DyadicScalar(scalar::circular);
        monadic '~': MonadicScalar(scalar::not);
        dyadic '∧': DyadicScalar(scalar::and);
        dyadic '∨': DyadicScalar(scalar::or);
        dyadic '⍲': DyadicScalar(scalar::nand);
        dyadic '⍱': DyadicScalar(scalar::nor);
        dyadic '<': DyadicScalar(scalar::less);
        dyadic '≤': DyadicScalar(scalar::less_or_equal);
        dyadic '=': DyadicScalar(scalar::equal);
        dyadic '≥': DyadicScalar(scalar::greater_or_equal);
        dyadic '>': DyadicScalar(scalar::greater);
        dyadic '≠': DyadicScalar(scalar::not_equal);

        // Structural functions.
        monadic '⍴': Monadic(structural::shape);
        dyadic '⍴': Dyadic(structural::reshape);
        monadic ',': Monadic(structural::ravel);
        dyadic ',': Dyadic(structural::catenate);
        dyadic_axis ',': Dyadic(structural::catenate);
        monadic '⍪': Monadic(structural::table);
        dyadic '⍪': Dyadic(structural::catenate_first);
        monadic '⍳': Monadic(structural::index_generator);
        dyadic '⍳': Dyadic(structural::index_of);
        monadic '⌽': Monadic(structural::reverse);
        monadic_axis '⌽': Monadic(structural::reverse);
        dyadic '⌽': Dyadic(structural::rotate);
        dyadic_axis '⌽': Dyadic(structural::rotate);
        monadic '⊖': Monadic(structural::reverse_first);
        dyadic '⊖': Dyadic(structural::rotate_first);
        monadic '⍉': Monadic(structural::transpose);
        monadic '↑': Monadic(structural::first);
        dyadic '↑': Dyadic(structural::take);
        dyadic '↓': Dyadic(structural::drop);
        monadic '⊂': Monadic(structural::enclose);
        monadic '≡': Monadic(structural::depth);
        dyadic '≡': Dyadic(structural::match_);
        monadic '∊': Monadic(structural::enlist);
        dyadic '∊': Dyadic(structural::membership);
        dyadic '~': Dyadic(structural::without);
        monadic '⍋': Monadic(structural::grade_up);
        monadic '⍒': Monadic(structural::grade_down);
        dyadic '/': Dyadic(structural::replicate);
        dyadic_axis '/': Dyadic(structural::replicate);
        dyadic '⌿': Dyadic(structural::replicate_first);
        monadic '?': Monadic(structural::roll);
        dyadic '?': Dyadic(structural::deal);

        // Primitive operators.
        derived '/': MonadicOperator(operators::reduce);
        derived_axis '/': MonadicOperator(operators::reduce);
        derived '⌿': MonadicOperator(operators::reduce_first);
        derived '\\': MonadicOperator(operators::scan);
        derived_axis '\\': MonadicOperator(operators::scan);
        derived '⍀': MonadicOperator(operators::scan_first);
        derived '¨': MonadicOperator(operators::each);
        derived_dyadic '¨': MonadicOperator(operators::each);
        derived '⍨': MonadicOperator(operators::commute);
        derived_dyadic '⍨': MonadicOperator(operators::commute);
        outer '.': DyadicOperator(operators::outer_product);
        composed_dyadic '.': DyadicOperator(operators::inner_product);
        composed '∘': DyadicOperator(operators::compose);
        composed_dyadic '∘': DyadicOperator(operators::compose);
        composed '⍤': DyadicOperator(operators::atop);
        composed_dyadic '⍤': DyadicOperator(operators::atop);
        composed '⍥': DyadicOperator(operators::over);
        composed_dyadic '⍥': DyadicOperator(operators::over);

        // System names.
        variable name "⎕IO": Assign(system::assign_index_origin);
        variable name "⎕PP": Assign(system::assign_print_precision);
        variable name "⎕CT": Assign(system::assign_comparison_tolerance);
        variable name "⎕RL": Assign(system::assign_random_link);
        variable name "⎕LX": Assign(system::assign_latent_expression);
        niladic name "⎕TS": Niladic(system::timestamp);
        niladic name "⎕AV": Niladic(system::atomic_vector);
        system name "⎕NC": Monadic(system::name_class);
        system name "⎕EX": Monadic(system::erase);
        system name "⎕FX": Monadic(system::fix);
    },
    extra: EXTRA_FORMS,
};

/// Forms whose shape a macro entry cannot express.
const EXTRA_FORMS: &[Form] = &[
    // Defined functions, called monadically, dyadically or niladically.
    Form { pattern:   &[D, C],
           evaluator: Defined(defined::call), },
    Form { pattern:   &[C, D, C],
           evaluator: Defined(defined::call), },
    Form { pattern:   &[D],
           evaluator: Defined(defined::call), },
    // Defined operators.
    Form { pattern:   &[F, D, C],
           evaluator: DefinedOperator(defined::call_operator), },
    Form { pattern:   &[C, F, D, C],
           evaluator: DefinedOperator(defined::call_operator), },
    Form { pattern:   &[F, D, F, C],
           evaluator: DefinedOperator(defined::call_operator), },
    Form { pattern:   &[C, F, D, F, C],
           evaluator: DefinedOperator(defined::call_operator), },
];
