use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::EvalResult,
        value::number::{Number, ZERO},
    },
    util::num::item_count,
};

/// A single item of an array's ravel.
///
/// Nested arrays are owned by the slot that holds them, so a value is always
/// a tree and never contains itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A character.
    Char(char),
    /// A complex number.
    Number(Number),
    /// An enclosed array.
    Array(Box<Array>),
}

impl Element {
    /// Returns the fill item matching this element's structure.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::{array::Element, number::ZERO};
    ///
    /// assert_eq!(Element::Char('x').prototype(), Element::Char(' '));
    /// assert_eq!(Element::Number(7.0.into()).prototype(), Element::Number(ZERO));
    /// ```
    #[must_use]
    pub fn prototype(&self) -> Self {
        match self {
            Self::Char(_) => Self::Char(' '),
            Self::Number(_) => Self::Number(ZERO),
            Self::Array(inner) => {
                let ravel = inner.ravel.iter().map(Self::prototype).collect();
                Self::Array(Box::new(Array { shape: inner.shape.clone(),
                                             ravel }))
            },
        }
    }

    /// Returns the number held by the element, if any.
    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(number) => Some(*number),
            _ => None,
        }
    }

    /// Returns the depth of the element: `0` for simple items.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Array(inner) => inner.depth(),
            _ => 0,
        }
    }

    /// Converts the element into an array, disclosing enclosed arrays and
    /// wrapping simple items as scalars.
    #[must_use]
    pub fn into_array(self) -> Array {
        match self {
            Self::Array(inner) => *inner,
            simple => Array::scalar(simple),
        }
    }

    /// Returns `true` if the element is an enclosed array.
    #[must_use]
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Array(_))
    }
}

impl From<Number> for Element {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<char> for Element {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<Array> for Element {
    /// Wraps an array as an element, enclosing it unless it is a simple
    /// scalar.
    fn from(value: Array) -> Self {
        if value.is_simple_scalar() {
            return value.ravel.into_iter().next().unwrap_or(Self::Number(ZERO));
        }
        Self::Array(Box::new(value))
    }
}

/// The universal value: a shape and a row-major ravel.
///
/// The length of the ravel always equals the product of the shape, which is
/// `1` for a scalar.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    shape: Vec<usize>,
    ravel: Vec<Element>,
}

impl Array {
    /// Creates an array, validating that the ravel fits the shape.
    ///
    /// # Errors
    /// Returns a `LimitError` if `shape` is too large and an `InternalError`
    /// if `ravel.len()` differs from the product of `shape`.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::array::{Array, Element};
    ///
    /// let ravel = (1..=6).map(|n| Element::Number(f64::from(n).into())).collect();
    /// let matrix = Array::new(vec![2, 3], ravel).unwrap();
    /// assert_eq!(matrix.rank(), 2);
    ///
    /// assert!(Array::new(vec![2, 2], vec![Element::Char('a')]).is_err());
    /// ```
    pub fn new(shape: Vec<usize>, ravel: Vec<Element>) -> EvalResult<Self> {
        let expected = item_count(&shape)?;
        if expected != ravel.len() {
            return Err(AplError::internal(format!("Array of shape {shape:?} cannot hold {} items.",
                                                  ravel.len())));
        }
        Ok(Self { shape, ravel })
    }

    /// Creates a rank-0 array holding `element`.
    #[must_use]
    pub fn scalar(element: Element) -> Self {
        Self { shape: Vec::new(),
               ravel: vec![element], }
    }

    /// Creates a vector from its items.
    #[must_use]
    pub fn vector(ravel: Vec<Element>) -> Self {
        Self { shape: vec![ravel.len()],
               ravel }
    }

    /// Creates a numeric scalar.
    #[must_use]
    pub fn number(number: impl Into<Number>) -> Self {
        Self::scalar(Element::Number(number.into()))
    }

    /// Creates a numeric vector.
    #[must_use]
    pub fn numbers<N: Into<Number>>(numbers: impl IntoIterator<Item = N>) -> Self {
        Self::vector(numbers.into_iter().map(|n| Element::Number(n.into())).collect())
    }

    /// Creates a character vector from text.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::array::Array;
    ///
    /// let text = Array::chars("AB");
    /// assert_eq!(text.shape(), &[2]);
    /// assert_eq!(text.to_text().unwrap(), "AB");
    /// ```
    #[must_use]
    pub fn chars(text: &str) -> Self {
        Self::vector(text.chars().map(Element::Char).collect())
    }

    /// The empty numeric vector.
    #[must_use]
    pub fn zilde() -> Self {
        Self { shape: vec![0],
               ravel: Vec::new(), }
    }

    /// Returns the shape.
    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Returns the ravel.
    #[must_use]
    pub fn ravel(&self) -> &[Element] {
        &self.ravel
    }

    /// Consumes the array, returning its ravel.
    #[must_use]
    pub fn into_ravel(self) -> Vec<Element> {
        self.ravel
    }

    /// Consumes the array, returning its shape and ravel.
    #[must_use]
    pub fn into_parts(self) -> (Vec<usize>, Vec<Element>) {
        (self.shape, self.ravel)
    }

    /// Returns the number of axes.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Returns the number of items in the ravel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ravel.len()
    }

    /// Returns `true` if the ravel is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ravel.is_empty()
    }

    /// Returns `true` for rank-0 arrays.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        self.shape.is_empty()
    }

    /// Returns `true` for rank-0 arrays whose item is not itself an array.
    #[must_use]
    pub fn is_simple_scalar(&self) -> bool {
        self.is_scalar() && !self.ravel[0].is_nested()
    }

    /// Returns `true` if no item is an enclosed array.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        !self.ravel.iter().any(Element::is_nested)
    }

    /// Returns the nesting depth: `0` for simple scalars, `1` for simple
    /// non-scalar arrays, and one more than the deepest item otherwise.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::array::{Array, Element};
    ///
    /// assert_eq!(Array::number(3.0).depth(), 0);
    /// assert_eq!(Array::chars("abc").depth(), 1);
    /// let nested = Array::vector(vec![Element::from(Array::chars("ab")), Element::Char('c')]);
    /// assert_eq!(nested.depth(), 2);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let deepest = self.ravel.iter().map(Element::depth).max().unwrap_or(0);
        if self.is_simple_scalar() { 0 } else { deepest + 1 }
    }

    /// Returns the fill item of the array.
    #[must_use]
    pub fn prototype(&self) -> Element {
        self.ravel.first().map_or(Element::Number(ZERO), Element::prototype)
    }

    /// Returns the first item, or the prototype when the array is empty.
    #[must_use]
    pub fn first(&self) -> Element {
        self.ravel.first().cloned().unwrap_or_else(|| self.prototype())
    }

    /// Encloses the array. Simple scalars are left unchanged.
    #[must_use]
    pub fn enclose(self) -> Self {
        if self.is_simple_scalar() {
            return self;
        }
        Self::scalar(Element::Array(Box::new(self)))
    }

    /// Returns the same ravel under a new shape.
    ///
    /// # Errors
    /// Returns an `InternalError` if the shape does not fit the ravel.
    pub fn reshaped(self, shape: Vec<usize>) -> EvalResult<Self> {
        Self::new(shape, self.ravel)
    }

    /// Returns the sole number of a one-item array.
    ///
    /// # Errors
    /// Returns a `LengthError` if the array has more than one item and a
    /// `DomainError` if the item is not a number.
    pub fn scalar_number(&self) -> EvalResult<Number> {
        if self.ravel.len() != 1 {
            return Err(AplError::length("Expected a single number."));
        }
        self.ravel[0].as_number()
                     .ok_or_else(|| AplError::domain("Expected a number."))
    }

    /// Returns the sole near-integer of a one-item array.
    ///
    /// # Errors
    /// As [`Array::scalar_number`], plus a `DomainError` for non-integers.
    pub fn scalar_integer(&self) -> EvalResult<i64> {
        self.scalar_number()?
            .to_integer()
            .ok_or_else(|| AplError::domain("Expected an integer."))
    }

    /// Returns every item as a number.
    ///
    /// # Errors
    /// Returns a `DomainError` if any item is not a number.
    pub fn to_numbers(&self) -> EvalResult<Vec<Number>> {
        self.ravel
            .iter()
            .map(|element| element.as_number().ok_or_else(|| AplError::domain("Expected numbers.")))
            .collect()
    }

    /// Returns every item as a near-integer.
    ///
    /// # Errors
    /// Returns a `DomainError` if any item is not a near-integer.
    pub fn to_integers(&self) -> EvalResult<Vec<i64>> {
        self.to_numbers()?
            .into_iter()
            .map(|number| number.to_integer().ok_or_else(|| AplError::domain("Expected integers.")))
            .collect()
    }

    /// Returns the text of a simple character scalar or vector.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        if self.rank() > 1 {
            return None;
        }
        self.ravel
            .iter()
            .map(|element| match element {
                Element::Char(c) => Some(*c),
                _ => None,
            })
            .collect()
    }
}
