use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            array::{Array, Element},
            number::Number,
        },
    },
    util::num::{MAX_ARRAY_ITEMS, i64_to_usize_checked, item_count, usize_to_f64},
};

/// Resolves an optional axis specification to a zero-based axis.
///
/// # Parameters
/// - `axis`: The bracketed axis, counted from the index origin.
/// - `rank`: Rank of the array the axis applies to.
/// - `default`: Axis used when none is given.
///
/// # Errors
/// Returns a `DomainError` for a non-integral axis and an `IndexError` for an
/// axis outside `0..rank`.
pub fn resolve_axis(ctx: &Context<'_, '_>, axis: Option<&Array>, rank: usize, default: usize) -> EvalResult<usize> {
    let Some(axis) = axis else {
        return Ok(default);
    };
    let value = axis.scalar_number()?
                    .to_integer()
                    .ok_or_else(|| AplError::domain("Axis must be an integer."))?;
    let origin = i64::from(ctx.index_origin() == 1);
    usize::try_from(value - origin).ok()
                                   .filter(|axis| *axis < rank.max(1))
                                   .ok_or_else(|| AplError::index("Axis out of range."))
}

/// Splits a shape around `axis` into the number of cells before it, its
/// length, and the number of items after it.
///
/// # Example
/// ```
/// use aplite::interpreter::evaluator::utils::split_shape;
///
/// assert_eq!(split_shape(&[2, 3, 4], 1), (2, 3, 4));
/// assert_eq!(split_shape(&[5], 0), (1, 5, 1));
/// assert_eq!(split_shape(&[], 0), (1, 1, 1));
/// ```
#[must_use]
pub fn split_shape(shape: &[usize], axis: usize) -> (usize, usize, usize) {
    if shape.is_empty() {
        return (1, 1, 1);
    }
    let outer = shape[..axis].iter().product();
    let inner = shape[axis + 1..].iter().product();
    (outer, shape[axis], inner)
}

/// Returns the row-major strides of `shape`.
#[must_use]
pub fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Converts an origin-based index to a zero-based position below `len`.
///
/// # Errors
/// Returns a `DomainError` for a non-integer and an `IndexError` for an index
/// outside the axis.
pub fn position(number: Number, origin: usize, len: usize) -> EvalResult<usize> {
    let index = number.to_integer()
                      .ok_or_else(|| AplError::domain("Index must be an integer."))?;
    let origin = i64::from(origin == 1);
    usize::try_from(index - origin).ok()
                                   .filter(|position| *position < len)
                                   .ok_or_else(|| AplError::index("Index out of range."))
}

/// Returns a simple item as a non-negative count.
///
/// # Errors
/// Returns a `DomainError` for anything but a non-negative integer.
pub fn count(element: &Element) -> EvalResult<usize> {
    let value = element.as_number()
                       .and_then(Number::to_integer)
                       .ok_or_else(|| AplError::domain("Expected a non-negative integer."))?;
    i64_to_usize_checked(value, AplError::domain("Expected a non-negative integer."))
}

/// Returns every item of an array as a non-negative count.
///
/// # Errors
/// As [`count`].
pub fn counts(array: &Array) -> EvalResult<Vec<usize>> {
    array.ravel().iter().map(count).collect()
}

/// Returns the number `n` as an element.
#[must_use]
pub fn number_element(n: usize) -> Element {
    Element::Number(Number::from_real(usize_to_f64(n)))
}

/// Returns the boolean a simple item stands for, if any.
#[must_use]
pub fn as_boolean(element: &Element) -> Option<bool> {
    element.as_number().and_then(Number::to_boolean)
}

/// Returns the origin-based index vector `⍳n` as elements.
///
/// # Errors
/// Returns a `LimitError` if `n` exceeds the items an array may hold.
pub fn iota(n: usize, origin: usize) -> EvalResult<Vec<Element>> {
    if n > MAX_ARRAY_ITEMS {
        return Err(AplError::limit("Array is too large."));
    }
    Ok((origin..n + origin).map(number_element).collect())
}

/// Steps a row-major multi-index to the next position within `shape`.
pub fn advance(index: &mut [usize], shape: &[usize]) {
    for axis in (0..shape.len()).rev() {
        index[axis] += 1;
        if index[axis] < shape[axis] {
            return;
        }
        index[axis] = 0;
    }
}

/// Builds an array of shape `shape` by mapping each position, axis by axis,
/// to a position of `source`, which must have the same rank.
///
/// A position mapped to `None` on any axis takes the fill item of `source`.
pub fn gather(source: &Array, shape: Vec<usize>, map: impl Fn(usize, usize) -> Option<usize>) -> EvalResult<Array> {
    let fill = source.prototype();
    let source_strides = strides(source.shape());
    let total = item_count(&shape)?;
    let mut index = vec![0; shape.len()];
    let mut ravel = Vec::with_capacity(total);
    for _ in 0..total {
        let offset = index.iter()
                          .enumerate()
                          .try_fold(0, |offset, (axis, &i)| map(axis, i).map(|s| offset + s * source_strides[axis]));
        ravel.push(offset.map_or_else(|| fill.clone(), |offset| source.ravel()[offset].clone()));
        advance(&mut index, &shape);
    }
    Array::new(shape, ravel)
}
