use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::EvalResult,
        value::array::{Array, Element},
    },
};

/// An elementwise monadic function over simple items.
pub type MonadicItemFn<'f> = dyn FnMut(&Element) -> EvalResult<Element> + 'f;
/// An elementwise dyadic function over simple items.
pub type DyadicItemFn<'f> = dyn FnMut(&Element, &Element) -> EvalResult<Element> + 'f;

/// Applies `function` to every simple item of `array`, descending into
/// enclosed items and preserving every shape on the way.
///
/// # Errors
/// Propagates the first error `function` reports.
///
/// # Example
/// ```
/// use aplite::interpreter::value::{
///     array::{Array, Element},
///     number::Number,
///     pervade::pervade_monadic,
/// };
///
/// let negated = pervade_monadic(&Array::numbers([1.0, 2.0]), &mut |item| {
///                   Ok(Element::Number(-item.as_number().unwrap()))
///               }).unwrap();
/// assert_eq!(negated, Array::numbers([-1.0, -2.0]));
/// ```
pub fn pervade_monadic(array: &Array, function: &mut MonadicItemFn<'_>) -> EvalResult<Array> {
    let ravel = array.ravel()
                     .iter()
                     .map(|element| match element {
                         Element::Array(inner) => Ok(Element::Array(Box::new(pervade_monadic(inner, function)?))),
                         simple => function(simple),
                     })
                     .collect::<EvalResult<Vec<_>>>()?;
    Array::new(array.shape().to_vec(), ravel)
}

/// Applies `function` pairwise to the simple items of `left` and `right`.
///
/// Arrays of equal shape pair item by item. A one-item argument is extended
/// across every item of the other argument, whose shape the result takes.
/// Enclosed items pervade recursively under the same rules.
///
/// # Errors
/// Returns a `RankError` or `LengthError` when the shapes are incompatible,
/// and propagates the first error `function` reports.
pub fn pervade_dyadic(left: &Array, right: &Array, function: &mut DyadicItemFn<'_>) -> EvalResult<Array> {
    let shape = if left.shape() == right.shape() {
        left.shape().to_vec()
    } else if left.len() == 1 && (right.len() != 1 || left.rank() <= right.rank()) {
        right.shape().to_vec()
    } else if right.len() == 1 {
        left.shape().to_vec()
    } else if left.rank() != right.rank() {
        return Err(AplError::rank("Mismatched ranks."));
    } else {
        return Err(AplError::length("Mismatched lengths."));
    };

    let count: usize = shape.iter().product();
    let ravel = (0..count).map(|i| {
                              let a = &left.ravel()[if left.len() == 1 { 0 } else { i }];
                              let b = &right.ravel()[if right.len() == 1 { 0 } else { i }];
                              pervade_pair(a, b, function)
                          })
                          .collect::<EvalResult<Vec<_>>>()?;
    Array::new(shape, ravel)
}

fn pervade_pair(left: &Element, right: &Element, function: &mut DyadicItemFn<'_>) -> EvalResult<Element> {
    match (left, right) {
        (Element::Array(a), Element::Array(b)) => Ok(Element::Array(Box::new(pervade_dyadic(a, b, function)?))),
        (Element::Array(a), simple) => {
            Ok(Element::Array(Box::new(pervade_dyadic(a, &Array::scalar(simple.clone()), function)?)))
        },
        (simple, Element::Array(b)) => {
            Ok(Element::Array(Box::new(pervade_dyadic(&Array::scalar(simple.clone()), b, function)?)))
        },
        (a, b) => function(a, b),
    }
}
