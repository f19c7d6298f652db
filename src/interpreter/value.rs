/// Arrays and their items.
///
/// Defines [`array::Array`], the only value the language knows, and
/// [`array::Element`], the item type of its ravel. Construction validates the
/// shape invariant; arrays are never mutated in place once built.
pub mod array;
/// Complex numbers with tolerant comparison.
///
/// Every numeric item is a complex `f64` pair. Besides arithmetic, this
/// module holds the tolerance algorithms that decide when two numbers are
/// equal, or when a number is close enough to an integer, boolean or real to
/// be treated as one.
pub mod number;
/// Scalar extension.
///
/// Applies elementwise functions across whole arrays, descending into nested
/// items and extending one-item arguments across the other argument.
pub mod pervade;
