/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors.
/// Shapes, indices and counts are `usize` while every number in an array is a
/// complex `f64` pair, so these conversions sit at every boundary between the
/// two worlds.
///
/// All checked functions return a `Result`, which is `Ok` if the conversion is
/// lossless and valid, or an `AplError` if the value is out of range or not an
/// integer.
pub mod num;
