use crate::error::AplError;

/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;

/// Safely converts a `usize` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns a `LimitError` if the value exceeds `MAX_SAFE_U64_INT`.
///
/// ## Example
/// ```
/// use aplite::util::num::{MAX_SAFE_U64_INT, usize_to_f64_checked};
///
/// assert_eq!(usize_to_f64_checked(100).unwrap(), 100.0);
///
/// let too_big = (MAX_SAFE_U64_INT + 1) as usize;
/// assert!(usize_to_f64_checked(too_big).is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn usize_to_f64_checked(value: usize) -> Result<f64, AplError> {
    if value as u64 > MAX_SAFE_U64_INT {
        return Err(AplError::limit("Integer is too large to be represented."));
    }
    Ok(value as f64)
}

/// Converts a count or position to `f64`.
///
/// Counts held by an array never reach `2^53`, so the conversion is exact in
/// practice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn usize_to_f64(value: usize) -> f64 {
    value as f64
}

/// Safely converts an `f64` to `i64` if the value is finite, within the
/// exactly representable range, and not fractional.
///
/// ## Errors
/// Returns a `DomainError` for non-finite or fractional values and a
/// `LimitError` for values outside the safe range.
///
/// ## Example
/// ```
/// use aplite::{error::ErrorKind, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(-12.0).unwrap(), -12);
/// assert_eq!(f64_to_i64_checked(1.5).unwrap_err().kind, ErrorKind::Domain);
/// assert_eq!(f64_to_i64_checked(1e20).unwrap_err().kind, ErrorKind::Limit);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64) -> Result<i64, AplError> {
    if !value.is_finite() {
        return Err(AplError::domain(format!("Cannot convert non-finite value {value} to an integer.")));
    }
    if value.abs() > MAX_SAFE_U64_INT as f64 {
        return Err(AplError::limit("Integer is too large to be represented."));
    }
    if value.fract() != 0.0 {
        return Err(AplError::domain("Expected an integer."));
    }
    Ok(value as i64)
}

/// Safely converts an `i64` to a `usize`, reporting `error` for negative
/// values or values that do not fit.
///
/// ## Example
/// ```
/// use aplite::{error::AplError, util::num::i64_to_usize_checked};
///
/// assert_eq!(i64_to_usize_checked(42, AplError::domain("negative")).unwrap(), 42);
/// assert!(i64_to_usize_checked(-1, AplError::domain("negative")).is_err());
/// ```
pub fn i64_to_usize_checked(value: i64, error: AplError) -> Result<usize, AplError> {
    usize::try_from(value).map_err(|_| error)
}

/// Most items a single array may hold.
pub const MAX_ARRAY_ITEMS: usize = 1 << 24;

/// Returns the number of items an array of `shape` holds.
///
/// ## Errors
/// Returns a `LimitError` if the count overflows or exceeds
/// `MAX_ARRAY_ITEMS`.
///
/// ## Example
/// ```
/// use aplite::{error::ErrorKind, util::num::item_count};
///
/// assert_eq!(item_count(&[2, 3]).unwrap(), 6);
/// assert_eq!(item_count(&[]).unwrap(), 1);
/// assert_eq!(item_count(&[0, usize::MAX]).unwrap(), 0);
/// assert_eq!(item_count(&[usize::MAX, 2]).unwrap_err().kind, ErrorKind::Limit);
/// assert_eq!(item_count(&[1, 10_000_000_000]).unwrap_err().kind, ErrorKind::Limit);
/// ```
pub fn item_count(shape: &[usize]) -> Result<usize, AplError> {
    if shape.contains(&0) {
        return Ok(0);
    }
    shape.iter()
         .try_fold(1usize, |total, &len| total.checked_mul(len))
         .filter(|&total| total <= MAX_ARRAY_ITEMS)
         .ok_or_else(|| AplError::limit("Array is too large."))
}
