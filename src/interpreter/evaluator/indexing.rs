use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            structural::index_position,
            utils::{advance, strides},
        },
        value::array::{Array, Element},
    },
    util::num::item_count,
};

/// The positions an index list selects along each axis, and the shape the
/// selection takes.
struct Selection {
    positions: Vec<Vec<usize>>,
    shape:     Vec<usize>,
}

impl Selection {
    /// Resolves the items of an index list against `array`.
    ///
    /// An elided item selects a whole axis; any other item contributes its
    /// own shape to the result.
    fn resolve(ctx: &Context<'_, '_>, array: &Array, items: &[Option<Array>]) -> EvalResult<Self> {
        if items.len() != array.rank() {
            return Err(AplError::rank("Index list does not match the rank of the array."));
        }
        let mut positions = Vec::with_capacity(items.len());
        let mut shape = Vec::new();
        for (item, &len) in items.iter().zip(array.shape()) {
            match item {
                None => {
                    positions.push((0..len).collect());
                    shape.push(len);
                },
                Some(index) => {
                    let axis = index.ravel()
                                    .iter()
                                    .map(|element| index_position(ctx, element, len))
                                    .collect::<EvalResult<Vec<_>>>()?;
                    positions.push(axis);
                    shape.extend_from_slice(index.shape());
                },
            }
        }
        Ok(Self { positions, shape })
    }

    /// Returns the ravel offsets of the selected items in row-major order.
    fn offsets(&self, array: &Array) -> EvalResult<Vec<usize>> {
        let array_strides = strides(array.shape());
        let lengths: Vec<usize> = self.positions.iter().map(Vec::len).collect();
        let total = item_count(&lengths)?;
        let mut cursor = vec![0; lengths.len()];
        let mut offsets = Vec::with_capacity(total);
        for _ in 0..total {
            let offset = cursor.iter()
                               .enumerate()
                               .map(|(axis, &i)| self.positions[axis][i] * array_strides[axis])
                               .sum();
            offsets.push(offset);
            advance(&mut cursor, &lengths);
        }
        Ok(offsets)
    }
}

/// Selects items of `array` with a bracket index list.
///
/// # Errors
/// Returns a `RankError` when the list has the wrong number of items, a
/// `DomainError` for non-integer indices and an `IndexError` for indices
/// outside the array.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, indexing::index},
///     symbol::table::SymbolTable,
///     value::array::Array,
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let ctx = Context::new(&mut symbols);
/// let letters = Array::chars("ABCD");
/// let picked = index(&ctx, &letters, &[Some(Array::numbers([4.0, 1.0]))]).unwrap();
/// assert_eq!(picked, Array::chars("DA"));
/// ```
pub fn index(ctx: &Context<'_, '_>, array: &Array, items: &[Option<Array>]) -> EvalResult<Array> {
    let selection = Selection::resolve(ctx, array, items)?;
    let ravel = selection.offsets(array)?
                         .into_iter()
                         .map(|offset| array.ravel()[offset].clone())
                         .collect();
    Array::new(selection.shape, ravel)
}

/// Returns a copy of `array` with the indexed items replaced by `value`.
///
/// A one-item `value` is extended to every selected position; otherwise it
/// must have the shape of the selection.
///
/// # Errors
/// As [`index`], plus a `RankError` or `LengthError` when `value` does not
/// fit the selection.
pub fn assign(ctx: &Context<'_, '_>, array: Array, items: &[Option<Array>], value: &Array) -> EvalResult<Array> {
    let selection = Selection::resolve(ctx, &array, items)?;
    let offsets = selection.offsets(&array)?;
    if value.len() != 1 {
        if value.len() != offsets.len() {
            return Err(AplError::length("Value does not fit the indexed positions."));
        }
        let fits = value.shape() == selection.shape.as_slice()
                   || value.rank() == 1 && selection.shape.iter().filter(|len| **len != 1).count() <= 1;
        if !fits {
            return Err(AplError::rank("Value does not fit the indexed positions."));
        }
    }

    let (shape, mut ravel) = array.into_parts();
    for (i, offset) in offsets.into_iter().enumerate() {
        let item: &Element = &value.ravel()[if value.len() == 1 { 0 } else { i }];
        ravel[offset] = item.clone();
    }
    Array::new(shape, ravel)
}
