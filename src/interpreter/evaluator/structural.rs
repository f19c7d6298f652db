use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use rand::{Rng, SeedableRng, rngs::StdRng, seq::index::sample};
use tracing::info;

use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            form_table::Axis,
            scalar::items_equal,
            utils::{
                advance, count, counts, gather, iota, number_element, position, resolve_axis, split_shape, strides,
            },
        },
        symbol::{
            system::{MAX_RANDOM_LINK, SystemParameter},
            table::SymbolValue,
        },
        value::{
            array::{Array, Element},
            number::Number,
            pervade::pervade_monadic,
        },
    },
    util::num::{i64_to_usize_checked, item_count},
};

/// Returns `true` if two arrays have the same shape and tolerantly equal
/// items at every depth.
#[must_use]
pub fn arrays_match(a: &Array, b: &Array, tolerance: f64) -> bool {
    a.shape() == b.shape()
    && a.ravel()
        .iter()
        .zip(b.ravel())
        .all(|(x, y)| elements_match(x, y, tolerance))
}

/// Returns `true` if two items match, comparing enclosed arrays recursively.
#[must_use]
pub fn elements_match(a: &Element, b: &Element, tolerance: f64) -> bool {
    match (a, b) {
        (Element::Array(x), Element::Array(y)) => arrays_match(x, y, tolerance),
        (Element::Array(_), _) | (_, Element::Array(_)) => false,
        _ => items_equal(a, b, tolerance),
    }
}

/// Returns the items of an argument that must be a scalar or vector.
fn vector_items(array: &Array) -> EvalResult<&[Element]> {
    if array.rank() > 1 {
        return Err(AplError::rank("Expected a scalar or vector."));
    }
    Ok(array.ravel())
}

/// `⍴B`
pub fn shape(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    Ok(Array::numbers(b.shape().iter().copied()))
}

/// `A⍴B`, cycling the ravel of `B` into the shape `A`.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, structural::reshape},
///     symbol::table::SymbolTable,
///     value::array::Array,
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let mut ctx = Context::new(&mut symbols);
/// let matrix = reshape(&mut ctx, Array::numbers([2.0, 3.0]), Array::numbers([1.0, 2.0]), None).unwrap();
/// assert_eq!(matrix.shape(), &[2, 3]);
/// assert_eq!(matrix.ravel()[4], Array::number(1.0).first());
/// ```
pub fn reshape(_: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let shape = counts(&Array::vector(vector_items(&a)?.to_vec()))?;
    let total = item_count(&shape)?;
    let source = b.ravel();
    let ravel = if source.is_empty() {
        vec![b.prototype(); total]
    } else {
        source.iter().cycle().take(total).cloned().collect()
    };
    Array::new(shape, ravel)
}

/// `,B`
pub fn ravel(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    Ok(Array::vector(b.into_ravel()))
}

/// `⍪B`, the array as a matrix of its major cells.
pub fn table(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let shape = match b.shape() {
        [] => vec![1, 1],
        [rows, rest @ ..] => vec![*rows, rest.iter().product()],
    };
    b.reshaped(shape)
}

/// `A,B`, joining along the last axis or the given one.
pub fn catenate(ctx: &mut Context<'_, '_>, a: Array, b: Array, axis: Axis<'_>) -> EvalResult<Array> {
    let rank = a.rank().max(b.rank()).max(1);
    let axis = resolve_axis(ctx, axis, rank, rank - 1)?;
    join(a, b, axis)
}

/// `A⍪B`, joining along the first axis.
pub fn catenate_first(_: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    join(a, b, 0)
}

fn join(a: Array, b: Array, axis: usize) -> EvalResult<Array> {
    let rank = a.rank().max(b.rank()).max(1);
    let a = conform(a, &b, rank, axis)?;
    let b = conform(b, &a, rank, axis)?;
    let (a_shape, b_shape) = (a.shape().to_vec(), b.shape().to_vec());
    let agree = a_shape.iter()
                       .zip(&b_shape)
                       .enumerate()
                       .all(|(i, (x, y))| i == axis || x == y);
    if !agree {
        return Err(AplError::length("Mismatched lengths."));
    }

    let (outer, a_len, inner) = split_shape(&a_shape, axis);
    let b_len = b_shape[axis];
    let mut ravel = Vec::with_capacity(a.len() + b.len());
    for o in 0..outer {
        ravel.extend_from_slice(&a.ravel()[o * a_len * inner..(o + 1) * a_len * inner]);
        ravel.extend_from_slice(&b.ravel()[o * b_len * inner..(o + 1) * b_len * inner]);
    }
    let mut shape = a_shape;
    shape[axis] = a_len + b_len;
    Array::new(shape, ravel)
}

/// Brings one argument of a catenation to the full rank, extending a scalar
/// to the shape of the other argument with a single slice along `axis`.
fn conform(array: Array, other: &Array, rank: usize, axis: usize) -> EvalResult<Array> {
    if array.rank() == rank {
        return Ok(array);
    }
    if array.is_scalar() {
        let mut shape = if other.rank() == rank { other.shape().to_vec() } else { vec![1; rank] };
        shape[axis] = 1;
        let total = item_count(&shape)?;
        let item = array.first();
        return Array::new(shape, vec![item; total]);
    }
    if array.rank() + 1 == rank {
        let mut shape = array.shape().to_vec();
        shape.insert(axis, 1);
        return array.reshaped(shape);
    }
    Err(AplError::rank("Mismatched ranks."))
}

/// `⍳B`
pub fn index_generator(ctx: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    match vector_items(&b)? {
        [n] => Ok(Array::vector(iota(count(n)?, ctx.index_origin())?)),
        _ => Err(AplError::length("Expected a single count.")),
    }
}

/// `A⍳B`, the position of each item of `B` in the vector `A`.
pub fn index_of(ctx: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let haystack = vector_items(&a)?;
    let tolerance = ctx.comparison_tolerance();
    let origin = ctx.index_origin();
    let ravel = b.ravel()
                 .iter()
                 .map(|item| {
                     let found = haystack.iter()
                                         .position(|candidate| elements_match(candidate, item, tolerance))
                                         .unwrap_or(haystack.len());
                     number_element(found + origin)
                 })
                 .collect();
    Array::new(b.shape().to_vec(), ravel)
}

/// `⌽B`, reversing along the last axis or the given one.
pub fn reverse(ctx: &mut Context<'_, '_>, b: Array, axis: Axis<'_>) -> EvalResult<Array> {
    let rank = b.rank();
    let axis = resolve_axis(ctx, axis, rank, rank.saturating_sub(1))?;
    reverse_along(&b, axis)
}

/// `⊖B`
pub fn reverse_first(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    reverse_along(&b, 0)
}

fn reverse_along(b: &Array, axis: usize) -> EvalResult<Array> {
    if b.is_scalar() {
        return Ok(b.clone());
    }
    let len = b.shape()[axis];
    gather(b, b.shape().to_vec(), |k, i| Some(if k == axis { len - 1 - i } else { i }))
}

/// `A⌽B`, rotating along the last axis or the given one.
pub fn rotate(ctx: &mut Context<'_, '_>, a: Array, b: Array, axis: Axis<'_>) -> EvalResult<Array> {
    let rank = b.rank();
    let axis = resolve_axis(ctx, axis, rank, rank.saturating_sub(1))?;
    rotate_along(&a, &b, axis)
}

/// `A⊖B`
pub fn rotate_first(_: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    rotate_along(&a, &b, 0)
}

fn rotate_along(a: &Array, b: &Array, axis: usize) -> EvalResult<Array> {
    if b.is_scalar() {
        return Ok(b.clone());
    }
    let (outer, len, inner) = split_shape(b.shape(), axis);
    let amounts = a.to_integers()?;
    if amounts.len() != 1 && amounts.len() != outer * inner {
        return Err(AplError::length("Rotation amounts do not fit the argument."));
    }
    let mut ravel = b.ravel().to_vec();
    if len == 0 {
        return Array::new(b.shape().to_vec(), ravel);
    }
    let modulus = i64::try_from(len).map_err(|_| AplError::limit("Axis is too long."))?;
    for o in 0..outer {
        for k in 0..inner {
            let amount = amounts[if amounts.len() == 1 { 0 } else { o * inner + k }];
            let shift = i64_to_usize_checked(amount.rem_euclid(modulus), AplError::internal("Negative rotation."))?;
            for i in 0..len {
                let source = (i + shift) % len;
                ravel[(o * len + i) * inner + k] = b.ravel()[(o * len + source) * inner + k].clone();
            }
        }
    }
    Array::new(b.shape().to_vec(), ravel)
}

/// `⍉B`, reversing the order of the axes.
pub fn transpose(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let rank = b.rank();
    if rank < 2 {
        return Ok(b);
    }
    let source_strides = strides(b.shape());
    let shape: Vec<usize> = b.shape().iter().rev().copied().collect();
    let total = b.len();
    let mut index = vec![0; rank];
    let mut ravel = Vec::with_capacity(total);
    for _ in 0..total {
        let offset: usize = index.iter()
                                 .enumerate()
                                 .map(|(k, i)| i * source_strides[rank - 1 - k])
                                 .sum();
        ravel.push(b.ravel()[offset].clone());
        advance(&mut index, &shape);
    }
    Array::new(shape, ravel)
}

/// `↑B`, the first item, disclosed.
pub fn first(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    Ok(b.first().into_array())
}

/// Reads the per-axis counts of take or drop and brings `b` to their rank.
fn take_drop_arguments(a: &Array, b: Array) -> EvalResult<(Vec<i64>, Array)> {
    let amounts = Array::vector(vector_items(a)?.to_vec()).to_integers()?;
    let b = if b.is_scalar() { b.reshaped(vec![1; amounts.len()])? } else { b };
    if amounts.len() > b.rank() {
        return Err(AplError::length("Too many axes for the argument."));
    }
    Ok((amounts, b))
}

/// `A↑B`, with fill beyond the argument.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, structural::take},
///     symbol::table::SymbolTable,
///     value::array::Array,
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let mut ctx = Context::new(&mut symbols);
/// let taken = take(&mut ctx, Array::number(-5.0), Array::numbers([1.0, 2.0, 3.0]), None).unwrap();
/// assert_eq!(taken, Array::numbers([0.0, 0.0, 1.0, 2.0, 3.0]));
/// ```
pub fn take(_: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let (amounts, b) = take_drop_arguments(&a, b)?;
    let mut shape = b.shape().to_vec();
    for (axis, amount) in amounts.iter().enumerate() {
        shape[axis] = usize::try_from(amount.unsigned_abs()).map_err(|_| AplError::limit("Take is too large."))?;
    }
    let source_shape = b.shape().to_vec();
    gather(&b, shape.clone(), |axis, i| {
        let Some(amount) = amounts.get(axis) else {
            return Some(i);
        };
        let len = source_shape[axis];
        if *amount >= 0 {
            (i < len).then_some(i)
        } else {
            (i + len).checked_sub(shape[axis]).filter(|source| *source < len)
        }
    })
}

/// `A↓B`
pub fn drop(_: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let (amounts, b) = take_drop_arguments(&a, b)?;
    let mut shape = b.shape().to_vec();
    let mut offsets = vec![0; shape.len()];
    for (axis, amount) in amounts.iter().enumerate() {
        let dropped = usize::try_from(amount.unsigned_abs()).unwrap_or(usize::MAX);
        shape[axis] = shape[axis].saturating_sub(dropped);
        if *amount > 0 {
            offsets[axis] = dropped.min(b.shape()[axis]);
        }
    }
    gather(&b, shape, |axis, i| Some(i + offsets[axis]))
}

/// `⊂B`
pub fn enclose(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    Ok(b.enclose())
}

/// `≡B`
pub fn depth(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    Ok(Array::number(b.depth()))
}

/// `A≡B`
pub fn match_(ctx: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    Ok(Array::number(arrays_match(&a, &b, ctx.comparison_tolerance())))
}

/// `∊B`, every simple item in depth-first order.
pub fn enlist(_: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    fn collect(array: Array, into: &mut Vec<Element>) {
        for element in array.into_ravel() {
            match element {
                Element::Array(inner) => collect(*inner, into),
                simple => into.push(simple),
            }
        }
    }
    let mut ravel = Vec::new();
    collect(b, &mut ravel);
    Ok(Array::vector(ravel))
}

/// `A∊B`, whether each item of `A` occurs in `B`.
pub fn membership(ctx: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let tolerance = ctx.comparison_tolerance();
    let ravel = a.ravel()
                 .iter()
                 .map(|item| {
                     let found = b.ravel().iter().any(|candidate| elements_match(item, candidate, tolerance));
                     Element::Number(Number::from(found))
                 })
                 .collect();
    Array::new(a.shape().to_vec(), ravel)
}

/// `A~B`, the items of `A` that do not occur in `B`.
pub fn without(ctx: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let tolerance = ctx.comparison_tolerance();
    let ravel = vector_items(&a)?.iter()
                                 .filter(|item| {
                                     !b.ravel().iter().any(|candidate| elements_match(item, candidate, tolerance))
                                 })
                                 .cloned()
                                 .collect();
    Ok(Array::vector(ravel))
}

/// Builds the sort key of every major cell of `b`.
fn sort_keys(b: &Array) -> EvalResult<Vec<Vec<OrderedFloat<f64>>>> {
    let Some(&cells) = b.shape().first() else {
        return Err(AplError::rank("Cannot grade a scalar."));
    };
    let width = if cells == 0 { 0 } else { b.len() / cells };
    let mut kinds = b.ravel().iter().map(|element| match element {
                                            Element::Char(_) => Ok(true),
                                            Element::Number(n) if n.near_real() => Ok(false),
                                            _ => Err(AplError::domain("Cannot grade complex or nested items.")),
                                        });
    let first = kinds.next().transpose()?;
    if let Some(first) = first {
        for kind in kinds {
            if kind? != first {
                return Err(AplError::domain("Cannot grade mixed characters and numbers."));
            }
        }
    }
    Ok(b.ravel()
        .chunks(width.max(1))
        .take(cells)
        .map(|cell| {
            cell.iter()
                .map(|element| match element {
                    Element::Char(c) => OrderedFloat(f64::from(u32::from(*c))),
                    Element::Number(n) => OrderedFloat(n.real),
                    Element::Array(_) => OrderedFloat(0.0),
                })
                .collect()
        })
        .collect())
}

fn grade(ctx: &Context<'_, '_>, b: &Array, direction: fn(Ordering) -> Ordering) -> EvalResult<Array> {
    let keys = sort_keys(b)?;
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|x, y| direction(keys[*x].cmp(&keys[*y])));
    let origin = ctx.index_origin();
    Ok(Array::vector(order.into_iter().map(|i| number_element(i + origin)).collect()))
}

/// `⍋B`, the permutation sorting the major cells ascending.
pub fn grade_up(ctx: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    grade(ctx, &b, |ordering| ordering)
}

/// `⍒B`, the permutation sorting the major cells descending.
pub fn grade_down(ctx: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    grade(ctx, &b, Ordering::reverse)
}

/// `A/B`, repeating each slice along the last axis or the given one.
pub fn replicate(ctx: &mut Context<'_, '_>, a: Array, b: Array, axis: Axis<'_>) -> EvalResult<Array> {
    let rank = b.rank().max(1);
    let axis = resolve_axis(ctx, axis, rank, rank - 1)?;
    replicate_along(&a, b, axis)
}

/// `A⌿B`
pub fn replicate_first(_: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    replicate_along(&a, b, 0)
}

fn replicate_along(a: &Array, b: Array, axis: usize) -> EvalResult<Array> {
    let mut repeats = counts(&Array::vector(vector_items(a)?.to_vec()))?;
    let b = if b.is_scalar() { b.reshaped(vec![1])? } else { b };
    let (outer, len, inner) = split_shape(b.shape(), axis);
    let b = if len == 1 && repeats.len() != 1 {
        let mut shape = b.shape().to_vec();
        shape[axis] = repeats.len();
        gather(&b, shape, |k, i| Some(if k == axis { 0 } else { i }))?
    } else {
        b
    };
    let len = if b.shape().is_empty() { 1 } else { b.shape()[axis] };
    if repeats.len() == 1 {
        repeats = vec![repeats[0]; len];
    }
    if repeats.len() != len {
        return Err(AplError::length("Mismatched lengths."));
    }

    let total = repeats.iter()
                       .try_fold(0usize, |total, &times| total.checked_add(times))
                       .ok_or_else(|| AplError::limit("Array is too large."))?;
    let mut ravel = Vec::with_capacity(item_count(&[outer, total, inner])?);
    for o in 0..outer {
        for (i, times) in repeats.iter().enumerate() {
            let start = (o * len + i) * inner;
            for _ in 0..*times {
                ravel.extend_from_slice(&b.ravel()[start..start + inner]);
            }
        }
    }
    let mut shape = b.shape().to_vec();
    shape[axis] = total;
    Array::new(shape, ravel)
}

/// Seeds a generator from the random link.
fn generator(ctx: &Context<'_, '_>) -> StdRng {
    StdRng::seed_from_u64(ctx.symbols.random_link())
}

/// Stores a fresh random link drawn from `rng`.
fn advance_random_link(ctx: &mut Context<'_, '_>, rng: &mut StdRng) {
    let link = rng.gen_range(1..=MAX_RANDOM_LINK);
    info!(link, "random link advanced");
    ctx.symbols
       .bind(SystemParameter::RandomLink.name(), SymbolValue::Array(Array::number(f64::from(link))));
}

/// `?B`, a random integer below each item of `B`, counted from the index
/// origin.
pub fn roll(ctx: &mut Context<'_, '_>, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let mut rng = generator(ctx);
    let origin = ctx.index_origin();
    let result = pervade_monadic(&b, &mut |item| {
                     let limit = count(item)?;
                     if limit == 0 {
                         return Err(AplError::domain("Roll needs a positive integer."));
                     }
                     Ok(number_element(rng.gen_range(0..limit) + origin))
                 })?;
    advance_random_link(ctx, &mut rng);
    Ok(result)
}

/// `A?B`, `A` distinct random integers from `⍳B`.
pub fn deal(ctx: &mut Context<'_, '_>, a: Array, b: Array, _: Axis<'_>) -> EvalResult<Array> {
    let (amount, limit) = match (vector_items(&a)?, vector_items(&b)?) {
        ([amount], [limit]) => (count(amount)?, count(limit)?),
        _ => return Err(AplError::length("Deal takes single counts.")),
    };
    if amount > limit {
        return Err(AplError::domain("Cannot deal more items than there are."));
    }
    item_count(&[amount])?;
    let mut rng = generator(ctx);
    let origin = ctx.index_origin();
    let ravel = sample(&mut rng, limit, amount).into_iter()
                                               .map(|i| number_element(i + origin))
                                               .collect();
    advance_random_link(ctx, &mut rng);
    Ok(Array::vector(ravel))
}

/// Returns the origin-based position of an index item on an axis of length
/// `len`.
pub(crate) fn index_position(ctx: &Context<'_, '_>, element: &Element, len: usize) -> EvalResult<usize> {
    let number = element.as_number()
                        .ok_or_else(|| AplError::domain("Index must be a number."))?;
    position(number, ctx.index_origin(), len)
}
