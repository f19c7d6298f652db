use crate::{
    error::AplError,
    interpreter::{
        evaluator::{
            core::{Context, EvalResult},
            form_table::Axis,
            utils::{resolve_axis, split_shape},
        },
        symbol::table::Callable,
        value::{
            array::{Array, Element},
            number::Number,
        },
    },
    util::num::item_count,
};

/// Applies `function` to items, requiring a value.
fn call(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array) -> EvalResult<Array> {
    ctx.apply_value(function, left, right, None)
}

/// Returns the identity element of a primitive function, the result of
/// reducing an empty axis.
fn identity(function: &Callable) -> EvalResult<Element> {
    let value = match function {
        Callable::Primitive('+' | '-' | '|' | '∨' | '<' | '>' | '≠') => 0.0,
        Callable::Primitive('×' | '÷' | '*' | '!' | '∧' | '≤' | '=' | '≥') => 1.0,
        Callable::Primitive('⌈') => f64::MIN,
        Callable::Primitive('⌊') => f64::MAX,
        _ => return Err(AplError::domain("Function has no identity element.")),
    };
    Ok(Element::Number(Number::from_real(value)))
}

/// Folds `items` from the right with `function`.
fn fold(ctx: &mut Context<'_, '_>, function: &Callable, items: &[Element]) -> EvalResult<Element> {
    let Some((last, rest)) = items.split_last() else {
        return identity(function);
    };
    let mut accumulator = last.clone().into_array();
    for item in rest.iter().rev() {
        accumulator = call(ctx, function, Some(item.clone().into_array()), accumulator)?;
    }
    Ok(Element::from(accumulator))
}

/// Returns the items of every vector along `axis`, with the shape left when
/// the axis is removed.
fn lanes(array: &Array, axis: usize) -> (Vec<Vec<Element>>, Vec<usize>) {
    let (outer, len, inner) = split_shape(array.shape(), axis);
    let mut lanes = Vec::with_capacity(outer * inner);
    for o in 0..outer {
        for k in 0..inner {
            lanes.push((0..len).map(|i| array.ravel()[(o * len + i) * inner + k].clone())
                               .collect());
        }
    }
    let mut shape = array.shape().to_vec();
    if !shape.is_empty() {
        shape.remove(axis);
    }
    (lanes, shape)
}

fn reduce_along(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: &Array, axis: usize)
                -> EvalResult<Array> {
    if left.is_some() {
        return Err(AplError::syntax("Reduction takes no left argument."));
    }
    if right.is_scalar() {
        return Ok(right.clone());
    }
    let (lanes, shape) = lanes(right, axis);
    let ravel = lanes.iter()
                     .map(|lane| fold(ctx, function, lane))
                     .collect::<EvalResult<Vec<_>>>()?;
    Array::new(shape, ravel)
}

/// `f/B`, reducing along the last axis or the given one.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, operators::reduce},
///     symbol::table::{Callable, SymbolTable},
///     value::array::Array,
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let mut ctx = Context::new(&mut symbols);
/// let minus = Callable::Primitive('-');
/// let result = reduce(&mut ctx, &minus, None, Array::numbers([1.0, 2.0, 3.0]), None).unwrap();
/// assert_eq!(result, Array::number(2.0));
/// let empty = reduce(&mut ctx, &Callable::Primitive('×'), None, Array::zilde(), None).unwrap();
/// assert_eq!(empty, Array::number(1.0));
/// ```
pub fn reduce(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array, axis: Axis<'_>)
              -> EvalResult<Array> {
    let rank = right.rank();
    let axis = resolve_axis(ctx, axis, rank, rank.saturating_sub(1))?;
    reduce_along(ctx, function, left, &right, axis)
}

/// `f⌿B`, reducing along the first axis.
pub fn reduce_first(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array, _: Axis<'_>)
                    -> EvalResult<Array> {
    reduce_along(ctx, function, left, &right, 0)
}

fn scan_along(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: &Array, axis: usize)
              -> EvalResult<Array> {
    if left.is_some() {
        return Err(AplError::syntax("Scan takes no left argument."));
    }
    if right.is_scalar() {
        return Ok(right.clone());
    }
    let (outer, len, inner) = split_shape(right.shape(), axis);
    let (lanes, _) = lanes(right, axis);
    let mut ravel = right.ravel().to_vec();
    for (lane_index, lane) in lanes.iter().enumerate() {
        let (o, k) = (lane_index / inner.max(1), lane_index % inner.max(1));
        for i in 0..len {
            ravel[(o * len + i) * inner + k] = fold(ctx, function, &lane[..=i])?;
        }
    }
    debug_assert_eq!(lanes.len(), outer * inner);
    Array::new(right.shape().to_vec(), ravel)
}

/// `f\B`, the reductions of every prefix along the last axis or the given
/// one.
pub fn scan(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array, axis: Axis<'_>)
            -> EvalResult<Array> {
    let rank = right.rank();
    let axis = resolve_axis(ctx, axis, rank, rank.saturating_sub(1))?;
    scan_along(ctx, function, left, &right, axis)
}

/// `f⍀B`
pub fn scan_first(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array, _: Axis<'_>)
                  -> EvalResult<Array> {
    scan_along(ctx, function, left, &right, 0)
}

/// Pairs the items of two arrays, extending a one-item argument.
fn paired_shape(left: &Array, right: &Array) -> EvalResult<Vec<usize>> {
    if left.shape() == right.shape() {
        Ok(right.shape().to_vec())
    } else if left.len() == 1 {
        Ok(right.shape().to_vec())
    } else if right.len() == 1 {
        Ok(left.shape().to_vec())
    } else if left.rank() != right.rank() {
        Err(AplError::rank("Mismatched ranks."))
    } else {
        Err(AplError::length("Mismatched lengths."))
    }
}

/// `f¨B` and `A f¨B`, applying `f` item by item.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, operators::each},
///     symbol::table::{Callable, SymbolTable},
///     value::array::{Array, Element},
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let mut ctx = Context::new(&mut symbols);
/// let nested = Array::vector(vec![Element::from(Array::numbers([1.0, 2.0])),
///                                 Element::from(Array::numbers([3.0, 4.0, 5.0]))]);
/// let shapes = each(&mut ctx, &Callable::Primitive('⍴'), None, nested, None).unwrap();
/// assert_eq!(shapes.ravel()[1], Element::from(Array::numbers([3.0])));
/// ```
pub fn each(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array, _: Axis<'_>)
            -> EvalResult<Array> {
    match left {
        None => {
            let ravel = right.ravel()
                             .iter()
                             .map(|item| call(ctx, function, None, item.clone().into_array()).map(Element::from))
                             .collect::<EvalResult<Vec<_>>>()?;
            Array::new(right.shape().to_vec(), ravel)
        },
        Some(left) => {
            let shape = paired_shape(&left, &right)?;
            let total = item_count(&shape)?;
            let mut ravel = Vec::with_capacity(total);
            for i in 0..total {
                let a = &left.ravel()[if left.len() == 1 { 0 } else { i }];
                let b = &right.ravel()[if right.len() == 1 { 0 } else { i }];
                ravel.push(Element::from(call(ctx,
                                              function,
                                              Some(a.clone().into_array()),
                                              b.clone().into_array())?));
            }
            Array::new(shape, ravel)
        },
    }
}

/// `A f⍨ B` is `B f A`; `f⍨ B` is `B f B`.
pub fn commute(ctx: &mut Context<'_, '_>, function: &Callable, left: Option<Array>, right: Array, _: Axis<'_>)
               -> EvalResult<Array> {
    let left = left.unwrap_or_else(|| right.clone());
    call(ctx, function, Some(right), left)
}

/// `A f.g B`, the inner product.
///
/// Each item of the result reduces with `f` the items `g` produces from a
/// row of `A` and a column of `B`.
pub fn inner_product(ctx: &mut Context<'_, '_>,
                     reduction: &Callable,
                     combination: &Callable,
                     left: Option<Array>,
                     right: Array)
                     -> EvalResult<Array> {
    let left = left.ok_or_else(|| AplError::syntax("Inner product needs a left argument."))?;
    let left_len = left.shape().last().copied().unwrap_or(1);
    let right_len = right.shape().first().copied().unwrap_or(1);
    let len = if left_len == 1 { right_len } else { left_len };
    if left_len != right_len && left_len != 1 && right_len != 1 {
        return Err(AplError::length("Mismatched lengths."));
    }

    let rows = left.len() / left_len.max(1);
    let columns = right.len() / right_len.max(1);
    let mut shape: Vec<usize> = left.shape().iter().take(left.rank().saturating_sub(1)).copied().collect();
    shape.extend(right.shape().iter().skip(1));

    let mut ravel = Vec::with_capacity(item_count(&[rows, columns])?);
    for row in 0..rows {
        for column in 0..columns {
            let pairs = (0..len).map(|k| {
                                    let a = &left.ravel()[row * left_len + if left_len == 1 { 0 } else { k }];
                                    let b = &right.ravel()[if right_len == 1 { 0 } else { k } * columns + column];
                                    call(ctx, combination, Some(a.clone().into_array()), b.clone().into_array())
                                        .map(Element::from)
                                })
                                .collect::<EvalResult<Vec<_>>>()?;
            ravel.push(fold(ctx, reduction, &pairs)?);
        }
    }
    Array::new(shape, ravel)
}

/// `A ∘.f B`, applying `f` to every pair of items.
pub fn outer_product(ctx: &mut Context<'_, '_>,
                     _: &Callable,
                     function: &Callable,
                     left: Option<Array>,
                     right: Array)
                     -> EvalResult<Array> {
    let left = left.ok_or_else(|| AplError::syntax("Outer product needs a left argument."))?;
    let mut shape = left.shape().to_vec();
    shape.extend_from_slice(right.shape());
    let mut ravel = Vec::with_capacity(item_count(&[left.len(), right.len()])?);
    for a in left.ravel() {
        for b in right.ravel() {
            ravel.push(Element::from(call(ctx, function, Some(a.clone().into_array()), b.clone().into_array())?));
        }
    }
    Array::new(shape, ravel)
}

/// `f∘g B` is `f g B`; `A f∘g B` is `A f g B`.
pub fn compose(ctx: &mut Context<'_, '_>, f: &Callable, g: &Callable, left: Option<Array>, right: Array)
               -> EvalResult<Array> {
    let inner = call(ctx, g, None, right)?;
    call(ctx, f, left, inner)
}

/// `f⍤g B` is `f g B`; `A f⍤g B` is `f A g B`.
pub fn atop(ctx: &mut Context<'_, '_>, f: &Callable, g: &Callable, left: Option<Array>, right: Array)
            -> EvalResult<Array> {
    let inner = call(ctx, g, left, right)?;
    call(ctx, f, None, inner)
}

/// `f⍥g B` is `f g B`; `A f⍥g B` is `(g A) f g B`.
pub fn over(ctx: &mut Context<'_, '_>, f: &Callable, g: &Callable, left: Option<Array>, right: Array)
            -> EvalResult<Array> {
    let right = call(ctx, g, None, right)?;
    let left = left.map(|left| call(ctx, g, None, left)).transpose()?;
    call(ctx, f, left, right)
}
