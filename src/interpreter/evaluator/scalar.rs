use crate::{
    error::AplError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{
            array::Element,
            number::{I, ONE, ZERO, Number},
        },
    },
};

/// Returns the number held by a simple item.
fn number(element: &Element) -> EvalResult<Number> {
    element.as_number()
           .ok_or_else(|| AplError::domain("Expected a number."))
}

/// Returns the real number held by a simple item.
fn real(element: &Element) -> EvalResult<f64> {
    let n = number(element)?;
    if n.near_real() {
        Ok(n.real)
    } else {
        Err(AplError::domain("Expected a real number."))
    }
}

/// Returns the boolean held by a simple item.
fn boolean(element: &Element) -> EvalResult<bool> {
    number(element)?.to_boolean()
                    .ok_or_else(|| AplError::domain("Expected a boolean."))
}

fn numeric(n: Number) -> EvalResult<Element> {
    if n.is_finite() {
        Ok(Element::Number(n))
    } else {
        Err(AplError::domain("Result is not a finite number."))
    }
}

fn truth(value: bool) -> Element {
    Element::Number(Number::from(value))
}

/// `+B`
pub fn conjugate(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(number(b)?.conj())
}

/// `-B`
pub fn negative(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(-number(b)?)
}

/// `×B`
pub fn direction(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(number(b)?.direction())
}

/// `÷B`
pub fn reciprocal(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    let b = number(b)?;
    if b == ZERO {
        return Err(AplError::domain("Dividing by 0."));
    }
    numeric(b.recip())
}

/// `⌈B`, tolerant.
pub fn ceiling(ctx: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(number(b)?.ceiling(ctx.comparison_tolerance()))
}

/// `⌊B`, tolerant.
///
/// # Example
/// ```
/// use aplite::interpreter::{
///     evaluator::{core::Context, scalar::floor},
///     symbol::table::SymbolTable,
///     value::array::Element,
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let ctx = Context::new(&mut symbols);
/// assert_eq!(floor(&ctx, &Element::Number((-2.5).into())).unwrap(), Element::Number((-3.0).into()));
/// assert_eq!(floor(&ctx, &Element::Number(2.99999.into())).unwrap(), Element::Number(3.0.into()));
/// ```
pub fn floor(ctx: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(number(b)?.floor(ctx.comparison_tolerance()))
}

/// `*B`
pub fn exponential(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(number(b)?.exp())
}

/// `⍟B`
pub fn natural_log(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    let b = number(b)?;
    if b == ZERO {
        return Err(AplError::domain("Logarithm of 0."));
    }
    let ln = b.ln();
    numeric(if b.is_real() && b.real > 0.0 { Number::from_real(ln.real) } else { ln })
}

/// `|B`
pub fn magnitude(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(Number::from_real(number(b)?.magnitude()))
}

/// `!B`, the gamma function of `B+1`.
pub fn factorial(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    let b = real(b)?;
    if b < 0.0 && b.fract() == 0.0 {
        return Err(AplError::domain("Factorial of a negative integer."));
    }
    numeric(Number::from_real(Number::gamma(b + 1.0)))
}

/// `○B`
pub fn pi_times(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    numeric(number(b)?.times_pi())
}

/// `~B`
pub fn not(_: &Context<'_, '_>, b: &Element) -> EvalResult<Element> {
    Ok(truth(!boolean(b)?))
}

/// `A+B`
pub fn plus(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    numeric(number(a)? + number(b)?)
}

/// `A-B`
pub fn minus(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    numeric(number(a)? - number(b)?)
}

/// `A×B`
pub fn times(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    numeric(number(a)? * number(b)?)
}

/// `A÷B`; `0÷0` is `1`.
///
/// # Example
/// ```
/// use aplite::{
///     error::ErrorKind,
///     interpreter::{
///         evaluator::{core::Context, scalar::divide},
///         symbol::table::SymbolTable,
///         value::array::Element,
///     },
/// };
///
/// let mut symbols = SymbolTable::workspace();
/// let ctx = Context::new(&mut symbols);
/// let zero = Element::Number(0.0.into());
/// assert_eq!(divide(&ctx, &zero, &zero).unwrap(), Element::Number(1.0.into()));
/// let error = divide(&ctx, &Element::Number(3.0.into()), &zero).unwrap_err();
/// assert_eq!(error.kind, ErrorKind::Domain);
/// assert_eq!(error.to_string(), "DOMAIN ERROR: Dividing by 0.");
/// ```
pub fn divide(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    let (a, b) = (number(a)?, number(b)?);
    if b == ZERO {
        return if a == ZERO { Ok(Element::Number(ONE)) } else { Err(AplError::domain("Dividing by 0.")) };
    }
    numeric(a / b)
}

/// `A⌈B`
pub fn maximum(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    numeric(Number::from_real(real(a)?.max(real(b)?)))
}

/// `A⌊B`
pub fn minimum(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    numeric(Number::from_real(real(a)?.min(real(b)?)))
}

/// `A*B`
pub fn power(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    let (a, b) = (number(a)?, number(b)?);
    if a == ZERO && b.real < 0.0 {
        return Err(AplError::domain("Dividing by 0."));
    }
    numeric(a.pow(b))
}

/// `A⍟B`, the base-`A` logarithm of `B`.
pub fn logarithm(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    let (a, b) = (number(a)?, number(b)?);
    if a == b {
        return Ok(Element::Number(ONE));
    }
    if a == ZERO || b == ZERO || a == ONE {
        return Err(AplError::domain("Logarithm is undefined."));
    }
    let result = b.ln() / a.ln();
    numeric(if result.near_real() && a.real > 0.0 && b.real > 0.0 {
                Number::from_real(result.real)
            } else {
                result
            })
}

/// `A|B`, the tolerant residue of `B` modulo `A`.
///
/// The result has the sign of `A`; `0|B` is `B`.
pub fn residue(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    let (a, b) = (number(a)?, number(b)?);
    if a == ZERO {
        return numeric(b);
    }
    let tolerance = ctx.comparison_tolerance();
    let quotient = b / a;
    let nearest = Number::new(quotient.real.round(), quotient.imaginary.round());
    if quotient.tolerantly_equal_within(nearest, tolerance) {
        return Ok(Element::Number(ZERO));
    }
    numeric(b - a * quotient.floor(tolerance))
}

/// `A!B`, the number of ways of choosing `A` items from `B`.
pub fn binomial(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    let (a, b) = (real(a)?, real(b)?);
    let integral = a.fract() == 0.0 && b.fract() == 0.0;
    if integral && a >= 0.0 && b >= 0.0 {
        if a > b {
            return Ok(Element::Number(ZERO));
        }
        let k = a.min(b - a);
        let mut result = 1.0;
        let mut i = 0.0;
        while i < k {
            result = result * (b - i) / (i + 1.0);
            i += 1.0;
        }
        return numeric(Number::from_real(result.round()));
    }
    let pole = |x: f64| x < 0.0 && x.fract() == 0.0;
    if pole(b + 1.0) || pole(a + 1.0) || pole(b - a + 1.0) {
        return Err(AplError::domain("Binomial is undefined for these arguments."));
    }
    numeric(Number::from_real(Number::gamma(b + 1.0) / (Number::gamma(a + 1.0) * Number::gamma(b - a + 1.0))))
}

/// `A○B`, the circular function selected by `A`.
///
/// | `A` | function | `A` | function |
/// |-----|----------|-----|----------|
/// | 0 | `(1-B*2)*.5` | | |
/// | 1 | sine | ¯1 | arcsine |
/// | 2 | cosine | ¯2 | arccosine |
/// | 3 | tangent | ¯3 | arctangent |
/// | 4 | `(1+B*2)*.5` | ¯4 | `(¯1+B*2)*.5` |
/// | 5 | hyperbolic sine | ¯5 | inverse |
/// | 6 | hyperbolic cosine | ¯6 | inverse |
/// | 7 | hyperbolic tangent | ¯7 | inverse |
/// | 9 | real part | ¯9 | `B` |
/// | 10 | magnitude | ¯10 | conjugate |
/// | 11 | imaginary part | ¯11 | `0J1×B` |
/// | 12 | phase | ¯12 | `*0J1×B` |
pub fn circular(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    let selector = number(a)?.to_integer()
                             .ok_or_else(|| AplError::domain("Circular function selector must be an integer."))?;
    let z = number(b)?;
    let inverse = |f: fn(f64) -> f64| {
        if z.near_real() {
            let result = f(z.real);
            if result.is_nan() {
                Err(AplError::domain("Argument outside the domain of the inverse function."))
            } else {
                Ok(Number::from_real(result))
            }
        } else {
            Err(AplError::domain("Inverse circular functions take real arguments."))
        }
    };
    let result = match selector {
        0 => (ONE - z * z).sqrt(),
        1 => z.sin(),
        2 => z.cos(),
        3 => {
            let cos = z.cos();
            if cos == ZERO {
                return Err(AplError::domain("Tangent is undefined."));
            }
            z.sin() / cos
        },
        4 => (ONE + z * z).sqrt(),
        5 => z.sinh(),
        6 => z.cosh(),
        7 => z.sinh() / z.cosh(),
        9 => Number::from_real(z.real),
        10 => Number::from_real(z.magnitude()),
        11 => Number::from_real(z.imaginary),
        12 => Number::from_real(z.arg()),
        -1 => inverse(f64::asin)?,
        -2 => inverse(f64::acos)?,
        -3 => inverse(f64::atan)?,
        -4 => {
            let root = (z * z - ONE).sqrt();
            if z.real < 0.0 { -root } else { root }
        },
        -5 => inverse(f64::asinh)?,
        -6 => inverse(f64::acosh)?,
        -7 => inverse(f64::atanh)?,
        -9 => z,
        -10 => z.conj(),
        -11 => I * z,
        -12 => (I * z).exp(),
        _ => return Err(AplError::domain("Unknown circular function selector.")),
    };
    numeric(if result.near_real() { Number::from_real(result.real) } else { result })
}

/// `A∧B`
pub fn and(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(boolean(a)? && boolean(b)?))
}

/// `A∨B`
pub fn or(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(boolean(a)? || boolean(b)?))
}

/// `A⍲B`
pub fn nand(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(!(boolean(a)? && boolean(b)?)))
}

/// `A⍱B`
pub fn nor(_: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(!(boolean(a)? || boolean(b)?)))
}

/// Tolerant equality of two simple items. Characters equal only characters.
#[must_use]
pub fn items_equal(a: &Element, b: &Element, tolerance: f64) -> bool {
    match (a, b) {
        (Element::Char(x), Element::Char(y)) => x == y,
        (Element::Number(x), Element::Number(y)) => x.tolerantly_equal_within(*y, tolerance),
        _ => false,
    }
}

/// Compares the real parts of two items after tolerant equality.
fn ordered(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<std::cmp::Ordering> {
    let (x, y) = (real(a)?, real(b)?);
    if items_equal(a, b, ctx.comparison_tolerance()) {
        Ok(std::cmp::Ordering::Equal)
    } else {
        Ok(x.total_cmp(&y))
    }
}

/// `A<B`
pub fn less(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(ordered(ctx, a, b)?.is_lt()))
}

/// `A≤B`
pub fn less_or_equal(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(ordered(ctx, a, b)?.is_le()))
}

/// `A=B`
pub fn equal(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(items_equal(a, b, ctx.comparison_tolerance())))
}

/// `A≥B`
pub fn greater_or_equal(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(ordered(ctx, a, b)?.is_ge()))
}

/// `A>B`
pub fn greater(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(ordered(ctx, a, b)?.is_gt()))
}

/// `A≠B`
pub fn not_equal(ctx: &Context<'_, '_>, a: &Element, b: &Element) -> EvalResult<Element> {
    Ok(truth(!items_equal(a, b, ctx.comparison_tolerance())))
}
