use std::{
    cmp::Ordering,
    f64::consts::PI,
    fmt::Display,
    hash::{Hash, Hasher},
    ops,
};

use ordered_float::OrderedFloat;

use crate::interpreter::printer::{DEFAULT_PRINT_PRECISION, format_number};

/// `0` as a number.
pub const ZERO: Number = Number::new(0.0, 0.0);
/// `1` as a number.
pub const ONE: Number = Number::new(1.0, 0.0);
/// The imaginary unit `0J1`.
pub const I: Number = Number::new(0.0, 1.0);

/// Tolerance used to decide whether a number is near an integer.
pub const INTEGER_TOLERANCE: f64 = 1e-3;
/// Tolerance used to decide whether a number is near the real line.
pub const REAL_TOLERANCE: f64 = 1e-5;
/// Initial value of the comparison tolerance system parameter.
pub const DEFAULT_COMPARISON_TOLERANCE: f64 = 1e-4;

/// A complex number with real and imaginary parts.
///
/// Every numeric item of an array is a `Number`; real numbers simply carry an
/// imaginary part of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number {
    /// The real part of the number.
    pub real:      f64,
    /// The imaginary part of the number.
    pub imaginary: f64,
}

impl Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_number(*self, DEFAULT_PRINT_PRECISION))
    }
}

impl Number {
    /// Constructs a new number from real and imaginary components.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    /// let n = Number::new(5.0, -1.0);
    /// assert_eq!(n.real, 5.0);
    /// assert_eq!(n.imaginary, -1.0);
    /// ```
    #[must_use]
    pub const fn new(real: f64, imaginary: f64) -> Self {
        Self { real, imaginary }
    }

    /// Constructs a number on the real line.
    #[must_use]
    pub const fn from_real(real: f64) -> Self {
        Self { real,
               imaginary: 0.0 }
    }

    /// Returns `true` if the imaginary part is exactly zero.
    #[must_use]
    pub fn is_real(self) -> bool {
        self.imaginary == 0.0
    }

    /// Returns `true` if both parts are finite.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.real.is_finite() && self.imaginary.is_finite()
    }

    /// Returns the magnitude of the number.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    /// assert_eq!(Number::new(3.0, 4.0).magnitude(), 5.0);
    /// ```
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.real.hypot(self.imaginary)
    }

    /// Returns the complex conjugate of the number.
    #[must_use]
    pub const fn conj(self) -> Self {
        Self { real:      self.real,
               imaginary: -self.imaginary, }
    }

    /// Returns the argument (phase angle) in radians.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.imaginary.atan2(self.real)
    }

    /// Returns the unit number with the same direction, or `0` for `0`.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::{Number, ZERO};
    /// assert_eq!(Number::from_real(-7.5).direction(), Number::from_real(-1.0));
    /// assert_eq!(ZERO.direction(), ZERO);
    /// assert_eq!(Number::new(3.0, 4.0).direction(), Number::new(0.6, 0.8));
    /// ```
    #[must_use]
    pub fn direction(self) -> Self {
        if self == ZERO {
            return ZERO;
        }
        let magnitude = self.magnitude();
        Self { real:      self.real / magnitude,
               imaginary: self.imaginary / magnitude, }
    }

    /// Returns the reciprocal `1/z` of the number.
    #[must_use]
    pub fn recip(self) -> Self {
        ONE / self
    }

    /// Returns `e` raised to the number.
    #[must_use]
    pub fn exp(self) -> Self {
        let exp_r = self.real.exp();
        Self { real:      exp_r * self.imaginary.cos(),
               imaginary: exp_r * self.imaginary.sin(), }
    }

    /// Returns the principal natural logarithm of the number.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    /// let ln = Number::from_real(-1.0).ln();
    /// assert!(ln.real.abs() < 1e-12);
    /// assert!((ln.imaginary - std::f64::consts::PI).abs() < 1e-12);
    /// ```
    #[must_use]
    pub fn ln(self) -> Self {
        Self { real:      self.magnitude().ln(),
               imaginary: self.arg(), }
    }

    /// Raises the number to a complex power.
    ///
    /// Real bases with integral exponents use repeated multiplication so that
    /// results such as `2*10` stay exact; non-negative real bases with real
    /// exponents stay on the real line.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    /// assert_eq!(Number::from_real(2.0).pow(Number::from_real(10.0)), Number::from_real(1024.0));
    /// let root = Number::from_real(-4.0).pow(Number::from_real(0.5));
    /// assert!(root.real.abs() < 1e-12 && (root.imaginary - 2.0).abs() < 1e-12);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn pow(self, exponent: Self) -> Self {
        if self.is_real() && exponent.is_real() {
            if exponent.real.fract() == 0.0 && exponent.real.abs() < f64::from(i32::MAX) {
                return Self::from_real(self.real.powi(exponent.real as i32));
            }
            if self.real >= 0.0 {
                return Self::from_real(self.real.powf(exponent.real));
            }
        }
        if self == ZERO {
            return ZERO;
        }
        (exponent * self.ln()).exp()
    }

    /// Returns the principal square root of the number.
    #[must_use]
    pub fn sqrt(self) -> Self {
        let a = self.real;
        let b = self.imaginary;
        let r = a.hypot(b);

        let real = f64::midpoint(r, a).sqrt();
        let imaginary = ((r - a) / 2.0).sqrt().copysign(b);

        Self { real, imaginary }
    }

    /// Returns the sine of the number.
    #[must_use]
    pub fn sin(self) -> Self {
        Self { real:      self.real.sin() * self.imaginary.cosh(),
               imaginary: self.real.cos() * self.imaginary.sinh(), }
    }

    /// Returns the cosine of the number.
    #[must_use]
    pub fn cos(self) -> Self {
        Self { real:      self.real.cos() * self.imaginary.cosh(),
               imaginary: -self.real.sin() * self.imaginary.sinh(), }
    }

    /// Returns the hyperbolic sine of the number.
    #[must_use]
    pub fn sinh(self) -> Self {
        Self { real:      self.real.sinh() * self.imaginary.cos(),
               imaginary: self.real.cosh() * self.imaginary.sin(), }
    }

    /// Returns the hyperbolic cosine of the number.
    #[must_use]
    pub fn cosh(self) -> Self {
        Self { real:      self.real.cosh() * self.imaginary.cos(),
               imaginary: self.real.sinh() * self.imaginary.sin(), }
    }

    /// Returns `π` times the number.
    #[must_use]
    pub fn times_pi(self) -> Self {
        Self { real:      PI * self.real,
               imaginary: PI * self.imaginary, }
    }

    /// Returns `true` if the two numbers are equal within the relative
    /// tolerance `tolerance`.
    ///
    /// Identical numbers are always equal. Otherwise the numbers must lie in
    /// the same half-plane, and their distance must not exceed `tolerance`
    /// times the larger magnitude. The relation is symmetric, and a tolerance
    /// of zero gives exact equality.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    ///
    /// let a = Number::from_real(1.0);
    /// let b = Number::from_real(1.00001);
    /// assert!(a.tolerantly_equal_within(b, 1e-4));
    /// assert!(!a.tolerantly_equal_within(b, 0.0));
    /// assert!(a.tolerantly_equal_within(a, 0.0));
    /// ```
    #[must_use]
    pub fn tolerantly_equal_within(self, other: Self, tolerance: f64) -> bool {
        if self == other {
            return true;
        }
        let same_half_plane = self.real * other.real >= 0.0 || self.imaginary * other.imaginary >= 0.0;
        if !same_half_plane {
            return false;
        }
        let distance = (self - other).magnitude();
        distance <= tolerance * self.magnitude().max(other.magnitude())
    }

    /// Returns `true` if both parts of the number lie within `tolerance` of an
    /// integer.
    #[must_use]
    pub fn integral_within(self, tolerance: f64) -> bool {
        (self.real - self.real.round()).abs() <= tolerance
        && (self.imaginary - self.imaginary.round()).abs() <= tolerance
    }

    /// Returns `true` if the number is near an integer.
    #[must_use]
    pub fn near_integer(self) -> bool {
        self.integral_within(INTEGER_TOLERANCE)
    }

    /// Returns `true` if the number is near the real line.
    #[must_use]
    pub fn near_real(self) -> bool {
        self.imaginary.abs() <= REAL_TOLERANCE || self.imaginary.abs() <= REAL_TOLERANCE * self.real.abs()
    }

    /// Returns `true` if the number is near `0` or `1`.
    #[must_use]
    pub fn near_boolean(self) -> bool {
        self.to_boolean().is_some()
    }

    /// Returns the nearest integer if the number is near one and near the
    /// real line.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    /// assert_eq!(Number::from_real(2.9999).to_integer(), Some(3));
    /// assert_eq!(Number::from_real(2.5).to_integer(), None);
    /// assert_eq!(Number::new(1.0, 1.0).to_integer(), None);
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn to_integer(self) -> Option<i64> {
        let rounded = self.real.round();
        let in_range = rounded.abs() <= crate::util::num::MAX_SAFE_U64_INT as f64;
        (self.near_real() && self.near_integer() && in_range).then_some(rounded as i64)
    }

    /// Returns the boolean the number stands for, if it is near `0` or `1`.
    #[must_use]
    pub fn to_boolean(self) -> Option<bool> {
        match self.to_integer() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        }
    }

    /// Returns the tolerant floor of the number.
    ///
    /// A number tolerantly equal to its nearest integer floors to that
    /// integer. Complex numbers follow McDonnell's rule: floor both parts,
    /// then step the real or imaginary part up when the fractional parts sum
    /// to at least one.
    ///
    /// # Example
    /// ```
    /// use aplite::interpreter::value::number::Number;
    /// assert_eq!(Number::from_real(-2.5).floor(1e-4), Number::from_real(-3.0));
    /// assert_eq!(Number::from_real(2.99999).floor(1e-4), Number::from_real(3.0));
    /// assert_eq!(Number::new(1.5, 2.7).floor(1e-4), Number::new(1.0, 3.0));
    /// ```
    #[must_use]
    pub fn floor(self, tolerance: f64) -> Self {
        if self.is_real() {
            let nearest = Self::from_real(self.real.round());
            if self.tolerantly_equal_within(nearest, tolerance) {
                return nearest;
            }
            return Self::from_real(self.real.floor());
        }
        let base = Self::new(self.real.floor(), self.imaginary.floor());
        let x = self.real - base.real;
        let y = self.imaginary - base.imaginary;
        let sum = Self::from_real(x + y);
        if x + y < 1.0 && !sum.tolerantly_equal_within(ONE, tolerance) {
            base
        } else if x >= y {
            base + ONE
        } else {
            base + I
        }
    }

    /// Returns the tolerant ceiling of the number.
    #[must_use]
    pub fn ceiling(self, tolerance: f64) -> Self {
        -((-self).floor(tolerance))
    }

    /// Returns the gamma function of a real number.
    ///
    /// Uses the Lanczos approximation, with the reflection formula for
    /// arguments below one half.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn gamma(x: f64) -> f64 {
        const G: f64 = 7.0;
        const COEFFICIENTS: [f64; 9] = [0.999_999_999_999_809_9,
                                        676.520_368_121_885_1,
                                        -1_259.139_216_722_402_8,
                                        771.323_428_777_653_1,
                                        -176.615_029_162_140_6,
                                        12.507_343_278_686_905,
                                        -0.138_571_095_265_720_12,
                                        9.984_369_578_019_572e-6,
                                        1.505_632_735_149_311_6e-7];

        if x.fract() == 0.0 && x > 0.0 && x < 171.0 {
            return (1..x as u32).map(f64::from).product();
        }
        if x < 0.5 {
            return PI / ((PI * x).sin() * Self::gamma(1.0 - x));
        }
        let x = x - 1.0;
        let mut sum = COEFFICIENTS[0];
        for (i, coefficient) in COEFFICIENTS.iter().enumerate().skip(1) {
            sum += coefficient / (x + crate::util::num::usize_to_f64(i));
        }
        let t = x + G + 0.5;
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * sum
    }
}

impl ops::Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { real:      -self.real,
               imaginary: -self.imaginary, }
    }
}

impl ops::Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { real:      self.real + rhs.real,
               imaginary: self.imaginary + rhs.imaginary, }
    }
}

impl ops::AddAssign for Number {
    fn add_assign(&mut self, rhs: Self) {
        self.real += rhs.real;
        self.imaginary += rhs.imaginary;
    }
}

impl ops::Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { real:      self.real - rhs.real,
               imaginary: self.imaginary - rhs.imaginary, }
    }
}

impl ops::Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.is_real() && rhs.is_real() {
            return Self::from_real(self.real * rhs.real);
        }
        Self { real:      self.real
                              .mul_add(rhs.real, -(self.imaginary * rhs.imaginary)),
               imaginary: self.real.mul_add(rhs.imaginary, self.imaginary * rhs.real), }
    }
}

impl ops::Div for Number {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        if self.is_real() && rhs.is_real() {
            return Self::from_real(self.real / rhs.real);
        }
        let denom = rhs.real.mul_add(rhs.real, rhs.imaginary * rhs.imaginary);
        Self { real:      self.real.mul_add(rhs.real, self.imaginary * rhs.imaginary) / denom,
               imaginary: self.imaginary
                              .mul_add(rhs.real, -(self.real * rhs.imaginary))
                          / denom, }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::from_real(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Self::from_real(f64::from(value))
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        if value { ONE } else { ZERO }
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Self::from_real(crate::util::num::usize_to_f64(value))
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        OrderedFloat(self.real) == OrderedFloat(other.real)
        && OrderedFloat(self.imaginary) == OrderedFloat(other.imaginary)
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        OrderedFloat(self.real).hash(state);
        OrderedFloat(self.imaginary).hash(state);
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Number {
    fn cmp(&self, other: &Self) -> Ordering {
        OrderedFloat(self.real).cmp(&OrderedFloat(other.real))
                               .then_with(|| OrderedFloat(self.imaginary).cmp(&OrderedFloat(other.imaginary)))
    }
}
