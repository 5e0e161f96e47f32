//! Numeric values the evaluator folds over.
//!
//! The extended grammar evaluates everything as a [`Complex`]; plain literals
//! are complex numbers with a zero imaginary part.  The base grammar uses
//! [`Integer`].  Both implement [`Numeric`], which is all the parser needs.

use serde::Serialize;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// What the parser needs from a value type.
///
/// Division is the one partial operation, so it is not expressed through
/// `std::ops::Div`: `checked_div` returns `None` for a zero divisor and the
/// parser turns that into a domain error.
pub trait Numeric:
    Copy + fmt::Debug + fmt::Display + Serialize + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    /// Value of an integer literal.
    fn from_literal(n: i64) -> Self;

    /// `self / rhs`, or `None` when `rhs` is zero.
    fn checked_div(self, rhs: Self) -> Option<Self>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Complex
// ─────────────────────────────────────────────────────────────────────────────

/// A complex number `re + im·j`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Complex {
    /// Real component.
    pub re: f64,

    /// Imaginary component.
    pub im: f64,
}

impl Complex {
    /// `0 + 0j`.
    pub const ZERO: Complex = Complex::new(0.0, 0.0);

    /// Construct from real and imaginary components.
    ///
    /// ```
    /// use fourbanger::value::Complex;
    /// let c = Complex::new(5.0, -1.0);
    /// assert_eq!(c.re, 5.0);
    /// assert_eq!(c.im, -1.0);
    /// ```
    #[must_use]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// The complex conjugate `re - im·j`.
    #[must_use]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Magnitude `|z|`.
    ///
    /// ```
    /// use fourbanger::value::Complex;
    /// assert_eq!(Complex::new(3.0, 4.0).norm(), 5.0);
    /// ```
    #[must_use]
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Squared magnitude `|z|²`, without the square root.
    #[must_use]
    pub fn norm_sqr(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Polar angle in radians, in `(-π, π]`.
    #[must_use]
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// `self · conj(rhs) / |rhs|²`, or `None` if `rhs` is zero.
    ///
    /// The quotient is computed with Smith's scaling, so `|rhs|²` is never
    /// formed: divisors whose squared magnitude would overflow (or underflow)
    /// still divide correctly.
    ///
    /// ```
    /// use fourbanger::value::Complex;
    /// let q = Complex::new(10.0, 0.0).checked_div(Complex::new(2.0, 0.0));
    /// assert_eq!(q, Some(Complex::new(5.0, 0.0)));
    /// assert_eq!(Complex::new(1.0, 1.0).checked_div(Complex::ZERO), None);
    /// ```
    #[must_use]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.re == 0.0 && rhs.im == 0.0 {
            return None;
        }

        let (a, b, c, d) = (self.re, self.im, rhs.re, rhs.im);

        if c.abs() >= d.abs() {
            let ratio: f64 = d / c;
            let denominator: f64 = c + d * ratio;

            Some(Self::new(
                (a + b * ratio) / denominator,
                (b - a * ratio) / denominator,
            ))
        } else {
            let ratio: f64 = c / d;
            let denominator: f64 = c * ratio + d;

            Some(Self::new(
                (a * ratio + b) / denominator,
                (b * ratio - a) / denominator,
            ))
        }
    }

    /// In‑place counterpart of [`checked_div`](Self::checked_div).  Leaves
    /// `self` untouched and returns `false` when `rhs` is zero.
    pub fn checked_div_assign(&mut self, rhs: Self) -> bool {
        match self.checked_div(rhs) {
            Some(quotient) => {
                *self = quotient;
                true
            }
            None => false,
        }
    }
}

impl From<i64> for Complex {
    fn from(n: i64) -> Self {
        Self::new(n as f64, 0.0)
    }
}

impl Add for Complex {
    type Output = Complex;

    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Complex;

    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

/// `(a+bi)(c+di) = (ac−bd) + (ad+bc)i`
impl Mul for Complex {
    type Output = Complex;

    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Complex) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Complex) {
        // both components from the pre‑assignment operands
        let re: f64 = self.re * rhs.re - self.im * rhs.im;
        let im: f64 = self.re * rhs.im + self.im * rhs.re;

        self.re = re;
        self.im = im;
    }
}

impl fmt::Display for Complex {
    /// `re + imj`, or `re - |im|j` for a negative imaginary part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `+ 0.0` folds a negative zero into `0`
        let re: f64 = self.re + 0.0;

        if self.im.is_sign_negative() && self.im != 0.0 {
            write!(f, "{} - {}j", re, -self.im)
        } else {
            write!(f, "{} + {}j", re, self.im.abs())
        }
    }
}

impl Numeric for Complex {
    fn from_literal(n: i64) -> Self {
        Complex::from(n)
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        Complex::checked_div(self, rhs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Integer
// ─────────────────────────────────────────────────────────────────────────────

/// A 64‑bit integer whose arithmetic wraps on overflow and whose division
/// truncates toward zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Integer(pub i64);

impl Add for Integer {
    type Output = Integer;

    fn add(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Integer {
    type Output = Integer;

    fn sub(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_sub(rhs.0))
    }
}

impl Mul for Integer {
    type Output = Integer;

    fn mul(self, rhs: Integer) -> Integer {
        Integer(self.0.wrapping_mul(rhs.0))
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf: itoa::Buffer = itoa::Buffer::new();
        f.write_str(buf.format(self.0))
    }
}

impl Numeric for Integer {
    fn from_literal(n: i64) -> Self {
        Integer(n)
    }

    fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            None
        } else {
            Some(Integer(self.0.wrapping_div(rhs.0)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_ops_match_binary_ops() {
        let a = Complex::new(1.5, -2.0);
        let b = Complex::new(-0.5, 3.0);

        let mut sum = a;
        sum += b;
        assert_eq!(sum, a + b);

        let mut diff = a;
        diff -= b;
        assert_eq!(diff, a - b);

        let mut quot = a;
        assert!(quot.checked_div_assign(b));
        assert_eq!(Some(quot), a.checked_div(b));
    }

    #[test]
    fn mul_assign_uses_original_real_part() {
        let mut z = Complex::new(2.0, 3.0);
        z *= Complex::new(4.0, 5.0);

        // (2+3i)(4+5i) = 8 + 10i + 12i - 15 = -7 + 22i
        assert_eq!(z, Complex::new(-7.0, 22.0));
    }

    #[test]
    fn mul_assign_by_self() {
        let mut z = Complex::new(1.0, 1.0);
        z *= z;

        assert_eq!(z, Complex::new(0.0, 2.0));
    }

    #[test]
    fn failed_div_assign_leaves_value() {
        let mut z = Complex::new(7.0, -1.0);

        assert!(!z.checked_div_assign(Complex::ZERO));
        assert_eq!(z, Complex::new(7.0, -1.0));
    }

    #[test]
    fn integer_wraps_and_truncates() {
        assert_eq!(Integer(i64::MAX) + Integer(1), Integer(i64::MIN));
        assert_eq!(Integer(-7).checked_div(Integer(2)), Some(Integer(-3)));
        assert_eq!(Integer(i64::MIN).checked_div(Integer(-1)), Some(Integer(i64::MIN)));
        assert_eq!(Integer(1).checked_div(Integer(0)), None);
    }
}
