use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Div, Mul},
};

use fraction::Fraction;

use crate::error::{MsrError, MsrResult};

use super::fraction_tools::{dotted_decomposition, is_power_of_two};

/// Exact fraction of a whole note.
///
/// Backed by [`Fraction`], which keeps itself in lowest terms, so every
/// arithmetic result is normalized. A zero duration is used as "unset" by
/// a few containers, and [`Duration::unbounded`] is the full length of a
/// senza-misura measure: it compares greater than every finite duration.
///
/// # Example
/// ```
/// use score_msr::primitives::Duration;
/// let quarter = Duration::new(1, 4);
/// let eighth = Duration::new(2, 16);
/// assert_eq!(quarter + eighth, Duration::new(3, 8));
/// assert_eq!(eighth.denominator(), 8);
/// assert!(Duration::unbounded() > Duration::new(1000, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    fraction: Fraction,
}
impl Duration {
    /// # Panics
    /// if denominator is zero.
    pub fn new(numerator: u64, denominator: u64) -> Self {
        assert!(denominator > 0, "Duration denominator must be positive");
        Self {
            fraction: Fraction::new(numerator, denominator),
        }
    }
    pub fn zero() -> Self {
        Self::new(0, 1)
    }
    pub fn whole() -> Self {
        Self::new(1, 1)
    }
    pub fn unbounded() -> Self {
        Self {
            fraction: Fraction::infinity(),
        }
    }
    pub fn get(&self) -> Fraction {
        self.fraction
    }
    /// Numerator in lowest terms. Zero for the unbounded duration.
    pub fn numerator(&self) -> u64 {
        self.fraction.numer().copied().unwrap_or(0)
    }
    /// Denominator in lowest terms. Zero for the unbounded duration.
    pub fn denominator(&self) -> u64 {
        self.fraction.denom().copied().unwrap_or(0)
    }
    pub fn is_zero(&self) -> bool {
        self.numerator() == 0 && !self.is_unbounded()
    }
    pub fn is_unbounded(&self) -> bool {
        self.fraction.is_infinite()
    }
    /// Rebuild from numerator and denominator.
    ///
    /// Never changes the represented value.
    pub fn normalized(self) -> Self {
        if self.is_unbounded() {
            return self;
        }
        Self::new(self.numerator(), self.denominator())
    }
    pub fn checked_sub(self, rhs: Self) -> MsrResult<Self> {
        if rhs > self {
            return Err(MsrError::NegativeDuration {
                left: self,
                right: rhs,
            });
        }
        Ok(Self::from(self.fraction - rhs.fraction))
    }
    /// Difference, or zero if `rhs` is longer.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        self.checked_sub(rhs).unwrap_or_else(|_| Self::zero())
    }
    /// None on division by zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.is_zero() {
            return None;
        }
        Some(self / rhs)
    }
    /// Some(n) if the duration is a whole number n.
    pub fn as_integer(&self) -> Option<u64> {
        match self.denominator() {
            1 => Some(self.numerator()),
            _ => None,
        }
    }
    /// Base note value and dots, if the duration can be notated as one
    /// (possibly dotted) note.
    ///
    /// ```
    /// use score_msr::primitives::Duration;
    /// assert_eq!(
    ///     Duration::new(7, 16).dotted_decomposition(),
    ///     Some((Duration::new(1, 4), 2))
    /// );
    /// assert_eq!(Duration::new(5, 8).dotted_decomposition(), None);
    /// ```
    pub fn dotted_decomposition(&self) -> Option<(Self, u8)> {
        if self.is_zero() || self.is_unbounded() {
            return None;
        }
        let (num, den) = (self.numerator(), self.denominator());
        if den == 1 && is_power_of_two(num) {
            return Some((*self, 0));
        }
        let (base_num, dots) = dotted_decomposition(num)?;
        Some((Self::new(base_num, den), dots))
    }
}
impl Default for Duration {
    fn default() -> Self {
        Self::zero()
    }
}
impl From<Fraction> for Duration {
    fn from(fraction: Fraction) -> Self {
        Self { fraction }
    }
}
impl Add for Duration {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::from(self.fraction + rhs.fraction)
    }
}
impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Self) {
        self.fraction = self.fraction + rhs.fraction;
    }
}
impl Mul for Duration {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self::from(self.fraction * rhs.fraction)
    }
}
impl Mul<u64> for Duration {
    type Output = Self;
    fn mul(self, rhs: u64) -> Self::Output {
        Self::from(self.fraction * Fraction::new(rhs, 1_u64))
    }
}
impl Div for Duration {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        Self::from(self.fraction / rhs.fraction)
    }
}
impl Sum for Duration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |acc, d| acc + d)
    }
}
impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unbounded() {
            return write!(f, "unbounded");
        }
        write!(f, "{}/{}", self.numerator(), self.denominator())
    }
}
