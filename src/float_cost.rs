use std::cmp::Eq;
use std::fmt::Debug;

use derive_more::Display;
use num_traits::One;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::FloatCore;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A floating point [`Cost`].
///
/// Plain floats are not `Ord`, so they are wrapped in an [`OrderedFloat`].
/// Infinity plays the role of the unreachable cost and `NaN` is never a
/// valid step cost.
#[derive(Copy, Clone, Default, Debug, Display)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost<F: FloatCore>(pub OrderedFloat<F>);

impl<F> Cost for FloatCost<F>
where
    FloatCost<F>: Debug + std::fmt::Display,
    F: FloatCore,
{
    /// Negative and `NaN` costs are both rejected as step costs.
    #[inline(always)]
    fn is_negative(&self) -> bool {
        self.get().is_nan() || self.0 < OrderedFloat::zero()
    }
}

impl<F> FloatCost<F>
where
    F: FloatCore,
{
    pub fn new(f: F) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn get(&self) -> F {
        self.0.into_inner()
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(F::infinity()))
    }
}

impl<F: FloatCore> From<F> for FloatCost<F> {
    fn from(f: F) -> Self {
        Self::new(f)
    }
}

impl<F> std::ops::Add for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl<F> std::ops::Sub for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}
impl<F> std::ops::Mul for FloatCost<F>
where
    F: FloatCore,
{
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}
impl<F> std::ops::AddAssign for FloatCost<F>
where
    F: FloatCore,
{
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}
impl<F> SaturatingAdd for FloatCost<F>
where
    F: FloatCore,
{
    /// Floats already saturate at infinity.
    fn saturating_add(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl<F> Zero for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat::zero()
    }
    #[inline(always)]
    fn zero() -> Self {
        Self(OrderedFloat::zero())
    }
}
impl<F> One for FloatCost<F>
where
    F: FloatCore,
{
    #[inline(always)]
    fn one() -> Self {
        Self(OrderedFloat::one())
    }
}
impl<F> UpperBounded for FloatCost<F>
where
    F: FloatCore,
{
    fn max_value() -> Self {
        Self::infinity()
    }
}

// Ordering is forwarded to `OrderedFloat`. Deriving would require `F: Ord`.
impl<F: FloatCore> PartialOrd for FloatCost<F> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<F: FloatCore> Ord for FloatCost<F> {
    #[inline(always)]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}
impl<F: FloatCore> PartialEq for FloatCost<F> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}
impl<F: FloatCore> Eq for FloatCost<F> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero() {
        assert!(FloatCost::new(0.0f32).is_zero());
        assert!(FloatCost::<f64>::zero().is_zero());
    }

    #[test]
    fn order() {
        assert!(FloatCost::new(0.5f64) < FloatCost::new(1.5f64));
        assert!(FloatCost::new(0.0f32) == FloatCost::new(0.0f32));
        assert!(FloatCost::new(1e9f64) < FloatCost::infinity());
    }

    #[test]
    fn sum_saturates_at_infinity() {
        let mut f = FloatCost::new(0.0f32);
        f += FloatCost::new(1.0f32);
        f += FloatCost::new(1.0f32);
        assert_eq!(f, FloatCost::new(2.0f32));
        assert!(f.valid());

        let f = f.saturating_add(&FloatCost::infinity());
        assert_eq!(f, FloatCost::max_value());
        assert!(!f.valid());
    }

    #[test]
    fn negative_and_nan_steps() {
        assert!(FloatCost::new(-0.25f64).is_negative());
        assert!(FloatCost::new(f64::NAN).is_negative());
        assert!(!FloatCost::new(0.0f64).is_negative());
        assert!(!FloatCost::new(2.5f64).is_negative());
    }

    #[test]
    fn one() {
        let two = FloatCost::new(2.0f64);
        assert_eq!(two * FloatCost::one(), two);
        assert_eq!(two * two, FloatCost::new(4.0f64));
    }

    #[test]
    fn display() {
        assert_eq!(FloatCost::new(1.5f64).to_string(), "1.5");
    }
}
