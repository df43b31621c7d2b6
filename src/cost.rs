/// A path cost.
///
/// Costs are totally ordered so frontiers can rank nodes, and saturate
/// instead of overflowing so an unreachable bound (`max_value()`) stays
/// unreachable after being extended.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + num_traits::One
    + std::ops::Add<Self, Output = Self>
    + std::ops::Sub<Self, Output = Self>
    + std::ops::AddAssign
{
    /// Whether this is a usable (finite) cost.
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }

    /// Negative step costs break the ordering guarantees of cost-ranked
    /// searches.
    #[inline(always)]
    fn is_negative(&self) -> bool {
        *self < Self::zero()
    }
}

macro_rules! impl_cost {
    ($($t:ty),* $(,)?) => {
        $(impl Cost for $t {})*
    };
}

impl_cost!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_costs_are_never_negative() {
        assert!(!0u32.is_negative());
        assert!(!u64::MAX.is_negative());
    }

    #[test]
    fn signed_costs() {
        assert!((-1i32).is_negative());
        assert!(!0i64.is_negative());
        assert!(3isize.valid());
        assert!(!i32::MAX.valid());
    }

    #[test]
    fn saturates() {
        use num_traits::SaturatingAdd;

        let sum = SaturatingAdd::saturating_add(&u8::MAX, &1);
        assert_eq!(sum, u8::MAX);
        assert!(!sum.valid());
        assert_eq!(SaturatingAdd::saturating_add(&i64::MAX, &7), i64::MAX);
    }
}
