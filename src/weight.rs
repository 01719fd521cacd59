//! The `Weight` trait: an abstract ordered additive group used as the edge
//! weight / distance type throughout the weighted strategies (Dijkstra, A*,
//! MST, bidirectional Dijkstra).
//!
//! Grounded on `routee-compass-core::model::unit::cost::Cost`: a
//! newtype over `ordered_float::OrderedFloat<f64>` with `derive_more`
//! arithmetic derives, plus `ZERO`/`INFINITY` constants.

use derive_more::{Add, Neg, Sub, Sum};
use ordered_float::OrderedFloat;
use std::fmt;

/// An ordered additive group suitable for use as a distance/weight type.
///
/// `zero()` and `infinity()` are the identities a `Cost`-like type carries.
///
/// Implementations must satisfy, for all `v`:
/// - `v + Self::zero() == v`
/// - `v - Self::zero() == v`
/// - `v <= Self::infinity()`
///
/// Overflow (a sum reaching or exceeding `infinity()`) is never silently
/// saturated; callers detect it explicitly and the weighted strategies
/// surface it as `GearError`/`WeightedSearchError::Overflow`.
pub trait Weight:
    Copy + fmt::Debug + PartialOrd + std::ops::Add<Output = Self> + std::ops::Sub<Output = Self>
{
    fn zero() -> Self;
    fn infinity() -> Self;
}

/// A floating-point cost/distance value with a total order (NaN excluded by
/// construction via `OrderedFloat`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Add, Sub, Sum, Neg)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cost(OrderedFloat<f64>);

impl Cost {
    pub const ZERO: Cost = Cost(OrderedFloat(0.0));
    pub const INFINITY: Cost = Cost(OrderedFloat(f64::MAX));

    pub fn new(value: f64) -> Cost {
        Cost(OrderedFloat(value))
    }

    pub fn value(&self) -> f64 {
        self.0 .0
    }
}

impl From<f64> for Cost {
    fn from(value: f64) -> Self {
        Cost::new(value)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0 .0)
    }
}

impl Weight for Cost {
    fn zero() -> Self {
        Cost::ZERO
    }
    fn infinity() -> Self {
        Cost::INFINITY
    }
}

macro_rules! impl_weight_for_integer {
    ($($t:ty),* $(,)?) => {
        $(
            impl Weight for $t {
                fn zero() -> Self { 0 }
                fn infinity() -> Self { <$t>::MAX }
            }
        )*
    };
}

impl_weight_for_integer!(i32, i64, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_zero_is_additive_identity() {
        let v = Cost::new(3.5);
        assert_eq!(v + Cost::zero(), v);
        assert_eq!(v - Cost::zero(), v);
    }

    #[test]
    fn cost_orders_as_expected() {
        assert!(Cost::new(1.0) < Cost::new(2.0));
        assert!(Cost::new(2.0) <= Cost::infinity());
    }

    #[test]
    fn integer_weight_identities_hold() {
        assert_eq!(5i64 + i64::zero(), 5i64);
        assert_eq!(5i64 - i64::zero(), 5i64);
        assert!(5i64 <= i64::infinity());
    }
}
