use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Dense node index in `[0, graph.size())`
pub type NodeId = usize;

/// An ordered `(from, to)` node pair
pub type Arc = (NodeId, NodeId);

/// Accumulated or per-arc travel cost.
///
/// Costs are non-negative. Unreachable nodes carry `Cost::INFINITE`, which
/// aggregation code must skip rather than treat as zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Cost = Cost(0.0);
    pub const INFINITE: Cost = Cost(f64::INFINITY);

    pub fn new(cost: f64) -> Self {
        Cost(cost)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// True for every cost except the unreachable sentinel
    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }

    /// Total order used by priority queues and sorting (NaN sorts last)
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// Remaining budget after spending `spent`, never below zero
    pub fn saturating_sub(self, spent: Cost) -> Cost {
        Cost((self.0 - spent.0).max(0.0))
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::ZERO
    }
}

impl std::ops::Add for Cost {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Cost(self.0 + other.0)
    }
}

impl std::ops::AddAssign for Cost {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl From<u32> for Cost {
    fn from(cost: u32) -> Self {
        Cost(f64::from(cost))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_finite() {
            write!(f, "{}", self.0)
        } else {
            write!(f, "inf")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_addition() {
        let sum = Cost::from(2) + Cost::new(1.5);
        assert_eq!(sum.value(), 3.5);
    }

    #[test]
    fn test_infinite_sentinel() {
        assert!(!Cost::INFINITE.is_finite());
        assert!(Cost::ZERO.is_finite());
        assert!(Cost::from(1_000_000) < Cost::INFINITE);
        assert!(!(Cost::INFINITE + Cost::from(1)).is_finite());
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(Cost::from(10).saturating_sub(Cost::from(4)), Cost::from(6));
        assert_eq!(Cost::from(3).saturating_sub(Cost::from(4)), Cost::ZERO);
    }

    #[test]
    fn test_display() {
        assert_eq!(Cost::from(5).to_string(), "5");
        assert_eq!(Cost::new(2.5).to_string(), "2.5");
        assert_eq!(Cost::INFINITE.to_string(), "inf");
    }
}
