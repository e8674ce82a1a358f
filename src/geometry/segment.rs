//! Diagonal segments used by the binary search.

use std::fmt::{self, Display};

use super::point::Point;

/// A segment `[low, high]` with `low <= high` componentwise.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    low: Point,
    high: Point,
}

impl Segment {
    /// Creates the segment spanned by `a` and `b`, ordering the ends
    /// componentwise.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn new(a: Point, b: Point) -> Self {
        let low = a.min_point(&b);
        let high = a.max_point(&b);
        Self { low, high }
    }

    pub fn low(&self) -> &Point {
        &self.low
    }

    pub fn high(&self) -> &Point {
        &self.high
    }

    pub fn dim(&self) -> usize {
        self.low.dim()
    }

    /// The vector `high - low`.
    pub fn diag(&self) -> Point {
        &self.high - &self.low
    }

    pub fn norm(&self) -> f64 {
        self.diag().norm()
    }

    pub fn center(&self) -> Point {
        self.low.midpoint(&self.high)
    }

    pub(crate) fn set_low(&mut self, low: Point) {
        self.low = low;
    }

    pub(crate) fn set_high(&mut self, high: Point) {
        self.high = high;
    }

    pub fn into_parts(self) -> (Point, Point) {
        (self.low, self.high)
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}>", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_orders_ends() {
        let s = Segment::new(Point::from([2.0, 3.0]), Point::from([0.0, 1.0]));
        assert_eq!(s.low(), &Point::from([0.0, 1.0]));
        assert_eq!(s.high(), &Point::from([2.0, 3.0]));
        assert_eq!(s.diag(), Point::from([2.0, 2.0]));
        assert_eq!(s.center(), Point::from([1.0, 2.0]));
        assert!((s.norm() - 8f64.sqrt()).abs() < 1e-12);
    }
}
