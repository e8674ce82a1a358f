//! N-dimensional points and the componentwise order between them.
//!
//! Points are immutable value types. Every binary operation requires both
//! operands to share the same dimension; the operators panic on a mismatch
//! and the `try_*` variants report it as a [`GeometryError`].

use std::fmt::{self, Display};
use std::ops::{Add, Div, Index, Mul, Sub};
use std::str::FromStr;

use super::error::GeometryError;

/// An ordered tuple of `n` real coordinates.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Point(Vec<f64>);

impl Point {
    /// Creates a point from its coordinates.
    pub fn new(coords: Vec<f64>) -> Self {
        Self(coords)
    }

    /// Creates an `n`-dimensional point with every coordinate set to `value`.
    pub fn splat(value: f64, dim: usize) -> Self {
        Self(vec![value; dim])
    }

    pub fn dim(&self) -> usize {
        self.0.len()
    }

    pub fn coords(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Returns an error unless `other` has the same dimension as `self`.
    pub fn check_dim(&self, other: &Point) -> Result<(), GeometryError> {
        if self.dim() == other.dim() {
            Ok(())
        } else {
            Err(GeometryError::DimensionMismatch {
                expected: self.dim(),
                found: other.dim(),
            })
        }
    }

    #[track_caller]
    fn assert_same_dim(&self, other: &Point) {
        assert_eq!(
            self.dim(),
            other.dim(),
            "Point dimension mismatch: {} vs {}",
            self.dim(),
            other.dim()
        );
    }

    fn all_pairs(&self, other: &Point, pred: impl Fn(f64, f64) -> bool) -> bool {
        self.assert_same_dim(other);
        self.0.iter().zip(&other.0).all(|(&a, &b)| pred(a, b))
    }

    fn zip_with(&self, other: &Point, op: impl Fn(f64, f64) -> f64) -> Point {
        self.assert_same_dim(other);
        Point(self.0.iter().zip(&other.0).map(|(&a, &b)| op(a, b)).collect())
    }

    /// `self <= other` on every axis.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn less_equal(&self, other: &Point) -> bool {
        self.all_pairs(other, |a, b| a <= b)
    }

    /// `self < other` on every axis.
    pub fn less(&self, other: &Point) -> bool {
        self.all_pairs(other, |a, b| a < b)
    }

    /// `self >= other` on every axis.
    pub fn greater_equal(&self, other: &Point) -> bool {
        self.all_pairs(other, |a, b| a >= b)
    }

    /// `self > other` on every axis.
    pub fn greater(&self, other: &Point) -> bool {
        self.all_pairs(other, |a, b| a > b)
    }

    /// Neither `self <= other` nor `self >= other`.
    pub fn incomparable(&self, other: &Point) -> bool {
        !self.less_equal(other) && !self.greater_equal(other)
    }

    /// Weak Pareto dominance: `self` is no worse than `other` on every axis.
    pub fn dominates(&self, other: &Point) -> bool {
        self.less_equal(other)
    }

    /// Checked form of [`Point::dominates`].
    pub fn try_dominates(&self, other: &Point) -> Result<bool, GeometryError> {
        self.check_dim(other)?;
        Ok(self.dominates(other))
    }

    /// True when no coordinate is NaN, so the point is comparable at all.
    pub fn is_comparable(&self) -> bool {
        self.0.iter().all(|c| !c.is_nan())
    }

    /// Componentwise minimum.
    pub fn min_point(&self, other: &Point) -> Point {
        self.zip_with(other, f64::min)
    }

    /// Componentwise maximum.
    pub fn max_point(&self, other: &Point) -> Point {
        self.zip_with(other, f64::max)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        self.zip_with(other, |a, b| (a + b) / 2.0)
    }

    /// Euclidean distance.
    pub fn distance(&self, other: &Point) -> f64 {
        self.assert_same_dim(other);
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|c| c * c).sum::<f64>().sqrt()
    }
}

impl Index<usize> for Point {
    type Output = f64;

    fn index(&self, axis: usize) -> &f64 {
        &self.0[axis]
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Self(coords.to_vec())
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    fn add(self, rhs: &Point) -> Point {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    fn sub(self, rhs: &Point) -> Point {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for &Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point(self.0.iter().map(|c| c * rhs).collect())
    }
}

impl Div<f64> for &Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point(self.0.iter().map(|c| c / rhs).collect())
    }
}

/// Formats as `(x1, x2, ..., xn)`; the shortest representation that parses
/// back to the same value.
impl Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

impl FromStr for Point {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed)
            .trim();
        if body.is_empty() {
            return Err(GeometryError::EmptyPoint);
        }
        body.split(',')
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| GeometryError::InvalidPoint(s.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_componentwise_order() {
        let a = Point::from([1.0, 2.0]);
        let b = Point::from([2.0, 3.0]);
        let c = Point::from([0.0, 5.0]);

        assert!(a.less_equal(&b));
        assert!(a.less(&b));
        assert!(b.greater(&a));
        assert!(a.less_equal(&a));
        assert!(!a.less(&a));
        assert!(a.incomparable(&c));
        assert!(!a.incomparable(&b));
    }

    #[test]
    fn test_dominance_is_weak() {
        let a = Point::from([1.0, 1.0]);
        assert!(a.dominates(&a));
        assert!(a.dominates(&Point::from([1.0, 2.0])));
        assert!(!Point::from([1.0, 2.0]).dominates(&a));
    }

    #[test]
    fn test_try_dominates_reports_mismatch() {
        let a = Point::from([1.0, 1.0]);
        let b = Point::from([1.0, 1.0, 1.0]);
        assert_eq!(
            a.try_dominates(&b),
            Err(GeometryError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    #[should_panic(expected = "Point dimension mismatch")]
    fn test_add_mismatched_dimensions_panics() {
        let _ = &Point::from([1.0]) + &Point::from([1.0, 2.0]);
    }

    #[test]
    fn test_arithmetic() {
        let a = Point::from([1.0, 2.0]);
        let b = Point::from([3.0, 6.0]);
        assert_eq!(&a + &b, Point::from([4.0, 8.0]));
        assert_eq!(&b - &a, Point::from([2.0, 4.0]));
        assert_eq!(&a * 2.0, Point::from([2.0, 4.0]));
        assert_eq!(&b / 3.0, Point::from([1.0, 2.0]));
        assert_eq!(a.midpoint(&b), Point::from([2.0, 4.0]));
        assert!((Point::from([3.0, 4.0]).norm() - 5.0).abs() < 1e-12);
        assert!((a.distance(&b) - 20f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_point() {
        let a = Point::from([1.0, 5.0]);
        let b = Point::from([3.0, 2.0]);
        assert_eq!(a.min_point(&b), Point::from([1.0, 2.0]));
        assert_eq!(a.max_point(&b), Point::from([3.0, 5.0]));
    }

    #[test]
    fn test_display_parse_roundtrip() {
        let p = Point::from([1.0, 0.1, -2.5]);
        let text = p.to_string();
        assert_eq!(text, "(1, 0.1, -2.5)");
        assert_eq!(text.parse::<Point>().unwrap(), p);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("()".parse::<Point>(), Err(GeometryError::EmptyPoint));
        assert!(matches!(
            "(1, abc)".parse::<Point>(),
            Err(GeometryError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_nan_is_not_comparable() {
        assert!(Point::from([0.0, 1.0]).is_comparable());
        assert!(!Point::from([f64::NAN, 1.0]).is_comparable());
    }
}
