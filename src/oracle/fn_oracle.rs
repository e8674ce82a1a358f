//! Closure-backed oracle.

use std::fmt;

use super::{Oracle, OracleError};
use crate::geometry::Point;

/// Oracle defined by a plain predicate.
///
/// # Example
///
/// ```rust
/// use paretobox::geometry::Point;
/// use paretobox::oracle::{FnOracle, Oracle};
///
/// let mut oracle = FnOracle::new(2, |p: &Point| p[0] + p[1] >= 1.5);
/// assert!(oracle.member(&Point::from([1.0, 1.0])).unwrap());
/// assert!(!oracle.member(&Point::from([0.5, 0.5])).unwrap());
/// ```
#[derive(Clone)]
pub struct FnOracle<F> {
    dim: usize,
    predicate: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&Point) -> bool + Clone + Send,
{
    pub fn new(dim: usize, predicate: F) -> Self {
        Self { dim, predicate }
    }
}

impl<F> fmt::Debug for FnOracle<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnOracle").field("dim", &self.dim).finish()
    }
}

impl<F> Oracle for FnOracle<F>
where
    F: Fn(&Point) -> bool + Clone + Send,
{
    fn dimension(&self) -> usize {
        self.dim
    }

    fn member(&mut self, point: &Point) -> Result<bool, OracleError> {
        self.check_point(point)?;
        Ok((self.predicate)(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_evaluates_predicate() {
        let mut oracle = FnOracle::new(2, |p: &Point| p[0] >= 0.5 && p[1] >= 0.5);
        assert_eq!(oracle.dimension(), 2);
        assert!(oracle.member(&Point::from([0.5, 0.7])).unwrap());
        assert!(!oracle.member(&Point::from([0.4, 0.7])).unwrap());
    }

    #[test]
    fn test_member_rejects_wrong_dimension() {
        let mut oracle = FnOracle::new(2, |_: &Point| true);
        assert!(matches!(
            oracle.member(&Point::from([1.0])),
            Err(OracleError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        ));
    }
}
