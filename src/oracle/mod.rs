//! Oracles: the monotone membership predicates the search learns.
//!
//! The engine is generic over [`Oracle`] and never names a concrete backend.
//! Two backends ship with the crate: [`FnOracle`] wraps a closure and
//! [`PointCloudOracle`] answers from a non-dominated point archive.

mod error;
mod fn_oracle;
mod point_cloud;

pub use error::OracleError;
pub use fn_oracle::FnOracle;
pub use point_cloud::PointCloudOracle;

use std::fmt::Debug;

use crate::geometry::Point;

/// Black-box membership predicate over an n-dimensional box.
///
/// # Contract
///
/// Implementations must be monotone (upward closed): if `member(p)` holds
/// and `q >= p` componentwise, then `member(q)` holds. The search relies on
/// this without checking it.
///
/// `member` takes `&mut self` so an oracle may keep private mutable state,
/// such as a lazily started evaluator. Oracles are therefore never shared:
/// the parallel search hands every dispatched job its own clone.
pub trait Oracle: Clone + Send + Debug {
    /// Number of coordinates every queried point must have.
    fn dimension(&self) -> usize;

    /// Evaluates the predicate at `point`.
    fn member(&mut self, point: &Point) -> Result<bool, OracleError>;

    /// Returns an error unless `point` has [`dimension`](Oracle::dimension)
    /// coordinates.
    fn check_point(&self, point: &Point) -> Result<(), OracleError> {
        if point.dim() == self.dimension() {
            Ok(())
        } else {
            Err(OracleError::DimensionMismatch {
                expected: self.dimension(),
                found: point.dim(),
            })
        }
    }
}
