//! Boundary search: learns the border of an upward-closed set inside a box.
//!
//! Starting from `border = {xspace}`, each step pops the largest undetermined
//! box, binary-searches its diagonal for the boundary of the closure, and
//! splits it into a part below the cut (`ylow`), a part above it (`yup`) and
//! the disjoint boxes of [`disjoint_irect`](crate::geometry::disjoint_irect)
//! that stay undetermined. The three lists always partition the space.
//! Depending on [`OptLevel`] the cut is also propagated to the rest of the
//! border.
//!
//! The loop ends when the unclassified volume drops below `delta`, when
//! `max_step` boxes were refined, or when the border is empty.

mod binary_search;
mod border;
mod common;
mod config;
mod error;
mod parallel;
mod sequential;


pub use binary_search::binary_search;
pub use config::{OptLevel, SearchConfig};
pub use error::SearchError;
pub use parallel::{ParSearch, WorkerPool};
pub use sequential::SeqSearch;

use crate::geometry::Rectangle;
use crate::oracle::Oracle;
use crate::result_set::ResultSet;

/// Strategy for learning the boundary of an oracle within a search space.
pub trait SearchAlgorithm {
    /// Runs the search to completion.
    ///
    /// # Errors
    ///
    /// Fails before any oracle call on an invalid configuration, an unbounded
    /// space or a dimension mismatch, and aborts on the first oracle error.
    fn search<O: Oracle>(&self, xspace: &Rectangle, oracle: &O) -> Result<ResultSet, SearchError>;
}

/// Runs a sequential or parallel search as selected by `config`.
///
/// Parallel searches start a [`WorkerPool`] of `config.workers` threads (all
/// available CPUs when unset) and shut it down before returning.
///
/// # Example
///
/// ```
/// use paretobox::geometry::{Point, Rectangle};
/// use paretobox::oracle::FnOracle;
/// use paretobox::search::{multidim_search, SearchConfig};
///
/// let xspace = Rectangle::new(Point::from([0.0, 0.0]), Point::from([1.0, 1.0]));
/// let oracle = FnOracle::new(2, |p: &Point| p[0] + p[1] >= 1.0);
/// let result = multidim_search(&xspace, &oracle, &SearchConfig::new(1e-2, 1e-2)).unwrap();
/// assert!(result.volume_border() < 1e-2);
/// ```
pub fn multidim_search<O: Oracle>(
    xspace: &Rectangle,
    oracle: &O,
    config: &SearchConfig,
) -> Result<ResultSet, SearchError> {
    if !config.parallel {
        return SeqSearch::new(config.clone()).search(xspace, oracle);
    }
    config.validate()?;
    let pool = match config.workers {
        Some(n) => WorkerPool::new(n)?,
        None => WorkerPool::with_available_parallelism()?,
    };
    let result = ParSearch::new(config.clone(), &pool).search(xspace, oracle);
    pool.shutdown();
    result
}
