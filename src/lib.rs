//! paretobox - adaptive box decomposition of monotone predicates
//!
//! Learns the boundary of an upward-closed set inside an n-dimensional box
//! using only membership queries. The space is recursively split into boxes
//! proven outside the set (`ylow`), boxes proven inside it (`yup`) and a
//! shrinking band of undetermined boxes (`border`).
//!
//! ```
//! use paretobox::{multidim_search, FnOracle, Point, Rectangle, SearchConfig};
//!
//! let xspace = Rectangle::new(Point::from([0.0, 0.0]), Point::from([1.0, 1.0]));
//! let oracle = FnOracle::new(2, |p: &Point| p[0] * p[1] >= 0.25);
//! let result = multidim_search(&xspace, &oracle, &SearchConfig::new(1e-2, 1e-2)).unwrap();
//! assert!(result.volume_yup() > 0.3);
//! ```

pub mod geometry;
pub mod ndtree;
pub mod oracle;
pub mod result_set;
pub mod search;

pub use geometry::{Point, Rectangle, Segment};
pub use ndtree::{NDTree, NDTreeConfig};
pub use oracle::{FnOracle, Oracle, PointCloudOracle};
pub use result_set::ResultSet;
pub use search::{
    multidim_search, OptLevel, ParSearch, SearchAlgorithm, SearchConfig, SearchError, SeqSearch,
    WorkerPool,
};
