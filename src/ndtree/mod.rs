//! Non-dominated point archive.
//!
//! [`NDTree`] keeps exactly the antichain of the points inserted so far:
//! a new point is dropped when a stored point dominates it, and it evicts
//! every stored point it dominates. Leaves split once they overflow and
//! internal nodes left with a single child are collapsed, so lookups prune
//! whole subtrees by their ideal/nadir bounding boxes.
//!
//! The archive doubles as a point-cloud oracle; see
//! [`PointCloudOracle`](crate::oracle::PointCloudOracle).

mod config;
mod error;
mod io;
mod tree;

pub use config::NDTreeConfig;
pub use error::NDTreeError;
pub use tree::{NDTree, NodeSnapshot};
