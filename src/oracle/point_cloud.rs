//! Oracle defined by a cloud of points.

use std::path::Path;

use super::{Oracle, OracleError};
use crate::geometry::Point;
use crate::ndtree::{NDTree, NDTreeConfig, NDTreeError};

/// Membership holds at `p` iff some archived point dominates `p`, which
/// makes the predicate upward closed by construction.
#[derive(Debug, Clone)]
pub struct PointCloudOracle {
    dim: usize,
    archive: NDTree,
}

impl PointCloudOracle {
    /// Wraps an archive. An empty archive takes `dim` as its dimension.
    pub fn new(dim: usize, archive: NDTree) -> Result<Self, OracleError> {
        match archive.dim() {
            Some(found) if found != dim => Err(OracleError::DimensionMismatch {
                expected: dim,
                found,
            }),
            _ => Ok(Self { dim, archive }),
        }
    }

    pub fn from_points<I>(dim: usize, points: I) -> Result<Self, OracleError>
    where
        I: IntoIterator<Item = Point>,
    {
        let archive = NDTree::from_points(NDTreeConfig::default(), points)?;
        Self::new(dim, archive)
    }

    /// Loads the line-per-point text form of an archive.
    pub fn load_text(dim: usize, path: impl AsRef<Path>) -> Result<Self, OracleError> {
        let archive = NDTree::load_text(NDTreeConfig::default(), path)?;
        Self::new(dim, archive)
    }

    pub fn archive(&self) -> &NDTree {
        &self.archive
    }

    /// Adds a point to the cloud.
    pub fn add_point(&mut self, p: Point) -> Result<bool, NDTreeError> {
        self.archive.insert(p)
    }
}

impl Oracle for PointCloudOracle {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn member(&mut self, point: &Point) -> Result<bool, OracleError> {
        self.check_point(point)?;
        if self.archive.is_empty() {
            return Ok(false);
        }
        Ok(self.archive.dominates(point)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud() -> PointCloudOracle {
        PointCloudOracle::from_points(
            2,
            vec![
                Point::from([0.2, 0.8]),
                Point::from([0.5, 0.5]),
                Point::from([0.8, 0.2]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_membership_is_dominance() {
        let mut oracle = cloud();
        assert!(oracle.member(&Point::from([0.5, 0.5])).unwrap());
        assert!(oracle.member(&Point::from([0.9, 0.3])).unwrap());
        assert!(!oracle.member(&Point::from([0.4, 0.4])).unwrap());
        assert!(!oracle.member(&Point::from([0.1, 1.0])).unwrap());
    }

    #[test]
    fn test_empty_cloud_rejects_everything() {
        let mut oracle =
            PointCloudOracle::new(3, NDTree::new(NDTreeConfig::default()).unwrap()).unwrap();
        assert!(!oracle.member(&Point::from([1.0, 1.0, 1.0])).unwrap());
    }

    #[test]
    fn test_dimension_checks() {
        let archive = cloud().archive().clone();
        assert!(PointCloudOracle::new(3, archive).is_err());
        assert!(cloud().member(&Point::from([1.0])).is_err());
    }

    #[test]
    fn test_add_point_grows_region() {
        let mut oracle = cloud();
        assert!(!oracle.member(&Point::from([0.1, 0.9])).unwrap());
        assert!(oracle.add_point(Point::from([0.1, 0.9])).unwrap());
        assert!(oracle.member(&Point::from([0.1, 0.9])).unwrap());
    }
}
