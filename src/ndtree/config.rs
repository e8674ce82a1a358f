//! Capacity parameters of the non-dominated archive.

use super::error::NDTreeError;

/// Node capacities of an [`NDTree`](super::NDTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NDTreeConfig {
    /// A leaf holding more points than this is split.
    pub max_points: usize,
    /// Number of children a split leaf is turned into.
    pub min_children: usize,
}

impl NDTreeConfig {
    pub const DEFAULT_MAX_POINTS: usize = 20;
    pub const DEFAULT_MIN_CHILDREN: usize = 2;

    pub fn new(max_points: usize, min_children: usize) -> Self {
        Self {
            max_points,
            min_children,
        }
    }

    pub fn validate(&self) -> Result<(), NDTreeError> {
        if self.min_children < 2 {
            return Err(NDTreeError::InvalidConfig(format!(
                "min_children must be at least 2, got {}",
                self.min_children
            )));
        }
        if self.max_points < self.min_children {
            return Err(NDTreeError::InvalidConfig(format!(
                "max_points ({}) must be at least min_children ({})",
                self.max_points, self.min_children
            )));
        }
        Ok(())
    }
}

impl Default for NDTreeConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_POINTS, Self::DEFAULT_MIN_CHILDREN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = NDTreeConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_points, 20);
        assert_eq!(cfg.min_children, 2);
    }

    #[test]
    fn rejects_single_child_split() {
        assert!(NDTreeConfig::new(4, 1).validate().is_err());
    }

    #[test]
    fn rejects_capacity_below_children() {
        assert!(NDTreeConfig::new(2, 3).validate().is_err());
        assert!(NDTreeConfig::new(2, 2).validate().is_ok());
    }
}
