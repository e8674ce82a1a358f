//! Configuration of the boundary search.

#[cfg(feature = "serde")]
use std::path::PathBuf;

use super::error::SearchError;

/// How much cross-rectangle propagation a search step performs.
///
/// All three levels yield a sound, complete border; higher levels
/// classify more volume per oracle call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptLevel {
    /// Level 0: only the popped box is refined.
    None,
    /// Level 1: border boxes lying wholly below the new lower cut (or wholly
    /// above the upper cut) move to `ylow` (or `yup`).
    Dominance,
    /// Level 2: border boxes overlapping the extended cut boxes are clipped;
    /// the covered part is classified and the rest returns to the border.
    #[default]
    Clip,
}

impl TryFrom<u8> for OptLevel {
    type Error = SearchError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::None),
            1 => Ok(Self::Dominance),
            2 => Ok(Self::Clip),
            other => Err(SearchError::InvalidConfig(format!(
                "optimization level must be 0, 1 or 2, got {other}"
            ))),
        }
    }
}

impl From<OptLevel> for u8 {
    fn from(level: OptLevel) -> u8 {
        match level {
            OptLevel::None => 0,
            OptLevel::Dominance => 1,
            OptLevel::Clip => 2,
        }
    }
}

/// Parameters of a boundary search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Per-axis precision of each binary search along a diagonal.
    pub epsilon: f64,
    /// The search stops once the unclassified volume drops below this.
    pub delta: f64,
    /// Maximum number of boxes refined before giving up.
    pub max_step: u64,
    pub opt_level: OptLevel,
    /// Refine a batch of boxes per round on a worker pool.
    pub parallel: bool,
    /// Worker count for parallel searches; `None` uses every available CPU.
    pub workers: Option<usize>,
    /// When set, a snapshot of the result is written here after every step.
    #[cfg(feature = "serde")]
    pub checkpoint_dir: Option<PathBuf>,
}

impl SearchConfig {
    pub const DEFAULT_EPSILON: f64 = 1e-5;
    pub const DEFAULT_DELTA: f64 = 1e-5;
    pub const DEFAULT_MAX_STEP: u64 = 10_000;

    /// Config with the given tolerances and the defaults for everything else.
    pub fn new(epsilon: f64, delta: f64) -> Self {
        Self {
            epsilon,
            delta,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(SearchError::InvalidConfig(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        if !(self.delta >= 0.0) {
            return Err(SearchError::InvalidConfig(format!(
                "delta must be non-negative, got {}",
                self.delta
            )));
        }
        if self.workers == Some(0) {
            return Err(SearchError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            delta: Self::DEFAULT_DELTA,
            max_step: Self::DEFAULT_MAX_STEP,
            opt_level: OptLevel::default(),
            parallel: false,
            workers: None,
            #[cfg(feature = "serde")]
            checkpoint_dir: None,
        }
    }
}
