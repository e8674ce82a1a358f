use thiserror::Error;

use crate::ndtree::NDTreeError;

/// Errors raised while evaluating an oracle.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Oracle expects {expected}-dimensional points, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Oracle evaluation failed: {0}")]
    Evaluation(String),

    #[error("Point-cloud oracle failed: {0}")]
    Archive(#[from] NDTreeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_display() {
        let e = OracleError::DimensionMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(e.to_string(), "Oracle expects 2-dimensional points, got 1");
    }

    #[test]
    fn evaluation_display() {
        let e = OracleError::Evaluation("process exited".to_string());
        assert_eq!(e.to_string(), "Oracle evaluation failed: process exited");
    }
}
