use thiserror::Error;

use crate::oracle::OracleError;
use crate::result_set::ResultSetError;

/// Errors that abort a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(String),

    #[error("Search space has dimension {space} but the oracle expects {oracle}")]
    DimensionMismatch { space: usize, oracle: usize },

    #[error("Oracle call failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("Could not start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Could not write checkpoint: {0}")]
    Checkpoint(#[from] ResultSetError),
}
