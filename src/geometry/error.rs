use thiserror::Error;

/// Errors raised by point and rectangle operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Points must have at least one coordinate")]
    EmptyPoint,

    #[error("Invalid point literal '{0}'")]
    InvalidPoint(String),

    #[error("Rectangles {left} and {right} are not concatenable")]
    NotConcatenable { left: String, right: String },
}
