use thiserror::Error;

use crate::geometry::GeometryError;

/// Errors raised while building, querying or loading an [`NDTree`](super::NDTree).
#[derive(Debug, Error)]
pub enum NDTreeError {
    #[error("Invalid NDTree configuration: {0}")]
    InvalidConfig(String),

    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: GeometryError,
    },

    #[error("Malformed NDTree snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Malformed NDTree file: {0}")]
    Format(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let e = NDTreeError::Parse {
            line: 3,
            source: GeometryError::EmptyPoint,
        };
        assert_eq!(
            e.to_string(),
            "Line 3: Points must have at least one coordinate"
        );
    }

    #[test]
    fn invalid_config_display() {
        let e = NDTreeError::InvalidConfig("min_children must be at least 2".to_string());
        assert!(e.to_string().starts_with("Invalid NDTree configuration"));
    }
}
