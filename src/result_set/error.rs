use thiserror::Error;

/// Errors raised while persisting or restoring a [`ResultSet`](super::ResultSet).
#[derive(Debug, Error)]
pub enum ResultSetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("Malformed result file: {0}")]
    Format(#[from] serde_json::Error),

    #[error("Rectangle of dimension {found} in a {expected}-dimensional result")]
    DimensionMismatch { expected: usize, found: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_display() {
        let e = ResultSetError::DimensionMismatch {
            expected: 2,
            found: 3,
        };
        assert_eq!(
            e.to_string(),
            "Rectangle of dimension 3 in a 2-dimensional result"
        );
    }
}
