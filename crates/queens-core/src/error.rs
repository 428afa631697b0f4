/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by the search engine and its data types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A column or row index fell outside the board
    OutOfRange {
        column: usize,
        row: usize,
        size: usize,
    },
    /// Board size or initial placement cannot be searched
    InvalidConfiguration(String),
    /// Placement text could not be parsed
    InvalidPlacement(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { column, row, size } => write!(
                f,
                "Square (column {}, row {}) is outside the {}x{} board",
                column, row, size, size
            ),
            Self::InvalidConfiguration(e) => write!(f, "Invalid configuration: {}", e),
            Self::InvalidPlacement(e) => write!(f, "Invalid placement: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_out_of_range() {
        let err = EngineError::OutOfRange {
            column: 2,
            row: 8,
            size: 8,
        };
        assert_eq!(
            err.to_string(),
            "Square (column 2, row 8) is outside the 8x8 board"
        );
    }

    #[test]
    fn test_display_configuration() {
        let err = EngineError::InvalidConfiguration("board size must be at least 2".into());
        assert!(err.to_string().starts_with("Invalid configuration:"));
    }
}
