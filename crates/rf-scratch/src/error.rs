//! Error types for the scratch engine

use thiserror::Error;

/// Scratch engine error type
#[derive(Error, Debug)]
pub enum ScratchError {
    #[error("Missing win combination: {0}")]
    MissingCombination(String),

    #[error("Covered area of '{combination}' is outside the grid at {row}:{column}")]
    OutOfBounds {
        combination: String,
        row: usize,
        column: usize,
    },

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Empty distribution: {0}")]
    EmptyDistribution(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid bet amount: {0}")]
    InvalidBet(f64),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ScratchError {
    /// True for defects in the loaded configuration (as opposed to I/O,
    /// caller input or generation failures)
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScratchError::MissingCombination(_)
                | ScratchError::OutOfBounds { .. }
                | ScratchError::InvalidCoordinate(_)
                | ScratchError::EmptyDistribution(_)
                | ScratchError::UnknownSymbol(_)
                | ScratchError::InvalidConfig(_)
        )
    }
}

/// Result type alias
pub type ScratchResult<T> = Result<T, ScratchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(ScratchError::MissingCombination("x".into()).is_configuration());
        assert!(
            ScratchError::OutOfBounds {
                combination: "x".into(),
                row: 3,
                column: 0
            }
            .is_configuration()
        );
        assert!(!ScratchError::Generation("x".into()).is_configuration());
        assert!(!ScratchError::InvalidBet(0.0).is_configuration());
    }

    #[test]
    fn test_out_of_bounds_message() {
        let err = ScratchError::OutOfBounds {
            combination: "same_symbols_vertically".into(),
            row: 3,
            column: 1,
        };
        assert_eq!(
            err.to_string(),
            "Covered area of 'same_symbols_vertically' is outside the grid at 3:1"
        );
    }
}
