//! Errors returned when a cutting plan cannot be computed.

use std::fmt;

use thiserror::Error;

/// The input value that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    StockLength,
    /// Length of the demand entry at `index` (0-based).
    PieceLength { index: usize },
    /// Quantity of the demand entry at `index` (0-based).
    Quantity { index: usize },
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputField::StockLength => write!(f, "stock length"),
            InputField::PieceLength { index } => write!(f, "length of piece #{}", index + 1),
            InputField::Quantity { index } => write!(f, "quantity of piece #{}", index + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("invalid input: {field} must be positive, got {value}")]
    InvalidInput { field: InputField, value: i64 },

    #[error("piece of length {length} does not fit in stock length {stock_length}")]
    OversizedPiece { length: u64, stock_length: u64 },

    /// `pieces` bars of `stock_length` would not fit in a `u64` of mm.
    #[error("{pieces} pieces on stock length {stock_length} exceed the plan size limit")]
    TooManyPieces { pieces: u128, stock_length: u64 },

    #[error("a single bar would be cut into more than {limit} pieces")]
    PatternTooLong { limit: u64 },
}

impl PlanError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PlanError::InvalidInput { .. })
    }

    pub fn is_oversized(&self) -> bool {
        matches!(self, PlanError::OversizedPiece { .. })
    }

    /// True for inputs that are valid but too big to plan.
    pub fn is_too_large(&self) -> bool {
        matches!(
            self,
            PlanError::TooManyPieces { .. } | PlanError::PatternTooLong { .. }
        )
    }
}

/// Errors reading the server configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value '{value}': expected a number between 0 and 65535")]
    InvalidPort { value: String },
}

pub type Result<T> = std::result::Result<T, PlanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = PlanError::InvalidInput {
            field: InputField::Quantity { index: 2 },
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid input: quantity of piece #3 must be positive, got 0"
        );

        let err = PlanError::OversizedPiece {
            length: 5000,
            stock_length: 3000,
        };
        assert_eq!(
            err.to_string(),
            "piece of length 5000 does not fit in stock length 3000"
        );
        assert!(err.is_oversized());
        assert!(!err.is_invalid_input());

        let err = PlanError::PatternTooLong { limit: 100_000 };
        assert_eq!(
            err.to_string(),
            "a single bar would be cut into more than 100000 pieces"
        );
        assert!(err.is_too_large());
    }
}
