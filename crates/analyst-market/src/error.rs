//! Error types for market data operations

use thiserror::Error;

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Market data specific errors
///
/// These are per-field failures from the report's point of view: callers
/// substitute a placeholder for the affected section rather than aborting
/// the whole report.
#[derive(Debug, Error)]
pub enum MarketError {
    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    Yahoo(String),

    /// Data not available for the requested symbol
    #[error("data not available for {symbol}: {reason}")]
    Unavailable { symbol: String, reason: String },

    /// The backend does not support this operation
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Technical indicator calculation error
    #[error("indicator error: {0}")]
    Indicator(String),

    /// Invalid history range string
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::Unavailable {
            symbol: "AAPL".to_string(),
            reason: "no data found".to_string(),
        };
        assert_eq!(err.to_string(), "data not available for AAPL: no data found");
    }
}
