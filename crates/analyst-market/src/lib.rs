//! Market data access for analyst-rs
//!
//! Provides the `MarketDataProvider` trait consumed by the report engine,
//! a Yahoo Finance backed implementation, and technical-indicator
//! computation (SMA, RSI, MACD) over historical closes.
//!
//! Provider failures are designed to be recoverable: the report layer
//! substitutes placeholders for missing sections instead of failing the run.

pub mod error;
pub mod indicators;
pub mod provider;
pub mod yahoo;

// Re-export main types
pub use error::{MarketError, Result};
pub use provider::{
    CompanyProfile, FinancialStatements, MarketDataProvider, PricePoint, TechnicalSnapshot,
    TrendSignals,
};
pub use yahoo::YahooMarketData;
