//! Market data provider trait and data types

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company metadata for a ticker
///
/// Fields the backend cannot supply are `None` and render as "unknown"
/// downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub market_cap: Option<f64>,
    pub currency: Option<String>,
}

/// One bar of historical price data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

/// Headline figures from the latest financial statements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialStatements {
    pub total_revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub operating_cash_flow: Option<f64>,
    pub total_assets: Option<f64>,
    pub total_liabilities: Option<f64>,
    pub total_equity: Option<f64>,
}

/// Derived technical indicators over the trailing history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub last_close: f64,
    pub sma20: Option<f64>,
    pub sma50: Option<f64>,
    pub sma200: Option<f64>,
    pub rsi14: Option<f64>,
    pub macd: f64,
    pub signal_line: f64,
    pub macd_histogram: f64,
    pub trend: TrendSignals,
}

/// Simple boolean trend signals derived from the snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendSignals {
    pub price_above_sma20: bool,
    pub price_above_sma50: bool,
    pub price_above_sma200: bool,
    pub rsi_oversold: bool,
    pub rsi_overbought: bool,
    pub macd_above_signal: bool,
}

/// Trait for market data backends
///
/// Each operation returns structured data or an error; callers treat errors
/// as missing sections, never as fatal.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch company metadata
    async fn get_profile(&self, ticker: &str) -> Result<CompanyProfile>;

    /// Fetch historical prices for a range such as "1mo", "6mo", "1y"
    async fn get_history(&self, ticker: &str, range: &str) -> Result<Vec<PricePoint>>;

    /// Fetch headline financial-statement figures
    async fn get_financial_statements(&self, ticker: &str) -> Result<FinancialStatements>;

    /// Compute technical indicators over the trailing year
    async fn get_technical_indicators(&self, ticker: &str) -> Result<TechnicalSnapshot>;
}
