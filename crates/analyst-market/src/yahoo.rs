//! Yahoo Finance backed market data provider

use crate::error::{MarketError, Result};
use crate::indicators::compute_snapshot;
use crate::provider::{
    CompanyProfile, FinancialStatements, MarketDataProvider, PricePoint, TechnicalSnapshot,
};
use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Market data provider backed by the Yahoo Finance quote API
#[derive(Debug, Default)]
pub struct YahooMarketData {}

impl YahooMarketData {
    /// Create a new provider
    pub fn new() -> Self {
        Self {}
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| MarketError::Yahoo(e.to_string()))
    }

    fn range_bounds(range: &str) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        let end = Utc::now();
        let start = match range {
            "1d" => end - chrono::Duration::days(1),
            "5d" => end - chrono::Duration::days(5),
            "1mo" => end - chrono::Duration::days(30),
            "3mo" => end - chrono::Duration::days(90),
            "6mo" => end - chrono::Duration::days(180),
            "1y" => end - chrono::Duration::days(365),
            "2y" => end - chrono::Duration::days(730),
            "5y" => end - chrono::Duration::days(1825),
            "10y" => end - chrono::Duration::days(3650),
            "ytd" => {
                let year = end.year();
                chrono::NaiveDate::from_ymd_opt(year, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|d| d.and_utc())
                    .ok_or_else(|| MarketError::InvalidRange("ytd".to_string()))?
            }
            "max" => end - chrono::Duration::days(36500), // ~100 years
            other => return Err(MarketError::InvalidRange(other.to_string())),
        };
        Ok((start, end))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    /// Get company metadata via symbol search
    ///
    /// The quote API only exposes name and exchange; the remaining fields
    /// stay `None` and render as "unknown" downstream.
    async fn get_profile(&self, ticker: &str) -> Result<CompanyProfile> {
        let provider = Self::connector()?;

        let search = provider
            .search_ticker(ticker)
            .await
            .map_err(|e| MarketError::Yahoo(e.to_string()))?;

        let hit = search
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(ticker))
            .or_else(|| search.quotes.first())
            .ok_or_else(|| MarketError::Unavailable {
                symbol: ticker.to_string(),
                reason: "symbol not found".to_string(),
            })?;

        debug!(symbol = %hit.symbol, "resolved ticker");

        Ok(CompanyProfile {
            symbol: hit.symbol.clone(),
            name: Some(hit.long_name.clone()).filter(|n| !n.is_empty()),
            exchange: Some(hit.exchange.clone()).filter(|e| !e.is_empty()),
            sector: None,
            industry: None,
            market_cap: None,
            currency: None,
        })
    }

    async fn get_history(&self, ticker: &str, range: &str) -> Result<Vec<PricePoint>> {
        let provider = Self::connector()?;
        let (start, end) = Self::range_bounds(range)?;

        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::Yahoo(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::Yahoo(format!("invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(ticker, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::Yahoo(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::Yahoo(e.to_string()))?;

        if quotes.is_empty() {
            return Err(MarketError::Unavailable {
                symbol: ticker.to_string(),
                reason: "no historical data".to_string(),
            });
        }

        Ok(quotes
            .iter()
            .map(|q| PricePoint {
                timestamp: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                volume: q.volume,
                adjclose: q.adjclose,
            })
            .collect())
    }

    /// The Yahoo quote API does not expose financial statements
    ///
    /// Callers recover by rendering the section as "unknown".
    async fn get_financial_statements(&self, ticker: &str) -> Result<FinancialStatements> {
        let _ = ticker;
        Err(MarketError::Unsupported(
            "financial statements are not available from the Yahoo quote API".to_string(),
        ))
    }

    async fn get_technical_indicators(&self, ticker: &str) -> Result<TechnicalSnapshot> {
        let history = self.get_history(ticker, "1y").await?;
        compute_snapshot(&history)
    }
}
