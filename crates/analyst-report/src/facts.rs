//! Market fact gathering
//!
//! Wraps each market-data operation as a [`TickerTool`] and collects their
//! outputs into a single JSON document before the pipeline runs. A failing
//! tool contributes the placeholder `"unknown"` instead of aborting.

use analyst_market::{MarketDataProvider, PricePoint};
use analyst_pipeline::{TickerTool, ToolError};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Placeholder substituted for any fact a tool could not supply
pub const UNKNOWN: &str = "unknown";

/// Company profile lookup
pub struct ProfileTool {
    provider: Arc<dyn MarketDataProvider>,
}

#[async_trait]
impl TickerTool for ProfileTool {
    fn name(&self) -> &str {
        "get_profile"
    }

    fn description(&self) -> &str {
        "Company name, exchange, sector and industry for a ticker"
    }

    async fn invoke(&self, ticker: &str) -> std::result::Result<Value, ToolError> {
        let profile = self
            .provider
            .get_profile(ticker)
            .await
            .map_err(|e| ToolError::new(self.name(), e.to_string()))?;
        serde_json::to_value(&profile).map_err(|e| ToolError::new(self.name(), e.to_string()))
    }
}

/// Price history summary over a configured range
pub struct HistoryTool {
    provider: Arc<dyn MarketDataProvider>,
    range: String,
}

#[async_trait]
impl TickerTool for HistoryTool {
    fn name(&self) -> &str {
        "get_history"
    }

    fn description(&self) -> &str {
        "Summary of historical price action over the trailing range"
    }

    async fn invoke(&self, ticker: &str) -> std::result::Result<Value, ToolError> {
        let history = self
            .provider
            .get_history(ticker, &self.range)
            .await
            .map_err(|e| ToolError::new(self.name(), e.to_string()))?;
        Ok(summarize_history(&history, &self.range))
    }
}

/// Headline financial statement figures
pub struct FinancialStatementsTool {
    provider: Arc<dyn MarketDataProvider>,
}

#[async_trait]
impl TickerTool for FinancialStatementsTool {
    fn name(&self) -> &str {
        "get_financial_statements"
    }

    fn description(&self) -> &str {
        "Headline revenue, income and balance-sheet figures"
    }

    async fn invoke(&self, ticker: &str) -> std::result::Result<Value, ToolError> {
        let statements = self
            .provider
            .get_financial_statements(ticker)
            .await
            .map_err(|e| ToolError::new(self.name(), e.to_string()))?;
        serde_json::to_value(&statements).map_err(|e| ToolError::new(self.name(), e.to_string()))
    }
}

/// Technical indicator snapshot
pub struct TechnicalIndicatorsTool {
    provider: Arc<dyn MarketDataProvider>,
}

#[async_trait]
impl TickerTool for TechnicalIndicatorsTool {
    fn name(&self) -> &str {
        "get_technical_indicators"
    }

    fn description(&self) -> &str {
        "Moving averages, RSI and MACD computed over the trailing year"
    }

    async fn invoke(&self, ticker: &str) -> std::result::Result<Value, ToolError> {
        let snapshot = self
            .provider
            .get_technical_indicators(ticker)
            .await
            .map_err(|e| ToolError::new(self.name(), e.to_string()))?;
        serde_json::to_value(&snapshot).map_err(|e| ToolError::new(self.name(), e.to_string()))
    }
}

/// Build the standard tool set over one market data provider
pub fn market_tools(
    provider: Arc<dyn MarketDataProvider>,
    range: &str,
) -> Vec<Arc<dyn TickerTool>> {
    vec![
        Arc::new(ProfileTool {
            provider: provider.clone(),
        }),
        Arc::new(HistoryTool {
            provider: provider.clone(),
            range: range.to_string(),
        }),
        Arc::new(FinancialStatementsTool {
            provider: provider.clone(),
        }),
        Arc::new(TechnicalIndicatorsTool { provider }),
    ]
}

/// Invoke every tool once and collect the results keyed by tool name
///
/// Tool failures are logged and replaced with [`UNKNOWN`]; missing data must
/// not stop a report.
pub async fn gather_facts(tools: &[Arc<dyn TickerTool>], ticker: &str) -> Value {
    let mut facts = serde_json::Map::new();
    for tool in tools {
        match tool.invoke(ticker).await {
            Ok(value) => {
                debug!(tool = tool.name(), "gathered fact");
                facts.insert(tool.name().to_string(), value);
            }
            Err(e) => {
                warn!(tool = tool.name(), error = %e, "fact unavailable");
                facts.insert(tool.name().to_string(), Value::String(UNKNOWN.to_string()));
            }
        }
    }
    Value::Object(facts)
}

fn summarize_history(history: &[PricePoint], range: &str) -> Value {
    if history.is_empty() {
        return Value::String(UNKNOWN.to_string());
    }

    let first = &history[0];
    let last = &history[history.len() - 1];
    let high = history.iter().map(|p| p.high).fold(f64::MIN, f64::max);
    let low = history.iter().map(|p| p.low).fold(f64::MAX, f64::min);
    let avg_volume = history.iter().map(|p| p.volume).sum::<u64>() / history.len() as u64;
    let change_pct = if first.close != 0.0 {
        (last.close - first.close) / first.close * 100.0
    } else {
        0.0
    };

    json!({
        "range": range,
        "bars": history.len(),
        "first_close": first.close,
        "last_close": last.close,
        "change_percent": change_pct,
        "period_high": high,
        "period_low": low,
        "average_volume": avg_volume,
    })
}
