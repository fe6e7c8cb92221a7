//! Agent roster for the report pipeline

use analyst_pipeline::{AgentSpec, TickerTool};
use std::sync::Arc;

/// Agent that analyzes market data for a ticker
pub fn stock_analyst(tools: Vec<Arc<dyn TickerTool>>) -> AgentSpec {
    AgentSpec::new(
        "Stock Analyst",
        "Analyze the company's fundamentals, recent price action and \
         technical indicators to form a clear view of its current position",
        "A seasoned equity analyst with decades of experience reading \
         financial statements and price charts. Methodical and skeptical, \
         never stating a conclusion the data does not support.",
    )
    .with_tools(tools)
}

/// Agent that turns the analysis into a readable report
pub fn report_writer() -> AgentSpec {
    AgentSpec::new(
        "Report Writer",
        "Turn the analyst's findings into a well-structured investment \
         report that a non-specialist can follow",
        "A financial journalist known for distilling dense analysis into \
         clear prose. Organizes every report with the same section \
         structure and never invents figures.",
    )
}
