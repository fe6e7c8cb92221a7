//! Report engine
//!
//! Owns the selected pipeline variant, the chat provider and the market data
//! backend for the lifetime of one engine. `generate` is the single entry
//! point: ticker in, markdown report out.

use crate::agents::{report_writer, stock_analyst};
use crate::config::ReportConfig;
use crate::error::Result;
use crate::facts::{gather_facts, market_tools};
use crate::tasks::{analysis_task, report_task};
use crate::variant::{Capabilities, PipelineVariant, select_variant};
use analyst_llm::{ChatProvider, ChatRequest, DeepSeekClient, DeepSeekConfig, Message};
use analyst_market::{MarketDataProvider, YahooMarketData};
use analyst_pipeline::{Pipeline, PipelineConfig};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Generates investment reports for ticker symbols
pub struct ReportEngine {
    variant: PipelineVariant,
    provider: Arc<dyn ChatProvider>,
    market: Arc<dyn MarketDataProvider>,
    config: ReportConfig,
}

impl std::fmt::Debug for ReportEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportEngine")
            .field("variant", &self.variant)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReportEngine {
    /// Build an engine from configuration, selecting the variant once
    ///
    /// Variant selection runs before any client is constructed, so a missing
    /// credential fails here and nothing network-facing is ever created.
    pub fn new(config: ReportConfig) -> Result<Self> {
        let caps = Capabilities::detect(!config.api_key.trim().is_empty());
        Self::with_capabilities(config, caps)
    }

    /// Build an engine for an explicit capability snapshot
    pub fn with_capabilities(config: ReportConfig, caps: Capabilities) -> Result<Self> {
        let variant = select_variant(&caps)?;
        info!(%variant, "pipeline variant selected");

        let llm_config = DeepSeekConfig::new(&config.api_key)
            .with_api_base(&config.api_base)
            .with_timeout(config.timeout_secs);
        let provider: Arc<dyn ChatProvider> = Arc::new(DeepSeekClient::with_config(llm_config)?);

        Ok(Self {
            variant,
            provider,
            market: Arc::new(YahooMarketData::new()),
            config,
        })
    }

    /// Build an engine from pre-constructed parts
    pub fn with_parts(
        variant: PipelineVariant,
        provider: Arc<dyn ChatProvider>,
        market: Arc<dyn MarketDataProvider>,
        config: ReportConfig,
    ) -> Self {
        Self {
            variant,
            provider,
            market,
            config,
        }
    }

    /// The variant this engine runs
    pub fn variant(&self) -> PipelineVariant {
        self.variant
    }

    /// Generate a markdown report for a ticker symbol
    #[instrument(skip(self), fields(variant = %self.variant))]
    pub async fn generate(&self, ticker: &str) -> Result<String> {
        let ticker = ticker.trim().to_uppercase();
        info!(%ticker, "generating report");

        match self.variant {
            PipelineVariant::Full => self.generate_full(&ticker).await,
            PipelineVariant::Simplified => self.generate_simplified(&ticker).await,
            PipelineVariant::Static => Ok(demo_report(&ticker)),
        }
    }

    /// Full variant: gather facts, then run the two-stage agent pipeline
    async fn generate_full(&self, ticker: &str) -> Result<String> {
        let tools = market_tools(self.market.clone(), &self.config.history_range);
        let facts = gather_facts(&tools, ticker).await;

        let agents = vec![stock_analyst(tools), report_writer()];
        let tasks = vec![analysis_task(ticker, &facts), report_task(ticker)];

        let pipeline = Pipeline::with_config(
            self.provider.clone(),
            PipelineConfig {
                model: self.config.model.clone(),
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
            },
        );
        let report = pipeline.run(&agents, &tasks).await?;
        Ok(report)
    }

    /// Simplified variant: one direct chat call over the gathered facts
    async fn generate_simplified(&self, ticker: &str) -> Result<String> {
        warn!("orchestration unavailable, running simplified analysis");

        let tools = market_tools(self.market.clone(), &self.config.history_range);
        let facts = gather_facts(&tools, ticker).await;
        let facts_json = serde_json::to_string_pretty(&facts).unwrap_or_else(|_| "{}".to_string());

        let request = ChatRequest::builder(&self.config.model)
            .add_message(Message::system(
                "You are an experienced stock analyst. Write a concise \
                 markdown investment report from the data provided.",
            ))
            .add_message(Message::user(format!(
                "Write an investment report on {ticker} based on this market \
                 data. Note explicitly where data reads \"unknown\".\n\n{facts_json}"
            )))
            .temperature(self.config.temperature)
            .max_tokens(self.config.max_tokens)
            .build();

        let completion = self.provider.complete(request).await?;
        Ok(completion.content)
    }
}

/// Canned report used when no analysis path is available
///
/// Clearly labeled as a demo so it cannot be mistaken for real analysis.
fn demo_report(ticker: &str) -> String {
    format!(
        "# {ticker} Investment Report (demo)\n\
         \n\
         ## Notice\n\
         \n\
         This is a static demonstration report. No live market data or \
         analysis was used to produce it.\n\
         \n\
         ## Executive Summary\n\
         \n\
         {ticker} is a publicly traded company. A full analysis requires a \
         working analysis pipeline; run this tool with the complete setup to \
         generate a real report.\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use analyst_llm::{Completion, LlmError};
    use analyst_market::{
        CompanyProfile, FinancialStatements, MarketError, PricePoint, TechnicalSnapshot,
        TrendSignals,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;

    struct ScriptedProvider {
        script: Mutex<Vec<std::result::Result<String, (u16, String)>>>,
        requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedProvider {
        fn new(script: Vec<std::result::Result<String, (u16, String)>>) -> Self {
            Self {
                script: Mutex::new(script),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }

        fn request(&self, idx: usize) -> ChatRequest {
            self.requests.lock().unwrap()[idx].clone()
        }
    }

    #[async_trait]
    impl ChatProvider for ScriptedProvider {
        async fn complete(&self, request: ChatRequest) -> analyst_llm::Result<Completion> {
            self.requests.lock().unwrap().push(request);
            let mut script = self.script.lock().unwrap();
            assert!(!script.is_empty(), "provider called more times than scripted");
            match script.remove(0) {
                Ok(content) => Ok(Completion {
                    content,
                    usage: None,
                }),
                Err((status, body)) => Err(LlmError::Upstream { status, body }),
            }
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    struct StubMarket;

    #[async_trait]
    impl MarketDataProvider for StubMarket {
        async fn get_profile(&self, ticker: &str) -> analyst_market::Result<CompanyProfile> {
            Ok(CompanyProfile {
                symbol: ticker.to_string(),
                name: Some("Stub Corp".to_string()),
                exchange: Some("NMS".to_string()),
                sector: None,
                industry: None,
                market_cap: None,
                currency: None,
            })
        }

        async fn get_history(
            &self,
            _ticker: &str,
            _range: &str,
        ) -> analyst_market::Result<Vec<PricePoint>> {
            Ok(vec![PricePoint {
                timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
                open: 100.0,
                high: 102.0,
                low: 99.0,
                close: 101.0,
                volume: 1_000,
                adjclose: 101.0,
            }])
        }

        async fn get_financial_statements(
            &self,
            _ticker: &str,
        ) -> analyst_market::Result<FinancialStatements> {
            Err(MarketError::Unsupported("not available".to_string()))
        }

        async fn get_technical_indicators(
            &self,
            _ticker: &str,
        ) -> analyst_market::Result<TechnicalSnapshot> {
            Ok(TechnicalSnapshot {
                last_close: 101.0,
                sma20: None,
                sma50: None,
                sma200: None,
                rsi14: None,
                macd: 0.0,
                signal_line: 0.0,
                macd_histogram: 0.0,
                trend: TrendSignals::default(),
            })
        }
    }

    fn engine_with(
        variant: PipelineVariant,
        provider: Arc<ScriptedProvider>,
    ) -> ReportEngine {
        ReportEngine::with_parts(
            variant,
            provider,
            Arc::new(StubMarket),
            ReportConfig::new("test-key"),
        )
    }

    #[tokio::test]
    async fn test_full_run_threads_analysis_into_report() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("FACT_A".to_string()),
            Ok("REPORT_B".to_string()),
        ]));
        let engine = engine_with(PipelineVariant::Full, provider.clone());

        let report = engine.generate("aapl").await.unwrap();
        assert_eq!(report, "REPORT_B");
        assert_eq!(provider.calls(), 2);

        // Task one saw the gathered market facts, uppercased ticker included
        let first = provider.request(0);
        assert!(first.messages[1].content.contains("Analyze the stock AAPL"));
        assert!(first.messages[1].content.contains("Stub Corp"));
        assert!(first.messages[1].content.contains("unknown"));

        // Task two saw task one's result verbatim
        let second = provider.request(1);
        assert!(second.messages[1].content.contains("FACT_A"));
    }

    #[tokio::test]
    async fn test_full_run_uses_configured_sampling() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            Ok("a".to_string()),
            Ok("b".to_string()),
        ]));
        let engine = engine_with(PipelineVariant::Full, provider.clone());
        engine.generate("AAPL").await.unwrap();

        let request = provider.request(0);
        assert_eq!(request.model, "deepseek-reasoner");
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(request.max_tokens, 4000);
    }

    #[tokio::test]
    async fn test_simplified_makes_one_call() {
        let provider = Arc::new(ScriptedProvider::new(vec![Ok("simple report".to_string())]));
        let engine = engine_with(PipelineVariant::Simplified, provider.clone());

        let report = engine.generate("MSFT").await.unwrap();
        assert_eq!(report, "simple report");
        assert_eq!(provider.calls(), 1);
        assert!(provider.request(0).messages[1].content.contains("MSFT"));
    }

    #[tokio::test]
    async fn test_static_makes_no_calls() {
        let provider = Arc::new(ScriptedProvider::new(vec![]));
        let engine = engine_with(PipelineVariant::Static, provider.clone());

        let report = engine.generate("TSLA").await.unwrap();
        assert!(report.contains("# TSLA Investment Report (demo)"));
        assert!(report.contains("static demonstration report"));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_pipeline_failure_propagates_without_retry() {
        let provider = Arc::new(ScriptedProvider::new(vec![Err((
            429,
            "rate limited".to_string(),
        ))]));
        let engine = engine_with(PipelineVariant::Full, provider.clone());

        let err = engine.generate("AAPL").await.unwrap_err();
        assert!(matches!(err, ReportError::Pipeline(_)));
        assert_eq!(provider.calls(), 1);
    }

    #[test]
    fn test_missing_credential_blocks_engine_construction() {
        let err = ReportEngine::new(ReportConfig::new("")).unwrap_err();
        assert!(matches!(err, ReportError::CredentialMissing));
    }

    #[test]
    fn test_engine_reports_selected_variant() {
        let engine = ReportEngine::new(ReportConfig::new("sk-test")).unwrap();
        assert_eq!(engine.variant(), PipelineVariant::Full);
    }
}
