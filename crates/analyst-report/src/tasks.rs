//! Task definitions for the two-stage report pipeline

use analyst_pipeline::TaskSpec;
use serde_json::Value;

/// First stage: analyze the gathered market facts
///
/// The facts are embedded in the task description as pretty-printed JSON so
/// the model sees real figures instead of having to guess.
pub fn analysis_task(ticker: &str, facts: &Value) -> TaskSpec {
    let facts_json = serde_json::to_string_pretty(facts).unwrap_or_else(|_| "{}".to_string());
    let description = format!(
        "Analyze the stock {ticker} using the market data below.\n\
         \n\
         Cover each of the following:\n\
         1. Company overview: what the company does, sector and exchange.\n\
         2. Recent price action: trend over the past year, notable highs and lows.\n\
         3. Technical picture: moving averages, RSI and MACD signals.\n\
         4. Financial health: revenue, profitability and balance sheet, where available.\n\
         5. Key risks visible in the data.\n\
         \n\
         Where a field reads \"unknown\", say so plainly rather than guessing.\n\
         \n\
         Market data:\n{facts_json}"
    );

    TaskSpec::new(description, 0)
        .expected_output("A structured analysis covering overview, price action, technicals, financials and risks")
}

/// Second stage: write the final markdown report from the analysis
pub fn report_task(ticker: &str) -> TaskSpec {
    let description = format!(
        "Write an investment report on {ticker} for a general audience.\n\
         \n\
         The report must be valid markdown with these sections:\n\
         # {ticker} Investment Report\n\
         ## Executive Summary\n\
         ## Company Overview\n\
         ## Price and Technical Analysis\n\
         ## Financial Health\n\
         ## Risks\n\
         ## Conclusion\n\
         \n\
         Base every statement on the analysis you were given. Keep the tone \
         factual and note explicitly where data was unavailable."
    );

    TaskSpec::new(description, 1)
        .expected_output("A complete markdown investment report")
        .upstream(vec![0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_task_embeds_facts() {
        let facts = json!({ "profile": { "symbol": "AAPL" } });
        let task = analysis_task("AAPL", &facts);
        assert_eq!(task.agent, 0);
        assert!(task.upstream.is_empty());
        assert!(task.description.contains("\"symbol\": \"AAPL\""));
        assert!(task.description.contains("Analyze the stock AAPL"));
    }

    #[test]
    fn test_report_task_chains_off_analysis() {
        let task = report_task("MSFT");
        assert_eq!(task.agent, 1);
        assert_eq!(task.upstream, vec![0]);
        assert!(task.description.contains("# MSFT Investment Report"));
        assert!(task.description.contains("## Executive Summary"));
    }
}
