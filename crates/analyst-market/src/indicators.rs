//! Technical indicator computation
//!
//! Pure functions over historical bars so the math is testable with
//! synthetic series. Indicators follow the usual parameterizations:
//! SMA 20/50/200, RSI-14 and MACD(12, 26, 9).

use crate::error::{MarketError, Result};
use crate::provider::{PricePoint, TechnicalSnapshot, TrendSignals};
use ta::Next;
use ta::indicators::{ExponentialMovingAverage, RelativeStrengthIndex, SimpleMovingAverage};

const RSI_PERIOD: usize = 14;
const RSI_OVERSOLD: f64 = 30.0;
const RSI_OVERBOUGHT: f64 = 70.0;

fn sma_last(closes: &[f64], period: usize) -> Result<Option<f64>> {
    if closes.len() < period {
        return Ok(None);
    }
    let mut sma =
        SimpleMovingAverage::new(period).map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut last = 0.0;
    for &close in closes {
        last = sma.next(close);
    }
    Ok(Some(last))
}

fn rsi_last(closes: &[f64]) -> Result<Option<f64>> {
    if closes.len() <= RSI_PERIOD {
        return Ok(None);
    }
    let mut rsi =
        RelativeStrengthIndex::new(RSI_PERIOD).map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut last = 0.0;
    for &close in closes {
        last = rsi.next(close);
    }
    Ok(Some(last))
}

fn macd_series(closes: &[f64]) -> Result<(f64, f64, f64)> {
    let mut ema12 =
        ExponentialMovingAverage::new(12).map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut ema26 =
        ExponentialMovingAverage::new(26).map_err(|e| MarketError::Indicator(e.to_string()))?;
    let mut signal =
        ExponentialMovingAverage::new(9).map_err(|e| MarketError::Indicator(e.to_string()))?;

    let mut macd = 0.0;
    let mut signal_line = 0.0;
    for &close in closes {
        macd = ema12.next(close) - ema26.next(close);
        signal_line = signal.next(macd);
    }
    Ok((macd, signal_line, macd - signal_line))
}

/// Compute the indicator snapshot for a series of historical bars
///
/// Indicators that need more bars than available come back as `None` rather
/// than an error; an empty series is an error.
pub fn compute_snapshot(history: &[PricePoint]) -> Result<TechnicalSnapshot> {
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
    let last_close = *closes
        .last()
        .ok_or_else(|| MarketError::Indicator("no bars to compute indicators from".to_string()))?;

    let sma20 = sma_last(&closes, 20)?;
    let sma50 = sma_last(&closes, 50)?;
    let sma200 = sma_last(&closes, 200)?;
    let rsi14 = rsi_last(&closes)?;
    let (macd, signal_line, macd_histogram) = macd_series(&closes)?;

    let trend = TrendSignals {
        price_above_sma20: sma20.is_some_and(|s| last_close > s),
        price_above_sma50: sma50.is_some_and(|s| last_close > s),
        price_above_sma200: sma200.is_some_and(|s| last_close > s),
        rsi_oversold: rsi14.is_some_and(|r| r < RSI_OVERSOLD),
        rsi_overbought: rsi14.is_some_and(|r| r > RSI_OVERBOUGHT),
        macd_above_signal: macd > signal_line,
    };

    Ok(TechnicalSnapshot {
        last_close,
        sma20,
        sma50,
        sma200,
        rsi14,
        macd,
        signal_line,
        macd_histogram,
        trend,
    })
}
