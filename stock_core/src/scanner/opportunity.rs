use tracing::{debug, trace};

use crate::common::stock_error::{check_period, StockError};
use crate::config::scan_config::{ScanConfig, WindowDivisor};
use crate::math::{boll::bollinger_bands_with, latest::latest_close, rsi::rsi};
use crate::table::price_table::PriceTable;

/// RSI strictly below this marks a symbol as oversold
pub const OVERSOLD_RSI: f64 = 30.0;

/// A symbol that passed the oversold screen
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    pub symbol: String,
    pub latest_close: f64,
    pub lower_band: f64,
    pub rsi: f64,
}

/// Scan every symbol in `table` for the oversold signal.
///
/// A symbol qualifies when its latest close is positive, below the lower
/// Bollinger Band and its RSI is below [`OVERSOLD_RSI`]. Symbols are
/// evaluated, and returned, in ascending lexicographic order. A latest
/// close of 0.0 means the symbol has no usable data, so non-positive prices
/// never qualify.
pub fn scan_opportunities(
    table: &PriceTable,
    bollinger_period: usize,
    rsi_period: usize,
) -> Result<Vec<Opportunity>, StockError> {
    scan_with_divisor(table, bollinger_period, rsi_period, WindowDivisor::NominalPeriod)
}

/// Scan using the periods and window divisor from `config`.
pub fn scan_with_config(
    table: &PriceTable,
    config: &ScanConfig,
) -> Result<Vec<Opportunity>, StockError> {
    scan_with_divisor(
        table,
        config.bollinger_bands_period,
        config.rsi_period,
        config.window_divisor,
    )
}

fn scan_with_divisor(
    table: &PriceTable,
    bollinger_period: usize,
    rsi_period: usize,
    divisor: WindowDivisor,
) -> Result<Vec<Opportunity>, StockError> {
    check_period(bollinger_period, "bollinger bands period")?;
    check_period(rsi_period, "rsi period")?;

    let mut opportunities = Vec::new();
    for symbol in table.symbols() {
        let close = latest_close(symbol, table);
        let bands = bollinger_bands_with(symbol, table, bollinger_period, divisor)?;
        let rsi = rsi(symbol, table, rsi_period)?;
        trace!(symbol, close, lower = bands.lower, rsi, "evaluated symbol");

        if close > 0.0 && close < bands.lower && rsi < OVERSOLD_RSI {
            opportunities.push(Opportunity {
                symbol: symbol.to_string(),
                latest_close: close,
                lower_band: bands.lower,
                rsi,
            });
        }
    }

    debug!(
        rows = table.len(),
        found = opportunities.len(),
        "oversold scan finished"
    );
    Ok(opportunities)
}
