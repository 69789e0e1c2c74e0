use crate::common::{
    stock_error::{check_period, StockError},
    utils::mean_over,
};
use crate::config::scan_config::WindowDivisor;
use crate::series::extractor::closes;
use crate::table::price_table::PriceTable;

/// Average close of `symbol` over the trailing `period` rows.
///
/// Returns 0.0 when the symbol has no parseable closes. Uses
/// [`WindowDivisor::NominalPeriod`]: a history shorter than `period` is
/// still divided by `period`.
pub fn average_price(symbol: &str, table: &PriceTable, period: usize) -> Result<f64, StockError> {
    average_price_with(symbol, table, period, WindowDivisor::NominalPeriod)
}

pub fn average_price_with(
    symbol: &str,
    table: &PriceTable,
    period: usize,
    divisor: WindowDivisor,
) -> Result<f64, StockError> {
    check_period(period, "average price period")?;
    let prices = closes(table, symbol);
    Ok(window_mean(&prices, period, divisor))
}

/// Last `period` elements of `prices`, or all of them when shorter.
pub(crate) fn trailing(prices: &[f64], period: usize) -> &[f64] {
    &prices[prices.len().saturating_sub(period)..]
}

pub(crate) fn window_mean(prices: &[f64], period: usize, divisor: WindowDivisor) -> f64 {
    let window = trailing(prices, period);
    mean_over(window, divisor.divisor(period, window.len()))
}
