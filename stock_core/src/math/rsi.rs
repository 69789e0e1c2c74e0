use crate::common::stock_error::{check_period, StockError};
use crate::series::extractor::chronological_closes;
use crate::table::price_table::PriceTable;

/// Streaming RSI with Wilder's smoothing.
///
/// The first `period` price changes seed the average gain and loss with a
/// simple mean; every later change updates them as
/// `avg = (avg * (period - 1) + change) / period`.
#[derive(Debug, Clone)]
pub struct WilderRsi {
    period: usize,
    last_price: Option<f64>,
    changes: usize,
    avg_gain: f64,
    avg_loss: f64,
}

impl WilderRsi {
    pub fn new(period: usize) -> Result<Self, StockError> {
        check_period(period, "rsi period")?;
        Ok(Self {
            period,
            last_price: None,
            changes: 0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        })
    }

    /// Feed the next close; returns the RSI once `period` changes are seen.
    pub fn add(&mut self, price: f64) -> Option<f64> {
        let last_price = self.last_price.replace(price)?;
        let change = price - last_price;
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };

        let n = self.period as f64;
        self.changes += 1;
        if self.changes <= self.period {
            // seed: running sum, divided once the window is full
            self.avg_gain += gain;
            self.avg_loss += loss;
            if self.changes == self.period {
                self.avg_gain /= n;
                self.avg_loss /= n;
            }
        } else {
            self.avg_gain = (self.avg_gain * (n - 1.0) + gain) / n;
            self.avg_loss = (self.avg_loss * (n - 1.0) + loss) / n;
        }

        self.value()
    }

    pub fn value(&self) -> Option<f64> {
        if self.changes < self.period {
            return None;
        }
        Some(rsi_from_averages(self.avg_gain, self.avg_loss))
    }
}

/// RSI from smoothed averages. No losses gives 100 when there were gains
/// and 0 for a flat series.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain > 0.0 { 100.0 } else { 0.0 };
    }
    let rs = avg_gain / avg_loss;
    (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
}

/// RSI of `symbol` over its chronologically ordered closes.
///
/// Returns 0.0 when fewer than `period + 1` closes exist.
pub fn rsi(symbol: &str, table: &PriceTable, period: usize) -> Result<f64, StockError> {
    let mut model = WilderRsi::new(period)?;
    let prices = chronological_closes(table, symbol);
    if prices.len() <= period {
        return Ok(0.0);
    }

    let mut last = None;
    for price in prices {
        last = model.add(price).or(last);
    }
    Ok(last.unwrap_or(0.0))
}
