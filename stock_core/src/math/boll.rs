use crate::common::stock_error::{check_period, StockError};
use crate::config::scan_config::WindowDivisor;
use crate::math::average::{trailing, window_mean};
use crate::series::extractor::closes;
use crate::table::price_table::PriceTable;

/// Band half-width in standard deviations
pub const BAND_K: f64 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BollingerBands {
    pub average: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
}

#[derive(Debug, Clone)]
pub struct BollModel {
    period: usize,
    k: f64,
    divisor: WindowDivisor,
}

impl BollModel {
    pub fn new(period: usize, divisor: WindowDivisor) -> Result<Self, StockError> {
        check_period(period, "bollinger bands period")?;
        Ok(Self {
            period,
            k: BAND_K,
            divisor,
        })
    }

    /// Bands over the trailing window of `prices`; all zeros when empty.
    pub fn calc(&self, prices: &[f64]) -> BollingerBands {
        if prices.is_empty() {
            return BollingerBands::default();
        }

        let window = trailing(prices, self.period);
        let n = self.divisor.divisor(self.period, window.len()) as f64;
        let average = window_mean(prices, self.period, self.divisor);

        // population variance
        let variance = window.iter().map(|&x| (x - average).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let band_width = self.k * std_dev;

        BollingerBands {
            average,
            std_dev,
            upper: average + band_width,
            lower: average - band_width,
        }
    }
}

pub fn bollinger_bands(
    symbol: &str,
    table: &PriceTable,
    period: usize,
) -> Result<BollingerBands, StockError> {
    bollinger_bands_with(symbol, table, period, WindowDivisor::NominalPeriod)
}

pub fn bollinger_bands_with(
    symbol: &str,
    table: &PriceTable,
    period: usize,
    divisor: WindowDivisor,
) -> Result<BollingerBands, StockError> {
    let model = BollModel::new(period, divisor)?;
    Ok(model.calc(&closes(table, symbol)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::stock_error::ErrCode;
    use crate::common::utils::approx_eq;
    use crate::table::price_table::PriceRecord;

    const AAPL: [f64; 20] = [
        150.0, 152.0, 153.0, 151.0, 155.0, 154.0, 156.0, 157.0, 158.0, 159.0, 160.0, 161.0,
        162.0, 163.0, 164.0, 165.0, 166.0, 167.0, 168.0, 169.0,
    ];

    fn table() -> PriceTable {
        AAPL.iter().map(|c| PriceRecord::new("AAPL", c)).collect()
    }

    #[test]
    fn test_bollinger_bands() {
        let bands = bollinger_bands("AAPL", &table(), 20).unwrap();
        assert!(approx_eq(bands.average, 159.5, 1e-9));
        // population std dev of the fixture is sqrt(33.25)
        assert!(approx_eq(bands.std_dev, 5.766281297335398, 1e-9));
        assert!(approx_eq(bands.upper, 171.0325625946708, 1e-9));
        assert!(approx_eq(bands.lower, 147.9674374053292, 1e-9));
    }

    #[test]
    fn test_band_width_is_four_std_dev() {
        for period in [1, 3, 7, 20, 50] {
            let bands = bollinger_bands("AAPL", &table(), period).unwrap();
            assert!(bands.std_dev >= 0.0);
            assert!(approx_eq(bands.upper - bands.lower, 4.0 * bands.std_dev, 1e-9));
        }
    }

    #[test]
    fn test_flat_series_has_zero_width() {
        let table: PriceTable = (0..10).map(|_| PriceRecord::new("F", 42.0)).collect();
        let bands = bollinger_bands("F", &table, 10).unwrap();
        assert_eq!(bands.std_dev, 0.0);
        assert_eq!(bands.upper, 42.0);
        assert_eq!(bands.lower, 42.0);
    }

    #[test]
    fn test_short_history_uses_nominal_period() {
        let table: PriceTable = vec![PriceRecord::new("T", 10.0), PriceRecord::new("T", 20.0)].into();
        let bands = bollinger_bands("T", &table, 4).unwrap();
        assert_eq!(bands.average, 7.5);
        // ((10 - 7.5)^2 + (20 - 7.5)^2) / 4
        assert!(approx_eq(bands.std_dev, (162.5_f64 / 4.0).sqrt(), 1e-12));

        let bands = bollinger_bands_with("T", &table, 4, WindowDivisor::AvailableSamples).unwrap();
        assert_eq!(bands.average, 15.0);
        assert_eq!(bands.std_dev, 5.0);
        assert_eq!(bands.lower, 5.0);
        assert_eq!(bands.upper, 25.0);
    }

    #[test]
    fn test_no_data() {
        let bands = bollinger_bands("AAPL", &PriceTable::new(), 20).unwrap();
        assert_eq!(bands, BollingerBands::default());
        assert_eq!(bands.average, 0.0);
        assert_eq!(bands.upper, 0.0);
    }

    #[test]
    fn test_zero_period_rejected() {
        let err = bollinger_bands("AAPL", &table(), 0).unwrap_err();
        assert_eq!(err.errcode, ErrCode::InvalidArgument);
    }
}
