use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::common::stock_error::{ErrCode, StockError};

pub const AVERAGE_PRICE_PERIOD_KEY: &str = "average_price_period_in_days";
pub const BOLLINGER_BANDS_PERIOD_KEY: &str = "bollinger_bands_period_in_days";
pub const RSI_PERIOD_KEY: &str = "rsi_period_in_days";
pub const WINDOW_DIVISOR_KEY: &str = "window_divisor";

/// Divisor used when averaging a trailing window.
///
/// `NominalPeriod` divides the window sum by the configured period even when
/// the series is shorter than the period, so short histories are
/// under-weighted. Existing reports depend on those numbers, which is why it
/// stays the default. `AvailableSamples` divides by the number of closes
/// actually in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
pub enum WindowDivisor {
    #[default]
    #[strum(serialize = "nominal")]
    NominalPeriod,
    #[strum(serialize = "available")]
    AvailableSamples,
}

impl WindowDivisor {
    pub fn divisor(&self, period: usize, available: usize) -> usize {
        match self {
            WindowDivisor::NominalPeriod => period,
            WindowDivisor::AvailableSamples => available.min(period),
        }
    }
}

/// Indicator windows for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    pub average_price_period: usize,
    pub bollinger_bands_period: usize,
    pub rsi_period: usize,
    pub window_divisor: WindowDivisor,
}

impl ScanConfig {
    pub fn new(conf: HashMap<String, Value>) -> Result<Self, StockError> {
        let window_divisor = match conf.get(WINDOW_DIVISOR_KEY) {
            None | Some(Value::Null) => WindowDivisor::default(),
            Some(Value::String(s)) => WindowDivisor::from_str(s).map_err(|_| {
                StockError::new(
                    format!("unknown {} = {}", WINDOW_DIVISOR_KEY, s),
                    ErrCode::ConfigError,
                )
            })?,
            Some(other) => {
                return Err(StockError::new(
                    format!("{} must be a string, got {}", WINDOW_DIVISOR_KEY, other),
                    ErrCode::ConfigError,
                ))
            }
        };

        Ok(Self {
            average_price_period: get_period(&conf, AVERAGE_PRICE_PERIOD_KEY)?,
            bollinger_bands_period: get_period(&conf, BOLLINGER_BANDS_PERIOD_KEY)?,
            rsi_period: get_period(&conf, RSI_PERIOD_KEY)?,
            window_divisor,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, StockError> {
        let conf: HashMap<String, Value> = serde_json::from_str(text).map_err(|e| {
            StockError::new(format!("invalid JSON in config: {}", e), ErrCode::ConfigError)
        })?;
        Self::new(conf)
    }

    /// Read and validate a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StockError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            let code = if e.kind() == std::io::ErrorKind::NotFound {
                ErrCode::ConfigNotFound
            } else {
                ErrCode::ConfigError
            };
            StockError::new(format!("cannot read {}: {}", path.display(), e), code)
        })?;
        let config = Self::from_json_str(&text)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}

fn get_period(conf: &HashMap<String, Value>, key: &str) -> Result<usize, StockError> {
    let value = conf.get(key).ok_or_else(|| {
        StockError::new(format!("missing config key {}", key), ErrCode::ConfigError)
    })?;
    match value.as_u64() {
        Some(n) if n > 0 => usize::try_from(n).map_err(|_| {
            StockError::new(format!("{} is too large: {}", key, n), ErrCode::ConfigError)
        }),
        _ => Err(StockError::new(
            format!("{} must be a positive integer, got {}", key, value),
            ErrCode::ConfigError,
        )),
    }
}
