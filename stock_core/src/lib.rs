pub mod common;
pub mod config;
pub mod math;
pub mod scanner;
pub mod series;
pub mod table;

pub use common::stock_error::{ErrCode, StockError};
pub use config::scan_config::{ScanConfig, WindowDivisor};
pub use math::average::average_price;
pub use math::boll::{bollinger_bands, BollingerBands};
pub use math::latest::latest_close;
pub use math::rsi::rsi;
pub use scanner::opportunity::{scan_opportunities, Opportunity};
pub use table::price_table::{PriceRecord, PriceTable};
