pub mod stock_error;
pub mod time;
pub mod utils;
