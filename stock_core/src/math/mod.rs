pub mod average;
pub mod boll;
pub mod latest;
pub mod rsi;
