use chrono::NaiveDateTime;

use crate::table::price_table::PriceTable;

/// Most recent close of `symbol`.
///
/// Among rows with a valid ISO-8601 date the one with the greatest date
/// wins (the earliest such row on ties). Rows without a usable date only
/// matter when no row is dated; then the last close in input order is
/// returned. 0.0 when the symbol has no parseable close.
pub fn latest_close(symbol: &str, table: &PriceTable) -> f64 {
    let mut newest: Option<(NaiveDateTime, f64)> = None;
    let mut last_undated: Option<f64> = None;

    for row in table.rows_for(symbol) {
        let Some(close) = row.close_value() else {
            continue;
        };
        match row.date_value() {
            Some(dt) => {
                if newest.map_or(true, |(best, _)| dt > best) {
                    newest = Some((dt, close));
                }
            }
            None => last_undated = Some(close),
        }
    }

    newest
        .map(|(_, close)| close)
        .or(last_undated)
        .unwrap_or(0.0)
}
