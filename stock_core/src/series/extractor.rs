use tracing::trace;

use crate::table::price_table::{PriceRecord, PriceTable};

/// Closing prices for `symbol` in input order.
///
/// Rows for other symbols and rows whose close is missing or not a number
/// are skipped. Returns an empty vector when nothing matches.
pub fn closes(table: &PriceTable, symbol: &str) -> Vec<f64> {
    parse_closes(table.rows_for(symbol), symbol)
}

/// Closing prices for `symbol` in chronological order.
///
/// When any matching row carries a date and every matching row's date
/// parses, rows are stable-sorted by date ascending (equal dates keep their
/// input order). Otherwise the input order is kept.
pub fn chronological_closes(table: &PriceTable, symbol: &str) -> Vec<f64> {
    let rows: Vec<&PriceRecord> = table.rows_for(symbol).collect();
    if !rows.iter().any(|r| r.has_date()) {
        return parse_closes(rows.into_iter(), symbol);
    }

    let dated: Option<Vec<_>> = rows
        .iter()
        .map(|r| r.date_value().map(|dt| (dt, *r)))
        .collect();

    match dated {
        Some(mut dated) => {
            dated.sort_by_key(|(dt, _)| *dt);
            parse_closes(dated.into_iter().map(|(_, r)| r), symbol)
        }
        None => {
            trace!(symbol, "dates missing or malformed, keeping input order");
            parse_closes(rows.into_iter(), symbol)
        }
    }
}

fn parse_closes<'a>(rows: impl Iterator<Item = &'a PriceRecord>, symbol: &str) -> Vec<f64> {
    rows.filter_map(|r| {
        let close = r.close_value();
        if close.is_none() {
            trace!(symbol, close = ?r.close, "skipping row with unparseable close");
        }
        close
    })
    .collect()
}
