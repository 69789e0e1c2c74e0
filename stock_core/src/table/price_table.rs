use std::collections::BTreeSet;

use serde::Deserialize;

use crate::common::{time::parse_iso_date, utils::parse_close};

/// One row of price history.
///
/// `close` and `date` are kept as the raw text from the source and parsed
/// lazily by each calculation; a row whose close does not parse is skipped,
/// never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PriceRecord {
    pub symbol: String,
    #[serde(default)]
    pub close: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl PriceRecord {
    pub fn new(symbol: impl Into<String>, close: impl ToString) -> Self {
        Self {
            symbol: symbol.into(),
            close: Some(close.to_string()),
            date: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn close_value(&self) -> Option<f64> {
        parse_close(self.close.as_deref())
    }

    pub fn date_value(&self) -> Option<chrono::NaiveDateTime> {
        self.date.as_deref().and_then(parse_iso_date)
    }

    /// True when the row carries a non-blank date field, parseable or not.
    pub fn has_date(&self) -> bool {
        self.date.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// Ordered price rows, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceTable {
    rows: Vec<PriceRecord>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: PriceRecord) {
        self.rows.push(record);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriceRecord> {
        self.rows.iter()
    }

    /// Rows whose symbol matches exactly (case-sensitive), in input order.
    pub fn rows_for<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a PriceRecord> + 'a {
        self.rows.iter().filter(move |r| r.symbol == symbol)
    }

    /// Distinct symbols in ascending lexicographic order.
    pub fn symbols(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.symbol.as_str()).collect()
    }
}

impl From<Vec<PriceRecord>> for PriceTable {
    fn from(rows: Vec<PriceRecord>) -> Self {
        Self { rows }
    }
}

impl FromIterator<PriceRecord> for PriceTable {
    fn from_iter<I: IntoIterator<Item = PriceRecord>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
