use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use stock_core::{ErrCode, PriceRecord, PriceTable, StockError};
use tracing::debug;

/// Load a price history CSV with a header row.
///
/// Columns `symbol` and `close` are expected, `date` is optional and any
/// other column is ignored.
pub fn load_prices(path: &Path) -> Result<PriceTable, StockError> {
    let file = File::open(path).map_err(|e| {
        let code = if e.kind() == std::io::ErrorKind::NotFound {
            ErrCode::SrcDataNotFound
        } else {
            ErrCode::SrcDataFormatError
        };
        StockError::new(format!("cannot open {}: {}", path.display(), e), code)
    })?;
    let table = read_prices(file)?;
    debug!(path = %path.display(), rows = table.len(), "loaded price table");
    Ok(table)
}

pub fn read_prices<R: Read>(reader: R) -> Result<PriceTable, StockError> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let mut table = PriceTable::new();
    for (line, result) in rdr.deserialize::<PriceRecord>().enumerate() {
        let record = result.map_err(|e| {
            StockError::new(
                format!("bad row {}: {}", line + 1, e),
                ErrCode::SrcDataFormatError,
            )
        })?;
        table.push(record);
    }
    Ok(table)
}
