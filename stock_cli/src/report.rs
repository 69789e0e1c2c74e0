use std::io::{self, Write};

use stock_core::{BollingerBands, Opportunity};

/// Indicator values shown for a single symbol
#[derive(Debug, Clone)]
pub struct SymbolReport {
    pub latest_close: f64,
    pub average: f64,
    pub bands: Option<BollingerBands>,
    pub rsi: Option<(usize, f64)>,
}

pub fn write_symbol_report<W: Write>(out: &mut W, report: &SymbolReport) -> io::Result<()> {
    writeln!(out, "Close: ${:.2}", report.latest_close)?;
    writeln!(out, "Average: ${:.2}", report.average)?;
    if let Some(bands) = &report.bands {
        writeln!(out, "Lower Band: ${:.2}", bands.lower)?;
        writeln!(out, "Upper Band: ${:.2}", bands.upper)?;
    }
    if let Some((period, rsi)) = report.rsi {
        writeln!(out, "RSI ({}): {:.2}", period, rsi)?;
    }
    Ok(())
}

pub fn write_scan_report<W: Write>(out: &mut W, opportunities: &[Opportunity]) -> io::Result<()> {
    if opportunities.is_empty() {
        writeln!(
            out,
            "No oversold opportunities found (price below lower band AND RSI < 30)"
        )?;
        return Ok(());
    }

    writeln!(out, "Found {} oversold opportunities:\n", opportunities.len())?;
    writeln!(out, "{:<10} {:<12} {:<12} {:<8}", "Symbol", "Price", "Lower Band", "RSI")?;
    writeln!(out, "{}", "-".repeat(42))?;
    for opp in opportunities {
        writeln!(
            out,
            "{:<10} ${:<11.2} ${:<11.2} {:<7.2}",
            opp.symbol, opp.latest_close, opp.lower_band, opp.rsi
        )?;
    }
    Ok(())
}
