mod loader;
mod report;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use stock_core::math::{average::average_price_with, boll::bollinger_bands_with};
use stock_core::scanner::opportunity::scan_with_config;
use stock_core::{latest_close, rsi, ErrCode, ScanConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::loader::load_prices;
use crate::report::{write_scan_report, write_symbol_report, SymbolReport};

const DEFAULT_CONFIG: &str = "config/settings.json";
const DEFAULT_DATA: &str = "data/prices.csv";

#[derive(Parser, Debug)]
#[command(
    name = "stock_cli",
    version,
    about = "Calculate average close and Bollinger Bands for a stock"
)]
struct Cli {
    /// Stock symbol to query (e.g., AAPL)
    symbol: Option<String>,

    /// Also print Bollinger Bands
    #[arg(long)]
    bands: bool,

    /// Also print the Relative Strength Index
    #[arg(long)]
    rsi: bool,

    /// Scan all stocks for oversold opportunities (latest close < lower band AND RSI < 30)
    #[arg(long)]
    scan: bool,

    /// Path to the JSON settings file
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Path to the price history CSV
    #[arg(long, default_value = DEFAULT_DATA)]
    data: PathBuf,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Execute one invocation, writing the report to `out`; returns the exit status.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<u8, Box<dyn Error>> {
    let config = match ScanConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) if e.errcode == ErrCode::ConfigNotFound => {
            writeln!(out, "Config file not found: {}", cli.config.display())?;
            writeln!(
                out,
                "Please create {} with your API key and indicator periods",
                cli.config.display()
            )?;
            return Ok(1);
        }
        Err(e) if e.is_arg_err() => {
            writeln!(out, "Invalid config file {}: {}", cli.config.display(), e.msg)?;
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    if !cli.data.exists() {
        writeln!(out, "Error: The data file was not found at: {}", cli.data.display())?;
        return Ok(2);
    }

    let table = match load_prices(&cli.data) {
        Ok(table) => table,
        Err(e) if e.is_data_err() => {
            writeln!(out, "Failed to load data: {}", e)?;
            return Ok(3);
        }
        Err(e) => return Err(e.into()),
    };

    if cli.scan {
        let opportunities = scan_with_config(&table, &config)?;
        write_scan_report(out, &opportunities)?;
        return Ok(0);
    }

    let Some(symbol) = cli.symbol.as_deref() else {
        write!(out, "{}", Cli::command().render_help())?;
        return Ok(1);
    };

    let average = average_price_with(
        symbol,
        &table,
        config.average_price_period,
        config.window_divisor,
    )?;
    if average == 0.0 {
        writeln!(out, "No data for symbol: {}", symbol)?;
        return Ok(0);
    }
    debug!(symbol, average, "computed average price");

    let bands = if cli.bands {
        Some(bollinger_bands_with(
            symbol,
            &table,
            config.bollinger_bands_period,
            config.window_divisor,
        )?)
    } else {
        None
    };
    let rsi = if cli.rsi {
        Some((config.rsi_period, rsi(symbol, &table, config.rsi_period)?))
    } else {
        None
    };

    let report = SymbolReport {
        latest_close: latest_close(symbol, &table),
        average,
        bands,
        rsi,
    };
    write_symbol_report(out, &report)?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const SETTINGS: &str = r#"{
        "api_key": "demo",
        "average_price_period_in_days": 20,
        "bollinger_bands_period_in_days": 20,
        "rsi_period_in_days": 14
    }"#;

    struct Fixture {
        dir: PathBuf,
    }

    impl Fixture {
        fn new(name: &str, prices: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("stock_cli_{}_{}", name, std::process::id()));
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("settings.json"), SETTINGS).unwrap();
            std::fs::write(dir.join("prices.csv"), prices).unwrap();
            Self { dir }
        }

        fn path(&self, file: &str) -> PathBuf {
            self.dir.join(file)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.dir);
        }
    }

    fn aapl_csv() -> String {
        let mut csv = String::from("symbol,close\n");
        for close in [
            150, 152, 153, 151, 155, 154, 156, 157, 158, 159, 160, 161, 162, 163, 164, 165, 166,
            167, 168, 169,
        ] {
            csv.push_str(&format!("AAPL,{}\n", close));
        }
        csv
    }

    fn invoke(fixture: &Fixture, args: &[&str]) -> (u8, Vec<String>) {
        let config = fixture.path("settings.json");
        let data = fixture.path("prices.csv");
        let mut argv = vec![
            "stock_cli",
            "--config",
            config.to_str().unwrap(),
            "--data",
            data.to_str().unwrap(),
        ];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut buf = Vec::new();
        let code = run(&cli, &mut buf).unwrap();
        let lines = String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        (code, lines)
    }

    #[test]
    fn test_cli_default_output() {
        let fixture = Fixture::new("default", &aapl_csv());
        let (code, lines) = invoke(&fixture, &["AAPL"]);
        assert_eq!(code, 0);
        assert_eq!(lines, vec!["Close: $169.00", "Average: $159.50"]);
    }

    #[test]
    fn test_cli_bands_and_rsi() {
        let fixture = Fixture::new("bands_rsi", &aapl_csv());
        let (code, lines) = invoke(&fixture, &["AAPL", "--bands", "--rsi"]);
        assert_eq!(code, 0);
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Close:"));
        assert!(lines[1].starts_with("Average:"));
        assert_eq!(lines[2], "Lower Band: $147.97");
        assert_eq!(lines[3], "Upper Band: $171.03");
        assert!(lines[4].starts_with("RSI (14):"));
    }

    #[test]
    fn test_cli_unknown_symbol() {
        let fixture = Fixture::new("unknown", &aapl_csv());
        let (code, lines) = invoke(&fixture, &["GOOGL", "--bands"]);
        assert_eq!(code, 0);
        assert_eq!(lines, vec!["No data for symbol: GOOGL"]);
    }

    #[test]
    fn test_cli_scan() {
        let mut csv = aapl_csv();
        for _ in 0..19 {
            csv.push_str("DROP,100\n");
        }
        csv.push_str("DROP,80\n");
        let fixture = Fixture::new("scan", &csv);
        let (code, lines) = invoke(&fixture, &["--scan"]);
        assert_eq!(code, 0);
        assert_eq!(lines[0], "Found 1 oversold opportunities:");
        assert!(lines[3].starts_with("DROP"));
    }

    #[test]
    fn test_cli_without_symbol_prints_help() {
        let fixture = Fixture::new("help", &aapl_csv());
        let (code, lines) = invoke(&fixture, &[]);
        assert_eq!(code, 1);
        assert!(lines.iter().any(|l| l.starts_with("Usage:")));
    }

    #[test]
    fn test_cli_missing_data_file() {
        let fixture = Fixture::new("missing_data", &aapl_csv());
        std::fs::remove_file(fixture.path("prices.csv")).unwrap();
        let (code, lines) = invoke(&fixture, &["AAPL"]);
        assert_eq!(code, 2);
        assert!(lines[0].starts_with("Error: The data file was not found at:"));
    }

    #[test]
    fn test_cli_unreadable_data_file() {
        let fixture = Fixture::new("bad_data", "ticker,price\nAAPL,1\n");
        let (code, lines) = invoke(&fixture, &["AAPL"]);
        assert_eq!(code, 3);
        assert!(lines[0].starts_with("Failed to load data:"));
    }

    #[test]
    fn test_cli_invalid_config() {
        let fixture = Fixture::new("invalid_config", &aapl_csv());
        std::fs::write(fixture.path("settings.json"), r#"{"rsi_period_in_days": 0}"#).unwrap();
        let (code, lines) = invoke(&fixture, &["AAPL"]);
        assert_eq!(code, 1);
        assert!(lines[0].starts_with("Invalid config file"));
    }

    #[test]
    fn test_cli_missing_config() {
        let fixture = Fixture::new("missing_config", &aapl_csv());
        std::fs::remove_file(fixture.path("settings.json")).unwrap();
        let (code, lines) = invoke(&fixture, &["AAPL"]);
        assert_eq!(code, 1);
        assert!(lines[0].starts_with("Config file not found:"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["stock_cli", "MSFT", "--rsi"]).unwrap();
        assert_eq!(cli.symbol.as_deref(), Some("MSFT"));
        assert!(cli.rsi && !cli.bands && !cli.scan);
        assert_eq!(cli.config, Path::new(DEFAULT_CONFIG));
        assert_eq!(cli.data, Path::new(DEFAULT_DATA));
    }
}
