use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use sigscan::prelude::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sigscan")]
#[command(about = "Backtests buy signals against a minimal ROI / stoploss sell rule", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run a backtest
    Run {
        //path to a json configuration file (defaults are used when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        //path to csv data file (timestamp, symbol, close, buy)
        #[arg(long)]
        data: Option<PathBuf>,

        //fee rate per side
        #[arg(long)]
        fee: Option<f64>,

        //stoploss ratio (eg -0.1)
        #[arg(long, allow_hyphen_values = true)]
        stoploss: Option<f64>,

        //fixed clock for the run (rfc3339)
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        //scan instruments in parallel
        #[arg(long)]
        parallel: bool,

        //output path for trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,
    },

    //write the default configuration to a file
    Init {
        #[arg(long, default_value = "sigscan.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            data,
            fee,
            stoploss,
            now,
            parallel,
            output_trades_csv,
        } => {
            let mut configuration = match config {
                Some(path) => BacktestConfiguration::from_json_file(&path)?,
                None => BacktestConfiguration::default(),
            };

            //command line flags override the file
            if let Some(data) = data {
                configuration.data_path = data;
            }
            if let Some(fee) = fee {
                configuration.fee_rate = fee;
            }
            if stoploss.is_some() {
                configuration.stoploss = stoploss;
            }
            if now.is_some() {
                configuration.now = now;
            }
            if parallel {
                configuration.parallel = true;
            }
            if output_trades_csv.is_some() {
                configuration.output_trades_csv = output_trades_csv;
            }
            configuration.validate()?;

            run_backtest(&configuration)?;
        }
        Commands::Init { output } => {
            BacktestConfiguration::default()
                .to_json_file(&output)
                .context(format!("Failed to write config to {:?}", output))?;
            println!("Default configuration written to {:?}", output);
        }
    }

    Ok(())
}

//RUST_LOG wins when set, otherwise info for this crate
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigscan=info"))
}

fn run_backtest(configuration: &BacktestConfiguration) -> Result<()> {
    let source = CsvSignalSource::new(&configuration.data_path);
    let instruments = source
        .load()
        .context(format!("Failed to load data from {:?}", source.path()))?;

    let now = configuration
        .resolve_now(&instruments)
        .context(format!("No usable data in {:?}", source.path()))?;

    let engine = BacktestEngine::new(configuration.engine_config(now)?, instruments);
    let oracle = configuration.oracle();

    let result = if configuration.parallel {
        engine.run_parallel(&oracle)?
    } else {
        engine.run(&oracle)?
    };

    println!("====================== BACKTESTING REPORT ================================");
    for (instrument, metrics) in &result.per_instrument {
        println!("For currency {}:", instrument);
        println!("{}", metrics.summary_line());
    }
    println!("TOTAL OVER ALL TRADES:");
    println!("{}\n", result.summary.summary_line());
    result.summary.pretty_print_table();

    if let Some(trades_path) = &configuration.output_trades_csv {
        save_trades_csv(&result.trades, trades_path)?;
        println!("\nTrades saved to {:?}", trades_path);
    }

    Ok(())
}

fn save_trades_csv(trades: &[TradeResult], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .context(format!("Failed to create trades file {:?}", path))?;

    for trade in trades {
        writer.serialize(trade)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    //single test so the two RUST_LOG states cannot race each other
    #[test]
    fn test_log_filter_respects_rust_log() {
        std::env::set_var("RUST_LOG", "sigscan=debug");
        assert!(log_filter().to_string().contains("sigscan=debug"));

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter().to_string(), "sigscan=info");
    }
}
