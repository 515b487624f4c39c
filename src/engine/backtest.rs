use crate::data::{ObservationSeries, SignalSource};
use crate::engine::error::SimulationError;
use crate::engine::scanner::scan_instrument;
use crate::engine::trade::TradeResult;
use crate::metrics::SummaryMetrics;
use crate::portfolio::FeeSchedule;
use crate::strategy::SellOracle;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::info;

//default bar length used when reporting durations in minutes
pub const DEFAULT_TICK_MINUTES: u32 = 5;

//result of a backtest
#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub summary: SummaryMetrics,
    pub per_instrument: IndexMap<String, SummaryMetrics>,

    //closed trades in instrument order, then open index order
    pub trades: Vec<TradeResult>,
}

//configuration for a backtest run, passed explicitly instead of living in global state
#[derive(Debug, Clone)]
pub struct BacktestConfig {
    pub fees: FeeSchedule,

    //nominal "now" of the run, handed to the sell oracle on every call
    pub now: DateTime<Utc>,

    //length of one observation step, only used for reporting
    pub tick_minutes: u32,
}

impl BacktestConfig {
    pub fn new(fees: FeeSchedule, now: DateTime<Utc>) -> Self {
        BacktestConfig {
            fees,
            now,
            tick_minutes: DEFAULT_TICK_MINUTES,
        }
    }
}

//drives the per-instrument scan across every instrument
pub struct BacktestEngine {
    config: BacktestConfig,
    instruments: IndexMap<String, ObservationSeries>,
}

impl BacktestEngine {
    //creates a new backtest engine over already annotated series
    pub fn new(config: BacktestConfig, instruments: IndexMap<String, ObservationSeries>) -> Self {
        BacktestEngine {
            config,
            instruments,
        }
    }

    //loads every instrument from a signal source; source failures abort the backtest
    pub fn from_source<S>(config: BacktestConfig, source: &S) -> Result<Self, SimulationError>
    where
        S: SignalSource + ?Sized,
    {
        let instruments = source.load()?;
        Ok(Self::new(config, instruments))
    }

    //runs the backtest on the calling thread
    pub fn run<O>(&self, oracle: &O) -> Result<BacktestResult, SimulationError>
    where
        O: SellOracle + ?Sized,
    {
        self.log_start(oracle.name(), false);

        let mut trades = Vec::new();
        for (instrument, series) in &self.instruments {
            let instrument_trades = scan_instrument(instrument, series, &self.config, oracle)?;
            info!(
                instrument = instrument.as_str(),
                observations = series.len(),
                trades = instrument_trades.len(),
                "instrument scanned"
            );
            trades.extend(instrument_trades);
        }

        Ok(self.build_result(trades))
    }

    //runs one scan per instrument on the rayon pool
    //results are merged in instrument order, so the output matches run()
    pub fn run_parallel<O>(&self, oracle: &O) -> Result<BacktestResult, SimulationError>
    where
        O: SellOracle + Sync + ?Sized,
    {
        self.log_start(oracle.name(), true);

        let entries: Vec<(&String, &ObservationSeries)> = self.instruments.iter().collect();
        let per_instrument: Vec<Vec<TradeResult>> = entries
            .par_iter()
            .map(|(instrument, series)| {
                scan_instrument(instrument, series, &self.config, oracle)
            })
            .collect::<Result<_, _>>()?;

        let trades = per_instrument.into_iter().flatten().collect();
        Ok(self.build_result(trades))
    }

    fn log_start(&self, oracle_name: &str, parallel: bool) {
        info!(
            instruments = self.instruments.len(),
            oracle = oracle_name,
            fee_rate = self.config.fees.round_trip_rate(),
            now = %self.config.now,
            parallel,
            "starting backtest"
        );
    }

    fn build_result(&self, trades: Vec<TradeResult>) -> BacktestResult {
        let summary = SummaryMetrics::from_trades(&trades, self.config.tick_minutes);
        let per_instrument = SummaryMetrics::per_instrument(
            self.instruments.keys().map(String::as_str),
            &trades,
            self.config.tick_minutes,
        );

        info!(
            trades = summary.num_trades,
            total_profit = summary.total_profit,
            "backtest finished"
        );

        BacktestResult {
            summary,
            per_instrument,
            trades,
        }
    }

}
