//a Rust-based signal backtesting engine
//replays every buy signal of every instrument against a pluggable sell rule

pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod portfolio;
pub mod strategy;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::BacktestConfiguration;
    pub use crate::data::{
        load_csv, CsvSignalSource, Observation, ObservationSeries, SeriesError, SignalError,
        SignalSource,
    };
    pub use crate::engine::{
        scan_instrument, BacktestConfig, BacktestEngine, BacktestResult, SimulationError,
        TradeResult, DEFAULT_TICK_MINUTES,
    };
    pub use crate::metrics::SummaryMetrics;
    pub use crate::portfolio::{
        FeeSchedule, Position, PositionError, ROUND_TRIP_FEE_SIDES, UNIT_AMOUNT,
    };
    pub use crate::strategy::{OracleError, RoiStoplossOracle, SellOracle};
}
