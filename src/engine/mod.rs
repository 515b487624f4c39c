pub mod backtest;
pub mod error;
pub mod scanner;
pub mod trade;

pub use backtest::{BacktestConfig, BacktestEngine, BacktestResult, DEFAULT_TICK_MINUTES};
pub use error::SimulationError;
pub use scanner::scan_instrument;
pub use trade::TradeResult;
