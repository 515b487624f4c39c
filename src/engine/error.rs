use crate::data::SignalError;
use crate::portfolio::PositionError;
use crate::strategy::OracleError;
use thiserror::Error;

//every variant aborts the whole run; partial results are never returned
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Signal(#[from] SignalError),
    #[error("Cannot open position for {instrument} at index {index}: {source}")]
    Position {
        instrument: String,
        index: usize,
        #[source]
        source: PositionError,
    },
    #[error("Sell oracle failed for {instrument} at index {index}: {source}")]
    Oracle {
        instrument: String,
        index: usize,
        #[source]
        source: OracleError,
    },
}
