pub mod roi_stoploss;

use crate::portfolio::Position;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub use roi_stoploss::RoiStoplossOracle;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("sell oracle failed: {message}")]
pub struct OracleError {
    pub message: String,
}

impl OracleError {
    pub fn new(message: impl Into<String>) -> Self {
        OracleError {
            message: message.into(),
        }
    }
}

//decides whether an open position should be closed at a candidate observation
//called in strict forward time order, once per candidate, until it first returns true
//now is the fixed clock of the run, identical for every call
//must stay referentially stable for the whole run
pub trait SellOracle {
    fn should_close(
        &self,
        position: &Position,
        price: f64,
        time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, OracleError>;

    //returns the oracle name
    fn name(&self) -> &str {
        "custom"
    }
}

//any matching closure can be injected as an oracle
impl<F> SellOracle for F
where
    F: Fn(&Position, f64, DateTime<Utc>, DateTime<Utc>) -> Result<bool, OracleError>,
{
    fn should_close(
        &self,
        position: &Position,
        price: f64,
        time: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, OracleError> {
        self(position, price, time, now)
    }
}
