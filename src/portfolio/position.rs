use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//every simulated trade buys exactly one unit
pub const UNIT_AMOUNT: f64 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PositionError {
    #[error("Open price must be finite and > 0, got {0}")]
    InvalidOpenPrice(f64),
    #[error("Amount must be finite and > 0, got {0}")]
    InvalidAmount(f64),
    #[error("Fee rate must be finite and >= 0, got {0}")]
    InvalidFeeRate(f64),
}

//represents one simulated long trade
//read-only after construction: closing derives a trade result instead of mutating it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    open_price: f64,
    open_time: DateTime<Utc>,
    amount: f64,

    //combined round-trip fee, already multiplied by the caller
    fee_rate: f64,
}

impl Position {
    //opens a position, validating price, amount and fee
    pub fn new(
        open_price: f64,
        open_time: DateTime<Utc>,
        amount: f64,
        fee_rate: f64,
    ) -> Result<Self, PositionError> {
        if !open_price.is_finite() || open_price <= 0.0 {
            return Err(PositionError::InvalidOpenPrice(open_price));
        }
        if !amount.is_finite() || amount <= 0.0 {
            return Err(PositionError::InvalidAmount(amount));
        }
        if !fee_rate.is_finite() || fee_rate < 0.0 {
            return Err(PositionError::InvalidFeeRate(fee_rate));
        }

        Ok(Position {
            open_price,
            open_time,
            amount,
            fee_rate,
        })
    }

    pub fn open_price(&self) -> f64 {
        self.open_price
    }

    pub fn open_time(&self) -> DateTime<Utc> {
        self.open_time
    }

    //realized profit as a ratio of the open price, net of fees
    //strictly increasing in exit_price; equals -fee_rate when exiting at the open price
    pub fn profit(&self, exit_price: f64) -> f64 {
        (exit_price - self.open_price) / self.open_price - self.fee_rate
    }

    //realized profit in quote currency
    pub fn profit_abs(&self, exit_price: f64) -> f64 {
        self.profit(exit_price) * self.open_price * self.amount
    }
}
