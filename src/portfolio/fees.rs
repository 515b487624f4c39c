use crate::portfolio::position::PositionError;
use serde::{Deserialize, Serialize};

//the fee is charged once on entry and once on exit
pub const ROUND_TRIP_FEE_SIDES: u32 = 2;

//fee policy for one backtest run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    //fee rate charged per side
    pub base_rate: f64,

    //number of times the base rate is charged per trade
    pub sides: u32,
}

impl FeeSchedule {
    //creates a round-trip schedule from a per-side fee rate
    pub fn new(base_rate: f64) -> Result<Self, PositionError> {
        Self::with_sides(base_rate, ROUND_TRIP_FEE_SIDES)
    }

    pub fn with_sides(base_rate: f64, sides: u32) -> Result<Self, PositionError> {
        if !base_rate.is_finite() || base_rate < 0.0 {
            return Err(PositionError::InvalidFeeRate(base_rate));
        }

        Ok(FeeSchedule { base_rate, sides })
    }

    //no fees at all
    pub fn zero() -> Self {
        FeeSchedule {
            base_rate: 0.0,
            sides: ROUND_TRIP_FEE_SIDES,
        }
    }

    //effective fee rate handed to each position
    pub fn round_trip_rate(&self) -> f64 {
        self.base_rate * self.sides as f64
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::zero()
    }
}
