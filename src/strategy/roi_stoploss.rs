use crate::portfolio::Position;
use crate::strategy::{OracleError, SellOracle};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

//minimal roi and stoploss exit rule
//sells when profit drops below the stoploss
//sells when the position has been open longer than a roi step and profit beats that step's threshold
#[derive(Debug, Clone, PartialEq)]
pub struct RoiStoplossOracle {
    //minutes open -> minimum profit ratio required to sell
    minimal_roi: BTreeMap<u32, f64>,
    stoploss: Option<f64>,
}

impl RoiStoplossOracle {
    pub fn new(minimal_roi: BTreeMap<u32, f64>, stoploss: Option<f64>) -> Self {
        RoiStoplossOracle {
            minimal_roi,
            stoploss,
        }
    }

    //standard table: 4% immediately, tapering to break-even after 40 minutes, -40% stoploss
    pub fn standard() -> Self {
        Self::new(default_minimal_roi(), Some(-0.40))
    }
}

//default minimal roi table keyed by minutes since open
pub fn default_minimal_roi() -> BTreeMap<u32, f64> {
    BTreeMap::from([(0, 0.04), (20, 0.02), (30, 0.01), (40, 0.0)])
}

impl SellOracle for RoiStoplossOracle {
    fn should_close(
        &self,
        position: &Position,
        price: f64,
        time: DateTime<Utc>,
        _now: DateTime<Utc>,
    ) -> Result<bool, OracleError> {
        let current_profit = position.profit(price);

        if let Some(stoploss) = self.stoploss {
            if current_profit < stoploss {
                return Ok(true);
            }
        }

        //measured on the candidate's own timestamp, not the run clock
        let elapsed_minutes = (time - position.open_time()).num_seconds() as f64 / 60.0;

        let roi_reached = self
            .minimal_roi
            .iter()
            .any(|(&minutes, &threshold)| {
                elapsed_minutes > minutes as f64 && current_profit > threshold
            });

        Ok(roi_reached)
    }

    fn name(&self) -> &str {
        "Minimal ROI / Stoploss"
    }
}
