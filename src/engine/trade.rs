use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//outcome of one closed position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    pub instrument: String,

    //profit ratio net of fees, may be negative
    pub profit: f64,

    //profit in quote currency
    pub profit_abs: f64,

    //observation steps between open and close, not wall-clock time
    pub duration: usize,

    pub open_index: usize,
    pub close_index: usize,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub open_price: f64,
    pub close_price: f64,
}

impl TradeResult {
    pub fn is_win(&self) -> bool {
        self.profit > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.profit < 0.0
    }
}
