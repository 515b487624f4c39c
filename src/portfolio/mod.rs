pub mod fees;
pub mod position;

pub use fees::{FeeSchedule, ROUND_TRIP_FEE_SIDES};
pub use position::{Position, PositionError, UNIT_AMOUNT};
