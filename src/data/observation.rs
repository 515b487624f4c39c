use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Invalid close price at index {index}: {price} (must be finite and > 0)")]
    InvalidPrice { index: usize, price: f64 },
    #[error("Duplicate timestamp {timestamp} at index {index}")]
    DuplicateTimestamp {
        index: usize,
        timestamp: DateTime<Utc>,
    },
    #[error("Unsorted observations: {timestamp} at index {index} precedes {previous}")]
    Unsorted {
        index: usize,
        timestamp: DateTime<Utc>,
        previous: DateTime<Utc>,
    },
}

//a single point of an instrument's price history, already annotated with a buy flag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
    pub buy: bool,
}

impl Observation {
    pub fn new(timestamp: DateTime<Utc>, close: f64, buy: bool) -> Self {
        Observation {
            timestamp,
            close,
            buy,
        }
    }
}

//ordered, validated observation sequence for one instrument
//index order equals time order, so scans can rely on positions alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    //validates and wraps a sequence of observations
    //an empty sequence is valid
    pub fn new(observations: Vec<Observation>) -> Result<Self, SeriesError> {
        for (index, obs) in observations.iter().enumerate() {
            if !obs.close.is_finite() || obs.close <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    index,
                    price: obs.close,
                });
            }

            if index == 0 {
                continue;
            }

            let previous = observations[index - 1].timestamp;
            if obs.timestamp == previous {
                return Err(SeriesError::DuplicateTimestamp {
                    index,
                    timestamp: obs.timestamp,
                });
            }
            if obs.timestamp < previous {
                return Err(SeriesError::Unsorted {
                    index,
                    timestamp: obs.timestamp,
                    previous,
                });
            }
        }

        Ok(ObservationSeries { observations })
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    //indices of every observation flagged as a buy, ascending
    pub fn buy_indices(&self) -> Vec<usize> {
        self.observations
            .iter()
            .enumerate()
            .filter(|(_, obs)| obs.buy)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.observations.last().map(|obs| obs.timestamp)
    }
}
