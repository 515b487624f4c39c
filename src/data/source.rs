use crate::data::loader::load_csv;
use crate::data::observation::{ObservationSeries, SeriesError};
use indexmap::IndexMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Failed to read observation data: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to parse timestamp '{value}' at line {line}")]
    Timestamp { line: usize, value: String },
    #[error("Invalid buy flag '{value}' at line {line}")]
    BuyFlag { line: usize, value: String },
    #[error("Invalid observation series for {instrument}: {source}")]
    InvalidSeries {
        instrument: String,
        #[source]
        source: SeriesError,
    },
    #[error("Signal annotation failed: {0}")]
    Annotation(String),
}

//supplies every instrument's observation sequence with the buy flag already computed
//instruments are returned in the order the backtest should visit them
pub trait SignalSource {
    fn load(&self) -> Result<IndexMap<String, ObservationSeries>, SignalError>;
}

//reads annotated observations from a csv file
#[derive(Debug, Clone)]
pub struct CsvSignalSource {
    path: PathBuf,
}

impl CsvSignalSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CsvSignalSource { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SignalSource for CsvSignalSource {
    fn load(&self) -> Result<IndexMap<String, ObservationSeries>, SignalError> {
        load_csv(&self.path)
    }
}

//in-memory source, mostly useful for embedding and tests
impl SignalSource for IndexMap<String, ObservationSeries> {
    fn load(&self) -> Result<IndexMap<String, ObservationSeries>, SignalError> {
        Ok(self.clone())
    }
}
