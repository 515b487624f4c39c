pub mod loader;
pub mod observation;
pub mod source;

pub use loader::load_csv;
pub use observation::{Observation, ObservationSeries, SeriesError};
pub use source::{CsvSignalSource, SignalError, SignalSource};
