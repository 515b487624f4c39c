use crate::data::observation::{Observation, ObservationSeries};
use crate::data::source::SignalError;
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRecord {
    timestamp: String,
    symbol: String,
    close: f64,
    buy: String,
}

//parses the buy column, accepting 1/0 as well as true/false
fn parse_buy_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" | "" => Some(false),
        _ => None,
    }
}

//loads annotated observations from a csv file, grouped by symbol
//symbols keep the order in which they first appear in the file
//rows are not re-sorted: out-of-order rows fail series validation
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, ObservationSeries>, SignalError> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut grouped: IndexMap<String, Vec<Observation>> = IndexMap::new();

    for (index, result) in reader.deserialize().enumerate() {
        let line = index + 2;
        let record: CsvRecord = result?;

        let timestamp = DateTime::parse_from_rfc3339(&record.timestamp)
            .map_err(|_| SignalError::Timestamp {
                line,
                value: record.timestamp.clone(),
            })?
            .with_timezone(&Utc);

        let buy = parse_buy_flag(&record.buy).ok_or_else(|| SignalError::BuyFlag {
            line,
            value: record.buy.clone(),
        })?;

        grouped
            .entry(record.symbol)
            .or_default()
            .push(Observation::new(timestamp, record.close, buy));
    }

    let mut instruments = IndexMap::with_capacity(grouped.len());
    for (symbol, observations) in grouped {
        let series = ObservationSeries::new(observations).map_err(|source| {
            SignalError::InvalidSeries {
                instrument: symbol.clone(),
                source,
            }
        })?;
        instruments.insert(symbol, series);
    }

    Ok(instruments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_buy_flag() {
        assert_eq!(parse_buy_flag("1"), Some(true));
        assert_eq!(parse_buy_flag("TRUE"), Some(true));
        assert_eq!(parse_buy_flag("0"), Some(false));
        assert_eq!(parse_buy_flag(""), Some(false));
        assert_eq!(parse_buy_flag("maybe"), None);
    }
}
