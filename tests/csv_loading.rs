use sigscan::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_groups_rows_by_symbol_in_first_seen_order() {
    let file = write_csv(
        "timestamp,symbol,close,buy\n\
         2017-08-20T10:00:00Z,BTC_LTC,0.0100,0\n\
         2017-08-20T10:00:00Z,BTC_ETH,0.0700,1\n\
         2017-08-20T10:05:00Z,BTC_LTC,0.0110,true\n\
         2017-08-20T10:05:00Z,BTC_ETH,0.0720,false\n",
    );

    let instruments = CsvSignalSource::new(file.path()).load().unwrap();

    let names: Vec<&str> = instruments.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["BTC_LTC", "BTC_ETH"]);
    assert_eq!(instruments["BTC_LTC"].buy_indices(), vec![1]);
    assert_eq!(instruments["BTC_ETH"].buy_indices(), vec![0]);
    assert_eq!(instruments["BTC_ETH"].as_slice()[1].close, 0.0720);
}

#[test]
fn test_unsorted_rows_fail_with_instrument_name() {
    let file = write_csv(
        "timestamp,symbol,close,buy\n\
         2017-08-20T10:05:00Z,BTC_ETH,0.07,0\n\
         2017-08-20T10:00:00Z,BTC_ETH,0.07,1\n",
    );

    let err = load_csv(file.path()).unwrap_err();
    match err {
        SignalError::InvalidSeries { instrument, source } => {
            assert_eq!(instrument, "BTC_ETH");
            assert!(matches!(source, SeriesError::Unsorted { index: 1, .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_bad_timestamp_reports_line() {
    let file = write_csv(
        "timestamp,symbol,close,buy\n\
         2017-08-20T10:00:00Z,BTC_ETH,0.07,0\n\
         yesterday,BTC_ETH,0.07,1\n",
    );

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(err, SignalError::Timestamp { line: 3, .. }));
}

#[test]
fn test_bad_buy_flag_reports_line() {
    let file = write_csv(
        "timestamp,symbol,close,buy\n\
         2017-08-20T10:00:00Z,BTC_ETH,0.07,yes\n",
    );

    let err = load_csv(file.path()).unwrap_err();
    assert!(matches!(err, SignalError::BuyFlag { line: 2, .. }));
}

#[test]
fn test_missing_file_is_an_error() {
    let err = CsvSignalSource::new("/definitely/not/here.csv").load().unwrap_err();
    assert!(matches!(err, SignalError::Csv(_)));
}

#[test]
fn test_end_to_end_backtest_from_csv() {
    let file = write_csv(
        "timestamp,symbol,close,buy\n\
         2017-08-20T10:00:00Z,BTC_ETH,0.0700,1\n\
         2017-08-20T10:05:00Z,BTC_ETH,0.0705,0\n\
         2017-08-20T10:10:00Z,BTC_ETH,0.0800,0\n\
         2017-08-20T10:15:00Z,BTC_ETH,0.0810,0\n",
    );

    let configuration = BacktestConfiguration {
        data_path: file.path().to_path_buf(),
        ..Default::default()
    };
    let now = chrono::DateTime::parse_from_rfc3339("2017-08-20T14:50:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);

    let source = CsvSignalSource::new(&configuration.data_path);
    let engine =
        BacktestEngine::from_source(configuration.engine_config(now).unwrap(), &source).unwrap();
    let result = engine.run(&configuration.oracle()).unwrap();

    //0.0700 -> 0.0800 is +14.3% after 10 minutes, above the 4% step
    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].close_index, 2);
    assert_eq!(result.trades[0].duration, 2);
    assert!((result.summary.avg_duration_minutes - 10.0).abs() < 1e-9);
}

#[test]
fn test_clock_defaults_to_newest_row_when_not_configured() {
    let file = write_csv(
        "timestamp,symbol,close,buy\n\
         2017-08-20T10:00:00Z,BTC_ETH,0.0700,1\n\
         2017-08-20T10:20:00Z,BTC_LTC,0.0100,0\n\
         2017-08-20T10:05:00Z,BTC_ETH,0.0800,0\n",
    );

    let configuration = BacktestConfiguration {
        data_path: file.path().to_path_buf(),
        ..Default::default()
    };
    let instruments = CsvSignalSource::new(&configuration.data_path).load().unwrap();
    let now = configuration.resolve_now(&instruments).unwrap();

    assert_eq!(now.to_rfc3339(), "2017-08-20T10:20:00+00:00");
    let engine = BacktestEngine::new(configuration.engine_config(now).unwrap(), instruments);
    assert_eq!(engine.run(&configuration.oracle()).unwrap().trades.len(), 1);
}
