use crate::data::ObservationSeries;
use crate::engine::backtest::BacktestConfig;
use crate::engine::error::SimulationError;
use crate::engine::trade::TradeResult;
use crate::portfolio::{Position, UNIT_AMOUNT};
use crate::strategy::SellOracle;
use tracing::debug;

//replays every buy signal of one instrument
//each buy opens an independent position and scans forward from the buy index itself,
//so overlapping positions are allowed and a same-observation close has duration 0
//positions still open when the data runs out are dropped
pub fn scan_instrument<O>(
    instrument: &str,
    series: &ObservationSeries,
    config: &BacktestConfig,
    oracle: &O,
) -> Result<Vec<TradeResult>, SimulationError>
where
    O: SellOracle + ?Sized,
{
    let observations = series.as_slice();
    let fee_rate = config.fees.round_trip_rate();
    let mut trades = Vec::new();

    for open_index in series.buy_indices() {
        let open = &observations[open_index];

        let position = Position::new(open.close, open.timestamp, UNIT_AMOUNT, fee_rate)
            .map_err(|source| SimulationError::Position {
                instrument: instrument.to_string(),
                index: open_index,
                source,
            })?;

        let mut closed = false;
        for (close_index, candidate) in observations.iter().enumerate().skip(open_index) {
            let should_close = oracle
                .should_close(&position, candidate.close, candidate.timestamp, config.now)
                .map_err(|source| SimulationError::Oracle {
                    instrument: instrument.to_string(),
                    index: close_index,
                    source,
                })?;

            if should_close {
                trades.push(TradeResult {
                    instrument: instrument.to_string(),
                    profit: position.profit(candidate.close),
                    profit_abs: position.profit_abs(candidate.close),
                    duration: close_index - open_index,
                    open_index,
                    close_index,
                    open_time: open.timestamp,
                    close_time: candidate.timestamp,
                    open_price: open.close,
                    close_price: candidate.close,
                });
                closed = true;
                break;
            }
        }

        if !closed {
            debug!(
                instrument,
                open_index,
                open_time = %open.timestamp,
                "position still open at end of data, dropped"
            );
        }
    }

    Ok(trades)
}
