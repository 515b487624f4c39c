use crate::engine::trade::TradeResult;
use indexmap::IndexMap;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//summary metrics for a set of closed trades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub num_trades: usize,
    pub num_winning_trades: usize,
    pub num_losing_trades: usize,
    pub win_rate: f64,

    //mean profit ratio expressed in percent
    pub avg_profit_pct: f64,

    //sum of profit ratios
    pub total_profit: f64,
    pub total_profit_abs: f64,
    pub largest_win: f64,
    pub largest_loss: f64,

    //mean duration in observation steps and in minutes
    pub avg_duration_steps: f64,
    pub avg_duration_minutes: f64,
}

impl SummaryMetrics {
    //reduces trades into summary metrics; tick_minutes is the length of one step
    pub fn from_trades(trades: &[TradeResult], tick_minutes: u32) -> Self {
        if trades.is_empty() {
            return SummaryMetrics::empty();
        }

        let profits: Vec<f64> = trades.iter().map(|t| t.profit).collect();
        let durations: Vec<f64> = trades.iter().map(|t| t.duration as f64).collect();

        let num_winning = trades.iter().filter(|t| t.is_win()).count();
        let num_losing = trades.iter().filter(|t| t.is_loss()).count();

        let avg_duration_steps = durations.iter().mean();
        let largest_win = profits.iter().fold(0.0f64, |a, &b| a.max(b));
        let largest_loss = profits.iter().fold(0.0f64, |a, &b| a.min(b));

        SummaryMetrics {
            num_trades: trades.len(),
            num_winning_trades: num_winning,
            num_losing_trades: num_losing,
            win_rate: num_winning as f64 / trades.len() as f64,
            avg_profit_pct: profits.iter().mean() * 100.0,
            total_profit: profits.iter().sum(),
            total_profit_abs: trades.iter().map(|t| t.profit_abs).sum(),
            largest_win,
            largest_loss,
            avg_duration_steps,
            avg_duration_minutes: avg_duration_steps * tick_minutes as f64,
        }
    }

    //metrics for every instrument, in the given order
    //instruments without trades are reported with empty metrics
    pub fn per_instrument<'a, I>(
        instruments: I,
        trades: &[TradeResult],
        tick_minutes: u32,
    ) -> IndexMap<String, SummaryMetrics>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut grouped: IndexMap<String, Vec<TradeResult>> = instruments
            .into_iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();

        for trade in trades {
            grouped
                .entry(trade.instrument.clone())
                .or_default()
                .push(trade.clone());
        }

        grouped
            .into_iter()
            .map(|(name, group)| (name, SummaryMetrics::from_trades(&group, tick_minutes)))
            .collect()
    }

    fn empty() -> Self {
        SummaryMetrics {
            num_trades: 0,
            num_winning_trades: 0,
            num_losing_trades: 0,
            win_rate: 0.0,
            avg_profit_pct: 0.0,
            total_profit: 0.0,
            total_profit_abs: 0.0,
            largest_win: 0.0,
            largest_loss: 0.0,
            avg_duration_steps: 0.0,
            avg_duration_minutes: 0.0,
        }
    }

    //one-line report
    pub fn summary_line(&self) -> String {
        format!(
            "Made {} buys. Average profit {:.2}%. Total profit was {:.3}. Average duration {:.1} mins.",
            self.num_trades, self.avg_profit_pct, self.total_profit, self.avg_duration_minutes
        )
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        self.to_table().printstd();
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Number of Trades"),
            Cell::new(&format!("{}", self.num_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&format!("{:.2}%", self.win_rate * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Average Profit"),
            Cell::new(&format!("{:.2}%", self.avg_profit_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Profit"),
            Cell::new(&format!("{:.3}", self.total_profit)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Profit (quote)"),
            Cell::new(&format!("{:.8}", self.total_profit_abs)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Largest Win"),
            Cell::new(&format!("{:.2}%", self.largest_win * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Largest Loss"),
            Cell::new(&format!("{:.2}%", self.largest_loss * 100.0)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Average Duration"),
            Cell::new(&format!(
                "{:.1} steps ({:.1} mins)",
                self.avg_duration_steps, self.avg_duration_minutes
            )),
        ]));

        table
    }
}
