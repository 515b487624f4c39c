use crate::data::ObservationSeries;
use crate::engine::{BacktestConfig, DEFAULT_TICK_MINUTES};
use crate::portfolio::{FeeSchedule, ROUND_TRIP_FEE_SIDES};
use crate::strategy::roi_stoploss::{default_minimal_roi, RoiStoplossOracle};
use anyhow::{anyhow, ensure, Context};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

//complete backtest configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfiguration {
    //data
    pub data_path: PathBuf,

    //fees: per-side rate, charged fee_sides times per trade (at least once)
    pub fee_rate: f64,
    pub fee_sides: u32,

    //sell rule
    pub stoploss: Option<f64>,
    pub minimal_roi: BTreeMap<u32, f64>,

    //fixed clock for the run, defaults to the latest observation when absent
    pub now: Option<DateTime<Utc>>,

    //length of one observation step in minutes
    pub tick_minutes: u32,

    //scan instruments on the rayon pool
    pub parallel: bool,

    //optional output path
    pub output_trades_csv: Option<PathBuf>,
}

impl Default for BacktestConfiguration {
    fn default() -> Self {
        BacktestConfiguration {
            data_path: PathBuf::from("data.csv"),
            fee_rate: 0.0025,
            fee_sides: ROUND_TRIP_FEE_SIDES,
            stoploss: Some(-0.40),
            minimal_roi: default_minimal_roi(),
            now: None,
            tick_minutes: DEFAULT_TICK_MINUTES,
            parallel: false,
            output_trades_csv: None,
        }
    }
}

impl BacktestConfiguration {
    //load configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: BacktestConfiguration = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    //checks values that would otherwise only fail mid-run
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.fee_rate.is_finite() && self.fee_rate >= 0.0,
            "fee_rate must be finite and >= 0, got {}",
            self.fee_rate
        );
        ensure!(
            self.fee_sides > 0,
            "fee_sides must be >= 1, 0 would silently drop fees"
        );
        ensure!(self.tick_minutes > 0, "tick_minutes must be > 0");
        if let Some(stoploss) = self.stoploss {
            ensure!(
                stoploss.is_finite() && stoploss < 0.0,
                "stoploss must be a negative ratio, got {}",
                stoploss
            );
        }
        for (minutes, threshold) in &self.minimal_roi {
            ensure!(
                threshold.is_finite(),
                "minimal_roi threshold for {} minutes must be finite",
                minutes
            );
        }
        Ok(())
    }

    pub fn fee_schedule(&self) -> anyhow::Result<FeeSchedule> {
        FeeSchedule::with_sides(self.fee_rate, self.fee_sides).context("Invalid fee configuration")
    }

    //builds the configured sell rule
    pub fn oracle(&self) -> RoiStoplossOracle {
        RoiStoplossOracle::new(self.minimal_roi.clone(), self.stoploss)
    }

    //configured clock, else the newest observation across all instruments
    pub fn resolve_now(
        &self,
        instruments: &IndexMap<String, ObservationSeries>,
    ) -> anyhow::Result<DateTime<Utc>> {
        if let Some(now) = self.now {
            return Ok(now);
        }

        instruments
            .values()
            .filter_map(|series| series.last_timestamp())
            .max()
            .ok_or_else(|| anyhow!("No observations to derive the backtest clock from"))
    }

    //builds the engine configuration for a given clock
    pub fn engine_config(&self, now: DateTime<Utc>) -> anyhow::Result<BacktestConfig> {
        let mut config = BacktestConfig::new(self.fee_schedule()?, now);
        config.tick_minutes = self.tick_minutes;
        Ok(config)
    }
}
