use std::path::PathBuf;

use clap::Parser;

use crate::engine::timeseries::DEFAULT_TIME_INDEX;
use crate::error::ConfigError;
use crate::game::{MIN_SAMPLE_SIZE, clamp_sample_size};

/// Compare a real network-traffic dataset against three synthetic ones.
#[derive(Debug, Clone, Parser)]
#[command(name = "rusty-traffic", version, about)]
pub struct Args {
    /// Directory holding real.csv, ctgan_synthetic.csv, tablegan_synthetic.csv
    /// and custom_synthetic.csv (or .parquet / .json).
    #[arg(long, env = "RUSTY_TRAFFIC_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Seed for the guessing game; random when omitted.
    #[arg(long, env = "RUSTY_TRAFFIC_SEED")]
    pub seed: Option<u64>,

    /// Initial position of the time slider.
    #[arg(long, default_value_t = DEFAULT_TIME_INDEX)]
    pub time_index: usize,

    /// Initial number of rows in the sample table (5-20).
    #[arg(long, default_value_t = MIN_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Hide the static detection-rate demo table.
    #[arg(long)]
    pub no_detection_demo: bool,
}

/// Validated settings the dashboard starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub seed: Option<u64>,
    pub time_index: usize,
    pub sample_size: usize,
    pub show_detection_demo: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_dir: PathBuf::from("."),
            seed: None,
            time_index: DEFAULT_TIME_INDEX,
            sample_size: MIN_SAMPLE_SIZE,
            show_detection_demo: true,
        }
    }
}

impl Args {
    pub fn dashboard_config(&self) -> Result<DashboardConfig, ConfigError> {
        if !self.data_dir.exists() {
            return Err(ConfigError::MissingDataDir(self.data_dir.clone()));
        }
        if !self.data_dir.is_dir() {
            return Err(ConfigError::NotADirectory(self.data_dir.clone()));
        }
        let sample_size = clamp_sample_size(self.sample_size);
        if sample_size != self.sample_size {
            log::warn!(
                "Sample size {} out of range, using {sample_size}",
                self.sample_size
            );
        }
        Ok(DashboardConfig {
            data_dir: self.data_dir.clone(),
            seed: self.seed,
            time_index: self.time_index,
            sample_size,
            show_detection_demo: !self.no_detection_demo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_dashboard_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::parse_from(["rusty-traffic", "--data-dir", dir.path().to_str().unwrap()]);
        let config = args.dashboard_config().unwrap();
        assert_eq!(config.time_index, 50);
        assert_eq!(config.sample_size, 5);
        assert!(config.show_detection_demo);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn flags_are_applied_and_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::parse_from([
            "rusty-traffic",
            "--data-dir",
            dir.path().to_str().unwrap(),
            "--seed",
            "9",
            "--sample-size",
            "50",
            "--no-detection-demo",
        ]);
        let config = args.dashboard_config().unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.sample_size, 20);
        assert!(!config.show_detection_demo);
    }

    #[test]
    fn missing_data_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let args = Args::parse_from(["rusty-traffic", "--data-dir", missing.to_str().unwrap()]);
        assert!(matches!(
            args.dashboard_config(),
            Err(ConfigError::MissingDataDir(_))
        ));

        let file = dir.path().join("real.csv");
        std::fs::write(&file, "dur\n1\n").unwrap();
        let args = Args::parse_from(["rusty-traffic", "--data-dir", file.to_str().unwrap()]);
        assert!(matches!(
            args.dashboard_config(),
            Err(ConfigError::NotADirectory(_))
        ));
    }
}
