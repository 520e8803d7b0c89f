use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Job configuration.
///
/// Loaded from a TOML file and validated before use.
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default number of steps to project.
    pub steps: i64,
    /// Default period hint.
    pub period: i64,

    /// Pretty-print JSON reports.
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            steps: 3,
            period: 2,
            pretty: true,
        }
    }
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let config: Config = toml::from_str(&contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        check_num(self.steps, 0..=1_000_000).context("invalid number of steps")?;
        Ok(())
    }
}

/// Input series of a job.
///
/// `steps` and `period` override the [`Config`] defaults when present.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Series {
    pub data: Vec<f64>,

    pub steps: Option<i64>,
    pub period: Option<i64>,
}

impl Series {
    /// Load a [`Series`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or deserialized.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        toml::from_str(&contents).context("failed to deserialize series")
    }

    /// Resolve steps and period against the configuration defaults.
    pub fn resolve(&self, cfg: &Config) -> (i64, i64) {
        (
            self.steps.unwrap_or(cfg.steps),
            self.period.unwrap_or(cfg.period),
        )
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
