use crate::config::{Config, Series};
use crate::forecast::Forecast;
use crate::service::{BoxedForecastService, LinearForecaster};
use anyhow::{Context, Result};
use glob::{Pattern, glob};
use rmp_serde::{decode, encode};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

/// Batch driver over a job directory.
///
/// The directory holds `config.toml`, any number of `series-<name>.toml`
/// inputs and, after a run, one `forecast-<name>.msgpack` result per input.
pub struct Manager {
    job_dir: PathBuf,
    cfg: Config,
    service: BoxedForecastService,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(job_dir: P) -> Result<Self> {
        Self::with_service(job_dir, Box::new(LinearForecaster))
    }

    pub fn with_service<P: AsRef<Path>>(job_dir: P, service: BoxedForecastService) -> Result<Self> {
        let job_dir = job_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(job_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self {
            job_dir,
            cfg,
            service,
        })
    }

    /// Forecast every input series and save the results.
    ///
    /// Returns the number of series processed.
    pub fn run_jobs(&self) -> Result<usize> {
        let names = self
            .list_names("series-", ".toml")
            .context("failed to list series files")?;

        for name in &names {
            let series_file = self.series_file(name);
            let series = Series::from_file(&series_file)
                .with_context(|| format!("failed to load {series_file:?}"))?;

            let (steps, period) = series.resolve(&self.cfg);
            let result = self.service.forecast(&series.data, steps, period);
            log::info!(
                "{name}: {} values, {steps} steps, avg {}, trend {} ({})",
                series.data.len(),
                result.avg,
                result.trend,
                self.service.name()
            );

            let forecast_file = self.forecast_file(name);
            save_forecast(&result, &forecast_file)
                .with_context(|| format!("failed to save {forecast_file:?}"))?;
        }

        log::info!("processed {} series", names.len());
        Ok(names.len())
    }

    /// Write all saved results as a JSON object keyed by series name.
    pub fn report<W: Write>(&self, mut writer: W) -> Result<()> {
        let names = self
            .list_names("forecast-", ".msgpack")
            .context("failed to list forecast files")?;

        let mut report = serde_json::Map::new();
        for name in names {
            let forecast_file = self.forecast_file(&name);
            let result = load_forecast(&forecast_file)
                .with_context(|| format!("failed to load {forecast_file:?}"))?;
            report.insert(name, result.to_json());
        }
        let report = serde_json::Value::Object(report);

        if self.cfg.pretty {
            serde_json::to_writer_pretty(&mut writer, &report)
        } else {
            serde_json::to_writer(&mut writer, &report)
        }
        .context("failed to serialize report")?;
        writeln!(writer).context("failed to write report")?;

        Ok(())
    }

    /// Remove all saved results.
    ///
    /// Returns the number of files removed.
    pub fn clean(&self) -> Result<usize> {
        let names = self
            .list_names("forecast-", ".msgpack")
            .context("failed to list forecast files")?;

        for name in &names {
            let forecast_file = self.forecast_file(name);
            fs::remove_file(&forecast_file)
                .with_context(|| format!("failed to remove {forecast_file:?}"))?;
            log::info!("removed {forecast_file:?}");
        }

        Ok(names.len())
    }

    fn list_names(&self, prefix: &str, suffix: &str) -> Result<Vec<String>> {
        let job_dir = self.job_dir.to_str().context("job dir is not valid UTF-8")?;
        let pattern = Path::new(&Pattern::escape(job_dir)).join(format!("{prefix}*{suffix}"));
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let mut names: Vec<_> = glob(pattern)
            .context("failed to glob job files")?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .filter_map(|p| {
                let file_name = p.file_name()?.to_str()?;
                let name = file_name.strip_prefix(prefix)?.strip_suffix(suffix)?;
                Some(name.to_string())
            })
            .collect();
        names.sort();
        Ok(names)
    }

    fn series_file(&self, name: &str) -> PathBuf {
        self.job_dir.join(format!("series-{name}.toml"))
    }

    fn forecast_file(&self, name: &str) -> PathBuf {
        self.job_dir.join(format!("forecast-{name}.msgpack"))
    }
}

fn save_forecast<P: AsRef<Path>>(result: &Forecast, file: P) -> Result<()> {
    let file = file.as_ref();
    let file = File::create(file).with_context(|| format!("failed to create {file:?}"))?;
    let mut writer = BufWriter::new(file);
    encode::write_named(&mut writer, result).context("failed to serialize forecast")?;
    writer.flush().context("failed to flush writer stream")?;
    Ok(())
}

fn load_forecast<P: AsRef<Path>>(file: P) -> Result<Forecast> {
    let file = file.as_ref();
    let file = File::open(file).with_context(|| format!("failed to open {file:?}"))?;
    let mut reader = BufReader::new(file);
    let result = decode::from_read(&mut reader).context("failed to deserialize forecast")?;
    Ok(result)
}
