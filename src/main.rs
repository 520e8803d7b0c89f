use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::{io, path::PathBuf};
use trendcast::{ForecastService, LinearForecaster, Manager};

const DEMO_DATA: [f64; 6] = [2.0, 3.5, 4.2, 5.0, 6.1, 8.3];

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Forecast the given values and print the result as JSON.
    Forecast {
        #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
        steps: i64,

        #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
        period: i64,

        /// Use the built-in demo series instead of `values`.
        #[arg(long, conflicts_with = "values")]
        demo: bool,

        #[arg(allow_negative_numbers = true)]
        values: Vec<f64>,
    },

    /// Forecast every series in a job directory.
    Run {
        #[arg(long)]
        job_dir: PathBuf,
    },

    /// Print the saved results of a job directory.
    Report {
        #[arg(long)]
        job_dir: PathBuf,
    },

    /// Remove the saved results of a job directory.
    Clean {
        #[arg(long)]
        job_dir: PathBuf,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::debug!("{args:#?}");

    match args.command {
        Command::Forecast {
            steps,
            period,
            demo,
            values,
        } => {
            let data = if demo { DEMO_DATA.to_vec() } else { values };
            let result = LinearForecaster.forecast(&data, steps, period);
            println!("{}", result.to_json());
        }
        Command::Run { job_dir } => {
            let mgr = Manager::new(job_dir).context("failed to construct mgr")?;
            mgr.run_jobs()?;
        }
        Command::Report { job_dir } => {
            let mgr = Manager::new(job_dir).context("failed to construct mgr")?;
            mgr.report(io::stdout().lock())?;
        }
        Command::Clean { job_dir } => {
            let mgr = Manager::new(job_dir).context("failed to construct mgr")?;
            let n_removed = mgr.clean()?;
            log::info!("removed {n_removed} files");
        }
    }

    Ok(())
}
