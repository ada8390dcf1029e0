//! Department report CLI.
//!
//! Loads a page of users (or generates synthetic ones), aggregates them by
//! department, and prints the requested view as JSON on stdout. Logs go to
//! stderr, filtered by `RUST_LOG`.

use std::env;
use std::io::{self, Write};

use color_eyre::eyre::{Result, WrapErr, eyre};
use department_stats::cli::{ReportSettings, early_exit, run_report};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Some(exit) = early_exit(env::args_os()) {
        writeln!(io::stdout().lock(), "{}", exit.text()).wrap_err("failed to write output")?;
        return Ok(());
    }
    init_tracing();

    let settings =
        ReportSettings::load().map_err(|err| eyre!("failed to load report settings: {err}"))?;
    let report = run_report(&settings).wrap_err("failed to build department report")?;

    writeln!(io::stdout().lock(), "{report}").wrap_err("failed to write report")?;
    Ok(())
}

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}
