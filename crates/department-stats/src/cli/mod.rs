//! CLI support for the department report.
//!
//! The `department-stats` binary delegates to [`run_report`] so the whole
//! load, window, aggregate, and render flow can be exercised in tests without
//! spawning a process.

mod error;
mod settings;

use std::ffi::OsStr;

use serde::Serialize;
use tracing::info;

pub use error::{CliError, ParseReportViewError};
pub use settings::{DEFAULT_SEED, RecordInput, ReportSettings, ReportView};

use crate::aggregate::{AggregationResult, aggregate};
use crate::record::UserRecord;
use crate::source::load_users;
use crate::summary::{SummaryStats, summarize};
use crate::synthetic::generate_users;

/// Usage text printed for `-h` and `--help`.
pub const USAGE: &str = concat!(
    "Usage: department-stats (--input <path> | --generate <n>) [options]\n",
    "\n",
    "Aggregates user records by department and prints the report as JSON.\n",
    "\n",
    "Options:\n",
    "  -i, --input <path>      Users page to read (envelope or bare array)\n",
    "  -g, --generate <n>      Generate n synthetic users instead of reading a file\n",
    "  -r, --rng-seed <seed>   Seed for synthetic users (defaults to 42)\n",
    "  -l, --limit <n>         Records to aggregate; 0 means the default of 100\n",
    "  -s, --skip <n>          Leading records to skip (defaults to 0)\n",
    "  -v, --view <view>       departments, summary, or full (defaults to departments)\n",
    "  -h, --help              Print this help output\n",
    "  -V, --version           Print the version\n",
    "\n",
    "Every option can also be set through DEPARTMENT_STATS_<OPTION>, for example\n",
    "DEPARTMENT_STATS_RNG_SEED=7.",
);

/// Version line printed for `-V` and `--version`.
pub const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// Requests answered without loading settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EarlyExit {
    /// Print [`USAGE`].
    Help,
    /// Print [`VERSION`].
    Version,
}

impl EarlyExit {
    /// Text to print on stdout for this request.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Help => USAGE,
            Self::Version => VERSION,
        }
    }
}

/// Looks for a help or version flag in `args`, the first item being the
/// program name. Arguments after `--` are not inspected.
#[must_use]
pub fn early_exit<I, S>(args: I) -> Option<EarlyExit>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    for arg in args.into_iter().skip(1) {
        match arg.as_ref().to_str() {
            Some("--") => break,
            Some("-h" | "--help") => return Some(EarlyExit::Help),
            Some("-V" | "--version") => return Some(EarlyExit::Version),
            _ => {}
        }
    }
    None
}

#[derive(Serialize)]
struct FullReport<'a> {
    departments: &'a AggregationResult,
    summary: SummaryStats,
}

/// Loads records, aggregates the configured window, and renders the report.
///
/// # Errors
///
/// Returns [`CliError`] when settings are invalid, the input cannot be
/// loaded, or the report cannot be serialised.
///
/// # Example
///
/// ```
/// use department_stats::cli::{ReportSettings, run_report};
///
/// let settings = ReportSettings {
///     input: None,
///     limit: Some(50),
///     skip: 0,
///     view: Some("summary".to_owned()),
///     generate: Some(200),
///     rng_seed: Some(7),
/// };
///
/// let report = run_report(&settings).expect("report renders");
/// assert!(report.contains("departmentNames"));
/// ```
pub fn run_report(settings: &ReportSettings) -> Result<String, CliError> {
    let view = settings.view()?;
    let records = load_records(&settings.input()?)?;
    let window = settings.window();
    let selected = window.apply(&records);

    info!(
        loaded = records.len(),
        selected = selected.len(),
        limit = window.limit(),
        skip = window.skip(),
        %view,
        "building department report"
    );

    render(view, &aggregate(selected))
}

/// Loads every record from the configured input.
///
/// # Errors
///
/// Returns [`CliError::Source`] when a users file cannot be read or decoded.
pub fn load_records(input: &RecordInput) -> Result<Vec<UserRecord>, CliError> {
    match input {
        RecordInput::File(path) => Ok(load_users(path)?),
        RecordInput::Synthetic { count, seed } => Ok(generate_users(*seed, *count)),
    }
}

/// Serialises `result` as pretty JSON in the requested view.
///
/// # Errors
///
/// Returns [`CliError::Render`] if serialisation fails.
pub fn render(view: ReportView, result: &AggregationResult) -> Result<String, CliError> {
    let rendered = match view {
        ReportView::Departments => serde_json::to_string_pretty(result),
        ReportView::Summary => serde_json::to_string_pretty(&summarize(result)),
        ReportView::Full => serde_json::to_string_pretty(&FullReport {
            departments: result,
            summary: summarize(result),
        }),
    };
    rendered.map_err(|err| CliError::Render {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests;
