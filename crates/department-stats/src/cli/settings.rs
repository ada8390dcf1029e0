//! Report settings loaded via OrthoConfig.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::error::{CliError, ParseReportViewError};
use crate::source::{DEFAULT_LIMIT, PageWindow};

/// Seed used for synthetic records when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Which part of the aggregation the report prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReportView {
    /// The department map.
    #[default]
    Departments,
    /// Cross-department totals only.
    Summary,
    /// Both, under `departments` and `summary` keys.
    Full,
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Departments => f.write_str("departments"),
            Self::Summary => f.write_str("summary"),
            Self::Full => f.write_str("full"),
        }
    }
}

impl FromStr for ReportView {
    type Err = ParseReportViewError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "departments" => Ok(Self::Departments),
            "summary" => Ok(Self::Summary),
            "full" => Ok(Self::Full),
            _ => Err(ParseReportViewError {
                value: value.to_owned(),
            }),
        }
    }
}

/// Where the report reads its records from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordInput {
    /// A users page on disk.
    File(Utf8PathBuf),
    /// Deterministic synthetic records.
    Synthetic {
        /// Number of records to generate.
        count: usize,
        /// RNG seed.
        seed: u64,
    },
}

/// Configuration for a report run.
///
/// Values layer from CLI flags, `DEPARTMENT_STATS_*` environment variables,
/// and configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEPARTMENT_STATS")]
pub struct ReportSettings {
    /// Path to a users page (envelope or bare array).
    pub input: Option<PathBuf>,
    /// Maximum number of records to aggregate. Zero means the default.
    pub limit: Option<usize>,
    /// Number of leading records to skip.
    #[ortho_config(default = 0)]
    pub skip: usize,
    /// Report view: `departments`, `summary`, or `full`.
    pub view: Option<String>,
    /// Generate this many synthetic records instead of reading a file.
    pub generate: Option<usize>,
    /// Seed for synthetic records.
    pub rng_seed: Option<u64>,
}

impl ReportSettings {
    /// Resolves the configured record window.
    ///
    /// A missing or zero limit falls back to [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn window(&self) -> PageWindow {
        let limit = self
            .limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_LIMIT);
        PageWindow::new(limit, self.skip)
    }

    /// Resolves the configured report view.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::View`] when the name is not recognised.
    pub fn view(&self) -> Result<ReportView, CliError> {
        self.view
            .as_deref()
            .map_or(Ok(ReportView::default()), |raw| Ok(raw.trim().parse()?))
    }

    /// Resolves the record input.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::MissingInput`] or [`CliError::ConflictingInput`]
    /// unless exactly one input is configured, and
    /// [`CliError::NonUtf8Path`] for a path that is not UTF-8.
    pub fn input(&self) -> Result<RecordInput, CliError> {
        match (&self.input, self.generate) {
            (Some(_), Some(_)) => Err(CliError::ConflictingInput),
            (None, None) => Err(CliError::MissingInput),
            (Some(path), None) => Utf8PathBuf::from_path_buf(path.clone())
                .map(RecordInput::File)
                .map_err(|rejected| CliError::NonUtf8Path {
                    path: rejected.to_string_lossy().into_owned(),
                }),
            (None, Some(count)) => Ok(RecordInput::Synthetic {
                count,
                seed: self.rng_seed.unwrap_or(DEFAULT_SEED),
            }),
        }
    }
}
