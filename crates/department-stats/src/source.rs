//! Loading and windowing pages of user records.
//!
//! Pages arrive either as the upstream envelope
//! (`{"users": [...], "total": n, "skip": n, "limit": n}`) or as a bare array
//! of users. Entries that are not JSON objects are dropped with a warning;
//! field-level problems are handled by [`UserRecord`]'s lenient decoding.

use std::io;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::SourceError;
use crate::record::UserRecord;

/// Page size used when no positive limit is configured.
pub const DEFAULT_LIMIT: usize = 100;

/// Upstream response envelope for a page of users.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsersPage {
    /// Users on this page.
    #[serde(deserialize_with = "decode_users")]
    pub users: Vec<UserRecord>,
    /// Total users available upstream.
    #[serde(default)]
    pub total: usize,
    /// Offset of this page.
    #[serde(default)]
    pub skip: usize,
    /// Requested page size.
    #[serde(default)]
    pub limit: usize,
}

/// A `limit`/`skip` window over an in-memory list of records.
///
/// # Example
///
/// ```
/// use department_stats::PageWindow;
///
/// let values = [1, 2, 3, 4, 5];
/// assert_eq!(PageWindow::new(2, 1).apply(&values), &[2, 3]);
/// assert!(PageWindow::new(2, 9).apply(&values).is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    limit: usize,
    skip: usize,
}

impl PageWindow {
    /// Creates a window taking up to `limit` items after skipping `skip`.
    #[must_use]
    pub const fn new(limit: usize, skip: usize) -> Self {
        Self { limit, skip }
    }

    /// Maximum number of items selected.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of leading items skipped.
    #[must_use]
    pub const fn skip(&self) -> usize {
        self.skip
    }

    /// Selects the window from `items`, clamped to the available range.
    #[must_use]
    pub fn apply<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.skip.min(items.len());
        let end = start.saturating_add(self.limit).min(items.len());
        items.get(start..end).unwrap_or_default()
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}

/// Decodes a users page from JSON text.
///
/// # Errors
///
/// Returns [`SourceError::Parse`] when the text is not JSON or an envelope
/// has no `users` array, and [`SourceError::UnexpectedShape`] when the root
/// is neither an object nor an array.
///
/// # Example
///
/// ```
/// use department_stats::parse_users;
///
/// let json = r#"{"users": [{"company": {"department": "Legal"}}], "total": 1}"#;
/// let users = parse_users(json).expect("valid page");
/// assert_eq!(users.len(), 1);
/// ```
pub fn parse_users(json: &str) -> Result<Vec<UserRecord>, SourceError> {
    let document: Value = serde_json::from_str(json).map_err(parse_error)?;
    match document {
        Value::Array(entries) => Ok(decode_entries(entries)),
        Value::Object(envelope) => UsersPage::deserialize(Value::Object(envelope))
            .map(|page| page.users)
            .map_err(parse_error),
        other => Err(SourceError::UnexpectedShape {
            found: json_kind(&other),
        }),
    }
}

/// Reads and decodes a users page from `path`.
///
/// # Errors
///
/// Returns [`SourceError::Read`] when the file cannot be opened or read, and
/// any error from [`parse_users`] otherwise.
pub fn load_users(path: &Utf8Path) -> Result<Vec<UserRecord>, SourceError> {
    let contents = read_file(path).map_err(|err| SourceError::Read {
        path: path.to_owned(),
        message: err.to_string(),
    })?;
    parse_users(&contents)
}

fn read_file(path: &Utf8Path) -> io::Result<String> {
    let (parent, file_name) = split_path(path)?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

/// Splits `path` into the directory to open and the file name inside it.
///
/// A bare file name resolves against the current directory.
fn split_path(path: &Utf8Path) -> io::Result<(&Utf8Path, &str)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
    Ok((parent, file_name))
}

fn decode_users<'de, D>(deserializer: D) -> Result<Vec<UserRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(decode_entries(entries))
}

fn decode_entries(entries: Vec<Value>) -> Vec<UserRecord> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                warn!(index, found = json_kind(&entry), "skipping non-object user entry");
                return None;
            }
            match UserRecord::deserialize(entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(index, error = %err, "skipping undecodable user entry");
                    None
                }
            }
        })
        .collect()
}

fn parse_error(err: serde_json::Error) -> SourceError {
    SourceError::Parse {
        message: err.to_string(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
