//! Single-pass grouping of user records by department.
//!
//! [`aggregate`] walks the input exactly once. Each department gets a working
//! accumulator on first sight; once the pass completes, the accumulators are
//! frozen into immutable [`DepartmentStats`] values.
//!
//! Malformed data points are dropped individually:
//!
//! - A record without a department (or with an empty one) is skipped whole.
//! - Gender counts only exact `"male"` or `"female"` labels.
//! - A missing or NaN age is left out of the range.
//! - A missing or empty hair colour is left out of the histogram.
//! - An address is recorded only when first name, last name, and postal code
//!   are all present and non-empty. Later records overwrite earlier ones that
//!   share the same concatenated name.

use std::fmt;
use std::num::FpCategory;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

use crate::record::UserRecord;

/// Closed interval over the ages observed in a department.
///
/// Renders as `"{min}-{max}"`, or `"0-0"` when no valid age was observed.
///
/// # Example
///
/// ```
/// use department_stats::AgeRange;
///
/// let range: AgeRange = "25-40".parse().expect("valid range");
/// assert_eq!(range.min(), Some(25.0));
/// assert_eq!(range.max(), Some(40.0));
/// assert_eq!(AgeRange::default().to_string(), "0-0");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgeRange {
    bounds: Option<(f64, f64)>,
}

impl AgeRange {
    /// Returns the youngest observed age, if any.
    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.bounds.map(|(min, _)| min)
    }

    /// Returns the oldest observed age, if any.
    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.bounds.map(|(_, max)| max)
    }

    /// Returns `true` when no valid age contributed to the range.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bounds.is_none()
    }

    const fn include(&mut self, age: f64) {
        let age = canonical_age(age);
        self.bounds = Some(match self.bounds {
            None => (age, age),
            Some((min, max)) => (min.min(age), max.max(age)),
        });
    }
}

/// Folds negative zero into zero so it renders as `0`.
const fn canonical_age(age: f64) -> f64 {
    match age.classify() {
        FpCategory::Zero => 0.0,
        _ => age,
    }
}

/// Writes an age the way JavaScript stringifies numbers: `Infinity` for
/// infinities and exponent notation outside `[1e-6, 1e21)`.
fn write_age(f: &mut fmt::Formatter<'_>, age: f64) -> fmt::Result {
    if age.is_infinite() {
        let label = if age.is_sign_negative() {
            "-Infinity"
        } else {
            "Infinity"
        };
        return f.write_str(label);
    }
    let magnitude = age.abs();
    if magnitude >= 1e21 || (magnitude > 0.0 && magnitude < 1e-6) {
        let scientific = format!("{age:e}");
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                write!(f, "{mantissa}e+{exponent}")
            }
            _ => f.write_str(&scientific),
        };
    }
    write!(f, "{age}")
}

impl fmt::Display for AgeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            None => f.write_str("0-0"),
            Some((min, max)) => {
                write_age(f, min)?;
                f.write_str("-")?;
                write_age(f, max)
            }
        }
    }
}

/// Error returned when an age range string is not of the form `"min-max"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid age range '{value}': expected \"min-max\" with min <= max")]
pub struct ParseAgeRangeError {
    /// The rejected input.
    pub value: String,
}

impl std::str::FromStr for AgeRange {
    type Err = ParseAgeRangeError;

    /// Parses the rendered form. `"0-0"` parses as the empty range.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseAgeRangeError {
            value: value.to_owned(),
        };
        if value == "0-0" {
            return Ok(Self::default());
        }
        // The separator is the first '-' that is neither a leading sign nor
        // an exponent sign.
        let split_at = value
            .match_indices('-')
            .map(|(index, _)| index)
            .find(|index| {
                index
                    .checked_sub(1)
                    .and_then(|previous| value.as_bytes().get(previous))
                    .is_some_and(|byte| !matches!(byte, b'e' | b'E'))
            })
            .ok_or_else(invalid)?;
        let (raw_min, rest) = value.split_at_checked(split_at).ok_or_else(invalid)?;
        let raw_max = rest.strip_prefix('-').ok_or_else(invalid)?;
        let min = canonical_age(raw_min.parse().map_err(|_| invalid())?);
        let max = canonical_age(raw_max.parse().map_err(|_| invalid())?);
        if min.is_nan() || max.is_nan() || min > max {
            return Err(invalid());
        }
        Ok(Self {
            bounds: Some((min, max)),
        })
    }
}

impl TryFrom<String> for AgeRange {
    type Error = ParseAgeRangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AgeRange> for String {
    fn from(value: AgeRange) -> Self {
        value.to_string()
    }
}

/// Aggregated figures for one department.
///
/// Serialises as `{male, female, ageRange, hair, addressUser}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentStats {
    #[serde(rename = "male")]
    male_count: u64,
    #[serde(rename = "female")]
    female_count: u64,
    #[serde(rename = "ageRange")]
    age_range: AgeRange,
    #[serde(rename = "hair")]
    hair_histogram: IndexMap<String, u64>,
    #[serde(rename = "addressUser")]
    address_by_full_name: IndexMap<String, String>,
}

impl DepartmentStats {
    /// Number of records labelled exactly `"male"`.
    #[must_use]
    pub const fn male_count(&self) -> u64 {
        self.male_count
    }

    /// Number of records labelled exactly `"female"`.
    #[must_use]
    pub const fn female_count(&self) -> u64 {
        self.female_count
    }

    /// Range over the valid ages seen in the department.
    #[must_use]
    pub const fn age_range(&self) -> AgeRange {
        self.age_range
    }

    /// Occurrence count per hair colour.
    #[must_use]
    pub const fn hair_histogram(&self) -> &IndexMap<String, u64> {
        &self.hair_histogram
    }

    /// Postal code keyed by `firstName + lastName`.
    #[must_use]
    pub const fn address_by_full_name(&self) -> &IndexMap<String, String> {
        &self.address_by_full_name
    }
}

/// Department name to [`DepartmentStats`] mapping produced by [`aggregate`].
///
/// Iteration follows first appearance in the input. Equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationResult {
    departments: IndexMap<String, DepartmentStats>,
}

impl AggregationResult {
    /// Looks up the statistics for a department.
    #[must_use]
    pub fn get(&self, department: &str) -> Option<&DepartmentStats> {
        self.departments.get(department)
    }

    /// Number of departments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.departments.len()
    }

    /// Returns `true` when no record carried a department.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.departments.is_empty()
    }

    /// Iterates over departments and their statistics.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DepartmentStats)> {
        self.departments
            .iter()
            .map(|(name, stats)| (name.as_str(), stats))
    }
}

impl FromIterator<(String, DepartmentStats)> for AggregationResult {
    fn from_iter<I: IntoIterator<Item = (String, DepartmentStats)>>(iter: I) -> Self {
        Self {
            departments: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gender {
    Male,
    Female,
}

impl Gender {
    fn classify(label: Option<&str>) -> Option<Self> {
        match label {
            Some("male") => Some(Self::Male),
            Some("female") => Some(Self::Female),
            _ => None,
        }
    }
}

/// Working state for one department during the pass.
#[derive(Debug, Default)]
struct DepartmentAccumulator {
    male_count: u64,
    female_count: u64,
    age_range: AgeRange,
    hair_histogram: IndexMap<String, u64>,
    address_by_full_name: IndexMap<String, String>,
}

impl DepartmentAccumulator {
    fn observe(&mut self, record: &UserRecord) {
        match Gender::classify(record.gender.as_deref()) {
            Some(Gender::Male) => self.male_count += 1,
            Some(Gender::Female) => self.female_count += 1,
            None => {}
        }

        if let Some(age) = record.age.filter(|age| !age.is_nan()) {
            self.age_range.include(age);
        }

        if let Some(color) = non_empty(record.hair_color.as_deref()) {
            match self.hair_histogram.get_mut(color) {
                Some(count) => *count += 1,
                None => {
                    self.hair_histogram.insert(color.to_owned(), 1);
                }
            }
        }

        if let (Some(first), Some(last), Some(postal_code)) = (
            non_empty(record.first_name.as_deref()),
            non_empty(record.last_name.as_deref()),
            non_empty(record.postal_code.as_deref()),
        ) {
            self.address_by_full_name
                .insert(format!("{first}{last}"), postal_code.to_owned());
        }
    }

    fn finish(self) -> DepartmentStats {
        DepartmentStats {
            male_count: self.male_count,
            female_count: self.female_count,
            age_range: self.age_range,
            hair_histogram: self.hair_histogram,
            address_by_full_name: self.address_by_full_name,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|inner| !inner.is_empty())
}

/// Groups `records` by department in a single pass.
///
/// Never fails: unusable fields are skipped one by one, and records without a
/// department are dropped. The function holds no state between calls and is
/// safe to invoke concurrently.
///
/// # Example
///
/// ```
/// use department_stats::{UserRecord, aggregate};
///
/// let records = vec![
///     UserRecord::default().with_gender("male").with_department("Sales"),
///     UserRecord::default().with_gender("other").with_department("Sales"),
///     UserRecord::default().with_gender("female"),
/// ];
///
/// let result = aggregate(&records);
/// assert_eq!(result.len(), 1);
/// let sales = result.get("Sales").expect("department present");
/// assert_eq!((sales.male_count(), sales.female_count()), (1, 0));
/// assert_eq!(sales.age_range().to_string(), "0-0");
/// ```
#[must_use]
pub fn aggregate(records: &[UserRecord]) -> AggregationResult {
    let mut accumulators: IndexMap<&str, DepartmentAccumulator> = IndexMap::new();
    let mut skipped = 0_usize;

    for record in records {
        let Some(department) = non_empty(record.department.as_deref()) else {
            trace!(id = ?record.id, "record has no department; skipping");
            skipped += 1;
            continue;
        };
        accumulators.entry(department).or_default().observe(record);
    }

    debug!(
        records = records.len(),
        departments = accumulators.len(),
        skipped,
        "aggregated user records by department"
    );

    accumulators
        .into_iter()
        .map(|(department, accumulator)| (department.to_owned(), accumulator.finish()))
        .collect()
}
