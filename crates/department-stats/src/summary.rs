//! Cross-department rollup of an [`AggregationResult`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::aggregate::AggregationResult;

/// Totals derived from an already aggregated result.
///
/// `total_users` is the sum of the male and female counters, so records with
/// an unrecognised gender are not included in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    /// Number of departments in the result.
    pub department_count: usize,
    /// `total_males + total_females`.
    pub total_users: u64,
    /// Sum of every department's male counter.
    pub total_males: u64,
    /// Sum of every department's female counter.
    pub total_females: u64,
    /// Size of the union of hair colours across departments.
    pub unique_hair_color_count: usize,
    /// Department names in ascending code-point order.
    pub department_names: Vec<String>,
}

/// Rolls an aggregation result up into [`SummaryStats`].
///
/// # Example
///
/// ```
/// use department_stats::{AggregationResult, summarize};
///
/// let summary = summarize(&AggregationResult::default());
/// assert_eq!(summary.department_count, 0);
/// assert!(summary.department_names.is_empty());
/// ```
#[must_use]
pub fn summarize(result: &AggregationResult) -> SummaryStats {
    let mut total_males = 0_u64;
    let mut total_females = 0_u64;
    let mut hair_colors: HashSet<&str> = HashSet::new();
    let mut department_names = Vec::with_capacity(result.len());

    for (department, stats) in result.iter() {
        total_males += stats.male_count();
        total_females += stats.female_count();
        hair_colors.extend(stats.hair_histogram().keys().map(String::as_str));
        department_names.push(department.to_owned());
    }
    department_names.sort_unstable();

    SummaryStats {
        department_count: result.len(),
        total_users: total_males + total_females,
        total_males,
        total_females,
        unique_hair_color_count: hair_colors.len(),
        department_names,
    }
}
