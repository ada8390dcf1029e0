//! Per-department statistics over user directory records.
//!
//! This crate groups user records by their company department in a single
//! pass and derives, for each department, gender counts, an age range, a
//! hair-colour histogram, and a full-name to postal-code lookup. A summary
//! rollup then totals those figures across departments.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Lenient decoding of DummyJSON-shaped user records
//! - Single-pass aggregation by department ([`aggregate`])
//! - Cross-department totals ([`summarize`])
//! - Loading user pages from disk and windowing them with `limit`/`skip`
//! - Deterministic synthetic records for benchmarks and demos
//!
//! # Example
//!
//! ```
//! use department_stats::{UserRecord, aggregate, summarize};
//!
//! let records = vec![
//!     UserRecord::default()
//!         .with_first_name("John")
//!         .with_last_name("Doe")
//!         .with_age(30.0)
//!         .with_gender("male")
//!         .with_hair_color("Brown")
//!         .with_postal_code("12345")
//!         .with_department("Engineering"),
//!     UserRecord::default()
//!         .with_age(25.0)
//!         .with_gender("female")
//!         .with_department("Engineering"),
//! ];
//!
//! let result = aggregate(&records);
//! let engineering = result.get("Engineering").expect("department present");
//! assert_eq!(engineering.male_count(), 1);
//! assert_eq!(engineering.age_range().to_string(), "25-30");
//!
//! let summary = summarize(&result);
//! assert_eq!(summary.total_users, 2);
//! ```

mod aggregate;
pub mod cli;
mod error;
mod record;
mod source;
mod summary;
pub mod synthetic;

pub use aggregate::{AgeRange, AggregationResult, DepartmentStats, ParseAgeRangeError, aggregate};
pub use error::SourceError;
pub use record::UserRecord;
pub use source::{DEFAULT_LIMIT, PageWindow, UsersPage, load_users, parse_users};
pub use summary::{SummaryStats, summarize};
