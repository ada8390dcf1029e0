//! Deterministic synthetic user records.
//!
//! Produces believable, reproducible records for benchmarks, tests, and the
//! report CLI's demo mode. The same seed and count always yield identical
//! output. A fixed share of records is deliberately degraded (missing
//! department, gender, age, or postal code, or a non-canonical gender label)
//! so that every field-dropping rule in the aggregator gets exercised.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::record::UserRecord;

/// Departments assigned to generated users.
pub const DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "Support",
    "Human Resources",
    "Legal",
    "Accounting",
    "Research and Development",
    "Product Management",
    "Services",
    "Training",
    "Business Development",
];

/// Hair colours assigned to generated users.
pub const HAIR_COLORS: &[&str] = &[
    "Black", "Blonde", "Brown", "Red", "Gray", "White", "Auburn", "Chestnut", "Green", "Purple",
    "Blue",
];

/// Youngest generated age.
pub const MIN_AGE: u8 = 18;

/// Oldest generated age.
pub const MAX_AGE: u8 = 65;

/// One in this many records has a field knocked out.
const DEGRADED_ONE_IN: u32 = 8;

/// Exclusive upper bound for five-digit postal codes.
const POSTAL_CODE_BOUND: u32 = 100_000;

/// Generates `count` synthetic user records from `seed`.
///
/// Record ids run from 1 to `count`.
///
/// # Example
///
/// ```
/// use department_stats::synthetic::generate_users;
///
/// let users = generate_users(42, 25);
/// assert_eq!(users.len(), 25);
/// assert_eq!(users, generate_users(42, 25));
/// ```
#[must_use]
pub fn generate_users(seed: u64, count: usize) -> Vec<UserRecord> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (1..=count)
        .map(|id| {
            let record = generate_single_user(&mut rng, i64::try_from(id).unwrap_or(i64::MAX));
            if rng.random_ratio(1, DEGRADED_ONE_IN) {
                degrade(&mut rng, record)
            } else {
                record
            }
        })
        .collect()
}

fn generate_single_user(rng: &mut ChaCha8Rng, id: i64) -> UserRecord {
    let first_name: String = FirstName(EN).fake_with_rng(rng);
    let last_name: String = LastName(EN).fake_with_rng(rng);
    let gender = if rng.random_bool(0.5) { "male" } else { "female" };
    let age = rng.random_range(MIN_AGE..=MAX_AGE);
    let postal_code = format!("{:05}", rng.random_range(0..POSTAL_CODE_BOUND));

    UserRecord::default()
        .with_id(id)
        .with_first_name(first_name)
        .with_last_name(last_name)
        .with_age(f64::from(age))
        .with_gender(gender)
        .with_hair_color(pick(rng, HAIR_COLORS))
        .with_postal_code(postal_code)
        .with_department(pick(rng, DEPARTMENTS))
}

fn degrade(rng: &mut ChaCha8Rng, mut record: UserRecord) -> UserRecord {
    match rng.random_range(0..6_u8) {
        0 => record.department = None,
        1 => record.gender = None,
        2 => record.gender = Some("Female".to_owned()),
        3 => record.age = None,
        4 => record.postal_code = None,
        _ => record.hair_color = Some(String::new()),
    }
    record
}

fn pick<'a>(rng: &mut ChaCha8Rng, options: &[&'a str]) -> &'a str {
    options.choose(rng).copied().unwrap_or_default()
}
