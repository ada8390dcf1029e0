//! Behavioural tests for department aggregation.
//!
//! These tests validate aggregation and summary rollup against Gherkin
//! scenarios covering the reference directory page, dropped records, empty
//! input, and repeatability.

// `expect` is idiomatic in test code for failing fast on precondition violations.
#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use std::path::PathBuf;

use camino::Utf8PathBuf;
use department_stats::synthetic::generate_users;
use department_stats::{AggregationResult, UserRecord, aggregate, load_users, summarize};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

/// Test world holding the input records and aggregation outputs.
#[derive(Default, ScenarioState)]
struct World {
    records: Slot<Vec<UserRecord>>,
    result: Slot<AggregationResult>,
    second_result: Slot<AggregationResult>,
}

impl World {
    fn records(&self) -> Vec<UserRecord> {
        self.records.get().expect("records should be set")
    }

    fn result(&self) -> AggregationResult {
        self.result.get().expect("aggregation should have run")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

fn fixture_path() -> Utf8PathBuf {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("users_page.json");
    Utf8PathBuf::from_path_buf(path).expect("fixture path should be UTF-8")
}

fn split_names(names: &str) -> Vec<String> {
    names.split(',').map(str::to_owned).collect()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("the five-user directory page")]
fn the_five_user_directory_page(world: &World) {
    let records = load_users(&fixture_path()).expect("fixture should load");
    world.records.set(records);
}

#[given("an empty directory page")]
fn an_empty_directory_page(world: &World) {
    world.records.set(Vec::new());
}

#[given("{count:usize} synthetic users from seed {seed:u64}")]
fn synthetic_users_from_seed(world: &World, count: usize, seed: u64) {
    world.records.set(generate_users(seed, count));
}

// ============================================================================
// When steps
// ============================================================================

#[when("the users are aggregated")]
fn the_users_are_aggregated(world: &World) {
    world.result.set(aggregate(&world.records()));
}

#[when("the users are aggregated twice")]
fn the_users_are_aggregated_twice(world: &World) {
    let records = world.records();
    world.result.set(aggregate(&records));
    world.second_result.set(aggregate(&records));
}

// ============================================================================
// Then steps
// ============================================================================

#[then("the {department} department has {males:u64} males and {females:u64} females")]
fn the_department_has_gender_counts(world: &World, department: String, males: u64, females: u64) {
    let result = world.result();
    let stats = result.get(&department).expect("department should exist");
    assert_eq!(stats.male_count(), males);
    assert_eq!(stats.female_count(), females);
}

#[then("the {department} age range is {range}")]
fn the_age_range_is(world: &World, department: String, range: String) {
    let result = world.result();
    let stats = result.get(&department).expect("department should exist");
    assert_eq!(stats.age_range().to_string(), range);
}

#[then("the {department} address book lists {names}")]
fn the_address_book_lists(world: &World, department: String, names: String) {
    let result = world.result();
    let stats = result.get(&department).expect("department should exist");
    let mut actual: Vec<String> = stats.address_by_full_name().keys().cloned().collect();
    let mut expected = split_names(&names);
    expected.sort_unstable();
    actual.sort_unstable();
    assert_eq!(actual, expected);
}

#[then("the summary counts {departments:usize} departments and {users:u64} users")]
fn the_summary_counts_departments_and_users(world: &World, departments: usize, users: u64) {
    let summary = summarize(&world.result());
    assert_eq!(summary.department_count, departments);
    assert_eq!(summary.total_users, users);
}

#[then("the summary counts {colours:usize} unique hair colours")]
fn the_summary_counts_unique_hair_colours(world: &World, colours: usize) {
    assert_eq!(summarize(&world.result()).unique_hair_color_count, colours);
}

#[then("the summary lists departments {names}")]
fn the_summary_lists_departments(world: &World, names: String) {
    assert_eq!(
        summarize(&world.result()).department_names,
        split_names(&names)
    );
}

#[then("no department contains {full_name}")]
fn no_department_contains(world: &World, full_name: String) {
    for (department, stats) in world.result().iter() {
        assert!(
            !stats.address_by_full_name().contains_key(&full_name),
            "{full_name} unexpectedly listed under {department}"
        );
    }
}

#[then("the aggregation is empty")]
fn the_aggregation_is_empty(world: &World) {
    assert!(world.result().is_empty());
}

#[then("both aggregations are identical")]
fn both_aggregations_are_identical(world: &World) {
    let second = world
        .second_result
        .get()
        .expect("second aggregation should be set");
    assert_eq!(world.result(), second);
}

// ============================================================================
// Scenario bindings
// ============================================================================

#[scenario(
    path = "tests/features/department_stats.feature",
    name = "Five users across two departments"
)]
fn five_users_across_two_departments(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/department_stats.feature",
    name = "Records without a department are dropped"
)]
fn records_without_a_department_are_dropped(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/department_stats.feature",
    name = "No users yields an empty report"
)]
fn no_users_yields_an_empty_report(world: World) {
    let _ = world;
}

#[scenario(
    path = "tests/features/department_stats.feature",
    name = "Aggregation is repeatable"
)]
fn aggregation_is_repeatable(world: World) {
    let _ = world;
}
