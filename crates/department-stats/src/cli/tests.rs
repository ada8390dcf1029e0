//! Unit tests for report settings and rendering.

use std::ffi::OsString;
use std::path::PathBuf;

use env_lock::lock_env;
use ortho_config::OrthoConfig;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::error::SourceError;
use crate::source::{DEFAULT_LIMIT, PageWindow};

const ENV_KEYS: [&str; 6] = [
    "DEPARTMENT_STATS_INPUT",
    "DEPARTMENT_STATS_LIMIT",
    "DEPARTMENT_STATS_SKIP",
    "DEPARTMENT_STATS_VIEW",
    "DEPARTMENT_STATS_GENERATE",
    "DEPARTMENT_STATS_RNG_SEED",
];

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("users_page.json")
}

#[fixture]
fn settings() -> ReportSettings {
    ReportSettings {
        input: Some(fixture_path()),
        limit: None,
        skip: 0,
        view: None,
        generate: None,
        rng_seed: None,
    }
}

fn render_json(settings: &ReportSettings) -> Value {
    let report = run_report(settings).expect("report should render");
    serde_json::from_str(&report).expect("report should be JSON")
}

#[rstest]
fn default_values_are_used_when_missing() {
    let _guard = lock_env(ENV_KEYS.map(|key| (key, None::<String>)));

    let loaded = ReportSettings::load_from_iter([OsString::from("department-stats")])
        .expect("config should load");

    assert!(loaded.input.is_none());
    assert_eq!(loaded.skip, 0);
    assert_eq!(loaded.window(), PageWindow::new(DEFAULT_LIMIT, 0));
    assert_eq!(loaded.view(), Ok(ReportView::Departments));
    assert_eq!(loaded.input(), Err(CliError::MissingInput));
}

#[rstest]
fn environment_overrides_are_respected() {
    let _guard = lock_env([
        ("DEPARTMENT_STATS_INPUT", None::<String>),
        ("DEPARTMENT_STATS_LIMIT", Some("25".to_owned())),
        ("DEPARTMENT_STATS_SKIP", Some("5".to_owned())),
        ("DEPARTMENT_STATS_VIEW", Some("full".to_owned())),
        ("DEPARTMENT_STATS_GENERATE", Some("300".to_owned())),
        ("DEPARTMENT_STATS_RNG_SEED", Some("9".to_owned())),
    ]);

    let loaded = ReportSettings::load_from_iter([OsString::from("department-stats")])
        .expect("config should load");

    assert_eq!(loaded.window(), PageWindow::new(25, 5));
    assert_eq!(loaded.view(), Ok(ReportView::Full));
    assert_eq!(
        loaded.input(),
        Ok(RecordInput::Synthetic {
            count: 300,
            seed: 9
        })
    );
}

#[rstest]
fn zero_limit_falls_back_to_default(mut settings: ReportSettings) {
    settings.limit = Some(0);
    assert_eq!(settings.window().limit(), DEFAULT_LIMIT);
}

#[rstest]
fn conflicting_inputs_are_rejected(mut settings: ReportSettings) {
    settings.generate = Some(10);
    assert_eq!(run_report(&settings), Err(CliError::ConflictingInput));
}

#[rstest]
#[case("departments", ReportView::Departments)]
#[case("summary", ReportView::Summary)]
#[case(" full ", ReportView::Full)]
fn view_names_parse(mut settings: ReportSettings, #[case] raw: &str, #[case] expected: ReportView) {
    settings.view = Some(raw.to_owned());
    assert_eq!(settings.view(), Ok(expected));
    assert_eq!(expected.to_string(), raw.trim());
}

#[rstest]
fn unknown_view_is_rejected(mut settings: ReportSettings) {
    settings.view = Some("totals".to_owned());
    assert_eq!(
        run_report(&settings),
        Err(CliError::View(ParseReportViewError {
            value: "totals".to_owned()
        }))
    );
}

#[rstest]
fn departments_view_matches_wire_shape(settings: ReportSettings) {
    assert_eq!(
        render_json(&settings),
        json!({
            "Engineering": {
                "male": 2,
                "female": 1,
                "ageRange": "25-40",
                "hair": { "Brown": 2, "Blond": 1 },
                "addressUser": {
                    "JohnDoe": "12345",
                    "JaneSmith": "67890",
                    "CharlieBrown": "33333"
                }
            },
            "Marketing": {
                "male": 1,
                "female": 1,
                "ageRange": "28-35",
                "hair": { "Black": 1, "Brown": 1 },
                "addressUser": { "BobJohnson": "11111", "AliceWilson": "22222" }
            }
        })
    );
}

#[rstest]
fn summary_view_totals_fixture(mut settings: ReportSettings) {
    settings.view = Some("summary".to_owned());
    assert_eq!(
        render_json(&settings),
        json!({
            "departmentCount": 2,
            "totalUsers": 5,
            "totalMales": 3,
            "totalFemales": 2,
            "uniqueHairColorCount": 3,
            "departmentNames": ["Engineering", "Marketing"]
        })
    );
}

#[rstest]
fn window_restricts_aggregated_records(mut settings: ReportSettings) {
    settings.view = Some("full".to_owned());
    settings.limit = Some(2);
    settings.skip = 2;

    let report = render_json(&settings);

    assert_eq!(report["summary"]["departmentNames"], json!(["Marketing"]));
    assert_eq!(report["departments"]["Marketing"]["ageRange"], json!("28-35"));
}

#[rstest]
fn missing_file_surfaces_source_error(mut settings: ReportSettings) {
    settings.input = Some(PathBuf::from("definitely/not/here.json"));
    assert!(matches!(
        run_report(&settings),
        Err(CliError::Source(SourceError::Read { .. }))
    ));
}

#[test]
fn synthetic_input_is_deterministic() {
    let input = RecordInput::Synthetic {
        count: 40,
        seed: DEFAULT_SEED,
    };
    let first = load_records(&input).expect("synthetic records");
    let second = load_records(&input).expect("synthetic records");
    assert_eq!(first.len(), 40);
    assert_eq!(first, second);
}

#[test]
fn empty_result_renders_as_empty_object() {
    let rendered = render(ReportView::Departments, &AggregationResult::default())
        .expect("render empty result");
    assert_eq!(rendered, "{}");
}

#[rstest]
#[case::long_help(&["department-stats", "--help"], Some(EarlyExit::Help))]
#[case::short_help(&["department-stats", "--view", "full", "-h"], Some(EarlyExit::Help))]
#[case::long_version(&["department-stats", "--version"], Some(EarlyExit::Version))]
#[case::short_version(&["department-stats", "-V"], Some(EarlyExit::Version))]
#[case::after_separator(&["department-stats", "--", "--help"], None)]
#[case::program_name_only(&["--help"], None)]
#[case::ordinary_flags(&["department-stats", "--generate", "10"], None)]
fn help_and_version_are_detected(#[case] args: &[&str], #[case] expected: Option<EarlyExit>) {
    assert_eq!(early_exit(args), expected);
}

#[rstest]
#[case("--input")]
#[case("--generate")]
#[case("--rng-seed")]
#[case("--limit")]
#[case("--skip")]
#[case("--view")]
#[case("DEPARTMENT_STATS_")]
fn usage_describes_every_option(#[case] needle: &str) {
    assert!(
        EarlyExit::Help.text().contains(needle),
        "usage should mention {needle}"
    );
}

#[test]
fn version_names_the_package() {
    assert_eq!(
        EarlyExit::Version.text(),
        format!("department-stats {}", env!("CARGO_PKG_VERSION"))
    );
}
