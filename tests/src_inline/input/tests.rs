use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::axes::parse_axes;
use super::catalog_file::parse_catalog;
use super::companies::parse_companies;
use super::*;
use crate::model::metric::Direction;
use crate::model::modes::{ImputationMode, NormalizationMode, ZScale};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("scatterscore_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap();
}

const DATASET: &str = r#"[
  {"company_id": 7, "company_name": "Northgate Gold", "status": "producer",
   "financials": {"cash_value": 120.5}},
  {"id": "A-2", "name": "Ridge Metals"},
  {"company_name": "No Id Corp"},
  "not an object"
]"#;

#[test]
fn test_parse_companies_reads_ids_names_and_status() {
    let universe = parse_companies(serde_json::from_str(DATASET).unwrap()).unwrap();
    assert_eq!(universe.len(), 2);

    let first = &universe.companies()[0];
    assert_eq!(first.id, "7");
    assert_eq!(first.name, "Northgate Gold");
    assert_eq!(first.status.as_deref(), Some("producer"));
    assert_eq!(first.data["financials"]["cash_value"], 120.5);

    let second = &universe.companies()[1];
    assert_eq!(second.id, "A-2");
    assert_eq!(second.name, "Ridge Metals");
    assert_eq!(second.status, None);
}

#[test]
fn test_parse_companies_accepts_wrapped_object() {
    let wrapped = serde_json::json!({"companies": [{"id": 1}], "fetched_at": "2024-01-01"});
    let universe = parse_companies(wrapped).unwrap();
    assert_eq!(universe.len(), 1);
    assert_eq!(universe.companies()[0].name, "1");

    assert!(matches!(
        parse_companies(serde_json::json!({"rows": []})),
        Err(InputError::InvalidInput(_))
    ));
    assert!(matches!(
        parse_companies(serde_json::json!(3)),
        Err(InputError::InvalidInput(_))
    ));
}

#[test]
fn test_load_companies_plain_and_gz() {
    let dir = make_temp_dir();
    let plain = dir.join("companies.json");
    let gz = dir.join("companies.json.gz");
    fs::write(&plain, DATASET).unwrap();
    write_gz(&gz, DATASET);

    let a = load_companies(&plain).unwrap();
    let b = load_companies(&gz).unwrap();
    assert_eq!(a.companies(), b.companies());
    assert_ne!(a.generation(), b.generation());
}

#[test]
fn test_missing_and_malformed_files() {
    let dir = make_temp_dir();
    assert!(matches!(
        load_companies(&dir.join("absent.json")),
        Err(InputError::MissingInput(_))
    ));

    let broken = dir.join("broken.json");
    fs::write(&broken, "[{").unwrap();
    assert!(matches!(load_companies(&broken), Err(InputError::Parse(_))));
}

#[test]
fn test_parse_axes_normalizes_weights_and_reads_modes() {
    let config = parse_axes(
        r#"{
          "x": [
            {"key": "financials.cash_value", "weight": 3, "required": true},
            {"key": "financials.debt_value", "weight": 1, "higher_is_better": true, "category": "leverage"}
          ],
          "y": [{"key": "production.reserve_life_years", "weight": 0}],
          "z_metric": "financials.market_cap_value",
          "z_scale": "log",
          "normalization": "rank-percentile",
          "imputation": "zero-worst"
        }"#,
    )
    .unwrap();

    assert_eq!(config.x.get("financials.cash_value").unwrap().weight, 75.0);
    assert!(config.x.get("financials.cash_value").unwrap().required);
    let debt = config.x.get("financials.debt_value").unwrap();
    assert_eq!(debt.weight, 25.0);
    assert_eq!(debt.direction, Direction::HigherIsBetter);
    assert_eq!(debt.category.as_deref(), Some("leverage"));
    assert_eq!(config.y.selections[0].weight, 100.0);
    assert_eq!(config.z_metric.as_deref(), Some("financials.market_cap_value"));
    assert_eq!(config.z_scale, ZScale::Log);
    assert_eq!(config.normalization, NormalizationMode::RankPercentile);
    assert_eq!(config.imputation, ImputationMode::ZeroWorst);
    assert_eq!(config.template_id, None);
}

#[test]
fn test_parse_axes_defaults_and_rejections() {
    let config = parse_axes(r#"{"x": [{"key": "a.b", "weight": 10}]}"#).unwrap();
    assert!(config.y.is_empty());
    assert_eq!(config.normalization, NormalizationMode::MinMax);
    assert_eq!(config.imputation, ImputationMode::Exclude);

    assert!(matches!(
        parse_axes(r#"{"x": [{"key": "a.b", "weight": 1}, {"key": "a.b", "weight": 2}]}"#),
        Err(InputError::InvalidInput(_))
    ));
    assert!(matches!(
        parse_axes(r#"{"x": [{"key": " ", "weight": 1}]}"#),
        Err(InputError::InvalidInput(_))
    ));
    assert!(matches!(
        parse_axes(r#"{"w": []}"#),
        Err(InputError::Parse(_))
    ));
}

#[test]
fn test_parse_catalog_with_custom_path() {
    let catalog = parse_catalog(
        r#"[
          {"key": "cash", "label": "Cash", "higher_is_better": true, "path": "financials.cash_value", "unit": "USD"},
          {"key": "debt", "label": "Debt", "higher_is_better": false},
          {"key": "cash", "label": "Cash again", "higher_is_better": false}
        ]"#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    let cash = catalog.resolve("cash").unwrap();
    assert_eq!(cash.path, vec!["financials", "cash_value"]);
    assert_eq!(cash.unit.as_deref(), Some("USD"));
    assert!(cash.higher_is_better);
    assert_eq!(catalog.resolve("debt").unwrap().path, vec!["debt"]);

    assert!(matches!(
        parse_catalog(r#"[{"key": "", "label": "x", "higher_is_better": true}]"#),
        Err(InputError::InvalidInput(_))
    ));
    assert!(matches!(parse_catalog("[]"), Err(InputError::InvalidInput(_))));
    assert!(matches!(
        parse_catalog(r#"[{"key": "k", "label": "x"}]"#),
        Err(InputError::Parse(_))
    ));
}

#[test]
fn test_load_catalog_from_gz_file() {
    let dir = make_temp_dir();
    let path = dir.join("catalog.json.gz");
    write_gz(
        &path,
        r#"[{"key": "m.one", "label": "One", "higher_is_better": true}]"#,
    );
    let catalog = load_catalog(&path).unwrap();
    assert!(catalog.contains("m.one"));
}

#[test]
fn test_load_axes_from_gz_file_keeps_required_flag() {
    let dir = make_temp_dir();
    let path = dir.join("axes.json.gz");
    write_gz(
        &path,
        r#"{"x": [{"key": "m.one", "weight": 1, "required": true}, {"key": "m.two", "weight": 1}]}"#,
    );
    let config = load_axes(&path).unwrap();
    assert!(config.x.get("m.one").unwrap().required);
    assert!(!config.x.get("m.two").unwrap().required);
    assert_eq!(config.x.weight_total(), 100.0);

    let broken = dir.join("axes.json");
    fs::write(&broken, r#"{"x": [{"key": "m.one"}]}"#).unwrap();
    assert!(matches!(load_axes(&broken), Err(InputError::Parse(_))));
}
