use super::*;
use crate::model::metric::{Direction, MetricDescriptor};
use crate::model::modes::{ImputationMode, NormalizationMode, ZScale};
use crate::templates::defs::DEFAULT_TEMPLATE_ID;

const fn m(key: &'static str, weight: f64, required: bool) -> TemplateMetricDef {
    TemplateMetricDef {
        key,
        weight,
        direction: Direction::CatalogDefault,
        required,
        category: "test",
    }
}

const TWO: &[TemplateMetricDef] = &[m("a.one", 60.0, true), m("a.two", 40.0, false)];
const ONE: &[TemplateMetricDef] = &[m("a.one", 100.0, true)];
const UNBALANCED: &[TemplateMetricDef] = &[m("a.one", 60.0, false), m("a.two", 30.0, false)];
const REQUIRED_ZERO: &[TemplateMetricDef] = &[m("a.one", 100.0, false), m("a.two", 0.0, true)];
const UNKNOWN: &[TemplateMetricDef] = &[m("a.one", 50.0, false), m("a.ghost", 50.0, false)];

fn template(x: &'static [TemplateMetricDef], y: &'static [TemplateMetricDef]) -> TemplateDef {
    TemplateDef {
        id: "test-template",
        name: "Test",
        description: "",
        x_metrics: x,
        y_metrics: y,
        z_metric_key: Some("a.one"),
        z_scale: ZScale::Log,
        default_normalization: NormalizationMode::MeanCentered,
        default_imputation: ImputationMode::ZeroWorst,
        min_metrics_required: 2,
        max_metrics_to_show: 3,
    }
}

fn catalog() -> MetricCatalog {
    MetricCatalog::from_descriptors(vec![
        MetricDescriptor::new("a.one", "One", true),
        MetricDescriptor::new("a.two", "Two", false),
    ])
}

#[test]
fn test_every_builtin_template_applies_against_builtin_catalog() {
    let catalog = MetricCatalog::builtin();
    for def in builtin_templates() {
        let config = apply_template(def, &catalog)
            .unwrap_or_else(|e| panic!("{} failed: {e}", def.id));
        assert!(weights_balanced(&config.x), "{}", def.id);
        assert!(weights_balanced(&config.y), "{}", def.id);
        assert_eq!(config.template_id.as_deref(), Some(def.id));
        assert_eq!(config.normalization, def.default_normalization);
        assert_eq!(config.imputation, def.default_imputation);
    }
}

#[test]
fn test_find_template_is_case_insensitive() {
    assert_eq!(
        find_template("Value-Hunter").map(|t| t.id),
        Some(DEFAULT_TEMPLATE_ID)
    );
    assert_eq!(
        find_template("  EXPLORER-UPSIDE ").map(|t| t.id),
        Some("explorer-upside")
    );
    assert!(find_template("no-such-template").is_none());
    assert_eq!(
        load_template("nope").unwrap_err(),
        TemplateError::UnknownTemplate("nope".to_string())
    );
}

#[test]
fn test_apply_copies_modes_z_and_selection_flags() {
    let config = apply_template(&template(TWO, TWO), &catalog()).unwrap();
    assert_eq!(config.z_metric.as_deref(), Some("a.one"));
    assert_eq!(config.z_scale, ZScale::Log);
    assert_eq!(config.normalization, NormalizationMode::MeanCentered);
    assert_eq!(config.imputation, ImputationMode::ZeroWorst);

    let first = config.x.get("a.one").unwrap();
    assert_eq!(first.weight, 60.0);
    assert!(first.required);
    assert_eq!(first.category.as_deref(), Some("test"));
    assert!(!config.x.get("a.two").unwrap().required);
}

#[test]
fn test_too_few_metrics_rejected() {
    let err = apply_template(&template(TWO, ONE), &catalog()).unwrap_err();
    assert_eq!(
        err,
        TemplateError::TooFewMetrics {
            template: "test-template".to_string(),
            axis: Axis::Y,
            found: 1,
            required: 2,
        }
    );
}

#[test]
fn test_too_many_metrics_rejected() {
    let mut def = template(TWO, TWO);
    def.max_metrics_to_show = 1;
    def.min_metrics_required = 1;
    assert!(matches!(
        apply_template(&def, &catalog()),
        Err(TemplateError::TooManyMetrics { axis: Axis::X, found: 2, max: 1, .. })
    ));
}

#[test]
fn test_unknown_axis_metric_rejected() {
    let err = apply_template(&template(TWO, UNKNOWN), &catalog()).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnknownMetric {
            template: "test-template".to_string(),
            axis: Axis::Y,
            key: "a.ghost".to_string(),
        }
    );
    assert!(err.to_string().contains("a.ghost"));
}

#[test]
fn test_unknown_z_metric_rejected() {
    let mut def = template(TWO, TWO);
    def.z_metric_key = Some("a.ghost");
    assert!(matches!(
        apply_template(&def, &catalog()),
        Err(TemplateError::UnknownZMetric { .. })
    ));

    def.z_metric_key = None;
    assert_eq!(apply_template(&def, &catalog()).unwrap().z_metric, None);
}

#[test]
fn test_declared_weights_must_sum_to_budget() {
    match apply_template(&template(UNBALANCED, TWO), &catalog()) {
        Err(TemplateError::WeightBudget { axis, total, .. }) => {
            assert_eq!(axis, Axis::X);
            assert_eq!(total, 90.0);
        }
        other => panic!("expected weight budget error, got {other:?}"),
    }
}

#[test]
fn test_required_metric_with_zero_weight_rejected() {
    assert!(matches!(
        apply_template(&template(TWO, REQUIRED_ZERO), &catalog()),
        Err(TemplateError::RequiredMetricZeroWeight { axis: Axis::Y, .. })
    ));
}
