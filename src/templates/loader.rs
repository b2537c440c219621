use crate::catalog::MetricCatalog;
use crate::model::config::ScoringConfig;
use crate::model::selection::{Axis, AxisConfig, AxisMetricSelection};
use crate::pipeline::stage1_weights::{normalize_axis, weights_balanced};
use crate::templates::TemplateError;
use crate::templates::defs::{TemplateDef, TemplateMetricDef, builtin_templates};

/// Case-insensitive id lookup over the built-in templates.
pub fn find_template(id: &str) -> Option<&'static TemplateDef> {
    let wanted = id.trim();
    builtin_templates()
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(wanted))
}

pub fn load_template(id: &str) -> Result<&'static TemplateDef, TemplateError> {
    find_template(id).ok_or_else(|| TemplateError::UnknownTemplate(id.to_string()))
}

/// Builds the scoring config a template describes, checked against `catalog`.
pub fn apply_template(
    template: &TemplateDef,
    catalog: &MetricCatalog,
) -> Result<ScoringConfig, TemplateError> {
    let x = build_axis(template, Axis::X, template.x_metrics, catalog)?;
    let y = build_axis(template, Axis::Y, template.y_metrics, catalog)?;

    if let Some(key) = template.z_metric_key {
        if !catalog.contains(key) {
            return Err(TemplateError::UnknownZMetric {
                template: template.id.to_string(),
                key: key.to_string(),
            });
        }
    }

    tracing::debug!(
        template = template.id,
        x_metrics = x.len(),
        y_metrics = y.len(),
        "applied template"
    );

    Ok(ScoringConfig {
        x,
        y,
        z_metric: template.z_metric_key.map(str::to_string),
        z_scale: template.z_scale,
        normalization: template.default_normalization,
        imputation: template.default_imputation,
        template_id: Some(template.id.to_string()),
    })
}

fn build_axis(
    template: &TemplateDef,
    axis: Axis,
    metrics: &[TemplateMetricDef],
    catalog: &MetricCatalog,
) -> Result<AxisConfig, TemplateError> {
    let name = || template.id.to_string();

    if metrics.len() < template.min_metrics_required {
        return Err(TemplateError::TooFewMetrics {
            template: name(),
            axis,
            found: metrics.len(),
            required: template.min_metrics_required,
        });
    }
    if metrics.len() > template.max_metrics_to_show {
        return Err(TemplateError::TooManyMetrics {
            template: name(),
            axis,
            found: metrics.len(),
            max: template.max_metrics_to_show,
        });
    }

    let mut selections = Vec::with_capacity(metrics.len());
    for m in metrics {
        if !catalog.contains(m.key) {
            return Err(TemplateError::UnknownMetric {
                template: name(),
                axis,
                key: m.key.to_string(),
            });
        }
        let selection = AxisMetricSelection::new(m.key, m.weight)
            .with_direction(m.direction)
            .with_category(m.category);
        selections.push(if m.required {
            selection.required()
        } else {
            selection
        });
    }

    let declared = AxisConfig::new(selections);
    if !weights_balanced(&declared) {
        return Err(TemplateError::WeightBudget {
            template: name(),
            axis,
            total: declared.weight_total(),
        });
    }
    let config = normalize_axis(&declared, None);
    if let Some(s) = config.selections.iter().find(|s| s.required && s.weight <= 0.0) {
        return Err(TemplateError::RequiredMetricZeroWeight {
            template: name(),
            axis,
            key: s.key.clone(),
        });
    }
    Ok(config)
}

#[cfg(test)]
#[path = "../../tests/src_inline/templates/loader.rs"]
mod tests;
