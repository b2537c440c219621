use std::collections::BTreeSet;

use crate::catalog::{MetricCatalog, extract_value};
use crate::model::company::{CompanyRecord, CompanyUniverse};
use crate::model::config::ScoringConfig;
use crate::model::metric::MetricDescriptor;
use crate::model::modes::{ImputationMode, NormalizationMode};
use crate::model::points::{ScoreOutput, ScorePoint, ScoreWarning};
use crate::model::selection::Axis;
use crate::model::stats::{DatasetStatistics, MIDPOINT_SCORE};
use crate::pipeline::stage2_stats::StatsCache;

/// Spread of the mean-centered scale: ±3 standard deviations cover 0-100.
const MEAN_CENTERED_SPAN_SD: f64 = 3.0;

#[derive(Debug, Clone)]
pub struct Stage3Inputs<'a> {
    pub universe: &'a CompanyUniverse,
    pub config: &'a ScoringConfig,
    pub catalog: &'a MetricCatalog,
}

struct AxisMetric<'a> {
    descriptor: &'a MetricDescriptor,
    weight: f64,
    higher_is_better: bool,
    stats: &'a DatasetStatistics,
}

pub fn run_stage3(inputs: &Stage3Inputs<'_>, cache: &mut StatsCache) -> ScoreOutput {
    let config = inputs.config;
    let mut warnings = Vec::new();

    let x_descriptors = resolve_axis(inputs.catalog, config, Axis::X, &mut warnings);
    let y_descriptors = resolve_axis(inputs.catalog, config, Axis::Y, &mut warnings);
    let z_descriptor = config.z_metric.as_deref().and_then(|key| {
        let resolved = inputs.catalog.resolve(key);
        if resolved.is_none() {
            tracing::warn!(key, "z metric not in catalog; z values omitted");
            warnings.push(ScoreWarning::UnknownZMetric {
                key: key.to_string(),
            });
        }
        resolved
    });

    if inputs.universe.is_empty() {
        return ScoreOutput {
            points: Vec::new(),
            warnings,
        };
    }

    let mut seen = BTreeSet::new();
    for (descriptor, _, _) in x_descriptors.iter().chain(y_descriptors.iter()) {
        let stats = cache.stats_for(descriptor, inputs.universe);
        if !stats.has_values() && seen.insert(descriptor.key.clone()) {
            tracing::warn!(key = %descriptor.key, "metric has no present values; imputation applies to every company");
            warnings.push(ScoreWarning::NoPresentValues {
                key: descriptor.key.clone(),
            });
        }
    }

    let cache: &StatsCache = cache;
    let x_metrics = bind_stats(&x_descriptors, cache);
    let y_metrics = bind_stats(&y_descriptors, cache);

    let mut points = Vec::with_capacity(inputs.universe.len());
    for record in inputs.universe.companies() {
        let (x_score, x_metrics_used) =
            score_axis(record, &x_metrics, config.normalization, config.imputation);
        let (y_score, y_metrics_used) =
            score_axis(record, &y_metrics, config.normalization, config.imputation);
        let z_value = z_descriptor.and_then(|d| extract_value(d, &record.data));
        points.push(ScorePoint {
            company_id: record.id.clone(),
            name: record.name.clone(),
            status: record.status.clone(),
            x_score,
            y_score,
            z_value,
            x_metrics_used,
            y_metrics_used,
        });
    }

    tracing::debug!(
        companies = points.len(),
        plottable = points.iter().filter(|p| p.is_plottable()).count(),
        "scored universe"
    );

    ScoreOutput { points, warnings }
}

fn resolve_axis<'a>(
    catalog: &'a MetricCatalog,
    config: &ScoringConfig,
    axis: Axis,
    warnings: &mut Vec<ScoreWarning>,
) -> Vec<(&'a MetricDescriptor, f64, bool)> {
    let mut out = Vec::new();
    for selection in &config.axis(axis).selections {
        match catalog.resolve(&selection.key) {
            Some(descriptor) => out.push((
                descriptor,
                selection.weight,
                selection.direction.resolve(descriptor.higher_is_better),
            )),
            None => {
                tracing::warn!(axis = %axis, key = %selection.key, "metric not in catalog; skipped");
                warnings.push(ScoreWarning::UnknownMetric {
                    axis,
                    key: selection.key.clone(),
                });
            }
        }
    }
    out
}

fn bind_stats<'a>(
    resolved: &[(&'a MetricDescriptor, f64, bool)],
    cache: &'a StatsCache,
) -> Vec<AxisMetric<'a>> {
    resolved
        .iter()
        .filter_map(|&(descriptor, weight, higher_is_better)| {
            cache.get(&descriptor.key).map(|stats| AxisMetric {
                descriptor,
                weight,
                higher_is_better,
                stats,
            })
        })
        .collect()
}

/// Weighted average over the metrics that produced a score for this company.
fn score_axis(
    record: &CompanyRecord,
    metrics: &[AxisMetric<'_>],
    mode: NormalizationMode,
    imputation: ImputationMode,
) -> (Option<f64>, u32) {
    let mut weighted = 0.0;
    let mut weight_used = 0.0;
    let mut used = 0u32;

    for metric in metrics {
        let score = match extract_value(metric.descriptor, &record.data) {
            Some(value) => Some(normalize_value(
                value,
                metric.stats,
                mode,
                metric.higher_is_better,
            )),
            None => impute_score(metric, mode, imputation),
        };
        if let Some(score) = score {
            weighted += score * metric.weight;
            weight_used += metric.weight;
            used += 1;
        }
    }

    if used == 0 || weight_used <= 0.0 {
        return (None, used);
    }
    let composite = weighted / weight_used;
    (composite.is_finite().then_some(composite), used)
}

fn impute_score(
    metric: &AxisMetric<'_>,
    mode: NormalizationMode,
    imputation: ImputationMode,
) -> Option<f64> {
    let substitute = match imputation {
        ImputationMode::Mean => metric.stats.mean,
        ImputationMode::Median => metric.stats.median,
        ImputationMode::ZeroWorst => return Some(0.0),
        ImputationMode::Exclude => return None,
    };
    if !metric.stats.has_values() || !substitute.is_finite() {
        return None;
    }
    Some(normalize_value(
        substitute,
        metric.stats,
        mode,
        metric.higher_is_better,
    ))
}

/// Maps a raw value onto 0-100 where 100 is best.
pub fn normalize_value(
    value: f64,
    stats: &DatasetStatistics,
    mode: NormalizationMode,
    higher_is_better: bool,
) -> f64 {
    let score = match mode {
        NormalizationMode::MinMax => {
            if stats.is_degenerate() {
                return MIDPOINT_SCORE;
            }
            let span = stats.max - stats.min;
            let ratio = if span.is_finite() {
                (value - stats.min) / span
            } else {
                // Spread beyond f64::MAX; halved terms keep the difference finite.
                (value / 2.0 - stats.min / 2.0) / (stats.max / 2.0 - stats.min / 2.0)
            };
            (ratio * 100.0).clamp(0.0, 100.0)
        }
        NormalizationMode::RankPercentile => {
            if stats.is_degenerate() {
                return MIDPOINT_SCORE;
            }
            stats.percentile_rank(value)
        }
        NormalizationMode::MeanCentered => {
            if stats.std_dev.is_nan() || stats.std_dev <= 0.0 {
                return MIDPOINT_SCORE;
            }
            let z = (value - stats.mean) / stats.std_dev;
            (50.0 + z * 50.0 / MEAN_CENTERED_SPAN_SD).clamp(0.0, 100.0)
        }
    };
    if higher_is_better { score } else { 100.0 - score }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_scores.rs"]
mod tests;
