use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::catalog::MetricCatalog;
use crate::model::points::ScorePoint;
use crate::model::selection::{Axis, AxisConfig};
use crate::pipeline::stage4_apply::ScoringPass;
use crate::report::json::{render_points_json, render_summary_json};
use crate::report::text::render_report_text;
use crate::report::{
    ChartConfig, ChartSelection, ChartZ, MetricSummary, PointsDocument, SummaryData,
    axis_summary, format_score,
};

pub const TOOL_NAME: &str = "scatterscore";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage5Inputs<'a> {
    pub pass: &'a ScoringPass,
    pub catalog: &'a MetricCatalog,
    pub include_invalid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportPaths {
    pub points: PathBuf,
    pub scores: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

pub fn write_reports(
    inputs: &Stage5Inputs<'_>,
    out_dir: &Path,
) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(out_dir)?;
    let paths = ReportPaths {
        points: out_dir.join("points.json"),
        scores: out_dir.join("scores.tsv"),
        summary: out_dir.join("summary.json"),
        report: out_dir.join("report.txt"),
    };

    let doc = build_points_document(inputs);
    write_text(&paths.points, &render_points_json(&doc)?)?;

    write_scores_tsv(&inputs.pass.output.points, &paths.scores)?;

    let summary = build_summary(inputs.pass, inputs.catalog);
    write_text(&paths.summary, &render_summary_json(&summary)?)?;
    write_text(&paths.report, &render_report_text(&summary))?;

    tracing::info!(
        out_dir = %out_dir.display(),
        points = doc.points.len(),
        "wrote reports"
    );
    Ok(paths)
}

pub fn build_points_document<'a>(inputs: &Stage5Inputs<'a>) -> PointsDocument<'a> {
    let pass = inputs.pass;
    let points = pass
        .output
        .points
        .iter()
        .filter(|p| inputs.include_invalid || p.is_plottable())
        .collect();
    PointsDocument {
        pass_id: pass.pass_id,
        config: build_chart_config(pass, inputs.catalog),
        points,
    }
}

/// Axis selections with catalog labels and final directionality. Keys the
/// catalog does not know were skipped during scoring and are left out here.
pub fn build_chart_config(pass: &ScoringPass, catalog: &MetricCatalog) -> ChartConfig {
    let config = &pass.config;
    let z = config.z_metric.as_deref().and_then(|key| {
        catalog.resolve(key).map(|d| ChartZ {
            key: d.key.clone(),
            label: d.label.clone(),
            scale: config.z_scale.as_str(),
            unit: d.unit.clone(),
        })
    });
    ChartConfig {
        template_id: config.template_id.clone(),
        normalization: config.normalization.as_str(),
        imputation: config.imputation.as_str(),
        x: chart_axis(config.axis(Axis::X), catalog),
        y: chart_axis(config.axis(Axis::Y), catalog),
        z,
    }
}

fn chart_axis(axis: &AxisConfig, catalog: &MetricCatalog) -> Vec<ChartSelection> {
    axis.selections
        .iter()
        .filter_map(|s| {
            let d = catalog.resolve(&s.key)?;
            Some(ChartSelection {
                key: s.key.clone(),
                label: d.label.clone(),
                weight: s.weight,
                higher_is_better: s.direction.resolve(d.higher_is_better),
                required: s.required,
                category: s.category.clone().or_else(|| d.category.clone()),
                unit: d.unit.clone(),
            })
        })
        .collect()
}

pub fn build_summary(pass: &ScoringPass, catalog: &MetricCatalog) -> SummaryData {
    let config = &pass.config;
    let points = &pass.output.points;
    let x_scores = points.iter().filter_map(|p| p.x_score).collect::<Vec<_>>();
    let y_scores = points.iter().filter_map(|p| p.y_score).collect::<Vec<_>>();

    let metrics = pass
        .metric_stats
        .iter()
        .map(|s| {
            let descriptor = catalog.resolve(&s.key);
            MetricSummary {
                key: s.key.clone(),
                label: descriptor.map_or_else(|| s.key.clone(), |d| d.label.clone()),
                higher_is_better: effective_direction(
                    pass,
                    &s.key,
                    descriptor.map(|d| d.higher_is_better),
                ),
                count: s.count,
                min: s.min,
                max: s.max,
                mean: s.mean,
                median: s.median,
                std_dev: s.std_dev,
            }
        })
        .collect();

    SummaryData {
        tool: TOOL_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        pass_id: pass.pass_id,
        template_id: config.template_id.clone(),
        normalization: config.normalization.as_str(),
        imputation: config.imputation.as_str(),
        z_metric: config.z_metric.clone(),
        z_scale: config.z_scale.as_str(),
        universe_size: pass.universe_size,
        plottable: pass.output.plottable().count(),
        axes: vec![axis_summary("x", &x_scores), axis_summary("y", &y_scores)],
        metrics,
        warnings: pass.output.warnings.iter().map(|w| w.to_string()).collect(),
    }
}

/// First selection of `key` decides, x axis before y.
fn effective_direction(pass: &ScoringPass, key: &str, catalog_default: Option<bool>) -> bool {
    let default = catalog_default.unwrap_or(true);
    pass.config
        .x
        .get(key)
        .or_else(|| pass.config.y.get(key))
        .map_or(default, |s| s.direction.resolve(default))
}

fn write_scores_tsv(points: &[ScorePoint], path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    let header = [
        "company_id",
        "name",
        "status",
        "x_score",
        "y_score",
        "z_value",
        "x_metrics_used",
        "y_metrics_used",
        "plottable",
    ]
    .join("\t");
    writeln!(w, "{}", header)?;

    let mut order = (0..points.len()).collect::<Vec<_>>();
    order.sort_by(|&a, &b| match points[a].company_id.cmp(&points[b].company_id) {
        std::cmp::Ordering::Equal => a.cmp(&b),
        other => other,
    });

    for idx in order {
        let p = &points[idx];
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            tsv_field(&p.company_id),
            tsv_field(&p.name),
            p.status.as_deref().map_or_else(|| "NA".to_string(), tsv_field),
            format_score(p.x_score),
            format_score(p.y_score),
            format_score(p.z_value),
            p.x_metrics_used,
            p.y_metrics_used,
            p.is_plottable()
        )?;
    }
    w.flush()
}

fn tsv_field(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
