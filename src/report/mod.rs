pub mod json;
pub mod text;

use serde::Serialize;

use crate::model::points::ScorePoint;

/// Distribution of one axis's valid composite scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSummary {
    pub axis: &'static str,
    pub valid: usize,
    pub median: Option<f64>,
    pub p10: Option<f64>,
    pub p90: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub key: String,
    pub label: String,
    pub higher_is_better: bool,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub pass_id: u64,
    pub template_id: Option<String>,
    pub normalization: &'static str,
    pub imputation: &'static str,
    pub z_metric: Option<String>,
    pub z_scale: &'static str,
    pub universe_size: usize,
    pub plottable: usize,
    pub axes: Vec<AxisSummary>,
    pub metrics: Vec<MetricSummary>,
    pub warnings: Vec<String>,
}

/// One axis selection as the chart sees it: label resolved, direction final.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSelection {
    pub key: String,
    pub label: String,
    pub weight: f64,
    pub higher_is_better: bool,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartZ {
    pub key: String,
    pub label: String,
    pub scale: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub template_id: Option<String>,
    pub normalization: &'static str,
    pub imputation: &'static str,
    pub x: Vec<ChartSelection>,
    pub y: Vec<ChartSelection>,
    pub z: Option<ChartZ>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PointsDocument<'a> {
    pub pass_id: u64,
    pub config: ChartConfig,
    pub points: Vec<&'a ScorePoint>,
}

pub fn format_score(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_finite() => format!("{:.6}", v),
        _ => "NA".to_string(),
    }
}

/// Nearest-rank quantile, rounding the index up. `None` for empty input.
pub fn quantile_indexed(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let idx = ((sorted.len() - 1) as f64 * p).ceil() as usize;
    sorted.get(idx).copied()
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> Option<f64> {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> Option<f64> {
    quantile_indexed(values, 0.90)
}

pub fn axis_summary(axis: &'static str, scores: &[f64]) -> AxisSummary {
    AxisSummary {
        axis,
        valid: scores.len(),
        median: median(scores),
        p10: p10(scores),
        p90: p90(scores),
    }
}
