use std::path::Path;

use serde::Deserialize;

use crate::input::{InputError, read_text};
use crate::model::config::ScoringConfig;
use crate::model::metric::Direction;
use crate::model::modes::{ImputationMode, NormalizationMode, ZScale};
use crate::model::selection::{AxisConfig, AxisMetricSelection};
use crate::pipeline::stage1_weights::normalize_axis;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AxesFile {
    #[serde(default)]
    x: Vec<AxisEntry>,
    #[serde(default)]
    y: Vec<AxisEntry>,
    #[serde(default)]
    z_metric: Option<String>,
    #[serde(default)]
    z_scale: ZScale,
    #[serde(default)]
    normalization: NormalizationMode,
    #[serde(default)]
    imputation: ImputationMode,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AxisEntry {
    key: String,
    weight: f64,
    #[serde(default)]
    higher_is_better: Option<bool>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    category: Option<String>,
}

pub fn load_axes(path: &Path) -> Result<ScoringConfig, InputError> {
    let config = parse_axes(&read_text(path)?)?;
    tracing::info!(
        path = %path.display(),
        x_metrics = config.x.len(),
        y_metrics = config.y.len(),
        "loaded axis configuration"
    );
    Ok(config)
}

pub fn parse_axes(text: &str) -> Result<ScoringConfig, InputError> {
    config_from_file(serde_json::from_str(text)?)
}

fn config_from_file(file: AxesFile) -> Result<ScoringConfig, InputError> {
    Ok(ScoringConfig {
        x: axis_from_entries(file.x)?,
        y: axis_from_entries(file.y)?,
        z_metric: file.z_metric.filter(|k| !k.trim().is_empty()),
        z_scale: file.z_scale,
        normalization: file.normalization,
        imputation: file.imputation,
        template_id: None,
    })
}

/// Weights are rebalanced onto the 100 budget on load.
fn axis_from_entries(entries: Vec<AxisEntry>) -> Result<AxisConfig, InputError> {
    let mut selections = Vec::with_capacity(entries.len());
    for entry in entries {
        let key = entry.key.trim();
        if key.is_empty() {
            return Err(InputError::InvalidInput(
                "axis selection with an empty key".to_string(),
            ));
        }
        if selections.iter().any(|s: &AxisMetricSelection| s.key == key) {
            return Err(InputError::InvalidInput(format!(
                "metric {key} selected twice on one axis"
            )));
        }
        let mut selection = AxisMetricSelection::new(key, entry.weight)
            .with_direction(Direction::from_flag(entry.higher_is_better));
        if entry.required {
            selection = selection.required();
        }
        selection.category = entry.category;
        selections.push(selection);
    }
    Ok(normalize_axis(&AxisConfig::new(selections), None))
}
