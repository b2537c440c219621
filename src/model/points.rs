use std::fmt;

use serde::Serialize;

use crate::model::selection::Axis;

/// One company's plot coordinates. A `None` score marks the axis invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub company_id: String,
    pub name: String,
    pub status: Option<String>,
    pub x_score: Option<f64>,
    pub y_score: Option<f64>,
    pub z_value: Option<f64>,
    pub x_metrics_used: u32,
    pub y_metrics_used: u32,
}

impl ScorePoint {
    pub fn is_plottable(&self) -> bool {
        matches!(
            (self.x_score, self.y_score),
            (Some(x), Some(y)) if x.is_finite() && y.is_finite()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScoreWarning {
    UnknownMetric { axis: Axis, key: String },
    UnknownZMetric { key: String },
    NoPresentValues { key: String },
}

impl fmt::Display for ScoreWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreWarning::UnknownMetric { axis, key } => {
                write!(f, "{axis} axis metric {key} is not in the catalog; skipped")
            }
            ScoreWarning::UnknownZMetric { key } => {
                write!(f, "z metric {key} is not in the catalog; z values omitted")
            }
            ScoreWarning::NoPresentValues { key } => {
                write!(f, "metric {key} has no present values in this universe")
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoreOutput {
    pub points: Vec<ScorePoint>,
    pub warnings: Vec<ScoreWarning>,
}

impl ScoreOutput {
    pub fn plottable(&self) -> impl Iterator<Item = &ScorePoint> {
        self.points.iter().filter(|p| p.is_plottable())
    }
}
