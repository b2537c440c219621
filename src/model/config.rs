use serde::{Deserialize, Serialize};

use crate::model::metric::Direction;
use crate::model::modes::{ImputationMode, NormalizationMode, ZScale};
use crate::model::selection::{Axis, AxisConfig, AxisMetricSelection};
use crate::pipeline::stage1_weights::{WeightEdit, normalize_axis};

/// Everything one scoring pass needs besides the data.
///
/// Values are never edited in place: each transition returns a new config
/// with the affected axis rebalanced onto the 100 budget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub x: AxisConfig,
    pub y: AxisConfig,
    pub z_metric: Option<String>,
    pub z_scale: ZScale,
    pub normalization: NormalizationMode,
    pub imputation: ImputationMode,
    pub template_id: Option<String>,
}

impl ScoringConfig {
    pub fn axis(&self, axis: Axis) -> &AxisConfig {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn with_metric_added(&self, axis: Axis, selection: AxisMetricSelection) -> Self {
        let edit = WeightEdit::Add { selection };
        self.replace_axis(axis, normalize_axis(self.axis(axis), Some(&edit)))
    }

    pub fn with_metric_removed(&self, axis: Axis, key: &str) -> Self {
        let remaining = self
            .axis(axis)
            .selections
            .iter()
            .filter(|s| s.key != key)
            .cloned()
            .collect::<Vec<_>>();
        self.replace_axis(axis, normalize_axis(&AxisConfig::new(remaining), None))
    }

    pub fn with_weight(&self, axis: Axis, key: &str, weight: f64) -> Self {
        let edit = WeightEdit::Set {
            key: key.to_string(),
            weight,
        };
        self.replace_axis(axis, normalize_axis(self.axis(axis), Some(&edit)))
    }

    pub fn with_direction(&self, axis: Axis, key: &str, direction: Direction) -> Self {
        let mut updated = self.axis(axis).clone();
        for s in &mut updated.selections {
            if s.key == key {
                s.direction = direction;
            }
        }
        self.replace_axis(axis, updated)
    }

    pub fn with_modes(&self, normalization: NormalizationMode, imputation: ImputationMode) -> Self {
        Self {
            normalization,
            imputation,
            ..self.clone()
        }
    }

    pub fn with_z_metric(&self, z_metric: Option<String>, z_scale: ZScale) -> Self {
        Self {
            z_metric,
            z_scale,
            ..self.clone()
        }
    }

    fn replace_axis(&self, axis: Axis, config: AxisConfig) -> Self {
        let mut next = self.clone();
        match axis {
            Axis::X => next.x = config,
            Axis::Y => next.y = config,
        }
        next
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/config.rs"]
mod tests;
