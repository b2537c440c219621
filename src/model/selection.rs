use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::metric::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("x"),
            Axis::Y => f.write_str("y"),
        }
    }
}

/// One metric chosen for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisMetricSelection {
    pub key: String,
    pub weight: f64,
    #[serde(default)]
    pub direction: Direction,
    /// Checked by template validation only; scoring still tolerates a missing value.
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl AxisMetricSelection {
    pub fn new(key: &str, weight: f64) -> Self {
        Self {
            key: key.to_string(),
            weight,
            direction: Direction::CatalogDefault,
            required: false,
            category: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisConfig {
    pub selections: Vec<AxisMetricSelection>,
}

impl AxisConfig {
    pub fn new(selections: Vec<AxisMetricSelection>) -> Self {
        Self { selections }
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn get(&self, key: &str) -> Option<&AxisMetricSelection> {
        self.selections.iter().find(|s| s.key == key)
    }

    pub fn weight_total(&self) -> f64 {
        self.selections.iter().map(|s| s.weight).sum()
    }
}
