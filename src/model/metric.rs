use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDescriptor {
    pub key: String,
    pub label: String,
    /// Object keys walked from the record root; defaults to `key` split on `.`.
    pub path: Vec<String>,
    pub higher_is_better: bool,
    pub unit: Option<String>,
    pub category: Option<String>,
}

impl MetricDescriptor {
    pub fn new(key: &str, label: &str, higher_is_better: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            path: split_path(key),
            higher_is_better,
            unit: None,
            category: None,
        }
    }
}

pub fn split_path(key: &str) -> Vec<String> {
    key.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Directionality override layered over a catalog default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    #[default]
    CatalogDefault,
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => Direction::HigherIsBetter,
            Some(false) => Direction::LowerIsBetter,
            None => Direction::CatalogDefault,
        }
    }

    pub fn resolve(self, catalog_higher_is_better: bool) -> bool {
        match self {
            Direction::CatalogDefault => catalog_higher_is_better,
            Direction::HigherIsBetter => true,
            Direction::LowerIsBetter => false,
        }
    }
}
