pub mod defs;

use std::collections::BTreeMap;

use serde_json::Value;

use crate::catalog::defs::builtin_metrics;
use crate::model::metric::MetricDescriptor;

/// Immutable key → descriptor lookup, kept in load order for listings.
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    descriptors: Vec<MetricDescriptor>,
    by_key: BTreeMap<String, usize>,
}

impl MetricCatalog {
    pub fn builtin() -> Self {
        let descriptors = builtin_metrics()
            .iter()
            .map(|def| {
                let mut d = MetricDescriptor::new(def.key, def.label, def.higher_is_better);
                d.unit = Some(def.unit.to_string());
                d.category = Some(def.group.as_str().to_string());
                d
            })
            .collect();
        Self::from_descriptors(descriptors)
    }

    /// Duplicate keys keep the first definition.
    pub fn from_descriptors(descriptors: Vec<MetricDescriptor>) -> Self {
        let mut kept = Vec::with_capacity(descriptors.len());
        let mut by_key = BTreeMap::new();
        for descriptor in descriptors {
            if by_key.contains_key(&descriptor.key) {
                tracing::warn!(key = %descriptor.key, "duplicate metric key in catalog; keeping first");
                continue;
            }
            by_key.insert(descriptor.key.clone(), kept.len());
            kept.push(descriptor);
        }
        Self {
            descriptors: kept,
            by_key,
        }
    }

    pub fn resolve(&self, key: &str) -> Option<&MetricDescriptor> {
        self.by_key.get(key).map(|&idx| &self.descriptors[idx])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn descriptors(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Walks `descriptor.path` through nested objects and casts the leaf to a
/// finite number. Anything else is absent.
pub fn extract_value(descriptor: &MetricDescriptor, record: &Value) -> Option<f64> {
    let mut node = record;
    for segment in &descriptor.path {
        node = node.as_object()?.get(segment)?;
    }
    numeric_value(node)
}

pub fn numeric_value(value: &Value) -> Option<f64> {
    let v = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric_str(s)?,
        _ => return None,
    };
    v.is_finite().then_some(v)
}

fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    cleaned.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "../../tests/src_inline/catalog/tests.rs"]
mod tests;
