use std::collections::BTreeMap;

use crate::catalog::extract_value;
use crate::model::company::CompanyUniverse;
use crate::model::metric::MetricDescriptor;
use crate::model::stats::DatasetStatistics;

/// Per-metric statistics memoized for one universe generation.
#[derive(Debug, Default)]
pub struct StatsCache {
    generation: Option<u64>,
    entries: BTreeMap<String, DatasetStatistics>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats_for(
        &mut self,
        descriptor: &MetricDescriptor,
        universe: &CompanyUniverse,
    ) -> &DatasetStatistics {
        if self.generation != Some(universe.generation()) {
            if !self.is_empty() {
                tracing::debug!(
                    previous = ?self.generation,
                    current = universe.generation(),
                    "company universe changed; dropping cached statistics"
                );
            }
            self.entries.clear();
            self.generation = Some(universe.generation());
        }
        self.entries
            .entry(descriptor.key.clone())
            .or_insert_with(|| compute_statistics(descriptor, universe))
    }

    pub fn get(&self, key: &str) -> Option<&DatasetStatistics> {
        self.entries.get(key)
    }

    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn compute_statistics(
    descriptor: &MetricDescriptor,
    universe: &CompanyUniverse,
) -> DatasetStatistics {
    let values = universe
        .companies()
        .iter()
        .filter_map(|c| extract_value(descriptor, &c.data))
        .collect::<Vec<_>>();
    statistics_from_values(&descriptor.key, values)
}

pub fn statistics_from_values(key: &str, mut values: Vec<f64>) -> DatasetStatistics {
    values.retain(|v| v.is_finite());
    values.sort_by(f64::total_cmp);

    let count = values.len();
    if count == 0 {
        return DatasetStatistics {
            key: key.to_string(),
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            median: f64::NAN,
            std_dev: f64::NAN,
            sorted: values,
        };
    }

    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let median = if count % 2 == 0 {
        (values[count / 2 - 1] + values[count / 2]) / 2.0
    } else {
        values[count / 2]
    };

    DatasetStatistics {
        key: key.to_string(),
        count,
        min: values[0],
        max: values[count - 1],
        mean,
        median,
        std_dev: variance.sqrt(),
        sorted: values,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_stats.rs"]
mod tests;
