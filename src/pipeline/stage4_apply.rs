use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use thiserror::Error;

use crate::catalog::MetricCatalog;
use crate::model::company::CompanyUniverse;
use crate::model::config::ScoringConfig;
use crate::model::points::ScoreOutput;
use crate::model::selection::Axis;
use crate::model::stats::DatasetStatistics;
use crate::pipeline::stage1_weights::weights_balanced;
use crate::pipeline::stage2_stats::StatsCache;
use crate::pipeline::stage3_scores::{Stage3Inputs, run_stage3};

#[derive(Debug, Error, PartialEq)]
pub enum ApplyError {
    #[error("no metrics selected on either axis")]
    NoMetrics,
    #[error("{axis} axis weights sum to {total}, expected 100")]
    WeightBudget { axis: Axis, total: f64 },
}

/// Rejects configurations that cannot be scored.
pub fn validate_config(config: &ScoringConfig) -> Result<(), ApplyError> {
    if config.x.is_empty() && config.y.is_empty() {
        return Err(ApplyError::NoMetrics);
    }
    for axis in [Axis::X, Axis::Y] {
        let selections = config.axis(axis);
        if !weights_balanced(selections) {
            return Err(ApplyError::WeightBudget {
                axis,
                total: selections.weight_total(),
            });
        }
    }
    Ok(())
}

/// Handle for one started pass. Only the most recently started ticket
/// sharing the same counter is current.
#[derive(Debug, Clone)]
pub struct PassTicket {
    id: u64,
    latest: Arc<AtomicU64>,
}

impl PassTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.id
    }
}

/// A finished computation and the inputs that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringPass {
    pub pass_id: u64,
    pub universe_size: usize,
    pub config: ScoringConfig,
    pub output: ScoreOutput,
    /// Statistics of every axis metric, in axis order.
    pub metric_stats: Vec<DatasetStatistics>,
}

/// Owns the catalog and statistics cache across Apply calls and keeps the
/// latest published pass.
#[derive(Debug)]
pub struct ScoringSession {
    catalog: MetricCatalog,
    cache: StatsCache,
    latest: Arc<AtomicU64>,
    published: Option<ScoringPass>,
}

impl ScoringSession {
    pub fn new(catalog: MetricCatalog) -> Self {
        Self::with_counter(catalog, Arc::new(AtomicU64::new(0)))
    }

    /// Sessions built on the same counter supersede each other's passes.
    pub fn with_counter(catalog: MetricCatalog, latest: Arc<AtomicU64>) -> Self {
        Self {
            catalog,
            cache: StatsCache::new(),
            latest,
            published: None,
        }
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    pub fn latest(&self) -> Option<&ScoringPass> {
        self.published.as_ref()
    }

    pub fn begin(&self) -> PassTicket {
        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        PassTicket {
            id,
            latest: Arc::clone(&self.latest),
        }
    }

    pub fn compute(
        &mut self,
        ticket: &PassTicket,
        universe: &CompanyUniverse,
        config: &ScoringConfig,
    ) -> ScoringPass {
        let inputs = Stage3Inputs {
            universe,
            config,
            catalog: &self.catalog,
        };
        let output = run_stage3(&inputs, &mut self.cache);

        let mut seen = BTreeSet::new();
        let metric_stats = config
            .x
            .selections
            .iter()
            .chain(config.y.selections.iter())
            .filter(|s| seen.insert(s.key.as_str()))
            .filter_map(|s| self.cache.get(&s.key).cloned())
            .collect();

        ScoringPass {
            pass_id: ticket.id(),
            universe_size: universe.len(),
            config: config.clone(),
            output,
            metric_stats,
        }
    }

    /// Stores `pass` unless a newer pass has started. Returns whether it was kept.
    pub fn publish(&mut self, ticket: &PassTicket, pass: ScoringPass) -> bool {
        if !ticket.is_current() {
            tracing::debug!(
                pass_id = ticket.id(),
                latest = self.latest.load(Ordering::Acquire),
                "pass superseded; discarding output"
            );
            return false;
        }
        self.published = Some(pass);
        true
    }

    /// Validate, score and publish. `Ok(None)` means a newer pass started
    /// while this one was computing.
    pub fn apply(
        &mut self,
        universe: &CompanyUniverse,
        config: &ScoringConfig,
    ) -> Result<Option<&ScoringPass>, ApplyError> {
        validate_config(config)?;
        let ticket = self.begin();
        tracing::info!(
            pass_id = ticket.id(),
            companies = universe.len(),
            normalization = config.normalization.as_str(),
            imputation = config.imputation.as_str(),
            "applying scoring configuration"
        );
        let pass = self.compute(&ticket, universe, config);
        if self.publish(&ticket, pass) {
            Ok(self.published.as_ref())
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_apply.rs"]
mod tests;
