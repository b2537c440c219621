pub mod defs;
pub mod loader;

use thiserror::Error;

use crate::model::selection::Axis;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template {template}: {axis} axis metric {key} is not in the catalog")]
    UnknownMetric {
        template: String,
        axis: Axis,
        key: String,
    },

    #[error("template {template}: z metric {key} is not in the catalog")]
    UnknownZMetric { template: String, key: String },

    #[error("template {template}: {axis} axis has {found} metrics, needs at least {required}")]
    TooFewMetrics {
        template: String,
        axis: Axis,
        found: usize,
        required: usize,
    },

    #[error("template {template}: {axis} axis has {found} metrics, shows at most {max}")]
    TooManyMetrics {
        template: String,
        axis: Axis,
        found: usize,
        max: usize,
    },

    #[error("template {template}: required {axis} axis metric {key} has zero weight")]
    RequiredMetricZeroWeight {
        template: String,
        axis: Axis,
        key: String,
    },

    #[error("template {template}: {axis} axis weights sum to {total}, expected 100")]
    WeightBudget {
        template: String,
        axis: Axis,
        total: f64,
    },
}
