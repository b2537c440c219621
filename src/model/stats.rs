use serde::Serialize;

/// Midpoint returned whenever a metric's spread is degenerate.
pub const MIDPOINT_SCORE: f64 = 50.0;

/// Summary of one metric's present values across one company universe.
///
/// With zero present values every statistic is NaN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStatistics {
    pub key: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    #[serde(skip)]
    pub sorted: Vec<f64>,
}

impl DatasetStatistics {
    pub fn has_values(&self) -> bool {
        self.count > 0
    }

    /// One present value, or all present values equal.
    pub fn is_degenerate(&self) -> bool {
        self.count <= 1 || self.max == self.min
    }

    /// Position of `value` among the sorted present values on a 0-100 scale.
    ///
    /// Equal values share their average position; a value absent from the set
    /// sits halfway between its neighbours.
    pub fn percentile_rank(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return MIDPOINT_SCORE;
        }
        let below = self.sorted.partition_point(|&v| v < value);
        let through = self.sorted.partition_point(|&v| v <= value);
        let equal = through - below;
        let position = if equal > 0 {
            below as f64 + (equal - 1) as f64 / 2.0
        } else {
            below as f64 - 0.5
        };
        let last = (self.count - 1) as f64;
        (position.clamp(0.0, last) / last * 100.0).clamp(0.0, 100.0)
    }
}
