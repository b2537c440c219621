use crate::model::selection::{AxisConfig, AxisMetricSelection};

pub const WEIGHT_BUDGET: f64 = 100.0;

/// An interactive change to one selection's weight.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightEdit {
    Set { key: String, weight: f64 },
    /// `selection.weight` is the requested weight of the new entry.
    Add { selection: AxisMetricSelection },
}

pub fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Rebalances weights onto the 100 budget.
///
/// Without an edit every weight is scaled proportionally. With an edit the
/// edited entry is pinned (clamped to [0, 100]) and the remainder is shared by
/// the other entries in their prior proportions. Weights come back as whole
/// numbers; the rounding residual lands on the largest redistributable entry,
/// first in list order on ties, and on the pinned entry only when nothing else
/// can absorb it.
pub fn normalize_weights(
    selections: &[AxisMetricSelection],
    edit: Option<&WeightEdit>,
) -> Vec<AxisMetricSelection> {
    let mut out = selections.to_vec();
    for s in &mut out {
        s.weight = sanitize_weight(s.weight);
    }

    let pinned = match edit {
        None => None,
        Some(WeightEdit::Set { key, weight }) => match out.iter().position(|s| &s.key == key) {
            Some(idx) => {
                out[idx].weight = sanitize_weight(*weight);
                Some(idx)
            }
            None => {
                tracing::warn!(key = %key, "weight edit for a metric not on the axis; rebalancing only");
                None
            }
        },
        Some(WeightEdit::Add { selection }) => {
            let weight = sanitize_weight(selection.weight);
            match out.iter().position(|s| s.key == selection.key) {
                Some(idx) => {
                    out[idx].weight = weight;
                    Some(idx)
                }
                None => {
                    let mut added = selection.clone();
                    added.weight = weight;
                    out.push(added);
                    Some(out.len() - 1)
                }
            }
        }
    };

    if out.is_empty() {
        return out;
    }

    match pinned {
        None => {
            let all = (0..out.len()).collect::<Vec<_>>();
            share_budget(&mut out, &all, WEIGHT_BUDGET);
        }
        Some(idx) => {
            let fixed = out[idx].weight.min(WEIGHT_BUDGET);
            out[idx].weight = fixed;
            let others = (0..out.len()).filter(|&i| i != idx).collect::<Vec<_>>();
            share_budget(&mut out, &others, WEIGHT_BUDGET - fixed);
        }
    }

    round_to_budget(&mut out, pinned);
    out
}

pub fn normalize_axis(axis: &AxisConfig, edit: Option<&WeightEdit>) -> AxisConfig {
    AxisConfig::new(normalize_weights(&axis.selections, edit))
}

/// True for an empty axis or whole weights in [0, 100] summing to exactly 100.
pub fn weights_balanced(axis: &AxisConfig) -> bool {
    if axis.is_empty() {
        return true;
    }
    let in_range = axis
        .selections
        .iter()
        .all(|s| s.weight.is_finite() && (0.0..=WEIGHT_BUDGET).contains(&s.weight));
    in_range && (axis.weight_total() - WEIGHT_BUDGET).abs() < 1e-9
}

fn share_budget(out: &mut [AxisMetricSelection], indices: &[usize], budget: f64) {
    if indices.is_empty() {
        return;
    }
    let total: f64 = indices.iter().map(|&i| out[i].weight).sum();
    if total > 0.0 {
        for &i in indices {
            out[i].weight = out[i].weight * budget / total;
        }
    } else {
        let share = budget / indices.len() as f64;
        for &i in indices {
            out[i].weight = share;
        }
    }
}

fn round_to_budget(out: &mut [AxisMetricSelection], pinned: Option<usize>) {
    let budget = WEIGHT_BUDGET as i64;
    let mut sum = 0i64;
    for s in out.iter_mut() {
        s.weight = s.weight.round();
        sum += s.weight as i64;
    }
    let mut residual = budget - sum;
    if residual == 0 {
        return;
    }

    // Largest first, list order on ties; the pinned entry only as a last resort.
    let mut order = (0..out.len())
        .filter(|&i| Some(i) != pinned)
        .collect::<Vec<_>>();
    order.sort_by(|&a, &b| out[b].weight.total_cmp(&out[a].weight));
    order.extend(pinned);

    for idx in order {
        if residual == 0 {
            break;
        }
        let current = out[idx].weight as i64;
        let adjusted = (current + residual).clamp(0, budget);
        residual -= adjusted - current;
        out[idx].weight = adjusted as f64;
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_weights.rs"]
mod tests;
