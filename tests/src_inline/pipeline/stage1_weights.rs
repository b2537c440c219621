use super::*;

fn axis(weights: &[(&str, f64)]) -> Vec<AxisMetricSelection> {
    weights
        .iter()
        .map(|(k, w)| AxisMetricSelection::new(k, *w))
        .collect()
}

fn weights_of(selections: &[AxisMetricSelection]) -> Vec<f64> {
    selections.iter().map(|s| s.weight).collect()
}

fn total(selections: &[AxisMetricSelection]) -> f64 {
    selections.iter().map(|s| s.weight).sum()
}

#[test]
fn test_empty_stays_empty() {
    assert!(normalize_weights(&[], None).is_empty());
    let edit = WeightEdit::Set {
        key: "a".to_string(),
        weight: 40.0,
    };
    assert!(normalize_weights(&[], Some(&edit)).is_empty());
}

#[test]
fn test_proportional_scaling() {
    let out = normalize_weights(&axis(&[("a", 1.0), ("b", 1.0), ("c", 2.0)]), None);
    assert_eq!(weights_of(&out), vec![25.0, 25.0, 50.0]);
}

#[test]
fn test_zero_sum_distributes_equally_residual_to_first() {
    let out = normalize_weights(&axis(&[("a", 0.0), ("b", 0.0), ("c", 0.0)]), None);
    assert_eq!(weights_of(&out), vec![34.0, 33.0, 33.0]);
}

#[test]
fn test_equal_weights_tie_break_first_in_order() {
    let out = normalize_weights(&axis(&[("a", 10.0), ("b", 10.0), ("c", 10.0)]), None);
    assert_eq!(weights_of(&out), vec![34.0, 33.0, 33.0]);
}

#[test]
fn test_single_metric_always_100() {
    let out = normalize_weights(&axis(&[("a", 7.0)]), None);
    assert_eq!(weights_of(&out), vec![100.0]);

    let edit = WeightEdit::Set {
        key: "a".to_string(),
        weight: 30.0,
    };
    let out = normalize_weights(&axis(&[("a", 7.0)]), Some(&edit));
    assert_eq!(weights_of(&out), vec![100.0]);
}

#[test]
fn test_set_edit_preserves_other_proportions() {
    let edit = WeightEdit::Set {
        key: "a".to_string(),
        weight: 80.0,
    };
    let out = normalize_weights(
        &axis(&[("a", 50.0), ("b", 30.0), ("c", 20.0)]),
        Some(&edit),
    );
    assert_eq!(weights_of(&out), vec![80.0, 12.0, 8.0]);
}

#[test]
fn test_set_edit_others_zero_split_equally() {
    let edit = WeightEdit::Set {
        key: "a".to_string(),
        weight: 40.0,
    };
    let out = normalize_weights(&axis(&[("a", 100.0), ("b", 0.0), ("c", 0.0)]), Some(&edit));
    assert_eq!(weights_of(&out), vec![40.0, 30.0, 30.0]);
}

#[test]
fn test_set_edit_clamps_and_sanitizes() {
    let over = WeightEdit::Set {
        key: "a".to_string(),
        weight: 150.0,
    };
    let out = normalize_weights(&axis(&[("a", 50.0), ("b", 50.0)]), Some(&over));
    assert_eq!(weights_of(&out), vec![100.0, 0.0]);

    let negative = WeightEdit::Set {
        key: "a".to_string(),
        weight: -5.0,
    };
    let out = normalize_weights(
        &axis(&[("a", 50.0), ("b", 30.0), ("c", 20.0)]),
        Some(&negative),
    );
    assert_eq!(weights_of(&out), vec![0.0, 60.0, 40.0]);

    let nan = WeightEdit::Set {
        key: "b".to_string(),
        weight: f64::NAN,
    };
    let out = normalize_weights(&axis(&[("a", 50.0), ("b", 50.0)]), Some(&nan));
    assert_eq!(weights_of(&out), vec![100.0, 0.0]);
}

#[test]
fn test_edited_weight_kept_residual_goes_to_others() {
    let edit = WeightEdit::Set {
        key: "a".to_string(),
        weight: 33.0,
    };
    let out = normalize_weights(&axis(&[("a", 1.0), ("b", 1.0), ("c", 1.0)]), Some(&edit));
    assert_eq!(out[0].weight, 33.0);
    assert_eq!(weights_of(&out), vec![33.0, 33.0, 34.0]);
    assert_eq!(total(&out), 100.0);
}

#[test]
fn test_add_new_metric_pins_its_weight() {
    let edit = WeightEdit::Add {
        selection: AxisMetricSelection::new("c", 20.0),
    };
    let out = normalize_weights(&axis(&[("a", 60.0), ("b", 40.0)]), Some(&edit));
    assert_eq!(out.len(), 3);
    assert_eq!(out[2].key, "c");
    assert_eq!(weights_of(&out), vec![48.0, 32.0, 20.0]);
}

#[test]
fn test_add_existing_metric_acts_as_set() {
    let edit = WeightEdit::Add {
        selection: AxisMetricSelection::new("a", 20.0),
    };
    let out = normalize_weights(&axis(&[("a", 60.0), ("b", 40.0)]), Some(&edit));
    assert_eq!(out.len(), 2);
    assert_eq!(weights_of(&out), vec![20.0, 80.0]);
}

#[test]
fn test_unknown_set_key_only_rebalances() {
    let edit = WeightEdit::Set {
        key: "zz".to_string(),
        weight: 90.0,
    };
    let out = normalize_weights(&axis(&[("a", 30.0), ("b", 10.0)]), Some(&edit));
    assert_eq!(weights_of(&out), vec![75.0, 25.0]);
}

#[test]
fn test_removal_redistributes_proportionally() {
    let before = axis(&[("a", 50.0), ("b", 30.0), ("c", 20.0)]);
    let remaining = before
        .into_iter()
        .filter(|s| s.key != "b")
        .collect::<Vec<_>>();
    let out = normalize_weights(&remaining, None);
    assert_eq!(weights_of(&out), vec![71.0, 29.0]);
}

#[test]
fn test_sum_and_bounds_hold_for_many_inputs() {
    let mut seed = 0x2545_f491_4f6c_dd1du64;
    let mut next = || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    for _ in 0..500 {
        let n = (next() % 9 + 1) as usize;
        let entries = (0..n)
            .map(|i| {
                let raw = (next() % 2000) as f64 / 10.0 - 20.0;
                AxisMetricSelection::new(&format!("m{i}"), raw)
            })
            .collect::<Vec<_>>();
        let edit = if next() % 2 == 0 {
            Some(WeightEdit::Set {
                key: format!("m{}", next() as usize % n),
                weight: (next() % 1200) as f64 / 10.0 - 10.0,
            })
        } else {
            None
        };
        let out = normalize_weights(&entries, edit.as_ref());
        assert_eq!(total(&out), 100.0, "{:?} -> {:?}", entries, out);
        for s in &out {
            assert!(s.weight >= 0.0 && s.weight <= 100.0);
            assert_eq!(s.weight, s.weight.round());
        }
    }
}

#[test]
fn test_weights_balanced() {
    assert!(weights_balanced(&AxisConfig::default()));
    assert!(weights_balanced(&AxisConfig::new(axis(&[("a", 60.0), ("b", 40.0)]))));
    assert!(!weights_balanced(&AxisConfig::new(axis(&[("a", 60.0), ("b", 30.0)]))));
    assert!(!weights_balanced(&AxisConfig::new(axis(&[("a", 120.0), ("b", -20.0)]))));
}

#[test]
fn test_normalize_axis_wraps_selections() {
    let config = AxisConfig::new(axis(&[("a", 3.0), ("b", 1.0)]));
    let out = normalize_axis(&config, None);
    assert_eq!(weights_of(&out.selections), vec![75.0, 25.0]);
    assert!(weights_balanced(&out));
}
