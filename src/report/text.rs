use crate::report::{AxisSummary, SummaryData, format_score};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Scatter Score Report\n");
    out.push_str("====================\n\n");

    out.push_str("1. Configuration\n");
    out.push_str(&format!("Pass: {}\n", data.pass_id));
    out.push_str(&format!(
        "Template: {}\n",
        data.template_id.as_deref().unwrap_or("custom")
    ));
    out.push_str(&format!("Normalization: {}\n", data.normalization));
    out.push_str(&format!("Imputation: {}\n", data.imputation));
    match &data.z_metric {
        Some(key) => out.push_str(&format!(
            "Bubble size: {} ({} scale)\n",
            key, data.z_scale
        )),
        None => out.push_str("Bubble size: none\n"),
    }
    out.push('\n');

    out.push_str("2. Coverage\n");
    out.push_str(&format!("Companies: {}\n", data.universe_size));
    out.push_str(&format!("Plottable: {}\n", data.plottable));
    out.push_str(&format!(
        "Excluded: {}\n\n",
        data.universe_size.saturating_sub(data.plottable)
    ));

    out.push_str("3. Axis scores\n");
    for axis in &data.axes {
        out.push_str(&axis_line(axis));
    }
    out.push('\n');

    out.push_str("4. Metrics\n");
    for m in &data.metrics {
        out.push_str(&format!(
            "{} [{}]: present {}, median {}\n",
            m.label,
            if m.higher_is_better { "higher is better" } else { "lower is better" },
            m.count,
            format_score(Some(m.median))
        ));
    }
    out.push('\n');

    out.push_str("5. Warnings\n");
    if data.warnings.is_empty() {
        out.push_str("None\n");
    } else {
        for w in &data.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

fn axis_line(axis: &AxisSummary) -> String {
    if axis.valid == 0 {
        return format!("{}: no valid scores\n", axis.axis.to_uppercase());
    }
    format!(
        "{}: valid {}, median {}, p10 {}, p90 {}\n",
        axis.axis.to_uppercase(),
        axis.valid,
        format_score(axis.median),
        format_score(axis.p10),
        format_score(axis.p90)
    )
}
