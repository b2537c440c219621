use crate::report::{PointsDocument, SummaryData};

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(data)?;
    out.push('\n');
    Ok(out)
}

pub fn render_points_json(doc: &PointsDocument<'_>) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}
