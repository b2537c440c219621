use crate::model::metric::Direction;
use crate::model::modes::{ImputationMode, NormalizationMode, ZScale};

#[derive(Debug, Clone, Copy)]
pub struct TemplateMetricDef {
    pub key: &'static str,
    pub weight: f64,
    pub direction: Direction,
    pub required: bool,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct TemplateDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub x_metrics: &'static [TemplateMetricDef],
    pub y_metrics: &'static [TemplateMetricDef],
    pub z_metric_key: Option<&'static str>,
    pub z_scale: ZScale,
    pub default_normalization: NormalizationMode,
    pub default_imputation: ImputationMode,
    pub min_metrics_required: usize,
    pub max_metrics_to_show: usize,
}

const fn metric(
    key: &'static str,
    weight: f64,
    required: bool,
    category: &'static str,
) -> TemplateMetricDef {
    TemplateMetricDef {
        key,
        weight,
        direction: Direction::CatalogDefault,
        required,
        category,
    }
}

const VALUE_HUNTER_X: &[TemplateMetricDef] = &[
    metric("valuation_metrics.ev_per_resource_oz_all", 40.0, true, "valuation"),
    metric("valuation_metrics.mkt_cap_per_resource_oz_all", 30.0, false, "valuation"),
    metric("financials.price_to_book", 30.0, false, "valuation"),
];
const VALUE_HUNTER_Y: &[TemplateMetricDef] = &[
    metric("mineral_estimates.resources_total_aueq_moz", 50.0, true, "scale"),
    metric("mineral_estimates.measured_indicated_total_aueq_moz", 30.0, false, "scale"),
    metric("mineral_estimates.reserves_total_aueq_moz", 20.0, false, "scale"),
];

const PRODUCER_QUALITY_X: &[TemplateMetricDef] = &[
    metric("costs.aisc_last_year", 50.0, true, "costs"),
    metric("costs.aisc_future", 30.0, false, "costs"),
    metric("costs.tco_current", 20.0, false, "costs"),
];
const PRODUCER_QUALITY_Y: &[TemplateMetricDef] = &[
    metric("production.current_production_total_aueq_koz", 40.0, true, "output"),
    metric("production.future_production_total_aueq_koz", 30.0, false, "output"),
    metric("production.reserve_life_years", 30.0, false, "longevity"),
];

const DEVELOPER_PIPELINE_X: &[TemplateMetricDef] = &[
    metric("production.future_production_total_aueq_koz", 40.0, true, "growth"),
    metric("costs.construction_costs", 30.0, false, "capex"),
    metric("mineral_estimates.reserves_total_aueq_moz", 30.0, false, "scale"),
];
const DEVELOPER_PIPELINE_Y: &[TemplateMetricDef] = &[
    metric("financials.cash_value", 40.0, true, "funding"),
    metric("financials.net_financial_assets", 30.0, false, "funding"),
    metric("financials.debt_value", 30.0, false, "leverage"),
];

const EXPLORER_UPSIDE_X: &[TemplateMetricDef] = &[
    metric("mineral_estimates.potential_total_aueq_moz", 50.0, true, "discovery"),
    metric("mineral_estimates.resources_total_aueq_moz", 30.0, false, "scale"),
    metric("mineral_estimates.measured_indicated_total_aueq_moz", 20.0, false, "confidence"),
];
const EXPLORER_UPSIDE_Y: &[TemplateMetricDef] = &[
    metric("financials.cash_value", 50.0, true, "runway"),
    metric("capital_structure.fully_diluted_shares", 25.0, false, "dilution"),
    metric("valuation_metrics.mkt_cap_per_resource_oz_all", 25.0, false, "valuation"),
];

const BALANCE_SHEET_X: &[TemplateMetricDef] = &[
    metric("financials.cash_value", 30.0, true, "liquidity"),
    metric("financials.debt_value", 30.0, true, "leverage"),
    metric("financials.net_financial_assets", 20.0, false, "liquidity"),
    metric("financials.liabilities", 20.0, false, "leverage"),
];
const BALANCE_SHEET_Y: &[TemplateMetricDef] = &[
    metric("financials.free_cash_flow", 40.0, true, "cash generation"),
    metric("financials.ebitda", 30.0, false, "profitability"),
    metric("financials.net_income_value", 30.0, false, "profitability"),
];

const BUILTIN_TEMPLATES: &[TemplateDef] = &[
    TemplateDef {
        id: "value-hunter",
        name: "Value Hunter",
        description: "Cheap ounces in the ground versus the size of the resource base.",
        x_metrics: VALUE_HUNTER_X,
        y_metrics: VALUE_HUNTER_Y,
        z_metric_key: Some("financials.market_cap_value"),
        z_scale: ZScale::Log,
        default_normalization: NormalizationMode::RankPercentile,
        default_imputation: ImputationMode::Median,
        min_metrics_required: 1,
        max_metrics_to_show: 6,
    },
    TemplateDef {
        id: "producer-quality",
        name: "Producer Quality",
        description: "Cost position against production scale and mine life.",
        x_metrics: PRODUCER_QUALITY_X,
        y_metrics: PRODUCER_QUALITY_Y,
        z_metric_key: Some("financials.revenue_value"),
        z_scale: ZScale::Log,
        default_normalization: NormalizationMode::MinMax,
        default_imputation: ImputationMode::Mean,
        min_metrics_required: 2,
        max_metrics_to_show: 6,
    },
    TemplateDef {
        id: "developer-pipeline",
        name: "Developer Pipeline",
        description: "Growth pipeline and build cost against funding capacity.",
        x_metrics: DEVELOPER_PIPELINE_X,
        y_metrics: DEVELOPER_PIPELINE_Y,
        z_metric_key: Some("financials.enterprise_value_value"),
        z_scale: ZScale::Log,
        default_normalization: NormalizationMode::MinMax,
        default_imputation: ImputationMode::Exclude,
        min_metrics_required: 2,
        max_metrics_to_show: 6,
    },
    TemplateDef {
        id: "explorer-upside",
        name: "Explorer Upside",
        description: "Discovery potential against cash runway and dilution.",
        x_metrics: EXPLORER_UPSIDE_X,
        y_metrics: EXPLORER_UPSIDE_Y,
        z_metric_key: Some("financials.market_cap_value"),
        z_scale: ZScale::Log,
        default_normalization: NormalizationMode::MeanCentered,
        default_imputation: ImputationMode::ZeroWorst,
        min_metrics_required: 2,
        max_metrics_to_show: 5,
    },
    TemplateDef {
        id: "balance-sheet-strength",
        name: "Balance Sheet Strength",
        description: "Liquidity and leverage against cash generation.",
        x_metrics: BALANCE_SHEET_X,
        y_metrics: BALANCE_SHEET_Y,
        z_metric_key: Some("financials.market_cap_value"),
        z_scale: ZScale::Linear,
        default_normalization: NormalizationMode::RankPercentile,
        default_imputation: ImputationMode::Exclude,
        min_metrics_required: 2,
        max_metrics_to_show: 8,
    },
];

pub fn builtin_templates() -> &'static [TemplateDef] {
    BUILTIN_TEMPLATES
}

pub const DEFAULT_TEMPLATE_ID: &str = "value-hunter";
