#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricGroup {
    Financials,
    CapitalStructure,
    MineralEstimates,
    Production,
    Costs,
    Valuation,
}

impl MetricGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricGroup::Financials => "Financials",
            MetricGroup::CapitalStructure => "Capital Structure",
            MetricGroup::MineralEstimates => "Mineral Estimates",
            MetricGroup::Production => "Production",
            MetricGroup::Costs => "Costs",
            MetricGroup::Valuation => "Valuation",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    pub key: &'static str,
    pub label: &'static str,
    pub group: MetricGroup,
    pub higher_is_better: bool,
    pub unit: &'static str,
}

const fn def(
    key: &'static str,
    label: &'static str,
    group: MetricGroup,
    higher_is_better: bool,
    unit: &'static str,
) -> MetricDef {
    MetricDef {
        key,
        label,
        group,
        higher_is_better,
        unit,
    }
}

use MetricGroup::{CapitalStructure, Costs, Financials, MineralEstimates, Production, Valuation};

const BUILTIN_METRICS: &[MetricDef] = &[
    def("financials.market_cap_value", "Market Cap", Financials, true, "USD"),
    def("financials.enterprise_value_value", "Enterprise Value", Financials, true, "USD"),
    def("financials.cash_value", "Cash", Financials, true, "USD"),
    def("financials.debt_value", "Debt", Financials, false, "USD"),
    def("financials.net_financial_assets", "Net Financial Assets", Financials, true, "USD"),
    def("financials.liabilities", "Liabilities", Financials, false, "USD"),
    def("financials.free_cash_flow", "Free Cash Flow", Financials, true, "USD"),
    def("financials.revenue_value", "Revenue", Financials, true, "USD"),
    def("financials.ebitda", "EBITDA", Financials, true, "USD"),
    def("financials.net_income_value", "Net Income", Financials, true, "USD"),
    def("financials.price_to_book", "Price / Book", Financials, false, "x"),
    def("financials.price_to_sales", "Price / Sales", Financials, false, "x"),
    def("financials.enterprise_to_ebitda", "EV / EBITDA", Financials, false, "x"),
    def("financials.trailing_pe", "Trailing P/E", Financials, false, "x"),
    def("capital_structure.existing_shares", "Shares Outstanding", CapitalStructure, false, "shares"),
    def("capital_structure.fully_diluted_shares", "Fully Diluted Shares", CapitalStructure, false, "shares"),
    def("capital_structure.in_the_money_options", "In-the-Money Options", CapitalStructure, false, "shares"),
    def("capital_structure.options_revenue", "Options Revenue", CapitalStructure, true, "USD"),
    def("mineral_estimates.reserves_total_aueq_moz", "Reserves (AuEq)", MineralEstimates, true, "moz"),
    def("mineral_estimates.measured_indicated_total_aueq_moz", "M&I Resources (AuEq)", MineralEstimates, true, "moz"),
    def("mineral_estimates.resources_total_aueq_moz", "Total Resources (AuEq)", MineralEstimates, true, "moz"),
    def("mineral_estimates.potential_total_aueq_moz", "Potential (AuEq)", MineralEstimates, true, "moz"),
    def("mineral_estimates.reserves_precious_aueq_moz", "Precious Reserves (AuEq)", MineralEstimates, true, "moz"),
    def("production.current_production_total_aueq_koz", "Current Production (AuEq)", Production, true, "koz"),
    def("production.future_production_total_aueq_koz", "Future Production (AuEq)", Production, true, "koz"),
    def("production.reserve_life_years", "Reserve Life", Production, true, "years"),
    def("costs.aisc_last_year", "AISC (Last Year)", Costs, false, "USD/oz"),
    def("costs.aisc_future", "AISC (Future)", Costs, false, "USD/oz"),
    def("costs.tco_current", "Total Cost of Ownership", Costs, false, "USD/oz"),
    def("costs.construction_costs", "Construction Costs", Costs, false, "USD"),
    def("valuation_metrics.ev_per_resource_oz_all", "EV / Resource oz", Valuation, false, "USD/oz"),
    def("valuation_metrics.ev_per_reserve_oz_all", "EV / Reserve oz", Valuation, false, "USD/oz"),
    def("valuation_metrics.mkt_cap_per_resource_oz_all", "Market Cap / Resource oz", Valuation, false, "USD/oz"),
    def("valuation_metrics.mkt_cap_per_reserve_oz_all", "Market Cap / Reserve oz", Valuation, false, "USD/oz"),
    def("valuation_metrics.ev_per_production_oz", "EV / Production oz", Valuation, false, "USD/oz"),
];

pub fn builtin_metrics() -> &'static [MetricDef] {
    BUILTIN_METRICS
}
