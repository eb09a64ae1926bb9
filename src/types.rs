use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//==============================================================================
// Metric Selection
//==============================================================================

/// Which of the two daily figures a gauge, export slice, or pacing run reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Sales,
    GrossProfit,
}

impl Metric {
    /// Display label used in report headings and export sheets
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Sales => "Sales",
            Metric::GrossProfit => "Gross Profit",
        }
    }
}

//==============================================================================
// Tidy Table Records
//==============================================================================

/// One (day, company) observation from the daily-data tab.
///
/// Rows whose Day cell cannot be parsed as an integer are discarded during
/// reshaping, and a record exists only if at least one of the two figures is
/// nonzero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub day: u32,
    pub company: String,
    pub sales: f64,
    pub gross_profit: f64,
}

/// Monthly goal pair for one company, sourced from the goals tab's
/// "105% Sales" / "105% GP" columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyGoal {
    pub company: String,
    pub sales_goal: f64,
    pub gp_goal: f64,
}

/// A DailyRecord with its company's goals attached. Companies without a goal
/// row carry zero goals rather than failing the join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub day: u32,
    pub company: String,
    pub sales: f64,
    pub gross_profit: f64,
    pub sales_goal: f64,
    pub gp_goal: f64,
}

impl EnrichedRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sales => self.sales,
            Metric::GrossProfit => self.gross_profit,
        }
    }

    pub fn goal(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Sales => self.sales_goal,
            Metric::GrossProfit => self.gp_goal,
        }
    }
}

//==============================================================================
// Report Table
//==============================================================================

/// The tidy long-form table built from one workbook read.
///
/// Everything downstream (terminal gauges, exports, the HTTP API) consumes
/// this table; it is rebuilt in full whenever the source bytes change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTable {
    /// One row per (day, company) observation
    pub records: Vec<EnrichedRecord>,
    /// Companies in first-seen column order
    pub companies: Vec<String>,
    /// Free-text month label from the goals tab, when present
    pub month_label: Option<String>,
    /// Aggregate total-sales-goal cell from the goals tab (0 when absent)
    pub total_sales_goal: f64,
}

impl ReportTable {
    /// All records for one company, sorted by day ascending.
    pub fn company_records(&self, company: &str) -> Vec<&EnrichedRecord> {
        let mut records: Vec<&EnrichedRecord> = self
            .records
            .iter()
            .filter(|r| r.company == company)
            .collect();
        records.sort_by_key(|r| r.day);
        records
    }

    /// Per-day metric values for one company, sorted by day ascending.
    pub fn company_series(&self, company: &str, metric: Metric) -> Vec<f64> {
        self.company_records(company)
            .iter()
            .map(|r| r.value(metric))
            .collect()
    }

    /// All records grouped by company (first-seen order), sorted by day
    /// ascending within each group — the order downstream consumers expect.
    pub fn grouped_records(&self) -> Vec<EnrichedRecord> {
        self.companies
            .iter()
            .flat_map(|company| self.company_records(company).into_iter().cloned())
            .collect()
    }

    /// The company's monthly goal for a metric (0 when unmatched in the
    /// goals tab).
    pub fn company_goal(&self, company: &str, metric: Metric) -> f64 {
        self.records
            .iter()
            .find(|r| r.company == company)
            .map_or(0.0, |r| r.goal(metric))
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//==============================================================================
// Total-Days Configuration
//==============================================================================

/// Total working days in the reporting month, with per-company overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct DaysConfig {
    default: u32,
    overrides: HashMap<String, u32>,
}

/// Default total working days in a month
pub const DEFAULT_TOTAL_DAYS: u32 = 22;

impl Default for DaysConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_DAYS)
    }
}

impl DaysConfig {
    pub fn new(default: u32) -> Self {
        Self {
            default: default.clamp(1, 31),
            overrides: HashMap::new(),
        }
    }

    pub fn set_override(&mut self, company: impl Into<String>, days: u32) {
        self.overrides.insert(company.into(), days.clamp(1, 31));
    }

    pub fn for_company(&self, company: &str) -> u32 {
        self.overrides.get(company).copied().unwrap_or(self.default)
    }
}
