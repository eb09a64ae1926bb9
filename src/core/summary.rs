//! Summary statistics over the whole tidy table.

use crate::types::ReportTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The report's headline panel: workbook-wide totals and elapsed days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_sales: f64,
    pub total_gross_profit: f64,
    /// Count of distinct day numbers observed across all companies
    pub days_elapsed: usize,
    pub company_count: usize,
    /// Aggregate total-sales-goal cell from the goals tab
    pub total_sales_goal: f64,
    pub month_label: Option<String>,
}

pub fn summarize(table: &ReportTable) -> Summary {
    let distinct_days: BTreeSet<u32> = table.records.iter().map(|r| r.day).collect();

    Summary {
        total_sales: table.records.iter().map(|r| r.sales).sum(),
        total_gross_profit: table.records.iter().map(|r| r.gross_profit).sum(),
        days_elapsed: distinct_days.len(),
        company_count: table.companies.len(),
        total_sales_goal: table.total_sales_goal,
        month_label: table.month_label.clone(),
    }
}
