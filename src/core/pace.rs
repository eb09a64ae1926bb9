//! Linear-pace math for one company's accumulated series.

use crate::types::{DaysConfig, Metric, ReportTable};
use serde::{Deserialize, Serialize};

/// Pacing numbers for one company and metric, recomputed on every render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Count of records present for the company — NOT the highest day number
    /// seen, so sparse series understate calendar progress
    pub days_elapsed: u32,
    pub total_days: u32,
    pub monthly_goal: f64,
    pub cumulative_total: f64,
    /// Value of the most recent record (the report's "yesterday" figure)
    pub latest_value: f64,
    /// Cumulative total excluding the most recent record
    pub prior_total: f64,
    /// Where a perfectly linear month would sit after `days_elapsed` days
    pub expected_position: f64,
    /// Daily run-rate still required to reach goal; negative when the goal is
    /// already exceeded
    pub per_day_needed: f64,
    /// Fraction of goal reached, 0 when the goal is not positive
    pub percent_of_goal: f64,
}

/// Compute pacing for a per-day series (sorted by day ascending) against a
/// monthly goal.
///
/// The remaining-days divisor is floored at 1, so an exhausted reporting
/// period divides by one instead of zero. Negative `per_day_needed` values
/// are surfaced as-is.
pub fn pace(series: &[f64], monthly_goal: f64, total_days: u32) -> Pace {
    let total_days = total_days.max(1);
    let days_elapsed = series.len() as u32;
    let cumulative_total: f64 = series.iter().sum();
    let latest_value = series.last().copied().unwrap_or(0.0);
    let prior_total = cumulative_total - latest_value;

    let expected_position = monthly_goal / f64::from(total_days) * f64::from(days_elapsed);
    let remaining_days = total_days.saturating_sub(days_elapsed).max(1);
    let per_day_needed = (monthly_goal - cumulative_total) / f64::from(remaining_days);
    let percent_of_goal = if monthly_goal > 0.0 {
        cumulative_total / monthly_goal
    } else {
        0.0
    };

    Pace {
        days_elapsed,
        total_days,
        monthly_goal,
        cumulative_total,
        latest_value,
        prior_total,
        expected_position,
        per_day_needed,
        percent_of_goal,
    }
}

/// Both metrics paced for one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyPacing {
    pub company: String,
    pub sales: Pace,
    pub gross_profit: Pace,
}

/// Pace every company in the table for both metrics.
pub fn company_pacing(table: &ReportTable, days: &DaysConfig) -> Vec<CompanyPacing> {
    table
        .companies
        .iter()
        .map(|company| {
            let total_days = days.for_company(company);
            let pace_for = |metric: Metric| {
                pace(
                    &table.company_series(company, metric),
                    table.company_goal(company, metric),
                    total_days,
                )
            };
            CompanyPacing {
                company: company.clone(),
                sales: pace_for(Metric::Sales),
                gross_profit: pace_for(Metric::GrossProfit),
            }
        })
        .collect()
}
