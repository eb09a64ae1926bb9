//! Goals-tab parsing and the permissive goal join.

use super::{cell_number, cell_text};
use crate::error::{ThermoError, ThermoResult};
use crate::types::{CompanyGoal, DailyRecord, EnrichedRecord};
use calamine::Data;
use std::collections::HashMap;

/// Fixed (row, col) position of the free-text month label on the goals tab.
pub const MONTH_LABEL_CELL: (usize, usize) = (1, 5);

/// Fixed (row, col) position of the aggregate total-sales-goal value.
pub const TOTAL_SALES_GOAL_CELL: (usize, usize) = (9, 3);

const COMPANY_HEADER: &str = "Company";
const SALES_GOAL_HEADER: &str = "105% Sales";
const GP_GOAL_HEADER: &str = "105% GP";

/// Everything read from the goals tab in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalSheet {
    pub goals: HashMap<String, CompanyGoal>,
    pub month_label: Option<String>,
    pub total_sales_goal: f64,
}

impl GoalSheet {
    /// Attach goals to every record by exact company-name match. Unmatched
    /// companies degrade to zero goals instead of failing the report.
    pub fn join(&self, records: Vec<DailyRecord>) -> Vec<EnrichedRecord> {
        records
            .into_iter()
            .map(|r| {
                let (sales_goal, gp_goal) = self
                    .goals
                    .get(&r.company)
                    .map_or((0.0, 0.0), |g| (g.sales_goal, g.gp_goal));
                EnrichedRecord {
                    day: r.day,
                    company: r.company,
                    sales: r.sales,
                    gross_profit: r.gross_profit,
                    sales_goal,
                    gp_goal,
                }
            })
            .collect()
    }
}

fn positional_cell(rows: &[Vec<Data>], (row, col): (usize, usize)) -> Option<&Data> {
    rows.get(row).and_then(|r| r.get(col))
}

/// Read the goals tab: row 0 holds the headers, one company per data row.
///
/// The "Company" column is required; the two 105% columns are optional and
/// default every goal to 0 when absent. The month label and the aggregate
/// total are read positionally and tolerate absence.
pub fn read_goals(rows: &[Vec<Data>]) -> ThermoResult<GoalSheet> {
    let header_row = rows.first().ok_or_else(|| {
        ThermoError::Workbook("goals tab is empty".to_string())
    })?;

    let find_column = |name: &str| {
        header_row
            .iter()
            .position(|cell| cell_text(cell).as_deref() == Some(name))
    };

    let company_col = find_column(COMPANY_HEADER).ok_or_else(|| {
        ThermoError::Validation(format!(
            "goals tab has no '{COMPANY_HEADER}' column"
        ))
    })?;
    let sales_goal_col = find_column(SALES_GOAL_HEADER);
    let gp_goal_col = find_column(GP_GOAL_HEADER);

    let mut goals = HashMap::new();
    for row in rows.iter().skip(1) {
        let Some(company) = row.get(company_col).and_then(cell_text) else {
            continue;
        };
        let sales_goal = sales_goal_col
            .and_then(|c| row.get(c))
            .map_or(0.0, cell_number);
        let gp_goal = gp_goal_col
            .and_then(|c| row.get(c))
            .map_or(0.0, cell_number);
        goals.insert(
            company.clone(),
            CompanyGoal {
                company,
                sales_goal,
                gp_goal,
            },
        );
    }

    let month_label = positional_cell(rows, MONTH_LABEL_CELL).and_then(cell_text);
    let total_sales_goal = positional_cell(rows, TOTAL_SALES_GOAL_CELL).map_or(0.0, cell_number);

    Ok(GoalSheet {
        goals,
        month_label,
        total_sales_goal,
    })
}
