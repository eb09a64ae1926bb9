//! Tidy-table export for downstream consumers

use crate::core::{company_pacing, CompanyPacing};
use crate::error::{ThermoError, ThermoResult};
use crate::types::{DaysConfig, ReportTable};
use rust_xlsxwriter::Workbook;
use std::path::Path;

const DAILY_HEADERS: [&str; 6] = [
    "Day",
    "Company",
    "Sales",
    "Gross Profit",
    "Sales Goal",
    "GP Goal",
];

const PACING_HEADERS: [&str; 9] = [
    "Company",
    "Metric",
    "Days Elapsed",
    "Total Days",
    "Cumulative",
    "Monthly Goal",
    "Expected Position",
    "Needed Per Day",
    "Percent of Goal",
];

/// Writes the enriched table, grouped by company and sorted by day, plus the
/// per-company pacing numbers.
pub struct TableExporter<'a> {
    table: &'a ReportTable,
    days: &'a DaysConfig,
}

impl<'a> TableExporter<'a> {
    pub fn new(table: &'a ReportTable, days: &'a DaysConfig) -> Self {
        Self { table, days }
    }

    /// Export to the format implied by the output extension (.xlsx or .json).
    pub fn export(&self, output_path: &Path) -> ThermoResult<()> {
        match output_path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("xlsx") => self.export_xlsx(output_path),
            Some("json") => self.export_json(output_path),
            other => Err(ThermoError::Validation(format!(
                "unsupported export format '{}' (expected .xlsx or .json)",
                other.unwrap_or("none")
            ))),
        }
    }

    fn export_xlsx(&self, output_path: &Path) -> ThermoResult<()> {
        let mut workbook = Workbook::new();

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Daily")
            .map_err(|e| ThermoError::Export(format!("failed to set worksheet name: {e}")))?;

        for (col, header) in DAILY_HEADERS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .map_err(|e| ThermoError::Export(format!("failed to write header: {e}")))?;
        }

        let mut row: u32 = 1;
        for company in &self.table.companies {
            for record in self.table.company_records(company) {
                let cells: [(u16, f64); 5] = [
                    (0, f64::from(record.day)),
                    (2, record.sales),
                    (3, record.gross_profit),
                    (4, record.sales_goal),
                    (5, record.gp_goal),
                ];
                for (col, value) in cells {
                    worksheet
                        .write_number(row, col, value)
                        .map_err(|e| ThermoError::Export(format!("failed to write row: {e}")))?;
                }
                worksheet
                    .write_string(row, 1, &record.company)
                    .map_err(|e| ThermoError::Export(format!("failed to write row: {e}")))?;
                row += 1;
            }
        }

        self.write_pacing_sheet(&mut workbook)?;

        workbook
            .save(output_path)
            .map_err(|e| ThermoError::Export(format!("failed to save Excel file: {e}")))?;

        Ok(())
    }

    fn write_pacing_sheet(&self, workbook: &mut Workbook) -> ThermoResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name("Pacing")
            .map_err(|e| ThermoError::Export(format!("failed to set worksheet name: {e}")))?;

        for (col, header) in PACING_HEADERS.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, *header)
                .map_err(|e| ThermoError::Export(format!("failed to write header: {e}")))?;
        }

        let mut row: u32 = 1;
        for pacing in company_pacing(self.table, self.days) {
            for (label, pace) in [("Sales", &pacing.sales), ("Gross Profit", &pacing.gross_profit)]
            {
                worksheet
                    .write_string(row, 0, &pacing.company)
                    .and_then(|ws| ws.write_string(row, 1, label))
                    .and_then(|ws| ws.write_number(row, 2, f64::from(pace.days_elapsed)))
                    .and_then(|ws| ws.write_number(row, 3, f64::from(pace.total_days)))
                    .and_then(|ws| ws.write_number(row, 4, pace.cumulative_total))
                    .and_then(|ws| ws.write_number(row, 5, pace.monthly_goal))
                    .and_then(|ws| ws.write_number(row, 6, pace.expected_position))
                    .and_then(|ws| ws.write_number(row, 7, pace.per_day_needed))
                    .and_then(|ws| ws.write_number(row, 8, pace.percent_of_goal))
                    .map_err(|e| {
                        ThermoError::Export(format!("failed to write pacing row: {e}"))
                    })?;
                row += 1;
            }
        }

        Ok(())
    }

    fn export_json(&self, output_path: &Path) -> ThermoResult<()> {
        let pacing: Vec<CompanyPacing> = company_pacing(self.table, self.days);

        let payload = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "month_label": self.table.month_label,
            "total_sales_goal": self.table.total_sales_goal,
            "companies": self.table.companies,
            "records": self.table.grouped_records(),
            "pacing": pacing,
        });

        let body = serde_json::to_string_pretty(&payload)
            .map_err(|e| ThermoError::Export(format!("failed to serialize report: {e}")))?;
        std::fs::write(output_path, body)?;

        Ok(())
    }
}
