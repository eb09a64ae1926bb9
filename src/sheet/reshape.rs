//! Row-wise reshaping of the daily-data region into long-form records.

use super::{cell_number, ColumnSpec};
use crate::types::DailyRecord;
use calamine::Data;

/// Outcome of reading a Day cell.
enum DayCell {
    /// Cell is blank; fall back to the 1-based row ordinal
    Blank,
    /// Parsed day number
    Value(i64),
    /// Non-integer content, e.g. a trailing "Total" label
    Invalid,
}

fn parse_day(cell: Option<&Data>) -> DayCell {
    match cell {
        None | Some(Data::Empty) => DayCell::Blank,
        Some(Data::Int(i)) => DayCell::Value(*i),
        // Truncation mirrors integer coercion of float-typed day cells
        Some(Data::Float(f)) => DayCell::Value(*f as i64),
        Some(Data::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                DayCell::Blank
            } else {
                match s.parse::<i64>() {
                    Ok(day) => DayCell::Value(day),
                    Err(_) => DayCell::Invalid,
                }
            }
        }
        Some(_) => DayCell::Invalid,
    }
}

/// Reshape the data rows into one record per (day, company) pair.
///
/// Rows with an unparseable Day cell are skipped entirely; blank Day cells
/// fall back to the row's 1-based ordinal. A record is emitted only when at
/// least one of the company's two figures is nonzero. Rows are processed
/// independently — duplicate days are all kept and downstream aggregation
/// sums them.
pub fn reshape(data_rows: &[Vec<Data>], spec: &ColumnSpec) -> Vec<DailyRecord> {
    let mut records = Vec::new();

    for (ordinal, row) in data_rows.iter().enumerate() {
        let day = match parse_day(row.first()) {
            DayCell::Blank => (ordinal + 1) as u32,
            DayCell::Value(day) if day >= 1 => day as u32,
            // Non-numeric labels ("Total") and out-of-range days drop the row
            DayCell::Value(_) | DayCell::Invalid => continue,
        };

        for company in spec.companies() {
            let sales_idx = spec.sheet_index(&format!("{company} Sales"));
            let gp_idx = spec.sheet_index(&format!("{company} GP"));
            let (Some(sales_idx), Some(gp_idx)) = (sales_idx, gp_idx) else {
                continue;
            };

            let sales = row.get(sales_idx).map_or(0.0, cell_number);
            let gross_profit = row.get(gp_idx).map_or(0.0, cell_number);

            if sales != 0.0 || gross_profit != 0.0 {
                records.push(DailyRecord {
                    day,
                    company: company.clone(),
                    sales,
                    gross_profit,
                });
            }
        }
    }

    records
}
