//! Sheet-shape logic: header inference, row reshaping, and the goals join.
//!
//! Everything in this module is pure — it consumes cell grids already pulled
//! out of a workbook and knows nothing about files or calamine readers. The
//! I/O boundary lives in [`crate::excel`].

mod goals;
mod header;
mod reshape;

pub use goals::{read_goals, GoalSheet, MONTH_LABEL_CELL, TOTAL_SALES_GOAL_CELL};
pub use header::{column_index, column_letter, resolve, ColumnSpec, DEFAULT_START_COL};
pub use reshape::reshape;

use calamine::Data;

/// Trimmed, non-blank text content of a cell. Numeric cells render as text so
/// that a numeric company label still resolves.
pub(crate) fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Numeric content of a cell, with blanks and non-numeric cells read as 0.
pub(crate) fn cell_number(cell: &Data) -> f64 {
    match cell {
        Data::Float(f) => *f,
        Data::Int(i) => *i as f64,
        Data::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
