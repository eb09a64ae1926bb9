//! Workbook ingestion - two-tab Excel file → tidy ReportTable

use crate::error::{ThermoError, ThermoResult};
use crate::sheet::{self, DEFAULT_START_COL};
use crate::types::ReportTable;
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Sheet row holding the company names (row 0 is an ignored title)
const COMPANY_ROW: usize = 1;
/// Sheet row holding the Sales/GP sub-labels
const SUB_HEADER_ROW: usize = 2;
/// First row of the daily data region
const DATA_START_ROW: usize = 3;

enum Source {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

/// Reads the daily-data tab and the goals tab of one workbook and produces
/// the enriched tidy table.
///
/// The whole workbook is read and transformed in one pass; failures surface
/// as a single boundary error and no partial table is returned.
pub struct WorkbookImporter {
    source: Source,
    start_col: usize,
}

impl WorkbookImporter {
    /// Importer over a workbook file on disk
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source: Source::Path(path.as_ref().to_path_buf()),
            start_col: DEFAULT_START_COL,
        }
    }

    /// Importer over in-memory workbook bytes (uploads, cached content)
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            source: Source::Bytes(bytes),
            start_col: DEFAULT_START_COL,
        }
    }

    /// Override the first data column of the daily tab (default "AA").
    pub fn with_start_col(mut self, start_col: usize) -> Self {
        self.start_col = start_col;
        self
    }

    /// Import the workbook into a ReportTable.
    pub fn import(&self) -> ThermoResult<ReportTable> {
        match &self.source {
            Source::Path(path) => {
                let workbook = open_workbook_auto(path).map_err(|e| {
                    ThermoError::Workbook(format!(
                        "failed to open workbook {}: {e}",
                        path.display()
                    ))
                })?;
                self.build_table(workbook)
            }
            Source::Bytes(bytes) => {
                let workbook =
                    open_workbook_auto_from_rs(Cursor::new(bytes.clone())).map_err(|e| {
                        ThermoError::Workbook(format!("failed to open workbook bytes: {e}"))
                    })?;
                self.build_table(workbook)
            }
        }
    }

    fn build_table<RS: Read + Seek>(&self, mut workbook: Sheets<RS>) -> ThermoResult<ReportTable> {
        if workbook.sheet_names().len() < 2 {
            return Err(ThermoError::Workbook(
                "workbook must have a daily-data tab and a goals tab".to_string(),
            ));
        }

        let daily_range = read_sheet(&mut workbook, 0, "daily-data")?;
        let goals_range = read_sheet(&mut workbook, 1, "goals")?;

        let daily_grid = grid(&daily_range);
        if daily_grid.len() <= DATA_START_ROW {
            return Err(ThermoError::NoData);
        }

        let spec = sheet::resolve(
            &daily_grid[COMPANY_ROW],
            &daily_grid[SUB_HEADER_ROW],
            self.start_col,
        );
        let records = sheet::reshape(&daily_grid[DATA_START_ROW..], &spec);
        if records.is_empty() {
            return Err(ThermoError::NoData);
        }

        let goal_sheet = sheet::read_goals(&grid(&goals_range))?;
        let records = goal_sheet.join(records);

        Ok(ReportTable {
            records,
            companies: spec.companies().to_vec(),
            month_label: goal_sheet.month_label,
            total_sales_goal: goal_sheet.total_sales_goal,
        })
    }
}

fn read_sheet<RS: Read + Seek>(
    workbook: &mut Sheets<RS>,
    index: usize,
    label: &str,
) -> ThermoResult<Range<Data>> {
    workbook
        .worksheet_range_at(index)
        .ok_or_else(|| ThermoError::Workbook(format!("workbook has no {label} tab")))?
        .map_err(|e| ThermoError::Workbook(format!("failed to read {label} tab: {e}")))
}

/// Materialize a range as an absolutely-indexed grid.
///
/// calamine ranges are anchored at their first non-empty cell; positional
/// reads (header rows, the goals tab's month/total cells) need sheet
/// coordinates, so the grid is padded back to absolute row/column 0.
fn grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    let Some(end) = range.end() else {
        return Vec::new();
    };
    let height = end.0 as usize + 1;
    let width = end.1 as usize + 1;

    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| {
                    range
                        .get_value((row as u32, col as u32))
                        .cloned()
                        .unwrap_or(Data::Empty)
                })
                .collect()
        })
        .collect()
}
