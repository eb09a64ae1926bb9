//! Header inference over the two header rows of the daily-data tab.
//!
//! Company names appear sparsely in the first header row — only at the start
//! of each company's pair of columns — and "Sales"/"GP" sub-labels sit in the
//! second. The resolver propagates the last-seen company across columns and
//! falls back to Sales/GP alternation when a sub-label cell is blank.

use super::cell_text;
use calamine::Data;

/// Default first data column of the daily tab, Excel column "AA".
pub const DEFAULT_START_COL: usize = 26;

/// Ordered logical column names resolved from the header rows, aligned to the
/// sheet columns from the start offset. The first logical column is always
/// "Day" and maps to sheet column 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    columns: Vec<String>,
    companies: Vec<String>,
    start_col: usize,
}

impl ColumnSpec {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Companies in first-seen order
    pub fn companies(&self) -> &[String] {
        &self.companies
    }

    pub fn start_col(&self) -> usize {
        self.start_col
    }

    /// Absolute sheet column holding a logical column, or None if the name
    /// was never resolved.
    pub fn sheet_index(&self, name: &str) -> Option<usize> {
        let pos = self.columns.iter().position(|c| c == name)?;
        if pos == 0 {
            Some(0)
        } else {
            Some(self.start_col + pos - 1)
        }
    }
}

/// Resolve logical column names from the company row and the sub-header row.
///
/// Columns before the first company marker can never be attributed and are
/// retained as positional placeholders; no "{company} Sales"/"{company} GP"
/// lookup will ever match them, so they are inert downstream.
pub fn resolve(company_row: &[Data], sub_header_row: &[Data], start_col: usize) -> ColumnSpec {
    let mut columns = vec!["Day".to_string()];
    let mut companies: Vec<String> = Vec::new();
    let mut current_company: Option<String> = None;

    for i in start_col..company_row.len() {
        if let Some(name) = company_row.get(i).and_then(cell_text) {
            if !companies.contains(&name) {
                companies.push(name.clone());
            }
            current_company = Some(name);
        }

        let sub_label = sub_header_row.get(i).and_then(cell_text);
        match (&current_company, sub_label) {
            (Some(company), Some(label)) => {
                columns.push(format!("{company} {label}"));
            }
            (Some(company), None) => {
                // Blank sub-label: infer by alternation against the previous
                // resolved name. Fragile by construction; structural
                // validation would be the safer re-architecture.
                let last = columns.last().map(String::as_str).unwrap_or_default();
                if columns.len() > 1 && last.contains("Sales") {
                    columns.push(format!("{company} GP"));
                } else {
                    columns.push(format!("{company} Sales"));
                }
            }
            (None, _) => {
                columns.push(format!("Col_{i}"));
            }
        }
    }

    ColumnSpec {
        columns,
        companies,
        start_col,
    }
}

/// Convert an Excel column reference to a 0-based index (A → 0, AA → 26).
pub fn column_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() {
        return None;
    }

    let mut index = 0usize;
    for c in letters.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return None;
        }
        index = index * 26 + (c as usize - 'A' as usize + 1);
    }
    Some(index - 1)
}

/// Convert a 0-based column index to an Excel column reference (0 → A,
/// 26 → AA).
pub fn column_letter(n: usize) -> String {
    let mut result = String::new();
    let mut num = n;

    loop {
        let remainder = num % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if num < 26 {
            break;
        }
        num = num / 26 - 1;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A"), Some(0));
        assert_eq!(column_index("z"), Some(25));
        assert_eq!(column_index("AA"), Some(26));
        assert_eq!(column_index("AB"), Some(27));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn test_letter_index_round_trip() {
        for idx in [0usize, 1, 25, 26, 51, 52, 701, 702] {
            assert_eq!(column_index(&column_letter(idx)), Some(idx));
        }
    }

    #[test]
    fn test_resolve_explicit_sub_headers() {
        let company_row = vec![
            Data::String("Acme".to_string()),
            Data::Empty,
            Data::String("Beta".to_string()),
            Data::Empty,
        ];
        let sub_row = vec![
            Data::String("Sales".to_string()),
            Data::String("GP".to_string()),
            Data::String("Sales".to_string()),
            Data::String("GP".to_string()),
        ];

        let spec = resolve(&company_row, &sub_row, 0);
        assert_eq!(
            spec.columns(),
            ["Day", "Acme Sales", "Acme GP", "Beta Sales", "Beta GP"]
        );
        assert_eq!(spec.companies(), ["Acme", "Beta"]);
    }

    #[test]
    fn test_resolve_alternation_when_sub_headers_blank() {
        let company_row = vec![Data::String("Acme".to_string()), Data::Empty];
        let sub_row = vec![Data::Empty, Data::Empty];

        let spec = resolve(&company_row, &sub_row, 0);
        assert_eq!(spec.columns(), ["Day", "Acme Sales", "Acme GP"]);
    }

    #[test]
    fn test_resolve_placeholder_before_first_company() {
        let company_row = vec![Data::Empty, Data::Empty, Data::String("Acme".to_string())];
        let sub_row = vec![Data::Empty, Data::Empty, Data::String("Sales".to_string())];

        let spec = resolve(&company_row, &sub_row, 1);
        assert_eq!(spec.columns(), ["Day", "Col_1", "Acme Sales"]);
        // Placeholders are inert: nothing maps them to a company pair
        assert_eq!(spec.sheet_index("Col_1"), Some(1));
        assert_eq!(spec.sheet_index("Acme Sales"), Some(2));
    }

    #[test]
    fn test_sheet_index_respects_start_offset() {
        let mut company_row = vec![Data::Empty; 28];
        let mut sub_row = vec![Data::Empty; 28];
        company_row[26] = Data::String("Acme".to_string());
        sub_row[26] = Data::String("Sales".to_string());
        sub_row[27] = Data::String("GP".to_string());

        let spec = resolve(&company_row, &sub_row, DEFAULT_START_COL);
        assert_eq!(spec.sheet_index("Day"), Some(0));
        assert_eq!(spec.sheet_index("Acme Sales"), Some(26));
        assert_eq!(spec.sheet_index("Acme GP"), Some(27));
        assert_eq!(spec.sheet_index("Acme Margin"), None);
    }

    #[test]
    fn test_resolve_trims_company_names() {
        let company_row = vec![Data::String("  Acme  ".to_string()), Data::Empty];
        let sub_row = vec![Data::String("Sales".to_string()), Data::Empty];

        let spec = resolve(&company_row, &sub_row, 0);
        assert_eq!(spec.companies(), ["Acme"]);
        assert_eq!(spec.columns()[1], "Acme Sales");
    }
}
