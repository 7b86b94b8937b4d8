//! Per-category result tables and their XLSX rendering.

use std::collections::BTreeSet;

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};

use crate::models::score::Category;

pub const EXPORT_FILE_NAME: &str = "Hasil_Vetting.xlsx";
pub const HEADER: [&str; 3] = ["Nama File", "Email", "Nomor Telepon"];
pub const NOT_FOUND: &str = "Tidak ditemukan";

/// One exported line: file name plus joined contact fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub file_name: String,
    pub emails: String,
    pub phones: String,
}

impl ResultRow {
    pub fn new(file_name: &str, emails: &BTreeSet<String>, phones: &BTreeSet<String>) -> Self {
        Self {
            file_name: file_name.to_string(),
            emails: join_or_placeholder(emails),
            phones: join_or_placeholder(phones),
        }
    }

    fn cells(&self) -> [&str; 3] {
        [&self.file_name, &self.emails, &self.phones]
    }
}

fn join_or_placeholder(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        NOT_FOUND.to_string()
    } else {
        values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Append-only tables, one per accepted category, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTables {
    pub highly_eligible: Vec<ResultRow>,
    pub eligible: Vec<ResultRow>,
}

impl ResultTables {
    /// Rejected rows are dropped; they never reach the export.
    pub fn append(&mut self, category: Category, row: ResultRow) {
        match category {
            Category::HighlyEligible => self.highly_eligible.push(row),
            Category::Eligible => self.eligible.push(row),
            Category::Rejected => {}
        }
    }

    pub fn len(&self) -> usize {
        self.highly_eligible.len() + self.eligible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sheets(&self) -> [(Category, &[ResultRow]); 2] {
        [
            (Category::HighlyEligible, self.highly_eligible.as_slice()),
            (Category::Eligible, self.eligible.as_slice()),
        ]
    }

    /// Two sheets named after the buckets, each with a bold header row.
    pub fn to_xlsx(&self) -> Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let bold = Format::new().set_bold();

        for (category, rows) in self.sheets() {
            let sheet = workbook.add_worksheet();
            sheet.set_name(category.bucket().unwrap_or("Rejected"))?;

            for (col, title) in HEADER.iter().enumerate() {
                sheet.write_string_with_format(0, col as u16, *title, &bold)?;
            }
            for (i, row) in rows.iter().enumerate() {
                for (col, value) in row.cells().iter().enumerate() {
                    sheet.write_string(i as u32 + 1, col as u16, *value)?;
                }
            }
            sheet.set_column_width(0, 40)?;
            sheet.set_column_width(1, 40)?;
            sheet.set_column_width(2, 30)?;
        }

        workbook.save_to_buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_row_uses_placeholder_when_nothing_found() {
        let row = ResultRow::new("cv.pdf", &BTreeSet::new(), &BTreeSet::new());
        assert_eq!(row.emails, "Tidak ditemukan");
        assert_eq!(row.phones, "Tidak ditemukan");
    }

    #[test]
    fn test_row_joins_values_with_comma_space() {
        let row = ResultRow::new(
            "cv.pdf",
            &set(&["b@gmail.com", "a@yahoo.com"]),
            &set(&["081234567890"]),
        );
        assert_eq!(row.emails, "a@yahoo.com, b@gmail.com");
        assert_eq!(row.phones, "081234567890");
    }

    #[test]
    fn test_append_routes_by_category_and_drops_rejected() {
        let mut tables = ResultTables::default();
        let row = |name: &str| ResultRow::new(name, &BTreeSet::new(), &BTreeSet::new());

        tables.append(Category::Eligible, row("a.pdf"));
        tables.append(Category::Rejected, row("b.pdf"));
        tables.append(Category::HighlyEligible, row("c.pdf"));
        tables.append(Category::Eligible, row("d.pdf"));

        assert_eq!(tables.len(), 3);
        assert_eq!(tables.highly_eligible[0].file_name, "c.pdf");
        let eligible: Vec<_> = tables.eligible.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(eligible, vec!["a.pdf", "d.pdf"]);
    }

    #[test]
    fn test_empty_tables_still_produce_a_workbook() {
        let bytes = ResultTables::default().to_xlsx().unwrap();
        // XLSX is a zip container.
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_workbook_contains_rows() {
        let mut tables = ResultTables::default();
        tables.append(
            Category::HighlyEligible,
            ResultRow::new("budi.pdf", &set(&["budi@gmail.com"]), &BTreeSet::new()),
        );
        let bytes = tables.to_xlsx().unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(bytes.len() > ResultTables::default().to_xlsx().unwrap().len());
    }
}
