//! Spreadsheet access through `calamine`.

use crate::ingest::sheets::SheetRows;
use crate::ingest::{SheetError, WorkbookError};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Path of a platform's workbook inside `dir`.
pub fn workbook_path(dir: &Path, platform_slug: &str) -> PathBuf {
    dir.join(format!("{}.xlsx", platform_slug))
}

/// An opened workbook (`.xlsx`, `.xls`, `.ods`).
pub struct Workbook {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
}

impl Workbook {
    pub fn open(path: &Path) -> Result<Self, WorkbookError> {
        if !path.is_file() {
            return Err(WorkbookError::NotFound(path.to_path_buf()));
        }
        let sheets = open_workbook_auto(path).map_err(|source| WorkbookError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            sheets,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    /// Reads a sheet by case-insensitive name as a grid of cell strings.
    pub fn rows(&mut self, wanted: &str) -> Result<SheetRows, SheetError> {
        let name = self
            .sheet_names()
            .into_iter()
            .find(|n| n.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SheetError::Missing(wanted.to_string()))?;
        let range = self
            .sheets
            .worksheet_range(&name)
            .map_err(|source| SheetError::Unreadable {
                sheet: wanted.to_string(),
                source,
            })?;
        Ok(range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect())
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        // integral numbers typed into a sheet come back as floats
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string().trim().to_string(),
    }
}

/// Writes an `.xlsx` with one sheet per `(name, rows)`; blank cells are left empty.
#[cfg(test)]
pub(crate) fn write_workbook(path: &Path, sheets: &[(&str, &[&[&str]])]) {
    let mut book = rust_xlsxwriter::Workbook::new();
    for (name, rows) in sheets {
        let sheet = book.add_worksheet();
        sheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet.write_string(r as u32, c as u16, *value).unwrap();
                }
            }
        }
    }
    book.save(path).unwrap();
}
