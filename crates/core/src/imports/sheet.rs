//! Reads CSV and workbook bytes into a plain header-plus-rows table.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::Timelike;
use log::debug;

use super::imports_errors::ImportError;

/// A sheet as text cells. Row `i` of `rows` is source line `i + 2`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Data rows paired with their 1-based source line, blank rows dropped.
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[String])> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.iter().any(|cell| !cell.trim().is_empty()))
            .map(|(index, row)| (index + 2, row.as_slice()))
    }

    fn from_records(mut records: Vec<Vec<String>>) -> Result<Self, ImportError> {
        while records
            .first()
            .is_some_and(|row| row.iter().all(|cell| cell.trim().is_empty()))
        {
            records.remove(0);
        }
        if records.is_empty() {
            return Err(ImportError::EmptySheet);
        }
        let mut headers = records.remove(0);
        if let Some(first) = headers.first_mut() {
            *first = first.trim_start_matches('\u{feff}').to_string();
        }
        Ok(Self {
            headers,
            rows: records,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    Csv,
    Workbook,
}

impl SheetKind {
    /// Picks the reader from the file extension, then from the leading bytes.
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Result<Self, ImportError> {
        if let Some(name) = file_name {
            let extension = Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_ascii_lowercase);
            match extension.as_deref() {
                Some("csv") | Some("txt") => return Ok(SheetKind::Csv),
                Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                    return Ok(SheetKind::Workbook)
                }
                Some(other) => {
                    return Err(ImportError::UnsupportedFile(format!(
                        "{} (expected .csv, .xlsx or .xls, got .{})",
                        name, other
                    )))
                }
                None => {}
            }
        }
        // Zip container (xlsx, ods) or OLE compound file (xls)
        if bytes.starts_with(b"PK\x03\x04") || bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]) {
            Ok(SheetKind::Workbook)
        } else {
            Ok(SheetKind::Csv)
        }
    }
}

pub fn read_sheet(bytes: &[u8], file_name: Option<&str>) -> Result<SheetTable, ImportError> {
    let kind = SheetKind::detect(file_name, bytes)?;
    debug!("Reading {:?} sheet of {} bytes", kind, bytes.len());
    match kind {
        SheetKind::Csv => read_csv(bytes),
        SheetKind::Workbook => read_workbook(bytes),
    }
}

pub fn read_sheet_file(path: &Path) -> Result<SheetTable, ImportError> {
    let bytes = std::fs::read(path)?;
    read_sheet(&bytes, path.file_name().and_then(|name| name.to_str()))
}

fn read_csv(bytes: &[u8]) -> Result<SheetTable, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(str::to_string).collect());
    }
    SheetTable::from_records(records)
}

/// Only the first worksheet is read.
fn read_workbook(bytes: &[u8]) -> Result<SheetTable, ImportError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let first = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(ImportError::EmptySheet)?;
    let range = workbook.worksheet_range(&first)?;

    let records = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    SheetTable::from_records(records)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(n) => n.to_string(),
        Data::Float(f) => format!("{}", f),
        Data::Bool(b) => b.to_string(),
        Data::Error(e) => format!("#ERR({:?})", e),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) if value.num_seconds_from_midnight() == 0 => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format!("{}", dt),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
