// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reads statement files into a [`RawTable`] and turns it into normalized records.

use calamine::{Data, Reader};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::ColumnNames;
use crate::error::{ColumnRole, ConceptError, Result};
use crate::models::{LoadedTable, Record};
use crate::normalize::{Amount, category_key, parse_amount};

/// Banner rows above the header that we are willing to skip.
const HEADER_SCAN_ROWS: usize = 30;

const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(Decimal),
}

impl Cell {
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(d) => d.normalize().to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(_) => false,
        }
    }
}

/// Every row of the first sheet (or the delimited file), header included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn from_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .map(|r| {
                r.into_iter()
                    .map(|s| {
                        let s: String = s.into();
                        if s.is_empty() { Cell::Empty } else { Cell::Text(s) }
                    })
                    .collect()
            })
            .collect();
        Self { rows }
    }
}

pub fn read_table(path: &Path, columns: &ColumnNames) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "csv" | "txt" | "tsv" => {
            let bytes = std::fs::read(path)?;
            read_delimited(&bytes, columns)
        }
        "xlsx" | "xlsm" | "xls" | "ods" => read_spreadsheet(path),
        _ => Err(ConceptError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Delimited text in UTF-8 or Latin-1, with `,`, `;` or tab separators.
///
/// Delimiters are tried from most to least consistent over the first lines; the first
/// one under which the header row can be found wins.
pub fn read_delimited(bytes: &[u8], columns: &ColumnNames) -> Result<RawTable> {
    let decoded = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    };
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);
    let candidates = delimiter_candidates(text);

    for &delimiter in &candidates {
        let Ok(table) = parse_delimited(text, delimiter) else {
            continue;
        };
        if find_header(&table, columns).is_some() {
            debug!(delimiter = %(delimiter as char), "reading delimited text");
            return Ok(table);
        }
    }
    debug!(delimiter = %(candidates[0] as char), "no header found; using best delimiter");
    parse_delimited(text, candidates[0])
}

fn parse_delimited(text: &str, delimiter: u8) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut table = RawTable::default();
    for result in rdr.records() {
        let rec = result?;
        table.rows.push(
            rec.iter()
                .map(|f| {
                    if f.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(f.to_string())
                    }
                })
                .collect(),
        );
    }
    Ok(table)
}

/// All of `DELIMITERS`, best first: most lines sharing the same field count, then the
/// larger count.
fn delimiter_candidates(text: &str) -> Vec<u8> {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(HEADER_SCAN_ROWS)
        .collect();
    let mut scored: Vec<(usize, usize, u8)> = DELIMITERS
        .into_iter()
        .map(|d| {
            let mut freq: HashMap<usize, usize> = HashMap::new();
            for line in &lines {
                let n = line.matches(d as char).count();
                if n > 0 {
                    *freq.entry(n).or_default() += 1;
                }
            }
            let (count, agreeing) = freq
                .into_iter()
                .max_by_key(|&(n, f)| (f, n))
                .unwrap_or((0, 0));
            (agreeing, count, d)
        })
        .collect();
    scored.sort_by(|a, b| (b.0, b.1).cmp(&(a.0, a.1)));
    scored.into_iter().map(|(_, _, d)| d).collect()
}

fn read_spreadsheet(path: &Path) -> Result<RawTable> {
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| ConceptError::Spreadsheet(format!("Failed to open {}: {e}", path.display())))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConceptError::Spreadsheet("workbook has no sheets".into()))?
        .map_err(|e| ConceptError::Spreadsheet(e.to_string()))?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect();
    Ok(RawTable { rows })
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Decimal::try_from(*f)
            .map(Cell::Number)
            .unwrap_or_else(|_| Cell::Text(f.to_string())),
        Data::Int(i) => Cell::Number(Decimal::from(*i)),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Text(excel_serial_to_date(dt.as_f64())),
        other => Cell::Text(other.to_string()),
    }
}

pub fn excel_serial_to_date(serial: f64) -> String {
    // Excel's epoch is 1899-12-30 once the 1900 leap-year bug is accounted for.
    let Some(base) = chrono::NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return serial.to_string();
    };
    match base.checked_add_signed(chrono::Duration::days(serial.trunc() as i64)) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => serial.to_string(),
    }
}

fn header_text(cell: &Cell) -> String {
    cell.text().trim().to_string()
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    let name = name.trim();
    headers
        .iter()
        .position(|h| h == name)
        .or_else(|| headers.iter().position(|h| h.to_lowercase() == name.to_lowercase()))
}

fn detect_date_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| {
        let h = h.to_lowercase();
        h.contains("fecha") || h.contains("date")
    })
}

/// First row among the leading ones that carries both required headers.
fn find_header(table: &RawTable, columns: &ColumnNames) -> Option<usize> {
    table
        .rows
        .iter()
        .take(HEADER_SCAN_ROWS)
        .position(|row| {
            let headers: Vec<String> = row.iter().map(header_text).collect();
            find_column(&headers, &columns.concept).is_some()
                && find_column(&headers, &columns.debit).is_some()
        })
}

fn locate_header(table: &RawTable, columns: &ColumnNames) -> Option<usize> {
    find_header(table, columns).or_else(|| {
        table
            .rows
            .iter()
            .position(|row| row.iter().any(|c| !c.is_blank()))
    })
}

/// Locate the columns and normalize every data row, in input order.
pub fn load(table: &RawTable, columns: &ColumnNames) -> Result<LoadedTable> {
    let Some(header_idx) = locate_header(table, columns) else {
        // no non-empty row at all
        return Ok(LoadedTable::default());
    };
    let headers: Vec<String> = table.rows[header_idx].iter().map(header_text).collect();

    let concept_col =
        find_column(&headers, &columns.concept).ok_or_else(|| ConceptError::MissingColumn {
            role: ColumnRole::Concept,
            name: columns.concept.clone(),
        })?;
    let debit_col =
        find_column(&headers, &columns.debit).ok_or_else(|| ConceptError::MissingColumn {
            role: ColumnRole::Debit,
            name: columns.debit.clone(),
        })?;
    let date_col = match &columns.date {
        Some(name) => {
            let found = find_column(&headers, name);
            if found.is_none() {
                warn!(column = %name, "configured date column not found; dates omitted");
            }
            found
        }
        None => detect_date_column(&headers),
    };
    debug!(header_row = header_idx + 1, concept_col, debit_col, ?date_col, "columns located");

    let mut out = LoadedTable {
        headers,
        ..Default::default()
    };
    for (offset, row) in table.rows.iter().enumerate().skip(header_idx + 1) {
        if row.iter().all(Cell::is_blank) {
            continue;
        }
        let line = offset + 1;
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or(Cell::Empty);

        let category_raw = cell(concept_col).text();
        let amount_cell = cell(debit_col);
        let amount_raw = amount_cell.text();
        let amount = match amount_cell {
            Cell::Number(d) => Some(d),
            Cell::Empty => None,
            Cell::Text(ref s) => match parse_amount(s) {
                Amount::Value(d) => Some(d),
                Amount::Empty => None,
                Amount::Invalid => {
                    warn!(row = line, raw = %s, "unparseable amount excluded from totals");
                    out.warnings.push(ConceptError::UnparseableAmount {
                        row: line,
                        raw: s.clone(),
                    });
                    None
                }
            },
        };
        let date = date_col
            .map(cell)
            .filter(|c| !c.is_blank())
            .map(|c| c.text());

        out.records.push(Record {
            row: line,
            date,
            category_key: category_key(&category_raw),
            category_raw,
            amount,
            amount_raw,
        });
    }
    debug!(
        records = out.records.len(),
        warnings = out.warnings.len(),
        "table loaded"
    );
    Ok(out)
}

/// Read and normalize a file in one step.
pub fn load_path(path: &Path, columns: &ColumnNames) -> Result<LoadedTable> {
    let table = read_table(path, columns)?;
    load(&table, columns)
}

/// First `n` data rows as text, with the header, for a quick look at the input.
pub fn preview(table: &RawTable, columns: &ColumnNames, n: usize) -> (Vec<String>, Vec<Vec<String>>) {
    let Some(header_idx) = locate_header(table, columns) else {
        return (Vec::new(), Vec::new());
    };
    let headers: Vec<String> = table.rows[header_idx].iter().map(header_text).collect();
    let rows = table
        .rows
        .iter()
        .skip(header_idx + 1)
        .filter(|r| !r.iter().all(Cell::is_blank))
        .take(n)
        .map(|r| {
            let mut cells: Vec<String> = r.iter().map(Cell::text).collect();
            cells.resize(headers.len().max(cells.len()), String::new());
            cells
        })
        .collect();
    (headers, rows)
}
