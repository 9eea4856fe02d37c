//! Spreadsheet loading: the first worksheet of an extract into the tabular
//! value model.

use crate::table::{Cell, Table};
use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Row index carrying the column headers; row 0 is a decorative title.
const HEADER_ROW: usize = 1;

fn header_from_data(data: &Data) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => format!("{other}"),
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Load the first worksheet of `path`. calamine auto-detects xls/xlsx.
pub fn load_sheet(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;

    let sheet_names = workbook.sheet_names();
    let Some(sheet) = sheet_names.first().cloned() else {
        bail!("workbook {} has no sheets", path.display());
    };

    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet `{sheet}` of {}", path.display()))?;

    let mut rows = range.rows().skip(HEADER_ROW);
    let Some(header_row) = rows.next() else {
        bail!("no header row in {}", path.display());
    };

    let mut table = Table::new(header_row.iter().map(header_from_data).collect());
    for row in rows {
        table.rows.push(row.iter().map(cell_from_data).collect());
    }
    Ok(table)
}
