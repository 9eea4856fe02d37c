//! CSV persistence: the combined checkpoint and the three aggregate
//! outputs.

use crate::table::{Cell, Table};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// The durable combined dataset; aggregation can be re-run from this file
/// without re-ingesting the sources.
pub const COMBINED_FILE: &str = "all_data.csv";
pub const MUNICIPALITY_FILE: &str = "averages_muni.csv";
pub const NATIONAL_FILE: &str = "averages_nacional.csv";
pub const PROVINCIAL_FILE: &str = "averages_provincial.csv";

/// Write the combined table as CSV, one column per header.
pub fn write_table(table: &Table, path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(&table.headers)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(Cell::to_field))?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table previously written by [`write_table`]. Empty fields come
/// back as missing and numeric text as numbers, so a reloaded checkpoint
/// aggregates identically to the in-memory original.
pub fn read_table(path: &Path) -> Result<Table> {
    let mut reader =
        csv::Reader::from_path(path).with_context(|| format!("opening {}", path.display()))?;
    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table
            .rows
            .push(record.iter().map(Cell::from_field).collect());
    }
    Ok(table)
}

/// Write one aggregate table through its `Serialize` impl; missing means
/// serialize as empty fields.
pub fn write_rows<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::NationalYearMean;
    use tempfile::tempdir;

    #[test]
    fn combined_table_round_trips() {
        let mut table = Table::new(vec![
            "PROVINCIA".into(),
            "GENERAL".into(),
            "year".into(),
        ]);
        table.rows.push(vec![
            Cell::Text("NACIONAL".into()),
            Cell::Number(1000.0),
            Cell::Number(2011.0),
        ]);
        table
            .rows
            .push(vec![Cell::Text("MADRID".into()), Cell::Empty, Cell::Number(2011.0)]);

        let dir = tempdir().unwrap();
        let path = dir.path().join(COMBINED_FILE);
        write_table(&table, &path).unwrap();
        let reloaded = read_table(&path).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn aggregate_rows_serialize_with_renamed_headers() {
        let rows = vec![NationalYearMean {
            year: 2011,
            mean: Some(1000.0),
            province: "NACIONAL".into(),
        }];
        let dir = tempdir().unwrap();
        let path = dir.path().join(NATIONAL_FILE);
        write_rows(&rows, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("year,AFILIADOS,PROVINCIA"));
        assert_eq!(lines.next(), Some("2011,1000.0,NACIONAL"));
    }

    #[test]
    fn missing_means_write_as_empty_fields() {
        let rows = vec![NationalYearMean {
            year: 2011,
            mean: None,
            province: "NACIONAL".into(),
        }];
        let dir = tempdir().unwrap();
        let path = dir.path().join(NATIONAL_FILE);
        write_rows(&rows, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.lines().any(|l| l == "2011,,NACIONAL"));
    }
}
