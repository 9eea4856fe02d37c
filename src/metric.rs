//! The composite AFILIADOS measure derived from the combined table.

use crate::schema;
use crate::table::{Cell, Table};
use anyhow::{Context, Result};

/// Which columns feed the composite measure, and from which year on the
/// conditional column is folded in. One configuration value instead of
/// per-column code paths, so a different target column is a data change.
#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub year_threshold: i32,
    pub primary: &'static str,
    pub conditional_add: &'static str,
}

impl Default for MetricSpec {
    fn default() -> Self {
        // Household workers were a regime of their own until 2012; folding
        // HOGAR into GENERAL from then on keeps the series comparable.
        Self {
            year_threshold: 2012,
            primary: schema::GENERAL,
            conditional_add: schema::HOGAR,
        }
    }
}

impl MetricSpec {
    /// AFILIADOS for one row. Primary alone before the threshold year or
    /// when the conditional column is missing; otherwise their sum. Missing
    /// primary propagates as missing, never as zero.
    pub fn derive(&self, year: i32, primary: Option<f64>, conditional: Option<f64>) -> Option<f64> {
        let primary = primary?;
        if year < self.year_threshold {
            return Some(primary);
        }
        match conditional {
            Some(extra) => Some(primary + extra),
            None => Some(primary),
        }
    }
}

/// One row of the analysis dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub province: Option<String>,
    pub municipality: Option<String>,
    pub year: i32,
    pub month: u32,
    pub afiliados: Option<f64>,
}

/// Reduce the combined table to (province, municipality, year, month,
/// AFILIADOS).
pub fn derive_records(table: &Table, spec: &MetricSpec) -> Result<Vec<MetricRecord>> {
    let year_col = table
        .column(schema::YEAR)
        .context("combined table has no year column")?;
    let month_col = table
        .column(schema::MONTH)
        .context("combined table has no month column")?;
    let province_col = table.column(schema::PROVINCE);
    let municipality_col = table.column(schema::MUNICIPALITY);
    let primary_col = table.column(spec.primary);
    let conditional_col = table.column(spec.conditional_add);

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let number = |col: Option<usize>| col.and_then(|i| row.get(i)).and_then(Cell::as_number);
        let text = |col: Option<usize>| {
            col.and_then(|i| row.get(i))
                .and_then(Cell::as_text)
                .map(str::to_string)
        };

        let year = number(Some(year_col)).context("row without a year key")? as i32;
        let month = number(Some(month_col)).context("row without a month key")? as u32;

        records.push(MetricRecord {
            province: text(province_col),
            municipality: text(municipality_col),
            year,
            month,
            afiliados: spec.derive(year, number(primary_col), number(conditional_col)),
        });
    }
    Ok(records)
}
