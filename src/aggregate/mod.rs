//! Grouped yearly means of the derived measure: three independent
//! reductions over the same records, none reading another's output.

pub mod muni;

use crate::metric::MetricRecord;
use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label marking a province-level summary row in the municipality column.
pub const PROVINCIAL_LABEL: &str = "PROVINCIAL";
/// Label marking the national summary rows in the province column.
pub const NATIONAL_LABEL: &str = "NACIONAL";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalityYearMean {
    #[serde(rename = "MUNI_CODE")]
    pub code: u32,
    pub year: i32,
    #[serde(rename = "AFILIADOS")]
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvincialYearMean {
    #[serde(rename = "PROVINCIA")]
    pub province: String,
    pub year: i32,
    #[serde(rename = "AFILIADOS")]
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationalYearMean {
    pub year: i32,
    #[serde(rename = "AFILIADOS")]
    pub mean: Option<f64>,
    #[serde(rename = "PROVINCIA")]
    pub province: String,
}

/// Running sum/count that skips missing members. A group with no observed
/// value yields a missing mean, never zero.
#[derive(Debug, Default)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean AFILIADOS per (municipality code, year), excluding province-level
/// summary rows and rows without a municipality label. A label without a
/// leading code aborts with `MalformedMunicipalityLabel`.
pub fn municipality_year_means(records: &[MetricRecord]) -> Result<Vec<MunicipalityYearMean>> {
    let mut groups: BTreeMap<(u32, i32), MeanAcc> = BTreeMap::new();
    for record in records {
        let label = match record.municipality.as_deref() {
            Some(label) if label != PROVINCIAL_LABEL => label,
            _ => continue,
        };
        let code = muni::municipality_code(label)?;
        groups
            .entry((code, record.year))
            .or_default()
            .push(record.afiliados);
    }
    Ok(groups
        .into_iter()
        .map(|((code, year), acc)| MunicipalityYearMean {
            code,
            year,
            mean: acc.mean(),
        })
        .collect())
}

/// Mean AFILIADOS per (province, year) over the province-level summary rows.
pub fn provincial_year_means(records: &[MetricRecord]) -> Vec<ProvincialYearMean> {
    let mut groups: BTreeMap<(String, i32), MeanAcc> = BTreeMap::new();
    for record in records {
        if record.municipality.as_deref() != Some(PROVINCIAL_LABEL) {
            continue;
        }
        let Some(province) = record.province.as_deref() else {
            continue;
        };
        groups
            .entry((province.to_string(), record.year))
            .or_default()
            .push(record.afiliados);
    }
    groups
        .into_iter()
        .map(|((province, year), acc)| ProvincialYearMean {
            province,
            year,
            mean: acc.mean(),
        })
        .collect()
}

/// Mean AFILIADOS per year over the national rows, with the `NACIONAL`
/// label re-attached to every output row.
pub fn national_year_means(records: &[MetricRecord]) -> Vec<NationalYearMean> {
    let mut groups: BTreeMap<i32, MeanAcc> = BTreeMap::new();
    for record in records {
        if record.province.as_deref() != Some(NATIONAL_LABEL) {
            continue;
        }
        groups.entry(record.year).or_default().push(record.afiliados);
    }
    groups
        .into_iter()
        .map(|(year, acc)| NationalYearMean {
            year,
            mean: acc.mean(),
            province: NATIONAL_LABEL.to_string(),
        })
        .collect()
}
