//! End-to-end orchestration: ingest, checkpoint, derive, aggregate,
//! persist.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::table::Table;
use crate::{aggregate, ingest, metric, persist};
use anyhow::{Context, Result};
use std::fs;
use tracing::info;

/// Row counts of a completed run, for the closing log line.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSummary {
    pub combined_rows: usize,
    pub municipality_rows: usize,
    pub provincial_rows: usize,
    pub national_rows: usize,
}

/// Full run over the source directory. The combined dataset is written
/// before any aggregation so the aggregate stage can be replayed from it.
pub fn run(config: &PipelineConfig) -> Result<RunSummary> {
    let combined = ingest::combine_sources(&config.data_dir)?;

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("creating {}", config.out_dir.display()))?;
    let checkpoint = config.out_dir.join(persist::COMBINED_FILE);
    persist::write_table(&combined, &checkpoint)?;
    info!(rows = combined.rows.len(), file = %checkpoint.display(), "combined dataset written");

    aggregate_combined(config, &combined)
}

/// Re-run aggregation from an existing combined checkpoint, without
/// touching the source directory.
pub fn run_from_checkpoint(config: &PipelineConfig) -> Result<RunSummary> {
    let checkpoint = config.out_dir.join(persist::COMBINED_FILE);
    let combined = persist::read_table(&checkpoint)?;
    if combined.rows.is_empty() {
        return Err(PipelineError::NoValidInput(checkpoint).into());
    }
    info!(rows = combined.rows.len(), file = %checkpoint.display(), "checkpoint loaded");

    aggregate_combined(config, &combined)
}

fn aggregate_combined(config: &PipelineConfig, combined: &Table) -> Result<RunSummary> {
    let records = metric::derive_records(combined, &config.metric)?;

    let municipality = aggregate::municipality_year_means(&records)?;
    let provincial = aggregate::provincial_year_means(&records);
    let national = aggregate::national_year_means(&records);

    persist::write_rows(
        &municipality,
        &config.out_dir.join(persist::MUNICIPALITY_FILE),
    )?;
    persist::write_rows(&national, &config.out_dir.join(persist::NATIONAL_FILE))?;
    persist::write_rows(&provincial, &config.out_dir.join(persist::PROVINCIAL_FILE))?;

    let summary = RunSummary {
        combined_rows: combined.rows.len(),
        municipality_rows: municipality.len(),
        provincial_rows: provincial.len(),
        national_rows: national.len(),
    };
    info!(
        municipality = summary.municipality_rows,
        provincial = summary.provincial_rows,
        national = summary.national_rows,
        "aggregates written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use crate::{schema, table};
    use tempfile::tempdir;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    /// Build the table an ingested file would produce: canonical headers,
    /// sanitized counts, year/month stamped from the file name.
    fn national_extract(year: i32, month: u32, general: f64, hogar: Option<f64>) -> Table {
        let mut t = Table::new(vec![
            schema::PROVINCE.into(),
            schema::MUNICIPALITY.into(),
            schema::GENERAL.into(),
            schema::HOGAR.into(),
        ]);
        t.rows.push(vec![
            text("NACIONAL"),
            Cell::Empty,
            Cell::Number(general),
            hogar.map(Cell::Number).unwrap_or(Cell::Empty),
        ]);
        t.push_constant_column(schema::YEAR, Cell::Number(year as f64));
        t.push_constant_column(schema::MONTH, Cell::Number(month as f64));
        t
    }

    #[test]
    fn checkpoint_replay_reproduces_the_national_series() {
        // two extracts dated 03-2011 and 01-2013: the household column only
        // folds in from 2012 on
        let combined = table::concat(&[
            national_extract(2011, 3, 1000.0, None),
            national_extract(2013, 1, 1200.0, Some(50.0)),
        ]);

        let dir = tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("src_data"), dir.path());
        persist::write_table(&combined, &dir.path().join(persist::COMBINED_FILE)).unwrap();

        let summary = run_from_checkpoint(&config).unwrap();
        assert_eq!(summary.combined_rows, 2);
        assert_eq!(summary.national_rows, 2);
        assert_eq!(summary.municipality_rows, 0);
        assert_eq!(summary.provincial_rows, 0);

        let national =
            std::fs::read_to_string(dir.path().join(persist::NATIONAL_FILE)).unwrap();
        let mut lines = national.lines();
        assert_eq!(lines.next(), Some("year,AFILIADOS,PROVINCIA"));
        assert_eq!(lines.next(), Some("2011,1000.0,NACIONAL"));
        assert_eq!(lines.next(), Some("2013,1250.0,NACIONAL"));
    }

    #[test]
    fn replaying_a_written_checkpoint_matches_the_in_memory_pass() {
        let combined = table::concat(&[
            national_extract(2011, 3, 1000.0, None),
            national_extract(2013, 1, 1200.0, Some(50.0)),
        ]);

        // in-memory pass
        let records =
            metric::derive_records(&combined, &crate::metric::MetricSpec::default()).unwrap();
        let direct = aggregate::national_year_means(&records);

        // write, reload, re-derive
        let dir = tempdir().unwrap();
        let path = dir.path().join(persist::COMBINED_FILE);
        persist::write_table(&combined, &path).unwrap();
        let reloaded = persist::read_table(&path).unwrap();
        let records =
            metric::derive_records(&reloaded, &crate::metric::MetricSpec::default()).unwrap();
        let replayed = aggregate::national_year_means(&records);

        assert_eq!(direct, replayed);
    }

    #[test]
    fn empty_checkpoint_is_fatal() {
        let dir = tempdir().unwrap();
        let config = PipelineConfig::new(dir.path().join("src_data"), dir.path());
        persist::write_table(
            &Table::new(vec![schema::YEAR.into(), schema::MONTH.into()]),
            &dir.path().join(persist::COMBINED_FILE),
        )
        .unwrap();

        let err = run_from_checkpoint(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NoValidInput(_))
        ));
    }
}
