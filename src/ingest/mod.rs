//! Source discovery and the combined-dataset build: every file runs through
//! the per-file pipeline independently, then the results are concatenated
//! over the union of their columns.

pub mod filename;
pub mod workbook;

use crate::clean;
use crate::error::PipelineError;
use crate::schema;
use crate::table::{self, Cell, Table};
use anyhow::Result;
use filename::file_date;
use glob::glob;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Every spreadsheet under `data_dir`, sorted for stable log order.
pub fn discover_sources(data_dir: &Path) -> Result<Vec<PathBuf>> {
    if !data_dir.is_dir() {
        return Err(PipelineError::MissingInputDirectory(data_dir.to_path_buf()).into());
    }

    let mut files = Vec::new();
    for pattern in ["*.xlsx", "*.xls"] {
        let full = data_dir.join(pattern);
        for entry in glob(&full.to_string_lossy())? {
            files.push(entry?);
        }
    }
    files.sort();
    Ok(files)
}

/// One file through the full per-file pipeline: date the name, load the
/// sheet, normalize headers, sanitize rows and counts, stamp year/month.
fn ingest_file(path: &Path) -> Result<Table> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let date = file_date(&name)?;

    let mut table = workbook::load_sheet(path)?;
    schema::normalize_headers(&mut table)?;
    clean::drop_invalid_rows(&mut table);
    clean::sanitize_counts(&mut table);
    table.push_constant_column(schema::YEAR, Cell::Number(date.year as f64));
    table.push_constant_column(schema::MONTH, Cell::Number(date.month as f64));
    Ok(table)
}

/// Ingest every source under `data_dir` into one combined table.
///
/// Per-file pipelines run fork-join; results merge only after each file
/// completes. A file that cannot be dated or loaded is logged and skipped.
/// A header collision aborts the whole run instead: the rename table is
/// incomplete and every later file of the same format would corrupt the
/// same columns.
pub fn combine_sources(data_dir: &Path) -> Result<Table> {
    let files = discover_sources(data_dir)?;
    if files.is_empty() {
        return Err(PipelineError::NoValidInput(data_dir.to_path_buf()).into());
    }
    info!(count = files.len(), dir = %data_dir.display(), "ingesting sources");

    let results: Vec<(PathBuf, Result<Table>)> = files
        .par_iter()
        .map(|path| (path.clone(), ingest_file(path)))
        .collect();

    let mut tables = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(table) => {
                info!(file = %path.display(), rows = table.rows.len(), "ingested");
                tables.push(table);
            }
            Err(e)
                if matches!(
                    e.downcast_ref::<PipelineError>(),
                    Some(PipelineError::DuplicateHeader { .. })
                ) =>
            {
                return Err(e.context(format!("ingesting {}", path.display())));
            }
            Err(e) => warn!(file = %path.display(), cause = %e, "skipping source"),
        }
    }

    let combined = table::concat(&tables);
    if combined.rows.is_empty() {
        return Err(PipelineError::NoValidInput(data_dir.to_path_buf()).into());
    }
    Ok(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_directory_is_fatal() {
        let err = discover_sources(Path::new("/nonexistent/src_data")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MissingInputDirectory(_))
        ));
    }

    #[test]
    fn empty_directory_yields_no_valid_input() {
        let dir = tempdir().unwrap();
        let err = combine_sources(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NoValidInput(_))
        ));
    }

    #[test]
    fn undatable_files_are_skipped_not_fatal_until_all_fail() {
        // a lone file with no -MM-YYYY key empties the input set entirely
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("resumen.xlsx"), b"not a real workbook").unwrap();
        let err = combine_sources(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::NoValidInput(_))
        ));
    }
}
