//! Pipeline configuration, passed explicitly into the entry points instead
//! of living in process-wide state.

use crate::metric::MetricSpec;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory of source spreadsheets.
    pub data_dir: PathBuf,
    /// Directory receiving the combined dataset and the aggregate tables.
    pub out_dir: PathBuf,
    /// Columns feeding the composite measure.
    pub metric: MetricSpec,
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            out_dir: out_dir.into(),
            metric: MetricSpec::default(),
        }
    }
}
