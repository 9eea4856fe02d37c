//! Error taxonomy, split by handling policy: per-file skips, fatal input
//! conditions, and data defects that must surface loudly.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// No `-MM-YYYY` date in the file name; the file cannot be keyed in time
    /// and is skipped.
    #[error("no -MM-YYYY date in file name `{0}`")]
    UnparsableFilename(String),

    #[error("input directory `{0}` does not exist")]
    MissingInputDirectory(PathBuf),

    /// Nothing usable was ingested. Fatal before any output is written, so a
    /// bad run never replaces prior output with empty tables.
    #[error("no usable source rows under `{0}`")]
    NoValidInput(PathBuf),

    /// A municipality label without a leading numeric code reached
    /// aggregation. The sanitiser screens placeholders out first, so this
    /// means the header rename table is missing a variant.
    #[error("municipality label `{0}` has no leading numeric code")]
    MalformedMunicipalityLabel(String),

    /// Two headers in one file collapse onto the same canonical column.
    #[error("headers `{first}` and `{second}` both map to `{canonical}`")]
    DuplicateHeader {
        first: String,
        second: String,
        canonical: String,
    },
}
