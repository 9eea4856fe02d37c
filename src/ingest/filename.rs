//! Temporal keying from source file names.

use crate::error::PipelineError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// The (year, month) an extract reports on, taken from its file name — never
/// from cell content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDate {
    pub year: i32,
    pub month: u32,
}

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-(\d{2})-(\d{4})").expect("month-year pattern"));

/// Extract the `-MM-YYYY` key from a file name such as
/// `AfiliadosMuni-01-2012+DEFINITIVO+mod.xlsx`. Prefixes and revision tags
/// around the pattern are ignored; the first match forming a real calendar
/// month wins. No valid match fails with `UnparsableFilename`.
pub fn file_date(name: &str) -> Result<FileDate, PipelineError> {
    for caps in MONTH_YEAR.captures_iter(name) {
        let month = caps[1].parse::<u32>().ok();
        let year = caps[2].parse::<i32>().ok();
        if let (Some(month), Some(year)) = (month, year) {
            if NaiveDate::from_ymd_opt(year, month, 1).is_some() {
                return Ok(FileDate { year, month });
            }
        }
    }
    Err(PipelineError::UnparsableFilename(name.to_string()))
}
