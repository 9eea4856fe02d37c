//! Canonical column vocabulary and reconciliation of the historical header
//! spellings the publisher has used across the series.

use crate::error::PipelineError;
use crate::table::Table;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

pub const PROVINCE: &str = "PROVINCIA";
pub const MUNICIPALITY: &str = "MUNICIPIO";
pub const GENERAL: &str = "GENERAL";
pub const TRAB: &str = "TRAB";
pub const AGRARIO: &str = "AGRARIO";
pub const MAR: &str = "MAR";
pub const HOGAR: &str = "HOGAR";
pub const AUTONOMOS: &str = "AUTONOMOS";
pub const CARBON: &str = "CARBON";
pub const TOTAL: &str = "TOTAL";

/// Injected temporal key columns.
pub const YEAR: &str = "year";
pub const MONTH: &str = "month";

/// Regime-count columns that go through numeric sanitisation.
pub const COUNT_COLUMNS: &[&str] = &[GENERAL, AGRARIO, MAR, HOGAR, AUTONOMOS, CARBON, TOTAL];

/// Every header spelling observed since the series began, mapped to its
/// canonical column. Accents, punctuation and stray whitespace are real
/// variants, not typos; adding a newly-seen spelling is a one-line change.
static HEADER_VARIANTS: &[(&str, &str)] = &[
    ("Reg. General(1)", GENERAL),
    ("TRAB.", TRAB),
    ("R. G.- S.E.Agrario", AGRARIO),
    ("R.E.MAR", MAR),
    ("R. E. MAR", MAR),
    ("R. E. MAR ", MAR),
    ("HOGAR (2)", HOGAR),
    ("R. G.- S.E.Hogar(2)", HOGAR),
    ("R. G.- S.E.Hogar", HOGAR),
    ("R.E.Autónomos", AUTONOMOS),
    ("R. E. T. Autónomos", AUTONOMOS),
    ("R.E. Carbón", CARBON),
    ("R. E. M. Carbón", CARBON),
];

static RENAMES: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| HEADER_VARIANTS.iter().copied().collect());

/// Canonical names the rename table can collide on.
static CANONICAL_TARGETS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HEADER_VARIANTS.iter().map(|(_, canonical)| *canonical).collect());

/// Rewrite a file's headers onto the canonical vocabulary.
///
/// Headers absent from the variant table pass through unchanged, so columns
/// added by future formats are preserved and ignored downstream. Idempotent
/// on already-canonical headers. Two distinct headers collapsing onto the
/// same canonical name within one file fails with `DuplicateHeader` instead
/// of letting one column overwrite the other.
pub fn normalize_headers(table: &mut Table) -> Result<(), PipelineError> {
    let mut sources: HashMap<String, String> = HashMap::new();
    let mut renamed = Vec::with_capacity(table.headers.len());

    for original in &table.headers {
        let canonical = match RENAMES.get(original.as_str()) {
            Some(c) => (*c).to_string(),
            None => original.clone(),
        };
        if CANONICAL_TARGETS.contains(canonical.as_str()) {
            if let Some(first) = sources.insert(canonical.clone(), original.clone()) {
                return Err(PipelineError::DuplicateHeader {
                    first,
                    second: original.clone(),
                    canonical,
                });
            }
        }
        renamed.push(canonical);
    }

    table.headers = renamed;
    Ok(())
}
