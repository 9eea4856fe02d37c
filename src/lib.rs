//! Monthly municipal affiliation extracts → one combined dataset → yearly
//! average tables.
//!
//! Two decades of source files drift in their column spellings; the ingest
//! stage reconciles them onto a canonical vocabulary, cleans out footer and
//! placeholder rows, turns censored counts into missing values, and stamps
//! each row with the (year, month) taken from its file name. The combined
//! table is checkpointed to disk, the composite AFILIADOS measure derived,
//! and three independent grouped means written out.

pub mod aggregate;
pub mod clean;
pub mod cli;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metric;
pub mod persist;
pub mod pipeline;
pub mod schema;
pub mod table;
