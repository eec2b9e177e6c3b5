//! Reference table ingestion.
//!
//! Reads delimited reference files and repairs them into typed
//! [`ReferenceTable`](growth_model::ReferenceTable)s.

pub mod columns;
pub mod error;
pub mod normalize;
pub mod numeric;
pub mod raw_table;

pub use error::{IngestError, NormalizeError, Result};
pub use normalize::{
    AgeUnit, DAYS_PER_MONTH, DropReason, DroppedRow, NormalizeOptions, NormalizeReport,
    NormalizedTable, normalize, normalize_boundary, normalize_with_options,
};
pub use numeric::{coerce_f64, extract_numeral, parse_f64};
pub use raw_table::{RawTable, parse_raw_table, read_raw_table};
