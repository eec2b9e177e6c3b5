//! Data model for growth-reference evaluation.

pub mod enums;
pub mod error;
pub mod query;
pub mod table;

pub use enums::{AgeBand, GrowthCategory, ScoreMethod, Sex};
pub use error::{ModelError, Result};
pub use query::{HeightForZ, MONTHS_PER_YEAR, ZScoreQuery, ZScoreResult, years_to_months};
pub use table::{AgeRow, BoundaryRow, LmsRow, ReferenceTable, TableKey, TableShape, Z_LEVELS};
