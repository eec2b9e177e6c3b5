//! Query and result types exchanged with the evaluation engine.

use serde::{Deserialize, Serialize};

use crate::enums::{GrowthCategory, ScoreMethod, Sex};
use crate::table::TableKey;

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Age in years converted to months, the unit of the reference tables.
pub fn years_to_months(age_years: f64) -> f64 {
    age_years * MONTHS_PER_YEAR
}

/// A single height-for-age evaluation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreQuery {
    pub age_years: f64,
    pub sex: Sex,
    pub height_cm: f64,
}

impl ZScoreQuery {
    pub fn new(age_years: f64, sex: Sex, height_cm: f64) -> Self {
        Self {
            age_years,
            sex,
            height_cm,
        }
    }

    pub fn age_months(&self) -> f64 {
        years_to_months(self.age_years)
    }
}

/// Height-for-age Z-score with its interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreResult {
    pub z: f64,
    pub category: GrowthCategory,
    /// Table the score was computed against.
    pub table: TableKey,
    /// Age of the reference row that was used.
    pub matched_age_months: f64,
    pub method: ScoreMethod,
}

/// Height corresponding to a Z-score (inverse transform).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeightForZ {
    pub height_cm: f64,
    pub z: f64,
    pub table: TableKey,
    pub matched_age_months: f64,
    pub method: ScoreMethod,
}
