//! Height-for-age evaluation against the reference store.

use std::sync::Arc;

use tracing::debug;

use growth_model::{
    AgeBand, BoundaryRow, HeightForZ, LmsRow, ReferenceTable, ScoreMethod, Sex, TableKey,
    ZScoreQuery, ZScoreResult, years_to_months,
};
use growth_standards::ReferenceStore;

use crate::classify::classify;
use crate::error::EngineError;
use crate::matcher::nearest_row;
use crate::selector::select_table;
use crate::zscore::{boundary_height, boundary_z, lms_height, lms_z};

/// Evaluates measurements against a shared, read-only [`ReferenceStore`].
///
/// The engine holds no per-query state; clone it or share it across
/// threads freely.
#[derive(Debug, Clone)]
pub struct GrowthEngine {
    store: Arc<ReferenceStore>,
}

struct Scored {
    value: f64,
    matched_age_months: f64,
    method: ScoreMethod,
}

impl GrowthEngine {
    pub fn new(store: Arc<ReferenceStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Height-for-age Z-score and category for one child.
    pub fn evaluate_height_for_age(
        &self,
        age_years: f64,
        sex: Sex,
        height_cm: f64,
    ) -> Result<ZScoreResult, EngineError> {
        self.evaluate(&ZScoreQuery::new(age_years, sex, height_cm))
    }

    pub fn evaluate(&self, query: &ZScoreQuery) -> Result<ZScoreResult, EngineError> {
        validate_age(query.age_years)?;
        if !query.height_cm.is_finite() || query.height_cm <= 0.0 {
            return Err(EngineError::invalid(format!(
                "height must be a positive number of centimetres, got {}",
                query.height_cm
            )));
        }
        let key = select_table(query.age_years, query.sex);
        let target = query.age_months();
        let scored = self.score(
            key,
            target,
            |row| lms_z(row, query.height_cm),
            |row| boundary_z(row, query.height_cm),
        )?;
        let z = finite(scored.value, key, scored.matched_age_months)?;
        let category = classify(z);
        debug!(
            table = %key.id(),
            target_months = target,
            matched_months = scored.matched_age_months,
            method = %scored.method,
            z,
            category = %category,
            "height-for-age evaluated"
        );
        Ok(ZScoreResult {
            z,
            category,
            table: key,
            matched_age_months: scored.matched_age_months,
            method: scored.method,
        })
    }

    /// Height (cm) at score `z` for a child of the given age and sex.
    pub fn height_for_z(&self, age_years: f64, sex: Sex, z: f64) -> Result<HeightForZ, EngineError> {
        validate_age(age_years)?;
        if !z.is_finite() {
            return Err(EngineError::invalid(format!("z-score must be finite, got {z}")));
        }
        let key = select_table(age_years, sex);
        let scored = self.score(
            key,
            years_to_months(age_years),
            |row| lms_height(row, z).unwrap_or(f64::NAN),
            |row| boundary_height(row, z),
        )?;
        let height_cm = finite(scored.value, key, scored.matched_age_months)?;
        if height_cm <= 0.0 {
            return Err(EngineError::NonFiniteScore {
                key,
                age_months: scored.matched_age_months,
            });
        }
        Ok(HeightForZ {
            height_cm,
            z,
            table: key,
            matched_age_months: scored.matched_age_months,
            method: scored.method,
        })
    }

    /// Applies `lms` or `boundary` to the row of `key` nearest `target_months`.
    fn score(
        &self,
        key: TableKey,
        target_months: f64,
        lms: impl Fn(&LmsRow) -> f64,
        boundary: impl Fn(&BoundaryRow) -> f64,
    ) -> Result<Scored, EngineError> {
        let scored = match self.table(key)? {
            ReferenceTable::Lms(rows) => {
                let row = nearest_row(rows, target_months)
                    .ok_or(EngineError::NoMatchingRow { key })?;
                Scored {
                    value: lms(row),
                    matched_age_months: row.age_months,
                    method: ScoreMethod::Lms,
                }
            }
            ReferenceTable::Boundary(rows) => {
                let row = nearest_row(rows, target_months)
                    .ok_or(EngineError::NoMatchingRow { key })?;
                Scored {
                    value: boundary(row),
                    matched_age_months: row.age_months,
                    method: ScoreMethod::BoundaryInterpolation,
                }
            }
        };
        Ok(scored)
    }

    fn table(&self, key: TableKey) -> Result<&ReferenceTable, EngineError> {
        self.store
            .table(key)
            .map_err(|error| EngineError::from_store(key, error))
    }
}

fn validate_age(age_years: f64) -> Result<(), EngineError> {
    if !age_years.is_finite() || !(0.0..=AgeBand::MAX_AGE_YEARS).contains(&age_years) {
        return Err(EngineError::invalid(format!(
            "age must be between 0 and {} years, got {age_years}",
            AgeBand::MAX_AGE_YEARS
        )));
    }
    Ok(())
}

fn finite(value: f64, key: TableKey, age_months: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFiniteScore { key, age_months })
    }
}
