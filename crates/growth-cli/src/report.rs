//! Combined growth and screening result for one child.

use serde::Serialize;

use growth_engine::{
    BloodPressureCategory, BmiCategory, EngineError, GrowthEngine, body_mass_index,
    classify_blood_pressure, classify_bmi,
};
use growth_model::{Sex, ZScoreResult};

/// Measurements taken at one visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub age_years: f64,
    pub sex: Sex,
    pub height_cm: f64,
    pub weight_kg: Option<f64>,
    /// Systolic and diastolic, mmHg.
    pub blood_pressure: Option<(u32, u32)>,
}

impl Measurement {
    pub fn new(age_years: f64, sex: Sex, height_cm: f64) -> Self {
        Self {
            age_years,
            sex,
            height_cm,
            weight_kg: None,
            blood_pressure: None,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight_kg: Option<f64>) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    #[must_use]
    pub fn with_blood_pressure(mut self, reading: Option<(u32, u32)>) -> Self {
        self.blood_pressure = reading;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReport {
    pub value: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BloodPressureReport {
    pub systolic: u32,
    pub diastolic: u32,
    pub category: BloodPressureCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub age_years: f64,
    pub sex: Sex,
    pub height_cm: f64,
    pub height_for_age: ZScoreResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<BmiReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<BloodPressureReport>,
}

/// Runs height-for-age and whichever screening inputs are present.
///
/// Only the growth evaluation can fail; a weight that yields no BMI is
/// left out of the report.
pub fn evaluate_measurement(
    engine: &GrowthEngine,
    measurement: &Measurement,
) -> Result<EvaluationReport, EngineError> {
    let height_for_age = engine.evaluate_height_for_age(
        measurement.age_years,
        measurement.sex,
        measurement.height_cm,
    )?;
    let bmi = measurement
        .weight_kg
        .and_then(|weight| body_mass_index(weight, measurement.height_cm))
        .map(|value| BmiReport {
            value,
            category: classify_bmi(value),
        });
    let blood_pressure = measurement
        .blood_pressure
        .map(|(systolic, diastolic)| BloodPressureReport {
            systolic,
            diastolic,
            category: classify_blood_pressure(measurement.age_years, systolic, diastolic),
        });
    Ok(EvaluationReport {
        age_years: measurement.age_years,
        sex: measurement.sex,
        height_cm: measurement.height_cm,
        height_for_age,
        bmi,
        blood_pressure,
    })
}
