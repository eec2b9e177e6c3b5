//! Fixed-threshold screening shown next to the growth result.
//!
//! Neither classifier uses reference tables. The BMI cut points are the
//! adult ones (18.5 / 25 / 30); blood pressure uses fixed systolic and
//! diastolic bands and is not interpreted under one year of age.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// BMI in kg/m². `None` unless both inputs are positive and finite.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if !(weight_kg.is_finite() && height_cm.is_finite()) || weight_kg <= 0.0 || height_cm <= 0.0 {
        return None;
    }
    let height_m = height_cm / 100.0;
    Some(weight_kg / (height_m * height_m))
}

pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodPressureCategory {
    /// Under one year; thresholds do not apply.
    Unreliable,
    Normal,
    Elevated,
    Stage1Hypertension,
    Stage2Hypertension,
}

impl BloodPressureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BloodPressureCategory::Unreliable => "Not interpretable under 1 year",
            BloodPressureCategory::Normal => "Normal blood pressure",
            BloodPressureCategory::Elevated => "Elevated blood pressure",
            BloodPressureCategory::Stage1Hypertension => "Stage 1 hypertension",
            BloodPressureCategory::Stage2Hypertension => "Stage 2 hypertension",
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies a reading in mmHg. Bands are checked in order, so the first
/// matching band wins (a diastolic of 70 is elevated whatever the systolic).
pub fn classify_blood_pressure(
    age_years: f64,
    systolic: u32,
    diastolic: u32,
) -> BloodPressureCategory {
    if age_years < 1.0 {
        return BloodPressureCategory::Unreliable;
    }
    if systolic < 90 && diastolic < 60 {
        BloodPressureCategory::Normal
    } else if (90..95).contains(&systolic) || (60..80).contains(&diastolic) {
        BloodPressureCategory::Elevated
    } else if (95..120).contains(&systolic) || (80..90).contains(&diastolic) {
        BloodPressureCategory::Stage1Hypertension
    } else {
        BloodPressureCategory::Stage2Hypertension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_value_and_bands() {
        let bmi = body_mass_index(20.0, 100.0).unwrap();
        assert!((bmi - 20.0).abs() < 1e-9);
        assert_eq!(body_mass_index(0.0, 100.0), None);
        assert_eq!(body_mass_index(20.0, -1.0), None);

        assert_eq!(classify_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
    }

    #[test]
    fn blood_pressure_bands() {
        assert_eq!(
            classify_blood_pressure(0.5, 80, 50),
            BloodPressureCategory::Unreliable
        );
        assert_eq!(
            classify_blood_pressure(6.0, 89, 59),
            BloodPressureCategory::Normal
        );
        assert_eq!(
            classify_blood_pressure(6.0, 92, 50),
            BloodPressureCategory::Elevated
        );
        assert_eq!(
            classify_blood_pressure(6.0, 130, 70),
            BloodPressureCategory::Elevated
        );
        assert_eq!(
            classify_blood_pressure(6.0, 100, 50),
            BloodPressureCategory::Stage1Hypertension
        );
        assert_eq!(
            classify_blood_pressure(6.0, 85, 85),
            BloodPressureCategory::Stage1Hypertension
        );
        assert_eq!(
            classify_blood_pressure(6.0, 125, 95),
            BloodPressureCategory::Stage2Hypertension
        );
    }
}
