//! Type-safe enumerations for growth reference lookups.
//!
//! These enums replace the free-text values (sex labels, age bands,
//! category names) that appear in reference files and caller input.
//!
//! # WHO Child Growth Standards
//!
//! - Length/height-for-age: 0-2 years (length) and 2-5 years (height)
//! - Growth Reference 2007: 5-19 years

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Biological sex used to pick the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Both sexes, in table order.
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    /// Returns the lowercase name used in file names and manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    /// Accepts the common spellings found in forms and reference files
    /// (`Male`, `M`, `boy`, `1` / `Female`, `F`, `girl`, `2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "MALE" | "M" | "BOY" | "BOYS" | "1" => Ok(Sex::Male),
            "FEMALE" | "F" | "GIRL" | "GIRLS" | "2" => Ok(Sex::Female),
            _ => Err(ModelError::UnknownSex(s.to_string())),
        }
    }
}

/// Age band for which a separate reference table is published.
///
/// - **Infant**: `[0, 2)` years
/// - **Preschool**: `[2, 5)` years
/// - **School**: `[5, 19]` years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBand {
    Infant,
    Preschool,
    School,
}

impl AgeBand {
    /// All bands, youngest first.
    pub const ALL: [AgeBand; 3] = [AgeBand::Infant, AgeBand::Preschool, AgeBand::School];

    /// Oldest age (years) covered by the reference tables.
    pub const MAX_AGE_YEARS: f64 = 19.0;

    /// Maps an age in years to its band.
    ///
    /// Ages past [`AgeBand::MAX_AGE_YEARS`] stay in the school band.
    pub fn for_age(age_years: f64) -> Self {
        if age_years < 2.0 {
            AgeBand::Infant
        } else if age_years < 5.0 {
            AgeBand::Preschool
        } else {
            AgeBand::School
        }
    }

    /// Returns the file-name fragment for this band (`0_2`, `2_5`, `5_19`).
    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBand::Infant => "0_2",
            AgeBand::Preschool => "2_5",
            AgeBand::School => "5_19",
        }
    }

    /// Returns the human-readable year range.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Infant => "0-2 years",
            AgeBand::Preschool => "2-5 years",
            AgeBand::School => "5-19 years",
        }
    }

    /// Returns the `[start, end)` range in years.
    pub fn years(&self) -> (f64, f64) {
        match self {
            AgeBand::Infant => (0.0, 2.0),
            AgeBand::Preschool => (2.0, 5.0),
            AgeBand::School => (5.0, Self::MAX_AGE_YEARS),
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AgeBand {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");

        match normalized.as_str() {
            "0_2" | "infant" => Ok(AgeBand::Infant),
            "2_5" | "preschool" => Ok(AgeBand::Preschool),
            "5_19" | "school" => Ok(AgeBand::School),
            _ => Err(ModelError::UnknownAgeBand(s.to_string())),
        }
    }
}

/// Height-for-age interpretation of a Z-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GrowthCategory {
    /// Z below -3.
    SevereStunting,
    /// Z in `[-3, -2)`.
    Stunted,
    /// Z in `[-2, 2]`.
    Normal,
    /// Z above 2.
    Tall,
}

impl GrowthCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthCategory::SevereStunting => "Severe stunting",
            GrowthCategory::Stunted => "Stunted",
            GrowthCategory::Normal => "Normal",
            GrowthCategory::Tall => "Tall",
        }
    }

    /// Returns true for the two stunting categories.
    pub fn is_stunted(&self) -> bool {
        matches!(
            self,
            GrowthCategory::SevereStunting | GrowthCategory::Stunted
        )
    }
}

impl fmt::Display for GrowthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which transform produced a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMethod {
    /// Box-Cox LMS transform.
    Lms,
    /// Piecewise-linear interpolation over the Z = -3..+3 boundary heights.
    BoundaryInterpolation,
}

impl ScoreMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMethod::Lms => "LMS",
            ScoreMethod::BoundaryInterpolation => "boundary interpolation",
        }
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
