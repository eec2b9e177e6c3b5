//! Normalized reference tables.
//!
//! A reference file is reduced to one of two fixed schemas: LMS rows
//! (`age_months, L, M, S`) or boundary rows (`age_months` plus the heights
//! at Z = -3..+3). [`ReferenceTable`] tags which one a table carries so the
//! calculator never hunts for columns at query time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::enums::{AgeBand, Sex};

/// Z-scores of the seven boundary columns, in column order.
pub const Z_LEVELS: [f64; 7] = [-3.0, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];

/// Identifies one of the six reference tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableKey {
    pub sex: Sex,
    pub band: AgeBand,
}

impl TableKey {
    /// Every key, males first, youngest band first.
    pub const ALL: [TableKey; 6] = [
        TableKey::new(Sex::Male, AgeBand::Infant),
        TableKey::new(Sex::Male, AgeBand::Preschool),
        TableKey::new(Sex::Male, AgeBand::School),
        TableKey::new(Sex::Female, AgeBand::Infant),
        TableKey::new(Sex::Female, AgeBand::Preschool),
        TableKey::new(Sex::Female, AgeBand::School),
    ];

    pub const fn new(sex: Sex, band: AgeBand) -> Self {
        Self { sex, band }
    }

    /// Stable identifier used for manifest entries and default file names,
    /// e.g. `male_0_2`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.sex.as_str(), self.band.as_str())
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sex, self.band)
    }
}

/// Anything positioned on the age axis of a reference table.
pub trait AgeRow {
    fn age_months(&self) -> f64;
}

/// Box-Cox power (L), median (M) and coefficient of variation (S) at one age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LmsRow {
    pub age_months: f64,
    pub l: f64,
    pub m: f64,
    pub s: f64,
}

impl AgeRow for LmsRow {
    fn age_months(&self) -> f64 {
        self.age_months
    }
}

/// Heights (cm) at Z = -3, -2, -1, 0, 1, 2, 3 for one age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRow {
    pub age_months: f64,
    pub heights: [f64; 7],
}

impl BoundaryRow {
    /// Control points `(height, z)` in ascending order.
    pub fn control_points(&self) -> [(f64, f64); 7] {
        let mut points = [(0.0, 0.0); 7];
        for (idx, point) in points.iter_mut().enumerate() {
            *point = (self.heights[idx], Z_LEVELS[idx]);
        }
        points
    }

    /// Height at Z = 0.
    pub fn median(&self) -> f64 {
        self.heights[3]
    }

    /// Returns true when heights increase strictly from Z = -3 to Z = 3.
    pub fn is_monotonic(&self) -> bool {
        self.heights.windows(2).all(|pair| pair[0] < pair[1])
    }
}

impl AgeRow for BoundaryRow {
    fn age_months(&self) -> f64 {
        self.age_months
    }
}

/// Column layout of a normalized table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableShape {
    Lms,
    Boundary,
}

impl TableShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableShape::Lms => "LMS",
            TableShape::Boundary => "Z boundaries",
        }
    }
}

impl fmt::Display for TableShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized reference table, rows ordered by `age_months`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "rows", rename_all = "snake_case")]
pub enum ReferenceTable {
    Lms(Vec<LmsRow>),
    Boundary(Vec<BoundaryRow>),
}

impl ReferenceTable {
    pub fn shape(&self) -> TableShape {
        match self {
            ReferenceTable::Lms(_) => TableShape::Lms,
            ReferenceTable::Boundary(_) => TableShape::Boundary,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReferenceTable::Lms(rows) => rows.len(),
            ReferenceTable::Boundary(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the `(first, last)` ages in months, if any rows exist.
    pub fn age_range(&self) -> Option<(f64, f64)> {
        match self {
            ReferenceTable::Lms(rows) => age_range(rows),
            ReferenceTable::Boundary(rows) => age_range(rows),
        }
    }
}

fn age_range<R: AgeRow>(rows: &[R]) -> Option<(f64, f64)> {
    let first = rows.first()?.age_months();
    let last = rows.last()?.age_months();
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keys_are_unique() {
        let mut ids: Vec<String> = TableKey::ALL.iter().map(TableKey::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert!(ids.contains(&"female_5_19".to_string()));
    }

    #[test]
    fn boundary_monotonicity() {
        let row = BoundaryRow {
            age_months: 60.0,
            heights: [95.0, 100.0, 105.0, 110.0, 115.0, 120.0, 125.0],
        };
        assert!(row.is_monotonic());
        assert_eq!(row.median(), 110.0);
        assert_eq!(row.control_points()[0], (95.0, -3.0));

        let flat = BoundaryRow {
            age_months: 60.0,
            heights: [95.0, 100.0, 100.0, 110.0, 115.0, 120.0, 125.0],
        };
        assert!(!flat.is_monotonic());
    }
}
