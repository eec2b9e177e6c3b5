//! Normalization of raw reference files into typed tables.
//!
//! The first column is always the age. Remaining columns are resolved to
//! either L/M/S or the seven Z-boundary heights; every data row is then
//! coerced independently, so a malformed row is dropped without affecting
//! its neighbours. Rows come out sorted by age.

use serde::{Deserialize, Serialize};
use tracing::debug;

use growth_model::{BoundaryRow, LmsRow, ReferenceTable, TableShape};

use crate::columns::{ColumnTarget, boundary_targets, lms_targets, resolve_columns};
use crate::error::NormalizeError;
use crate::numeric::coerce_f64;
use crate::raw_table::RawTable;

/// Average days per month (365.25 / 12).
pub const DAYS_PER_MONTH: f64 = 30.4375;

/// Unit of the age column in a reference file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeUnit {
    #[default]
    Months,
    Days,
}

impl AgeUnit {
    pub fn to_months(self, value: f64) -> f64 {
        match self {
            AgeUnit::Months => value,
            AgeUnit::Days => value / DAYS_PER_MONTH,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    pub age_unit: AgeUnit,
    /// Force a table shape instead of preferring LMS when both are present.
    pub shape: Option<TableShape>,
}

impl NormalizeOptions {
    #[must_use]
    pub fn with_age_unit(mut self, unit: AgeUnit) -> Self {
        self.age_unit = unit;
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: TableShape) -> Self {
        self.shape = Some(shape);
        self
    }
}

/// Why a data row was left out of the normalized table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// No numeral in the age cell (e.g. a repeated header row).
    UnparsableAge,
    /// Negative age.
    InvalidAge,
    /// No numeral in a value cell.
    UnparsableValue { column: String },
    /// LMS row with a non-positive median or coefficient of variation.
    InvalidParameters,
    /// Boundary heights that do not increase from Z = -3 to Z = 3.
    NonMonotonic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedRow {
    /// Zero-based index into the raw data rows.
    pub index: usize,
    pub reason: DropReason,
}

/// Bookkeeping for one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub kept: usize,
    pub dropped: Vec<DroppedRow>,
}

impl NormalizeReport {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    fn drop_row(&mut self, index: usize, reason: DropReason) {
        debug!(row = index, reason = ?reason, "dropping reference row");
        self.dropped.push(DroppedRow { index, reason });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTable {
    pub table: ReferenceTable,
    pub report: NormalizeReport,
}

/// Normalizes with default options (months, LMS preferred).
pub fn normalize(raw: &RawTable) -> Result<NormalizedTable, NormalizeError> {
    normalize_with_options(raw, NormalizeOptions::default())
}

/// Normalizes into a boundary table even if L/M/S columns are also present.
pub fn normalize_boundary(raw: &RawTable) -> Result<NormalizedTable, NormalizeError> {
    normalize_with_options(
        raw,
        NormalizeOptions::default().with_shape(TableShape::Boundary),
    )
}

pub fn normalize_with_options(
    raw: &RawTable,
    options: NormalizeOptions,
) -> Result<NormalizedTable, NormalizeError> {
    if raw.is_empty() {
        return Err(NormalizeError::EmptyTable);
    }
    let lms = lms_targets();
    let boundary = boundary_targets();
    let lms_columns = resolve_columns(&raw.headers, &lms);
    let boundary_columns = resolve_columns(&raw.headers, &boundary);

    let shape = match options.shape {
        Some(TableShape::Lms) => {
            require_all(&lms, &lms_columns)?;
            TableShape::Lms
        }
        Some(TableShape::Boundary) => {
            require_all(&boundary, &boundary_columns)?;
            TableShape::Boundary
        }
        None => pick_shape(&lms, &lms_columns, &boundary, &boundary_columns)?,
    };

    let columns: Vec<usize> = match shape {
        TableShape::Lms => lms_columns.into_iter().flatten().collect(),
        TableShape::Boundary => boundary_columns.into_iter().flatten().collect(),
    };
    let mut report = NormalizeReport::default();
    let table = match shape {
        TableShape::Lms => {
            let mut rows = Vec::with_capacity(raw.rows.len());
            for index in 0..raw.rows.len() {
                let Some((age_months, values)) =
                    coerce_row(raw, index, &columns, options.age_unit, &mut report)
                else {
                    continue;
                };
                let row = LmsRow {
                    age_months,
                    l: values[0],
                    m: values[1],
                    s: values[2],
                };
                if row.m <= 0.0 || row.s <= 0.0 {
                    report.drop_row(index, DropReason::InvalidParameters);
                    continue;
                }
                rows.push(row);
            }
            rows.sort_by(|a, b| a.age_months.total_cmp(&b.age_months));
            report.kept = rows.len();
            ReferenceTable::Lms(rows)
        }
        TableShape::Boundary => {
            let mut rows = Vec::with_capacity(raw.rows.len());
            for index in 0..raw.rows.len() {
                let Some((age_months, values)) =
                    coerce_row(raw, index, &columns, options.age_unit, &mut report)
                else {
                    continue;
                };
                let mut heights = [0.0; 7];
                heights.copy_from_slice(&values);
                let row = BoundaryRow {
                    age_months,
                    heights,
                };
                if !row.is_monotonic() {
                    report.drop_row(index, DropReason::NonMonotonic);
                    continue;
                }
                rows.push(row);
            }
            rows.sort_by(|a, b| a.age_months.total_cmp(&b.age_months));
            report.kept = rows.len();
            ReferenceTable::Boundary(rows)
        }
    };
    Ok(NormalizedTable { table, report })
}

/// Coerces the age cell and the selected value cells of one row.
fn coerce_row(
    raw: &RawTable,
    index: usize,
    columns: &[usize],
    unit: AgeUnit,
    report: &mut NormalizeReport,
) -> Option<(f64, Vec<f64>)> {
    let Some(age) = coerce_f64(raw.cell(index, 0)) else {
        report.drop_row(index, DropReason::UnparsableAge);
        return None;
    };
    if age < 0.0 {
        report.drop_row(index, DropReason::InvalidAge);
        return None;
    }
    let mut values = Vec::with_capacity(columns.len());
    for &column in columns {
        match coerce_f64(raw.cell(index, column)) {
            Some(value) => values.push(value),
            None => {
                let name = raw.headers.get(column).cloned().unwrap_or_default();
                report.drop_row(index, DropReason::UnparsableValue { column: name });
                return None;
            }
        }
    }
    Some((unit.to_months(age), values))
}

fn missing_labels(targets: &[ColumnTarget], resolved: &[Option<usize>]) -> Vec<String> {
    targets
        .iter()
        .zip(resolved)
        .filter(|(_, column)| column.is_none())
        .map(|(target, _)| target.label.to_string())
        .collect()
}

fn require_all(targets: &[ColumnTarget], resolved: &[Option<usize>]) -> Result<(), NormalizeError> {
    let missing = missing_labels(targets, resolved);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(NormalizeError::MissingColumns { missing })
    }
}

/// LMS wins when complete; otherwise boundaries; otherwise report the
/// missing columns of whichever layout was closer to complete.
fn pick_shape(
    lms: &[ColumnTarget],
    lms_columns: &[Option<usize>],
    boundary: &[ColumnTarget],
    boundary_columns: &[Option<usize>],
) -> Result<TableShape, NormalizeError> {
    let lms_missing = missing_labels(lms, lms_columns);
    if lms_missing.is_empty() {
        return Ok(TableShape::Lms);
    }
    let boundary_missing = missing_labels(boundary, boundary_columns);
    if boundary_missing.is_empty() {
        return Ok(TableShape::Boundary);
    }
    let lms_found = (lms.len() - lms_missing.len()) as f64 / lms.len() as f64;
    let boundary_found =
        (boundary.len() - boundary_missing.len()) as f64 / boundary.len() as f64;
    let missing = if boundary_found > lms_found {
        boundary_missing
    } else {
        lms_missing
    };
    Err(NormalizeError::MissingColumns { missing })
}
