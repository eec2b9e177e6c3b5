//! Batch evaluation of a measurement CSV.
//!
//! Expected columns (case-insensitive, any order): `age`, `sex`, `height`,
//! and optionally `weight` and `id`. A bad row is reported on its own and
//! does not stop the batch.

use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, trace};

use growth_engine::GrowthEngine;
use growth_ingest::parse_f64;
use growth_model::Sex;

use crate::logging::redact_value;
use crate::report::{EvaluationReport, Measurement, evaluate_measurement};

const REQUIRED: [&str; 3] = ["age", "sex", "height"];

/// One parsed data row. `line` is the 1-based line in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchInput {
    pub line: usize,
    pub id: Option<String>,
    pub measurement: Result<Measurement, String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub line: usize,
    pub id: Option<String>,
    pub result: Result<EvaluationReport, String>,
}

impl BatchOutcome {
    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }
}

struct Columns {
    age: usize,
    sex: usize,
    height: usize,
    weight: Option<usize>,
    id: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
        };
        let missing: Vec<&str> = REQUIRED
            .iter()
            .copied()
            .filter(|name| find(*name).is_none())
            .collect();
        let (Some(age), Some(sex), Some(height)) = (find("age"), find("sex"), find("height"))
        else {
            bail!("missing required columns: {}", missing.join(", "));
        };
        Ok(Self {
            age,
            sex,
            height,
            weight: find("weight"),
            id: find("id"),
        })
    }
}

pub fn read_batch(path: &Path) -> Result<Vec<BatchInput>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("open batch file {}", path.display()))?;
    parse_batch(file).with_context(|| format!("read batch file {}", path.display()))
}

pub fn parse_batch<R: std::io::Read>(reader: R) -> Result<Vec<BatchInput>> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns = Columns::resolve(reader.headers()?)?;
    let mut inputs = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map_or(idx + 2, |position| position.line() as usize);
        if record.iter().all(str::is_empty) {
            continue;
        }
        let id = columns
            .id
            .and_then(|col| record.get(col))
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        inputs.push(BatchInput {
            line,
            id,
            measurement: parse_measurement(&record, &columns),
        });
    }
    debug!(rows = inputs.len(), "batch file parsed");
    Ok(inputs)
}

fn parse_measurement(record: &StringRecord, columns: &Columns) -> Result<Measurement, String> {
    let cell = |col: usize| record.get(col).unwrap_or("");
    let number = |col: usize, name: &str| {
        parse_f64(cell(col)).ok_or_else(|| format!("{name} is not a number: {:?}", cell(col)))
    };
    let age = number(columns.age, "age")?;
    let sex: Sex = cell(columns.sex).parse::<Sex>().map_err(|e| e.to_string())?;
    let height = number(columns.height, "height")?;
    let weight = match columns.weight {
        Some(col) if !cell(col).is_empty() => {
            let weight = number(col, "weight")?;
            if weight <= 0.0 {
                return Err(format!("weight must be positive: {:?}", cell(col)));
            }
            Some(weight)
        }
        _ => None,
    };
    Ok(Measurement::new(age, sex, height).with_weight(weight))
}

pub fn evaluate_batch(engine: &GrowthEngine, inputs: Vec<BatchInput>) -> Vec<BatchOutcome> {
    inputs
        .into_iter()
        .map(|input| {
            let result = input.measurement.and_then(|measurement| {
                evaluate_measurement(engine, &measurement).map_err(|e| e.to_string())
            });
            trace!(
                line = input.line,
                id = input.id.as_deref().map_or("-", redact_value),
                ok = result.is_ok(),
                "batch row evaluated"
            );
            BatchOutcome {
                line: input.line,
                id: input.id,
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_case_insensitive_and_reordered() {
        let data = "ID,Height,SEX,Age\nc1,110,male,5\n";
        let inputs = parse_batch(data.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].id.as_deref(), Some("c1"));
        assert_eq!(
            inputs[0].measurement,
            Ok(Measurement::new(5.0, Sex::Male, 110.0))
        );
    }

    #[test]
    fn missing_column_fails_the_file() {
        let error = parse_batch("age,height\n5,110\n".as_bytes()).unwrap_err();
        assert!(error.to_string().contains("sex"));
    }

    #[test]
    fn bad_rows_are_kept_with_their_error() {
        let data = "age,sex,height,weight\n5,x,110,\nfive,f,110,\n5,f,110,abc\n\n5,f,110,\n";
        let inputs = parse_batch(data.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 4);
        assert!(inputs[0].measurement.as_ref().unwrap_err().contains("sex"));
        assert!(inputs[1].measurement.as_ref().unwrap_err().contains("age"));
        assert!(inputs[2].measurement.as_ref().unwrap_err().contains("weight"));
        assert_eq!(inputs[3].line, 6);
        assert!(inputs[3].measurement.is_ok());
    }

    #[test]
    fn non_positive_weight_fails_the_row() {
        let data = "age,sex,height,weight\n5,m,110,0\n5,m,110,-2\n";
        let inputs = parse_batch(data.as_bytes()).unwrap();
        for input in &inputs {
            let error = input.measurement.as_ref().unwrap_err();
            assert!(error.contains("weight must be positive"), "{error}");
        }
    }
}
