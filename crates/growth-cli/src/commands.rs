use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{info, info_span};

use growth_cli::batch::{evaluate_batch, read_batch};
use growth_cli::report::{Measurement, evaluate_measurement};
use growth_engine::GrowthEngine;
use growth_standards::{ReferenceStore, default_reference_dir};

use crate::cli::{BatchArgs, EvaluateArgs, HeightArgs};
use crate::summary::{print_batch, print_evaluation, print_height, print_tables};

pub fn load_store(reference_dir: Option<&Path>) -> Result<ReferenceStore> {
    let root = reference_dir.map_or_else(default_reference_dir, Path::to_path_buf);
    let span = info_span!("load_store", root = %root.display());
    let _guard = span.enter();
    let store = ReferenceStore::load(&root)
        .with_context(|| format!("load reference tables from {}", root.display()))?;
    info!(
        available = store.available_count(),
        "reference store ready"
    );
    Ok(store)
}

pub fn load_engine(reference_dir: Option<&Path>) -> Result<GrowthEngine> {
    Ok(GrowthEngine::new(Arc::new(load_store(reference_dir)?)))
}

pub fn run_evaluate(engine: &GrowthEngine, args: &EvaluateArgs) -> Result<()> {
    let measurement = Measurement::new(args.age, args.sex, args.height)
        .with_weight(args.weight)
        .with_blood_pressure(args.blood_pressure());
    let report = evaluate_measurement(engine, &measurement).context("evaluate height-for-age")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_evaluation(&report);
    }
    Ok(())
}

pub fn run_height(engine: &GrowthEngine, args: &HeightArgs) -> Result<()> {
    let result = engine
        .height_for_z(args.age, args.sex, args.z)
        .context("compute height for z-score")?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_height(&result);
    }
    Ok(())
}

/// Returns true when at least one row could not be evaluated.
pub fn run_batch(engine: &GrowthEngine, args: &BatchArgs) -> Result<bool> {
    let inputs = read_batch(&args.input)?;
    let outcomes = evaluate_batch(engine, inputs);
    let has_errors = outcomes.iter().any(|outcome| outcome.is_error());
    if args.json {
        let rows: Vec<_> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(report) => json!({ "line": outcome.line, "id": outcome.id, "report": report }),
                Err(message) => json!({ "line": outcome.line, "id": outcome.id, "error": message }),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print_batch(&outcomes);
    }
    Ok(has_errors)
}

pub fn run_tables(store: &ReferenceStore) {
    print_tables(&store.summary());
}
