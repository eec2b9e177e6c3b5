//! Growth reference evaluation engine.
//!
//! Control flow for one query: [`select_table`] picks the table key,
//! the store hands back the normalized table, [`nearest_row`] finds the
//! closest age, [`zscore`] transforms the height, and [`classify`] labels
//! the score.

pub mod classify;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod screening;
pub mod selector;
pub mod zscore;

pub use classify::classify;
pub use engine::GrowthEngine;
pub use error::EngineError;
pub use matcher::nearest_row;
pub use screening::{
    BloodPressureCategory, BmiCategory, body_mass_index, classify_blood_pressure, classify_bmi,
};
pub use selector::select_table;
