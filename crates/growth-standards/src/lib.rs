#![deny(unsafe_code)]

pub mod error;
pub mod digest;
pub mod manifest;
pub mod store;

pub use crate::error::StandardsError;
pub use crate::manifest::{Manifest, TableSource, default_file_name, parse_table_key};
pub use crate::store::{
    ReferenceStore, TableEntry, TableStatus, TableSummary, default_reference_dir,
};
