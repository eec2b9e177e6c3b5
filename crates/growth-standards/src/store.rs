#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, warn};

use growth_ingest::{NormalizeOptions, NormalizeReport, normalize_with_options, read_raw_table};
use growth_model::{ReferenceTable, TableKey, TableShape};

use crate::error::StandardsError;
use crate::digest::verify_digest;
use crate::manifest::{MANIFEST_FILE, TableSource, load_manifest, resolve_sources};

const REFERENCE_ENV_VAR: &str = "GROWTH_REFERENCE_DIR";

/// Reference directory from `GROWTH_REFERENCE_DIR`, or `./reference`.
pub fn default_reference_dir() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from("reference")
}

/// Load outcome for a single key.
#[derive(Debug, Clone)]
pub enum TableStatus {
    Ready {
        table: ReferenceTable,
        report: NormalizeReport,
    },
    Unavailable {
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct TableEntry {
    pub key: TableKey,
    pub source: Option<PathBuf>,
    pub status: TableStatus,
}

/// The six growth reference tables, loaded once and read-only afterwards.
///
/// A key whose file is missing or broken stays in the store as
/// [`TableStatus::Unavailable`]; the other keys are unaffected.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    root: Option<PathBuf>,
    entries: BTreeMap<TableKey, TableEntry>,
}

/// Per-key row in [`ReferenceStore::summary`].
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub key: TableKey,
    pub source: Option<PathBuf>,
    pub shape: Option<TableShape>,
    pub rows: usize,
    pub dropped: usize,
    pub age_range: Option<(f64, f64)>,
    pub unavailable: Option<String>,
}

impl ReferenceStore {
    /// Loads every key from `root`, honouring `manifest.toml` when present.
    ///
    /// Only an unreadable or invalid manifest fails the whole load.
    pub fn load(root: &Path) -> Result<Self, StandardsError> {
        let manifest_path = root.join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            Some(load_manifest(&manifest_path)?)
        } else {
            None
        };
        let sources = resolve_sources(manifest.as_ref(), root)?;
        let mut entries = BTreeMap::new();
        for source in sources {
            let status = match load_table(&source) {
                Ok((table, report)) => {
                    info!(
                        table = %source.key.id(),
                        path = %source.path.display(),
                        shape = %table.shape(),
                        rows = report.kept,
                        dropped = report.dropped_count(),
                        "reference table loaded"
                    );
                    TableStatus::Ready { table, report }
                }
                Err(error) => {
                    warn!(
                        table = %source.key.id(),
                        path = %source.path.display(),
                        error = %error,
                        "reference table unavailable"
                    );
                    TableStatus::Unavailable {
                        reason: error.to_string(),
                    }
                }
            };
            entries.insert(
                source.key,
                TableEntry {
                    key: source.key,
                    source: Some(source.path),
                    status,
                },
            );
        }
        Ok(Self {
            root: Some(root.to_path_buf()),
            entries,
        })
    }

    /// Builds a store from tables already in memory. Keys not supplied are
    /// unavailable.
    pub fn from_tables(tables: impl IntoIterator<Item = (TableKey, ReferenceTable)>) -> Self {
        let mut entries: BTreeMap<TableKey, TableEntry> = TableKey::ALL
            .into_iter()
            .map(|key| {
                (
                    key,
                    TableEntry {
                        key,
                        source: None,
                        status: TableStatus::Unavailable {
                            reason: "no table provided".to_string(),
                        },
                    },
                )
            })
            .collect();
        for (key, table) in tables {
            let report = NormalizeReport {
                kept: table.len(),
                dropped: Vec::new(),
            };
            entries.insert(
                key,
                TableEntry {
                    key,
                    source: None,
                    status: TableStatus::Ready { table, report },
                },
            );
        }
        Self {
            root: None,
            entries,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn entry(&self, key: TableKey) -> Option<&TableEntry> {
        self.entries.get(&key)
    }

    /// Returns the table for `key` or why it cannot be used.
    pub fn table(&self, key: TableKey) -> Result<&ReferenceTable, StandardsError> {
        match self.entries.get(&key).map(|entry| &entry.status) {
            Some(TableStatus::Ready { table, .. }) => Ok(table),
            Some(TableStatus::Unavailable { reason }) => Err(StandardsError::Unavailable {
                key,
                reason: reason.clone(),
            }),
            None => Err(StandardsError::Unavailable {
                key,
                reason: "no table provided".to_string(),
            }),
        }
    }

    pub fn is_available(&self, key: TableKey) -> bool {
        self.table(key).is_ok()
    }

    pub fn available_count(&self) -> usize {
        TableKey::ALL
            .iter()
            .filter(|key| self.is_available(**key))
            .count()
    }

    pub fn summary(&self) -> Vec<TableSummary> {
        self.entries
            .values()
            .map(|entry| match &entry.status {
                TableStatus::Ready { table, report } => TableSummary {
                    key: entry.key,
                    source: entry.source.clone(),
                    shape: Some(table.shape()),
                    rows: table.len(),
                    dropped: report.dropped_count(),
                    age_range: table.age_range(),
                    unavailable: None,
                },
                TableStatus::Unavailable { reason } => TableSummary {
                    key: entry.key,
                    source: entry.source.clone(),
                    shape: None,
                    rows: 0,
                    dropped: 0,
                    age_range: None,
                    unavailable: Some(reason.clone()),
                },
            })
            .collect()
    }
}

fn load_table(source: &TableSource) -> Result<(ReferenceTable, NormalizeReport), StandardsError> {
    if let Some(expected) = &source.sha256 {
        verify_digest(&source.path, expected)?;
    }
    let raw = read_raw_table(&source.path)?;
    let options = NormalizeOptions::default().with_age_unit(source.age_unit);
    let normalized =
        normalize_with_options(&raw, options).map_err(|e| StandardsError::Normalize {
            path: source.path.clone(),
            source: e,
        })?;
    Ok((normalized.table, normalized.report))
}
