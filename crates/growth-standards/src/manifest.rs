#![deny(unsafe_code)]

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use growth_ingest::AgeUnit;
use growth_model::{AgeBand, Sex, TableKey};

use crate::error::StandardsError;

pub const MANIFEST_FILE: &str = "manifest.toml";
pub const MANIFEST_SCHEMA: &str = "growth-reference.manifest";

/// Optional `manifest.toml` in the reference directory.
///
/// ```toml
/// [manifest]
/// schema = "growth-reference.manifest"
/// schema_version = 1
///
/// [[tables]]
/// key = "male_0_2"
/// path = "lhfa_boys_0_2.csv"
/// age_unit = "days"
/// sha256 = "<64 hex characters>"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub manifest: ManifestHeader,
    #[serde(default)]
    pub notes: Option<ManifestNotes>,
    #[serde(default)]
    pub tables: Vec<ManifestTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestHeader {
    pub schema: String,
    pub schema_version: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNotes {
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestTable {
    pub key: String,
    pub path: String,
    #[serde(default)]
    pub age_unit: AgeUnit,
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Where and how to load the table for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    pub key: TableKey,
    pub path: PathBuf,
    pub age_unit: AgeUnit,
    pub sha256: Option<String>,
}

/// Default file name for a key, e.g. `female_2_5.csv`.
pub fn default_file_name(key: TableKey) -> String {
    format!("{}.csv", key.id())
}

/// Parses a manifest key such as `male_0_2`.
pub fn parse_table_key(raw: &str) -> Option<TableKey> {
    let (sex, band) = raw.trim().split_once('_')?;
    let sex: Sex = sex.parse().ok()?;
    let band: AgeBand = band.parse().ok()?;
    Some(TableKey::new(sex, band))
}

pub fn load_manifest(path: &Path) -> Result<Manifest, StandardsError> {
    let contents = std::fs::read_to_string(path).map_err(|e| StandardsError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| StandardsError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolves one [`TableSource`] per key: manifest entries first, default
/// file names for keys the manifest does not list.
pub fn resolve_sources(
    manifest: Option<&Manifest>,
    root: &Path,
) -> Result<Vec<TableSource>, StandardsError> {
    let mut sources = Vec::with_capacity(TableKey::ALL.len());
    let mut seen: BTreeSet<TableKey> = BTreeSet::new();
    if let Some(manifest) = manifest {
        validate_header(&manifest.manifest)?;
        for entry in &manifest.tables {
            let key =
                parse_table_key(&entry.key).ok_or_else(|| StandardsError::InvalidManifest {
                    message: format!("unknown table key '{}'", entry.key),
                })?;
            if !seen.insert(key) {
                return Err(StandardsError::InvalidManifest {
                    message: format!("duplicate table key '{}'", entry.key),
                });
            }
            let relative = validate_path(&entry.path)?;
            let sha256 = match &entry.sha256 {
                Some(sha) => Some(validate_sha(sha, &entry.path)?),
                None => None,
            };
            sources.push(TableSource {
                key,
                path: root.join(relative),
                age_unit: entry.age_unit,
                sha256,
            });
        }
    }
    for key in TableKey::ALL {
        if !seen.contains(&key) {
            sources.push(TableSource {
                key,
                path: root.join(default_file_name(key)),
                age_unit: AgeUnit::Months,
                sha256: None,
            });
        }
    }
    sources.sort_by_key(|source| source.key);
    Ok(sources)
}

fn validate_header(header: &ManifestHeader) -> Result<(), StandardsError> {
    if header.schema != MANIFEST_SCHEMA {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema: {}", header.schema),
        });
    }
    if header.schema_version != 1 {
        return Err(StandardsError::InvalidManifest {
            message: format!("unsupported schema_version: {}", header.schema_version),
        });
    }
    Ok(())
}

fn validate_sha(sha: &str, path: &str) -> Result<String, StandardsError> {
    if sha.len() != 64 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(StandardsError::InvalidManifest {
            message: format!("sha256 for {path} must be 64 hex characters"),
        });
    }
    Ok(sha.to_ascii_lowercase())
}

fn validate_path(path: &str) -> Result<PathBuf, StandardsError> {
    if path.contains('\\') {
        return Err(StandardsError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(StandardsError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }

    for c in p.components() {
        if matches!(c, Component::ParentDir) {
            return Err(StandardsError::InvalidPath {
                path: PathBuf::from(path),
                message: "manifest path must not traverse out of the reference directory"
                    .to_string(),
            });
        }
    }

    Ok(p)
}
