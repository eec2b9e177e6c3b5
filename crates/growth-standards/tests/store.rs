use std::path::{Path, PathBuf};

use growth_model::{AgeBand, ReferenceTable, Sex, TableKey, TableShape};
use growth_standards::digest::sha256_hex;
use growth_standards::{ReferenceStore, StandardsError};

fn fixtures() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/reference")
}

fn ages(table: &ReferenceTable) -> Vec<f64> {
    match table {
        ReferenceTable::Lms(rows) => rows.iter().map(|r| r.age_months).collect(),
        ReferenceTable::Boundary(rows) => rows.iter().map(|r| r.age_months).collect(),
    }
}

#[test]
fn loads_fixture_tables() {
    let store = ReferenceStore::load(&fixtures()).expect("load fixtures");
    assert_eq!(store.available_count(), 5);

    let male_school = store
        .table(TableKey::new(Sex::Male, AgeBand::School))
        .expect("male 5-19");
    assert_eq!(male_school.shape(), TableShape::Lms);
    assert_eq!(ages(male_school), vec![60.0, 72.0, 84.0, 96.0]);

    let male_preschool = store
        .table(TableKey::new(Sex::Male, AgeBand::Preschool))
        .expect("male 2-5");
    assert_eq!(ages(male_preschool), vec![24.0, 36.0, 48.0, 60.0]);

    let female_infant = store
        .table(TableKey::new(Sex::Female, AgeBand::Infant))
        .expect("female 0-2");
    assert_eq!(female_infant.shape(), TableShape::Boundary);
    assert_eq!(ages(female_infant), vec![0.0, 6.0, 12.0, 24.0]);

    let female_preschool = store
        .table(TableKey::new(Sex::Female, AgeBand::Preschool))
        .expect("female 2-5");
    assert_eq!(female_preschool.shape(), TableShape::Boundary);
}

#[test]
fn missing_file_only_affects_its_key() {
    let store = ReferenceStore::load(&fixtures()).expect("load fixtures");
    let key = TableKey::new(Sex::Female, AgeBand::School);
    let error = store.table(key).unwrap_err();
    assert!(matches!(error, StandardsError::Unavailable { .. }));
    assert!(error.to_string().contains("reference file not found"));
    assert!(store.is_available(TableKey::new(Sex::Male, AgeBand::School)));
}

#[test]
fn summary_lists_every_key() {
    let store = ReferenceStore::load(&fixtures()).expect("load fixtures");
    let summary = store.summary();
    assert_eq!(summary.len(), 6);

    let male_school = summary
        .iter()
        .find(|s| s.key == TableKey::new(Sex::Male, AgeBand::School))
        .unwrap();
    assert_eq!(male_school.rows, 4);
    assert_eq!(male_school.dropped, 1);
    assert_eq!(male_school.age_range, Some((60.0, 96.0)));

    let female_school = summary
        .iter()
        .find(|s| s.key == TableKey::new(Sex::Female, AgeBand::School))
        .unwrap();
    assert!(female_school.shape.is_none());
    assert!(female_school.unavailable.is_some());
}

#[test]
fn missing_directory_leaves_every_key_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = ReferenceStore::load(&dir.path().join("absent")).expect("load");
    assert_eq!(store.available_count(), 0);
    assert_eq!(store.summary().len(), 6);
}

fn write_manifest(dir: &Path, sha256: &str) {
    std::fs::write(
        dir.join("manifest.toml"),
        format!(
            "[manifest]\nschema = \"growth-reference.manifest\"\nschema_version = 1\n\n\
             [[tables]]\nkey = \"male_5_19\"\npath = \"boys.csv\"\nsha256 = \"{sha256}\"\n"
        ),
    )
    .unwrap();
}

#[test]
fn sha256_pins_are_verified() {
    let dir = tempfile::tempdir().unwrap();
    let contents = "Month,L,M,S\n60,1,110,0.05\n";
    std::fs::write(dir.path().join("boys.csv"), contents).unwrap();
    let key = TableKey::new(Sex::Male, AgeBand::School);

    write_manifest(dir.path(), &sha256_hex(contents.as_bytes()));
    let store = ReferenceStore::load(dir.path()).expect("load");
    assert!(store.is_available(key));

    write_manifest(dir.path(), &"0".repeat(64));
    let store = ReferenceStore::load(dir.path()).expect("load");
    let error = store.table(key).unwrap_err();
    assert!(error.to_string().contains("sha256 mismatch"));
}

#[test]
fn invalid_manifest_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("manifest.toml"),
        "[manifest]\nschema = \"other\"\nschema_version = 1\n",
    )
    .unwrap();
    assert!(matches!(
        ReferenceStore::load(dir.path()),
        Err(StandardsError::InvalidManifest { .. })
    ));

    std::fs::write(dir.path().join("manifest.toml"), "not = [valid").unwrap();
    assert!(matches!(
        ReferenceStore::load(dir.path()),
        Err(StandardsError::Toml { .. })
    ));
}

#[test]
fn structural_errors_mark_the_key_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("male_0_2.csv"), "Month,L,M\n0,1,49.9\n").unwrap();
    let store = ReferenceStore::load(dir.path()).expect("load");
    let error = store
        .table(TableKey::new(Sex::Male, AgeBand::Infant))
        .unwrap_err();
    assert!(error.to_string().contains("missing required columns: S"));
}

#[test]
fn in_memory_store() {
    let key = TableKey::new(Sex::Female, AgeBand::Infant);
    let store = ReferenceStore::from_tables([(key, ReferenceTable::Lms(vec![]))]);
    assert!(store.is_available(key));
    assert_eq!(store.available_count(), 1);
    assert!(store.root().is_none());
}
