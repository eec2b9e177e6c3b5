//! Tests for growth-model types.

use growth_model::{
    AgeBand, GrowthCategory, LmsRow, ReferenceTable, ScoreMethod, Sex, TableKey, TableShape,
    ZScoreQuery, ZScoreResult,
};

#[test]
fn reference_table_reports_shape_and_range() {
    let table = ReferenceTable::Lms(vec![
        LmsRow {
            age_months: 24.0,
            l: 1.0,
            m: 87.1,
            s: 0.035,
        },
        LmsRow {
            age_months: 36.0,
            l: 1.0,
            m: 96.1,
            s: 0.037,
        },
    ]);
    assert_eq!(table.shape(), TableShape::Lms);
    assert_eq!(table.len(), 2);
    assert_eq!(table.age_range(), Some((24.0, 36.0)));

    let empty = ReferenceTable::Boundary(vec![]);
    assert!(empty.is_empty());
    assert_eq!(empty.age_range(), None);
}

#[test]
fn query_converts_age_to_months() {
    let query = ZScoreQuery::new(5.0, Sex::Male, 110.0);
    assert_eq!(query.age_months(), 60.0);
}

#[test]
fn result_serializes() {
    let result = ZScoreResult {
        z: -2.5,
        category: GrowthCategory::Stunted,
        table: TableKey::new(Sex::Female, AgeBand::Preschool),
        matched_age_months: 36.0,
        method: ScoreMethod::Lms,
    };
    let json = serde_json::to_string(&result).expect("serialize result");
    assert!(json.contains("\"sex\":\"female\""));
    assert!(json.contains("\"band\":\"preschool\""));
    let round: ZScoreResult = serde_json::from_str(&json).expect("deserialize result");
    assert_eq!(round, result);
}

#[test]
fn category_labels() {
    assert_eq!(GrowthCategory::SevereStunting.to_string(), "Severe stunting");
    assert!(GrowthCategory::Stunted.is_stunted());
    assert!(!GrowthCategory::Tall.is_stunted());
}

#[test]
fn table_key_display_and_id() {
    let key = TableKey::new(Sex::Male, AgeBand::Infant);
    assert_eq!(key.id(), "male_0_2");
    assert_eq!(key.to_string(), "male 0-2 years");
}
