use proptest::prelude::*;

use growth_engine::classify;
use growth_engine::zscore::{boundary_height, boundary_z, lms_height, lms_z};
use growth_model::{BoundaryRow, GrowthCategory, LmsRow};

fn lms_row() -> impl Strategy<Value = LmsRow> {
    (-2.0f64..2.0, 40.0f64..180.0, 0.01f64..0.2).prop_map(|(l, m, s)| LmsRow {
        age_months: 60.0,
        l,
        m,
        s,
    })
}

fn boundary_row() -> impl Strategy<Value = BoundaryRow> {
    (40.0f64..150.0, prop::array::uniform7(0.5f64..8.0)).prop_map(|(start, steps)| {
        let mut heights = [0.0; 7];
        let mut current = start;
        for (slot, step) in heights.iter_mut().zip(steps) {
            *slot = current;
            current += step;
        }
        BoundaryRow {
            age_months: 36.0,
            heights,
        }
    })
}

fn rank(category: GrowthCategory) -> u8 {
    match category {
        GrowthCategory::SevereStunting => 0,
        GrowthCategory::Stunted => 1,
        GrowthCategory::Normal => 2,
        GrowthCategory::Tall => 3,
    }
}

proptest! {
    #[test]
    fn median_scores_zero(row in lms_row()) {
        prop_assert!(lms_z(&row, row.m).abs() < 1e-9);
    }

    #[test]
    fn lms_is_increasing_in_height(row in lms_row(), a in 30.0f64..200.0, b in 30.0f64..200.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(lms_z(&row, low) <= lms_z(&row, high));
    }

    #[test]
    fn lms_inverse_recovers_score(row in lms_row(), z in -3.0f64..3.0) {
        if let Some(height) = lms_height(&row, z) {
            prop_assert!((lms_z(&row, height) - z).abs() < 1e-6);
        }
    }

    #[test]
    fn interpolation_is_increasing(row in boundary_row(), a in 20.0f64..220.0, b in 20.0f64..220.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(boundary_z(&row, low) <= boundary_z(&row, high) + 1e-12);
    }

    #[test]
    fn interpolation_hits_control_points(row in boundary_row(), idx in 0usize..7) {
        let z = boundary_z(&row, row.heights[idx]);
        prop_assert!((z - (idx as f64 - 3.0)).abs() < 1e-9);
    }

    #[test]
    fn interpolation_inverse_recovers_height(row in boundary_row(), z in -4.0f64..4.0) {
        let height = boundary_height(&row, z);
        prop_assert!((boundary_z(&row, height) - z).abs() < 1e-6);
    }

    #[test]
    fn categories_are_ordered(a in -10.0f64..10.0, b in -10.0f64..10.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(rank(classify(low)) <= rank(classify(high)));
    }
}
