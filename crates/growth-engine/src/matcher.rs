//! Nearest-age row lookup.

use growth_model::AgeRow;

/// Returns the row whose age is closest to `target_months`.
///
/// Linear scan over the borrowed rows; on equal distance the earlier row
/// wins. `None` only for an empty table.
pub fn nearest_row<R: AgeRow>(rows: &[R], target_months: f64) -> Option<&R> {
    let mut best: Option<(&R, f64)> = None;
    for row in rows {
        let distance = (row.age_months() - target_months).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((row, distance)),
        }
    }
    best.map(|(row, _)| row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_model::LmsRow;

    fn rows(ages: &[f64]) -> Vec<LmsRow> {
        ages.iter()
            .map(|&age_months| LmsRow {
                age_months,
                l: 1.0,
                m: 100.0,
                s: 0.04,
            })
            .collect()
    }

    #[test]
    fn tie_goes_to_first_row() {
        let table = rows(&[12.0, 24.0, 36.0]);
        assert_eq!(nearest_row(&table, 30.0).unwrap().age_months, 24.0);
    }

    #[test]
    fn picks_closest() {
        let table = rows(&[12.0, 24.0, 36.0]);
        assert_eq!(nearest_row(&table, 31.0).unwrap().age_months, 36.0);
        assert_eq!(nearest_row(&table, 0.0).unwrap().age_months, 12.0);
        assert_eq!(nearest_row(&table, 500.0).unwrap().age_months, 36.0);
    }

    #[test]
    fn duplicate_ages_keep_first() {
        let mut table = rows(&[24.0, 24.0]);
        table[1].m = 999.0;
        assert_eq!(nearest_row(&table, 24.0).unwrap().m, 100.0);
    }

    #[test]
    fn empty_table_has_no_row() {
        let table: Vec<LmsRow> = Vec::new();
        assert!(nearest_row(&table, 12.0).is_none());
    }
}
