//! Age-band selection.

use growth_model::{AgeBand, Sex, TableKey};

/// Picks the reference table for a child's age (years) and sex.
///
/// `age < 2` selects the infant table, `2 <= age < 5` the preschool table,
/// and anything older the school-age table.
pub fn select_table(age_years: f64, sex: Sex) -> TableKey {
    TableKey::new(sex, AgeBand::for_age(age_years))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(select_table(0.0, Sex::Male).band, AgeBand::Infant);
        assert_eq!(select_table(1.999, Sex::Male).band, AgeBand::Infant);
        assert_eq!(select_table(2.0, Sex::Female).band, AgeBand::Preschool);
        assert_eq!(select_table(4.99, Sex::Female).band, AgeBand::Preschool);
        assert_eq!(select_table(5.0, Sex::Male).band, AgeBand::School);
        assert_eq!(select_table(19.0, Sex::Male).band, AgeBand::School);
    }

    #[test]
    fn sex_selects_variant() {
        assert_eq!(select_table(3.0, Sex::Female).sex, Sex::Female);
        assert_eq!(select_table(3.0, Sex::Male).sex, Sex::Male);
    }
}
