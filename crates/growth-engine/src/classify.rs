//! Height-for-age category cut points.

use growth_model::GrowthCategory;

/// Maps a height-for-age Z-score to its category.
///
/// | Z | Category |
/// |---|---|
/// | `z < -3` | severe stunting |
/// | `-3 <= z < -2` | stunted |
/// | `-2 <= z <= 2` | normal |
/// | `z > 2` | tall |
pub fn classify(z: f64) -> GrowthCategory {
    if z < -3.0 {
        GrowthCategory::SevereStunting
    } else if z < -2.0 {
        GrowthCategory::Stunted
    } else if z <= 2.0 {
        GrowthCategory::Normal
    } else {
        GrowthCategory::Tall
    }
}
