//! Serving-size tables and conversion constants
//!
//! Static lookup data for inferring how many grams a dataset row describes.

// ============================================================================
// Atwater factors (kcal per gram)
// ============================================================================

/// Kilocalories per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// Kilocalories per gram of carbohydrate
pub const KCAL_PER_G_CARBS: f64 = 4.0;
/// Kilocalories per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;

// ============================================================================
// Portion units (grams per one unit)
// ============================================================================

/// Grams per ounce, as used by the source dataset
pub const G_PER_OZ: f64 = 28.0;
/// Grams per cup
pub const G_PER_CUP: f64 = 240.0;
/// Grams per slice
pub const G_PER_SLICE: f64 = 30.0;
/// Grams per tablespoon
pub const G_PER_TBSP: f64 = 15.0;

/// Weight used when neither the name nor the category says anything
pub const DEFAULT_PORTION_G: f64 = 100.0;

// ============================================================================
// Lookup tables
// ============================================================================

/// Known serving phrases and their weight in grams.
///
/// Order matters: the first key that is a substring of the serving text wins.
/// "1 large" resolves to 200g and sits in front of "2 large", matching the
/// dataset this table was built for.
pub const PORTION_WEIGHTS: &[(&str, f64)] = &[
    ("1 large", 200.0),
    ("2 large", 100.0),
    ("1 egg", 50.0),
    ("2 eggs", 100.0),
    ("1 cup", 240.0),
    ("1/2 cup", 120.0),
    ("1/4 cup", 60.0),
    ("3/4 cup", 180.0),
    ("3 cups", 90.0),
    ("1 oz", 28.0),
    ("2 oz", 56.0),
    ("3 oz", 85.0),
    ("4 oz", 113.0),
    ("5 oz", 142.0),
    ("6 oz", 170.0),
    ("1 tbsp", 15.0),
    ("2 tbsp", 30.0),
    ("1 tsp", 5.0),
    ("1 slice", 30.0),
    ("2 slices", 60.0),
    ("1 piece", 100.0),
    ("1 can", 400.0),
    ("1 medium", 150.0),
    ("1 small", 100.0),
    ("1 patty", 90.0),
    ("1 link", 45.0),
    ("1 whole", 60.0),
];

/// Typical serving weight per food category (exact, case-sensitive names)
pub const CATEGORY_DEFAULTS: &[(&str, f64)] = &[
    ("Fruit", 150.0),
    ("Vegetable", 150.0),
    ("Protein", 100.0),
    ("Protein/Meat", 113.0),
    ("Protein/Fish", 113.0),
    ("Protein/Dairy", 100.0),
    ("Dairy", 240.0),
    ("Grain", 50.0),
    ("Grain/Processed", 30.0),
    ("Nut", 28.0),
    ("Legume", 100.0),
    ("Beverage", 240.0),
    ("Meal", 300.0),
    ("Meal/Protein", 300.0),
    ("Meal/Pasta", 300.0),
    ("Meal/Processed", 250.0),
    ("Snack", 30.0),
    ("Snack/Processed", 28.0),
    ("Dessert", 100.0),
    ("Condiment", 15.0),
    ("Supplement", 100.0),
];

/// Look up a serving phrase; first declared key contained in `portion` wins
pub fn portion_phrase_weight(portion: &str) -> Option<f64> {
    PORTION_WEIGHTS
        .iter()
        .find(|(key, _)| portion.contains(key))
        .map(|(_, grams)| *grams)
}

/// Default serving weight for a category, if the category is known
pub fn category_default(category: &str) -> Option<f64> {
    CATEGORY_DEFAULTS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, grams)| *grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portion_phrase_weight() {
        assert_eq!(portion_phrase_weight("1 egg"), Some(50.0));
        assert_eq!(portion_phrase_weight("1 tbsp"), Some(15.0));
        assert_eq!(portion_phrase_weight("per serving"), None);
    }

    #[test]
    fn test_first_declared_key_wins() {
        // "1 cup" is declared before "3/4 cup" but is not a substring of it
        assert_eq!(portion_phrase_weight("3/4 cup"), Some(180.0));
        // "11 cup" contains "1 cup"
        assert_eq!(portion_phrase_weight("11 cups"), Some(240.0));
        // "1 large" shadows "1 egg" when both appear
        assert_eq!(portion_phrase_weight("1 large egg"), Some(200.0));
        assert_eq!(portion_phrase_weight("2 large eggs"), Some(100.0));
    }

    #[test]
    fn test_category_default() {
        assert_eq!(category_default("Grain"), Some(50.0));
        assert_eq!(category_default("Protein/Meat"), Some(113.0));
        assert_eq!(category_default("grain"), None);
        assert_eq!(category_default("Unknown"), None);
    }

    #[test]
    fn test_tables_have_positive_weights() {
        assert!(PORTION_WEIGHTS.iter().all(|(_, g)| *g > 0.0));
        assert!(CATEGORY_DEFAULTS.iter().all(|(_, g)| *g > 0.0));
    }
}
