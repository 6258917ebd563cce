//! Portion weight resolution
//!
//! Works out how many grams a dataset row's nutrition values describe, from
//! the serving annotation in the food name or, failing that, the category.

use std::sync::LazyLock;

use regex::Regex;

use super::units::{
    category_default, portion_phrase_weight, DEFAULT_PORTION_G, G_PER_CUP, G_PER_OZ, G_PER_SLICE,
    G_PER_TBSP,
};

static SERVING_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^)]+)\)").expect("valid serving annotation pattern"));
static OZ_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*oz").expect("valid oz pattern"));
static CUP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:/[0-9]+)?)\s*cup").expect("valid cup pattern"));
static SLICE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*slice").expect("valid slice pattern"));
static TBSP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s*tbsp").expect("valid tbsp pattern"));

/// Grams of food the row's nutrition values refer to
///
/// Priority: known serving phrase, then "<n> oz|cup|slice|tbsp", then the
/// category default, then 100g. Always positive.
pub fn resolve_portion_weight(food_name: &str, category: &str) -> f64 {
    serving_annotation(food_name)
        .and_then(|portion| annotation_weight(&portion.to_lowercase()))
        .or_else(|| category_default(category))
        .unwrap_or(DEFAULT_PORTION_G)
}

/// Text of the first non-empty parenthesized group, e.g. "1 cup"
pub fn serving_annotation(food_name: &str) -> Option<&str> {
    SERVING_ANNOTATION
        .captures(food_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Weight for a lower-cased serving annotation, if it can be interpreted
fn annotation_weight(portion: &str) -> Option<f64> {
    if let Some(grams) = portion_phrase_weight(portion) {
        return Some(grams);
    }

    // A zero count ("0 oz") says nothing about the serving; keep looking
    let patterns: [(&Regex, fn(&str) -> Option<f64>); 4] = [
        (&*OZ_PATTERN, ounce_weight),
        (&*CUP_PATTERN, cup_weight),
        (&*SLICE_PATTERN, slice_weight),
        (&*TBSP_PATTERN, tbsp_weight),
    ];

    patterns.iter().find_map(|(pattern, weigh)| {
        let amount = pattern.captures(portion)?.get(1)?.as_str();
        weigh(amount).filter(|grams| *grams > 0.0)
    })
}

fn ounce_weight(amount: &str) -> Option<f64> {
    leading_count(amount).map(|c| c * G_PER_OZ)
}

fn slice_weight(amount: &str) -> Option<f64> {
    leading_count(amount).map(|c| c * G_PER_SLICE)
}

fn tbsp_weight(amount: &str) -> Option<f64> {
    leading_count(amount).map(|c| c * G_PER_TBSP)
}

/// Cups, with the common fractions spelled out
fn cup_weight(amount: &str) -> Option<f64> {
    match amount {
        "1/2" => Some(G_PER_CUP / 2.0),
        "1/4" => Some(G_PER_CUP / 4.0),
        "3/4" => Some(G_PER_CUP * 3.0 / 4.0),
        // Other fractions count whole cups from the numerator
        other => leading_count(other).map(|c| c * G_PER_CUP),
    }
}

/// Integer prefix of a numeric token ("12" -> 12, "1/3" -> 1)
fn leading_count(amount: &str) -> Option<f64> {
    let digits: String = amount.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serving_phrase_from_name() {
        assert_eq!(resolve_portion_weight("Egg (1 egg)", "Protein"), 50.0);
        assert_eq!(resolve_portion_weight("Milk (1 Cup)", "Dairy"), 240.0);
        assert_eq!(resolve_portion_weight("Oats (1/2 cup dry)", "Grain"), 120.0);
    }

    #[test]
    fn test_category_fallbacks() {
        assert_eq!(resolve_portion_weight("Rice", "Grain"), 50.0);
        assert_eq!(resolve_portion_weight("Mystery Food", "Unknown"), 100.0);
        // Annotation that means nothing falls back to the category
        assert_eq!(resolve_portion_weight("Soup (homemade)", "Meal"), 300.0);
    }

    #[test]
    fn test_numeric_unit_patterns() {
        assert_eq!(resolve_portion_weight("Steak (8 oz)", "Protein/Meat"), 224.0);
        assert_eq!(resolve_portion_weight("Salmon (7oz fillet)", "Protein/Fish"), 196.0);
        assert_eq!(resolve_portion_weight("Pasta (2 cups)", "Meal/Pasta"), 480.0);
        assert_eq!(resolve_portion_weight("Flour (1/3 cup)", "Grain"), 240.0);
        assert_eq!(resolve_portion_weight("Bread (3 slices)", "Grain"), 90.0);
        assert_eq!(resolve_portion_weight("Peanut Butter (3 tbsp)", "Nut"), 45.0);
    }

    #[test]
    fn test_decimal_amounts_match_trailing_digits() {
        // "1.5 oz" contains the "5 oz" phrase
        assert_eq!(resolve_portion_weight("Cheese (1.5 oz)", "Dairy"), 142.0);
        // the first number directly followed by "slice" is 5
        assert_eq!(resolve_portion_weight("Ham (1.5 slice)", "Protein/Meat"), 150.0);
    }

    #[test]
    fn test_zero_count_is_ignored() {
        assert_eq!(resolve_portion_weight("Water (0 oz)", "Beverage"), 240.0);
    }

    #[test]
    fn test_only_first_annotation_is_used() {
        assert_eq!(serving_annotation("Yogurt (plain, 1 cup) (low fat)"), Some("plain, 1 cup"));
        assert_eq!(serving_annotation("Bagel () (1 whole)"), Some("1 whole"));
        assert_eq!(serving_annotation("Bagel"), None);
        assert_eq!(resolve_portion_weight("Yogurt (plain, 1 cup) (2 tbsp)", "Dairy"), 240.0);
    }

    #[test]
    fn test_always_positive() {
        for (name, category) in [("", ""), ("()", "x"), ("(0 cup)", "Nope"), ("(0/2 cup)", "Fruit")] {
            assert!(resolve_portion_weight(name, category) > 0.0);
        }
    }
}
