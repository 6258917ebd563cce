//! Per-100g normalization
//!
//! Rescales per-serving nutrition to a 100g basis and reconciles macro totals
//! that cannot physically fit in 100g of product.

use crate::models::Macros;

/// Macro grams a rescaled product is brought down to
pub const RESCALED_MACRO_TOTAL: f64 = 95.0;

/// Round to one decimal place
///
/// Magnitudes too large to scale by ten are already whole and come back as-is.
pub fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Zero for anything that is not a finite, non-negative amount
fn amount_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Convert a per-portion value to per-100g, rounded to one decimal
///
/// A zero (or non-finite) portion means the value is already per 100g.
/// A result that overflows counts as 0.
pub fn to_per_100g(value: f64, portion_weight: f64) -> f64 {
    if portion_weight == 0.0 || !portion_weight.is_finite() {
        return value;
    }
    amount_or_zero(round1(value * 100.0 / portion_weight))
}

/// Normalize raw per-portion values to per-100g
///
/// When the converted macros exceed 100g they are scaled down to 95g total
/// and calories are recomputed from them. Otherwise the converted stated
/// calories are kept as they are. Calories come back rounded to an integer,
/// macros to one decimal, all finite and non-negative.
pub fn normalize(raw: Macros, portion_weight: f64) -> Macros {
    let converted = raw
        .map(amount_or_zero)
        .map(|v| to_per_100g(v, portion_weight));

    let sum = converted.macro_grams();
    let reconciled = if sum > 100.0 {
        let scale = RESCALED_MACRO_TOTAL / sum;
        let mut scaled = Macros::new(
            0.0,
            round1(converted.protein * scale),
            round1(converted.carbs * scale),
            round1(converted.fat * scale),
        );
        scaled.calories = scaled.atwater_calories().round();
        tracing::debug!(
            "Macro total {:.1}g exceeds 100g, rescaled to {:.1}g",
            sum,
            scaled.macro_grams()
        );
        scaled
    } else {
        converted
    };

    Macros::new(
        reconciled.calories.round(),
        round1(reconciled.protein),
        round1(reconciled.carbs),
        round1(reconciled.fat),
    )
    .map(amount_or_zero)
}
