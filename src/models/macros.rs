//! Shared macro-nutrient data structure
//!
//! Used by the normalizer and by stored products.

use serde::{Deserialize, Serialize};

use crate::nutrition::units::{KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN};

/// Calories and the three macro-nutrients of a food
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
}

impl Macros {
    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Apply `f` to every field, calories included
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            protein: f(self.protein),
            carbs: f(self.carbs),
            fat: f(self.fat),
        }
    }

    /// Grams of protein, carbs and fat combined
    pub fn macro_grams(&self) -> f64 {
        self.protein + self.carbs + self.fat
    }

    /// Calories implied by the macro composition (Atwater factors)
    pub fn atwater_calories(&self) -> f64 {
        self.protein * KCAL_PER_G_PROTEIN
            + self.carbs * KCAL_PER_G_CARBS
            + self.fat * KCAL_PER_G_FAT
    }
}
