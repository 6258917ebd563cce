//! Nutrition normalization module
//!
//! Serving-size inference and per-100g conversion for imported foods.

pub mod converter;
pub mod portion;
pub mod units;

pub use converter::{normalize, round1, to_per_100g};
pub use portion::{resolve_portion_weight, serving_annotation};
pub use units::{category_default, portion_phrase_weight, CATEGORY_DEFAULTS, PORTION_WEIGHTS};
