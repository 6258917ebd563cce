//! Data models
//!
//! Rust structs representing database entities.

mod macros;
mod product;

pub use macros::Macros;
pub use product::{name_key, validate_macros, MacroViolation, NormalizedProduct, Product};
