//! Nutrition CSV importer library
//!
//! Normalizes semi-structured food datasets to per-100g products and stores
//! them in the SQLite product catalogue.

pub mod build_info;
pub mod config;
pub mod db;
pub mod import;
pub mod models;
pub mod nutrition;
