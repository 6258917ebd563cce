//! Command-line configuration

use std::path::PathBuf;

use clap::Parser;

use crate::import::ImportOptions;

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "NUTRIMPORT_DATABASE_PATH";

/// Import a nutrition CSV into the product catalogue (values per 100g)
#[derive(Debug, Parser)]
#[command(name = "nutrimport", version)]
pub struct ImportConfig {
    /// CSV file: name, category, calories, protein, carbs, fat[, ...]
    pub input: PathBuf,

    /// SQLite database file
    #[arg(long, env = DATABASE_PATH_ENV)]
    pub database: Option<PathBuf>,

    /// Prepare and preview products without storing them
    #[arg(long)]
    pub dry_run: bool,

    /// Number of prepared products to show before loading
    #[arg(long, default_value_t = 5)]
    pub preview: usize,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ImportConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database.clone().unwrap_or_else(default_database_path)
    }

    pub fn import_options(&self) -> ImportOptions {
        ImportOptions {
            dry_run: self.dry_run,
            preview: self.preview,
        }
    }
}

/// `data/nutrimport.db` under the project root
///
/// The root is the executable's directory, or two levels up when running
/// from `target/release` or `target/debug`.
pub fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("nutrimport.db");
    path
}
