//! CSV import orchestration
//!
//! Turns dataset rows into per-100g products and stores the ones whose name
//! is not taken yet. Rows are processed one at a time, in input order.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::error::{ImportError, ImportResult};
use super::names::canonicalize;
use super::report::ImportReport;
use super::store::ProductStore;
use super::tokenizer::tokenize;
use crate::models::{validate_macros, Macros, NormalizedProduct};
use crate::nutrition::{normalize, resolve_portion_weight};

/// name, category, calories, protein, carbs, fat
pub const MIN_FIELDS: usize = 6;

/// Log a progress line every this many imported products
const PROGRESS_EVERY: usize = 100;

static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("valid number pattern")
});

/// Knobs for a single run
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Prepare products without touching the store
    pub dry_run: bool,
    /// How many prepared products to log before loading
    pub preview: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            preview: 5,
        }
    }
}

/// Products built from a dataset, before persistence
#[derive(Debug, Clone, Default)]
pub struct PreparedImport {
    pub rows_found: usize,
    pub products: Vec<NormalizedProduct>,
}

/// Parse a numeric cell; unreadable or negative amounts count as 0
///
/// Reads the longest leading decimal literal, so "12g" is 12.
pub fn parse_amount(field: &str) -> f64 {
    LEADING_NUMBER
        .find(field.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0))
        .unwrap_or(0.0)
}

/// Build a product from one data line, or None if it has too few fields
pub fn parse_row(line: &str) -> Option<NormalizedProduct> {
    let fields = tokenize(line);
    if fields.len() < MIN_FIELDS {
        return None;
    }

    let raw_name = &fields[0];
    let category = &fields[1];
    let raw = Macros::new(
        parse_amount(&fields[2]),
        parse_amount(&fields[3]),
        parse_amount(&fields[4]),
        parse_amount(&fields[5]),
    );

    let portion_weight = resolve_portion_weight(raw_name, category);
    let per_100g = normalize(raw, portion_weight);

    Some(NormalizedProduct {
        name: canonicalize(raw_name),
        category: category.clone(),
        kcal_100: per_100g.calories.round() as i64,
        protein_100: per_100g.protein,
        carbs_100: per_100g.carbs,
        fat_100: per_100g.fat,
    })
}

/// Turn dataset text into products; the first non-blank line is the header
pub fn prepare_products(content: &str) -> PreparedImport {
    let mut prepared = PreparedImport::default();

    for line in content.split('\n').filter(|l| !l.trim().is_empty()).skip(1) {
        prepared.rows_found += 1;

        let Some(product) = parse_row(line) else {
            tracing::debug!("Discarding row with fewer than {} fields: {}", MIN_FIELDS, line.trim());
            continue;
        };

        if let Err(violation) = validate_macros(&product.macros()) {
            tracing::warn!("'{}' imported as-is: {}", product.name, violation);
        }

        prepared.products.push(product);
    }

    prepared
}

/// Store products one by one, counting each outcome in `report`
///
/// A failing product is logged and counted; the rest still get stored.
pub fn load_products<S>(store: &S, products: &[NormalizedProduct], report: &mut ImportReport)
where
    S: ProductStore + ?Sized,
{
    for product in products {
        match store.insert_if_absent(product) {
            Ok(outcome) => {
                let before = report.imported;
                report.record(outcome);
                if report.imported != before && report.imported % PROGRESS_EVERY == 0 {
                    tracing::info!("Imported: {}", report.imported);
                }
            }
            Err(e) => {
                tracing::error!("Failed to import '{}': {}", product.name, e);
                report.record_error();
            }
        }
    }
}

/// Import dataset text into `store`
pub fn run_import<S>(store: &S, content: &str, options: &ImportOptions) -> ImportReport
where
    S: ProductStore + ?Sized,
{
    let mut report = ImportReport::new(options.dry_run);

    let prepared = prepare_products(content);
    report.rows_found = prepared.rows_found;
    report.prepared = prepared.products.len();
    tracing::info!(
        "Found {} rows, prepared {} products (per 100g)",
        report.rows_found,
        report.prepared
    );

    for p in prepared.products.iter().take(options.preview) {
        tracing::info!(
            "   {}: {} kcal | P:{}g | C:{}g | F:{}g",
            p.name,
            p.kcal_100,
            p.protein_100,
            p.carbs_100,
            p.fat_100
        );
    }

    if options.dry_run {
        tracing::info!("Dry run, nothing stored");
    } else {
        load_products(store, &prepared.products, &mut report);
    }

    report.finish();
    report
}

/// Read a dataset file and import it; an unreadable file aborts the run
pub fn run_import_file<S>(store: &S, path: &Path, options: &ImportOptions) -> ImportResult<ImportReport>
where
    S: ProductStore + ?Sized,
{
    let content = std::fs::read_to_string(path).map_err(|source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Importing products from {}", path.display());

    Ok(run_import(store, &content, options))
}
