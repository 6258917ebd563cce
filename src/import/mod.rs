//! Dataset import
//!
//! Tokenizing, normalizing and storing rows of a nutrition CSV.

pub mod error;
pub mod importer;
pub mod names;
pub mod report;
pub mod store;
pub mod tokenizer;

pub use error::{ImportError, ImportResult};
pub use importer::{
    load_products, parse_amount, parse_row, prepare_products, run_import, run_import_file,
    ImportOptions, PreparedImport,
};
pub use names::canonicalize;
pub use report::ImportReport;
pub use store::{InsertOutcome, ProductStore};
pub use tokenizer::tokenize;
