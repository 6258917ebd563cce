//! nutrimport
//!
//! Imports a nutrition CSV into the product catalogue.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use nutrimport::build_info::BuildInfo;
use nutrimport::config::ImportConfig;
use nutrimport::db::Database;
use nutrimport::import::{run_import_file, ImportReport};
use nutrimport::models::Product;

fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let directive = if verbose { "nutrimport=debug" } else { "nutrimport=info" };

    // Log to stderr so stdout only carries the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn run(config: &ImportConfig) -> Result<ImportReport, Box<dyn std::error::Error>> {
    let db_path = config.database_path();
    tracing::info!("Database path: {}", db_path.display());
    let database = Database::open(&db_path)?;

    let report = run_import_file(&database, &config.input, &config.import_options())?;

    let total = database.with_conn(|conn| Product::count(conn, None))?;
    tracing::info!("Products in catalogue: {}", total);

    Ok(report)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ImportConfig::parse();

    init_logging(config.verbose)?;
    tracing::info!("Starting {}", BuildInfo::current().label());

    let report = match run(&config) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Import failed: {}", e);
            eprintln!("Import failed: {}", e);
            std::process::exit(1);
        }
    };

    if config.json {
        let output = serde_json::json!({
            "build": BuildInfo::current(),
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", report);
    }

    Ok(())
}
