//! List catalogue products matching a search term
//! Usage: cargo run --bin search_products -- [term] [--limit N]

use std::path::PathBuf;

use clap::Parser;

use nutrimport::config::{default_database_path, DATABASE_PATH_ENV};
use nutrimport::db::Database;
use nutrimport::models::Product;

#[derive(Debug, Parser)]
#[command(name = "search_products")]
struct Args {
    /// Matched against name and category, ignoring case
    #[arg(default_value = "")]
    query: String,

    #[arg(long, default_value_t = 50)]
    limit: i64,

    #[arg(long, default_value_t = 0)]
    offset: i64,

    #[arg(long, env = DATABASE_PATH_ENV)]
    database: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let db_path = args.database.unwrap_or_else(default_database_path);
    println!("Database: {}", db_path.display());

    let database = Database::open(&db_path)?;

    database.with_conn(|conn| {
        let limit = args.limit.clamp(1, 500);
        let products = Product::search(conn, &args.query, limit, args.offset.max(0))?;
        let total = Product::count(conn, Some(args.query.as_str()))?;
        println!("Showing {} of {} products", products.len(), total);

        for p in &products {
            println!(
                "{:>6}  {:<40} {:<16} {:>4} kcal | P:{:>5.1} C:{:>5.1} F:{:>5.1}{}",
                p.id,
                p.name,
                p.category,
                p.kcal_100,
                p.protein_100,
                p.carbs_100,
                p.fat_100,
                if p.is_verified { "" } else { "  (unverified)" }
            );
        }
        Ok(())
    })?;

    Ok(())
}
