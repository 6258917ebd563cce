//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Migration v1: product catalogue
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PRODUCTS
        -- Nutrition per 100g of product
        -- ============================================
        CREATE TABLE products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            name_key TEXT NOT NULL,              -- Unicode-lowercased name, dedup key
            category TEXT NOT NULL DEFAULT '',

            kcal_100 INTEGER NOT NULL DEFAULT 0 CHECK(kcal_100 >= 0),
            protein_100 REAL NOT NULL DEFAULT 0 CHECK(protein_100 >= 0),   -- grams
            carbs_100 REAL NOT NULL DEFAULT 0 CHECK(carbs_100 >= 0),       -- grams
            fat_100 REAL NOT NULL DEFAULT 0 CHECK(fat_100 >= 0),           -- grams

            -- NULL for catalogue imports, set for user-submitted products
            added_by_user_id INTEGER,
            is_verified INTEGER NOT NULL DEFAULT 0,                        -- boolean
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_products_name_key ON products(name_key);
        CREATE INDEX idx_products_category ON products(category);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version (0 for a fresh database)
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let tracked: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_migrations')",
        [],
        |row| row.get(0),
    )?;
    if !tracked {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(needs_migration(&conn).unwrap());

        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
        assert!(!needs_migration(&conn).unwrap());
    }

    #[test]
    fn test_version_errors_are_reported() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE schema_migrations (applied_at TEXT)", []).unwrap();

        // No version column: a broken table must not read as "fresh"
        assert!(get_schema_version(&conn).is_err());
        assert!(run_migrations(&conn).is_err());
    }
}
