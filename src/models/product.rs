//! Product model
//!
//! A catalogue product with nutrition expressed per 100g.

use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DbResult;
use super::Macros;

/// Output of the import pipeline, ready to be stored
///
/// Built once per accepted input row and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedProduct {
    pub name: String,
    pub category: String,
    pub kcal_100: i64,
    pub protein_100: f64,
    pub carbs_100: f64,
    pub fat_100: f64,
}

impl NormalizedProduct {
    pub fn macros(&self) -> Macros {
        Macros::new(
            self.kcal_100 as f64,
            self.protein_100,
            self.carbs_100,
            self.fat_100,
        )
    }
}

/// A stored product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub kcal_100: i64,
    pub protein_100: f64,
    pub carbs_100: f64,
    pub fat_100: f64,
    pub added_by_user_id: Option<i64>,
    pub is_verified: bool,
    pub created_at: String,
}

/// Reasons a set of per-100g values is not a plausible product
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MacroViolation {
    #[error("all nutrition values must be non-negative numbers")]
    Negative,

    #[error("protein, carbs and fat must each be within 0-100 g per 100 g")]
    MacroOutOfRange,

    #[error("protein, carbs and fat together exceed 100 g per 100 g ({0:.1} g)")]
    MacroSumExceeded(f64),

    #[error("{kcal} kcal is inconsistent with the macros (~{expected:.0} kcal)")]
    CaloriesInconsistent { kcal: f64, expected: f64 },
}

/// Dedup key for a product name: Unicode lower case
///
/// Computed here rather than with SQLite `LOWER()`, which only folds ASCII.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

/// Allowed deviation of stated calories from the Atwater estimate
const KCAL_TOLERANCE: f64 = 0.3;

/// Check per-100g values the same way user-submitted products are checked
pub fn validate_macros(m: &Macros) -> Result<(), MacroViolation> {
    let values = [m.calories, m.protein, m.carbs, m.fat];
    if values.iter().any(|v| v.is_nan() || *v < 0.0) {
        return Err(MacroViolation::Negative);
    }

    if m.protein > 100.0 || m.carbs > 100.0 || m.fat > 100.0 {
        return Err(MacroViolation::MacroOutOfRange);
    }

    let sum = m.macro_grams();
    if sum > 100.0 {
        return Err(MacroViolation::MacroSumExceeded(sum));
    }

    let expected = m.atwater_calories();
    let min = expected * (1.0 - KCAL_TOLERANCE);
    let max = expected * (1.0 + KCAL_TOLERANCE);
    if m.calories < min || m.calories > max {
        return Err(MacroViolation::CaloriesInconsistent {
            kcal: m.calories,
            expected,
        });
    }

    Ok(())
}

impl Product {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            category: row.get("category")?,
            kcal_100: row.get("kcal_100")?,
            protein_100: row.get("protein_100")?,
            carbs_100: row.get("carbs_100")?,
            fat_100: row.get("fat_100")?,
            added_by_user_id: row.get("added_by_user_id")?,
            is_verified: row.get("is_verified")?,
            created_at: row.get("created_at")?,
        })
    }

    /// Insert a verified catalogue product (no owning user), returning its id
    pub fn create(conn: &Connection, data: &NormalizedProduct) -> DbResult<i64> {
        conn.execute(
            r#"
            INSERT INTO products (
                name, name_key, category, kcal_100, protein_100, carbs_100, fat_100,
                added_by_user_id, is_verified
            ) VALUES (?1, ?7, ?2, ?3, ?4, ?5, ?6, NULL, 1)
            "#,
            params![
                data.name,
                data.category,
                data.kcal_100,
                data.protein_100,
                data.carbs_100,
                data.fat_100,
                name_key(&data.name),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Insert unless a product with the same name (ignoring case) exists
    ///
    /// Returns `(id, inserted)`. Check and insert run as one statement.
    pub fn create_if_absent(conn: &Connection, data: &NormalizedProduct) -> DbResult<(i64, bool)> {
        let inserted = conn.execute(
            r#"
            INSERT INTO products (
                name, name_key, category, kcal_100, protein_100, carbs_100, fat_100,
                added_by_user_id, is_verified
            )
            SELECT ?1, ?7, ?2, ?3, ?4, ?5, ?6, NULL, 1
            WHERE NOT EXISTS (SELECT 1 FROM products WHERE name_key = ?7)
            "#,
            params![
                data.name,
                data.category,
                data.kcal_100,
                data.protein_100,
                data.carbs_100,
                data.fat_100,
                name_key(&data.name),
            ],
        )?;

        if inserted > 0 {
            return Ok((conn.last_insert_rowid(), true));
        }

        let id = Self::find_id_by_name(conn, &data.name)?
            .ok_or(crate::db::DbError::Sqlite(rusqlite::Error::QueryReturnedNoRows))?;
        Ok((id, false))
    }

    /// Get a product by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM products WHERE id = ?1")?;
        Ok(stmt.query_row([id], Self::from_row).optional()?)
    }

    /// Find the id of a product whose name matches ignoring case
    pub fn find_id_by_name(conn: &Connection, name: &str) -> DbResult<Option<i64>> {
        let id = conn
            .query_row(
                "SELECT id FROM products WHERE name_key = ?1 ORDER BY id LIMIT 1",
                [name_key(name)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Search products by name or category, verified ones first
    pub fn search(conn: &Connection, query: &str, limit: i64, offset: i64) -> DbResult<Vec<Self>> {
        let pattern = format!("%{}%", name_key(query.trim()));
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM products
            WHERE name_key LIKE ?1 OR LOWER(category) LIKE ?1
            ORDER BY is_verified DESC, name ASC
            LIMIT ?2 OFFSET ?3
            "#,
        )?;

        let items = stmt
            .query_map(params![pattern, limit, offset], Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    /// Count products, optionally restricted to a search term
    pub fn count(conn: &Connection, query: Option<&str>) -> DbResult<i64> {
        let count: i64 = match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => conn.query_row(
                "SELECT COUNT(*) FROM products WHERE name_key LIKE ?1 OR LOWER(category) LIKE ?1",
                [format!("%{}%", name_key(q))],
                |row| row.get(0),
            )?,
            None => conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?,
        };
        Ok(count)
    }
}
