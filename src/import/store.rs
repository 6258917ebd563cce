//! Product persistence used by the importer

use crate::db::{Database, DbResult};
use crate::models::{NormalizedProduct, Product};

/// Result of an insert-if-absent call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(i64),
    /// A product with the same name (ignoring case) was already stored
    Existing(i64),
}

/// Where normalized products end up
pub trait ProductStore {
    /// Id of a stored product whose name matches ignoring case
    fn find_by_name(&self, name: &str) -> DbResult<Option<i64>>;

    /// Store a verified product without an owning user
    fn insert(&self, product: &NormalizedProduct) -> DbResult<i64>;

    /// Insert unless the name is taken; the first stored product wins
    fn insert_if_absent(&self, product: &NormalizedProduct) -> DbResult<InsertOutcome> {
        if let Some(id) = self.find_by_name(&product.name)? {
            return Ok(InsertOutcome::Existing(id));
        }
        Ok(InsertOutcome::Inserted(self.insert(product)?))
    }
}

impl ProductStore for Database {
    fn find_by_name(&self, name: &str) -> DbResult<Option<i64>> {
        self.with_conn(|conn| Product::find_id_by_name(conn, name))
    }

    fn insert(&self, product: &NormalizedProduct) -> DbResult<i64> {
        self.with_conn(|conn| Product::create(conn, product))
    }

    fn insert_if_absent(&self, product: &NormalizedProduct) -> DbResult<InsertOutcome> {
        let (id, inserted) = self.with_conn(|conn| Product::create_if_absent(conn, product))?;
        Ok(if inserted {
            InsertOutcome::Inserted(id)
        } else {
            InsertOutcome::Existing(id)
        })
    }
}
