//! Import run tally

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::store::InsertOutcome;

/// Counters for one import run
///
/// Rows discarded for having too few fields are not counted anywhere.
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    /// Data rows found after the header
    pub rows_found: usize,
    /// Rows that produced a product
    pub prepared: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ImportReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            rows_found: 0,
            prepared: 0,
            imported: 0,
            skipped: 0,
            errors: 0,
            dry_run,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted(_) => self.imported += 1,
            InsertOutcome::Existing(_) => self.skipped += 1,
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Products that reached the store, whatever the outcome
    pub fn processed(&self) -> usize {
        self.imported + self.skipped + self.errors
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "SUMMARY{}:", if self.dry_run { " (dry run)" } else { "" })?;
        writeln!(f, "   Rows found: {}", self.rows_found)?;
        writeln!(f, "   Prepared:   {}", self.prepared)?;
        writeln!(f, "   Imported:   {}", self.imported)?;
        writeln!(f, "   Duplicates: {}", self.skipped)?;
        write!(f, "   Errors:     {}", self.errors)?;
        if let Some(finished) = self.finished_at {
            let elapsed = finished - self.started_at;
            write!(f, "\n   Took:       {} ms", elapsed.num_milliseconds())?;
        }
        Ok(())
    }
}
