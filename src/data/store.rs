//! Columnar storage for fetched rows
//!
//! Rows arrive from the API as JSON objects keyed by column id. The store
//! keeps them column-major in a Polars DataFrame (one Float64 column per
//! requested id, absent and null values as NaN) and caches the extracted
//! `Vec<f64>` per column for the materializer's row scans.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use polars::prelude::*;

use crate::error::{AnthroError, Result};

/// The fetched row set for the current axis/filter column selection.
/// Immutable once built; invalidated wholesale by the cache layer.
#[derive(Debug)]
pub struct RowStore {
    materialized: DataFrame,
    /// Server timestamp from the row response, shown in the status line
    fetched_at: Option<DateTime<Utc>>,
    /// Cache for numeric column extraction
    numeric_cache: RefCell<HashMap<String, Vec<f64>>>,
}

impl RowStore {
    /// Build a store from equal-length numeric columns
    pub fn from_columns(
        columns: Vec<(String, Vec<f64>)>,
        fetched_at: Option<DateTime<Utc>>,
    ) -> Result<Self> {
        let columns: Vec<Column> = columns
            .into_iter()
            .map(|(id, values)| Column::new(id.as_str().into(), values))
            .collect();
        let materialized = DataFrame::new(columns)?;
        Ok(Self {
            materialized,
            fetched_at,
            numeric_cache: RefCell::new(HashMap::new()),
        })
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.materialized.height()
    }

    /// All column ids in frame order
    pub fn column_ids(&self) -> Vec<String> {
        self.materialized
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, id: &str) -> bool {
        self.materialized.column(id).is_ok()
    }

    /// Server timestamp of the response this store was built from
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    /// Get column values as a Series
    pub fn column_series(&self, id: &str) -> Result<Series> {
        self.materialized
            .column(id)
            .map(|c| c.as_materialized_series().clone())
            .map_err(|_| AnthroError::ColumnNotFound {
                column: id.to_string(),
            })
    }

    /// Get a column's values as `Vec<f64>`, NaN for anything non-numeric
    pub fn column_as_f64(&self, id: &str) -> Result<Vec<f64>> {
        let series = self.column_series(id)?;
        let casted = series.cast(&DataType::Float64)?;
        Ok(casted
            .f64()?
            .into_iter()
            .map(|opt| opt.unwrap_or(f64::NAN))
            .collect())
    }

    /// Get cached numeric column, computing it on first access.
    ///
    /// Callers holding several columns at once (the materializer) must
    /// populate each id before taking the borrows, since inserting while a
    /// `Ref` is outstanding would conflict.
    pub fn get_cached_column(&self, id: &str) -> Result<Ref<'_, Vec<f64>>> {
        if !self.numeric_cache.borrow().contains_key(id) {
            let data = self.column_as_f64(id)?;
            self.numeric_cache
                .borrow_mut()
                .insert(id.to_string(), data);
        }

        Ok(Ref::map(self.numeric_cache.borrow(), |cache| {
            cache.get(id).expect("Just inserted")
        }))
    }

    /// Summary statistics for one column
    pub fn column_summary(&self, id: &str) -> Result<super::stats::ColumnSummary> {
        let series = self.column_series(id)?;
        Ok(super::stats::summarize(&series))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RowStore {
        RowStore::from_columns(
            vec![
                ("AGE".to_string(), vec![25.0, 10.0, 40.0]),
                ("STATURE".to_string(), vec![1780.0, 1420.0, f64::NAN]),
            ],
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions_and_ids() {
        let store = store();
        assert_eq!(store.height(), 3);
        assert_eq!(
            store.column_ids(),
            vec!["AGE".to_string(), "STATURE".to_string()]
        );
        assert!(store.has_column("AGE"));
        assert!(!store.has_column("WEIGHT"));
    }

    #[test]
    fn test_column_extraction_preserves_nan() {
        let store = store();
        let age = store.column_as_f64("AGE").unwrap();
        assert_eq!(age, vec![25.0, 10.0, 40.0]);

        let stature = store.column_as_f64("STATURE").unwrap();
        assert_eq!(&stature[..2], &[1780.0, 1420.0]);
        assert!(stature[2].is_nan());
    }

    #[test]
    fn test_missing_column_is_typed_error() {
        let store = store();
        let err = store.column_as_f64("WEIGHT").unwrap_err();
        assert!(matches!(
            err,
            AnthroError::ColumnNotFound { column } if column == "WEIGHT"
        ));
    }

    #[test]
    fn test_cached_column_round_trip() {
        let store = store();
        {
            let first = store.get_cached_column("AGE").unwrap();
            assert_eq!(*first, vec![25.0, 10.0, 40.0]);
        }
        // second access hits the cache and returns the same data
        let again = store.get_cached_column("AGE").unwrap();
        assert_eq!(*again, vec![25.0, 10.0, 40.0]);
    }

    #[test]
    fn test_empty_store() {
        let store = RowStore::from_columns(Vec::new(), None).unwrap();
        assert_eq!(store.height(), 0);
        assert!(store.column_ids().is_empty());
    }
}
