//! Series materialization: raw rows → per-series point lists
//!
//! Each series' filters are AND-combined; a series with no filters admits
//! every row. Row order is preserved within a series and the output order
//! follows series definition order. Rows are never modified and never
//! duplicated within one series.
//!
//! Missing-value policy: a row whose x, y, or referenced filter value is
//! non-finite (absent and `null` decode to NaN) is excluded from that
//! series' output, never coerced to 0.

use std::collections::HashMap;

use crate::chart::stats::PlotPoint;
use crate::data::RowStore;
use crate::error::Result;
use crate::state::SeriesModel;

/// One series' projected points, in definition order
#[derive(Debug, Clone)]
pub struct MaterializedSeries {
    pub label: String,
    pub points: Vec<PlotPoint>,
}

/// Project the row store onto `(x, y)` point lists, one per series.
/// Fails fast with `ColumnNotFound` if a referenced column is missing from
/// the store: the fetch layer derives its column set from the same inputs,
/// so this indicates a broken contract, not bad data.
pub fn materialize(
    store: &RowStore,
    series: &SeriesModel,
    x_column: &str,
    y_column: &str,
) -> Result<Vec<MaterializedSeries>> {
    profiling::scope!("materialize_series");

    // Populate the column cache up front; `get_cached_column` must not
    // insert while borrows are outstanding.
    let mut ids: Vec<&str> = vec![x_column, y_column];
    for s in series.iter() {
        for f in &s.filters {
            ids.push(&f.column_id);
        }
    }
    for id in &ids {
        store.get_cached_column(id)?;
    }

    let mut columns = HashMap::new();
    for id in ids {
        if !columns.contains_key(id) {
            columns.insert(id, store.get_cached_column(id)?);
        }
    }

    let xs = &columns[x_column];
    let ys = &columns[y_column];

    let materialized = series
        .iter()
        .map(|def| {
            let points = (0..store.height())
                .filter(|&row| def.admits(|col| columns.get(col).map(|values| values[row])))
                .filter_map(|row| {
                    let (x, y) = (xs[row], ys[row]);
                    (x.is_finite() && y.is_finite()).then_some(PlotPoint { x, y })
                })
                .collect();
            MaterializedSeries {
                label: def.label.clone(),
                points,
            }
        })
        .collect();

    Ok(materialized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Comparator;

    fn store(columns: Vec<(&str, Vec<f64>)>) -> RowStore {
        let columns = columns
            .into_iter()
            .map(|(id, values)| (id.to_string(), values))
            .collect();
        RowStore::from_columns(columns, None).unwrap()
    }

    #[test]
    fn test_and_semantics_and_projection() {
        let store = store(vec![
            ("GENDER", vec![1.0, 1.0, 2.0]),
            ("AGE", vec![25.0, 10.0, 25.0]),
            ("STATURE", vec![1780.0, 1420.0, 1650.0]),
        ]);

        let mut series = SeriesModel::default();
        let id = series.add_series("Adult men");
        let gender = series.add_filter(id, "GENDER").unwrap();
        series.set_filter_threshold(id, gender, 1.0);
        let age = series.add_filter(id, "AGE").unwrap();
        series.set_filter_comparator(id, age, Comparator::GreaterThan);
        series.set_filter_threshold(id, age, 18.0);

        let result = materialize(&store, &series, "AGE", "STATURE").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].label, "Adult men");
        // only {GENDER: 1, AGE: 25} passes both filters
        assert_eq!(result[0].points, vec![PlotPoint { x: 25.0, y: 1780.0 }]);
    }

    #[test]
    fn test_zero_filters_pass_all_rows_in_order() {
        let store = store(vec![
            ("AGE", vec![25.0, 10.0, 40.0]),
            ("STATURE", vec![1780.0, 1420.0, 1700.0]),
        ]);
        let mut series = SeriesModel::default();
        series.add_series("Everyone");

        let result = materialize(&store, &series, "AGE", "STATURE").unwrap();
        let xs: Vec<f64> = result[0].points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![25.0, 10.0, 40.0]);
    }

    #[test]
    fn test_rows_may_belong_to_several_series() {
        let store = store(vec![
            ("AGE", vec![25.0, 30.0]),
            ("STATURE", vec![1780.0, 1700.0]),
        ]);
        let mut series = SeriesModel::default();
        series.add_series("First");
        series.add_series("Second");

        let result = materialize(&store, &series, "AGE", "STATURE").unwrap();
        assert_eq!(result[0].points.len(), 2);
        assert_eq!(result[1].points.len(), 2);
    }

    #[test]
    fn test_non_finite_values_exclude_rows() {
        let store = store(vec![
            ("GENDER", vec![1.0, f64::NAN, 1.0]),
            ("AGE", vec![25.0, 30.0, f64::NAN]),
            ("STATURE", vec![1780.0, 1700.0, 1650.0]),
        ]);
        let mut series = SeriesModel::default();
        let id = series.add_series("Men");
        let f = series.add_filter(id, "GENDER").unwrap();
        series.set_filter_threshold(id, f, 1.0);

        let result = materialize(&store, &series, "AGE", "STATURE").unwrap();
        // row 1 fails the NaN filter value, row 2 has a NaN x value
        assert_eq!(result[0].points, vec![PlotPoint { x: 25.0, y: 1780.0 }]);
    }

    #[test]
    fn test_missing_column_fails_fast() {
        let store = store(vec![("AGE", vec![25.0])]);
        let mut series = SeriesModel::default();
        series.add_series("Everyone");

        assert!(materialize(&store, &series, "AGE", "STATURE").is_err());
    }
}
