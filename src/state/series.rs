//! Filter and series data model
//!
//! A series is a named subset of rows defined by zero-or-more column
//! filters. A row belongs to a series iff it satisfies ALL of the series'
//! filters; a series with no filters admits every row. Rows may belong to
//! several series, or to none.

/// Predicate operator applied to a column value. No inclusive variants
/// exist; comparisons are exact on the dataset's native numeric
/// representation (integer-coded categorical columns compare exactly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
}

impl Comparator {
    pub const ALL: [Comparator; 4] = [
        Comparator::Equal,
        Comparator::NotEqual,
        Comparator::GreaterThan,
        Comparator::LessThan,
    ];

    /// Selector label
    pub fn label(&self) -> &'static str {
        match self {
            Comparator::Equal => "Equals",
            Comparator::NotEqual => "Does Not Equal",
            Comparator::GreaterThan => "Greater Than",
            Comparator::LessThan => "Lesser Than",
        }
    }

    /// Apply the predicate to an observed value
    pub fn matches(&self, threshold: f64, value: f64) -> bool {
        match self {
            Comparator::Equal => value == threshold,
            Comparator::NotEqual => value != threshold,
            Comparator::GreaterThan => value > threshold,
            Comparator::LessThan => value < threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeriesId(u64);

/// A single column/comparator/threshold predicate, owned by exactly one
/// series
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub id: FilterId,
    pub column_id: String,
    pub comparator: Comparator,
    pub threshold: f64,
}

/// A named, filter-defined subset of rows plotted together
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDef {
    pub id: SeriesId,
    pub label: String,
    pub filters: Vec<Filter>,
}

impl SeriesDef {
    /// AND-combined filter evaluation. `value_of` resolves a column id to
    /// the row's observed value; `None` (or a non-finite value) fails the
    /// filter, so rows missing a referenced column are excluded rather than
    /// coerced.
    pub fn admits(&self, mut value_of: impl FnMut(&str) -> Option<f64>) -> bool {
        self.filters.iter().all(|f| {
            value_of(&f.column_id)
                .filter(|v| v.is_finite())
                .is_some_and(|v| f.comparator.matches(f.threshold, v))
        })
    }
}

/// The ordered series list with a single mutation entry point per edit.
/// Every mutation bumps `revision`, which downstream caches key on.
#[derive(Debug, Clone, Default)]
pub struct SeriesModel {
    series: Vec<SeriesDef>,
    next_id: u64,
    revision: u64,
}

impl SeriesModel {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    fn series_mut(&mut self, id: SeriesId) -> Option<&mut SeriesDef> {
        self.series.iter_mut().find(|s| s.id == id)
    }

    fn filter_mut(&mut self, series: SeriesId, filter: FilterId) -> Option<&mut Filter> {
        self.series_mut(series)
            .and_then(|s| s.filters.iter_mut().find(|f| f.id == filter))
    }

    pub fn add_series(&mut self, label: impl Into<String>) -> SeriesId {
        let id = SeriesId(self.next_id());
        self.series.push(SeriesDef {
            id,
            label: label.into(),
            filters: Vec::new(),
        });
        self.touch();
        id
    }

    pub fn remove_series(&mut self, id: SeriesId) {
        self.series.retain(|s| s.id != id);
        self.touch();
    }

    pub fn set_label(&mut self, id: SeriesId, label: impl Into<String>) {
        if let Some(s) = self.series_mut(id) {
            s.label = label.into();
            self.touch();
        }
    }

    /// Append a default filter (`column == 0`) to a series
    pub fn add_filter(&mut self, series: SeriesId, column_id: impl Into<String>) -> Option<FilterId> {
        let id = FilterId(self.next_id());
        let filter = Filter {
            id,
            column_id: column_id.into(),
            comparator: Comparator::Equal,
            threshold: 0.0,
        };
        let s = self.series_mut(series)?;
        s.filters.push(filter);
        self.touch();
        Some(id)
    }

    pub fn remove_filter(&mut self, series: SeriesId, filter: FilterId) {
        if let Some(s) = self.series_mut(series) {
            s.filters.retain(|f| f.id != filter);
            self.touch();
        }
    }

    pub fn set_filter_column(&mut self, series: SeriesId, filter: FilterId, column_id: impl Into<String>) {
        if let Some(f) = self.filter_mut(series, filter) {
            f.column_id = column_id.into();
            self.touch();
        }
    }

    pub fn set_filter_comparator(&mut self, series: SeriesId, filter: FilterId, comparator: Comparator) {
        if let Some(f) = self.filter_mut(series, filter) {
            f.comparator = comparator;
            self.touch();
        }
    }

    pub fn set_filter_threshold(&mut self, series: SeriesId, filter: FilterId, threshold: f64) {
        if let Some(f) = self.filter_mut(series, filter) {
            f.threshold = threshold;
            self.touch();
        }
    }

    /// Replace the whole list with the Men/Women gender split preset.
    /// `gender_column` is the id of the integer-coded gender column
    /// (1 = men, 2 = women in the source dataset).
    pub fn apply_gender_preset(&mut self, gender_column: &str) {
        self.series.clear();
        let men = self.add_series("Men");
        let women = self.add_series("Women");
        if let Some(f) = self.add_filter(men, gender_column) {
            self.set_filter_threshold(men, f, 1.0);
        }
        if let Some(f) = self.add_filter(women, gender_column) {
            self.set_filter_threshold(women, f, 2.0);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesDef> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Monotonic counter bumped by every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Column ids referenced by any filter of any series, in sorted order
    pub fn filter_columns(&self) -> std::collections::BTreeSet<String> {
        self.series
            .iter()
            .flat_map(|s| s.filters.iter().map(|f| f.column_id.clone()))
            .collect()
    }
}
