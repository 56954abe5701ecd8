//! Application state management
//!
//! All mutable state lives in one explicitly owned container passed by
//! reference to the components that need it. Each concern has a single
//! mutation entry point (axis selection here, series edits on
//! [`SeriesModel`], cache transitions on [`DataCache`]); nothing mutates
//! ambient globals.

mod cache;
mod catalog;
mod loadable;
mod series;
mod ui;

pub use cache::{needed_columns, DataCache, FetchTicket};
pub use catalog::{Column, ColumnCatalog};
pub use loadable::Loadable;
pub use series::{Comparator, Filter, FilterId, SeriesDef, SeriesId, SeriesModel};
pub use ui::UiState;

use std::collections::BTreeSet;

/// Main application state container
#[derive(Debug, Default)]
pub struct AppState {
    /// Column catalog cell, loaded once per session
    pub catalog: Loadable<ColumnCatalog>,

    /// User-defined series and their filters
    pub series: SeriesModel,

    /// Fetched-row cache cell and its state machine
    pub cache: DataCache,

    /// View and interaction state
    pub ui: UiState,

    x_axis: Option<String>,
    y_axis: Option<String>,
    axes_revision: u64,
}

impl AppState {
    pub fn x_axis(&self) -> Option<&str> {
        self.x_axis.as_deref()
    }

    pub fn y_axis(&self) -> Option<&str> {
        self.y_axis.as_deref()
    }

    pub fn set_x_axis(&mut self, column_id: Option<String>) {
        if self.x_axis != column_id {
            self.x_axis = column_id;
            self.axes_revision += 1;
        }
    }

    pub fn set_y_axis(&mut self, column_id: Option<String>) {
        if self.y_axis != column_id {
            self.y_axis = column_id;
            self.axes_revision += 1;
        }
    }

    /// Monotonic counter bumped by every axis change
    pub fn axes_revision(&self) -> u64 {
        self.axes_revision
    }

    pub fn has_axes(&self) -> bool {
        self.x_axis.is_some() && self.y_axis.is_some()
    }

    /// Column set the current axes + series require (empty until both axes
    /// are chosen)
    pub fn needed_columns(&self) -> BTreeSet<String> {
        needed_columns(self.x_axis(), self.y_axis(), &self.series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_revision_only_bumps_on_change() {
        let mut state = AppState::default();
        assert_eq!(state.axes_revision(), 0);

        state.set_x_axis(Some("AGE".to_string()));
        assert_eq!(state.axes_revision(), 1);

        // no-op set does not bump
        state.set_x_axis(Some("AGE".to_string()));
        assert_eq!(state.axes_revision(), 1);

        state.set_y_axis(Some("STATURE".to_string()));
        assert_eq!(state.axes_revision(), 2);
        assert!(state.has_axes());
    }

    #[test]
    fn test_needed_columns_gated_on_axes() {
        let mut state = AppState::default();
        let id = state.series.add_series("Men");
        state.series.add_filter(id, "GENDER");

        assert!(state.needed_columns().is_empty());

        state.set_x_axis(Some("AGE".to_string()));
        state.set_y_axis(Some("STATURE".to_string()));
        let needed: Vec<String> = state.needed_columns().into_iter().collect();
        assert_eq!(
            needed,
            vec!["AGE".to_string(), "GENDER".to_string(), "STATURE".to_string()]
        );
    }
}
