//! Row fetch/cache state machine
//!
//! One cache cell governs the fetched row set. The cycle is
//! `NotLoaded → Loading → Loaded | Error`; any change to the derived
//! column set (axes, series, filters) resets the cell to `NotLoaded` and
//! bumps the generation, so a response that arrives for superseded inputs
//! can never overwrite the current cycle. At most one fetch is in flight
//! at a time.

use std::collections::BTreeSet;

use crate::data::RowStore;
use crate::error::AnthroError;
use crate::state::loadable::Loadable;

/// Generation stamp handed out by [`DataCache::take_fetch`] and required by
/// [`DataCache::resolve`]. A ticket from a superseded cycle is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// The single row-set cache cell and its fetch state machine
#[derive(Debug, Default)]
pub struct DataCache {
    cell: Loadable<RowStore>,
    columns: BTreeSet<String>,
    generation: u64,
    in_flight: bool,
}

impl DataCache {
    pub fn cell(&self) -> &Loadable<RowStore> {
        &self.cell
    }

    /// Loaded rows, if the current cycle completed successfully
    pub fn rows(&self) -> Option<&RowStore> {
        self.cell.value()
    }

    /// Column set the cell is valid for
    pub fn columns(&self) -> &BTreeSet<String> {
        &self.columns
    }

    /// Generation of the current fetch cycle; bumped on every invalidation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reconcile the cache with the currently needed column set. Any change
    /// discards the stale rows and starts a fresh cycle.
    pub fn sync_inputs(&mut self, needed: &BTreeSet<String>) {
        if *needed != self.columns {
            self.columns = needed.clone();
            self.start_new_cycle();
        }
    }

    /// Force a fresh cycle for the same column set (manual refresh)
    pub fn invalidate(&mut self) {
        self.start_new_cycle();
    }

    fn start_new_cycle(&mut self) {
        self.cell = Loadable::NotLoaded;
        self.generation += 1;
        self.in_flight = false;
    }

    /// Transition `NotLoaded → Loading` and hand out the fetch to run.
    /// Returns `None` while a fetch is in flight, after a terminal state is
    /// reached, or when no columns are needed.
    pub fn take_fetch(&mut self) -> Option<(FetchTicket, Vec<String>)> {
        if !self.cell.is_not_loaded() || self.columns.is_empty() {
            return None;
        }
        self.cell = Loadable::Loading;
        self.in_flight = true;
        let ticket = FetchTicket {
            generation: self.generation,
        };
        Some((ticket, self.columns.iter().cloned().collect()))
    }

    /// Complete the in-flight fetch. Results stamped with a superseded
    /// generation are dropped: the cycle they belong to was already
    /// invalidated and its cell reset.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<RowStore, AnthroError>) {
        if ticket.generation != self.generation || !self.in_flight {
            log::debug!(
                "dropping stale row response (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return;
        }
        self.in_flight = false;
        self.cell = match result {
            Ok(store) => {
                log::info!("loaded {} rows for {} columns", store.height(), self.columns.len());
                Loadable::Loaded(store)
            }
            Err(err) => {
                log::warn!("row fetch failed: {err}");
                Loadable::Error(err.user_message())
            }
        };
    }
}

/// The minimal column set a fetch must request: the union of both axis
/// columns and every filter column across all series. Empty until both axes
/// are chosen, which keeps the state machine parked in `NotLoaded`.
pub fn needed_columns(
    x_axis: Option<&str>,
    y_axis: Option<&str>,
    series: &crate::state::SeriesModel,
) -> BTreeSet<String> {
    let (Some(x), Some(y)) = (x_axis, y_axis) else {
        return BTreeSet::new();
    };
    let mut needed = series.filter_columns();
    needed.insert(x.to_string());
    needed.insert(y.to_string());
    needed
}
