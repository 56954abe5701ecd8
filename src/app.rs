//! Application shell and per-frame orchestration
//!
//! All recomputation is explicit: after the worker results are applied and
//! the user edits are in, `orchestrate` re-derives the needed column set,
//! reconciles the cache cell, and dispatches at most one fetch. The chart
//! itself rebuilds inside the plot renderer, keyed by input revisions.

use std::time::Duration;

use eframe::egui::{self, CentralPanel};
use egui_extras::{Size, StripBuilder};

use crate::api::{ApiClient, ApiRequest, ApiResult};
use crate::chart::ChartCache;
use crate::constants::layout;
use crate::state::{AppState, Loadable};
use crate::ui;

pub struct Anthroscope {
    /// Application state, exclusively owned here and passed by reference
    pub state: AppState,

    /// Memoized chart frame
    pub chart: ChartCache,

    client: ApiClient,
}

impl Anthroscope {
    pub fn new(host: String) -> Self {
        Self {
            state: AppState::default(),
            chart: ChartCache::default(),
            client: ApiClient::spawn(host),
        }
    }

    /// Apply completed worker results to the state cells
    fn poll_api(&mut self) {
        while let Some(result) = self.client.poll() {
            match result {
                ApiResult::Catalog(Ok(catalog)) => {
                    log::info!("column catalog loaded ({} columns)", catalog.len());
                    self.state.catalog = Loadable::Loaded(catalog);
                }
                ApiResult::Catalog(Err(err)) => {
                    log::warn!("catalog fetch failed: {err}");
                    self.state.catalog = Loadable::Error(err.user_message());
                }
                ApiResult::Rows { ticket, result } => {
                    self.state.cache.resolve(ticket, result);
                }
            }
        }
    }

    /// Drive the fetch state machines from the current inputs
    fn orchestrate(&mut self) {
        if self.state.catalog.is_not_loaded() {
            self.state.catalog = Loadable::Loading;
            self.client.request(ApiRequest::FetchCatalog);
        }

        let needed = self.state.needed_columns();
        self.state.cache.sync_inputs(&needed);
        if let Some((ticket, columns)) = self.state.cache.take_fetch() {
            self.client.request(ApiRequest::FetchRows { ticket, columns });
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            if i.key_pressed(egui::Key::G) {
                self.state.ui.show_grid = !self.state.ui.show_grid;
            }
            if i.key_pressed(egui::Key::B) {
                self.state.ui.show_bands = !self.state.ui.show_bands;
            }
            if i.key_pressed(egui::Key::C) {
                self.state.ui.show_catalog = !self.state.ui.show_catalog;
            }
            if i.key_pressed(egui::Key::T) {
                self.state.ui.dark_mode = !self.state.ui.dark_mode;
            }
        });
    }
}

impl eframe::App for Anthroscope {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        profiling::scope!("app_update");

        if self.state.ui.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        self.handle_shortcuts(ctx);
        self.poll_api();
        self.orchestrate();

        // fetches resolve off-thread; keep polling while one is pending
        if self.state.catalog.is_loading() || self.state.cache.cell().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        let show_catalog = self.state.ui.show_catalog;
        let show_stats = self.state.ui.show_stats && !self.state.series.is_empty();

        CentralPanel::default().show(ctx, |ui| {
            let mut horizontal = StripBuilder::new(ui)
                .size(Size::exact(layout::SERIES_PANEL_WIDTH))
                .size(Size::remainder());
            if show_catalog {
                horizontal = horizontal.size(Size::exact(layout::CATALOG_PANEL_WIDTH));
            }

            horizontal.horizontal(|mut strip| {
                strip.cell(|ui| {
                    ui::render_series_panel(self, ui);
                });

                strip.cell(|ui| {
                    let mut vertical = StripBuilder::new(ui)
                        .size(Size::initial(layout::TOOLBAR_HEIGHT))
                        .size(Size::remainder());
                    if show_stats {
                        vertical = vertical.size(Size::exact(layout::STATS_PANEL_HEIGHT));
                    }

                    vertical.vertical(|mut strip| {
                        strip.cell(|ui| {
                            ui::render_toolbar(self, ui);
                        });
                        strip.cell(|ui| {
                            ui::render_plot(self, ui);
                        });
                        if show_stats {
                            strip.cell(|ui| {
                                ui::render_stats_panel(self, ui);
                            });
                        }
                    });
                });

                if show_catalog {
                    strip.cell(|ui| {
                        ui::render_catalog_table(self, ui);
                    });
                }
            });
        });
    }
}
