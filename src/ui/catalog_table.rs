//! Column catalog table (right panel)
//!
//! Lists every catalog column with its metadata, plus summary statistics
//! for the columns present in the currently fetched row set.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::app::Anthroscope;
use crate::state::Loadable;

/// Render the catalog table panel
pub fn render_catalog_table(app: &mut Anthroscope, ui: &mut egui::Ui) {
    ui.heading("Columns");
    ui.separator();

    let catalog = match &app.state.catalog {
        Loadable::Loaded(catalog) => catalog,
        Loadable::NotLoaded | Loadable::Loading => {
            ui.spinner();
            ui.weak("Loading columns…");
            return;
        }
        Loadable::Error(msg) => {
            ui.colored_label(egui::Color32::LIGHT_RED, format!("⚠ {msg}"));
            return;
        }
    };

    let columns: Vec<&crate::state::Column> = catalog.iter().collect();
    let rows = app.state.cache.rows();

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::initial(80.0).resizable(true).clip(true)) // label
        .column(Column::initial(45.0).resizable(false)) // unit
        .column(Column::initial(45.0).resizable(false)) // count
        .columns(Column::initial(55.0).resizable(false), 4) // mean/std/min/max
        .column(Column::remainder().clip(true)) // description
        .header(22.0, |mut header| {
            for title in ["Column", "Unit", "n", "Mean", "Std", "Min", "Max", "Description"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, columns.len(), |mut row| {
                let col = columns[row.index()];
                let summary = rows
                    .filter(|store| store.has_column(&col.id))
                    .and_then(|store| store.column_summary(&col.id).ok());

                row.col(|ui| {
                    let text = if col.visible {
                        egui::RichText::new(&col.label)
                    } else {
                        egui::RichText::new(&col.label).weak()
                    };
                    ui.label(text).on_hover_text(&col.id);
                });
                row.col(|ui| {
                    ui.label(&col.unit);
                });
                row.col(|ui| {
                    ui.label(
                        summary
                            .map(|s| s.count.to_string())
                            .unwrap_or_else(|| "–".to_string()),
                    );
                });
                for value in [
                    summary.map(|s| s.mean),
                    summary.map(|s| s.std_dev),
                    summary.map(|s| s.min),
                    summary.map(|s| s.max),
                ] {
                    row.col(|ui| {
                        ui.label(
                            value
                                .map(|v| format!("{v:.1}"))
                                .unwrap_or_else(|| "–".to_string()),
                        );
                    });
                }
                row.col(|ui| {
                    ui.label(&col.description);
                });
            });
        });
}
