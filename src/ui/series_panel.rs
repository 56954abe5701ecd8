//! Series editor panel (left sidebar)
//!
//! Edits are collected while iterating the model immutably and applied
//! through the model's mutation entry points afterwards, so every change
//! bumps the series revision exactly once.

use eframe::egui::{self, ComboBox, DragValue, RichText};

use crate::app::Anthroscope;
use crate::chart::color::series_color;
use crate::state::{ColumnCatalog, Comparator, FilterId, Loadable, SeriesId};

enum SeriesEdit {
    Add,
    GenderPreset,
    Remove(SeriesId),
    SetLabel(SeriesId, String),
    AddFilter(SeriesId, String),
    RemoveFilter(SeriesId, FilterId),
    SetFilterColumn(SeriesId, FilterId, String),
    SetFilterComparator(SeriesId, FilterId, Comparator),
    SetFilterThreshold(SeriesId, FilterId, f64),
}

/// Render the series editor panel
pub fn render_series_panel(app: &mut Anthroscope, ui: &mut egui::Ui) {
    let mut edits: Vec<SeriesEdit> = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("Series");
        if ui.button("➕").on_hover_text("Add a series").clicked() {
            edits.push(SeriesEdit::Add);
        }
        let has_gender = matches!(
            &app.state.catalog,
            Loadable::Loaded(catalog) if catalog.get("GENDER").is_some()
        );
        if has_gender
            && ui
                .button("🚻")
                .on_hover_text("Replace with a Men vs. Women split")
                .clicked()
        {
            edits.push(SeriesEdit::GenderPreset);
        }
    });
    ui.separator();

    let catalog = match &app.state.catalog {
        Loadable::Loaded(catalog) => Some(catalog),
        Loadable::NotLoaded | Loadable::Loading | Loadable::Error(_) => None,
    };
    let default_column = catalog
        .and_then(|c| c.visible().next())
        .map(|c| c.id.clone());

    egui::ScrollArea::vertical().show(ui, |ui| {
        if app.state.series.is_empty() {
            ui.weak("No series defined. A series is a labeled subset of rows\nselected by column filters.");
        }

        for (i, series) in app.state.series.iter().enumerate() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(series_color(i), "●");
                    let mut label = series.label.clone();
                    if ui.text_edit_singleline(&mut label).changed() {
                        edits.push(SeriesEdit::SetLabel(series.id, label));
                    }
                    if ui.button("🗑").on_hover_text("Remove series").clicked() {
                        edits.push(SeriesEdit::Remove(series.id));
                    }
                });

                for filter in &series.filters {
                    ui.horizontal(|ui| {
                        if let Some(catalog) = catalog {
                            filter_column_combo(ui, catalog, series.id, filter, &mut edits);
                        } else {
                            ui.label(&filter.column_id);
                        }

                        filter_comparator_combo(ui, series.id, filter, &mut edits);

                        let mut threshold = filter.threshold;
                        let unit = catalog.map(|c| c.unit_for(&filter.column_id)).unwrap_or("");
                        let mut drag = DragValue::new(&mut threshold).speed(1.0);
                        if !unit.is_empty() {
                            drag = drag.suffix(format!(" {unit}"));
                        }
                        if ui.add(drag).changed() {
                            edits.push(SeriesEdit::SetFilterThreshold(
                                series.id, filter.id, threshold,
                            ));
                        }

                        if ui.button("✖").on_hover_text("Remove filter").clicked() {
                            edits.push(SeriesEdit::RemoveFilter(series.id, filter.id));
                        }
                    });
                }

                if let Some(default_column) = &default_column {
                    if ui
                        .button(RichText::new("➕ filter").small())
                        .on_hover_text("Rows must match every filter of the series")
                        .clicked()
                    {
                        edits.push(SeriesEdit::AddFilter(series.id, default_column.clone()));
                    }
                }
            });
        }
    });

    apply_edits(app, edits);
}

fn filter_column_combo(
    ui: &mut egui::Ui,
    catalog: &ColumnCatalog,
    series: SeriesId,
    filter: &crate::state::Filter,
    edits: &mut Vec<SeriesEdit>,
) {
    ComboBox::from_id_salt(("filter-column", filter.id))
        .selected_text(catalog.label_for(&filter.column_id).to_string())
        .width(110.0)
        .show_ui(ui, |ui| {
            for col in catalog.visible() {
                let response = ui
                    .selectable_label(filter.column_id == col.id, &col.label)
                    .on_hover_text(&col.description);
                if response.clicked() {
                    edits.push(SeriesEdit::SetFilterColumn(series, filter.id, col.id.clone()));
                }
            }
        });
}

fn filter_comparator_combo(
    ui: &mut egui::Ui,
    series: SeriesId,
    filter: &crate::state::Filter,
    edits: &mut Vec<SeriesEdit>,
) {
    ComboBox::from_id_salt(("filter-comparator", filter.id))
        .selected_text(filter.comparator.label())
        .width(120.0)
        .show_ui(ui, |ui| {
            for comparator in Comparator::ALL {
                if ui
                    .selectable_label(filter.comparator == comparator, comparator.label())
                    .clicked()
                {
                    edits.push(SeriesEdit::SetFilterComparator(series, filter.id, comparator));
                }
            }
        });
}

fn apply_edits(app: &mut Anthroscope, edits: Vec<SeriesEdit>) {
    if edits.is_empty() {
        return;
    }
    app.state.ui.clear_notice();

    let series = &mut app.state.series;
    for edit in edits {
        match edit {
            SeriesEdit::Add => {
                series.add_series("New Series");
            }
            SeriesEdit::GenderPreset => {
                series.apply_gender_preset("GENDER");
                app.state.ui.set_notice("Series set to Men vs. Women");
            }
            SeriesEdit::Remove(id) => series.remove_series(id),
            SeriesEdit::SetLabel(id, label) => series.set_label(id, label),
            SeriesEdit::AddFilter(id, column) => {
                series.add_filter(id, column);
            }
            SeriesEdit::RemoveFilter(id, filter) => series.remove_filter(id, filter),
            SeriesEdit::SetFilterColumn(id, filter, column) => {
                series.set_filter_column(id, filter, column)
            }
            SeriesEdit::SetFilterComparator(id, filter, comparator) => {
                series.set_filter_comparator(id, filter, comparator)
            }
            SeriesEdit::SetFilterThreshold(id, filter, threshold) => {
                series.set_filter_threshold(id, filter, threshold)
            }
        }
    }
}
