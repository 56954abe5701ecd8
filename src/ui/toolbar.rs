//! Toolbar: axis selection, view toggles, and the status line

use eframe::egui::{self, Color32, ComboBox};

use crate::app::Anthroscope;
use crate::state::Loadable;

/// Render the toolbar row and the status line beneath it
pub fn render_toolbar(app: &mut Anthroscope, ui: &mut egui::Ui) {
    ui.horizontal_wrapped(|ui| {
        ui.heading("Anthroscope");
        ui.separator();

        render_axis_selectors(app, ui);

        ui.separator();

        if ui
            .button("⟳")
            .on_hover_text("Discard cached rows and fetch again")
            .clicked()
        {
            app.state.cache.invalidate();
        }

        ui.toggle_value(&mut app.state.ui.show_grid, "Grid");
        ui.toggle_value(&mut app.state.ui.show_bands, "Bands");
        ui.toggle_value(&mut app.state.ui.show_stats, "Stats");
        ui.toggle_value(&mut app.state.ui.show_catalog, "Columns");

        let theme_label = if app.state.ui.dark_mode { "🌙 Dark" } else { "☀ Light" };
        if ui.button(theme_label).clicked() {
            app.state.ui.dark_mode = !app.state.ui.dark_mode;
        }
    });

    render_status_line(app, ui);
}

fn render_axis_selectors(app: &mut Anthroscope, ui: &mut egui::Ui) {
    let mut x_pick: Option<String> = None;
    let mut y_pick: Option<String> = None;

    match &app.state.catalog {
        Loadable::Loaded(catalog) => {
            axis_combo(ui, "X Axis", catalog, app.state.x_axis(), &mut x_pick);
            axis_combo(ui, "Y Axis", catalog, app.state.y_axis(), &mut y_pick);
        }
        Loadable::Loading | Loadable::NotLoaded => {
            ui.spinner();
            ui.label("Loading columns…");
        }
        Loadable::Error(msg) => {
            ui.colored_label(Color32::LIGHT_RED, format!("⚠ Columns: {msg}"));
        }
    }

    if let Some(id) = x_pick {
        app.state.set_x_axis(Some(id));
    }
    if let Some(id) = y_pick {
        app.state.set_y_axis(Some(id));
    }
}

fn axis_combo(
    ui: &mut egui::Ui,
    label: &str,
    catalog: &crate::state::ColumnCatalog,
    current: Option<&str>,
    pick: &mut Option<String>,
) {
    let selected = current
        .map(|id| catalog.label_for(id).to_string())
        .unwrap_or_else(|| "Select…".to_string());

    ComboBox::from_label(label)
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for col in catalog.visible() {
                let response = ui
                    .selectable_label(current == Some(col.id.as_str()), &col.label)
                    .on_hover_text(&col.description);
                if response.clicked() {
                    *pick = Some(col.id.clone());
                }
            }
        });
}

fn render_status_line(app: &Anthroscope, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        match app.state.cache.cell() {
            Loadable::NotLoaded => {
                if app.state.has_axes() {
                    ui.weak("No data");
                } else {
                    ui.weak("Select X and Y axes to load data");
                }
            }
            Loadable::Loading => {
                ui.spinner();
                ui.weak("Loading rows…");
            }
            Loadable::Loaded(store) => {
                let points = app
                    .chart
                    .frame()
                    .map(|f| f.total_points())
                    .unwrap_or_default();
                ui.weak(format!(
                    "{} rows · {} series · {} points",
                    store.height(),
                    app.state.series.len(),
                    points
                ));
                if let Some(at) = store.fetched_at() {
                    ui.separator();
                    ui.weak(format!("data as of {}", at.format("%Y-%m-%d %H:%M:%S UTC")));
                }
            }
            Loadable::Error(msg) => {
                ui.colored_label(Color32::LIGHT_RED, format!("⚠ {msg}"));
            }
        }

        if let Some(notice) = &app.state.ui.notice {
            ui.separator();
            ui.weak(notice);
        }
    });
}
