//! Per-series statistics panel (bottom strip)
//!
//! Shows each series' point count and regression readout, and copies a
//! series' materialized points to the clipboard as CSV.

use eframe::egui;

use crate::app::Anthroscope;
use crate::chart::color::series_color;
use crate::chart::MaterializedSeries;

/// Render the per-series statistics strip
pub fn render_stats_panel(app: &mut Anthroscope, ui: &mut egui::Ui) {
    let Anthroscope { state, chart, .. } = app;
    let Some(frame) = chart.frame() else {
        ui.weak("No plotted series");
        return;
    };

    let mut copy_request: Option<usize> = None;

    egui::ScrollArea::horizontal().show(ui, |ui| {
        ui.horizontal(|ui| {
            for (i, series) in frame.series.iter().enumerate() {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.colored_label(series_color(i), "●");
                            ui.strong(&series.label);
                            if ui
                                .button("📋")
                                .on_hover_text("Copy points as CSV")
                                .clicked()
                            {
                                copy_request = Some(i);
                            }
                        });
                        ui.weak(format!("{} points", series.points.len()));
                        match frame.regressions[i] {
                            Some(fit) => {
                                ui.weak(format!(
                                    "fit: y = {:.3}·x + {:.3}",
                                    fit.slope, fit.intercept
                                ));
                                ui.weak(format!("band ±{:.3}", fit.epsilon));
                            }
                            None => {
                                ui.weak("fit: not enough spread");
                            }
                        }
                    });
                });
            }
        });
    });

    if let Some(i) = copy_request {
        if let Some(series) = frame.series.get(i) {
            match copy_series_csv(series) {
                Ok(()) => state
                    .ui
                    .set_notice(format!("Copied '{}' to the clipboard", series.label)),
                Err(err) => {
                    log::warn!("clipboard copy failed: {err}");
                    state.ui.set_notice("Clipboard unavailable");
                }
            }
        }
    }
}

fn copy_series_csv(series: &MaterializedSeries) -> Result<(), arboard::Error> {
    let mut csv = String::from("x,y\n");
    for p in &series.points {
        csv.push_str(&format!("{},{}\n", p.x, p.y));
    }
    arboard::Clipboard::new()?.set_text(csv)
}
