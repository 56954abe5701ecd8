//! Scatter-plot render surface
//!
//! Draws straight from the chart frame with the egui painter: grid lines at
//! the scales' tick positions, axis annotation with units, one translucent
//! regression band per series clipped to the plot interior, and one marker
//! per point (enlarged for the current tooltip target). Pointer moves only
//! query the frame's prebuilt proximity index; the frame itself is rebuilt
//! by [`crate::chart::ChartCache`] when inputs or dimensions change.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, pos2};

use crate::app::Anthroscope;
use crate::chart::color::series_color;
use crate::chart::{ChartFrame, FrameKey, LinearScale};
use crate::constants::chart::{
    BAND_ALPHA, HOVER_RADIUS, PLOT_MARGIN, POINT_RADIUS, POINT_RADIUS_HOVERED,
};
use crate::state::Loadable;

/// Render the plot area
pub fn render_plot(app: &mut Anthroscope, ui: &mut egui::Ui) {
    profiling::scope!("render_plot");

    let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
    let rect = response.rect;
    let hint_color = ui.visuals().weak_text_color();

    // no tooltip target unless a query hits below
    app.state.ui.hovered_point = None;

    match app.state.cache.cell() {
        Loadable::NotLoaded => {
            let hint = if app.state.has_axes() {
                "No data"
            } else {
                "Select X and Y axes to load data"
            };
            centered_text(&painter, rect, hint, hint_color);
            return;
        }
        Loadable::Loading => {
            centered_text(&painter, rect, "Loading data…", hint_color);
            return;
        }
        Loadable::Error(_) => {
            // the status line carries the message; the plot shows the
            // distinct no-data state, never stale rows
            centered_text(&painter, rect, "No data", ui.visuals().error_fg_color);
            return;
        }
        Loadable::Loaded(_) => {}
    }

    let Anthroscope { state, chart, .. } = app;
    let (Some(x_id), Some(y_id)) = (
        state.x_axis().map(str::to_string),
        state.y_axis().map(str::to_string),
    ) else {
        centered_text(&painter, rect, "Select X and Y axes", hint_color);
        return;
    };

    let (x_title, y_title, x_unit, y_unit) = match &state.catalog {
        Loadable::Loaded(catalog) => (
            catalog
                .get(&x_id)
                .map(|c| c.label_with_unit())
                .unwrap_or_else(|| x_id.clone()),
            catalog
                .get(&y_id)
                .map(|c| c.label_with_unit())
                .unwrap_or_else(|| y_id.clone()),
            catalog.unit_for(&x_id).to_string(),
            catalog.unit_for(&y_id).to_string(),
        ),
        _ => (x_id.clone(), y_id.clone(), String::new(), String::new()),
    };

    let key = FrameKey::new(
        state.cache.generation(),
        state.series.revision(),
        state.axes_revision(),
        rect.width(),
        rect.height(),
    );
    let series_model = &state.series;
    let frame = match state.cache.rows() {
        Some(store) => chart.ensure_with(key, || {
            ChartFrame::build(store, series_model, &x_id, &y_id, rect.width(), rect.height())
        }),
        None => None,
    };
    let Some(frame) = frame else {
        centered_text(&painter, rect, "No data", hint_color);
        return;
    };

    // proximity query; the tooltip target resets whenever it misses
    let hover = response
        .hover_pos()
        .and_then(|pos| frame.nearest_within(pos.x - rect.min.x, pos.y - rect.min.y, HOVER_RADIUS));
    state.ui.hovered_point = hover.map(|p| (p.series, p.index));

    let to_screen =
        |x_px: f32, y_px: f32| -> Pos2 { pos2(rect.min.x + x_px, rect.min.y + y_px) };
    let interior = Rect::from_min_max(
        to_screen(PLOT_MARGIN, PLOT_MARGIN),
        to_screen(rect.width() - PLOT_MARGIN, rect.height() - PLOT_MARGIN),
    );

    draw_grid_and_axes(
        ui,
        &painter,
        interior,
        &frame.x_scale,
        &frame.y_scale,
        &to_screen,
        state.ui.show_grid,
        (&x_title, &y_title),
    );

    if state.ui.show_bands {
        let clipped = painter.with_clip_rect(interior);
        for (i, fit) in frame.regressions.iter().enumerate() {
            // degenerate regressions carry no band
            let Some(fit) = fit else { continue };
            let color = series_color(i);
            let (x0, x1) = frame.x_scale.domain();
            let (y0, y1) = (fit.y_at(x0), fit.y_at(x1));

            let corners = vec![
                to_screen(frame.x_scale.apply(x0), frame.y_scale.apply(y0 - fit.epsilon)),
                to_screen(frame.x_scale.apply(x1), frame.y_scale.apply(y1 - fit.epsilon)),
                to_screen(frame.x_scale.apply(x1), frame.y_scale.apply(y1 + fit.epsilon)),
                to_screen(frame.x_scale.apply(x0), frame.y_scale.apply(y0 + fit.epsilon)),
            ];
            let band = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), BAND_ALPHA);
            clipped.add(Shape::convex_polygon(corners, band, Stroke::NONE));

            clipped.line_segment(
                [
                    to_screen(frame.x_scale.apply(x0), frame.y_scale.apply(y0)),
                    to_screen(frame.x_scale.apply(x1), frame.y_scale.apply(y1)),
                ],
                Stroke::new(1.5, color),
            );
        }
    }

    for (si, series) in frame.series.iter().enumerate() {
        let color = series_color(si);
        for (pi, p) in series.points.iter().enumerate() {
            let pos = to_screen(frame.x_scale.apply(p.x), frame.y_scale.apply(p.y));
            let radius = if state.ui.hovered_point == Some((si, pi)) {
                POINT_RADIUS_HOVERED
            } else {
                POINT_RADIUS
            };
            painter.circle_filled(pos, radius, color);
        }
    }

    if let Some(target) = hover {
        if let Some(p) = frame.point(target) {
            let label = frame
                .series
                .get(target.series)
                .map(|s| s.label.clone())
                .unwrap_or_default();
            response.clone().on_hover_ui_at_pointer(|ui| {
                ui.colored_label(series_color(target.series), label);
                ui.label(with_unit(p.x, &x_unit));
                ui.label(with_unit(p.y, &y_unit));
            });
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_grid_and_axes(
    ui: &egui::Ui,
    painter: &egui::Painter,
    interior: Rect,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
    to_screen: &dyn Fn(f32, f32) -> Pos2,
    show_grid: bool,
    (x_title, y_title): (&str, &str),
) {
    let grid_stroke = Stroke::new(1.0, ui.visuals().faint_bg_color);
    let axis_stroke = Stroke::new(1.0, ui.visuals().weak_text_color());
    let text_color = ui.visuals().text_color();
    let tick_font = FontId::proportional(10.0);

    for tick in x_scale.ticks() {
        let x = to_screen(x_scale.apply(tick), 0.0).x;
        if show_grid {
            painter.line_segment(
                [pos2(x, interior.top()), pos2(x, interior.bottom())],
                grid_stroke,
            );
        }
        painter.text(
            pos2(x, interior.bottom() + 4.0),
            Align2::CENTER_TOP,
            x_scale.format_tick(tick),
            tick_font.clone(),
            text_color,
        );
    }

    for tick in y_scale.ticks() {
        let y = to_screen(0.0, y_scale.apply(tick)).y;
        if show_grid {
            painter.line_segment(
                [pos2(interior.left(), y), pos2(interior.right(), y)],
                grid_stroke,
            );
        }
        painter.text(
            pos2(interior.left() - 4.0, y),
            Align2::RIGHT_CENTER,
            y_scale.format_tick(tick),
            tick_font.clone(),
            text_color,
        );
    }

    painter.line_segment(
        [interior.left_top(), interior.left_bottom()],
        axis_stroke,
    );
    painter.line_segment(
        [interior.left_bottom(), interior.right_bottom()],
        axis_stroke,
    );

    painter.text(
        pos2(interior.center().x, interior.bottom() + 18.0),
        Align2::CENTER_TOP,
        x_title,
        FontId::proportional(12.0),
        text_color,
    );
    painter.text(
        pos2(interior.left(), interior.top() - 6.0),
        Align2::LEFT_BOTTOM,
        y_title,
        FontId::proportional(12.0),
        text_color,
    );
}

fn with_unit(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{value}")
    } else {
        format!("{value} {unit}")
    }
}

fn centered_text(painter: &egui::Painter, rect: Rect, text: &str, color: Color32) {
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        text,
        FontId::proportional(14.0),
        color,
    );
}
