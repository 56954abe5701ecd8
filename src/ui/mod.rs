mod catalog_table;
mod plot;
mod series_panel;
mod stats_panel;
mod toolbar;

pub use catalog_table::render_catalog_table;
pub use plot::render_plot;
pub use series_panel::render_series_panel;
pub use stats_panel::render_stats_panel;
pub use toolbar::render_toolbar;
