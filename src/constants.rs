//! Application-wide constants and default values
//!
//! This module centralizes all magic numbers and default values used throughout
//! the application, making them easier to maintain and configure.

/// Data API defaults
pub mod api {
    /// Environment variable overriding the API host
    pub const HOST_ENV_VAR: &str = "ANTHRO_API_URL";

    /// Fallback API host when the environment variable is unset
    pub const DEFAULT_HOST: &str = "http://localhost:8080";

    /// Endpoint path serving both header and rollup modes
    pub const ENDPOINT: &str = "anthro.php";

    /// Per-request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
}

/// Chart geometry defaults
pub mod chart {
    /// Margin between the widget edge and the plot interior, in pixels
    pub const PLOT_MARGIN: f32 = 40.0;

    /// Fraction of the domain extent added symmetrically across both ends
    /// (0.1 means 5% padding per side; 0 disables padding)
    pub const DOMAIN_PADDING: f64 = 0.1;

    /// Target number of axis ticks per scale
    pub const TARGET_TICKS: usize = 6;

    /// Pointer hit radius for the nearest-point tooltip query, in pixels
    pub const HOVER_RADIUS: f32 = 100.0;

    /// Marker radius for a plotted point
    pub const POINT_RADIUS: f32 = 2.0;

    /// Marker radius for the current tooltip target
    pub const POINT_RADIUS_HOVERED: f32 = 5.0;

    /// Alpha applied to a series color when filling its regression band
    pub const BAND_ALPHA: u8 = 40;
}

/// Spatial index defaults
pub mod spatial {
    /// Bucket-grid cell size in pixels
    pub const CELL_SIZE: f32 = 64.0;
}

/// UI layout defaults
pub mod layout {
    /// Left panel (series editor) default width
    pub const SERIES_PANEL_WIDTH: f32 = 280.0;

    /// Right panel (column catalog table) default width
    pub const CATALOG_PANEL_WIDTH: f32 = 420.0;

    /// Bottom panel (per-series statistics) default height
    pub const STATS_PANEL_HEIGHT: f32 = 110.0;

    /// Toolbar strip height
    pub const TOOLBAR_HEIGHT: f32 = 64.0;
}
