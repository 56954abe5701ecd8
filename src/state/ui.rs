//! UI interaction state

/// Transient view and interaction state. Owned by the app state; the render
/// surface reads it and only the interaction handlers write it.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Dark mode theme toggle
    pub dark_mode: bool,

    /// Grid visibility
    pub show_grid: bool,

    /// Regression band visibility
    pub show_bands: bool,

    /// Column catalog table panel visibility
    pub show_catalog: bool,

    /// Per-series statistics panel visibility
    pub show_stats: bool,

    /// Current tooltip target as (series index, point index). `None` means
    /// no tooltip; reset whenever a proximity query misses.
    pub hovered_point: Option<(usize, usize)>,

    /// Transient status message (last copy/preset action), cleared on the
    /// next mutation
    pub notice: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_grid: true,
            show_bands: true,
            show_catalog: false,
            show_stats: true,
            hovered_point: None,
            notice: None,
        }
    }
}

impl UiState {
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
