//! Scatter-chart engine
//!
//! Composes the pipeline for one set of inputs: materialize the series,
//! compute combined axis statistics and per-series regressions, build the
//! padded/niced pixel scales, and index the plotted pixel positions for
//! nearest-point queries. [`ChartCache`] memoizes the result by input
//! revisions and plot dimensions so pointer moves never rebuild anything.
//! Only an axes, series, data, or resize change recomputes, and then the
//! whole frame is recomputed at once.

pub mod color;
pub mod materialize;
pub mod scale;
pub mod spatial;
pub mod stats;

pub use materialize::MaterializedSeries;
pub use scale::LinearScale;
pub use spatial::PointRef;
pub use stats::{AxisStatistics, LinearRegression, PlotPoint};

use crate::constants::chart::{DOMAIN_PADDING, PLOT_MARGIN};
use crate::constants::spatial::CELL_SIZE;
use crate::data::RowStore;
use crate::error::Result;
use crate::state::SeriesModel;
use spatial::SpatialIndex;

/// Everything the render surface consumes for one frame of the chart
#[derive(Debug)]
pub struct ChartFrame {
    pub series: Vec<MaterializedSeries>,
    pub stats: AxisStatistics,
    /// Per-series fit aligned with `series`; `None` marks a degenerate
    /// regression whose band is skipped
    pub regressions: Vec<Option<LinearRegression>>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    index: SpatialIndex,
}

impl ChartFrame {
    /// Run the full pipeline for the given inputs and plot size in pixels
    pub fn build(
        store: &RowStore,
        series_model: &SeriesModel,
        x_column: &str,
        y_column: &str,
        width: f32,
        height: f32,
    ) -> Result<Self> {
        profiling::scope!("build_chart_frame");

        let series = materialize::materialize(store, series_model, x_column, y_column)?;

        let stats = AxisStatistics::from_points(series.iter().flat_map(|s| s.points.iter()));
        let regressions = series
            .iter()
            .map(|s| LinearRegression::fit(&s.points))
            .collect();

        let x_scale = LinearScale::fitted(
            stats.x_min,
            stats.x_max,
            stats.dx,
            DOMAIN_PADDING,
            (PLOT_MARGIN, width - PLOT_MARGIN),
        );
        // descending pixel range: the y axis grows upward
        let y_scale = LinearScale::fitted(
            stats.y_min,
            stats.y_max,
            stats.dy,
            DOMAIN_PADDING,
            (height - PLOT_MARGIN, PLOT_MARGIN),
        );

        let positions: Vec<Vec<(f32, f32)>> = series
            .iter()
            .map(|s| {
                s.points
                    .iter()
                    .map(|p| (x_scale.apply(p.x), y_scale.apply(p.y)))
                    .collect()
            })
            .collect();
        let index = SpatialIndex::build(&positions, CELL_SIZE);

        Ok(Self {
            series,
            stats,
            regressions,
            x_scale,
            y_scale,
            index,
        })
    }

    /// Proximity query against the prebuilt index (pixel coordinates local
    /// to the plot)
    pub fn nearest_within(&self, px: f32, py: f32, radius: f32) -> Option<PointRef> {
        self.index.nearest_within(px, py, radius)
    }

    /// Resolve a point reference back to its data values
    pub fn point(&self, point: PointRef) -> Option<PlotPoint> {
        self.series
            .get(point.series)?
            .points
            .get(point.index)
            .copied()
    }

    pub fn total_points(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Identity of the inputs a [`ChartFrame`] was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameKey {
    data_generation: u64,
    series_revision: u64,
    axes_revision: u64,
    width_bits: u32,
    height_bits: u32,
}

impl FrameKey {
    pub fn new(
        data_generation: u64,
        series_revision: u64,
        axes_revision: u64,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            data_generation,
            series_revision,
            axes_revision,
            width_bits: width.to_bits(),
            height_bits: height.to_bits(),
        }
    }
}

/// Memoized chart frame, keyed by input identity
#[derive(Debug, Default)]
pub struct ChartCache {
    key: Option<FrameKey>,
    frame: Option<ChartFrame>,
}

impl ChartCache {
    /// Return the frame for `key`, rebuilding only when the key changed.
    /// A failed build clears the frame and is not retried until the inputs
    /// change again.
    pub fn ensure_with(
        &mut self,
        key: FrameKey,
        build: impl FnOnce() -> Result<ChartFrame>,
    ) -> Option<&ChartFrame> {
        if self.key != Some(key) {
            self.frame = match build() {
                Ok(frame) => Some(frame),
                Err(err) => {
                    log::error!("chart frame build failed: {err}");
                    None
                }
            };
            self.key = Some(key);
        }
        self.frame.as_ref()
    }

    pub fn frame(&self) -> Option<&ChartFrame> {
        self.frame.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100 rows: 40 men on an exact line, 60 women on a flat line
    fn partitioned_store() -> RowStore {
        let mut gender = Vec::new();
        let mut age = Vec::new();
        let mut stature = Vec::new();
        for i in 0..100 {
            let x = i as f64;
            if i < 40 {
                gender.push(1.0);
                stature.push(2.0 * x + 1.0);
            } else {
                gender.push(2.0);
                stature.push(5.0);
            }
            age.push(x);
        }
        RowStore::from_columns(
            vec![
                ("GENDER".to_string(), gender),
                ("AGE".to_string(), age),
                ("STATURE".to_string(), stature),
            ],
            None,
        )
        .unwrap()
    }

    fn gender_split() -> SeriesModel {
        let mut series = SeriesModel::default();
        series.apply_gender_preset("GENDER");
        series
    }

    #[test]
    fn test_end_to_end_partition() {
        let store = partitioned_store();
        let series = gender_split();
        let frame = ChartFrame::build(&store, &series, "AGE", "STATURE", 800.0, 400.0).unwrap();

        // the two filters partition all 100 rows, 40/60
        assert_eq!(frame.series.len(), 2);
        assert_eq!(frame.series[0].points.len(), 40);
        assert_eq!(frame.series[1].points.len(), 60);
        assert_eq!(frame.total_points(), 100);

        // each regression is fit from that series' own points only
        let men = frame.regressions[0].unwrap();
        assert!((men.slope - 2.0).abs() < 1e-9);
        assert!(men.epsilon < 1e-6);

        let women = frame.regressions[1].unwrap();
        assert!(women.slope.abs() < 1e-9);
        assert!(women.epsilon < 1e-6);

        // the combined cloud is nothing like either series' own fit
        let all: Vec<PlotPoint> = frame
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .collect();
        let combined = LinearRegression::fit(&all).unwrap();
        assert!(combined.epsilon > 1.0);
    }

    #[test]
    fn test_frame_geometry_and_query() {
        let store = partitioned_store();
        let series = gender_split();
        let frame = ChartFrame::build(&store, &series, "AGE", "STATURE", 800.0, 400.0).unwrap();

        // stats cover the combined point set
        assert_eq!(frame.stats.x_min, 0.0);
        assert_eq!(frame.stats.x_max, 99.0);
        assert_eq!(frame.stats.y_max, 2.0 * 39.0 + 1.0);

        // querying at a known point's pixel position finds that point
        let p = frame.series[0].points[10];
        let (px, py) = (frame.x_scale.apply(p.x), frame.y_scale.apply(p.y));
        let hit = frame.nearest_within(px, py, 5.0).unwrap();
        assert_eq!(hit, PointRef { series: 0, index: 10 });
        assert_eq!(frame.point(hit), Some(p));
    }

    #[test]
    fn test_empty_store_builds_empty_frame() {
        let store = RowStore::from_columns(
            vec![("AGE".to_string(), vec![]), ("STATURE".to_string(), vec![])],
            None,
        )
        .unwrap();
        let series = gender_split();
        // filter column missing from the store is a contract violation
        assert!(ChartFrame::build(&store, &series, "AGE", "STATURE", 800.0, 400.0).is_err());

        let mut no_filters = SeriesModel::default();
        no_filters.add_series("Everyone");
        let frame =
            ChartFrame::build(&store, &no_filters, "AGE", "STATURE", 800.0, 400.0).unwrap();
        assert_eq!(frame.total_points(), 0);
        assert_eq!(frame.stats, AxisStatistics::default());
        assert!(frame.regressions[0].is_none());
        assert!(frame.nearest_within(400.0, 200.0, 100.0).is_none());
    }

    #[test]
    fn test_cache_rebuilds_only_on_key_change() {
        let store = partitioned_store();
        let series = gender_split();
        let mut cache = ChartCache::default();
        let mut builds = 0;

        let key = FrameKey::new(1, series.revision(), 0, 800.0, 400.0);
        for _ in 0..3 {
            cache.ensure_with(key, || {
                builds += 1;
                ChartFrame::build(&store, &series, "AGE", "STATURE", 800.0, 400.0)
            });
        }
        assert_eq!(builds, 1);

        // a resize is a key change
        let resized = FrameKey::new(1, series.revision(), 0, 640.0, 400.0);
        cache.ensure_with(resized, || {
            builds += 1;
            ChartFrame::build(&store, &series, "AGE", "STATURE", 640.0, 400.0)
        });
        assert_eq!(builds, 2);
    }
}
