//! Planar proximity index for pointer-driven nearest-point queries
//!
//! A uniform bucket grid over pixel space: every plotted point lands in the
//! cell covering its pixel position, and a query scans only the cell ring
//! the search radius touches. Rebuilt by the chart frame whenever the point
//! set, the scales, or the plot dimensions change; a pointer move only
//! queries.

use std::collections::HashMap;

/// Identity of one plotted point: series index, then point index within
/// that series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointRef {
    pub series: usize,
    pub index: usize,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    x: f32,
    y: f32,
    point: PointRef,
}

/// Bucket-grid nearest-neighbor index over pixel positions
#[derive(Debug, Default)]
pub struct SpatialIndex {
    cell: f32,
    buckets: HashMap<(i32, i32), Vec<Entry>>,
    len: usize,
}

impl SpatialIndex {
    /// Build from per-series pixel positions; the outer slice index is the
    /// series index
    pub fn build(series: &[Vec<(f32, f32)>], cell: f32) -> Self {
        profiling::scope!("build_spatial_index");

        let mut index = Self {
            cell,
            buckets: HashMap::new(),
            len: 0,
        };
        for (series_idx, points) in series.iter().enumerate() {
            for (point_idx, &(x, y)) in points.iter().enumerate() {
                if !x.is_finite() || !y.is_finite() {
                    continue;
                }
                let key = index.key(x, y);
                index.buckets.entry(key).or_default().push(Entry {
                    x,
                    y,
                    point: PointRef {
                        series: series_idx,
                        index: point_idx,
                    },
                });
                index.len += 1;
            }
        }
        index
    }

    fn key(&self, x: f32, y: f32) -> (i32, i32) {
        ((x / self.cell).floor() as i32, (y / self.cell).floor() as i32)
    }

    /// Number of indexed points
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The single point within `radius` pixels of `(px, py)`, or `None`
    /// when no point qualifies. Equidistant candidates resolve to the
    /// lowest series index, then the lowest point index.
    pub fn nearest_within(&self, px: f32, py: f32, radius: f32) -> Option<PointRef> {
        if self.is_empty() || radius < 0.0 {
            return None;
        }

        let (cx0, cy0) = self.key(px - radius, py - radius);
        let (cx1, cy1) = self.key(px + radius, py + radius);
        let radius_sq = radius * radius;

        // best = (distance², series, index); lexicographic min applies the
        // tie rule
        let mut best: Option<(f32, usize, usize)> = None;
        for cx in cx0..=cx1 {
            for cy in cy0..=cy1 {
                let Some(entries) = self.buckets.get(&(cx, cy)) else {
                    continue;
                };
                for e in entries {
                    let (dx, dy) = (e.x - px, e.y - py);
                    let dist_sq = dx * dx + dy * dy;
                    if dist_sq > radius_sq {
                        continue;
                    }
                    let candidate = (dist_sq, e.point.series, e.point.index);
                    if best.is_none_or(|b| candidate < b) {
                        best = Some(candidate);
                    }
                }
            }
        }

        best.map(|(_, series, index)| PointRef { series, index })
    }
}
