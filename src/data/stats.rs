use polars::prelude::*;

/// Summary statistics for one fetched column
#[derive(Debug, Clone, Copy)]
pub struct ColumnSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl Default for ColumnSummary {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 0.0,
            median: 0.0,
            min: 0.0,
            max: 0.0,
            count: 0,
        }
    }
}

/// Calculate summary statistics from a Series using polars
pub fn summarize(series: &Series) -> ColumnSummary {
    let count = series.len();

    if count == 0 {
        return ColumnSummary::default();
    }

    // Cast to f64 for numeric operations
    let series_f64 = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return ColumnSummary::default(),
    };

    let chunked = match series_f64.f64() {
        Ok(c) => c,
        Err(_) => return ColumnSummary::default(),
    };

    ColumnSummary {
        mean: chunked.mean().unwrap_or(0.0),
        std_dev: chunked.std(1).unwrap_or(0.0), // ddof=1 for sample std dev
        median: chunked.median().unwrap_or(0.0),
        min: chunked.min().unwrap_or(0.0),
        max: chunked.max().unwrap_or(0.0),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let series = Series::new("test".into(), &data);
        let summary = summarize(&series);

        assert_eq!(summary.mean, 3.0);
        assert_eq!(summary.median, 3.0);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 5.0);
        assert_eq!(summary.count, 5);
    }

    #[test]
    fn test_empty_series() {
        let data: Vec<f64> = vec![];
        let series = Series::new("test".into(), &data);
        let summary = summarize(&series);

        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.count, 0);
    }
}
