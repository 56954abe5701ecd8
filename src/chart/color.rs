//! Deterministic cyclic series palette

use egui::Color32;

/// Number of distinct colors before the palette wraps
pub const PALETTE_LEN: usize = 10;

const PALETTE: [Color32; PALETTE_LEN] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(127, 127, 127), // Gray
    Color32::from_rgb(188, 189, 34),  // Yellow
    Color32::from_rgb(23, 190, 207),  // Cyan
];

/// Color for a series index: a pure function, stable across calls, wrapping
/// when the series count exceeds the palette size
pub fn series_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        for i in 0..PALETTE_LEN {
            assert_eq!(series_color(i), series_color(i));
        }
    }

    #[test]
    fn test_cyclic_wrap() {
        for i in 0..PALETTE_LEN * 2 {
            assert_eq!(series_color(i), series_color(i + PALETTE_LEN));
        }
    }

    #[test]
    fn test_adjacent_series_differ() {
        for i in 0..PALETTE_LEN - 1 {
            assert_ne!(series_color(i), series_color(i + 1));
        }
    }
}
