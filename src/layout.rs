//! Fallback marker layout
//!
//! When the analysis service reports a color without any positions, its
//! markers are spread over an evenly spaced grid covering the middle 80%
//! of the image. The engine scales every position from source to preview
//! space, so grids fed to it are laid over the source image with
//! [`FallbackGrid::source_positions`]; [`FallbackGrid::positions`] gives the
//! same layout directly in preview space.

use serde::{Deserialize, Serialize};

use crate::constants::placement;
use crate::sample::{ImageDimensions, Point, PreviewSize};

/// Rows and columns of the fallback grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackGrid {
    pub rows: u32,
    pub columns: u32,
}

impl Default for FallbackGrid {
    fn default() -> Self {
        Self {
            rows: placement::FALLBACK_ROWS,
            columns: placement::FALLBACK_COLUMNS,
        }
    }
}

impl FallbackGrid {
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Cell centers of the grid laid over `preview`, row-major, rounded to whole pixels
    pub fn positions(&self, preview: PreviewSize) -> Vec<Point> {
        self.cell_centers(preview.width, preview.height)
    }

    /// Cell centers laid over the source image, ready to pass to the engine
    pub fn source_positions(&self, source: ImageDimensions) -> Vec<Point> {
        self.cell_centers(source.width, source.height)
    }

    fn cell_centers(&self, width: f64, height: f64) -> Vec<Point> {
        let inset = placement::FALLBACK_INSET;
        let usable_width = width * (1.0 - 2.0 * inset);
        let usable_height = height * (1.0 - 2.0 * inset);
        let offset_x = width * inset;
        let offset_y = height * inset;

        let cell_width = usable_width / f64::from(self.columns);
        let cell_height = usable_height / f64::from(self.rows);

        let mut positions = Vec::with_capacity((self.rows * self.columns) as usize);
        for row in 0..self.rows {
            for col in 0..self.columns {
                let x = offset_x + cell_width * (f64::from(col) + 0.5);
                let y = offset_y + cell_height * (f64::from(row) + 0.5);
                positions.push(Point::new(x.round(), y.round()));
            }
        }
        positions
    }
}

/// Default 3x4 fallback grid for a preview
pub fn fallback_positions(preview: PreviewSize) -> Vec<Point> {
    FallbackGrid::default().positions(preview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_shape() {
        let preview = PreviewSize::new(320.0, 220.0);
        let positions = fallback_positions(preview);
        assert_eq!(positions.len(), 12);

        // First cell: 32 + 64 * 0.5, 22 + 58.67 * 0.5
        assert_eq!(positions[0], Point::new(64.0, 51.0));
        // Row-major: fourth point is still on the first row
        assert_eq!(positions[3].y, positions[0].y);
        assert!(positions[4].y > positions[0].y);
    }

    #[test]
    fn test_grid_stays_inside_inset() {
        let preview = PreviewSize::new(500.0, 300.0);
        for p in FallbackGrid::new(5, 7).positions(preview) {
            assert!(p.x >= 50.0 && p.x <= 450.0);
            assert!(p.y >= 30.0 && p.y <= 270.0);
        }
    }

    #[test]
    fn test_empty_grid() {
        let preview = PreviewSize::new(500.0, 300.0);
        assert!(FallbackGrid::new(0, 4).positions(preview).is_empty());
    }

    #[test]
    fn test_source_grid_scales_onto_preview_grid() {
        let source = ImageDimensions::new(800.0, 600.0);
        let preview = PreviewSize::new(320.0, 220.0);
        let grid = FallbackGrid::default();

        let scaled: Vec<Point> = grid
            .source_positions(source)
            .iter()
            .map(|p| Point::new(p.x * 320.0 / 800.0, p.y * 220.0 / 600.0))
            .collect();

        for (a, b) in scaled.iter().zip(grid.positions(preview)) {
            assert!(a.distance(&b) < 1.0, "{:?} vs {:?}", a, b);
        }
    }
}
