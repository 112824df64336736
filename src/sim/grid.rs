//! Uniform spatial grid over the board
//!
//! The board is cut into square cells of side `frame_size`, numbered row-major.
//! Food is bucketed by cell so collision and sight queries only touch the
//! few cells a bounding square overlaps.

use std::collections::BTreeSet;

use glam::Vec2;

use crate::config::GameConfig;

/// Row-major grid of square cells covering the board
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: f32,
    height: f32,
    cell_size: f32,
    cols: usize,
    rows: usize,
}

impl Grid {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0 && cell_size > 0.0);
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);
        Self {
            width,
            height,
            cell_size,
            cols,
            rows,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.game_width, config.game_height, config.frame_size)
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the cell containing `point`, clamped onto the board first
    pub fn cell_index(&self, point: Vec2) -> usize {
        let x = point.x.min(self.width - 1.0).max(0.0);
        let y = point.y.min(self.height - 1.0).max(0.0);
        let col = ((x / self.cell_size) as usize).min(self.cols - 1);
        let row = ((y / self.cell_size) as usize).min(self.rows - 1);
        row * self.cols + col
    }

    /// Cells overlapped by the square `center ± extent`, ascending
    ///
    /// Four-corner walk: the top-left, top-right and bottom-left corners fix the
    /// first row's span and the last row; every row in between repeats the span.
    pub fn cells_in_square(&self, center: Vec2, extent: f32) -> Vec<usize> {
        let top_left = self.cell_index(center - Vec2::splat(extent));
        let top_right = self.cell_index(Vec2::new(center.x + extent, center.y - extent));
        let bottom_left = self.cell_index(Vec2::new(center.x - extent, center.y + extent));

        let mut cells = BTreeSet::new();
        let mut offset = 0;
        while top_left + offset <= bottom_left {
            cells.extend((top_left + offset)..=(top_right + offset));
            offset += self.cols;
        }
        cells.into_iter().collect()
    }

    /// Centre point of a cell
    pub fn cell_center(&self, index: usize) -> Vec2 {
        let col = index % self.cols;
        let row = index / self.cols;
        Vec2::new(
            (col as f32 + 0.5) * self.cell_size,
            (row as f32 + 0.5) * self.cell_size,
        )
    }
}
