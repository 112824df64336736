//! Shared geometry for everything that sits on the board
//!
//! Positions are the top-left corner of the entity's bounding box; the
//! absolute centre is `pos + (r, r)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What an entity is, for dispatch in collision and drawing code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Food,
    Blob,
}

/// A circle on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left of the bounding box
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub kind: EntityKind,
}

impl Entity {
    pub fn new(pos: Vec2, radius: f32, color: Color, kind: EntityKind) -> Self {
        debug_assert!(radius > 0.0, "entity radius must be positive");
        Self {
            pos,
            radius,
            color,
            kind,
        }
    }

    /// A food pellet with its top-left corner at `pos`
    pub fn food(pos: Vec2, radius: f32, color: Color) -> Self {
        Self::new(pos, radius, color, EntityKind::Food)
    }

    /// Build an entity whose centre (rather than corner) is at `center`
    pub fn centered(center: Vec2, radius: f32, color: Color, kind: EntityKind) -> Self {
        Self::new(center - Vec2::splat(radius), radius, color, kind)
    }

    #[inline]
    pub fn is_food(&self) -> bool {
        self.kind == EntityKind::Food
    }

    /// Absolute centre
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    /// Move so the centre lands on `center`, keeping the radius
    #[inline]
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - Vec2::splat(self.radius);
    }

    /// Change the radius without moving the centre
    pub fn set_radius(&mut self, radius: f32) {
        debug_assert!(radius > 0.0, "entity radius must be positive");
        let center = self.center();
        self.radius = radius;
        self.set_center(center);
    }

    #[inline]
    pub fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    /// Grid cells covered by the bounding square
    pub fn grid_cells(&self, grid: &Grid) -> Vec<usize> {
        grid.cells_in_square(self.center(), self.radius)
    }

    /// The cell the entity is filed under (lowest covered index)
    pub fn home_cell(&self, grid: &Grid) -> usize {
        grid.cell_index(self.center() - Vec2::splat(self.radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_is_offset_by_radius() {
        let e = Entity::food(Vec2::new(10.0, 20.0), 5.0, Color::default());
        assert_eq!(e.center(), Vec2::new(15.0, 25.0));
        assert!(e.is_food());
    }

    #[test]
    fn test_set_radius_keeps_center() {
        let mut e = Entity::centered(Vec2::new(100.0, 100.0), 10.0, Color::default(), EntityKind::Blob);
        e.set_radius(25.0);
        assert_eq!(e.center(), Vec2::new(100.0, 100.0));
        assert_eq!(e.pos, Vec2::new(75.0, 75.0));
    }

    #[test]
    fn test_home_cell_is_first_grid_cell() {
        let grid = Grid::new(2400.0, 2400.0, 600.0);
        let e = Entity::centered(Vec2::new(600.0, 600.0), 5.0, Color::default(), EntityKind::Food);
        let cells = e.grid_cells(&grid);
        assert_eq!(cells, vec![0, 1, 4, 5]);
        assert_eq!(e.home_cell(&grid), cells[0]);
    }

    #[test]
    fn test_grid_cells_unmoved_entity_stable() {
        let grid = Grid::new(2400.0, 2400.0, 600.0);
        let e = Entity::centered(Vec2::new(1799.0, 40.0), 30.0, Color::default(), EntityKind::Blob);
        assert_eq!(e.grid_cells(&grid), e.grid_cells(&grid));
        assert_eq!(e.grid_cells(&grid), vec![2, 3]);
    }
}
