//! Collision, consumption and dominance predicates
//!
//! Free functions over [`Entity`] so food and blobs share the same geometry.
//! Eating is gated twice: the eater must dominate by a fixed size ratio, and
//! the victim's centre must sit inside the eater.

use glam::Vec2;

use super::entity::Entity;
use crate::consts::DOMINANCE_RATIO;

/// Circles touch: centre distance below the sum of radii
#[inline]
pub fn has_collided(a: &Entity, b: &Entity) -> bool {
    a.center().distance(b.center()) < a.radius + b.radius
}

/// Stronger than touching: centre distance below the larger radius, so the
/// smaller circle sits mostly inside the larger one
#[inline]
pub fn has_eaten(a: &Entity, b: &Entity) -> bool {
    a.center().distance(b.center()) < a.radius.max(b.radius)
}

/// `a > b`: a is bigger than b by more than the dominance ratio
#[inline]
pub fn dominates(a: &Entity, b: &Entity) -> bool {
    a.radius > b.radius / DOMINANCE_RATIO
}

/// `a < b`: a is smaller than b by more than the dominance ratio
#[inline]
pub fn is_dominated_by(a: &Entity, b: &Entity) -> bool {
    a.radius < DOMINANCE_RATIO * b.radius
}

/// Radius after absorbing another circle: areas add
#[inline]
pub fn grown_radius(r1: f32, r2: f32) -> f32 {
    (r1 * r1 + r2 * r2).sqrt()
}

/// Zero any axis of `direction` that would push `pos` further past a board edge
pub fn trim_direction(direction: Vec2, pos: Vec2, width: f32, height: f32) -> Vec2 {
    let mut dir = direction;
    if pos.x <= 0.0 && dir.x <= 0.0 {
        dir.x = 0.0;
    }
    if pos.x >= width && dir.x >= 0.0 {
        dir.x = 0.0;
    }
    if pos.y <= 0.0 && dir.y <= 0.0 {
        dir.y = 0.0;
    }
    if pos.y >= height && dir.y >= 0.0 {
        dir.y = 0.0;
    }
    dir
}

/// Does the circle overlap the axis-aligned square `square_center ± half_extent`?
pub fn circle_overlaps_square(
    circle_center: Vec2,
    radius: f32,
    square_center: Vec2,
    half_extent: f32,
) -> bool {
    let min = square_center - Vec2::splat(half_extent);
    let max = square_center + Vec2::splat(half_extent);
    let closest = circle_center.clamp(min, max);
    closest.distance_squared(circle_center) <= radius * radius
}
