//! Random sampling helpers on the simulation RNG

use glam::Vec2;
use rand::Rng;

use super::entity::Color;

/// Normal sample via Box-Muller
pub fn gauss<R: Rng>(rng: &mut R, mean: f32, std_dev: f32) -> f32 {
    let u1: f32 = rng.random::<f32>().max(f32::EPSILON);
    let u2: f32 = rng.random::<f32>();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f32::consts::TAU * u2).cos();
    mean + z * std_dev.abs()
}

/// Gaussian point around `mean`, clamped onto a `width` x `height` board
pub fn gauss_point<R: Rng>(
    rng: &mut R,
    mean: Vec2,
    std_dev: f32,
    width: f32,
    height: f32,
) -> Vec2 {
    let x = gauss(rng, mean.x, std_dev);
    let y = gauss(rng, mean.y, std_dev);
    crate::clamp_to_board(Vec2::new(x, y), width, height)
}

/// Uniform vector in `[-1, 1]²`
pub fn unit_square<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::new(
        2.0 * rng.random::<f32>() - 1.0,
        2.0 * rng.random::<f32>() - 1.0,
    )
}

pub fn random_color<R: Rng>(rng: &mut R) -> Color {
    Color::new(rng.random(), rng.random(), rng.random())
}
