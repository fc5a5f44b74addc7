use crate::palette::Rgb;
use glam::Vec2;

/// One point of the background field.
///
/// Plain data; all behaviour lives in [`crate::field::ParticleField`].
/// `size` is fixed at creation and always positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub color: Rgb,
    size: f32,
}

impl Particle {
    /// `size` must be a positive number; checked in debug builds.
    pub fn new(position: Vec2, velocity: Vec2, size: f32, color: Rgb) -> Self {
        debug_assert!(size > 0.0, "particle size must be positive, got {size}");
        Self {
            position,
            velocity,
            color,
            size,
        }
    }

    /// Radius in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PALETTE;

    #[test]
    fn keeps_its_size() {
        let p = Particle::new(Vec2::new(1.0, 2.0), Vec2::ZERO, 2.5, PALETTE[0]);
        assert_eq!(p.size(), 2.5);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "particle size must be positive")]
    fn zero_size_is_caught_in_debug_builds() {
        Particle::new(Vec2::ZERO, Vec2::ZERO, 0.0, PALETTE[0]);
    }
}
