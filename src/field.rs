//! The particle field: population, per-frame motion and drawing.

use crate::canvas::{Canvas2d, Stroke, Viewport};
use crate::config::{ConfigError, FieldConfig, LinkStrategy};
use crate::grid::{all_pairs, Link, LinkGrid};
use crate::palette;
use crate::particle::Particle;
use glam::Vec2;
use rand::{rngs::SmallRng, Rng};

/// Below this distance the direction away from the pointer is not defined
/// well enough to normalise; repulsion is skipped for that frame.
const MIN_REPEL_DISTANCE: f32 = 1e-6;

/// Number of particles for a viewport: `floor(w * h / area_per_particle)`.
pub fn particle_count(viewport: Viewport, area_per_particle: u32) -> usize {
    if area_per_particle == 0 {
        return 0;
    }
    (viewport.area() / area_per_particle as u64) as usize
}

/// Opacity of a link between two particles `distance` apart, or `None` when
/// they are out of range. Falls linearly from `peak` at 0 to 0 at `max`.
pub fn link_alpha(distance: f32, max: f32, peak: f32) -> Option<f32> {
    (distance < max).then(|| (1.0 - distance / max) * peak)
}

/// One frame of motion for a single particle: integrate, reflect at the
/// viewport edges, then push away from the pointer.
///
/// Reflection flips the velocity component but leaves the position where it
/// is, so a particle may overshoot an edge by up to one step.
pub fn advance(particle: &mut Particle, bounds: Vec2, pointer: Option<Vec2>, cfg: &FieldConfig) {
    particle.position += particle.velocity;

    let p = particle.position;
    if p.x < 0.0 || p.x > bounds.x {
        particle.velocity.x = -particle.velocity.x;
    }
    if p.y < 0.0 || p.y > bounds.y {
        particle.velocity.y = -particle.velocity.y;
    }

    if let Some(pointer) = pointer {
        particle.position += repulsion(particle.position, pointer, cfg.pointer_radius, cfg.pointer_strength);
    }
}

/// Displacement applied to a particle at `position` by the pointer.
///
/// Points directly away from the pointer, with magnitude
/// `strength * (radius - d) / radius` inside the radius and zero outside.
pub fn repulsion(position: Vec2, pointer: Vec2, radius: f32, strength: f32) -> Vec2 {
    let offset = position - pointer;
    let d = offset.length();
    if d >= radius || d < MIN_REPEL_DISTANCE {
        return Vec2::ZERO;
    }
    let force = (radius - d) / radius;
    offset / d * force * strength
}

/// Owns the particles and everything needed to step and draw them.
pub struct ParticleField {
    config: FieldConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
    pointer: Option<Vec2>,
    rng: SmallRng,
    grid: LinkGrid,
    links: Vec<Link>,
    positions: Vec<Vec2>,
}

impl ParticleField {
    /// An empty field over a zero-sized viewport. Call [`ParticleField::resize`]
    /// to populate it.
    pub fn new(config: FieldConfig, rng: SmallRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            viewport: Viewport::default(),
            particles: Vec::new(),
            pointer: None,
            rng,
            grid: LinkGrid::new(),
            links: Vec::new(),
            positions: Vec::new(),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the current particles. The count stays tied to the viewport.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn set_pointer(&mut self, position: Vec2) {
        self.pointer = Some(position);
    }

    /// Adopt a new viewport and rebuild the whole population for it.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.populate();
        log::debug!(
            "particle field resized to {}x{}, {} particles",
            viewport.width,
            viewport.height,
            self.particles.len()
        );
    }

    /// Replace every particle with a freshly sampled one.
    pub fn populate(&mut self) {
        let count = particle_count(self.viewport, self.config.area_per_particle);
        let extent = self.viewport.extent();
        let cfg = &self.config;
        let rng = &mut self.rng;

        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            // count > 0 implies a non-empty extent on both axes
            let position = Vec2::new(rng.random_range(0.0..extent.x), rng.random_range(0.0..extent.y));
            let size = rng.random_range(cfg.size_min..cfg.size_max);
            let velocity = Vec2::new(
                rng.random_range(-cfg.max_speed..cfg.max_speed),
                rng.random_range(-cfg.max_speed..cfg.max_speed),
            );
            let color = palette::pick(&mut *rng);
            self.particles.push(Particle::new(position, velocity, size, color));
        }
    }

    /// Advance every particle in order, drawing each right after it moves.
    pub fn advance_all(&mut self, canvas: &mut impl Canvas2d) {
        let bounds = self.viewport.extent();
        for particle in &mut self.particles {
            advance(particle, bounds, self.pointer, &self.config);
            canvas.fill_circle(particle.position, particle.size(), particle.color);
        }
    }

    /// Pairs currently within link distance, ordered by `(a, b)`.
    pub fn links(&mut self) -> &[Link] {
        self.positions.clear();
        self.positions.extend(self.particles.iter().map(|p| p.position));
        let max = self.config.link_distance;
        match self.config.link_strategy {
            LinkStrategy::AllPairs => all_pairs(&self.positions, max, &mut self.links),
            LinkStrategy::Grid => self.grid.links(&self.positions, self.viewport, max, &mut self.links),
        }
        &self.links
    }

    /// Stroke a fading line between every pair of particles in link range.
    pub fn connect(&mut self, canvas: &mut impl Canvas2d) {
        let cfg = self.config;
        self.links();
        for link in &self.links {
            let Some(alpha) = link_alpha(link.distance, cfg.link_distance, cfg.link_alpha) else {
                continue;
            };
            let stroke = Stroke {
                color: cfg.link_color,
                alpha,
                width: cfg.link_width,
            };
            canvas.stroke_line(self.positions[link.a], self.positions[link.b], &stroke);
        }
    }

    /// One full frame: clear, move and draw particles, then draw links.
    pub fn frame(&mut self, canvas: &mut impl Canvas2d) {
        canvas.clear(self.viewport);
        self.advance_all(canvas);
        self.connect(canvas);
    }
}
