use crate::palette::Rgb;
use thiserror::Error;

/// How [`crate::field::ParticleField::connect`] finds pairs within link range.
///
/// Both strategies report the same links in the same order; they only differ
/// in cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LinkStrategy {
    /// Check every unordered pair, O(n²).
    AllPairs,
    /// Bucket particles into cells of link-distance size and only compare
    /// neighbouring cells.
    #[default]
    Grid,
}

/// Tunables for the particle field. `Default` gives the stock look.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    /// Viewport pixels per particle; count is `floor(w * h / area_per_particle)`.
    pub area_per_particle: u32,
    /// Particle radius is sampled from `size_min..size_max`.
    pub size_min: f32,
    pub size_max: f32,
    /// Velocity components are sampled from `-max_speed..max_speed`.
    pub max_speed: f32,
    pub pointer_radius: f32,
    /// Displacement in pixels per frame at the pointer centre.
    pub pointer_strength: f32,
    pub link_distance: f32,
    /// Alpha of a link between two coincident particles.
    pub link_alpha: f32,
    pub link_width: f32,
    pub link_color: Rgb,
    pub link_strategy: LinkStrategy,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            area_per_particle: 15_000,
            size_min: 1.0,
            size_max: 4.0,
            max_speed: 0.25,
            pointer_radius: 100.0,
            pointer_strength: 3.0,
            link_distance: 100.0,
            link_alpha: 0.3,
            link_width: 0.5,
            link_color: Rgb::new(108, 92, 231),
            link_strategy: LinkStrategy::Grid,
        }
    }
}

/// Rejected [`FieldConfig`] values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("area per particle must be non-zero")]
    ZeroDensity,

    #[error("particle size range {min}..{max} is empty or non-positive")]
    SizeRange { min: f32, max: f32 },

    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("link alpha must lie in 0..=1, got {0}")]
    Alpha(f32),
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.area_per_particle == 0 {
            return Err(ConfigError::ZeroDensity);
        }
        // NaN fails both comparisons and is rejected here too
        if !(self.size_min > 0.0 && self.size_max > self.size_min && self.size_max.is_finite()) {
            return Err(ConfigError::SizeRange {
                min: self.size_min,
                max: self.size_max,
            });
        }
        for (name, value) in [
            ("max_speed", self.max_speed),
            ("pointer_radius", self.pointer_radius),
            ("pointer_strength", self.pointer_strength),
            ("link_distance", self.link_distance),
            ("link_width", self.link_width),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NotPositive { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.link_alpha) {
            return Err(ConfigError::Alpha(self.link_alpha));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(FieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let base = FieldConfig::default();

        let cfg = FieldConfig { area_per_particle: 0, ..base };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDensity));

        let cfg = FieldConfig { size_min: 4.0, size_max: 4.0, ..base };
        assert!(matches!(cfg.validate(), Err(ConfigError::SizeRange { .. })));

        let cfg = FieldConfig { size_min: 0.0, ..base };
        assert!(matches!(cfg.validate(), Err(ConfigError::SizeRange { .. })));

        let cfg = FieldConfig { pointer_radius: -1.0, ..base };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { name: "pointer_radius", .. })
        ));

        let cfg = FieldConfig { link_distance: f32::NAN, ..base };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { name: "link_distance", .. })
        ));

        let cfg = FieldConfig { link_alpha: 1.5, ..base };
        assert_eq!(cfg.validate(), Err(ConfigError::Alpha(1.5)));
    }

    #[test]
    fn error_messages_name_the_field() {
        let err = ConfigError::NotPositive { name: "max_speed", value: 0.0 };
        assert_eq!(err.to_string(), "max_speed must be a positive finite number, got 0");
    }
}
