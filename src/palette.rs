//! Fixed colour palette used to tint particles.

use rand::Rng;
use std::fmt;

/// An opaque sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn hex(v: u32) -> Self {
        Self {
            r: ((v >> 16) & 0xff) as u8,
            g: ((v >> 8) & 0xff) as u8,
            b: (v & 0xff) as u8,
        }
    }

    /// CSS colour string with an alpha channel, e.g. `rgba(108, 92, 231, 0.3)`.
    pub fn css_alpha(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

/// Formats as `#rrggbb`, which canvas fill styles accept directly.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Eight entries forming four thematic pairs. `#6c5ce7` appears twice, so it is
/// drawn twice as often as the others.
pub const PALETTE: [Rgb; 8] = [
    // purple
    Rgb::hex(0x6c5ce7),
    Rgb::hex(0x8e44ad),
    // teal
    Rgb::hex(0x00b894),
    Rgb::hex(0x00cec9),
    // blue
    Rgb::hex(0x0984e3),
    Rgb::hex(0x6c5ce7),
    // warm
    Rgb::hex(0xfdcb6e),
    Rgb::hex(0xe17055),
];

/// Picks one palette entry uniformly at random. Repeats are allowed.
pub fn pick(rng: &mut impl Rng) -> Rgb {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(Rgb::hex(0x6c5ce7), Rgb::new(108, 92, 231));
    }

    #[test]
    fn display_is_css_hex() {
        assert_eq!(PALETTE[6].to_string(), "#fdcb6e");
        assert_eq!(Rgb::new(0, 11, 255).to_string(), "#000bff");
    }

    #[test]
    fn css_alpha_clamps() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.css_alpha(0.5), "rgba(1, 2, 3, 0.5)");
        assert_eq!(c.css_alpha(3.0), "rgba(1, 2, 3, 1)");
    }

    #[test]
    fn pick_covers_every_entry() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 8];
        for _ in 0..2000 {
            let c = pick(&mut rng);
            let idx = PALETTE.iter().position(|p| *p == c).unwrap();
            seen[idx] = true;
        }
        // index 5 duplicates index 0, so position() never reports it
        assert!(seen.iter().enumerate().all(|(i, s)| *s || i == 5));
    }
}
