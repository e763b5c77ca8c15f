//! Colors and the curated palettes.
//!
//! Every particle color comes from one of two fixed palettes: the eight-color
//! neon palette used by most modes, or the four warm colors used by fire.

use bytemuck::{Pod, Zeroable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// 32-bit RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component.
    pub a: u8,
}

impl Color {
    /// Solid black (the background).
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);

    /// Neon green.
    pub const NEON_GREEN: Self = Self::hex(0x39FF14);
    /// Scarlet red.
    pub const SCARLET: Self = Self::hex(0xFF2400);
    /// Purple.
    pub const PURPLE: Self = Self::hex(0x9D00FF);
    /// Orange red.
    pub const ORANGE_RED: Self = Self::hex(0xFF4500);
    /// Magenta.
    pub const MAGENTA: Self = Self::hex(0xFF10F0);
    /// Cyan.
    pub const CYAN: Self = Self::hex(0x00FFFF);
    /// Yellow.
    pub const YELLOW: Self = Self::hex(0xFFFF00);
    /// Orange.
    pub const ORANGE: Self = Self::hex(0xFFA500);

    /// Creates a color from RGBA bytes.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from a 0xRRGGBB value.
    #[must_use]
    pub const fn hex(rgb: u32) -> Self {
        Self::rgba(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
            255,
        )
    }

    /// Returns the same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Packs into 0xRRGGBBAA.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Normalized float components, for GPU upload.
    #[must_use]
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// The general-purpose neon palette.
pub const NEON_PALETTE: [Color; 8] = [
    Color::NEON_GREEN,
    Color::SCARLET,
    Color::PURPLE,
    Color::ORANGE_RED,
    Color::MAGENTA,
    Color::CYAN,
    Color::YELLOW,
    Color::ORANGE,
];

/// The warm subset used by fire.
pub const FIRE_PALETTE: [Color; 4] = [
    Color::SCARLET,
    Color::ORANGE_RED,
    Color::YELLOW,
    Color::ORANGE,
];

/// Picks a uniformly random color from a palette.
///
/// # Panics
///
/// Panics if `palette` is empty.
pub fn pick<R: Rng + ?Sized>(palette: &[Color], rng: &mut R) -> Color {
    palette[rng.gen_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_hex_unpacks_channels() {
        let c = Color::hex(0x9D00FF);
        assert_eq!((c.r, c.g, c.b, c.a), (0x9D, 0x00, 0xFF, 255));
        assert_eq!(c.to_u32(), 0x9D00_FFFF);
    }

    #[test]
    fn test_fire_palette_is_subset() {
        for c in FIRE_PALETTE {
            assert!(NEON_PALETTE.contains(&c));
        }
    }

    #[test]
    fn test_pick_stays_in_palette() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(FIRE_PALETTE.contains(&pick(&FIRE_PALETTE, &mut rng)));
        }
    }
}
