//! Paint state for a single primitive.

use fluxfx_core::Color;

/// Fill or stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    /// Filled interior.
    Fill,
    /// Outline of the given width.
    Stroke {
        /// Line width.
        width: f32,
    },
}

/// How a primitive is painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// Color, alpha included.
    pub color: Color,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Gaussian blur radius, `0` for none.
    pub blur: f32,
}

impl Paint {
    /// Sharp fill.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            blur: 0.0,
        }
    }

    /// Sharp stroke.
    #[must_use]
    pub const fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke { width },
            blur: 0.0,
        }
    }

    /// Same paint, blurred.
    #[must_use]
    pub fn with_blur(mut self, blur: f32) -> Self {
        self.blur = blur;
        self
    }

    /// Width of a stroke including its blur falloff on both sides.
    #[must_use]
    pub fn footprint(&self) -> f32 {
        self.stroke_width() + 2.0 * self.blur
    }

    /// Stroke width, `0` for fills.
    #[must_use]
    pub const fn stroke_width(&self) -> f32 {
        match self.style {
            PaintStyle::Fill => 0.0,
            PaintStyle::Stroke { width } => width,
        }
    }
}
