//! GPU-ready instance data.
//!
//! [`InstanceBuilder`] turns compositor calls into two flat buffers: one
//! [`CircleInstance`] per circle and six [`LineVertex`]es per bolt quad. Both
//! are `Pod`, so a backend uploads them with [`bytemuck::cast_slice`] and
//! never walks the engine's data.

use fluxfx_core::{Color, Vec2};
use fluxfx_effects::BoltPath;

use crate::compositor::Compositor;
use crate::paint::Paint;

/// Curve steps per bolt segment when flattening.
pub const CURVE_STEPS: usize = 8;

/// One circle, drawn as a quad by the backend.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CircleInstance {
    /// Center (x, y).
    pub center: [f32; 2],
    /// Radius.
    pub radius: f32,
    /// Blur radius.
    pub blur: f32,
    /// Color (RGBA).
    pub color: [f32; 4],
}

/// Vertex of a flattened bolt stroke.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
    /// Blur radius.
    pub blur: f32,
    /// Padding to 16-byte alignment.
    pub _pad: f32,
}

impl LineVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(position: Vec2, color: [f32; 4], blur: f32) -> Self {
        Self {
            position: position.to_array(),
            color,
            blur,
            _pad: 0.0,
        }
    }
}

/// Compositor that builds instance buffers.
#[derive(Debug)]
pub struct InstanceBuilder {
    clear_color: [f32; 4],
    circles: Vec<CircleInstance>,
    lines: Vec<LineVertex>,
    polyline: Vec<Vec2>,
}

impl InstanceBuilder {
    /// Creates empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            clear_color: Color::BLACK.to_f32_array(),
            circles: Vec::with_capacity(512),
            lines: Vec::with_capacity(2048),
            polyline: Vec::with_capacity(256),
        }
    }

    /// Clear color of the current frame.
    #[must_use]
    pub const fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// Circle instances in draw order.
    #[must_use]
    pub fn circles(&self) -> &[CircleInstance] {
        &self.circles
    }

    /// Bolt triangles, three vertices each.
    #[must_use]
    pub fn lines(&self) -> &[LineVertex] {
        &self.lines
    }

    /// Circle buffer as bytes.
    #[must_use]
    pub fn circle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.circles)
    }

    /// Line buffer as bytes.
    #[must_use]
    pub fn line_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.lines)
    }

    fn flatten(&mut self, path: &BoltPath) {
        self.polyline.clear();
        self.polyline.push(path.start);
        for index in 0..path.segments.len() {
            for step in 1..=CURVE_STEPS {
                let t = step as f32 / CURVE_STEPS as f32;
                if let Some(point) = path.eval(index, t) {
                    self.polyline.push(point);
                }
            }
        }
    }
}

impl Default for InstanceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Compositor for InstanceBuilder {
    fn clear(&mut self, color: Color) {
        self.clear_color = color.to_f32_array();
        self.circles.clear();
        self.lines.clear();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.circles.push(CircleInstance {
            center: center.to_array(),
            radius,
            blur: paint.blur,
            color: paint.color.to_f32_array(),
        });
    }

    fn stroke_bolt(&mut self, path: &BoltPath, paint: &Paint) {
        self.flatten(path);
        let half = paint.footprint() * 0.5;
        let color = paint.color.to_f32_array();

        for pair in self.polyline.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let along = b - a;
            let len = along.length();
            if len <= f32::EPSILON {
                continue;
            }
            let normal = Vec2::new(-along.y, along.x) * (half / len);
            let corners = [a + normal, a - normal, b + normal, b - normal];
            for i in [0, 1, 2, 2, 1, 3] {
                self.lines.push(LineVertex::new(corners[i], color, paint.blur));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluxfx_effects::QuadSegment;

    fn straight_bolt() -> BoltPath {
        BoltPath {
            start: Vec2::new(0.0, 0.0),
            segments: vec![
                QuadSegment {
                    control: Vec2::new(5.0, 0.0),
                    end: Vec2::new(10.0, 0.0),
                },
                QuadSegment {
                    control: Vec2::new(15.0, 0.0),
                    end: Vec2::new(20.0, 0.0),
                },
            ],
        }
    }

    #[test]
    fn test_circle_instance_layout() {
        assert_eq!(std::mem::size_of::<CircleInstance>(), 32);
        assert_eq!(std::mem::size_of::<LineVertex>(), 32);
    }

    #[test]
    fn test_bolt_flattens_to_quads() {
        let mut builder = InstanceBuilder::new();
        builder.clear(Color::BLACK);
        builder.stroke_bolt(&straight_bolt(), &Paint::stroke(Color::CYAN, 10.0));

        // Two segments, eight steps each, six vertices per step.
        assert_eq!(builder.lines().len(), 2 * CURVE_STEPS * 6);
        for v in builder.lines() {
            assert!((v.position[1].abs() - 5.0).abs() < 1e-4);
        }
        assert_eq!(builder.line_bytes().len(), builder.lines().len() * 32);
    }

    #[test]
    fn test_blurred_bolt_quads_cover_falloff() {
        let mut builder = InstanceBuilder::new();
        builder.stroke_bolt(
            &straight_bolt(),
            &Paint::stroke(Color::CYAN, 10.0).with_blur(8.0),
        );
        for v in builder.lines() {
            assert!((v.position[1].abs() - 13.0).abs() < 1e-4);
            assert_eq!(v.blur, 8.0);
        }
    }

    #[test]
    fn test_clear_resets_buffers() {
        let mut builder = InstanceBuilder::new();
        builder.fill_circle(Vec2::new(1.0, 1.0), 4.0, &Paint::fill(Color::YELLOW).with_blur(8.0));
        assert_eq!(builder.circles().len(), 1);
        assert_eq!(builder.circles()[0].blur, 8.0);

        builder.clear(Color::BLACK);
        assert!(builder.circles().is_empty());
        assert_eq!(builder.clear_color(), [0.0, 0.0, 0.0, 1.0]);
    }
}
