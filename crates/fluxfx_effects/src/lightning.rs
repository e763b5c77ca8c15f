//! # Lightning Path Generator
//!
//! Recursive midpoint displacement. Each level splits a segment at its
//! midpoint, nudges the midpoint by a random offset proportional to the
//! remaining depth, and recurses on both halves. Depth `d` yields a polyline
//! of `2^d` straight segments.
//!
//! Particles are placed by arc length, so a jagged bolt gets the same number
//! of samples as a straight one.

use fluxfx_core::Vec2;
use rand::Rng;

/// Displacement scale at depth 16.
const DISPLACEMENT: f32 = 50.0;

/// A generated bolt as a polyline with arc-length lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct LightningPath {
    points: Vec<Vec2>,
    /// `cumulative[i]` is the arc length from `points[0]` to `points[i]`.
    cumulative: Vec<f32>,
}

impl LightningPath {
    /// Generates a bolt from `start` to `end` with `depth` levels of
    /// subdivision.
    pub fn generate<R: Rng + ?Sized>(start: Vec2, end: Vec2, depth: u32, rng: &mut R) -> Self {
        let mut points = Vec::with_capacity((1_usize << depth.min(16)) + 1);
        points.push(start);
        subdivide(start, end, depth, rng, &mut points);

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }

        Self { points, cumulative }
    }

    /// Polyline vertices, `start` first and `end` last.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of straight segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Total arc length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Point at fraction `t` of the arc length.
    ///
    /// `t <= 0` returns the start and `t >= 1` the end, exactly.
    #[must_use]
    pub fn point_at(&self, t: f32) -> Vec2 {
        let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) else {
            return Vec2::ZERO;
        };
        if t <= 0.0 {
            return first;
        }
        if t >= 1.0 {
            return last;
        }

        let total = self.length();
        if total <= 0.0 {
            return first;
        }
        let target = total * t;

        // First vertex at or past the target distance.
        let upper = self.cumulative.partition_point(|&d| d < target).max(1);
        if upper >= self.points.len() {
            return last;
        }
        let lower = upper - 1;
        let span = self.cumulative[upper] - self.cumulative[lower];
        if span <= 0.0 {
            return self.points[upper];
        }
        let local = (target - self.cumulative[lower]) / span;
        self.points[lower].lerp(self.points[upper], local)
    }

    /// `count` points at evenly spaced fractions `i / count`, `i` in `0..count`.
    #[must_use]
    pub fn resample(&self, count: usize) -> Vec<Vec2> {
        (0..count)
            .map(|i| self.point_at(i as f32 / count as f32))
            .collect()
    }
}

/// Appends the vertices after `a` up to and including `b`.
fn subdivide<R: Rng + ?Sized>(a: Vec2, b: Vec2, depth: u32, rng: &mut R, out: &mut Vec<Vec2>) {
    if depth == 0 {
        out.push(b);
        return;
    }
    let spread = DISPLACEMENT * depth as f32 / 16.0;
    let mid = a.midpoint(b)
        + Vec2::new(
            (rng.gen::<f32>() - 0.5) * spread,
            (rng.gen::<f32>() - 0.5) * spread,
        );
    subdivide(a, mid, depth - 1, rng, out);
    subdivide(mid, b, depth - 1, rng, out);
}
