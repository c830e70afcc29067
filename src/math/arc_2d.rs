//! Circular arcs encoded by bulge.
//!
//! Bulge convention: `bulge = tan(sweep_angle / 4)`.
//! - `bulge = 0`: straight line
//! - `bulge > 0`: counter-clockwise arc
//! - `bulge < 0`: clockwise arc
//! - `|bulge| = 1`: semicircle

use std::f64::consts::PI;

use super::{Point2, EPSILON};

/// Bulges with a smaller magnitude are treated as straight segments.
pub const STRAIGHT_BULGE: f64 = 1e-12;

/// A circular arc in center-radius-angle form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulgeArc {
    pub center: Point2,
    pub radius: f64,
    pub start_angle: f64,
    pub sweep: f64,
}

impl BulgeArc {
    /// Converts a bulge-encoded segment from `start` to `end` into an arc.
    ///
    /// Returns `None` for a straight segment (`|bulge|` below
    /// [`STRAIGHT_BULGE`]) or a zero-length chord.
    #[must_use]
    pub fn from_bulge(start: &Point2, end: &Point2, bulge: f64) -> Option<Self> {
        if bulge.abs() < STRAIGHT_BULGE {
            return None;
        }
        let chord = end - start;
        let chord_len = chord.norm();
        if chord_len < EPSILON {
            return None;
        }

        // Distance from chord midpoint to center, along the left normal.
        let sagitta_ratio = (1.0 - bulge * bulge) / (2.0 * bulge);
        let mid = Point2::new((start.x + end.x) * 0.5, (start.y + end.y) * 0.5);
        let nx = -chord.y / chord_len;
        let ny = chord.x / chord_len;
        let half = chord_len * 0.5;
        let center = Point2::new(mid.x + sagitta_ratio * half * nx, mid.y + sagitta_ratio * half * ny);

        // r = d*(1+b²)/(4*|b|) from r = d/(2*sin(θ/2)) with θ = 4*atan(b)
        let radius = half * (1.0 + bulge * bulge) / (2.0 * bulge.abs());
        let start_angle = (start.y - center.y).atan2(start.x - center.x);

        let sweep = 4.0 * bulge.atan();
        let sweep = if sweep > 2.0 * PI {
            sweep - 2.0 * PI
        } else if sweep < -2.0 * PI {
            sweep + 2.0 * PI
        } else {
            sweep
        };

        Some(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Evaluates the arc at parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point2 {
        let angle = self.start_angle + self.sweep * t;
        Point2::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
        )
    }
}
