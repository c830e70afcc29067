//! Tolerance-band coarsening of closed rings.
//!
//! Used to knock out near-degenerate vertices (slivers, almost-collinear
//! runs, near-duplicate points) that stop the boolean kernel from producing
//! a result.

use super::distance_2d::point_to_segment_dist;
use super::polygon_2d::dedup_ring;
use super::Point2;

/// Simplifies a closed ring with Ramer-Douglas-Peucker.
///
/// The ring is split at the vertex farthest from the first one and each
/// half is reduced independently, so both anchor vertices survive. If the
/// reduction would leave fewer than 3 vertices the input is returned
/// (deduplicated when that still leaves a triangle).
#[must_use]
pub fn simplify_ring(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    let ring = dedup_ring(points, epsilon);
    let n = ring.len();
    if n < 3 {
        return points.to_vec();
    }
    if n == 3 || epsilon <= 0.0 {
        return ring;
    }

    let anchor = ring[0];
    let split = (1..n)
        .max_by(|&i, &j| {
            let di = (ring[i] - anchor).norm_squared();
            let dj = (ring[j] - anchor).norm_squared();
            di.total_cmp(&dj)
        })
        .unwrap_or(n / 2);

    // Open chain 0..=n where index n wraps back to vertex 0.
    let at = |i: usize| ring[i % n];
    let mut keep = vec![false; n + 1];
    keep[0] = true;
    keep[split] = true;
    keep[n] = true;

    let mut stack = vec![(0, split), (split, n)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }
        let (a, b) = (at(start), at(end));
        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in (start + 1)..end {
            let d = point_to_segment_dist(&at(i), &a, &b);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }
        if max_dist > epsilon {
            keep[max_idx] = true;
            stack.push((start, max_idx));
            stack.push((max_idx, end));
        }
    }

    let simplified: Vec<Point2> = (0..n).filter(|&i| keep[i]).map(|i| ring[i]).collect();
    if simplified.len() < 3 {
        return ring;
    }
    simplified
}
