use tracing::{debug, trace};

use crate::geometry::Contour;
use crate::math::Point2;
use crate::operations::boolean::{difference, RegionKernel};

use super::primitives::{capped_triangle, cone, genuine_crossings, midpoint, wedge_behind};

/// Combined shadow cast by `voids`, seen from `observer`.
///
/// Every void edge casts a cone out to `reach`; cones through edges aligned
/// with the line of sight are dropped. Cones are merged per void, then
/// across voids. If the final union fails the raw cones are returned.
pub fn shadow<K: RegionKernel>(kernel: &K, voids: &[Contour], observer: &Point2, reach: f64) -> Vec<Contour> {
    let tol = kernel.tolerance();
    let mut cones = Vec::new();
    let mut per_void = Vec::new();
    for (v, void) in voids.iter().enumerate() {
        let own: Vec<Contour> = void
            .edges()
            .filter_map(|(a, b)| cone(observer, &a, &b, reach, tol))
            .collect();
        trace!(void = v, cones = own.len(), "shadow cones built");
        let merged = kernel.union(&own);
        if merged.is_empty() {
            per_void.extend(own.iter().cloned());
        } else {
            per_void.extend(merged);
        }
        cones.extend(own);
    }

    let merged = kernel.union(&per_void);
    if merged.is_empty() {
        debug!(cones = cones.len(), "shadow union empty, using raw cones");
        return cones;
    }
    merged
}

/// Ground hidden by a single void: the void itself and, for every edge,
/// the part of that edge's cone lying behind it.
fn hidden_by<K: RegionKernel>(kernel: &K, void: &Contour, observer: &Point2, reach: f64) -> Vec<Contour> {
    let tol = kernel.tolerance();
    let mut pieces = vec![void.clone()];
    pieces.extend(void.edges().filter_map(|(a, b)| wedge_behind(observer, &a, &b, reach, tol)));
    let merged = kernel.union(&pieces);
    if merged.is_empty() {
        return pieces;
    }
    merged
}

/// Triangles between the observer and each void edge that directly faces
/// it: the visible ground in front of a void that the shadow cones cover.
///
/// A triangle is trimmed by whatever the other voids hide, so ground behind
/// a nearer void is not brought back by a farther one.
pub fn reveal<K: RegionKernel>(kernel: &K, voids: &[Contour], observer: &Point2, reach: f64) -> Vec<Contour> {
    let tol = kernel.tolerance();
    let hidden: Vec<Vec<Contour>> = if voids.len() > 1 {
        voids.iter().map(|void| hidden_by(kernel, void, observer, reach)).collect()
    } else {
        Vec::new()
    };

    let mut triangles = Vec::new();
    for (v, void) in voids.iter().enumerate() {
        let facing: Vec<Contour> = void
            .edges()
            .filter(|(a, b)| genuine_crossings(kernel, observer, &midpoint(a, b), void) == 1)
            .filter_map(|(a, b)| capped_triangle(observer, &a, &b, tol))
            .collect();
        let others: Vec<Contour> = hidden
            .iter()
            .enumerate()
            .filter(|&(w, _)| w != v)
            .flat_map(|(_, h)| h.iter().cloned())
            .collect();
        if others.is_empty() {
            triangles.extend(facing);
            continue;
        }
        let trimmed = difference(kernel, &facing, &others);
        trace!(void = v, facing = facing.len(), kept = trimmed.len(), "reveal trimmed by other voids");
        triangles.extend(trimmed);
    }
    triangles
}

/// The part of `master` not hidden by any void.
pub fn void_visible<K: RegionKernel>(
    kernel: &K,
    master: &Contour,
    voids: &[Contour],
    observer: &Point2,
    reach: f64,
) -> Vec<Contour> {
    let shadow = shadow(kernel, voids, observer, reach);
    let beyond = difference(kernel, std::slice::from_ref(master), &shadow);
    let front = reveal(kernel, voids, observer, reach);
    debug!(
        shadow = shadow.len(),
        beyond = beyond.len(),
        reveal = front.len(),
        "void occlusion resolved"
    );

    let mut pieces = front;
    pieces.extend(beyond);
    let merged = kernel.union(&pieces);
    if merged.is_empty() {
        debug!("void-visible union empty, keeping pieces");
        return pieces;
    }
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::boolean::OverlayKernel;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        Contour::new(&[p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]).unwrap()
    }

    fn reach() -> f64 {
        1.1 * rect(0.0, 0.0, 10.0, 10.0).bounding_diagonal()
    }

    #[test]
    fn shadow_of_square_void_is_one_sector() {
        let k = OverlayKernel::default();
        let s = shadow(&k, &[rect(4.0, 4.0, 6.0, 6.0)], &p(1.0, 1.0), reach());
        assert_eq!(s.len(), 1);
        assert!(s[0].contains(&p(8.0, 8.0), 1e-6));
        assert!(!s[0].contains(&p(8.0, 2.0), 1e-6));
    }

    #[test]
    fn reveal_covers_only_facing_edges() {
        let k = OverlayKernel::default();
        let r = reveal(&k, &[rect(4.0, 4.0, 6.0, 6.0)], &p(1.0, 1.0), reach());
        // Bottom and left edges face the observer.
        assert_eq!(r.len(), 2);
        let area: f64 = r.iter().map(Contour::area).sum();
        assert_relative_eq!(area, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn void_visible_cuts_the_shadow_out_of_the_master() {
        let k = OverlayKernel::default();
        let master = rect(0.0, 0.0, 10.0, 10.0);
        let visible = void_visible(&k, &master, &[rect(4.0, 4.0, 6.0, 6.0)], &p(1.0, 1.0), reach());
        assert_eq!(visible.len(), 1);
        assert_relative_eq!(visible[0].area(), 73.6, epsilon = 1e-4);
        assert!(visible[0].contains(&p(3.0, 3.0), 1e-6));
        assert!(!visible[0].contains(&p(5.0, 5.0), 1e-6));
        assert!(!visible[0].contains(&p(8.0, 8.0), 1e-6));
    }

    #[test]
    fn aligned_void_edge_casts_no_cone() {
        let k = OverlayKernel::default();
        // The bottom edge of the void lies on the observer's sight line.
        let s = shadow(&k, &[rect(4.0, 4.0, 6.0, 6.0)], &p(1.0, 4.0), reach());
        assert!(!s.is_empty());
        for c in &s {
            assert!(c.points().iter().all(|q| q.x.is_finite() && q.y.is_finite()));
            assert!(!c.is_degenerate(1e-6));
        }
    }

    #[test]
    fn farther_void_does_not_reveal_ground_behind_a_nearer_one() {
        let k = OverlayKernel::default();
        let master = rect(0.0, 0.0, 20.0, 20.0);
        let reach = 1.1 * master.bounding_diagonal();
        let observer = p(2.0, 10.0);
        let front = rect(5.0, 9.0, 6.0, 11.0);
        let back = rect(10.0, 8.0, 11.0, 12.0);

        let revealed = reveal(&k, &[front.clone(), back.clone()], &observer, reach);
        assert!(revealed.iter().all(|t| !t.contains_strictly(&p(8.0, 10.0), 1e-6)));
        assert!(revealed.iter().all(|t| !t.contains_strictly(&p(5.5, 10.0), 1e-6)));

        let area = |voids: &[Contour]| -> f64 {
            void_visible(&k, &master, voids, &observer, reach)
                .iter()
                .map(Contour::area)
                .sum()
        };
        // The front void hides a trapezoid of 105 from x = 5 to the far wall;
        // the back void sits wholly inside it.
        let one = area(std::slice::from_ref(&front));
        let two = area(&[front, back]);
        assert_relative_eq!(one, 295.0, epsilon = 1e-4);
        assert_relative_eq!(two, one, epsilon = 1e-4);
    }
}
