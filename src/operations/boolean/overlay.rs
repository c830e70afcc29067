use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;
use tracing::{debug, trace};

use crate::geometry::Contour;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{Point2, DEFAULT_TOLERANCE};

use super::RegionKernel;

type Path = Vec<[f64; 2]>;

/// [`RegionKernel`] backed by the `i_overlay` sweep-line overlay.
///
/// Inputs are normalised to counter-clockwise rings, stitched against each
/// other (see [`stitch`]) and combined with the non-zero fill rule. Output contours thinner than the tolerance are
/// dropped; holes are not part of the result model and are dropped too.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayKernel {
    tolerance: f64,
}

impl Default for OverlayKernel {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl OverlayKernel {
    /// Creates a kernel working at `tolerance`.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    fn run(&self, subject: &[Path], clip: &[Path], rule: OverlayRule) -> Vec<Vec<Path>> {
        let all: Vec<Path> = subject.iter().chain(clip).cloned().collect();
        let mut subject = stitch(&all, self.tolerance);
        let clip = subject.split_off(all.len() - clip.len());
        subject.overlay(&clip, rule, FillRule::NonZero)
    }

    /// Turns overlay shapes into contours, keeping outer boundaries only.
    fn collect(&self, shapes: Vec<Vec<Path>>) -> Vec<Contour> {
        let mut out = Vec::with_capacity(shapes.len());
        for shape in shapes {
            let mut contours = shape.into_iter();
            let Some(outer) = contours.next() else {
                continue;
            };
            let holes = contours.count();
            if holes > 0 {
                debug!(holes, "dropping holes from overlay result");
            }
            let points: Vec<Point2> = outer.iter().map(|&[x, y]| Point2::new(x, y)).collect();
            match Contour::from_ring(&points) {
                Some(contour) if !contour.is_degenerate(self.tolerance) => out.push(contour.to_ccw()),
                _ => debug!("dropping degenerate overlay contour"),
            }
        }
        out
    }
}

fn to_path(contour: &Contour) -> Path {
    contour
        .to_ccw()
        .points()
        .iter()
        .map(|p| [p.x, p.y])
        .collect()
}

/// Makes boundaries that meet within `tolerance` share exact vertices.
///
/// Pieces cut by separate booleans often share part of an edge whose
/// endpoints came out of different line intersections, so the shared stretch
/// is collinear only up to rounding and the overlay sees a sliver between
/// them. Each vertex is first snapped onto a nearby vertex of an earlier
/// path; then every vertex of another path lying on an edge is inserted into
/// that edge, so coincident stretches become identical segments.
fn stitch(paths: &[Path], tolerance: f64) -> Vec<Path> {
    let mut snapped: Vec<Path> = Vec::with_capacity(paths.len());
    for path in paths {
        let ring = path
            .iter()
            .map(|&v| {
                snapped
                    .iter()
                    .flatten()
                    .find(|w| distance(v, **w) <= tolerance)
                    .copied()
                    .unwrap_or(v)
            })
            .collect();
        snapped.push(ring);
    }

    let mut inserted = 0usize;
    let stitched = snapped
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let mut ring = Vec::with_capacity(path.len());
            for (k, &a) in path.iter().enumerate() {
                let b = path[(k + 1) % path.len()];
                ring.push(a);
                let mut on_edge: Vec<(f64, [f64; 2])> = snapped
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .flat_map(|(_, other)| other.iter().copied())
                    .filter_map(|q| junction(a, b, q, tolerance))
                    .collect();
                on_edge.sort_by(|x, y| x.0.total_cmp(&y.0));
                on_edge.dedup_by(|x, y| distance(x.1, y.1) <= tolerance);
                inserted += on_edge.len();
                ring.extend(on_edge.into_iter().map(|(_, q)| q));
            }
            ring
        })
        .collect();
    if inserted > 0 {
        trace!(inserted, "stitched shared edges");
    }
    stitched
}

/// Parameter of `q` along `a → b` when it lies on the edge away from both ends.
fn junction(a: [f64; 2], b: [f64; 2], q: [f64; 2], tolerance: f64) -> Option<(f64, [f64; 2])> {
    if distance(q, a) <= tolerance || distance(q, b) <= tolerance {
        return None;
    }
    let (pa, pb, pq) = (point(a), point(b), point(q));
    if point_to_segment_dist(&pq, &pa, &pb) > tolerance {
        return None;
    }
    let d = pb - pa;
    Some(((pq - pa).dot(&d) / d.norm_squared(), q))
}

fn point([x, y]: [f64; 2]) -> Point2 {
    Point2::new(x, y)
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (point(a) - point(b)).norm()
}

impl RegionKernel for OverlayKernel {
    fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn with_tolerance(&self, tolerance: f64) -> Self {
        Self::new(tolerance)
    }

    fn union(&self, regions: &[Contour]) -> Vec<Contour> {
        let paths: Vec<Path> = regions.iter().map(to_path).collect();
        let shapes = match paths.split_first() {
            None => return Vec::new(),
            Some((first, [])) => vec![vec![first.clone()]],
            Some((first, rest)) => self.run(std::slice::from_ref(first), rest, OverlayRule::Union),
        };
        if shapes.is_empty() {
            debug!(regions = regions.len(), "union collapsed to nothing");
        }
        self.collect(shapes)
    }

    fn intersection(&self, a: &Contour, b: &Contour) -> Vec<Contour> {
        let shapes = self.run(&[to_path(a)], &[to_path(b)], OverlayRule::Intersect);
        self.collect(shapes)
    }

    fn difference_one(&self, a: &Contour, b: &Contour) -> Vec<Contour> {
        let shapes = self.run(&[to_path(a)], &[to_path(b)], OverlayRule::Difference);
        self.collect(shapes)
    }
}
