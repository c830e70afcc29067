use tracing::trace;

use crate::geometry::Contour;

use super::{RegionKernel, RegionRelation};

/// Subtracts every region in `subtractors` from every region in `minuends`.
///
/// Each minuend fragment walks the subtractor list in order. Subtractors
/// that do not overlap the fragment are skipped; a fragment lying wholly
/// inside a subtractor is consumed. When a subtraction splits the fragment,
/// every extra piece continues with the subtractors not yet applied. An
/// empty kernel result keeps the fragment unchanged, so a failed boolean
/// never erases area silently.
pub fn difference<K: RegionKernel>(kernel: &K, minuends: &[Contour], subtractors: &[Contour]) -> Vec<Contour> {
    let mut out = Vec::new();
    let mut work: Vec<(Contour, usize)> = minuends.iter().rev().map(|m| (m.clone(), 0)).collect();

    'fragments: while let Some((mut fragment, start)) = work.pop() {
        for (i, subtractor) in subtractors.iter().enumerate().skip(start) {
            match kernel.relationship(&fragment, subtractor) {
                RegionRelation::Disjoint | RegionRelation::BInsideA => {}
                RegionRelation::AInsideB => {
                    trace!(subtractor = i, "fragment consumed");
                    continue 'fragments;
                }
                RegionRelation::MutualIntersection => {
                    let mut pieces = kernel.difference_one(&fragment, subtractor).into_iter();
                    let Some(first) = pieces.next() else {
                        trace!(subtractor = i, "empty difference, keeping fragment");
                        continue;
                    };
                    for piece in pieces {
                        work.push((piece, i + 1));
                    }
                    fragment = first;
                }
            }
        }
        out.push(fragment);
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::operations::boolean::OverlayKernel;
    use approx::assert_relative_eq;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Contour {
        Contour::new(&[
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ])
        .unwrap()
    }

    fn total_area(regions: &[Contour]) -> f64 {
        regions.iter().map(Contour::area).sum()
    }

    #[test]
    fn no_subtractors_returns_minuends() {
        let k = OverlayKernel::default();
        let out = difference(&k, &[rect(0.0, 0.0, 1.0, 1.0)], &[]);
        assert_eq!(out, vec![rect(0.0, 0.0, 1.0, 1.0)]);
    }

    #[test]
    fn overlapping_subtractor_is_removed() {
        let k = OverlayKernel::default();
        let out = difference(&k, &[rect(0.0, 0.0, 4.0, 4.0)], &[rect(2.0, 2.0, 6.0, 6.0)]);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(total_area(&out), 12.0, epsilon = 1e-6);
    }

    #[test]
    fn nested_subtractor_is_ignored() {
        // A hole cannot be represented, so a strictly interior subtractor is skipped.
        let k = OverlayKernel::default();
        let out = difference(&k, &[rect(0.0, 0.0, 10.0, 10.0)], &[rect(4.0, 4.0, 6.0, 6.0)]);
        assert_eq!(out.len(), 1);
        assert_relative_eq!(total_area(&out), 100.0, epsilon = 1e-6);
    }

    #[test]
    fn covered_fragment_is_consumed() {
        let k = OverlayKernel::default();
        let out = difference(&k, &[rect(1.0, 1.0, 2.0, 2.0)], &[rect(0.0, 0.0, 5.0, 5.0)]);
        assert!(out.is_empty());
    }

    #[test]
    fn split_pieces_see_later_subtractors() {
        let k = OverlayKernel::default();
        // The first cut splits the strip in two, the second trims the right piece.
        let out = difference(
            &k,
            &[rect(0.0, 0.0, 10.0, 1.0)],
            &[rect(4.0, -1.0, 5.0, 2.0), rect(8.0, -1.0, 12.0, 2.0)],
        );
        assert_eq!(out.len(), 2);
        assert_relative_eq!(total_area(&out), 7.0, epsilon = 1e-6);
    }

    #[test]
    fn disjoint_subtractors_leave_minuend_alone() {
        let k = OverlayKernel::default();
        let out = difference(&k, &[rect(0.0, 0.0, 1.0, 1.0)], &[rect(3.0, 3.0, 4.0, 4.0)]);
        assert_relative_eq!(total_area(&out), 1.0, epsilon = 1e-6);
    }
}
