//! GJK distance queries between posed convex shapes.
//!
//! Works on the Minkowski difference of the two shapes through their
//! support functions, maintaining a simplex of at most three points. The
//! reported separation is a certified lower bound (a supporting-plane
//! distance), which is what the conservative-advancement solver needs: it
//! may under-report the gap slightly near convergence but never
//! over-reports it.

use nalgebra::{Vector2, Vector3};

use super::shape::ConvexShape;

const TOLERANCE: f64 = 1e-6;
const MAX_ITERATIONS: usize = 64;
const DEGENERATE_AREA: f64 = 1e-18;

#[inline]
fn cross2(a: &Vector2<f64>, b: &Vector2<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Closest point to the origin on segment `ab`, with flags for which
/// endpoints support it.
fn segment_closest(a: Vector2<f64>, b: Vector2<f64>) -> (Vector2<f64>, bool, bool) {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 < 1e-24 {
        return (a, true, false);
    }
    let t = (-a).dot(&ab) / len2;
    if t <= 0.0 {
        (a, true, false)
    } else if t >= 1.0 {
        (b, false, true)
    } else {
        (a + ab * t, true, true)
    }
}

/// Reduce the simplex to the feature closest to the origin.
///
/// Returns the closest point, or `None` when the simplex contains the
/// origin (the shapes intersect).
fn reduce_simplex(simplex: &mut Vec<Vector2<f64>>) -> Option<Vector2<f64>> {
    match simplex.len() {
        1 => Some(simplex[0]),
        2 => {
            let (closest, keep_a, keep_b) = segment_closest(simplex[0], simplex[1]);
            match (keep_a, keep_b) {
                (true, false) => simplex.truncate(1),
                (false, true) => {
                    simplex.swap_remove(0);
                }
                _ => {}
            }
            Some(closest)
        }
        _ => {
            let (a, b, c) = (simplex[0], simplex[1], simplex[2]);
            let area = cross2(&(b - a), &(c - a));
            if area.abs() > DEGENERATE_AREA {
                let orient = area.signum();
                let d1 = cross2(&(b - a), &-a) * orient;
                let d2 = cross2(&(c - b), &-b) * orient;
                let d3 = cross2(&(a - c), &-c) * orient;
                if d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0 {
                    return None;
                }
            }

            // Outside (or degenerate): keep the best of the three edges.
            let edges = [(a, b), (b, c), (c, a)];
            let mut best = segment_closest(edges[0].0, edges[0].1);
            let mut best_edge = 0;
            for (i, (p, q)) in edges.iter().enumerate().skip(1) {
                let candidate = segment_closest(*p, *q);
                if candidate.0.norm_squared() < best.0.norm_squared() {
                    best = candidate;
                    best_edge = i;
                }
            }
            let (p, q) = edges[best_edge];
            simplex.clear();
            if best.1 {
                simplex.push(p);
            }
            if best.2 {
                simplex.push(q);
            }
            Some(best.0)
        }
    }
}

/// Separation distance between two posed convex shapes.
///
/// Returns `0.0` when the shapes touch or overlap; otherwise a certified
/// lower bound of the gap between them.
pub fn distance(
    shape_a: &ConvexShape,
    pose_a: &Vector3<f64>,
    shape_b: &ConvexShape,
    pose_b: &Vector3<f64>,
) -> f64 {
    // Circle pairs have a closed form; they are also the slowest case for
    // the simplex iteration, so short-circuit them.
    if let (ConvexShape::Circle { radius: r_a }, ConvexShape::Circle { radius: r_b }) =
        (shape_a, shape_b)
    {
        let gap = (Vector2::new(pose_b.x, pose_b.y) - Vector2::new(pose_a.x, pose_a.y)).norm()
            - r_a
            - r_b;
        return gap.max(0.0);
    }

    let support = |dir: &Vector2<f64>| -> Vector2<f64> {
        shape_a.support(dir, pose_a) - shape_b.support(&-dir, pose_b)
    };

    let mut dir = Vector2::new(pose_b.x - pose_a.x, pose_b.y - pose_a.y);
    if dir.norm_squared() < 1e-12 {
        dir = Vector2::x();
    }

    let mut simplex = vec![support(&dir)];
    let mut best_lower: f64 = 0.0;

    for _ in 0..MAX_ITERATIONS {
        let v = match reduce_simplex(&mut simplex) {
            Some(v) => v,
            None => return 0.0,
        };
        let v_norm = v.norm();
        if v_norm < TOLERANCE {
            return 0.0;
        }

        let w = support(&-v);
        let lower = v.dot(&w) / v_norm;
        if lower > best_lower {
            best_lower = lower;
        }
        if v_norm - lower < TOLERANCE {
            return best_lower.max(0.0);
        }
        if simplex.iter().any(|p| (p - w).norm_squared() < 1e-24) {
            // No progress possible; v is already supported.
            return best_lower.max(0.0);
        }
        simplex.push(w);
    }

    best_lower.max(0.0)
}

/// Whether two posed convex shapes touch or overlap.
#[inline]
pub fn intersect(
    shape_a: &ConvexShape,
    pose_a: &Vector3<f64>,
    shape_b: &ConvexShape,
    pose_b: &Vector3<f64>,
) -> bool {
    distance(shape_a, pose_a, shape_b, pose_b) <= TOLERANCE
}
