//! Pure Geometric Algorithms
//!
//! The narrow phase is built out of the free functions in this module:
//!
//! - [`separating_axis_mtv`] — 3D Separating Axis Theorem over two convex
//!   vertex sets, returning the minimum translation vector on overlap
//! - [`line_plane_intersection`] — line/plane intersection point
//! - [`sutherland_hodgman`] — polygon clipping against half-space planes
//! - [`discard_clip`] — point-set clipping with penetration depth tagging
//! - [`most_perpendicular_face`] — reference/incident face selection on a
//!   box via a constant vertex/face adjacency table
//!
//! None of these functions fail: absence of overlap is an expected negative
//! result, reported as `None` or an empty output set.

use crate::math::{Vec3, EPSILON};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// ============================================================================
// Separating Axis Theorem
// ============================================================================

/// Project a vertex set onto an axis, returning the covered interval.
fn project(vertices: &[Vec3], axis: Vec3) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in vertices {
        let d = v.dot(axis);
        if d < min {
            min = d;
        }
        if d > max {
            max = d;
        }
    }
    (min, max)
}

/// Separating Axis Theorem over two convex vertex sets.
///
/// Candidate axes are A's face normals, B's face normals, and all pairwise
/// cross products (near-zero crosses from parallel normals are skipped).
/// Axes are iterated in that fixed order so results are deterministic.
///
/// Returns `None` as soon as any axis separates the projections — the common
/// case. Otherwise returns the minimum translation vector: the minimum-
/// overlap axis scaled to the penetration depth and oriented from A to B.
pub fn separating_axis_mtv(
    vertices_a: &[Vec3],
    normals_a: &[Vec3],
    vertices_b: &[Vec3],
    normals_b: &[Vec3],
) -> Option<Vec3> {
    let mut best_overlap = f64::INFINITY;
    let mut best_axis = Vec3::ZERO;

    let mut test_axis = |axis: Vec3| -> bool {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            // Parallel normal pair; not a usable axis
            return true;
        }
        let (min_a, max_a) = project(vertices_a, axis);
        let (min_b, max_b) = project(vertices_b, axis);
        let overlap = max_a.min(max_b) - min_a.max(min_b);
        if overlap < 0.0 {
            return false;
        }
        if overlap < best_overlap {
            best_overlap = overlap;
            // Orient from A to B along the axis
            best_axis = if (min_b + max_b) < (min_a + max_a) {
                -axis
            } else {
                axis
            };
        }
        true
    };

    for &n in normals_a {
        if !test_axis(n) {
            return None;
        }
    }
    for &n in normals_b {
        if !test_axis(n) {
            return None;
        }
    }
    for &na in normals_a {
        for &nb in normals_b {
            let cross = na.cross(nb);
            if cross.length_squared() < EPSILON {
                continue;
            }
            if !test_axis(cross) {
                return None;
            }
        }
    }

    Some(best_axis * best_overlap)
}

// ============================================================================
// Line / plane intersection
// ============================================================================

/// Intersection of the line through `p1` and `p2` with the plane given by a
/// support point and normal.
///
/// Caller precondition: the line direction must not be parallel to the
/// plane. The callers in the narrow phase only invoke this for edges that
/// provably cross the clipping plane.
pub fn line_plane_intersection(support: Vec3, normal: Vec3, p1: Vec3, p2: Vec3) -> Vec3 {
    let direction = p2 - p1;
    let denom = normal.dot(direction);
    debug_assert!(
        crate::math::abs(denom) > EPSILON,
        "line must not be parallel to the plane"
    );
    let t = normal.dot(support - p1) / denom;
    p1 + direction * t
}

// ============================================================================
// Sutherland-Hodgman clipping
// ============================================================================

/// A clipping half-space: points with `normal . (p - support) >= 0` are kept.
#[derive(Clone, Copy, Debug)]
pub struct ClipPlane {
    /// A point on the plane
    pub support: Vec3,
    /// Plane normal, pointing into the kept half-space
    pub normal: Vec3,
}

/// Clip an ordered point loop against a list of half-space planes,
/// replacing cut edges with their plane intersection points.
pub fn sutherland_hodgman(polygon: &[Vec3], planes: &[ClipPlane]) -> Vec<Vec3> {
    let mut output: Vec<Vec3> = polygon.to_vec();

    for plane in planes {
        if output.is_empty() {
            break;
        }
        let input = output;
        output = Vec::with_capacity(input.len() + 1);

        for i in 0..input.len() {
            let current = input[i];
            let next = input[(i + 1) % input.len()];
            let current_inside = plane.normal.dot(current - plane.support) >= 0.0;
            let next_inside = plane.normal.dot(next - plane.support) >= 0.0;

            if current_inside {
                output.push(current);
            }
            if current_inside != next_inside {
                output.push(line_plane_intersection(
                    plane.support,
                    plane.normal,
                    current,
                    next,
                ));
            }
        }
    }

    output
}

// ============================================================================
// Discard clipping
// ============================================================================

/// Clip a point set against one half-space by dropping points on the
/// positive side of the plane.
///
/// Survivors are paired with their non-negative penetration depth against
/// the plane (how far behind the plane they sit).
pub fn discard_clip(points: &[Vec3], support: Vec3, normal: Vec3) -> Vec<(Vec3, f64)> {
    points
        .iter()
        .filter_map(|&p| {
            let distance = normal.dot(p - support);
            if distance <= 0.0 {
                Some((p, -distance))
            } else {
                None
            }
        })
        .collect()
}

// ============================================================================
// Most-perpendicular box face
// ============================================================================

/// Box faces as vertex-index quads with their outward normal, encoded as
/// `(axis, sign)` into a box's three cached face normals. Quads are ordered
/// loops (consecutive entries share an edge).
const BOX_FACES: [([usize; 4], usize, f64); 6] = [
    ([1, 2, 6, 5], 0, 1.0),  // +x
    ([0, 3, 7, 4], 0, -1.0), // -x
    ([2, 3, 7, 6], 1, 1.0),  // +y
    ([0, 1, 5, 4], 1, -1.0), // -y
    ([4, 5, 6, 7], 2, 1.0),  // +z
    ([0, 1, 2, 3], 2, -1.0), // -z
];

/// The three faces (indices into `BOX_FACES`) adjacent to each vertex,
/// in the fixed box vertex ordering.
const VERTEX_FACES: [[usize; 3]; 8] = [
    [1, 3, 5],
    [0, 3, 5],
    [0, 2, 5],
    [1, 2, 5],
    [1, 3, 4],
    [0, 3, 4],
    [0, 2, 4],
    [1, 2, 4],
];

/// Find the box face most perpendicular to a direction.
///
/// Picks the vertex farthest along `direction`, then among its three
/// adjacent faces returns the one whose outward normal is most aligned with
/// `direction`, along with that normal. Exploits the fixed box topology via
/// the constant adjacency table instead of building a full face list.
pub fn most_perpendicular_face(
    direction: Vec3,
    vertices: &[Vec3; 8],
    face_normals: &[Vec3; 3],
) -> ([Vec3; 4], Vec3) {
    let mut farthest = 0;
    let mut farthest_dot = f64::NEG_INFINITY;
    for (i, v) in vertices.iter().enumerate() {
        let d = v.dot(direction);
        if d > farthest_dot {
            farthest_dot = d;
            farthest = i;
        }
    }

    let mut best_quad = &BOX_FACES[0].0;
    let mut best_normal = Vec3::ZERO;
    let mut best_alignment = f64::NEG_INFINITY;
    for &face_index in &VERTEX_FACES[farthest] {
        let (ref quad, axis, sign) = BOX_FACES[face_index];
        let normal = face_normals[axis] * sign;
        let alignment = normal.dot(direction);
        if alignment > best_alignment {
            best_alignment = alignment;
            best_quad = quad;
            best_normal = normal;
        }
    }

    (
        [
            vertices[best_quad[0]],
            vertices[best_quad[1]],
            vertices[best_quad[2]],
            vertices[best_quad[3]],
        ],
        best_normal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::OrientedBox;
    use crate::math::Quat;

    fn unit_box_at(center: Vec3) -> OrientedBox {
        let mut b = OrientedBox::new(Vec3::new(0.5, 0.5, 0.5));
        b.update_world_data(center, Quat::IDENTITY, Vec3::ZERO);
        b
    }

    #[test]
    fn test_sat_known_overlap() {
        // Unit boxes centered at x=0 and x=0.75 overlap by 0.25 along x
        let a = unit_box_at(Vec3::ZERO);
        let b = unit_box_at(Vec3::new(0.75, 0.0, 0.0));
        let mtv = separating_axis_mtv(&a.vertices, &a.face_normals, &b.vertices, &b.face_normals)
            .expect("boxes overlap");
        assert!((mtv.length() - 0.25).abs() < 1e-12, "mtv = {mtv:?}");
        assert!(mtv.x > 0.0, "mtv must point from A to B");
        assert!(mtv.y.abs() < 1e-12 && mtv.z.abs() < 1e-12);
    }

    #[test]
    fn test_sat_gap_is_no_collision() {
        // One box spans x in [0, 1], the other x in [2, 3]
        let a = unit_box_at(Vec3::new(0.5, 0.0, 0.0));
        let b = unit_box_at(Vec3::new(2.5, 0.0, 0.0));
        let mtv = separating_axis_mtv(&a.vertices, &a.face_normals, &b.vertices, &b.face_normals);
        assert!(mtv.is_none(), "separated boxes must not report a collision");
    }

    #[test]
    fn test_sat_orientation_flips_with_order() {
        let a = unit_box_at(Vec3::ZERO);
        let b = unit_box_at(Vec3::new(0.6, 0.0, 0.0));
        let ab = separating_axis_mtv(&a.vertices, &a.face_normals, &b.vertices, &b.face_normals)
            .unwrap();
        let ba = separating_axis_mtv(&b.vertices, &b.face_normals, &a.vertices, &a.face_normals)
            .unwrap();
        assert!((ab + ba).length() < 1e-12, "MTV must always point A to B");
    }

    #[test]
    fn test_line_plane_intersection() {
        let p = line_plane_intersection(
            Vec3::ZERO,
            Vec3::UNIT_Y,
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
        );
        assert!((p - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_sutherland_hodgman_square() {
        // Clip a 2x2 square against x <= 0.5 (keep half-space normal -x)
        let square = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(-1.0, 1.0, 0.0),
        ];
        let planes = [ClipPlane {
            support: Vec3::new(0.5, 0.0, 0.0),
            normal: -Vec3::UNIT_X,
        }];
        let clipped = sutherland_hodgman(&square, &planes);
        assert_eq!(clipped.len(), 4);
        for v in &clipped {
            assert!(v.x <= 0.5 + 1e-12, "clipped vertex {v:?} outside half-space");
        }
        assert!(
            clipped.iter().any(|v| (v.x - 0.5).abs() < 1e-12),
            "cut edges must be replaced by intersection points"
        );
    }

    #[test]
    fn test_sutherland_hodgman_all_outside() {
        let triangle = [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(2.5, 1.0, 0.0),
        ];
        let planes = [ClipPlane {
            support: Vec3::ZERO,
            normal: -Vec3::UNIT_X,
        }];
        assert!(sutherland_hodgman(&triangle, &planes).is_empty());
    }

    #[test]
    fn test_discard_clip_depths() {
        let points = [
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 0.0, 0.0),
        ];
        let kept = discard_clip(&points, Vec3::ZERO, Vec3::UNIT_Y);
        assert_eq!(kept.len(), 2);
        assert!((kept[0].1 - 0.5).abs() < 1e-12, "depth must be positive");
        assert_eq!(kept[1].1, 0.0, "on-plane point survives with zero depth");
    }

    #[test]
    fn test_most_perpendicular_face_axis_aligned() {
        let b = unit_box_at(Vec3::ZERO);
        let (quad, normal) = most_perpendicular_face(Vec3::UNIT_Y, &b.vertices, &b.face_normals);
        assert!((normal - Vec3::UNIT_Y).length() < 1e-12);
        for v in &quad {
            assert!((v.y - 0.5).abs() < 1e-12, "face vertex {v:?} not on +y face");
        }
    }

    #[test]
    fn test_most_perpendicular_face_diagonal() {
        let b = unit_box_at(Vec3::ZERO);
        // Direction mostly -z, slightly +x: -z face wins
        let dir = Vec3::new(0.2, 0.0, -1.0).normalize();
        let (_, normal) = most_perpendicular_face(dir, &b.vertices, &b.face_normals);
        assert!((normal - -Vec3::UNIT_Z).length() < 1e-12);
    }
}
