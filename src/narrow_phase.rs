//! Narrow-Phase Collision Detection
//!
//! Dispatches over the 3x3 ordered combinations of collider variants and
//! produces a [`ContactManifold`] per overlapping pair. Symmetric pairs
//! (sphere/plane vs plane/sphere, ...) are implemented independently rather
//! than derived from each other so the normal convention stays explicit:
//! **the manifold normal always points from body A to body B**, meaning B
//! separates by moving along `+normal` and A by moving along `-normal`.
//!
//! A handler that finds no overlap returns `None` (absent manifold). A
//! manifold with an empty contact list can also occur (box/box clipping can
//! eliminate every candidate point); consumers treat both the same way, by
//! skipping constraint construction.
//!
//! # Known approximation
//!
//! The sphere/plane and plane/box handlers pick the collision side by
//! comparing an unsigned overshoot distance. A shape that has tunnelled
//! through a thin plane in one step is indistinguishable from one
//! approaching normally. This is preserved from the original design; fixing
//! it would require continuous collision detection.

use crate::collider::{Collider, OrientedBox, OrientedPlane, Sphere};
use crate::geometry::{
    discard_clip, most_perpendicular_face, separating_axis_mtv, sutherland_hodgman, ClipPlane,
};
use crate::math::{abs, Vec3};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// ============================================================================
// Contact data
// ============================================================================

/// One contact point of a manifold.
#[derive(Clone, Copy, Debug)]
pub struct ContactPoint {
    /// Contact position on body A's surface, world space
    pub point_on_a: Vec3,
    /// Contact position on body B's surface, world space
    pub point_on_b: Vec3,
    /// `point_on_a` relative to body A's center
    pub offset_a: Vec3,
    /// `point_on_b` relative to body B's center
    pub offset_b: Vec3,
    /// Interpenetration depth, positive when overlapping
    pub depth: f64,
}

/// Contact manifold for one ordered colliding pair (A, B), valid for a
/// single simulation step. Recomputed from scratch every step, never
/// persisted.
#[derive(Clone, Debug)]
pub struct ContactManifold {
    /// Unit normal pointing from A to B
    pub normal: Vec3,
    /// First tangent of the contact plane
    pub tangent1: Vec3,
    /// Second tangent of the contact plane
    pub tangent2: Vec3,
    /// Contact points. Box/box manifolds are reduced to at most four;
    /// plane/box emits one point per penetrating box vertex, so a box
    /// driven fully through a plane can report up to eight.
    pub points: Vec<ContactPoint>,
    center_a: Vec3,
    center_b: Vec3,
}

impl ContactManifold {
    fn new(normal: Vec3, center_a: Vec3, center_b: Vec3) -> Self {
        let (tangent1, tangent2) = tangent_basis(normal);
        Self {
            normal,
            tangent1,
            tangent2,
            points: Vec::new(),
            center_a,
            center_b,
        }
    }

    fn push(&mut self, point_on_a: Vec3, point_on_b: Vec3, depth: f64) {
        self.points.push(ContactPoint {
            point_on_a,
            point_on_b,
            offset_a: point_on_a - self.center_a,
            offset_b: point_on_b - self.center_b,
            depth,
        });
    }

    /// Deepest interpenetration across all contact points (zero when empty)
    pub fn max_depth(&self) -> f64 {
        self.points.iter().fold(0.0, |acc, p| acc.max(p.depth))
    }
}

/// Build a stable orthonormal tangent pair for a unit contact normal.
///
/// The helper axis is chosen by the normal component with the largest
/// magnitude so the cross product never degenerates near axis alignment.
pub fn tangent_basis(normal: Vec3) -> (Vec3, Vec3) {
    let helper = if abs(normal.x) >= abs(normal.y) && abs(normal.x) >= abs(normal.z) {
        Vec3::UNIT_Y
    } else {
        Vec3::UNIT_X
    };
    let tangent1 = normal.cross(helper).normalize();
    let tangent2 = normal.cross(tangent1);
    (tangent1, tangent2)
}

// ============================================================================
// Dispatch
// ============================================================================

/// Detect contact between two colliders.
///
/// `center_a` / `center_b` are the owning bodies' centers, used to express
/// contact offsets. The collider world data must already be consistent with
/// the bodies' poses.
pub fn collide(
    a: &Collider,
    b: &Collider,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    match (a, b) {
        (Collider::Sphere(sa), Collider::Sphere(sb)) => sphere_sphere(sa, sb, center_a, center_b),
        (Collider::Sphere(s), Collider::Plane(p)) => sphere_plane(s, p, center_a, center_b),
        (Collider::Plane(p), Collider::Sphere(s)) => plane_sphere(p, s, center_a, center_b),
        (Collider::Sphere(s), Collider::Box(bx)) => sphere_box(s, bx, center_a, center_b),
        (Collider::Box(bx), Collider::Sphere(s)) => box_sphere(bx, s, center_a, center_b),
        (Collider::Plane(p), Collider::Box(bx)) => plane_box(p, bx, center_a, center_b),
        (Collider::Box(bx), Collider::Plane(p)) => box_plane(bx, p, center_a, center_b),
        (Collider::Box(ba), Collider::Box(bb)) => box_box(ba, bb, center_a, center_b),
        (Collider::Plane(_), Collider::Plane(_)) => None,
    }
}

// ============================================================================
// Sphere / sphere
// ============================================================================

fn sphere_sphere(
    a: &Sphere,
    b: &Sphere,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let delta = b.center - a.center;
    let distance = delta.length();
    let radii = a.radius + b.radius;
    if distance > radii {
        return None;
    }

    // Coincident centers have no defined axis; fall back to Y-up
    let normal = if distance > 0.0 {
        delta / distance
    } else {
        Vec3::UNIT_Y
    };

    let mut manifold = ContactManifold::new(normal, center_a, center_b);
    manifold.push(
        a.center + normal * a.radius,
        b.center - normal * b.radius,
        radii - distance,
    );
    Some(manifold)
}

// ============================================================================
// Sphere / plane (both directions)
// ============================================================================

fn sphere_plane(
    s: &Sphere,
    p: &OrientedPlane,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let distance = p.distance_to_point(s.center);
    if abs(distance) > s.radius {
        return None;
    }
    // Side of lesser overshoot; cannot distinguish a tunnelled sphere
    let side = if distance >= 0.0 { 1.0 } else { -1.0 };

    // A is the sphere: it separates by moving away from the plane, so the
    // A-to-B normal points toward the plane
    let normal = -(p.world_normal * side);
    let mut manifold = ContactManifold::new(normal, center_a, center_b);
    manifold.push(
        s.center + normal * s.radius,
        p.project_point(s.center),
        s.radius - abs(distance),
    );
    Some(manifold)
}

fn plane_sphere(
    p: &OrientedPlane,
    s: &Sphere,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let distance = p.distance_to_point(s.center);
    if abs(distance) > s.radius {
        return None;
    }
    let side = if distance >= 0.0 { 1.0 } else { -1.0 };

    // A is the plane: the sphere (B) separates along +normal
    let normal = p.world_normal * side;
    let mut manifold = ContactManifold::new(normal, center_a, center_b);
    manifold.push(
        p.project_point(s.center),
        s.center - normal * s.radius,
        s.radius - abs(distance),
    );
    Some(manifold)
}

// ============================================================================
// Sphere / box (both directions)
// ============================================================================

/// Closest-point query of a sphere center against a box, in the box's local
/// frame. Returns `(exit_direction, depth, point_on_box)` in world space,
/// or `None` when separated. `exit_direction` is the direction the sphere
/// must move to stop overlapping.
fn sphere_box_query(s: &Sphere, b: &OrientedBox) -> Option<(Vec3, f64, Vec3)> {
    let local = b.rotation.conjugate().rotate_vec(s.center - b.center);
    let clamped = local.clamp(-b.half_extents, b.half_extents);

    if local == clamped {
        // Center inside the box: exit through the nearest face
        let mut axis = 0;
        let mut least = f64::INFINITY;
        let extents = [b.half_extents.x, b.half_extents.y, b.half_extents.z];
        let components = [local.x, local.y, local.z];
        for i in 0..3 {
            let to_face = extents[i] - abs(components[i]);
            if to_face < least {
                least = to_face;
                axis = i;
            }
        }
        let sign = if components[axis] >= 0.0 { 1.0 } else { -1.0 };
        let mut face_local = local;
        match axis {
            0 => face_local.x = sign * b.half_extents.x,
            1 => face_local.y = sign * b.half_extents.y,
            _ => face_local.z = sign * b.half_extents.z,
        }
        let axis_dir = [Vec3::UNIT_X, Vec3::UNIT_Y, Vec3::UNIT_Z][axis];
        let exit = b.rotation.rotate_vec(axis_dir * sign);
        let point_on_box = b.center + b.rotation.rotate_vec(face_local);
        return Some((exit, s.radius + least, point_on_box));
    }

    let closest = b.center + b.rotation.rotate_vec(clamped);
    let delta = s.center - closest;
    let distance = delta.length();
    if distance > s.radius {
        return None;
    }
    Some((delta / distance, s.radius - distance, closest))
}

fn sphere_box(
    s: &Sphere,
    b: &OrientedBox,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let (exit, depth, point_on_box) = sphere_box_query(s, b)?;
    // A is the sphere; it separates along `exit`, so the A-to-B normal is
    // the opposite direction
    let normal = -exit;
    let mut manifold = ContactManifold::new(normal, center_a, center_b);
    manifold.push(s.center + normal * s.radius, point_on_box, depth);
    Some(manifold)
}

fn box_sphere(
    b: &OrientedBox,
    s: &Sphere,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let (exit, depth, point_on_box) = sphere_box_query(s, b)?;
    // A is the box; the sphere (B) separates along +normal
    let normal = exit;
    let mut manifold = ContactManifold::new(normal, center_a, center_b);
    manifold.push(point_on_box, s.center - normal * s.radius, depth);
    Some(manifold)
}

// ============================================================================
// Plane / box (both directions)
// ============================================================================

fn plane_box(
    p: &OrientedPlane,
    b: &OrientedBox,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    // Side of lesser overshoot, judged by the box center
    let side = if p.distance_to_point(b.center) >= 0.0 {
        1.0
    } else {
        -1.0
    };
    let plane_normal = p.world_normal * side;

    let survivors = discard_clip(&b.vertices, p.support, plane_normal);
    if survivors.is_empty() {
        return None;
    }

    // A is the plane: the box (B) separates along +normal
    let mut manifold = ContactManifold::new(plane_normal, center_a, center_b);
    for (vertex, depth) in survivors {
        manifold.push(p.project_point(vertex), vertex, depth);
    }
    Some(manifold)
}

fn box_plane(
    b: &OrientedBox,
    p: &OrientedPlane,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let side = if p.distance_to_point(b.center) >= 0.0 {
        1.0
    } else {
        -1.0
    };
    let plane_normal = p.world_normal * side;

    let survivors = discard_clip(&b.vertices, p.support, plane_normal);
    if survivors.is_empty() {
        return None;
    }

    // A is the box: it separates along the plane normal, so the A-to-B
    // normal points into the plane
    let mut manifold = ContactManifold::new(-plane_normal, center_a, center_b);
    for (vertex, depth) in survivors {
        manifold.push(vertex, p.project_point(vertex), depth);
    }
    Some(manifold)
}

// ============================================================================
// Box / box
// ============================================================================

fn box_box(
    a: &OrientedBox,
    b: &OrientedBox,
    center_a: Vec3,
    center_b: Vec3,
) -> Option<ContactManifold> {
    let mtv = separating_axis_mtv(&a.vertices, &a.face_normals, &b.vertices, &b.face_normals)?;
    let depth_along_axis = mtv.length();
    let axis = if depth_along_axis > 0.0 {
        mtv / depth_along_axis
    } else {
        // Touching exactly; any face normal works, use A's first
        a.face_normals[0]
    };

    // Candidate faces: on A the face pointing toward B, on B the face
    // pointing back toward A
    let (face_a, normal_a) = most_perpendicular_face(axis, &a.vertices, &a.face_normals);
    let (face_b, normal_b) = most_perpendicular_face(-axis, &b.vertices, &b.face_normals);

    // The face better aligned with the MTV axis is the reference face, the
    // other is the incident face
    let a_is_reference = normal_a.dot(axis) >= normal_b.dot(-axis);
    let (reference, reference_normal, incident) = if a_is_reference {
        (face_a, normal_a, face_b)
    } else {
        (face_b, normal_b, face_a)
    };

    // Clip the incident face against the four side planes of the reference
    // face (normals pointing inward, toward the face centroid)
    let centroid = (reference[0] + reference[1] + reference[2] + reference[3]) * 0.25;
    let mut side_planes = [ClipPlane {
        support: Vec3::ZERO,
        normal: Vec3::ZERO,
    }; 4];
    for i in 0..4 {
        let edge_start = reference[i];
        let edge = reference[(i + 1) % 4] - edge_start;
        let mut inward = edge.cross(reference_normal);
        if inward.dot(centroid - edge_start) < 0.0 {
            inward = -inward;
        }
        side_planes[i] = ClipPlane {
            support: edge_start,
            normal: inward,
        };
    }
    let clipped = sutherland_hodgman(&incident, &side_planes);

    // Keep only points behind the reference face plane, tagged with depth.
    // Clipping a quad against four planes can emit up to eight vertices, so
    // the survivors are reduced back to a stable four-point manifold.
    let survivors = reduce_contacts(discard_clip(&clipped, reference[0], reference_normal));

    let mut manifold = ContactManifold::new(axis, center_a, center_b);
    for (point, depth) in survivors {
        // Clipped points lie on the incident face; project back through the
        // reference plane for the other body's contact position
        let on_reference = point + reference_normal * depth;
        if a_is_reference {
            manifold.push(on_reference, point, depth);
        } else {
            manifold.push(point, on_reference, depth);
        }
    }
    Some(manifold)
}

/// Reduce a clipped point set to at most four contacts: the deepest point
/// is always kept, the rest are picked greedily to maximize the minimum
/// pairwise distance, so the reduced manifold still spans the contact area
/// instead of clustering on one edge.
fn reduce_contacts(mut points: Vec<(Vec3, f64)>) -> Vec<(Vec3, f64)> {
    if points.len() <= 4 {
        return points;
    }

    let mut selected = Vec::with_capacity(4);
    let mut deepest = 0;
    for (i, candidate) in points.iter().enumerate() {
        if candidate.1 > points[deepest].1 {
            deepest = i;
        }
    }
    selected.push(points.swap_remove(deepest));

    while selected.len() < 4 {
        let mut best = 0;
        let mut best_spread = f64::NEG_INFINITY;
        for (i, &(p, _)) in points.iter().enumerate() {
            let nearest = selected
                .iter()
                .map(|&(q, _)| (p - q).length_squared())
                .fold(f64::INFINITY, f64::min);
            if nearest > best_spread {
                best_spread = nearest;
                best = i;
            }
        }
        selected.push(points.swap_remove(best));
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;

    fn sphere_at(center: Vec3, radius: f64) -> Collider {
        let mut c = Collider::sphere(radius);
        c.update_world_data(center, Quat::IDENTITY, Vec3::ZERO);
        c
    }

    fn plane_at(support: Vec3, normal: Vec3) -> Collider {
        let mut c = Collider::plane(normal);
        c.update_world_data(support, Quat::IDENTITY, Vec3::ZERO);
        c
    }

    fn box_at(center: Vec3, half_extents: Vec3, rotation: Quat) -> Collider {
        let mut c = Collider::cuboid(half_extents);
        c.update_world_data(center, rotation, Vec3::ZERO);
        c
    }

    #[test]
    fn test_sphere_sphere_round_trip() {
        // Radius-1 spheres, centers 1.5 apart: one contact, depth 0.5
        let a = sphere_at(Vec3::ZERO, 1.0);
        let b = sphere_at(Vec3::new(1.5, 0.0, 0.0), 1.0);
        let m = collide(&a, &b, Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)).expect("overlap");
        assert_eq!(m.points.len(), 1);
        assert!((m.points[0].depth - 0.5).abs() < 1e-12);
        assert!((m.normal - Vec3::UNIT_X).length() < 1e-12);
        assert!((m.points[0].point_on_a - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
        assert!((m.points[0].point_on_b - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_sphere_sphere_separated() {
        let a = sphere_at(Vec3::ZERO, 1.0);
        let b = sphere_at(Vec3::new(2.5, 0.0, 0.0), 1.0);
        assert!(collide(&a, &b, Vec3::ZERO, Vec3::new(2.5, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_sphere_plane_normal_points_into_plane() {
        let s = sphere_at(Vec3::new(0.0, 0.4, 0.0), 0.5);
        let p = plane_at(Vec3::ZERO, Vec3::UNIT_Y);
        let m = collide(&s, &p, Vec3::new(0.0, 0.4, 0.0), Vec3::ZERO).expect("overlap");
        // A is the sphere above the plane: A-to-B normal points down
        assert!((m.normal - -Vec3::UNIT_Y).length() < 1e-12);
        assert!((m.points[0].depth - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_plane_sphere_normal_points_at_sphere() {
        let p = plane_at(Vec3::ZERO, Vec3::UNIT_Y);
        let s = sphere_at(Vec3::new(0.0, 0.4, 0.0), 0.5);
        let m = collide(&p, &s, Vec3::ZERO, Vec3::new(0.0, 0.4, 0.0)).expect("overlap");
        assert!((m.normal - Vec3::UNIT_Y).length() < 1e-12);
        assert!((m.points[0].depth - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_below_plane_uses_lesser_overshoot_side() {
        // Sphere center slightly below the plane: treated as colliding from
        // below (the documented approximation)
        let p = plane_at(Vec3::ZERO, Vec3::UNIT_Y);
        let s = sphere_at(Vec3::new(0.0, -0.2, 0.0), 0.5);
        let m = collide(&p, &s, Vec3::ZERO, Vec3::new(0.0, -0.2, 0.0)).expect("overlap");
        assert!((m.normal - -Vec3::UNIT_Y).length() < 1e-12);
        assert!((m.points[0].depth - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_box_face_contact() {
        let s = sphere_at(Vec3::new(1.3, 0.0, 0.0), 0.5);
        let b = box_at(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Quat::IDENTITY);
        let m = collide(&s, &b, Vec3::new(1.3, 0.0, 0.0), Vec3::ZERO).expect("overlap");
        assert_eq!(m.points.len(), 1);
        // Sphere is A and sits on +x of the box: A-to-B normal is -x
        assert!((m.normal - -Vec3::UNIT_X).length() < 1e-12);
        assert!((m.points[0].depth - 0.2).abs() < 1e-12);
        assert!((m.points[0].point_on_b - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_box_sphere_center_inside() {
        let b = box_at(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), Quat::IDENTITY);
        let s = sphere_at(Vec3::new(0.8, 0.0, 0.0), 0.25);
        let m = collide(&b, &s, Vec3::ZERO, Vec3::new(0.8, 0.0, 0.0)).expect("overlap");
        // Sphere (B) exits through the +x face
        assert!((m.normal - Vec3::UNIT_X).length() < 1e-12);
        assert!((m.points[0].depth - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_plane_box_contact_per_vertex() {
        // Unit cube straddling a ground plane: the four bottom vertices
        // survive the discard clip
        let p = plane_at(Vec3::ZERO, Vec3::UNIT_Y);
        let b = box_at(Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        let m = collide(&p, &b, Vec3::ZERO, Vec3::new(0.0, 0.4, 0.0)).expect("overlap");
        assert_eq!(m.points.len(), 4);
        for point in &m.points {
            assert!((point.depth - 0.1).abs() < 1e-12);
            assert!((point.point_on_a.y).abs() < 1e-12, "plane-side point on plane");
        }
        assert!((m.normal - Vec3::UNIT_Y).length() < 1e-12);
    }

    #[test]
    fn test_box_plane_separated() {
        let b = box_at(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        let p = plane_at(Vec3::ZERO, Vec3::UNIT_Y);
        assert!(collide(&b, &p, Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO).is_none());
    }

    #[test]
    fn test_box_box_manifold_bounds() {
        let a = box_at(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        let b = box_at(Vec3::new(0.0, 0.9, 0.0), Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        let m = collide(&a, &b, Vec3::ZERO, Vec3::new(0.0, 0.9, 0.0)).expect("overlap");
        assert!(
            (1..=4).contains(&m.points.len()),
            "contact count {} out of bounds",
            m.points.len()
        );
        for point in &m.points {
            assert!(point.depth >= 0.0, "depth must be non-negative");
        }
        assert!((m.normal - Vec3::UNIT_Y).length() < 1e-12);
        assert!((m.max_depth() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_box_box_rotated_still_bounded() {
        // A twisted overlap whose clipped polygon has more than four
        // vertices before reduction
        let a = box_at(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        let rot = Quat::from_axis_angle(Vec3::UNIT_Y, 0.6);
        let b = box_at(Vec3::new(0.4, 0.8, 0.1), Vec3::new(0.5, 0.5, 0.5), rot);
        let m = collide(&a, &b, Vec3::ZERO, Vec3::new(0.4, 0.8, 0.1)).expect("boxes overlap");
        assert!(
            (1..=4).contains(&m.points.len()),
            "manifold has {} points",
            m.points.len()
        );
        for point in &m.points {
            assert!(point.depth >= 0.0);
        }
    }

    #[test]
    fn test_reduce_contacts_keeps_deepest_and_spread() {
        // Hexagonal survivor set: reduction must keep the deepest point and
        // come back down to four
        let points = vec![
            (Vec3::new(1.0, 0.0, 0.0), 0.1),
            (Vec3::new(0.5, 0.0, 0.9), 0.2),
            (Vec3::new(-0.5, 0.0, 0.9), 0.7),
            (Vec3::new(-1.0, 0.0, 0.0), 0.3),
            (Vec3::new(-0.5, 0.0, -0.9), 0.2),
            (Vec3::new(0.5, 0.0, -0.9), 0.1),
        ];
        let reduced = reduce_contacts(points);
        assert_eq!(reduced.len(), 4);
        assert!(
            reduced.iter().any(|&(p, d)| d == 0.7 && p.x == -0.5),
            "deepest point must survive reduction"
        );
        // Greedy max-min selection never returns two coincident points
        for i in 0..reduced.len() {
            for j in (i + 1)..reduced.len() {
                assert!((reduced[i].0 - reduced[j].0).length() > 0.5);
            }
        }
    }

    #[test]
    fn test_box_box_separated() {
        let a = box_at(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        let b = box_at(Vec3::new(2.5, 0.0, 0.0), Vec3::new(0.5, 0.5, 0.5), Quat::IDENTITY);
        assert!(collide(&a, &b, Vec3::new(0.5, 0.0, 0.0), Vec3::new(2.5, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_plane_plane_never_collides() {
        let a = plane_at(Vec3::ZERO, Vec3::UNIT_Y);
        let b = plane_at(Vec3::new(0.0, 1.0, 0.0), Vec3::UNIT_X);
        assert!(collide(&a, &b, Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)).is_none());
    }

    #[test]
    fn test_tangent_basis_orthonormal() {
        for normal in [
            Vec3::UNIT_X,
            Vec3::UNIT_Y,
            Vec3::UNIT_Z,
            -Vec3::UNIT_Y,
            Vec3::new(1.0, 1.0, 1.0).normalize(),
            Vec3::new(-0.2, 0.9, 0.1).normalize(),
        ] {
            let (t1, t2) = tangent_basis(normal);
            assert!((t1.length() - 1.0).abs() < 1e-12);
            assert!((t2.length() - 1.0).abs() < 1e-12);
            assert!(t1.dot(normal).abs() < 1e-12);
            assert!(t2.dot(normal).abs() < 1e-12);
            assert!(t1.dot(t2).abs() < 1e-12);
        }
    }

    #[test]
    fn test_offsets_relative_to_body_centers() {
        let a = sphere_at(Vec3::new(0.0, 1.0, 0.0), 1.0);
        let b = sphere_at(Vec3::new(0.0, 2.5, 0.0), 1.0);
        // Body centers differ from collider centers (collider offset)
        let m = collide(&a, &b, Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.0, 3.0, 0.0)).unwrap();
        let p = m.points[0];
        assert!((p.offset_a - (p.point_on_a - Vec3::new(0.0, 0.5, 0.0))).length() < 1e-12);
        assert!((p.offset_b - (p.point_on_b - Vec3::new(0.0, 3.0, 0.0))).length() < 1e-12);
    }
}
