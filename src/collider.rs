//! Collider Shapes
//!
//! The closed set of collision shapes: sphere, oriented plane, and oriented
//! box. Each shape caches world-space derived data (centers, rotated normals,
//! box vertices and face normals) that is recomputed from the owning body's
//! pose via [`Collider::update_world_data`]. The narrow phase only ever reads
//! this cached data, so it must be refreshed after any pose change and before
//! detection runs.
//!
//! # Box vertex convention
//!
//! The eight vertices of an [`OrientedBox`] follow a fixed ordering that the
//! clipping code in the narrow phase relies on:
//!
//! - indices 0..4 form the "near" face (local -z), counter-clockwise starting
//!   from the (-x, -y) corner,
//! - indices 4..8 form the "far" face (local +z),
//! - vertex `i` and `i + 4` share local x/y.
//!
//! The three cached face normals are derived as cross products of the edges
//! leaving vertex 0 and point along the box's local +x, +y, +z axes in world
//! space.

use crate::math::{Quat, Vec3};

/// Local corner signs in the fixed vertex ordering.
const CORNER_SIGNS: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
];

// ============================================================================
// Sphere
// ============================================================================

/// Sphere collider: world-space center plus radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    /// Center in world space (derived from the body pose)
    pub center: Vec3,
    /// Radius
    pub radius: f64,
}

impl Sphere {
    /// Create a sphere with the given radius. The center is filled in by the
    /// first `update_world_data` call.
    pub fn new(radius: f64) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            center: Vec3::ZERO,
            radius,
        }
    }

    pub(crate) fn update_world_data(&mut self, position: Vec3, rotation: Quat, offset: Vec3) {
        self.center = position + rotation.rotate_vec(offset);
    }
}

// ============================================================================
// OrientedPlane
// ============================================================================

/// Infinite plane collider: a support point plus a normal.
///
/// The original (unrotated) normal given at construction is kept so the
/// world-space normal can be re-derived from the body's orientation each
/// pose change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedPlane {
    /// Point on the plane in world space (derived from the body pose)
    pub support: Vec3,
    /// Normal in the body's local frame, unit length
    pub local_normal: Vec3,
    /// Normal rotated into world space, unit length
    pub world_normal: Vec3,
}

impl OrientedPlane {
    /// Create a plane from its local-frame normal. A zero-length normal is a
    /// construction error; Y-up is used as a fallback in release builds.
    pub fn new(normal: Vec3) -> Self {
        debug_assert!(
            normal.length_squared() > 0.0,
            "plane normal must be non-zero"
        );
        let n = normal.normalize();
        let n = if n == Vec3::ZERO { Vec3::UNIT_Y } else { n };
        Self {
            support: Vec3::ZERO,
            local_normal: n,
            world_normal: n,
        }
    }

    pub(crate) fn update_world_data(&mut self, position: Vec3, rotation: Quat, offset: Vec3) {
        self.support = position + rotation.rotate_vec(offset);
        self.world_normal = rotation.rotate_vec(self.local_normal);
    }

    /// Signed distance from a world-space point to the plane.
    /// Positive on the normal side.
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f64 {
        self.world_normal.dot(point - self.support)
    }

    /// Closest point on the plane to a world-space point
    #[inline]
    pub fn project_point(&self, point: Vec3) -> Vec3 {
        point - self.world_normal * self.distance_to_point(point)
    }
}

// ============================================================================
// OrientedBox
// ============================================================================

/// Oriented box collider with cached world-space vertices and face normals.
///
/// The cache is the dominant per-step cost for box-involving pairs; it is
/// recomputed on every pose change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientedBox {
    /// Center in world space (derived from the body pose)
    pub center: Vec3,
    /// Half-extent on each local axis
    pub half_extents: Vec3,
    /// Orientation in world space (derived from the body pose)
    pub rotation: Quat,
    /// The eight world-space corner vertices in the fixed ordering
    pub vertices: [Vec3; 8],
    /// World-space face normals along the local +x, +y, +z axes
    pub face_normals: [Vec3; 3],
}

impl OrientedBox {
    /// Create a box with the given half-extents. World data is filled in by
    /// the first `update_world_data` call.
    pub fn new(half_extents: Vec3) -> Self {
        debug_assert!(
            half_extents.x > 0.0 && half_extents.y > 0.0 && half_extents.z > 0.0,
            "box half-extents must be positive"
        );
        let mut this = Self {
            center: Vec3::ZERO,
            half_extents,
            rotation: Quat::IDENTITY,
            vertices: [Vec3::ZERO; 8],
            face_normals: [Vec3::ZERO; 3],
        };
        this.recompute();
        this
    }

    pub(crate) fn update_world_data(&mut self, position: Vec3, rotation: Quat, offset: Vec3) {
        self.center = position + rotation.rotate_vec(offset);
        self.rotation = rotation;
        self.recompute();
    }

    /// Recompute the eight vertices and three face normals from the current
    /// center/rotation.
    fn recompute(&mut self) {
        for (i, signs) in CORNER_SIGNS.iter().enumerate() {
            let local = Vec3::new(
                signs[0] * self.half_extents.x,
                signs[1] * self.half_extents.y,
                signs[2] * self.half_extents.z,
            );
            self.vertices[i] = self.center + self.rotation.rotate_vec(local);
        }

        // Edges leaving vertex 0: to 1 (+x), to 3 (+y), to 4 (+z)
        let ex = self.vertices[1] - self.vertices[0];
        let ey = self.vertices[3] - self.vertices[0];
        let ez = self.vertices[4] - self.vertices[0];
        self.face_normals = [
            ey.cross(ez).normalize(),
            ez.cross(ex).normalize(),
            ex.cross(ey).normalize(),
        ];
    }
}

// ============================================================================
// Collider
// ============================================================================

/// Tagged variant over the closed set of collision shapes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    /// Sphere shape
    Sphere(Sphere),
    /// Infinite plane shape
    Plane(OrientedPlane),
    /// Oriented box shape
    Box(OrientedBox),
}

impl Collider {
    /// Sphere collider with the given radius
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere(Sphere::new(radius))
    }

    /// Plane collider with the given local-frame normal
    pub fn plane(normal: Vec3) -> Self {
        Self::Plane(OrientedPlane::new(normal))
    }

    /// Box collider with the given half-extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box(OrientedBox::new(half_extents))
    }

    /// Recompute all world-space derived data from the owning body's pose.
    ///
    /// `offset` is the fixed local offset between the body origin and the
    /// collider origin. Must be called after any pose mutation and before
    /// the narrow phase reads the collider.
    pub fn update_world_data(&mut self, position: Vec3, rotation: Quat, offset: Vec3) {
        match self {
            Self::Sphere(s) => s.update_world_data(position, rotation, offset),
            Self::Plane(p) => p.update_world_data(position, rotation, offset),
            Self::Box(b) => b.update_world_data(position, rotation, offset),
        }
    }
}
