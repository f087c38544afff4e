//! Rigid Body
//!
//! Dynamic state for one simulated body: pose, velocities, accumulated
//! forces, mass distribution, surface material, and an optional attached
//! collider. Static bodies are expressed through an all-zero
//! [`InertiaShape`], not a separate type, so integration and the solver
//! treat them uniformly (multiplying by zero inverse mass).

use crate::collider::Collider;
use crate::inertia::InertiaShape;
use crate::material::Material;
use crate::math::{Mat3, Quat, Vec3};

/// A simulated rigid body.
///
/// Forces accumulate between steps via [`apply_force`](Self::apply_force)
/// and friends, and are consumed (reset to zero) by velocity integration at
/// the start of each step.
#[derive(Clone, Copy, Debug)]
pub struct RigidBody {
    /// Center position, world space
    pub position: Vec3,
    /// Orientation, kept unit length by position integration
    pub rotation: Quat,
    /// Linear velocity
    pub velocity: Vec3,
    /// Angular velocity (axis scaled by radians per second)
    pub angular_velocity: Vec3,
    /// Surface material, used when resolving contacts
    pub material: Material,
    force: Vec3,
    torque: Vec3,
    inertia: InertiaShape,
    collider: Option<Collider>,
    collider_offset: Vec3,
    pub(crate) destroyed: bool,
}

impl RigidBody {
    /// Create a body at rest at `position` with the given mass distribution.
    pub fn new(position: Vec3, inertia: InertiaShape) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            material: Material::default(),
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            inertia,
            collider: None,
            collider_offset: Vec3::ZERO,
            destroyed: false,
        }
    }

    /// Attach a collider, consuming and returning the body (builder style).
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self.update_collider();
        self
    }

    /// Offset the attached collider from the body center, local space.
    pub fn with_collider_offset(mut self, offset: Vec3) -> Self {
        self.collider_offset = offset;
        self.update_collider();
        self
    }

    /// Set the surface material (builder style).
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set an initial orientation (builder style).
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation.normalize();
        self.update_collider();
        self
    }

    pub fn inertia(&self) -> &InertiaShape {
        &self.inertia
    }

    pub fn is_static(&self) -> bool {
        self.inertia.is_static()
    }

    pub fn collider(&self) -> Option<&Collider> {
        self.collider.as_ref()
    }

    // ------------------------------------------------------------------
    // Force application
    // ------------------------------------------------------------------

    /// Accumulate a force acting at a world-space point. Off-center points
    /// also accumulate torque.
    pub fn apply_force(&mut self, force: Vec3, point: Vec3) {
        self.force += force;
        self.torque += force.cross(point - self.position);
    }

    /// Accumulate a force through the center of mass (no torque).
    pub fn apply_central_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Apply an instantaneous impulse at a world-space point, changing the
    /// velocities directly rather than accumulating.
    pub fn apply_impulse_at(&mut self, impulse: Vec3, point: Vec3) {
        self.velocity += impulse * self.inertia.inverse_mass();
        let angular_impulse = (point - self.position).cross(impulse);
        self.angular_velocity += self.inverse_inertia_world().mul_vec(angular_impulse);
    }

    // ------------------------------------------------------------------
    // Integration
    // ------------------------------------------------------------------

    /// Inverse inertia tensor rotated into world space: `R * I^-1 * R^T`.
    pub fn inverse_inertia_world(&self) -> Mat3 {
        let r = Mat3::from_quat(self.rotation);
        r.mul_mat(self.inertia.inverse_inertia()).mul_mat(r.transpose())
    }

    /// Convert accumulated forces into velocity changes and clear the
    /// accumulators. Static bodies only clear.
    pub(crate) fn integrate_velocities(&mut self, dt: f64) {
        if !self.is_static() {
            self.velocity += self.force * (self.inertia.inverse_mass() * dt);
            self.angular_velocity += self.inverse_inertia_world().mul_vec(self.torque) * dt;
        }
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    /// Advance the pose by the current velocities. The quaternion is
    /// renormalized every step; the additive update drifts off the unit
    /// sphere otherwise.
    pub(crate) fn integrate_position(&mut self, dt: f64) {
        if self.is_static() {
            return;
        }
        self.position += self.velocity * dt;
        let spin = Quat::from_vec(self.angular_velocity)
            .mul(self.rotation)
            .scale(0.5 * dt);
        self.rotation = self.rotation.add(spin).normalize();
        self.update_collider();
    }

    /// Refresh the attached collider's world-space data from the pose.
    pub(crate) fn update_collider(&mut self) {
        if let Some(collider) = self.collider.as_mut() {
            collider.update_world_data(self.position, self.rotation, self.collider_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::EPSILON;

    #[test]
    fn test_central_force_produces_no_torque() {
        let mut body = RigidBody::new(Vec3::ZERO, InertiaShape::sphere(2.0, 1.0));
        body.apply_central_force(Vec3::new(0.0, -9.81 * 2.0, 0.0));
        body.integrate_velocities(1.0);
        assert!((body.velocity.y - -9.81).abs() < 1e-12);
        assert!(body.angular_velocity.length() < EPSILON, "no spin from central force");
    }

    #[test]
    fn test_off_center_force_produces_torque() {
        let mut body = RigidBody::new(Vec3::ZERO, InertiaShape::sphere(1.0, 1.0));
        body.apply_force(Vec3::UNIT_Y, Vec3::new(1.0, 0.0, 0.0));
        body.integrate_velocities(1.0);
        assert!(body.velocity.length() > 0.0);
        assert!(body.angular_velocity.length() > 0.0, "lever arm must spin the body");
    }

    #[test]
    fn test_force_accumulators_cleared_after_integration() {
        let mut body = RigidBody::new(Vec3::ZERO, InertiaShape::sphere(1.0, 1.0));
        body.apply_central_force(Vec3::new(10.0, 0.0, 0.0));
        body.integrate_velocities(0.5);
        let vx = body.velocity.x;
        body.integrate_velocities(0.5);
        assert!((body.velocity.x - vx).abs() < 1e-12, "forces must not persist");
    }

    #[test]
    fn test_static_body_ignores_forces() {
        let mut body = RigidBody::new(Vec3::ZERO, InertiaShape::static_shape());
        body.apply_central_force(Vec3::new(0.0, -100.0, 0.0));
        body.integrate_velocities(1.0);
        body.integrate_position(1.0);
        assert_eq!(body.velocity, Vec3::ZERO);
        assert_eq!(body.position, Vec3::ZERO);
    }

    #[test]
    fn test_rotation_stays_unit_length() {
        let mut body = RigidBody::new(Vec3::ZERO, InertiaShape::cube(1.0, 1.0));
        body.angular_velocity = Vec3::new(3.0, -2.0, 5.0);
        for _ in 0..1000 {
            body.integrate_position(1.0 / 60.0);
            let q = body.rotation;
            let norm = q.x * q.x + q.y * q.y + q.z * q.z + q.w * q.w;
            assert!((norm - 1.0).abs() < 1e-9, "quaternion drifted: {norm}");
        }
    }

    #[test]
    fn test_impulse_changes_velocity_immediately() {
        let mut body = RigidBody::new(Vec3::ZERO, InertiaShape::sphere(2.0, 1.0));
        body.apply_impulse_at(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO);
        assert!((body.velocity.x - 2.0).abs() < 1e-12);
    }
}
