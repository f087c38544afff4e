//! Velocity Constraint Rows
//!
//! Each contact point contributes three rows: one penetration row along the
//! contact normal and two friction rows along the tangent basis. A row is a
//! 1x12 Jacobian acting on the stacked velocities of the two bodies
//! `[v_a, w_a, v_b, w_b]`, solved iteratively (sequential impulses) with an
//! accumulated multiplier that is clamped per row kind:
//!
//! * penetration: `lambda >= 0` (contacts push, never pull)
//! * friction: `|lambda| <= mu * lambda_normal` (Coulomb cone, boxed per
//!   tangent), where `lambda_normal` is read from the paired penetration
//!   row each iteration
//!
//! Rows are rebuilt from scratch every step; multipliers are not warm
//! started.

use crate::body::RigidBody;
use crate::math::Vec3;

/// How a row's accumulated multiplier is clamped.
#[derive(Clone, Copy, Debug)]
pub enum ConstraintKind {
    /// Non-penetration along the contact normal
    Penetration,
    /// Tangential friction, bounded by the referenced penetration row
    Friction {
        /// Index of the paired penetration row in the step's row list
        normal_row: usize,
        /// Combined kinetic friction coefficient
        coefficient: f64,
    },
}

/// One velocity constraint row between two bodies.
#[derive(Clone, Copy, Debug)]
pub struct Constraint {
    /// Arena index of body A
    pub body_a: usize,
    /// Arena index of body B
    pub body_b: usize,
    /// Jacobian blocks `[v_a, w_a, v_b, w_b]`
    pub jacobian: [Vec3; 4],
    /// Velocity bias (restitution for penetration rows, zero for friction)
    pub bias: f64,
    pub kind: ConstraintKind,
    /// Accumulated multiplier over the solver iterations
    pub lambda: f64,
}

impl Constraint {
    /// Build a row along `direction` (unit, pointing from A to B) at a
    /// contact with the given body-center offsets.
    ///
    /// The Jacobian measures the relative velocity of B with respect to A
    /// at the contact, projected on `direction`:
    /// `J V = (v_b + w_b x r_b - v_a - w_a x r_a) . direction`.
    pub fn row(
        body_a: usize,
        body_b: usize,
        direction: Vec3,
        offset_a: Vec3,
        offset_b: Vec3,
        bias: f64,
        kind: ConstraintKind,
    ) -> Self {
        Self {
            body_a,
            body_b,
            jacobian: [
                -direction,
                -offset_a.cross(direction),
                direction,
                offset_b.cross(direction),
            ],
            bias,
            kind,
            lambda: 0.0,
        }
    }

    /// `J V`: the constrained relative velocity.
    pub fn relative_velocity(&self, a: &RigidBody, b: &RigidBody) -> f64 {
        self.jacobian[0].dot(a.velocity)
            + self.jacobian[1].dot(a.angular_velocity)
            + self.jacobian[2].dot(b.velocity)
            + self.jacobian[3].dot(b.angular_velocity)
    }

    /// `J M^-1 J^T`: the effective mass seen by this row. Zero when both
    /// bodies are static (such rows are never constructed).
    pub fn effective_mass(&self, a: &RigidBody, b: &RigidBody) -> f64 {
        let linear = self.jacobian[0].dot(self.jacobian[0]) * a.inertia().inverse_mass()
            + self.jacobian[2].dot(self.jacobian[2]) * b.inertia().inverse_mass();
        let angular = self
            .jacobian[1]
            .dot(a.inverse_inertia_world().mul_vec(self.jacobian[1]))
            + self
                .jacobian[3]
                .dot(b.inverse_inertia_world().mul_vec(self.jacobian[3]));
        linear + angular
    }

    /// Apply a multiplier increment to both bodies' velocities.
    pub fn apply(&self, a: &mut RigidBody, b: &mut RigidBody, delta_lambda: f64) {
        a.velocity += self.jacobian[0] * (a.inertia().inverse_mass() * delta_lambda);
        a.angular_velocity +=
            a.inverse_inertia_world().mul_vec(self.jacobian[1]) * delta_lambda;
        b.velocity += self.jacobian[2] * (b.inertia().inverse_mass() * delta_lambda);
        b.angular_velocity +=
            b.inverse_inertia_world().mul_vec(self.jacobian[3]) * delta_lambda;
    }
}
