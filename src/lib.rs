//! # impulse-physics
//!
//! A small 3D rigid-body dynamics engine: impulse-based contact
//! resolution over spheres, oriented boxes and infinite planes, driven on
//! a fixed timestep.
//!
//! | Piece | Approach |
//! |-------|----------|
//! | Broad phase | none; brute-force all pairs |
//! | Narrow phase | per-pair handlers, SAT + polygon clipping for boxes |
//! | Solver | sequential impulses, Coulomb friction, restitution bias |
//! | De-penetration | direct positional correction |
//! | Integration | symplectic Euler, renormalized quaternion update |
//!
//! # Features
//!
//! | Feature | Default | Effect |
//! |---------|---------|--------|
//! | `std` | yes | standard library; disable for `no_std` + `alloc` |
//! | `parallel` | no | rayon-parallel narrow phase (implies `std`) |
//!
//! # Example
//!
//! ```
//! use impulse_physics::prelude::*;
//!
//! let mut sim = Simulation::default();
//!
//! // Static ground plane at the origin, facing up
//! sim.add_body(
//!     RigidBody::new(Vec3::ZERO, InertiaShape::static_shape())
//!         .with_collider(Collider::plane(Vec3::UNIT_Y)),
//! );
//!
//! // A unit-diameter ball dropped from two meters
//! let ball = sim.add_body(
//!     RigidBody::new(Vec3::new(0.0, 2.0, 0.0), InertiaShape::sphere(1.0, 0.5))
//!         .with_collider(Collider::sphere(0.5))
//!         .with_material(Material::rubber()),
//! );
//!
//! for _ in 0..600 {
//!     sim.update(1.0 / 60.0);
//! }
//!
//! let (position, _rotation) = sim.pose(ball)?;
//! assert!(position.y < 1.0, "the ball has come down to rest");
//! # Ok::<(), impulse_physics::PhysicsError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod body;
pub mod collider;
pub mod constraint;
pub mod contact_viz;
pub mod error;
pub mod geometry;
pub mod inertia;
pub mod material;
pub mod math;
pub mod narrow_phase;
pub mod simulation;

pub use body::RigidBody;
pub use collider::Collider;
pub use contact_viz::ContactArrow;
pub use error::PhysicsError;
pub use inertia::InertiaShape;
pub use material::Material;
pub use math::{Mat3, Quat, Vec3};
pub use narrow_phase::{ContactManifold, ContactPoint};
pub use simulation::{BodyHandle, Simulation, SimulationConfig};

/// Everything a typical consumer needs.
pub mod prelude {
    pub use crate::body::RigidBody;
    pub use crate::collider::Collider;
    pub use crate::contact_viz::ContactArrow;
    pub use crate::error::PhysicsError;
    pub use crate::inertia::InertiaShape;
    pub use crate::material::Material;
    pub use crate::math::{Mat3, Quat, Vec3};
    pub use crate::simulation::{BodyHandle, Simulation, SimulationConfig};
}
