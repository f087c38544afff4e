//! Mass and Inertia Descriptions
//!
//! `InertiaShape` stores the *inverse* mass and the *inverse* inertia tensor
//! so that immovable bodies are represented by exact zeros instead of an
//! infinite mass. Static bodies therefore fall out of every impulse formula
//! without any special-casing or division.
//!
//! # Factories
//!
//! - [`InertiaShape::static_shape`] — immovable (inverse mass/inertia zero)
//! - [`InertiaShape::sphere`] — solid sphere, `I = 2/5 m r^2`
//! - [`InertiaShape::cube`] — solid cube, `I = m s^2 / 6`
//! - [`InertiaShape::cuboid`] — solid box, `Ixx = m (h^2 + d^2) / 12`, etc.
//!
//! Mass must be strictly positive for the non-static factories; this is a
//! caller precondition checked with a debug assertion, not a runtime error.

use crate::math::Mat3;

/// Immutable inverse mass and inverse inertia tensor of a rigid body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaShape {
    inverse_mass: f64,
    inverse_inertia: Mat3,
}

impl InertiaShape {
    /// Immovable body: inverse mass and inverse inertia are exactly zero,
    /// so no impulse can ever change its velocity.
    pub const fn static_shape() -> Self {
        Self {
            inverse_mass: 0.0,
            inverse_inertia: Mat3::ZERO,
        }
    }

    /// Solid sphere of the given mass and radius.
    pub fn sphere(mass: f64, radius: f64) -> Self {
        debug_assert!(mass > 0.0, "sphere mass must be positive");
        debug_assert!(radius > 0.0, "sphere radius must be positive");
        let i = 0.4 * mass * radius * radius;
        Self {
            inverse_mass: 1.0 / mass,
            inverse_inertia: Mat3::diagonal(1.0 / i, 1.0 / i, 1.0 / i),
        }
    }

    /// Solid cube with the given mass and edge length.
    pub fn cube(mass: f64, side: f64) -> Self {
        debug_assert!(mass > 0.0, "cube mass must be positive");
        debug_assert!(side > 0.0, "cube side must be positive");
        let i = mass * side * side / 6.0;
        Self {
            inverse_mass: 1.0 / mass,
            inverse_inertia: Mat3::diagonal(1.0 / i, 1.0 / i, 1.0 / i),
        }
    }

    /// Solid box with the given mass and full extents (width, height, depth).
    pub fn cuboid(mass: f64, width: f64, height: f64, depth: f64) -> Self {
        debug_assert!(mass > 0.0, "cuboid mass must be positive");
        debug_assert!(
            width > 0.0 && height > 0.0 && depth > 0.0,
            "cuboid extents must be positive"
        );
        let f = mass / 12.0;
        let ix = f * (height * height + depth * depth);
        let iy = f * (width * width + depth * depth);
        let iz = f * (width * width + height * height);
        Self {
            inverse_mass: 1.0 / mass,
            inverse_inertia: Mat3::diagonal(1.0 / ix, 1.0 / iy, 1.0 / iz),
        }
    }

    /// Inverse mass (zero for static bodies)
    #[inline]
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// Inverse inertia tensor in the body's local frame
    #[inline]
    pub fn inverse_inertia(&self) -> Mat3 {
        self.inverse_inertia
    }

    /// Whether this shape describes an immovable body
    #[inline]
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }
}
