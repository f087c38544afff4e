//! Surface Materials
//!
//! Per-body surface properties consumed by the constraint solver: restitution
//! for the velocity bias of penetration rows and three friction coefficients
//! for the Coulomb clamp of friction rows.
//!
//! When two bodies touch, their materials are combined by averaging each
//! coefficient pair.

/// Surface properties of a rigid body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// Coefficient of restitution (0 = perfectly inelastic, 1 = elastic)
    pub restitution: f64,
    /// Kinetic (sliding) friction coefficient
    pub kinetic_friction: f64,
    /// Spinning friction coefficient (resistance about the contact normal)
    pub spinning_friction: f64,
    /// Rolling friction coefficient (resistance about the contact tangents)
    pub rolling_friction: f64,
}

impl Material {
    /// Create a material from explicit coefficients
    pub const fn new(
        restitution: f64,
        kinetic_friction: f64,
        spinning_friction: f64,
        rolling_friction: f64,
    ) -> Self {
        Self {
            restitution,
            kinetic_friction,
            spinning_friction,
            rolling_friction,
        }
    }

    /// Wood: moderate friction, little bounce
    pub const fn wood() -> Self {
        Self::new(0.2, 0.45, 0.05, 0.02)
    }

    /// Metal: low friction, some bounce
    pub const fn metal() -> Self {
        Self::new(0.25, 0.2, 0.02, 0.01)
    }

    /// Rubber: high friction, very bouncy
    pub const fn rubber() -> Self {
        Self::new(0.8, 0.9, 0.1, 0.05)
    }

    /// Ice: near-frictionless, almost no bounce
    pub const fn ice() -> Self {
        Self::new(0.05, 0.02, 0.01, 0.005)
    }

    /// Combine two materials for a contacting pair by averaging each
    /// coefficient.
    pub fn combined(&self, other: &Material) -> Material {
        Material {
            restitution: (self.restitution + other.restitution) * 0.5,
            kinetic_friction: (self.kinetic_friction + other.kinetic_friction) * 0.5,
            spinning_friction: (self.spinning_friction + other.spinning_friction) * 0.5,
            rolling_friction: (self.rolling_friction + other.rolling_friction) * 0.5,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.2, 0.5, 0.05, 0.02)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_is_average() {
        let a = Material::new(0.0, 1.0, 0.0, 0.0);
        let b = Material::new(1.0, 0.0, 0.2, 0.4);
        let c = a.combined(&b);
        assert_eq!(c.restitution, 0.5);
        assert_eq!(c.kinetic_friction, 0.5);
        assert_eq!(c.spinning_friction, 0.1);
        assert_eq!(c.rolling_friction, 0.2);
    }

    #[test]
    fn test_combined_is_symmetric() {
        let a = Material::rubber();
        let b = Material::ice();
        assert_eq!(a.combined(&b), b.combined(&a));
    }
}
