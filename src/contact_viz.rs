//! Debug Contact Visualization
//!
//! Plain-data arrows describing the contacts found in a step, for drawing
//! by a host renderer. Produced only by
//! [`Simulation::update_staggered`](crate::simulation::Simulation::update_staggered);
//! the regular update path skips recording entirely.

use crate::math::Vec3;
use crate::narrow_phase::ContactManifold;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// One contact, drawable as an arrow from `position` along `normal`.
#[derive(Clone, Copy, Debug)]
pub struct ContactArrow {
    /// Contact position on body A's surface, world space
    pub position: Vec3,
    /// Contact normal, pointing from body A to body B
    pub normal: Vec3,
    /// Interpenetration depth at this contact
    pub depth: f64,
}

/// Append one arrow per contact point of a manifold.
pub fn collect_arrows(manifold: &ContactManifold, out: &mut Vec<ContactArrow>) {
    for point in &manifold.points {
        out.push(ContactArrow {
            position: point.point_on_a,
            normal: manifold.normal,
            depth: point.depth,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Collider;
    use crate::math::Quat;
    use crate::narrow_phase::collide;

    #[test]
    fn test_one_arrow_per_contact_point() {
        let mut a = Collider::sphere(1.0);
        a.update_world_data(Vec3::ZERO, Quat::IDENTITY, Vec3::ZERO);
        let mut b = Collider::sphere(1.0);
        b.update_world_data(Vec3::new(1.5, 0.0, 0.0), Quat::IDENTITY, Vec3::ZERO);

        let manifold = collide(&a, &b, Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)).unwrap();
        let mut arrows = Vec::new();
        collect_arrows(&manifold, &mut arrows);
        assert_eq!(arrows.len(), manifold.points.len());
        assert!((arrows[0].depth - 0.5).abs() < 1e-12);
    }
}
